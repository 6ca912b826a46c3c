//! Heartbeat worker: periodic liveness log emission.
//!
//! Runs concurrently with request handling and shares no state with the
//! pipeline. It is purely an external liveness signal.

use std::time::Duration;

use tokio::sync::oneshot;
use tracing::info;

use crate::config::HeartbeatConfig;

/// Handle to the running heartbeat task.
pub struct Heartbeat {
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl Heartbeat {
    /// Spawns the heartbeat loop. The first beat fires after one full
    /// interval, not at startup.
    #[must_use]
    pub fn start(config: HeartbeatConfig) -> Self {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(Duration::from_millis(config.interval_ms.max(1)));
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        info!("{}", config.message);
                    }
                    _ = &mut shutdown_rx => {
                        break;
                    }
                }
            }
        });

        Self {
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    /// Stops the heartbeat, waiting for the task to finish.
    pub async fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
