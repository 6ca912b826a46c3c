//! Service entry point: configuration, wiring, and lifecycle.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use sensormesh_core::behavior::{Action, ApiVersion, Behavior, ResourceKind};
use sensormesh_core::messages::{DeviceAddRequest, DeviceReadRequest, ReadingAddRequest};
use sensormesh_core::status;
use sensormesh_server::domain::{
    DeviceAddDelegate, DeviceReadDelegate, DeviceStore, ReadingAddDelegate,
};
use sensormesh_server::{DispatchTable, Heartbeat, NetworkModule, ServiceConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "sensormesh-server", about = "Sensormesh core service")]
struct Args {
    /// Path to the JSON configuration file.
    #[arg(long, env = "SENSORMESH_CONFIG")]
    config: Option<String>,

    /// Override the configured port.
    #[arg(long, env = "SENSORMESH_PORT")]
    port: Option<u16>,
}

/// Registers every supported behavior with its delegate.
fn build_dispatch_table(store: &Arc<DeviceStore>) -> DispatchTable {
    let mut table = DispatchTable::new();
    table.register::<DeviceAddRequest>(
        Behavior::new(ApiVersion::V2, ResourceKind::Device, Action::Add),
        Arc::new(DeviceAddDelegate::new(Arc::clone(store))),
    );
    table.register::<DeviceReadRequest>(
        Behavior::new(ApiVersion::V2, ResourceKind::Device, Action::Read),
        Arc::new(DeviceReadDelegate::new(Arc::clone(store))),
    );
    table.register::<ReadingAddRequest>(
        Behavior::new(ApiVersion::V2, ResourceKind::Reading, Action::Add),
        Arc::new(ReadingAddDelegate::new(Arc::clone(store))),
    );
    table
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let start = Instant::now();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ServiceConfig::from_file(path)
            .with_context(|| format!("could not load configuration file `{path}`"))?,
        None => ServiceConfig::default(),
    };
    if let Some(port) = args.port {
        config.port = port;
    }

    // A bad status constant is a deployment defect; fail before listening.
    status::registry()
        .verify()
        .context("status registry verification failed")?;

    info!(
        service = %config.service_name,
        version = sensormesh_core::SERVICE_VERSION,
        "starting"
    );

    let store = Arc::new(DeviceStore::new());
    let table = Arc::new(build_dispatch_table(&store));
    let config = Arc::new(config);

    let mut heartbeat = Heartbeat::start(config.heartbeat.clone());

    let mut network = NetworkModule::new(Arc::clone(&config), table);
    let port = network.start().await?;

    info!(port, elapsed = ?start.elapsed(), "service started");

    network
        .serve(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;

    heartbeat.stop().await;
    Ok(())
}
