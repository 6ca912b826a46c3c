//! HTTP surface with deferred startup lifecycle.
//!
//! `new()` assembles shared state, `start()` binds the TCP listener, and
//! `serve()` accepts connections until the shutdown future resolves. The
//! split lets the binary wire delegates and workers between construction
//! and listening.
//!
//! Transport-level middleware ordering (outermost to innermost):
//! request-id assignment, trace spans, timeout, request-id propagation.

pub mod handlers;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::http::header::HeaderName;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServiceConfig;
use crate::pipeline::DispatchTable;
use self::handlers::{
    config_handler, device_add_handler, device_read_handler, ping_handler, reading_add_handler,
    version_handler, AppState,
};

/// Manages the HTTP server lifecycle.
pub struct NetworkModule {
    config: Arc<ServiceConfig>,
    table: Arc<DispatchTable>,
    listener: Option<TcpListener>,
}

impl NetworkModule {
    /// Creates the module without binding any port.
    #[must_use]
    pub fn new(config: Arc<ServiceConfig>, table: Arc<DispatchTable>) -> Self {
        Self {
            config,
            table,
            listener: None,
        }
    }

    /// Assembles the axum router with all routes and middleware.
    ///
    /// Routes:
    /// - `GET /api/v2/ping` — plain-text liveness check
    /// - `GET /api/v2/version` — service version
    /// - `GET /api/v2/config` — effective configuration
    /// - `POST /api/v2/device` — register a device
    /// - `POST /api/v2/device/read` — read a device by id
    /// - `POST /api/v2/reading` — submit a reading
    #[must_use]
    pub fn build_router(&self) -> Router {
        let state = AppState {
            table: Arc::clone(&self.table),
            config: Arc::clone(&self.config),
        };

        let x_request_id = HeaderName::from_static("x-request-id");

        Router::new()
            .route("/api/v2/ping", get(ping_handler))
            .route("/api/v2/version", get(version_handler))
            .route("/api/v2/config", get(config_handler))
            .route("/api/v2/device", post(device_add_handler))
            .route("/api/v2/device/read", post(device_read_handler))
            .route("/api/v2/reading", post(reading_add_handler))
            .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
            .layer(TimeoutLayer::new(Duration::from_millis(
                self.config.request_timeout_ms,
            )))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid))
            .with_state(state)
    }

    /// Binds the TCP listener to the configured host and port.
    ///
    /// Returns the actual bound port, which may differ from the
    /// configured one when port 0 is used (OS-assigned).
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound.
    pub async fn start(&mut self) -> anyhow::Result<u16> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = TcpListener::bind(&addr).await?;
        let port = listener.local_addr()?.port();

        info!("TCP listener bound to {}:{}", self.config.host, port);

        self.listener = Some(listener);
        Ok(port)
    }

    /// Serves requests until the shutdown future resolves.
    ///
    /// # Errors
    ///
    /// Returns an error if `start()` was not called first or the server
    /// fails while accepting connections.
    pub async fn serve<F>(&mut self, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = self
            .listener
            .take()
            .ok_or_else(|| anyhow::anyhow!("serve() called before start()"))?;
        let router = self.build_router();

        info!(service = %self.config.service_name, "accepting connections");
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;
        info!("server stopped");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use sensormesh_core::behavior::{Action, ApiVersion, Behavior, ResourceKind};
    use sensormesh_core::messages::DeviceAddRequest;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::pipeline::EchoDelegate;

    fn test_module() -> NetworkModule {
        let mut table = DispatchTable::new();
        table.register::<DeviceAddRequest>(
            Behavior::new(ApiVersion::V2, ResourceKind::Device, Action::Add),
            Arc::new(EchoDelegate),
        );
        let config = ServiceConfig {
            port: 0,
            ..ServiceConfig::default()
        };
        NetworkModule::new(Arc::new(config), Arc::new(table))
    }

    async fn body_json(body: Body) -> Value {
        let bytes = to_bytes(body, usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn ping_route_responds_with_pong() {
        let router = test_module().build_router();
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/v2/ping")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"pong");
    }

    #[tokio::test]
    async fn device_route_round_trips_the_envelope() {
        let router = test_module().build_router();
        let raw = json!({"requestId": "r1", "name": "sensor-1"});
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v2/device")
                    .header("content-type", "application/json")
                    .body(Body::from(raw.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response.into_body()).await;
        assert_eq!(json["requestId"], "r1");
        assert_eq!(json["status"], 0);
        assert_eq!(json["payload"], raw);
    }

    #[tokio::test]
    async fn validator_failure_returns_error_envelope_with_400() {
        let router = test_module().build_router();
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v2/device")
                    .header("content-type", "application/json")
                    .body(Body::from(r#""not a request""#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response.into_body()).await;
        assert_eq!(json["requestId"], "");
        assert_eq!(json["status"], 20001);
        assert_eq!(json["payload"], json!("not a request"));
    }

    #[tokio::test]
    async fn responses_carry_a_request_id_header() {
        let router = test_module().build_router();
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/v2/ping")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn start_binds_an_ephemeral_port() {
        let mut module = test_module();
        let port = module.start().await.unwrap();
        assert_ne!(port, 0);
    }
}
