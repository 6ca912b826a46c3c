//! HTTP endpoint handlers.
//!
//! Each resource route is bound to one fixed [`Behavior`] and forwards
//! the decoded JSON body to the dispatch table. The mapping from the
//! service's layered status codes to HTTP status codes lives here, on the
//! transport side — the pipeline never decides HTTP semantics.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response as HttpResponse};
use axum::Json;
use sensormesh_core::behavior::{Action, ApiVersion, Behavior, ResourceKind};
use sensormesh_core::status::{Status, StatusLayer};
use serde_json::{json, Value};

use crate::config::ServiceConfig;
use crate::pipeline::DispatchTable;

/// Shared state for all handlers.
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<DispatchTable>,
    pub config: Arc<ServiceConfig>,
}

/// Maps a service status to the HTTP status for its response.
///
/// Success is 200. Application-layer faults are the caller's fault (400),
/// domain-layer rule violations conflict with current state (409), and
/// infrastructure faults are 404 for missing entities, 500 otherwise.
#[must_use]
pub fn http_status_for(status: Status) -> StatusCode {
    if status.is_success() {
        return StatusCode::OK;
    }
    match status.layer() {
        Some(StatusLayer::Application | StatusLayer::UserInterface) => StatusCode::BAD_REQUEST,
        Some(StatusLayer::Domain) => StatusCode::CONFLICT,
        Some(StatusLayer::Infrastructure) => {
            if status == Status::PERSISTENCE_NOT_FOUND {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
        None => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

async fn dispatch(state: &AppState, behavior: Behavior, raw: Value) -> HttpResponse {
    let (response, status) = state.table.dispatch(behavior, raw).await;
    (http_status_for(status), Json(response)).into_response()
}

/// `POST /api/v2/device` — register a device.
pub async fn device_add_handler(State(state): State<AppState>, Json(raw): Json<Value>) -> HttpResponse {
    let behavior = Behavior::new(ApiVersion::V2, ResourceKind::Device, Action::Add);
    dispatch(&state, behavior, raw).await
}

/// `POST /api/v2/device/read` — read a device by id.
pub async fn device_read_handler(
    State(state): State<AppState>,
    Json(raw): Json<Value>,
) -> HttpResponse {
    let behavior = Behavior::new(ApiVersion::V2, ResourceKind::Device, Action::Read);
    dispatch(&state, behavior, raw).await
}

/// `POST /api/v2/reading` — submit a reading.
pub async fn reading_add_handler(
    State(state): State<AppState>,
    Json(raw): Json<Value>,
) -> HttpResponse {
    let behavior = Behavior::new(ApiVersion::V2, ResourceKind::Reading, Action::Add);
    dispatch(&state, behavior, raw).await
}

/// `GET /api/v2/ping` — plain-text liveness check.
pub async fn ping_handler() -> &'static str {
    "pong"
}

/// `GET /api/v2/version` — service version.
pub async fn version_handler() -> Json<Value> {
    Json(json!({ "version": sensormesh_core::SERVICE_VERSION }))
}

/// `GET /api/v2/config` — effective configuration and registered
/// behaviors.
pub async fn config_handler(State(state): State<AppState>) -> Json<Value> {
    let mut behaviors: Vec<String> = state
        .table
        .behaviors()
        .iter()
        .map(std::string::ToString::to_string)
        .collect();
    behaviors.sort();

    Json(json!({
        "config": &*state.config,
        "behaviors": behaviors,
    }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use sensormesh_core::messages::DeviceAddRequest;
    use serde_json::json;

    use super::*;
    use crate::pipeline::EchoDelegate;

    fn test_state() -> AppState {
        let mut table = DispatchTable::new();
        table.register::<DeviceAddRequest>(
            Behavior::new(ApiVersion::V2, ResourceKind::Device, Action::Add),
            Arc::new(EchoDelegate),
        );
        AppState {
            table: Arc::new(table),
            config: Arc::new(ServiceConfig::default()),
        }
    }

    #[test]
    fn success_maps_to_200() {
        assert_eq!(http_status_for(Status::SUCCESS), StatusCode::OK);
    }

    #[test]
    fn application_faults_map_to_400() {
        for status in [
            Status::TYPE_ASSERTION_FAILURE,
            Status::REQUEST_ID_EMPTY,
            Status::BEHAVIOR_UNSUPPORTED,
            Status::DEVICE_MISSING_ID,
        ] {
            assert_eq!(http_status_for(status), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn domain_faults_map_to_409() {
        assert_eq!(
            http_status_for(Status::DUPLICATE_DEVICE_NAME),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn infrastructure_not_found_maps_to_404() {
        assert_eq!(
            http_status_for(Status::PERSISTENCE_NOT_FOUND),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            http_status_for(Status::PERSISTENCE_WRITE_FAILED),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn ping_returns_pong() {
        assert_eq!(ping_handler().await, "pong");
    }

    #[tokio::test]
    async fn version_reports_crate_version() {
        let json = version_handler().await.0;
        assert_eq!(json["version"], sensormesh_core::SERVICE_VERSION);
    }

    #[tokio::test]
    async fn config_reports_effective_config_and_behaviors() {
        let json = config_handler(State(test_state())).await.0;
        assert_eq!(json["config"]["serviceName"], "sensormesh");
        assert_eq!(json["behaviors"], json!(["v2/device/add"]));
    }

    #[tokio::test]
    async fn device_add_handler_dispatches_through_pipeline() {
        let raw = json!({"requestId": "r1", "name": "sensor-1"});
        let response =
            device_add_handler(State(test_state()), Json(raw)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn validator_failure_surfaces_as_400() {
        let raw = json!({"requestId": "", "name": "sensor-1"});
        let response =
            device_add_handler(State(test_state()), Json(raw)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
