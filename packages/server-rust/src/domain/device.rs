//! In-memory device store and the delegates bound to it.
//!
//! These are the concrete delegates the routing layer registers. The
//! pipeline knows nothing about them beyond the [`Delegate`] contract;
//! they choose their own statuses from the infrastructure layer (storage
//! faults) and the domain layer (rule violations).

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use sensormesh_core::messages::{
    DeviceAddRequest, DeviceReadRequest, KindRequest, Outcome, ReadingAddRequest, Response,
};
use sensormesh_core::status::Status;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::pipeline::delegate::Delegate;

// ---------------------------------------------------------------------------
// DeviceStore
// ---------------------------------------------------------------------------

/// A registered device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub device_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
}

/// In-memory device registry, keyed by device id with a name index for
/// uniqueness checks. All data fits in memory; suitable for development
/// and tests, swappable for a persistent store without touching the
/// pipeline.
#[derive(Debug, Default)]
pub struct DeviceStore {
    inner: RwLock<StoreInner>,
}

#[derive(Debug, Default)]
struct StoreInner {
    by_id: HashMap<String, Device>,
    id_by_name: HashMap<String, String>,
}

impl DeviceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a device under a fresh id. Returns the stored device, or
    /// `None` when the name is already taken.
    pub fn insert(&self, name: &str, profile: Option<String>) -> Option<Device> {
        let mut inner = self.inner.write();
        if inner.id_by_name.contains_key(name) {
            return None;
        }
        let device = Device {
            device_id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            profile,
        };
        inner
            .id_by_name
            .insert(name.to_string(), device.device_id.clone());
        inner.by_id.insert(device.device_id.clone(), device.clone());
        Some(device)
    }

    #[must_use]
    pub fn get(&self, device_id: &str) -> Option<Device> {
        self.inner.read().by_id.get(device_id).cloned()
    }

    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        self.inner.read().id_by_name.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().by_id.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().by_id.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Delegates
// ---------------------------------------------------------------------------

fn echo_payload<R: KindRequest>(request: &R) -> Value {
    serde_json::to_value(request).unwrap_or(Value::Null)
}

/// Registers a device; rejects duplicate names with a domain-layer code.
pub struct DeviceAddDelegate {
    store: Arc<DeviceStore>,
}

impl DeviceAddDelegate {
    #[must_use]
    pub fn new(store: Arc<DeviceStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Delegate<DeviceAddRequest> for DeviceAddDelegate {
    async fn invoke(&self, request: DeviceAddRequest) -> Outcome {
        match self.store.insert(&request.name, request.profile.clone()) {
            Some(device) => {
                info!(name = %device.name, device_id = %device.device_id, "device registered");
                let payload = serde_json::to_value(&device).unwrap_or(Value::Null);
                (
                    Response::success(&request.request_id, payload),
                    Status::SUCCESS,
                )
            }
            None => {
                let response = Response::error(
                    &request.request_id,
                    format!("device name `{}` is already registered", request.name),
                    echo_payload(&request),
                    Status::DUPLICATE_DEVICE_NAME,
                );
                (response, Status::DUPLICATE_DEVICE_NAME)
            }
        }
    }
}

/// Reads a device by id; missing ids report an infrastructure-layer code.
pub struct DeviceReadDelegate {
    store: Arc<DeviceStore>,
}

impl DeviceReadDelegate {
    #[must_use]
    pub fn new(store: Arc<DeviceStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Delegate<DeviceReadRequest> for DeviceReadDelegate {
    async fn invoke(&self, request: DeviceReadRequest) -> Outcome {
        match self.store.get(&request.device_id) {
            Some(device) => {
                let payload = serde_json::to_value(&device).unwrap_or(Value::Null);
                (
                    Response::success(&request.request_id, payload),
                    Status::SUCCESS,
                )
            }
            None => {
                let response = Response::error(
                    &request.request_id,
                    format!("device `{}` not found", request.device_id),
                    echo_payload(&request),
                    Status::PERSISTENCE_NOT_FOUND,
                );
                (response, Status::PERSISTENCE_NOT_FOUND)
            }
        }
    }
}

/// Accepts a reading for a registered device; unknown device names report
/// a domain-layer code.
pub struct ReadingAddDelegate {
    store: Arc<DeviceStore>,
}

impl ReadingAddDelegate {
    #[must_use]
    pub fn new(store: Arc<DeviceStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Delegate<ReadingAddRequest> for ReadingAddDelegate {
    async fn invoke(&self, request: ReadingAddRequest) -> Outcome {
        if !self.store.contains_name(&request.device_name) {
            let response = Response::error(
                &request.request_id,
                format!("device `{}` is not registered", request.device_name),
                echo_payload(&request),
                Status::DEVICE_NOT_REGISTERED,
            );
            return (response, Status::DEVICE_NOT_REGISTERED);
        }

        info!(
            device = %request.device_name,
            resource = %request.resource,
            "reading accepted"
        );
        let payload = json!({
            "deviceName": request.device_name,
            "resource": request.resource,
            "value": request.value,
        });
        (
            Response::success(&request.request_id, payload),
            Status::SUCCESS,
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn add_request(name: &str) -> DeviceAddRequest {
        DeviceAddRequest {
            request_id: "r1".to_string(),
            name: name.to_string(),
            profile: None,
        }
    }

    #[test]
    fn store_rejects_duplicate_names() {
        let store = DeviceStore::new();
        assert!(store.insert("sensor-1", None).is_some());
        assert!(store.insert("sensor-1", None).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn store_lookup_by_generated_id() {
        let store = DeviceStore::new();
        let device = store.insert("sensor-1", Some("thermo".to_string())).unwrap();
        assert_eq!(store.get(&device.device_id), Some(device));
        assert_eq!(store.get("missing"), None);
    }

    #[tokio::test]
    async fn add_delegate_registers_and_reports_duplicates() {
        let store = Arc::new(DeviceStore::new());
        let delegate = DeviceAddDelegate::new(store.clone());

        let (response, status) = delegate.invoke(add_request("sensor-1")).await;
        assert_eq!(status, Status::SUCCESS);
        assert_eq!(response.request_id(), "r1");

        let (response, status) = delegate.invoke(add_request("sensor-1")).await;
        assert_eq!(status, Status::DUPLICATE_DEVICE_NAME);
        assert_eq!(response.status(), Status::DUPLICATE_DEVICE_NAME);
    }

    #[tokio::test]
    async fn read_delegate_reports_not_found() {
        let store = Arc::new(DeviceStore::new());
        let delegate = DeviceReadDelegate::new(store.clone());

        let request = DeviceReadRequest {
            request_id: "r2".to_string(),
            device_id: "nope".to_string(),
        };
        let (response, status) = delegate.invoke(request).await;
        assert_eq!(status, Status::PERSISTENCE_NOT_FOUND);
        assert_eq!(response.request_id(), "r2");
    }

    #[tokio::test]
    async fn read_delegate_returns_stored_device() {
        let store = Arc::new(DeviceStore::new());
        let device = store.insert("sensor-1", None).unwrap();
        let delegate = DeviceReadDelegate::new(store);

        let request = DeviceReadRequest {
            request_id: "r3".to_string(),
            device_id: device.device_id.clone(),
        };
        let (response, status) = delegate.invoke(request).await;
        assert_eq!(status, Status::SUCCESS);
        match response {
            Response::Success(s) => {
                assert_eq!(s.payload["name"], "sensor-1");
                assert_eq!(s.payload["deviceId"], device.device_id.as_str());
            }
            Response::Error(_) => panic!("expected success envelope"),
        }
    }

    #[tokio::test]
    async fn reading_delegate_requires_registered_device() {
        let store = Arc::new(DeviceStore::new());
        let delegate = ReadingAddDelegate::new(store.clone());

        let request = ReadingAddRequest {
            request_id: "r4".to_string(),
            device_name: "sensor-1".to_string(),
            resource: "temperature".to_string(),
            value: "21.4".to_string(),
        };
        let (_, status) = delegate.invoke(request.clone()).await;
        assert_eq!(status, Status::DEVICE_NOT_REGISTERED);

        store.insert("sensor-1", None).unwrap();
        let (response, status) = delegate.invoke(request).await;
        assert_eq!(status, Status::SUCCESS);
        assert_eq!(response.request_id(), "r4");
    }
}
