//! Device request DTOs.

use serde::{Deserialize, Serialize};

use crate::behavior::{Action, ResourceKind};
use crate::messages::base::{FieldFault, KindRequest};
use crate::status::Status;

/// Registers a new device.
///
/// `name` is the required identifying field; `profile` is optional
/// descriptive metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceAddRequest {
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
}

impl KindRequest for DeviceAddRequest {
    const KIND: ResourceKind = ResourceKind::Device;
    const ACTION: Action = Action::Add;

    fn request_id(&self) -> &str {
        &self.request_id
    }

    fn required_fields(&self) -> Result<(), FieldFault> {
        if self.name.is_empty() {
            return Err(FieldFault::new("name", Status::DEVICE_MISSING_NAME));
        }
        Ok(())
    }
}

/// Reads a device by its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceReadRequest {
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub device_id: String,
}

impl KindRequest for DeviceReadRequest {
    const KIND: ResourceKind = ResourceKind::Device;
    const ACTION: Action = Action::Read;

    fn request_id(&self) -> &str {
        &self.request_id
    }

    fn required_fields(&self) -> Result<(), FieldFault> {
        if self.device_id.is_empty() {
            return Err(FieldFault::new("deviceId", Status::DEVICE_MISSING_ID));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn add_request_with_name_passes_field_check() {
        let req = DeviceAddRequest {
            request_id: "r1".to_string(),
            name: "sensor-1".to_string(),
            profile: None,
        };
        assert!(req.required_fields().is_ok());
    }

    #[test]
    fn add_request_without_name_faults_with_missing_name() {
        let req = DeviceAddRequest {
            request_id: "r1".to_string(),
            ..DeviceAddRequest::default()
        };
        assert_eq!(
            req.required_fields(),
            Err(FieldFault::new("name", Status::DEVICE_MISSING_NAME))
        );
    }

    #[test]
    fn read_request_without_device_id_faults_with_missing_id() {
        let req = DeviceReadRequest {
            request_id: "r2".to_string(),
            device_id: String::new(),
        };
        assert_eq!(
            req.required_fields(),
            Err(FieldFault::new("deviceId", Status::DEVICE_MISSING_ID))
        );
    }

    #[test]
    fn missing_json_fields_default_to_empty() {
        // Shape is established by deserialization; presence is the
        // validators' job, so an empty object must still parse.
        let req: DeviceAddRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(req.request_id, "");
        assert_eq!(req.name, "");
        assert_eq!(req.profile, None);
    }

    #[test]
    fn camel_case_wire_fields() {
        let req: DeviceReadRequest =
            serde_json::from_value(json!({"requestId": "r3", "deviceId": "d-7"})).unwrap();
        assert_eq!(req.request_id, "r3");
        assert_eq!(req.device_id, "d-7");

        let back = serde_json::to_value(&req).unwrap();
        assert_eq!(back, json!({"requestId": "r3", "deviceId": "d-7"}));
    }
}
