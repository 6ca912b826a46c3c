//! Reading request DTOs.

use serde::{Deserialize, Serialize};

use crate::behavior::{Action, ResourceKind};
use crate::messages::base::{FieldFault, KindRequest};
use crate::status::Status;

/// Submits one telemetry reading for a registered device.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingAddRequest {
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub device_name: String,
    #[serde(default)]
    pub resource: String,
    #[serde(default)]
    pub value: String,
}

impl KindRequest for ReadingAddRequest {
    const KIND: ResourceKind = ResourceKind::Reading;
    const ACTION: Action = Action::Add;

    fn request_id(&self) -> &str {
        &self.request_id
    }

    // Fixed check order: deviceName before resource. A request missing
    // both reports the device name.
    fn required_fields(&self) -> Result<(), FieldFault> {
        if self.device_name.is_empty() {
            return Err(FieldFault::new("deviceName", Status::READING_MISSING_DEVICE));
        }
        if self.resource.is_empty() {
            return Err(FieldFault::new("resource", Status::READING_MISSING_RESOURCE));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
