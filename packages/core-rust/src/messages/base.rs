//! Base request contract shared by every resource kind.
//!
//! Inbound requests reach the pipeline as untyped `serde_json::Value`;
//! the transport layer owns bytes, this crate owns shapes. A kind's
//! concrete DTO implements [`KindRequest`] to declare which behavior it
//! belongs to and which structural invariants it carries beyond the
//! generic correlation-token check.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::behavior::{Action, ResourceKind};
use crate::status::Status;

/// A kind-specific structural fault: which field is missing and the
/// status code that reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFault {
    pub field: &'static str,
    pub status: Status,
}

impl FieldFault {
    #[must_use]
    pub fn new(field: &'static str, status: Status) -> Self {
        Self { field, status }
    }
}

/// The concrete request type expected for one `{kind, action}` pair.
///
/// Implementations keep every field `#[serde(default)]`: deserialization
/// establishes the *shape* (the type-assertion check), while field
/// presence is the job of the later validators. A JSON object with
/// missing fields must deserialize so the pipeline can report the empty
/// token or missing field with the right status, exactly as the ordering
/// contract requires.
pub trait KindRequest: Serialize + DeserializeOwned + Clone + Send + 'static {
    /// Resource kind this request belongs to.
    const KIND: ResourceKind;
    /// Action this request performs.
    const ACTION: Action;

    /// The caller-supplied correlation token. May be empty only before
    /// the pipeline's token-presence check runs.
    fn request_id(&self) -> &str;

    /// Kind-specific invariants, checked only after the correlation token
    /// is known to be non-empty. Checks run in a fixed order; the first
    /// fault wins.
    ///
    /// # Errors
    ///
    /// Returns the first [`FieldFault`] found.
    fn required_fields(&self) -> Result<(), FieldFault>;
}
