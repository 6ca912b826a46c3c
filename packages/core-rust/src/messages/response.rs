//! Response envelopes: the one wire contract this core exposes.
//!
//! Every terminal path of the pipeline produces exactly one
//! `(Response, Status)` pair. Both shapes echo the originating
//! correlation token (empty string when the request could not even be
//! inspected) and stamp the status into the envelope alongside the
//! payload, so the transport layer can serialize it verbatim.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::status::Status;

/// The `(Response, Status)` pair every pipeline call resolves to.
pub type Outcome = (Response, Status);

/// Success envelope: echoes the input or the delegate's result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessResponse {
    pub request_id: String,
    pub payload: Value,
    pub status: Status,
}

/// Error envelope: a human-readable message plus the offending value.
///
/// Which value lands in `payload` is part of the contract, chosen per
/// validator: the raw inbound value when the type assertion fails, the
/// parsed request for every later check. Clients depend on it to render
/// diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub request_id: String,
    pub message: String,
    pub payload: Value,
    pub status: Status,
}

/// A response is one of the two envelope shapes. Immutable once built,
/// owned solely by the caller that receives it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Error(ErrorResponse),
    Success(SuccessResponse),
}

impl Response {
    /// Builds a success envelope with [`Status::SUCCESS`] stamped in.
    #[must_use]
    pub fn success(request_id: impl Into<String>, payload: Value) -> Response {
        Response::Success(SuccessResponse {
            request_id: request_id.into(),
            payload,
            status: Status::SUCCESS,
        })
    }

    /// Builds an error envelope. `request_id` is empty when the request
    /// could not be trusted enough to read a field from.
    #[must_use]
    pub fn error(
        request_id: impl Into<String>,
        message: impl Into<String>,
        payload: Value,
        status: Status,
    ) -> Response {
        Response::Error(ErrorResponse {
            request_id: request_id.into(),
            message: message.into(),
            payload,
            status,
        })
    }

    /// The status stamped into the envelope.
    #[must_use]
    pub fn status(&self) -> Status {
        match self {
            Response::Error(e) => e.status,
            Response::Success(s) => s.status,
        }
    }

    /// The correlation token echoed by the envelope.
    #[must_use]
    pub fn request_id(&self) -> &str {
        match self {
            Response::Error(e) => &e.request_id,
            Response::Success(s) => &s.request_id,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
