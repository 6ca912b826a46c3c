//! Variation test harness.
//!
//! A variation pairs a named input with the exact response and status it
//! must produce. The harness drives [`validate`] once per entry with a
//! fixed behavior and asserts structural equality, which makes the test
//! suite for a resource kind a declarative table rather than a pile of
//! bespoke assertions. Every new kind supplies at least the four
//! canonical variations: valid, wrong type, empty correlation token, and
//! missing required field.
//!
//! Test support, not production data flow — nothing outside test code
//! should construct a [`Variation`].

use async_trait::async_trait;
use sensormesh_core::behavior::Behavior;
use sensormesh_core::messages::{KindRequest, Outcome, Response};
use sensormesh_core::status::Status;
use serde_json::Value;

use super::delegate::Delegate;
use super::validate::validate;

/// One named fixture: input plus the outcome it must produce.
#[derive(Debug)]
pub struct Variation {
    pub name: &'static str,
    pub request: Value,
    pub expected_response: Response,
    pub expected_status: Status,
}

/// No-op delegate that reports success and echoes the request as the
/// payload, so variation tables can state expected envelopes exactly.
pub struct EchoDelegate;

#[async_trait]
impl<R: KindRequest> Delegate<R> for EchoDelegate {
    async fn invoke(&self, request: R) -> Outcome {
        let payload = serde_json::to_value(&request).unwrap_or(Value::Null);
        let response = Response::success(request.request_id(), payload);
        (response, Status::SUCCESS)
    }
}

/// Random correlation token for fixtures where the value is irrelevant
/// but must be non-empty.
#[must_use]
pub fn random_token() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Runs every variation through [`validate`] with the given behavior and
/// delegate, asserting response and status equality.
///
/// # Panics
///
/// Panics on the first variation whose outcome differs from the
/// expectation, naming it.
pub async fn run_variations<R: KindRequest>(
    variations: Vec<Variation>,
    behavior: Behavior,
    delegate: &dyn Delegate<R>,
) {
    for variation in variations {
        let (response, status) =
            validate::<R>(variation.request.clone(), behavior, delegate).await;
        assert_eq!(
            response, variation.expected_response,
            "variation `{}`: response mismatch",
            variation.name
        );
        assert_eq!(
            status, variation.expected_status,
            "variation `{}`: status mismatch",
            variation.name
        );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
