//! The ordered structural validator chain and its dispatch entry point.
//!
//! Validators run in a fixed order that is itself a contract, because
//! each check assumes the ones before it passed:
//!
//! 1. Type assertion — the untyped inbound value deserializes into the
//!    concrete request type for the behavior. Runs before any field
//!    access, so malformed input can never cause an invalid read.
//! 2. Correlation-token presence — the now-typed request carries a
//!    non-empty `request_id`.
//! 3. Kind-specific invariants — required fields per resource kind.
//!
//! The first failing check short-circuits with an error envelope; only a
//! request that passes all three reaches the delegate. Every terminal
//! path returns exactly one `(Response, Status)` pair — the pipeline
//! never raises an unhandled fault to its caller.

use sensormesh_core::behavior::Behavior;
use sensormesh_core::messages::{KindRequest, Outcome, Response};
use sensormesh_core::status::Status;
use serde_json::Value;
use tracing::debug;

use super::delegate::Delegate;

/// Serializes a parsed request back into the payload slot of an error
/// envelope. Plain string-field DTOs cannot fail to serialize; `Null` is
/// the fallback rather than a panic path.
fn request_payload<R: KindRequest>(request: &R) -> Value {
    serde_json::to_value(request).unwrap_or(Value::Null)
}

/// Validator 1: confirms the inbound value is the concrete request type
/// for the behavior.
///
/// On failure the envelope's `request_id` is empty — the value could not
/// be trusted enough to read a field from — the message embeds the
/// literal supplied value, and the payload echoes it raw.
///
/// # Errors
///
/// Returns the short-circuit [`Outcome`] with
/// [`Status::TYPE_ASSERTION_FAILURE`].
pub fn assert_type<R: KindRequest>(raw: &Value, behavior: Behavior) -> Result<R, Outcome> {
    match serde_json::from_value::<R>(raw.clone()) {
        Ok(request) => Ok(request),
        Err(_) => {
            debug!(%behavior, "type assertion failed");
            let response = Response::error(
                "",
                format!("type assertion failure: `{raw}` is not a {behavior} request"),
                raw.clone(),
                Status::TYPE_ASSERTION_FAILURE,
            );
            Err((response, Status::TYPE_ASSERTION_FAILURE))
        }
    }
}

/// Validator 2: the correlation token must be non-empty.
///
/// On failure the envelope's `request_id` stays empty and the payload
/// echoes the whole parsed request, not just the token.
///
/// # Errors
///
/// Returns the short-circuit [`Outcome`] with [`Status::REQUEST_ID_EMPTY`].
pub fn check_request_id<R: KindRequest>(request: &R, behavior: Behavior) -> Result<(), Outcome> {
    if request.request_id().is_empty() {
        debug!(%behavior, "request id is empty");
        let response = Response::error(
            "",
            "request id is empty",
            request_payload(request),
            Status::REQUEST_ID_EMPTY,
        );
        return Err((response, Status::REQUEST_ID_EMPTY));
    }
    Ok(())
}

/// Validator 3: kind-specific required fields.
///
/// Runs only after the token check passed, so the envelope echoes the
/// real, non-empty `request_id` alongside the request payload.
///
/// # Errors
///
/// Returns the short-circuit [`Outcome`] with the kind-specific status
/// from the request's [`FieldFault`].
///
/// [`FieldFault`]: sensormesh_core::messages::FieldFault
pub fn check_kind_fields<R: KindRequest>(request: &R, behavior: Behavior) -> Result<(), Outcome> {
    if let Err(fault) = request.required_fields() {
        debug!(%behavior, field = fault.field, "required field is missing");
        let response = Response::error(
            request.request_id(),
            format!("required field `{}` is missing", fault.field),
            request_payload(request),
            fault.status,
        );
        return Err((response, fault.status));
    }
    Ok(())
}

/// Runs the full validator chain and, only if every check passes, invokes
/// the delegate exactly once, returning its outcome verbatim.
///
/// Stateless and lock-free: safe to call concurrently for arbitrarily
/// many requests, and re-running it on the same input with the same
/// delegate yields an identical outcome. No retries — a validator failure
/// and a delegate failure are both final for this call.
pub async fn validate<R: KindRequest>(
    raw: Value,
    behavior: Behavior,
    delegate: &dyn Delegate<R>,
) -> Outcome {
    let request = match assert_type::<R>(&raw, behavior) {
        Ok(request) => request,
        Err(outcome) => return outcome,
    };
    if let Err(outcome) = check_request_id(&request, behavior) {
        return outcome;
    }
    if let Err(outcome) = check_kind_fields(&request, behavior) {
        return outcome;
    }
    delegate.invoke(request).await
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
