//! The delegate capability: where business logic lives.
//!
//! The pipeline treats a delegate as opaque. It is supplied by the
//! routing layer, invoked exactly once per fully validated request, and
//! its outcome is returned verbatim. Blocking, persistence, and external
//! calls all belong inside the delegate; the pipeline itself never
//! suspends except to await this one call.

use async_trait::async_trait;
use sensormesh_core::messages::{KindRequest, Outcome};

/// Domain handler for one `{kind, action}` pair.
///
/// The delegate is trusted to choose a status from the correct layer:
/// typically [`Status::SUCCESS`], an infrastructure code for storage
/// faults, or a domain code for rule violations. The pipeline never
/// reinterprets or wraps the result.
///
/// [`Status::SUCCESS`]: sensormesh_core::Status::SUCCESS
#[async_trait]
pub trait Delegate<R: KindRequest>: Send + Sync {
    /// Handles a request that passed every structural validator.
    async fn invoke(&self, request: R) -> Outcome;
}
