//! Behavior-keyed dispatch table.
//!
//! The routing layer registers one `(validator chain, delegate)` pair per
//! `{version, kind, action}` at startup; request handling only looks the
//! chain up. Type inspection happens once, here, at registration time —
//! not scattered through business logic.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use sensormesh_core::behavior::Behavior;
use sensormesh_core::messages::{KindRequest, Outcome, Response};
use sensormesh_core::status::Status;
use serde_json::Value;
use tracing::{info_span, Instrument};

use super::delegate::Delegate;
use super::validate::validate;

type BoxedOutcome = Pin<Box<dyn Future<Output = Outcome> + Send>>;
type BoxedDispatcher = Box<dyn Fn(Value) -> BoxedOutcome + Send + Sync>;

/// Maps each registered [`Behavior`] to its typed validator chain and
/// delegate, type-erased behind a dispatcher closure.
///
/// Built once at startup, immutable during request handling, so lookups
/// need no locking.
pub struct DispatchTable {
    dispatchers: HashMap<Behavior, BoxedDispatcher>,
}

impl DispatchTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dispatchers: HashMap::new(),
        }
    }

    /// Registers the validator chain for `R` and its delegate under the
    /// given behavior.
    ///
    /// The behavior's kind and action must match the request type's
    /// declared constants; a mismatch is a wiring defect caught in debug
    /// builds.
    pub fn register<R>(&mut self, behavior: Behavior, delegate: Arc<dyn Delegate<R>>)
    where
        R: KindRequest,
    {
        debug_assert_eq!(behavior.kind, R::KIND);
        debug_assert_eq!(behavior.action, R::ACTION);

        let dispatcher: BoxedDispatcher = Box::new(move |raw: Value| {
            let delegate = Arc::clone(&delegate);
            Box::pin(async move { validate::<R>(raw, behavior, delegate.as_ref()).await })
        });
        self.dispatchers.insert(behavior, dispatcher);
    }

    /// Dispatches an untyped inbound value through the chain registered
    /// for the behavior.
    ///
    /// An unregistered behavior short-circuits with
    /// [`Status::BEHAVIOR_UNSUPPORTED`] — the same uniformly-shaped error
    /// envelope the validators produce.
    pub async fn dispatch(&self, behavior: Behavior, raw: Value) -> Outcome {
        let span = info_span!("dispatch", behavior = %behavior);
        async {
            match self.dispatchers.get(&behavior) {
                Some(dispatcher) => dispatcher(raw).await,
                None => {
                    tracing::debug!(%behavior, "no chain registered for behavior");
                    let response = Response::error(
                        "",
                        format!("no handler registered for behavior {behavior}"),
                        raw,
                        Status::BEHAVIOR_UNSUPPORTED,
                    );
                    (response, Status::BEHAVIOR_UNSUPPORTED)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Behaviors with a registered chain, for the config endpoint.
    #[must_use]
    pub fn behaviors(&self) -> Vec<Behavior> {
        self.dispatchers.keys().copied().collect()
    }
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
