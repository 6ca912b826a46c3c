//! Request validation and dispatch pipeline.
//!
//! The one call contract this crate exposes to its host:
//! `validate(raw, behavior, delegate) -> (Response, Status)`.
//!
//! 1. **Validators** (`validate`): type assertion, then correlation-token
//!    presence, then kind-specific invariants — fixed order, first
//!    failure short-circuits.
//! 2. **Delegates** (`delegate`): opaque domain handlers invoked only
//!    after full validation.
//! 3. **Dispatch table** (`table`): one chain per `{version, kind,
//!    action}`, selected by behavior at registration time.
//! 4. **Harness** (`harness`): declarative variation tables for the test
//!    suite of every resource kind.

pub mod delegate;
pub mod harness;
pub mod table;
pub mod validate;

pub use delegate::Delegate;
pub use harness::{run_variations, EchoDelegate, Variation};
pub use table::DispatchTable;
pub use validate::validate;
