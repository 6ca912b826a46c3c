//! Transport-agnostic status codes and their layered taxonomy.
//!
//! Every response the service produces carries exactly one numeric status.
//! The non-zero code space is partitioned into four layers by range:
//!
//! - infrastructure: 1 - 9999
//! - domain: 10000 - 19999
//! - application: 20000 - 29999
//! - user interface: 30000 - 39999
//!
//! Value 0 is the single universal success code and belongs to no layer.
//! HTTP status mapping is a transport concern and lives in the server
//! crate, not here.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// A service-wide status code.
///
/// Statuses are process-wide constants: defined once below, immutable
/// thereafter. Adding a new failure kind means picking an unused value
/// inside the correct layer; collisions are caught by
/// [`StatusRegistry::verify`] at startup and in tests, never at request
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Status(pub i32);

/// The layer a non-zero status code originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusLayer {
    Infrastructure,
    Domain,
    Application,
    UserInterface,
}

impl Status {
    /// The universal success code, valid in every layer.
    pub const SUCCESS: Status = Status(0);

    // ---- infrastructure layer (1 - 9999) ----

    /// The requested entity does not exist in the backing store.
    pub const PERSISTENCE_NOT_FOUND: Status = Status(1);
    /// The backing store rejected or failed a write.
    pub const PERSISTENCE_WRITE_FAILED: Status = Status(2);

    // ---- domain layer (10000 - 19999): rule violations raised by delegates ----

    /// A device with the requested name is already registered.
    pub const DUPLICATE_DEVICE_NAME: Status = Status(10001);
    /// A reading referenced a device that is not registered.
    pub const DEVICE_NOT_REGISTERED: Status = Status(10002);

    // ---- application layer (20000 - 29999): structural faults raised by the
    // ---- validation pipeline itself, including kind-specific field presence ----

    /// The inbound value is not the concrete request type for the behavior.
    pub const TYPE_ASSERTION_FAILURE: Status = Status(20001);
    /// The request carries an empty correlation token.
    pub const REQUEST_ID_EMPTY: Status = Status(20002);
    /// No validator chain is registered for the requested behavior.
    pub const BEHAVIOR_UNSUPPORTED: Status = Status(20003);
    /// Device read request is missing its device id.
    pub const DEVICE_MISSING_ID: Status = Status(20004);
    /// Device add request is missing its name.
    pub const DEVICE_MISSING_NAME: Status = Status(20005);
    /// Reading add request is missing its device name.
    pub const READING_MISSING_DEVICE: Status = Status(20006);
    /// Reading add request is missing its resource name.
    pub const READING_MISSING_RESOURCE: Status = Status(20007);

    // The user-interface layer (30000 - 39999) is reserved; this service
    // defines no codes in it.

    /// Returns the layer this status belongs to, derived solely from its
    /// numeric range.
    ///
    /// Returns `None` for [`Status::SUCCESS`] (success is universal, owned
    /// by no layer) and for values outside every documented range.
    #[must_use]
    pub fn layer(self) -> Option<StatusLayer> {
        match self.0 {
            1..=9_999 => Some(StatusLayer::Infrastructure),
            10_000..=19_999 => Some(StatusLayer::Domain),
            20_000..=29_999 => Some(StatusLayer::Application),
            30_000..=39_999 => Some(StatusLayer::UserInterface),
            _ => None,
        }
    }

    /// Returns true for the universal success code.
    #[must_use]
    pub fn is_success(self) -> bool {
        self == Status::SUCCESS
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// StatusRegistry
// ---------------------------------------------------------------------------

/// Errors detected while verifying the status registry.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StatusRegistryError {
    #[error("status code {value} registered by both `{first}` and `{second}`")]
    Collision {
        value: i32,
        first: &'static str,
        second: &'static str,
    },
    #[error("status code {value} (`{name}`) falls outside every documented layer")]
    OutsideLayers { value: i32, name: &'static str },
}

/// Process-wide registry of every named status constant.
///
/// Built once via [`registry`] and immutable thereafter. [`verify`] is the
/// startup-time check that no two constants share a value and every
/// non-zero constant sits inside exactly one layer range.
///
/// [`verify`]: StatusRegistry::verify
#[derive(Debug)]
pub struct StatusRegistry {
    entries: Vec<(&'static str, Status)>,
}

impl StatusRegistry {
    fn builtin() -> Self {
        Self {
            entries: vec![
                ("SUCCESS", Status::SUCCESS),
                ("PERSISTENCE_NOT_FOUND", Status::PERSISTENCE_NOT_FOUND),
                ("PERSISTENCE_WRITE_FAILED", Status::PERSISTENCE_WRITE_FAILED),
                ("DUPLICATE_DEVICE_NAME", Status::DUPLICATE_DEVICE_NAME),
                ("DEVICE_NOT_REGISTERED", Status::DEVICE_NOT_REGISTERED),
                ("TYPE_ASSERTION_FAILURE", Status::TYPE_ASSERTION_FAILURE),
                ("REQUEST_ID_EMPTY", Status::REQUEST_ID_EMPTY),
                ("BEHAVIOR_UNSUPPORTED", Status::BEHAVIOR_UNSUPPORTED),
                ("DEVICE_MISSING_ID", Status::DEVICE_MISSING_ID),
                ("DEVICE_MISSING_NAME", Status::DEVICE_MISSING_NAME),
                ("READING_MISSING_DEVICE", Status::READING_MISSING_DEVICE),
                ("READING_MISSING_RESOURCE", Status::READING_MISSING_RESOURCE),
            ],
        }
    }

    /// All registered `(name, status)` pairs.
    #[must_use]
    pub fn entries(&self) -> &[(&'static str, Status)] {
        &self.entries
    }

    /// Checks the registry invariants: unique values, and every non-zero
    /// code inside a documented layer.
    ///
    /// # Errors
    ///
    /// Returns the first [`StatusRegistryError`] found. Intended to run at
    /// process startup and in the test suite, so a bad constant is a
    /// build-time defect rather than a runtime one.
    pub fn verify(&self) -> Result<(), StatusRegistryError> {
        let mut seen: HashMap<i32, &'static str> = HashMap::new();
        for (name, status) in &self.entries {
            if let Some(first) = seen.insert(status.0, name) {
                return Err(StatusRegistryError::Collision {
                    value: status.0,
                    first,
                    second: name,
                });
            }
            if !status.is_success() && status.layer().is_none() {
                return Err(StatusRegistryError::OutsideLayers {
                    value: status.0,
                    name,
                });
            }
        }
        Ok(())
    }
}

static REGISTRY: LazyLock<StatusRegistry> = LazyLock::new(StatusRegistry::builtin);

/// Returns the process-wide status registry.
#[must_use]
pub fn registry() -> &'static StatusRegistry {
    &REGISTRY
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
