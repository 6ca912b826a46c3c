//! Behavior descriptors: which validator chain and response shape apply.
//!
//! A [`Behavior`] names the `{version, kind, action}` triple for an
//! endpoint. The routing layer fixes one per route at registration time;
//! the dispatch table keys its validator chains and delegates by it.

use serde::{Deserialize, Serialize};

/// API version of the contract a request was written against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiVersion {
    V1,
    V2,
}

/// Resource kinds this service exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Device,
    Reading,
}

/// Actions a request can perform on a resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Add,
    Read,
}

/// Immutable `{version, kind, action}` descriptor for a request.
///
/// Created per incoming call by the routing layer, never persisted.
/// `Eq + Hash` so the dispatch table can key chains by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Behavior {
    pub version: ApiVersion,
    pub kind: ResourceKind,
    pub action: Action,
}

impl Behavior {
    #[must_use]
    pub fn new(version: ApiVersion, kind: ResourceKind, action: Action) -> Self {
        Self {
            version,
            kind,
            action,
        }
    }
}

impl ApiVersion {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ApiVersion::V1 => "v1",
            ApiVersion::V2 => "v2",
        }
    }
}

impl ResourceKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Device => "device",
            ResourceKind::Reading => "reading",
        }
    }
}

impl Action {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Add => "add",
            Action::Read => "read",
        }
    }
}

impl std::fmt::Display for Behavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.version.as_str(),
            self.kind.as_str(),
            self.action.as_str()
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn display_is_slash_separated_lowercase() {
        let behavior = Behavior::new(ApiVersion::V2, ResourceKind::Device, Action::Read);
        assert_eq!(behavior.to_string(), "v2/device/read");
    }

    #[test]
    fn behaviors_key_a_map_by_value() {
        let mut table = HashMap::new();
        table.insert(
            Behavior::new(ApiVersion::V2, ResourceKind::Device, Action::Add),
            "device-add",
        );
        table.insert(
            Behavior::new(ApiVersion::V2, ResourceKind::Reading, Action::Add),
            "reading-add",
        );

        let lookup = Behavior::new(ApiVersion::V2, ResourceKind::Device, Action::Add);
        assert_eq!(table.get(&lookup), Some(&"device-add"));
    }

    #[test]
    fn serializes_lowercase() {
        let behavior = Behavior::new(ApiVersion::V2, ResourceKind::Reading, Action::Add);
        let json = serde_json::to_value(&behavior).unwrap();
        assert_eq!(json["version"], "v2");
        assert_eq!(json["kind"], "reading");
        assert_eq!(json["action"], "add");
    }
}
