//! Normalized resource snapshots and the resource-kind registry.
//!
//! The control plane exposes each resource family through its own API with
//! its own field vocabulary. Everything Stacklens touches is first
//! normalized into a [`Resource`]: a stable `(kind, id)` identity, a
//! display name, a status string, and the untouched raw field map the
//! projector draws from.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The kinds of control-plane resources Stacklens can query.
///
/// One MCP tool is registered per kind; the set is fixed at compile time
/// and never extended at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Nova virtual machine instance.
    Instance,
    /// Cinder block-storage volume.
    Volume,
    /// Neutron network.
    Network,
    /// Glance image.
    Image,
    /// Nova service process (nova-compute, nova-scheduler, ...).
    ComputeService,
    /// Neutron agent (L3, DHCP, openvswitch, ...).
    NetworkAgent,
    /// Cinder service process (cinder-volume, cinder-scheduler, ...).
    VolumeService,
    /// Keystone service-catalog entry.
    Service,
}

impl ResourceKind {
    /// Every registered kind, in tool declaration order.
    pub const ALL: [ResourceKind; 8] = [
        ResourceKind::Instance,
        ResourceKind::Volume,
        ResourceKind::Network,
        ResourceKind::Image,
        ResourceKind::ComputeService,
        ResourceKind::NetworkAgent,
        ResourceKind::VolumeService,
        ResourceKind::Service,
    ];

    /// Singular snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Instance => "instance",
            Self::Volume => "volume",
            Self::Network => "network",
            Self::Image => "image",
            Self::ComputeService => "compute_service",
            Self::NetworkAgent => "network_agent",
            Self::VolumeService => "volume_service",
            Self::Service => "service",
        }
    }

    /// Human-readable plural label, used in tool descriptions.
    pub fn plural_label(&self) -> &'static str {
        match self {
            Self::Instance => "instances",
            Self::Volume => "volumes",
            Self::Network => "networks",
            Self::Image => "images",
            Self::ComputeService => "compute services",
            Self::NetworkAgent => "network agents",
            Self::VolumeService => "volume services",
            Self::Service => "services",
        }
    }

    /// Name of the MCP tool serving this kind.
    pub fn tool_name(&self) -> &'static str {
        match self {
            Self::Instance => "get_instances",
            Self::Volume => "get_volumes",
            Self::Network => "get_networks",
            Self::Image => "get_images",
            Self::ComputeService => "get_compute_services",
            Self::NetworkAgent => "get_network_agents",
            Self::VolumeService => "get_volume_services",
            Self::Service => "get_services",
        }
    }

    /// Resolve a tool name back to its kind.
    pub fn from_tool_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tool_name() == name)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much of a resource to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailLevel {
    /// Identity and status only: `id`, `name`, `status`.
    Basic,
    /// Basic plus the kind-specific summary fields.
    #[default]
    Detailed,
    /// Every raw field the control plane returned.
    Full,
}

impl DetailLevel {
    /// Accepted values, as they appear in tool schemas.
    pub const VALUES: [&'static str; 3] = ["basic", "detailed", "full"];

    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Detailed => "detailed",
            Self::Full => "full",
        }
    }

    /// Parse a wire name; `None` for anything outside [`Self::VALUES`].
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "basic" => Some(Self::Basic),
            "detailed" => Some(Self::Detailed),
            "full" => Some(Self::Full),
            _ => None,
        }
    }
}

impl fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One queried control-plane object, as a normalized snapshot.
///
/// Identity is `(kind, id)`; `name` is not guaranteed unique. A snapshot is
/// never mutated after fetch; each query produces fresh ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    /// Opaque identifier, unique per kind.
    pub id: String,
    /// Display name; empty when the control plane reports none.
    pub name: String,
    /// Which resource family this snapshot belongs to.
    pub kind: ResourceKind,
    /// Kind-specific status vocabulary, stringified.
    pub status: String,
    /// Raw field map exactly as returned by the control plane.
    pub raw_fields: Map<String, Value>,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_name_round_trip() {
        for kind in ResourceKind::ALL {
            assert_eq!(ResourceKind::from_tool_name(kind.tool_name()), Some(kind));
        }
    }

    #[test]
    fn test_unknown_tool_name() {
        assert_eq!(ResourceKind::from_tool_name("get_snapshots"), None);
        assert_eq!(ResourceKind::from_tool_name(""), None);
    }

    #[test]
    fn test_detail_level_parse() {
        assert_eq!(DetailLevel::parse("basic"), Some(DetailLevel::Basic));
        assert_eq!(DetailLevel::parse("detailed"), Some(DetailLevel::Detailed));
        assert_eq!(DetailLevel::parse("full"), Some(DetailLevel::Full));
        assert_eq!(DetailLevel::parse("FULL"), None);
        assert_eq!(DetailLevel::parse("everything"), None);
    }

    #[test]
    fn test_detail_level_default_is_detailed() {
        assert_eq!(DetailLevel::default(), DetailLevel::Detailed);
    }

    #[test]
    fn test_detail_level_serde_names() {
        let json = serde_json::to_string(&DetailLevel::Full).unwrap();
        assert_eq!(json, "\"full\"");
        let level: DetailLevel = serde_json::from_str("\"basic\"").unwrap();
        assert_eq!(level, DetailLevel::Basic);
    }

    #[test]
    fn test_kind_serde_names() {
        let json = serde_json::to_string(&ResourceKind::ComputeService).unwrap();
        assert_eq!(json, "\"compute_service\"");
    }
}
