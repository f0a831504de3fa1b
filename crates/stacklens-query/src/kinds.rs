//! Per-kind query strategy table.
//!
//! The resource APIs are heterogeneous: each family lives on a different
//! service, under a different path, with its own collection key and its own
//! idea of what a name or a status is. This table is the single place that
//! variance is written down; the backend and the projector both read from
//! it instead of growing per-kind call sites.

use stacklens_core::ResourceKind;

use crate::session::ServiceType;

/// How one resource kind is queried and normalized.
#[derive(Debug)]
pub struct KindSpec {
    /// The resource family this row describes.
    pub kind: ResourceKind,
    /// Which catalog service hosts the listing endpoint.
    pub service: ServiceType,
    /// Path under the service endpoint.
    pub path: &'static str,
    /// Key of the JSON array in the listing response.
    pub collection: &'static str,
    /// Raw field the normalized `name` is read from.
    pub name_field: &'static str,
    /// Raw field the normalized `status` is read from. Booleans and
    /// numbers are stringified as-is.
    pub status_field: &'static str,
    /// Raw fields added by the `detailed` projection, on top of basic.
    pub detailed_fields: &'static [&'static str],
}

/// Strategy row for `kind`.
pub fn spec(kind: ResourceKind) -> &'static KindSpec {
    // TABLE is declared in ResourceKind::ALL order.
    let index = match kind {
        ResourceKind::Instance => 0,
        ResourceKind::Volume => 1,
        ResourceKind::Network => 2,
        ResourceKind::Image => 3,
        ResourceKind::ComputeService => 4,
        ResourceKind::NetworkAgent => 5,
        ResourceKind::VolumeService => 6,
        ResourceKind::Service => 7,
    };
    &TABLE[index]
}

static TABLE: [KindSpec; 8] = [
    KindSpec {
        kind: ResourceKind::Instance,
        service: ServiceType::Compute,
        path: "servers/detail",
        collection: "servers",
        name_field: "name",
        status_field: "status",
        detailed_fields: &["flavor", "image", "addresses", "created"],
    },
    KindSpec {
        kind: ResourceKind::Volume,
        service: ServiceType::BlockStorage,
        path: "volumes/detail",
        collection: "volumes",
        name_field: "name",
        status_field: "status",
        detailed_fields: &[
            "size",
            "volume_type",
            "bootable",
            "attachments",
            "availability_zone",
            "created_at",
        ],
    },
    KindSpec {
        kind: ResourceKind::Network,
        service: ServiceType::Network,
        path: "v2.0/networks",
        collection: "networks",
        name_field: "name",
        status_field: "status",
        detailed_fields: &[
            "shared",
            "router:external",
            "mtu",
            "subnets",
            "availability_zones",
            "project_id",
            "created_at",
        ],
    },
    KindSpec {
        kind: ResourceKind::Image,
        service: ServiceType::Image,
        path: "v2/images",
        collection: "images",
        name_field: "name",
        status_field: "status",
        detailed_fields: &[
            "size",
            "disk_format",
            "container_format",
            "min_disk",
            "min_ram",
            "visibility",
            "protected",
            "owner",
            "created_at",
            "updated_at",
        ],
    },
    KindSpec {
        kind: ResourceKind::ComputeService,
        service: ServiceType::Compute,
        path: "os-services",
        collection: "services",
        name_field: "binary",
        status_field: "state",
        detailed_fields: &["host", "status", "zone", "updated_at", "disabled_reason"],
    },
    KindSpec {
        kind: ResourceKind::NetworkAgent,
        service: ServiceType::Network,
        path: "v2.0/agents",
        collection: "agents",
        name_field: "binary",
        status_field: "alive",
        detailed_fields: &[
            "agent_type",
            "host",
            "admin_state_up",
            "created_at",
            "heartbeat_timestamp",
            "availability_zone",
        ],
    },
    KindSpec {
        kind: ResourceKind::VolumeService,
        service: ServiceType::BlockStorage,
        path: "os-services",
        collection: "services",
        name_field: "binary",
        status_field: "state",
        detailed_fields: &["host", "status", "zone", "updated_at", "disabled_reason"],
    },
    KindSpec {
        kind: ResourceKind::Service,
        service: ServiceType::Identity,
        path: "services",
        collection: "services",
        name_field: "name",
        status_field: "enabled",
        detailed_fields: &["type", "description", "enabled"],
    },
];

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_a_row() {
        for kind in ResourceKind::ALL {
            assert_eq!(spec(kind).kind, kind);
        }
    }

    #[test]
    fn test_table_order_matches_kind_order() {
        for (row, kind) in TABLE.iter().zip(ResourceKind::ALL) {
            assert_eq!(row.kind, kind);
        }
    }

    #[test]
    fn test_service_status_kinds_read_binary_and_state() {
        assert_eq!(spec(ResourceKind::ComputeService).name_field, "binary");
        assert_eq!(spec(ResourceKind::VolumeService).status_field, "state");
        assert_eq!(spec(ResourceKind::NetworkAgent).status_field, "alive");
    }
}
