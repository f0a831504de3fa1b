//! Validated query parameters.

use crate::resource::{DetailLevel, ResourceKind};

/// Default maximum number of results per query.
pub const DEFAULT_LIMIT: usize = 100;

/// A validated request: which kind, how filtered, how many, how detailed.
///
/// Constructed once per tool invocation and discarded after use. The
/// argument binder guarantees `limit >= 1` before a spec is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    /// Which resource family to query.
    pub kind: ResourceKind,
    /// Matcher against name (substring) or id (exact); empty means no
    /// filtering.
    pub filter: String,
    /// Maximum results, applied after filtering. Always >= 1.
    pub limit: usize,
    /// How much of each resource to project.
    pub detail_level: DetailLevel,
}

impl QuerySpec {
    /// A spec for `kind` with the documented defaults: no filter,
    /// `limit = 100`, `detail_level = detailed`.
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            filter: String::new(),
            limit: DEFAULT_LIMIT,
            detail_level: DetailLevel::default(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let spec = QuerySpec::new(ResourceKind::Instance);
        assert_eq!(spec.kind, ResourceKind::Instance);
        assert_eq!(spec.filter, "");
        assert_eq!(spec.limit, 100);
        assert_eq!(spec.detail_level, DetailLevel::Detailed);
    }
}
