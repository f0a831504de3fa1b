//! The uniform list façade over the control-plane backend.
//!
//! `list(spec)` is the one operation every query tool reduces to: fetch
//! the kind's resources, then filter and truncate. Filtering always runs
//! before truncation, so the cut is deterministic over the filtered set,
//! and upstream order is preserved throughout.

use std::sync::Arc;

use stacklens_core::{QuerySpec, Resource, Result};

use crate::backend::ControlPlane;

/// Resource query façade: generic filter/limit/detail semantics over a
/// kind-dispatched backend.
pub struct QueryFacade {
    backend: Arc<dyn ControlPlane>,
}

impl QueryFacade {
    /// Create a façade over an owned backend.
    pub fn new<B: ControlPlane + 'static>(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Create a façade with a shared backend reference.
    pub fn with_shared(backend: Arc<dyn ControlPlane>) -> Self {
        Self { backend }
    }

    /// Backend name, for diagnostics.
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Whether the backend is ready to serve queries.
    pub fn is_ready(&self) -> bool {
        self.backend.is_ready()
    }

    /// Execute one validated query.
    ///
    /// A non-empty filter retains resources whose `name` contains the
    /// filter (case-sensitive) or whose `id` equals it exactly. A filter
    /// matching nothing is an empty success, not an error.
    pub async fn list(&self, spec: &QuerySpec) -> Result<Vec<Resource>> {
        let mut resources = self.backend.list(spec.kind).await?;

        if !spec.filter.is_empty() {
            resources.retain(|r| r.name.contains(&spec.filter) || r.id == spec.filter);
        }
        resources.truncate(spec.limit);

        Ok(resources)
    }
}

// ============================================================================
// Tests
// ============================================================================
