//! Tiered detail projection.
//!
//! Three levels, each a superset of the one below:
//!
//! - `basic`: the normalized `id`, `name`, `status` triple.
//! - `detailed`: basic plus the kind's summary fields, copied verbatim
//!   from the raw record when present. Absent fields are omitted, never
//!   synthesized.
//! - `full`: basic plus every raw field, with JSON nulls dropped.
//!
//! Projection is pure and total over well-formed resources; malformed
//! records never reach it (they are rejected during normalization).

use serde_json::{Map, Value};

use stacklens_core::{DetailLevel, Resource};

use crate::kinds;

/// Project a resource at the requested detail level.
pub fn project(resource: &Resource, level: DetailLevel) -> Map<String, Value> {
    let mut fields = basic_fields(resource);
    match level {
        DetailLevel::Basic => {}
        DetailLevel::Detailed => {
            for key in kinds::spec(resource.kind).detailed_fields {
                if let Some(value) = resource.raw_fields.get(*key) {
                    if !value.is_null() {
                        fields.insert((*key).to_string(), value.clone());
                    }
                }
            }
        }
        DetailLevel::Full => {
            for (key, value) in &resource.raw_fields {
                if !value.is_null() {
                    fields.insert(key.clone(), value.clone());
                }
            }
        }
    }
    fields
}

fn basic_fields(resource: &Resource) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("id".to_string(), Value::String(resource.id.clone()));
    fields.insert("name".to_string(), Value::String(resource.name.clone()));
    fields.insert("status".to_string(), Value::String(resource.status.clone()));
    fields
}

// ============================================================================
// Tests
// ============================================================================
