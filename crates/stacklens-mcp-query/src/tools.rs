//! MCP tools for control-plane resource queries.
//!
//! Provides `QueryTools`, a `ToolRegistry` exposing one `get_*` tool per
//! resource kind, all delegating to the shared [`QueryFacade`].

use std::sync::Arc;

use rmcp::model::Tool;
use serde_json::{json, Map, Value};

use stacklens_core::{Error, ResourceKind};
use stacklens_mcp::envelope::ResponseEnvelope;
use stacklens_mcp::registry::{ToolRegistry, ToolResult};
use stacklens_query::{project, QueryFacade};

use crate::args::bind_query_args;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn json_schema(value: Value) -> Arc<Map<String, Value>> {
    match value {
        Value::Object(map) => Arc::new(map),
        _ => Arc::new(Map::new()),
    }
}

fn make_tool(name: &str, description: String, schema: Value) -> Tool {
    Tool::new_with_raw(
        name.to_string(),
        Some(description.into()),
        json_schema(schema),
    )
}

fn tool_description(kind: ResourceKind) -> String {
    format!(
        "List OpenStack {} with optional filtering and tiered detail",
        kind.plural_label()
    )
}

fn input_schema(kind: ResourceKind) -> Value {
    json!({
        "type": "object",
        "properties": {
            "filter": {
                "type": "string",
                "description": format!(
                    "Substring of the {} name, or an exact id",
                    kind.as_str().replace('_', " ")
                )
            },
            "limit": {
                "type": "integer",
                "description": "Maximum number of results (default 100)"
            },
            "detail_level": {
                "type": "string",
                "enum": ["basic", "detailed", "full"],
                "default": "detailed",
                "description": "How much of each resource to return"
            }
        }
    })
}

// ---------------------------------------------------------------------------
// QueryTools
// ---------------------------------------------------------------------------

/// MCP tools for resource queries.
///
/// Generates one tool per registered resource kind (`get_instances`,
/// `get_volumes`, `get_networks`, `get_images`, `get_compute_services`,
/// `get_network_agents`, `get_volume_services`, `get_services`), each with
/// the same optional `filter` / `limit` / `detail_level` arguments.
pub struct QueryTools {
    facade: Arc<QueryFacade>,
}

impl QueryTools {
    /// Create query tools over an owned façade.
    pub fn new(facade: QueryFacade) -> Self {
        Self {
            facade: Arc::new(facade),
        }
    }

    /// Create query tools with a shared façade reference.
    pub fn with_shared(facade: Arc<QueryFacade>) -> Self {
        Self { facade }
    }
}

/// Run one query end to end, from argument binding through projection to
/// the response envelope.
async fn run_query(facade: &QueryFacade, kind: ResourceKind, args: &Value) -> ResponseEnvelope {
    let Some(object) = args.as_object() else {
        return ResponseEnvelope::failure(&Error::invalid_argument(
            "arguments",
            "expected a JSON object",
        ));
    };

    let spec = match bind_query_args(kind, object) {
        Ok(spec) => spec,
        Err(err) => return ResponseEnvelope::failure(&err),
    };

    match facade.list(&spec).await {
        Ok(resources) => {
            let items: Vec<Map<String, Value>> = resources
                .iter()
                .map(|resource| project(resource, spec.detail_level))
                .collect();
            log::debug!(
                "{} returned {} {}",
                kind.tool_name(),
                items.len(),
                kind.plural_label()
            );
            ResponseEnvelope::success(&items)
        }
        Err(err) => {
            log::warn!("{} failed: {err}", kind.tool_name());
            ResponseEnvelope::failure(&err)
        }
    }
}

impl ToolRegistry for QueryTools {
    fn tools(&self) -> Vec<Tool> {
        ResourceKind::ALL
            .iter()
            .map(|kind| {
                make_tool(
                    kind.tool_name(),
                    tool_description(*kind),
                    input_schema(*kind),
                )
            })
            .collect()
    }

    fn call(&self, name: &str, args: Value) -> Option<ToolResult> {
        let kind = ResourceKind::from_tool_name(name)?;
        let facade = Arc::clone(&self.facade);
        Some(Box::pin(async move {
            Ok(run_query(&facade, kind, &args).await.into_call_result())
        }))
    }
}

// ============================================================================
// Tests
// ============================================================================
