//! Health check tool.
//!
//! Reports server identity, registered tool count, and which upstream
//! backend the query tools are wired to. The server refuses to start
//! without an established session, so a reachable health tool implies a
//! live control-plane handle.

use std::sync::Arc;

use rmcp::model::Tool;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::envelope::ResponseEnvelope;
use crate::registry::{ToolRegistry, ToolResult};

/// Health check response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Server status ("healthy").
    pub status: String,
    /// Server name.
    pub server_name: String,
    /// Server version.
    pub version: String,
    /// Number of registered tools.
    pub tool_count: usize,
    /// Name of the control-plane backend, when one is wired.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream: Option<String>,
}

/// A registry providing the `health` tool.
///
/// Captures server metadata at construction time; the tool count should
/// include the health tool itself.
pub struct HealthTools {
    server_name: String,
    version: String,
    total_tool_count: usize,
    upstream: Option<String>,
}

impl HealthTools {
    /// Create health tools with server metadata.
    pub fn new(
        server_name: impl Into<String>,
        version: impl Into<String>,
        total_tool_count: usize,
    ) -> Self {
        Self {
            server_name: server_name.into(),
            version: version.into(),
            total_tool_count,
            upstream: None,
        }
    }

    /// Record the upstream backend name in health reports.
    pub fn with_upstream(mut self, upstream: impl Into<String>) -> Self {
        self.upstream = Some(upstream.into());
        self
    }
}

impl ToolRegistry for HealthTools {
    fn tools(&self) -> Vec<Tool> {
        vec![Tool::new_with_raw(
            "health",
            Some("Check server health and status".into()),
            Arc::new(serde_json::Map::new()),
        )]
    }

    fn call(&self, name: &str, _args: Value) -> Option<ToolResult> {
        if name != "health" {
            return None;
        }

        let response = HealthResponse {
            status: "healthy".to_string(),
            server_name: self.server_name.clone(),
            version: self.version.clone(),
            tool_count: self.total_tool_count,
            upstream: self.upstream.clone(),
        };

        Some(Box::pin(async move {
            Ok(ResponseEnvelope::success(&response).into_call_result())
        }))
    }
}

// ============================================================================
// Tests
// ============================================================================
