//! MCP server handler delegating to a tool registry.
//!
//! `McpServer` implements rmcp's `ServerHandler`, answering `list_tools`
//! from the registry's static descriptors and routing `call_tool` through
//! [`dispatch`], the one place every internal error is recovered into a
//! response envelope. The dispatcher itself holds no mutable state, so
//! concurrent invocations need no locking here.

use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParams, CallToolResult, ErrorData, Implementation, ListToolsResult,
    PaginatedRequestParams, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{RoleServer, ServerHandler, ServiceExt};
use serde_json::Value;

use stacklens_core::Error;

use crate::envelope::{ErrorEnvelope, ResponseEnvelope};
use crate::registry::ToolRegistry;

/// Server metadata advertised during initialization.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Server name.
    pub name: String,
    /// Server version.
    pub version: String,
    /// Optional instructions for the calling agent.
    pub instructions: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "stacklens".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            instructions: None,
        }
    }
}

/// Dispatch one tool call against a registry.
///
/// Every outcome is a well-formed `CallToolResult`: unknown names become
/// `UnknownToolError` envelopes, handler faults become `InternalError`
/// envelopes, and handlers package their own successes and failures.
/// Nothing escapes to the transport as an unhandled fault.
pub async fn dispatch(registry: &dyn ToolRegistry, name: &str, args: Value) -> CallToolResult {
    match registry.call(name, args) {
        Some(future) => match future.await {
            Ok(result) => result,
            Err(err) => {
                log::error!("tool '{name}' failed outside the envelope: {}", err.message);
                ErrorEnvelope::internal(err.message).into_call_result()
            }
        },
        None => {
            log::debug!("rejecting unknown tool '{name}'");
            ResponseEnvelope::failure(&Error::UnknownTool(name.to_string())).into_call_result()
        }
    }
}

/// MCP server over a tool registry.
#[derive(Clone)]
pub struct McpServer {
    registry: Arc<dyn ToolRegistry>,
    config: Arc<ServerConfig>,
}

impl McpServer {
    /// Create a server over an owned registry.
    pub fn new<R: ToolRegistry + 'static>(registry: R, config: ServerConfig) -> Self {
        Self {
            registry: Arc::new(registry),
            config: Arc::new(config),
        }
    }

    /// Serve over stdio. Blocks until the connection closes.
    pub async fn serve_stdio(self) -> anyhow::Result<()> {
        log::info!("serving MCP over stdio");
        let service = self.serve(rmcp::transport::stdio()).await?;
        service.waiting().await?;
        Ok(())
    }

    /// Serve over streamable HTTP, mounted at `path`.
    ///
    /// `json_response` selects the single-response channel: stateless
    /// sessions with SSE keep-alive disabled. The default is the stateful
    /// streaming channel.
    #[cfg(feature = "http")]
    pub async fn serve_http(
        self,
        addr: std::net::SocketAddr,
        path: &str,
        json_response: bool,
    ) -> anyhow::Result<()> {
        use std::time::Duration;

        use rmcp::transport::streamable_http_server::{
            session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
        };

        let mut config = StreamableHttpServerConfig::default();
        config.sse_keep_alive = if json_response {
            None
        } else {
            Some(Duration::from_secs(15))
        };
        config.stateful_mode = !json_response;

        let handler = self;
        let service = StreamableHttpService::new(
            move || Ok(handler.clone()),
            LocalSessionManager::default().into(),
            config,
        );

        let router = axum::Router::new().nest_service(path, service);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        log::info!("serving MCP over HTTP at http://{addr}{path}");
        axum::serve(listener, router).await?;
        Ok(())
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        let mut info =
            ServerInfo::new(ServerCapabilities::builder().enable_tools().build());
        info.protocol_version = ProtocolVersion::LATEST;
        info.server_info =
            Implementation::new(self.config.name.clone(), self.config.version.clone());
        info.instructions = self.config.instructions.clone();
        info
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult {
            tools: self.registry.tools(),
            ..Default::default()
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let args = Value::Object(request.arguments.unwrap_or_default());
        Ok(dispatch(self.registry.as_ref(), request.name.as_ref(), args).await)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ToolResult;
    use rmcp::model::{Content, Tool};
    use serde_json::json;

    struct SingleToolRegistry;

    impl ToolRegistry for SingleToolRegistry {
        fn tools(&self) -> Vec<Tool> {
            vec![Tool::new_with_raw(
                "get_instances",
                Some("fixture".into()),
                Arc::new(serde_json::Map::new()),
            )]
        }

        fn call(&self, name: &str, _args: Value) -> Option<ToolResult> {
            if name != "get_instances" {
                return None;
            }
            Some(Box::pin(async {
                Ok(CallToolResult::success(vec![Content::text("[]")]))
            }))
        }
    }

    #[tokio::test]
    async fn test_dispatch_known_tool_succeeds() {
        let result = dispatch(&SingleToolRegistry, "get_instances", json!({})).await;
        assert_eq!(result.is_error, Some(false));
    }

    #[tokio::test]
    async fn test_dispatch_unknown_tool_is_failure_envelope() {
        let result = dispatch(&SingleToolRegistry, "get_snapshots", json!({})).await;
        assert_eq!(result.is_error, Some(true));
    }

    #[tokio::test]
    async fn test_dispatch_recovers_handler_faults() {
        struct FaultyRegistry;

        impl ToolRegistry for FaultyRegistry {
            fn tools(&self) -> Vec<Tool> {
                Vec::new()
            }

            fn call(&self, _name: &str, _args: Value) -> Option<ToolResult> {
                Some(Box::pin(async {
                    Err(ErrorData::internal_error("handler panicked politely", None))
                }))
            }
        }

        let result = dispatch(&FaultyRegistry, "anything", json!({})).await;
        assert_eq!(result.is_error, Some(true));
    }

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.name, "stacklens");
        assert!(config.instructions.is_none());
    }
}
