//! Tool registry trait for the MCP server.
//!
//! The registry is static for the process lifetime: descriptors are built
//! once at startup and never change, so `tools()` always reflects exactly
//! what `call()` can dispatch. `CompositeRegistry` combines sub-registries
//! (the query tools, the built-in health tool) into the one registry the
//! server holds.

use std::future::Future;
use std::pin::Pin;

use rmcp::model::{CallToolResult, ErrorData, Tool};
use serde_json::Value;

/// Type alias for async tool handler results.
pub type ToolResult = Pin<Box<dyn Future<Output = Result<CallToolResult, ErrorData>> + Send>>;

/// Trait for registering and dispatching MCP tools.
///
/// Implementations own a fixed tool set; `call` returns `None` for names
/// outside it, which the server turns into an unknown-tool failure
/// envelope. Handlers package their own outcomes (success or structured
/// failure) into the `CallToolResult`; the `Err` arm of [`ToolResult`]
/// is reserved for conditions no envelope can describe.
pub trait ToolRegistry: Send + Sync {
    /// Descriptors for every registered tool.
    fn tools(&self) -> Vec<Tool>;

    /// Dispatch a tool call by name.
    ///
    /// Returns `None` if the tool is not recognized by this registry.
    fn call(&self, name: &str, args: Value) -> Option<ToolResult>;

    /// Number of registered tools.
    fn tool_count(&self) -> usize {
        self.tools().len()
    }

    /// Whether a tool with `name` is registered.
    fn has_tool(&self, name: &str) -> bool {
        self.tools().iter().any(|t| t.name == name)
    }
}

/// A registry that combines multiple sub-registries.
///
/// Dispatch tries each sub-registry in registration order and stops at the
/// first one that recognizes the name.
pub struct CompositeRegistry {
    registries: Vec<Box<dyn ToolRegistry>>,
}

impl CompositeRegistry {
    /// Create a new empty composite registry.
    pub fn new() -> Self {
        Self {
            registries: Vec::new(),
        }
    }

    /// Add a sub-registry.
    #[allow(clippy::should_implement_trait)]
    pub fn add<R: ToolRegistry + 'static>(mut self, registry: R) -> Self {
        self.registries.push(Box::new(registry));
        self
    }
}

impl Default for CompositeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry for CompositeRegistry {
    fn tools(&self) -> Vec<Tool> {
        self.registries.iter().flat_map(|r| r.tools()).collect()
    }

    fn call(&self, name: &str, args: Value) -> Option<ToolResult> {
        for registry in &self.registries {
            if let Some(result) = registry.call(name, args.clone()) {
                return Some(result);
            }
        }
        None
    }
}

// ============================================================================
// Tests
// ============================================================================
