//! MCP server infrastructure for Stacklens.
//!
//! This crate provides the protocol-facing machinery the query tools plug
//! into: a registry seam for tool registration and dispatch, the response
//! envelope every invocation resolves to, and a server handler wiring the
//! registry onto an MCP transport.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      stacklens-mcp                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ToolRegistry trait — tool registration and dispatch        │
//! │  CompositeRegistry — combine multiple tool sources          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ResponseEnvelope — success payload XOR {error_kind, msg}   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  McpServer — implements rmcp ServerHandler over a registry  │
//! │  ServerConfig — server metadata (name, version, intro)      │
//! │  dispatch() — the single recoverable boundary               │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Built-in tools:                                            │
//! │  └── health — server status, tool count, upstream name      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Transports: stdio always; streamable HTTP behind the `http` feature.

pub mod envelope;
pub mod registry;
pub mod server;
pub mod tools;

// Re-exports — registry
pub use registry::{CompositeRegistry, ToolRegistry, ToolResult};

// Re-exports — envelope
pub use envelope::{ErrorEnvelope, ResponseEnvelope};

// Re-exports — server
pub use server::{dispatch, McpServer, ServerConfig};

// Re-exports — built-in tools
pub use tools::{HealthResponse, HealthTools};
