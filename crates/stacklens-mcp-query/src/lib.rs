//! Resource query MCP tools for Stacklens.
//!
//! This crate provides [`QueryTools`], a `ToolRegistry` exposing one
//! `get_*` tool per registered resource kind, each accepting the same
//! optional arguments:
//!
//! - `filter` — substring of the name or exact id (default: none)
//! - `limit` — maximum results after filtering (default 100)
//! - `detail_level` — `basic` | `detailed` | `full` (default `detailed`)
//!
//! Argument binding is strict: unknown keys are rejected and violations
//! name the first offending field in schema declaration order.

pub mod args;
pub mod tools;

// Re-exports
pub use args::bind_query_args;
pub use tools::QueryTools;
