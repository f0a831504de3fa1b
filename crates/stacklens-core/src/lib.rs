//! Stacklens Core — shared types, errors, and the query model.
//!
//! This crate provides the foundational types used across all Stacklens
//! crates. It has no internal Stacklens dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error taxonomy and Result alias
//! - [`resource`]: normalized resource snapshots and the kind registry
//! - [`query`]: validated query parameters

pub mod error;
pub mod query;
pub mod resource;

// Re-export key types at crate root for convenience
pub use error::{Error, Result, UpstreamKind};
pub use query::{QuerySpec, DEFAULT_LIMIT};
pub use resource::{DetailLevel, Resource, ResourceKind};
