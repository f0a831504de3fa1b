//! Stacklens Query — the resource query façade over an OpenStack control
//! plane.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     stacklens-query                          │
//! ├──────────────────────────────────────────────────────────────┤
//! │  QueryFacade — list(spec): filter, truncate, preserve order  │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ControlPlane trait — one upstream query per kind            │
//! │  HttpControlPlane — reqwest against the service catalog      │
//! │  KindSpec table — per-kind endpoint and field strategy       │
//! ├──────────────────────────────────────────────────────────────┤
//! │  project() — tiered basic / detailed / full field sets       │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Session — Keystone token + public endpoint catalog          │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The façade is read-only: it never mutates control-plane state, never
//! retries, and preserves upstream result order verbatim.

pub mod backend;
pub mod facade;
pub mod kinds;
pub mod project;
pub mod session;

// Re-exports — backend
pub use backend::{ControlPlane, HttpControlPlane};

// Re-exports — facade
pub use facade::QueryFacade;

// Re-exports — projection
pub use project::project;

// Re-exports — session
pub use session::{CloudConfig, ServiceType, Session};
