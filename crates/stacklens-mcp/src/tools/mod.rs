//! Built-in tools every Stacklens server carries.

pub mod health;

pub use health::{HealthResponse, HealthTools};
