//! Error types for Stacklens.
//!
//! Every failure a tool invocation can produce maps onto one of four
//! boundary kinds ([`Error::kind_name`]); the dispatcher recovers all of
//! them into response envelopes, so none of these ever crosses the
//! transport as a bare fault.

use std::fmt;

use thiserror::Error;

use crate::resource::ResourceKind;

/// Result type alias for Stacklens operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Classification of a failed control-plane call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamKind {
    /// The outbound call exceeded its time bound.
    Timeout,
    /// The control plane rejected the session token.
    Auth,
    /// The connection could not be established or was dropped.
    Network,
    /// The queried endpoint does not exist in the catalog.
    NotFound,
    /// The control plane answered with something other than the expected
    /// collection payload.
    Protocol,
}

impl fmt::Display for UpstreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "timeout"),
            Self::Auth => write!(f, "auth"),
            Self::Network => write!(f, "network"),
            Self::NotFound => write!(f, "not_found"),
            Self::Protocol => write!(f, "protocol"),
        }
    }
}

/// Errors that can occur while serving a query.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Malformed or out-of-range tool argument.
    #[error("invalid argument '{field}': {reason}")]
    InvalidArgument {
        /// The first offending field, in schema declaration order.
        field: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Tool name not present in the registry.
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// A control-plane call failed. Never retried by the core.
    #[error("upstream {kind} failure: {message}")]
    Upstream {
        /// The causing condition.
        kind: UpstreamKind,
        /// Human-readable description of the failure.
        message: String,
    },

    /// A resource record was too malformed to normalize.
    #[error("malformed {kind} record: {reason}")]
    Projection {
        /// The resource kind being normalized.
        kind: ResourceKind,
        /// Why the record could not be normalized.
        reason: String,
    },
}

impl Error {
    /// Boundary taxonomy name, as surfaced in failure envelopes.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "InvalidArgumentError",
            Self::UnknownTool(_) => "UnknownToolError",
            Self::Upstream { .. } => "UpstreamError",
            Self::Projection { .. } => "ProjectionError",
        }
    }

    /// Creates an invalid-argument error for the named field.
    pub fn invalid_argument<F, R>(field: F, reason: R) -> Self
    where
        F: Into<String>,
        R: Into<String>,
    {
        Self::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an upstream error with the given classification.
    pub fn upstream<M: Into<String>>(kind: UpstreamKind, message: M) -> Self {
        Self::Upstream {
            kind,
            message: message.into(),
        }
    }

    /// Creates a projection error for a malformed record of `kind`.
    pub fn projection<R: Into<String>>(kind: ResourceKind, reason: R) -> Self {
        Self::Projection {
            kind,
            reason: reason.into(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
