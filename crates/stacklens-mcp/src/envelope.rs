//! Response envelopes for tool results.
//!
//! Every invocation resolves to exactly one envelope: a success payload or
//! a structured `{error_kind, message}` failure, never both and never a
//! bare transport fault. This module is the single place the internal
//! error taxonomy is translated into boundary names.

use rmcp::model::{CallToolResult, Content};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use stacklens_core::Error;

/// Boundary failure payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Boundary taxonomy name, e.g. `UpstreamError`.
    pub error_kind: String,
    /// Human-readable description of the failure.
    pub message: String,
}

impl ErrorEnvelope {
    /// An envelope with an explicit kind and message.
    pub fn new<K, M>(error_kind: K, message: M) -> Self
    where
        K: Into<String>,
        M: Into<String>,
    {
        Self {
            error_kind: error_kind.into(),
            message: message.into(),
        }
    }

    /// An envelope for faults outside the query taxonomy. Handlers should
    /// never produce these on purpose; this is the last-resort mapping
    /// that keeps the transport fault-free.
    pub fn internal<M: Into<String>>(message: M) -> Self {
        Self::new("InternalError", message)
    }

    /// Package as an error tool result.
    pub fn into_call_result(self) -> CallToolResult {
        let text = serde_json::to_string_pretty(&self).unwrap_or_else(|_| self.message.clone());
        CallToolResult::error(vec![Content::text(text)])
    }
}

impl From<&Error> for ErrorEnvelope {
    fn from(error: &Error) -> Self {
        Self::new(error.kind_name(), error.to_string())
    }
}

/// Either a success payload or a structured failure. Never both.
#[derive(Clone, Debug)]
pub enum ResponseEnvelope {
    /// The projected result sequence (or any serialized payload).
    Success(Value),
    /// A structured failure.
    Failure(ErrorEnvelope),
}

impl ResponseEnvelope {
    /// A success envelope carrying `payload`.
    pub fn success<T: Serialize>(payload: &T) -> Self {
        match serde_json::to_value(payload) {
            Ok(value) => Self::Success(value),
            Err(err) => Self::Failure(ErrorEnvelope::internal(format!(
                "unserializable payload: {err}"
            ))),
        }
    }

    /// A failure envelope for `error`.
    pub fn failure(error: &Error) -> Self {
        Self::Failure(error.into())
    }

    /// Whether this is a success envelope.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Package as a tool result: success payloads become pretty-printed
    /// JSON text, failures become error results.
    pub fn into_call_result(self) -> CallToolResult {
        match self {
            Self::Success(value) => match serde_json::to_string_pretty(&value) {
                Ok(text) => CallToolResult::success(vec![Content::text(text)]),
                Err(err) => ErrorEnvelope::internal(format!("unserializable payload: {err}"))
                    .into_call_result(),
            },
            Self::Failure(envelope) => envelope.into_call_result(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use stacklens_core::{ResourceKind, UpstreamKind};

    #[test]
    fn test_error_kinds_map_to_boundary_names() {
        let cases = [
            (
                Error::invalid_argument("limit", "must be >= 1"),
                "InvalidArgumentError",
            ),
            (
                Error::UnknownTool("get_snapshots".to_string()),
                "UnknownToolError",
            ),
            (
                Error::upstream(UpstreamKind::Timeout, "deadline exceeded"),
                "UpstreamError",
            ),
            (
                Error::projection(ResourceKind::Image, "no usable identity"),
                "ProjectionError",
            ),
        ];
        for (error, expected) in &cases {
            let envelope = ErrorEnvelope::from(error);
            assert_eq!(envelope.error_kind, *expected);
            assert!(!envelope.message.is_empty());
        }
    }

    #[test]
    fn test_failure_serializes_kind_and_message() {
        let envelope = ErrorEnvelope::from(&Error::upstream(UpstreamKind::Auth, "token rejected"));
        let text = serde_json::to_string(&envelope).unwrap();
        assert!(text.contains("\"error_kind\":\"UpstreamError\""));
        assert!(text.contains("token rejected"));
    }

    #[test]
    fn test_success_wraps_payload() {
        let envelope = ResponseEnvelope::success(&json!([{"id": "a"}, {"id": "b"}]));
        assert!(envelope.is_success());
        let ResponseEnvelope::Success(value) = envelope else {
            panic!("expected success");
        };
        assert_eq!(value.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_success_call_result_is_not_error() {
        let result = ResponseEnvelope::success(&json!([])).into_call_result();
        assert_eq!(result.is_error, Some(false));
    }

    #[test]
    fn test_failure_call_result_is_error() {
        let result =
            ResponseEnvelope::failure(&Error::UnknownTool("get_snapshots".to_string()))
                .into_call_result();
        assert_eq!(result.is_error, Some(true));
    }
}
