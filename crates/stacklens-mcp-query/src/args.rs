//! Tool argument binding and validation.
//!
//! Declared fields are validated in schema declaration order (`filter`,
//! `limit`, `detail_level`), so the first offending field named in an
//! error is deterministic. Unknown keys are checked afterwards; the
//! argument map iterates in key order, which keeps that deterministic
//! too.

use serde_json::{Map, Value};

use stacklens_core::{DetailLevel, Error, QuerySpec, ResourceKind, Result, DEFAULT_LIMIT};

/// Declared argument names, in schema declaration order.
pub const DECLARED_FIELDS: [&str; 3] = ["filter", "limit", "detail_level"];

const FIELD_FILTER: &str = "filter";
const FIELD_LIMIT: &str = "limit";
const FIELD_DETAIL_LEVEL: &str = "detail_level";

/// Bind and validate tool arguments into a [`QuerySpec`].
///
/// All arguments are optional; absent ones take the documented defaults
/// (`filter=""`, `limit=100`, `detail_level=detailed`). String-encoded
/// integers are coerced for `limit`.
pub fn bind_query_args(kind: ResourceKind, args: &Map<String, Value>) -> Result<QuerySpec> {
    let filter = bind_filter(args)?;
    let limit = bind_limit(args)?;
    let detail_level = bind_detail_level(args)?;

    if let Some(key) = args
        .keys()
        .find(|key| !DECLARED_FIELDS.contains(&key.as_str()))
    {
        return Err(Error::invalid_argument(key.clone(), "unknown argument"));
    }

    Ok(QuerySpec {
        kind,
        filter,
        limit,
        detail_level,
    })
}

fn bind_filter(args: &Map<String, Value>) -> Result<String> {
    match args.get(FIELD_FILTER) {
        None => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(Error::invalid_argument(
            FIELD_FILTER,
            format!("expected a string, got {}", json_type(other)),
        )),
    }
}

fn bind_limit(args: &Map<String, Value>) -> Result<usize> {
    let value = match args.get(FIELD_LIMIT) {
        None => return Ok(DEFAULT_LIMIT),
        Some(value) => value,
    };

    let limit = match value {
        Value::Number(n) => n.as_u64().ok_or_else(|| {
            Error::invalid_argument(FIELD_LIMIT, "expected a positive integer")
        })?,
        Value::String(s) => s.trim().parse::<u64>().map_err(|_| {
            Error::invalid_argument(FIELD_LIMIT, format!("cannot parse '{s}' as an integer"))
        })?,
        other => {
            return Err(Error::invalid_argument(
                FIELD_LIMIT,
                format!("expected an integer, got {}", json_type(other)),
            ));
        }
    };

    if limit < 1 {
        return Err(Error::invalid_argument(FIELD_LIMIT, "must be >= 1"));
    }
    usize::try_from(limit)
        .map_err(|_| Error::invalid_argument(FIELD_LIMIT, "exceeds the platform limit"))
}

fn bind_detail_level(args: &Map<String, Value>) -> Result<DetailLevel> {
    match args.get(FIELD_DETAIL_LEVEL) {
        None => Ok(DetailLevel::default()),
        Some(Value::String(s)) => DetailLevel::parse(s).ok_or_else(|| {
            Error::invalid_argument(
                FIELD_DETAIL_LEVEL,
                format!(
                    "expected one of {}; got '{s}'",
                    DetailLevel::VALUES.join(", ")
                ),
            )
        }),
        Some(other) => Err(Error::invalid_argument(
            FIELD_DETAIL_LEVEL,
            format!("expected a string, got {}", json_type(other)),
        )),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bind(args: Value) -> Result<QuerySpec> {
        let Value::Object(map) = args else {
            panic!("fixture must be an object");
        };
        bind_query_args(ResourceKind::Instance, &map)
    }

    fn offending_field(err: Error) -> String {
        match err {
            Error::InvalidArgument { field, .. } => field,
            other => panic!("expected InvalidArgument, got {other}"),
        }
    }

    #[test]
    fn test_empty_args_take_defaults() {
        let spec = bind(json!({})).unwrap();
        assert_eq!(spec.filter, "");
        assert_eq!(spec.limit, 100);
        assert_eq!(spec.detail_level, DetailLevel::Detailed);
    }

    #[test]
    fn test_all_args_bound() {
        let spec = bind(json!({
            "filter": "web-server",
            "limit": 10,
            "detail_level": "full"
        }))
        .unwrap();
        assert_eq!(spec.filter, "web-server");
        assert_eq!(spec.limit, 10);
        assert_eq!(spec.detail_level, DetailLevel::Full);
    }

    #[test]
    fn test_limit_coerced_from_string() {
        let spec = bind(json!({ "limit": "25" })).unwrap();
        assert_eq!(spec.limit, 25);
    }

    #[test]
    fn test_limit_zero_rejected() {
        let err = bind(json!({ "limit": 0 })).unwrap_err();
        assert_eq!(offending_field(err), "limit");
    }

    #[test]
    fn test_limit_negative_rejected() {
        let err = bind(json!({ "limit": -5 })).unwrap_err();
        assert_eq!(offending_field(err), "limit");
    }

    #[test]
    fn test_limit_fractional_rejected() {
        let err = bind(json!({ "limit": 2.5 })).unwrap_err();
        assert_eq!(offending_field(err), "limit");
    }

    #[test]
    fn test_limit_unparseable_string_rejected() {
        let err = bind(json!({ "limit": "ten" })).unwrap_err();
        assert_eq!(offending_field(err), "limit");
    }

    #[test]
    fn test_detail_level_unknown_value_rejected() {
        let err = bind(json!({ "detail_level": "everything" })).unwrap_err();
        assert_eq!(offending_field(err), "detail_level");
    }

    #[test]
    fn test_filter_non_string_rejected() {
        let err = bind(json!({ "filter": 42 })).unwrap_err();
        assert_eq!(offending_field(err), "filter");
    }

    #[test]
    fn test_unknown_key_rejected_by_name() {
        let err = bind(json!({ "detial_level": "full" })).unwrap_err();
        assert_eq!(offending_field(err), "detial_level");
    }

    #[test]
    fn test_declared_fields_validated_before_unknown_keys() {
        // Both a bad declared field and an unknown key: the declared field
        // wins, per declaration-order scanning.
        let err = bind(json!({ "limit": 0, "bogus": true })).unwrap_err();
        assert_eq!(offending_field(err), "limit");
    }

    #[test]
    fn test_declaration_order_names_first_offender() {
        // filter is declared before limit, so it is reported first even
        // though both are invalid.
        let err = bind(json!({ "filter": 1, "limit": 0 })).unwrap_err();
        assert_eq!(offending_field(err), "filter");
    }
}
