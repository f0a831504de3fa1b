//! Control-plane backend trait and the HTTP implementation.
//!
//! The [`ControlPlane`] trait is the seam between the query façade and the
//! actual cloud: one read-only listing call per kind, nothing else. The
//! shipped implementation talks REST through the session's service
//! catalog; tests substitute fixture-backed mocks.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use stacklens_core::{Error, Resource, ResourceKind, Result, UpstreamKind};

use crate::kinds::{self, KindSpec};
use crate::session::{transport_error, Session};

/// Abstract control-plane backend.
///
/// Implementations fetch every resource of a kind, in whatever order the
/// control plane returns them; filtering and truncation happen above, in
/// the façade. Must be safe for concurrent read use; invocations share
/// one backend behind an `Arc`.
#[async_trait]
pub trait ControlPlane: Send + Sync {
    /// Fetch all resources of `kind`, preserving upstream order.
    async fn list(&self, kind: ResourceKind) -> Result<Vec<Resource>>;

    /// Backend name for diagnostics.
    fn name(&self) -> &str;

    /// Whether the backend is ready to serve queries.
    fn is_ready(&self) -> bool {
        true
    }
}

/// REST backend over an authenticated [`Session`].
///
/// Holds no mutable state; the session token and endpoint catalog are
/// read-shared. Timeouts come from the injected `reqwest::Client` and
/// surface as `Upstream { kind: timeout }`. Dropping an in-flight call
/// aborts the underlying request.
pub struct HttpControlPlane {
    session: Arc<Session>,
    client: reqwest::Client,
}

impl HttpControlPlane {
    /// Create a backend over an established session.
    pub fn new(session: Arc<Session>, client: reqwest::Client) -> Self {
        Self { session, client }
    }
}

#[async_trait]
impl ControlPlane for HttpControlPlane {
    async fn list(&self, kind: ResourceKind) -> Result<Vec<Resource>> {
        let spec = kinds::spec(kind);
        let base = self.session.endpoint(spec.service)?;
        let url = join_url(base, spec.path);

        log::debug!("listing {kind} from {url}");

        let response = self
            .client
            .get(&url)
            .header("X-Auth-Token", self.session.token())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(Error::upstream(
                UpstreamKind::Auth,
                format!("{kind} listing rejected ({status})"),
            ));
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::upstream(
                UpstreamKind::NotFound,
                format!("{kind} listing endpoint not found at {url}"),
            ));
        }
        if !status.is_success() {
            return Err(Error::upstream(
                UpstreamKind::Protocol,
                format!("{kind} listing failed with status {status}"),
            ));
        }

        let body: Value = response.json().await.map_err(|err| {
            Error::upstream(
                UpstreamKind::Protocol,
                format!("unreadable {kind} listing payload: {err}"),
            )
        })?;

        parse_collection(spec, &body)
    }

    fn name(&self) -> &str {
        "openstack-http"
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Extract and normalize the collection array from a listing payload.
///
/// Malformed records are skipped with a logged note; one bad record never
/// fails the batch.
pub(crate) fn parse_collection(spec: &KindSpec, body: &Value) -> Result<Vec<Resource>> {
    let items = body
        .get(spec.collection)
        .and_then(Value::as_array)
        .ok_or_else(|| {
            Error::upstream(
                UpstreamKind::Protocol,
                format!(
                    "{} listing payload has no '{}' array",
                    spec.kind, spec.collection
                ),
            )
        })?;

    let mut resources = Vec::with_capacity(items.len());
    for raw in items {
        match normalize(spec, raw) {
            Ok(resource) => resources.push(resource),
            Err(err) => log::warn!("skipping record: {err}"),
        }
    }
    Ok(resources)
}

/// Normalize one raw record into a [`Resource`].
///
/// Identity comes from `id`, falling back to the `binary@host` compound
/// key for service listings that carry none. A record with no derivable
/// identity is malformed.
pub(crate) fn normalize(spec: &KindSpec, raw: &Value) -> Result<Resource> {
    let fields = raw
        .as_object()
        .ok_or_else(|| Error::projection(spec.kind, "record is not an object".to_string()))?;

    let id = identity(spec.kind, fields)?;
    let name = scalar_string(fields.get(spec.name_field)).unwrap_or_default();
    let status = scalar_string(fields.get(spec.status_field)).unwrap_or_default();

    Ok(Resource {
        id,
        name,
        kind: spec.kind,
        status,
        raw_fields: fields.clone(),
    })
}

fn identity(kind: ResourceKind, fields: &Map<String, Value>) -> Result<String> {
    if let Some(id) = scalar_string(fields.get("id")) {
        return Ok(id);
    }
    // Cinder os-services rows have no id; binary@host is unique there.
    if let (Some(binary), Some(host)) = (
        scalar_string(fields.get("binary")),
        scalar_string(fields.get("host")),
    ) {
        return Ok(format!("{binary}@{host}"));
    }
    Err(Error::projection(kind, "no usable identity".to_string()))
}

/// Render a JSON scalar as a string. Strings pass through; booleans and
/// numbers are stringified; null, arrays, and objects yield `None`.
fn scalar_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn instance_spec() -> &'static KindSpec {
        kinds::spec(ResourceKind::Instance)
    }

    #[test]
    fn test_parse_collection_preserves_order() {
        let body = json!({
            "servers": [
                { "id": "a1", "name": "web-1", "status": "ACTIVE" },
                { "id": "b2", "name": "web-2", "status": "SHUTOFF" },
                { "id": "c3", "name": "db-1", "status": "ACTIVE" }
            ]
        });
        let resources = parse_collection(instance_spec(), &body).unwrap();
        let ids: Vec<&str> = resources.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a1", "b2", "c3"]);
        assert!(resources.iter().all(|r| r.kind == ResourceKind::Instance));
    }

    #[test]
    fn test_parse_collection_missing_array_is_protocol_error() {
        let body = json!({ "instances": [] });
        let err = parse_collection(instance_spec(), &body).unwrap_err();
        assert!(matches!(
            err,
            Error::Upstream {
                kind: UpstreamKind::Protocol,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_collection_skips_malformed_records() {
        let body = json!({
            "servers": [
                { "id": "a1", "name": "ok", "status": "ACTIVE" },
                { "name": "no-identity" },
                42
            ]
        });
        let resources = parse_collection(instance_spec(), &body).unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].id, "a1");
    }

    #[test]
    fn test_normalize_reads_kind_specific_fields() {
        let spec = kinds::spec(ResourceKind::ComputeService);
        let raw = json!({
            "id": "svc-1",
            "binary": "nova-compute",
            "host": "node-1",
            "state": "up",
            "status": "enabled"
        });
        let resource = normalize(spec, &raw).unwrap();
        assert_eq!(resource.name, "nova-compute");
        assert_eq!(resource.status, "up");
    }

    #[test]
    fn test_normalize_stringifies_boolean_status() {
        let spec = kinds::spec(ResourceKind::NetworkAgent);
        let raw = json!({
            "id": "agent-1",
            "binary": "neutron-l3-agent",
            "host": "net-1",
            "alive": true
        });
        let resource = normalize(spec, &raw).unwrap();
        assert_eq!(resource.status, "true");
    }

    #[test]
    fn test_normalize_compound_identity_for_idless_services() {
        let spec = kinds::spec(ResourceKind::VolumeService);
        let raw = json!({
            "binary": "cinder-scheduler",
            "host": "ctl-1",
            "state": "up"
        });
        let resource = normalize(spec, &raw).unwrap();
        assert_eq!(resource.id, "cinder-scheduler@ctl-1");
    }

    #[test]
    fn test_normalize_null_name_becomes_empty() {
        let spec = kinds::spec(ResourceKind::Volume);
        let raw = json!({ "id": "v1", "name": null, "status": "available", "size": 10 });
        let resource = normalize(spec, &raw).unwrap();
        assert_eq!(resource.name, "");
        assert_eq!(resource.raw_fields.get("size"), Some(&json!(10)));
    }

    #[test]
    fn test_join_url_handles_trailing_slash() {
        assert_eq!(
            join_url("http://cloud:8774/v2.1/", "servers/detail"),
            "http://cloud:8774/v2.1/servers/detail"
        );
        assert_eq!(
            join_url("http://cloud:9696", "v2.0/networks"),
            "http://cloud:9696/v2.0/networks"
        );
    }
}
