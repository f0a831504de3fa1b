//! Keystone session establishment and service-catalog endpoint lookup.
//!
//! A [`Session`] is the authenticated handle the rest of the crate reads
//! from: the subject token plus the public endpoints captured from the
//! token response's service catalog. It is established once at startup and
//! shared read-only (`Arc`) across concurrent invocations; token renewal is
//! not handled here.

use serde::{Deserialize, Serialize};
use serde_json::json;

use stacklens_core::{Error, Result, UpstreamKind};

/// Header carrying the subject token in Keystone v3 responses.
const SUBJECT_TOKEN_HEADER: &str = "X-Subject-Token";

/// Endpoint interface selected from the catalog.
const PUBLIC_INTERFACE: &str = "public";

/// Credentials and endpoint for password authentication against Keystone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudConfig {
    /// Keystone v3 base URL, e.g. `http://127.0.0.1:5000/v3`.
    pub auth_url: String,
    /// User name.
    pub username: String,
    /// Password.
    pub password: String,
    /// Project to scope the token to.
    pub project_name: String,
    /// Domain the user belongs to.
    pub user_domain_name: String,
    /// Domain the project belongs to.
    pub project_domain_name: String,
}

/// The control-plane services Stacklens queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceType {
    /// Nova.
    Compute,
    /// Cinder.
    BlockStorage,
    /// Neutron.
    Network,
    /// Glance.
    Image,
    /// Keystone.
    Identity,
}

impl ServiceType {
    /// Catalog `type` values that satisfy this service, in preference
    /// order. Cinder has gone through several registered type names.
    pub fn catalog_types(&self) -> &'static [&'static str] {
        match self {
            Self::Compute => &["compute"],
            Self::BlockStorage => &["volumev3", "block-storage", "volume"],
            Self::Network => &["network"],
            Self::Image => &["image"],
            Self::Identity => &["identity"],
        }
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Compute => "compute",
            Self::BlockStorage => "block-storage",
            Self::Network => "network",
            Self::Image => "image",
            Self::Identity => "identity",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Token response shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: TokenBody,
}

#[derive(Debug, Deserialize)]
struct TokenBody {
    #[serde(default)]
    catalog: Vec<CatalogService>,
}

#[derive(Debug, Deserialize)]
struct CatalogService {
    #[serde(rename = "type")]
    service_type: String,
    #[serde(default)]
    endpoints: Vec<CatalogEndpoint>,
}

#[derive(Debug, Deserialize)]
struct CatalogEndpoint {
    #[serde(default)]
    interface: String,
    url: String,
}

/// One resolved public endpoint.
#[derive(Debug, Clone)]
struct Endpoint {
    service_type: String,
    url: String,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// An authenticated control-plane session: subject token plus the public
/// endpoints from the service catalog.
#[derive(Debug)]
pub struct Session {
    token: String,
    endpoints: Vec<Endpoint>,
}

impl Session {
    /// Authenticate against Keystone with password credentials and capture
    /// the public service catalog.
    ///
    /// # Errors
    ///
    /// `Upstream { kind: auth }` when Keystone rejects the credentials,
    /// `timeout` / `network` for transport failures, `protocol` when the
    /// response is not a valid token payload.
    pub async fn establish(config: &CloudConfig, client: &reqwest::Client) -> Result<Self> {
        let url = format!("{}/auth/tokens", config.auth_url.trim_end_matches('/'));
        let body = json!({
            "auth": {
                "identity": {
                    "methods": ["password"],
                    "password": {
                        "user": {
                            "name": config.username,
                            "domain": { "name": config.user_domain_name },
                            "password": config.password,
                        }
                    }
                },
                "scope": {
                    "project": {
                        "name": config.project_name,
                        "domain": { "name": config.project_domain_name },
                    }
                }
            }
        });

        log::debug!("authenticating against {url} as {}", config.username);

        let response = client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(Error::upstream(
                UpstreamKind::Auth,
                format!("identity service rejected credentials ({status})"),
            ));
        }
        if !status.is_success() {
            return Err(Error::upstream(
                UpstreamKind::Protocol,
                format!("token request failed with status {status}"),
            ));
        }

        let token = response
            .headers()
            .get(SUBJECT_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
            .ok_or_else(|| {
                Error::upstream(
                    UpstreamKind::Protocol,
                    format!("token response carried no {SUBJECT_TOKEN_HEADER} header"),
                )
            })?;

        let payload: TokenResponse = response.json().await.map_err(|err| {
            Error::upstream(
                UpstreamKind::Protocol,
                format!("unreadable token payload: {err}"),
            )
        })?;

        let endpoints = public_endpoints(payload.token.catalog);
        log::info!(
            "session established, {} public endpoints in catalog",
            endpoints.len()
        );

        Ok(Self { token, endpoints })
    }

    /// The subject token, sent as `X-Auth-Token` on resource queries.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Public endpoint URL for a service, honoring catalog type aliases.
    ///
    /// # Errors
    ///
    /// `Upstream { kind: not_found }` when the catalog has no public
    /// endpoint for the service.
    pub fn endpoint(&self, service: ServiceType) -> Result<&str> {
        for alias in service.catalog_types() {
            if let Some(entry) = self.endpoints.iter().find(|e| e.service_type == *alias) {
                return Ok(&entry.url);
            }
        }
        Err(Error::upstream(
            UpstreamKind::NotFound,
            format!("no public {service} endpoint in the service catalog"),
        ))
    }

    /// Build a session from already-known parts (for tests).
    #[cfg(test)]
    pub(crate) fn from_parts(token: &str, entries: &[(&str, &str)]) -> Self {
        Self {
            token: token.to_string(),
            endpoints: entries
                .iter()
                .map(|(service_type, url)| Endpoint {
                    service_type: (*service_type).to_string(),
                    url: (*url).to_string(),
                })
                .collect(),
        }
    }
}

fn public_endpoints(catalog: Vec<CatalogService>) -> Vec<Endpoint> {
    catalog
        .into_iter()
        .flat_map(|service| {
            let service_type = service.service_type;
            service
                .endpoints
                .into_iter()
                .filter(|endpoint| endpoint.interface == PUBLIC_INTERFACE)
                .map(move |endpoint| Endpoint {
                    service_type: service_type.clone(),
                    url: endpoint.url,
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Map a reqwest failure onto the upstream taxonomy.
pub(crate) fn transport_error(err: reqwest::Error) -> Error {
    let kind = if err.is_timeout() {
        UpstreamKind::Timeout
    } else {
        UpstreamKind::Network
    };
    Error::upstream(kind, err.to_string())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_json() -> Vec<CatalogService> {
        let value = json!([
            {
                "type": "compute",
                "name": "nova",
                "endpoints": [
                    { "interface": "internal", "url": "http://10.0.0.1:8774/v2.1" },
                    { "interface": "public", "url": "http://cloud:8774/v2.1" }
                ]
            },
            {
                "type": "volumev3",
                "name": "cinderv3",
                "endpoints": [
                    { "interface": "public", "url": "http://cloud:8776/v3/abc123" }
                ]
            },
            {
                "type": "placement",
                "name": "placement",
                "endpoints": [
                    { "interface": "public", "url": "http://cloud:8778" }
                ]
            }
        ]);
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_public_endpoints_keep_only_public_interface() {
        let endpoints = public_endpoints(catalog_json());
        assert_eq!(endpoints.len(), 3);
        assert!(endpoints.iter().all(|e| !e.url.contains("10.0.0.1")));
    }

    #[test]
    fn test_endpoint_lookup() {
        let session = Session::from_parts(
            "tok",
            &[
                ("compute", "http://cloud:8774/v2.1"),
                ("volumev3", "http://cloud:8776/v3/abc123"),
            ],
        );
        assert_eq!(
            session.endpoint(ServiceType::Compute).unwrap(),
            "http://cloud:8774/v2.1"
        );
    }

    #[test]
    fn test_endpoint_lookup_honors_aliases() {
        // Newer catalogs register Cinder as block-storage instead of
        // volumev3.
        let session = Session::from_parts("tok", &[("block-storage", "http://cloud:8776/v3")]);
        assert_eq!(
            session.endpoint(ServiceType::BlockStorage).unwrap(),
            "http://cloud:8776/v3"
        );
    }

    #[test]
    fn test_endpoint_missing_is_not_found() {
        let session = Session::from_parts("tok", &[("compute", "http://cloud:8774/v2.1")]);
        let err = session.endpoint(ServiceType::Image).unwrap_err();
        assert!(matches!(
            err,
            Error::Upstream {
                kind: UpstreamKind::NotFound,
                ..
            }
        ));
    }

    #[test]
    fn test_token_response_parses_without_catalog() {
        // Unscoped tokens omit the catalog entirely.
        let payload: TokenResponse = serde_json::from_value(json!({
            "token": { "expires_at": "2026-01-01T00:00:00Z" }
        }))
        .unwrap();
        assert!(payload.token.catalog.is_empty());
    }
}
