//! pfSense DNS resolver client and host-override data model.
//!
//! Talks to the unofficial pfSense REST API v2 over HTTPS, authenticated with
//! an `X-API-Key` header. Every operation is a fresh request; nothing is
//! cached across calls, so concurrent changes made directly on the router are
//! picked up by the next reconcile pass.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

use crate::config::PfsenseConfig;
use crate::error::SyncError;
use crate::metrics::{self, ApiCallResult, Timer};

const HOST_OVERRIDES_PATH: &str = "/api/v2/services/dns_resolver/host_overrides";
const ALIAS_PATH: &str = "/api/v2/services/dns_resolver/host_override/alias";
const APPLY_PATH: &str = "/api/v2/services/dns_resolver/apply";

/// A fully qualified domain name, split as `host.domain`.
///
/// The split point is the *first* dot: `a.b.c.example.com` is host `a` in
/// domain `b.c.example.com`. pfSense stores host and domain as separate
/// fields, so the split must never move to a later dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fqdn {
    host: String,
    domain: String,
}

impl Fqdn {
    /// Parse a `host.domain` string. Requires at least one dot with
    /// non-empty text on both sides.
    pub fn parse(s: &str) -> Option<Self> {
        let (host, domain) = s.split_once('.')?;
        if host.is_empty() || domain.is_empty() {
            return None;
        }
        Some(Self {
            host: host.to_string(),
            domain: domain.to_string(),
        })
    }

    /// The host part (everything before the first dot).
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The domain part (everything after the first dot).
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Whether this FQDN is exactly the given host/domain pair.
    pub fn matches(&self, host: &str, domain: &str) -> bool {
        self.host == host && self.domain == domain
    }
}

impl fmt::Display for Fqdn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.host, self.domain)
    }
}

/// A DNS host-override record as stored by the pfSense resolver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostOverride {
    /// Record identifier assigned by pfSense.
    pub id: i64,
    /// Host part of the override's own name.
    pub host: String,
    /// Domain part of the override's own name.
    pub domain: String,
    /// Aliases attached to this override.
    #[serde(default)]
    pub aliases: Vec<HostAlias>,
}

impl HostOverride {
    /// The override's own FQDN.
    pub fn fqdn(&self) -> String {
        format!("{}.{}", self.host, self.domain)
    }
}

/// An alias attached to a host override.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostAlias {
    /// Alias identifier, unique within the parent override.
    pub id: i64,
    /// Identifier of the owning host override.
    pub parent_id: i64,
    /// Host part of the alias name.
    pub host: String,
    /// Domain part of the alias name.
    pub domain: String,
    /// Free-text description.
    #[serde(default)]
    pub descr: String,
}

/// What an FQDN currently maps to in the resolver.
#[derive(Debug, Clone)]
pub enum ResolvedName {
    /// The FQDN is a host override's own name.
    Override(HostOverride),
    /// The FQDN is an alias under `parent`.
    Alias {
        /// The override that owns the alias.
        parent: HostOverride,
        /// The matching alias record.
        alias: HostAlias,
    },
}

impl ResolvedName {
    /// FQDN of the host override that owns the name (the override itself, or
    /// the alias's parent).
    pub fn owner_fqdn(&self) -> String {
        match self {
            ResolvedName::Override(ho) => ho.fqdn(),
            ResolvedName::Alias { parent, .. } => parent.fqdn(),
        }
    }
}

/// Find what an FQDN maps to: the first override whose own name matches, or
/// the first override owning an alias that matches.
///
/// Absence is not an error; it just means the name is unclaimed.
pub fn resolve_fqdn(overrides: &[HostOverride], fqdn: &Fqdn) -> Option<ResolvedName> {
    for ho in overrides {
        if fqdn.matches(&ho.host, &ho.domain) {
            return Some(ResolvedName::Override(ho.clone()));
        }
        if let Some(alias) = find_alias(ho, fqdn) {
            return Some(ResolvedName::Alias {
                parent: ho.clone(),
                alias: alias.clone(),
            });
        }
    }
    None
}

/// Find an alias by exact host/domain match within one override's alias list.
pub fn find_alias<'a>(host_override: &'a HostOverride, fqdn: &Fqdn) -> Option<&'a HostAlias> {
    host_override
        .aliases
        .iter()
        .find(|a| fqdn.matches(&a.host, &a.domain))
}

/// A failed pfSense API call, categorized so callers handle both outcomes
/// explicitly instead of relying on a catch-and-log boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server replied with a non-2xx status.
    #[error("{op} returned HTTP {status}: {body}")]
    Status {
        /// Operation name.
        op: &'static str,
        /// HTTP status code.
        status: StatusCode,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The request never completed (connect, TLS, timeout).
    #[error("{op} transport failure: {source}")]
    Transport {
        /// Operation name.
        op: &'static str,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// The response body could not be decoded.
    #[error("{op} returned an undecodable body: {source}")]
    Decode {
        /// Operation name.
        op: &'static str,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },
}

/// Remote DNS store operations, the seam between the reconciler and the
/// pfSense API (and in-memory fakes in tests).
#[async_trait]
pub trait DnsStore: Send + Sync {
    /// Fetch all host-override records with their nested aliases.
    async fn list_host_overrides(&self) -> Result<Vec<HostOverride>, ApiError>;

    /// Create an alias under the given override, then apply pending resolver
    /// changes. Both requests must succeed.
    async fn create_alias(
        &self,
        parent_id: i64,
        host: &str,
        domain: &str,
        descr: &str,
    ) -> Result<(), ApiError>;

    /// Delete an alias by identifier, then apply pending resolver changes.
    /// Both requests must succeed.
    async fn delete_alias(&self, parent_id: i64, alias_id: i64) -> Result<(), ApiError>;
}

/// List responses arrive wrapped in a `data` envelope.
#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    #[serde(default)]
    data: Option<T>,
}

#[derive(Debug, Serialize)]
struct CreateAliasBody<'a> {
    parent_id: i64,
    host: &'a str,
    domain: &'a str,
    descr: &'a str,
}

#[derive(Debug, Serialize)]
struct DeleteAliasBody {
    parent_id: i64,
    id: i64,
}

/// Stateless HTTPS client for the pfSense REST API.
pub struct PfsenseClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PfsenseClient {
    /// Create a client for `https://{host}` from configuration.
    pub fn new(config: &PfsenseConfig) -> Result<Self, SyncError> {
        Self::with_base_url(
            format!("https://{}", config.host),
            &config.api_key,
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Create a client against an explicit base origin.
    ///
    /// Certificate validation is disabled on purpose: the target is a private
    /// infrastructure endpoint with a self-signed certificate.
    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: &str,
        timeout: Duration,
    ) -> Result<Self, SyncError> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.to_string(),
        })
    }

    /// Issue one request, log failures with status and body, and return the
    /// raw response body on success.
    async fn call(
        &self,
        op: &'static str,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<String, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let timer = Timer::start();

        let mut request = self
            .http
            .request(method, &url)
            .header("X-API-Key", &self.api_key)
            .header("Content-Type", "application/json");
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = match request.send().await {
            Ok(r) => r,
            Err(e) => {
                error!(op, error = %e, "pfSense API transport failure");
                metrics::record_api_call(op, ApiCallResult::Transport, timer.elapsed());
                return Err(ApiError::Transport { op, source: e });
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(t) => t,
            Err(e) => {
                error!(op, %status, error = %e, "failed reading pfSense API response body");
                metrics::record_api_call(op, ApiCallResult::Transport, timer.elapsed());
                return Err(ApiError::Transport { op, source: e });
            }
        };

        if !status.is_success() {
            error!(op, %status, body = %text, "pfSense API call failed");
            metrics::record_api_call(op, ApiCallResult::Status, timer.elapsed());
            return Err(ApiError::Status {
                op,
                status,
                body: text,
            });
        }

        debug!(op, %status, "pfSense API call succeeded");
        metrics::record_api_call(op, ApiCallResult::Success, timer.elapsed());
        Ok(text)
    }

    /// Commit pending resolver changes so a create/delete takes effect.
    async fn apply(&self) -> Result<(), ApiError> {
        self.call("apply", Method::POST, APPLY_PATH, None).await?;
        Ok(())
    }
}

#[async_trait]
impl DnsStore for PfsenseClient {
    async fn list_host_overrides(&self) -> Result<Vec<HostOverride>, ApiError> {
        let op = "list_host_overrides";
        let body = self.call(op, Method::GET, HOST_OVERRIDES_PATH, None).await?;

        let envelope: DataEnvelope<Vec<HostOverride>> =
            serde_json::from_str(&body).map_err(|e| {
                error!(op, error = %e, "failed to decode host overrides response");
                metrics::record_api_call(op, ApiCallResult::Decode, Duration::ZERO);
                ApiError::Decode { op, source: e }
            })?;

        Ok(envelope.data.unwrap_or_default())
    }

    async fn create_alias(
        &self,
        parent_id: i64,
        host: &str,
        domain: &str,
        descr: &str,
    ) -> Result<(), ApiError> {
        let body = serde_json::to_value(CreateAliasBody {
            parent_id,
            host,
            domain,
            descr,
        })
        .map_err(|e| ApiError::Decode {
            op: "create_alias",
            source: e,
        })?;

        self.call("create_alias", Method::POST, ALIAS_PATH, Some(body))
            .await?;
        self.apply().await
    }

    async fn delete_alias(&self, parent_id: i64, alias_id: i64) -> Result<(), ApiError> {
        let body = serde_json::to_value(DeleteAliasBody {
            parent_id,
            id: alias_id,
        })
        .map_err(|e| ApiError::Decode {
            op: "delete_alias",
            source: e,
        })?;

        self.call("delete_alias", Method::DELETE, ALIAS_PATH, Some(body))
            .await?;
        self.apply().await
    }
}
