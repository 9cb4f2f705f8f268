//! Configuration types for pfsense-alias-sync.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// pfSense endpoint configuration.
    pub pfsense: PfsenseConfig,

    /// Docker daemon configuration.
    #[serde(default)]
    pub docker: DockerConfig,

    /// Telemetry configuration.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// pfSense REST API endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PfsenseConfig {
    /// Hostname or address of the pfSense instance (e.g., "pfsense.lab.internal").
    pub host: String,

    /// API key sent in the `X-API-Key` header.
    pub api_key: String,

    /// Reconcile aliases for already-running containers at startup.
    #[serde(default)]
    pub sync_on_startup: bool,

    /// Timeout for each pfSense API call, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Docker daemon connection configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DockerConfig {
    /// Unix socket path to the Docker daemon.
    /// Defaults to the platform connection defaults (`/var/run/docker.sock`).
    #[serde(default)]
    pub socket: Option<String>,
}

/// Telemetry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log level filter (e.g., "info", "debug", "pfsense_alias_sync=debug,warn").
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Prometheus metrics exporter address.
    #[serde(default)]
    pub prometheus_addr: Option<SocketAddr>,

    /// OpenTelemetry configuration.
    #[serde(default)]
    pub opentelemetry: Option<OpenTelemetryConfig>,
}

/// OpenTelemetry exporter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenTelemetryConfig {
    /// OTLP endpoint (e.g., "http://localhost:4317").
    pub endpoint: String,

    /// Service name for traces.
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            prometheus_addr: None,
            opentelemetry: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_service_name() -> String {
    "pfsense-alias-sync".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}
