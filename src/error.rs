//! Error types for pfsense-alias-sync.

use thiserror::Error;

/// Errors that can end the daemon (or a whole phase of it).
///
/// Expected per-operation failures — a missing record, a name conflict, a
/// single non-2xx API response — are not represented here; those are values
/// returned by the pfSense client and the reconciler.
#[derive(Debug, Error)]
pub enum SyncError {
    /// IO error (network, file, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Docker client error (initialization or API call)
    #[error("Docker client error: {0}")]
    Docker(#[from] bollard::errors::Error),

    /// HTTP client error (from pfSense client initialization)
    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The container event stream itself failed
    #[error("Container event stream terminated: {0}")]
    EventStream(#[source] bollard::errors::Error),
}
