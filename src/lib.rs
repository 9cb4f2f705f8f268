//! pfsense-alias-sync - Keeps pfSense DNS host-override aliases in sync with
//! Docker container lifecycles.
//!
//! Containers declare, via labels, that they should be reachable under an
//! alias of an existing host override on the router. This daemon watches the
//! Docker event stream and creates/deletes those aliases through the pfSense
//! REST API so the alias set always reflects currently-running containers.
//!
//! ## Features
//!
//! - Live add/remove driven by container start/stop events
//! - Optional startup pass reconciling already-running containers
//! - Idempotent mutations: every add/remove re-checks the store first, so
//!   replayed or duplicate events never create duplicate records
//! - Graceful shutdown support
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      pfsense-alias-sync                        │
//! │                                                                │
//! │  ┌────────────────┐    ┌──────────────┐    ┌───────────────┐  │
//! │  │ Docker events  │───▶│  Reconciler  │───▶│ PfsenseClient │──┼──▶ pfSense
//! │  │  (AliasSyncer) │    │ (decisions)  │    │   (HTTPS)     │  │    REST API
//! │  └────────────────┘    └──────────────┘    └───────────────┘  │
//! │         │                                                      │
//! │         │ start → add alias (refuse if name already mapped)    │
//! │         │ stop  → remove alias (only with remove_on_stop)      │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Container labels
//!
//! ```text
//! pfsense.dns.override       = "app.lab.internal"   # existing host override
//! pfsense.dns.alias          = "web.lab.internal"   # alias to register
//! pfsense.dns.description    = "web ui"             # optional descr
//! pfsense.dns.remove_on_stop = "true"               # delete alias on stop
//! ```
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use pfsense_alias_sync::{AliasSyncer, Config, PfsenseClient, Reconciler};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config: Config = load_config();
//!
//!     let client = PfsenseClient::new(&config.pfsense).unwrap();
//!     let docker = bollard::Docker::connect_with_local_defaults().unwrap();
//!     let syncer = AliasSyncer::new(
//!         docker,
//!         Reconciler::new(client),
//!         config.pfsense.sync_on_startup,
//!     );
//!
//!     let shutdown = CancellationToken::new();
//!     syncer.run(shutdown).await.unwrap();
//! }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod metrics;
pub mod pfsense;
pub mod pipeline;
pub mod reconciler;
pub mod telemetry;

// Re-export main types
pub use config::{Config, DockerConfig, PfsenseConfig, TelemetryConfig};
pub use error::SyncError;
pub use pfsense::{DnsStore, PfsenseClient};
pub use pipeline::AliasSyncer;
pub use reconciler::Reconciler;
