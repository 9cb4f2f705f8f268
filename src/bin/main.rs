//! pfsense-alias-sync binary entry point.

use bollard::Docker;
use clap::Parser;
use pfsense_alias_sync::{telemetry, AliasSyncer, Config, PfsenseClient, Reconciler};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Keeps pfSense DNS host-override aliases in sync with Docker containers.
#[derive(Parser, Debug)]
#[command(name = "pfsense-alias-sync")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file (TOML). Environment variables with the
    /// PFSENSE_ALIAS prefix override file values.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Cancel the token on SIGINT or SIGTERM.
fn spawn_signal_listener(shutdown: CancellationToken) {
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};

            let mut term = match signal(SignalKind::terminate()) {
                Ok(s) => s,
                Err(e) => {
                    error!(error = %e, "failed to install SIGTERM handler");
                    return;
                }
            };

            tokio::select! {
                _ = tokio::signal::ctrl_c() => info!("received SIGINT, shutting down"),
                _ = term.recv() => info!("received SIGTERM, shutting down"),
            }
        }

        #[cfg(not(unix))]
        {
            let _ = tokio::signal::ctrl_c().await;
            info!("received interrupt, shutting down");
        }

        shutdown.cancel();
    });
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration: optional TOML file layered under environment
    // variables (e.g. PFSENSE_ALIAS_PFSENSE__HOST, PFSENSE_ALIAS_PFSENSE__API_KEY).
    let mut builder = config::Config::builder();
    if let Some(path) = &args.config {
        builder = builder.add_source(config::File::from(path.clone()));
    }
    let config: Config = builder
        .add_source(
            config::Environment::with_prefix("PFSENSE_ALIAS")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    // Initialize telemetry
    telemetry::init(&config.telemetry).map_err(|e| e as Box<dyn std::error::Error>)?;

    info!(
        pfsense_host = %config.pfsense.host,
        sync_on_startup = config.pfsense.sync_on_startup,
        "Starting pfsense-alias-sync"
    );

    // Setup graceful shutdown
    let shutdown = CancellationToken::new();
    spawn_signal_listener(shutdown.clone());

    // Connect to collaborators; either failing here is fatal.
    let client = match PfsenseClient::new(&config.pfsense) {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "failed to construct pfSense client");
            return Err(e.into());
        }
    };
    let docker = match &config.docker.socket {
        Some(path) => Docker::connect_with_socket(path, 120, bollard::API_DEFAULT_VERSION),
        None => Docker::connect_with_local_defaults(),
    };
    let docker = match docker {
        Ok(d) => d,
        Err(e) => {
            error!(error = %e, "failed to connect to Docker daemon");
            return Err(e.into());
        }
    };

    // Run event pipeline
    let syncer = AliasSyncer::new(
        docker,
        Reconciler::new(client),
        config.pfsense.sync_on_startup,
    );
    let result = syncer.run(shutdown).await;

    // Shutdown telemetry
    telemetry::shutdown();

    if let Err(e) = result {
        error!("Event pipeline error: {}", e);
        return Err(e.into());
    }

    info!("pfsense-alias-sync shutdown complete");
    Ok(())
}
