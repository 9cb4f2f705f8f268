//! Docker event pipeline: startup reconciliation plus the live event loop.
//!
//! Events are consumed strictly in arrival order by a single consumer; one
//! event's remote calls complete (or fail) before the next event is read.
//! The stop-after-start ordering the Docker daemon delivers is what keeps a
//! short-lived container from leaving a stale alias behind.

use std::collections::HashMap;

use bollard::container::ListContainersOptions;
use bollard::errors::Error as DockerError;
use bollard::models::{EventMessage, EventMessageTypeEnum};
use bollard::system::EventsOptions;
use bollard::Docker;
use futures::StreamExt;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::error::SyncError;
use crate::metrics::{self, EventOutcome};
use crate::pfsense::DnsStore;
use crate::reconciler::{ContainerAction, ContainerDnsLabels, Reconciler};

/// Extract the action and container id from a raw event, filtering to
/// container start/stop. Everything else is irrelevant.
fn relevant_event(event: &EventMessage) -> Option<(ContainerAction, String)> {
    if event.typ != Some(EventMessageTypeEnum::CONTAINER) {
        return None;
    }

    let action = match event.action.as_deref() {
        Some("start") => ContainerAction::Start,
        Some("stop") => ContainerAction::Stop,
        _ => return None,
    };

    let id = event.actor.as_ref()?.id.clone()?;
    Some((action, id))
}

/// Strip the leading slash Docker puts on container names.
fn display_name(name: Option<&str>, container_id: &str) -> String {
    match name {
        Some(n) => n.trim_start_matches('/').to_string(),
        None => container_id.to_string(),
    }
}

/// Long-lived consumer of Docker lifecycle events, dispatching to the
/// reconciler.
pub struct AliasSyncer<S> {
    docker: Docker,
    reconciler: Reconciler<S>,
    sync_on_startup: bool,
}

impl<S: DnsStore> AliasSyncer<S> {
    /// Create a syncer over an established Docker handle and reconciler.
    pub fn new(docker: Docker, reconciler: Reconciler<S>, sync_on_startup: bool) -> Self {
        Self {
            docker,
            reconciler,
            sync_on_startup,
        }
    }

    /// Run until the token is cancelled or the event stream dies.
    ///
    /// The Docker handle is owned by `self` and released when this returns,
    /// whichever path gets here.
    pub async fn run(self, shutdown: CancellationToken) -> Result<(), SyncError> {
        if self.sync_on_startup {
            self.sync_running_containers().await;
        }

        info!("listening for container start/stop events");

        let mut filters = HashMap::new();
        filters.insert("type".to_string(), vec!["container".to_string()]);
        filters.insert(
            "event".to_string(),
            vec!["start".to_string(), "stop".to_string()],
        );
        let mut stream = self.docker.events(Some(EventsOptions::<String> {
            filters,
            ..Default::default()
        }));

        loop {
            tokio::select! {
                biased;

                _ = shutdown.cancelled() => {
                    info!("event loop received shutdown signal");
                    return Ok(());
                }

                item = stream.next() => {
                    match item {
                        Some(Ok(event)) => {
                            // The daemon-side filter should already narrow the
                            // stream, but the subject and action are still
                            // checked here before anything is dispatched.
                            if let Some((action, container_id)) = relevant_event(&event) {
                                self.handle_container_event(action, &container_id).await;
                            }
                        }
                        Some(Err(e)) => {
                            error!(error = %e, "container event stream failed");
                            return Err(SyncError::EventStream(e));
                        }
                        None => {
                            warn!("container event stream ended");
                            return Ok(());
                        }
                    }
                }
            }
        }
    }

    /// Startup pass: treat every running container as an implicit start
    /// event. Stop semantics never apply here.
    async fn sync_running_containers(&self) {
        info!("scanning running containers for aliases to add");

        let containers = match self
            .docker
            .list_containers(Some(ListContainersOptions::<String>::default()))
            .await
        {
            Ok(c) => c,
            Err(e) => {
                error!(error = %e, "failed to enumerate running containers, skipping startup sync");
                return;
            }
        };

        let mut found = 0usize;
        for container in containers {
            let Some(labels) = container.labels.as_ref() else {
                continue;
            };
            let Some(parsed) = ContainerDnsLabels::from_labels(labels) else {
                continue;
            };

            let id = container.id.as_deref().unwrap_or_default();
            let name = display_name(
                container.names.as_ref().and_then(|n| n.first()).map(String::as_str),
                id,
            );

            info!(container = %name, alias = %parsed.alias_fqdn, "adding alias for running container");
            self.reconciler
                .add_alias(
                    &parsed.override_fqdn,
                    &parsed.alias_fqdn,
                    &parsed.description,
                )
                .await;
            found += 1;
        }

        metrics::record_startup_sync(found);
        if found == 0 {
            info!("no containers with alias labels found during startup sync");
        }
    }

    /// Resolve one event's container to its current labels and dispatch.
    async fn handle_container_event(&self, action: ContainerAction, container_id: &str) {
        let inspect = match self.docker.inspect_container(container_id, None).await {
            Ok(i) => i,
            Err(DockerError::DockerResponseServerError {
                status_code: 404,
                message,
            }) => {
                warn!(container_id, message, "container not found, skipping event");
                metrics::record_container_event(action.as_str(), EventOutcome::ContainerGone);
                return;
            }
            Err(e) => {
                error!(container_id, error = %e, "failed to inspect container, skipping event");
                metrics::record_container_event(action.as_str(), EventOutcome::InspectError);
                return;
            }
        };

        let name = display_name(inspect.name.as_deref(), container_id);
        let labels = inspect
            .config
            .and_then(|c| c.labels)
            .unwrap_or_default();

        match self.reconciler.handle_event(action, &labels, &name).await {
            Some(_) => {
                metrics::record_container_event(action.as_str(), EventOutcome::Dispatched);
            }
            None => {
                metrics::record_container_event(action.as_str(), EventOutcome::NoLabels);
            }
        }
    }
}
