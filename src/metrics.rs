//! Metrics instrumentation for pfsense-alias-sync.
//!
//! All metrics are prefixed with `pfsense_alias.`

use metrics::{counter, histogram};
use std::time::Instant;

/// Record a pfSense API call.
pub fn record_api_call(op: &'static str, result: ApiCallResult, duration: std::time::Duration) {
    let result_str = match result {
        ApiCallResult::Success => "success",
        ApiCallResult::Status => "status",
        ApiCallResult::Transport => "transport",
        ApiCallResult::Decode => "decode",
    };

    counter!("pfsense_alias.api.call.count", "op" => op, "result" => result_str).increment(1);
    histogram!("pfsense_alias.api.call.duration.seconds", "op" => op)
        .record(duration.as_secs_f64());
}

/// API call result type for metrics.
#[derive(Debug, Clone, Copy)]
pub enum ApiCallResult {
    /// Call completed with a 2xx response.
    Success,
    /// Server replied with a non-2xx status.
    Status,
    /// Request never completed (connect, TLS, timeout).
    Transport,
    /// Response body could not be decoded.
    Decode,
}

/// Record the outcome of a reconcile operation (add or remove).
pub fn record_reconcile(op: &'static str, result: ReconcileResult) {
    let result_str = match result {
        ReconcileResult::Applied => "applied",
        ReconcileResult::Skipped => "skipped",
        ReconcileResult::Failed => "failed",
    };

    counter!("pfsense_alias.reconcile.count", "op" => op, "result" => result_str).increment(1);
}

/// Reconcile outcome classes.
#[derive(Debug, Clone, Copy)]
pub enum ReconcileResult {
    /// The store mutation was performed.
    Applied,
    /// Refused by an existence/conflict check; nothing changed.
    Skipped,
    /// A remote call failed.
    Failed,
}

/// Record a container lifecycle event seen on the stream.
pub fn record_container_event(action: &'static str, outcome: EventOutcome) {
    let outcome_str = match outcome {
        EventOutcome::Dispatched => "dispatched",
        EventOutcome::NoLabels => "no_labels",
        EventOutcome::ContainerGone => "container_gone",
        EventOutcome::InspectError => "inspect_error",
    };

    counter!("pfsense_alias.event.count", "action" => action, "outcome" => outcome_str)
        .increment(1);
}

/// What happened to a single container event.
#[derive(Debug, Clone, Copy)]
pub enum EventOutcome {
    /// Event was handed to the reconciler.
    Dispatched,
    /// Container had no (or incomplete) alias labels.
    NoLabels,
    /// Container no longer exists.
    ContainerGone,
    /// Inspecting the container failed.
    InspectError,
}

/// Record how many labeled containers the startup pass found.
pub fn record_startup_sync(labeled_containers: usize) {
    counter!("pfsense_alias.startup.containers.count").increment(labeled_containers as u64);
}

/// Helper for timing operations.
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed duration since timer start.
    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }
}
