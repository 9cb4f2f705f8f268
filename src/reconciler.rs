//! Decision logic mapping container lifecycle transitions to alias mutations.
//!
//! Every mutating path performs a fresh existence/conflict check against the
//! store immediately before acting. That costs an extra read per operation
//! but makes add/remove safe to replay on duplicate or restarted event
//! streams, which matters far more than call volume for this workload.

use std::collections::HashMap;

use tracing::{info, warn};

use crate::metrics::{self, ReconcileResult};
use crate::pfsense::{find_alias, resolve_fqdn, ApiError, DnsStore, Fqdn, ResolvedName};

/// Label carrying the FQDN of the host override that receives the alias.
pub const LABEL_OVERRIDE: &str = "pfsense.dns.override";
/// Label carrying the FQDN to register as the alias.
pub const LABEL_ALIAS: &str = "pfsense.dns.alias";
/// Label carrying the alias description.
pub const LABEL_DESCRIPTION: &str = "pfsense.dns.description";
/// Label that must be exactly `"true"` for a stop event to delete the alias.
pub const LABEL_REMOVE_ON_STOP: &str = "pfsense.dns.remove_on_stop";

/// Alias declaration extracted from a container's label map, validated once
/// at the point of extraction.
#[derive(Debug, Clone)]
pub struct ContainerDnsLabels {
    /// FQDN of the existing host override to attach the alias to.
    pub override_fqdn: Fqdn,
    /// FQDN to register as the alias.
    pub alias_fqdn: Fqdn,
    /// Description attached to the alias record.
    pub description: String,
    /// Whether a stop event deletes the alias.
    pub remove_on_stop: bool,
}

impl ContainerDnsLabels {
    /// Extract and validate the alias declaration from a raw label map.
    ///
    /// Returns `None` when either required label is absent — the normal case
    /// for containers that never opted in. A label that is present but not a
    /// parseable FQDN is logged and also yields `None`.
    pub fn from_labels(labels: &HashMap<String, String>) -> Option<Self> {
        let override_raw = labels.get(LABEL_OVERRIDE)?;
        let alias_raw = labels.get(LABEL_ALIAS)?;

        let override_fqdn = match Fqdn::parse(override_raw) {
            Some(f) => f,
            None => {
                warn!(label = LABEL_OVERRIDE, value = %override_raw, "label is not a valid FQDN, ignoring container");
                return None;
            }
        };
        let alias_fqdn = match Fqdn::parse(alias_raw) {
            Some(f) => f,
            None => {
                warn!(label = LABEL_ALIAS, value = %alias_raw, "label is not a valid FQDN, ignoring container");
                return None;
            }
        };

        Some(Self {
            override_fqdn,
            alias_fqdn,
            description: labels.get(LABEL_DESCRIPTION).cloned().unwrap_or_default(),
            remove_on_stop: labels.get(LABEL_REMOVE_ON_STOP).map(String::as_str) == Some("true"),
        })
    }
}

/// Container lifecycle transitions the reconciler reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerAction {
    /// Container started.
    Start,
    /// Container stopped.
    Stop,
}

impl ContainerAction {
    /// Static name for logging and metrics labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerAction::Start => "start",
            ContainerAction::Stop => "stop",
        }
    }
}

/// Why a reconcile operation refused to touch the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The alias FQDN already resolves somewhere; `owner` is the FQDN of the
    /// host override that currently claims it.
    AliasTaken {
        /// FQDN of the current owner.
        owner: String,
    },
    /// The override FQDN does not name an existing host override.
    OverrideNotFound,
    /// The alias is not attached to that override (already removed, or never
    /// was).
    AliasNotFound,
}

/// Outcome of one reconcile operation.
#[derive(Debug)]
pub enum ReconcileOutcome {
    /// The store mutation was performed and applied.
    Applied,
    /// Refused by a pre-flight check; the store is unchanged.
    Skipped(SkipReason),
    /// A remote call failed; logged, never propagated.
    Failed(ApiError),
}

impl ReconcileOutcome {
    fn result(&self) -> ReconcileResult {
        match self {
            ReconcileOutcome::Applied => ReconcileResult::Applied,
            ReconcileOutcome::Skipped(_) => ReconcileResult::Skipped,
            ReconcileOutcome::Failed(_) => ReconcileResult::Failed,
        }
    }
}

/// Applies container lifecycle transitions to the remote DNS store.
///
/// Holds the store as an explicit dependency; there is no ambient client
/// state anywhere in the crate.
pub struct Reconciler<S> {
    store: S,
}

impl<S: DnsStore> Reconciler<S> {
    /// Create a reconciler over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Handle one container lifecycle event.
    ///
    /// Returns `None` when the event required no reconcile at all: missing or
    /// invalid labels, or a stop without `pfsense.dns.remove_on_stop`.
    pub async fn handle_event(
        &self,
        action: ContainerAction,
        labels: &HashMap<String, String>,
        container_name: &str,
    ) -> Option<ReconcileOutcome> {
        let parsed = ContainerDnsLabels::from_labels(labels)?;

        let outcome = match action {
            ContainerAction::Start => {
                info!(container = %container_name, alias = %parsed.alias_fqdn, "container started, adding alias");
                self.add_alias(
                    &parsed.override_fqdn,
                    &parsed.alias_fqdn,
                    &parsed.description,
                )
                .await
            }
            ContainerAction::Stop if parsed.remove_on_stop => {
                info!(container = %container_name, alias = %parsed.alias_fqdn, "container stopped, removing alias");
                self.remove_alias(&parsed.override_fqdn, &parsed.alias_fqdn)
                    .await
            }
            ContainerAction::Stop => return None,
        };

        Some(outcome)
    }

    /// Add `alias_fqdn` as an alias of `override_fqdn`.
    ///
    /// Refuses when the alias name already resolves to anything in the store
    /// (even itself — this is what makes replays harmless) or when the
    /// override FQDN does not name an existing host override's own name. An
    /// override FQDN that turns out to be somebody's alias also refuses: an
    /// alias cannot parent another alias.
    pub async fn add_alias(
        &self,
        override_fqdn: &Fqdn,
        alias_fqdn: &Fqdn,
        descr: &str,
    ) -> ReconcileOutcome {
        let overrides = self.snapshot().await;

        if let Some(existing) = resolve_fqdn(&overrides, alias_fqdn) {
            let owner = existing.owner_fqdn();
            warn!(alias = %alias_fqdn, owner = %owner, "alias already mapped, refusing to add");
            return self.record("add", ReconcileOutcome::Skipped(SkipReason::AliasTaken { owner }));
        }

        let parent = match resolve_fqdn(&overrides, override_fqdn) {
            Some(ResolvedName::Override(ho)) => ho,
            Some(ResolvedName::Alias { .. }) | None => {
                warn!(host_override = %override_fqdn, "host override not found, refusing to add alias");
                return self.record("add", ReconcileOutcome::Skipped(SkipReason::OverrideNotFound));
            }
        };

        match self
            .store
            .create_alias(parent.id, alias_fqdn.host(), alias_fqdn.domain(), descr)
            .await
        {
            Ok(()) => {
                info!(alias = %alias_fqdn, host_override = %override_fqdn, "alias added");
                self.record("add", ReconcileOutcome::Applied)
            }
            Err(e) => self.record("add", ReconcileOutcome::Failed(e)),
        }
    }

    /// Remove `alias_fqdn` from `override_fqdn`'s alias list.
    ///
    /// Refuses when the override is missing or the alias is not attached to
    /// that override, so a stop event can call this without checking current
    /// state first.
    pub async fn remove_alias(&self, override_fqdn: &Fqdn, alias_fqdn: &Fqdn) -> ReconcileOutcome {
        let overrides = self.snapshot().await;

        let parent = match resolve_fqdn(&overrides, override_fqdn) {
            Some(ResolvedName::Override(ho)) => ho,
            Some(ResolvedName::Alias { .. }) | None => {
                warn!(host_override = %override_fqdn, "host override not found, refusing to remove alias");
                return self
                    .record("remove", ReconcileOutcome::Skipped(SkipReason::OverrideNotFound));
            }
        };

        let alias = match find_alias(&parent, alias_fqdn) {
            Some(a) => a.clone(),
            None => {
                warn!(alias = %alias_fqdn, host_override = %override_fqdn, "alias not found under that override, nothing to remove");
                return self.record("remove", ReconcileOutcome::Skipped(SkipReason::AliasNotFound));
            }
        };

        match self.store.delete_alias(alias.parent_id, alias.id).await {
            Ok(()) => {
                info!(alias = %alias_fqdn, host_override = %override_fqdn, "alias removed");
                self.record("remove", ReconcileOutcome::Applied)
            }
            Err(e) => self.record("remove", ReconcileOutcome::Failed(e)),
        }
    }

    /// Fresh read of the full override set. A failed list is logged and read
    /// as an empty store; the caller's "not found" checks then refuse safely.
    async fn snapshot(&self) -> Vec<crate::pfsense::HostOverride> {
        match self.store.list_host_overrides().await {
            Ok(overrides) => overrides,
            Err(e) => {
                warn!(error = %e, "listing host overrides failed, treating store as empty");
                Vec::new()
            }
        }
    }

    fn record(&self, op: &'static str, outcome: ReconcileOutcome) -> ReconcileOutcome {
        metrics::record_reconcile(op, outcome.result());
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pfsense::{HostAlias, HostOverride};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Mutating calls issued against the fake store.
    #[derive(Debug, Clone, PartialEq, Eq)]
    enum StoreCall {
        List,
        Create {
            parent_id: i64,
            host: String,
            domain: String,
            descr: String,
        },
        Delete {
            parent_id: i64,
            alias_id: i64,
        },
    }

    /// In-memory `DnsStore` that records every call.
    struct FakeStore {
        overrides: Mutex<Vec<HostOverride>>,
        calls: Mutex<Vec<StoreCall>>,
        fail_list: bool,
        next_alias_id: Mutex<i64>,
    }

    impl FakeStore {
        fn new(overrides: Vec<HostOverride>) -> Self {
            Self {
                overrides: Mutex::new(overrides),
                calls: Mutex::new(Vec::new()),
                fail_list: false,
                next_alias_id: Mutex::new(100),
            }
        }

        fn failing_list() -> Self {
            let mut store = Self::new(Vec::new());
            store.fail_list = true;
            store
        }

        fn calls(&self) -> Vec<StoreCall> {
            self.calls.lock().unwrap().clone()
        }

        fn mutating_calls(&self) -> Vec<StoreCall> {
            self.calls()
                .into_iter()
                .filter(|c| !matches!(c, StoreCall::List))
                .collect()
        }

        fn alias_count(&self) -> usize {
            self.overrides
                .lock()
                .unwrap()
                .iter()
                .map(|ho| ho.aliases.len())
                .sum()
        }
    }

    #[async_trait]
    impl DnsStore for FakeStore {
        async fn list_host_overrides(&self) -> Result<Vec<HostOverride>, ApiError> {
            self.calls.lock().unwrap().push(StoreCall::List);
            if self.fail_list {
                return Err(ApiError::Status {
                    op: "list_host_overrides",
                    status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                    body: "boom".to_string(),
                });
            }
            Ok(self.overrides.lock().unwrap().clone())
        }

        async fn create_alias(
            &self,
            parent_id: i64,
            host: &str,
            domain: &str,
            descr: &str,
        ) -> Result<(), ApiError> {
            self.calls.lock().unwrap().push(StoreCall::Create {
                parent_id,
                host: host.to_string(),
                domain: domain.to_string(),
                descr: descr.to_string(),
            });

            let mut id = self.next_alias_id.lock().unwrap();
            *id += 1;
            let alias = HostAlias {
                id: *id,
                parent_id,
                host: host.to_string(),
                domain: domain.to_string(),
                descr: descr.to_string(),
            };

            let mut overrides = self.overrides.lock().unwrap();
            let parent = overrides
                .iter_mut()
                .find(|ho| ho.id == parent_id)
                .expect("create_alias called with unknown parent");
            parent.aliases.push(alias);
            Ok(())
        }

        async fn delete_alias(&self, parent_id: i64, alias_id: i64) -> Result<(), ApiError> {
            self.calls
                .lock()
                .unwrap()
                .push(StoreCall::Delete { parent_id, alias_id });

            let mut overrides = self.overrides.lock().unwrap();
            if let Some(parent) = overrides.iter_mut().find(|ho| ho.id == parent_id) {
                parent.aliases.retain(|a| a.id != alias_id);
            }
            Ok(())
        }
    }

    fn make_override(id: i64, host: &str, domain: &str) -> HostOverride {
        HostOverride {
            id,
            host: host.to_string(),
            domain: domain.to_string(),
            aliases: Vec::new(),
        }
    }

    fn make_alias(id: i64, parent_id: i64, host: &str, domain: &str) -> HostAlias {
        HostAlias {
            id,
            parent_id,
            host: host.to_string(),
            domain: domain.to_string(),
            descr: String::new(),
        }
    }

    fn fqdn(s: &str) -> Fqdn {
        Fqdn::parse(s).unwrap()
    }

    fn labels(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_add_alias_creates_under_resolved_parent() {
        let reconciler = Reconciler::new(FakeStore::new(vec![make_override(
            1,
            "app",
            "lab.internal",
        )]));

        let outcome = reconciler
            .add_alias(&fqdn("app.lab.internal"), &fqdn("web.lab.internal"), "web ui")
            .await;

        assert!(matches!(outcome, ReconcileOutcome::Applied));
        assert_eq!(
            reconciler.store.mutating_calls(),
            vec![StoreCall::Create {
                parent_id: 1,
                host: "web".to_string(),
                domain: "lab.internal".to_string(),
                descr: "web ui".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_add_alias_is_idempotent_on_replay() {
        let reconciler = Reconciler::new(FakeStore::new(vec![make_override(
            1,
            "app",
            "lab.internal",
        )]));

        let first = reconciler
            .add_alias(&fqdn("app.lab.internal"), &fqdn("web.lab.internal"), "")
            .await;
        assert!(matches!(first, ReconcileOutcome::Applied));

        let second = reconciler
            .add_alias(&fqdn("app.lab.internal"), &fqdn("web.lab.internal"), "")
            .await;
        match second {
            ReconcileOutcome::Skipped(SkipReason::AliasTaken { owner }) => {
                assert_eq!(owner, "app.lab.internal");
            }
            other => panic!("expected AliasTaken, got {:?}", other),
        }

        // One create, no duplicate record.
        assert_eq!(reconciler.store.mutating_calls().len(), 1);
        assert_eq!(reconciler.store.alias_count(), 1);
    }

    #[tokio::test]
    async fn test_add_refuses_alias_owned_by_different_override() {
        let mut db = make_override(2, "db", "lab.internal");
        db.aliases.push(make_alias(7, 2, "web", "lab.internal"));
        let reconciler = Reconciler::new(FakeStore::new(vec![
            make_override(1, "app", "lab.internal"),
            db,
        ]));

        let outcome = reconciler
            .add_alias(&fqdn("app.lab.internal"), &fqdn("web.lab.internal"), "")
            .await;

        match outcome {
            ReconcileOutcome::Skipped(SkipReason::AliasTaken { owner }) => {
                assert_eq!(owner, "db.lab.internal");
            }
            other => panic!("expected AliasTaken, got {:?}", other),
        }
        assert!(reconciler.store.mutating_calls().is_empty());
        // Exactly the read-resolution lookup, nothing else.
        assert_eq!(reconciler.store.calls(), vec![StoreCall::List]);
    }

    #[tokio::test]
    async fn test_add_refuses_alias_naming_an_override() {
        let reconciler = Reconciler::new(FakeStore::new(vec![
            make_override(1, "app", "lab.internal"),
            make_override(2, "db", "lab.internal"),
        ]));

        let outcome = reconciler
            .add_alias(&fqdn("app.lab.internal"), &fqdn("db.lab.internal"), "")
            .await;

        assert!(matches!(
            outcome,
            ReconcileOutcome::Skipped(SkipReason::AliasTaken { .. })
        ));
        assert!(reconciler.store.mutating_calls().is_empty());
    }

    #[tokio::test]
    async fn test_add_refuses_when_override_missing() {
        let reconciler = Reconciler::new(FakeStore::new(Vec::new()));

        let outcome = reconciler
            .add_alias(&fqdn("app.lab.internal"), &fqdn("web.lab.internal"), "")
            .await;

        assert!(matches!(
            outcome,
            ReconcileOutcome::Skipped(SkipReason::OverrideNotFound)
        ));
        assert!(reconciler.store.mutating_calls().is_empty());
    }

    #[tokio::test]
    async fn test_add_refuses_when_override_fqdn_is_an_alias() {
        let mut db = make_override(2, "db", "lab.internal");
        db.aliases.push(make_alias(7, 2, "cname", "lab.internal"));
        let reconciler = Reconciler::new(FakeStore::new(vec![db]));

        let outcome = reconciler
            .add_alias(&fqdn("cname.lab.internal"), &fqdn("web.lab.internal"), "")
            .await;

        assert!(matches!(
            outcome,
            ReconcileOutcome::Skipped(SkipReason::OverrideNotFound)
        ));
        assert!(reconciler.store.mutating_calls().is_empty());
    }

    #[tokio::test]
    async fn test_add_treats_list_failure_as_empty_store() {
        let reconciler = Reconciler::new(FakeStore::failing_list());

        let outcome = reconciler
            .add_alias(&fqdn("app.lab.internal"), &fqdn("web.lab.internal"), "")
            .await;

        assert!(matches!(
            outcome,
            ReconcileOutcome::Skipped(SkipReason::OverrideNotFound)
        ));
        assert!(reconciler.store.mutating_calls().is_empty());
    }

    #[tokio::test]
    async fn test_remove_alias_deletes_by_identifier() {
        let mut app = make_override(1, "app", "lab.internal");
        app.aliases.push(make_alias(9, 1, "web", "lab.internal"));
        let reconciler = Reconciler::new(FakeStore::new(vec![app]));

        let outcome = reconciler
            .remove_alias(&fqdn("app.lab.internal"), &fqdn("web.lab.internal"))
            .await;

        assert!(matches!(outcome, ReconcileOutcome::Applied));
        assert_eq!(
            reconciler.store.mutating_calls(),
            vec![StoreCall::Delete {
                parent_id: 1,
                alias_id: 9,
            }]
        );
        assert_eq!(reconciler.store.alias_count(), 0);
    }

    #[tokio::test]
    async fn test_remove_is_noop_when_alias_absent() {
        let reconciler = Reconciler::new(FakeStore::new(vec![make_override(
            1,
            "app",
            "lab.internal",
        )]));

        let outcome = reconciler
            .remove_alias(&fqdn("app.lab.internal"), &fqdn("web.lab.internal"))
            .await;

        assert!(matches!(
            outcome,
            ReconcileOutcome::Skipped(SkipReason::AliasNotFound)
        ));
        assert!(reconciler.store.mutating_calls().is_empty());
    }

    #[tokio::test]
    async fn test_remove_refuses_when_override_missing() {
        let reconciler = Reconciler::new(FakeStore::new(Vec::new()));

        let outcome = reconciler
            .remove_alias(&fqdn("app.lab.internal"), &fqdn("web.lab.internal"))
            .await;

        assert!(matches!(
            outcome,
            ReconcileOutcome::Skipped(SkipReason::OverrideNotFound)
        ));
        assert!(reconciler.store.mutating_calls().is_empty());
    }

    #[tokio::test]
    async fn test_remove_ignores_same_name_under_other_override() {
        // The alias exists, but under a different parent: remove must not
        // touch it.
        let mut db = make_override(2, "db", "lab.internal");
        db.aliases.push(make_alias(7, 2, "web", "lab.internal"));
        let reconciler = Reconciler::new(FakeStore::new(vec![
            make_override(1, "app", "lab.internal"),
            db,
        ]));

        let outcome = reconciler
            .remove_alias(&fqdn("app.lab.internal"), &fqdn("web.lab.internal"))
            .await;

        assert!(matches!(
            outcome,
            ReconcileOutcome::Skipped(SkipReason::AliasNotFound)
        ));
        assert_eq!(reconciler.store.alias_count(), 1);
    }

    #[tokio::test]
    async fn test_event_without_alias_label_is_silent_noop() {
        let reconciler = Reconciler::new(FakeStore::new(vec![make_override(
            1,
            "app",
            "lab.internal",
        )]));

        let outcome = reconciler
            .handle_event(
                ContainerAction::Start,
                &labels(&[(LABEL_OVERRIDE, "app.lab.internal")]),
                "web-1",
            )
            .await;

        assert!(outcome.is_none());
        assert!(reconciler.store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_stop_without_remove_flag_is_noop() {
        let mut app = make_override(1, "app", "lab.internal");
        app.aliases.push(make_alias(9, 1, "web", "lab.internal"));
        let reconciler = Reconciler::new(FakeStore::new(vec![app]));

        let outcome = reconciler
            .handle_event(
                ContainerAction::Stop,
                &labels(&[
                    (LABEL_OVERRIDE, "app.lab.internal"),
                    (LABEL_ALIAS, "web.lab.internal"),
                ]),
                "web-1",
            )
            .await;

        assert!(outcome.is_none());
        assert!(reconciler.store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_stop_with_remove_flag_deletes_exactly_once() {
        let mut app = make_override(1, "app", "lab.internal");
        app.aliases.push(make_alias(9, 1, "web", "lab.internal"));
        let reconciler = Reconciler::new(FakeStore::new(vec![app]));

        let outcome = reconciler
            .handle_event(
                ContainerAction::Stop,
                &labels(&[
                    (LABEL_OVERRIDE, "app.lab.internal"),
                    (LABEL_ALIAS, "web.lab.internal"),
                    (LABEL_REMOVE_ON_STOP, "true"),
                ]),
                "web-1",
            )
            .await;

        assert!(matches!(outcome, Some(ReconcileOutcome::Applied)));
        assert_eq!(
            reconciler.store.mutating_calls(),
            vec![StoreCall::Delete {
                parent_id: 1,
                alias_id: 9,
            }]
        );
    }

    #[tokio::test]
    async fn test_start_event_end_to_end() {
        let reconciler = Reconciler::new(FakeStore::new(vec![make_override(
            1,
            "app",
            "lab.internal",
        )]));

        let outcome = reconciler
            .handle_event(
                ContainerAction::Start,
                &labels(&[
                    (LABEL_OVERRIDE, "app.lab.internal"),
                    (LABEL_ALIAS, "web.lab.internal"),
                    (LABEL_DESCRIPTION, "web ui"),
                ]),
                "web-1",
            )
            .await;

        assert!(matches!(outcome, Some(ReconcileOutcome::Applied)));
        assert_eq!(
            reconciler.store.mutating_calls(),
            vec![StoreCall::Create {
                parent_id: 1,
                host: "web".to_string(),
                domain: "lab.internal".to_string(),
                descr: "web ui".to_string(),
            }]
        );
    }

    #[test]
    fn test_labels_require_both_fqdns() {
        assert!(ContainerDnsLabels::from_labels(&labels(&[])).is_none());
        assert!(
            ContainerDnsLabels::from_labels(&labels(&[(LABEL_OVERRIDE, "app.lab.internal")]))
                .is_none()
        );
        assert!(
            ContainerDnsLabels::from_labels(&labels(&[(LABEL_ALIAS, "web.lab.internal")]))
                .is_none()
        );
    }

    #[test]
    fn test_labels_reject_invalid_fqdn() {
        assert!(ContainerDnsLabels::from_labels(&labels(&[
            (LABEL_OVERRIDE, "nodot"),
            (LABEL_ALIAS, "web.lab.internal"),
        ]))
        .is_none());
    }

    #[test]
    fn test_remove_on_stop_requires_exact_true() {
        for value in ["True", "1", "yes", ""] {
            let parsed = ContainerDnsLabels::from_labels(&labels(&[
                (LABEL_OVERRIDE, "app.lab.internal"),
                (LABEL_ALIAS, "web.lab.internal"),
                (LABEL_REMOVE_ON_STOP, value),
            ]))
            .unwrap();
            assert!(!parsed.remove_on_stop, "{value:?} should not enable removal");
        }

        let parsed = ContainerDnsLabels::from_labels(&labels(&[
            (LABEL_OVERRIDE, "app.lab.internal"),
            (LABEL_ALIAS, "web.lab.internal"),
            (LABEL_REMOVE_ON_STOP, "true"),
        ]))
        .unwrap();
        assert!(parsed.remove_on_stop);
    }

    #[test]
    fn test_description_defaults_to_empty() {
        let parsed = ContainerDnsLabels::from_labels(&labels(&[
            (LABEL_OVERRIDE, "app.lab.internal"),
            (LABEL_ALIAS, "web.lab.internal"),
        ]))
        .unwrap();
        assert_eq!(parsed.description, "");
    }
}
