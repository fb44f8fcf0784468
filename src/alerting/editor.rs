use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, error, info};

use super::normalizer::{migrate_rule, normalize};
use super::preview::{grade_targets, TargetStatus};
use super::session_store::SessionStore;
use super::submission::expand;
use super::targets::{resolve_targets, toggle_selection, SelectionMode, TargetCandidate};
use super::thresholds::validate_spec;
use super::CheckType;
use crate::config::EditorConfig;
use crate::error::ValidationError;
use crate::models::alert_models::{
    Draft, DraftPatch, ExistingRule, MonitoringRule, SessionConfig,
};
use crate::models::telemetry_models::TelemetrySnapshot;
use crate::persistence::{RuleSink, SinkError};

/// State of one open rule editor.
///
/// Created when the editor opens and consumed by [`RuleEditor::submit`] or
/// [`RuleEditor::cancel`]; nothing outlives the session.
#[derive(Debug)]
pub struct RuleEditor {
    store: SessionStore,
    active: CheckType,
    original: Option<ExistingRule>,
    enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleDispatch {
    pub rule: MonitoringRule,
    /// The persisted rule id on success.
    #[serde(serialize_with = "serialize_result")]
    pub result: Result<String, SinkError>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Nothing was modified; handled the same as closing the editor.
    Cancelled,
    Submitted(Vec<RuleDispatch>),
}

impl SubmitOutcome {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SubmitOutcome::Cancelled)
    }

    pub fn dispatches(&self) -> &[RuleDispatch] {
        match self {
            SubmitOutcome::Cancelled => &[],
            SubmitOutcome::Submitted(dispatches) => dispatches,
        }
    }

    pub fn failures(&self) -> impl Iterator<Item = &RuleDispatch> {
        self.dispatches().iter().filter(|d| d.result.is_err())
    }
}

impl RuleEditor {
    pub fn open(existing: Option<ExistingRule>, config: &EditorConfig) -> Self {
        let draft = normalize(existing.as_ref(), config);
        let mut store = SessionStore::new(config);
        let original = existing.map(migrate_rule);

        match &original {
            Some(rule) => {
                info!(rule_id = ?rule.id, check_type = %draft.check_type, target = %draft.target, "Editing existing rule.");
                store.insert_existing(draft.check_type, SessionConfig::from(&draft));
            }
            None => {
                info!("Opening editor for a new rule.");
                store.seed(draft.check_type);
            }
        }

        Self {
            store,
            active: draft.check_type,
            original,
            enabled: draft.enabled,
        }
    }

    pub fn active_type(&self) -> CheckType {
        self.active
    }

    pub fn active_draft(&self) -> Draft {
        let config = self.store.get(self.active);
        let id = self
            .original
            .as_ref()
            .filter(|o| o.check_type == self.active)
            .and_then(|o| o.id.clone());
        Draft {
            id,
            check_type: self.active,
            target: config.target,
            targets: config.targets,
            thresholds: config.thresholds,
            notification_frequency: config.notification_frequency,
            notify: config.notify,
            enabled: self.enabled,
        }
    }

    /// Shows `check_type`, restoring any edits made to it earlier in the session.
    pub fn select_type(&mut self, check_type: CheckType) -> Draft {
        self.store.seed(check_type);
        if self.active != check_type {
            debug!(from = %self.active, to = %check_type, "Switching check type.");
            self.active = check_type;
        }
        self.active_draft()
    }

    /// Applies `patch` to the displayed draft and records it in the session.
    pub fn edit_field(&mut self, patch: DraftPatch) -> Draft {
        if patch.is_empty() {
            return self.active_draft();
        }
        debug!(check_type = %self.active, patch = ?patch, "Editing draft.");
        self.store.update(self.active, &patch);
        self.active_draft()
    }

    /// Toggles `target` in the displayed draft's selection.
    pub fn toggle_target(&mut self, target: &str) -> Draft {
        if SelectionMode::for_check(self.active) == SelectionMode::SystemWide {
            debug!(check_type = %self.active, "Target is fixed for this check type.");
            return self.active_draft();
        }
        let current = self.store.get(self.active).targets;
        let next = toggle_selection(self.active, &current, target);
        self.edit_field(DraftPatch::targets(next))
    }

    pub fn target_candidates(&self, snapshot: Option<&TelemetrySnapshot>) -> Vec<TargetCandidate> {
        let selected = self.store.get(self.active).targets;
        resolve_targets(self.active, snapshot, &selected)
    }

    /// Grades the displayed draft's targets against the latest telemetry.
    pub fn status_preview(&self, snapshot: &TelemetrySnapshot) -> Vec<TargetStatus> {
        let config = self.store.get(self.active);
        let targets = if config.targets.is_empty() {
            vec![config.target]
        } else {
            config.targets
        };
        grade_targets(self.active, &config.thresholds, &targets, snapshot)
    }

    pub fn modified_types(&self) -> Vec<CheckType> {
        self.store.modified().iter().collect()
    }

    pub fn is_dirty(&self) -> bool {
        !self.store.modified().is_empty()
    }

    pub fn original(&self) -> Option<&ExistingRule> {
        self.original.as_ref()
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Checks the thresholds of every modified check type.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for check_type in self.store.modified().iter() {
            validate_spec(check_type, &self.store.get(check_type).thresholds)?;
        }
        Ok(())
    }

    pub fn expand(&self) -> Vec<MonitoringRule> {
        expand(&self.store, self.store.modified(), self.original.as_ref())
    }

    /// Expands the session and hands every rule to `sink`. Rules are written
    /// independently; the outcome reports each one.
    pub async fn submit(self, sink: &dyn RuleSink) -> SubmitOutcome {
        let rules = self.expand();
        if rules.is_empty() {
            info!("No modified rules to save; closing editor.");
            return SubmitOutcome::Cancelled;
        }

        info!(count = rules.len(), "Submitting alert rules.");
        let dispatches = join_all(rules.into_iter().map(|rule| async move {
            let result = match rule.id.as_deref() {
                Some(id) => sink.update(id, &rule).await.map(|()| id.to_string()),
                None => sink.create(&rule).await,
            };
            if let Err(e) = &result {
                error!(check_type = %rule.check_type, target = %rule.target, error = %e, "Failed to persist alert rule.");
            }
            RuleDispatch { rule, result }
        }))
        .await;

        SubmitOutcome::Submitted(dispatches)
    }

    pub fn cancel(self) {
        info!(
            modified = self.store.modified().len(),
            "Editor cancelled; discarding session."
        );
    }
}

fn serialize_result<S>(result: &Result<String, SinkError>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeMap;

    let mut map = serializer.serialize_map(Some(1))?;
    match result {
        Ok(id) => map.serialize_entry("ok", id)?,
        Err(e) => map.serialize_entry("error", &e.to_string())?,
    }
    map.end()
}
