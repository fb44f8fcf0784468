use indexmap::IndexSet;
use std::collections::HashMap;
use tracing::{debug, warn};

use super::defaults::{defaults_for, SYSTEM_WIDE};
use super::targets::SelectionMode;
use super::thresholds::clamp_value;
use super::CheckType;
use crate::config::EditorConfig;
use crate::models::alert_models::{DraftPatch, NotifyConfig, SessionConfig};

/// Check types eligible to produce rules on submit, in the order they were first modified.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModifiedSet(IndexSet<CheckType>);

impl ModifiedSet {
    pub fn insert(&mut self, check_type: CheckType) -> bool {
        self.0.insert(check_type)
    }

    pub fn contains(&self, check_type: CheckType) -> bool {
        self.0.contains(&check_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = CheckType> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<CheckType> for ModifiedSet {
    fn from_iter<I: IntoIterator<Item = CheckType>>(iter: I) -> Self {
        ModifiedSet(iter.into_iter().collect())
    }
}

/// In-progress edits for one editor session, keyed by check type.
///
/// Each check type owns at most one [`SessionConfig`]; switching the displayed
/// type never copies or drops another type's entry.
#[derive(Debug, Clone)]
pub struct SessionStore {
    configs: HashMap<CheckType, SessionConfig>,
    modified: ModifiedSet,
    notification_frequency: u32,
    notify: NotifyConfig,
}

impl SessionStore {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            configs: HashMap::new(),
            modified: ModifiedSet::default(),
            notification_frequency: config.default_notification_frequency.max(1),
            notify: NotifyConfig::with_channels(config.default_channels.iter().copied()),
        }
    }

    /// The config a never-touched check type starts from.
    pub fn defaults_for(&self, check_type: CheckType) -> SessionConfig {
        let defaults = defaults_for(check_type);
        // A toggle-mode default target starts out selected.
        let targets = match SelectionMode::for_check(check_type) {
            SelectionMode::Toggle if defaults.target != SYSTEM_WIDE => {
                vec![defaults.target.to_string()]
            }
            _ => Vec::new(),
        };
        SessionConfig {
            thresholds: defaults.thresholds,
            target: defaults.target.to_string(),
            targets,
            notification_frequency: self.notification_frequency,
            notify: self.notify.clone(),
        }
    }

    pub fn get(&self, check_type: CheckType) -> SessionConfig {
        self.configs
            .get(&check_type)
            .cloned()
            .unwrap_or_else(|| self.defaults_for(check_type))
    }

    pub fn entry(&self, check_type: CheckType) -> Option<&SessionConfig> {
        self.configs.get(&check_type)
    }

    /// Creates the default entry for `check_type` if none exists. Does not mark it modified.
    pub fn seed(&mut self, check_type: CheckType) -> &SessionConfig {
        if !self.configs.contains_key(&check_type) {
            debug!(check_type = %check_type, "Seeding session config from defaults.");
            let config = self.defaults_for(check_type);
            self.configs.insert(check_type, config);
        }
        &self.configs[&check_type]
    }

    /// Stores the config of the rule the session was opened with and marks its type modified.
    pub fn insert_existing(&mut self, check_type: CheckType, config: SessionConfig) {
        self.configs.insert(check_type, config);
        self.modified.insert(check_type);
    }

    pub fn update(&mut self, check_type: CheckType, patch: &DraftPatch) -> &SessionConfig {
        if !self.configs.contains_key(&check_type) {
            let config = self.defaults_for(check_type);
            self.configs.insert(check_type, config);
        }
        if let Some(config) = self.configs.get_mut(&check_type) {
            apply_patch(check_type, config, patch);
        }
        if self.modified.insert(check_type) {
            debug!(check_type = %check_type, "Check type marked modified.");
        }
        &self.configs[&check_type]
    }

    pub fn modified(&self) -> &ModifiedSet {
        &self.modified
    }

    pub fn is_modified(&self, check_type: CheckType) -> bool {
        self.modified.contains(check_type)
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

fn apply_patch(check_type: CheckType, config: &mut SessionConfig, patch: &DraftPatch) {
    if let Some(thresholds) = patch.thresholds {
        if let Some(warning) = thresholds.warning {
            config.thresholds.warning = clamped(check_type, "warning", warning);
        }
        if let Some(critical) = thresholds.critical {
            config.thresholds.critical = clamped(check_type, "critical", critical);
        }
        if let Some(failures) = thresholds.consecutive_failures {
            if failures == 0 {
                warn!(check_type = %check_type, "consecutive_failures of 0 raised to 1.");
            }
            config.thresholds.consecutive_failures = Some(failures.max(1));
        }
    }

    // `targets` wins over `target` when both are present; `target` always mirrors `targets[0]`.
    if let Some(targets) = &patch.targets {
        config.targets = dedup_targets(targets);
        config.target = config.targets.first().cloned().unwrap_or_default();
    } else if let Some(target) = &patch.target {
        let target = target.trim();
        config.target = target.to_string();
        config.targets = if target.is_empty() {
            Vec::new()
        } else {
            vec![target.to_string()]
        };
    }

    if let Some(minutes) = patch.notification_frequency {
        if minutes == 0 {
            warn!(check_type = %check_type, "notification_frequency of 0 raised to 1.");
        }
        config.notification_frequency = minutes.max(1);
    }

    if let Some(notify) = &patch.notify {
        config.notify = notify.clone();
    }
}

fn clamped(check_type: CheckType, field: &'static str, value: f64) -> f64 {
    let stored = clamp_value(check_type, value);
    if stored != value {
        warn!(check_type = %check_type, field, value, stored, "Threshold clamped into range.");
    }
    stored
}

fn dedup_targets(targets: &[String]) -> Vec<String> {
    let unique: IndexSet<&str> = targets
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect();
    unique.into_iter().map(str::to_string).collect()
}
