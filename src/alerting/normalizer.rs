use tracing::debug;

use super::defaults::{defaults_for, SYSTEM_WIDE};
use super::thresholds::clamp_spec;
use super::CheckType;
use crate::config::EditorConfig;
use crate::models::alert_models::{
    Draft, ExistingRule, NotifyConfig, RuleThresholds, SessionConfig, ThresholdSpec,
};

/// Renames the legacy `attention` threshold to `warning`. Applying it twice is a no-op.
pub fn migrate_thresholds(thresholds: RuleThresholds) -> RuleThresholds {
    match (thresholds.warning, thresholds.attention) {
        (None, Some(attention)) => RuleThresholds {
            warning: Some(attention),
            attention: None,
            ..thresholds
        },
        _ => thresholds,
    }
}

pub fn migrate_rule(rule: ExistingRule) -> ExistingRule {
    ExistingRule {
        thresholds: migrate_thresholds(rule.thresholds),
        ..rule
    }
}

/// Builds the draft the editor opens with: defaults for a new rule, or the
/// migrated copy of the rule being edited.
pub fn normalize(existing: Option<&ExistingRule>, config: &EditorConfig) -> Draft {
    let Some(rule) = existing else {
        let defaults = defaults_for(CheckType::Cpu);
        return Draft {
            id: None,
            check_type: CheckType::Cpu,
            thresholds: defaults.thresholds,
            target: SYSTEM_WIDE.to_string(),
            targets: Vec::new(),
            notification_frequency: config.default_notification_frequency.max(1),
            notify: NotifyConfig::with_channels(config.default_channels.iter().copied()),
            enabled: true,
        };
    };

    let rule = migrate_rule(rule.clone());
    let defaults = defaults_for(rule.check_type);
    let thresholds = clamp_spec(
        rule.check_type,
        ThresholdSpec {
            warning: rule.thresholds.warning.unwrap_or(defaults.thresholds.warning),
            critical: rule.thresholds.critical.unwrap_or(defaults.thresholds.critical),
            consecutive_failures: rule.thresholds.consecutive_failures,
        },
    );
    let target = if rule.target.is_empty() {
        defaults.target.to_string()
    } else {
        rule.target.clone()
    };
    debug!(check_type = %rule.check_type, target = %target, "Normalized existing rule.");

    Draft {
        id: rule.id,
        check_type: rule.check_type,
        thresholds,
        targets: vec![target.clone()],
        target,
        notification_frequency: rule
            .notification_frequency
            .unwrap_or(config.default_notification_frequency)
            .max(1),
        notify: rule.notify.unwrap_or_else(|| {
            NotifyConfig::with_channels(config.default_channels.iter().copied())
        }),
        enabled: rule.enabled,
    }
}

impl From<&Draft> for SessionConfig {
    fn from(draft: &Draft) -> Self {
        SessionConfig {
            thresholds: draft.thresholds,
            target: draft.target.clone(),
            targets: draft.targets.clone(),
            notification_frequency: draft.notification_frequency,
            notify: draft.notify.clone(),
        }
    }
}
