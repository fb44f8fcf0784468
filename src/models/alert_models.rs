use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::alerting::CheckType;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSpec {
    pub warning: f64,
    pub critical: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consecutive_failures: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelName {
    Slack,
    Email,
    Webhook,
}

impl fmt::Display for ChannelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChannelName::Slack => "slack",
            ChannelName::Email => "email",
            ChannelName::Webhook => "webhook",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NotifyConfig {
    #[serde(default)]
    pub channels: BTreeSet<ChannelName>,
}

impl NotifyConfig {
    pub fn with_channels(channels: impl IntoIterator<Item = ChannelName>) -> Self {
        Self {
            channels: channels.into_iter().collect(),
        }
    }
}

/// Thresholds as they arrive from stored rules. Older rules carry `attention`
/// where newer ones carry `warning`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RuleThresholds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attention: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consecutive_failures: Option<u32>,
}

/// A persisted rule handed to the editor when the operator opens it for editing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExistingRule {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub check_type: CheckType,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub thresholds: RuleThresholds,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_frequency: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify: Option<NotifyConfig>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// The rule configuration currently shown in the editor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Draft {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub check_type: CheckType,
    pub target: String,
    pub targets: Vec<String>,
    pub thresholds: ThresholdSpec,
    pub notification_frequency: u32,
    pub notify: NotifyConfig,
    pub enabled: bool,
}

impl From<&Draft> for ExistingRule {
    fn from(draft: &Draft) -> Self {
        ExistingRule {
            id: draft.id.clone(),
            check_type: draft.check_type,
            target: draft.target.clone(),
            thresholds: RuleThresholds {
                warning: Some(draft.thresholds.warning),
                attention: None,
                critical: Some(draft.thresholds.critical),
                consecutive_failures: draft.thresholds.consecutive_failures,
            },
            notification_frequency: Some(draft.notification_frequency),
            notify: Some(draft.notify.clone()),
            enabled: draft.enabled,
        }
    }
}

/// Per-check-type state held for the lifetime of one editor session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionConfig {
    pub thresholds: ThresholdSpec,
    pub target: String,
    pub targets: Vec<String>,
    pub notification_frequency: u32,
    pub notify: NotifyConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct ThresholdPatch {
    pub warning: Option<f64>,
    pub critical: Option<f64>,
    pub consecutive_failures: Option<u32>,
}

/// A partial edit to the active draft. `None` fields are left untouched.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct DraftPatch {
    #[serde(default)]
    pub thresholds: Option<ThresholdPatch>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub targets: Option<Vec<String>>,
    #[serde(default)]
    pub notification_frequency: Option<u32>,
    #[serde(default)]
    pub notify: Option<NotifyConfig>,
}

impl DraftPatch {
    pub fn warning(value: f64) -> Self {
        Self {
            thresholds: Some(ThresholdPatch {
                warning: Some(value),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    pub fn critical(value: f64) -> Self {
        Self {
            thresholds: Some(ThresholdPatch {
                critical: Some(value),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    pub fn target(target: impl Into<String>) -> Self {
        Self {
            target: Some(target.into()),
            ..Default::default()
        }
    }

    pub fn targets<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            targets: Some(targets.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    pub fn notification_frequency(minutes: u32) -> Self {
        Self {
            notification_frequency: Some(minutes),
            ..Default::default()
        }
    }

    pub fn notify(notify: NotifyConfig) -> Self {
        Self {
            notify: Some(notify),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &DraftPatch::default()
    }
}

/// A rule record ready to be persisted. `id` is present only when this record
/// updates the rule the editor was opened with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringRule {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub check_type: CheckType,
    pub target: String,
    pub thresholds: ThresholdSpec,
    pub notification_frequency: u32,
    pub notify: NotifyConfig,
    pub enabled: bool,
}
