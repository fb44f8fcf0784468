use serde::Serialize;

use super::CheckType;
use crate::error::ValidationError;
use crate::models::alert_models::ThresholdSpec;

pub const CONTAINER_HEALTHY: &[&str] = &["running", "healthy"];
pub const CONTAINER_DEGRADED: &[&str] = &["restarting", "paused", "created"];
pub const SIP_HEALTHY: &[&str] = &["Registered"];
pub const SIP_DEGRADED: &[&str] = &["Auth Required", "Retrying"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Ok,
    Warning,
    Critical,
}

/// How a rule's thresholds are interpreted, depending on its check type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThresholdRule {
    Numeric {
        warning: f64,
        critical: f64,
        consecutive_failures: u32,
        range: (f64, f64),
    },
    BinaryStatus {
        healthy: &'static [&'static str],
        degraded: &'static [&'static str],
        consecutive_failures: u32,
        range: (f64, f64),
    },
}

impl ThresholdRule {
    pub fn for_check(check_type: CheckType, spec: &ThresholdSpec) -> Self {
        let consecutive_failures = spec.consecutive_failures.unwrap_or(1).max(1);
        let range = check_type.value_range();
        match check_type {
            CheckType::ContainerStatus => ThresholdRule::BinaryStatus {
                healthy: CONTAINER_HEALTHY,
                degraded: CONTAINER_DEGRADED,
                consecutive_failures,
                range,
            },
            CheckType::SipRegistration => ThresholdRule::BinaryStatus {
                healthy: SIP_HEALTHY,
                degraded: SIP_DEGRADED,
                consecutive_failures,
                range,
            },
            _ => ThresholdRule::Numeric {
                warning: spec.warning,
                critical: spec.critical,
                consecutive_failures,
                range,
            },
        }
    }

    /// Grades a sampled value. Status rules have no numeric reading and report `Ok`.
    pub fn evaluate_value(&self, value: f64) -> Severity {
        match self {
            ThresholdRule::Numeric {
                warning, critical, ..
            } => {
                if value >= *critical {
                    Severity::Critical
                } else if value >= *warning {
                    Severity::Warning
                } else {
                    Severity::Ok
                }
            }
            ThresholdRule::BinaryStatus { .. } => Severity::Ok,
        }
    }

    /// Grades a reported status string. Numeric rules have no status semantics and report `Ok`.
    pub fn evaluate_status(&self, status: &str) -> Severity {
        match self {
            ThresholdRule::BinaryStatus {
                healthy, degraded, ..
            } => {
                let status = status.trim();
                if healthy.iter().any(|s| s.eq_ignore_ascii_case(status)) {
                    Severity::Ok
                } else if degraded.iter().any(|s| s.eq_ignore_ascii_case(status)) {
                    Severity::Warning
                } else {
                    Severity::Critical
                }
            }
            ThresholdRule::Numeric { .. } => Severity::Ok,
        }
    }

    /// Inclusive range the stored `warning`/`critical` numbers may take.
    pub fn range(&self) -> (f64, f64) {
        match self {
            ThresholdRule::Numeric { range, .. } | ThresholdRule::BinaryStatus { range, .. } => {
                *range
            }
        }
    }
}

/// Pulls `value` into the legal range for `check_type`. NaN collapses to the lower bound.
pub fn clamp_value(check_type: CheckType, value: f64) -> f64 {
    let (min, max) = check_type.value_range();
    if value.is_nan() {
        return min;
    }
    value.clamp(min, max)
}

pub fn clamp_spec(check_type: CheckType, spec: ThresholdSpec) -> ThresholdSpec {
    let (min, max) = ThresholdRule::for_check(check_type, &spec).range();
    let clamp = |value: f64| if value.is_nan() { min } else { value.clamp(min, max) };
    ThresholdSpec {
        warning: clamp(spec.warning),
        critical: clamp(spec.critical),
        consecutive_failures: spec.consecutive_failures.map(|n| n.max(1)),
    }
}

pub fn validate_spec(check_type: CheckType, spec: &ThresholdSpec) -> Result<(), ValidationError> {
    let rule = ThresholdRule::for_check(check_type, spec);
    let (min, max) = rule.range();
    for (field, value) in [("warning", spec.warning), ("critical", spec.critical)] {
        if value.is_nan() || value < min || value > max {
            return Err(ValidationError::OutOfRange {
                check_type,
                field,
                value,
                min,
                max,
            });
        }
    }
    if let ThresholdRule::Numeric {
        warning, critical, ..
    } = rule
    {
        if warning > critical {
            return Err(ValidationError::InvertedThresholds {
                check_type,
                warning,
                critical,
            });
        }
    }
    if spec.consecutive_failures == Some(0) {
        return Err(ValidationError::ZeroConsecutiveFailures(check_type));
    }
    Ok(())
}
