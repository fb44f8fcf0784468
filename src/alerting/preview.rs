use serde::Serialize;

use super::defaults::SYSTEM_WIDE;
use super::thresholds::{Severity, ThresholdRule};
use super::CheckType;
use crate::models::alert_models::ThresholdSpec;
use crate::models::telemetry_models::TelemetrySnapshot;

/// How a selected target would grade against the draft thresholds right now.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetStatus {
    pub target: String,
    /// The reading the grade is based on, if telemetry carries one for this target.
    pub observed: Option<String>,
    pub severity: Option<Severity>,
}

pub fn grade_targets(
    check_type: CheckType,
    thresholds: &ThresholdSpec,
    targets: &[String],
    snapshot: &TelemetrySnapshot,
) -> Vec<TargetStatus> {
    let rule = ThresholdRule::for_check(check_type, thresholds);
    targets
        .iter()
        .map(|target| {
            let (observed, severity) = match reading(check_type, target, snapshot) {
                Some(Reading::Status(status)) => {
                    let severity = rule.evaluate_status(&status);
                    (Some(status), Some(severity))
                }
                Some(Reading::Value(value)) => {
                    (Some(value.to_string()), Some(rule.evaluate_value(value)))
                }
                None => (None, None),
            };
            TargetStatus {
                target: target.clone(),
                observed,
                severity,
            }
        })
        .collect()
}

enum Reading {
    Status(String),
    Value(f64),
}

// Only checks whose readings travel in the telemetry `extra` section can be graded.
fn reading(check_type: CheckType, target: &str, snapshot: &TelemetrySnapshot) -> Option<Reading> {
    match check_type {
        CheckType::ContainerStatus => snapshot
            .containers()
            .iter()
            .find(|c| c.name == target)
            .and_then(|c| c.state.clone().or_else(|| c.status.clone()))
            .map(Reading::Status),
        CheckType::SipRegistration => snapshot
            .registrations()
            .iter()
            .find(|r| r.name == target)
            .and_then(|r| r.status.clone())
            .map(Reading::Status),
        CheckType::SipRtt if target == SYSTEM_WIDE => snapshot
            .contacts()
            .iter()
            .filter_map(|c| c.rtt_ms)
            .reduce(f64::max)
            .map(Reading::Value),
        CheckType::SipRtt => snapshot
            .contacts()
            .iter()
            .find(|c| c.aor == target)
            .and_then(|c| c.rtt_ms)
            .map(Reading::Value),
        CheckType::Cpu
        | CheckType::Memory
        | CheckType::Disk
        | CheckType::Bandwidth
        | CheckType::Utilization => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerting::defaults::defaults_for;
    use serde_json::json;

    fn snapshot() -> TelemetrySnapshot {
        serde_json::from_value(json!({
            "extra": {
                "registrations": [
                    { "name": "trunk-a", "status": "Registered" },
                    { "name": "trunk-b", "status": "Auth Required" }
                ],
                "contacts": [
                    { "aor": "sip:100@pbx", "rttMs": 40.0 },
                    { "aor": "sip:200@pbx", "rttMs": 650.0 }
                ],
                "docker": { "containers": [
                    { "name": "db", "state": "running" },
                    { "name": "worker", "state": "exited" }
                ] }
            }
        }))
        .unwrap()
    }

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_container_states_are_graded() {
        let thresholds = defaults_for(CheckType::ContainerStatus).thresholds;
        let statuses = grade_targets(
            CheckType::ContainerStatus,
            &thresholds,
            &owned(&["db", "worker", "cache"]),
            &snapshot(),
        );
        assert_eq!(statuses[0].severity, Some(Severity::Ok));
        assert_eq!(statuses[1].severity, Some(Severity::Critical));
        assert_eq!(statuses[1].observed.as_deref(), Some("exited"));
        assert_eq!(statuses[2].severity, None);
    }

    #[test]
    fn test_sip_registrations_are_graded() {
        let thresholds = defaults_for(CheckType::SipRegistration).thresholds;
        let statuses = grade_targets(
            CheckType::SipRegistration,
            &thresholds,
            &owned(&["trunk-a", "trunk-b"]),
            &snapshot(),
        );
        assert_eq!(statuses[0].severity, Some(Severity::Ok));
        assert_eq!(statuses[1].severity, Some(Severity::Warning));
    }

    #[test]
    fn test_sip_rtt_uses_worst_contact_system_wide() {
        let thresholds = defaults_for(CheckType::SipRtt).thresholds;
        let statuses = grade_targets(
            CheckType::SipRtt,
            &thresholds,
            &owned(&["System-wide", "sip:100@pbx"]),
            &snapshot(),
        );
        assert_eq!(statuses[0].severity, Some(Severity::Critical));
        assert_eq!(statuses[0].observed.as_deref(), Some("650"));
        assert_eq!(statuses[1].severity, Some(Severity::Ok));
    }

    #[test]
    fn test_checks_without_readings_are_ungraded() {
        let thresholds = defaults_for(CheckType::Disk).thresholds;
        let statuses = grade_targets(CheckType::Disk, &thresholds, &owned(&["/"]), &snapshot());
        assert_eq!(statuses[0].severity, None);
        assert_eq!(statuses[0].observed, None);
    }
}
