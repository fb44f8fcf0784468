use indexmap::IndexSet;
use serde::Serialize;

use super::defaults::SYSTEM_WIDE;
use super::CheckType;
use crate::models::telemetry_models::TelemetrySnapshot;

pub const DISK_PATHS: [&str; 3] = ["/", "/var", "/boot"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetCandidate {
    pub id: String,
    pub selected: bool,
}

/// How the operator picks targets for a check type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Fixed to the whole system; not editable.
    SystemWide,
    /// Multi-select where "System-wide" excludes every named target.
    ExclusiveSystemWide,
    /// Plain multi-select.
    Toggle,
}

impl SelectionMode {
    pub fn for_check(check_type: CheckType) -> Self {
        match check_type {
            CheckType::Cpu | CheckType::Memory => SelectionMode::SystemWide,
            CheckType::SipRtt | CheckType::SipRegistration => SelectionMode::ExclusiveSystemWide,
            CheckType::Disk
            | CheckType::Bandwidth
            | CheckType::Utilization
            | CheckType::ContainerStatus => SelectionMode::Toggle,
        }
    }
}

/// Lists the targets the operator can pick for `check_type`, marking those in `selected`.
pub fn resolve_targets(
    check_type: CheckType,
    snapshot: Option<&TelemetrySnapshot>,
    selected: &[String],
) -> Vec<TargetCandidate> {
    let ids: IndexSet<String> = match check_type {
        CheckType::Cpu | CheckType::Memory => IndexSet::new(),
        CheckType::SipRtt | CheckType::SipRegistration => {
            let mut ids = IndexSet::new();
            ids.insert(SYSTEM_WIDE.to_string());
            if let Some(snapshot) = snapshot {
                ids.extend(snapshot.registrations().iter().map(|r| r.name.clone()));
                ids.extend(snapshot.contacts().iter().map(|c| c.aor.clone()));
            }
            ids
        }
        CheckType::Bandwidth | CheckType::Utilization => snapshot
            .map(|s| s.interfaces().iter().map(|i| i.name.clone()).collect())
            .unwrap_or_default(),
        CheckType::ContainerStatus => snapshot
            .map(|s| s.containers().iter().map(|c| c.name.clone()).collect())
            .unwrap_or_default(),
        CheckType::Disk => DISK_PATHS.iter().map(|p| p.to_string()).collect(),
    };

    ids.into_iter()
        .filter(|id| !id.is_empty())
        .map(|id| TargetCandidate {
            selected: selected.contains(&id),
            id,
        })
        .collect()
}

/// Returns the selection after the operator clicks `id`.
pub fn toggle_selection(check_type: CheckType, current: &[String], id: &str) -> Vec<String> {
    match SelectionMode::for_check(check_type) {
        SelectionMode::SystemWide => vec![SYSTEM_WIDE.to_string()],
        SelectionMode::Toggle => toggle(current, id),
        SelectionMode::ExclusiveSystemWide => {
            if id == SYSTEM_WIDE {
                if current.iter().any(|t| t == SYSTEM_WIDE) {
                    Vec::new()
                } else {
                    vec![SYSTEM_WIDE.to_string()]
                }
            } else {
                let named: Vec<String> = current
                    .iter()
                    .filter(|t| t.as_str() != SYSTEM_WIDE)
                    .cloned()
                    .collect();
                toggle(&named, id)
            }
        }
    }
}

fn toggle(current: &[String], id: &str) -> Vec<String> {
    if current.iter().any(|t| t == id) {
        current.iter().filter(|t| t.as_str() != id).cloned().collect()
    } else {
        let mut next = current.to_vec();
        next.push(id.to_string());
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot() -> TelemetrySnapshot {
        serde_json::from_value(json!({
            "extra": {
                "registrations": [{ "name": "trunk-a" }, { "name": "trunk-b" }],
                "contacts": [{ "aor": "sip:100@pbx" }, { "aor": "trunk-a" }],
                "interfaces": [{ "name": "eth0" }, { "name": "wg0" }],
                "docker": { "containers": [{ "name": "db" }, { "name": "proxy" }] }
            }
        }))
        .unwrap()
    }

    fn ids(candidates: &[TargetCandidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.id.as_str()).collect()
    }

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_sip_candidates_are_deduplicated() {
        let candidates = resolve_targets(CheckType::SipRtt, Some(&snapshot()), &owned(&["trunk-b"]));
        assert_eq!(
            ids(&candidates),
            vec!["System-wide", "trunk-a", "trunk-b", "sip:100@pbx"]
        );
        assert!(candidates[2].selected);
        assert!(!candidates[0].selected);
    }

    #[test]
    fn test_sip_without_telemetry_offers_system_wide() {
        let candidates = resolve_targets(CheckType::SipRegistration, None, &[]);
        assert_eq!(ids(&candidates), vec!["System-wide"]);
    }

    #[test]
    fn test_interface_container_and_disk_candidates() {
        let snapshot = snapshot();
        assert_eq!(
            ids(&resolve_targets(CheckType::Utilization, Some(&snapshot), &[])),
            vec!["eth0", "wg0"]
        );
        assert_eq!(
            ids(&resolve_targets(CheckType::ContainerStatus, Some(&snapshot), &[])),
            vec!["db", "proxy"]
        );
        assert_eq!(
            ids(&resolve_targets(CheckType::Disk, None, &[])),
            vec!["/", "/var", "/boot"]
        );
        assert!(resolve_targets(CheckType::Bandwidth, None, &[]).is_empty());
        assert!(resolve_targets(CheckType::Cpu, Some(&snapshot), &[]).is_empty());
    }

    #[test]
    fn test_toggle_adds_and_removes() {
        let selection = toggle_selection(CheckType::Bandwidth, &[], "eth0");
        let selection = toggle_selection(CheckType::Bandwidth, &selection, "eth1");
        assert_eq!(selection, owned(&["eth0", "eth1"]));
        let selection = toggle_selection(CheckType::Bandwidth, &selection, "eth0");
        assert_eq!(selection, owned(&["eth1"]));
    }

    #[test]
    fn test_system_wide_is_exclusive_for_sip() {
        let selection = owned(&["System-wide"]);
        let selection = toggle_selection(CheckType::SipRtt, &selection, "trunk-a");
        assert_eq!(selection, owned(&["trunk-a"]));

        let selection = toggle_selection(CheckType::SipRtt, &selection, "trunk-b");
        assert_eq!(selection, owned(&["trunk-a", "trunk-b"]));

        let selection = toggle_selection(CheckType::SipRtt, &selection, "System-wide");
        assert_eq!(selection, owned(&["System-wide"]));

        let selection = toggle_selection(CheckType::SipRtt, &selection, "System-wide");
        assert!(selection.is_empty());
    }

    #[test]
    fn test_cpu_selection_is_fixed() {
        let selection = toggle_selection(CheckType::Cpu, &owned(&["db-host"]), "web");
        assert_eq!(selection, owned(&["System-wide"]));
    }
}
