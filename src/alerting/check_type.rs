use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EditorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckType {
    Cpu,
    Memory,
    Disk,
    Bandwidth,
    Utilization,
    SipRtt,
    SipRegistration,
    ContainerStatus,
}

impl CheckType {
    pub const ALL: [CheckType; 8] = [
        CheckType::Cpu,
        CheckType::Memory,
        CheckType::Disk,
        CheckType::Bandwidth,
        CheckType::Utilization,
        CheckType::SipRtt,
        CheckType::SipRegistration,
        CheckType::ContainerStatus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckType::Cpu => "cpu",
            CheckType::Memory => "memory",
            CheckType::Disk => "disk",
            CheckType::Bandwidth => "bandwidth",
            CheckType::Utilization => "utilization",
            CheckType::SipRtt => "sip_rtt",
            CheckType::SipRegistration => "sip_registration",
            CheckType::ContainerStatus => "container_status",
        }
    }

    /// Inclusive range a stored `warning`/`critical` value may take.
    pub fn value_range(&self) -> (f64, f64) {
        match self {
            CheckType::Cpu
            | CheckType::Memory
            | CheckType::Disk
            | CheckType::Bandwidth
            | CheckType::Utilization => (0.0, 100.0),
            CheckType::SipRtt => (0.0, 2000.0),
            CheckType::SipRegistration | CheckType::ContainerStatus => (0.0, 1.0),
        }
    }
}

impl fmt::Display for CheckType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckType {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CheckType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| EditorError::InvalidInput(format!("unknown check type: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display_agree() {
        for check_type in CheckType::ALL {
            let parsed: CheckType = check_type.to_string().parse().unwrap();
            assert_eq!(parsed, check_type);
        }
        assert!("load_average".parse::<CheckType>().is_err());
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&CheckType::ContainerStatus).unwrap();
        assert_eq!(json, "\"container_status\"");
        let parsed: CheckType = serde_json::from_str("\"sip_rtt\"").unwrap();
        assert_eq!(parsed, CheckType::SipRtt);
    }

    #[test]
    fn test_value_ranges() {
        assert_eq!(CheckType::Disk.value_range(), (0.0, 100.0));
        assert_eq!(CheckType::SipRtt.value_range(), (0.0, 2000.0));
        assert_eq!(CheckType::ContainerStatus.value_range(), (0.0, 1.0));
    }
}
