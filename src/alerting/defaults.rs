use super::CheckType;
use crate::models::alert_models::ThresholdSpec;

pub const SYSTEM_WIDE: &str = "System-wide";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckDefaults {
    pub thresholds: ThresholdSpec,
    pub target: &'static str,
}

const fn numeric(warning: f64, critical: f64, target: &'static str) -> CheckDefaults {
    CheckDefaults {
        thresholds: ThresholdSpec {
            warning,
            critical,
            consecutive_failures: None,
        },
        target,
    }
}

// Status types alert on any non-healthy status; the numbers only mark the rule as armed.
const BINARY_STATUS: CheckDefaults = numeric(1.0, 1.0, SYSTEM_WIDE);

pub fn defaults_for(check_type: CheckType) -> CheckDefaults {
    match check_type {
        CheckType::Cpu => numeric(70.0, 90.0, SYSTEM_WIDE),
        CheckType::Memory => numeric(80.0, 90.0, SYSTEM_WIDE),
        CheckType::Disk => numeric(80.0, 90.0, "/"),
        CheckType::Bandwidth => numeric(70.0, 90.0, SYSTEM_WIDE),
        CheckType::Utilization => numeric(70.0, 90.0, SYSTEM_WIDE),
        CheckType::SipRtt => numeric(200.0, 500.0, SYSTEM_WIDE),
        CheckType::SipRegistration | CheckType::ContainerStatus => BINARY_STATUS,
    }
}
