pub mod alert_models;
pub mod telemetry_models;
