use async_trait::async_trait;
use thiserror::Error;

use crate::models::alert_models::MonitoringRule;

pub mod memory;

pub use memory::InMemoryRuleSink;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SinkError {
    #[error("Rule rejected: {0}")]
    Rejected(String),
    #[error("Rule not found: {0}")]
    NotFound(String),
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Stores the rules produced by an editor submit.
///
/// Each rule is written on its own; a failure for one rule does not undo the others.
#[async_trait]
pub trait RuleSink: Send + Sync {
    /// Creates a new rule and returns the id assigned to it.
    async fn create(&self, rule: &MonitoringRule) -> Result<String, SinkError>;

    /// Replaces the stored rule `id` with `rule`.
    async fn update(&self, id: &str, rule: &MonitoringRule) -> Result<(), SinkError>;
}
