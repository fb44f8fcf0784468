use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use super::{RuleSink, SinkError};
use crate::models::alert_models::MonitoringRule;

#[derive(Debug, Default)]
pub struct InMemoryRuleSink {
    rules: Mutex<IndexMap<String, MonitoringRule>>,
}

impl InMemoryRuleSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from already-persisted rules, keyed by their `_id`. Rules without an id are ignored.
    pub fn with_rules(rules: impl IntoIterator<Item = MonitoringRule>) -> Self {
        let rules = rules
            .into_iter()
            .filter_map(|rule| rule.id.clone().map(|id| (id, rule)))
            .collect();
        Self {
            rules: Mutex::new(rules),
        }
    }

    pub async fn rules(&self) -> Vec<MonitoringRule> {
        self.rules.lock().await.values().cloned().collect()
    }

    pub async fn get(&self, id: &str) -> Option<MonitoringRule> {
        self.rules.lock().await.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.rules.lock().await.len()
    }
}

#[async_trait]
impl RuleSink for InMemoryRuleSink {
    async fn create(&self, rule: &MonitoringRule) -> Result<String, SinkError> {
        let id = Uuid::new_v4().to_string();
        let mut stored = rule.clone();
        stored.id = Some(id.clone());
        self.rules.lock().await.insert(id.clone(), stored);
        info!(rule_id = %id, check_type = %rule.check_type, target = %rule.target, "Rule created.");
        Ok(id)
    }

    async fn update(&self, id: &str, rule: &MonitoringRule) -> Result<(), SinkError> {
        let mut rules = self.rules.lock().await;
        let Some(existing) = rules.get_mut(id) else {
            return Err(SinkError::NotFound(id.to_string()));
        };
        *existing = MonitoringRule {
            id: Some(id.to_string()),
            ..rule.clone()
        };
        info!(rule_id = %id, check_type = %rule.check_type, target = %rule.target, "Rule updated.");
        Ok(())
    }
}
