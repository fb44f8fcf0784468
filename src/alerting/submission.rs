use indexmap::IndexMap;
use tracing::debug;

use super::defaults::SYSTEM_WIDE;
use super::session_store::{ModifiedSet, SessionStore};
use super::CheckType;
use crate::models::alert_models::{ExistingRule, MonitoringRule};

/// Turns every modified check type into one rule per selected target.
///
/// The original rule's `_id` is carried only by the record whose check type and
/// target both equal the original's; every other record is a new rule. An empty
/// result means there is nothing to save.
pub fn expand(
    store: &SessionStore,
    modified: &ModifiedSet,
    original: Option<&ExistingRule>,
) -> Vec<MonitoringRule> {
    let mut rules: IndexMap<(CheckType, String), MonitoringRule> = IndexMap::new();

    for check_type in modified.iter() {
        let Some(config) = store.entry(check_type) else {
            debug!(check_type = %check_type, "Modified type has no session config, skipping.");
            continue;
        };

        let targets = if config.targets.is_empty() {
            let target = if config.target.is_empty() {
                SYSTEM_WIDE
            } else {
                config.target.as_str()
            };
            vec![target.to_string()]
        } else {
            config.targets.clone()
        };

        for target in targets {
            let id = original
                .filter(|o| o.check_type == check_type && o.target == target)
                .and_then(|o| o.id.clone());
            let rule = MonitoringRule {
                id,
                check_type,
                target: target.clone(),
                thresholds: config.thresholds,
                notification_frequency: config.notification_frequency,
                notify: config.notify.clone(),
                enabled: true,
            };
            rules.insert((check_type, target), rule);
        }
    }

    rules.into_values().collect()
}
