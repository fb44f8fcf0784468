use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path};
use tracing::{error, info};

use crate::error::EditorError;
use crate::models::alert_models::ChannelName;

pub const FREQUENCY_ENV: &str = "ALERT_EDITOR_NOTIFICATION_FREQUENCY";
pub const CHANNELS_ENV: &str = "ALERT_EDITOR_CHANNELS";

/// Defaults applied to drafts that do not come from an existing rule.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EditorConfig {
    /// Minutes between repeated notifications for a firing rule.
    pub default_notification_frequency: u32,
    pub default_channels: Vec<ChannelName>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_notification_frequency: 15,
            default_channels: vec![ChannelName::Slack],
        }
    }
}

impl EditorConfig {
    /// Reads `.env` if present, then applies overrides from the process environment.
    pub fn from_env() -> Result<Self, EditorError> {
        dotenv::dotenv().ok();
        Self::default().with_overrides(
            env::var(FREQUENCY_ENV).ok().as_deref(),
            env::var(CHANNELS_ENV).ok().as_deref(),
        )
    }

    pub fn with_overrides(
        mut self,
        frequency: Option<&str>,
        channels: Option<&str>,
    ) -> Result<Self, EditorError> {
        if let Some(raw) = frequency {
            self.default_notification_frequency = match raw.trim().parse::<u32>() {
                Ok(minutes) if minutes >= 1 => minutes,
                _ => {
                    return Err(EditorError::Config(format!(
                        "{FREQUENCY_ENV} must be a whole number of minutes >= 1, got {raw:?}"
                    )))
                }
            };
        }
        if let Some(raw) = channels {
            self.default_channels = parse_channels(raw)?;
        }
        Ok(self)
    }
}

fn parse_channels(raw: &str) -> Result<Vec<ChannelName>, EditorError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|name| match name.to_ascii_lowercase().as_str() {
            "slack" => Ok(ChannelName::Slack),
            "email" => Ok(ChannelName::Email),
            "webhook" => Ok(ChannelName::Webhook),
            other => Err(EditorError::Config(format!(
                "{CHANNELS_ENV} contains unknown channel {other:?}"
            ))),
        })
        .collect()
}

pub fn load_config(config_path_str: &str) -> Result<EditorConfig, EditorError> {
    let config_path = Path::new(config_path_str);
    info!(path = %config_path_str, "Attempting to load editor config.");

    let config_str = fs::read_to_string(config_path).map_err(|e| {
        error!(path = %config_path_str, error = %e, "Failed to read editor config file.");
        e
    })?;

    let config: EditorConfig = toml::from_str(&config_str).map_err(|e| {
        error!(path = %config_path_str, error = %e, "Failed to parse editor config file.");
        e
    })?;

    if config.default_notification_frequency == 0 {
        return Err(EditorError::Config(
            "default_notification_frequency must be at least 1".to_string(),
        ));
    }

    info!(config = ?config, "Loaded editor config successfully.");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_config_from_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "default_notification_frequency = 5\ndefault_channels = [\"email\", \"webhook\"]"
        )
        .unwrap();

        let config = load_config(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.default_notification_frequency, 5);
        assert_eq!(
            config.default_channels,
            vec![ChannelName::Email, ChannelName::Webhook]
        );
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_notification_frequency = 60").unwrap();

        let config = load_config(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.default_channels, vec![ChannelName::Slack]);
    }

    #[test]
    fn test_zero_frequency_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_notification_frequency = 0").unwrap();
        assert!(matches!(
            load_config(file.path().to_str().unwrap()),
            Err(EditorError::Config(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            load_config("/nonexistent/alert-editor.toml"),
            Err(EditorError::Io(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let config = EditorConfig::default()
            .with_overrides(Some("30"), Some("Slack, email"))
            .unwrap();
        assert_eq!(config.default_notification_frequency, 30);
        assert_eq!(
            config.default_channels,
            vec![ChannelName::Slack, ChannelName::Email]
        );

        assert!(EditorConfig::default()
            .with_overrides(Some("0"), None)
            .is_err());
        assert!(EditorConfig::default()
            .with_overrides(None, Some("pager"))
            .is_err());
    }
}
