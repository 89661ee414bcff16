use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::NotificationSettings;

/// Application-level constants
pub const APP_NAME: &str = "Prescyra";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Snooze length offered by the reminder screen.
pub const DEFAULT_SNOOZE_MINUTES: i64 = 15;

/// How many upcoming doses the dashboard lists.
pub const DEFAULT_NEXT_UP_LIMIT: usize = 4;

/// Get the application data directory.
/// ~/Prescyra/ when a home directory exists, ./Prescyra/ otherwise.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// One SQLite file per owner, so owners never share a connection.
pub fn database_path(owner_id: &Uuid) -> PathBuf {
    app_data_dir().join("owners").join(format!("{owner_id}.db"))
}

/// Default `tracing` filter when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "prescyra_lib=info,warn"
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Reminder engine tuning, read from an optional JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderConfig {
    pub default_snooze_minutes: i64,
    pub next_up_limit: usize,
    pub default_notifications: NotificationSettings,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            default_snooze_minutes: DEFAULT_SNOOZE_MINUTES,
            next_up_limit: DEFAULT_NEXT_UP_LIMIT,
            default_notifications: NotificationSettings::default(),
        }
    }
}

impl ReminderConfig {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No reminder config, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Default location: `<app data>/reminders.json`.
    pub fn default_path() -> PathBuf {
        app_data_dir().join("reminders.json")
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_snooze_minutes <= 0 {
            return Err(ConfigError::Invalid(format!(
                "default_snooze_minutes must be positive, got {}",
                self.default_snooze_minutes
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn app_data_dir_ends_with_app_name() {
        assert!(app_data_dir().ends_with("Prescyra"));
    }

    #[test]
    fn database_path_is_per_owner() {
        let a = database_path(&Uuid::new_v4());
        let b = database_path(&Uuid::new_v4());
        assert_ne!(a, b);
        assert!(a.starts_with(app_data_dir()));
        assert_eq!(a.extension().and_then(|e| e.to_str()), Some("db"));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReminderConfig::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, ReminderConfig::default());
        assert_eq!(config.default_snooze_minutes, 15);
        assert_eq!(config.next_up_limit, 4);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reminders.json");
        let mut f = std::fs::File::create(&path).unwrap();
        write!(f, r#"{{"default_snooze_minutes": 10}}"#).unwrap();

        let config = ReminderConfig::load(&path).unwrap();
        assert_eq!(config.default_snooze_minutes, 10);
        assert_eq!(config.next_up_limit, DEFAULT_NEXT_UP_LIMIT);
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reminders.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(ReminderConfig::load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn non_positive_snooze_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reminders.json");
        std::fs::write(&path, r#"{"default_snooze_minutes": 0}"#).unwrap();
        assert!(matches!(ReminderConfig::load(&path), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
