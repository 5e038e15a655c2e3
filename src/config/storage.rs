//! History storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where preference history lives on disk
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Root directory for all stored data
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,

    /// Subdirectory holding one history file per user
    #[serde(default = "default_history_category")]
    pub history_category: String,

    /// Days of history loaded for shift detection
    #[serde(default = "default_history_days")]
    pub history_days: u32,
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("storage.base_dir"));
        }
        if self.history_category.trim().is_empty() {
            return Err(ValidationError::MissingRequired("storage.history_category"));
        }
        if self.history_days == 0 {
            return Err(ValidationError::MustBePositive("storage.history_days"));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            history_category: default_history_category(),
            history_days: default_history_days(),
        }
    }
}

fn default_base_dir() -> PathBuf {
    PathBuf::from("storage")
}

fn default_history_category() -> String {
    "preference_history".to_string()
}

fn default_history_days() -> u32 {
    90
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = StorageConfig::default();
        assert_eq!(config.base_dir, PathBuf::from("storage"));
        assert_eq!(config.history_category, "preference_history");
        assert_eq!(config.history_days, 90);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn blank_category_is_rejected() {
        let config = StorageConfig {
            history_category: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("storage.history_category"))
        );
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: StorageConfig = serde_json::from_str(r#"{"base_dir": "/var/lib/prefs"}"#).unwrap();
        assert_eq!(config.base_dir, PathBuf::from("/var/lib/prefs"));
        assert_eq!(config.history_days, 90);
    }
}
