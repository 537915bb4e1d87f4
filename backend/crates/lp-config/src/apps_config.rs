use crate::{ConfigError, ConfigErrorResult, DEFAULT_APP_LOGS_DIR, DEFAULT_APPS_FILE};

use std::path::Path;

use serde::Deserialize;

/// Location of the app record file and the per-app log directory.
///
/// Both paths are relative to the config directory.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppsConfig {
    pub file: String,
    pub logs_dir: String,
}

impl Default for AppsConfig {
    fn default() -> Self {
        Self {
            file: String::from(DEFAULT_APPS_FILE),
            logs_dir: String::from(DEFAULT_APP_LOGS_DIR),
        }
    }
}

impl AppsConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        Self::validate_relative("apps.file", &self.file)?;
        Self::validate_relative("apps.logs_dir", &self.logs_dir)
    }

    fn validate_relative(key: &str, value: &str) -> ConfigErrorResult<()> {
        if value.trim().is_empty() {
            return Err(ConfigError::apps(format!("{key} must not be empty")));
        }

        if Path::new(value).is_absolute() || value.contains("..") {
            return Err(ConfigError::apps(format!(
                "{key} must be relative and cannot contain '..', got {value}"
            )));
        }

        Ok(())
    }
}
