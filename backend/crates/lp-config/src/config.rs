use crate::{
    AppsConfig, CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult,
    DEFAULT_CONFIG_DIR_NAME, LoggingConfig, ServerConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub apps: AppsConfig,
    pub logging: LoggingConfig,
    /// Directory the config was loaded from; every relative path resolves against it.
    #[serde(skip)]
    pub dir: PathBuf,
}

impl Config {
    /// Load config for the current environment.
    ///
    /// Loading order:
    /// 1. `LP_CONFIG_DIR` env var, else `./.loopserve/`
    /// 2. Create the directory if missing
    /// 3. Read `config.toml` if present, else defaults
    /// 4. Apply `LP_*` environment overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;
        Self::load_from(&config_dir)
    }

    /// Load from an explicit config directory.
    pub fn load_from(config_dir: &Path) -> ConfigErrorResult<Self> {
        if !config_dir.exists() {
            std::fs::create_dir_all(config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.to_path_buf(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.dir = config_dir.to_path_buf();
        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Priority: LP_CONFIG_DIR env var > ./.loopserve/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR_NAME))
    }

    /// Validate all sections. Call after load() to fail fast at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.apps.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Path of the persisted app record file.
    pub fn apps_file_path(&self) -> PathBuf {
        self.dir.join(&self.apps.file)
    }

    /// Directory holding one `<name>.log` per managed app.
    pub fn app_logs_dir(&self) -> PathBuf {
        self.dir.join(&self.apps.logs_dir)
    }

    /// Supervisor log file, if file logging is configured.
    pub fn log_file_path(&self) -> Option<PathBuf> {
        self.logging
            .file
            .as_ref()
            .map(|file| self.dir.join(&self.logging.dir).join(file))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn log_summary(&self) {
        info!("Configuration loaded from {}:", self.dir.display());
        info!("  server: {}", self.bind_addr());
        info!(
            "  apps: file={}, logs_dir={}",
            self.apps.file, self.apps.logs_dir
        );
        info!(
            "  logging: {} (colored: {}, file: {})",
            self.logging.level,
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("stdout")
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("LP_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("LP_SERVER_PORT", &mut self.server.port);

        // Apps
        Self::apply_env_string("LP_APPS_FILE", &mut self.apps.file);
        Self::apply_env_string("LP_APPS_LOGS_DIR", &mut self.apps.logs_dir);

        // Logging
        Self::apply_env_parse("LP_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("LP_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("LP_LOG_FILE", &mut self.logging.file);
        Self::apply_env_string("LP_LOG_DIR", &mut self.logging.dir);
    }

    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Accepts "true"/"1"; anything else is false.
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Unparseable values are ignored and the previous value is kept.
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
