mod apps_config;
mod config;
mod error;
mod log_level;
mod logging_config;
mod port_file;
mod server_config;

#[cfg(test)]
mod tests;

pub use apps_config::AppsConfig;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use port_file::{is_process_running, port_file_info::PortFileInfo};
pub use server_config::ServerConfig;

/// Env var that relocates the whole config directory.
pub const CONFIG_DIR_ENV: &str = "LP_CONFIG_DIR";
const DEFAULT_CONFIG_DIR_NAME: &str = ".loopserve";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 9090;
const MIN_PORT: u16 = 1024;

const DEFAULT_APPS_FILE: &str = "apps.json";
const DEFAULT_APP_LOGS_DIR: &str = "logs";

const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_COLORED: bool = true;
const DEFAULT_LOG_DIRECTORY: &str = "log";
