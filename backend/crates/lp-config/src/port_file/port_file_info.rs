//! Port discovery file.
//!
//! `lp-server` writes `<config_dir>/server.json` once its listener is bound;
//! `lp` reads it to find the server without a `--server` flag.
//!
//! A server that dies without cleanup leaves the file behind. `read_live_in()`
//! checks the recorded PID and deletes the file when that process is gone.

use crate::{Config, ConfigError, ConfigErrorResult, port_file::is_process_running};

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const PORT_FILENAME: &str = "server.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortFileInfo {
    /// PID of the server that wrote this file
    pub pid: u32,
    pub port: u16,
    pub host: String,
    /// RFC 3339 start time
    pub started_at: String,
    pub version: String,
}

impl PortFileInfo {
    /// Port file path for the active config directory.
    pub fn path() -> ConfigErrorResult<PathBuf> {
        Ok(Self::path_in(&Config::config_dir()?))
    }

    pub fn path_in(config_dir: &Path) -> PathBuf {
        config_dir.join(PORT_FILENAME)
    }

    /// Base URL a client should use to reach the server.
    pub fn url(&self) -> String {
        let host = if self.host == "0.0.0.0" {
            "127.0.0.1"
        } else {
            self.host.as_str()
        };
        format!("http://{}:{}", host, self.port)
    }

    /// Publish this process as the server listening on `host:port`.
    ///
    /// Refuses to replace the file of another live server. There is a small
    /// window between that check and the write; two servers racing on one
    /// config directory is not a supported setup.
    pub fn write_in(config_dir: &Path, port: u16, host: &str) -> ConfigErrorResult<PathBuf> {
        let path = Self::path_in(config_dir);

        std::fs::create_dir_all(config_dir).map_err(|e| ConfigError::Io {
            path: config_dir.to_path_buf(),
            source: e,
        })?;

        if let Some(existing) = Self::read_live_in(config_dir)?
            && existing.pid != std::process::id()
        {
            return Err(ConfigError::port_file(format!(
                "Another lp-server is already running on port {} (PID {}). \
                 Stop it first or use a different config directory.",
                existing.port, existing.pid
            )));
        }

        let info = PortFileInfo {
            pid: std::process::id(),
            port,
            host: host.to_string(),
            started_at: chrono::Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        };

        let content = serde_json::to_string_pretty(&info)
            .map_err(|e| ConfigError::port_file(format!("Failed to serialize port file: {e}")))?;

        std::fs::write(&path, content).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        Ok(path)
    }

    /// `Ok(None)` when no file exists; `Err` when it exists but is unreadable.
    pub fn read_in(config_dir: &Path) -> ConfigErrorResult<Option<PortFileInfo>> {
        let path = Self::path_in(config_dir);

        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        let info = serde_json::from_str(&content).map_err(|e| {
            ConfigError::port_file(format!("Invalid port file {}: {e}", path.display()))
        })?;

        Ok(Some(info))
    }

    /// Like `read_in()`, but a file left by a dead server is removed and
    /// reported as `None`.
    pub fn read_live_in(config_dir: &Path) -> ConfigErrorResult<Option<PortFileInfo>> {
        let Some(info) = Self::read_in(config_dir)? else {
            return Ok(None);
        };

        if is_process_running(info.pid) {
            return Ok(Some(info));
        }

        log::debug!(
            "Removing stale port file (pid {} no longer running)",
            info.pid
        );
        Self::remove_in(config_dir)?;
        Ok(None)
    }

    /// The CLI's discovery entry point.
    pub fn read_live() -> ConfigErrorResult<Option<PortFileInfo>> {
        Self::read_live_in(&Config::config_dir()?)
    }

    /// Delete the port file; a missing file is not an error.
    pub fn remove_in(config_dir: &Path) -> ConfigErrorResult<()> {
        let path = Self::path_in(config_dir);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ConfigError::Io { path, source: e }),
        }
    }
}
