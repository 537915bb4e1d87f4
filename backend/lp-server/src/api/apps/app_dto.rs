use lp_core::AppRecord;

use serde::Serialize;

/// App record as the API presents it.
#[derive(Debug, Serialize)]
pub struct AppDto {
    pub name: String,
    pub port: u16,
    pub command: String,
    pub pid: u32,
    /// null until the first start
    pub log_file: Option<String>,
    /// "running" or "stopped", as of the last probe
    pub status: &'static str,
}

impl From<AppRecord> for AppDto {
    fn from(r: AppRecord) -> Self {
        Self {
            status: if r.pid != 0 { "running" } else { "stopped" },
            log_file: (!r.log_file.is_empty()).then_some(r.log_file),
            name: r.name,
            port: r.port,
            command: r.command,
            pid: r.pid,
        }
    }
}
