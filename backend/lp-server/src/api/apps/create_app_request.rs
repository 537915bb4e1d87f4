use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateAppRequest {
    /// Unique; also the log file stem
    pub name: String,

    /// Unique across apps; exported to the app as PORT
    pub port: u16,

    /// Program and arguments, split on whitespace with quote spans
    pub command: String,
}
