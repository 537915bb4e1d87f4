use serde::Serialize;

/// Per-app outcome of a start-all or stop-all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BulkReport {
    pub succeeded: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<AppFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppFailure {
    pub name: String,
    pub message: String,
}

impl BulkReport {
    pub fn fail(&mut self, name: &str, error: impl std::fmt::Display) {
        self.failed.push(AppFailure {
            name: name.to_string(),
            message: error.to_string(),
        });
    }

    /// True when no app failed.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}
