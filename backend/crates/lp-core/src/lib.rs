mod app_log;
mod app_record;
mod app_store;
mod bulk_report;
pub mod command_line;
mod error;
mod lifecycle;
pub mod process;
mod supervisor;

#[cfg(test)]
mod tests;

pub use app_record::AppRecord;
pub use app_store::AppStore;
pub use bulk_report::{AppFailure, BulkReport};
pub use error::{Result, SupervisorError};
pub use lifecycle::{FORCEFUL_STOP_TIMEOUT, GRACEFUL_STOP_TIMEOUT, ProcessManager, StopOutcome};
pub use supervisor::Supervisor;
