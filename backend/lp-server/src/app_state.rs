use lp_core::Supervisor;

use std::sync::Arc;

/// Shared by every handler. The supervisor serializes store access itself.
#[derive(Clone)]
pub struct AppState {
    pub supervisor: Arc<Supervisor>,
}

impl AppState {
    pub fn new(supervisor: Supervisor) -> Self {
        Self {
            supervisor: Arc::new(supervisor),
        }
    }
}
