//! Start-all / stop-all handlers.

use crate::api::apps::apps::run_blocking;
use crate::{ApiResult, AppState};

use lp_core::BulkReport;

use axum::{Json, extract::State};
use serde::Serialize;

/// Always 200: per-app failures are data, reported in `failed`.
#[derive(Debug, Serialize)]
pub struct BulkResponse {
    /// "success" when nothing failed, otherwise "partial"
    pub status: &'static str,
    #[serde(flatten)]
    pub report: BulkReport,
}

impl From<BulkReport> for BulkResponse {
    fn from(report: BulkReport) -> Self {
        Self {
            status: if report.is_complete() {
                "success"
            } else {
                "partial"
            },
            report,
        }
    }
}

/// POST /api/v1/start-all
pub async fn start_all(State(state): State<AppState>) -> ApiResult<Json<BulkResponse>> {
    let report = run_blocking(&state, |s| s.start_all()).await?;
    Ok(Json(report.into()))
}

/// POST /api/v1/stop-all
pub async fn stop_all(State(state): State<AppState>) -> ApiResult<Json<BulkResponse>> {
    let report = run_blocking(&state, |s| s.stop_all()).await?;
    Ok(Json(report.into()))
}
