//! App REST API handlers
//!
//! Core operations block (signals, waits, file IO), so each one runs on the
//! blocking pool.

use crate::{
    ApiResult, AppDto, AppListResponse, AppResponse, AppState, CreateAppRequest, DeleteResponse,
};

use lp_core::Supervisor;

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
};

/// Run a supervisor operation off the async runtime.
pub(crate) async fn run_blocking<T, F>(state: &AppState, op: F) -> ApiResult<T>
where
    F: FnOnce(&Supervisor) -> lp_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let supervisor = Arc::clone(&state.supervisor);
    let result = tokio::task::spawn_blocking(move || op(&supervisor)).await?;
    Ok(result?)
}

/// GET /api/v1/apps
///
/// Reconciles every recorded PID before answering.
pub async fn list_apps(State(state): State<AppState>) -> ApiResult<Json<AppListResponse>> {
    let records = run_blocking(&state, |s| s.list_records()).await?;

    Ok(Json(AppListResponse {
        apps: records.into_iter().map(AppDto::from).collect(),
    }))
}

/// POST /api/v1/apps
pub async fn add_app(
    State(state): State<AppState>,
    payload: Result<Json<CreateAppRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<AppResponse>)> {
    let Json(req) = payload?;

    let record = run_blocking(&state, move |s| {
        s.add_record(&req.name, req.port, &req.command)
    })
    .await?;

    log::info!("Added app {} via REST API", record.name);

    Ok((
        StatusCode::CREATED,
        Json(AppResponse {
            app: record.into(),
        }),
    ))
}

/// DELETE /api/v1/apps/{name}
///
/// Stops the app first when it is running.
pub async fn delete_app(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let removed = run_blocking(&state, move |s| s.delete_record(&name)).await?;

    Ok(Json(DeleteResponse {
        deleted: removed.name,
    }))
}

/// POST /api/v1/apps/{name}/start
pub async fn start_app(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<AppResponse>> {
    let record = run_blocking(&state, move |s| s.start_record(&name)).await?;

    Ok(Json(AppResponse {
        app: record.into(),
    }))
}

/// POST /api/v1/apps/{name}/stop
pub async fn stop_app(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<AppResponse>> {
    let record = run_blocking(&state, move |s| s.stop_record(&name)).await?;

    Ok(Json(AppResponse {
        app: record.into(),
    }))
}

/// GET /api/v1/apps/{name}/logs
pub async fn read_app_log(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let bytes = run_blocking(&state, move |s| s.read_log(&name)).await?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        bytes,
    ))
}
