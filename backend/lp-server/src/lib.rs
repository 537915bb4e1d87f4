pub mod api;
pub mod app_state;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;

#[cfg(test)]
mod tests;

pub use api::{
    apps::{
        app_dto::AppDto,
        app_list_response::AppListResponse,
        app_response::AppResponse,
        apps::{add_app, delete_app, list_apps, read_app_log, start_app, stop_app},
        create_app_request::CreateAppRequest,
    },
    bulk::{BulkResponse, start_all, stop_all},
    delete_response::DeleteResponse,
    error::ApiError,
    error::Result as ApiResult,
};
pub use app_state::AppState;

pub use crate::routes::build_router;
