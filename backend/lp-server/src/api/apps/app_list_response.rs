use crate::AppDto;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AppListResponse {
    pub apps: Vec<AppDto>,
}
