use crate::AppDto;
use serde::Serialize;

/// Single app response
#[derive(Debug, Serialize)]
pub struct AppResponse {
    pub app: AppDto,
}
