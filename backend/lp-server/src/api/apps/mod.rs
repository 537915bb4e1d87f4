pub mod app_dto;
pub mod app_list_response;
pub mod app_response;
pub mod apps;
pub mod create_app_request;
