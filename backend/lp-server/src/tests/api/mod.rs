mod app_dto;
mod bulk;
mod error;
