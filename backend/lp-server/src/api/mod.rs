pub mod apps;
pub mod bulk;
pub mod delete_response;
pub mod error;
