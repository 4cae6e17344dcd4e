pub mod export_service;
pub mod match_service;
pub mod query_service;
pub mod upload_service;
