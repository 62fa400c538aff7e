pub mod metrics_service;
pub mod news_service;
pub mod upload_service;
