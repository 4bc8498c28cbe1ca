pub mod app_config;
pub mod content_repo;

pub use content_repo::FileTourSource;
