//! Application use cases

pub mod admin_service;
pub mod blog_service;
pub mod catalog_service;
pub mod settings_service;
pub mod session_service;
pub mod write_through;

pub use admin_service::load_dashboard;
pub use blog_service::{slugify, BlogService};
pub use catalog_service::{CatalogResult, CatalogService, CatalogServiceError};
pub use settings_service::SettingsService;
pub use session_service::SessionService;
pub use write_through::{AdminResult, AdminServiceError, WriteThroughCache};
