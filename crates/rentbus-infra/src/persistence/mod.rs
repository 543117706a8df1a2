//! Persistence implementations
//!
//! File-based implementations of the repository traits, one JSON file per
//! backend table.

mod file_blog_repo;
mod file_record_repo;
mod file_settings_repo;
mod file_vehicle_repo;
mod json_table;

pub use file_blog_repo::FileBlogRepository;
pub use file_record_repo::{
    FileInquiryRepository, FileOperatorRepository, FileOwnerLeadRepository, FileRecordRepository,
    TableRecord,
};
pub use file_settings_repo::FileSettingsRepository;
pub use file_vehicle_repo::FileVehicleRepository;
pub use json_table::JsonTable;
