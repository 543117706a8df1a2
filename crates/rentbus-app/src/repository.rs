//! Repository adapters for persistence layer

use rentbus_infra::persistence::{
    FileBlogRepository, FileInquiryRepository, FileOperatorRepository, FileOwnerLeadRepository,
    FileSettingsRepository, FileVehicleRepository,
};
use rentbus_store::JsonFileStore;
use rentbus_types::Result;

use crate::config::Config;

/// Open file-based vehicles table
pub fn open_vehicle_repo(config: &Config) -> Result<FileVehicleRepository> {
    FileVehicleRepository::open(&config.store_dir()?)
}

/// Open file-based operators table
pub fn open_operator_repo(config: &Config) -> Result<FileOperatorRepository> {
    FileOperatorRepository::open(&config.store_dir()?)
}

/// Open file-based inquiries table
pub fn open_inquiry_repo(config: &Config) -> Result<FileInquiryRepository> {
    FileInquiryRepository::open(&config.store_dir()?)
}

/// Open file-based bus owner leads table
pub fn open_owner_lead_repo(config: &Config) -> Result<FileOwnerLeadRepository> {
    FileOwnerLeadRepository::open(&config.store_dir()?)
}

/// Open file-based blog tables
pub fn open_blog_repo(config: &Config) -> Result<FileBlogRepository> {
    FileBlogRepository::open(&config.store_dir()?)
}

/// Open file-based site settings table
pub fn open_settings_repo(config: &Config) -> Result<FileSettingsRepository> {
    FileSettingsRepository::open(&config.store_dir()?)
}

/// Open the key-value store for local state
pub fn open_kv_store(config: &Config) -> Result<JsonFileStore> {
    JsonFileStore::open(config.store_dir()?)
}
