//! File-backed site settings table

use std::path::Path;

use rentbus_domain::repository::SettingsRepository;
use rentbus_types::{Result, SiteSetting};

use super::json_table::JsonTable;

pub struct FileSettingsRepository {
    table: JsonTable<SiteSetting>,
}

impl FileSettingsRepository {
    pub fn open(store_dir: &Path) -> Result<Self> {
        Ok(Self {
            table: JsonTable::open(store_dir, "site_settings")?,
        })
    }
}

impl SettingsRepository for FileSettingsRepository {
    fn get(&self, key: &str) -> Result<Option<SiteSetting>> {
        Ok(self.table.get(key))
    }

    fn update(&self, key: &str, value: serde_json::Value) -> Result<SiteSetting> {
        self.table.modify(key, |setting| {
            setting.value = value;
            Ok(setting.clone())
        })
    }

    fn insert(&self, setting: &SiteSetting) -> Result<()> {
        self.table.insert(setting.clone())
    }
}
