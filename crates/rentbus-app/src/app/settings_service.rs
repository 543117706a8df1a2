//! Site settings use cases

use rentbus_domain::repository::SettingsRepository;
use rentbus_types::{BlogSectionSettings, Result, SiteSetting, BLOG_SECTION_KEY};

pub struct SettingsService<R> {
    repo: R,
}

impl<R: SettingsRepository> SettingsService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn get(&self, key: &str) -> Result<Option<SiteSetting>> {
        self.repo.get(key)
    }

    /// Write a setting, creating the row when the key is new
    pub fn set(&self, key: &str, value: serde_json::Value) -> Result<SiteSetting> {
        if self.repo.get(key)?.is_some() {
            return self.repo.update(key, value);
        }

        let setting = SiteSetting {
            id: uuid::Uuid::new_v4().to_string(),
            key: key.to_string(),
            value,
            description: None,
        };
        self.repo.insert(&setting)?;
        tracing::info!(key, "setting created");
        Ok(setting)
    }

    /// Homepage blog section settings.
    ///
    /// Falls back to the defaults when the setting is missing, unreadable or
    /// malformed; missing fields inside a stored value also take defaults.
    pub fn blog_settings(&self) -> BlogSectionSettings {
        match self.repo.get(BLOG_SECTION_KEY) {
            Ok(Some(setting)) => serde_json::from_value(setting.value).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "using default blog settings");
                BlogSectionSettings::default()
            }),
            Ok(None) => BlogSectionSettings::default(),
            Err(e) => {
                tracing::warn!(error = %e, "using default blog settings");
                BlogSectionSettings::default()
            }
        }
    }

    pub fn update_blog_settings(&self, settings: &BlogSectionSettings) -> Result<SiteSetting> {
        self.set(BLOG_SECTION_KEY, serde_json::to_value(settings)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rentbus_types::{Error, StoreError};
    use serde_json::json;
    use std::cell::RefCell;

    #[derive(Default)]
    struct MemorySettings {
        rows: RefCell<Vec<SiteSetting>>,
        broken: bool,
    }

    impl SettingsRepository for MemorySettings {
        fn get(&self, key: &str) -> Result<Option<SiteSetting>> {
            if self.broken {
                return Err(Error::Store(StoreError::IoError("no such table".to_string())));
            }
            Ok(self.rows.borrow().iter().find(|s| s.key == key).cloned())
        }

        fn update(&self, key: &str, value: serde_json::Value) -> Result<SiteSetting> {
            let mut rows = self.rows.borrow_mut();
            let row = rows
                .iter_mut()
                .find(|s| s.key == key)
                .ok_or_else(|| Error::NotFound(key.to_string()))?;
            row.value = value;
            Ok(row.clone())
        }

        fn insert(&self, setting: &SiteSetting) -> Result<()> {
            self.rows.borrow_mut().push(setting.clone());
            Ok(())
        }
    }

    #[test]
    fn test_defaults_when_absent() {
        let service = SettingsService::new(MemorySettings::default());
        assert_eq!(service.blog_settings(), BlogSectionSettings::default());
    }

    #[test]
    fn test_defaults_when_backend_fails() {
        let service = SettingsService::new(MemorySettings {
            broken: true,
            ..MemorySettings::default()
        });
        let settings = service.blog_settings();
        assert!(settings.enabled);
        assert_eq!(settings.limit, 3);
    }

    #[test]
    fn test_partial_value_fills_defaults() {
        let service = SettingsService::new(MemorySettings::default());
        service
            .set(BLOG_SECTION_KEY, json!({"enabled": false, "limit": 6}))
            .unwrap();

        let settings = service.blog_settings();
        assert!(!settings.enabled);
        assert_eq!(settings.limit, 6);
        assert_eq!(settings.title, "Latest from Our Blog");
    }

    #[test]
    fn test_update_reuses_row() {
        let service = SettingsService::new(MemorySettings::default());
        let first = service
            .update_blog_settings(&BlogSectionSettings::default())
            .unwrap();
        let second = service
            .update_blog_settings(&BlogSectionSettings {
                title: "Travel Notes".to_string(),
                ..BlogSectionSettings::default()
            })
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(service.blog_settings().title, "Travel Notes");
    }
}
