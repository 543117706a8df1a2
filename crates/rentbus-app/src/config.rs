//! Configuration management for rentbus
//!
//! Config stored at: ~/.config/rentbus/config.json

use rentbus_types::{ConfigError, OutputFormat, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::PathBuf;

use crate::constants::BLOG_PAGE_SIZE;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Table and key-value store directory override
    #[serde(default)]
    pub store_dir: Option<PathBuf>,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    /// Posts per page for blog listings
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Admin login email
    #[serde(default = "default_admin_email")]
    pub admin_email: String,

    /// SHA-256 hex digest of the admin password
    #[serde(default = "default_admin_password_sha256")]
    pub admin_password_sha256: String,
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_page_size() -> usize {
    BLOG_PAGE_SIZE
}

fn default_admin_email() -> String {
    "admin@rentanybus.com".to_string()
}

fn default_admin_password_sha256() -> String {
    password_digest("admin123")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: None,
            output_format: default_output_format(),
            page_size: default_page_size(),
            admin_email: default_admin_email(),
            admin_password_sha256: default_admin_password_sha256(),
        }
    }
}

/// Hex SHA-256 of a password
pub fn password_digest(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("rentbus");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Get the store directory path
    pub fn store_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.store_dir {
            return Ok(dir.clone());
        }

        let store_dir = dirs::data_dir()
            .ok_or(ConfigError::NotFound)?
            .join("rentbus");
        Ok(store_dir)
    }

    /// Check admin credentials; the email is trimmed and case-insensitive
    pub fn verify_admin(&self, email: &str, password: &str) -> bool {
        email.trim().eq_ignore_ascii_case(self.admin_email.trim())
            && password_digest(password) == self.admin_password_sha256
    }

    /// Replace the stored admin password
    pub fn set_admin_password(&mut self, password: &str) {
        self.admin_password_sha256 = password_digest(password);
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveError(e.to_string()))?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Rentbus Configuration")?;
        writeln!(f, "=====================")?;
        writeln!(f)?;
        writeln!(
            f,
            "Store dir:      {}",
            self.store_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(f, "Output format:  {}", self.output_format)?;
        writeln!(f, "Page size:      {}", self.page_size)?;
        writeln!(f, "Admin email:    {}", self.admin_email)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:    {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_admin_credentials() {
        let config = Config::default();
        assert!(config.verify_admin("admin@rentanybus.com", "admin123"));
        assert!(config.verify_admin("  Admin@RentAnyBus.com ", "admin123"));
        assert!(!config.verify_admin("admin@rentanybus.com", "Admin123"));
        assert!(!config.verify_admin("ops@rentanybus.com", "admin123"));
    }

    #[test]
    fn test_digest_is_hex_sha256() {
        assert_eq!(
            password_digest("admin123"),
            "240be518fabd2724ddb6f04eeb1da5967448d7e831c08c8fa822809f74c720a9"
        );
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: Config = serde_json::from_str(r#"{"page_size": 12}"#).unwrap();
        assert_eq!(config.page_size, 12);
        assert_eq!(config.output_format, OutputFormat::Table);
        assert_eq!(config.admin_email, "admin@rentanybus.com");
    }

    #[test]
    fn test_store_dir_override() {
        let config = Config {
            store_dir: Some(PathBuf::from("/tmp/rentbus-test")),
            ..Config::default()
        };
        assert_eq!(config.store_dir().unwrap(), PathBuf::from("/tmp/rentbus-test"));
    }
}
