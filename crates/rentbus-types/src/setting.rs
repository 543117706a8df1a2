//! Site-wide settings

use serde::{Deserialize, Serialize};

/// Setting key for the homepage blog section
pub const BLOG_SECTION_KEY: &str = "blog_section";

/// A key/value row in the settings table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSetting {
    pub id: String,
    pub key: String,
    pub value: serde_json::Value,
    #[serde(default)]
    pub description: Option<String>,
}

/// Homepage blog section settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogSectionSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_subtitle")]
    pub subtitle: String,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_true() -> bool {
    true
}

fn default_title() -> String {
    "Latest from Our Blog".to_string()
}

fn default_subtitle() -> String {
    "Stay updated with travel tips, bus reviews, and industry news.".to_string()
}

fn default_limit() -> u32 {
    3
}

impl Default for BlogSectionSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            title: default_title(),
            subtitle: default_subtitle(),
            limit: default_limit(),
        }
    }
}
