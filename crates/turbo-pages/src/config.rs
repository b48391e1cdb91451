//! Page binding configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::logging::{LogFormat, LogLevel};

/// Configuration for page bindings and the SSR document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagesConfig {
    /// Application name.
    pub app_name: String,
    /// Default document title.
    pub title: String,
    /// CSS file path.
    pub css_path: Option<String>,
    /// `id` of the root element carrying the `data-page` attribute.
    pub root_element_id: String,
    /// Minimum level for binding logs.
    pub log_level: LogLevel,
    /// Output format for binding logs.
    pub log_format: LogFormat,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            app_name: "TurboApp".to_string(),
            title: "TurboCommerce".to_string(),
            css_path: None,
            root_element_id: "app".to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Json,
        }
    }
}

impl PagesConfig {
    /// Create a new configuration with the given app name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            app_name: name.into(),
            ..Default::default()
        }
    }

    /// Load config from a TOML or JSON file, chosen by extension.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            Self::from_toml(&content).with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Parse config from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the CSS file path.
    pub fn with_css(mut self, path: impl Into<String>) -> Self {
        self.css_path = Some(path.into());
        self
    }

    /// Set the root element id.
    pub fn with_root_element(mut self, id: impl Into<String>) -> Self {
        self.root_element_id = id.into();
        self
    }

    /// Set the minimum log level.
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Set the log format.
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.log_format = format;
        self
    }
}
