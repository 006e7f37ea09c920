//! Browser configuration loaded from a TOML file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::fs::format::{parse_size, validate_date_format};
use crate::fs::hex::DEFAULT_BYTES_PER_ROW;
use crate::fs::metadata::DEFAULT_DATE_FORMAT;
use crate::fs::preview::PreviewSettings;
use crate::options::BrowserOptions;

/// Top-level configuration.
///
/// All fields have defaults, so the browser works without a config file.
/// Call [`Config::load`] to read from a TOML path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Loads configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::from_io(e, path))?;
        toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }
}

/// Which browser affordances are enabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    #[serde(default = "default_true")]
    pub show_hidden: bool,
    #[serde(default = "default_true")]
    pub allow_delete: bool,
    #[serde(default = "default_true")]
    pub allow_share: bool,
    #[serde(default = "default_true")]
    pub allow_viewing: bool,
    #[serde(default)]
    pub show_clear_directory: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            show_hidden: true,
            allow_delete: true,
            allow_share: true,
            allow_viewing: true,
            show_clear_directory: false,
        }
    }
}

impl BrowserConfig {
    /// Converts the flags into a [`BrowserOptions`] bitmask.
    pub fn options(&self) -> BrowserOptions {
        BrowserOptions::empty()
            .with(BrowserOptions::SHOW_HIDDEN, self.show_hidden)
            .with(BrowserOptions::ALLOW_DELETE, self.allow_delete)
            .with(BrowserOptions::ALLOW_SHARE, self.allow_share)
            .with(BrowserOptions::ALLOW_VIEWING, self.allow_viewing)
            .with(BrowserOptions::SHOW_CLEAR_DIRECTORY, self.show_clear_directory)
    }
}

/// File preview configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    #[serde(default = "default_max_file_size")]
    pub max_file_size: String,
    #[serde(default = "default_bytes_per_row")]
    pub bytes_per_row: usize,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            max_file_size: default_max_file_size(),
            bytes_per_row: default_bytes_per_row(),
        }
    }
}

impl PreviewConfig {
    /// Resolves the configured strings into [`PreviewSettings`].
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ConfigParse`] if `max_file_size` is not a valid size.
    pub fn settings(&self) -> CoreResult<PreviewSettings> {
        Ok(PreviewSettings {
            max_hex_size: parse_size(&self.max_file_size)?,
            bytes_per_row: self.bytes_per_row.max(1),
        })
    }
}

/// Display preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl UiConfig {
    /// Checks the configured values before they reach a formatter.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ConfigParse`] if `date_format` has an unknown specifier.
    pub fn validate(&self) -> CoreResult<()> {
        validate_date_format(&self.date_format)
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_file_size() -> String {
    "10MB".to_string()
}

fn default_bytes_per_row() -> usize {
    DEFAULT_BYTES_PER_ROW
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}
