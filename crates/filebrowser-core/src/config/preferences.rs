//! Persisted user preferences.
//!
//! Small toggles the user flips while browsing (hex offset style, the last
//! details tab) survive restarts through a TOML file owned by the host.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::fs::hex::OffsetStyle;

/// Which pane of the file details view was last shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailsTab {
    #[default]
    Metadata,
    Contents,
    Data,
}

/// User toggles remembered between sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub offset_style: OffsetStyle,
    #[serde(default)]
    pub details_tab: DetailsTab,
}

impl Preferences {
    /// Returns a copy with the hex offset style flipped.
    #[must_use]
    pub fn with_offsets_toggled(self) -> Self {
        Self {
            offset_style: self.offset_style.toggled(),
            ..self
        }
    }

    /// Returns a copy remembering `tab`.
    #[must_use]
    pub fn with_details_tab(self, tab: DetailsTab) -> Self {
        Self {
            details_tab: tab,
            ..self
        }
    }

    /// Loads preferences from a TOML file. A missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ConfigParse`] if the file exists but is malformed,
    /// or [`CoreError::Io`] if it cannot be read.
    pub fn load_from_file(path: &Path) -> CoreResult<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(CoreError::from_io(e, path)),
        };
        toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }

    /// Persists preferences to a TOML file, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation or writing fails.
    pub fn save_to_file(&self, path: &Path) -> CoreResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| CoreError::ConfigParse(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
