//! Session configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Presentation knobs for a sheet session
///
/// None of these loosen or tighten the sheet rules; they only shape the
/// read models handed to the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Other participants' responses listed on a collapsed row
    pub collapsed_preview: usize,
    /// Suggested response length limit for the UI; not enforced here
    pub max_response_chars: Option<usize>,
}

impl SheetConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With collapsed preview size
    #[inline]
    #[must_use]
    pub fn with_collapsed_preview(mut self, count: usize) -> Self {
        self.collapsed_preview = count;
        self
    }

    /// With UI response length hint
    #[inline]
    #[must_use]
    pub fn with_max_response_chars(mut self, limit: Option<usize>) -> Self {
        self.max_response_chars = limit;
        self
    }

    /// Parse TOML; missing keys fall back to defaults
    ///
    /// # Errors
    /// [`ConfigError::Toml`] on malformed input.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    /// Read a TOML file
    ///
    /// # Errors
    /// [`ConfigError::Io`] when the file cannot be read, [`ConfigError::Toml`]
    /// when it does not parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            collapsed_preview: 2,
            max_response_chars: None,
        }
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        /// Config file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// File is not valid TOML for this schema
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}
