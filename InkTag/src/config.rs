//! Tool configuration file
//!
//! A JSON file holding run options and output paths, so a project can keep
//! its settings next to its scripts:
//!
//! ```json
//! {
//!   "localizer": { "root_folder": "story", "file_pattern": "*.ink" },
//!   "outputs": { "csv": "build/strings.csv" }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::export::TableOutputOptions;
use crate::localizer::LocalizerOptions;

/// Everything a tagging run needs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InkTagConfig {
    pub localizer: LocalizerOptions,
    pub outputs: TableOutputOptions,
}

impl InkTagConfig {
    /// Load config from a JSON file
    ///
    /// Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the file cannot be read or is not valid.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Save config as pretty JSON
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
