//! Key→text table export
//!
//! The string table collected by a run can be written as CSV, JSON or a
//! gettext PO catalog. Each format is enabled by giving it an output path.

pub mod csv;
pub mod json;
pub mod po;

pub use self::csv::write_csv;
pub use self::json::write_json;
pub use self::po::write_po;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::localizer::LocalizationStore;

/// Output table format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// `ID,Text` rows with quoted text
    Csv,
    /// Pretty-printed `{ "id": "text" }` object
    Json,
    /// gettext catalog, ID as `msgctxt`
    Po,
}

impl ExportFormat {
    /// Get the file extension for this format
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Po => "po",
        }
    }

    /// Display name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Json => "JSON",
            Self::Po => "PO",
        }
    }
}

/// Output paths for each table; `None` or empty skips that table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOutputOptions {
    pub csv: Option<PathBuf>,
    pub json: Option<PathBuf>,
    pub po: Option<PathBuf>,
}

impl TableOutputOptions {
    /// Enabled outputs in write order
    #[must_use]
    pub fn enabled(&self) -> Vec<(ExportFormat, &Path)> {
        [
            (ExportFormat::Csv, &self.csv),
            (ExportFormat::Json, &self.json),
            (ExportFormat::Po, &self.po),
        ]
        .into_iter()
        .filter_map(|(format, path)| {
            path.as_deref()
                .filter(|path| !path.as_os_str().is_empty())
                .map(|path| (format, path))
        })
        .collect()
    }

    /// Whether any table will be written
    #[must_use]
    pub fn any_enabled(&self) -> bool {
        !self.enabled().is_empty()
    }
}

/// Write every enabled table
///
/// Stops at the first table that fails; tables already written stay.
///
/// # Returns
/// The format and path of each table written.
///
/// # Errors
/// Returns [`Error::ExportIo`] naming the table that could not be written.
pub fn export_tables(
    store: &LocalizationStore,
    outputs: &TableOutputOptions,
) -> Result<Vec<(ExportFormat, PathBuf)>> {
    let mut written = Vec::new();
    for (format, path) in outputs.enabled() {
        write_table(store, path, format)?;
        tracing::info!("{} file written: {}", format.as_str(), path.display());
        written.push((format, path.to_path_buf()));
    }
    Ok(written)
}

/// Write one table to `path`, creating its parent directory if needed
///
/// # Errors
/// Returns [`Error::ExportIo`] if the file cannot be created or written.
pub fn write_table<P: AsRef<Path>>(
    store: &LocalizationStore,
    path: P,
    format: ExportFormat,
) -> Result<()> {
    let path = path.as_ref();
    let export_error = |source| Error::ExportIo {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(export_error)?;
    }

    let file = File::create(path).map_err(export_error)?;
    let mut writer = BufWriter::new(file);
    let written = match format {
        ExportFormat::Csv => write_csv(store, &mut writer),
        ExportFormat::Json => write_json(store, &mut writer),
        ExportFormat::Po => write_po(store, &mut writer),
    };
    written.and_then(|()| writer.flush()).map_err(export_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_store() -> LocalizationStore {
        let mut store = LocalizationStore::new();
        store.add("A1", "Say \"hi\"");
        store.add("B2", "Bye");
        store
    }

    #[test]
    fn test_empty_paths_are_skipped() {
        let outputs = TableOutputOptions {
            csv: Some(PathBuf::new()),
            json: None,
            po: Some(PathBuf::from("out.po")),
        };
        let enabled = outputs.enabled();
        assert_eq!(enabled, vec![(ExportFormat::Po, Path::new("out.po"))]);
        assert!(!TableOutputOptions::default().any_enabled());
    }

    #[test]
    fn test_export_all_tables() {
        let dir = tempfile::tempdir().expect("tempdir");
        let outputs = TableOutputOptions {
            csv: Some(dir.path().join("out/strings.csv")),
            json: Some(dir.path().join("out/strings.json")),
            po: Some(dir.path().join("out/strings.po")),
        };

        let written = export_tables(&sample_store(), &outputs).expect("export");
        let formats: Vec<ExportFormat> = written.iter().map(|(format, _)| *format).collect();
        assert_eq!(
            formats,
            vec![ExportFormat::Csv, ExportFormat::Json, ExportFormat::Po]
        );

        let csv = fs::read_to_string(dir.path().join("out/strings.csv")).expect("read");
        assert_eq!(csv, "ID,Text\nA1,\"Say \"\"hi\"\"\"\nB2,\"Bye\"\n");
        assert!(dir.path().join("out/strings.json").is_file());
        assert!(dir.path().join("out/strings.po").is_file());
    }

    #[test]
    fn test_export_error_names_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let blocked = dir.path().join("file");
        fs::write(&blocked, "").expect("write");
        let target = blocked.join("strings.csv");

        let err = write_table(&sample_store(), &target, ExportFormat::Csv).unwrap_err();
        match err {
            Error::ExportIo { path, .. } => assert_eq!(path, target),
            other => panic!("unexpected error: {other}"),
        }
    }
}
