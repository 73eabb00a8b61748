//! Script file discovery

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;
use crate::utils::matches_glob;

/// Default pattern for script files
pub const DEFAULT_FILE_PATTERN: &str = "*.ink";

/// Find all files under `root` whose name matches `pattern`, recursively
///
/// # Arguments
/// * `root` - Directory to search
/// * `pattern` - Glob matched against the file name (`*` and `?`)
///
/// # Returns
/// A sorted list of matching file paths.
///
/// # Errors
/// Returns [`Error::WalkDirError`] if directory traversal fails.
///
/// [`Error::WalkDirError`]: crate::Error::WalkDirError
pub fn find_ink_files<P: AsRef<Path>>(root: P, pattern: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry?;
        if entry.file_type().is_file()
            && matches_glob(pattern, &entry.file_name().to_string_lossy())
        {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}
