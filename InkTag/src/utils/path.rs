//! Path utilities

use std::path::Path;

/// Normalize path separators to forward slashes (for display and reports)
pub fn normalize_path<P: AsRef<Path>>(path: P) -> String {
    path.as_ref().to_string_lossy().replace('\\', "/")
}

/// File identifier of a script: its file name without the extension.
///
/// Used both as the first segment of generated IDs and to recognise a file
/// that was already processed through another file's `INCLUDE`.
pub fn file_id<P: AsRef<Path>>(path: P) -> String {
    path.as_ref()
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_id_strips_directory_and_extension() {
        assert_eq!(file_id("story/chapter1.ink"), "chapter1");
        assert_eq!(file_id("intro"), "intro");
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("a\\b\\c.ink"), "a/b/c.ink");
    }
}
