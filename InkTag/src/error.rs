//! Error types for `InkTag`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `InkTag` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Discovery Errors ====================
    /// The configured scan root does not exist.
    #[error("directory \"{path}\" does not exist")]
    RootNotFound {
        /// The resolved root path.
        path: PathBuf,
    },

    /// Directory traversal error.
    #[error("directory walk error: {0}")]
    WalkDirError(String),

    // ==================== Parse Errors ====================
    /// The script parser rejected a source file.
    #[error("ink parse error in \"{}\" line {line}: {message}", file.display())]
    Parse {
        /// The file being parsed.
        file: PathBuf,
        /// 1-based line of the problem (0 when the whole file is affected).
        line: usize,
        /// Description of what is wrong.
        message: String,
    },

    /// An `INCLUDE` statement names a file that cannot be found.
    #[error("ink parse error in \"{}\" line {line}: included file \"{include}\" not found", file.display())]
    IncludeNotFound {
        /// The file containing the `INCLUDE`.
        file: PathBuf,
        /// 1-based line of the `INCLUDE`.
        line: usize,
        /// The include path as written.
        include: String,
    },

    // ==================== Tagging Errors ====================
    /// Two localizable chunks of text share one source line.
    #[error(
        "error in file \"{file_id}\" line {line} - two chunks of text when localizer can only work with one per line"
    )]
    MultiSpanPerLine {
        /// File identifier (file name without extension).
        file_id: String,
        /// 1-based source line.
        line: usize,
    },

    /// No unique identifier could be generated for a prefix.
    #[error("couldn't generate a unique ID for prefix \"{prefix}\" after {attempts} attempts")]
    IdExhausted {
        /// The scope prefix the ID was generated under.
        prefix: String,
        /// Number of candidates tried.
        attempts: usize,
    },

    // ==================== Patch Errors ====================
    /// Reading or writing a source file during tag insertion failed.
    #[error("error replacing tags in \"{}\": {source}", file.display())]
    PatchIo {
        /// The source file being patched.
        file: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A pending insert targets a line that the file on disk does not have.
    #[error("error replacing tags in \"{}\": line {line} out of range for ID {id}", file.display())]
    PatchLineOutOfRange {
        /// The source file being patched.
        file: PathBuf,
        /// 1-based line number that was requested.
        line: usize,
        /// The identifier that could not be inserted.
        id: String,
    },

    /// Tag insertion completed but some files failed.
    #[error("tag insertion failed for {failed} of {total} files: {first_error}")]
    PatchPartialFailure {
        /// Number of files with pending inserts.
        total: usize,
        /// Number of files that could not be patched.
        failed: usize,
        /// The first error message encountered.
        first_error: String,
    },

    // ==================== Export Errors ====================
    /// Writing an output table failed.
    #[error("error writing out \"{}\": {source}", path.display())]
    ExportIo {
        /// The output table path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ==================== Configuration Errors ====================
    /// A configuration file could not be loaded.
    #[error("invalid config \"{}\": {message}", path.display())]
    Config {
        /// The configuration file path.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },
}

impl Error {
    /// Whether this error was raised while reading scripts, before any write.
    #[must_use]
    pub fn is_scan_error(&self) -> bool {
        matches!(
            self,
            Error::RootNotFound { .. }
                | Error::WalkDirError(_)
                | Error::Parse { .. }
                | Error::IncludeNotFound { .. }
                | Error::MultiSpanPerLine { .. }
        )
    }
}

// Add conversion from walkdir::Error
impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDirError(err.to_string())
    }
}

/// A specialized Result type for `InkTag` operations.
pub type Result<T> = std::result::Result<T, Error>;
