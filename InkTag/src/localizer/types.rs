//! Data carried between the tagging phases

use std::path::PathBuf;

use indexmap::IndexMap;

use super::id_gen::make_prefix;

/// One piece of authored text eligible for localization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizableSpan {
    /// Raw text value (untrimmed)
    pub text: String,
    /// Script file the text lives in
    pub file: PathBuf,
    /// File name without extension
    pub file_id: String,
    /// 1-based source line
    pub line: usize,
    /// 0-based character offset where a new tag is spliced in
    pub insert_char: usize,
    /// Enclosing knot/stitch names, outer to inner
    pub scopes: Vec<String>,
    /// ID already authored after the text on the same line
    pub existing_id: Option<String>,
}

impl LocalizableSpan {
    /// Prefix for IDs generated for this span, e.g. `chapter1_Start_Intro_`
    #[must_use]
    pub fn id_prefix(&self) -> String {
        make_prefix(&self.file_id, &self.scopes)
    }
}

/// A span waiting for its ID to be written into the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingInsert {
    pub span: LocalizableSpan,
    pub id: String,
}

/// Pending inserts grouped by file, in first-encounter order
pub type PendingInserts = IndexMap<PathBuf, Vec<PendingInsert>>;

/// Enclosing construct of a node while the tree is walked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ancestor<'a> {
    Knot(&'a str),
    Stitch(&'a str),
    /// Logic line, declaration or inline expression
    Code,
}

impl<'a> Ancestor<'a> {
    /// Scope name contributing to the ID prefix, if any
    #[must_use]
    pub fn scope_name(self) -> Option<&'a str> {
        match self {
            Self::Knot(name) | Self::Stitch(name) => Some(name),
            Self::Code => None,
        }
    }
}

/// Phase of a tagging run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Walking the root folder for script files
    Discovering,
    /// Parsing files and selecting text
    Scanning,
    /// Reusing or generating IDs
    Assigning,
    /// Writing tags into source files
    Patching,
    /// Run finished
    Complete,
}

impl RunPhase {
    /// Get a human-readable description of this phase
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Discovering => "Discovering files",
            Self::Scanning => "Scanning",
            Self::Assigning => "Assigning IDs",
            Self::Patching => "Updating IDs",
            Self::Complete => "Complete",
        }
    }
}

/// Progress update passed to run callbacks
#[derive(Debug, Clone)]
pub struct RunProgress {
    /// Current operation phase
    pub phase: RunPhase,
    /// Current item number (1-indexed)
    pub current: usize,
    /// Total number of items
    pub total: usize,
    /// Current file being processed (if applicable)
    pub current_file: Option<String>,
}

impl RunProgress {
    /// Create a new progress update
    #[must_use]
    pub fn new(phase: RunPhase, current: usize, total: usize) -> Self {
        Self {
            phase,
            current,
            total,
            current_file: None,
        }
    }

    /// Create a progress update with a file name
    #[must_use]
    pub fn with_file(
        phase: RunPhase,
        current: usize,
        total: usize,
        file: impl Into<String>,
    ) -> Self {
        Self {
            phase,
            current,
            total,
            current_file: Some(file.into()),
        }
    }
}
