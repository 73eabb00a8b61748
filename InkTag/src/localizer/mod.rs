//! Localization tagging
//!
//! A run scans every script under the root folder, reuses the `#id:` tags it
//! finds, generates IDs for the text that has none and only then writes the
//! new tags back into the sources. Nothing is written if any file fails to
//! scan.
//!
//! # Example
//!
//! ```no_run
//! use inktag::localizer::{Localizer, LocalizerOptions};
//!
//! let options = LocalizerOptions {
//!     root_folder: "story/".into(),
//!     ..LocalizerOptions::default()
//! };
//! let mut localizer = Localizer::new(options);
//! let report = localizer.run()?;
//! println!("{} new IDs", report.new_ids);
//! # Ok::<(), inktag::Error>(())
//! ```

pub mod discovery;
pub mod id_gen;
pub mod inserter;
pub mod scanner;
pub mod selector;
pub mod store;
pub mod types;

pub use discovery::{DEFAULT_FILE_PATTERN, find_ink_files};
pub use id_gen::{IdGenerator, make_prefix};
pub use inserter::{PatchFailure, PatchSummary, insert_tag_in_line, insert_tags_to_files};
pub use selector::select_spans;
pub use store::LocalizationStore;
pub use types::{LocalizableSpan, PendingInsert, PendingInserts, RunPhase, RunProgress};

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::formats::ink::InkParser;

/// Options for a tagging run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalizerOptions {
    /// Folder to scan; empty means the current directory
    pub root_folder: PathBuf,
    /// Glob matched against file names
    pub file_pattern: String,
    /// Ignore existing IDs and give every span a fresh one
    pub retag: bool,
    /// Assign IDs without writing any source file
    pub dry_run: bool,
    /// Write patched scripts to `<file>.txt` instead of over the original
    pub debug_output: bool,
    /// Fixed random seed for reproducible IDs
    pub seed: Option<u64>,
}

impl Default for LocalizerOptions {
    fn default() -> Self {
        Self {
            root_folder: PathBuf::new(),
            file_pattern: DEFAULT_FILE_PATTERN.to_string(),
            retag: false,
            dry_run: false,
            debug_output: false,
            seed: None,
        }
    }
}

/// What a run found and did
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Absolute scan root
    pub root: PathBuf,
    /// Script files parsed
    pub files_scanned: usize,
    /// Localizable spans selected
    pub spans_found: usize,
    /// Spans that kept an authored ID
    pub existing_ids: usize,
    /// Spans that were given a new ID
    pub new_ids: usize,
    /// IDs seen more than once
    pub duplicate_ids: Vec<String>,
    /// Patch phase outcome (empty for dry runs)
    pub patch: PatchSummary,
}

impl RunReport {
    /// True when every span already had an ID and no ID was duplicated
    #[must_use]
    pub fn is_fully_tagged(&self) -> bool {
        self.new_ids == 0 && self.duplicate_ids.is_empty()
    }
}

/// Run-scoped tagging context
///
/// Owns the used-ID registry, the random source and the string table, so two
/// runs never share state.
#[derive(Debug)]
pub struct Localizer {
    options: LocalizerOptions,
    generator: IdGenerator,
    store: LocalizationStore,
    files_visited: HashSet<String>,
    pending: PendingInserts,
}

impl Localizer {
    #[must_use]
    pub fn new(options: LocalizerOptions) -> Self {
        let generator = IdGenerator::from_seed(options.seed);
        Self {
            options,
            generator,
            store: LocalizationStore::new(),
            files_visited: HashSet::new(),
            pending: PendingInserts::new(),
        }
    }

    #[must_use]
    pub fn options(&self) -> &LocalizerOptions {
        &self.options
    }

    /// String table collected by the last run
    #[must_use]
    pub fn store(&self) -> &LocalizationStore {
        &self.store
    }

    #[must_use]
    pub fn into_store(self) -> LocalizationStore {
        self.store
    }

    /// Tags assigned by the last run, grouped by file
    #[must_use]
    pub fn pending(&self) -> &PendingInserts {
        &self.pending
    }

    /// Absolute scan root
    ///
    /// # Errors
    ///
    /// Returns [`Error::RootNotFound`] if the folder does not exist.
    pub fn root_path(&self) -> Result<PathBuf> {
        let root = if self.options.root_folder.as_os_str().is_empty() {
            std::env::current_dir()?
        } else {
            std::path::absolute(&self.options.root_folder)?
        };

        if !root.is_dir() {
            return Err(Error::RootNotFound { path: root });
        }
        Ok(root)
    }

    /// Run without progress reporting
    ///
    /// # Errors
    ///
    /// See [`Localizer::run_with_progress`].
    pub fn run(&mut self) -> Result<RunReport> {
        self.run_with_progress(|_| {})
    }

    /// Scan, assign IDs and patch the sources.
    ///
    /// # Errors
    ///
    /// Scan errors ([`Error::RootNotFound`], [`Error::Parse`],
    /// [`Error::MultiSpanPerLine`] and friends) are returned before any file
    /// is written. [`Error::IdExhausted`] also stops the run before writing.
    /// If some files cannot be patched the others are still written and
    /// [`Error::PatchPartialFailure`] is returned.
    pub fn run_with_progress<F>(&mut self, progress: F) -> Result<RunReport>
    where
        F: Fn(&RunProgress),
    {
        self.generator = IdGenerator::from_seed(self.options.seed);
        self.store = LocalizationStore::new();
        self.files_visited.clear();
        self.pending.clear();

        let root = self.root_path()?;
        tracing::info!("Processing folder {}", root.display());

        progress(&RunProgress::new(RunPhase::Discovering, 0, 0));
        let files = find_ink_files(&root, &self.options.file_pattern)?;
        tracing::info!("Found {} script files", files.len());

        let spans = self.scan(&root, &files, &progress)?;

        if self.options.retag {
            tracing::info!("Re-tagging: existing IDs will be replaced");
        } else {
            self.generator
                .seed_existing(spans.iter().filter_map(|span| span.existing_id.clone()));
        }

        let (existing_ids, new_ids) = self.assign(spans.iter(), &progress)?;

        let patch = if self.options.dry_run {
            tracing::info!("Dry run: {} files would be updated", self.pending.len());
            PatchSummary::default()
        } else {
            inserter::insert_tags_to_files(&self.pending, self.options.debug_output, &progress)
                .into_result()?
        };

        progress(&RunProgress::new(RunPhase::Complete, files.len(), files.len()));

        Ok(RunReport {
            root,
            files_scanned: files.len(),
            spans_found: spans.len(),
            existing_ids,
            new_ids,
            duplicate_ids: self.store.duplicates().to_vec(),
            patch,
        })
    }

    /// Parse every file and select its spans, failing on the first bad file
    fn scan<F>(
        &mut self,
        root: &Path,
        files: &[PathBuf],
        progress: &F,
    ) -> Result<Vec<LocalizableSpan>>
    where
        F: Fn(&RunProgress),
    {
        let parser = InkParser::new(root);
        let mut spans = Vec::new();

        for (index, file) in files.iter().enumerate() {
            progress(&RunProgress::with_file(
                RunPhase::Scanning,
                index + 1,
                files.len(),
                file.display().to_string(),
            ));
            tracing::info!("Processing file {}", file.display());

            let story = parser.parse_file(file)?;
            spans.extend(select_spans(&story, &mut self.files_visited)?);
        }

        Ok(spans)
    }

    /// Reuse or generate an ID for each span, in document order
    fn assign<'s, I, F>(&mut self, spans: I, progress: &F) -> Result<(usize, usize)>
    where
        I: ExactSizeIterator<Item = &'s LocalizableSpan>,
        F: Fn(&RunProgress),
    {
        let total = spans.len();
        let mut existing = 0;
        let mut generated = 0;

        for (index, span) in spans.enumerate() {
            progress(&RunProgress::new(RunPhase::Assigning, index + 1, total));

            match span.existing_id.as_deref() {
                Some(id) if !self.options.retag => {
                    self.store.add(id, &span.text);
                    existing += 1;
                }
                _ => {
                    let id = self.generator.generate_unique(&span.id_prefix())?;
                    tracing::debug!("New ID {} for {}:{}", id, span.file_id, span.line);
                    self.store.add(id.as_str(), &span.text);
                    self.pending
                        .entry(span.file.clone())
                        .or_default()
                        .push(PendingInsert {
                            span: span.clone(),
                            id,
                        });
                    generated += 1;
                }
            }
        }

        Ok((existing, generated))
    }
}
