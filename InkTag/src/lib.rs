#![allow(non_snake_case)]
//! # InkTag
//!
//! Localization ID tagging for [Ink](https://www.inklestudios.com/ink/)
//! narrative scripts.
//!
//! InkTag finds every line of dialogue in a folder of `.ink` files, gives each
//! one a stable `#id:` tag written back into the source, and collects an
//! ID → text string table for translators. Tags already in the scripts are
//! kept, so running it again only tags new lines.
//!
//! ## Quick Start
//!
//! ```no_run
//! use inktag::prelude::*;
//!
//! let mut localizer = Localizer::new(LocalizerOptions {
//!     root_folder: "story/".into(),
//!     ..LocalizerOptions::default()
//! });
//! let report = localizer.run()?;
//! println!("{} lines, {} new IDs", report.spans_found, report.new_ids);
//!
//! let outputs = TableOutputOptions {
//!     csv: Some("strings.csv".into()),
//!     ..TableOutputOptions::default()
//! };
//! export_tables(localizer.store(), &outputs)?;
//! # Ok::<(), inktag::Error>(())
//! ```
//!
//! A line tagged by a run looks like this:
//!
//! ```ink
//! == Start ==
//! Hello there! #id:chapter1_Start_X7Q2
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `inktag` command-line binary

pub mod config;
pub mod error;
pub mod export;
pub mod formats;
pub mod localizer;
pub mod utils;

// Re-exports for convenience
pub use config::InkTagConfig;
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::config::InkTagConfig;
    pub use crate::error::{Error, Result};
    pub use crate::export::{ExportFormat, TableOutputOptions, export_tables, write_table};
    pub use crate::formats::ink::{InkParser, Node, Story};
    pub use crate::localizer::{
        IdGenerator, LocalizableSpan, LocalizationStore, Localizer, LocalizerOptions,
        PatchSummary, RunPhase, RunProgress, RunReport, find_ink_files,
    };
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
