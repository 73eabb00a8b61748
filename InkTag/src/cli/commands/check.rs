//! CLI command for checking scripts are fully tagged

use std::path::Path;

use super::config::{apply_scan_overrides, load_or_default};
use crate::cli::progress::WARNING;
use crate::localizer::Localizer;
use crate::utils::normalize_path;

/// Dry-run the tagger and fail if anything would change
pub fn execute(
    folder: Option<&Path>,
    file_pattern: Option<&str>,
    config: Option<&Path>,
    quiet: bool,
) -> anyhow::Result<()> {
    let mut config = load_or_default(config)?;
    apply_scan_overrides(&mut config, folder, file_pattern);
    config.localizer.retag = false;
    config.localizer.dry_run = true;

    let mut localizer = Localizer::new(config.localizer);
    let report = localizer.run()?;

    for insert in localizer.pending().values().flatten() {
        let file = &insert.span.file;
        println!(
            "{WARNING}{}:{} has no ID: {}",
            normalize_path(file.strip_prefix(&report.root).unwrap_or(file)),
            insert.span.line,
            insert.span.text.trim()
        );
    }
    for id in &report.duplicate_ids {
        println!("{WARNING}Duplicate ID: {id}");
    }

    if !report.is_fully_tagged() {
        anyhow::bail!(
            "{} untagged lines and {} duplicate IDs in {}",
            report.new_ids,
            report.duplicate_ids.len(),
            report.root.display()
        );
    }

    if !quiet {
        println!(
            "All {} lines in {} files are tagged",
            report.spans_found, report.files_scanned
        );
    }
    Ok(())
}
