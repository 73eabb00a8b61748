//! CLI command for tagging scripts

use std::path::PathBuf;
use std::time::Instant;

use super::config::{apply_scan_overrides, load_or_default};
use crate::cli::progress::{
    DISK, LABEL, LOOKING_GLASS, WARNING, print_done, print_step, simple_bar, update_bar,
};
use crate::config::InkTagConfig;
use crate::export::export_tables;
use crate::localizer::{Localizer, RunReport};

/// Options from `inktag tag` flags
#[derive(Debug, Clone, Default)]
pub struct TagArgs {
    /// Root folder (--folder)
    pub folder: Option<PathBuf>,
    /// File name glob (--file-pattern)
    pub file_pattern: Option<String>,
    /// Regenerate every ID (--retag)
    pub retag: bool,
    /// CSV table path (--csv)
    pub csv: Option<PathBuf>,
    /// JSON table path (--json)
    pub json: Option<PathBuf>,
    /// PO catalog path (--po)
    pub po: Option<PathBuf>,
    /// Don't modify scripts (--dry-run)
    pub dry_run: bool,
    /// Write `<file>.txt` copies (--debug-output)
    pub debug_output: bool,
    /// Fixed random seed (--seed)
    pub seed: Option<u64>,
    /// Config file (--config)
    pub config: Option<PathBuf>,
    /// Suppress progress output (--quiet)
    pub quiet: bool,
}

impl TagArgs {
    /// Merge flags over the config file, if any
    fn to_config(&self) -> anyhow::Result<InkTagConfig> {
        let mut config = load_or_default(self.config.as_deref())?;
        apply_scan_overrides(
            &mut config,
            self.folder.as_deref(),
            self.file_pattern.as_deref(),
        );

        let localizer = &mut config.localizer;
        localizer.retag |= self.retag;
        localizer.dry_run |= self.dry_run;
        localizer.debug_output |= self.debug_output;
        if self.seed.is_some() {
            localizer.seed = self.seed;
        }

        let outputs = &mut config.outputs;
        for (flag, slot) in [
            (&self.csv, &mut outputs.csv),
            (&self.json, &mut outputs.json),
            (&self.po, &mut outputs.po),
        ] {
            if flag.is_some() {
                slot.clone_from(flag);
            }
        }

        Ok(config)
    }
}

/// Tag scripts, then write the enabled tables
pub fn execute(args: &TagArgs) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = args.to_config()?;
    let steps = if config.outputs.any_enabled() { 2 } else { 1 };

    let mut localizer = Localizer::new(config.localizer.clone());
    let root = localizer.root_path()?;
    if !args.quiet {
        print_step(
            1,
            steps,
            LOOKING_GLASS,
            &format!("Scanning {}...", root.display()),
        );
    }

    let pb = simple_bar(0, "Scanning", args.quiet);
    let result = localizer.run_with_progress(|progress| update_bar(&pb, progress));
    pb.finish_and_clear();

    let report = result.map_err(|e| {
        let note = if e.is_scan_error() {
            "Not localized, no source files were modified"
        } else {
            "Not localized"
        };
        anyhow::Error::new(e).context(note)
    })?;

    if !args.quiet {
        print_report(&report, localizer.options().dry_run);
    }
    println!("Localized - found {} strings.", localizer.store().len());

    if steps > 1 {
        if !args.quiet {
            print_step(2, steps, DISK, "Writing string tables...");
        }
        for (format, path) in export_tables(localizer.store(), &config.outputs)? {
            println!("{} file written: {}", format.as_str(), path.display());
        }
    }

    if !args.quiet {
        print_done(start.elapsed());
    }
    Ok(())
}

fn print_report(report: &RunReport, dry_run: bool) {
    println!(
        "  {} files, {} lines ({} already tagged)",
        report.files_scanned, report.spans_found, report.existing_ids
    );

    if dry_run {
        println!("  {LABEL}{} new IDs (dry run, no files changed)", report.new_ids);
    } else {
        println!(
            "  {LABEL}{} new IDs written to {} files",
            report.patch.tags_written,
            report.patch.written.len()
        );
    }

    for id in &report.duplicate_ids {
        println!("  {WARNING}Duplicate ID: {id}");
    }
}
