//! Command execution implementations

use super::Commands;
use super::tag::TagArgs;
use super::{check, config, tag};

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Tag {
                folder,
                file_pattern,
                retag,
                csv,
                json,
                po,
                dry_run,
                debug_output,
                seed,
                config,
                quiet,
            } => tag::execute(&TagArgs {
                folder: folder.clone(),
                file_pattern: file_pattern.clone(),
                retag: *retag,
                csv: csv.clone(),
                json: json.clone(),
                po: po.clone(),
                dry_run: *dry_run,
                debug_output: *debug_output,
                seed: *seed,
                config: config.clone(),
                quiet: *quiet,
            }),
            Commands::Check {
                folder,
                file_pattern,
                config,
                quiet,
            } => check::execute(
                folder.as_deref(),
                file_pattern.as_deref(),
                config.as_deref(),
                *quiet,
            ),
            Commands::InitConfig { path, force } => config::init(path, *force),
        }
    }
}
