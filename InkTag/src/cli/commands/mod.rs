use clap::Subcommand;
use std::path::PathBuf;

pub mod check;
pub mod config;
pub mod execute;
pub mod tag;

#[derive(Subcommand)]
pub enum Commands {
    /// Tag every line of dialogue with a localization ID and export the string table
    Tag {
        /// Root folder to scan for Ink files (default: current directory)
        #[arg(short, long)]
        folder: Option<PathBuf>,

        /// File name pattern to match (e.g., "start-*.ink"; default: "*.ink")
        #[arg(long)]
        file_pattern: Option<String>,

        /// Regenerate every ID instead of keeping existing ones
        #[arg(long)]
        retag: bool,

        /// Write a CSV string table
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Write a JSON string table
        #[arg(long)]
        json: Option<PathBuf>,

        /// Write a gettext PO catalog
        #[arg(long)]
        po: Option<PathBuf>,

        /// Assign IDs and export tables without modifying any script
        #[arg(long)]
        dry_run: bool,

        /// Write tagged scripts to <file>.txt instead of overwriting them
        #[arg(long)]
        debug_output: bool,

        /// Random seed for reproducible IDs
        #[arg(long)]
        seed: Option<u64>,

        /// JSON config file; flags override its values
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Report lines without an ID and duplicated IDs, without modifying anything
    Check {
        /// Root folder to scan for Ink files (default: current directory)
        #[arg(short, long)]
        folder: Option<PathBuf>,

        /// File name pattern to match (default: "*.ink")
        #[arg(long)]
        file_pattern: Option<String>,

        /// JSON config file; flags override its values
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Only print problems
        #[arg(short, long)]
        quiet: bool,
    },

    /// Write a config file with default settings
    InitConfig {
        /// Output path
        #[arg(default_value = "inktag.json")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
