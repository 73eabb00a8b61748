//! CLI progress display utilities
//!
//! Step indicators, emojis and progress bars for tagging runs.

use std::path::Path;
use std::time::Duration;

use console::{Emoji, style};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};

use crate::localizer::{RunPhase, RunProgress};

// =============================================================================
// Emoji Constants (with ASCII fallbacks for terminals without emoji support)
// =============================================================================

/// Magnifying glass - for scanning operations
pub static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
/// Label - for tagging operations
pub static LABEL: Emoji<'_, '_> = Emoji("🏷️  ", "");
/// Floppy disk - for writing/saving operations
pub static DISK: Emoji<'_, '_> = Emoji("💾 ", "");
/// Sparkles - for completion
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");
/// Warning sign - for problems found
pub static WARNING: Emoji<'_, '_> = Emoji("⚠️  ", "! ");

// =============================================================================
// Step-Based Progress
// =============================================================================

/// Print a step indicator: `[1/2] 🔍 Message...`
///
/// # Example
/// ```ignore
/// print_step(1, 2, LOOKING_GLASS, "Scanning scripts...");
/// print_step(2, 2, DISK, "Writing tables...");
/// ```
pub fn print_step(current: usize, total: usize, emoji: Emoji, msg: &str) {
    println!(
        "{} {}{}",
        style(format!("[{current}/{total}]")).bold().dim(),
        emoji,
        msg
    );
}

/// Print completion message: `✨ Done in 2s`
pub fn print_done(elapsed: Duration) {
    println!("{} Done in {}", SPARKLE, HumanDuration(elapsed));
}

// =============================================================================
// Progress Styles
// =============================================================================

/// Progress bar style for determinate progress
///
/// Format: `Scanning [████████░░░░░░░░] 5/10`
///
/// # Panics
/// Panics if the template string is invalid (this is a compile-time constant).
#[must_use]
pub fn bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:40.cyan/blue}] {pos}/{len}")
        .expect("valid template")
}

/// Create a simple progress bar, hidden when `quiet`
#[must_use]
pub fn simple_bar(total: u64, msg: &str, quiet: bool) -> ProgressBar {
    let pb = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(total)
    };
    pb.set_style(bar_style());
    pb.set_message(msg.to_string());
    pb
}

/// Move a run's progress bar along for file-level phases
pub fn update_bar(pb: &ProgressBar, progress: &RunProgress) {
    if !matches!(progress.phase, RunPhase::Scanning | RunPhase::Patching) {
        return;
    }

    pb.set_length(progress.total as u64);
    pb.set_position(progress.current as u64);
    let name = progress
        .current_file
        .as_deref()
        .and_then(|f| Path::new(f).file_name().and_then(|n| n.to_str()))
        .unwrap_or(progress.phase.as_str());
    pb.set_message(format!("{} {name}", progress.phase.as_str()));
}
