//! Tag insertion
//!
//! Rewrites only the lines of a script that received a new ID, splicing an
//! `#id:` tag in at the end of the selected text or replacing the stale tag
//! already on that line.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use super::types::{PendingInsert, PendingInserts, RunPhase, RunProgress};
use crate::error::{Error, Result};
use crate::formats::ink::ends_tag_value;

/// Literal that starts an ID tag in source
pub const TAG_PREFIX: &str = "#id:";

/// Extension appended to the file name when writing debug copies
pub const DEBUG_OUTPUT_EXTENSION: &str = "txt";

static TAG_REGEX: OnceLock<Regex> = OnceLock::new();

fn tag_regex() -> &'static Regex {
    TAG_REGEX.get_or_init(|| Regex::new(r"#id:[A-Za-z0-9_]+").expect("valid tag pattern"))
}

/// A file that could not be patched
#[derive(Debug, Clone)]
pub struct PatchFailure {
    pub file: PathBuf,
    pub message: String,
}

/// Outcome of the patch phase
#[derive(Debug, Clone, Default)]
pub struct PatchSummary {
    /// Files that had pending inserts
    pub total: usize,
    /// Paths written, in order
    pub written: Vec<PathBuf>,
    /// Tags inserted or replaced
    pub tags_written: usize,
    pub failures: Vec<PatchFailure>,
}

impl PatchSummary {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Turn recorded failures into an error
    ///
    /// # Errors
    ///
    /// Returns [`Error::PatchPartialFailure`] if any file failed.
    pub fn into_result(self) -> Result<Self> {
        if let Some(first) = self.failures.first() {
            return Err(Error::PatchPartialFailure {
                total: self.total,
                failed: self.failures.len(),
                first_error: first.message.clone(),
            });
        }
        Ok(self)
    }
}

/// Where a debug copy of a patched file is written: `<file>.txt`
pub fn debug_output_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(DEBUG_OUTPUT_EXTENSION);
    PathBuf::from(name)
}

/// Insert or replace the ID tag on one source line.
///
/// A line that already has an `#id:<ID>` tag gets that whole tag replaced in
/// place, including any non-identifier characters glued to the ID. Otherwise
/// the tag is spliced in at `insert_char` (0-based character offset), with a
/// space before it unless whitespace precedes, and a space after it unless it
/// is followed by whitespace, a closing bracket or the end of the line.
pub fn insert_tag_in_line(line: &str, insert_char: usize, id: &str) -> String {
    let new_tag = format!("{TAG_PREFIX}{id}");
    if line.contains(TAG_PREFIX) {
        if let Some(replaced) = replace_tags(line, &new_tag) {
            return replaced;
        }
    }

    let chars: Vec<char> = line.chars().collect();
    let pos = insert_char.min(chars.len());

    let mut tag = String::with_capacity(new_tag.len() + 2);
    if pos > 0 && !chars[pos - 1].is_whitespace() {
        tag.push(' ');
    }
    tag.push_str(&new_tag);
    if chars.get(pos).is_some_and(|&c| !c.is_whitespace() && c != ']') {
        tag.push(' ');
    }

    let mut out: String = chars[..pos].iter().collect();
    out.push_str(&tag);
    out.extend(&chars[pos..]);
    out
}

/// Replace every `#id:` tag on the line, or `None` if none matches
fn replace_tags(line: &str, new_tag: &str) -> Option<String> {
    let mut out = String::with_capacity(line.len() + new_tag.len());
    let mut last = 0;
    for found in tag_regex().find_iter(line) {
        out.push_str(&line[last..found.start()]);
        out.push_str(new_tag);
        last = found.end() + authored_tail_len(&line[found.end()..]);
    }

    if last == 0 {
        return None;
    }
    out.push_str(&line[last..]);
    Some(out)
}

/// Byte length of the rest of a tag value glued to a matched ID
fn authored_tail_len(rest: &str) -> usize {
    let mut chars = rest.chars().peekable();
    let mut len = 0;
    while let Some(c) = chars.next() {
        if c.is_whitespace() || ends_tag_value(c, chars.peek().copied()) {
            break;
        }
        len += c.len_utf8();
    }
    len
}

/// Apply every pending insert for one file and write it back.
///
/// Lines are joined with `\n`; a trailing newline is kept if the file had
/// one. With `debug_output` the result goes to [`debug_output_path`] and the
/// original is left untouched.
///
/// # Returns
/// The path that was written.
///
/// # Errors
///
/// Returns [`Error::PatchIo`] if the file cannot be read or written, and
/// [`Error::PatchLineOutOfRange`] if an insert targets a missing line.
pub fn insert_tags_to_file(
    path: &Path,
    inserts: &[PendingInsert],
    debug_output: bool,
) -> Result<PathBuf> {
    let content = fs::read_to_string(path).map_err(|source| Error::PatchIo {
        file: path.to_path_buf(),
        source,
    })?;
    let trailing_newline = content.ends_with('\n');
    let mut lines: Vec<String> = content.lines().map(str::to_string).collect();

    for insert in inserts {
        let index = insert
            .span
            .line
            .checked_sub(1)
            .filter(|&index| index < lines.len())
            .ok_or_else(|| Error::PatchLineOutOfRange {
                file: path.to_path_buf(),
                line: insert.span.line,
                id: insert.id.clone(),
            })?;

        let patched = insert_tag_in_line(&lines[index], insert.span.insert_char, &insert.id);
        tracing::debug!("{}:{} -> {}", path.display(), insert.span.line, patched);
        lines[index] = patched;
    }

    let mut output = lines.join("\n");
    if trailing_newline {
        output.push('\n');
    }

    let output_path = if debug_output {
        debug_output_path(path)
    } else {
        path.to_path_buf()
    };
    fs::write(&output_path, output).map_err(|source| Error::PatchIo {
        file: output_path.clone(),
        source,
    })?;

    Ok(output_path)
}

/// Patch every file with pending inserts.
///
/// A failing file is reported and skipped; the remaining files are still
/// patched. Check [`PatchSummary::failures`] afterwards.
pub fn insert_tags_to_files<F>(
    pending: &PendingInserts,
    debug_output: bool,
    progress: F,
) -> PatchSummary
where
    F: Fn(&RunProgress),
{
    let work: Vec<_> = pending.iter().filter(|(_, inserts)| !inserts.is_empty()).collect();
    let mut summary = PatchSummary {
        total: work.len(),
        ..PatchSummary::default()
    };

    for (index, (file, inserts)) in work.into_iter().enumerate() {
        progress(&RunProgress::with_file(
            RunPhase::Patching,
            index + 1,
            summary.total,
            file.display().to_string(),
        ));
        tracing::info!("Updating IDs in file: {}", file.display());

        match insert_tags_to_file(file, inserts, debug_output) {
            Ok(written) => {
                summary.tags_written += inserts.len();
                summary.written.push(written);
            }
            Err(e) => {
                tracing::error!("{}", e);
                summary.failures.push(PatchFailure {
                    file: file.clone(),
                    message: e.to_string(),
                });
            }
        }
    }

    summary
}
