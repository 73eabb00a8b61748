//! gettext PO catalog
//!
//! Each entry uses the ID as `msgctxt` and the text as `msgid`, leaving
//! `msgstr` empty for translators:
//!
//! ```po
//! msgctxt "chapter1_Start_AB12"
//! msgid "Hello world"
//! msgstr ""
//! ```

use std::io::{self, Write};

use crate::localizer::LocalizationStore;

/// Write the table as a PO template
///
/// # Errors
/// Returns any error from the writer.
pub fn write_po<W: Write>(store: &LocalizationStore, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "msgid \"\"")?;
    writeln!(writer, "msgstr \"\"")?;
    writeln!(writer, "\"Content-Type: text/plain; charset=UTF-8\\n\"")?;
    writeln!(writer, "\"X-Generator: inktag {}\\n\"", crate::VERSION)?;

    for (id, text) in store.iter() {
        writeln!(writer)?;
        writeln!(writer, "msgctxt \"{}\"", escape(id))?;
        writeln!(writer, "msgid \"{}\"", escape(text))?;
        writeln!(writer, "msgstr \"\"")?;
    }
    Ok(())
}

/// Escape a string for a PO quoted literal
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}
