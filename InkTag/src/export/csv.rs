//! CSV string table
//!
//! ```csv
//! ID,Text
//! chapter1_Start_AB12,"Hello world"
//! chapter1_Start_CD34,"Say ""hi"""
//! ```

use std::io::{self, Write};

use crate::localizer::LocalizationStore;

/// Header row
pub const CSV_HEADER: &str = "ID,Text";

/// Write the table as CSV, one row per entry in store order
///
/// Text is always quoted, with embedded quotes doubled.
///
/// # Errors
/// Returns any error from the writer.
pub fn write_csv<W: Write>(store: &LocalizationStore, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "{CSV_HEADER}")?;
    for (id, text) in store.iter() {
        writeln!(writer, "{id},{}", quote(text))?;
    }
    Ok(())
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(store: &LocalizationStore) -> String {
        let mut out = Vec::new();
        write_csv(store, &mut out).expect("write");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn test_quotes_are_doubled() {
        let mut store = LocalizationStore::new();
        store.add("A1", "Say \"hi\"");
        assert_eq!(render(&store), "ID,Text\nA1,\"Say \"\"hi\"\"\"\n");
    }

    #[test]
    fn test_commas_stay_inside_quotes() {
        let mut store = LocalizationStore::new();
        store.add("f_AAAA", "Well, well");
        store.add("f_BBBB", "Done");
        assert_eq!(
            render(&store),
            "ID,Text\nf_AAAA,\"Well, well\"\nf_BBBB,\"Done\"\n"
        );
    }

    #[test]
    fn test_empty_store_has_header() {
        assert_eq!(render(&LocalizationStore::new()), "ID,Text\n");
    }
}
