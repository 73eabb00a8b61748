//! JSON string table

use std::io::{self, Write};

use crate::localizer::LocalizationStore;

/// Write the table as a pretty-printed JSON object in store order
///
/// # Errors
/// Returns any error from the writer.
pub fn write_json<W: Write>(store: &LocalizationStore, writer: &mut W) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, store.entries())?;
    writeln!(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_keeps_store_order() {
        let mut store = LocalizationStore::new();
        store.add("z_LAST", "First in");
        store.add("a_FIRST", "Say \"hi\"");

        let mut out = Vec::new();
        write_json(&store, &mut out).expect("write");
        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "{\n  \"z_LAST\": \"First in\",\n  \"a_FIRST\": \"Say \\\"hi\\\"\"\n}\n"
        );
    }

    #[test]
    fn test_parses_back() {
        let mut store = LocalizationStore::new();
        store.add("f_AB12", "Ça va");

        let mut out = Vec::new();
        write_json(&store, &mut out).expect("write");
        let value: serde_json::Value = serde_json::from_slice(&out).expect("json");
        assert_eq!(value["f_AB12"], "Ça va");
    }
}
