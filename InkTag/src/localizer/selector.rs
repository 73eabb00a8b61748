//! Text selection
//!
//! Walks a parsed story and picks the text that should be localized: not
//! blank, not a tag value, not code, from a file not already processed this
//! run, and at most one chunk per source line.

use std::collections::HashSet;

use super::scanner::{find_existing_id, is_annotation_text, is_code_text};
use super::types::{Ancestor, LocalizableSpan};
use crate::error::{Error, Result};
use crate::formats::ink::{Node, Story, Text};
use crate::utils::file_id;

/// Select the localizable spans of `story` in document order.
///
/// Text from files listed in `files_visited` is skipped. On success the files
/// this story contributed text from are added to `files_visited`.
///
/// # Errors
///
/// Returns [`Error::MultiSpanPerLine`] if two eligible texts share a line.
pub fn select_spans(
    story: &Story,
    files_visited: &mut HashSet<String>,
) -> Result<Vec<LocalizableSpan>> {
    let mut selector = Selector {
        files_visited,
        new_files: HashSet::new(),
        last_line: None,
        spans: Vec::new(),
    };

    let mut ancestry = Vec::new();
    selector.walk(&story.content, &mut ancestry)?;

    let Selector {
        files_visited,
        new_files,
        spans,
        ..
    } = selector;
    files_visited.extend(new_files);

    Ok(spans)
}

struct Selector<'v> {
    files_visited: &'v mut HashSet<String>,
    new_files: HashSet<String>,
    last_line: Option<(String, usize)>,
    spans: Vec<LocalizableSpan>,
}

impl Selector<'_> {
    fn walk<'a>(&mut self, nodes: &'a [Node], ancestry: &mut Vec<Ancestor<'a>>) -> Result<()> {
        for (index, node) in nodes.iter().enumerate() {
            match node {
                Node::Text(text) => self.visit_text(nodes, index, text, ancestry)?,
                Node::Knot(scope) => {
                    ancestry.push(Ancestor::Knot(&scope.name));
                    self.walk(&scope.content, ancestry)?;
                    ancestry.pop();
                }
                Node::Stitch(scope) => {
                    ancestry.push(Ancestor::Stitch(&scope.name));
                    self.walk(&scope.content, ancestry)?;
                    ancestry.pop();
                }
                Node::Code(inner) => {
                    ancestry.push(Ancestor::Code);
                    self.walk(inner, ancestry)?;
                    ancestry.pop();
                }
                Node::Include(included) => self.walk(&included.content, ancestry)?,
                Node::TagStart | Node::TagEnd | Node::EndOfLine | Node::Divert(_) | Node::Glue => {}
            }
        }
        Ok(())
    }

    fn visit_text(
        &mut self,
        siblings: &[Node],
        index: usize,
        text: &Text,
        ancestry: &[Ancestor<'_>],
    ) -> Result<()> {
        if text.text.trim().is_empty()
            || is_annotation_text(siblings, index)
            || is_code_text(ancestry)
        {
            return Ok(());
        }

        // Already seen through an include of an earlier file
        let file_id = file_id(&text.meta.file);
        if self.files_visited.contains(&file_id) {
            return Ok(());
        }
        self.new_files.insert(file_id.clone());

        let line = text.meta.start_line;
        if self
            .last_line
            .as_ref()
            .is_some_and(|(last_file, last)| *last_file == file_id && *last == line)
        {
            return Err(Error::MultiSpanPerLine { file_id, line });
        }
        self.last_line = Some((file_id.clone(), line));

        let span = LocalizableSpan {
            text: text.text.clone(),
            file: text.meta.file.clone(),
            file_id,
            line: text.meta.end_line,
            insert_char: text.meta.end_char.saturating_sub(1),
            scopes: ancestry
                .iter()
                .filter_map(|ancestor| ancestor.scope_name())
                .map(str::to_string)
                .collect(),
            existing_id: find_existing_id(siblings, index),
        };
        tracing::debug!(
            "Selected {}:{} {:?} (existing ID: {:?})",
            span.file_id,
            span.line,
            span.text.trim(),
            span.existing_id
        );
        self.spans.push(span);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::formats::ink::InkParser;
    use pretty_assertions::assert_eq;

    fn story(source: &str, file: &str) -> Story {
        InkParser::new(".")
            .parse_str(source, Path::new(file))
            .expect("parse")
    }

    fn select(source: &str) -> Result<Vec<LocalizableSpan>> {
        select_spans(&story(source, "chapter1.ink"), &mut HashSet::new())
    }

    #[test]
    fn test_scopes_and_positions() {
        let spans = select("== Start ==\n= Intro\nHello world").expect("select");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "Hello world");
        assert_eq!(spans[0].file_id, "chapter1");
        assert_eq!(spans[0].line, 3);
        assert_eq!(spans[0].insert_char, 11);
        assert_eq!(spans[0].scopes, vec!["Start".to_string(), "Intro".to_string()]);
        assert_eq!(spans[0].id_prefix(), "chapter1_Start_Intro_");
    }

    #[test]
    fn test_skips_tags_code_and_blank_text() {
        let source = "VAR name = \"Bob\"\n~ temp x = \"hi\"\nHello #happy #id:A1\n* [  ] -> end\n{name}";
        let spans = select(source).expect("select");
        let texts: Vec<&str> = spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["Hello "]);
        assert_eq!(spans[0].existing_id.as_deref(), Some("A1"));
    }

    #[test]
    fn test_two_chunks_on_one_line_is_error() {
        let err = select("Line one\n\nHello {name} and welcome").unwrap_err();
        assert!(matches!(
            err,
            Error::MultiSpanPerLine { ref file_id, line: 3 } if file_id == "chapter1"
        ));
    }

    #[test]
    fn test_visited_files_are_skipped() {
        let mut visited = HashSet::new();
        let first = select_spans(&story("Hello", "shared.ink"), &mut visited).expect("select");
        assert_eq!(first.len(), 1);
        assert!(visited.contains("shared"));

        let again = select_spans(&story("Hello", "shared.ink"), &mut visited).expect("select");
        assert!(again.is_empty());
    }

    #[test]
    fn test_failed_story_does_not_mark_files_visited() {
        let mut visited = HashSet::new();
        let result = select_spans(&story("A {x} B", "broken.ink"), &mut visited);
        assert!(result.is_err());
        assert!(visited.is_empty());
    }

    #[test]
    fn test_same_line_number_in_different_files_is_allowed() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("main.ink"), "INCLUDE part.ink\nMain line").expect("write");
        std::fs::write(dir.path().join("part.ink"), "\nPart line").expect("write");

        let story = InkParser::new(dir.path())
            .parse_file(&dir.path().join("main.ink"))
            .expect("parse");
        let spans = select_spans(&story, &mut HashSet::new()).expect("select");

        let found: Vec<(&str, usize)> = spans.iter().map(|s| (s.file_id.as_str(), s.line)).collect();
        assert_eq!(found, vec![("part", 2), ("main", 2)]);
    }
}
