//! Tag scanning
//!
//! Looks at the siblings around a text node to find an authored `#id:` tag
//! and to tell content text apart from tag values and code.

use super::types::Ancestor;
use crate::formats::ink::Node;

/// Reserved prefix of the tag value carrying a localization ID
pub const TAG_LOC: &str = "id:";

/// ID from an `id:` tag following the text at `index`, before the line ends
///
/// Tag depth is tracked through start/end markers; the first tag value that
/// starts with [`TAG_LOC`] wins. Only the leading `[A-Za-z0-9_]` run of the
/// value is the ID.
pub fn find_existing_id(siblings: &[Node], index: usize) -> Option<String> {
    tags_after_text(siblings, index)
        .into_iter()
        .find_map(|tag| tag.strip_prefix(TAG_LOC).map(leading_id))
        .filter(|id| !id.is_empty())
}

fn leading_id(value: &str) -> String {
    value
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// Trimmed values of the tags following the text at `index` on its line
fn tags_after_text(siblings: &[Node], index: usize) -> Vec<&str> {
    let mut tags = Vec::new();
    let mut in_tag = 0i32;

    for sibling in siblings.iter().skip(index + 1) {
        match sibling {
            Node::EndOfLine => break,
            Node::TagStart => in_tag += 1,
            Node::TagEnd => in_tag -= 1,
            Node::Text(text) if in_tag > 0 => tags.push(text.text.trim()),
            _ => {}
        }
    }
    tags
}

/// Whether the text at `index` is itself the value of a tag
pub fn is_annotation_text(siblings: &[Node], index: usize) -> bool {
    let mut in_tag = 0i32;
    for sibling in siblings.iter().take(index) {
        match sibling {
            Node::TagStart => in_tag += 1,
            Node::TagEnd => in_tag -= 1,
            _ => {}
        }
    }
    in_tag > 0
}

/// Whether a node with this ancestry sits inside logic or an expression
pub fn is_code_text(ancestry: &[Ancestor<'_>]) -> bool {
    ancestry.iter().any(|ancestor| matches!(ancestor, Ancestor::Code))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::formats::ink::InkParser;

    fn line(source: &str) -> Vec<Node> {
        InkParser::new(".")
            .parse_str(source, Path::new("scan.ink"))
            .expect("parse")
            .content
    }

    #[test]
    fn test_finds_id_tag() {
        let nodes = line("Hi there #happy #id:OLD1");
        assert_eq!(find_existing_id(&nodes, 0), Some("OLD1".to_string()));
    }

    #[test]
    fn test_no_tag() {
        let nodes = line("Hi there #happy");
        assert_eq!(find_existing_id(&nodes, 0), None);
    }

    #[test]
    fn test_stops_at_end_of_line() {
        let nodes = line("First line\n#id:NEXT");
        assert_eq!(find_existing_id(&nodes, 0), None);
    }

    #[test]
    fn test_id_stops_at_non_identifier_char() {
        let nodes = line("Hi there #id:b_DPOX-1");
        assert_eq!(find_existing_id(&nodes, 0), Some("b_DPOX".to_string()));
    }

    #[test]
    fn test_id_before_expression() {
        let nodes = line("Hello #id:a_9PGJ {name}");
        assert_eq!(find_existing_id(&nodes, 0), Some("a_9PGJ".to_string()));
    }

    #[test]
    fn test_empty_id_is_ignored() {
        let nodes = line("Hello #id:");
        assert_eq!(find_existing_id(&nodes, 0), None);
    }

    #[test]
    fn test_tag_value_is_annotation_text() {
        let nodes = line("Hello #id:A1");
        assert!(!is_annotation_text(&nodes, 0));
        assert!(matches!(nodes[2], Node::Text(_)));
        assert!(is_annotation_text(&nodes, 2));
    }

    #[test]
    fn test_code_ancestry() {
        assert!(is_code_text(&[Ancestor::Knot("Start"), Ancestor::Code]));
        assert!(!is_code_text(&[Ancestor::Knot("Start"), Ancestor::Stitch("Intro")]));
    }
}
