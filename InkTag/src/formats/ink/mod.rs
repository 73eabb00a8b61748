//! Ink narrative script tree
//!
//! The tagging engine consumes scripts as a tree of [`Node`]s annotated with
//! source positions. [`InkParser`] builds this tree from `.ink` files; it
//! understands the subset of Ink syntax that matters for locating dialogue
//! text, tags and code, not the full language.

mod parser;

pub use parser::InkParser;
pub(crate) use parser::ends_tag_value;

use std::path::PathBuf;

/// Source position of a parsed node
///
/// Lines and characters are 1-based. `end_char` is exclusive, so the text
/// `Hello` at the start of a line spans characters 1..6.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugMetadata {
    /// File the node was parsed from
    pub file: PathBuf,
    pub start_line: usize,
    pub end_line: usize,
    pub start_char: usize,
    pub end_char: usize,
}

/// A run of authored text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub text: String,
    pub meta: DebugMetadata,
}

/// A named structural unit (knot or stitch) and everything inside it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    pub name: String,
    pub content: Vec<Node>,
}

impl Scope {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: Vec::new(),
        }
    }
}

/// One parsed node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// `== knot ==`
    Knot(Scope),
    /// `= stitch`
    Stitch(Scope),
    /// Plain text, either content or the value of a tag
    Text(Text),
    /// `#` opening a tag
    TagStart,
    /// End of a tag's text
    TagEnd,
    /// End of a source line of content
    EndOfLine,
    /// Logic, declaration or inline expression; any text inside is computed
    Code(Vec<Node>),
    /// `-> target` or `<- target`
    Divert(String),
    /// `<>`
    Glue,
    /// Content of an `INCLUDE`d file
    Include(Story),
}

/// A parsed script file, with its includes inlined
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Story {
    pub file: PathBuf,
    pub content: Vec<Node>,
}
