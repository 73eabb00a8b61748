//! Line-oriented `.ink` parsing
//!
//! Produces a [`Story`] tree with 1-based line/character positions for every
//! text node. `INCLUDE` paths resolve against an explicit include root, never
//! the process working directory.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use super::{DebugMetadata, Node, Scope, Story, Text};
use crate::error::{Error, Result};

/// Keywords that start a declaration line (treated as code)
const DECLARATION_KEYWORDS: [&str; 4] = ["VAR", "CONST", "LIST", "EXTERNAL"];

/// Parser for `.ink` script files
#[derive(Debug, Clone)]
pub struct InkParser {
    include_root: PathBuf,
}

impl InkParser {
    /// Create a parser resolving `INCLUDE` paths relative to `include_root`
    pub fn new(include_root: impl Into<PathBuf>) -> Self {
        Self {
            include_root: include_root.into(),
        }
    }

    /// Parse a script file and every file it includes
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if a file cannot be loaded or contains a
    /// syntax problem, and [`Error::IncludeNotFound`] for a missing include.
    pub fn parse_file(&self, path: &Path) -> Result<Story> {
        let mut included = HashSet::new();
        included.insert(identity(path));
        self.parse_file_inner(path, &mut included)
    }

    /// Parse script source that was already loaded, as if read from `file`
    ///
    /// # Errors
    ///
    /// Same as [`InkParser::parse_file`].
    pub fn parse_str(&self, source: &str, file: &Path) -> Result<Story> {
        let mut included = HashSet::new();
        included.insert(identity(file));
        self.parse_source(source, file, &mut included)
    }

    fn parse_file_inner(&self, path: &Path, included: &mut HashSet<PathBuf>) -> Result<Story> {
        let source = fs::read_to_string(path).map_err(|e| Error::Parse {
            file: path.to_path_buf(),
            line: 0,
            message: format!("failed to load ink file: {e}"),
        })?;
        self.parse_source(&source, path, included)
    }

    fn parse_source(
        &self,
        source: &str,
        file: &Path,
        included: &mut HashSet<PathBuf>,
    ) -> Result<Story> {
        tracing::debug!("Parsing {}", file.display());

        let mut builder = StoryBuilder::default();
        let mut block_comment_from: Option<usize> = None;

        for (index, raw_line) in source.lines().enumerate() {
            let line = index + 1;
            let chars: Vec<char> = raw_line.chars().collect();
            let mut pos = 0;

            if block_comment_from.is_some() {
                match find_seq(&chars, 0, &['*', '/']) {
                    Some(end) => {
                        block_comment_from = None;
                        pos = end + 2;
                    }
                    None => continue,
                }
            }

            while pos < chars.len() && chars[pos].is_whitespace() {
                pos += 1;
            }
            let rest: String = chars[pos..].iter().collect();

            if rest.is_empty() || rest.starts_with("//") || rest.starts_with("TODO:") {
                continue;
            }

            if let Some(include) = strip_keyword(&rest, "INCLUDE") {
                let include = strip_line_comment(include).trim();
                let node = self.parse_include(include, file, line, included)?;
                if let Some(node) = node {
                    builder.current().push(node);
                }
                continue;
            }

            if rest.starts_with("==") {
                let name = header_name(&rest, true);
                if name.is_empty() {
                    return Err(parse_error(file, line, "knot header without a name"));
                }
                builder.open_knot(name);
                continue;
            }

            if rest.starts_with('=') {
                let name = header_name(&rest, false);
                if name.is_empty() {
                    return Err(parse_error(file, line, "stitch header without a name"));
                }
                builder.open_stitch(name);
                continue;
            }

            if rest.starts_with('~') {
                let code = code_text(&chars, pos + 1, file, line);
                builder.current().push(Node::Code(code));
                continue;
            }

            if DECLARATION_KEYWORDS
                .iter()
                .any(|keyword| strip_keyword(&rest, keyword).is_some())
            {
                let code = code_text(&chars, pos, file, line);
                builder.current().push(Node::Code(code));
                continue;
            }

            let start = skip_line_prefix(&chars, pos);
            let mut lexer = LineLexer::new(&chars, file, line);
            let open_comment = lexer.run(start)?;
            if open_comment {
                block_comment_from = Some(line);
            }

            let nodes = lexer.finish();
            if !nodes.is_empty() {
                let content = builder.current();
                content.extend(nodes);
                content.push(Node::EndOfLine);
            }
        }

        if let Some(line) = block_comment_from {
            return Err(parse_error(file, line, "unterminated block comment"));
        }

        Ok(Story {
            file: file.to_path_buf(),
            content: builder.finish(),
        })
    }

    fn parse_include(
        &self,
        include: &str,
        file: &Path,
        line: usize,
        included: &mut HashSet<PathBuf>,
    ) -> Result<Option<Node>> {
        if include.is_empty() {
            return Err(parse_error(file, line, "INCLUDE without a file name"));
        }

        let path = self.include_root.join(include);
        if !path.is_file() {
            return Err(Error::IncludeNotFound {
                file: file.to_path_buf(),
                line,
                include: include.to_string(),
            });
        }

        if !included.insert(identity(&path)) {
            tracing::warn!(
                "Skipping repeated include of \"{}\" in {} line {}",
                include,
                file.display(),
                line
            );
            return Ok(None);
        }

        let story = self.parse_file_inner(&path, included)?;
        Ok(Some(Node::Include(story)))
    }
}

/// Knot/stitch nesting while a file is being read
#[derive(Default)]
struct StoryBuilder {
    root: Vec<Node>,
    knot: Option<Scope>,
    stitch: Option<Scope>,
}

impl StoryBuilder {
    /// The innermost open container
    fn current(&mut self) -> &mut Vec<Node> {
        match (&mut self.stitch, &mut self.knot) {
            (Some(stitch), _) => &mut stitch.content,
            (None, Some(knot)) => &mut knot.content,
            (None, None) => &mut self.root,
        }
    }

    fn open_knot(&mut self, name: String) {
        self.close_knot();
        self.knot = Some(Scope::new(name));
    }

    fn open_stitch(&mut self, name: String) {
        self.close_stitch();
        self.stitch = Some(Scope::new(name));
    }

    fn close_stitch(&mut self) {
        if let Some(stitch) = self.stitch.take() {
            self.current().push(Node::Stitch(stitch));
        }
    }

    fn close_knot(&mut self) {
        self.close_stitch();
        if let Some(knot) = self.knot.take() {
            self.root.push(Node::Knot(knot));
        }
    }

    fn finish(mut self) -> Vec<Node> {
        self.close_knot();
        self.root
    }
}

/// Splits one content line into text, tag, code and divert nodes
struct LineLexer<'a> {
    chars: &'a [char],
    file: &'a Path,
    line: usize,
    nodes: Vec<Node>,
    buf: String,
    buf_start: Option<usize>,
}

impl<'a> LineLexer<'a> {
    fn new(chars: &'a [char], file: &'a Path, line: usize) -> Self {
        Self {
            chars,
            file,
            line,
            nodes: Vec::new(),
            buf: String::new(),
            buf_start: None,
        }
    }

    /// Lex from `start` to the end of the line.
    ///
    /// Returns `true` when the line opens a block comment that is not closed.
    fn run(&mut self, start: usize) -> Result<bool> {
        let chars = self.chars;
        let len = chars.len();
        let mut i = start;

        while i < len {
            let c = chars[i];
            let next = chars.get(i + 1).copied();

            match (c, next) {
                ('\\', Some(escaped)) => {
                    self.buf_start.get_or_insert(i);
                    self.buf.push(escaped);
                    i += 2;
                }
                ('/', Some('/')) => {
                    self.flush(i);
                    return Ok(false);
                }
                ('/', Some('*')) => {
                    self.flush(i);
                    match find_seq(chars, i + 2, &['*', '/']) {
                        Some(end) => i = end + 2,
                        None => return Ok(true),
                    }
                }
                ('#', _) => {
                    self.flush(i);
                    i = self.tag(i + 1);
                }
                ('{', _) => {
                    self.flush(i);
                    i = self.inline_expression(i)?;
                }
                ('-', Some('>')) | ('<', Some('-')) => {
                    self.flush(i);
                    i = self.divert(i + 2);
                }
                ('<', Some('>')) => {
                    self.flush(i);
                    self.nodes.push(Node::Glue);
                    i += 2;
                }
                ('[' | ']', _) => {
                    self.flush(i);
                    i += 1;
                }
                _ => {
                    self.buf_start.get_or_insert(i);
                    self.buf.push(c);
                    i += 1;
                }
            }
        }

        self.flush(len);
        Ok(false)
    }

    fn finish(self) -> Vec<Node> {
        self.nodes
    }

    /// Emit buffered text ending just before `end` (0-based char index)
    fn flush(&mut self, end: usize) {
        if let Some(start) = self.buf_start.take() {
            let text = std::mem::take(&mut self.buf);
            let node = Node::Text(self.text(text, start, end));
            self.nodes.push(node);
        }
    }

    fn text(&self, text: String, start: usize, end: usize) -> Text {
        Text {
            text,
            meta: DebugMetadata {
                file: self.file.to_path_buf(),
                start_line: self.line,
                end_line: self.line,
                start_char: start + 1,
                end_char: end + 1,
            },
        }
    }

    /// Tag text runs up to the next tag, bracket, expression, glue, divert or comment
    fn tag(&mut self, start: usize) -> usize {
        let chars = self.chars;
        let mut end = start;
        while end < chars.len() && !ends_tag_value(chars[end], chars.get(end + 1).copied()) {
            end += 1;
        }

        self.nodes.push(Node::TagStart);
        if end > start {
            let value: String = chars[start..end].iter().collect();
            let node = Node::Text(self.text(value, start, end));
            self.nodes.push(node);
        }
        self.nodes.push(Node::TagEnd);
        end
    }

    /// `{ ... }` with nesting; the body is kept as code text
    fn inline_expression(&mut self, open: usize) -> Result<usize> {
        let chars = self.chars;
        let mut depth = 0usize;
        for (offset, &c) in chars[open..].iter().enumerate() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        let close = open + offset;
                        let body: String = chars[open + 1..close].iter().collect();
                        let inner = vec![Node::Text(self.text(body, open + 1, close))];
                        self.nodes.push(Node::Code(inner));
                        return Ok(close + 1);
                    }
                }
                _ => {}
            }
        }
        Err(parse_error(
            self.file,
            self.line,
            "unterminated inline expression",
        ))
    }

    fn divert(&mut self, start: usize) -> usize {
        let chars = self.chars;
        let mut i = start;
        while i < chars.len() && chars[i].is_whitespace() {
            i += 1;
        }
        let target_start = i;
        while i < chars.len() && (chars[i].is_alphanumeric() || matches!(chars[i], '_' | '.')) {
            i += 1;
        }
        let target: String = chars[target_start..i].iter().collect();
        self.nodes.push(Node::Divert(target));
        i
    }
}

/// Whether `c` (followed by `next`) ends the value of a `#` tag
pub(crate) fn ends_tag_value(c: char, next: Option<char>) -> bool {
    matches!(
        (c, next),
        ('#' | ']' | '{', _)
            | ('/', Some('/' | '*'))
            | ('-', Some('>'))
            | ('<', Some('-' | '>'))
    )
}

/// Code lines hold their source as a single text node
fn code_text(chars: &[char], start: usize, file: &Path, line: usize) -> Vec<Node> {
    let body: String = chars[start.min(chars.len())..].iter().collect();
    vec![Node::Text(Text {
        text: body,
        meta: DebugMetadata {
            file: file.to_path_buf(),
            start_line: line,
            end_line: line,
            start_char: start + 1,
            end_char: chars.len() + 1,
        },
    })]
}

/// Skip choice bullets, gather dashes and a `(label)`
fn skip_line_prefix(chars: &[char], mut pos: usize) -> usize {
    loop {
        while pos < chars.len() && chars[pos].is_whitespace() {
            pos += 1;
        }
        match (chars.get(pos).copied(), chars.get(pos + 1).copied()) {
            (Some('*' | '+'), _) => pos += 1,
            (Some('-'), next) if next != Some('>') => pos += 1,
            _ => break,
        }
    }

    if chars.get(pos) == Some(&'(') {
        if let Some(close) = chars[pos..].iter().position(|&c| c == ')') {
            pos += close + 1;
            while pos < chars.len() && chars[pos].is_whitespace() {
                pos += 1;
            }
        }
    }
    pos
}

/// Name from `== knot ==`, `=== function name(args) ===` or `= stitch`
fn header_name(rest: &str, is_knot: bool) -> String {
    let mut body = rest.trim_start_matches('=').trim_start();
    if is_knot {
        if let Some(after) = strip_keyword(body, "function") {
            body = after.trim_start();
        }
    }
    body.chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

/// `rest` minus `keyword` when the keyword is followed by whitespace
fn strip_keyword<'a>(rest: &'a str, keyword: &str) -> Option<&'a str> {
    let after = rest.strip_prefix(keyword)?;
    after
        .starts_with(char::is_whitespace)
        .then_some(after)
}

fn strip_line_comment(text: &str) -> &str {
    text.find("//").map_or(text, |pos| &text[..pos])
}

fn find_seq(chars: &[char], from: usize, seq: &[char]) -> Option<usize> {
    if from >= chars.len() {
        return None;
    }
    chars[from..]
        .windows(seq.len())
        .position(|window| window == seq)
        .map(|offset| from + offset)
}

fn identity(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

fn parse_error(file: &Path, line: usize, message: &str) -> Error {
    Error::Parse {
        file: file.to_path_buf(),
        line,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> Story {
        InkParser::new(".")
            .parse_str(source, Path::new("test.ink"))
            .expect("parse")
    }

    fn text_values(story: &Story) -> Vec<&str> {
        fn collect<'a>(nodes: &'a [Node], out: &mut Vec<&'a str>) {
            for node in nodes {
                match node {
                    Node::Text(text) => out.push(&text.text),
                    Node::Knot(scope) | Node::Stitch(scope) => collect(&scope.content, out),
                    Node::Code(inner) => collect(inner, out),
                    Node::Include(story) => collect(&story.content, out),
                    Node::TagStart | Node::TagEnd | Node::EndOfLine | Node::Divert(_) | Node::Glue => {}
                }
            }
        }

        let mut out = Vec::new();
        collect(&story.content, &mut out);
        out
    }

    #[test]
    fn test_plain_line_positions() {
        let story = parse("Hello world");
        let Node::Text(text) = &story.content[0] else {
            panic!("expected text, got {:?}", story.content[0]);
        };
        assert_eq!(text.text, "Hello world");
        assert_eq!(text.meta.start_line, 1);
        assert_eq!(text.meta.start_char, 1);
        assert_eq!(text.meta.end_char, 12);
        assert_eq!(story.content[1], Node::EndOfLine);
    }

    #[test]
    fn test_tags_follow_text() {
        let story = parse("Hi there #id:OLD1 #happy");
        assert_eq!(text_values(&story), vec!["Hi there ", "id:OLD1 ", "happy"]);
        assert_eq!(story.content[1], Node::TagStart);
        assert_eq!(story.content[3], Node::TagEnd);
        assert_eq!(story.content[4], Node::TagStart);
    }

    #[test]
    fn test_tag_value_stops_at_expression_and_glue() {
        let story = parse("Hello #id:a_9PGJ{name}");
        assert_eq!(text_values(&story), vec!["Hello ", "id:a_9PGJ", "name"]);
        assert!(matches!(story.content[4], Node::Code(_)));

        let story = parse("Join #id:a_ZHCF<>");
        assert_eq!(text_values(&story), vec!["Join ", "id:a_ZHCF"]);
        assert_eq!(story.content[4], Node::Glue);
    }

    #[test]
    fn test_knots_and_stitches_nest() {
        let story = parse("== Start ==\nOpening\n= Intro\nInside\n=== function greet(x) ===\n~ return x");
        assert_eq!(story.content.len(), 2);

        let Node::Knot(start) = &story.content[0] else {
            panic!("expected knot");
        };
        assert_eq!(start.name, "Start");
        let Some(Node::Stitch(intro)) = start.content.last() else {
            panic!("expected stitch");
        };
        assert_eq!(intro.name, "Intro");

        let Node::Knot(greet) = &story.content[1] else {
            panic!("expected knot");
        };
        assert_eq!(greet.name, "greet");
        assert!(matches!(greet.content[0], Node::Code(_)));
    }

    #[test]
    fn test_code_lines_and_expressions() {
        let story = parse("VAR mood = \"calm\"\n~ mood = \"angry\"\nHello {name}, welcome");
        assert!(matches!(story.content[0], Node::Code(_)));
        assert!(matches!(story.content[1], Node::Code(_)));
        assert!(matches!(story.content[3], Node::Code(_)));
        assert_eq!(
            text_values(&story),
            vec!["VAR mood = \"calm\"", " mood = \"angry\"", "Hello ", "name", ", welcome"]
        );
    }

    #[test]
    fn test_choice_prefix_and_brackets() {
        let story = parse("* (pick) [Go left] -> left");
        assert_eq!(text_values(&story), vec!["Go left", " "]);
        assert!(story.content.contains(&Node::Divert("left".to_string())));

        let Node::Text(choice) = &story.content[0] else {
            panic!("expected text");
        };
        assert_eq!(choice.meta.start_char, 11);
        assert_eq!(choice.meta.end_char, 18);
    }

    #[test]
    fn test_comments_end_text() {
        let story = parse("Hello // note\n/* block\nstill comment */ After\nTODO: rewrite");
        assert_eq!(text_values(&story), vec!["Hello ", "After"]);
    }

    #[test]
    fn test_escape_keeps_hash_as_text() {
        let story = parse("Number \\#1 fan");
        assert_eq!(text_values(&story), vec!["Number #1 fan"]);
    }

    #[test]
    fn test_unterminated_expression_is_error() {
        let err = InkParser::new(".")
            .parse_str("Hello {name", Path::new("bad.ink"))
            .unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, .. }));
    }

    #[test]
    fn test_unterminated_block_comment_is_error() {
        let err = InkParser::new(".")
            .parse_str("Hi\n/* never closed\nstill", Path::new("bad.ink"))
            .unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
    }

    #[test]
    fn test_knot_without_name_is_error() {
        let err = InkParser::new(".")
            .parse_str("=== ===", Path::new("bad.ink"))
            .unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn test_include_resolves_from_root() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("main.ink"), "INCLUDE part.ink\nMain line").expect("write");
        fs::write(dir.path().join("part.ink"), "Part line").expect("write");

        let parser = InkParser::new(dir.path());
        let story = parser.parse_file(&dir.path().join("main.ink")).expect("parse");

        let Node::Include(part) = &story.content[0] else {
            panic!("expected include");
        };
        assert_eq!(part.file, dir.path().join("part.ink"));
        assert_eq!(text_values(&story), vec!["Part line", "Main line"]);
    }

    #[test]
    fn test_include_cycle_is_skipped() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("a.ink"), "INCLUDE b.ink\nA").expect("write");
        fs::write(dir.path().join("b.ink"), "INCLUDE a.ink\nB").expect("write");

        let story = InkParser::new(dir.path())
            .parse_file(&dir.path().join("a.ink"))
            .expect("parse");
        assert_eq!(text_values(&story), vec!["B", "A"]);
    }

    #[test]
    fn test_missing_include_is_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("main.ink"), "INCLUDE gone.ink").expect("write");

        let err = InkParser::new(dir.path())
            .parse_file(&dir.path().join("main.ink"))
            .unwrap_err();
        assert!(matches!(err, Error::IncludeNotFound { line: 1, .. }));
    }
}
