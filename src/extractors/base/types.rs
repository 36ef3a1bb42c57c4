// Base Extractor Types
//
// Data structures shared by every language extractor: tokens, spans, token kinds
// and the extraction configuration.

use serde::{Deserialize, Serialize};
use tree_sitter::{Node, Point};

/// Configuration for token extraction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum number of AST nodes visited per extraction call.
    /// Visitation stops (keeping the tokens found so far) once reached.
    pub max_nodes: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self { max_nodes: 200_000 }
    }
}

/// A source location range
///
/// Lines are 1-based, columns are 0-based byte columns (tree-sitter rows + 1),
/// the same convention as every other position in the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Start line number (1-based)
    pub start_line: u32,
    /// Start column number (0-based)
    pub start_column: u32,
    /// End line number (1-based)
    pub end_line: u32,
    /// End column number (0-based)
    pub end_column: u32,
    /// Start byte offset in the scanned text
    pub start_byte: u32,
    /// End byte offset in the scanned text
    pub end_byte: u32,
}

impl Span {
    pub fn from_node(node: &Node) -> Self {
        let start = node.start_position();
        let end = node.end_position();
        Self {
            start_line: (start.row + 1) as u32,
            start_column: start.column as u32,
            end_line: (end.row + 1) as u32,
            end_column: end.column as u32,
            start_byte: node.start_byte() as u32,
            end_byte: node.end_byte() as u32,
        }
    }

    /// Build a span from a byte range of `content` (used by the regex fallbacks)
    pub fn from_byte_range(content: &str, start: usize, end: usize) -> Self {
        let (start_line, start_column) = line_column_at(content, start);
        let (end_line, end_column) = line_column_at(content, end);
        Self {
            start_line,
            start_column,
            end_line,
            end_column,
            start_byte: start as u32,
            end_byte: end as u32,
        }
    }

    /// Move a span found inside an embedded fragment (e.g. an inline `<script>` body)
    /// into the coordinates of the enclosing document.
    pub fn shifted(self, origin: Point, origin_byte: usize) -> Self {
        let shift_column = |line: u32, column: u32| {
            if line == 1 {
                column + origin.column as u32
            } else {
                column
            }
        };
        Self {
            start_line: self.start_line + origin.row as u32,
            start_column: shift_column(self.start_line, self.start_column),
            end_line: self.end_line + origin.row as u32,
            end_column: shift_column(self.end_line, self.end_column),
            start_byte: self.start_byte + origin_byte as u32,
            end_byte: self.end_byte + origin_byte as u32,
        }
    }

    /// Whether a 1-based line / 0-based column position falls inside this span
    pub fn contains(&self, line: u32, column: u32) -> bool {
        let after_start =
            line > self.start_line || (line == self.start_line && column >= self.start_column);
        let before_end = line < self.end_line || (line == self.end_line && column <= self.end_column);
        after_start && before_end
    }
}

fn line_column_at(content: &str, offset: usize) -> (u32, u32) {
    let offset = offset.min(content.len());
    let before = &content.as_bytes()[..offset];
    let line = before.iter().filter(|&&b| b == b'\n').count() as u32 + 1;
    let column = match before.iter().rposition(|&b| b == b'\n') {
        Some(newline) => offset - newline - 1,
        None => offset,
    };
    (line, column as u32)
}

/// Token kinds - what syntactic position a candidate feature name came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Plain identifier (the object of a member access: `navigator` in `navigator.share`)
    Identifier,
    /// Property name of a member access, or a dotted chain from the regex fallback
    MemberAccess,
    /// Function, method or constructor being called
    CallCallee,
    /// `html.elements.<tag>`
    HtmlElement,
    /// `html.elements.<tag>.<attribute>`
    HtmlAttribute,
    /// `css.properties.<property>`
    CssProperty,
    /// `css.at-rules.<name>`
    CssAtRule,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Identifier => write!(f, "identifier"),
            TokenKind::MemberAccess => write!(f, "member_access"),
            TokenKind::CallCallee => write!(f, "call_callee"),
            TokenKind::HtmlElement => write!(f, "html_element"),
            TokenKind::HtmlAttribute => write!(f, "html_attribute"),
            TokenKind::CssProperty => write!(f, "css_property"),
            TokenKind::CssAtRule => write!(f, "css_at_rule"),
        }
    }
}

/// A candidate feature usage extracted from source text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Token {
    /// Raw name or dotted path (`flat`, `html.elements.div.class`)
    pub name: String,
    pub kind: TokenKind,
    /// Span of the enclosing expression / element / declaration
    pub span: Option<Span>,
}

impl Token {
    pub fn new(name: impl Into<String>, kind: TokenKind, span: Option<Span>) -> Self {
        Self {
            name: name.into(),
            kind,
            span,
        }
    }

    /// Word-filter test: the name equals `word` or ends with `.word`
    pub fn matches_word(&self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        self.name == word
            || (self.name.len() > word.len()
                && self.name.ends_with(word)
                && self.name.as_bytes()[self.name.len() - word.len() - 1] == b'.')
    }
}
