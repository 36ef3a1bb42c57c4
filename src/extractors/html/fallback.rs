use crate::extractors::base::{Span, Token, TokenKind};
use once_cell::sync::Lazy;
use regex::Regex;

static OPENING_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<([a-zA-Z][a-zA-Z0-9\-]*)").expect("opening tag pattern is valid"));

/// Fallback extraction when normal parsing fails
pub(super) struct FallbackExtractor;

impl FallbackExtractor {
    /// Emit html.elements.<tag> for every opening tag found by pattern matching
    pub(super) fn extract_elements_with_regex(content: &str) -> Vec<Token> {
        OPENING_TAG
            .captures_iter(content)
            .filter_map(|captures| {
                let whole = captures.get(0)?;
                let tag_name = captures.get(1)?;
                Some(Token::new(
                    format!("html.elements.{}", tag_name.as_str().to_ascii_lowercase()),
                    TokenKind::HtmlElement,
                    Some(Span::from_byte_range(content, whole.start(), whole.end())),
                ))
            })
            .collect()
    }
}
