// Pattern fallback for script text the parser could not make sense of

use crate::extractors::base::{Span, Token, TokenKind};
use once_cell::sync::Lazy;
use regex::Regex;

static DOTTED_CHAIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z_$][\w$]*(?:\.[A-Za-z_$][\w$]*)+").expect("dotted chain pattern is valid")
});

/// Emit every `identifier(.identifier)+` chain in `content` as a member-access token
pub(super) fn scan_dotted_chains(content: &str) -> Vec<Token> {
    DOTTED_CHAIN
        .find_iter(content)
        .map(|m| {
            Token::new(
                m.as_str(),
                TokenKind::MemberAccess,
                Some(Span::from_byte_range(content, m.start(), m.end())),
            )
        })
        .collect()
}
