use crate::extractors::base::{BaseExtractor, ExtractorConfig, Span, Token};
use crate::extractors::css::CSSExtractor;
use crate::extractors::javascript::JavaScriptExtractor;
use crate::language::LanguageKind;
use tree_sitter::Node;

use super::helpers::HTMLHelpers;

/// `type` values whose script body is JavaScript
const SCRIPT_TYPES: &[&str] = &[
    "",
    "module",
    "text/javascript",
    "application/javascript",
    "text/ecmascript",
    "application/ecmascript",
];

/// Inline script and style bodies
pub(super) struct ScriptStyleExtractor;

impl ScriptStyleExtractor {
    /// Scan an inline `<script>` body as JavaScript (data blocks such as
    /// `type="application/ld+json"` are skipped)
    pub(super) fn extract_script_body(base: &mut BaseExtractor, node: Node) {
        if let Some(script_type) = HTMLHelpers::attribute_value(base, &node, "type") {
            let script_type = script_type.trim().to_ascii_lowercase();
            if !SCRIPT_TYPES.contains(&script_type.as_str()) {
                return;
            }
        }
        Self::extract_embedded(base, node, LanguageKind::JavaScript);
    }

    /// Scan an inline `<style>` body as CSS
    pub(super) fn extract_style_body(base: &mut BaseExtractor, node: Node) {
        Self::extract_embedded(base, node, LanguageKind::Css);
    }

    fn extract_embedded(base: &mut BaseExtractor, node: Node, language: LanguageKind) {
        let Some(raw_text) = base.find_child_by_type(&node, "raw_text") else {
            return;
        };
        let content = base.content;
        let Some(body) = content.get(raw_text.start_byte()..raw_text.end_byte()) else {
            return;
        };
        if body.trim().is_empty() {
            return;
        }

        // Embedded bodies share the document's node budget
        let remaining = base.remaining_budget();
        if remaining == 0 {
            return;
        }
        let config = ExtractorConfig { max_nodes: remaining };
        let (tokens, visited): (Vec<Token>, usize) = if language.is_script() {
            JavaScriptExtractor::new(language, body, config).extract_tokens_counted()
        } else {
            CSSExtractor::new(body, config).extract_tokens_counted()
        };
        base.charge_nodes(visited);

        let origin = raw_text.start_position();
        let origin_byte = raw_text.start_byte();
        for token in tokens {
            let span = token.span.map(|span: Span| span.shifted(origin, origin_byte));
            base.push_token(token.name, token.kind, span);
        }
    }
}
