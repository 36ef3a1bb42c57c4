use crate::extractors::base::{BaseExtractor, Span, TokenKind};
use tree_sitter::Node;

use super::helpers::HTMLHelpers;

/// html.elements.<tag> and html.elements.<tag>.<attribute> tokens
pub(super) struct ElementExtractor;

impl ElementExtractor {
    /// Emit the element token, then one token per attribute
    ///
    /// Returns the tag name so callers can special-case script/style bodies.
    pub(super) fn extract_element(base: &mut BaseExtractor, node: Node) -> Option<String> {
        let tag_name = HTMLHelpers::extract_tag_name(base, &node)?;
        let element_span = Span::from_node(&node);

        base.push_token(
            format!("html.elements.{}", tag_name),
            TokenKind::HtmlElement,
            Some(element_span),
        );

        if let Some(container) = HTMLHelpers::find_tag_container(base, &node) {
            for attr in base.find_children_by_type(&container, "attribute") {
                let (Some(attr_name), _) = HTMLHelpers::extract_attribute_name_value(base, &attr)
                else {
                    continue;
                };
                // tree-sitter always gives the attribute node a range; a zero-width one
                // means it was synthesized during error recovery
                let span = if attr.start_byte() < attr.end_byte() {
                    Span::from_node(&attr)
                } else {
                    element_span
                };
                base.push_token(
                    format!("html.elements.{}.{}", tag_name, attr_name),
                    TokenKind::HtmlAttribute,
                    Some(span),
                );
            }
        }

        Some(tag_name)
    }
}
