// CSS Extractor At-Rules - css.at-rules.<name> tokens

use super::helpers::CssHelpers;
use crate::extractors::base::{BaseExtractor, Span, TokenKind};
use tree_sitter::Node;

/// Statement kinds the grammar produces for at-rules; `at_rule` covers every
/// keyword without a dedicated node (@container, @layer, @font-face, @page, ...)
const AT_RULE_KINDS: &[&str] = &[
    "at_rule",
    "media_statement",
    "import_statement",
    "charset_statement",
    "namespace_statement",
    "keyframes_statement",
    "supports_statement",
    "scope_statement",
];

pub(super) struct AtRuleExtractor;

impl AtRuleExtractor {
    pub(super) fn is_at_rule(kind: &str) -> bool {
        AT_RULE_KINDS.contains(&kind)
    }

    pub(super) fn extract_at_rule(base: &mut BaseExtractor, node: Node) {
        let Some(name) = Self::extract_at_rule_name(base, &node) else {
            return;
        };
        base.push_token(
            format!("css.at-rules.{}", name),
            TokenKind::CssAtRule,
            Some(Span::from_node(&node)),
        );
    }

    /// The first child of every at-rule statement is its `@keyword` token
    fn extract_at_rule_name(base: &BaseExtractor, node: &Node) -> Option<String> {
        let keyword = base
            .find_child_by_type(node, "at_keyword")
            .or_else(|| node.child(0))?;
        CssHelpers::at_rule_name(&base.get_node_text(&keyword))
    }
}
