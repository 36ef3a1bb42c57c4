// CSS Extractor
//
// Emits feature tokens for:
// - Declarations -> css.properties.<property>
// - At-rules (@media, @import, @keyframes, @supports, @container, ...) -> css.at-rules.<name>

mod at_rules;
mod helpers;
mod properties;

use crate::extractors::base::{BaseExtractor, ExtractorConfig, Token};
use crate::language::LanguageKind;
use at_rules::AtRuleExtractor;
use helpers::CssHelpers;
use properties::PropertyExtractor;
use tracing::debug;
use tree_sitter::Node;

pub struct CSSExtractor<'a> {
    base: BaseExtractor<'a>,
}

impl<'a> CSSExtractor<'a> {
    /// The buffer is guarded before parsing: a trailing unterminated block opener
    /// (`.card {` while the user is still typing) is cut off at the last `{`.
    pub fn new(content: &'a str, config: ExtractorConfig) -> Self {
        Self {
            base: BaseExtractor::new(LanguageKind::Css, CssHelpers::guard_partial_buffer(content), config),
        }
    }

    pub fn extract_tokens(self) -> Vec<Token> {
        self.extract_tokens_counted().0
    }

    /// Tokens plus the number of AST nodes visited to find them
    pub(crate) fn extract_tokens_counted(mut self) -> (Vec<Token>, usize) {
        let content = self.base.content;
        let Some(tree) = self.base.parse(content) else {
            debug!("CSS parse produced no tree, scanning declarations");
            return (PropertyExtractor::scan_declarations(content), 0);
        };

        let root = tree.root_node();
        self.base.walk_tree(root, &mut |base, node| visit_node(base, node));

        let has_error = self.base.has_error(&root);
        let visited = self.base.visited_nodes();
        let tokens = self.base.into_tokens();
        if tokens.is_empty() && has_error {
            debug!("CSS parse recovered nothing useful, scanning declarations");
            return (PropertyExtractor::scan_declarations(content), visited);
        }
        (tokens, visited)
    }
}

fn visit_node(base: &mut BaseExtractor, node: Node) {
    match node.kind() {
        "declaration" => PropertyExtractor::extract_declaration(base, node),
        kind if AtRuleExtractor::is_at_rule(kind) => AtRuleExtractor::extract_at_rule(base, node),
        _ => {}
    }
}
