// HTML Extractor
//
// Emits html.elements.<tag> for every element and html.elements.<tag>.<attr> for
// every attribute. Inline <script> and <style> bodies are scanned with the script
// and CSS extractors, their spans shifted into document coordinates.

use crate::extractors::base::{BaseExtractor, ExtractorConfig, Token};
use crate::language::LanguageKind;
use tracing::debug;
use tree_sitter::Node;

// Private modules
mod elements;
mod fallback;
mod helpers;
mod scripts;

use elements::ElementExtractor;
use fallback::FallbackExtractor;
use scripts::ScriptStyleExtractor;

pub struct HTMLExtractor<'a> {
    base: BaseExtractor<'a>,
}

impl<'a> HTMLExtractor<'a> {
    pub fn new(content: &'a str, config: ExtractorConfig) -> Self {
        Self {
            base: BaseExtractor::new(LanguageKind::Html, content, config),
        }
    }

    pub fn extract_tokens(mut self) -> Vec<Token> {
        let content = self.base.content;
        let Some(tree) = self.base.parse(content) else {
            debug!("HTML parse produced no tree, scanning opening tags");
            return FallbackExtractor::extract_elements_with_regex(content);
        };

        let root_node = tree.root_node();
        if root_node.child_count() == 0 {
            // Fallback extraction when normal parsing fails
            if content.trim().is_empty() {
                return Vec::new();
            }
            return FallbackExtractor::extract_elements_with_regex(content);
        }

        self.base.walk_tree(root_node, &mut |base, node| visit_node(base, node));
        self.base.into_tokens()
    }
}

fn visit_node(base: &mut BaseExtractor, node: Node) {
    match node.kind() {
        "element" => {
            ElementExtractor::extract_element(base, node);
        }
        "script_element" => {
            if ElementExtractor::extract_element(base, node).is_some() {
                ScriptStyleExtractor::extract_script_body(base, node);
            }
        }
        "style_element" => {
            if ElementExtractor::extract_element(base, node).is_some() {
                ScriptStyleExtractor::extract_style_body(base, node);
            }
        }
        _ => {}
    }
}
