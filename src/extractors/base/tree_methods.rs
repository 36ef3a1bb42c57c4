// Tree navigation methods for BaseExtractor

use super::extractor::BaseExtractor;
use tree_sitter::{Node, Parser, Tree};
use tracing::warn;

impl<'a> BaseExtractor<'a> {
    /// Parse `text` with the grammar of this extractor's language
    ///
    /// Returns None when the grammar cannot be loaded or the parser gives up;
    /// callers fall back to pattern scanning in that case.
    pub fn parse(&self, text: &str) -> Option<Tree> {
        let mut parser = Parser::new();
        if let Err(e) = parser.set_language(&self.language.tree_sitter_language()) {
            warn!("Failed to set parser language for {}: {}", self.language, e);
            return None;
        }
        parser.parse(text, None)
    }

    /// Walk tree in pre-order with visitor, charging every node against the budget
    ///
    /// Uses a tree cursor instead of recursion so deeply nested input (minified
    /// bundles) cannot exhaust the stack.
    pub fn walk_tree<'t, F>(&mut self, root: Node<'t>, visitor: &mut F)
    where
        F: FnMut(&mut BaseExtractor<'a>, Node<'t>),
    {
        let mut cursor = root.walk();
        loop {
            if !self.charge_node() {
                return;
            }
            visitor(self, cursor.node());

            if cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return;
                }
            }
        }
    }

    /// Check if node has error
    pub fn has_error(&self, node: &Node) -> bool {
        node.has_error() || node.kind() == "ERROR"
    }

    /// Find first child by type
    pub fn find_child_by_type<'t>(&self, node: &Node<'t>, child_type: &str) -> Option<Node<'t>> {
        let mut cursor = node.walk();
        let found = node.children(&mut cursor).find(|child| child.kind() == child_type);
        found
    }

    /// Find first child by multiple types
    pub fn find_child_by_types<'t>(&self, node: &Node<'t>, types: &[&str]) -> Option<Node<'t>> {
        let mut cursor = node.walk();
        let found = node
            .children(&mut cursor)
            .find(|child| types.contains(&child.kind()));
        found
    }

    /// Find children by type
    pub fn find_children_by_type<'t>(&self, node: &Node<'t>, child_type: &str) -> Vec<Node<'t>> {
        let mut cursor = node.walk();
        let children = node
            .children(&mut cursor)
            .filter(|child| child.kind() == child_type)
            .collect();
        children
    }
}
