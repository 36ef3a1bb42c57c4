// BaseExtractor implementation
//
// Shared state for one extraction call: the scanned text, the collected tokens,
// the (name, span) dedupe set and the node budget.

use std::collections::HashSet;
use tracing::warn;
use tree_sitter::Node;

use super::types::{ExtractorConfig, Span, Token, TokenKind};
use crate::language::LanguageKind;

/// Base implementation for language extractors
pub struct BaseExtractor<'a> {
    pub language: LanguageKind,
    pub content: &'a str,
    pub tokens: Vec<Token>,
    pub config: ExtractorConfig,
    seen: HashSet<(String, Option<Span>)>,
    visited_nodes: usize,
    budget_exhausted: bool,
}

impl<'a> BaseExtractor<'a> {
    pub fn new(language: LanguageKind, content: &'a str, config: ExtractorConfig) -> Self {
        Self {
            language,
            content,
            tokens: Vec::new(),
            config,
            seen: HashSet::new(),
            visited_nodes: 0,
            budget_exhausted: false,
        }
    }

    /// Get text from a tree-sitter node
    pub fn get_node_text(&self, node: &Node) -> String {
        let start_byte = node.start_byte();
        let end_byte = node.end_byte();

        // Use byte slice but handle UTF-8 boundaries properly
        let content_bytes = self.content.as_bytes();
        if start_byte < content_bytes.len() && end_byte <= content_bytes.len() {
            String::from_utf8_lossy(&content_bytes[start_byte..end_byte]).to_string()
        } else {
            String::new()
        }
    }

    /// Record a token unless the same (name, span) pair was already emitted
    ///
    /// Returns true when the token was new.
    pub fn push_token(&mut self, name: String, kind: TokenKind, span: Option<Span>) -> bool {
        if name.is_empty() {
            return false;
        }
        if !self.seen.insert((name.clone(), span)) {
            return false;
        }
        self.tokens.push(Token { name, kind, span });
        true
    }

    /// Count one visited node against the budget; false once the budget is spent
    pub fn charge_node(&mut self) -> bool {
        if self.budget_exhausted {
            return false;
        }
        if self.visited_nodes >= self.config.max_nodes {
            self.budget_exhausted = true;
            warn!(
                "⚠️  {} extraction stopped after {} nodes, returning {} tokens found so far",
                self.language,
                self.visited_nodes,
                self.tokens.len()
            );
            return false;
        }
        self.visited_nodes += 1;
        true
    }

    /// Add nodes visited by a nested extractor working on part of this text
    pub fn charge_nodes(&mut self, count: usize) {
        self.visited_nodes += count;
    }

    /// Nodes still available to this call (and to any nested extractor)
    pub fn remaining_budget(&self) -> usize {
        if self.budget_exhausted {
            return 0;
        }
        self.config.max_nodes.saturating_sub(self.visited_nodes)
    }

    pub fn visited_nodes(&self) -> usize {
        self.visited_nodes
    }

    pub fn budget_exhausted(&self) -> bool {
        self.budget_exhausted
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }
}
