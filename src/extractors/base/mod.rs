// Base Extractor Types and Traits
//
// - types.rs: Token, Span, TokenKind, ExtractorConfig
// - extractor.rs: BaseExtractor implementation (token collection, dedupe, node budget)
// - tree_methods.rs: Parsing, tree navigation and traversal methods

pub mod extractor;
pub mod tree_methods;
pub mod types;

// Re-export key types for external use
pub use extractor::BaseExtractor;
pub use types::{ExtractorConfig, Span, Token, TokenKind};
