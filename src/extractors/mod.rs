//! Language Extractors Module
//!
//! Tree-sitter based extractors that turn web-platform source text into candidate
//! feature tokens with source spans.
//!
//! # Architecture
//!
//! - `base` - Token types, BaseExtractor (dedupe, node budget) and tree walking
//! - `manager` - ExtractorManager public API (language routing, word filter)
//! - Language modules: `javascript` (JS/JSX/TS/TSX), `html`, `css`

pub mod base;
pub mod manager;

pub mod css;
pub mod html;
pub mod javascript;

// Re-export the public API
pub use base::{ExtractorConfig, Span, Token, TokenKind};
pub use manager::ExtractorManager;
