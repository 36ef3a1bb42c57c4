//! Language Support - Shared tree-sitter language configuration
//!
//! This module provides centralized language support for the web-platform languages the
//! extractors understand. ALL language-specific tree-sitter configuration should go here
//! to avoid duplication.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Source languages accepted by the extractors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageKind {
    JavaScript,
    Jsx,
    TypeScript,
    Tsx,
    Html,
    Css,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LanguageError {
    #[error(
        "Unsupported language: '{0}'. Supported languages: javascript, jsx, typescript, tsx, html, css"
    )]
    Unsupported(String),
}

impl LanguageKind {
    pub const ALL: [LanguageKind; 6] = [
        LanguageKind::JavaScript,
        LanguageKind::Jsx,
        LanguageKind::TypeScript,
        LanguageKind::Tsx,
        LanguageKind::Html,
        LanguageKind::Css,
    ];

    /// Get the tree-sitter grammar for this language
    ///
    /// This is the SINGLE SOURCE OF TRUTH for grammar selection. JSX shares the
    /// JavaScript grammar, which parses JSX natively.
    pub fn tree_sitter_language(self) -> tree_sitter::Language {
        match self {
            LanguageKind::JavaScript | LanguageKind::Jsx => tree_sitter_javascript::LANGUAGE.into(),
            LanguageKind::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            LanguageKind::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            LanguageKind::Html => tree_sitter_html::LANGUAGE.into(),
            LanguageKind::Css => tree_sitter_css::LANGUAGE.into(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LanguageKind::JavaScript => "javascript",
            LanguageKind::Jsx => "jsx",
            LanguageKind::TypeScript => "typescript",
            LanguageKind::Tsx => "tsx",
            LanguageKind::Html => "html",
            LanguageKind::Css => "css",
        }
    }

    /// Script languages go through the JS/TS member/call visitor
    pub fn is_script(self) -> bool {
        matches!(
            self,
            LanguageKind::JavaScript | LanguageKind::Jsx | LanguageKind::TypeScript | LanguageKind::Tsx
        )
    }

    /// Detect language from file extension
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "js" | "mjs" | "cjs" => Some(LanguageKind::JavaScript),
            "jsx" => Some(LanguageKind::Jsx),
            "ts" | "mts" | "cts" => Some(LanguageKind::TypeScript),
            "tsx" => Some(LanguageKind::Tsx),
            "html" | "htm" => Some(LanguageKind::Html),
            "css" => Some(LanguageKind::Css),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

impl FromStr for LanguageKind {
    type Err = LanguageError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "javascript" | "js" => Ok(LanguageKind::JavaScript),
            "javascriptreact" | "jsx" => Ok(LanguageKind::Jsx),
            "typescript" | "ts" => Ok(LanguageKind::TypeScript),
            "typescriptreact" | "tsx" => Ok(LanguageKind::Tsx),
            "html" | "htm" => Ok(LanguageKind::Html),
            "css" => Ok(LanguageKind::Css),
            _ => Err(LanguageError::Unsupported(name.to_string())),
        }
    }
}

impl fmt::Display for LanguageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
