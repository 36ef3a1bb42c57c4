//! ExtractorManager - Public API for token extraction
//!
//! Routes source text to the language extractor and applies the optional word
//! filter. One routine serves both "scan the whole file" and "what feature is
//! under the cursor" callers.

use crate::extractors::base::{ExtractorConfig, Token};
use crate::extractors::css::CSSExtractor;
use crate::extractors::html::HTMLExtractor;
use crate::extractors::javascript::JavaScriptExtractor;
use crate::language::LanguageKind;

/// Manager for all language extractors
///
/// Holds only configuration; every call builds its own parser, so one manager
/// can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct ExtractorManager {
    config: ExtractorConfig,
}

impl ExtractorManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Get supported languages
    pub fn supported_languages(&self) -> Vec<&'static str> {
        LanguageKind::ALL.iter().map(|l| l.as_str()).collect()
    }

    /// Extract candidate feature tokens from `content`
    ///
    /// With `word_filter`, only tokens whose name is the word or ends in `.word`
    /// are kept, in emission order. Never fails; malformed input yields fewer tokens.
    pub fn extract(
        &self,
        content: &str,
        language: LanguageKind,
        word_filter: Option<&str>,
    ) -> Vec<Token> {
        let config = self.config.clone();
        let tokens = match language {
            LanguageKind::JavaScript
            | LanguageKind::Jsx
            | LanguageKind::TypeScript
            | LanguageKind::Tsx => JavaScriptExtractor::new(language, content, config).extract_tokens(),
            LanguageKind::Html => HTMLExtractor::new(content, config).extract_tokens(),
            LanguageKind::Css => CSSExtractor::new(content, config).extract_tokens(),
        };

        tracing::debug!("Extracted {} tokens from {} source", tokens.len(), language);

        match word_filter {
            Some(word) => {
                let word = word.trim();
                tokens.into_iter().filter(|t| t.matches_word(word)).collect()
            }
            None => tokens,
        }
    }
}
