//! Engine - the public facade
//!
//! Bundles the extractors with a shared, read-only [`FeatureIndex`]. The index
//! is injected at construction, so callers (and tests) choose which dataset an
//! engine sees. Cloning an engine shares the index.

use crate::extractors::{ExtractorConfig, ExtractorManager, Token};
use crate::features::{
    BaselineEvaluator, BaselineLevel, BaselineResult, FeatureIndex, FeatureIndexError,
    FeatureInfo, Resolver, SupportMap,
};
use crate::language::LanguageKind;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Engine {
    index: Arc<FeatureIndex>,
    extractors: ExtractorManager,
}

impl Engine {
    pub fn new(index: Arc<FeatureIndex>) -> Self {
        Self {
            index,
            extractors: ExtractorManager::new(),
        }
    }

    pub fn with_config(index: Arc<FeatureIndex>, config: ExtractorConfig) -> Self {
        Self {
            index,
            extractors: ExtractorManager::with_config(config),
        }
    }

    /// Load a dataset file and build an engine over it
    pub fn from_dataset_path(path: impl AsRef<Path>) -> Result<Self, FeatureIndexError> {
        Ok(Self::new(Arc::new(FeatureIndex::from_path(path)?)))
    }

    pub fn index(&self) -> &FeatureIndex {
        &self.index
    }

    pub fn extract(
        &self,
        content: &str,
        language: LanguageKind,
        word_filter: Option<&str>,
    ) -> Vec<Token> {
        self.extractors.extract(content, language, word_filter)
    }

    pub fn resolve_by_key(&self, token: &str) -> Option<String> {
        Resolver::new(&self.index).resolve_by_key(token)
    }

    pub fn resolve_by_compat(&self, key: &str) -> Option<String> {
        Resolver::new(&self.index).resolve_by_compat(key)
    }

    /// Resolve a token by key, falling back to compat keys alone
    pub fn resolve_token(&self, token: &Token) -> Option<String> {
        let resolver = Resolver::new(&self.index);
        resolver
            .resolve_by_key(&token.name)
            .or_else(|| resolver.resolve_by_compat(&token.name))
    }

    pub fn is_feature_in_baseline(
        &self,
        id: &str,
        year: Option<i32>,
        min: Option<BaselineLevel>,
    ) -> BaselineResult {
        BaselineEvaluator::new(&self.index).evaluate(id, year, min)
    }

    /// Textual year variant; `""` means no year
    pub fn is_feature_in_baseline_str(
        &self,
        id: &str,
        year: &str,
        min: Option<BaselineLevel>,
    ) -> BaselineResult {
        BaselineEvaluator::new(&self.index).evaluate_str(id, year, min)
    }

    pub fn get_feature_info(&self, id: &str) -> Option<FeatureInfo> {
        self.index.get(id).map(|feature| feature.info())
    }

    pub fn get_feature_support(&self, id: &str) -> Option<&SupportMap> {
        self.index.get(id).map(|feature| &feature.status.support)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::index::tests::sample_index;
    use crate::features::{BaselineReason, SupportValue};

    fn engine() -> Engine {
        Engine::new(Arc::new(sample_index()))
    }

    #[test]
    fn test_engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<Engine>();

        let engine = engine();
        let clone = engine.clone();
        assert!(std::ptr::eq(engine.index(), clone.index()));
    }

    #[test]
    fn test_extract_then_resolve() {
        let engine = engine();
        let tokens = engine.extract("const xs = nested.flat();", LanguageKind::JavaScript, None);

        let ids: Vec<Option<String>> = tokens.iter().map(|t| engine.resolve_token(t)).collect();
        assert!(ids.contains(&Some("array-flat".to_string())));
    }

    #[test]
    fn test_css_and_html_resolution() {
        let engine = engine();

        let css = engine.extract(".a { display: grid; }", LanguageKind::Css, None);
        assert_eq!(engine.resolve_token(&css[0]), Some("display".to_string()));

        let html = engine.extract("<dialog open></dialog>", LanguageKind::Html, None);
        let ids: Vec<String> = html.iter().filter_map(|t| engine.resolve_token(t)).collect();
        assert_eq!(ids, vec!["dialog", "dialog"]);
    }

    #[test]
    fn test_baseline_queries() {
        let engine = engine();

        let result = engine.is_feature_in_baseline("nonexistent-feature", Some(2023), None);
        assert_eq!(result.reason, BaselineReason::FeatureNotFound);

        let result = engine.is_feature_in_baseline("container-queries", Some(2023), None);
        assert!(result.in_baseline);
        assert_eq!(result.achieved_year, Some(2023));

        let result = engine.is_feature_in_baseline_str("container-queries", "2022", None);
        assert!(!result.in_baseline);
        assert_eq!(result.reason, BaselineReason::BelowThreshold);
    }

    #[test]
    fn test_feature_info_and_support() {
        let engine = engine();

        let info = engine.get_feature_info("container-queries").unwrap();
        assert_eq!(info.name.as_deref(), Some("Container queries"));
        assert!(info.description.unwrap().contains("Container queries"));
        assert_eq!(info.compatibility_keys, vec!["css.at-rules.container"]);
        assert_eq!(info.caniuse_alias, vec!["css-container-queries"]);

        let support = engine.get_feature_support("fetch").unwrap();
        assert_eq!(support.get("safari"), Some(&SupportValue::Version("10.1".to_string())));

        assert!(engine.get_feature_info("nope").is_none());
        assert!(engine.get_feature_support("nope").is_none());
    }

    #[test]
    fn test_resolve_token_prefers_key_match() {
        let engine = engine();
        let token = Token::new("fetch", crate::extractors::TokenKind::CallCallee, None);
        assert_eq!(engine.resolve_token(&token), Some("fetch".to_string()));
        assert_eq!(engine.resolve_by_compat("fetch"), Some("fetch".to_string()));
        assert_eq!(engine.resolve_by_key("Request"), Some("fetch".to_string()));
    }
}
