// Token resolution
//
// Maps token text to a canonical feature id by running independent matchers in
// a fixed order. The first matcher that finds something wins; each matcher scans
// ids in sorted order so the answer is deterministic.

use crate::features::index::{normalize, FeatureIndex};

/// Token text in both raw (trimmed) and normalized forms
#[derive(Debug, Clone, Copy)]
pub struct Query<'q> {
    pub raw: &'q str,
    pub normalized: &'q str,
}

/// One resolution strategy
pub trait Matcher: Send + Sync {
    fn name(&self) -> &'static str;
    fn find(&self, index: &FeatureIndex, query: Query<'_>) -> Option<String>;
}

/// Exact id, then case-insensitive id
pub struct IdMatcher;

impl Matcher for IdMatcher {
    fn name(&self) -> &'static str {
        "id"
    }

    fn find(&self, index: &FeatureIndex, query: Query<'_>) -> Option<String> {
        if index.contains(query.raw) {
            return Some(query.raw.to_string());
        }
        index.id_ignoring_case(query.normalized).map(str::to_string)
    }
}

/// caniuse alias equality
pub struct AliasMatcher;

impl Matcher for AliasMatcher {
    fn name(&self) -> &'static str {
        "caniuse"
    }

    fn find(&self, index: &FeatureIndex, query: Query<'_>) -> Option<String> {
        index
            .lookup_keys()
            .find(|(_, keys)| keys.aliases.iter().any(|alias| alias == query.normalized))
            .map(|(id, _)| id.to_string())
    }
}

/// Compat key equality, or a match on a dot boundary at the end of the key
///
/// `flat` matches `javascript.builtins.Array.flat` but not `api.Arrayflat`.
pub struct CompatKeyMatcher;

impl Matcher for CompatKeyMatcher {
    fn name(&self) -> &'static str {
        "compat"
    }

    fn find(&self, index: &FeatureIndex, query: Query<'_>) -> Option<String> {
        index
            .lookup_keys()
            .find(|(_, keys)| {
                keys.compat_keys
                    .iter()
                    .any(|key| compat_key_matches(key, query.normalized))
            })
            .map(|(id, _)| id.to_string())
    }
}

fn compat_key_matches(key: &str, token: &str) -> bool {
    if key == token {
        return true;
    }
    key.len() > token.len()
        && key.ends_with(token)
        && key.as_bytes()[key.len() - token.len() - 1] == b'.'
}

static KEY_MATCHERS: [&dyn Matcher; 3] = [&IdMatcher, &AliasMatcher, &CompatKeyMatcher];
static COMPAT_MATCHERS: [&dyn Matcher; 1] = [&CompatKeyMatcher];

/// Resolver over a borrowed index snapshot
#[derive(Clone, Copy)]
pub struct Resolver<'i> {
    index: &'i FeatureIndex,
}

impl<'i> Resolver<'i> {
    pub fn new(index: &'i FeatureIndex) -> Self {
        Self { index }
    }

    /// Id, then caniuse alias, then compat key
    pub fn resolve_by_key(&self, token: &str) -> Option<String> {
        self.run(&KEY_MATCHERS, token)
    }

    /// Compat key matching alone
    pub fn resolve_by_compat(&self, key: &str) -> Option<String> {
        self.run(&COMPAT_MATCHERS, key)
    }

    fn run(&self, matchers: &[&dyn Matcher], token: &str) -> Option<String> {
        let raw = token.trim();
        if raw.is_empty() {
            return None;
        }
        let normalized = normalize(raw);
        let query = Query {
            raw,
            normalized: &normalized,
        };

        matchers.iter().find_map(|matcher| {
            let found = matcher.find(self.index, query);
            if let Some(id) = &found {
                tracing::trace!("'{}' resolved to '{}' by {} matcher", raw, id, matcher.name());
            }
            found
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::index::tests::sample_index;
    use crate::features::types::Feature;

    fn feature(caniuse: &[&str], compat: &[&str]) -> Feature {
        Feature {
            caniuse: caniuse.iter().map(|s| s.to_string()).collect(),
            compat_features: compat.iter().map(|s| s.to_string()).collect(),
            ..Feature::default()
        }
    }

    fn query<'q>(raw: &'q str, normalized: &'q str) -> Query<'q> {
        Query { raw, normalized }
    }

    #[test]
    fn test_id_matcher() {
        let index = sample_index();
        assert_eq!(
            IdMatcher.find(&index, query("array-flat", "array-flat")),
            Some("array-flat".to_string())
        );
        assert_eq!(
            IdMatcher.find(&index, query("Array-Flat", "array-flat")),
            Some("array-flat".to_string())
        );
        assert_eq!(IdMatcher.find(&index, query("flat", "flat")), None);
    }

    #[test]
    fn test_alias_matcher_checks_every_alias() {
        let index = sample_index();
        assert_eq!(
            AliasMatcher.find(&index, query("flexgap", "flexgap")),
            Some("flexbox-gap".to_string())
        );
        assert_eq!(
            AliasMatcher.find(&index, query("intersectionobserver", "intersectionobserver")),
            Some("intersection-observer".to_string())
        );
        assert_eq!(AliasMatcher.find(&index, query("flat", "flat")), None);
    }

    #[test]
    fn test_compat_matcher_dot_boundary() {
        assert!(compat_key_matches("javascript.builtins.array.flat", "flat"));
        assert!(compat_key_matches("javascript.builtins.array.flat", "array.flat"));
        assert!(compat_key_matches("api.fetch", "api.fetch"));
        assert!(!compat_key_matches("api.arrayflat", "flat"));
        assert!(!compat_key_matches("flat", "api.flat"));
        assert!(!compat_key_matches("api.fetch", "fetch2"));
    }

    #[test]
    fn test_resolve_by_key_examples() {
        let index = sample_index();
        let resolver = Resolver::new(&index);

        assert_eq!(resolver.resolve_by_key("flat"), Some("array-flat".to_string()));
        assert_eq!(resolver.resolve_by_key("flatMap"), Some("array-flat".to_string()));
        assert_eq!(resolver.resolve_by_key("fetch"), Some("fetch".to_string()));
        assert_eq!(
            resolver.resolve_by_key("css.properties.display"),
            Some("display".to_string())
        );
        assert_eq!(
            resolver.resolve_by_key("html.elements.dialog"),
            Some("dialog".to_string())
        );
        assert_eq!(
            resolver.resolve_by_key("  IntersectionObserver "),
            Some("intersection-observer".to_string())
        );
        assert_eq!(resolver.resolve_by_key("definitelyNotAFeature"), None);
    }

    #[test]
    fn test_empty_token() {
        let index = sample_index();
        let resolver = Resolver::new(&index);
        assert_eq!(resolver.resolve_by_key(""), None);
        assert_eq!(resolver.resolve_by_key("   \t"), None);
        assert_eq!(resolver.resolve_by_compat(""), None);
    }

    #[test]
    fn test_first_match_in_sorted_order() {
        // array-at and string-at both end in `.at`
        let index = sample_index();
        let resolver = Resolver::new(&index);
        for _ in 0..3 {
            assert_eq!(resolver.resolve_by_key("at"), Some("array-at".to_string()));
        }
    }

    #[test]
    fn test_precedence_id_then_alias_then_compat() {
        let index = FeatureIndex::from_features(vec![
            ("zz-compat".to_string(), feature(&[], &["api.Thing.widget"])),
            ("aa-alias".to_string(), feature(&["widget"], &[])),
            ("widget".to_string(), feature(&[], &[])),
            ("mm-other".to_string(), feature(&["gadget"], &[])),
            ("gadget-compat".to_string(), feature(&[], &["api.gadget"])),
        ]);
        let resolver = Resolver::new(&index);

        assert_eq!(resolver.resolve_by_key("widget"), Some("widget".to_string()));
        assert_eq!(resolver.resolve_by_key("gadget"), Some("mm-other".to_string()));
        assert_eq!(resolver.resolve_by_compat("widget"), Some("zz-compat".to_string()));
    }

    #[test]
    fn test_resolve_by_compat_ignores_ids_and_aliases() {
        let index = sample_index();
        let resolver = Resolver::new(&index);

        assert_eq!(resolver.resolve_by_compat("dialog"), Some("dialog".to_string()));
        assert_eq!(resolver.resolve_by_compat("array-flat"), None);
        assert_eq!(resolver.resolve_by_compat("flexgap"), None);
        assert_eq!(
            resolver.resolve_by_compat("Segmenter"),
            Some("intl-segmenter".to_string())
        );
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let index = sample_index();
        let resolver = Resolver::new(&index);
        for token in ["flat", "fetch", "at", "Request", "nothing", "css.at-rules.container"] {
            assert_eq!(resolver.resolve_by_key(token), resolver.resolve_by_key(token));
        }
    }
}
