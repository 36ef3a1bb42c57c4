//! Feature Index - the frozen reference dataset
//!
//! Loaded once from web-features JSON and never mutated afterwards. Features are
//! keyed by canonical id in a `BTreeMap`, so every scan the resolver performs runs
//! in lexicographic id order. Normalized lookup keys (trimmed, lowercased) are
//! computed at load time so resolution never re-normalizes dataset text.

use crate::features::types::Feature;
use serde_json::{Map, Value};
use std::collections::btree_map;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum FeatureIndexError {
    #[error("Failed to read feature dataset '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid feature dataset JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Feature dataset must be a JSON object keyed by feature id")]
    NotAnObject,
}

/// Normalized resolution keys for one feature
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct LookupKeys {
    pub aliases: Vec<String>,
    pub compat_keys: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FeatureIndex {
    features: BTreeMap<String, Feature>,
    keys: BTreeMap<String, LookupKeys>,
    /// lowercase id -> canonical id (first in sorted order on collision)
    lowercase_ids: HashMap<String, String>,
}

impl FeatureIndex {
    /// Build an index from already-deserialized features
    ///
    /// Each feature's `id` is overwritten with its map key.
    pub fn from_features<I>(features: I) -> Self
    where
        I: IntoIterator<Item = (String, Feature)>,
    {
        let features: BTreeMap<String, Feature> = features
            .into_iter()
            .map(|(id, mut feature)| {
                feature.id = id.clone();
                (id, feature)
            })
            .collect();

        let mut keys = BTreeMap::new();
        let mut lowercase_ids = HashMap::new();
        for (id, feature) in &features {
            lowercase_ids
                .entry(normalize(id))
                .or_insert_with(|| id.clone());
            keys.insert(
                id.clone(),
                LookupKeys {
                    aliases: feature.caniuse.iter().map(|a| normalize(a)).collect(),
                    compat_keys: feature.compat_features.iter().map(|k| normalize(k)).collect(),
                },
            );
        }

        debug!("Feature index holds {} features", features.len());
        Self {
            features,
            keys,
            lowercase_ids,
        }
    }

    /// Parse a dataset document
    ///
    /// Accepts the web-features `data.json` layout (`{"features": {...}}`) or a bare
    /// object keyed by id. Entries that fail to deserialize are skipped with a warning.
    pub fn from_json_str(json: &str) -> Result<Self, FeatureIndexError> {
        let document: Value = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, FeatureIndexError> {
        let document: Value = serde_json::from_slice(bytes)?;
        Self::from_document(document)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FeatureIndexError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| FeatureIndexError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_slice(&bytes)
    }

    fn from_document(document: Value) -> Result<Self, FeatureIndexError> {
        let Value::Object(mut root) = document else {
            return Err(FeatureIndexError::NotAnObject);
        };

        let entries: Map<String, Value> = match root.remove("features") {
            Some(Value::Object(features)) => features,
            Some(_) => return Err(FeatureIndexError::NotAnObject),
            None => root,
        };

        let mut features = Vec::with_capacity(entries.len());
        for (id, value) in entries {
            match serde_json::from_value::<Feature>(value) {
                Ok(feature) => features.push((id, feature)),
                Err(e) => warn!("Skipping feature '{}': {}", id, e),
            }
        }

        Ok(Self::from_features(features))
    }

    pub fn get(&self, id: &str) -> Option<&Feature> {
        self.features.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.features.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Features in sorted id order
    pub fn iter(&self) -> btree_map::Iter<'_, String, Feature> {
        self.features.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.features.keys().map(String::as_str)
    }

    /// Canonical id for a case-insensitive id match
    pub(crate) fn id_ignoring_case(&self, normalized: &str) -> Option<&str> {
        self.lowercase_ids.get(normalized).map(String::as_str)
    }

    /// Normalized keys in sorted id order
    pub(crate) fn lookup_keys(&self) -> impl Iterator<Item = (&str, &LookupKeys)> {
        self.keys.iter().map(|(id, keys)| (id.as_str(), keys))
    }
}

/// Trim and lowercase, the one normalization used on both sides of a match
pub(crate) fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::features::types::BaselineLevel;
    use tempfile::TempDir;

    pub(crate) const SAMPLE_DATASET: &str =
        include_str!("../../test_samples/web-features-sample.json");

    pub(crate) fn sample_index() -> FeatureIndex {
        FeatureIndex::from_json_str(SAMPLE_DATASET).unwrap()
    }

    #[test]
    fn test_loads_web_features_layout() {
        let index = sample_index();

        assert!(index.contains("array-flat"));
        assert!(index.contains("old-name"));
        assert!(!index.contains("browsers"));
        assert_eq!(index.get("array-flat").unwrap().id, "array-flat");
        assert_eq!(
            index.get("dialog").unwrap().status.baseline,
            BaselineLevel::Low
        );
    }

    #[test]
    fn test_iteration_is_sorted() {
        let index = sample_index();
        let ids: Vec<&str> = index.ids().collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
        assert_eq!(index.iter().count(), index.len());
    }

    #[test]
    fn test_bare_object_layout() {
        let index = FeatureIndex::from_json_str(
            r#"{"grid": {"compat_features": ["css.properties.grid"], "status": {"baseline": "high"}}}"#,
        )
        .unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("grid").unwrap().status.baseline, BaselineLevel::High);
    }

    #[test]
    fn test_lookup_keys_are_normalized() {
        let index = FeatureIndex::from_json_str(
            r#"{"Grid": {"caniuse": " CSS-Grid ", "compat_features": ["CSS.properties.Grid"]}}"#,
        )
        .unwrap();
        let (id, keys) = index.lookup_keys().next().unwrap();
        assert_eq!(id, "Grid");
        assert_eq!(keys.aliases, vec!["css-grid"]);
        assert_eq!(keys.compat_keys, vec!["css.properties.grid"]);
        assert_eq!(index.id_ignoring_case("grid"), Some("Grid"));
    }

    #[test]
    fn test_bad_entries_are_skipped() {
        let index = FeatureIndex::from_json_str(
            r#"{"features": {"ok": {}, "broken": {"caniuse": 42}, "scalar": 7}}"#,
        )
        .unwrap();
        assert_eq!(index.ids().collect::<Vec<_>>(), vec!["ok"]);
    }

    #[test]
    fn test_load_errors() {
        assert!(matches!(
            FeatureIndex::from_json_str("[1, 2]"),
            Err(FeatureIndexError::NotAnObject)
        ));
        assert!(matches!(
            FeatureIndex::from_json_str(r#"{"features": []}"#),
            Err(FeatureIndexError::NotAnObject)
        ));
        assert!(matches!(
            FeatureIndex::from_json_str("{not json"),
            Err(FeatureIndexError::Json(_))
        ));

        let missing = FeatureIndex::from_path("/definitely/not/here.json");
        assert!(matches!(missing, Err(FeatureIndexError::Io { .. })));
    }

    #[test]
    fn test_from_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.json");
        fs::write(&path, SAMPLE_DATASET).unwrap();

        let index = FeatureIndex::from_path(&path).unwrap();
        assert_eq!(index.len(), sample_index().len());
    }
}
