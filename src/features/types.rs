// Feature dataset types
//
// Mirrors the web-features layout: `baseline` is `false | "low" | "high"`, caniuse,
// spec and group may be a single string or a list.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Baseline classification, ordered none < low < high
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BaselineLevel {
    #[default]
    None,
    Low,
    High,
}

impl BaselineLevel {
    /// Rank used for every threshold comparison
    pub fn rank(self) -> u8 {
        match self {
            BaselineLevel::None => 0,
            BaselineLevel::Low => 1,
            BaselineLevel::High => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BaselineLevel::None => "none",
            BaselineLevel::Low => "low",
            BaselineLevel::High => "high",
        }
    }
}

impl fmt::Display for BaselineLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BaselineLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "false" | "" => Ok(BaselineLevel::None),
            "low" => Ok(BaselineLevel::Low),
            "high" => Ok(BaselineLevel::High),
            other => Err(format!("unknown baseline level '{}'", other)),
        }
    }
}

impl Serialize for BaselineLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BaselineLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawLevel {
            Flag(#[allow(dead_code)] bool),
            Name(String),
        }

        // `false` (not baseline) and unrecognized names both read as none
        Ok(match Option::<RawLevel>::deserialize(deserializer)? {
            Some(RawLevel::Name(name)) => name.parse().unwrap_or_default(),
            Some(RawLevel::Flag(_)) | None => BaselineLevel::None,
        })
    }
}

/// Browser support value: a version string (`"≤79"`, `"16.4"`) or a flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SupportValue {
    Version(String),
    Flag(bool),
}

/// Engine / browser id -> first supporting version
pub type SupportMap = BTreeMap<String, SupportValue>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureStatus {
    #[serde(default)]
    pub baseline: BaselineLevel,
    #[serde(default)]
    pub baseline_low_date: Option<String>,
    #[serde(default)]
    pub baseline_high_date: Option<String>,
    #[serde(default)]
    pub support: SupportMap,
}

/// A web-platform feature entry from the reference dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Canonical id (the dataset key, filled in at load time)
    #[serde(default, skip_deserializing)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub description_html: Option<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub spec: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub group: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub caniuse: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub compat_features: Vec<String>,
    #[serde(default)]
    pub status: FeatureStatus,
}

impl Feature {
    /// Public summary of a feature
    pub fn info(&self) -> FeatureInfo {
        FeatureInfo {
            name: self.name.clone(),
            description: self
                .description
                .clone()
                .or_else(|| self.description_html.clone()),
            spec: self.spec.first().cloned(),
            group: self.group.first().cloned(),
            compatibility_keys: self.compat_features.clone(),
            caniuse_alias: self.caniuse.clone(),
        }
    }
}

/// Feature summary handed to report and hover consumers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureInfo {
    pub name: Option<String>,
    pub description: Option<String>,
    pub spec: Option<String>,
    pub group: Option<String>,
    pub compatibility_keys: Vec<String>,
    pub caniuse_alias: Vec<String>,
}

/// Accept `"x"`, `["x", "y"]` or `null`
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(value)) => vec![value],
        Some(OneOrMany::Many(values)) => values,
        None => Vec::new(),
    })
}
