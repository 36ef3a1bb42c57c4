//! Feature dataset, token resolution and Baseline evaluation
//!
//! - `types` - Feature records as they appear in web-features JSON
//! - `index` - FeatureIndex, the immutable loaded dataset
//! - `resolve` - Resolver and its ordered matchers
//! - `baseline` - BaselineEvaluator and year parsing

pub mod baseline;
pub mod index;
pub mod resolve;
pub mod types;

pub use baseline::{parse_year, BaselineEvaluator, BaselineReason, BaselineResult};
pub use index::{FeatureIndex, FeatureIndexError};
pub use resolve::{AliasMatcher, CompatKeyMatcher, IdMatcher, Matcher, Query, Resolver};
pub use types::{BaselineLevel, Feature, FeatureInfo, FeatureStatus, SupportMap, SupportValue};
