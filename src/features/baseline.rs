//! Baseline Evaluator
//!
//! Computes whether a feature counts as Baseline for a reference year and a
//! minimum required level. Evaluation never fails: unknown ids and bad years
//! come back as results with a reason code.
//!
//! With a year, the dated milestones decide: the high date wins if it is on or
//! before the year, then the low date. A feature with no parsable dates at all
//! falls back to its static status level.

use crate::features::index::FeatureIndex;
use crate::features::types::{BaselineLevel, FeatureStatus};
use chrono::{DateTime, Datelike, NaiveDate};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Why a result came out the way it did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaselineReason {
    FeatureNotFound,
    InvalidYear,
    /// No year given; carries the feature's static status
    Status(BaselineLevel),
    MeetsThreshold,
    BelowThreshold,
}

impl BaselineReason {
    pub fn as_str(self) -> &'static str {
        match self {
            BaselineReason::FeatureNotFound => "feature not found",
            BaselineReason::InvalidYear => "invalid year",
            // A dataset `baseline: false` reads as "none" here
            BaselineReason::Status(level) => level.as_str(),
            BaselineReason::MeetsThreshold => "meets threshold",
            BaselineReason::BelowThreshold => "below threshold",
        }
    }
}

impl fmt::Display for BaselineReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for BaselineReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BaselineReason {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(match text.as_str() {
            "feature not found" => BaselineReason::FeatureNotFound,
            "invalid year" => BaselineReason::InvalidYear,
            "meets threshold" => BaselineReason::MeetsThreshold,
            "below threshold" => BaselineReason::BelowThreshold,
            other => BaselineReason::Status(
                other.parse().map_err(serde::de::Error::custom)?,
            ),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaselineResult {
    pub in_baseline: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achieved: Option<BaselineLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achieved_year: Option<i32>,
    pub reason: BaselineReason,
}

impl BaselineResult {
    fn failure(reason: BaselineReason) -> Self {
        Self {
            in_baseline: false,
            achieved: None,
            achieved_year: None,
            reason,
        }
    }
}

/// Year of a web-features milestone date
///
/// Accepts `YYYY`, `YYYY-MM`, `YYYY-MM-DD` and RFC 3339 timestamps, optionally
/// prefixed with `≤` (ranged dates). Anything else is `None`.
pub fn parse_year(date: &str) -> Option<i32> {
    let date = date.trim();
    let date = date.strip_prefix('≤').unwrap_or(date).trim_start();

    if date.len() == 4 && date.bytes().all(|b| b.is_ascii_digit()) {
        return date.parse().ok();
    }
    if let Ok(day) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Some(day.year());
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(date) {
        return Some(timestamp.year());
    }
    NaiveDate::parse_from_str(&format!("{}-01", date), "%Y-%m-%d")
        .ok()
        .map(|day| day.year())
}

pub struct BaselineEvaluator<'i> {
    index: &'i FeatureIndex,
}

impl<'i> BaselineEvaluator<'i> {
    pub fn new(index: &'i FeatureIndex) -> Self {
        Self { index }
    }

    /// Evaluate `id` at `year` (or against its static status when `None`)
    ///
    /// `min` defaults to [`BaselineLevel::Low`].
    pub fn evaluate(
        &self,
        id: &str,
        year: Option<i32>,
        min: Option<BaselineLevel>,
    ) -> BaselineResult {
        let Some(feature) = self.index.get(id) else {
            return BaselineResult::failure(BaselineReason::FeatureNotFound);
        };
        let min = min.unwrap_or(BaselineLevel::Low);

        match year {
            None => {
                let achieved = feature.status.baseline;
                BaselineResult {
                    in_baseline: achieved.rank() >= min.rank(),
                    achieved: Some(achieved),
                    achieved_year: None,
                    reason: BaselineReason::Status(achieved),
                }
            }
            Some(year) => {
                let (achieved, achieved_year) = achieved_at(&feature.status, year);
                let in_baseline = achieved.rank() >= min.rank();
                BaselineResult {
                    in_baseline,
                    achieved: Some(achieved),
                    achieved_year,
                    reason: if in_baseline {
                        BaselineReason::MeetsThreshold
                    } else {
                        BaselineReason::BelowThreshold
                    },
                }
            }
        }
    }

    /// Same as [`evaluate`](Self::evaluate) for textual year input
    ///
    /// An empty string means no year; anything that is not an integer is an
    /// invalid year. The feature lookup happens first.
    pub fn evaluate_str(&self, id: &str, year: &str, min: Option<BaselineLevel>) -> BaselineResult {
        if !self.index.contains(id) {
            return BaselineResult::failure(BaselineReason::FeatureNotFound);
        }

        let year = year.trim();
        if year.is_empty() {
            return self.evaluate(id, None, min);
        }
        match year.parse::<i32>() {
            Ok(year) => self.evaluate(id, Some(year), min),
            Err(_) => BaselineResult::failure(BaselineReason::InvalidYear),
        }
    }
}

fn achieved_at(status: &FeatureStatus, year: i32) -> (BaselineLevel, Option<i32>) {
    let high_year = status.baseline_high_date.as_deref().and_then(parse_year);
    let low_year = status.baseline_low_date.as_deref().and_then(parse_year);

    match (high_year, low_year) {
        (Some(high), _) if high <= year => (BaselineLevel::High, Some(high)),
        (_, Some(low)) if low <= year => (BaselineLevel::Low, Some(low)),
        (None, None) => (status.baseline, None),
        _ => (BaselineLevel::None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::index::tests::sample_index;
    use chrono::Utc;

    #[test]
    fn test_parse_year_formats() {
        assert_eq!(parse_year("2022"), Some(2022));
        assert_eq!(parse_year("2020-01-07"), Some(2020));
        assert_eq!(parse_year("2021-06"), Some(2021));
        assert_eq!(parse_year("2023-02-14T00:00:00Z"), Some(2023));
        assert_eq!(parse_year("≤2018-01-29"), Some(2018));
        assert_eq!(parse_year(" ≤2015 "), Some(2015));
        assert_eq!(parse_year("sometime"), None);
        assert_eq!(parse_year(""), None);
        assert_eq!(parse_year("20222"), None);
    }

    #[test]
    fn test_feature_not_found() {
        let index = sample_index();
        let evaluator = BaselineEvaluator::new(&index);
        let result = evaluator.evaluate("nonexistent-feature", Some(2023), None);

        assert!(!result.in_baseline);
        assert_eq!(result.reason, BaselineReason::FeatureNotFound);
        assert_eq!(result.achieved, None);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"inBaseline": false, "reason": "feature not found"})
        );
    }

    #[test]
    fn test_missing_feature_is_checked_before_year() {
        let index = sample_index();
        let evaluator = BaselineEvaluator::new(&index);
        assert_eq!(
            evaluator.evaluate_str("nonexistent-feature", "soon", None).reason,
            BaselineReason::FeatureNotFound
        );
    }

    #[test]
    fn test_invalid_and_empty_year_strings() {
        let index = sample_index();
        let evaluator = BaselineEvaluator::new(&index);

        let invalid = evaluator.evaluate_str("array-flat", "next year", None);
        assert!(!invalid.in_baseline);
        assert_eq!(invalid.reason, BaselineReason::InvalidYear);
        assert_eq!(invalid.reason.to_string(), "invalid year");

        let empty = evaluator.evaluate_str("array-flat", "  ", None);
        assert_eq!(empty.reason, BaselineReason::Status(BaselineLevel::High));

        let numeric = evaluator.evaluate_str("array-flat", "2021", None);
        assert_eq!(numeric, evaluator.evaluate("array-flat", Some(2021), None));
    }

    #[test]
    fn test_no_year_uses_static_status() {
        let index = sample_index();
        let evaluator = BaselineEvaluator::new(&index);

        let low = evaluator.evaluate("dialog", None, None);
        assert!(low.in_baseline);
        assert_eq!(low.achieved, Some(BaselineLevel::Low));
        assert_eq!(low.reason.as_str(), "low");

        let below = evaluator.evaluate("dialog", None, Some(BaselineLevel::High));
        assert!(!below.in_baseline);

        let none = evaluator.evaluate("view-transitions", None, None);
        assert!(!none.in_baseline);
        assert_eq!(none.reason.as_str(), "none");
    }

    #[test]
    fn test_bare_year_milestones() {
        let index = sample_index();
        let evaluator = BaselineEvaluator::new(&index);

        let low = evaluator.evaluate("threshold-sample", Some(2021), Some(BaselineLevel::Low));
        assert!(low.in_baseline);
        assert_eq!(low.achieved, Some(BaselineLevel::Low));
        assert_eq!(low.achieved_year, Some(2020));
        assert_eq!(low.reason, BaselineReason::MeetsThreshold);

        let high = evaluator.evaluate("threshold-sample", Some(2021), Some(BaselineLevel::High));
        assert!(!high.in_baseline);
        assert_eq!(high.achieved, Some(BaselineLevel::Low));
        assert_eq!(high.reason, BaselineReason::BelowThreshold);

        let later = evaluator.evaluate("threshold-sample", Some(2022), Some(BaselineLevel::High));
        assert!(later.in_baseline);
        assert_eq!(later.achieved_year, Some(2022));

        let before = evaluator.evaluate("threshold-sample", Some(2019), None);
        assert!(!before.in_baseline);
        assert_eq!(before.achieved, Some(BaselineLevel::None));
        assert_eq!(before.achieved_year, None);
    }

    #[test]
    fn test_undated_and_unparsable_fall_back_to_status() {
        let index = sample_index();
        let evaluator = BaselineEvaluator::new(&index);

        let undated = evaluator.evaluate("undated-high", Some(1999), Some(BaselineLevel::High));
        assert!(undated.in_baseline);
        assert_eq!(undated.achieved, Some(BaselineLevel::High));
        assert_eq!(undated.achieved_year, None);

        let garbage = evaluator.evaluate("unparsable-dates", Some(2030), None);
        assert!(garbage.in_baseline);
        assert_eq!(garbage.achieved, Some(BaselineLevel::Low));
    }

    #[test]
    fn test_ranged_dates() {
        let index = sample_index();
        let evaluator = BaselineEvaluator::new(&index);
        let result = evaluator.evaluate("display", Some(2018), Some(BaselineLevel::High));
        assert!(result.in_baseline);
        assert_eq!(result.achieved_year, Some(2018));
    }

    #[test]
    fn test_high_features_are_baseline_this_year() {
        let index = sample_index();
        let evaluator = BaselineEvaluator::new(&index);
        let current_year = Utc::now().year();

        for (id, feature) in index.iter() {
            if feature.status.baseline != BaselineLevel::High {
                continue;
            }
            for min in [BaselineLevel::Low, BaselineLevel::High] {
                assert!(
                    evaluator.evaluate(id, Some(current_year), Some(min)).in_baseline,
                    "{} should be baseline {} in {}",
                    id,
                    min,
                    current_year
                );
            }
        }
    }

    #[test]
    fn test_baseline_is_never_lost_going_forward() {
        let index = sample_index();
        let evaluator = BaselineEvaluator::new(&index);

        for id in index.ids() {
            for min in [BaselineLevel::None, BaselineLevel::Low, BaselineLevel::High] {
                let mut reached = false;
                for year in 2000..=2035 {
                    let in_baseline = evaluator.evaluate(id, Some(year), Some(min)).in_baseline;
                    assert!(!reached || in_baseline, "{} lost baseline in {}", id, year);
                    reached |= in_baseline;
                }
            }
        }
    }

    #[test]
    fn test_result_serialization() {
        let index = sample_index();
        let evaluator = BaselineEvaluator::new(&index);
        let result = evaluator.evaluate("array-flat", Some(2021), None);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "inBaseline": true,
                "achieved": "low",
                "achievedYear": 2020,
                "reason": "meets threshold"
            })
        );
        let back: BaselineResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, result);
    }
}
