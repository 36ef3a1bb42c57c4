//! Project reports
//!
//! Aggregates resolved feature usages across files into a [`BaselineReport`]:
//! per-feature usage counts, a few sample locations, the feature summary and its
//! Baseline verdict for the report year. [`scan_project`] walks a directory with
//! glob patterns and extracts files in parallel.

use crate::engine::Engine;
use crate::extractors::Token;
use crate::features::{BaselineLevel, BaselineResult, FeatureInfo, SupportMap};
use crate::language::LanguageKind;
use crate::utils::ignore::{is_ignored_by_pattern, load_ignore_file};
use crate::utils::paths::display_path;
use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Options for a project scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScanOptions {
    pub year: i32,
    pub min_baseline: BaselineLevel,
    /// Sample locations kept per feature
    pub sample_limit: usize,
    /// Glob patterns relative to the scan root
    pub patterns: Vec<String>,
    /// Ignore patterns (see [`is_ignored_by_pattern`])
    pub ignore: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            year: 2023,
            min_baseline: BaselineLevel::Low,
            sample_limit: 5,
            // glob has no brace expansion, one pattern per extension
            patterns: ["js", "ts", "jsx", "tsx", "html", "css"]
                .iter()
                .map(|ext| format!("**/*.{}", ext))
                .collect(),
            ignore: vec![
                "node_modules/".to_string(),
                ".git/".to_string(),
                "dist/".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureUsage {
    pub count: usize,
    /// `path:line:column`, 1-based
    pub sample_locations: Vec<String>,
    pub info: Option<FeatureInfo>,
    pub baseline: BaselineResult,
    pub support: Option<SupportMap>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaselineReport {
    pub scanned_files: usize,
    pub baseline_year: i32,
    pub features: BTreeMap<String, FeatureUsage>,
    /// RFC 3339 timestamp
    pub generated_at: String,
}

impl BaselineReport {
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Dashboard order: features outside Baseline first, then by reason, then id
    pub fn sorted_rows(&self) -> Vec<(&str, &FeatureUsage)> {
        let mut rows: Vec<(&str, &FeatureUsage)> = self
            .features
            .iter()
            .map(|(id, usage)| (id.as_str(), usage))
            .collect();
        rows.sort_by(|(a_id, a), (b_id, b)| compare_rows(a_id, a, b_id, b));
        rows
    }

    pub fn not_in_baseline(&self) -> usize {
        self.features
            .values()
            .filter(|usage| !usage.baseline.in_baseline)
            .count()
    }
}

fn compare_rows(a_id: &str, a: &FeatureUsage, b_id: &str, b: &FeatureUsage) -> Ordering {
    a.baseline
        .in_baseline
        .cmp(&b.baseline.in_baseline)
        .then_with(|| a.baseline.reason.as_str().cmp(b.baseline.reason.as_str()))
        .then_with(|| a_id.cmp(b_id))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct UsageTally {
    count: usize,
    samples: Vec<String>,
}

/// Accumulates usages
///
/// Sample locations are kept in recording order, so merging per-file builders
/// in path order gives a deterministic report.
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    year: i32,
    min_baseline: BaselineLevel,
    sample_limit: usize,
    scanned_files: usize,
    usages: BTreeMap<String, UsageTally>,
}

impl ReportBuilder {
    pub fn new(options: &ScanOptions) -> Self {
        Self {
            year: options.year,
            min_baseline: options.min_baseline,
            sample_limit: options.sample_limit,
            scanned_files: 0,
            usages: BTreeMap::new(),
        }
    }

    /// Count one usage of `feature_id` by `token` in `path`
    pub fn record(&mut self, path: &str, token: &Token, feature_id: &str) {
        let tally = self.usages.entry(feature_id.to_string()).or_default();
        tally.count += 1;
        if tally.samples.len() < self.sample_limit {
            tally.samples.push(location(path, token));
        }
    }

    pub fn note_scanned_file(&mut self) {
        self.scanned_files += 1;
    }

    /// Extract, resolve and record every token of one source file
    ///
    /// Returns the number of resolved tokens.
    pub fn scan_source(
        &mut self,
        engine: &Engine,
        path: &str,
        content: &str,
        language: LanguageKind,
    ) -> usize {
        self.note_scanned_file();
        let mut resolved = 0;
        for token in engine.extract(content, language, None) {
            if let Some(id) = engine.resolve_token(&token) {
                self.record(path, &token, &id);
                resolved += 1;
            }
        }
        debug!("{}: {} resolved feature usages", path, resolved);
        resolved
    }

    pub fn merge(&mut self, other: ReportBuilder) {
        self.scanned_files += other.scanned_files;
        for (id, theirs) in other.usages {
            let tally = self.usages.entry(id).or_default();
            tally.count += theirs.count;
            let room = self.sample_limit.saturating_sub(tally.samples.len());
            tally.samples.extend(theirs.samples.into_iter().take(room));
        }
    }

    pub fn finish(self, engine: &Engine) -> BaselineReport {
        self.finish_at(engine, Utc::now())
    }

    /// Evaluate every recorded feature and stamp the report with `generated_at`
    pub fn finish_at(self, engine: &Engine, generated_at: DateTime<Utc>) -> BaselineReport {
        let features = self
            .usages
            .into_iter()
            .map(|(id, tally)| {
                let usage = FeatureUsage {
                    count: tally.count,
                    sample_locations: tally.samples,
                    info: engine.get_feature_info(&id),
                    baseline: engine.is_feature_in_baseline(
                        &id,
                        Some(self.year),
                        Some(self.min_baseline),
                    ),
                    support: engine.get_feature_support(&id).cloned(),
                };
                (id, usage)
            })
            .collect();

        BaselineReport {
            scanned_files: self.scanned_files,
            baseline_year: self.year,
            features,
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

fn location(path: &str, token: &Token) -> String {
    match token.span {
        Some(span) => format!("{}:{}:{}", path, span.start_line, span.start_column + 1),
        None => path.to_string(),
    }
}

/// Scan every matching file under `root`
///
/// Unreadable files are logged and skipped. Only an invalid glob pattern or an
/// unreadable `.baselineignore` fails the scan.
pub fn scan_project(engine: &Engine, root: &Path, options: &ScanOptions) -> Result<BaselineReport> {
    let files = collect_files(root, options)?;
    debug!("Scanning {} files under {}", files.len(), root.display());

    let per_file: Vec<ReportBuilder> = files
        .par_iter()
        .map(|(path, relative, language)| {
            let mut builder = ReportBuilder::new(options);
            match fs::read_to_string(path) {
                Ok(content) => {
                    builder.scan_source(engine, relative, &content, *language);
                }
                Err(e) => {
                    warn!("Skipping {}: {}", relative, e);
                    builder.note_scanned_file();
                }
            }
            builder
        })
        .collect();

    let mut report = ReportBuilder::new(options);
    for builder in per_file {
        report.merge(builder);
    }
    Ok(report.finish(engine))
}

/// Matching files in path order, with their display paths and languages
fn collect_files(root: &Path, options: &ScanOptions) -> Result<Vec<(PathBuf, String, LanguageKind)>> {
    let mut ignore = options.ignore.clone();
    ignore.extend(load_ignore_file(root)?);

    let escaped_root = glob::Pattern::escape(&root.to_string_lossy());
    let mut paths = BTreeSet::new();
    for pattern in &options.patterns {
        let full_pattern = format!("{}/{}", escaped_root, pattern.trim_start_matches('/'));
        let entries = glob::glob(&full_pattern)
            .with_context(|| format!("Invalid scan pattern '{}'", pattern))?;
        for entry in entries {
            match entry {
                Ok(path) if path.is_file() => {
                    paths.insert(path);
                }
                Ok(_) => {}
                Err(e) => warn!("Unreadable path during scan: {}", e),
            }
        }
    }

    Ok(paths
        .into_iter()
        .filter_map(|path| {
            let relative = display_path(&path, root);
            if is_ignored_by_pattern(&relative, &ignore) {
                return None;
            }
            let language = LanguageKind::from_path(&path)?;
            Some((path, relative, language))
        })
        .collect())
}
