// Baseline Scan - web-platform feature detection and Baseline evaluation
//
// Tree-sitter extractors turn JS/TS/JSX/TSX, HTML and CSS into candidate feature
// tokens; the feature index resolves tokens to web-features ids; the evaluator
// decides whether a feature is Baseline for a given year.
//
// Architecture: extractors -> resolver -> evaluator, wrapped by `Engine`, with
// report aggregation and editor rendering on top.

pub mod engine;
pub mod extractors;
pub mod features;
pub mod ide;
pub mod language;
pub mod report;
pub mod utils;

pub use engine::Engine;
pub use extractors::{ExtractorConfig, ExtractorManager, Span, Token, TokenKind};
pub use features::{
    BaselineLevel, BaselineReason, BaselineResult, Feature, FeatureIndex, FeatureIndexError,
    FeatureInfo, SupportMap,
};
pub use language::{LanguageError, LanguageKind};
pub use report::{scan_project, BaselineReport, FeatureUsage, ReportBuilder, ScanOptions};
