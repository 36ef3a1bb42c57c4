//! Editor-facing rendering data
//!
//! Diagnostics for every usage that falls short of the Baseline threshold, and
//! hover text for a word or a cursor position. Only the data is produced here; the
//! editor integration decides how to show it.

use crate::engine::Engine;
use crate::extractors::Span;
use crate::features::{BaselineLevel, BaselineResult};
use crate::language::LanguageKind;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const MDN_SEARCH_URL: &str = "https://developer.mozilla.org/en-US/search?q=";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub span: Option<Span>,
    pub severity: Severity,
    pub feature_id: String,
    pub message: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hover {
    pub feature_id: String,
    pub markdown: String,
    pub span: Option<Span>,
}

/// One warning per (feature, span) whose verdict is not in Baseline
pub fn diagnostics(
    engine: &Engine,
    content: &str,
    language: LanguageKind,
    year: Option<i32>,
    min: Option<BaselineLevel>,
) -> Vec<Diagnostic> {
    let mut seen = HashSet::new();
    let mut diagnostics = Vec::new();

    for token in engine.extract(content, language, None) {
        let Some(feature_id) = engine.resolve_token(&token) else {
            continue;
        };
        if !seen.insert((feature_id.clone(), token.span)) {
            continue;
        }

        let verdict = engine.is_feature_in_baseline(&feature_id, year, min);
        if verdict.in_baseline {
            continue;
        }

        diagnostics.push(Diagnostic {
            span: token.span,
            severity: Severity::Warning,
            message: format!(
                "'{}' is not in Baseline {}",
                feature_id,
                year_label(year)
            ),
            reason: verdict.reason.to_string(),
            feature_id,
        });
    }

    tracing::debug!("{} baseline diagnostics", diagnostics.len());
    diagnostics
}

/// Hover data for `word`
///
/// Tokens matching the word are tried first so the hover carries a span; the
/// bare word is resolved as a last resort.
pub fn hover(
    engine: &Engine,
    content: &str,
    language: LanguageKind,
    word: &str,
    year: Option<i32>,
    min: Option<BaselineLevel>,
) -> Option<Hover> {
    let (feature_id, span) = engine
        .extract(content, language, Some(word))
        .into_iter()
        .find_map(|token| engine.resolve_token(&token).map(|id| (id, token.span)))
        .or_else(|| {
            engine
                .resolve_by_key(word)
                .or_else(|| engine.resolve_by_compat(word))
                .map(|id| (id, None))
        })?;

    let verdict = engine.is_feature_in_baseline(&feature_id, year, min);
    let markdown = render_hover(engine, &feature_id, &verdict, year);
    Some(Hover {
        feature_id,
        markdown,
        span,
    })
}

/// Hover data for the innermost resolvable token at a 1-based line / 0-based column
pub fn hover_at(
    engine: &Engine,
    content: &str,
    language: LanguageKind,
    line: u32,
    column: u32,
    year: Option<i32>,
    min: Option<BaselineLevel>,
) -> Option<Hover> {
    let (feature_id, span) = engine
        .extract(content, language, None)
        .into_iter()
        .filter_map(|token| {
            let span = token.span.filter(|span| span.contains(line, column))?;
            engine.resolve_token(&token).map(|id| (id, span))
        })
        .min_by_key(|(_, span)| span.end_byte - span.start_byte)?;

    let verdict = engine.is_feature_in_baseline(&feature_id, year, min);
    let markdown = render_hover(engine, &feature_id, &verdict, year);
    Some(Hover {
        feature_id,
        markdown,
        span: Some(span),
    })
}

pub fn mdn_link(feature_id: &str) -> String {
    format!("{}{}", MDN_SEARCH_URL, urlencoding::encode(feature_id))
}

fn render_hover(engine: &Engine, feature_id: &str, verdict: &BaselineResult, year: Option<i32>) -> String {
    let info = engine.get_feature_info(feature_id);

    let mut lines = vec![
        format!("**Baseline** `{}`", feature_id),
        format!(
            "- In Baseline {}: **{}**",
            year_label(year),
            if verdict.in_baseline { "Yes" } else { "No" }
        ),
        format!("- Reason: {}", verdict.reason),
    ];
    if let Some(year) = verdict.achieved_year {
        lines.push(format!("- Since: {}", year));
    }
    if let Some(info) = info {
        if let Some(description) = info.description {
            lines.push(description);
        }
        if let Some(spec) = info.spec {
            lines.push(format!("- Spec: {}", spec));
        }
    }
    lines.push(format!("[Open MDN]({})", mdn_link(feature_id)));

    lines.join("\n\n")
}

fn year_label(year: Option<i32>) -> String {
    year.map(|y| y.to_string())
        .unwrap_or_else(|| "(current status)".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::index::tests::sample_index;
    use std::sync::Arc;

    fn engine() -> Engine {
        Engine::new(Arc::new(sample_index()))
    }

    #[test]
    fn test_diagnostics_flag_newer_features() {
        let engine = engine();
        let code = "const seg = new Intl.Segmenter('en');\nconst xs = ys.flat();";
        let found = diagnostics(&engine, code, LanguageKind::JavaScript, Some(2023), None);

        assert_eq!(found.len(), 1);
        let diagnostic = &found[0];
        assert_eq!(diagnostic.feature_id, "intl-segmenter");
        assert_eq!(diagnostic.severity, Severity::Warning);
        assert!(diagnostic.message.contains("intl-segmenter"));
        assert!(diagnostic.message.contains("2023"));
        assert_eq!(diagnostic.reason, "below threshold");
        assert_eq!(diagnostic.span.unwrap().start_line, 1);
    }

    #[test]
    fn test_diagnostics_for_css_and_html() {
        let engine = engine();

        let css = diagnostics(
            &engine,
            "@container (min-width: 400px) { .a { display: grid; } }",
            LanguageKind::Css,
            Some(2022),
            None,
        );
        let ids: Vec<&str> = css.iter().map(|d| d.feature_id.as_str()).collect();
        assert_eq!(ids, vec!["container-queries"]);

        let html = diagnostics(&engine, "<dialog open></dialog>", LanguageKind::Html, Some(2021), None);
        assert_eq!(html.len(), 2);
        assert!(html.iter().all(|d| d.feature_id == "dialog"));
    }

    #[test]
    fn test_no_diagnostics_when_everything_is_baseline() {
        let engine = engine();
        let found = diagnostics(&engine, "fetch('/a');", LanguageKind::JavaScript, Some(2023), None);
        assert!(found.is_empty());
    }

    #[test]
    fn test_hover_uses_token_span() {
        let engine = engine();
        let code = "const xs = ys.flat();";
        let hover = hover(&engine, code, LanguageKind::JavaScript, "flat", Some(2023), None).unwrap();

        assert_eq!(hover.feature_id, "array-flat");
        let span = hover.span.unwrap();
        assert_eq!(&code[span.start_byte as usize..span.end_byte as usize], "ys.flat()");
        assert!(hover.markdown.contains("`array-flat`"));
        assert!(hover.markdown.contains("In Baseline 2023: **Yes**"));
        assert!(hover.markdown.contains("- Reason: meets threshold"));
        assert!(hover.markdown.contains("flatten nested arrays"));
        assert!(hover
            .markdown
            .contains("https://developer.mozilla.org/en-US/search?q=array-flat"));
    }

    #[test]
    fn test_hover_falls_back_to_the_bare_word() {
        let engine = engine();
        let hover = hover(&engine, "", LanguageKind::JavaScript, "IntersectionObserver", None, None).unwrap();

        assert_eq!(hover.feature_id, "intersection-observer");
        assert_eq!(hover.span, None);
        assert!(hover.markdown.contains("In Baseline (current status): **Yes**"));
        assert!(hover.markdown.contains("- Reason: high"));
    }

    #[test]
    fn test_hover_at_picks_innermost_token() {
        let engine = engine();
        let code = "<p>hi</p>\n<dialog open>\n  <p>text</p>\n</dialog>";

        let on_attribute = hover_at(&engine, code, LanguageKind::Html, 2, 9, Some(2023), None).unwrap();
        assert_eq!(on_attribute.feature_id, "dialog");
        let span = on_attribute.span.unwrap();
        assert_eq!(&code[span.start_byte as usize..span.end_byte as usize], "open");

        let on_element = hover_at(&engine, code, LanguageKind::Html, 4, 3, Some(2023), None).unwrap();
        assert_eq!(on_element.span.unwrap().start_line, 2);

        assert!(hover_at(&engine, code, LanguageKind::Html, 1, 1, Some(2023), None).is_none());
    }

    #[test]
    fn test_hover_unknown_word() {
        let engine = engine();
        assert!(hover(&engine, "a.b()", LanguageKind::JavaScript, "zzz", Some(2023), None).is_none());
    }

    #[test]
    fn test_mdn_link_is_encoded() {
        assert_eq!(
            mdn_link("css.at-rules.container & more"),
            "https://developer.mozilla.org/en-US/search?q=css.at-rules.container%20%26%20more"
        );
    }
}
