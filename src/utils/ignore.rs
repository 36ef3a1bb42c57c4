//! Ignore patterns for project scans
//!
//! Patterns come from `ScanOptions::ignore` plus an optional `.baselineignore`
//! file at the scan root (one pattern per line, `#` comments).

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

pub const IGNORE_FILE_NAME: &str = ".baselineignore";

/// Read `.baselineignore` from `root`; a missing file yields no patterns
pub fn load_ignore_file(root: &Path) -> Result<Vec<String>> {
    let ignore_file = root.join(IGNORE_FILE_NAME);
    if !ignore_file.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(&ignore_file)
        .with_context(|| format!("Failed to read {}", ignore_file.display()))?;

    let patterns: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();

    debug!("Loaded {} ignore patterns from {}", patterns.len(), IGNORE_FILE_NAME);
    Ok(patterns)
}

/// Whether a relative Unix-style path is excluded by any pattern
///
/// - `dir/` matches the directory as a whole path component, plus everything under it
/// - `*.ext` matches a file suffix
/// - anything else is a substring match
///
/// `dist/` matches `dist/app.js` and `web/dist/app.js` but not `distro/app.js`.
pub fn is_ignored_by_pattern(relative_path: &str, patterns: &[String]) -> bool {
    let path = relative_path.replace('\\', "/");

    patterns.iter().any(|pattern| {
        if let Some(dir_name) = pattern.strip_suffix('/') {
            path.split('/').any(|component| component == dir_name)
        } else if let Some(suffix) = pattern.strip_prefix('*') {
            path.ends_with(suffix)
        } else {
            path.contains(pattern.as_str())
        }
    })
}
