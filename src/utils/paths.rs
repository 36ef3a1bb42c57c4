// Path helpers for reports
//
// Report locations use paths relative to the scan root with `/` separators on
// every platform.

use anyhow::{Context, Result};
use std::path::{Path, MAIN_SEPARATOR};

/// Convert a path under `root` to a relative Unix-style path
///
/// Both paths are canonicalized when possible so symlinked roots
/// (`/var` -> `/private/var` on macOS) still compare equal.
pub fn to_relative_unix_style(path: &Path, root: &Path) -> Result<String> {
    let (path, root) = match (path.canonicalize(), root.canonicalize()) {
        (Ok(path), Ok(root)) => (path, root),
        _ => (path.to_path_buf(), root.to_path_buf()),
    };

    let relative = path.strip_prefix(&root).with_context(|| {
        format!(
            "File path '{}' is not within scan root '{}'",
            path.display(),
            root.display()
        )
    })?;

    let relative = relative.to_str().context("Path contains invalid UTF-8")?;
    Ok(unix_separators(relative))
}

/// Relative path for display, falling back to the path as given
pub fn display_path(path: &Path, root: &Path) -> String {
    to_relative_unix_style(path, root)
        .unwrap_or_else(|_| unix_separators(&path.to_string_lossy()))
}

fn unix_separators(path: &str) -> String {
    if MAIN_SEPARATOR == '\\' {
        path.replace('\\', "/")
    } else {
        path.to_string()
    }
}
