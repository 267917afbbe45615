//! Search directory expansion and convention globbing.

use glob::Pattern;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use crate::utils::fs::normalize_path;

/// Remove duplicates, keeping the first occurrence.
pub fn dedup_stable<T: Clone + Eq + std::hash::Hash>(items: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    items.into_iter().filter(|item| seen.insert(item.clone())).collect()
}

/// Widen `dirs` with the conventional subdirectories registered for `kind`.
///
/// Every subdirectory is joined onto every directory first, subdirectory by
/// subdirectory, and the plain directories come last.
#[must_use]
pub fn widen(dirs: &[PathBuf], subdirs: &BTreeMap<String, Vec<String>>, kind: &str) -> Vec<PathBuf> {
    let mut widened = Vec::new();
    for sub in subdirs.get(kind).into_iter().flatten() {
        widened.extend(dirs.iter().map(|dir| normalize_path(&dir.join(sub))));
    }
    widened.extend(dirs.iter().cloned());
    dedup_stable(widened)
}

/// Files matching any of `patterns` in any of `dirs`, sorted.
///
/// Patterns are built by the caller with [`Pattern::escape`]d names; the
/// directories are escaped here, so only the convention wildcards are live.
#[must_use]
pub fn glob_in(dirs: &[PathBuf], patterns: &[String]) -> Vec<PathBuf> {
    let mut matches = Vec::new();
    for dir in dirs {
        let base = PathBuf::from(Pattern::escape(&dir.to_string_lossy()));
        for pattern in patterns {
            let full = base.join(pattern);
            match glob::glob(&full.to_string_lossy()) {
                Ok(paths) => matches.extend(paths.filter_map(Result::ok).map(|p| normalize_path(&p))),
                Err(e) => tracing::debug!("Skipping invalid pattern {}: {e}", full.display()),
            }
        }
    }
    matches.sort();
    matches.dedup();
    matches
}

/// Existing paths for `names` joined onto `dirs`, names outermost.
#[must_use]
pub fn existing(dirs: &[PathBuf], names: &[&str]) -> Vec<PathBuf> {
    let mut found = Vec::new();
    for name in names {
        for dir in dirs {
            let path = normalize_path(&dir.join(name));
            if path.exists() {
                found.push(path);
            }
        }
    }
    found
}

/// Convention pattern `{name}{suffix}` with `name` escaped.
#[must_use]
pub fn name_pattern(name: &str, suffix: &str) -> String {
    format!("{}{suffix}", Pattern::escape(name))
}

/// Whether `path` contains `marker` anywhere.
#[must_use]
pub fn path_contains(path: &Path, marker: &str) -> bool {
    path.to_string_lossy().contains(marker)
}
