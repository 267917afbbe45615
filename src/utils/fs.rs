//! File system helpers: lexical path normalization, source reading and
//! output writing.
//!
//! Path handling in deparse is deliberately lexical. Paths found inside source
//! files are joined with the directory of the file that mentions them and
//! normalized without touching the disk, so the result is the same whether or
//! not the target exists yet.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use crate::core::DeparseError;

/// Normalize a path lexically, resolving `.` and `..` components.
///
/// Leading `..` components of relative paths are preserved and `..` never
/// climbs above the root of an absolute path.
///
/// # Examples
///
/// ```rust
/// use deparse::utils::fs::normalize_path;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(normalize_path(Path::new("/foo/./bar/../baz")), PathBuf::from("/foo/baz"));
/// assert_eq!(normalize_path(Path::new("../src/./lib.rs")), PathBuf::from("../src/lib.rs"));
/// assert_eq!(normalize_path(Path::new("a/..")), PathBuf::from("."));
/// ```
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => components.push(component),
            },
            c => components.push(c),
        }
    }

    if components.is_empty() {
        return PathBuf::from(".");
    }
    components.iter().collect()
}

/// Join `path` onto the directory containing `context` and normalize.
///
/// Absolute paths are returned as-is; without a context the path is only
/// normalized.
#[must_use]
pub fn relative_to_file(path: &str, context: Option<&Path>) -> PathBuf {
    let candidate = Path::new(path);
    if candidate.is_absolute() {
        return candidate.to_path_buf();
    }
    match context.and_then(Path::parent) {
        Some(dir) => normalize_path(&dir.join(candidate)),
        None => normalize_path(candidate),
    }
}

/// Make `path` absolute against `cwd`, normalizing the result.
#[must_use]
pub fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize_path(path)
    } else {
        normalize_path(&cwd.join(path))
    }
}

/// The directory a path lives in, or the path itself when it is a directory.
#[must_use]
pub fn context_dir(path: &Path, cwd: &Path) -> PathBuf {
    let absolute = absolutize(path, cwd);
    if absolute.is_dir() {
        absolute
    } else {
        absolute.parent().map_or(absolute.clone(), Path::to_path_buf)
    }
}

/// Lower-cased extension used to pick an extractor.
///
/// Mirrors "everything after the last dot": `lib/a.min.JS` gives `js`, and a
/// name without a dot yields the whole file name.
#[must_use]
pub fn extension_of(path: &Path) -> String {
    let name = path.file_name().map_or_else(
        || path.to_string_lossy().into_owned(),
        |n| n.to_string_lossy().into_owned(),
    );
    name.rsplit_once('.').map_or(name.as_str(), |(_, ext)| ext).to_lowercase()
}

/// Read a source file. Invalid UTF-8 sequences are replaced rather than
/// rejected, since only declaration lines matter.
pub fn read_source_file(path: &Path) -> Result<String, DeparseError> {
    let bytes = fs::read(path).map_err(|e| {
        tracing::debug!("Failed to read {}: {e}", path.display());
        DeparseError::file_system("read", path)
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write command output to `destination`, where `-` means stdout.
pub fn write_output(destination: &str, content: &str) -> Result<()> {
    if destination == "-" {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(content.as_bytes()).context("Failed to write to stdout")?;
        return Ok(());
    }

    let path = Path::new(destination);
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
}
