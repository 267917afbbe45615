//! Line-oriented dependency extraction.
//!
//! Every supported format plugs an [`Extractor`] into the same driver:
//!
//! 1. [`Extractor::begin_file`] runs before any line is scanned and usually
//!    seeds `provides` from the file name.
//! 2. Each line, in file order, goes through [`Extractor::scan_line`], which
//!    for most formats is a first-match-wins [`RuleTable`] dispatch.
//! 3. [`Extractor::end_file`] runs after the last line for deferred
//!    declarations.
//!
//! The extractor never owns the `provides`/`requires` sequences: the driver
//! owns a [`Declarations`] accumulator and lends it to every hook. Formats
//! with embedded sub-languages (see [`paml`]) lend the same accumulator to the
//! nested extractor, so nested declarations land directly in the host file's
//! result.
//!
//! A handler that matched a line but cannot make sense of it returns
//! [`Malformed`]; the driver turns it into
//! [`DeparseError::MalformedDeclaration`] and the file's extraction fails.
//!
//! # Example
//!
//! ```rust
//! use deparse::extract::{extract_text, pcss::Pcss};
//! use deparse::core::DependencyItem;
//! use std::path::Path;
//!
//! let mut extractor = Pcss::default();
//! let result = extract_text(
//!     &mut extractor,
//!     "@module foo\n@include bar\n",
//!     Some(Path::new("styles/main.pcss")),
//!     None,
//! )
//! .unwrap();
//! assert_eq!(result.provides, vec![DependencyItem::new("pcss:module", "foo")]);
//! assert_eq!(result.requires, vec![DependencyItem::new("pcss:file", "styles/bar")]);
//! ```

pub mod c;
pub mod javascript;
pub mod paml;
pub mod pcss;
pub mod registry;
pub mod rules;
pub mod sugar;

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use crate::core::{Candidate, DependencyItem, DeparseError, ParseResult};
use crate::utils::fs::{read_source_file, relative_to_file};

pub use registry::FormatRegistry;
pub use rules::{Malformed, Rule, RuleResult, RuleTable, Scan};

/// The file being scanned and the kind it was reached through.
///
/// `kind` is set when the tracker recurses into a file because another file
/// required it; extractors use it as the kind of their default provides so
/// both sides of the edge agree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceFile {
    /// The file on disk, `None` for in-memory text.
    pub path: Option<PathBuf>,
    /// The kind declared by whoever asked for this file.
    pub kind: Option<String>,
}

impl SourceFile {
    /// Describe a file and the kind it was requested as.
    #[must_use]
    pub fn new(path: Option<&Path>, kind: Option<&str>) -> Self {
        Self {
            path: path.map(Path::to_path_buf),
            kind: kind.map(str::to_string),
        }
    }

    /// The declared kind, or `default` when none was given.
    #[must_use]
    pub fn kind_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.kind.as_deref().unwrap_or(default)
    }

    /// Resolve a path mentioned in the file against the file's directory.
    #[must_use]
    pub fn normpath(&self, path: &str) -> PathBuf {
        relative_to_file(path, self.path.as_deref())
    }

    /// The default module name derived from the file name: the basename up to
    /// its last `-`, so `jquery-1.9.js` gives `jquery`.
    #[must_use]
    pub fn module_name(&self) -> Option<String> {
        let name = self.path.as_deref()?.file_name()?.to_string_lossy().into_owned();
        Some(name.rsplit_once('-').map_or(name.clone(), |(stem, _)| stem.to_string()))
    }

    /// Printable name for diagnostics.
    #[must_use]
    pub fn display(&self) -> Cow<'_, str> {
        self.path.as_deref().map_or(Cow::Borrowed("<text>"), |p| p.to_string_lossy())
    }
}

/// The `provides`/`requires` accumulator lent to extractor hooks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations {
    /// Provided items, in declaration order.
    pub provides: Vec<DependencyItem>,
    /// Required items, in declaration order.
    pub requires: Vec<DependencyItem>,
}

impl Declarations {
    /// Append a provided item.
    pub fn provide(&mut self, item: DependencyItem) {
        self.provides.push(item);
    }

    /// Append a required item.
    pub fn require(&mut self, item: DependencyItem) {
        self.requires.push(item);
    }

    /// Put a required item ahead of everything declared so far.
    pub fn require_first(&mut self, item: DependencyItem) {
        self.requires.insert(0, item);
    }

    fn into_result(self, source_path: Option<PathBuf>) -> ParseResult {
        ParseResult {
            source_path,
            provides: self.provides,
            requires: self.requires,
        }
    }
}

/// A format-specific extractor.
///
/// One instance scans one file; the registry hands out fresh instances.
pub trait Extractor: Send {
    /// Short format name (`js`, `paml`, ...).
    fn format(&self) -> &'static str;

    /// Hook run before the first line.
    fn begin_file(&mut self, _file: &SourceFile, _decls: &mut Declarations) {}

    /// Scan one line (without its terminator).
    fn scan_line(
        &mut self,
        file: &SourceFile,
        decls: &mut Declarations,
        line: &str,
    ) -> Result<(), Malformed>;

    /// Hook run after the last line.
    fn end_file(&mut self, _file: &SourceFile, _decls: &mut Declarations) {}

    /// Post-process resolver candidates for an item this format required.
    fn refine(
        &self,
        candidates: Vec<Candidate>,
        _item: &DependencyItem,
        _context: &Path,
    ) -> Vec<Candidate> {
        candidates
    }
}

/// Run `extractor` over in-memory text.
///
/// `path` is used for relative path normalization and default provides;
/// `kind` is the kind the file was requested as, if any.
pub fn extract_text(
    extractor: &mut dyn Extractor,
    text: &str,
    path: Option<&Path>,
    kind: Option<&str>,
) -> Result<ParseResult, DeparseError> {
    let file = SourceFile::new(path, kind);
    let mut decls = Declarations::default();

    extractor.begin_file(&file, &mut decls);
    for (index, line) in text.lines().enumerate() {
        extractor.scan_line(&file, &mut decls, line).map_err(|Malformed(reason)| {
            DeparseError::MalformedDeclaration {
                path: file.display().into_owned(),
                line: index + 1,
                reason,
            }
        })?;
    }
    extractor.end_file(&file, &mut decls);

    Ok(decls.into_result(file.path))
}

/// Read `path` and run `extractor` over it.
pub fn extract_path(
    extractor: &mut dyn Extractor,
    path: &Path,
    kind: Option<&str>,
) -> Result<ParseResult, DeparseError> {
    let text = read_source_file(path)?;
    extract_text(extractor, &text, Some(path), kind)
}
