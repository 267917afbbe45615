//! Symbol to path resolution.
//!
//! The [`Resolver`] turns a [`DependencyItem`] requested from some file into
//! candidate files on disk, using naming conventions rather than an index.
//!
//! # Search directories
//!
//! For a request made from `context`, the directories searched are, in order:
//! the configured search paths, the working directory, and the directory of
//! `context` (or `context` itself when it is a directory). Module kinds widen
//! that list with conventional subdirectories (`lib/js`, `lib/sjs`, ...) taken
//! from a per-kind table.
//!
//! # Policies
//!
//! | requested kind | candidates                                                    |
//! |----------------|---------------------------------------------------------------|
//! | `js:module`    | every `name.sjs` / `name*-*.sjs`, else the last `name-*.js`   |
//! | `js:gmodule`   | every `name*.sjs` / `name*-*.sjs`, else the last `.gmodule` build |
//! | `css:module`   | every `name*.pcss`, else the last `name.css`                  |
//! | `*:file`       | every existing `name` / `name.<format>` across the directories |
//! | `*:url`        | the item itself                                               |
//! | none           | all of the above, concatenated                                |
//!
//! Dots in module names are path separators. "Last" means lexicographically
//! last, which picks the newest of `jquery-1.9.js` and `jquery-2.0.js` for
//! simple version schemes. Results are deduplicated, first seen wins.
//!
//! # Examples
//!
//! ```rust,no_run
//! use deparse::core::DependencyItem;
//! use deparse::resolver::Resolver;
//! use std::path::Path;
//!
//! let resolver = Resolver::new();
//! let item = DependencyItem::new("js:module", "widgets.button");
//! for candidate in resolver.resolve(&item, Path::new("site/index.paml")) {
//!     println!("{} {}", candidate.kind, candidate.path.display());
//! }
//! ```

mod search;

use indexmap::IndexMap;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::constants::{GMODULE_MARKER, default_subdirs};
use crate::core::{Candidate, DependencyItem, kinds};
use crate::extract::{Extractor, FormatRegistry};
use crate::utils::fs::{absolutize, context_dir};

pub use search::dedup_stable;
use search::{existing, glob_in, name_pattern, path_contains, widen};

/// Resolves dependency items to candidate files.
///
/// Stateless apart from its configuration, so one value can serve any number
/// of `resolve` calls, including from several crawls.
#[derive(Debug, Clone)]
pub struct Resolver {
    search_paths: Vec<PathBuf>,
    subdirs: BTreeMap<String, Vec<String>>,
    working_dir: Option<PathBuf>,
    verbose: bool,
}

impl Default for Resolver {
    fn default() -> Self {
        Self {
            search_paths: Vec::new(),
            subdirs: default_subdirs(),
            working_dir: None,
            verbose: false,
        }
    }
}

impl Resolver {
    /// A resolver with the default subdirectory conventions and no extra
    /// search paths.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the per-kind subdirectory table.
    #[must_use]
    pub fn with_subdirs(mut self, subdirs: BTreeMap<String, Vec<String>>) -> Self {
        self.subdirs = subdirs;
        self
    }

    /// Resolve against `dir` instead of the process working directory.
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Report unresolved items at warning level instead of debug.
    #[must_use]
    pub const fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Append a search directory; it is searched before the working directory.
    pub fn add_path(&mut self, dir: impl Into<PathBuf>) -> &mut Self {
        self.search_paths.push(dir.into());
        self
    }

    /// Configured search directories, in search order.
    #[must_use]
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// The directory relative paths are resolved against.
    #[must_use]
    pub fn working_dir(&self) -> PathBuf {
        self.working_dir
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Candidates for `item` requested from `context`.
    ///
    /// An item with an empty kind is resolved as if no kind were known.
    #[must_use]
    pub fn resolve(&self, item: &DependencyItem, context: &Path) -> Vec<Candidate> {
        let kind = Some(item.kind.as_str()).filter(|k| !k.is_empty());
        self.candidates(kind, &item.name, context)
    }

    /// Candidates for a bare name of unknown kind: every strategy is tried
    /// and the results are concatenated.
    #[must_use]
    pub fn resolve_any(&self, name: &str, context: &Path) -> Vec<Candidate> {
        self.candidates(None, name, context)
    }

    /// Resolve `item` on behalf of `extractor`, letting the format refine the
    /// candidates. An empty result is logged but is not an error.
    #[must_use]
    pub fn resolve_with(
        &self,
        extractor: &dyn Extractor,
        item: &DependencyItem,
        context: &Path,
    ) -> Vec<Candidate> {
        let candidates = self.resolve(item, context);
        let candidates = dedup_stable(extractor.refine(candidates, item, context));
        if candidates.is_empty() {
            if self.verbose {
                tracing::warn!(
                    "Unresolved item in {} extractor: {item} at {}",
                    extractor.format(),
                    context.display()
                );
            } else {
                tracing::debug!("Unresolved item {item} at {}", context.display());
            }
        }
        candidates
    }

    /// Look up bare symbol names, as each registered format would resolve
    /// them from `root` (the working directory by default).
    ///
    /// Every name gets an entry, possibly empty; candidates are
    /// deduplicated across formats.
    #[must_use]
    pub fn find<S: AsRef<str>>(
        &self,
        names: &[S],
        root: Option<&Path>,
        registry: &FormatRegistry,
    ) -> IndexMap<String, Vec<Candidate>> {
        let root = root.map_or_else(|| self.working_dir(), Path::to_path_buf);
        let formats: BTreeSet<&str> = registry.extensions().map(|(ext, _)| ext).collect();
        let mut seen_formats = BTreeSet::new();
        let extractors: Vec<Box<dyn Extractor>> = formats
            .into_iter()
            .filter_map(|ext| registry.create(ext))
            .filter(|extractor| seen_formats.insert(extractor.format()))
            .collect();

        let mut matches = IndexMap::new();
        for name in names {
            let name = name.as_ref();
            let mut found: Vec<Candidate> = Vec::new();
            for extractor in &extractors {
                let refined =
                    extractor.refine(self.resolve_any(name, &root), &DependencyItem::new("", name), &root);
                found.extend(refined);
            }
            let entry: &mut Vec<Candidate> = matches.entry(name.to_string()).or_default();
            entry.extend(found);
            *entry = dedup_stable(std::mem::take(entry));
        }
        matches
    }

    fn candidates(&self, kind: Option<&str>, name: &str, context: &Path) -> Vec<Candidate> {
        if let Some(kind) = kind
            && kind.ends_with(kinds::URL_SUFFIX)
        {
            return vec![Candidate::new(kind, name)];
        }

        let dirs = self.search_dirs(context);
        let mut found = Vec::new();
        if kind.is_none_or(|k| k == kinds::JS_MODULE) {
            found.extend(self.js_module(&dirs, name));
        }
        if kind.is_none_or(|k| k == kinds::JS_GMODULE) {
            found.extend(self.js_gmodule(&dirs, name));
        }
        if kind.is_none_or(|k| k == kinds::CSS_MODULE) {
            found.extend(self.css_module(&dirs, name));
        }
        if kind.is_none_or(|k| k.ends_with(kinds::FILE_SUFFIX)) {
            found.extend(file(&dirs, kind, name));
        }
        dedup_stable(found)
    }

    fn search_dirs(&self, context: &Path) -> Vec<PathBuf> {
        let cwd = self.working_dir();
        let mut dirs: Vec<PathBuf> =
            self.search_paths.iter().map(|dir| absolutize(dir, &cwd)).collect();
        dirs.push(absolutize(&cwd, &cwd));
        dirs.push(context_dir(context, &cwd));
        dedup_stable(dirs)
    }

    fn js_module(&self, dirs: &[PathBuf], name: &str) -> Vec<Candidate> {
        let name = name.replace('.', "/");
        let plain: Vec<PathBuf> = glob_in(
            &widen(dirs, &self.subdirs, kinds::JS_MODULE),
            &[name_pattern(&name, "-*.js")],
        )
        .into_iter()
        .filter(|p| !path_contains(p, GMODULE_MARKER))
        .collect();
        let preferred = glob_in(
            &widen(dirs, &self.subdirs, kinds::SJS_MODULE),
            &[name_pattern(&name, ".sjs"), name_pattern(&name, "*-*.sjs")],
        );
        prefer(kinds::SJS_MODULE, preferred, kinds::JS_MODULE, plain)
    }

    fn js_gmodule(&self, dirs: &[PathBuf], name: &str) -> Vec<Candidate> {
        let name = name.replace('.', "/");
        let plain: Vec<PathBuf> = glob_in(
            &widen(dirs, &self.subdirs, kinds::JS_GMODULE),
            &[name_pattern(&name, "-*.js")],
        )
        .into_iter()
        .filter(|p| path_contains(p, GMODULE_MARKER))
        .collect();
        let preferred = glob_in(
            &widen(dirs, &self.subdirs, kinds::SJS_GMODULE),
            &[name_pattern(&name, "*.sjs"), name_pattern(&name, "*-*.sjs")],
        );
        prefer(kinds::SJS_GMODULE, preferred, kinds::JS_GMODULE, plain)
    }

    fn css_module(&self, dirs: &[PathBuf], name: &str) -> Vec<Candidate> {
        let plain =
            glob_in(&widen(dirs, &self.subdirs, kinds::CSS_MODULE), &[name_pattern(name, ".css")]);
        let preferred =
            glob_in(&widen(dirs, &self.subdirs, kinds::PCSS_MODULE), &[name_pattern(name, "*.pcss")]);
        prefer(kinds::PCSS_MODULE, preferred, kinds::CSS_MODULE, plain)
    }
}

/// All preferred matches, or only the last plain one.
fn prefer(
    preferred_kind: &str,
    preferred: Vec<PathBuf>,
    plain_kind: &str,
    plain: Vec<PathBuf>,
) -> Vec<Candidate> {
    if preferred.is_empty() {
        plain.into_iter().next_back().map(|p| Candidate::new(plain_kind, p)).into_iter().collect()
    } else {
        preferred.into_iter().map(|p| Candidate::new(preferred_kind, p)).collect()
    }
}

/// Literal file lookup: `name`, then `name.<format>` when the kind names a
/// concrete format.
fn file(dirs: &[PathBuf], kind: Option<&str>, name: &str) -> Vec<Candidate> {
    let format = kind.and_then(|k| k.split_once(':')).map(|(format, _)| format);
    let with_extension = format.filter(|f| !f.is_empty() && *f != "*").map(|f| format!("{name}.{f}"));

    let mut names = vec![name];
    if let Some(alt) = with_extension.as_deref() {
        names.push(alt);
    }
    existing(dirs, &names).into_iter().map(|p| Candidate::new(kinds::ANY_FILE, p)).collect()
}
