//! Dependency items and per-file parse results.
//!
//! A [`DependencyItem`] is the `(kind, name)` pair exchanged between every
//! component: extractors produce them, the resolver maps them to files, the
//! tracker uses them as graph keys and the load-order sorter orders them.
//!
//! The `kind` is conventionally written `<format>:<category>`, for instance
//! `js:module`, `c:header`, `*:file` or `css:url`. These strings are part of the
//! observable output and other tooling may match on them, so the constants in
//! [`kinds`] are used verbatim everywhere.
//!
//! # Examples
//!
//! ```rust
//! use deparse::core::{DependencyItem, kinds};
//!
//! let item = DependencyItem::new(kinds::JS_MODULE, "jquery");
//! assert_eq!(item.format(), "js");
//! assert_eq!(item.category(), "module");
//! assert!(!item.is_url());
//! assert_eq!(item.to_string(), "js:module jquery");
//! ```

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};

/// Well-known dependency kinds.
pub mod kinds {
    /// A JavaScript module, resolved through `lib/js` style directories.
    pub const JS_MODULE: &str = "js:module";
    /// A Google Closure module (`goog.module` / `goog.provide`).
    pub const JS_GMODULE: &str = "js:gmodule";
    /// A JavaScript file referenced by path.
    pub const JS_FILE: &str = "js:file";
    /// A Sugar module, the preferred source variant of `js:module`.
    pub const SJS_MODULE: &str = "sjs:module";
    /// A Sugar module compiled as a Closure module.
    pub const SJS_GMODULE: &str = "sjs:gmodule";
    /// A plain CSS module.
    pub const CSS_MODULE: &str = "css:module";
    /// A CSS file referenced by path.
    pub const CSS_FILE: &str = "css:file";
    /// A stylesheet referenced by URL; never resolved on the filesystem.
    pub const CSS_URL: &str = "css:url";
    /// A PCSS module, the preferred source variant of `css:module`.
    pub const PCSS_MODULE: &str = "pcss:module";
    /// A PCSS file referenced by path.
    pub const PCSS_FILE: &str = "pcss:file";
    /// A PAML template referenced by path.
    pub const PAML_FILE: &str = "paml:file";
    /// A C/C++ header.
    pub const C_HEADER: &str = "c:header";
    /// A file of any format.
    pub const ANY_FILE: &str = "*:file";

    /// Suffix shared by every file kind (`*:file`, `js:file`, ...).
    pub const FILE_SUFFIX: &str = ":file";
    /// Suffix shared by every URL kind (`css:url`, ...).
    pub const URL_SUFFIX: &str = ":url";
}

/// The atomic `(kind, name)` unit a file can provide or require.
///
/// Two items are equal when both fields are equal; the type is used as a map
/// key throughout the crate. It serializes as a two-element sequence
/// `[kind, name]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DependencyItem {
    /// Namespace and category, e.g. `js:module`.
    pub kind: String,
    /// Symbolic name or path, depending on the kind.
    pub name: String,
}

impl DependencyItem {
    /// Create a new item.
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// The format half of the kind (`js` for `js:module`).
    #[must_use]
    pub fn format(&self) -> &str {
        self.kind.split_once(':').map_or(self.kind.as_str(), |(format, _)| format)
    }

    /// The category half of the kind (`module` for `js:module`).
    #[must_use]
    pub fn category(&self) -> &str {
        self.kind.split_once(':').map_or("", |(_, category)| category)
    }

    /// URL items are terminal: they are never resolved nor crawled.
    #[must_use]
    pub fn is_url(&self) -> bool {
        self.kind.ends_with(kinds::URL_SUFFIX)
    }

    /// Whether the item names a file (`*:file`, `js:file`, ...).
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.kind.ends_with(kinds::FILE_SUFFIX)
    }
}

impl fmt::Display for DependencyItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.name)
    }
}

impl<K: Into<String>, N: Into<String>> From<(K, N)> for DependencyItem {
    fn from((kind, name): (K, N)) -> Self {
        Self::new(kind, name)
    }
}

impl Serialize for DependencyItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.kind)?;
        tuple.serialize_element(&self.name)?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for DependencyItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ItemVisitor;

        impl<'de> Visitor<'de> for ItemVisitor {
            type Value = DependencyItem;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a [kind, name] pair")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let kind: String =
                    seq.next_element()?.ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let name: String =
                    seq.next_element()?.ok_or_else(|| de::Error::invalid_length(1, &self))?;
                Ok(DependencyItem::new(kind, name))
            }
        }

        deserializer.deserialize_tuple(2, ItemVisitor)
    }
}

/// A resolver candidate: the concrete kind found and where it lives.
///
/// For URL items the `path` holds the URL unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    /// The kind of the matched file, which may differ from the requested one
    /// (a `js:module` request can be satisfied by an `sjs:module` source).
    pub kind: String,
    /// Location of the match.
    pub path: PathBuf,
}

impl Candidate {
    /// Create a new candidate.
    pub fn new(kind: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            kind: kind.into(),
            path: path.into(),
        }
    }
}

/// What one extractor run produced for one file.
///
/// `provides` and `requires` keep declaration order, which the load-order
/// sorter relies on for tie-breaking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    /// The scanned file, `None` when text was parsed directly.
    #[serde(rename = "path")]
    pub source_path: Option<PathBuf>,
    /// Identities the file offers to the graph.
    pub provides: Vec<DependencyItem>,
    /// Items the file needs.
    pub requires: Vec<DependencyItem>,
}

impl ParseResult {
    /// Whether the file declared nothing at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.provides.is_empty() && self.requires.is_empty()
    }

    /// The scanned path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }
}
