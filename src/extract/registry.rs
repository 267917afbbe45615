//! Extension to extractor lookup.
//!
//! A [`FormatRegistry`] is an explicit value: it is built once (usually from
//! [`crate::config::DeparseConfig::registry`]) and lent to the tracker and the
//! library operations. Independent crawls may use different registries.

use std::collections::BTreeMap;
use std::path::Path;

use super::Extractor;
use super::c::C;
use super::javascript::JavaScript;
use super::paml::Paml;
use super::pcss::Pcss;
use super::sugar::Sugar;
use crate::core::DeparseError;
use crate::utils::fs::extension_of;

/// Creates a fresh extractor for one file.
pub type ExtractorFactory = fn() -> Box<dyn Extractor>;

#[derive(Clone, Copy)]
struct Format {
    name: &'static str,
    factory: ExtractorFactory,
}

/// Maps lower-cased file extensions to extractor factories.
#[derive(Clone, Default)]
pub struct FormatRegistry {
    extensions: BTreeMap<String, Format>,
}

impl std::fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.extensions()).finish()
    }
}

impl FormatRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in table: `paml`, `sjs`, `js`, `pcss` and the C family
    /// (`c`, `cxx`, `c++`, `cpp`, `h`).
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("paml", "paml", || Box::new(Paml::default()));
        registry.register("sjs", "sjs", || Box::new(Sugar::default()));
        registry.register("js", "js", || Box::new(JavaScript));
        registry.register("pcss", "pcss", || Box::new(Pcss));
        for extension in ["c", "cxx", "c++", "cpp", "h"] {
            registry.register(extension, "c", || Box::new(C));
        }
        registry
    }

    /// Register `factory` for `extension` under the format name `format`,
    /// replacing any previous registration.
    pub fn register(&mut self, extension: &str, format: &'static str, factory: ExtractorFactory) {
        self.extensions.insert(
            extension.to_lowercase(),
            Format {
                name: format,
                factory,
            },
        );
    }

    /// Make `extension` use the extractor registered for `target`, which may
    /// be either an extension or a format name.
    pub fn alias(&mut self, extension: &str, target: &str) -> Result<(), DeparseError> {
        let target = target.to_lowercase();
        let format = self
            .extensions
            .get(&target)
            .or_else(|| self.extensions.values().find(|f| f.name == target))
            .copied()
            .ok_or_else(|| DeparseError::ConfigError {
                message: format!("extension `{extension}` maps to unknown format `{target}`"),
            })?;
        self.extensions.insert(extension.to_lowercase(), format);
        Ok(())
    }

    /// Whether an extractor is registered for `extension`.
    #[must_use]
    pub fn supports(&self, extension: &str) -> bool {
        self.extensions.contains_key(&extension.to_lowercase())
    }

    /// A fresh extractor for `extension`.
    #[must_use]
    pub fn create(&self, extension: &str) -> Option<Box<dyn Extractor>> {
        self.extensions.get(&extension.to_lowercase()).map(|format| (format.factory)())
    }

    /// A fresh extractor for the extension of `path`.
    pub fn for_path(&self, path: &Path) -> Result<Box<dyn Extractor>, DeparseError> {
        let extension = extension_of(path);
        self.create(&extension).ok_or_else(|| DeparseError::UnsupportedFormat {
            extension,
            path: path.display().to_string(),
        })
    }

    /// Registered `(extension, format)` pairs, sorted by extension.
    pub fn extensions(&self) -> impl Iterator<Item = (&str, &'static str)> + '_ {
        self.extensions.iter().map(|(ext, format)| (ext.as_str(), format.name))
    }
}
