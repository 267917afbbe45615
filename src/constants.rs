//! Constants shared across deparse.
//!
//! Naming conventions for the resolver, configuration file locations and
//! environment variables live here so that the CLI, the configuration layer and
//! the tests agree on them.

use std::collections::BTreeMap;

use crate::core::kinds;

/// Configuration file looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "deparse.toml";

/// Directory under the home directory holding the user configuration.
pub const USER_CONFIG_DIR: &str = ".deparse";

/// User configuration file name inside [`USER_CONFIG_DIR`].
pub const USER_CONFIG_FILE: &str = "config.toml";

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV_VAR: &str = "DEPARSE_CONFIG";

/// Marker distinguishing Closure-compiled JavaScript builds from plain ones
/// sharing the same `name-*.js` pattern space.
pub const GMODULE_MARKER: &str = ".gmodule";

/// Conventional subdirectories searched, in addition to each search
/// directory itself, per module kind. An empty entry stands for the search
/// directory.
pub const DEFAULT_SUBDIRS: &[(&str, &[&str])] = &[
    (kinds::JS_MODULE, &["lib/js", ""]),
    (kinds::JS_GMODULE, &["lib/js", ""]),
    (kinds::SJS_MODULE, &["lib/sjs", ""]),
    (kinds::SJS_GMODULE, &["lib/sjs", ""]),
    (kinds::CSS_MODULE, &["lib/css", ""]),
    (kinds::PCSS_MODULE, &["lib/pcss", ""]),
];

/// [`DEFAULT_SUBDIRS`] as an owned table, the shape used by configuration.
#[must_use]
pub fn default_subdirs() -> BTreeMap<String, Vec<String>> {
    DEFAULT_SUBDIRS
        .iter()
        .map(|(kind, dirs)| {
            ((*kind).to_string(), dirs.iter().map(|d| (*d).to_string()).collect())
        })
        .collect()
}
