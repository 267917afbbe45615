//! The `deparse.toml` settings file.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::constants::{
    CONFIG_ENV_VAR, PROJECT_CONFIG_FILE, USER_CONFIG_DIR, USER_CONFIG_FILE, default_subdirs,
};
use crate::core::DeparseError;
use crate::extract::FormatRegistry;
use crate::resolver::Resolver;

/// Resolver and registry settings.
///
/// ```toml
/// search_paths = ["vendor", "/opt/shared/web"]
/// verbose = true
///
/// [subdirs]
/// "js:module" = ["lib/js", "assets/js", ""]
///
/// [extensions]
/// mjs = "js"
/// hpp = "c"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeparseConfig {
    /// Directories searched before the working directory, in order.
    /// Relative entries are taken relative to the working directory.
    pub search_paths: Vec<PathBuf>,

    /// Conventional subdirectories per kind. An entry replaces the built-in
    /// list for that kind only.
    pub subdirs: BTreeMap<String, Vec<String>>,

    /// Extra file extensions, mapped to a built-in extension or format name.
    pub extensions: BTreeMap<String, String>,

    /// Report unresolved items at warning level.
    pub verbose: bool,
}

impl DeparseConfig {
    /// Load the first configuration found, or defaults when there is none.
    ///
    /// Lookup order: `explicit`, the `DEPARSE_CONFIG` environment variable,
    /// `./deparse.toml`, then `~/.deparse/config.toml`. A file named
    /// explicitly or through the environment must exist.
    pub async fn load(explicit: Option<&Path>) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to determine working directory")?;
        let from_env = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        match locate(explicit, from_env, &cwd, dirs::home_dir())? {
            Some(path) => Self::load_from(&path).await,
            None => {
                tracing::debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific file.
    pub async fn load_from(path: &Path) -> Result<Self> {
        tracing::debug!("Loading configuration from {}", path.display());
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&content)
            .map_err(DeparseError::from)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Subdirectory table with configured entries layered over the defaults.
    #[must_use]
    pub fn effective_subdirs(&self) -> BTreeMap<String, Vec<String>> {
        let mut table = default_subdirs();
        table.extend(self.subdirs.iter().map(|(k, v)| (k.clone(), v.clone())));
        table
    }

    /// A resolver for these settings.
    #[must_use]
    pub fn resolver(&self) -> Resolver {
        let mut resolver =
            Resolver::new().with_subdirs(self.effective_subdirs()).with_verbose(self.verbose);
        for dir in &self.search_paths {
            resolver.add_path(dir);
        }
        resolver
    }

    /// The built-in registry plus configured extension aliases.
    pub fn registry(&self) -> Result<FormatRegistry, DeparseError> {
        let mut registry = FormatRegistry::builtin();
        for (extension, target) in &self.extensions {
            registry.alias(extension, target)?;
        }
        Ok(registry)
    }
}

/// Pick the configuration file to load.
fn locate(
    explicit: Option<&Path>,
    from_env: Option<PathBuf>,
    cwd: &Path,
    home: Option<PathBuf>,
) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit.map(Path::to_path_buf).or(from_env) {
        if !path.is_file() {
            bail!(DeparseError::ConfigError {
                message: format!("configuration file not found: {}", path.display()),
            });
        }
        return Ok(Some(path));
    }

    let project = cwd.join(PROJECT_CONFIG_FILE);
    if project.is_file() {
        return Ok(Some(project));
    }
    Ok(home.map(|h| h.join(USER_CONFIG_DIR).join(USER_CONFIG_FILE)).filter(|p| p.is_file()))
}
