//! Generic TOML parsing with file path context.
//!
//! ```rust,no_run
//! use deparse::config::{DeparseConfig, parse_config};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config: DeparseConfig = parse_config(Path::new("deparse.toml"))?;
//! println!("{} search paths", config.search_paths.len());
//! # Ok(())
//! # }
//! ```
//!
//! Errors name the file and whether reading or parsing failed:
//!
//! ```text
//! Failed to parse config file: /path/to/deparse.toml
//! Caused by:
//!     unknown field `searchpaths`
//! ```

use anyhow::{Context, Result};
use std::path::Path;

/// Read and deserialize the TOML file at `path`.
///
/// This is the blocking counterpart of
/// [`DeparseConfig::load_from`](super::DeparseConfig::load_from), usable with
/// any `DeserializeOwned` type.
pub fn parse_config<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeparseConfig;
    use tempfile::tempdir;

    #[test]
    fn test_parse_config() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("deparse.toml");
        std::fs::write(&config_path, "search_paths = [\"a\", \"b\"]\n[extensions]\nhpp = \"c\"\n")
            .unwrap();

        let config: DeparseConfig = parse_config(&config_path).unwrap();
        assert_eq!(config.search_paths.len(), 2);
        assert_eq!(config.extensions["hpp"], "c");
        assert!(!config.verbose);
    }

    #[test]
    fn test_parse_config_errors() {
        let temp = tempdir().unwrap();

        let missing = parse_config::<DeparseConfig>(&temp.path().join("missing.toml"));
        assert!(missing.unwrap_err().to_string().starts_with("Failed to read config file"));

        let invalid = temp.path().join("invalid.toml");
        std::fs::write(&invalid, "search_paths = {").unwrap();
        let result = parse_config::<DeparseConfig>(&invalid);
        assert!(result.unwrap_err().to_string().starts_with("Failed to parse config file"));
    }
}
