//! Source tree builder for simplified test setup
//!
//! Builds a throwaway directory of source files and a resolver anchored in it,
//! so tests never depend on the process working directory.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::resolver::Resolver;

/// A builder for temporary source trees with a fluent API
#[derive(Default)]
pub struct SourceTreeBuilder {
    files: Vec<(String, String)>,
    dirs: Vec<String>,
    search_paths: Vec<String>,
}

impl SourceTreeBuilder {
    /// Create an empty builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, relative to the tree root
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.push((path.into(), content.into()));
        self
    }

    /// Add multiple files
    #[must_use]
    pub fn with_files(mut self, files: &[(&str, &str)]) -> Self {
        for (path, content) in files {
            self.files.push(((*path).to_string(), (*content).to_string()));
        }
        self
    }

    /// Create an empty directory
    #[must_use]
    pub fn with_dir(mut self, path: impl Into<String>) -> Self {
        self.dirs.push(path.into());
        self
    }

    /// Register a directory, relative to the tree root, as a resolver search path
    #[must_use]
    pub fn with_search_path(mut self, path: impl Into<String>) -> Self {
        self.search_paths.push(path.into());
        self
    }

    /// Write everything to a new temporary directory
    pub fn build(self) -> Result<SourceTree> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path().to_path_buf();

        for dir in &self.dirs {
            std::fs::create_dir_all(root.join(dir))?;
        }
        for (path, content) in &self.files {
            let full_path = root.join(path);
            if let Some(parent) = full_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(full_path, content)?;
        }

        let search_paths = self.search_paths.iter().map(|p| root.join(p)).collect();
        Ok(SourceTree {
            _temp_dir: temp_dir,
            root,
            search_paths,
        })
    }
}

/// A built source tree, removed when dropped
pub struct SourceTree {
    _temp_dir: TempDir, // Keep temp dir alive
    root: PathBuf,
    search_paths: Vec<PathBuf>,
}

impl SourceTree {
    /// The tree root
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of `relative` inside the tree
    #[must_use]
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Write another file after the tree was built
    pub fn write(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// A resolver whose working directory is the tree root
    #[must_use]
    pub fn resolver(&self) -> Resolver {
        let mut resolver = Resolver::new().with_working_dir(&self.root);
        for dir in &self.search_paths {
            resolver.add_path(dir);
        }
        resolver
    }
}
