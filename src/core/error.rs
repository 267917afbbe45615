//! Error handling for deparse
//!
//! Two layers, in the same spirit as most CLI tools built on `anyhow`:
//! - [`DeparseError`] - strongly-typed failures raised by the library
//! - [`ErrorContext`] - a wrapper adding details and an actionable suggestion
//!   for display on the terminal
//!
//! # Propagation policy
//!
//! Only [`DeparseError::MalformedDeclaration`] aborts work, and only the
//! extraction of the file it occurred in. Unsupported formats and unresolved
//! dependencies are reported as crawl diagnostics (see
//! [`crate::tracker::Diagnostic`]) and never surface as `Err` from a crawl.
//!
//! # Examples
//!
//! ```rust,no_run
//! use deparse::core::{DeparseError, user_friendly_error};
//!
//! let error = DeparseError::UnsupportedFormat {
//!     extension: "rb".to_string(),
//!     path: "lib/app.rb".to_string(),
//! };
//! let context = user_friendly_error(anyhow::Error::from(error));
//! context.display(); // colored error with a suggestion
//! ```

use colored::Colorize;
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// The main error type for deparse operations.
#[derive(Error, Debug)]
pub enum DeparseError {
    /// No extractor is registered for the file extension.
    #[error("No extractor registered for `{extension}` files: {path}")]
    UnsupportedFormat {
        /// The lower-cased extension that was looked up
        extension: String,
        /// The file that was skipped
        path: String,
    },

    /// A recognized declaration violates its own sub-grammar.
    ///
    /// The extraction result of the file is no longer trustworthy, so the
    /// whole file is rejected.
    #[error("Malformed declaration in {path} at line {line}: {reason}")]
    MalformedDeclaration {
        /// The file being scanned (`<text>` for in-memory input)
        path: String,
        /// 1-based line number
        line: usize,
        /// What was wrong with the declaration
        reason: String,
    },

    /// Resolution produced no candidate path.
    #[error("Unresolved dependency `{kind} {name}` required by {path}")]
    UnresolvedDependency {
        /// Kind of the required item
        kind: String,
        /// Name of the required item
        name: String,
        /// The file that required it
        path: String,
    },

    /// A file system operation failed.
    #[error("File system error during {operation}: {path}")]
    FileSystemError {
        /// The operation that failed (e.g. "read")
        operation: String,
        /// The path involved
        path: String,
    },

    /// Configuration file problem.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the problem
        message: String,
    },

    /// Standard I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML deserialization error.
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Anything else.
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

impl DeparseError {
    /// Build a [`DeparseError::FileSystemError`] for `path`.
    pub fn file_system(operation: impl Into<String>, path: &Path) -> Self {
        Self::FileSystemError {
            operation: operation.into(),
            path: path.display().to_string(),
        }
    }
}

impl Clone for DeparseError {
    fn clone(&self) -> Self {
        match self {
            Self::UnsupportedFormat {
                extension,
                path,
            } => Self::UnsupportedFormat {
                extension: extension.clone(),
                path: path.clone(),
            },
            Self::MalformedDeclaration {
                path,
                line,
                reason,
            } => Self::MalformedDeclaration {
                path: path.clone(),
                line: *line,
                reason: reason.clone(),
            },
            Self::UnresolvedDependency {
                kind,
                name,
                path,
            } => Self::UnresolvedDependency {
                kind: kind.clone(),
                name: name.clone(),
                path: path.clone(),
            },
            Self::FileSystemError {
                operation,
                path,
            } => Self::FileSystemError {
                operation: operation.clone(),
                path: path.clone(),
            },
            Self::ConfigError {
                message,
            } => Self::ConfigError {
                message: message.clone(),
            },
            // io::Error and toml errors are not Clone; keep kind and message
            Self::IoError(e) => Self::IoError(std::io::Error::new(e.kind(), e.to_string())),
            Self::TomlError(e) => Self::Other {
                message: format!("TOML parsing error: {e}"),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Error wrapper with user-facing details and a suggestion.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: DeparseError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a context without details or suggestion.
    #[must_use]
    pub const fn new(error: DeparseError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr: error in red, details in yellow,
    /// suggestion in green.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] with a suggestion where one is known.
///
/// The whole `anyhow` chain is searched, so errors wrapped with `.context(..)`
/// are still recognized.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    for cause in error.chain() {
        if let Some(deparse_error) = cause.downcast_ref::<DeparseError>() {
            return create_error_context(deparse_error);
        }

        if let Some(io_error) = cause.downcast_ref::<std::io::Error>() {
            let context = ErrorContext::new(DeparseError::Other {
                message: error.to_string(),
            });
            return match io_error.kind() {
                std::io::ErrorKind::NotFound => context
                    .with_suggestion("Check that the file or directory exists and the path is correct"),
                std::io::ErrorKind::PermissionDenied => context
                    .with_suggestion("Check the file permissions or run from a directory you own"),
                _ => context.with_details(io_error.to_string()),
            };
        }
    }

    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
    let context = ErrorContext::new(DeparseError::Other {
        message: error.to_string(),
    });
    if chain.is_empty() {
        context
    } else {
        context.with_details(chain.join(": "))
    }
}

/// Attach the suggestion that matches a [`DeparseError`] variant.
#[must_use]
pub fn create_error_context(error: &DeparseError) -> ErrorContext {
    let context = ErrorContext::new(error.clone());
    match error {
        DeparseError::UnsupportedFormat {
            extension, ..
        } => context
            .with_suggestion(format!(
                "Map `{extension}` to a known format in the [extensions] table of deparse.toml"
            ))
            .with_details("Built-in formats: paml, sjs, js, pcss, c (c, cxx, c++, cpp, h)"),
        DeparseError::MalformedDeclaration {
            ..
        } => context.with_suggestion(
            "Fix the declaration syntax; attribute lists are `name=value` pairs separated by commas",
        ),
        DeparseError::UnresolvedDependency {
            ..
        } => context
            .with_suggestion("Add the directory containing the dependency with -I or `search_paths`"),
        DeparseError::ConfigError {
            ..
        }
        | DeparseError::TomlError(_) => {
            context.with_suggestion("Check the syntax of deparse.toml or the file passed with --config")
        }
        _ => context,
    }
}
