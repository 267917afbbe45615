//! Test utilities for deparse
//!
//! Helpers shared by unit tests and the integration suite: one-time log
//! initialization and temporary source trees.
//!
//! # Example
//!
//! ```rust,no_run
//! use deparse::extract::FormatRegistry;
//! use deparse::test_utils::SourceTreeBuilder;
//! use deparse::tracker::Tracker;
//!
//! let tree = SourceTreeBuilder::new()
//!     .with_file("app.js", "import ui from \"ui\"\n")
//!     .with_file("lib/js/ui.js", "")
//!     .build()
//!     .unwrap();
//! let registry = FormatRegistry::builtin();
//! let resolver = tree.resolver();
//! let result = Tracker::new(&registry, &resolver).crawl(&[tree.path("app.js")], true);
//! assert_eq!(result.requires.len(), 1);
//! ```

pub mod builder;

pub use builder::{SourceTree, SourceTreeBuilder};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. `level` wins over `RUST_LOG`; with
/// neither, tests run without a subscriber.
///
/// ```bash
/// RUST_LOG=deparse=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}
