//! Utility helpers shared across deparse.
//!
//! - [`fs`] - lexical path normalization, source reading and output writing

pub mod fs;

pub use fs::normalize_path;
