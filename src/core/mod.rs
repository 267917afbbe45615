//! Core types shared by every component.
//!
//! - [`item`] - the `(kind, name)` [`DependencyItem`], resolver [`Candidate`]s
//!   and per-file [`ParseResult`]s
//! - [`error`] - [`DeparseError`], [`ErrorContext`] and [`user_friendly_error`]

pub mod error;
pub mod item;

pub use error::{DeparseError, ErrorContext, create_error_context, user_friendly_error};
pub use item::{Candidate, DependencyItem, ParseResult, kinds};
