//! Integration test suite for deparse
//!
//! End-to-end tests over real directory trees, through the library and the
//! `deparse` binary.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **properties**: behaviours every implementation must keep
//! - **crawl**: multi-format crawls, diagnostics and graph output
//! - **config**: configuration files driving the resolver and registry
//! - **cli**: the command-line surface

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod cli;
mod config;
mod crawl;
mod properties;
