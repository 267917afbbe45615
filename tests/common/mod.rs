//! Common test utilities for deparse integration tests

// Not every helper is used by every test file
#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;

/// Site fixture shared by crawl and CLI tests.
///
/// ```text
/// index.paml ── css:url reset, css:module theme, js:module app, paml:file footer
/// footer.paml ── js:file lib/js/analytics.js
/// lib/sjs/app.sjs ── extend (legacy runtime), widgets
/// ```
pub const SITE: &[(&str, &str)] = &[
    (
        "index.paml",
        "html\n\thead\n\t\t<link(rel=stylesheet,href=\"https://cdn.example.com/reset.css\")\n\t\t@require:css(theme)\n\t\t@require:js(app)\n\tbody\n\t\t%include footer\n",
    ),
    ("footer.paml", "\t<script(src=\"lib/js/analytics.js\")\n"),
    ("lib/js/analytics.js", "// analytics\n"),
    ("lib/pcss/theme.pcss", "@module theme\n"),
    ("lib/sjs/app.sjs", "@module app\n@import widgets\n"),
    ("lib/sjs/widgets.sjs", "@feature sugar 2\n@module widgets\n"),
    ("lib/sjs/extend.sjs", "@feature sugar 2\n@module extend\n"),
];

/// The `deparse` binary, run in `dir` with no ambient configuration.
pub fn deparse_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_deparse"));
    cmd.current_dir(dir).env("HOME", dir).env_remove("DEPARSE_CONFIG").env_remove("RUST_LOG");
    cmd
}

/// Position of `name` in `names`.
pub fn position(names: &[&str], name: &str) -> usize {
    names.iter().position(|n| *n == name).unwrap_or_else(|| panic!("{name} missing from {names:?}"))
}
