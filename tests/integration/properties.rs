//! Behaviours that hold for every input, checked on small trees.

use deparse::core::{Candidate, DependencyItem};
use deparse::extract::FormatRegistry;
use deparse::ops;
use deparse::resolver::Resolver;
use deparse::test_utils::{SourceTreeBuilder, init_test_logging};
use deparse::tracker::{DiagnosticKind, Tracker};
use std::path::Path;

use crate::common::position;

#[test]
fn test_extraction_is_deterministic() {
    init_test_logging(None);
    let tree = SourceTreeBuilder::new()
        .with_file(
            "page.paml",
            "\t<script@sugar\n\t\t@module page\n\t\t@import a, b\n\t<link(rel=stylesheet,href=x.css)\n",
        )
        .build()
        .unwrap();
    let registry = FormatRegistry::builtin();

    let first = ops::parse_file(&tree.path("page.paml"), &registry).unwrap();
    let second = ops::parse_file(&tree.path("page.paml"), &registry).unwrap();
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn test_url_items_pass_through_unchanged() {
    let resolver = Resolver::new().with_working_dir("/does/not/exist");
    let item = DependencyItem::new("css:url", "https://cdn.example.com/a.css");

    let found = resolver.resolve(&item, Path::new("/does/not/exist/index.paml"));
    assert_eq!(found, vec![Candidate::new("css:url", "https://cdn.example.com/a.css")]);
}

#[test]
fn test_composite_path_crawls_each_part() {
    let tree = SourceTreeBuilder::new()
        .with_file("lib/a.js", "import x from \"x\"\n")
        .with_file("lib/b.js", "import y from \"y\"\n")
        .build()
        .unwrap();
    let registry = FormatRegistry::builtin();
    let resolver = tree.resolver();

    let result = ops::crawl(&[tree.path("lib/a.js+b.js")], false, &registry, &resolver);
    let visited: Vec<_> = result.provides.iter().map(|p| p.path.clone()).collect();
    assert_eq!(visited, vec![tree.path("lib/a.js"), tree.path("lib/b.js")]);
    assert_eq!(
        result.requires,
        vec![DependencyItem::new("js:module", "x"), DependencyItem::new("js:module", "y")]
    );
}

#[test]
fn test_cycles_terminate() {
    let tree = SourceTreeBuilder::new()
        .with_file("lib/sjs/a.sjs", "@feature sugar 2\n@module a\n@import b\n")
        .with_file("lib/sjs/b.sjs", "@feature sugar 2\n@module b\n@import a\n")
        .build()
        .unwrap();
    let registry = FormatRegistry::builtin();
    let resolver = tree.resolver();

    let result = ops::crawl(&[tree.path("lib/sjs/a.sjs")], true, &registry, &resolver);
    let names: Vec<&str> = result.requires.iter().map(|i| i.name.as_str()).collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, vec!["a", "b"]);
    assert_eq!(result.provides.len(), 2);
    assert!(result.diagnostics.iter().any(|d| d.kind == DiagnosticKind::CycleDetected));
}

#[test]
fn test_relative_import_resolves_to_sibling_file() {
    let tree = SourceTreeBuilder::new()
        .with_file("src/app.js", "import { helper } from \"./util\";\n")
        .with_file("src/util.js", "")
        .build()
        .unwrap();
    let registry = FormatRegistry::builtin();

    let parsed = ops::parse_file(&tree.path("src/app.js"), &registry).unwrap();
    let expected = DependencyItem::new("js:file", tree.path("src/util").to_string_lossy());
    assert_eq!(parsed.requires, vec![expected.clone()]);

    let found = tree.resolver().resolve(&expected, &tree.path("src/app.js"));
    assert_eq!(found, vec![Candidate::new("*:file", tree.path("src/util.js"))]);
}

#[test]
fn test_pcss_module_and_include() {
    let tree = SourceTreeBuilder::new()
        .with_file("styles/a.pcss", "@module foo\n@include bar\n")
        .build()
        .unwrap();
    let registry = FormatRegistry::builtin();

    let parsed = ops::parse_file(&tree.path("styles/a.pcss"), &registry).unwrap();
    assert_eq!(parsed.provides, vec![DependencyItem::new("pcss:module", "foo")]);
    assert_eq!(
        parsed.requires,
        vec![DependencyItem::new("pcss:file", tree.path("styles/bar").to_string_lossy())]
    );
}

#[test]
fn test_preferred_format_hides_fallback() {
    let tree = SourceTreeBuilder::new()
        .with_file("lib/js/ui-1.0.js", "")
        .with_file("lib/sjs/ui.sjs", "@module ui\n")
        .build()
        .unwrap();

    let found = tree
        .resolver()
        .resolve(&DependencyItem::new("js:module", "ui"), &tree.path("index.paml"));
    assert_eq!(found, vec![Candidate::new("sjs:module", tree.path("lib/sjs/ui.sjs"))]);
}

#[test]
fn test_unresolved_item_does_not_stop_the_crawl() {
    let tree = SourceTreeBuilder::new()
        .with_file("app.sjs", "@feature sugar 2\n@module app\n@import known, missing\n")
        .with_file("lib/sjs/known.sjs", "@feature sugar 2\n@module known\n@import deep\n")
        .with_file("lib/sjs/deep.sjs", "@feature sugar 2\n@module deep\n")
        .build()
        .unwrap();
    let registry = FormatRegistry::builtin();
    let resolver = tree.resolver();
    let mut tracker = Tracker::new(&registry, &resolver);

    let result = tracker.crawl(&[tree.path("app.sjs")], true);
    let missing = DependencyItem::new("js:module", "missing");
    let names: Vec<&str> = result.requires.iter().map(|i| i.name.as_str()).collect();

    assert_eq!(names.len(), 3);
    assert!(position(&names, "deep") < position(&names, "known"));
    assert!(result.requires.contains(&missing));
    assert!(result.resolved_paths(&missing).is_none());
    assert_eq!(
        result.resolved_paths(&DependencyItem::new("js:module", "deep")),
        Some(&[tree.path("lib/sjs/deep.sjs")][..])
    );
    assert_eq!(tracker.visited().count(), 3);

    let unresolved: Vec<_> = result
        .diagnostics
        .iter()
        .filter(|d| d.kind == DiagnosticKind::UnresolvedDependency)
        .collect();
    assert_eq!(unresolved.len(), 1);
    assert!(unresolved[0].message.contains("missing"));
}
