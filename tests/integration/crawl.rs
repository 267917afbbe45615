//! Multi-format crawls over the shared site fixture.

use deparse::core::DependencyItem;
use deparse::extract::FormatRegistry;
use deparse::graph::{GraphFormat, TypeFilter, render};
use deparse::test_utils::{SourceTree, SourceTreeBuilder};
use deparse::tracker::{DiagnosticKind, Severity, Tracker};

use crate::common::{SITE, position};

fn site() -> SourceTree {
    SourceTreeBuilder::new().with_files(SITE).build().unwrap()
}

#[test]
fn test_site_crawl_orders_dependencies_first() {
    let tree = site();
    let registry = FormatRegistry::builtin();
    let resolver = tree.resolver();

    let result = Tracker::new(&registry, &resolver).crawl(&[tree.path("index.paml")], true);
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);

    let names: Vec<&str> = result.requires.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names.len(), 7);
    assert!(position(&names, "extend") < position(&names, "app"));
    assert!(position(&names, "widgets") < position(&names, "app"));

    let url = DependencyItem::new("css:url", "https://cdn.example.com/reset.css");
    assert!(result.requires.contains(&url));
    assert!(result.resolved_paths(&url).is_none());

    assert_eq!(
        result.resolved_paths(&DependencyItem::new("paml:file", "footer.paml")),
        Some(&[tree.path("footer.paml")][..])
    );
    assert_eq!(
        result.resolved_paths(&DependencyItem::new("js:file", "lib/js/analytics.js")),
        Some(&[tree.path("lib/js/analytics.js")][..])
    );
    assert_eq!(result.provides.len(), 7);
}

#[test]
fn test_non_recursive_crawl_stays_on_entry() {
    let tree = site();
    let registry = FormatRegistry::builtin();
    let resolver = tree.resolver();
    let mut tracker = Tracker::new(&registry, &resolver);

    let result = tracker.crawl(&[tree.path("index.paml")], false);
    assert_eq!(tracker.visited().count(), 1);
    assert_eq!(result.requires.len(), 4);
    // resolution still happens, only the descent is skipped
    assert!(result.resolved_paths(&DependencyItem::new("js:module", "app")).is_some());
}

#[test]
fn test_crawls_accumulate() {
    let tree = site();
    let registry = FormatRegistry::builtin();
    let resolver = tree.resolver();
    let mut tracker = Tracker::new(&registry, &resolver);

    tracker.crawl(&[tree.path("footer.paml")], false);
    let result = tracker.crawl(&[tree.path("lib/sjs/app.sjs")], false);

    let names: Vec<&str> = result.requires.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["lib/js/analytics.js", "extend", "widgets"]);
    assert_eq!(result.provides.len(), 2);
}

#[test]
fn test_bad_files_leave_diagnostics() {
    let tree = SourceTreeBuilder::new()
        .with_file("good.sjs", "@feature sugar 2\n@module good\n@import ui\n")
        .with_file("bad.paml", "\t<link(rel=stylesheet,)\n")
        .with_file("notes.txt", "nothing to see\n")
        .build()
        .unwrap();
    let registry = FormatRegistry::builtin();
    let resolver = tree.resolver();

    let result = Tracker::new(&registry, &resolver).crawl(
        &[tree.path("good.sjs"), tree.path("bad.paml"), tree.path("notes.txt")],
        false,
    );

    assert_eq!(result.requires, vec![DependencyItem::new("js:module", "ui")]);
    assert_eq!(result.provides.len(), 1);
    assert!(result.has_errors());

    let kinds: Vec<_> = result.diagnostics.iter().map(|d| (d.kind, d.path.clone())).collect();
    assert_eq!(
        kinds,
        vec![
            (DiagnosticKind::MalformedDeclaration, Some(tree.path("bad.paml"))),
            (DiagnosticKind::UnsupportedFormat, Some(tree.path("notes.txt"))),
        ]
    );
    assert!(result.diagnostics.iter().all(|d| d.severity == Severity::Error));
}

#[test]
fn test_graph_of_site() {
    let tree = site();
    let registry = FormatRegistry::builtin();
    let resolver = tree.resolver();
    let mut tracker = Tracker::new(&registry, &resolver);
    tracker.crawl(&[tree.path("index.paml")], true);

    let filter = TypeFilter::new(&["js:*"]).unwrap();
    let uml = render(tracker.nodes(), &filter, GraphFormat::PlantUml);
    assert!(uml.starts_with("@startuml\n"));
    assert!(uml.contains("package app {}\n"));
    assert!(uml.contains("app +-- extend\n"));
    assert!(uml.contains("app +-- widgets\n"));
    assert!(!uml.contains("theme"));

    let dot = render(tracker.nodes(), &TypeFilter::default(), GraphFormat::Dot);
    assert!(dot.starts_with("digraph G {\n"));
    assert!(dot.contains("[label=\"theme\"]"));
    assert!(dot.ends_with("}\n"));
}
