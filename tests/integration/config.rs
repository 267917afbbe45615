//! Configuration files driving the resolver and registry.

use deparse::config::DeparseConfig;
use deparse::core::{Candidate, DependencyItem};
use deparse::ops;
use deparse::test_utils::SourceTreeBuilder;

#[tokio::test]
async fn test_config_adds_search_paths_and_extensions() {
    let tree = SourceTreeBuilder::new()
        .with_file("vendor/lib/js/lodash-4.17.js", "")
        .with_file("src/main.mjs", "import _ from \"lodash\";\n")
        .build()
        .unwrap();
    let config_path = tree
        .write(
            "deparse.toml",
            &format!(
                "search_paths = [{:?}]\n\n[extensions]\nmjs = \"js\"\n",
                tree.path("vendor").display().to_string()
            ),
        )
        .unwrap();

    let config = DeparseConfig::load_from(&config_path).await.unwrap();
    let registry = config.registry().unwrap();
    let resolver = config.resolver().with_working_dir(tree.root());

    let parsed = ops::parse_file(&tree.path("src/main.mjs"), &registry).unwrap();
    assert_eq!(parsed.requires, vec![DependencyItem::new("js:module", "lodash")]);

    let result = ops::crawl(&[tree.path("src/main.mjs")], true, &registry, &resolver);
    assert_eq!(
        result.resolved_paths(&DependencyItem::new("js:module", "lodash")),
        Some(&[tree.path("vendor/lib/js/lodash-4.17.js")][..])
    );
    assert!(result.diagnostics.is_empty());
}

#[tokio::test]
async fn test_config_subdirs_replace_defaults_per_kind() {
    let tree = SourceTreeBuilder::new()
        .with_file("styles/theme.css", "")
        .with_file("lib/css/theme.css", "")
        .with_file("deparse.toml", "[subdirs]\n\"css:module\" = [\"styles\"]\n")
        .build()
        .unwrap();

    let config = DeparseConfig::load_from(&tree.path("deparse.toml")).await.unwrap();
    let resolver = config.resolver().with_working_dir(tree.root());

    let found = resolver
        .resolve(&DependencyItem::new("css:module", "theme"), &tree.path("index.paml"));
    assert_eq!(found, vec![Candidate::new("css:module", tree.path("styles/theme.css"))]);
}

#[tokio::test]
async fn test_invalid_config_is_reported() {
    let tree = SourceTreeBuilder::new()
        .with_file("deparse.toml", "[extensions]\nrb = \"ruby\"\n")
        .with_file("broken.toml", "search_paths = \"not a list\"\n")
        .build()
        .unwrap();

    let config = DeparseConfig::load_from(&tree.path("deparse.toml")).await.unwrap();
    assert!(config.registry().is_err());

    let err = DeparseConfig::load_from(&tree.path("broken.toml")).await.unwrap_err();
    assert!(err.to_string().contains("broken.toml"));
}
