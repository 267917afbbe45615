//! The `deparse` binary.

use predicates::prelude::*;
use serde_json::Value;
use std::fs;

use crate::common::{SITE, deparse_cmd};
use deparse::test_utils::{SourceTree, SourceTreeBuilder};

fn site() -> SourceTree {
    SourceTreeBuilder::new().with_files(SITE).build().unwrap()
}

#[test]
fn test_list_recursive_names() {
    let tree = site();
    let output = deparse_cmd(tree.root()).args(["list", "-r", "index.paml"]).assert().success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout).into_owned();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 7);
    assert!(lines.contains(&"https://cdn.example.com/reset.css"));
    let app = lines.iter().position(|l| *l == "app").unwrap();
    let extend = lines.iter().position(|l| *l == "extend").unwrap();
    assert!(extend < app);
}

#[test]
fn test_list_paths_filtered_to_output_file() {
    let tree = site();
    deparse_cmd(tree.root())
        .args(["list", "-r", "-p", "-t", "sjs:*", "-t", "js:module", "-o", "out/deps.txt"])
        .arg("index.paml")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = fs::read_to_string(tree.path("out/deps.txt")).unwrap();
    assert!(written.contains("lib/sjs/app.sjs"));
    assert!(written.contains("lib/sjs/extend.sjs"));
    assert!(!written.contains("theme"));
    assert!(!written.contains("analytics"));
}

#[test]
fn test_parse_json() {
    let tree = site();
    let output = deparse_cmd(tree.root())
        .args(["parse", "--format", "json", "lib/sjs/app.sjs"])
        .assert()
        .success();

    let parsed: Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    assert_eq!(parsed[0]["provides"][0], serde_json::json!(["js:module", "app"]));
    assert_eq!(parsed[0]["requires"][0], serde_json::json!(["js:module", "extend"]));
}

#[test]
fn test_provides_lines() {
    let tree = site();
    deparse_cmd(tree.root())
        .args(["provides", "lib/pcss/theme.pcss", "lib/sjs/widgets.sjs"])
        .assert()
        .success()
        .stdout("pcss:module theme\njs:module widgets\n");
}

#[test]
fn test_find_text_and_json() {
    let tree = site();
    deparse_cmd(tree.root())
        .args(["find", "widgets", "nothing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sjs:module").and(predicate::str::contains("(not found)")));

    let output =
        deparse_cmd(tree.root()).args(["find", "--format", "json", "theme"]).assert().success();
    let found: Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    assert_eq!(found["theme"][0]["kind"], "pcss:module");
}

#[test]
fn test_crawl_yaml_reports_diagnostics() {
    let tree = site();
    tree.write("broken.sjs", "@module broken\n@import ghost\n").unwrap();

    deparse_cmd(tree.root())
        .args(["crawl", "-r", "--format", "yaml", "broken.sjs"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("diagnostics:")
                .and(predicate::str::contains("unresolved-dependency"))
                .and(predicate::str::contains("ghost")),
        );
}

#[test]
fn test_graph_dot() {
    let tree = site();
    deparse_cmd(tree.root())
        .args(["graph", "--format", "dot", "index.paml"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("digraph G {").and(predicate::str::contains("app")));
}

#[test]
fn test_unsupported_file_fails_parse() {
    let tree = site();
    tree.write("notes.txt", "").unwrap();

    deparse_cmd(tree.root())
        .args(["parse", "notes.txt"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No extractor registered"));
}

#[test]
fn test_explicit_config_must_exist() {
    let tree = site();
    deparse_cmd(tree.root())
        .args(["--config", "missing.toml", "list", "index.paml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.toml"));
}

#[test]
fn test_project_config_is_picked_up() {
    let tree = site();
    tree.write("main.mjs", "import w from \"widgets\";\n").unwrap();
    tree.write("deparse.toml", "[extensions]\nmjs = \"js\"\n").unwrap();

    deparse_cmd(tree.root()).args(["list", "main.mjs"]).assert().success().stdout("widgets\n");
}
