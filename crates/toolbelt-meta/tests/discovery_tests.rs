//! Integration tests for manifest discovery

use std::sync::Arc;

use pretty_assertions::assert_eq;
use toolbelt_core::{MemorySink, Tool, ToolPrinter, ToolRunner};
use toolbelt_meta::ManifestDiscovery;
use toolbelt_test_utils::FixtureTree;

fn tool_names(discovery: &ManifestDiscovery) -> Vec<String> {
    discovery
        .finder(|_| true)
        .unwrap()
        .tools()
        .iter()
        .map(Tool::to_namespace_and_name)
        .collect()
}

#[test]
fn test_directory_of_manifests() {
    let tree = FixtureTree::new()
        .manifest(
            "a-java.toml",
            r#"
[unit]
name = "java"

[[task]]
name = "versions"
args = ["jar", "--version", "+", "javac", "--version"]
"#,
        )
        .manifest(
            "b-rust.yaml",
            "task:\n  - name: check\n    namespace: cargo\n    args: [cargo, check]\n",
        );

    let discovery = ManifestDiscovery::load(&tree.manifests()).unwrap();
    assert_eq!(tool_names(&discovery), vec!["java/versions", "cargo/check"]);
}

#[cfg(unix)]
#[test]
fn test_program_relative_to_manifest_runs() {
    let tree = FixtureTree::new()
        .script("manifests/bin/greet", "echo \"greet $*\"")
        .manifest(
            "demo.toml",
            r#"
[settings]
threshold = "warn"

[[program]]
name = "greet"
path = "bin/greet"
args = ["--from", "manifest"]

[[task]]
name = "hello"
args = ["greet", "world"]

[[menu]]
name = "menu"
items = ["hello", "greet"]
"#,
        );

    let discovery = ManifestDiscovery::load(&tree.path("manifests/demo.toml")).unwrap();
    assert_eq!(discovery.settings().threshold.as_deref(), Some("warn"));

    let sink = Arc::new(MemorySink::new());
    let (printer, out, _) = ToolPrinter::buffered();
    let runner = ToolRunner::new(discovery.finder(|_| true).unwrap(), printer).with_sink(sink.clone());

    runner.run::<&str>("demo/hello", &[]).unwrap();
    runner.run("menu", &["greet", "again"]).unwrap();

    assert_eq!(
        out.contents(),
        "greet --from manifest world\ngreet --from manifest again\n"
    );
    let events: Vec<String> = sink.events().into_iter().map(|e| e.name).collect();
    assert_eq!(events, vec!["greet", "hello", "greet", "menu"]);
}

#[test]
fn test_include_filters_units() {
    let tree = FixtureTree::new()
        .manifest("one.toml", "[[task]]\nname = \"a\"\nargs = [\"x\"]\n")
        .manifest("two.toml", "[[task]]\nname = \"b\"\nargs = [\"y\"]\n");

    let discovery = ManifestDiscovery::load(&tree.manifests()).unwrap();
    let finder = discovery.finder(|unit| unit.name == "two").unwrap();
    let names: Vec<String> = finder.tools().iter().map(Tool::to_namespace_and_name).collect();
    assert_eq!(names, vec!["two/b"]);
}

#[cfg(unix)]
#[test]
fn test_task_in_later_manifest_shadows_program() {
    let tree = FixtureTree::new()
        .script("manifests/bin/build", "echo program")
        .manifest("a.toml", "[[program]]\nname = \"build\"\npath = \"bin/build\"\n")
        .manifest(
            "b.toml",
            "[[task]]\nname = \"build\"\nargs = [\"a/build\", \"+\", \"a/build\"]\n",
        );

    let discovery = ManifestDiscovery::load(&tree.manifests()).unwrap();
    assert_eq!(tool_names(&discovery), vec!["b/build", "a/build"]);

    let (printer, out, _) = ToolPrinter::buffered();
    let runner = ToolRunner::new(discovery.finder(|_| true).unwrap(), printer)
        .with_sink(Arc::new(MemorySink::new()));
    runner.run::<&str>("build", &[]).unwrap();
    assert_eq!(out.contents(), "program\nprogram\n");
}

#[test]
fn test_empty_manifest_directory() {
    let tree = FixtureTree::new().dir("manifests");
    let discovery = ManifestDiscovery::load(&tree.manifests()).unwrap();
    assert!(discovery.manifests().is_empty());
    assert!(tool_names(&discovery).is_empty());
}
