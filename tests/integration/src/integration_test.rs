//! End-to-end integration tests across the toolbelt crates
//!
//! Flow: manifests on disk -> discovery -> runner -> programs and tasks ->
//! recorded events.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use toolbelt_core::{
    Command, JsonLinesSink, MemorySink, PatternSyntax, Tool, ToolPrinter, ToolRunner, finder,
};
use toolbelt_meta::ManifestDiscovery;
use toolbelt_test_utils::{FixtureTree, Recorder};

#[test]
fn test_recorded_tools_behind_manifest_tasks() {
    let tree = FixtureTree::new().manifest(
        "jdk.json",
        r#"{
            "unit": { "name": "jdk" },
            "task": [
                { "name": "versions", "args": ["jar", "--version", "+", "javac", "--version"] }
            ]
        }"#,
    );
    let recorder = Recorder::new();
    let discovery = ManifestDiscovery::load(&tree.manifests())
        .unwrap()
        .with_unit(
            toolbelt_core::Unit::new("stubs")
                .with_finder(finder::of([recorder.tool("jar", 0), recorder.tool("javac", 0)])),
        );

    let sink = Arc::new(MemorySink::new());
    let (printer, out, _) = ToolPrinter::buffered();
    let runner = ToolRunner::new(discovery.finder(|_| true).unwrap(), printer).with_sink(sink.clone());

    runner.run::<&str>("jdk/versions", &[]).unwrap();

    assert_eq!(recorder.names(), vec!["jar", "javac"]);
    assert_eq!(out.contents(), "jar --version\njavac --version\n");
    let codes: Vec<(String, i32)> = sink.events().into_iter().map(|e| (e.name, e.code)).collect();
    assert_eq!(
        codes,
        vec![
            ("jar".to_string(), 0),
            ("javac".to_string(), 0),
            ("versions".to_string(), 0),
        ]
    );
}

#[test]
fn test_declared_task_shadows_tools_of_earlier_units() {
    let recorder = Recorder::new();
    let units = vec![
        toolbelt_core::Unit::new("a").with_finder(finder::of([recorder.tool_in("a", "fmt", 0)])),
        toolbelt_core::Unit::new("b").with_finder(finder::of([recorder.tool_in("b", "fmt", 0)])),
        toolbelt_core::Unit::new("c")
            .with_task(toolbelt_core::TaskDeclaration::new("fmt", ["b/fmt", "--check"])),
    ];
    let found = finder::discover(&units, |_| true).unwrap();

    assert_eq!(found.find("fmt").unwrap().namespace(), "c");
    assert_eq!(found.find("a/fmt").unwrap().namespace(), "a");
    assert_eq!(
        toolbelt_core::listing::to_text_block(&found.tools()),
        "                  fmt = c/fmt\n   -> a/fmt\n   -> b/fmt"
    );

    let (printer, out, _) = ToolPrinter::buffered();
    let runner = ToolRunner::new(found, printer).with_sink(Arc::new(MemorySink::new()));
    runner.run::<&str>("fmt", &[]).unwrap();
    assert_eq!(out.contents(), "fmt --check\n");
    assert_eq!(recorder.calls().len(), 1);
}

#[cfg(unix)]
#[test]
fn test_program_with_expanded_file_arguments() {
    let tree = FixtureTree::new()
        .script("bin/count", "echo \"$# files\"; for f in \"$@\"; do echo \"$f\"; done")
        .file("src/a/One.java", "")
        .file("src/b/Two.java", "")
        .file("src/b/notes.md", "");

    let program = toolbelt_process::Program::find_in_folder("count", &tree.path("bin"), [""; 0])
        .unwrap()
        .into_tool();
    let command = Command::of("count", [""; 0])
        .unwrap()
        .with_files_matching(&tree.path("src"), PatternSyntax::Glob, "**.java", usize::MAX)
        .unwrap();

    let (printer, out, _) = ToolPrinter::buffered();
    let runner = ToolRunner::new(finder::of([program]), printer).with_sink(Arc::new(MemorySink::new()));
    runner.run_command(&command).unwrap();

    let src = tree.path("src");
    let expected = format!(
        "2 files\n{}\n{}\n",
        src.join("a/One.java").display(),
        src.join("b/Two.java").display()
    );
    assert_eq!(out.contents(), expected);
}

#[cfg(unix)]
#[test]
fn test_parallel_manifest_task_writes_event_log() {
    let tree = FixtureTree::new()
        .script("manifests/bin/ok", "echo ok \"$@\"")
        .script("manifests/bin/bad", "echo bad >&2; exit 4")
        .manifest(
            "ci.yaml",
            r#"
unit:
  name: ci
program:
  - name: ok
    path: bin/ok
  - name: bad
    path: bin/bad
task:
  - name: all
    parallel: true
    args: [ok, one, +, bad, +, ok, two]
"#,
        );

    let discovery = ManifestDiscovery::load(&tree.path("manifests/ci.yaml")).unwrap();
    let events_path = tree.path("events.jsonl");
    let sink = Arc::new(JsonLinesSink::open(&events_path).unwrap());
    let (printer, _, err) = ToolPrinter::buffered();
    let runner = ToolRunner::new(discovery.finder(|_| true).unwrap(), printer).with_sink(sink);

    let failure = runner.run::<&str>("ci/all", &[]).unwrap_err();
    assert_eq!(failure.to_string(), "Tool ci/bad returned exit code: 4");
    assert_eq!(err.contents(), "bad\n");

    let events = read_events(&tree.read("events.jsonl"));
    assert_eq!(events.len(), 4);
    let last = events.last().unwrap();
    assert_eq!(last["name"], "all");
    assert_eq!(last["code"], 4);

    let mut members: Vec<String> = events[..3]
        .iter()
        .map(|e| format!("{} {}", e["name"].as_str().unwrap(), e["code"]))
        .collect();
    members.sort();
    assert_eq!(members, vec!["bad 4", "ok 0", "ok 0"]);
}

#[test]
fn test_nested_operator_tool() {
    let recorder = Recorder::new();
    let wrapper = Tool::of_operator(
        toolbelt_core::ToolMenu::new("demo", "wrap", finder::of([recorder.tool("inner", 0)])),
    );
    let (printer, out, _) = ToolPrinter::buffered();
    let runner = ToolRunner::new(finder::of([wrapper]), printer).with_sink(Arc::new(MemorySink::new()));

    runner.run("demo/wrap", &["inner", "x"]).unwrap();
    assert_eq!(out.contents(), "inner x\n");
    assert_eq!(recorder.args_of("inner"), vec![vec!["x".to_string()]]);
}

fn read_events(content: &str) -> Vec<serde_json::Value> {
    content
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}
