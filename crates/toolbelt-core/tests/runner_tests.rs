//! Integration tests for tool execution through the runner

use std::sync::Arc;

use pretty_assertions::assert_eq;
use toolbelt_core::{Error, MemorySink, Task, Tool, ToolPrinter, ToolRunner, finder};
use toolbelt_test_utils::Recorder;

fn runner_over(tools: Vec<Tool>) -> (ToolRunner, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let (printer, _, _) = ToolPrinter::buffered();
    let runner = ToolRunner::new(finder::of(tools), printer).with_sink(sink.clone());
    (runner, sink)
}

#[test]
fn test_task_runs_commands_in_order() {
    let recorder = Recorder::new();
    let task = Task::of("demo", "versions", &["jar", "--version", "+", "javac", "--version"])
        .unwrap()
        .into_tool();
    let (runner, sink) = runner_over(vec![
        recorder.tool("jar", 0),
        recorder.tool("javac", 0),
        task,
    ]);

    runner.run::<&str>("versions", &[]).unwrap();

    assert_eq!(recorder.names(), vec!["jar", "javac"]);
    assert_eq!(recorder.args_of("jar"), vec![vec!["--version".to_string()]]);
    assert_eq!(recorder.args_of("javac"), vec![vec!["--version".to_string()]]);

    let events: Vec<(String, i32)> = sink
        .events()
        .into_iter()
        .map(|e| (e.name, e.code))
        .collect();
    assert_eq!(
        events,
        vec![
            ("jar".to_string(), 0),
            ("javac".to_string(), 0),
            ("versions".to_string(), 0)
        ]
    );
}

#[test]
fn test_exit_code_seven_fails_with_one_event() {
    let recorder = Recorder::new();
    let (runner, sink) = runner_over(vec![recorder.tool_in("ns", "broken", 7)]);

    let err = runner.run("ns/broken", &["x"]).unwrap_err();

    match err {
        Error::ToolExecutionFailed { ref tool, code } => {
            assert_eq!(tool, "ns/broken");
            assert_eq!(code, 7);
        }
        other => panic!("unexpected error: {other}"),
    }
    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].code, 7);
    assert_eq!(events[0].out, "broken x");
}

#[test]
fn test_sequential_task_stops_at_first_failure() {
    let recorder = Recorder::new();
    let task = Task::of("demo", "chain", &["a", "+", "b", "+", "c"])
        .unwrap()
        .into_tool();
    let (runner, sink) = runner_over(vec![
        recorder.tool("a", 0),
        recorder.tool("b", 3),
        recorder.tool("c", 0),
        task,
    ]);

    let err = runner.run::<&str>("chain", &[]).unwrap_err();
    assert!(matches!(err, Error::ToolExecutionFailed { code: 3, .. }));
    assert_eq!(recorder.names(), vec!["a", "b"]);

    let last = sink.events().pop().unwrap();
    assert_eq!(last.name, "chain");
    assert_eq!(last.code, 3);
}

#[test]
fn test_task_with_unknown_tool() {
    let task = Task::of("demo", "lost", &["ghost"]).unwrap().into_tool();
    let (runner, sink) = runner_over(vec![task.clone()]);

    let err = runner.run::<&str>("lost", &[]).unwrap_err();
    assert_eq!(err.to_string(), "Tool not found: ghost");
    assert_eq!(runner.missing_requirements(&task), vec!["ghost"]);

    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].code, 1);
}

#[test]
fn test_parallel_task_runs_everything() {
    let recorder = Recorder::new();
    let names = ["a", "b", "c", "d", "e", "f"];
    let mut args = Vec::new();
    for name in names {
        if !args.is_empty() {
            args.push("+");
        }
        args.push(name);
    }
    let task = Task::of("demo", "all", &args)
        .unwrap()
        .parallel(true)
        .into_tool();
    let mut tools: Vec<Tool> = names.iter().map(|n| recorder.tool(n, 0)).collect();
    tools.push(task);
    let (runner, sink) = runner_over(tools);

    runner.run::<&str>("all", &[]).unwrap();

    let mut called = recorder.names();
    called.sort();
    assert_eq!(called, names);
    assert_eq!(sink.len(), names.len() + 1);
    assert_eq!(sink.events().last().unwrap().name, "all");
}

#[test]
fn test_parallel_task_reports_failure_after_all_ran() {
    let recorder = Recorder::new();
    let task = Task::of("demo", "mixed", &["ok1", "+", "bad", "+", "ok2"])
        .unwrap()
        .parallel(true)
        .into_tool();
    let (runner, _) = runner_over(vec![
        recorder.tool("ok1", 0),
        recorder.tool("bad", 5),
        recorder.tool("ok2", 0),
        task,
    ]);

    let err = runner.run::<&str>("mixed", &[]).unwrap_err();
    assert!(matches!(err, Error::ToolExecutionFailed { code: 5, .. }));
    assert_eq!(recorder.calls().len(), 3);
}

#[test]
fn test_empty_task_succeeds() {
    let empty: [&str; 0] = [];
    let task = Task::of("demo", "noop", &empty).unwrap().into_tool();
    let (runner, sink) = runner_over(vec![task]);
    runner.run::<&str>("noop", &[]).unwrap();
    assert_eq!(sink.len(), 1);
}

#[test]
fn test_nested_runner_output_reaches_printer() {
    let recorder = Recorder::new();
    let task = Task::of("demo", "say", &["echo", "hi"]).unwrap().into_tool();
    let (printer, out, _) = ToolPrinter::buffered();
    let runner = ToolRunner::new(finder::of([recorder.tool("echo", 0), task]), printer)
        .with_sink(Arc::new(MemorySink::new()));

    runner.run::<&str>("demo/say", &[]).unwrap();
    assert_eq!(out.contents(), "echo hi\n");
}
