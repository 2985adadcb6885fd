//! Stub tools that record their invocations.

use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

use toolbelt_core::{Output, Provider, Tool, ToolProvider};

/// One recorded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub tool: String,
    pub args: Vec<String>,
}

/// Shared log of calls made to the tools it hands out.
///
/// # Example
///
/// ```rust
/// use toolbelt_test_utils::Recorder;
/// use toolbelt_core::{ToolPrinter, ToolRunner, finder};
///
/// let recorder = Recorder::new();
/// let runner = ToolRunner::new(finder::of([recorder.tool("jar", 0)]), ToolPrinter::buffered().0);
/// runner.run("jar", &["--version"]).unwrap();
/// assert_eq!(recorder.args_of("jar"), vec![vec!["--version".to_string()]]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A tool named `name` that records each call, prints
    /// `name args...` to its output and exits with `code`.
    pub fn tool(&self, name: &str, code: i32) -> Tool {
        Tool::of(self.provider(name, code))
    }

    /// Same as [`Recorder::tool`], under an explicit namespace.
    pub fn tool_in(&self, namespace: &str, name: &str, code: i32) -> Tool {
        Tool::new(namespace, Provider::plain(self.provider(name, code)))
    }

    pub fn provider(&self, name: &str, code: i32) -> RecordingTool {
        RecordingTool {
            name: name.to_string(),
            code,
            calls: Arc::clone(&self.calls),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Tool names in call order.
    pub fn names(&self) -> Vec<String> {
        self.calls().into_iter().map(|call| call.tool).collect()
    }

    /// Argument lists of every call made to `tool`.
    pub fn args_of(&self, tool: &str) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter(|call| call.tool == tool)
            .map(|call| call.args)
            .collect()
    }
}

/// [`ToolProvider`] handed out by a [`Recorder`].
#[derive(Debug, Clone)]
pub struct RecordingTool {
    name: String,
    code: i32,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl ToolProvider for RecordingTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, out: Output<'_>, _err: Output<'_>, args: &[String]) -> i32 {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Call {
                tool: self.name.clone(),
                args: args.to_vec(),
            });
        let line = std::iter::once(self.name.as_str())
            .chain(args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(out, "{line}");
        self.code
    }
}
