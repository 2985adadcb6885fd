//! Tool resolution and execution
//!
//! Every invocation goes through the same steps: resolve the tool, print the
//! `| name args` trace line, hand tee'd output streams to the provider, and
//! commit a [`ToolRunEvent`](crate::ToolRunEvent) describing the outcome.
//! Operators receive the runner itself and may run further tools through it.

use std::fmt;
use std::io::Write;
use std::sync::Arc;

use crate::event::{EventSink, PendingEvent, TracingSink};
use crate::printer::Capture;
use crate::{Command, Error, Finder, Provider, Result, Tool, ToolPrinter};

/// Resolves tools through a finder and runs them against a printer.
#[derive(Clone)]
pub struct ToolRunner {
    finder: Finder,
    printer: ToolPrinter,
    sink: Arc<dyn EventSink>,
}

impl fmt::Debug for ToolRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRunner")
            .field("tools", &self.finder.tools().len())
            .field("printer", &self.printer)
            .finish_non_exhaustive()
    }
}

impl ToolRunner {
    /// Runner committing events to [`TracingSink`].
    pub fn new(finder: Finder, printer: ToolPrinter) -> Self {
        Self {
            finder,
            printer,
            sink: Arc::new(TracingSink),
        }
    }

    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn finder(&self) -> &Finder {
        &self.finder
    }

    pub fn printer(&self) -> &ToolPrinter {
        &self.printer
    }

    /// Resolve `tool` and run it.
    pub fn run<S: AsRef<str>>(&self, tool: &str, args: &[S]) -> Result<()> {
        let found = self.finder.find(tool).ok_or_else(|| Error::ToolNotFound {
            name: tool.to_string(),
        })?;
        self.run_tool(&found, args)
    }

    pub fn run_command(&self, command: &Command) -> Result<()> {
        self.run(command.tool(), command.arguments())
    }

    pub fn run_tool<S: AsRef<str>>(&self, tool: &Tool, args: &[S]) -> Result<()> {
        self.run_tool_with(&self.printer, tool, args)
    }

    /// Run an already resolved tool, sending its output to `printer`.
    ///
    /// Exactly one event is committed, also when the provider fails or
    /// panics.
    pub fn run_tool_with<S: AsRef<str>>(
        &self,
        printer: &ToolPrinter,
        tool: &Tool,
        args: &[S],
    ) -> Result<()> {
        let args: Vec<String> = args.iter().map(|a| a.as_ref().to_string()).collect();
        let mut pending = PendingEvent::begin(self.sink.as_ref(), tool, &args);

        let line = format!("| {} {}", tool.name(), pending.args());
        printer.debug(line.trim_end());
        tracing::debug!(tool = %tool, args = %pending.args(), "running tool");

        let mut out = Capture::new(printer.out());
        let mut err = Capture::new(printer.err());
        let outcome = match tool.provider() {
            Provider::Operator(operator) => operator.run(self, &mut out, &mut err, &args),
            Provider::Plain(provider) => Ok(provider.run(&mut out, &mut err, &args)),
        };
        let _ = out.flush();
        let _ = err.flush();

        if out.troubled() {
            tracing::warn!(tool = %tool, "the normal output stream had troubles");
        }
        if err.troubled() {
            tracing::warn!(tool = %tool, "the error output stream had troubles");
        }
        pending.record_output(out.into_text(), err.into_text());

        let code = match outcome {
            Ok(code) => code,
            Err(e) => {
                pending.record_code(e.exit_code());
                return Err(e);
            }
        };
        pending.record_code(code);
        drop(pending);

        if code == 0 {
            Ok(())
        } else {
            Err(Error::ToolExecutionFailed {
                tool: tool.to_namespace_and_name(),
                code,
            })
        }
    }

    /// Names required by `tool` that this runner's finder cannot resolve.
    pub fn missing_requirements(&self, tool: &Tool) -> Vec<String> {
        tool.provider()
            .requires()
            .into_iter()
            .filter(|name| self.finder.find(name).is_none())
            .collect()
    }
}
