//! Tasks: named sequences of commands run as one tool
//!
//! A task is usually written as a flat argument list where a delimiter token
//! separates commands:
//!
//! ```
//! use toolbelt_core::Task;
//!
//! # fn main() -> toolbelt_core::Result<()> {
//! let task = Task::of("demo", "versions", &["git", "--version", "+", "cargo", "--version"])?;
//! assert_eq!(task.commands().len(), 2);
//! assert_eq!(task.commands()[1].to_command_line(), "cargo --version");
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeSet;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::thread;

use crate::tool::{Output, ToolOperator};
use crate::{Command, Error, Result, Tool, ToolRunner};

/// Default token separating commands in a flat argument list.
pub const ARGUMENT_DELIMITER: &str = "+";

/// A named list of commands, run sequentially or in parallel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    namespace: String,
    name: String,
    commands: Vec<Command>,
    parallel: bool,
}

impl Task {
    pub fn new(
        namespace: impl Into<String>,
        name: impl Into<String>,
        commands: Vec<Command>,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::invalid_argument("task name must not be blank"));
        }
        Ok(Self {
            namespace: namespace.into(),
            name,
            commands,
            parallel: false,
        })
    }

    /// Split `args` on [`ARGUMENT_DELIMITER`].
    pub fn of<S: AsRef<str>>(
        namespace: impl Into<String>,
        name: impl Into<String>,
        args: &[S],
    ) -> Result<Self> {
        Self::with_delimiter(namespace, name, ARGUMENT_DELIMITER, args)
    }

    /// Split `args` on `delimiter`.
    ///
    /// Every delimiter closes the command collected so far and fails if that
    /// command would be empty. A trailing delimiter adds nothing.
    pub fn with_delimiter<S: AsRef<str>>(
        namespace: impl Into<String>,
        name: impl Into<String>,
        delimiter: &str,
        args: &[S],
    ) -> Result<Self> {
        let mut commands = Vec::new();
        let mut tokens: Vec<&str> = Vec::new();
        for arg in args {
            let token = arg.as_ref();
            if token == delimiter {
                if tokens.is_empty() {
                    return Err(Error::invalid_argument(format!(
                        "no command before delimiter '{delimiter}'"
                    )));
                }
                commands.push(Command::of_flat_list(&tokens)?);
                tokens.clear();
            } else {
                tokens.push(token.trim());
            }
        }
        if !tokens.is_empty() {
            commands.push(Command::of_flat_list(&tokens)?);
        }
        Self::new(namespace, name, commands)
    }

    #[must_use]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn into_tool(self) -> Tool {
        Tool::of_operator(self)
    }

    fn run_sequential(&self, runner: &ToolRunner) -> Result<()> {
        for command in &self.commands {
            runner.run_command(command)?;
        }
        Ok(())
    }

    /// Run every command on a bounded pool of scoped workers.
    ///
    /// All commands run to completion; the first failure to complete is
    /// returned afterwards.
    fn run_parallel(&self, runner: &ToolRunner) -> Result<()> {
        let workers = thread::available_parallelism()
            .map_or(1, NonZeroUsize::get)
            .min(self.commands.len());
        let next = AtomicUsize::new(0);
        let failure: Mutex<Option<Error>> = Mutex::new(None);

        let record = |error: Error| {
            let mut slot = failure.lock().unwrap_or_else(PoisonError::into_inner);
            if slot.is_none() {
                *slot = Some(error);
            }
        };

        thread::scope(|scope| {
            for index in 0..workers {
                let (next, record) = (&next, &record);
                let spawned = thread::Builder::new()
                    .name(format!("{}-{index}", self.name))
                    .spawn_scoped(scope, move || {
                        while let Some(command) = self.commands.get(next.fetch_add(1, Ordering::Relaxed)) {
                            if let Err(e) = runner.run_command(command) {
                                tracing::debug!(task = %self.name, command = %command, error = %e, "parallel command failed");
                                record(e);
                            }
                        }
                    });
                if let Err(e) = spawned {
                    record(Error::Output(e));
                }
            }
        });

        match failure.into_inner().unwrap_or_else(PoisonError::into_inner) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl ToolOperator for Task {
    fn name(&self) -> &str {
        &self.name
    }

    fn namespace(&self) -> String {
        self.namespace.clone()
    }

    fn requires(&self) -> BTreeSet<String> {
        self.commands
            .iter()
            .map(|command| command.tool().to_string())
            .collect()
    }

    fn run(
        &self,
        runner: &ToolRunner,
        _out: Output<'_>,
        _err: Output<'_>,
        _args: &[String],
    ) -> Result<i32> {
        if self.parallel {
            self.run_parallel(runner)?;
        } else {
            self.run_sequential(runner)?;
        }
        Ok(0)
    }
}
