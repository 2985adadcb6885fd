//! Command - an immutable tool name plus argument list
//!
//! A command `git --version` can be built in several equivalent ways:
//!
//! ```
//! use toolbelt_core::Command;
//!
//! # fn main() -> toolbelt_core::Result<()> {
//! let a = Command::of_line("git --version")?;
//! let b = Command::of_flat_list(&["git", "--version"])?;
//! let c = Command::of("git", ["--version"])?;
//! let d = Command::of("git", [""; 0])?.with("--version");
//! assert!(a == b && b == c && c == d);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::files::{self, PathMatcher, PatternSyntax};
use crate::{Error, Result};

/// A tool call as it would be typed on a command line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Command {
    tool: String,
    arguments: Vec<String>,
}

impl Command {
    /// Create a command from a tool name and any number of arguments.
    pub fn of<I, S>(tool: impl AsRef<str>, arguments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        let tool = tool.as_ref().trim();
        if tool.is_empty() {
            return Err(Error::invalid_argument("command tool name must not be blank"));
        }
        Ok(Self {
            tool: tool.to_string(),
            arguments: Vec::new(),
        }
        .with_all(arguments))
    }

    /// Create a command from `["tool-name", "tool-args", ...]`.
    pub fn of_flat_list<S: AsRef<str>>(command: &[S]) -> Result<Self> {
        match command.split_first() {
            None => Err(Error::invalid_argument("empty command")),
            Some((tool, arguments)) => Self::of(tool, arguments.iter().map(|a| a.as_ref())),
        }
    }

    /// Create a command from `"tool-name [tool-args...]"`, split on whitespace.
    pub fn of_line(line: &str) -> Result<Self> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        Self::of_flat_list(&tokens)
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Render as `tool arg1 arg2 ...` joined by a single space.
    pub fn to_command_line(&self) -> String {
        self.to_command_line_with(" ")
    }

    /// Render the tool followed by its arguments, joined by `delimiter`.
    pub fn to_command_line_with(&self, delimiter: &str) -> String {
        if self.arguments.is_empty() {
            return self.tool.clone();
        }
        let mut line = self.tool.clone();
        for argument in &self.arguments {
            line.push_str(delimiter);
            line.push_str(argument);
        }
        line
    }

    /// Append one trailing argument.
    #[must_use]
    pub fn with(self, argument: impl ToString) -> Self {
        self.with_all([argument])
    }

    /// Append trailing arguments in order.
    #[must_use]
    pub fn with_all<I, S>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.arguments
            .extend(arguments.into_iter().map(|a| a.to_string().trim().to_string()));
        self
    }

    /// Append a `key value` pair, e.g. `--release 21`.
    #[must_use]
    pub fn with_key_value(self, key: impl ToString, value: impl ToString) -> Self {
        self.with(key).with(value)
    }

    /// Append a key followed by its value and any extra trailing values.
    #[must_use]
    pub fn with_key_values<I, S>(self, key: impl ToString, value: impl ToString, more: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.with_key_value(key, value).with_all(more)
    }

    /// Append every path below the current directory matching `glob`.
    pub fn with_find_files(self, glob: &str) -> Result<Self> {
        self.with_files_matching(Path::new(""), PatternSyntax::Glob, glob, usize::MAX)
    }

    /// Append one argument per path under `start` whose path matches
    /// `pattern`, descending at most `max_depth` directory levels.
    pub fn with_files_matching(
        self,
        start: &Path,
        syntax: PatternSyntax,
        pattern: &str,
        max_depth: usize,
    ) -> Result<Self> {
        let matcher = PathMatcher::new(syntax, pattern)?;
        self.with_files_matching_fn(start, max_depth, |path| matcher.matches(path))
    }

    /// Append one argument per path under `start` accepted by `accept`.
    pub fn with_files_matching_fn<F>(self, start: &Path, max_depth: usize, accept: F) -> Result<Self>
    where
        F: Fn(&Path) -> bool,
    {
        let files = files::find_files(start, max_depth, accept)?;
        Ok(self.with_all(files.iter().map(|path| path.display())))
    }

    /// Apply a transformation to the whole command.
    #[must_use]
    pub fn with_tweak<F>(self, tweak: F) -> Self
    where
        F: FnOnce(Command) -> Command,
    {
        tweak(self)
    }

    /// Apply a transformation to the first `position` arguments, then
    /// re-attach the remaining arguments unchanged.
    #[must_use]
    pub fn with_tweak_at<F>(self, position: usize, tweak: F) -> Self
    where
        F: FnOnce(Command) -> Command,
    {
        let Command {
            tool,
            mut arguments,
        } = self;
        let suffix = arguments.split_off(position.min(arguments.len()));
        tweak(Command { tool, arguments }).with_all(suffix)
    }

    /// Apply transformations in iteration order.
    #[must_use]
    pub fn with_tweaks<I>(self, tweaks: I) -> Self
    where
        I: IntoIterator,
        I::Item: FnOnce(Command) -> Command,
    {
        tweaks.into_iter().fold(self, |command, tweak| tweak(command))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_command_line())
    }
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        Self::of_line(line)
    }
}
