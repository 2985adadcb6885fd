//! Tool registration and dispatch for toolbelt
//!
//! This crate provides the model every other toolbelt crate builds on:
//!
//! - **Commands and tasks**: a tool name plus arguments, and named sequences
//!   of commands split from flat argument lists
//! - **Tools and providers**: namespaced descriptors over plain executables
//!   ([`ToolProvider`]) and tools that run other tools ([`ToolOperator`])
//! - **Finders**: ordered, composable tool collections with `name` and
//!   `namespace/name` lookup
//! - **ToolRunner**: resolution, output capture and one [`ToolRunEvent`]
//!   per invocation
//!
//! # Example
//!
//! ```
//! use std::io::Write;
//! use toolbelt_core::{Task, Tool, ToolPrinter, ToolRunner, finder};
//!
//! # fn main() -> toolbelt_core::Result<()> {
//! let hello = Tool::from_fn("hello", |out, _err, args| {
//!     let _ = writeln!(out, "hello {}", args.join(" "));
//!     0
//! });
//! let twice = Task::of("demo", "twice", &["hello", "a", "+", "hello", "b"])?.into_tool();
//!
//! let (printer, out, _err) = ToolPrinter::buffered();
//! let runner = ToolRunner::new(finder::of([hello, twice]), printer);
//! runner.run::<&str>("demo/twice", &[])?;
//! assert_eq!(out.contents(), "hello a\nhello b\n");
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod discovery;
pub mod error;
pub mod event;
pub mod files;
pub mod finder;
pub mod listing;
pub mod menu;
pub mod printer;
pub mod runner;
pub mod task;
pub mod tool;

pub use command::Command;
pub use discovery::{Discovery, TaskDeclaration, UNIT_NAMESPACE, Unit};
pub use error::{Error, Result};
pub use event::{EventSink, JsonLinesSink, MemorySink, ToolRunEvent, TracingSink};
pub use files::{PathMatcher, PatternSyntax};
pub use finder::{Finder, ToolFinder};
pub use menu::ToolMenu;
pub use printer::{SharedBuffer, SharedWriter, ToolPrinter};
pub use runner::ToolRunner;
pub use task::{ARGUMENT_DELIMITER, Task};
pub use tool::{FnProvider, Output, Provider, Tool, ToolOperator, ToolProvider};
