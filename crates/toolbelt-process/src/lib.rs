//! Operating system programs as toolbelt tools
//!
//! [`Program`] is a [`ToolProvider`] that starts a process, forwards its
//! standard output and error line by line to the invocation's writers, and
//! reports the process exit code.
//!
//! ```no_run
//! use toolbelt_core::{ToolPrinter, ToolRunner, finder};
//! use toolbelt_process::Program;
//!
//! let git = Program::find_on_path("git", [""; 0]).expect("git on PATH");
//! let runner = ToolRunner::new(finder::of([git.into_tool()]), ToolPrinter::system());
//! runner.run("git", &["--version"]).unwrap();
//! ```

mod program;

pub use program::{Program, is_executable};
