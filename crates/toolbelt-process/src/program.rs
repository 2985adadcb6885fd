//! Process-backed tool provider

use std::env;
use std::io::{BufRead, BufReader, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread::{self, Scope};

use toolbelt_core::{Output, Tool, ToolProvider};

/// A named operating system program with leading arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    name: String,
    command: Vec<String>,
}

impl Program {
    /// `command[0]` is the executable, the rest are always passed first.
    pub fn new<I, S>(name: impl Into<String>, command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        Self {
            name: name.into(),
            command: command.into_iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Program for `name` in `folder`, with `.exe` appended on Windows.
    pub fn find_in_folder<I, S>(name: &str, folder: &Path, args: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        if !folder.is_dir() {
            return None;
        }
        let file = if cfg!(windows) && !name.ends_with(".exe") {
            format!("{name}.exe")
        } else {
            name.to_string()
        };
        Self::find_executable(name, &folder.join(file), args)
    }

    /// Program running `file`, if it is an executable file.
    pub fn find_executable<I, S>(name: &str, file: &Path, args: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        if !is_executable(file) {
            return None;
        }
        let mut command = vec![file.display().to_string()];
        command.extend(args.into_iter().map(|a| a.to_string()));
        Some(Self::new(name, command))
    }

    /// Program for `name` in the first `PATH` entry that has it.
    pub fn find_on_path<I, S>(name: &str, args: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        let args: Vec<String> = args.into_iter().map(|a| a.to_string()).collect();
        let path = env::var_os("PATH")?;
        env::split_paths(&path).find_map(|folder| Self::find_in_folder(name, &folder, &args))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn command(&self) -> &[String] {
        &self.command
    }

    pub fn executable(&self) -> Option<PathBuf> {
        self.command.first().map(PathBuf::from)
    }

    pub fn into_tool(self) -> Tool {
        Tool::of(self)
    }
}

impl ToolProvider for Program {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, out: Output<'_>, err: Output<'_>, args: &[String]) -> i32 {
        let Some((program, leading)) = self.command.split_first() else {
            let _ = writeln!(err, "{}: empty command", self.name);
            return 1;
        };

        let spawned = Command::new(program)
            .args(leading)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn();
        let mut child = match spawned {
            Ok(child) => child,
            Err(e) => {
                tracing::debug!(program = %program, error = %e, "failed to start program");
                let _ = writeln!(err, "{}: failed to start {program}: {e}", self.name);
                return 1;
            }
        };
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        thread::scope(|scope| {
            if let Some(stream) = stdout {
                spawn_line_printer(scope, format!("{}-out", self.name), stream, out);
            }
            if let Some(stream) = stderr {
                spawn_line_printer(scope, format!("{}-err", self.name), stream, err);
            }
            match child.wait() {
                Ok(status) => status.code().unwrap_or(-1),
                Err(e) if e.kind() == ErrorKind::Interrupted => -1,
                Err(e) => {
                    tracing::warn!(program = %program, error = %e, "failed to wait for program");
                    1
                }
            }
        })
    }
}

fn spawn_line_printer<'scope, R>(
    scope: &'scope Scope<'scope, '_>,
    thread_name: String,
    stream: R,
    writer: &'scope mut (dyn Write + Send),
) where
    R: Read + Send + 'scope,
{
    let spawned = thread::Builder::new()
        .name(thread_name)
        .spawn_scoped(scope, move || print_lines(stream, writer));
    if let Err(e) = spawned {
        tracing::warn!(error = %e, "failed to start output reader thread");
    }
}

/// Forward every line of `stream` to `writer`, draining the stream even if
/// the writer fails.
fn print_lines(stream: impl Read, writer: &mut (dyn Write + Send)) {
    let mut healthy = true;
    for line in BufReader::new(stream).split(b'\n') {
        let Ok(mut line) = line else { break };
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        if healthy && writeln!(writer, "{}", String::from_utf8_lossy(&line)).is_err() {
            healthy = false;
        }
    }
    let _ = writer.flush();
}

/// True if `path` is a file the current user may execute.
pub fn is_executable(path: &Path) -> bool {
    let Ok(metadata) = path.metadata() else {
        return false;
    };
    if !metadata.is_file() {
        return false;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        metadata.permissions().mode() & 0o111 != 0
    }
    #[cfg(not(unix))]
    {
        true
    }
}
