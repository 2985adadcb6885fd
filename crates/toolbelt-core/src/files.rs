//! File tree traversal used to expand command arguments
//!
//! Paths are produced by joining entry names onto the starting path, so a
//! relative start yields relative results. Matching is done against the path
//! rendered with `/` separators on every platform.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use regex::Regex;

use crate::{Error, Result};

/// Pattern language understood by [`PathMatcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternSyntax {
    /// Shell-style glob: `*`, `**`, `?`, `[...]`, `{a,b}`
    Glob,
    /// Regular expression matched against the whole path
    Regex,
}

impl FromStr for PatternSyntax {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "glob" => Ok(Self::Glob),
            "regex" => Ok(Self::Regex),
            other => Err(Error::invalid_argument(format!(
                "unknown pattern syntax '{other}', expected 'glob' or 'regex'"
            ))),
        }
    }
}

/// Compiled path pattern.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    regex: Regex,
}

impl PathMatcher {
    pub fn new(syntax: PatternSyntax, pattern: &str) -> Result<Self> {
        let source = match syntax {
            PatternSyntax::Glob => glob_to_regex(pattern)?,
            PatternSyntax::Regex => format!("^(?:{pattern})$"),
        };
        let regex = Regex::new(&source).map_err(|e| Error::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { regex })
    }

    pub fn matches(&self, path: &Path) -> bool {
        self.regex.is_match(&to_slash(path))
    }
}

fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn invalid_glob(glob: &str, message: &str) -> Error {
    Error::InvalidPattern {
        pattern: glob.to_string(),
        message: message.to_string(),
    }
}

/// Translate a glob into an anchored regular expression.
fn glob_to_regex(glob: &str) -> Result<String> {
    let mut regex = String::from("^");
    let mut chars = glob.chars().peekable();
    let mut in_group = false;

    while let Some(c) = chars.next() {
        match c {
            '*' => {
                if chars.peek() == Some(&'*') {
                    chars.next();
                    regex.push_str(".*");
                } else {
                    regex.push_str("[^/]*");
                }
            }
            '?' => regex.push_str("[^/]"),
            '[' => {
                regex.push('[');
                match chars.peek() {
                    Some('!') => {
                        chars.next();
                        regex.push('^');
                    }
                    Some('^') => {
                        chars.next();
                        regex.push_str("\\^");
                    }
                    _ => {}
                }
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == ']' {
                        closed = true;
                        break;
                    }
                    // Set operators in regex character classes
                    if matches!(c, '\\' | '[' | '&' | '~') {
                        regex.push('\\');
                    }
                    regex.push(c);
                }
                if !closed {
                    return Err(invalid_glob(glob, "missing ']'"));
                }
                regex.push(']');
            }
            '{' => {
                if in_group {
                    return Err(invalid_glob(glob, "nested groups are not supported"));
                }
                in_group = true;
                regex.push_str("(?:");
            }
            '}' if in_group => {
                in_group = false;
                regex.push(')');
            }
            ',' if in_group => regex.push('|'),
            '\\' => match chars.next() {
                Some(next) => regex.push_str(&regex::escape(&next.to_string())),
                None => return Err(invalid_glob(glob, "trailing escape")),
            },
            other => regex.push_str(&regex::escape(&other.to_string())),
        }
    }

    if in_group {
        return Err(invalid_glob(glob, "missing '}'"));
    }
    regex.push('$');
    Ok(regex)
}

/// Collect every path under `start` (inclusive, up to `max_depth` levels
/// below it) accepted by `accept`.
///
/// Directory entries are visited in file name order. Symbolic links are
/// reported but not followed.
pub fn find_files<F>(start: &Path, max_depth: usize, accept: F) -> Result<Vec<PathBuf>>
where
    F: Fn(&Path) -> bool,
{
    let metadata = fs::metadata(on_disk(start)).map_err(|e| Error::find_files(start, e))?;
    let mut found = Vec::new();
    visit(start, start, metadata.is_dir(), 0, max_depth, &accept, &mut found)?;
    Ok(found)
}

/// An empty path means the current directory.
fn on_disk(path: &Path) -> &Path {
    if path.as_os_str().is_empty() {
        Path::new(".")
    } else {
        path
    }
}

fn visit<F>(
    start: &Path,
    path: &Path,
    is_dir: bool,
    depth: usize,
    max_depth: usize,
    accept: &F,
    found: &mut Vec<PathBuf>,
) -> Result<()>
where
    F: Fn(&Path) -> bool,
{
    if accept(path) {
        found.push(path.to_path_buf());
    }
    if !is_dir || depth >= max_depth {
        return Ok(());
    }

    let mut entries = fs::read_dir(on_disk(path))
        .and_then(|entries| entries.collect::<std::io::Result<Vec<_>>>())
        .map_err(|e| Error::find_files(start, e))?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let file_type = entry.file_type().map_err(|e| Error::find_files(start, e))?;
        let child = path.join(entry.file_name());
        visit(start, &child, file_type.is_dir(), depth + 1, max_depth, accept, found)?;
    }
    Ok(())
}
