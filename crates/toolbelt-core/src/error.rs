//! Error types for toolbelt-core

use std::path::PathBuf;

/// Result type for toolbelt-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building, resolving or running tools
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed command or task construction input
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A name failed resolution against the active finder
    #[error("Tool not found: {name}")]
    ToolNotFound { name: String },

    /// A resolved tool returned a nonzero exit code
    #[error("Tool {tool} returned exit code: {code}")]
    ToolExecutionFailed { tool: String, code: i32 },

    /// File traversal failed during argument expansion
    #[error("Find files failed in: {}: {source}", path.display())]
    FindFiles {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A glob or regex pattern could not be compiled
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Writing to a tool's output stream failed
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

impl Error {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn find_files(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FindFiles {
            path: path.into(),
            source,
        }
    }

    /// Exit code recorded for an invocation that failed with this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ToolExecutionFailed { code, .. } => *code,
            _ => 1,
        }
    }
}
