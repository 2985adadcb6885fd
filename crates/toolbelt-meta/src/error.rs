//! Error types for toolbelt-meta

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} manifest {}: {message}", path.display())]
    ManifestParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported manifest format: '{extension}'")]
    UnsupportedFormat { extension: String },

    #[error("Invalid setting '{key}': {message}")]
    InvalidSetting { key: String, message: String },

    #[error(transparent)]
    Core(#[from] toolbelt_core::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
