//! Manifest schema: one file describes one unit of tools
//!
//! # Example TOML
//!
//! ```toml
//! [unit]
//! name = "demo"
//!
//! [settings]
//! threshold = "debug"
//! events = "events.jsonl"
//!
//! [[task]]
//! name = "versions"
//! args = ["git", "--version", "+", "cargo", "--version"]
//!
//! [[program]]
//! name = "git"
//!
//! [[menu]]
//! name = "dev"
//! items = ["versions", "git"]
//! ```

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use toolbelt_core::TaskDeclaration;
use tracing::level_filters::LevelFilter;

use crate::{Error, Result};

/// Complete manifest file
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Manifest {
    #[serde(default)]
    pub unit: UnitMeta,

    #[serde(default)]
    pub settings: Settings,

    #[serde(default, rename = "task", skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<TaskDeclaration>,

    #[serde(default, rename = "program", skip_serializing_if = "Vec::is_empty")]
    pub programs: Vec<ProgramDeclaration>,

    #[serde(default, rename = "menu", skip_serializing_if = "Vec::is_empty")]
    pub menus: Vec<MenuDeclaration>,
}

/// Unit metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct UnitMeta {
    /// Defaults to the manifest's file stem
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

/// Runner settings; command-line options take precedence
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    /// Printer threshold: off, error, warn, info, debug or trace
    #[serde(default)]
    pub threshold: Option<String>,

    /// JSON-lines file receiving run events
    #[serde(default)]
    pub events: Option<PathBuf>,
}

impl Settings {
    /// Overlay `other` on top of `self`; values set in `other` win.
    pub fn merge(&mut self, other: &Settings) {
        if other.threshold.is_some() {
            self.threshold.clone_from(&other.threshold);
        }
        if other.events.is_some() {
            self.events.clone_from(&other.events);
        }
    }

    pub fn threshold_filter(&self) -> Result<Option<LevelFilter>> {
        self.threshold
            .as_deref()
            .map(|value| {
                LevelFilter::from_str(value).map_err(|e| Error::InvalidSetting {
                    key: "threshold".into(),
                    message: e.to_string(),
                })
            })
            .transpose()
    }
}

/// An operating system program exposed as a tool
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProgramDeclaration {
    pub name: String,

    /// Executable file; relative paths resolve against the manifest's
    /// directory. Absent: searched on `PATH` by name.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Leading arguments passed before the invocation's own
    #[serde(default)]
    pub args: Vec<String>,
}

/// A menu over named tools
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MenuDeclaration {
    pub name: String,

    /// Tool queries, resolved against everything discovered
    #[serde(default)]
    pub items: Vec<String>,
}
