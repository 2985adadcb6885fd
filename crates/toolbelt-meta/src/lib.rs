//! Manifests for toolbelt
//!
//! A manifest file declares one unit of tools: tasks split from flat argument
//! lists, operating system programs, and menus over other tools. Manifests
//! can be written in TOML, JSON or YAML.
//!
//! # Modules
//!
//! - [`schema`]: manifest data types
//! - [`store`]: format detection and parsing
//! - [`loader`]: single-file and directory loading
//! - [`discovery`]: [`ManifestDiscovery`], turning manifests into a finder

pub mod discovery;
pub mod error;
pub mod loader;
pub mod schema;
pub mod store;

pub use discovery::ManifestDiscovery;
pub use error::{Error, Result};
pub use loader::{LoadedManifest, ManifestLoader};
pub use schema::{Manifest, MenuDeclaration, ProgramDeclaration, Settings, UnitMeta};
pub use store::ManifestStore;
