//! Shared test utilities for the toolbelt workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`recorder`]: stub tools that record how they were called
//! - [`fixture`]: [`FixtureTree`] temporary directories with manifests and files

pub mod fixture;
pub mod recorder;

pub use fixture::FixtureTree;
pub use recorder::{Call, Recorder};
