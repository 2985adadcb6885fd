//! Runner construction from command-line options and manifest settings

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use toolbelt_core::{JsonLinesSink, ToolPrinter, ToolRunner};
use toolbelt_meta::ManifestDiscovery;
use tracing::level_filters::LevelFilter;

use crate::builtin::{self, BUILTIN_UNIT};
use crate::cli::Cli;
use crate::error::{CliError, Result};

/// Everything a command needs to resolve and run tools.
pub struct Context {
    pub runner: ToolRunner,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let discovery = match &cli.manifest {
            Some(path) => ManifestDiscovery::load(path)?,
            None => ManifestDiscovery::default(),
        }
        .with_unit(builtin::unit());
        let settings = discovery.settings();

        let units = &cli.units;
        let finder = discovery.finder(|unit| {
            units.is_empty() || unit.name == BUILTIN_UNIT || units.contains(&unit.name)
        })?;

        let threshold = match cli.threshold.as_deref() {
            Some(value) => Some(parse_threshold(value)?),
            None => settings.threshold_filter()?,
        };
        let threshold = threshold.unwrap_or(if cli.verbose {
            LevelFilter::DEBUG
        } else {
            LevelFilter::INFO
        });
        let printer = ToolPrinter::system().with_threshold(threshold);

        let mut runner = ToolRunner::new(finder, printer);
        let events: Option<PathBuf> = cli.events.clone().or(settings.events);
        if let Some(path) = events {
            tracing::debug!(path = %path.display(), "recording tool run events");
            runner = runner.with_sink(Arc::new(JsonLinesSink::open(&path)?));
        }

        Ok(Self { runner })
    }
}

fn parse_threshold(value: &str) -> Result<LevelFilter> {
    LevelFilter::from_str(value).map_err(|_| {
        CliError::user(format!(
            "Invalid threshold '{value}'. Valid: off, error, warn, info, debug, trace"
        ))
    })
}
