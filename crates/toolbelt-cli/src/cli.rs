//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// toolbelt - Find and run tools declared in manifests
#[derive(Parser, Debug)]
#[command(name = "toolbelt")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Manifest file, or directory of manifest files
    #[arg(short, long, global = true, env = "TOOLBELT_MANIFEST")]
    pub manifest: Option<PathBuf>,

    /// Append one JSON line per tool run to this file
    #[arg(long, global = true)]
    pub events: Option<PathBuf>,

    /// Message threshold: off, error, warn, info, debug or trace
    #[arg(long, global = true)]
    pub threshold: Option<String>,

    /// Only include tools from these units (repeatable)
    #[arg(short, long = "unit", global = true)]
    pub units: Vec<String>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run a tool by name or namespace/name
    ///
    /// Examples:
    ///   toolbelt run echo hello
    ///   toolbelt run demo/versions
    Run {
        /// Tool query
        tool: String,

        /// Arguments passed to the tool
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Run an ad-hoc task split from a flat argument list
    ///
    /// Examples:
    ///   toolbelt task git --version + cargo --version
    ///   toolbelt task --parallel fmt + lint
    Task {
        /// Run the commands concurrently
        #[arg(long)]
        parallel: bool,

        /// Token separating commands
        #[arg(long, default_value = "+")]
        delimiter: String,

        /// Commands separated by the delimiter
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// List all available tools
    List,

    /// Report tools whose required tools cannot be found
    Check,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_keeps_hyphen_arguments() {
        let cli = Cli::try_parse_from(["toolbelt", "-v", "run", "echo", "--flag", "x"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(
            cli.command,
            Commands::Run {
                tool: "echo".into(),
                args: vec!["--flag".into(), "x".into()],
            }
        );
    }

    #[test]
    fn test_task_options() {
        let cli = Cli::try_parse_from([
            "toolbelt", "--unit", "a", "task", "--parallel", "--delimiter", ",", "x", ",", "y",
        ])
        .unwrap();
        assert_eq!(cli.units, vec!["a"]);
        assert_eq!(
            cli.command,
            Commands::Task {
                parallel: true,
                delimiter: ",".into(),
                args: vec!["x".into(), ",".into(), "y".into()],
            }
        );
    }

    #[test]
    fn test_task_requires_arguments() {
        assert!(Cli::try_parse_from(["toolbelt", "task"]).is_err());
    }
}
