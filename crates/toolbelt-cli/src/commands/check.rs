//! Check that every tool's requirements resolve

use colored::Colorize;
use toolbelt_core::ToolRunner;

use crate::error::{CliError, Result};

/// Report tools requiring other tools the runner cannot find.
pub fn run_check(runner: &ToolRunner) -> Result<()> {
    let tools = runner.finder().tools();
    let mut broken = 0;

    for tool in &tools {
        let missing = runner.missing_requirements(tool);
        if missing.is_empty() {
            continue;
        }
        broken += 1;
        println!(
            "{} {}: missing {}",
            "x".red().bold(),
            tool.to_namespace_and_name(),
            missing.join(", ").yellow()
        );
    }

    if broken > 0 {
        return Err(CliError::user(format!(
            "{broken} tool(s) have unresolved requirements"
        )));
    }
    println!("{} All {} tools resolved", "ok".green().bold(), tools.len());
    Ok(())
}
