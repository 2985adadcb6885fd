//! List available tools

use colored::Colorize;
use toolbelt_core::{ToolRunner, listing};

use crate::error::Result;

/// Print every tool the runner can resolve, grouped by simple name.
pub fn run_list(runner: &ToolRunner) -> Result<()> {
    let tools = runner.finder().tools();

    println!("{}", "Available Tools".bold());
    println!();
    if !tools.is_empty() {
        println!("{}", listing::to_text_block(&tools));
        println!();
    }
    println!("{} {} tools available.", "Total:".dimmed(), tools.len());
    Ok(())
}
