//! Run a single tool

use toolbelt_core::ToolRunner;

use crate::error::Result;

/// Resolve `tool` and run it with `args`.
pub fn run_tool(runner: &ToolRunner, tool: &str, args: &[String]) -> Result<()> {
    runner.run(tool, args)?;
    Ok(())
}
