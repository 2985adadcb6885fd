//! Run an ad-hoc task

use colored::Colorize;
use toolbelt_core::{Task, ToolRunner};

use crate::builtin::BUILTIN_UNIT;
use crate::error::{CliError, Result};

/// Split `args` on `delimiter` and run the resulting commands as one task.
pub fn run_task(runner: &ToolRunner, parallel: bool, delimiter: &str, args: &[String]) -> Result<()> {
    let tool = Task::with_delimiter(BUILTIN_UNIT, "task", delimiter, args)?
        .parallel(parallel)
        .into_tool();

    let missing = runner.missing_requirements(&tool);
    if !missing.is_empty() {
        return Err(CliError::user(format!(
            "Unknown tool(s) in task: {}",
            missing.join(", ").yellow()
        )));
    }

    runner.run_tool::<&str>(&tool, &[])?;
    Ok(())
}
