//! Command implementations for toolbelt-cli

pub mod check;
pub mod list;
pub mod run;
pub mod task;

pub use check::run_check;
pub use list::run_list;
pub use run::run_tool;
pub use task::run_task;
