//! Tools every toolbelt invocation provides

use std::io::Write;

use toolbelt_core::{Output, Provider, ToolProvider, Unit};

/// Name of the unit holding the built-in tools.
pub const BUILTIN_UNIT: &str = "toolbelt";

/// The built-in unit.
pub fn unit() -> Unit {
    Unit::new(BUILTIN_UNIT).with_provider(Provider::plain(Echo))
}

/// Prints its arguments separated by single spaces.
struct Echo;

impl ToolProvider for Echo {
    fn name(&self) -> &str {
        "echo"
    }

    fn run(&self, out: Output<'_>, _err: Output<'_>, args: &[String]) -> i32 {
        match writeln!(out, "{}", args.join(" ")) {
            Ok(()) => 0,
            Err(_) => 1,
        }
    }
}
