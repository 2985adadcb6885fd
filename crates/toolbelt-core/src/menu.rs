//! Menus: operators that dispatch to one of a fixed set of items

use std::fmt;
use std::io::Write;

use crate::tool::{Output, ToolOperator};
use crate::{Finder, Result, ToolRunner};

/// An operator whose first argument selects the item to run.
#[derive(Clone)]
pub struct ToolMenu {
    namespace: String,
    name: String,
    items: Finder,
}

impl fmt::Debug for ToolMenu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolMenu")
            .field("namespace", &self.namespace)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl ToolMenu {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, items: Finder) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            items,
        }
    }

    pub fn items(&self) -> &Finder {
        &self.items
    }

    fn usage(&self, out: Output<'_>) -> Result<()> {
        writeln!(out, "Usage: {} <item> ...", self.name)?;
        let mut names: Vec<String> = self
            .items
            .tools()
            .iter()
            .map(|tool| tool.name().to_string())
            .collect();
        names.sort();
        for name in names {
            writeln!(out, "{name}")?;
        }
        Ok(())
    }
}

impl ToolOperator for ToolMenu {
    fn name(&self) -> &str {
        &self.name
    }

    fn namespace(&self) -> String {
        self.namespace.clone()
    }

    fn run(
        &self,
        runner: &ToolRunner,
        out: Output<'_>,
        err: Output<'_>,
        args: &[String],
    ) -> Result<i32> {
        let Some((item, rest)) = args.split_first() else {
            self.usage(out)?;
            return Ok(0);
        };
        let Some(tool) = self.items.find(item) else {
            writeln!(err, "Item not found: {item}")?;
            return Ok(1);
        };
        runner.run_tool(&tool, rest)?;
        Ok(0)
    }
}
