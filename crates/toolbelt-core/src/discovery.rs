//! Units of discoverable tools
//!
//! A [`Unit`] groups the tools contributed by one origin: a manifest file, a
//! plugin, or a host's built-in set. [`Discovery`] implementations enumerate
//! units; [`finder::of_units`](crate::finder::of_units) and
//! [`finder::discover`](crate::finder::discover) turn them into a finder.

use serde::{Deserialize, Serialize};

use crate::task::ARGUMENT_DELIMITER;
use crate::{Finder, Provider, Result, Task};

/// Task namespace placeholder meaning "the name of the declaring unit".
pub const UNIT_NAMESPACE: &str = "*";

fn default_delimiter() -> String {
    ARGUMENT_DELIMITER.to_string()
}

/// A task declared by a unit as a flat, delimiter-separated argument list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDeclaration {
    /// `"*"` or absent: the unit name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    pub name: String,

    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    #[serde(default)]
    pub parallel: bool,

    #[serde(default)]
    pub args: Vec<String>,
}

impl TaskDeclaration {
    pub fn new<I, S>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            namespace: None,
            name: name.into(),
            delimiter: default_delimiter(),
            parallel: false,
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Namespace this declaration resolves to inside `unit`.
    pub fn namespace_in<'a>(&'a self, unit: &'a str) -> &'a str {
        match self.namespace.as_deref() {
            None | Some(UNIT_NAMESPACE) => unit,
            Some(namespace) => namespace,
        }
    }

    pub fn to_task(&self, unit: &str) -> Result<Task> {
        Ok(Task::with_delimiter(
            self.namespace_in(unit),
            &self.name,
            &self.delimiter,
            &self.args,
        )?
        .parallel(self.parallel))
    }
}

/// One origin of tools.
#[derive(Clone, Default)]
pub struct Unit {
    pub name: String,
    pub tasks: Vec<TaskDeclaration>,
    pub finders: Vec<Finder>,
    pub providers: Vec<Provider>,
}

impl std::fmt::Debug for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Unit")
            .field("name", &self.name)
            .field("tasks", &self.tasks)
            .field("finders", &self.finders.len())
            .field("providers", &self.providers)
            .finish()
    }
}

impl Unit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_task(mut self, task: TaskDeclaration) -> Self {
        self.tasks.push(task);
        self
    }

    #[must_use]
    pub fn with_finder(mut self, finder: Finder) -> Self {
        self.finders.push(finder);
        self
    }

    #[must_use]
    pub fn with_provider(mut self, provider: Provider) -> Self {
        self.providers.push(provider);
        self
    }
}

/// Source of units.
pub trait Discovery {
    fn units(&self) -> Result<Vec<Unit>>;
}

impl Discovery for Vec<Unit> {
    fn units(&self) -> Result<Vec<Unit>> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_namespace_placeholder() {
        let mut declaration = TaskDeclaration::new("build", ["a"]);
        assert_eq!(declaration.namespace_in("unit"), "unit");

        declaration.namespace = Some("*".into());
        assert_eq!(declaration.namespace_in("unit"), "unit");

        declaration.namespace = Some("custom".into());
        assert_eq!(declaration.namespace_in("unit"), "custom");
    }

    #[test]
    fn test_to_task_uses_delimiter_and_parallel() {
        let declaration = TaskDeclaration {
            namespace: None,
            name: "both".into(),
            delimiter: ",".into(),
            parallel: true,
            args: vec!["a".into(), "1".into(), ",".into(), "b".into()],
        };
        let task = declaration.to_task("demo").unwrap();
        assert_eq!(task.namespace(), "demo");
        assert!(task.is_parallel());
        assert_eq!(task.commands().len(), 2);
        assert_eq!(task.commands()[0].to_command_line(), "a 1");
    }

    #[test]
    fn test_declaration_defaults_from_json() {
        let declaration: TaskDeclaration =
            serde_json::from_str(r#"{ "name": "t", "args": ["x", "+", "y"] }"#).unwrap();
        assert_eq!(declaration, TaskDeclaration::new("t", ["x", "+", "y"]));
    }
}
