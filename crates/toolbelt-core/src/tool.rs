//! Tool descriptors and the provider traits they wrap
//!
//! A [`Tool`] binds a namespace and a name to a [`Provider`]. Providers come
//! in two flavours:
//!
//! - [`ToolProvider`]: plain executables taking arguments and writing output
//! - [`ToolOperator`]: tools that run other tools through a [`ToolRunner`]
//!
//! A tool is also a one-element [`ToolFinder`](crate::ToolFinder), which lets
//! single tools take part in finder composition directly.

use std::collections::BTreeSet;
use std::fmt;
use std::io::Write;
use std::sync::Arc;

use crate::{Result, ToolRunner};

/// Output stream handed to providers.
pub type Output<'a> = &'a mut (dyn Write + Send);

/// Namespace for a type: the name of the crate that defines it.
pub fn namespace_of_type(type_name: &str) -> String {
    let end = type_name
        .find(|c| c == ':' || c == '<')
        .unwrap_or(type_name.len());
    type_name[..end].to_string()
}

/// An executable that takes arguments and reports an exit code.
pub trait ToolProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Defaults to the crate that defines the implementing type.
    fn namespace(&self) -> String {
        namespace_of_type(std::any::type_name::<Self>())
    }

    /// Identity recorded in run events.
    fn identity(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn run(&self, out: Output<'_>, err: Output<'_>, args: &[String]) -> i32;
}

/// A tool capable of running other tools.
pub trait ToolOperator: Send + Sync {
    fn name(&self) -> &str;

    /// Defaults to the crate that defines the implementing type.
    fn namespace(&self) -> String {
        namespace_of_type(std::any::type_name::<Self>())
    }

    fn identity(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Names of tools this operator runs; empty means "any tool".
    fn requires(&self) -> BTreeSet<String> {
        BTreeSet::new()
    }

    fn run(
        &self,
        runner: &ToolRunner,
        out: Output<'_>,
        err: Output<'_>,
        args: &[String],
    ) -> Result<i32>;
}

/// The executable capability behind a [`Tool`].
#[derive(Clone)]
pub enum Provider {
    Plain(Arc<dyn ToolProvider>),
    Operator(Arc<dyn ToolOperator>),
}

impl Provider {
    pub fn plain(provider: impl ToolProvider + 'static) -> Self {
        Self::Plain(Arc::new(provider))
    }

    pub fn operator(operator: impl ToolOperator + 'static) -> Self {
        Self::Operator(Arc::new(operator))
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Plain(provider) => provider.name(),
            Self::Operator(operator) => operator.name(),
        }
    }

    pub fn namespace(&self) -> String {
        match self {
            Self::Plain(provider) => provider.namespace(),
            Self::Operator(operator) => operator.namespace(),
        }
    }

    pub fn identity(&self) -> &'static str {
        match self {
            Self::Plain(provider) => provider.identity(),
            Self::Operator(operator) => operator.identity(),
        }
    }

    pub fn requires(&self) -> BTreeSet<String> {
        match self {
            Self::Plain(_) => BTreeSet::new(),
            Self::Operator(operator) => operator.requires(),
        }
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::Plain(_) => "Plain",
            Self::Operator(_) => "Operator",
        };
        f.debug_tuple(kind).field(&self.identity()).finish()
    }
}

/// A named, namespaced tool descriptor.
#[derive(Debug, Clone)]
pub struct Tool {
    namespace: String,
    name: String,
    provider: Provider,
}

impl Tool {
    /// Wrap a provider, taking namespace and name from it.
    pub fn of(provider: impl ToolProvider + 'static) -> Self {
        Self::from_provider(Provider::plain(provider))
    }

    /// Wrap an operator, taking namespace and name from it.
    pub fn of_operator(operator: impl ToolOperator + 'static) -> Self {
        Self::from_provider(Provider::operator(operator))
    }

    pub fn from_provider(provider: Provider) -> Self {
        Self::new(provider.namespace(), provider)
    }

    /// Wrap a provider under an explicit namespace.
    pub fn new(namespace: impl Into<String>, provider: Provider) -> Self {
        Self {
            namespace: namespace.into(),
            name: provider.name().to_string(),
            provider,
        }
    }

    /// Closure-backed tool, handy for built-ins and tests.
    pub fn from_fn<F>(name: impl Into<String>, run: F) -> Self
    where
        F: Fn(Output<'_>, Output<'_>, &[String]) -> i32 + Send + Sync + 'static,
    {
        Self::of(FnProvider::new(name, run))
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn provider(&self) -> &Provider {
        &self.provider
    }

    /// `namespace/name`, or just `name` for an empty namespace.
    pub fn to_namespace_and_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.namespace, self.name)
        }
    }

    /// True if this tool's name equals `name` or starts with `name@`.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name == name
            || self
                .name
                .strip_prefix(name)
                .is_some_and(|rest| rest.starts_with('@'))
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_namespace_and_name())
    }
}

/// [`ToolProvider`] backed by a closure.
pub struct FnProvider<F> {
    name: String,
    run: F,
}

impl<F> FnProvider<F>
where
    F: Fn(Output<'_>, Output<'_>, &[String]) -> i32 + Send + Sync,
{
    pub fn new(name: impl Into<String>, run: F) -> Self {
        Self {
            name: name.into(),
            run,
        }
    }
}

impl<F> ToolProvider for FnProvider<F>
where
    F: Fn(Output<'_>, Output<'_>, &[String]) -> i32 + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, out: Output<'_>, err: Output<'_>, args: &[String]) -> i32 {
        (self.run)(out, err, args)
    }
}
