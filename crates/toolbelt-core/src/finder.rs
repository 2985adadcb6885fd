//! Tool lookup and finder composition
//!
//! A finder is an immutable, ordered collection of tools. Queries take one of
//! two shapes:
//!
//! - `name`: the first tool whose name is `name` or starts with `name@`
//! - `namespace/name`: as above, restricted to tools in `namespace`
//!
//! Query strings split on their *last* `/`, so namespaces may themselves
//! contain slashes.

use std::sync::{Arc, LazyLock};

use crate::discovery::{Discovery, Unit};
use crate::{Result, Tool};

/// Ordered, immutable tool collection.
pub trait ToolFinder: Send + Sync {
    /// Every tool in this finder, in resolution order.
    fn tools(&self) -> Vec<Tool>;

    /// First tool matching `query`, if any.
    fn find(&self, query: &str) -> Option<Tool> {
        find_first(self.tools(), query)
    }
}

/// Shared finder handle.
pub type Finder = Arc<dyn ToolFinder>;

/// Apply the query rules to a sequence of tools.
pub fn find_first(tools: impl IntoIterator<Item = Tool>, query: &str) -> Option<Tool> {
    match query.rsplit_once('/') {
        None => tools.into_iter().find(|tool| tool.matches_name(query)),
        Some((namespace, name)) => tools
            .into_iter()
            .find(|tool| tool.namespace() == namespace && tool.matches_name(name)),
    }
}

impl ToolFinder for Tool {
    fn tools(&self) -> Vec<Tool> {
        vec![self.clone()]
    }
}

struct EmptyToolFinder;

impl ToolFinder for EmptyToolFinder {
    fn tools(&self) -> Vec<Tool> {
        Vec::new()
    }

    fn find(&self, _query: &str) -> Option<Tool> {
        None
    }
}

struct ListToolFinder {
    tools: Vec<Tool>,
}

impl ToolFinder for ListToolFinder {
    fn tools(&self) -> Vec<Tool> {
        self.tools.clone()
    }

    fn find(&self, query: &str) -> Option<Tool> {
        find_first(self.tools.iter().cloned(), query)
    }
}

struct CompositeToolFinder {
    finders: Vec<Finder>,
}

impl ToolFinder for CompositeToolFinder {
    fn tools(&self) -> Vec<Tool> {
        self.finders.iter().flat_map(|finder| finder.tools()).collect()
    }

    fn find(&self, query: &str) -> Option<Tool> {
        self.finders.iter().find_map(|finder| finder.find(query))
    }
}

static EMPTY: LazyLock<Finder> = LazyLock::new(|| Arc::new(EmptyToolFinder));

/// The finder that finds nothing. Every call returns the same instance.
pub fn empty() -> Finder {
    Arc::clone(&EMPTY)
}

/// Finder over a fixed list of tools, in the given order.
pub fn of(tools: impl IntoIterator<Item = Tool>) -> Finder {
    let mut tools: Vec<Tool> = tools.into_iter().collect();
    match tools.len() {
        0 => empty(),
        1 => match tools.pop() {
            Some(tool) => Arc::new(tool),
            None => empty(),
        },
        _ => Arc::new(ListToolFinder { tools }),
    }
}

/// Finder consulting each of `finders` in order.
///
/// Composing nothing yields [`empty()`]; composing a single finder yields
/// that very finder.
pub fn compose(finders: impl IntoIterator<Item = Finder>) -> Finder {
    let mut finders: Vec<Finder> = finders.into_iter().collect();
    match finders.len() {
        0 => empty(),
        1 => finders.pop().unwrap_or_else(empty),
        _ => Arc::new(CompositeToolFinder { finders }),
    }
}

/// Finder over every unit accepted by `include`.
///
/// Declared tasks of all included units come first in declaration order,
/// then the tools of their finders, then all their providers (namespaced by
/// the owning unit) sorted together by namespace and name.
pub fn of_units<P>(units: &[Unit], include: P) -> Result<Finder>
where
    P: Fn(&Unit) -> bool,
{
    let mut tasks = Vec::new();
    let mut finders = Vec::new();
    let mut provided = Vec::new();
    for unit in units.iter().filter(|unit| include(unit)) {
        for declaration in &unit.tasks {
            tasks.push(declaration.to_task(&unit.name)?.into_tool());
        }
        finders.extend(unit.finders.iter().cloned());
        provided.extend(
            unit.providers
                .iter()
                .map(|provider| Tool::new(unit.name.clone(), provider.clone())),
        );
        tracing::debug!(unit = %unit.name, tasks = unit.tasks.len(), providers = unit.providers.len(), "included unit");
    }
    provided.sort_by(|a, b| (a.namespace(), a.name()).cmp(&(b.namespace(), b.name())));

    let parts = [of(tasks), compose(finders), of(provided)];
    Ok(compose(parts.into_iter().filter(|finder| !Arc::ptr_eq(finder, &*EMPTY))))
}

/// Discover units and build a finder over those accepted by `include`.
pub fn discover<P>(discovery: &dyn Discovery, include: P) -> Result<Finder>
where
    P: Fn(&Unit) -> bool,
{
    of_units(&discovery.units()?, include)
}
