//! Units discovered from manifests
//!
//! Every manifest becomes one [`Unit`]: its declared tasks, plus a
//! [`Program`] provider for each program that can be located. Programs that
//! cannot be located are logged and left out.
//!
//! Menus refer to tools by query, so they are built in a second pass over the
//! finder of everything discovered and appended after it.

use std::path::Path;

use toolbelt_core::{Discovery, Finder, Provider, Tool, ToolMenu, Unit, finder};
use toolbelt_process::Program;

use crate::loader::{LoadedManifest, ManifestLoader};
use crate::{ProgramDeclaration, Result, Settings};

/// [`Discovery`] over loaded manifests and any extra units.
#[derive(Debug, Default)]
pub struct ManifestDiscovery {
    manifests: Vec<LoadedManifest>,
    extra: Vec<Unit>,
}

impl ManifestDiscovery {
    pub fn new(manifests: Vec<LoadedManifest>) -> Self {
        Self {
            manifests,
            extra: Vec::new(),
        }
    }

    /// Discover from a manifest file or directory.
    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self::new(ManifestLoader::new().load(path)?))
    }

    /// Add a unit that takes part in discovery after the manifests.
    #[must_use]
    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.extra.push(unit);
        self
    }

    pub fn manifests(&self) -> &[LoadedManifest] {
        &self.manifests
    }

    /// Settings of all manifests, later files overriding earlier ones.
    pub fn settings(&self) -> Settings {
        let mut settings = Settings::default();
        for loaded in &self.manifests {
            settings.merge(&loaded.manifest.settings);
        }
        settings
    }

    /// Finder over every included unit, followed by the menus those units
    /// declare.
    pub fn finder<P>(&self, include: P) -> Result<Finder>
    where
        P: Fn(&Unit) -> bool,
    {
        let units = self.units()?;
        let base = finder::of_units(&units, &include)?;

        let mut menus = Vec::new();
        for loaded in &self.manifests {
            let unit_name = loaded.unit_name();
            if !units.iter().any(|unit| unit.name == unit_name && include(unit)) {
                continue;
            }
            for menu in &loaded.manifest.menus {
                let items: Vec<Tool> = menu
                    .items
                    .iter()
                    .filter_map(|query| {
                        let found = base.find(query);
                        if found.is_none() {
                            tracing::warn!(menu = %menu.name, item = %query, "menu item not found");
                        }
                        found
                    })
                    .collect();
                menus.push(Tool::of_operator(ToolMenu::new(
                    unit_name.clone(),
                    menu.name.clone(),
                    finder::of(items),
                )));
            }
        }

        if menus.is_empty() {
            return Ok(base);
        }
        Ok(finder::compose([base, finder::of(menus)]))
    }
}

impl Discovery for ManifestDiscovery {
    fn units(&self) -> toolbelt_core::Result<Vec<Unit>> {
        let mut units: Vec<Unit> = self.manifests.iter().map(to_unit).collect();
        units.extend(self.extra.iter().cloned());
        Ok(units)
    }
}

fn to_unit(loaded: &LoadedManifest) -> Unit {
    let mut unit = Unit::new(loaded.unit_name());
    unit.tasks = loaded.manifest.tasks.clone();
    for declaration in &loaded.manifest.programs {
        match locate(declaration, loaded.base_dir()) {
            Some(program) => unit.providers.push(Provider::plain(program)),
            None => tracing::warn!(
                unit = %unit.name,
                program = %declaration.name,
                "program not found, skipping"
            ),
        }
    }
    unit
}

fn locate(declaration: &ProgramDeclaration, base_dir: &Path) -> Option<Program> {
    let name = declaration.name.as_str();
    match &declaration.path {
        Some(path) => Program::find_executable(name, &base_dir.join(path), &declaration.args),
        None => Program::find_on_path(name, &declaration.args),
    }
}
