//! The engine facade.
//!
//! Bundles a validated configuration with the catalog and compiled structure
//! derived from it. An [`Engine`] is immutable; switching templates or
//! vocabularies means building a new one, so no half-updated state is ever
//! observable.

use crate::category::{Catalog, CategoryId};
use crate::config::EngineConfig;
use crate::inspect::{inspect, Inspection};
use crate::rebuild::rebuild;
use crate::rename::{apply_category_edit, resolve_unique};
use crate::scene::{short_name, Scene};
use crate::structure::CompiledStructure;
use crate::NamingError;

/// Naming engine: catalog + compiled structure, built from one config.
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    catalog: Catalog,
    structure: CompiledStructure,
}

impl Engine {
    /// Build an engine, compiling the configured template.
    ///
    /// # Errors
    ///
    /// Template validation errors from [`CompiledStructure::compile`].
    pub fn from_config(config: &EngineConfig) -> Result<Self, NamingError> {
        let catalog = Catalog::from_config(config);
        let structure = CompiledStructure::compile(&config.template, &config.optional)?;
        Ok(Self {
            config: config.clone(),
            catalog,
            structure,
        })
    }

    /// An engine over the built-in defaults. Cannot fail: the default
    /// template is known valid.
    pub fn with_defaults() -> Self {
        Self::from_config(&EngineConfig::default())
            .unwrap_or_else(|e| unreachable!("default config must compile: {e}"))
    }

    /// The configuration this engine was built from.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The category catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The compiled template structure.
    pub fn structure(&self) -> &CompiledStructure {
        &self.structure
    }

    /// Decompose a short name against the structure.
    ///
    /// # Errors
    ///
    /// [`NamingError::StructureMissingName`] only for hand-assembled
    /// structures; engine-built structures always carry a name slot.
    pub fn inspect(&self, name: &str) -> Result<Inspection, NamingError> {
        inspect(name, &self.structure, &self.catalog)
    }

    /// Reassemble an inspection into a canonical name.
    pub fn rebuild(&self, inspection: &Inspection) -> String {
        rebuild(inspection)
    }

    /// Inspect, overwrite one category, rebuild. See
    /// [`apply_category_edit`](crate::apply_category_edit).
    pub fn apply_category_edit(
        &self,
        name: &str,
        id: CategoryId,
        new_value: &str,
    ) -> Result<String, NamingError> {
        apply_category_edit(self, name, id, new_value)
    }

    /// Find a collision-free short name for the object at `full_path`. See
    /// [`resolve_unique`](crate::resolve_unique).
    pub fn resolve_unique(
        &self,
        full_path: &str,
        inspection: &Inspection,
        scene: &dyn Scene,
    ) -> Result<(String, Inspection), NamingError> {
        resolve_unique(self, full_path, inspection, scene)
    }

    /// Edit one category of the object at `full_path` and commit the rename
    /// to the scene, resolving collisions through the increment categories.
    ///
    /// Returns the object's new full path. When the edit produces the name
    /// the object already has, nothing is renamed.
    ///
    /// # Errors
    ///
    /// [`NamingError::ResolutionExhausted`] when no unique candidate exists,
    /// or a [`NamingError::Scene`] from the commit itself.
    pub fn rename_with_edit(
        &self,
        scene: &mut dyn Scene,
        full_path: &str,
        id: CategoryId,
        new_value: &str,
    ) -> Result<String, NamingError> {
        let current = short_name(full_path);
        let edited = self.apply_category_edit(current, id, new_value)?;
        if edited == current {
            return Ok(full_path.to_owned());
        }

        let inspection = self.inspect(&edited)?;
        let target = if scene.exists(&crate::scene::with_short_name(full_path, &edited)) {
            let (unique, _) = resolve_unique(self, full_path, &inspection, scene)?;
            unique
        } else {
            edited
        };
        Ok(scene.rename(full_path, &target)?)
    }
}
