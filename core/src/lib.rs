//! nameforge - naming-convention inspector/rebuilder for DCC scene objects
//!
//! Decomposes underscore-delimited object names against a configurable,
//! bracket-delimited template and reassembles them into canonical form.
//!
//! # Architecture
//!
//! Built in dependency order:
//!
//! - [`EngineConfig`] — Explicit configuration value object (no global state)
//! - [`Catalog`] — The seven category matching rules, built once from config
//! - [`CompiledStructure`] — The parsed template (ordered parts, optionality)
//! - [`inspect`] — Name → [`Inspection`] (the matcher core)
//! - [`rebuild`] — [`Inspection`] → canonical name string
//! - [`Engine`] — Facade bundling catalog + structure, rebuilt on config change
//! - Rename orchestration — category edits and uniqueness resolution against
//!   an abstract [`Scene`] collaborator
//!
//! # Key Design Insights
//!
//! 1. **Malformed names are data, not errors**: a name that cannot be
//!    structurally matched lands in [`PartMatch::BadNaming`] or
//!    [`Inspection::WholeBad`] and survives [`rebuild`] verbatim. Interactive
//!    renaming tools must tolerate messy legacy names without crashing.
//!
//! 2. **Errors are caught at compile time**: template problems surface when
//!    the structure is compiled ([`Engine::from_config`]), never at match
//!    time.
//!
//! 3. **First-listed-candidate-wins**: enumerated category matching tries
//!    candidates in configured order, NOT longest-match. Catalog ordering is
//!    a caller contract.
//!
//! # Example
//!
//! ```
//! use nameforge::prelude::*;
//!
//! let engine = Engine::from_config(&EngineConfig::default()).unwrap();
//!
//! let inspection = engine.inspect("L_prp_jarTpA_001").unwrap();
//! assert_eq!(inspection.value(CategoryId::Type), Some("prp"));
//! assert_eq!(inspection.value(CategoryId::Name), Some("jar"));
//! assert_eq!(inspection.value(CategoryId::Zoning), Some("Tp"));
//!
//! // Round trip is the identity for conformant names.
//! assert_eq!(engine.rebuild(&inspection), "L_prp_jarTpA_001");
//! ```

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod category;
mod config;
mod engine;
mod inspect;
mod rebuild;
mod rename;
mod scene;
mod structure;

#[cfg(feature = "presets")]
mod presets;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

// Core types
pub use category::{Catalog, Category, CategoryId, CategoryKind};
pub use config::{EngineConfig, DEFAULT_MAIN_GROUP, DEFAULT_NUMERIC_WIDTH, DEFAULT_TEMPLATE};
pub use engine::Engine;
pub use inspect::{inspect, Inspection, PartMatch};
pub use rebuild::rebuild;
pub use rename::{apply_category_edit, resolve_unique, resolve_unique_from};
pub use structure::{CompiledStructure, Part};

// Scene collaborator boundary
pub use scene::{MemoryScene, Scene, SceneError, PATH_SEPARATOR};

// Presets (feature-gated)
#[cfg(feature = "presets")]
pub use presets::{Preset, UserSettings, VocabEntry, NO_PRESET};

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use nameforge::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        rebuild,
        Catalog,
        Category,
        CategoryId,
        CategoryKind,
        CompiledStructure,
        Engine,
        EngineConfig,
        Inspection,
        MemoryScene,
        // Errors
        NamingError,
        Part,
        PartMatch,
        Scene,
        SceneError,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Errors from template compilation, inspection, and rename orchestration.
///
/// Template and configuration problems are caught when the engine is built,
/// not when a name is matched. Malformed *names* are never errors — they are
/// modeled as data ([`PartMatch::BadNaming`] / [`Inspection::WholeBad`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamingError {
    /// A template bracket names a category the catalog does not know.
    UnknownCategory {
        /// The unrecognized bracket token.
        token: String,
    },
    /// The template has a `[` without a matching `]` (or vice versa).
    UnbalancedBrackets {
        /// The offending template string.
        template: String,
    },
    /// No part of the template contains the `[name]` category.
    MissingName {
        /// The offending template string.
        template: String,
    },
    /// More than one part of the template contains `[name]`.
    ///
    /// Exactly one part must hold the semantic name — it is the anchor the
    /// whole prefix/suffix peel is organized around.
    DuplicateName {
        /// The offending template string.
        template: String,
    },
    /// A compiled structure without a name slot was handed to the inspector.
    ///
    /// This is a programming error, not user-facing:
    /// [`CompiledStructure::compile`] rejects such templates, so this can only
    /// happen when a structure is assembled by hand.
    StructureMissingName,
    /// Uniqueness resolution ran out of candidates.
    ///
    /// The candidate space is 26 for alphabetical increments and 10^width for
    /// numerical increments. There is no silent cap below the space size and
    /// no unbounded loop above it.
    ResolutionExhausted {
        /// Size of the exhausted candidate space.
        space: usize,
    },
    /// The scene collaborator refused a rename.
    Scene(SceneError),
}

impl std::fmt::Display for NamingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCategory { token } => {
                write!(
                    f,
                    "unknown category \"[{token}]\" — expected one of: {}",
                    CategoryId::ALL
                        .iter()
                        .map(|id| id.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }
            Self::UnbalancedBrackets { template } => {
                write!(f, "unbalanced brackets in template \"{template}\"")
            }
            Self::MissingName { template } => {
                write!(f, "template \"{template}\" has no [name] category")
            }
            Self::DuplicateName { template } => {
                write!(
                    f,
                    "template \"{template}\" declares [name] more than once — \
                     exactly one part must hold it"
                )
            }
            Self::StructureMissingName => {
                write!(f, "compiled structure has no name slot")
            }
            Self::ResolutionExhausted { space } => {
                write!(
                    f,
                    "all {space} increment candidates are taken — no unique name available"
                )
            }
            Self::Scene(e) => write!(f, "scene error: {e}"),
        }
    }
}

impl std::error::Error for NamingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Scene(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SceneError> for NamingError {
    fn from(e: SceneError) -> Self {
        Self::Scene(e)
    }
}
