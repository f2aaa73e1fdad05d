//! `EngineConfig` — explicit configuration value object.
//!
//! Everything the catalog and the template compiler derive from is carried in
//! one value constructed by the caller. There is no process-wide implicit
//! state: a preset switch means "construct a new `EngineConfig`, build a new
//! [`Engine`](crate::Engine)", never mutation of a live one.
//!
//! `Default` supplies the baked-in template and vocabularies used when no
//! user preset is active.

use crate::category::CategoryId;
use std::collections::HashSet;

/// The baked-in name template.
pub const DEFAULT_TEMPLATE: &str =
    "[symmetry]_[type]_[name][zoning][orientation][alphabetical_inc]_[numerical_inc]";

/// The baked-in main group (scene root the tool operates under).
pub const DEFAULT_MAIN_GROUP: &str = "ALL";

/// The baked-in zero-padding width for `[numerical_inc]`.
pub const DEFAULT_NUMERIC_WIDTH: usize = 3;

/// Configuration for catalog and structure construction.
///
/// Vocabulary fields hold the *short codes* matched against name fragments,
/// in matching priority order. Order matters: enumerated matching is
/// first-listed-candidate-wins (see [`CategoryKind`](crate::CategoryKind)).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// The name template, e.g. `[symmetry]_[type]_[name][zoning]_[numerical_inc]`.
    pub template: String,

    /// Name of the scene group renames are scoped under.
    pub main_group: String,

    /// Symmetry side markers.
    pub symmetry: Vec<String>,

    /// Object type codes (group types and mesh types combined).
    pub types: Vec<String>,

    /// Zoning suffix codes. Peeled repeatedly, so compound placements such as
    /// "TpLt" are consumed from the singles "Tp" and "Lt".
    pub zoning: Vec<String>,

    /// Orientation suffix codes. Peeled repeatedly like zoning.
    pub orientation: Vec<String>,

    /// Digit count of `[numerical_inc]` values.
    pub numeric_width: usize,

    /// Categories whose parts may be absent from a name.
    ///
    /// A template part is optional iff every category in it is listed here.
    /// `name` is never optional regardless of this set.
    pub optional: HashSet<CategoryId>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_owned(),
            main_group: DEFAULT_MAIN_GROUP.to_owned(),
            symmetry: default_symmetry(),
            types: default_types(),
            zoning: default_zoning(),
            orientation: default_orientation(),
            numeric_width: DEFAULT_NUMERIC_WIDTH,
            optional: default_optional(),
        }
    }
}

pub(crate) fn default_symmetry() -> Vec<String> {
    to_owned_vec(&["L", "R"])
}

pub(crate) fn default_group_types() -> Vec<String> {
    to_owned_vec(&["prx", "prp", "grp", "ctrl", "proxy", "render"])
}

pub(crate) fn default_mesh_types() -> Vec<String> {
    to_owned_vec(&["hi", "lo"])
}

pub(crate) fn default_types() -> Vec<String> {
    let mut types = default_group_types();
    types.extend(default_mesh_types());
    types
}

pub(crate) fn default_zoning() -> Vec<String> {
    // Left, Center, Right, Top, Middle, Bottom, Front, Back
    to_owned_vec(&["Lt", "Ct", "Rt", "Tp", "Md", "Bt", "Ft", "Bk"])
}

pub(crate) fn default_orientation() -> Vec<String> {
    // North, West, East, South
    to_owned_vec(&["Nt", "Wt", "Et", "St"])
}

pub(crate) fn default_optional() -> HashSet<CategoryId> {
    [
        CategoryId::Symmetry,
        CategoryId::Zoning,
        CategoryId::Orientation,
        CategoryId::AlphabeticalInc,
        CategoryId::NumericalInc,
    ]
    .into_iter()
    .collect()
}

fn to_owned_vec(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_owned()).collect()
}
