//! User preset documents (feature `presets`).
//!
//! A settings document holds named presets plus the name of the last active
//! one. Presets are sparse: any field left empty or absent falls back to the
//! built-in default, so a preset that only swaps the zoning vocabulary stays
//! three lines long.
//!
//! Documents are plain serde types; the caller picks the wire format
//! (`serde_json` here, YAML in the CLI).

use crate::category::CategoryId;
use crate::config::{
    self, EngineConfig, DEFAULT_MAIN_GROUP, DEFAULT_NUMERIC_WIDTH, DEFAULT_TEMPLATE,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Name of the implicit built-in preset.
pub const NO_PRESET: &str = "Default preset";

/// One vocabulary entry: a human label and the short code matched in names.
///
/// Only `value` participates in matching; `label` exists for UI display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabEntry {
    /// Display label, e.g. "Left".
    pub label: String,
    /// Short code, e.g. "Lt".
    pub value: String,
}

impl VocabEntry {
    /// Construct from a label/code pair.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A named naming convention. Every field is sparse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    /// Template override; empty means the built-in template.
    #[serde(default)]
    pub template: String,

    /// Main group override; empty means the built-in main group.
    #[serde(default)]
    pub main_group: String,

    /// Symmetry vocabulary; empty means the built-in codes.
    #[serde(default)]
    pub symmetry: Vec<VocabEntry>,

    /// Type codes for grouping nodes.
    #[serde(default)]
    pub group_types: Vec<VocabEntry>,

    /// Type codes for geometry nodes. Appended after `group_types` in
    /// matching priority order.
    #[serde(default)]
    pub mesh_types: Vec<VocabEntry>,

    /// Zoning vocabulary; order is matching priority.
    #[serde(default)]
    pub zoning: Vec<VocabEntry>,

    /// Orientation vocabulary; order is matching priority.
    #[serde(default)]
    pub orientation: Vec<VocabEntry>,

    /// Digit count for `[numerical_inc]`; absent means the built-in width.
    #[serde(default)]
    pub numeric_width: Option<usize>,

    /// Per-category optionality overrides, keyed by bracket token.
    /// Categories not listed keep their default optionality.
    #[serde(default)]
    pub optional: HashMap<String, bool>,
}

impl Preset {
    /// Resolve the preset into a complete [`EngineConfig`], filling every
    /// sparse field from the built-in defaults.
    pub fn to_engine_config(&self) -> EngineConfig {
        let mut types = codes_or(&self.group_types, config::default_group_types);
        types.extend(codes_or(&self.mesh_types, config::default_mesh_types));

        let mut optional = config::default_optional();
        for (token, is_optional) in &self.optional {
            let Some(id) = CategoryId::parse(token) else {
                continue;
            };
            // name stays mandatory no matter what the document says.
            if id == CategoryId::Name {
                continue;
            }
            if *is_optional {
                optional.insert(id);
            } else {
                optional.remove(&id);
            }
        }

        EngineConfig {
            template: string_or(&self.template, DEFAULT_TEMPLATE),
            main_group: string_or(&self.main_group, DEFAULT_MAIN_GROUP),
            symmetry: codes_or(&self.symmetry, config::default_symmetry),
            types,
            zoning: codes_or(&self.zoning, config::default_zoning),
            orientation: codes_or(&self.orientation, config::default_orientation),
            numeric_width: self.numeric_width.unwrap_or(DEFAULT_NUMERIC_WIDTH),
            optional,
        }
    }
}

fn string_or(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_owned()
    } else {
        value.to_owned()
    }
}

fn codes_or(entries: &[VocabEntry], fallback: fn() -> Vec<String>) -> Vec<String> {
    if entries.is_empty() {
        fallback()
    } else {
        entries.iter().map(|e| e.value.clone()).collect()
    }
}

/// A persisted settings document: named presets plus the active selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    /// Name of the preset last selected by the user.
    #[serde(default)]
    pub last_preset: String,

    /// Named presets. The built-in defaults are implicit and never stored.
    #[serde(default)]
    pub presets: HashMap<String, Preset>,
}

impl UserSettings {
    /// Parse a JSON settings document.
    ///
    /// # Errors
    ///
    /// Any `serde_json` parse error, unchanged.
    pub fn from_json_str(document: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(document)
    }

    /// The active preset, if `last_preset` names a stored one. [`NO_PRESET`]
    /// and unknown names select the built-in defaults.
    pub fn active_preset(&self) -> Option<&Preset> {
        if self.last_preset.is_empty() || self.last_preset == NO_PRESET {
            return None;
        }
        self.presets.get(&self.last_preset)
    }

    /// The engine configuration the active preset resolves to.
    pub fn active_engine_config(&self) -> EngineConfig {
        match self.active_preset() {
            Some(preset) => preset.to_engine_config(),
            None => EngineConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_preset_resolves_to_the_defaults() {
        assert_eq!(Preset::default().to_engine_config(), EngineConfig::default());
    }

    #[test]
    fn vocab_overrides_replace_only_their_field() {
        let preset = Preset {
            zoning: vec![VocabEntry::new("Up", "Up"), VocabEntry::new("Down", "Dn")],
            ..Preset::default()
        };
        let config = preset.to_engine_config();
        assert_eq!(config.zoning, vec!["Up", "Dn"]);
        assert_eq!(config.symmetry, EngineConfig::default().symmetry);
        assert_eq!(config.template, DEFAULT_TEMPLATE);
    }

    #[test]
    fn group_and_mesh_types_concatenate_in_order() {
        let preset = Preset {
            group_types: vec![VocabEntry::new("Group", "grp")],
            mesh_types: vec![VocabEntry::new("High", "hi")],
            ..Preset::default()
        };
        assert_eq!(preset.to_engine_config().types, vec!["grp", "hi"]);
    }

    #[test]
    fn optional_overrides_merge_onto_the_default_set() {
        let preset = Preset {
            optional: [
                ("type".to_owned(), true),
                ("symmetry".to_owned(), false),
                ("name".to_owned(), true),
                ("widget".to_owned(), true),
            ]
            .into_iter()
            .collect(),
            ..Preset::default()
        };
        let optional = preset.to_engine_config().optional;
        assert!(optional.contains(&CategoryId::Type));
        assert!(!optional.contains(&CategoryId::Symmetry));
        assert!(!optional.contains(&CategoryId::Name));
        assert!(optional.contains(&CategoryId::Zoning));
    }

    #[test]
    fn settings_document_round_trips_through_json() {
        let document = r#"{
            "last_preset": "vehicles",
            "presets": {
                "vehicles": {
                    "template": "[type]_[name]_[numerical_inc]",
                    "numeric_width": 4
                }
            }
        }"#;
        let settings = UserSettings::from_json_str(document).unwrap();
        let config = settings.active_engine_config();
        assert_eq!(config.template, "[type]_[name]_[numerical_inc]");
        assert_eq!(config.numeric_width, 4);
        assert_eq!(config.main_group, DEFAULT_MAIN_GROUP);
    }

    #[test]
    fn unknown_or_default_selection_uses_builtin_config() {
        let mut settings = UserSettings::default();
        assert_eq!(settings.active_engine_config(), EngineConfig::default());

        settings.last_preset = NO_PRESET.to_owned();
        assert!(settings.active_preset().is_none());

        settings.last_preset = "missing".to_owned();
        assert!(settings.active_preset().is_none());
        assert_eq!(settings.active_engine_config(), EngineConfig::default());
    }
}
