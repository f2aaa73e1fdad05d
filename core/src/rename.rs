//! Rename orchestration — category edits and uniqueness resolution.
//!
//! Edits are pure: every step inspects, derives a new [`Inspection`], and
//! rebuilds. A previously returned inspection is never mutated in place, so
//! sequential edits cannot contaminate each other.
//!
//! Uniqueness resolution walks an increment category through its candidate
//! space, testing each rebuilt candidate against the scene, and reports
//! [`NamingError::ResolutionExhausted`] when the space is used up instead of
//! looping forever.

use crate::category::CategoryId;
use crate::engine::Engine;
use crate::inspect::{Inspection, PartMatch};
use crate::rebuild::rebuild;
use crate::scene::{short_name, with_short_name, Scene};
use crate::NamingError;

/// Inspect `name`, overwrite every occurrence of `id` with `new_value`, and
/// rebuild.
///
/// A name in the whole-bad regime has no structure to edit; it is returned
/// unchanged.
///
/// # Errors
///
/// Only structural errors from [`inspect`](crate::inspect) — never from the
/// name content itself.
pub fn apply_category_edit(
    engine: &Engine,
    name: &str,
    id: CategoryId,
    new_value: &str,
) -> Result<String, NamingError> {
    let inspection = engine.inspect(name)?;
    Ok(rebuild(&inspection.with_value(id, new_value)))
}

/// [`resolve_unique_from`] starting at "A" / 1.
pub fn resolve_unique(
    engine: &Engine,
    full_path: &str,
    inspection: &Inspection,
    scene: &dyn Scene,
) -> Result<(String, Inspection), NamingError> {
    resolve_unique_from(engine, full_path, inspection, scene, 'A', 1)
}

/// Find a short name that does not collide with any existing scene object.
///
/// The first part declaring `alphabetical_inc` selects alphabetical mode;
/// otherwise the first declaring `numerical_inc` selects numerical mode
/// (alphabetical wins when one part declares both). The increment is forced
/// to the start value and stepped until [`Scene::exists`] reports the
/// candidate path free. Without either increment category, a raw trailing
/// digit run on the full path is incremented instead.
///
/// Returns the unique short name and the inspection it was rebuilt from.
///
/// # Errors
///
/// [`NamingError::ResolutionExhausted`] when every candidate in the space
/// (26 letters, or 10^width numbers) is taken. The raw-digit fallback has an
/// unbounded space and cannot exhaust.
pub fn resolve_unique_from(
    engine: &Engine,
    full_path: &str,
    inspection: &Inspection,
    scene: &dyn Scene,
    start_alpha: char,
    start_num: u32,
) -> Result<(String, Inspection), NamingError> {
    match increment_mode(inspection) {
        Some(CategoryId::AlphabeticalInc) => {
            resolve_alphabetical(full_path, inspection, scene, start_alpha)
        }
        Some(_) => resolve_numerical(engine, full_path, inspection, scene, start_num),
        None => Ok((resolve_raw_suffix(full_path, scene), inspection.clone())),
    }
}

/// The increment category driving resolution, scanning parts in order.
fn increment_mode(inspection: &Inspection) -> Option<CategoryId> {
    let Inspection::Parts(parts) = inspection else {
        return None;
    };
    for part in parts {
        let PartMatch::Matched { values } = part else {
            continue;
        };
        if values.iter().any(|(c, _)| *c == CategoryId::AlphabeticalInc) {
            return Some(CategoryId::AlphabeticalInc);
        }
        if values.iter().any(|(c, _)| *c == CategoryId::NumericalInc) {
            return Some(CategoryId::NumericalInc);
        }
    }
    None
}

fn resolve_alphabetical(
    full_path: &str,
    inspection: &Inspection,
    scene: &dyn Scene,
    start_alpha: char,
) -> Result<(String, Inspection), NamingError> {
    let mut letter = start_alpha;
    loop {
        let candidate = inspection.with_value(CategoryId::AlphabeticalInc, &letter.to_string());
        let short = rebuild(&candidate);
        if !scene.exists(&with_short_name(full_path, &short)) {
            return Ok((short, candidate));
        }
        if letter >= 'Z' {
            return Err(NamingError::ResolutionExhausted { space: 26 });
        }
        letter = (letter as u8 + 1) as char;
    }
}

fn resolve_numerical(
    engine: &Engine,
    full_path: &str,
    inspection: &Inspection,
    scene: &dyn Scene,
    start_num: u32,
) -> Result<(String, Inspection), NamingError> {
    let width = engine.config().numeric_width;
    let space = 10usize.pow(width as u32);
    let mut number = start_num;
    loop {
        let candidate =
            inspection.with_value(CategoryId::NumericalInc, &format!("{number:0width$}"));
        let short = rebuild(&candidate);
        if !scene.exists(&with_short_name(full_path, &short)) {
            return Ok((short, candidate));
        }
        // The widest representable value is 10^width - 1.
        if number as usize + 1 >= space {
            return Err(NamingError::ResolutionExhausted { space });
        }
        number += 1;
    }
}

/// No increment slot in the structure: increment a raw trailing digit run on
/// the full path itself. "obj" becomes "obj1", "obj9" becomes "obj10".
fn resolve_raw_suffix(full_path: &str, scene: &dyn Scene) -> String {
    let stem = full_path.trim_end_matches(|c: char| c.is_ascii_digit());
    let digits = &full_path[stem.len()..];
    let mut number: u64 = digits.parse().map(|n: u64| n + 1).unwrap_or(1);

    let mut candidate = format!("{stem}{number}");
    while scene.exists(&candidate) {
        number += 1;
        candidate = format!("{stem}{number}");
    }
    short_name(&candidate).to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::MemoryScene;
    use crate::EngineConfig;

    fn engine(template: &str) -> Engine {
        Engine::from_config(&EngineConfig {
            template: template.to_owned(),
            ..EngineConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn edit_replaces_one_category_and_rebuilds() {
        let engine = engine(crate::DEFAULT_TEMPLATE);
        let renamed = apply_category_edit(&engine, "L_prp_jar_001", CategoryId::Type, "grp")
            .unwrap();
        assert_eq!(renamed, "L_grp_jar_001");
    }

    #[test]
    fn edit_can_fill_an_absent_optional_category() {
        let engine = engine(crate::DEFAULT_TEMPLATE);
        let renamed =
            apply_category_edit(&engine, "prp_jar", CategoryId::Symmetry, "R").unwrap();
        assert_eq!(renamed, "R_prp_jar");
    }

    #[test]
    fn edit_on_whole_bad_name_is_identity() {
        let engine = engine("[type]_[name]");
        let renamed = apply_category_edit(&engine, "a_b_c", CategoryId::Type, "grp").unwrap();
        assert_eq!(renamed, "a_b_c");
    }

    #[test]
    fn numerical_resolution_steps_past_taken_names() {
        let engine = engine("[name]_[numerical_inc]");
        let scene = MemoryScene::with_objects(
            (1..=10).map(|n| format!("obj_{n:03}")).collect::<Vec<_>>(),
        );
        let inspection = engine.inspect("obj_001").unwrap();
        let (short, updated) =
            resolve_unique(&engine, "obj_001", &inspection, &scene).unwrap();
        assert_eq!(short, "obj_011");
        assert_eq!(updated.value(CategoryId::NumericalInc), Some("011"));
    }

    #[test]
    fn numerical_resolution_keeps_the_path_prefix() {
        let engine = engine("[name]_[numerical_inc]");
        let scene = MemoryScene::with_objects(["ALL|obj_001", "ALL|obj_002"]);
        let inspection = engine.inspect("obj_001").unwrap();
        let (short, _) =
            resolve_unique(&engine, "ALL|obj_001", &inspection, &scene).unwrap();
        assert_eq!(short, "obj_003");
    }

    #[test]
    fn alphabetical_resolution_steps_through_letters() {
        let engine = engine("[name][alphabetical_inc]");
        let scene = MemoryScene::with_objects(["jarA", "jarB"]);
        let inspection = engine.inspect("jarA").unwrap();
        let (short, updated) = resolve_unique(&engine, "jarA", &inspection, &scene).unwrap();
        assert_eq!(short, "jarC");
        assert_eq!(updated.value(CategoryId::AlphabeticalInc), Some("C"));
    }

    #[test]
    fn alphabetical_wins_over_numerical_in_the_same_structure() {
        let engine = engine("[name][alphabetical_inc]_[numerical_inc]");
        let inspection = engine.inspect("jarA_001").unwrap();
        assert_eq!(
            increment_mode(&inspection),
            Some(CategoryId::AlphabeticalInc)
        );
    }

    #[test]
    fn alphabetical_exhaustion_is_an_error() {
        let engine = engine("[name][alphabetical_inc]");
        let scene = MemoryScene::with_objects(
            ('A'..='Z').map(|c| format!("jar{c}")).collect::<Vec<_>>(),
        );
        let inspection = engine.inspect("jarA").unwrap();
        let err = resolve_unique(&engine, "jarA", &inspection, &scene).unwrap_err();
        assert_eq!(err, NamingError::ResolutionExhausted { space: 26 });
    }

    #[test]
    fn numerical_exhaustion_is_an_error() {
        let engine = Engine::from_config(&EngineConfig {
            template: "[name]_[numerical_inc]".to_owned(),
            numeric_width: 1,
            ..EngineConfig::default()
        })
        .unwrap();
        let scene = MemoryScene::with_objects(
            (1..=9).map(|n| format!("obj_{n}")).collect::<Vec<_>>(),
        );
        let inspection = engine.inspect("obj_1").unwrap();
        let err = resolve_unique(&engine, "obj_1", &inspection, &scene).unwrap_err();
        assert_eq!(err, NamingError::ResolutionExhausted { space: 10 });
    }

    #[test]
    fn raw_suffix_fallback_appends_and_increments() {
        let engine = engine("[type]_[name]");
        let scene = MemoryScene::with_objects(["prp_jar", "prp_jar1", "prp_jar2"]);
        let inspection = engine.inspect("prp_jar").unwrap();
        let (short, _) = resolve_unique(&engine, "prp_jar", &inspection, &scene).unwrap();
        assert_eq!(short, "prp_jar3");
    }

    #[test]
    fn raw_suffix_fallback_increments_a_whole_digit_run() {
        let engine = engine("[type]_[name]");
        let scene = MemoryScene::with_objects(["prp_jar9", "prp_jar10"]);
        let inspection = engine.inspect("prp_jar9").unwrap();
        let (short, _) = resolve_unique(&engine, "prp_jar9", &inspection, &scene).unwrap();
        assert_eq!(short, "prp_jar11");
    }

    #[test]
    fn resolution_returns_immediately_when_first_candidate_is_free() {
        let engine = engine("[name]_[numerical_inc]");
        let scene = MemoryScene::new();
        let inspection = engine.inspect("obj_007").unwrap();
        let (short, _) = resolve_unique(&engine, "obj_007", &inspection, &scene).unwrap();
        // The increment is forced back to the start value.
        assert_eq!(short, "obj_001");
    }
}
