//! The Inspector — structural matching of a concrete name against a
//! [`CompiledStructure`].
//!
//! # Regimes
//!
//! With `N` = underscore segments in the name, `P` = template parts and
//! `M` = mandatory parts, [`inspect`] selects one of four regimes:
//!
//! - **Underfilled** (`N < M`): clearly insufficient input. The whole string
//!   becomes the semantic name; nothing is guessed destructively.
//! - **Overfilled** (`N > P`): the whole string is preserved as
//!   [`Inspection::WholeBad`] — downstream renders it as invalid.
//! - **Exact** (`N == P`): segment `i` is matched against part `i`, peeling
//!   category values around the part's anchor.
//! - **In-between** (`M <= N < P`): two cursors walk parts and segments;
//!   optional parts that match nothing give their segment to the next part.
//!
//! Matching never fails on malformed input — worst case, category values
//! stay empty and/or a `BadNaming` marker carries the raw text through
//! [`rebuild`](crate::rebuild) unchanged.

use crate::category::{Catalog, CategoryId};
use crate::structure::{CompiledStructure, Part};
use crate::NamingError;

/// Match result for one template part.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PartMatch {
    /// The part matched structurally. Values are in template declaration
    /// order; an empty string means the category is declared but absent from
    /// this name.
    Matched {
        /// `(category, matched substring)` pairs.
        values: Vec<(CategoryId, String)>,
    },
    /// The segment could not be fully attributed to the part's categories.
    /// `raw` holds the *whole* original segment so rebuilding reproduces the
    /// input byte for byte.
    BadNaming {
        /// The unmatched segment.
        raw: String,
    },
}

impl PartMatch {
    /// True iff this is a `Matched` part with every value empty (an absent
    /// optional part).
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Matched { values } => values.iter().all(|(_, v)| v.is_empty()),
            Self::BadNaming { .. } => false,
        }
    }

    /// The matched value for a category, if this part declares it.
    pub fn value(&self, id: CategoryId) -> Option<&str> {
        match self {
            Self::Matched { values } => values
                .iter()
                .find(|(c, _)| *c == id)
                .map(|(_, v)| v.as_str()),
            Self::BadNaming { .. } => None,
        }
    }
}

/// The full match result for one name.
///
/// This is a value: edits return new `Inspection`s
/// ([`with_value`](Self::with_value)), existing ones are never mutated in
/// place.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Inspection {
    /// Per-part results, one entry per template part.
    Parts(Vec<PartMatch>),
    /// The name has more segments than the template has parts. The original
    /// string is preserved verbatim; no structural claims are made.
    WholeBad(String),
}

impl Inspection {
    /// The matched value of the first part declaring the category.
    pub fn value(&self, id: CategoryId) -> Option<&str> {
        match self {
            Self::Parts(parts) => parts.iter().find_map(|p| p.value(id)),
            Self::WholeBad(_) => None,
        }
    }

    /// True iff any part declares the category.
    pub fn contains(&self, id: CategoryId) -> bool {
        match self {
            Self::Parts(parts) => parts.iter().any(|p| p.value(id).is_some()),
            Self::WholeBad(_) => false,
        }
    }

    /// True iff the whole name failed structural matching.
    pub fn is_bad(&self) -> bool {
        matches!(self, Self::WholeBad(_))
    }

    /// A copy with every occurrence of `id` set to `new_value`.
    ///
    /// There is normally exactly one occurrence. `WholeBad` inspections are
    /// returned unchanged — there is no structure to edit.
    #[must_use]
    pub fn with_value(&self, id: CategoryId, new_value: &str) -> Inspection {
        match self {
            Self::WholeBad(raw) => Self::WholeBad(raw.clone()),
            Self::Parts(parts) => Self::Parts(
                parts
                    .iter()
                    .map(|part| match part {
                        PartMatch::BadNaming { raw } => PartMatch::BadNaming { raw: raw.clone() },
                        PartMatch::Matched { values } => PartMatch::Matched {
                            values: values
                                .iter()
                                .map(|(c, v)| {
                                    if *c == id {
                                        (*c, new_value.to_owned())
                                    } else {
                                        (*c, v.clone())
                                    }
                                })
                                .collect(),
                        },
                    })
                    .collect(),
            ),
        }
    }
}

/// Inspect a name against a compiled structure.
///
/// # Errors
///
/// Returns [`NamingError::StructureMissingName`] iff the structure has no
/// name slot — a programming error, since [`CompiledStructure::compile`]
/// rejects such templates. Malformed *names* never produce errors.
pub fn inspect(
    name: &str,
    structure: &CompiledStructure,
    catalog: &Catalog,
) -> Result<Inspection, NamingError> {
    if !structure.contains(CategoryId::Name) {
        return Err(NamingError::StructureMissingName);
    }

    let segments: Vec<&str> = name.split('_').collect();
    let n = segments.len();
    let p = structure.part_count();
    let m = structure.mandatory_count();

    if n < m {
        Ok(underfilled(name, structure))
    } else if n > p {
        Ok(Inspection::WholeBad(name.to_owned()))
    } else if n == p {
        Ok(exact(&segments, structure, catalog))
    } else {
        Ok(traverse(name, &segments, structure, catalog))
    }
}

fn blank_part(part: &Part) -> PartMatch {
    PartMatch::Matched {
        values: part.categories.iter().map(|c| (*c, String::new())).collect(),
    }
}

/// Too few segments: treat the whole string as the semantic name.
fn underfilled(name: &str, structure: &CompiledStructure) -> Inspection {
    let parts = structure
        .parts
        .iter()
        .map(|part| {
            let mut matched = blank_part(part);
            if part.categories.contains(&CategoryId::Name) {
                if let PartMatch::Matched { values } = &mut matched {
                    for (c, v) in values.iter_mut() {
                        if *c == CategoryId::Name {
                            *v = name.to_owned();
                        }
                    }
                }
            }
            matched
        })
        .collect();
    Inspection::Parts(parts)
}

/// One segment per part.
fn exact(segments: &[&str], structure: &CompiledStructure, catalog: &Catalog) -> Inspection {
    let parts = structure
        .parts
        .iter()
        .zip(segments)
        .map(|(part, segment)| match_part(part, segment, structure, catalog))
        .collect();
    Inspection::Parts(parts)
}

fn match_part(
    part: &Part,
    segment: &str,
    structure: &CompiledStructure,
    catalog: &Catalog,
) -> PartMatch {
    if let Some(pos) = anchor_position(part, structure) {
        match_anchored(&part.categories, pos, segment, catalog)
    } else {
        let (values, leftover) = peel_all_from_start(&part.categories, segment, catalog);
        if leftover.is_empty() {
            PartMatch::Matched { values }
        } else {
            PartMatch::BadNaming {
                raw: segment.to_owned(),
            }
        }
    }
}

/// The category the peel is organized around: `name` if present, else the
/// first mandatory category in the part.
fn anchor_position(part: &Part, structure: &CompiledStructure) -> Option<usize> {
    part.categories
        .iter()
        .position(|c| *c == CategoryId::Name)
        .or_else(|| {
            part.categories
                .iter()
                .position(|c| structure.is_mandatory_category(*c))
        })
}

/// Peel categories before the anchor off the segment start (declared order),
/// categories after it off the end (reverse order, so the one nearest the
/// anchor is peeled last). The anchor absorbs the remaining middle.
fn match_anchored(
    categories: &[CategoryId],
    anchor: usize,
    segment: &str,
    catalog: &Catalog,
) -> PartMatch {
    let mut values: Vec<(CategoryId, String)> =
        categories.iter().map(|c| (*c, String::new())).collect();
    let mut rest = segment.to_owned();

    for i in 0..anchor {
        let (value, remainder) = catalog.peel(categories[i], &rest, true);
        values[i].1 = value;
        rest = remainder;
    }
    for i in (anchor + 1..categories.len()).rev() {
        let (value, remainder) = catalog.peel(categories[i], &rest, false);
        values[i].1 = value;
        rest = remainder;
    }
    values[anchor].1 = rest;

    PartMatch::Matched { values }
}

fn peel_all_from_start(
    categories: &[CategoryId],
    segment: &str,
    catalog: &Catalog,
) -> (Vec<(CategoryId, String)>, String) {
    let mut values: Vec<(CategoryId, String)> =
        categories.iter().map(|c| (*c, String::new())).collect();
    let mut rest = segment.to_owned();
    for (i, id) in categories.iter().enumerate() {
        let (value, remainder) = catalog.peel(*id, &rest, true);
        values[i].1 = value;
        rest = remainder;
    }
    (values, rest)
}

/// Fewer segments than parts, but enough for every mandatory part: walk both
/// sequences with separate cursors. A mandatory part always consumes a
/// segment. An optional part consumes its segment only when at least one of
/// its categories matches; otherwise it stays blank and the segment is
/// retried against the next part.
fn traverse(
    name: &str,
    segments: &[&str],
    structure: &CompiledStructure,
    catalog: &Catalog,
) -> Inspection {
    let mut parts: Vec<PartMatch> = structure.parts.iter().map(blank_part).collect();
    let mut part_idx = 0;
    let mut seg_idx = 0;

    while part_idx < structure.parts.len() && seg_idx < segments.len() {
        let part = &structure.parts[part_idx];
        let segment = segments[seg_idx];

        if !part.optional {
            parts[part_idx] = match_part(part, segment, structure, catalog);
            part_idx += 1;
            seg_idx += 1;
            continue;
        }

        let (values, leftover) = peel_all_from_start(&part.categories, segment, catalog);
        let any_matched = values.iter().any(|(_, v)| !v.is_empty());
        if any_matched {
            parts[part_idx] = if leftover.is_empty() {
                PartMatch::Matched { values }
            } else {
                PartMatch::BadNaming {
                    raw: segment.to_owned(),
                }
            };
            part_idx += 1;
            seg_idx += 1;
        } else if !segment.is_empty() {
            // Absent optional part: leave it blank, give the segment to the
            // next part.
            part_idx += 1;
        } else {
            part_idx += 1;
            seg_idx += 1;
        }
    }

    if seg_idx < segments.len() {
        // Parts ran out with input left over. Preserve the whole string
        // rather than dropping the tail.
        return Inspection::WholeBad(name.to_owned());
    }

    Inspection::Parts(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_optional;
    use crate::{Catalog, EngineConfig};

    fn setup(template: &str) -> (CompiledStructure, Catalog) {
        let config = EngineConfig {
            template: template.to_owned(),
            ..EngineConfig::default()
        };
        let structure = CompiledStructure::compile(&config.template, &config.optional).unwrap();
        let catalog = Catalog::from_config(&config);
        (structure, catalog)
    }

    fn run(template: &str, name: &str) -> Inspection {
        let (structure, catalog) = setup(template);
        inspect(name, &structure, &catalog).unwrap()
    }

    #[test]
    fn exact_match_splits_type_name_and_zoning() {
        let inspection = run("[type]_[name][zoning]", "prp_jarLt");
        assert_eq!(inspection.value(CategoryId::Type), Some("prp"));
        assert_eq!(inspection.value(CategoryId::Name), Some("jar"));
        assert_eq!(inspection.value(CategoryId::Zoning), Some("Lt"));
    }

    #[test]
    fn exact_match_full_default_template() {
        let inspection = run(crate::DEFAULT_TEMPLATE, "L_prp_jarTpLtNtA_001");
        assert_eq!(inspection.value(CategoryId::Symmetry), Some("L"));
        assert_eq!(inspection.value(CategoryId::Type), Some("prp"));
        assert_eq!(inspection.value(CategoryId::Name), Some("jar"));
        assert_eq!(inspection.value(CategoryId::Zoning), Some("TpLt"));
        assert_eq!(inspection.value(CategoryId::Orientation), Some("Nt"));
        assert_eq!(inspection.value(CategoryId::AlphabeticalInc), Some("A"));
        assert_eq!(inspection.value(CategoryId::NumericalInc), Some("001"));
    }

    #[test]
    fn name_takes_the_unmatched_middle() {
        // "jarB2" — "B2" is neither zoning, orientation nor a lone letter at
        // the end ("2" blocks the alphabetical peel), so name keeps it all.
        let inspection = run("[type]_[name][zoning][alphabetical_inc]", "prp_jarB2");
        assert_eq!(inspection.value(CategoryId::Name), Some("jarB2"));
        assert_eq!(inspection.value(CategoryId::AlphabeticalInc), Some(""));
    }

    #[test]
    fn before_name_categories_peel_from_the_start() {
        let inspection = run("[type]_[symmetry][name]", "prp_Ljar");
        assert_eq!(inspection.value(CategoryId::Symmetry), Some("L"));
        assert_eq!(inspection.value(CategoryId::Name), Some("jar"));
    }

    #[test]
    fn underfilled_assigns_whole_string_to_name() {
        let inspection = run("[type]_[name]", "Body");
        assert_eq!(inspection.value(CategoryId::Type), Some(""));
        assert_eq!(inspection.value(CategoryId::Name), Some("Body"));
    }

    #[test]
    fn overfilled_preserves_the_original_string() {
        let inspection = run("[type]_[name]", "a_b_c");
        assert_eq!(inspection, Inspection::WholeBad("a_b_c".to_owned()));
    }

    #[test]
    fn anchor_part_without_name_absorbs_remainder() {
        // Part 0 has no name; type anchors it and absorbs the segment.
        let inspection = run("[type]_[name]", "widget_jar");
        assert_eq!(inspection.value(CategoryId::Type), Some("widget"));
        assert_eq!(inspection.value(CategoryId::Name), Some("jar"));
    }

    #[test]
    fn optional_only_part_with_leftover_is_bad_naming() {
        let inspection = run("[zoning]_[name]", "TpX_jar");
        let Inspection::Parts(parts) = &inspection else {
            panic!("expected parts");
        };
        assert_eq!(
            parts[0],
            PartMatch::BadNaming {
                raw: "TpX".to_owned()
            }
        );
        assert_eq!(inspection.value(CategoryId::Name), Some("jar"));
    }

    #[test]
    fn numeric_segment_must_match_width_exactly() {
        let (structure, catalog) = setup(crate::DEFAULT_TEMPLATE);
        let exact = inspect("L_prp_jar_001", &structure, &catalog).unwrap();
        assert_eq!(exact.value(CategoryId::NumericalInc), Some("001"));

        let short = inspect("L_prp_jar_01", &structure, &catalog).unwrap();
        let Inspection::Parts(parts) = &short else {
            panic!("expected parts");
        };
        assert_eq!(
            parts[3],
            PartMatch::BadNaming {
                raw: "01".to_owned()
            }
        );

        let long = inspect("L_prp_jar_0001", &structure, &catalog).unwrap();
        let Inspection::Parts(parts) = &long else {
            panic!("expected parts");
        };
        assert_eq!(
            parts[3],
            PartMatch::BadNaming {
                raw: "0001".to_owned()
            }
        );
    }

    #[test]
    fn traverse_skips_absent_optional_parts() {
        // N = 2 segments, P = 4 parts, M = 2: symmetry and numerical_inc are
        // simply absent.
        let inspection = run(crate::DEFAULT_TEMPLATE, "prp_jar");
        assert_eq!(inspection.value(CategoryId::Symmetry), Some(""));
        assert_eq!(inspection.value(CategoryId::Type), Some("prp"));
        assert_eq!(inspection.value(CategoryId::Name), Some("jar"));
        assert_eq!(inspection.value(CategoryId::NumericalInc), Some(""));
    }

    #[test]
    fn traverse_fills_matching_optional_parts() {
        let inspection = run(crate::DEFAULT_TEMPLATE, "L_prp_jar");
        assert_eq!(inspection.value(CategoryId::Symmetry), Some("L"));
        assert_eq!(inspection.value(CategoryId::Type), Some("prp"));
        assert_eq!(inspection.value(CategoryId::Name), Some("jar"));
    }

    #[test]
    fn traverse_with_leftover_tail_degrades_to_whole_bad() {
        // Both optional parts reject "Qq", the name part takes it, and "foo"
        // is left with no part to go to.
        let inspection = run("[symmetry]_[zoning]_[name]", "Qq_foo");
        assert_eq!(inspection, Inspection::WholeBad("Qq_foo".to_owned()));
    }

    #[test]
    fn with_value_replaces_every_occurrence() {
        let inspection = run("[type]_[name]", "prp_jar");
        let edited = inspection.with_value(CategoryId::Type, "grp");
        assert_eq!(edited.value(CategoryId::Type), Some("grp"));
        assert_eq!(edited.value(CategoryId::Name), Some("jar"));
        // The original is untouched.
        assert_eq!(inspection.value(CategoryId::Type), Some("prp"));
    }

    #[test]
    fn with_value_on_whole_bad_is_identity() {
        let inspection = Inspection::WholeBad("a_b_c".to_owned());
        assert_eq!(
            inspection.with_value(CategoryId::Type, "grp"),
            Inspection::WholeBad("a_b_c".to_owned())
        );
    }

    #[test]
    fn hand_built_structure_without_name_is_rejected() {
        let (_, catalog) = setup("[type]_[name]");
        let structure = CompiledStructure {
            parts: vec![Part {
                categories: vec![CategoryId::Type],
                optional: false,
            }],
            template: "[type]".to_owned(),
            optional: default_optional(),
        };
        assert_eq!(
            inspect("prp", &structure, &catalog),
            Err(NamingError::StructureMissingName)
        );
    }

    #[test]
    fn empty_name_is_underfilled() {
        let inspection = run("[type]_[name]", "");
        assert_eq!(inspection.value(CategoryId::Name), Some(""));
    }
}
