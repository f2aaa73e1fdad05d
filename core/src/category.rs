//! Category catalog — the seven value-matching rules and their peel primitives.
//!
//! A [`Category`] answers "what kind of value-matcher applies, and what is the
//! candidate set" for one template slot. The catalog is built once from an
//! [`EngineConfig`] and is immutable afterwards.
//!
//! # Matching policy
//!
//! Enumerated matching is **first-listed-candidate-wins**, not longest-match.
//! Presets may rely on deliberate ordering, so compound or longer codes must
//! be registered ahead of their component substrings — or be reachable via
//! the repeated peel, which is how zoning/orientation compounds like "TpLt"
//! are consumed from the singles "Tp" and "Lt".

use crate::config::EngineConfig;
use std::fmt;

/// Identifier of one of the seven fixed categories.
///
/// The discriminant doubles as the catalog index, so the order here must
/// match the construction order in [`Catalog::from_config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CategoryId {
    /// Symmetry side marker (e.g. "L"/"R").
    Symmetry,
    /// Object type code (e.g. "prp", "grp", "hi").
    Type,
    /// The free-text semantic name. Always present, never fails to match.
    Name,
    /// Zoning placement suffix (e.g. "Tp", "Lt", compounds like "TpLt").
    Zoning,
    /// Orientation suffix (e.g. "Nt", compounds like "NtEt").
    Orientation,
    /// Single-letter increment "A".."Z".
    AlphabeticalInc,
    /// Fixed-width zero-padded numeric increment (e.g. "001").
    NumericalInc,
}

impl CategoryId {
    /// All categories, in catalog order.
    pub const ALL: [CategoryId; 7] = [
        CategoryId::Symmetry,
        CategoryId::Type,
        CategoryId::Name,
        CategoryId::Zoning,
        CategoryId::Orientation,
        CategoryId::AlphabeticalInc,
        CategoryId::NumericalInc,
    ];

    /// The bracket-token spelling used in templates and settings documents.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Symmetry => "symmetry",
            Self::Type => "type",
            Self::Name => "name",
            Self::Zoning => "zoning",
            Self::Orientation => "orientation",
            Self::AlphabeticalInc => "alphabetical_inc",
            Self::NumericalInc => "numerical_inc",
        }
    }

    /// Parse a bracket token. Returns `None` for unrecognized tokens.
    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == token)
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The value-matching rule of a category.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CategoryKind {
    /// Match against an ordered candidate list, first match wins.
    Enumerated {
        /// Candidate codes in matching priority order.
        values: Vec<String>,
        /// Peel repeatedly, consuming consecutive matches (zoning/orientation
        /// compound suffixes).
        repeated: bool,
    },
    /// Match exactly `width` consecutive ASCII digits at the anchored end.
    FixedWidthDigits {
        /// Required digit count.
        width: usize,
    },
    /// Absorbs the entire fragment. Only `name` carries this kind.
    FreeText,
}

/// A named matching rule.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Category {
    /// The category this rule applies to.
    pub id: CategoryId,
    /// How fragments are matched.
    pub kind: CategoryKind,
}

/// All seven category rules, built once per configuration.
#[derive(Debug, Clone)]
pub struct Catalog {
    // Indexed by CategoryId discriminant; construction follows CategoryId::ALL.
    categories: Vec<Category>,
}

impl Catalog {
    /// Build the catalog from configuration.
    pub fn from_config(config: &EngineConfig) -> Self {
        let categories = vec![
            Category {
                id: CategoryId::Symmetry,
                kind: CategoryKind::Enumerated {
                    values: config.symmetry.clone(),
                    repeated: false,
                },
            },
            Category {
                id: CategoryId::Type,
                kind: CategoryKind::Enumerated {
                    values: config.types.clone(),
                    repeated: false,
                },
            },
            Category {
                id: CategoryId::Name,
                kind: CategoryKind::FreeText,
            },
            Category {
                id: CategoryId::Zoning,
                kind: CategoryKind::Enumerated {
                    values: config.zoning.clone(),
                    repeated: true,
                },
            },
            Category {
                id: CategoryId::Orientation,
                kind: CategoryKind::Enumerated {
                    values: config.orientation.clone(),
                    repeated: true,
                },
            },
            Category {
                id: CategoryId::AlphabeticalInc,
                kind: CategoryKind::Enumerated {
                    values: alphabet(),
                    repeated: false,
                },
            },
            Category {
                id: CategoryId::NumericalInc,
                kind: CategoryKind::FixedWidthDigits {
                    width: config.numeric_width,
                },
            },
        ];
        Self { categories }
    }

    /// The rule for a category.
    pub fn category(&self, id: CategoryId) -> &Category {
        &self.categories[id as usize]
    }

    /// All rules, in catalog order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Peel one category value off a fragment.
    ///
    /// Returns `(matched, remainder)`. The matched value is empty when
    /// nothing at the anchored end belongs to the category; the remainder is
    /// then the untouched fragment. `name` never fails — it absorbs the
    /// whole fragment.
    pub fn peel(&self, id: CategoryId, fragment: &str, from_start: bool) -> (String, String) {
        match &self.category(id).kind {
            CategoryKind::FreeText => (fragment.to_owned(), String::new()),
            CategoryKind::FixedWidthDigits { width } => peel_digits(fragment, *width, from_start),
            CategoryKind::Enumerated { values, repeated } => {
                if *repeated {
                    peel_repeated(fragment, values, from_start)
                } else {
                    peel_once(fragment, values, from_start)
                }
            }
        }
    }
}

fn alphabet() -> Vec<String> {
    ('A'..='Z').map(|c| c.to_string()).collect()
}

/// First candidate that is a prefix/suffix of the fragment wins and is
/// consumed. Empty candidates are skipped — they would match everywhere and
/// never terminate the repeated peel.
fn peel_once(fragment: &str, values: &[String], from_start: bool) -> (String, String) {
    for value in values {
        if value.is_empty() {
            continue;
        }
        if from_start {
            if let Some(rest) = fragment.strip_prefix(value.as_str()) {
                return (value.clone(), rest.to_owned());
            }
        } else if let Some(rest) = fragment.strip_suffix(value.as_str()) {
            return (value.clone(), rest.to_owned());
        }
    }
    (String::new(), fragment.to_owned())
}

/// Strip consecutive matching codes from the anchored end, accumulating them
/// in original string order. Consumes compound suffixes like "TpLt" from the
/// singles "Tp" and "Lt".
fn peel_repeated(fragment: &str, values: &[String], from_start: bool) -> (String, String) {
    let mut matched = String::new();
    let mut rest = fragment.to_owned();
    loop {
        let (value, remainder) = peel_once(&rest, values, from_start);
        if value.is_empty() {
            break;
        }
        if from_start {
            matched.push_str(&value);
        } else {
            matched.insert_str(0, &value);
        }
        rest = remainder;
    }
    (matched, rest)
}

/// Consume exactly `width` chars from the anchored end iff that exact slice
/// is all ASCII digits. A shorter or longer digit run does not match.
fn peel_digits(fragment: &str, width: usize, from_start: bool) -> (String, String) {
    let len = fragment.len();
    if width == 0 || len < width {
        return (String::new(), fragment.to_owned());
    }
    let split = if from_start { width } else { len - width };
    if !fragment.is_char_boundary(split) {
        return (String::new(), fragment.to_owned());
    }
    let (head, tail) = fragment.split_at(split);
    let (digits, rest) = if from_start { (head, tail) } else { (tail, head) };
    if digits.bytes().all(|b| b.is_ascii_digit()) {
        (digits.to_owned(), rest.to_owned())
    } else {
        (String::new(), fragment.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_config(&EngineConfig::default())
    }

    #[test]
    fn category_id_round_trips_through_token() {
        for id in CategoryId::ALL {
            assert_eq!(CategoryId::parse(id.as_str()), Some(id));
        }
        assert_eq!(CategoryId::parse("nope"), None);
    }

    #[test]
    fn catalog_index_matches_id() {
        let catalog = catalog();
        for id in CategoryId::ALL {
            assert_eq!(catalog.category(id).id, id);
        }
    }

    #[test]
    fn peel_type_from_start() {
        let (value, rest) = catalog().peel(CategoryId::Type, "prp_rest", true);
        assert_eq!(value, "prp");
        assert_eq!(rest, "_rest");
    }

    #[test]
    fn peel_no_match_leaves_fragment_untouched() {
        let (value, rest) = catalog().peel(CategoryId::Type, "xyz", true);
        assert_eq!(value, "");
        assert_eq!(rest, "xyz");
    }

    #[test]
    fn first_listed_candidate_wins_not_longest() {
        let values: Vec<String> = vec!["p".into(), "prp".into()];
        let (value, rest) = peel_once("prp", &values, true);
        // "p" is listed first, so it wins even though "prp" also matches.
        assert_eq!(value, "p");
        assert_eq!(rest, "rp");
    }

    #[test]
    fn empty_candidate_is_skipped() {
        let values: Vec<String> = vec!["".into(), "Tp".into()];
        let (value, rest) = peel_repeated("TpTp", &values, true);
        assert_eq!(value, "TpTp");
        assert_eq!(rest, "");
    }

    #[test]
    fn repeated_peel_consumes_compound_suffix_from_start() {
        let (value, rest) = catalog().peel(CategoryId::Zoning, "TpLt", true);
        assert_eq!(value, "TpLt");
        assert_eq!(rest, "");
    }

    #[test]
    fn repeated_peel_from_end_keeps_string_order() {
        let (value, rest) = catalog().peel(CategoryId::Zoning, "jarTpLt", false);
        assert_eq!(value, "TpLt");
        assert_eq!(rest, "jar");
    }

    #[test]
    fn repeated_peel_stops_at_foreign_code() {
        // "Nt" is orientation, not zoning.
        let (value, rest) = catalog().peel(CategoryId::Zoning, "jarNtLt", false);
        assert_eq!(value, "Lt");
        assert_eq!(rest, "jarNt");
    }

    #[test]
    fn digits_require_exact_width() {
        let catalog = catalog();
        assert_eq!(
            catalog.peel(CategoryId::NumericalInc, "001", true),
            ("001".to_owned(), String::new())
        );
        // Too short: no match.
        assert_eq!(
            catalog.peel(CategoryId::NumericalInc, "01", true),
            (String::new(), "01".to_owned())
        );
        // Four digits from the end: only the last three are taken.
        assert_eq!(
            catalog.peel(CategoryId::NumericalInc, "0011", false),
            ("011".to_owned(), "0".to_owned())
        );
    }

    #[test]
    fn digits_reject_mixed_slice() {
        let (value, rest) = catalog().peel(CategoryId::NumericalInc, "a01", true);
        assert_eq!(value, "");
        assert_eq!(rest, "a01");
    }

    #[test]
    fn digits_handle_non_ascii_fragment() {
        let (value, rest) = peel_digits("é01", 3, true);
        assert_eq!(value, "");
        assert_eq!(rest, "é01");
    }

    #[test]
    fn name_absorbs_everything() {
        let (value, rest) = catalog().peel(CategoryId::Name, "anything_at_all", true);
        assert_eq!(value, "anything_at_all");
        assert_eq!(rest, "");
    }

    #[test]
    fn alphabetical_inc_is_single_uppercase_letter() {
        let catalog = catalog();
        assert_eq!(
            catalog.peel(CategoryId::AlphabeticalInc, "jarB", false),
            ("B".to_owned(), "jar".to_owned())
        );
        assert_eq!(
            catalog.peel(CategoryId::AlphabeticalInc, "jarb", false),
            (String::new(), "jarb".to_owned())
        );
    }
}
