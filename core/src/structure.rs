//! Template compiler — parses a template string into a [`CompiledStructure`].
//!
//! A template is a sequence of parts separated by underscores *outside*
//! bracket groups: `[alphabetical_inc]` is one token, not two parts. Each
//! part carries the category slots found within its brackets, in appearance
//! order. Optionality is computed once here, not per match.
//!
//! All template validation happens at compile time. The inspector never
//! reports template problems.

use crate::category::CategoryId;
use crate::NamingError;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// One underscore-delimited segment of the template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    /// Category slots in appearance order.
    pub categories: Vec<CategoryId>,
    /// True iff every category in this part is in the configured optional
    /// set. Optional parts may be absent from a name entirely.
    pub optional: bool,
}

/// The parsed, validated template. Immutable once compiled; a template or
/// preset change means compiling a new structure.
#[derive(Debug, Clone)]
pub struct CompiledStructure {
    /// Template parts in declaration order.
    pub parts: Vec<Part>,
    pub(crate) template: String,
    pub(crate) optional: HashSet<CategoryId>,
}

impl CompiledStructure {
    /// Compile a template against an optional-category set.
    ///
    /// # Errors
    ///
    /// - [`NamingError::UnbalancedBrackets`] for stray `[` or `]`
    /// - [`NamingError::UnknownCategory`] for unrecognized bracket tokens
    /// - [`NamingError::MissingName`] / [`NamingError::DuplicateName`] unless
    ///   exactly one part declares `[name]`
    pub fn compile(
        template: &str,
        optional: &HashSet<CategoryId>,
    ) -> Result<Self, NamingError> {
        let segments = split_outside_brackets(template)?;

        let mut parts = Vec::with_capacity(segments.len());
        for segment in segments {
            let mut categories = Vec::new();
            for capture in token_regex().captures_iter(segment) {
                let token = &capture[1];
                let id = CategoryId::parse(token).ok_or_else(|| NamingError::UnknownCategory {
                    token: token.to_owned(),
                })?;
                categories.push(id);
            }
            // name anchors the whole match, so a part holding it is always
            // mandatory, whatever the optional set says.
            let is_optional = categories
                .iter()
                .all(|id| *id != CategoryId::Name && optional.contains(id));
            parts.push(Part {
                categories,
                optional: is_optional,
            });
        }

        let name_slots = parts
            .iter()
            .flat_map(|p| p.categories.iter())
            .filter(|id| **id == CategoryId::Name)
            .count();
        match name_slots {
            0 => Err(NamingError::MissingName {
                template: template.to_owned(),
            }),
            1 => Ok(Self {
                parts,
                template: template.to_owned(),
                optional: optional.clone(),
            }),
            _ => Err(NamingError::DuplicateName {
                template: template.to_owned(),
            }),
        }
    }

    /// The template this structure was compiled from.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Number of parts.
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// Number of mandatory parts.
    pub fn mandatory_count(&self) -> usize {
        self.parts.iter().filter(|p| !p.optional).count()
    }

    /// True iff any part declares the category.
    pub fn contains(&self, id: CategoryId) -> bool {
        self.parts.iter().any(|p| p.categories.contains(&id))
    }

    /// True iff parts holding only this category may be absent from a name.
    pub fn is_optional_category(&self, id: CategoryId) -> bool {
        !self.is_mandatory_category(id)
    }

    pub(crate) fn is_mandatory_category(&self, id: CategoryId) -> bool {
        id == CategoryId::Name || !self.optional.contains(&id)
    }
}

fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Literal pattern, cannot fail to compile.
    RE.get_or_init(|| Regex::new(r"\[([^\]]+)\]").expect("bracket token pattern"))
}

/// Split on `_` characters at bracket depth zero. The `regex` crate has no
/// lookaround, so this is a plain scanner.
fn split_outside_brackets(template: &str) -> Result<Vec<&str>, NamingError> {
    let unbalanced = || NamingError::UnbalancedBrackets {
        template: template.to_owned(),
    };

    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, ch) in template.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => depth = depth.checked_sub(1).ok_or_else(unbalanced)?,
            '_' if depth == 0 => {
                segments.push(&template[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(unbalanced());
    }
    segments.push(&template[start..]);
    Ok(segments)
}
