//! The Rebuilder — mirror image of the inspector.
//!
//! Reassembles an [`Inspection`] into a canonical name. Together with
//! [`inspect`](crate::inspect) this forms a fixed point: re-matching a
//! rebuilt name and rebuilding again yields the same string, which is
//! exercised every time a user edits one category and the result is
//! redisplayed.

use crate::inspect::{Inspection, PartMatch};

/// Rebuild a name from its inspection.
///
/// `WholeBad` inspections return the raw string verbatim — no reassembly is
/// attempted for names that never matched structurally. Otherwise parts are
/// concatenated in order: values within a part join with no separator, parts
/// join with `_`, and parts whose values are all empty are skipped entirely
/// (an absent optional part never leaves a stray underscore).
pub fn rebuild(inspection: &Inspection) -> String {
    let parts = match inspection {
        Inspection::WholeBad(raw) => return raw.clone(),
        Inspection::Parts(parts) => parts,
    };

    let mut rebuilt = String::new();
    for part in parts {
        match part {
            PartMatch::BadNaming { raw } => {
                rebuilt.push_str(raw);
                rebuilt.push('_');
            }
            PartMatch::Matched { values } => {
                if values.iter().all(|(_, v)| v.is_empty()) {
                    continue;
                }
                for (_, value) in values {
                    rebuilt.push_str(value);
                }
                rebuilt.push('_');
            }
        }
    }
    rebuilt.trim_matches('_').to_owned()
}
