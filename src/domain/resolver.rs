//! Code hierarchy resolution.
//!
//! The classification scheme encodes depth in the code length: one character
//! for top categories, three for sub-categories, six for elements. The
//! parent of a code is the corresponding prefix. This is a lookup keyed by
//! level, not a general strip-trailing-characters rule: codes of any other
//! length resolve to no parent and end up at root level.

use crate::domain::entities::{ClassificationEntry, RawRecord};

/// Code lengths the scheme recognizes, with their parent-prefix lengths.
pub const RECOGNIZED_LEVELS: [usize; 3] = [1, 3, 6];

/// Derive the structural level from a canonical code.
pub fn level_of(code: &str) -> usize {
    code.chars().count()
}

/// Derive the parent code from a canonical code.
///
/// Level 1 has no parent, level 3 points at the 1-character prefix, level 6
/// at the 3-character prefix. Unrecognized lengths yield None and the entry
/// attaches to the root (usually a sign of malformed input, left to the
/// caller to diagnose).
pub fn parent_code_of(code: &str) -> Option<String> {
    match level_of(code) {
        3 => Some(code.chars().take(1).collect()),
        6 => Some(code.chars().take(3).collect()),
        _ => None,
    }
}

/// Canonical string form of a raw code cell.
///
/// Surrounding whitespace is a table artifact, not part of the code; the
/// characters themselves are kept exactly as read.
pub fn canonical_code(raw: &str) -> String {
    raw.trim().to_string()
}

/// Resolve raw records into classification entries.
///
/// Pure and order-preserving: entries come out in input order, one per
/// record, each carrying its derived level and parent code. Duplicate
/// detection is left to the tree builder.
pub fn resolve(records: &[RawRecord]) -> Vec<ClassificationEntry> {
    records
        .iter()
        .map(|record| {
            let code = canonical_code(&record.code);
            let level = level_of(&code);
            let parent_code = parent_code_of(&code);
            ClassificationEntry {
                code,
                label: record.label.trim().to_string(),
                level,
                parent_code,
            }
        })
        .collect()
}
