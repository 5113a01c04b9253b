//! Notes/tags annotation model keyed by prediction artifact.
//!
//! # Invariants
//! - One entry per key; a save replaces the whole entry.
//! - Tags are trimmed, empty-dropped and deduplicated, case-preserving,
//!   in first-occurrence order.

use serde::{Deserialize, Serialize};

/// Separator joining the composite annotation key parts.
const KEY_SEPARATOR: &str = "::";

/// Notes and tags attached to one prediction artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationEntry {
    pub notes: String,
    pub tags: Vec<String>,
}

/// Builds the composite key linking an entry to a prediction artifact.
///
/// The pair (file name, prediction date) identifies the artifact; the date
/// is the opaque string carried by the prediction document.
pub fn annotation_key(file_name: &str, date: &str) -> String {
    format!("{file_name}{KEY_SEPARATOR}{date}")
}

/// Normalizes one tag value; `None` for values that trim to empty.
pub fn normalize_tag(tag: &str) -> Option<String> {
    let trimmed = tag.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Normalizes a tag list: trim, drop empties, deduplicate exact matches.
///
/// Case is preserved and so is first-occurrence order; `"a, a, b"` input
/// collapses to `["a", "b"]`.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut normalized: Vec<String> = Vec::new();
    for tag in tags {
        if let Some(value) = normalize_tag(tag.as_ref()) {
            if !normalized.contains(&value) {
                normalized.push(value);
            }
        }
    }
    normalized
}
