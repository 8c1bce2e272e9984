//! Replacement-tag markers embedded in the form body
//!
//! A marker is the literal text `${name}$`. The backend and the render
//! pipeline parse the same format, so it must not change.

use super::field::TextInput;

/// Build the marker text for a placeholder name
pub fn marker(name: &str) -> String {
    format!("${{{name}}}$")
}

/// Replace the current body selection with the marker for `name`.
///
/// Returns false, leaving the body untouched, when the body has no
/// cursor context yet.
pub fn insert_marker(body: &mut TextInput, name: &str) -> bool {
    let Some(range) = body.selection() else {
        return false;
    };
    body.replace_range(range, &marker(name));
    true
}

/// Remove every literal occurrence of the marker for `name`.
///
/// Plain substring deletion: a marker the user has partially edited no
/// longer matches and stays in the text.
pub fn strip_markers(text: &str, name: &str) -> String {
    text.replace(&marker(name), "")
}

/// Count literal occurrences of the marker for `name`
pub fn marker_count(text: &str, name: &str) -> usize {
    text.matches(&marker(name)).count()
}
