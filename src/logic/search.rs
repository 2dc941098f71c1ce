//! Search Logic
//!
//! Pure functions for filtering drive items and contacts by a search term.
//! Matching is a case-insensitive substring test; terms containing wildcards
//! are additionally tried as glob patterns.

use crate::api::DriveItem;

/// Normalize a raw search term: trimmed and lowercased.
///
/// Returns `None` when the term is empty or whitespace-only, which callers
/// treat as "no filter".
pub fn normalize_term(term: &str) -> Option<String> {
    let trimmed = term.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Match an already-normalized term against a field
///
/// # Examples
/// ```
/// use drivetui::logic::search::term_matches;
///
/// assert!(term_matches("photo", "MyPhotos"));
/// assert!(term_matches("*.png", "Photo.png"));
/// assert!(!term_matches("photo", "notes.txt"));
/// ```
pub fn term_matches(term: &str, field: &str) -> bool {
    let field_lower = field.to_lowercase();

    if field_lower.contains(term) {
        return true;
    }

    // Only pay for glob compilation when the term looks like a pattern
    if term.contains(['*', '?', '[']) {
        if let Ok(pattern) = glob::Pattern::new(term) {
            return pattern.matches(&field_lower);
        }
    }

    false
}

/// Filter drive items by name; an empty term keeps everything
pub fn filter_items(items: Vec<DriveItem>, term: &str) -> Vec<DriveItem> {
    let Some(term) = normalize_term(term) else {
        return items;
    };

    items
        .into_iter()
        .filter(|item| term_matches(&term, &item.name))
        .collect()
}
