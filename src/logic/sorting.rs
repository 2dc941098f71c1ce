//! Sorting comparison logic
//!
//! Pure functions for ordering drive items across the sort modes, and the
//! derived-view pipeline for drive listings.

use crate::api::DriveItem;
use crate::SortMode;
use std::cmp::Ordering;

/// Compare two drive items according to the given sort mode
///
/// # Sort Rules
/// - Directories always come before files (also when reversed)
/// - Within same type, apply sort mode
/// - Case-insensitive name, then uuid, break ties so the order is total
pub fn compare_drive_items(
    a: &DriveItem,
    b: &DriveItem,
    sort_mode: SortMode,
    reverse: bool,
) -> Ordering {
    if a.is_directory() != b.is_directory() {
        return if a.is_directory() {
            Ordering::Less
        } else {
            Ordering::Greater
        };
    }

    let by_name = || {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.uuid.cmp(&b.uuid))
    };

    let result = match sort_mode {
        SortMode::Alphabetical => by_name(),
        // Newest first
        SortMode::LastModified => b.last_modified.cmp(&a.last_modified).then_with(by_name),
        // Largest first
        SortMode::FileSize => b.size.cmp(&a.size).then_with(by_name),
    };

    if reverse {
        result.reverse()
    } else {
        result
    }
}

/// Derive the displayed ordering of a drive listing.
///
/// Pure: the same raw collection, sort preset and search term always yield
/// the same sequence, and applying it to its own output changes nothing.
pub fn derive_items(
    raw: &[DriveItem],
    sort_mode: SortMode,
    reverse: bool,
    search: &str,
) -> Vec<DriveItem> {
    let mut items = raw.to_vec();
    items.sort_by(|a, b| compare_drive_items(a, b, sort_mode, reverse));
    crate::logic::search::filter_items(items, search)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ItemType;

    fn item(name: &str, item_type: ItemType, size: u64, last_modified: u64) -> DriveItem {
        DriveItem {
            uuid: format!("uuid-{}", name),
            name: name.to_string(),
            item_type,
            size,
            last_modified,
            favorited: false,
            parent: String::new(),
            sharer_id: 0,
            sharer_email: String::new(),
            receiver_id: 0,
            receiver_email: String::new(),
            receivers: vec![],
            selected: false,
        }
    }

    fn names(items: &[DriveItem]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_directories_before_files() {
        let dir = item("zeta", ItemType::Directory, 0, 0);
        let file = item("alpha", ItemType::File, 10, 0);

        assert_eq!(
            compare_drive_items(&dir, &file, SortMode::Alphabetical, false),
            Ordering::Less
        );
        // Reverse does not move directories below files
        assert_eq!(
            compare_drive_items(&dir, &file, SortMode::Alphabetical, true),
            Ordering::Less
        );
    }

    #[test]
    fn test_alphabetical_is_case_insensitive() {
        let a = item("apple", ItemType::File, 0, 0);
        let b = item("Banana", ItemType::File, 0, 0);
        assert_eq!(compare_drive_items(&a, &b, SortMode::Alphabetical, false), Ordering::Less);
        assert_eq!(compare_drive_items(&a, &b, SortMode::Alphabetical, true), Ordering::Greater);
    }

    #[test]
    fn test_last_modified_newest_first() {
        let old = item("old", ItemType::File, 0, 100);
        let new = item("new", ItemType::File, 0, 200);
        assert_eq!(compare_drive_items(&new, &old, SortMode::LastModified, false), Ordering::Less);
    }

    #[test]
    fn test_size_largest_first_with_name_tiebreak() {
        let a = item("a", ItemType::File, 10, 0);
        let b = item("b", ItemType::File, 10, 0);
        let big = item("c", ItemType::File, 99, 0);
        assert_eq!(compare_drive_items(&big, &a, SortMode::FileSize, false), Ordering::Less);
        assert_eq!(compare_drive_items(&a, &b, SortMode::FileSize, false), Ordering::Less);
    }

    #[test]
    fn test_derive_items_sorts_then_filters() {
        let raw = vec![
            item("notes.txt", ItemType::File, 1, 300),
            item("MyPhotos", ItemType::File, 1, 100),
            item("Photo.png", ItemType::File, 1, 200),
        ];

        let derived = derive_items(&raw, SortMode::LastModified, false, "photo");
        assert_eq!(names(&derived), vec!["Photo.png", "MyPhotos"]);

        let derived = derive_items(&raw, SortMode::Alphabetical, false, "photo");
        assert_eq!(names(&derived), vec!["MyPhotos", "Photo.png"]);
    }

    #[test]
    fn test_derive_items_idempotent() {
        let raw = vec![
            item("b", ItemType::File, 5, 1),
            item("A", ItemType::Directory, 0, 2),
            item("c", ItemType::File, 5, 1),
            item("a", ItemType::File, 7, 3),
        ];

        for mode in [SortMode::Alphabetical, SortMode::LastModified, SortMode::FileSize] {
            let once = derive_items(&raw, mode, false, "");
            let twice = derive_items(&once, mode, false, "");
            assert_eq!(once, twice);
        }
    }
}
