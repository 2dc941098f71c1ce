//! Integration tests for the drive listing model
//!
//! Covers the derived view, selection across re-sorts and the two-phase
//! removal behind drag-and-drop moves.

mod common;

use common::{dir, file};
use drivetui::api::{DriveItem, ListingSource};
use drivetui::logic::drag::DragSession;
use drivetui::logic::selection::{self, ClickModifiers};
use drivetui::model::{DriveModel, SelectionPolicy, ViewOptions};
use drivetui::SortMode;

fn options(search: &str) -> ViewOptions<'_> {
    ViewOptions {
        sort_mode: SortMode::Alphabetical,
        reverse: false,
        search,
    }
}

fn names(items: &[DriveItem]) -> Vec<&str> {
    items.iter().map(|item| item.name.as_str()).collect()
}

fn listing() -> Vec<DriveItem> {
    vec![
        file("f1", "b.txt"),
        dir("d1", "Archive"),
        file("f2", "a.txt"),
        dir("d2", "photos"),
    ]
}

fn model() -> DriveModel {
    let mut drive = DriveModel::new();
    drive.set_listing(ListingSource::Directory("root".to_string()), listing(), options(""));
    drive
}

#[test]
fn test_directories_first_then_names() {
    let drive = model();
    assert_eq!(names(&drive.items), vec!["Archive", "photos", "a.txt", "b.txt"]);
    assert_eq!(drive.names.get("d2").map(String::as_str), Some("photos"));
    assert!(!drive.loading);
}

#[test]
fn test_search_filters_view_not_raw() {
    let mut drive = model();
    drive.rederive(options("TXT"), SelectionPolicy::Preserve);
    assert_eq!(names(&drive.items), vec!["a.txt", "b.txt"]);
    assert_eq!(drive.raw.len(), 4);
}

#[test]
fn test_selection_survives_resort() {
    let mut drive = model();
    selection::click(&mut drive.items, 2, ClickModifiers::default());
    selection::click(
        &mut drive.items,
        3,
        ClickModifiers {
            shift: false,
            toggle: true,
        },
    );

    drive.rederive(
        ViewOptions {
            sort_mode: SortMode::Alphabetical,
            reverse: true,
            search: "",
        },
        SelectionPolicy::Preserve,
    );

    let selected_items = drive.selected_items();
    let selected = names(&selected_items);
    assert_eq!(selected.len(), 2);
    assert!(selected.contains(&"a.txt") && selected.contains(&"b.txt"));
}

#[test]
fn test_same_listing_keeps_selection_new_listing_drops_it() {
    let mut drive = model();
    selection::click(&mut drive.items, 0, ClickModifiers::default());

    drive.set_listing(ListingSource::Directory("root".to_string()), listing(), options(""));
    assert_eq!(drive.selected_items().len(), 1);

    drive.set_listing(ListingSource::Trash, listing(), options(""));
    assert!(drive.selected_items().is_empty());
}

#[test]
fn test_failed_move_puts_rows_back() {
    let mut drive = model();
    let before = names(&drive.items).join(",");

    // a.txt dragged onto Archive
    let request = DragSession::start(&drive.items, 2)
        .drop_on(&drive.items[0].clone())
        .unwrap();
    drive.begin_move(7, &request, options(""));
    assert_eq!(names(&drive.items), vec!["Archive", "photos", "b.txt"]);
    assert!(drive.pending_moves.contains_key(&7));

    assert!(drive.revert_move(7, options("")));
    assert_eq!(names(&drive.items).join(","), before);
    assert!(drive.pending_moves.is_empty());
}

#[test]
fn test_refresh_during_move_keeps_rows_hidden() {
    let mut drive = model();
    let request = DragSession::start(&drive.items, 3)
        .drop_on(&drive.items[1].clone())
        .unwrap();
    drive.begin_move(1, &request, options(""));

    // A listing fetched before the worker applied the move still has b.txt
    drive.set_listing(ListingSource::Directory("root".to_string()), listing(), options(""));
    assert!(!names(&drive.items).contains(&"b.txt"));

    drive.commit_move(1);
    assert!(drive.pending_moves.is_empty());
    assert!(!drive.revert_move(1, options("")));
}

#[test]
fn test_revert_after_navigating_away_is_ignored() {
    let mut drive = model();
    let request = DragSession::start(&drive.items, 2)
        .drop_on(&drive.items[0].clone())
        .unwrap();
    drive.begin_move(3, &request, options(""));

    drive.set_listing(ListingSource::Trash, Vec::new(), options(""));
    assert!(!drive.revert_move(3, options("")));
    assert!(drive.items.is_empty());
}

#[test]
fn test_unfavorite_leaves_favorites_listing() {
    let mut drive = DriveModel::new();
    let mut starred = file("f1", "a.txt");
    starred.favorited = true;
    drive.set_listing(ListingSource::Favorites, vec![starred], options(""));

    drive.set_favorited(&["f1".to_string()], false, options(""));
    assert!(drive.items.is_empty());
}

#[test]
fn test_created_folder_replaces_same_name() {
    let mut drive = model();
    drive.add_created_folder(dir("d9", "ARCHIVE"), options(""));

    let archives: Vec<&DriveItem> = drive
        .items
        .iter()
        .filter(|item| item.name.eq_ignore_ascii_case("archive"))
        .collect();
    assert_eq!(archives.len(), 1);
    assert_eq!(archives[0].uuid, "d9");
}
