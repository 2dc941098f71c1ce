//! Drive Model
//!
//! Listing data for the current location: the raw collection as the worker
//! returned it, the derived (sorted, filtered) collection the UI shows, and
//! the caches that decorate rows.

use std::collections::{HashMap, HashSet};

use super::types::PendingMove;
use crate::api::{DriveItem, ListingSource};
use crate::logic::actions::merge_created_folder;
use crate::logic::drag::{apply_tentative_removal, revert_removal, MoveRequest};
use crate::logic::public_link::LinkState;
use crate::logic::sorting::derive_items;
use crate::SortMode;

/// Whether a re-derivation keeps the current selection flags
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Same items, new order or filter
    Preserve,
    /// A new collection
    Replace,
}

/// Inputs of the derived view
#[derive(Clone, Copy, Debug)]
pub struct ViewOptions<'a> {
    pub sort_mode: SortMode,
    pub reverse: bool,
    pub search: &'a str,
}

#[derive(Clone, Debug)]
pub struct DriveModel {
    /// Account root directory, once resolved
    pub root_uuid: Option<String>,

    /// Listing the collections belong to
    pub source: Option<ListingSource>,

    /// Entries as listed by the worker
    pub raw: Vec<DriveItem>,

    /// Entries in display order, carrying the selection flags
    pub items: Vec<DriveItem>,

    pub loading: bool,
    pub error: Option<String>,

    /// Directory sizes by uuid
    pub directory_sizes: HashMap<String, u64>,

    /// Directory names by uuid for breadcrumbs
    pub names: HashMap<String, String>,

    /// Share context of the directory being browsed, for size lookups
    pub sharer_id: u64,
    pub receiver_id: u64,

    /// Moves awaiting the worker, by action ticket
    pub pending_moves: HashMap<u64, PendingMove>,

    /// Public link being browsed
    pub link: Option<LinkState>,
}

impl DriveModel {
    pub fn new() -> Self {
        Self {
            root_uuid: None,
            source: None,
            raw: Vec::new(),
            items: Vec::new(),
            loading: false,
            error: None,
            directory_sizes: HashMap::new(),
            names: HashMap::new(),
            sharer_id: 0,
            receiver_id: 0,
            pending_moves: HashMap::new(),
            link: None,
        }
    }

    /// Recompute `items` from `raw`
    pub fn rederive(&mut self, options: ViewOptions<'_>, policy: SelectionPolicy) {
        let selected: HashSet<String> = match policy {
            SelectionPolicy::Preserve => self
                .items
                .iter()
                .filter(|item| item.selected)
                .map(|item| item.uuid.clone())
                .collect(),
            SelectionPolicy::Replace => HashSet::new(),
        };

        let mut items = derive_items(&self.raw, options.sort_mode, options.reverse, options.search);
        for item in &mut items {
            item.selected = selected.contains(&item.uuid);
        }
        self.items = items;
    }

    /// Install a fresh listing. Rows with a move still in flight stay hidden.
    pub fn set_listing(
        &mut self,
        source: ListingSource,
        mut raw: Vec<DriveItem>,
        options: ViewOptions<'_>,
    ) {
        let moving: HashSet<&str> = self
            .pending_moves
            .values()
            .filter(|pending| pending.source == source)
            .flat_map(|pending| pending.removal.uuids())
            .collect();
        raw.retain(|item| !moving.contains(item.uuid.as_str()));

        for item in raw.iter().filter(|item| item.is_directory()) {
            self.names.insert(item.uuid.clone(), item.name.clone());
        }

        let policy = if self.source.as_ref() == Some(&source) && self.same_entries(&raw) {
            SelectionPolicy::Preserve
        } else {
            SelectionPolicy::Replace
        };

        self.source = Some(source);
        self.raw = raw;
        self.loading = false;
        self.error = None;
        self.rederive(options, policy);
    }

    fn same_entries(&self, raw: &[DriveItem]) -> bool {
        self.raw.len() == raw.len()
            && self
                .raw
                .iter()
                .zip(raw)
                .all(|(a, b)| a.uuid == b.uuid && a.name == b.name)
    }

    /// Empty the listing while another location loads
    pub fn clear_listing(&mut self, source: Option<ListingSource>) {
        self.loading = source.is_some();
        self.source = source;
        self.raw.clear();
        self.items.clear();
        self.error = None;
    }

    pub fn selected_items(&self) -> Vec<DriveItem> {
        crate::logic::selection::selected_items(&self.items)
    }

    pub fn directory_size(&self, uuid: &str) -> Option<u64> {
        self.directory_sizes.get(uuid).copied()
    }

    /// Remove the moved rows ahead of the worker's answer
    pub fn begin_move(&mut self, ticket: u64, request: &MoveRequest, options: ViewOptions<'_>) {
        let Some(source) = self.source.clone() else {
            return;
        };

        let removal = apply_tentative_removal(&mut self.raw, &request.uuids());
        if removal.is_empty() {
            return;
        }

        self.pending_moves
            .insert(ticket, PendingMove { source, removal });
        self.rederive(options, SelectionPolicy::Preserve);
    }

    /// The worker accepted the move
    pub fn commit_move(&mut self, ticket: u64) {
        self.pending_moves.remove(&ticket);
    }

    /// The worker rejected the move: put the rows back where they were.
    /// Returns whether anything was restored.
    pub fn revert_move(&mut self, ticket: u64, options: ViewOptions<'_>) -> bool {
        let Some(pending) = self.pending_moves.remove(&ticket) else {
            return false;
        };

        // The user navigated away; the next listing is authoritative
        if self.source.as_ref() != Some(&pending.source) {
            return false;
        }

        revert_removal(&mut self.raw, pending.removal);
        self.rederive(options, SelectionPolicy::Preserve);
        true
    }

    pub fn remove_items(&mut self, uuids: &[String], options: ViewOptions<'_>) {
        let uuids: HashSet<&str> = uuids.iter().map(String::as_str).collect();
        self.raw.retain(|item| !uuids.contains(item.uuid.as_str()));
        self.rederive(options, SelectionPolicy::Preserve);
    }

    pub fn rename_item(&mut self, uuid: &str, name: &str, options: ViewOptions<'_>) {
        for item in self.raw.iter_mut().filter(|item| item.uuid == uuid) {
            item.name = name.to_string();
        }
        self.rederive(options, SelectionPolicy::Preserve);
    }

    pub fn set_favorited(&mut self, uuids: &[String], favorite: bool, options: ViewOptions<'_>) {
        for item in self.raw.iter_mut().filter(|item| uuids.contains(&item.uuid)) {
            item.favorited = favorite;
        }
        // Unfavorited entries leave the favorites listing
        if !favorite && self.source == Some(ListingSource::Favorites) {
            self.raw.retain(|item| !uuids.contains(&item.uuid));
        }
        self.rederive(options, SelectionPolicy::Preserve);
    }

    pub fn add_created_folder(&mut self, created: DriveItem, options: ViewOptions<'_>) {
        self.names.insert(created.uuid.clone(), created.name.clone());
        merge_created_folder(&mut self.raw, created);
        self.rederive(options, SelectionPolicy::Preserve);
    }
}

impl Default for DriveModel {
    fn default() -> Self {
        Self::new()
    }
}
