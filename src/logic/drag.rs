//! Drag-and-drop reparenting
//!
//! A `DragSession` is owned by a single gesture: created on drag start and
//! consumed by value on drop. Removal from the displayed collection is two
//! phase so a failed move can be put back.

use crate::api::DriveItem;
use std::collections::HashSet;

/// The group of entries being moved by one gesture
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    items: Vec<DriveItem>,
}

/// Move to issue against the worker once a drop is accepted
#[derive(Debug, Clone, PartialEq)]
pub struct MoveRequest {
    pub items: Vec<DriveItem>,
    pub parent: String,
}

impl MoveRequest {
    pub fn uuids(&self) -> HashSet<String> {
        self.items.iter().map(|item| item.uuid.clone()).collect()
    }
}

impl DragSession {
    /// Start dragging from `index`: every selected entry, plus the origin
    /// entry when it is not part of the selection.
    pub fn start(items: &[DriveItem], index: usize) -> Self {
        let mut dragged: Vec<DriveItem> = items.iter().filter(|item| item.selected).cloned().collect();

        if let Some(origin) = items.get(index) {
            if !dragged.iter().any(|item| item.uuid == origin.uuid) {
                dragged.push(origin.clone());
            }
        }

        Self { items: dragged }
    }

    pub fn items(&self) -> &[DriveItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, uuid: &str) -> bool {
        self.items.iter().any(|item| item.uuid == uuid)
    }

    /// Whether hovering `target` should be highlighted as a drop target
    pub fn can_hover(&self, target: &DriveItem) -> bool {
        !self.is_empty() && target.is_directory()
    }

    /// Finish the gesture on `target`.
    ///
    /// `None` when the target is not a directory, nothing is dragged, or the
    /// target is itself being dragged.
    pub fn drop_on(self, target: &DriveItem) -> Option<MoveRequest> {
        if !target.is_directory() || self.is_empty() || self.contains(&target.uuid) {
            return None;
        }

        Some(MoveRequest {
            items: self.items,
            parent: target.uuid.clone(),
        })
    }
}

/// Rows removed tentatively, remembered with their original positions
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRemoval {
    removed: Vec<(usize, DriveItem)>,
}

impl PendingRemoval {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.removed.len()
    }

    pub fn uuids(&self) -> impl Iterator<Item = &str> {
        self.removed.iter().map(|(_, item)| item.uuid.as_str())
    }
}

/// Remove the listed uuids from the collection, keeping what is needed to undo
pub fn apply_tentative_removal(items: &mut Vec<DriveItem>, uuids: &HashSet<String>) -> PendingRemoval {
    let mut removed = Vec::new();
    let mut index = 0;
    let mut kept = Vec::with_capacity(items.len());

    for item in items.drain(..) {
        if uuids.contains(&item.uuid) {
            removed.push((index, item));
        } else {
            kept.push(item);
        }
        index += 1;
    }

    *items = kept;
    PendingRemoval { removed }
}

/// Put tentatively removed rows back at their original positions.
///
/// Rows that reappeared in the meantime (e.g. a refresh) are not duplicated.
pub fn revert_removal(items: &mut Vec<DriveItem>, pending: PendingRemoval) {
    for (index, item) in pending.removed {
        if items.iter().any(|existing| existing.uuid == item.uuid) {
            continue;
        }
        let at = index.min(items.len());
        items.insert(at, item);
    }
}
