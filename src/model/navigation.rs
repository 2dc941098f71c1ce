//! Navigation Model
//!
//! This sub-model contains all state related to navigation:
//! current location, history, focus, cursor and scrolling.

use super::types::{Focus, Location, SidebarEntry};
use crate::logic::virtualizer::Virtualizer;

/// Navigation state (location, focus, cursor)
#[derive(Clone, Debug)]
pub struct NavigationModel {
    pub location: Location,

    /// Previous locations with their cursor, for going back
    pub history: Vec<(Location, Option<usize>)>,

    pub focus: Focus,

    /// Highlighted sidebar entry
    pub sidebar_cursor: usize,

    /// Cursor row in the list pane
    pub cursor: Option<usize>,

    /// First visible line of the list pane
    pub scroll_offset: usize,

    /// Row measurements for the list pane
    pub virtualizer: Virtualizer,
}

impl NavigationModel {
    pub fn new(location: Location, overscan: usize) -> Self {
        let sidebar_cursor = location
            .sidebar_entry()
            .and_then(|entry| SidebarEntry::ALL.iter().position(|e| *e == entry))
            .unwrap_or(0);

        Self {
            location,
            history: Vec::new(),
            focus: Focus::List,
            sidebar_cursor,
            cursor: None,
            scroll_offset: 0,
            virtualizer: Virtualizer::new(1, overscan),
        }
    }

    /// Move to `location`, remembering where we came from
    pub fn push(&mut self, location: Location) {
        let previous = std::mem::replace(&mut self.location, location);
        self.history.push((previous, self.cursor));
        self.reset_list();
        self.sync_sidebar();
    }

    /// Jump to `location` without history (sidebar switches)
    pub fn replace(&mut self, location: Location) {
        self.history.clear();
        self.location = location;
        self.reset_list();
        self.sync_sidebar();
    }

    /// Return to the previous location, restoring its cursor
    pub fn back(&mut self) -> bool {
        let Some((location, cursor)) = self.history.pop() else {
            return false;
        };
        self.location = location;
        self.reset_list();
        self.cursor = cursor;
        self.sync_sidebar();
        true
    }

    fn reset_list(&mut self) {
        self.cursor = None;
        self.scroll_offset = 0;
    }

    fn sync_sidebar(&mut self) {
        if let Some(entry) = self.location.sidebar_entry() {
            if let Some(idx) = SidebarEntry::ALL.iter().position(|e| *e == entry) {
                self.sidebar_cursor = idx;
            }
        }
    }

    pub fn sidebar_entry(&self) -> SidebarEntry {
        SidebarEntry::ALL
            .get(self.sidebar_cursor)
            .copied()
            .unwrap_or(SidebarEntry::Drive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_back_restore_cursor() {
        let mut nav = NavigationModel::new(Location::Drive(vec!["root".to_string()]), 5);
        nav.cursor = Some(3);

        nav.push(Location::Drive(vec!["root".to_string(), "docs".to_string()]));
        assert_eq!(nav.cursor, None);

        assert!(nav.back());
        assert_eq!(nav.cursor, Some(3));
        assert!(!nav.back());
    }

    #[test]
    fn test_sidebar_follows_location() {
        let mut nav = NavigationModel::new(Location::Drive(vec![]), 5);
        nav.replace(Location::Trash);
        assert_eq!(nav.sidebar_entry(), SidebarEntry::Trash);
        assert!(nav.history.is_empty());
    }
}
