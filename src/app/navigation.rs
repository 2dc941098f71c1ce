//! Navigation methods
//!
//! Moving between locations, loading their listings, and moving the cursor
//! and scroll position within the list pane.

use tracing::debug;

use crate::api::DriveItem;
use crate::logic;
use crate::logic::contacts::ContactView;
use crate::messages::Command;
use crate::model::{Focus, Location, SelectionPolicy, SidebarEntry};
use crate::services::api::{ApiRequest, Priority};
use crate::App;

impl App {
    /// Open `location`, remembering the current one for going back
    pub(crate) fn navigate(&mut self, location: Location) {
        if location == self.model.navigation.location {
            return;
        }
        debug!("Navigate to {:?}", location);
        self.model.navigation.push(location);
        self.enter_location();
    }

    /// Jump to `location` without history (sidebar and tab switches)
    pub(crate) fn switch_to(&mut self, location: Location) {
        debug!("Switch to {:?}", location);
        if location.sidebar_entry() != self.model.navigation.location.sidebar_entry() {
            self.model.drive.sharer_id = 0;
            self.model.drive.receiver_id = 0;
        }
        self.model.navigation.replace(location);
        self.enter_location();
    }

    /// Previous location, or the parent directory when there is no history
    pub(crate) fn go_back(&mut self) {
        if self.model.navigation.back() {
            self.enter_location();
        } else if let Some(parent) = self.model.navigation.location.parent() {
            self.model.navigation.replace(parent);
            self.enter_location();
        }
    }

    fn enter_location(&mut self) {
        self.model.ui.cancel_drag();
        self.model.ui.close_popups();

        if self.model.navigation.location.is_contacts() {
            self.model.drive.clear_listing(None);
            self.refresh_contact_rows();
            let _ = self.command_tx.send(Command::RefetchContacts);
        } else {
            self.load_listing(Priority::High);
        }
    }

    /// Request the listing behind the current location. The rows on screen
    /// stay until the answer when it is the same listing.
    pub(crate) fn load_listing(&mut self, priority: Priority) {
        match self.model.navigation.location.listing_source() {
            Some(source) => {
                if self.model.drive.source.as_ref() == Some(&source) {
                    self.model.drive.loading = true;
                } else {
                    self.model.drive.clear_listing(Some(source.clone()));
                }
                self.model.performance.start_load();
                let _ = self.api_tx.send(ApiRequest::ListItems { source, priority });
            }
            None => {
                // Root or link not resolved yet
                self.model.drive.clear_listing(None);
                self.model.drive.loading = true;
            }
        }
    }

    /// Reload whatever is on screen
    pub(crate) fn refresh(&mut self) {
        if self.model.navigation.location.is_contacts() {
            let _ = self.command_tx.send(Command::RefetchContacts);
        } else if self.link_unresolved() {
            self.retry_public_link();
        } else {
            self.load_listing(Priority::High);
        }
    }

    /// Open an entry: enter directories, preview previewable files, ignore
    /// everything else
    pub(crate) fn open_item(&mut self, item: DriveItem) {
        if item.is_directory() {
            let Some(next) = self.model.navigation.location.enter(&item) else {
                debug!("{} cannot be opened here", item.name);
                return;
            };

            self.model
                .drive
                .names
                .insert(item.uuid.clone(), item.name.clone());
            // Shared directories carry the context their sizes are looked up with
            if item.sharer_id != 0 || item.receiver_id != 0 {
                self.model.drive.sharer_id = item.sharer_id;
                self.model.drive.receiver_id = item.receiver_id;
            }
            self.navigate(next);
        } else if logic::file::is_previewable(&item.name) {
            let _ = self.command_tx.send(Command::OpenPreview(item));
        }
    }

    pub(crate) fn open_cursor_item(&mut self) {
        if let Some(item) = self.model.cursor_item().cloned() {
            self.open_item(item);
        }
    }

    // ============================================
    // CURSOR AND SCROLLING
    // ============================================

    pub(crate) fn move_cursor(&mut self, delta: isize) {
        match self.model.navigation.focus {
            Focus::Sidebar => {
                let len = SidebarEntry::ALL.len();
                let current = Some(self.model.navigation.sidebar_cursor);
                if let Some(next) = logic::navigation::move_cursor(current, delta, len) {
                    self.model.navigation.sidebar_cursor = next;
                }
            }
            Focus::List => {
                let len = self.model.list_len();
                self.model.navigation.cursor =
                    logic::navigation::move_cursor(self.model.navigation.cursor, delta, len);
                self.scroll_to_cursor();
            }
        }
    }

    pub(crate) fn cursor_to_first(&mut self) {
        self.set_cursor(Some(0));
    }

    pub(crate) fn cursor_to_last(&mut self) {
        let len = self.model.list_len();
        self.set_cursor(len.checked_sub(1));
    }

    pub(crate) fn set_cursor(&mut self, index: Option<usize>) {
        let len = self.model.list_len();
        self.model.navigation.cursor = logic::navigation::clamp_cursor(index, len);
        self.scroll_to_cursor();
    }

    /// Rows per page for page-wise movement
    pub(crate) fn page_rows(&self, divisor: usize) -> isize {
        (self.areas.list_viewport() / divisor.max(1)).max(1) as isize
    }

    pub(crate) fn scroll_to_cursor(&mut self) {
        let Some(index) = self.model.navigation.cursor else {
            return;
        };
        let keys = self.model.list_keys();
        let viewport = self.areas.list_viewport();
        let navigation = &mut self.model.navigation;
        navigation.scroll_offset =
            navigation
                .virtualizer
                .scroll_to_index(&keys, index, navigation.scroll_offset, viewport);
    }

    /// Scroll the list by lines without moving the cursor
    pub(crate) fn scroll_list(&mut self, delta: isize) {
        let keys = self.model.list_keys();
        let total = self.model.navigation.virtualizer.total_size(&keys);
        let max = total.saturating_sub(self.areas.list_viewport()) as isize;
        let offset = self.model.navigation.scroll_offset as isize + delta;
        self.model.navigation.scroll_offset = offset.clamp(0, max) as usize;
    }

    // ============================================
    // SIDEBAR
    // ============================================

    pub(crate) fn toggle_focus(&mut self) {
        self.model.navigation.focus = match self.model.navigation.focus {
            Focus::Sidebar => Focus::List,
            Focus::List => Focus::Sidebar,
        };
    }

    pub(crate) fn activate_sidebar_entry(&mut self, index: usize) {
        let Some(entry) = SidebarEntry::ALL.get(index).copied() else {
            return;
        };
        self.model.navigation.sidebar_cursor = index;
        self.model.navigation.focus = Focus::List;
        let location = entry.location(self.model.drive.root_uuid.as_deref());
        self.switch_to(location);
    }

    /// Step through the contact tabs
    pub(crate) fn cycle_contact_view(&mut self, delta: isize) {
        let Some(view) = self.model.navigation.location.contact_view() else {
            return;
        };
        let len = ContactView::ALL.len() as isize;
        let current = ContactView::ALL
            .iter()
            .position(|v| *v == view)
            .unwrap_or(0) as isize;
        let next = ContactView::ALL[(current + delta).rem_euclid(len) as usize];
        self.switch_to(Location::Contacts(next));
    }

    // ============================================
    // SORT, SEARCH, DISPLAY
    // ============================================

    /// Re-derive the visible rows after a sort or search change
    pub(crate) fn rederive_view(&mut self) {
        if self.model.navigation.location.is_contacts() {
            self.refresh_contact_rows();
        } else {
            let options = self.model.ui.view_options();
            self.model.drive.rederive(options, SelectionPolicy::Preserve);
        }
        let len = self.model.list_len();
        self.model.navigation.cursor =
            logic::navigation::clamp_cursor(self.model.navigation.cursor, len);
        self.scroll_to_cursor();
    }

    pub(crate) fn cycle_sort_mode(&mut self) {
        self.model.ui.sort_mode = logic::ui::cycle_sort_mode(self.model.ui.sort_mode);
        self.rederive_view();
    }

    pub(crate) fn toggle_sort_reverse(&mut self) {
        self.model.ui.sort_reverse = !self.model.ui.sort_reverse;
        self.rederive_view();
    }

    pub(crate) fn cycle_display_mode(&mut self) {
        self.model.ui.display_mode = logic::ui::cycle_display_mode(self.model.ui.display_mode);
    }

    pub(crate) fn clear_search(&mut self) {
        self.model.ui.search_mode = false;
        if !self.model.ui.search_query.is_empty() {
            self.model.ui.search_query.clear();
            self.rederive_view();
        }
    }
}
