//! Selection methods

use crate::logic;
use crate::logic::selection::ClickModifiers;
use crate::App;

impl App {
    /// Left click on a row of the drive list
    pub(crate) fn click_row(&mut self, index: usize, modifiers: ClickModifiers) {
        if self.model.navigation.location.is_contacts() {
            self.set_cursor(Some(index));
            return;
        }
        logic::selection::click(&mut self.model.drive.items, index, modifiers);
        self.set_cursor(Some(index));
    }

    /// Left button down on a row; true when a plain click waits for release
    pub(crate) fn press_row(&mut self, index: usize, modifiers: ClickModifiers) -> bool {
        if self.model.navigation.location.is_contacts() {
            self.set_cursor(Some(index));
            return false;
        }
        let pending = logic::selection::press(&mut self.model.drive.items, index, modifiers);
        self.set_cursor(Some(index));
        pending
    }

    /// Space: plain click on the cursor row
    pub(crate) fn toggle_cursor_selection(&mut self, modifiers: ClickModifiers) {
        if let Some(index) = self.model.navigation.cursor {
            self.click_row(index, modifiers);
        }
    }

    /// Shift+arrow: move the cursor, then shift-click there
    pub(crate) fn extend_selection(&mut self, delta: isize) {
        if self.model.navigation.location.is_contacts() {
            return;
        }
        self.move_cursor(delta);
        if let Some(index) = self.model.navigation.cursor {
            logic::selection::shift_click(&mut self.model.drive.items, index);
        }
    }

    pub(crate) fn select_all(&mut self) {
        logic::selection::select_all(&mut self.model.drive.items);
    }

    /// Clear the selection; returns whether anything was selected
    pub(crate) fn clear_selection(&mut self) -> bool {
        let had_selection = logic::selection::selected_count(&self.model.drive.items) > 0;
        logic::selection::clear_selection(&mut self.model.drive.items);
        had_selection
    }

    /// Entries a key action applies to
    pub(crate) fn key_targets(&self) -> Vec<crate::api::DriveItem> {
        logic::selection::action_targets(&self.model.drive.items, self.model.navigation.cursor)
    }
}
