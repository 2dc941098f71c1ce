//! Context menu methods

use tracing::debug;

use crate::logic;
use crate::logic::actions::{contact_menu, item_menu};
use crate::model::{ContextMenuState, MenuEntry, MenuTarget};
use crate::App;

impl App {
    /// Open the menu for the row at `index`, or the background menu when
    /// `index` is `None`
    pub(crate) fn open_menu(&mut self, index: Option<usize>, anchor: (u16, u16)) {
        let (target, entries): (MenuTarget, Vec<MenuEntry>) = if self.model.navigation.location.is_contacts() {
            let row = index.and_then(|idx| self.model.contacts.rows.get(idx)).cloned();
            if let Some(idx) = index {
                self.model.navigation.cursor = Some(idx);
            }
            let entries = contact_menu(row.as_ref().map(|r| r.kind()))
                .into_iter()
                .map(MenuEntry::Contact)
                .collect();
            (MenuTarget::Contact(row), entries)
        } else {
            let scope = self.model.navigation.location.menu_scope();
            match index.filter(|idx| *idx < self.model.drive.items.len()) {
                Some(idx) => {
                    logic::selection::context_click(&mut self.model.drive.items, idx);
                    self.model.navigation.cursor = Some(idx);
                    let targets = self.model.drive.selected_items();
                    let entries = item_menu(scope, &targets)
                        .into_iter()
                        .map(MenuEntry::Item)
                        .collect();
                    (MenuTarget::Items(targets), entries)
                }
                None => {
                    logic::selection::clear_selection(&mut self.model.drive.items);
                    let entries = item_menu(scope, &[])
                        .into_iter()
                        .map(MenuEntry::Item)
                        .collect();
                    (MenuTarget::Background, entries)
                }
            }
        };

        if entries.is_empty() {
            debug!("No menu entries for {:?}", target);
            return;
        }

        self.model.ui.context_menu = Some(ContextMenuState {
            target,
            entries,
            cursor: 0,
            anchor,
        });
    }

    /// Keyboard variant: the menu of the selection or the cursor row
    pub(crate) fn open_menu_at_cursor(&mut self) {
        let anchor = self.areas.cursor_anchor(self.model.navigation.cursor);
        if self.model.navigation.location.is_contacts() {
            self.open_menu(self.model.navigation.cursor, anchor);
            return;
        }

        let targets = logic::selection::action_targets(
            &self.model.drive.items,
            self.model.navigation.cursor,
        );
        if targets.is_empty() {
            self.open_menu(None, anchor);
            return;
        }

        let scope = self.model.navigation.location.menu_scope();
        let entries: Vec<MenuEntry> = item_menu(scope, &targets)
            .into_iter()
            .map(MenuEntry::Item)
            .collect();
        if entries.is_empty() {
            return;
        }
        self.model.ui.context_menu = Some(ContextMenuState {
            target: MenuTarget::Items(targets),
            entries,
            cursor: 0,
            anchor,
        });
    }

    pub(crate) fn move_menu_cursor(&mut self, delta: isize) {
        if let Some(menu) = self.model.ui.context_menu.as_mut() {
            if let Some(next) =
                logic::navigation::move_cursor(Some(menu.cursor), delta, menu.entries.len())
            {
                menu.cursor = next;
            }
        }
    }

    /// Run the highlighted entry and close the menu
    pub(crate) fn activate_menu_entry(&mut self) {
        let Some(menu) = self.model.ui.context_menu.take() else {
            return;
        };
        let Some(entry) = menu.selected_entry() else {
            return;
        };

        debug!("Menu entry {} chosen", entry.label());
        match (entry, menu.target) {
            (MenuEntry::Item(action), MenuTarget::Items(targets)) => {
                self.dispatch_item_action(action, targets)
            }
            (MenuEntry::Item(action), MenuTarget::Background) => {
                self.dispatch_item_action(action, Vec::new())
            }
            (MenuEntry::Contact(action), MenuTarget::Contact(row)) => {
                self.dispatch_contact_action(action, row)
            }
            (entry, target) => debug!("Menu entry {:?} does not apply to {:?}", entry, target),
        }
    }
}
