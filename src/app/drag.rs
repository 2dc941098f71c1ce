//! Drag-and-drop methods
//!
//! Mouse gestures and the keyboard grab (`x`) / drop (`v`) pair share one
//! `DragSession`; dropping on a directory row starts a move.

use tracing::debug;

use crate::logic::drag::DragSession;
use crate::model::Location;
use crate::App;

impl App {
    fn can_drag(&self) -> bool {
        matches!(self.model.navigation.location, Location::Drive(_))
    }

    /// Pick up the selection (plus the row at `index`)
    pub(crate) fn start_drag(&mut self, index: usize) {
        if !self.can_drag() || index >= self.model.drive.items.len() {
            return;
        }
        let session = DragSession::start(&self.model.drive.items, index);
        debug!("Dragging {} items", session.items().len());
        self.model.ui.drag = Some(session);
        self.model.ui.drop_hover = None;
    }

    /// Highlight `index` when the held entries can be dropped there
    pub(crate) fn update_drop_hover(&mut self, index: Option<usize>) {
        let Some(session) = self.model.ui.drag.as_ref() else {
            return;
        };
        self.model.ui.drop_hover = index.filter(|idx| {
            self.model
                .drive
                .items
                .get(*idx)
                .is_some_and(|target| session.can_hover(target) && !session.contains(&target.uuid))
        });
    }

    /// Finish the gesture on the row at `index`; anything else cancels it
    pub(crate) fn drop_drag(&mut self, index: Option<usize>) {
        self.model.ui.drop_hover = None;
        let Some(session) = self.model.ui.drag.take() else {
            return;
        };
        let Some(target) = index.and_then(|idx| self.model.drive.items.get(idx)).cloned() else {
            debug!("Drop outside the list, move cancelled");
            return;
        };

        match session.drop_on(&target) {
            Some(request) => {
                debug!(
                    "Moving {} items into {}",
                    request.items.len(),
                    request.parent
                );
                self.begin_move(request);
            }
            None => debug!("{} is not a drop target", target.name),
        }
    }

    /// `x`: grab the selection, or the cursor row
    pub(crate) fn grab_for_move(&mut self) {
        if !self.can_drag() {
            return;
        }
        match self.model.navigation.cursor {
            Some(idx) => self.start_drag(idx),
            None => {
                let targets = self.model.drive.selected_items();
                self.start_drag_with(targets);
            }
        }
    }

    /// `v`: drop the held entries on the cursor row
    pub(crate) fn drop_at_cursor(&mut self) {
        self.drop_drag(self.model.navigation.cursor);
    }
}
