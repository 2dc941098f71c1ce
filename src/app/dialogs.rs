//! Dialog methods
//!
//! The modal on screen mirrors `active_dialog`; answering it sends the
//! value back to the waiting action task.

use tracing::debug;

use crate::logic::actions::DialogResponse;
use crate::model::DialogState;
use crate::services::DialogRequest;
use crate::App;

impl App {
    pub(crate) fn show_dialog(&mut self, request: DialogRequest) {
        debug!("Showing dialog: {}", request.title());
        self.model.ui.context_menu = None;
        self.model.ui.dialog = Some(DialogState::from_request(&request));
        self.active_dialog = Some(request);
    }

    pub(crate) fn answer_confirm(&mut self, confirmed: bool) {
        self.model.ui.dialog = None;
        match self.active_dialog.take() {
            Some(DialogRequest::Confirm { respond, .. }) => {
                let _ = respond.send(confirmed);
            }
            Some(other) => other.cancel(),
            None => {}
        }
    }

    /// Submit the input dialog; `None` cancels it
    pub(crate) fn answer_input(&mut self, value: Option<String>) {
        self.model.ui.dialog = None;
        match self.active_dialog.take() {
            Some(DialogRequest::Input { respond, .. }) => {
                let response = match value {
                    Some(value) => DialogResponse::Value(value),
                    None => DialogResponse::Cancelled,
                };
                let _ = respond.send(response);
            }
            Some(other) => other.cancel(),
            None => {}
        }
    }

    pub(crate) fn cancel_dialog(&mut self) {
        self.model.ui.dialog = None;
        if let Some(request) = self.active_dialog.take() {
            request.cancel();
        }
    }

    /// Text typed into the input dialog
    pub(crate) fn dialog_buffer_mut(&mut self) -> Option<&mut String> {
        match self.model.ui.dialog.as_mut() {
            Some(DialogState::Input { buffer, .. }) => Some(buffer),
            _ => None,
        }
    }
}
