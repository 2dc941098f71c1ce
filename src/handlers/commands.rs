//! Command Handler
//!
//! Every `Command` has exactly one handler here.

use tracing::debug;

use crate::messages::Command;
use crate::model::Toast;
use crate::services::actions;
use crate::App;

pub fn handle_command(app: &mut App, command: Command) {
    debug!("Command: {:?}", command);
    match command {
        Command::CreateFolder => {
            let location = &app.model.navigation.location;
            let Some(parent) = location
                .current_directory()
                .filter(|_| !location.is_read_only())
                .map(str::to_string)
            else {
                app.model
                    .show_toast(Toast::info("Folders can only be created in your drive"));
                return;
            };

            let worker = app.worker.clone();
            let prompt = app.dialogs.clone();
            app.spawn_action("create folder", async move {
                actions::create_folder(&worker, &prompt, &parent).await
            });
        }
        Command::OpenPreview(item) => app.open_preview(item),
        Command::Navigate(location) => app.switch_to(location),
        Command::RefetchContacts => app.request_contacts_refetch(),
        Command::ShowToast(toast) => app.model.show_toast(toast),
        Command::DismissToast(id) => app.model.ui.dismiss_toast(id),
    }
}
