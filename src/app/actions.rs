//! Action methods
//!
//! Spawning user actions as tasks and applying their reports when they come
//! back. Every action runs under a ticket so optimistic changes (moves) can
//! be matched to their outcome.

use anyhow::Result;
use std::future::Future;
use tracing::{debug, error, info, warn};

use crate::api::DriveItem;
use crate::logic::actions::{ContactAction, ItemAction};
use crate::logic::drag::{DragSession, MoveRequest};
use crate::logic::errors::format_error_message;
use crate::logic::public_link::{LinkState, ParsedLink};
use crate::messages::{ActionOutcome, ActionReport, Command};
use crate::model::{ContactRow, Location, Toast};
use crate::services::actions;
use crate::App;

impl App {
    fn take_ticket(&mut self) -> u64 {
        self.next_ticket += 1;
        self.next_ticket
    }

    /// Run `action` in the background, reporting under a fresh ticket
    pub(crate) fn spawn_action<F>(&mut self, label: &'static str, action: F) -> u64
    where
        F: Future<Output = Result<ActionOutcome>> + Send + 'static,
    {
        let ticket = self.take_ticket();
        self.spawn_ticketed(ticket, label, action);
        ticket
    }

    fn spawn_ticketed<F>(&self, ticket: u64, label: &'static str, action: F)
    where
        F: Future<Output = Result<ActionOutcome>> + Send + 'static,
    {
        debug!("Starting action {} (ticket {})", label, ticket);
        let reports = self.action_tx.clone();
        tokio::spawn(async move {
            let result = action.await;
            let _ = reports.send(ActionReport {
                ticket,
                label,
                result,
            });
        });
    }

    // ============================================
    // DISPATCH
    // ============================================

    /// Run a menu or key action on `targets`
    pub(crate) fn dispatch_item_action(&mut self, action: ItemAction, targets: Vec<DriveItem>) {
        let worker = self.worker.clone();
        let prompt = self.dialogs.clone();

        match action {
            ItemAction::Open => {
                if let Some(item) = targets.into_iter().next() {
                    self.open_item(item);
                }
            }
            ItemAction::NewFolder => {
                let _ = self.command_tx.send(Command::CreateFolder);
            }
            ItemAction::Move => self.start_drag_with(targets),
            ItemAction::Download => {
                self.spawn_action("download", async move {
                    actions::download(&worker, &targets).await
                });
            }
            ItemAction::Share => {
                self.spawn_action("share", async move {
                    actions::share(&worker, &prompt, &targets, None).await
                });
            }
            ItemAction::Favorite | ItemAction::Unfavorite => {
                let favorite = action == ItemAction::Favorite;
                self.spawn_action("favorite", async move {
                    actions::favorite(&worker, &targets, favorite).await
                });
            }
            ItemAction::Rename => {
                let Some(item) = targets.into_iter().next() else {
                    return;
                };
                self.spawn_action("rename", async move {
                    actions::rename(&worker, &prompt, &item).await
                });
            }
            ItemAction::Trash => {
                self.spawn_action("trash", async move {
                    actions::trash(&worker, &prompt, &targets).await
                });
            }
            ItemAction::Restore => {
                self.spawn_action("restore", async move {
                    actions::restore(&worker, &targets).await
                });
            }
            ItemAction::DeletePermanently => {
                self.spawn_action("delete permanently", async move {
                    actions::delete_permanently(&worker, &prompt, &targets).await
                });
            }
        }
    }

    /// Run a contacts menu action; `row` is `None` for the background menu
    pub(crate) fn dispatch_contact_action(&mut self, action: ContactAction, row: Option<ContactRow>) {
        let worker = self.worker.clone();
        let prompt = self.dialogs.clone();

        if action == ContactAction::SendRequest {
            let commands = self.command_tx.clone();
            let error_toast_ms = self.config.error_toast_ms;
            self.spawn_action("send contact request", async move {
                actions::send_contact_request(&worker, &prompt, &commands, error_toast_ms).await
            });
            return;
        }

        let Some(row) = row else {
            return;
        };
        let uuid = row.uuid().to_string();
        let email = row.email().to_string();

        match action {
            ContactAction::SendRequest => {}
            ContactAction::Accept => {
                self.spawn_action("accept request", async move {
                    actions::accept_request(&worker, &uuid).await
                });
            }
            ContactAction::Deny => {
                self.spawn_action("deny request", async move {
                    actions::deny_request(&worker, &uuid).await
                });
            }
            ContactAction::RemoveRequest => {
                self.spawn_action("remove request", async move {
                    actions::remove_request(&worker, &uuid).await
                });
            }
            ContactAction::RemoveContact => {
                self.spawn_action("remove contact", async move {
                    actions::remove_contact(&worker, &prompt, &uuid, &email).await
                });
            }
            ContactAction::Block => {
                self.spawn_action("block contact", async move {
                    actions::block_contact(&worker, &prompt, &email).await
                });
            }
            ContactAction::Unblock => {
                self.spawn_action("unblock contact", async move {
                    actions::unblock_contact(&worker, &uuid).await
                });
            }
        }
    }

    /// Drop the moved rows now and ask the worker to move them
    pub(crate) fn begin_move(&mut self, request: MoveRequest) {
        let ticket = self.take_ticket();
        let options = self.model.ui.view_options();
        self.model.drive.begin_move(ticket, &request, options);

        let worker = self.worker.clone();
        self.spawn_ticketed(ticket, "move", async move {
            actions::move_items(&worker, &request).await
        });
    }

    /// Start resolving a public link, prompting for its password if needed
    pub(crate) fn open_public_link(&mut self, link: ParsedLink) {
        info!("Opening public link {}", link.uuid);
        self.public_link = Some(link.clone());
        self.model.drive.loading = true;

        let worker = self.worker.clone();
        let prompt = self.dialogs.clone();
        self.spawn_action("resolve link", async move {
            actions::resolve_link(&worker, &prompt, &link).await
        });
    }

    /// A link that still waits for its password (or failed to load)
    pub(crate) fn link_unresolved(&self) -> bool {
        self.model.navigation.location.is_read_only()
            && !matches!(self.model.drive.link, Some(LinkState::Ready { .. }))
    }

    pub(crate) fn retry_public_link(&mut self) {
        if let Some(link) = self.public_link.clone() {
            self.open_public_link(link);
        }
    }

    // ============================================
    // REPORTS
    // ============================================

    pub(crate) fn apply_action_report(&mut self, report: ActionReport) {
        let ActionReport {
            ticket,
            label,
            result,
        } = report;

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Action {} failed: {:#}", label, e);
                if self.model.drive.pending_moves.contains_key(&ticket) {
                    let options = self.model.ui.view_options();
                    self.model.drive.revert_move(ticket, options);
                    self.model.show_toast(Toast::error(
                        format!("Move failed: {}", format_error_message(&e)),
                        self.config.error_toast_ms,
                    ));
                }
                return;
            }
        };

        debug!("Action {} finished: {:?}", label, outcome);
        self.apply_outcome(ticket, outcome);
    }

    fn apply_outcome(&mut self, ticket: u64, outcome: ActionOutcome) {
        match outcome {
            ActionOutcome::Cancelled => {}

            ActionOutcome::FolderCreated(created) => {
                self.cache_name(&created.uuid, &created.name);
                let message = format!("Created {}", created.name);
                let here = self.model.navigation.location.current_directory();
                if created.parent.is_empty() || here == Some(created.parent.as_str()) {
                    let options = self.model.ui.view_options();
                    self.model.drive.add_created_folder(created, options);
                }
                self.model.show_toast(Toast::success(message));
            }

            ActionOutcome::Renamed {
                uuid,
                name,
                is_directory,
            } => {
                if is_directory {
                    self.model.drive.names.insert(uuid.clone(), name.clone());
                    self.cache_name(&uuid, &name);
                }
                let options = self.model.ui.view_options();
                self.model.drive.rename_item(&uuid, &name, options);
            }

            ActionOutcome::Moved { uuids, parent } => {
                self.model.drive.commit_move(ticket);
                // The destination grew; measure it again
                self.model.drive.directory_sizes.remove(&parent);
                self.model.performance.requested_sizes.remove(&parent);
                let noun = if uuids.len() == 1 { "item" } else { "items" };
                self.model
                    .show_toast(Toast::success(format!("Moved {} {}", uuids.len(), noun)));
            }

            ActionOutcome::Trashed(uuids)
            | ActionOutcome::Restored(uuids)
            | ActionOutcome::DeletedPermanently(uuids) => {
                let options = self.model.ui.view_options();
                self.model.drive.remove_items(&uuids, options);
                self.clamp_list_cursor();
            }

            ActionOutcome::Favorited { uuids, favorite } => {
                let options = self.model.ui.view_options();
                self.model.drive.set_favorited(&uuids, favorite, options);
                self.clamp_list_cursor();
            }

            ActionOutcome::Shared { count, email } => {
                let noun = if count == 1 { "item" } else { "items" };
                self.model
                    .show_toast(Toast::success(format!("Shared {} {} with {}", count, noun, email)));
            }

            ActionOutcome::DownloadStarted { count } => {
                let noun = if count == 1 { "item" } else { "items" };
                self.model
                    .show_toast(Toast::info(format!("Downloading {} {}", count, noun)));
            }

            ActionOutcome::ContactsUpdated(snapshot) => self.apply_contacts_snapshot(snapshot),

            ActionOutcome::LinkResolved(state) => self.apply_link_state(state),
        }
    }

    fn apply_link_state(&mut self, state: LinkState) {
        self.model.drive.link = Some(state.clone());
        match state {
            LinkState::Ready {
                uuid,
                key,
                password,
                info,
            } => {
                info!("Public link {} unlocked: {}", uuid, info.name);
                self.model
                    .drive
                    .names
                    .insert(info.parent.clone(), info.name.clone());
                self.model.navigation.replace(Location::PublicLink {
                    link_uuid: uuid,
                    key,
                    password,
                    path: vec![info.parent],
                });
                self.load_listing(crate::services::Priority::High);
            }
            LinkState::NeedsPassword { .. } => {
                self.model.drive.loading = false;
                self.model.show_toast(Toast::error(
                    "This link is password protected (R to retry)",
                    self.config.error_toast_ms,
                ));
            }
            LinkState::Invalid => {
                warn!("Public link is invalid or disabled");
                self.model.drive.loading = false;
                self.model.show_toast(Toast::error(
                    "This link is invalid or no longer shared",
                    self.config.error_toast_ms,
                ));
            }
        }
    }

    fn cache_name(&self, uuid: &str, name: &str) {
        if let Err(e) = self.cache.save_directory_name(uuid, name) {
            warn!("Failed to cache name of {}: {:#}", uuid, e);
        }
    }

    fn clamp_list_cursor(&mut self) {
        let len = self.model.list_len();
        self.model.navigation.cursor =
            crate::logic::navigation::clamp_cursor(self.model.navigation.cursor, len);
    }

    /// Start a keyboard move session holding `targets`
    pub(crate) fn start_drag_with(&mut self, targets: Vec<DriveItem>) {
        if targets.is_empty() || !matches!(self.model.navigation.location, Location::Drive(_)) {
            return;
        }
        let session = DragSession::start(&targets, 0);
        debug!("Holding {} items to move", session.items().len());
        self.model.ui.drag = Some(session);
        self.model.ui.drop_hover = None;
    }
}
