//! User actions against the worker
//!
//! Each action is an async function generic over the worker and the prompt,
//! so it can be spawned from the UI loop and driven by fakes in tests. An
//! action that needs an answer suspends on the prompt; a cancelled prompt is
//! `ActionOutcome::Cancelled`, never an error. Failures propagate to the
//! caller, which logs them centrally.

use anyhow::Result;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use crate::api::{DriveItem, Worker};
use crate::logic::actions::{
    download_plan, resolve_rename, ConfirmDialog, DownloadPlan, InputDialog,
};
use crate::logic::contacts::ContactView;
use crate::logic::drag::MoveRequest;
use crate::logic::errors::format_error_message;
use crate::logic::public_link::{resolve_status, LinkAccess, LinkState, ParsedLink};
use crate::messages::{ActionOutcome, Command};
use crate::model::{Location, Toast};
use crate::services::dialogs::Prompt;
use crate::services::queries::refetch_all;

fn uuids(items: &[DriveItem]) -> Vec<String> {
    items.iter().map(|item| item.uuid.clone()).collect()
}

/// Trimmed non-empty input, or `None` when cancelled or blank
async fn ask<P: Prompt>(prompt: &P, dialog: InputDialog) -> Option<String> {
    let value = prompt.input(dialog).await.value()?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

pub async fn create_folder<W: Worker, P: Prompt>(
    worker: &W,
    prompt: &P,
    parent: &str,
) -> Result<ActionOutcome> {
    let Some(name) = ask(prompt, InputDialog::new_folder()).await else {
        return Ok(ActionOutcome::Cancelled);
    };

    let created = worker.create_directory(&name, parent).await?;
    info!("Created folder {} ({})", created.name, created.uuid);
    Ok(ActionOutcome::FolderCreated(created))
}

/// Rename one entry. Cancelling, or typing the same name in another case,
/// leaves the entry untouched and reports the original name.
pub async fn rename<W: Worker, P: Prompt>(
    worker: &W,
    prompt: &P,
    item: &DriveItem,
) -> Result<ActionOutcome> {
    let response = prompt.input(InputDialog::rename(&item.name)).await;

    let name = match resolve_rename(&item.name, &response) {
        Some(name) => {
            worker.rename_item(item, &name).await?;
            name
        }
        None => {
            debug!("Rename of {} is a no-op", item.uuid);
            item.name.clone()
        }
    };

    Ok(ActionOutcome::Renamed {
        uuid: item.uuid.clone(),
        name,
        is_directory: item.is_directory(),
    })
}

pub async fn move_items<W: Worker>(worker: &W, request: &MoveRequest) -> Result<ActionOutcome> {
    worker.move_items(&request.items, &request.parent).await?;
    Ok(ActionOutcome::Moved {
        uuids: uuids(&request.items),
        parent: request.parent.clone(),
    })
}

pub async fn trash<W: Worker, P: Prompt>(
    worker: &W,
    prompt: &P,
    items: &[DriveItem],
) -> Result<ActionOutcome> {
    if !prompt.confirm(ConfirmDialog::trash(items.len())).await {
        return Ok(ActionOutcome::Cancelled);
    }

    worker.trash_items(items).await?;
    Ok(ActionOutcome::Trashed(uuids(items)))
}

pub async fn restore<W: Worker>(worker: &W, items: &[DriveItem]) -> Result<ActionOutcome> {
    worker.restore_items(items).await?;
    Ok(ActionOutcome::Restored(uuids(items)))
}

pub async fn delete_permanently<W: Worker, P: Prompt>(
    worker: &W,
    prompt: &P,
    items: &[DriveItem],
) -> Result<ActionOutcome> {
    if !prompt
        .confirm(ConfirmDialog::delete_permanently(items.len()))
        .await
    {
        return Ok(ActionOutcome::Cancelled);
    }

    worker.delete_items_permanently(items).await?;
    Ok(ActionOutcome::DeletedPermanently(uuids(items)))
}

pub async fn favorite<W: Worker>(
    worker: &W,
    items: &[DriveItem],
    favorite: bool,
) -> Result<ActionOutcome> {
    worker.favorite_items(items, favorite).await?;
    Ok(ActionOutcome::Favorited {
        uuids: uuids(items),
        favorite,
    })
}

pub async fn share<W: Worker, P: Prompt>(
    worker: &W,
    prompt: &P,
    items: &[DriveItem],
    request_uuid: Option<&str>,
) -> Result<ActionOutcome> {
    let Some(email) = ask(prompt, InputDialog::share()).await else {
        return Ok(ActionOutcome::Cancelled);
    };

    worker.share_items_to_user(items, &email, request_uuid).await?;
    Ok(ActionOutcome::Shared {
        count: items.len(),
        email,
    })
}

/// One file, one directory, or several entries as a zip
pub async fn download<W: Worker>(worker: &W, items: &[DriveItem]) -> Result<ActionOutcome> {
    match download_plan(items) {
        None => return Ok(ActionOutcome::Cancelled),
        Some(DownloadPlan::File(item)) => worker.download_file(&item).await?,
        Some(DownloadPlan::Directory { uuid, name }) => {
            worker.download_directory(&uuid, &name).await?
        }
        Some(DownloadPlan::Zip(items)) => worker.download_as_zip(&items).await?,
    }

    Ok(ActionOutcome::DownloadStarted { count: items.len() })
}

/// Ask for an email and send a contact request.
///
/// A loading toast covers the worker call and is always dismissed. On
/// success every contacts query is refetched and the view moves to the
/// outgoing requests; a failure shows an error toast.
pub async fn send_contact_request<W: Worker, P: Prompt>(
    worker: &W,
    prompt: &P,
    commands: &UnboundedSender<Command>,
    error_toast_ms: u64,
) -> Result<ActionOutcome> {
    let Some(email) = ask(prompt, InputDialog::contact_request()).await else {
        return Ok(ActionOutcome::Cancelled);
    };

    let loading = Toast::loading(format!("Sending request to {}", email));
    let loading_id = loading.id;
    let _ = commands.send(Command::ShowToast(loading));

    let result = worker.contacts_request_send(&email).await;
    let _ = commands.send(Command::DismissToast(loading_id));

    match result {
        Ok(()) => {
            let snapshot = refetch_all(worker).await;
            let _ = commands.send(Command::Navigate(Location::Contacts(
                ContactView::RequestsOut,
            )));
            Ok(ActionOutcome::ContactsUpdated(snapshot))
        }
        Err(e) => {
            let _ = commands.send(Command::ShowToast(Toast::error(
                format_error_message(&e),
                error_toast_ms,
            )));
            Err(e)
        }
    }
}

pub async fn accept_request<W: Worker>(worker: &W, uuid: &str) -> Result<ActionOutcome> {
    worker.contacts_request_accept(uuid).await?;
    Ok(ActionOutcome::ContactsUpdated(refetch_all(worker).await))
}

pub async fn deny_request<W: Worker>(worker: &W, uuid: &str) -> Result<ActionOutcome> {
    worker.contacts_request_deny(uuid).await?;
    Ok(ActionOutcome::ContactsUpdated(refetch_all(worker).await))
}

/// Withdraw an outgoing request
pub async fn remove_request<W: Worker>(worker: &W, uuid: &str) -> Result<ActionOutcome> {
    worker.contacts_request_remove(uuid).await?;
    Ok(ActionOutcome::ContactsUpdated(refetch_all(worker).await))
}

pub async fn remove_contact<W: Worker, P: Prompt>(
    worker: &W,
    prompt: &P,
    uuid: &str,
    email: &str,
) -> Result<ActionOutcome> {
    if !prompt.confirm(ConfirmDialog::remove_contact(email)).await {
        return Ok(ActionOutcome::Cancelled);
    }

    worker.contacts_remove(uuid).await?;
    Ok(ActionOutcome::ContactsUpdated(refetch_all(worker).await))
}

pub async fn block_contact<W: Worker, P: Prompt>(
    worker: &W,
    prompt: &P,
    email: &str,
) -> Result<ActionOutcome> {
    if !prompt.confirm(ConfirmDialog::block_contact(email)).await {
        return Ok(ActionOutcome::Cancelled);
    }

    worker.contacts_block(email).await?;
    Ok(ActionOutcome::ContactsUpdated(refetch_all(worker).await))
}

pub async fn unblock_contact<W: Worker>(worker: &W, uuid: &str) -> Result<ActionOutcome> {
    worker.contacts_unblock(uuid).await?;
    Ok(ActionOutcome::ContactsUpdated(refetch_all(worker).await))
}

/// Look up a public link and unlock it if it has a password.
///
/// A cancelled or rejected password leaves the link waiting for one.
pub async fn resolve_link<W: Worker, P: Prompt>(
    worker: &W,
    prompt: &P,
    link: &ParsedLink,
) -> Result<ActionOutcome> {
    let status = worker.public_link_status(&link.uuid).await?;

    let state = match resolve_status(link, &status) {
        LinkAccess::Invalid => LinkState::Invalid,
        LinkAccess::Open { uuid, key } => {
            let info = worker.public_link_info(&uuid, None, &key).await?;
            LinkState::Ready {
                uuid,
                key,
                password: None,
                info,
            }
        }
        LinkAccess::NeedsPassword { uuid, key } => {
            match prompt.input(InputDialog::link_password()).await.value() {
                None => LinkState::NeedsPassword { uuid, key },
                Some(password) => {
                    match worker.public_link_info(&uuid, Some(&password), &key).await {
                        Ok(info) => LinkState::Ready {
                            uuid,
                            key,
                            password: Some(password),
                            info,
                        },
                        Err(e) => {
                            warn!("Failed to unlock link {}: {:#}", uuid, e);
                            LinkState::NeedsPassword { uuid, key }
                        }
                    }
                }
            }
        }
    };

    Ok(ActionOutcome::LinkResolved(state))
}
