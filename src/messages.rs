//! Typed messages between background tasks and the UI loop
//!
//! Message sources:
//! - Key bindings and menus (`Command`), replacing a string-keyed event bus
//! - Spawned action tasks (`ActionReport`)
//!
//! Both travel on unbounded mpsc channels drained once per frame.

use crate::api::DriveItem;
use crate::logic::public_link::LinkState;
use crate::model::{Location, Toast};
use crate::services::queries::ContactsSnapshot;

/// Requests any part of the app may raise; one handler owns each
#[derive(Debug, Clone)]
pub enum Command {
    /// Prompt for a name and create a folder in the current directory
    CreateFolder,
    OpenPreview(DriveItem),
    Navigate(Location),
    RefetchContacts,
    ShowToast(Toast),
    /// Remove a toast by id
    DismissToast(u64),
}

/// What a finished action changed
#[derive(Debug)]
pub enum ActionOutcome {
    /// The user backed out of a prompt; nothing was sent
    Cancelled,
    FolderCreated(DriveItem),
    Renamed {
        uuid: String,
        /// Applied name; the original when nothing changed
        name: String,
        is_directory: bool,
    },
    Moved {
        uuids: Vec<String>,
        parent: String,
    },
    Trashed(Vec<String>),
    Restored(Vec<String>),
    DeletedPermanently(Vec<String>),
    Favorited {
        uuids: Vec<String>,
        favorite: bool,
    },
    Shared {
        count: usize,
        email: String,
    },
    DownloadStarted {
        count: usize,
    },
    ContactsUpdated(ContactsSnapshot),
    LinkResolved(LinkState),
}

/// Result of a spawned action, tagged with the ticket it was started under
#[derive(Debug)]
pub struct ActionReport {
    pub ticket: u64,
    pub label: &'static str,
    pub result: anyhow::Result<ActionOutcome>,
}
