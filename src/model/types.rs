//! Shared types for the Model
//!
//! These types are used across multiple sub-models and represent
//! fundamental domain concepts.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::api::{BlockedContact, Contact, ContactRequest, DriveItem, ListingSource};
use crate::logic::actions::{
    ContactAction, ContactRowKind, ConfirmDialog, InputDialog, ItemAction, MenuScope,
};
use crate::logic::contacts::ContactView;
use crate::logic::drag::PendingRemoval;
use crate::logic::ui::SUCCESS_TOAST_MS;
use crate::services::dialogs::DialogRequest;

/// Vim command state for tracking double-key commands like 'gg'
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VimCommandState {
    None,
    WaitingForSecondG, // First 'g' pressed, waiting for second 'g'
}

/// Which pane receives list navigation keys
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    List,
}

/// Where the list pane is looking
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Location {
    /// Directory path as uuids, outermost first
    Drive(Vec<String>),
    Favorites,
    Recents,
    SharedIn,
    SharedOut,
    Trash,
    Contacts(ContactView),
    /// A public directory link, browsed read-only
    PublicLink {
        link_uuid: String,
        key: String,
        password: Option<String>,
        path: Vec<String>,
    },
}

impl Location {
    pub fn is_trash(&self) -> bool {
        matches!(self, Location::Trash)
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self, Location::PublicLink { .. })
    }

    pub fn is_contacts(&self) -> bool {
        matches!(self, Location::Contacts(_))
    }

    pub fn contact_view(&self) -> Option<ContactView> {
        match self {
            Location::Contacts(view) => Some(*view),
            _ => None,
        }
    }

    pub fn menu_scope(&self) -> MenuScope {
        match self {
            Location::Trash => MenuScope::Trash,
            Location::PublicLink { .. } => MenuScope::ReadOnly,
            _ => MenuScope::Drive,
        }
    }

    /// The directory new folders are created in
    pub fn current_directory(&self) -> Option<&str> {
        match self {
            Location::Drive(path) => path.last().map(String::as_str),
            _ => None,
        }
    }

    /// Worker listing backing this location; `None` for contacts or an
    /// unresolved root
    pub fn listing_source(&self) -> Option<ListingSource> {
        match self {
            Location::Drive(path) => path.last().map(|uuid| ListingSource::Directory(uuid.clone())),
            Location::Favorites => Some(ListingSource::Favorites),
            Location::Recents => Some(ListingSource::Recents),
            Location::SharedIn => Some(ListingSource::SharedIn),
            Location::SharedOut => Some(ListingSource::SharedOut),
            Location::Trash => Some(ListingSource::Trash),
            Location::Contacts(_) => None,
            Location::PublicLink {
                link_uuid,
                key,
                password,
                path,
            } => path.last().map(|parent| ListingSource::PublicLink {
                link_uuid: link_uuid.clone(),
                parent: parent.clone(),
                key: key.clone(),
                password: password.clone(),
            }),
        }
    }

    /// Location after opening `directory`; trashed directories cannot be entered
    pub fn enter(&self, directory: &DriveItem) -> Option<Location> {
        if !directory.is_directory() {
            return None;
        }

        match self {
            Location::Trash | Location::Contacts(_) => None,
            Location::Drive(path) => {
                let mut path = path.clone();
                path.push(directory.uuid.clone());
                Some(Location::Drive(path))
            }
            Location::Favorites | Location::Recents | Location::SharedIn | Location::SharedOut => {
                Some(Location::Drive(vec![directory.uuid.clone()]))
            }
            Location::PublicLink {
                link_uuid,
                key,
                password,
                path,
            } => {
                let mut path = path.clone();
                path.push(directory.uuid.clone());
                Some(Location::PublicLink {
                    link_uuid: link_uuid.clone(),
                    key: key.clone(),
                    password: password.clone(),
                    path,
                })
            }
        }
    }

    /// One directory up, if there is one
    pub fn parent(&self) -> Option<Location> {
        match self {
            Location::Drive(path) if path.len() > 1 => {
                Some(Location::Drive(path[..path.len() - 1].to_vec()))
            }
            Location::PublicLink {
                link_uuid,
                key,
                password,
                path,
            } if path.len() > 1 => Some(Location::PublicLink {
                link_uuid: link_uuid.clone(),
                key: key.clone(),
                password: password.clone(),
                path: path[..path.len() - 1].to_vec(),
            }),
            _ => None,
        }
    }

    pub fn sidebar_entry(&self) -> Option<SidebarEntry> {
        match self {
            Location::Drive(_) => Some(SidebarEntry::Drive),
            Location::Favorites => Some(SidebarEntry::Favorites),
            Location::Recents => Some(SidebarEntry::Recents),
            Location::SharedIn => Some(SidebarEntry::SharedIn),
            Location::SharedOut => Some(SidebarEntry::SharedOut),
            Location::Trash => Some(SidebarEntry::Trash),
            Location::Contacts(_) => Some(SidebarEntry::Contacts),
            Location::PublicLink { .. } => None,
        }
    }

    /// Breadcrumb segments, resolving directory uuids through `names`
    pub fn breadcrumb(&self, names: &HashMap<String, String>) -> Vec<String> {
        let resolve = |uuid: &String| names.get(uuid).cloned().unwrap_or_else(|| "…".to_string());

        match self {
            Location::Drive(path) | Location::PublicLink { path, .. } => {
                path.iter().map(resolve).collect()
            }
            Location::Favorites => vec!["Favorites".to_string()],
            Location::Recents => vec!["Recents".to_string()],
            Location::SharedIn => vec!["Shared with me".to_string()],
            Location::SharedOut => vec!["Shared by me".to_string()],
            Location::Trash => vec!["Trash".to_string()],
            Location::Contacts(view) => vec!["Contacts".to_string(), view.label().to_string()],
        }
    }
}

/// Entries of the left sidebar
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SidebarEntry {
    Drive,
    Recents,
    Favorites,
    SharedIn,
    SharedOut,
    Trash,
    Contacts,
}

impl SidebarEntry {
    pub const ALL: [SidebarEntry; 7] = [
        SidebarEntry::Drive,
        SidebarEntry::Recents,
        SidebarEntry::Favorites,
        SidebarEntry::SharedIn,
        SidebarEntry::SharedOut,
        SidebarEntry::Trash,
        SidebarEntry::Contacts,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SidebarEntry::Drive => "Drive",
            SidebarEntry::Recents => "Recents",
            SidebarEntry::Favorites => "Favorites",
            SidebarEntry::SharedIn => "Shared with me",
            SidebarEntry::SharedOut => "Shared by me",
            SidebarEntry::Trash => "Trash",
            SidebarEntry::Contacts => "Contacts",
        }
    }

    pub fn location(&self, root_uuid: Option<&str>) -> Location {
        match self {
            SidebarEntry::Drive => {
                Location::Drive(root_uuid.map(str::to_string).into_iter().collect())
            }
            SidebarEntry::Recents => Location::Recents,
            SidebarEntry::Favorites => Location::Favorites,
            SidebarEntry::SharedIn => Location::SharedIn,
            SidebarEntry::SharedOut => Location::SharedOut,
            SidebarEntry::Trash => Location::Trash,
            SidebarEntry::Contacts => Location::Contacts(ContactView::All),
        }
    }
}

static NEXT_TOAST_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
    Loading,
    Error,
}

/// Transient notification; `duration_ms: None` stays until dismissed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
    pub duration_ms: Option<u64>,
}

impl Toast {
    fn new(kind: ToastKind, message: impl Into<String>, duration_ms: Option<u64>) -> Self {
        Self {
            id: NEXT_TOAST_ID.fetch_add(1, Ordering::Relaxed),
            kind,
            message: message.into(),
            duration_ms,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, message, Some(SUCCESS_TOAST_MS))
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Info, message, Some(SUCCESS_TOAST_MS))
    }

    pub fn loading(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Loading, message, None)
    }

    pub fn error(message: impl Into<String>, duration_ms: u64) -> Self {
        Self::new(ToastKind::Error, message, Some(duration_ms))
    }
}

/// Modal prompt being shown; the responder stays with the runtime
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DialogState {
    Confirm { dialog: ConfirmDialog },
    Input { dialog: InputDialog, buffer: String },
}

impl DialogState {
    pub fn from_request(request: &DialogRequest) -> Self {
        match request {
            DialogRequest::Confirm { dialog, .. } => DialogState::Confirm {
                dialog: dialog.clone(),
            },
            DialogRequest::Input { dialog, .. } => DialogState::Input {
                dialog: dialog.clone(),
                buffer: dialog.value.clone(),
            },
        }
    }
}

/// One row of the contacts list
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContactRow {
    Contact(Contact),
    RequestIn(ContactRequest),
    RequestOut(ContactRequest),
    Blocked(BlockedContact),
}

impl ContactRow {
    pub fn kind(&self) -> ContactRowKind {
        match self {
            ContactRow::Contact(_) => ContactRowKind::Contact,
            ContactRow::RequestIn(_) => ContactRowKind::RequestIn,
            ContactRow::RequestOut(_) => ContactRowKind::RequestOut,
            ContactRow::Blocked(_) => ContactRowKind::Blocked,
        }
    }

    pub fn uuid(&self) -> &str {
        match self {
            ContactRow::Contact(c) => &c.uuid,
            ContactRow::RequestIn(r) | ContactRow::RequestOut(r) => &r.uuid,
            ContactRow::Blocked(b) => &b.uuid,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            ContactRow::Contact(c) => &c.email,
            ContactRow::RequestIn(r) | ContactRow::RequestOut(r) => &r.email,
            ContactRow::Blocked(b) => &b.email,
        }
    }

    pub fn nick_name(&self) -> &str {
        match self {
            ContactRow::Contact(c) => &c.nick_name,
            ContactRow::RequestIn(r) | ContactRow::RequestOut(r) => &r.nick_name,
            ContactRow::Blocked(b) => &b.nick_name,
        }
    }
}

/// Entry of a context menu
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuEntry {
    Item(ItemAction),
    Contact(ContactAction),
}

impl MenuEntry {
    pub fn label(&self) -> &'static str {
        match self {
            MenuEntry::Item(action) => action.label(),
            MenuEntry::Contact(action) => action.label(),
        }
    }

    pub fn is_destructive(&self) -> bool {
        match self {
            MenuEntry::Item(action) => action.is_destructive(),
            MenuEntry::Contact(action) => matches!(
                action,
                ContactAction::RemoveContact | ContactAction::Block | ContactAction::Deny
            ),
        }
    }
}

/// What a context menu was opened on
#[derive(Clone, Debug, PartialEq)]
pub enum MenuTarget {
    Items(Vec<DriveItem>),
    Background,
    Contact(Option<ContactRow>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ContextMenuState {
    pub target: MenuTarget,
    pub entries: Vec<MenuEntry>,
    pub cursor: usize,
    /// Screen cell the menu opens at
    pub anchor: (u16, u16),
}

impl ContextMenuState {
    pub fn selected_entry(&self) -> Option<MenuEntry> {
        self.entries.get(self.cursor).copied()
    }
}

/// A move sent to the worker whose rows were removed ahead of the answer
#[derive(Clone, Debug, PartialEq)]
pub struct PendingMove {
    /// Listing the rows were removed from
    pub source: ListingSource,
    pub removal: PendingRemoval,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ItemType;

    fn directory(uuid: &str) -> DriveItem {
        DriveItem {
            uuid: uuid.to_string(),
            name: uuid.to_string(),
            item_type: ItemType::Directory,
            size: 0,
            last_modified: 0,
            favorited: false,
            parent: String::new(),
            sharer_id: 0,
            sharer_email: String::new(),
            receiver_id: 0,
            receiver_email: String::new(),
            receivers: vec![],
            selected: false,
        }
    }

    #[test]
    fn test_enter_and_parent() {
        let root = Location::Drive(vec!["root".to_string()]);
        let child = root.enter(&directory("docs")).unwrap();
        assert_eq!(
            child,
            Location::Drive(vec!["root".to_string(), "docs".to_string()])
        );
        assert_eq!(child.parent(), Some(root.clone()));
        assert_eq!(root.parent(), None);
    }

    #[test]
    fn test_trash_directories_cannot_be_entered() {
        assert!(Location::Trash.enter(&directory("old")).is_none());
    }

    #[test]
    fn test_listing_source_needs_root() {
        assert_eq!(Location::Drive(vec![]).listing_source(), None);
        assert_eq!(
            SidebarEntry::Drive.location(Some("root")).listing_source(),
            Some(ListingSource::Directory("root".to_string()))
        );
    }

    #[test]
    fn test_public_link_is_read_only() {
        let link = Location::PublicLink {
            link_uuid: "l".to_string(),
            key: "k".to_string(),
            password: None,
            path: vec!["p".to_string()],
        };
        assert!(link.is_read_only());
        assert_eq!(link.menu_scope(), MenuScope::ReadOnly);
        assert_eq!(link.current_directory(), None);
    }

    #[test]
    fn test_breadcrumb_resolves_names() {
        let mut names = HashMap::new();
        names.insert("root".to_string(), "Drive".to_string());
        names.insert("docs".to_string(), "Docs".to_string());
        let location = Location::Drive(vec![
            "root".to_string(),
            "docs".to_string(),
            "unknown".to_string(),
        ]);
        assert_eq!(location.breadcrumb(&names), vec!["Drive", "Docs", "…"]);
    }

    #[test]
    fn test_toast_ids_are_unique() {
        let a = Toast::success("a");
        let b = Toast::loading("b");
        assert_ne!(a.id, b.id);
        assert_eq!(b.duration_ms, None);
    }
}
