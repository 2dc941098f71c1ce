//! Action menu contents and the pure halves of the actions
//!
//! Dialog descriptions, rename/download decisions and the menus offered per
//! location. The async side that talks to the worker lives in
//! `services::actions`.

use crate::api::DriveItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonVariant {
    Default,
    Destructive,
}

/// Yes/no prompt shown before destructive actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
    pub title: String,
    pub description: String,
    pub confirm_label: String,
    pub variant: ButtonVariant,
}

/// Single-line text prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDialog {
    pub title: String,
    pub confirm_label: String,
    /// Pre-filled value
    pub value: String,
    pub placeholder: String,
    /// Render the typed value masked
    pub secret: bool,
}

/// Result of an input prompt; cancelling is a value, not an error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogResponse {
    Cancelled,
    Value(String),
}

impl DialogResponse {
    pub fn value(self) -> Option<String> {
        match self {
            DialogResponse::Cancelled => None,
            DialogResponse::Value(value) => Some(value),
        }
    }
}

fn count_label(items: usize) -> String {
    if items == 1 {
        "1 item".to_string()
    } else {
        format!("{} items", items)
    }
}

impl ConfirmDialog {
    pub fn trash(items: usize) -> Self {
        Self {
            title: "Move to trash".to_string(),
            description: format!("Move {} to the trash?", count_label(items)),
            confirm_label: "Trash".to_string(),
            variant: ButtonVariant::Destructive,
        }
    }

    pub fn delete_permanently(items: usize) -> Self {
        Self {
            title: "Delete permanently".to_string(),
            description: format!(
                "Permanently delete {}? This cannot be undone.",
                count_label(items)
            ),
            confirm_label: "Delete".to_string(),
            variant: ButtonVariant::Destructive,
        }
    }

    pub fn remove_contact(email: &str) -> Self {
        Self {
            title: "Remove contact".to_string(),
            description: format!("Remove {} from your contacts?", email),
            confirm_label: "Remove".to_string(),
            variant: ButtonVariant::Destructive,
        }
    }

    pub fn block_contact(email: &str) -> Self {
        Self {
            title: "Block contact".to_string(),
            description: format!("Block {}? They will no longer be able to contact you.", email),
            confirm_label: "Block".to_string(),
            variant: ButtonVariant::Destructive,
        }
    }
}

impl InputDialog {
    pub fn new_folder() -> Self {
        Self {
            title: "New folder".to_string(),
            confirm_label: "Create".to_string(),
            value: String::new(),
            placeholder: "New folder".to_string(),
            secret: false,
        }
    }

    pub fn rename(current: &str) -> Self {
        Self {
            title: "Rename".to_string(),
            confirm_label: "Rename".to_string(),
            value: current.to_string(),
            placeholder: current.to_string(),
            secret: false,
        }
    }

    pub fn share() -> Self {
        Self {
            title: "Share".to_string(),
            confirm_label: "Share".to_string(),
            value: String::new(),
            placeholder: "Email".to_string(),
            secret: false,
        }
    }

    pub fn contact_request() -> Self {
        Self {
            title: "Add contact".to_string(),
            confirm_label: "Send request".to_string(),
            value: String::new(),
            placeholder: "Email".to_string(),
            secret: false,
        }
    }

    pub fn link_password() -> Self {
        Self {
            title: "Password required".to_string(),
            confirm_label: "Unlock".to_string(),
            value: String::new(),
            placeholder: "Password".to_string(),
            secret: true,
        }
    }
}

/// New name to apply, or `None` when the rename is a no-op.
///
/// A blank value is a cancel, and a value equal to the current name ignoring
/// case counts as unchanged.
///
/// # Examples
/// ```
/// use drivetui::logic::actions::{resolve_rename, DialogResponse};
///
/// let same = DialogResponse::Value("invoices".to_string());
/// assert_eq!(resolve_rename("Invoices", &same), None);
///
/// let new = DialogResponse::Value("Invoices 2024".to_string());
/// assert_eq!(resolve_rename("Invoices", &new), Some("Invoices 2024".to_string()));
///
/// assert_eq!(resolve_rename("Invoices", &DialogResponse::Cancelled), None);
/// assert_eq!(resolve_rename("Invoices", &DialogResponse::Value("  ".into())), None);
/// ```
pub fn resolve_rename(current: &str, response: &DialogResponse) -> Option<String> {
    match response {
        DialogResponse::Cancelled => None,
        DialogResponse::Value(value) if value.trim().is_empty() => None,
        DialogResponse::Value(value) if value.to_lowercase() == current.to_lowercase() => None,
        DialogResponse::Value(value) => Some(value.clone()),
    }
}

/// Which download call a set of items maps to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadPlan {
    File(DriveItem),
    Directory { uuid: String, name: String },
    Zip(Vec<DriveItem>),
}

pub fn download_plan(items: &[DriveItem]) -> Option<DownloadPlan> {
    match items {
        [] => None,
        [single] if single.is_directory() => Some(DownloadPlan::Directory {
            uuid: single.uuid.clone(),
            name: single.name.clone(),
        }),
        [single] => Some(DownloadPlan::File(single.clone())),
        many => Some(DownloadPlan::Zip(many.to_vec())),
    }
}

/// Insert a freshly created folder, replacing any row with the same uuid or
/// the same name ignoring case
pub fn merge_created_folder(items: &mut Vec<DriveItem>, created: DriveItem) {
    let name = created.name.to_lowercase();
    items.retain(|item| item.uuid != created.uuid && item.name.to_lowercase() != name);
    items.push(created);
}

/// Which set of actions a listing supports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuScope {
    /// Own drive, favorites, recents and shared listings
    Drive,
    Trash,
    /// Public link browsing
    ReadOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemAction {
    Open,
    Download,
    Share,
    Favorite,
    Unfavorite,
    Rename,
    Move,
    Trash,
    Restore,
    DeletePermanently,
    NewFolder,
}

impl ItemAction {
    pub fn label(&self) -> &'static str {
        match self {
            ItemAction::Open => "Open",
            ItemAction::Download => "Download",
            ItemAction::Share => "Share",
            ItemAction::Favorite => "Favorite",
            ItemAction::Unfavorite => "Unfavorite",
            ItemAction::Rename => "Rename",
            ItemAction::Move => "Move",
            ItemAction::Trash => "Trash",
            ItemAction::Restore => "Restore",
            ItemAction::DeletePermanently => "Delete permanently",
            ItemAction::NewFolder => "New folder",
        }
    }

    pub fn is_destructive(&self) -> bool {
        matches!(self, ItemAction::Trash | ItemAction::DeletePermanently)
    }
}

/// Menu for the given targets; an empty target set is the background menu
pub fn item_menu(scope: MenuScope, targets: &[DriveItem]) -> Vec<ItemAction> {
    if targets.is_empty() {
        return match scope {
            MenuScope::Drive => vec![ItemAction::NewFolder],
            MenuScope::Trash | MenuScope::ReadOnly => Vec::new(),
        };
    }

    let single = targets.len() == 1;

    match scope {
        MenuScope::Trash => vec![ItemAction::Restore, ItemAction::DeletePermanently],
        MenuScope::ReadOnly => {
            let mut actions = Vec::new();
            if single {
                actions.push(ItemAction::Open);
            }
            actions.push(ItemAction::Download);
            actions
        }
        MenuScope::Drive => {
            let mut actions = Vec::new();
            if single {
                actions.push(ItemAction::Open);
            }
            actions.push(ItemAction::Download);
            actions.push(ItemAction::Share);
            if targets.iter().all(|item| item.favorited) {
                actions.push(ItemAction::Unfavorite);
            } else {
                actions.push(ItemAction::Favorite);
            }
            if single {
                actions.push(ItemAction::Rename);
            }
            actions.push(ItemAction::Move);
            actions.push(ItemAction::Trash);
            actions
        }
    }
}

/// Which contact partition a row belongs to, for its menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactRowKind {
    Contact,
    RequestIn,
    RequestOut,
    Blocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactAction {
    SendRequest,
    Accept,
    Deny,
    RemoveRequest,
    RemoveContact,
    Block,
    Unblock,
}

impl ContactAction {
    pub fn label(&self) -> &'static str {
        match self {
            ContactAction::SendRequest => "Add contact",
            ContactAction::Accept => "Accept",
            ContactAction::Deny => "Deny",
            ContactAction::RemoveRequest => "Withdraw request",
            ContactAction::RemoveContact => "Remove",
            ContactAction::Block => "Block",
            ContactAction::Unblock => "Unblock",
        }
    }
}

/// Menu for a contact row, or the background menu when `row` is `None`
pub fn contact_menu(row: Option<ContactRowKind>) -> Vec<ContactAction> {
    match row {
        None => vec![ContactAction::SendRequest],
        Some(ContactRowKind::Contact) => vec![ContactAction::RemoveContact, ContactAction::Block],
        Some(ContactRowKind::RequestIn) => vec![
            ContactAction::Accept,
            ContactAction::Deny,
            ContactAction::Block,
        ],
        Some(ContactRowKind::RequestOut) => vec![ContactAction::RemoveRequest],
        Some(ContactRowKind::Blocked) => vec![ContactAction::Unblock],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ItemType;

    fn entry(uuid: &str, name: &str, item_type: ItemType) -> DriveItem {
        DriveItem {
            uuid: uuid.to_string(),
            name: name.to_string(),
            item_type,
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
    fn test_rename_case_only_change_is_noop() {
        let response = DialogResponse::Value("INVOICES".to_string());
        assert_eq!(resolve_rename("Invoices", &response), None);
    }

    #[test]
    fn test_download_plan() {
        let file = entry("f", "a.txt", ItemType::File);
        let dir = entry("d", "Docs", ItemType::Directory);

        assert_eq!(download_plan(&[]), None);
        assert_eq!(download_plan(&[file.clone()]), Some(DownloadPlan::File(file.clone())));
        assert_eq!(
            download_plan(&[dir.clone()]),
            Some(DownloadPlan::Directory {
                uuid: "d".to_string(),
                name: "Docs".to_string()
            })
        );
        assert!(matches!(
            download_plan(&[file, dir]),
            Some(DownloadPlan::Zip(items)) if items.len() == 2
        ));
    }

    #[test]
    fn test_merge_created_folder_replaces_same_name() {
        let mut items = vec![
            entry("1", "Photos", ItemType::Directory),
            entry("2", "notes.txt", ItemType::File),
        ];
        merge_created_folder(&mut items, entry("3", "photos", ItemType::Directory));

        let uuids: Vec<&str> = items.iter().map(|i| i.uuid.as_str()).collect();
        assert_eq!(uuids, vec!["2", "3"]);
    }

    #[test]
    fn test_trash_menu() {
        let targets = vec![entry("1", "a", ItemType::File)];
        assert_eq!(
            item_menu(MenuScope::Trash, &targets),
            vec![ItemAction::Restore, ItemAction::DeletePermanently]
        );
        assert!(item_menu(MenuScope::Trash, &[]).is_empty());
    }

    #[test]
    fn test_drive_menu_hides_rename_for_multi_selection() {
        let one = vec![entry("1", "a", ItemType::File)];
        let two = vec![entry("1", "a", ItemType::File), entry("2", "b", ItemType::File)];

        assert!(item_menu(MenuScope::Drive, &one).contains(&ItemAction::Rename));
        assert!(!item_menu(MenuScope::Drive, &two).contains(&ItemAction::Rename));
        assert_eq!(item_menu(MenuScope::Drive, &[]), vec![ItemAction::NewFolder]);
    }

    #[test]
    fn test_unfavorite_when_all_favorited() {
        let mut item = entry("1", "a", ItemType::File);
        item.favorited = true;
        assert!(item_menu(MenuScope::Drive, &[item]).contains(&ItemAction::Unfavorite));
    }

    #[test]
    fn test_read_only_menu_has_no_mutations() {
        let targets = vec![entry("1", "a", ItemType::File)];
        let menu = item_menu(MenuScope::ReadOnly, &targets);
        assert!(menu.iter().all(|a| !a.is_destructive()));
        assert!(!menu.contains(&ItemAction::Rename));
    }

    #[test]
    fn test_contact_menus() {
        assert_eq!(contact_menu(None), vec![ContactAction::SendRequest]);
        assert_eq!(
            contact_menu(Some(ContactRowKind::Blocked)),
            vec![ContactAction::Unblock]
        );
    }
}
