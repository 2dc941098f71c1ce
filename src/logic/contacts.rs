//! Contact list derivation
//!
//! Pure functions turning a raw contact partition, a view preset and a search
//! term into the displayed sequence. Nothing here depends on rendering; the UI
//! recomputes the view whenever any input changes.

use crate::api::{BlockedContact, Contact, ContactRequest, Conversation};
use crate::logic::search::normalize_term;
use std::cmp::Ordering;

/// Named partition/sort preset for the contacts screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactView {
    All,
    Online,
    Offline,
    RequestsIn,
    RequestsOut,
    Blocked,
}

impl ContactView {
    pub const ALL: [ContactView; 6] = [
        ContactView::All,
        ContactView::Online,
        ContactView::Offline,
        ContactView::RequestsIn,
        ContactView::RequestsOut,
        ContactView::Blocked,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ContactView::All => "All",
            ContactView::Online => "Online",
            ContactView::Offline => "Offline",
            ContactView::RequestsIn => "Incoming",
            ContactView::RequestsOut => "Outgoing",
            ContactView::Blocked => "Blocked",
        }
    }

    pub fn is_request_view(&self) -> bool {
        matches!(self, ContactView::RequestsIn | ContactView::RequestsOut)
    }
}

/// Fields shared by every contact-shaped record
pub trait ContactLike {
    fn uuid(&self) -> &str;
    fn email(&self) -> &str;
    fn nick_name(&self) -> &str;
}

macro_rules! impl_contact_like {
    ($($ty:ty),*) => {
        $(impl ContactLike for $ty {
            fn uuid(&self) -> &str {
                &self.uuid
            }
            fn email(&self) -> &str {
                &self.email
            }
            fn nick_name(&self) -> &str {
                &self.nick_name
            }
        })*
    };
}

impl_contact_like!(Contact, ContactRequest, BlockedContact);

/// Whether a contact was active inside the online window
pub fn is_online(contact: &Contact, now_ms: u64, online_timeout_ms: u64) -> bool {
    contact.last_active > now_ms.saturating_sub(online_timeout_ms)
}

/// Email descending, uuid as the final tie-break
fn by_email_desc<T: ContactLike>(a: &T, b: &T) -> Ordering {
    b.email()
        .to_lowercase()
        .cmp(&a.email().to_lowercase())
        .then_with(|| b.email().cmp(a.email()))
        .then_with(|| a.uuid().cmp(b.uuid()))
}

/// Plain substring on email or nick name; wildcards are literal here
fn matches_search<T: ContactLike>(record: &T, term: &str) -> bool {
    record.email().to_lowercase().contains(term) || record.nick_name().to_lowercase().contains(term)
}

fn apply_search<T: ContactLike>(records: Vec<T>, search: &str) -> Vec<T> {
    match normalize_term(search) {
        Some(term) => records
            .into_iter()
            .filter(|record| matches_search(record, &term))
            .collect(),
        None => records,
    }
}

/// Derive the displayed contacts for the All/Online/Offline presets.
///
/// Request and blocked views have their own partitions; passing them here
/// falls back to the `All` ordering.
pub fn derive_contacts(
    raw: &[Contact],
    view: ContactView,
    search: &str,
    now_ms: u64,
    online_timeout_ms: u64,
) -> Vec<Contact> {
    let mut contacts: Vec<Contact> = match view {
        ContactView::Online => raw
            .iter()
            .filter(|c| is_online(c, now_ms, online_timeout_ms))
            .cloned()
            .collect(),
        ContactView::Offline => raw
            .iter()
            .filter(|c| !is_online(c, now_ms, online_timeout_ms))
            .cloned()
            .collect(),
        _ => raw.to_vec(),
    };

    if view == ContactView::Online {
        contacts.sort_by(|a, b| {
            b.last_active
                .cmp(&a.last_active)
                .then_with(|| by_email_desc(a, b))
        });
    } else {
        contacts.sort_by(by_email_desc);
    }

    apply_search(contacts, search)
}

/// Derive incoming/outgoing request lists (email descending, then search)
pub fn derive_requests(raw: &[ContactRequest], search: &str) -> Vec<ContactRequest> {
    let mut requests = raw.to_vec();
    requests.sort_by(by_email_desc);
    apply_search(requests, search)
}

/// Derive the blocked list (email descending, then search)
pub fn derive_blocked(raw: &[BlockedContact], search: &str) -> Vec<BlockedContact> {
    let mut blocked = raw.to_vec();
    blocked.sort_by(by_email_desc);
    apply_search(blocked, search)
}

/// Whether a chat with this email already exists
pub fn has_conversation(conversations: &[Conversation], email: &str) -> bool {
    conversations.iter().any(|conversation| {
        conversation
            .participants
            .iter()
            .any(|p| p.email.eq_ignore_ascii_case(email))
    })
}
