//! Contacts Model
//!
//! The five polled contact queries and the rows derived from them for the
//! current view.

use super::types::ContactRow;
use crate::api::{BlockedContact, Contact, ContactRequest, Conversation};
use crate::logic::contacts::{
    derive_blocked, derive_contacts, derive_requests, has_conversation, ContactView,
};
use crate::services::queries::QueryState;

#[derive(Clone, Debug, Default)]
pub struct ContactsModel {
    pub all: QueryState<Vec<Contact>>,
    pub requests_in: QueryState<Vec<ContactRequest>>,
    pub requests_out: QueryState<Vec<ContactRequest>>,
    pub blocked: QueryState<Vec<BlockedContact>>,
    pub conversations: QueryState<Vec<Conversation>>,

    /// Rows of the current view, in display order
    pub rows: Vec<ContactRow>,
}

impl ContactsModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute `rows` for `view`
    pub fn derive_rows(
        &mut self,
        view: ContactView,
        search: &str,
        now_ms: u64,
        online_timeout_ms: u64,
    ) {
        self.rows = match view {
            ContactView::All | ContactView::Online | ContactView::Offline => {
                derive_contacts(self.all.rows(), view, search, now_ms, online_timeout_ms)
                    .into_iter()
                    .map(ContactRow::Contact)
                    .collect()
            }
            ContactView::RequestsIn => derive_requests(self.requests_in.rows(), search)
                .into_iter()
                .map(ContactRow::RequestIn)
                .collect(),
            ContactView::RequestsOut => derive_requests(self.requests_out.rows(), search)
                .into_iter()
                .map(ContactRow::RequestOut)
                .collect(),
            ContactView::Blocked => derive_blocked(self.blocked.rows(), search)
                .into_iter()
                .map(ContactRow::Blocked)
                .collect(),
        };
    }

    /// Count shown next to a view tab
    pub fn count(&self, view: ContactView) -> usize {
        match view {
            ContactView::All | ContactView::Online | ContactView::Offline => self.all.rows().len(),
            ContactView::RequestsIn => self.requests_in.rows().len(),
            ContactView::RequestsOut => self.requests_out.rows().len(),
            ContactView::Blocked => self.blocked.rows().len(),
        }
    }

    pub fn has_conversation(&self, email: &str) -> bool {
        has_conversation(self.conversations.rows(), email)
    }

    /// First query error, if any
    pub fn error(&self) -> Option<&str> {
        [
            &self.all.error,
            &self.requests_in.error,
            &self.requests_out.error,
            &self.blocked.error,
            &self.conversations.error,
        ]
        .into_iter()
        .find_map(|error| error.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(uuid: &str, email: &str) -> ContactRequest {
        ContactRequest {
            uuid: uuid.to_string(),
            user_id: 0,
            email: email.to_string(),
            nick_name: String::new(),
        }
    }

    #[test]
    fn test_rows_empty_until_first_success() {
        let mut model = ContactsModel::new();
        model.derive_rows(ContactView::All, "", 0, 1000);
        assert!(model.rows.is_empty());
        assert!(model.error().is_none());
    }

    #[test]
    fn test_request_rows_are_tagged() {
        let mut model = ContactsModel::new();
        model
            .requests_in
            .apply(Ok(vec![request("1", "a@x.io"), request("2", "b@x.io")]), 1)
            .unwrap();

        model.derive_rows(ContactView::RequestsIn, "", 0, 1000);
        assert_eq!(model.rows.len(), 2);
        assert!(matches!(model.rows[0], ContactRow::RequestIn(_)));
        assert_eq!(model.rows[0].email(), "b@x.io");
        assert_eq!(model.count(ContactView::RequestsIn), 2);
    }
}
