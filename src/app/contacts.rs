//! Contacts methods
//!
//! Polling the contact queries, applying their results and keeping the
//! rows of the contacts view current.

use std::time::Instant;
use tracing::{debug, warn};

use crate::logic;
use crate::services::api::ApiRequest;
use crate::services::queries::{self, ContactsSnapshot, QueryKey, QueryResult};
use crate::App;

impl App {
    /// Request every polled query whose interval elapsed
    pub(crate) fn poll_due_queries(&mut self, now: Instant) {
        for key in self.poll_schedule.due(now) {
            debug!("Polling query {}", key.as_str());
            let _ = self.api_tx.send(ApiRequest::FetchQuery { key });
            self.poll_schedule.mark(key, now);
        }
    }

    /// Refresh all five queries together, restarting their intervals
    pub(crate) fn request_contacts_refetch(&mut self) {
        self.poll_schedule.mark_all(Instant::now());
        let _ = self.api_tx.send(ApiRequest::RefetchAll);
    }

    pub(crate) fn apply_query_result(&mut self, result: QueryResult) {
        if let Some(key) = queries::apply_result(&mut self.model.contacts, result, now_ms()) {
            self.persist_query(key);
        }
        self.refresh_contact_rows();
    }

    pub(crate) fn apply_contacts_snapshot(&mut self, snapshot: ContactsSnapshot) {
        for key in queries::apply_snapshot(&mut self.model.contacts, snapshot, now_ms()) {
            self.persist_query(key);
        }
        self.refresh_contact_rows();
    }

    fn persist_query(&self, key: QueryKey) {
        if let Err(e) = queries::persist(&self.cache, &self.model.contacts, key) {
            warn!("Failed to cache query {}: {:#}", key.as_str(), e);
        }
    }

    /// Re-derive the rows of the current contacts view
    pub(crate) fn refresh_contact_rows(&mut self) {
        let Some(view) = self.model.navigation.location.contact_view() else {
            return;
        };

        let timeout_ms = self.config.online_timeout_secs * 1000;
        self.model
            .contacts
            .derive_rows(view, &self.model.ui.search_query, now_ms(), timeout_ms);

        let len = self.model.contacts.rows.len();
        self.model.navigation.cursor =
            logic::navigation::clamp_cursor(self.model.navigation.cursor, len);
    }
}

/// Wall clock in milliseconds, the unit of the worker's timestamps
pub(crate) fn now_ms() -> u64 {
    chrono::Utc::now().timestamp_millis().max(0) as u64
}
