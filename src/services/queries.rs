//! Polled remote queries
//!
//! The contact lists are refreshed on a fixed interval from the main loop and
//! can be refetched together on demand. Successful results are persisted so
//! the lists show immediately on the next start.

use anyhow::Result;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::api::{BlockedContact, Contact, ContactRequest, Conversation, Worker};
use crate::cache::CacheDb;
use crate::logic::errors::format_error_message;
use crate::model::ContactsModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    ListContacts,
    ListContactsRequestsIn,
    ListContactsRequestsOut,
    ListBlockedContacts,
    ListChatsConversations,
}

impl QueryKey {
    pub const ALL: [QueryKey; 5] = [
        QueryKey::ListContacts,
        QueryKey::ListContactsRequestsIn,
        QueryKey::ListContactsRequestsOut,
        QueryKey::ListBlockedContacts,
        QueryKey::ListChatsConversations,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKey::ListContacts => "listContacts",
            QueryKey::ListContactsRequestsIn => "listContactsRequestsIn",
            QueryKey::ListContactsRequestsOut => "listContactsRequestsOut",
            QueryKey::ListBlockedContacts => "listBlockedContacts",
            QueryKey::ListChatsConversations => "listChatsConversations",
        }
    }

    /// Conversations are only fetched on demand
    pub fn refetch_interval(&self, poll_interval: Duration) -> Option<Duration> {
        match self {
            QueryKey::ListChatsConversations => None,
            _ => Some(poll_interval),
        }
    }

    /// Whether successful results may be written to the cache
    pub fn persisted(&self) -> bool {
        !matches!(self, QueryKey::ListChatsConversations)
    }
}

/// Last known result of one query
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    pub data: Option<T>,
    pub error: Option<String>,
    /// Milliseconds since the epoch of the last success
    pub updated_at: u64,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            updated_at: 0,
        }
    }
}

impl<T> QueryState<T> {
    pub fn is_success(&self) -> bool {
        self.data.is_some()
    }

    /// Record a fetch result. A failure keeps the previous data.
    pub fn apply(&mut self, result: Result<T>, now_ms: u64) -> Result<()> {
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
                self.updated_at = now_ms;
                Ok(())
            }
            Err(e) => {
                self.error = Some(format_error_message(&e));
                Err(e)
            }
        }
    }

    pub fn restore(&mut self, data: T, updated_at: u64) {
        if self.data.is_none() {
            self.data = Some(data);
            self.updated_at = updated_at;
        }
    }
}

impl<E> QueryState<Vec<E>> {
    /// Rows to derive views from: empty until the first success
    pub fn rows(&self) -> &[E] {
        self.data.as_deref().unwrap_or(&[])
    }
}

/// Decides which polled queries are due
#[derive(Debug, Clone)]
pub struct PollSchedule {
    poll_interval: Duration,
    last_fetch: HashMap<QueryKey, Instant>,
}

impl PollSchedule {
    pub fn new(poll_interval: Duration) -> Self {
        Self {
            poll_interval,
            last_fetch: HashMap::new(),
        }
    }

    /// Keys whose interval elapsed; never-fetched polled keys are due at once
    pub fn due(&self, now: Instant) -> Vec<QueryKey> {
        QueryKey::ALL
            .into_iter()
            .filter(|key| match key.refetch_interval(self.poll_interval) {
                None => false,
                Some(interval) => match self.last_fetch.get(key) {
                    None => true,
                    Some(last) => now.saturating_duration_since(*last) >= interval,
                },
            })
            .collect()
    }

    pub fn mark(&mut self, key: QueryKey, now: Instant) {
        self.last_fetch.insert(key, now);
    }

    pub fn mark_all(&mut self, now: Instant) {
        for key in QueryKey::ALL {
            self.mark(key, now);
        }
    }
}

/// Result of fetching a single query
#[derive(Debug)]
pub enum QueryResult {
    Contacts(Result<Vec<Contact>>),
    RequestsIn(Result<Vec<ContactRequest>>),
    RequestsOut(Result<Vec<ContactRequest>>),
    Blocked(Result<Vec<BlockedContact>>),
    Conversations(Result<Vec<Conversation>>),
}

impl QueryResult {
    pub fn key(&self) -> QueryKey {
        match self {
            QueryResult::Contacts(_) => QueryKey::ListContacts,
            QueryResult::RequestsIn(_) => QueryKey::ListContactsRequestsIn,
            QueryResult::RequestsOut(_) => QueryKey::ListContactsRequestsOut,
            QueryResult::Blocked(_) => QueryKey::ListBlockedContacts,
            QueryResult::Conversations(_) => QueryKey::ListChatsConversations,
        }
    }
}

pub async fn fetch<W: Worker>(worker: &W, key: QueryKey) -> QueryResult {
    match key {
        QueryKey::ListContacts => QueryResult::Contacts(worker.list_contacts().await),
        QueryKey::ListContactsRequestsIn => {
            QueryResult::RequestsIn(worker.list_contact_requests_in().await)
        }
        QueryKey::ListContactsRequestsOut => {
            QueryResult::RequestsOut(worker.list_contact_requests_out().await)
        }
        QueryKey::ListBlockedContacts => QueryResult::Blocked(worker.list_blocked_contacts().await),
        QueryKey::ListChatsConversations => {
            QueryResult::Conversations(worker.list_conversations().await)
        }
    }
}

/// Every query's result from one fan-out refetch
#[derive(Debug)]
pub struct ContactsSnapshot {
    pub results: Vec<QueryResult>,
}

/// Refetch all five queries concurrently.
///
/// Each result is kept on its own: one failing query does not cancel or
/// discard the others.
pub async fn refetch_all<W: Worker>(worker: &W) -> ContactsSnapshot {
    let (contacts, requests_in, requests_out, blocked, conversations) = tokio::join!(
        fetch(worker, QueryKey::ListContacts),
        fetch(worker, QueryKey::ListContactsRequestsIn),
        fetch(worker, QueryKey::ListContactsRequestsOut),
        fetch(worker, QueryKey::ListBlockedContacts),
        fetch(worker, QueryKey::ListChatsConversations),
    );

    ContactsSnapshot {
        results: vec![contacts, requests_in, requests_out, blocked, conversations],
    }
}

/// Apply one result to the model, logging failures. Returns the key when the
/// query succeeded.
pub fn apply_result(
    contacts: &mut ContactsModel,
    result: QueryResult,
    now_ms: u64,
) -> Option<QueryKey> {
    let key = result.key();
    let outcome = match result {
        QueryResult::Contacts(r) => contacts.all.apply(r, now_ms),
        QueryResult::RequestsIn(r) => contacts.requests_in.apply(r, now_ms),
        QueryResult::RequestsOut(r) => contacts.requests_out.apply(r, now_ms),
        QueryResult::Blocked(r) => contacts.blocked.apply(r, now_ms),
        QueryResult::Conversations(r) => contacts.conversations.apply(r, now_ms),
    };

    match outcome {
        Ok(()) => Some(key),
        Err(e) => {
            warn!("Query {} failed: {:#}", key.as_str(), e);
            None
        }
    }
}

pub fn apply_snapshot(
    contacts: &mut ContactsModel,
    snapshot: ContactsSnapshot,
    now_ms: u64,
) -> Vec<QueryKey> {
    snapshot
        .results
        .into_iter()
        .filter_map(|result| apply_result(contacts, result, now_ms))
        .collect()
}

/// Write a successful query to the cache; uncached keys are skipped
pub fn persist(cache: &CacheDb, contacts: &ContactsModel, key: QueryKey) -> Result<()> {
    if !key.persisted() {
        return Ok(());
    }

    match key {
        QueryKey::ListContacts => save(cache, key, &contacts.all),
        QueryKey::ListContactsRequestsIn => save(cache, key, &contacts.requests_in),
        QueryKey::ListContactsRequestsOut => save(cache, key, &contacts.requests_out),
        QueryKey::ListBlockedContacts => save(cache, key, &contacts.blocked),
        QueryKey::ListChatsConversations => Ok(()),
    }
}

fn save<T: serde::Serialize>(cache: &CacheDb, key: QueryKey, state: &QueryState<T>) -> Result<()> {
    match &state.data {
        Some(data) => cache.save_query(key.as_str(), data, state.updated_at),
        None => Ok(()),
    }
}

/// Fill the model with cached results from the previous run
pub fn restore(cache: &CacheDb, contacts: &mut ContactsModel) {
    fn load<T: serde::de::DeserializeOwned>(
        cache: &CacheDb,
        key: QueryKey,
        state: &mut QueryState<T>,
    ) {
        match cache.get_query::<T>(key.as_str()) {
            Ok(Some((data, updated_at))) => {
                debug!("Restored cached query {}", key.as_str());
                state.restore(data, updated_at);
            }
            Ok(None) => {}
            Err(e) => warn!("Failed to restore query {}: {:#}", key.as_str(), e),
        }
    }

    load(cache, QueryKey::ListContacts, &mut contacts.all);
    load(cache, QueryKey::ListContactsRequestsIn, &mut contacts.requests_in);
    load(cache, QueryKey::ListContactsRequestsOut, &mut contacts.requests_out);
    load(cache, QueryKey::ListBlockedContacts, &mut contacts.blocked);
}
