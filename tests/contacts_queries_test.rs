//! Integration tests for the polled contact queries
//!
//! Fetch with a fake worker, apply to the model, persist to an in-memory
//! cache and restore into a fresh model, the way a restart would.

mod common;

use common::{contact, request, FakeWorker};
use drivetui::cache::CacheDb;
use drivetui::logic::contacts::ContactView;
use drivetui::model::{ContactRow, ContactsModel};
use drivetui::services::queries::{self, QueryKey};

const NOW: u64 = 1_700_000_000_000;
const TIMEOUT: u64 = 60_000;

fn worker_with_contacts() -> FakeWorker {
    let worker = FakeWorker::new();
    {
        let mut state = worker.state.lock().unwrap();
        state.contacts = vec![
            contact("c1", "ana@example.com"),
            contact("c2", "zoe@example.com"),
        ];
        state.requests_out = vec![request("r1", "bo@example.com")];
    }
    worker
}

#[tokio::test]
async fn test_one_failing_query_keeps_the_others() {
    let worker = worker_with_contacts();
    worker.state.lock().unwrap().fail = vec!["list_blocked_contacts"];

    let mut contacts = ContactsModel::new();
    let snapshot = queries::refetch_all(&worker).await;
    let succeeded = queries::apply_snapshot(&mut contacts, snapshot, NOW);

    assert_eq!(succeeded.len(), 4);
    assert!(!succeeded.contains(&QueryKey::ListBlockedContacts));
    assert_eq!(contacts.all.rows().len(), 2);
    assert_eq!(contacts.requests_out.rows().len(), 1);
    assert!(contacts.blocked.error.is_some());
    assert!(contacts.error().is_some());
}

#[tokio::test]
async fn test_failed_refetch_keeps_previous_rows() {
    let worker = worker_with_contacts();
    let mut contacts = ContactsModel::new();
    queries::apply_snapshot(&mut contacts, queries::refetch_all(&worker).await, NOW);

    worker.state.lock().unwrap().fail = vec!["list_contacts"];
    let result = queries::fetch(&worker, QueryKey::ListContacts).await;
    assert_eq!(queries::apply_result(&mut contacts, result, NOW + 1), None);

    assert_eq!(contacts.all.rows().len(), 2);
    assert_eq!(contacts.all.updated_at, NOW);
}

#[tokio::test]
async fn test_rows_follow_the_view() {
    let worker = worker_with_contacts();
    let mut contacts = ContactsModel::new();
    queries::apply_snapshot(&mut contacts, queries::refetch_all(&worker).await, NOW);

    contacts.derive_rows(ContactView::All, "", NOW, TIMEOUT);
    let emails: Vec<&str> = contacts.rows.iter().map(|row| row.email()).collect();
    // Email descending
    assert_eq!(emails, vec!["zoe@example.com", "ana@example.com"]);

    contacts.derive_rows(ContactView::All, "ana", NOW, TIMEOUT);
    assert_eq!(contacts.rows.len(), 1);

    contacts.derive_rows(ContactView::RequestsOut, "", NOW, TIMEOUT);
    assert!(matches!(contacts.rows.as_slice(), [ContactRow::RequestOut(r)] if r.uuid == "r1"));
    assert_eq!(contacts.count(ContactView::RequestsOut), 1);
}

#[tokio::test]
async fn test_persisted_queries_survive_restart() {
    let worker = worker_with_contacts();
    let cache = CacheDb::new_in_memory().unwrap();

    let mut contacts = ContactsModel::new();
    let succeeded =
        queries::apply_snapshot(&mut contacts, queries::refetch_all(&worker).await, NOW);
    for key in succeeded {
        queries::persist(&cache, &contacts, key).unwrap();
    }

    let mut restored = ContactsModel::new();
    queries::restore(&cache, &mut restored);

    assert_eq!(restored.all.data, contacts.all.data);
    assert_eq!(restored.all.updated_at, NOW);
    assert_eq!(restored.requests_out.rows().len(), 1);
    // Conversations are never cached
    assert!(restored.conversations.data.is_none());
}
