//! Integration tests for user actions against the worker
//!
//! Each action runs to completion with a fake worker and a scripted prompt;
//! the tests check which worker calls were made and what the action reports.

mod common;

use common::{dir, file, Answer, FakeWorker, ScriptedPrompt};
use drivetui::logic::actions::DialogResponse;
use drivetui::logic::contacts::ContactView;
use drivetui::logic::drag::DragSession;
use drivetui::messages::{ActionOutcome, Command};
use drivetui::model::{Location, ToastKind};
use drivetui::services::actions;
use tokio::sync::mpsc;

#[tokio::test]
async fn test_cancelled_delete_permanently_makes_no_call() {
    let worker = FakeWorker::new();
    let prompt = ScriptedPrompt::new(vec![Answer::Confirm(false)]);
    let items = vec![file("f1", "report.pdf")];

    let outcome = actions::delete_permanently(&worker, &prompt, &items)
        .await
        .unwrap();

    assert!(matches!(outcome, ActionOutcome::Cancelled));
    assert_eq!(prompt.asked(), vec!["Delete permanently"]);
    assert!(worker.calls().is_empty());
}

#[tokio::test]
async fn test_confirmed_delete_permanently_calls_worker() {
    let worker = FakeWorker::new();
    let prompt = ScriptedPrompt::new(vec![Answer::Confirm(true)]);
    let items = vec![file("f1", "a.txt"), file("f2", "b.txt")];

    let outcome = actions::delete_permanently(&worker, &prompt, &items)
        .await
        .unwrap();

    match outcome {
        ActionOutcome::DeletedPermanently(uuids) => assert_eq!(uuids, vec!["f1", "f2"]),
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(worker.calls(), vec!["delete_items_permanently a.txt,b.txt"]);
}

#[tokio::test]
async fn test_rename_to_same_name_in_other_case_makes_no_call() {
    let worker = FakeWorker::new();
    let prompt = ScriptedPrompt::typing("invoices");
    let folder = dir("d1", "Invoices");

    let outcome = actions::rename(&worker, &prompt, &folder).await.unwrap();

    match outcome {
        ActionOutcome::Renamed { uuid, name, is_directory } => {
            assert_eq!(uuid, "d1");
            assert_eq!(name, "Invoices");
            assert!(is_directory);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert!(worker.calls().is_empty());
}

#[tokio::test]
async fn test_cancelled_rename_keeps_original_name() {
    let worker = FakeWorker::new();
    let prompt = ScriptedPrompt::cancelling();

    let outcome = actions::rename(&worker, &prompt, &file("f1", "notes.md"))
        .await
        .unwrap();

    assert!(matches!(outcome, ActionOutcome::Renamed { ref name, .. } if name == "notes.md"));
    assert!(worker.calls().is_empty());
}

#[tokio::test]
async fn test_blank_rename_is_cancel() {
    let worker = FakeWorker::new();
    let prompt = ScriptedPrompt::typing("   ");

    let outcome = actions::rename(&worker, &prompt, &file("f1", "notes.md"))
        .await
        .unwrap();

    assert!(matches!(outcome, ActionOutcome::Renamed { ref name, .. } if name == "notes.md"));
    assert!(worker.calls().is_empty());
}

#[tokio::test]
async fn test_rename_applies_new_name() {
    let worker = FakeWorker::new();
    let prompt = ScriptedPrompt::typing("Invoices 2024");

    actions::rename(&worker, &prompt, &dir("d1", "Invoices"))
        .await
        .unwrap();

    assert_eq!(worker.calls(), vec!["rename_item Invoices to Invoices 2024"]);
}

#[tokio::test]
async fn test_blank_folder_name_is_cancel() {
    let worker = FakeWorker::new();
    let prompt = ScriptedPrompt::typing("   ");

    let outcome = actions::create_folder(&worker, &prompt, "root").await.unwrap();

    assert!(matches!(outcome, ActionOutcome::Cancelled));
    assert!(worker.calls().is_empty());
}

#[tokio::test]
async fn test_create_folder_trims_name() {
    let worker = FakeWorker::new();
    let prompt = ScriptedPrompt::typing("  Photos ");

    let outcome = actions::create_folder(&worker, &prompt, "root").await.unwrap();

    match outcome {
        ActionOutcome::FolderCreated(created) => {
            assert_eq!(created.name, "Photos");
            assert_eq!(created.parent, "root");
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(worker.calls(), vec!["create_directory Photos in root"]);
}

#[tokio::test]
async fn test_trash_asks_first() {
    let worker = FakeWorker::new();
    let prompt = ScriptedPrompt::new(vec![Answer::Confirm(true)]);

    let outcome = actions::trash(&worker, &prompt, &[file("f1", "old.txt")])
        .await
        .unwrap();

    assert!(matches!(outcome, ActionOutcome::Trashed(_)));
    assert_eq!(prompt.asked(), vec!["Move to trash"]);
    assert_eq!(worker.calls(), vec!["trash_items old.txt"]);
}

#[tokio::test]
async fn test_download_picks_call_by_selection() {
    let worker = FakeWorker::new();

    actions::download(&worker, &[file("f1", "a.txt")]).await.unwrap();
    actions::download(&worker, &[dir("d1", "Docs")]).await.unwrap();
    actions::download(&worker, &[file("f1", "a.txt"), dir("d1", "Docs")])
        .await
        .unwrap();
    let nothing = actions::download(&worker, &[]).await.unwrap();

    assert!(matches!(nothing, ActionOutcome::Cancelled));
    assert_eq!(
        worker.calls(),
        vec![
            "download_file a.txt",
            "download_directory Docs",
            "download_as_zip a.txt,Docs",
        ]
    );
}

#[tokio::test]
async fn test_share_sends_typed_email() {
    let worker = FakeWorker::new();
    let prompt = ScriptedPrompt::typing("bo@example.com");

    let outcome = actions::share(&worker, &prompt, &[file("f1", "a.txt")], None)
        .await
        .unwrap();

    assert!(matches!(outcome, ActionOutcome::Shared { count: 1, ref email } if email == "bo@example.com"));
    assert_eq!(worker.calls(), vec!["share_items_to_user a.txt with bo@example.com"]);
}

#[tokio::test]
async fn test_failed_move_is_an_error() {
    let worker = FakeWorker::failing(&["move_items"]);
    let mut docs = file("f1", "a.txt");
    docs.selected = true;
    let items = vec![docs, dir("d1", "Archive")];

    let request = DragSession::start(&items, 0).drop_on(&items[1]).unwrap();
    let result = actions::move_items(&worker, &request).await;

    assert!(result.is_err());
    assert_eq!(worker.calls(), vec!["move_items a.txt to d1"]);
}

#[tokio::test]
async fn test_contact_request_toasts_and_navigates() {
    let worker = FakeWorker::new();
    let prompt = ScriptedPrompt::typing("ana@example.com");
    let (commands, mut received) = mpsc::unbounded_channel();

    let outcome = actions::send_contact_request(&worker, &prompt, &commands, 5000)
        .await
        .unwrap();

    // Loading toast, its dismissal, then the jump to outgoing requests
    let loading_id = match received.try_recv().unwrap() {
        Command::ShowToast(toast) => {
            assert_eq!(toast.kind, ToastKind::Loading);
            assert!(toast.message.contains("ana@example.com"));
            toast.id
        }
        other => panic!("unexpected command: {:?}", other),
    };
    assert!(matches!(received.try_recv().unwrap(), Command::DismissToast(id) if id == loading_id));
    assert!(matches!(
        received.try_recv().unwrap(),
        Command::Navigate(Location::Contacts(ContactView::RequestsOut))
    ));
    assert!(received.try_recv().is_err());

    // Every query was refetched after the request went out
    match outcome {
        ActionOutcome::ContactsUpdated(snapshot) => assert_eq!(snapshot.results.len(), 5),
        other => panic!("unexpected outcome: {:?}", other),
    }
    let calls = worker.calls();
    assert_eq!(calls[0], "contacts_request_send ana@example.com");
    assert!(calls.contains(&"list_contact_requests_out".to_string()));
}

#[tokio::test]
async fn test_failed_contact_request_shows_error_toast() {
    let worker = FakeWorker::failing(&["contacts_request_send"]);
    let prompt = ScriptedPrompt::typing("ana@example.com");
    let (commands, mut received) = mpsc::unbounded_channel();

    let result = actions::send_contact_request(&worker, &prompt, &commands, 5000).await;
    assert!(result.is_err());

    assert!(matches!(received.try_recv().unwrap(), Command::ShowToast(_)));
    assert!(matches!(received.try_recv().unwrap(), Command::DismissToast(_)));
    match received.try_recv().unwrap() {
        Command::ShowToast(toast) => {
            assert_eq!(toast.kind, ToastKind::Error);
            assert_eq!(toast.duration_ms, Some(5000));
        }
        other => panic!("unexpected command: {:?}", other),
    }
    assert!(received.try_recv().is_err());

    // No refetch after a failed request
    assert_eq!(worker.calls(), vec!["contacts_request_send ana@example.com"]);
}

#[tokio::test]
async fn test_cancelled_contact_request_sends_nothing() {
    let worker = FakeWorker::new();
    let prompt = ScriptedPrompt::new(vec![Answer::Input(DialogResponse::Cancelled)]);
    let (commands, mut received) = mpsc::unbounded_channel();

    let outcome = actions::send_contact_request(&worker, &prompt, &commands, 5000)
        .await
        .unwrap();

    assert!(matches!(outcome, ActionOutcome::Cancelled));
    assert!(received.try_recv().is_err());
    assert!(worker.calls().is_empty());
}

#[tokio::test]
async fn test_declined_block_makes_no_call() {
    let worker = FakeWorker::new();
    let prompt = ScriptedPrompt::new(vec![Answer::Confirm(false)]);

    let outcome = actions::block_contact(&worker, &prompt, "spam@example.com")
        .await
        .unwrap();

    assert!(matches!(outcome, ActionOutcome::Cancelled));
    assert_eq!(prompt.asked(), vec!["Block contact"]);
    assert!(worker.calls().is_empty());
}
