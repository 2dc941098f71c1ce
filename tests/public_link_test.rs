//! Integration tests for opening a public directory link

mod common;

use common::{Answer, FakeWorker, ScriptedPrompt};
use drivetui::api::PublicLinkStatus;
use drivetui::logic::actions::DialogResponse;
use drivetui::logic::public_link::{parse_link, LinkState, ParsedLink};
use drivetui::messages::ActionOutcome;
use drivetui::services::actions;

const UUID: &str = "3f2a0c1e-9b7d-4e21-a5c3-0d9e8f7a6b54";

fn link() -> ParsedLink {
    parse_link(&format!("https://drive.example.com/d/{}#secret", UUID)).unwrap()
}

fn worker(enabled: bool, password: Option<&str>) -> FakeWorker {
    let worker = FakeWorker::new();
    {
        let mut state = worker.state.lock().unwrap();
        state.link_status = Some(PublicLinkStatus {
            enabled,
            uuid: UUID.to_string(),
            has_password: password.is_some(),
            salt: String::new(),
        });
        state.link_password = password.map(str::to_string);
    }
    worker
}

async fn resolve(worker: &FakeWorker, prompt: &ScriptedPrompt) -> LinkState {
    match actions::resolve_link(worker, prompt, &link()).await.unwrap() {
        ActionOutcome::LinkResolved(state) => state,
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[tokio::test]
async fn test_open_link_needs_no_prompt() {
    let worker = worker(true, None);
    let prompt = ScriptedPrompt::new(Vec::new());

    match resolve(&worker, &prompt).await {
        LinkState::Ready { uuid, key, password, info } => {
            assert_eq!(uuid, UUID);
            assert_eq!(key, "secret");
            assert_eq!(password, None);
            assert_eq!(info.parent, "link-root");
        }
        other => panic!("unexpected state: {:?}", other),
    }
    assert!(prompt.asked().is_empty());
}

#[tokio::test]
async fn test_disabled_link_is_invalid() {
    let worker = worker(false, None);
    let prompt = ScriptedPrompt::new(Vec::new());

    assert_eq!(resolve(&worker, &prompt).await, LinkState::Invalid);
    assert_eq!(worker.calls(), vec![format!("public_link_status {}", UUID)]);
}

#[tokio::test]
async fn test_password_unlocks_link() {
    let worker = worker(true, Some("hunter2"));
    let prompt = ScriptedPrompt::typing("hunter2");

    let state = resolve(&worker, &prompt).await;

    assert!(matches!(state, LinkState::Ready { password: Some(ref p), .. } if p == "hunter2"));
    assert_eq!(prompt.asked(), vec!["Password required"]);
}

#[tokio::test]
async fn test_wrong_or_cancelled_password_keeps_waiting() {
    let worker = worker(true, Some("hunter2"));

    let wrong = ScriptedPrompt::typing("nope");
    assert!(resolve(&worker, &wrong).await.needs_password());

    let cancelled = ScriptedPrompt::new(vec![Answer::Input(DialogResponse::Cancelled)]);
    assert!(resolve(&worker, &cancelled).await.needs_password());
}
