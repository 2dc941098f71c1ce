//! Modal prompts for background actions
//!
//! Action tasks run off the UI loop but sometimes need an answer from the
//! user. They send a request carrying a oneshot responder; the UI loop shows
//! the modal and answers on key press while it keeps drawing.

use std::future::Future;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::logic::actions::{ConfirmDialog, DialogResponse, InputDialog};

/// Something that can ask the user a question
pub trait Prompt: Send + Sync {
    fn confirm(&self, dialog: ConfirmDialog) -> impl Future<Output = bool> + Send;
    fn input(&self, dialog: InputDialog) -> impl Future<Output = DialogResponse> + Send;
}

/// A pending question for the UI loop
#[derive(Debug)]
pub enum DialogRequest {
    Confirm {
        dialog: ConfirmDialog,
        respond: oneshot::Sender<bool>,
    },
    Input {
        dialog: InputDialog,
        respond: oneshot::Sender<DialogResponse>,
    },
}

impl DialogRequest {
    pub fn title(&self) -> &str {
        match self {
            DialogRequest::Confirm { dialog, .. } => &dialog.title,
            DialogRequest::Input { dialog, .. } => &dialog.title,
        }
    }

    /// Answer with the dismissive choice
    pub fn cancel(self) {
        match self {
            DialogRequest::Confirm { respond, .. } => {
                let _ = respond.send(false);
            }
            DialogRequest::Input { respond, .. } => {
                let _ = respond.send(DialogResponse::Cancelled);
            }
        }
    }
}

/// Prompt implementation that forwards questions to the UI loop
#[derive(Clone)]
pub struct DialogBroker {
    requests: mpsc::UnboundedSender<DialogRequest>,
}

impl DialogBroker {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<DialogRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { requests: tx }, rx)
    }
}

impl Prompt for DialogBroker {
    async fn confirm(&self, dialog: ConfirmDialog) -> bool {
        let (respond, answer) = oneshot::channel();
        if self
            .requests
            .send(DialogRequest::Confirm { dialog, respond })
            .is_err()
        {
            debug!("Dialog channel closed, treating confirm as cancelled");
            return false;
        }
        // A dropped responder means the dialog was torn down
        answer.await.unwrap_or(false)
    }

    async fn input(&self, dialog: InputDialog) -> DialogResponse {
        let (respond, answer) = oneshot::channel();
        if self
            .requests
            .send(DialogRequest::Input { dialog, respond })
            .is_err()
        {
            debug!("Dialog channel closed, treating input as cancelled");
            return DialogResponse::Cancelled;
        }
        answer.await.unwrap_or(DialogResponse::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_broker_round_trip() {
        let (broker, mut requests) = DialogBroker::new();

        let asker = tokio::spawn(async move { broker.input(InputDialog::new_folder()).await });

        match requests.recv().await {
            Some(DialogRequest::Input { dialog, respond }) => {
                assert_eq!(dialog.title, "New folder");
                respond.send(DialogResponse::Value("Docs".to_string())).unwrap();
            }
            other => panic!("unexpected request: {:?}", other),
        }

        assert_eq!(
            asker.await.unwrap(),
            DialogResponse::Value("Docs".to_string())
        );
    }

    #[tokio::test]
    async fn test_dropped_responder_is_cancel() {
        let (broker, mut requests) = DialogBroker::new();

        let asker = tokio::spawn(async move { broker.confirm(ConfirmDialog::trash(2)).await });

        let request = requests.recv().await.unwrap();
        drop(request);

        assert!(!asker.await.unwrap());
    }

    #[tokio::test]
    async fn test_closed_channel_is_cancel() {
        let (broker, requests) = DialogBroker::new();
        drop(requests);

        assert_eq!(
            broker.input(InputDialog::share()).await,
            DialogResponse::Cancelled
        );
        assert!(!broker.confirm(ConfirmDialog::trash(1)).await);
    }
}
