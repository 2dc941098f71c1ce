//! Shared fakes for the integration tests: an in-memory worker that records
//! every call, and a prompt that answers from a script.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use drivetui::api::{
    BlockedContact, Contact, ContactRequest, Conversation, DriveItem, ItemType, ListingSource,
    PublicLinkInfo, PublicLinkStatus, Worker,
};
use drivetui::logic::actions::{ConfirmDialog, DialogResponse, InputDialog};
use drivetui::services::Prompt;

pub fn item(uuid: &str, name: &str, item_type: ItemType) -> DriveItem {
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
        receivers: Vec::new(),
        selected: false,
    }
}

pub fn file(uuid: &str, name: &str) -> DriveItem {
    item(uuid, name, ItemType::File)
}

pub fn dir(uuid: &str, name: &str) -> DriveItem {
    item(uuid, name, ItemType::Directory)
}

pub fn contact(uuid: &str, email: &str) -> Contact {
    Contact {
        uuid: uuid.to_string(),
        user_id: 0,
        email: email.to_string(),
        nick_name: String::new(),
        last_active: 0,
    }
}

pub fn request(uuid: &str, email: &str) -> ContactRequest {
    ContactRequest {
        uuid: uuid.to_string(),
        user_id: 0,
        email: email.to_string(),
        nick_name: String::new(),
    }
}

/// What the fake worker serves and which calls it fails
#[derive(Default)]
pub struct WorkerState {
    pub calls: Vec<String>,
    pub contacts: Vec<Contact>,
    pub requests_out: Vec<ContactRequest>,
    pub fail: Vec<&'static str>,
    pub link_status: Option<PublicLinkStatus>,
    pub link_password: Option<String>,
}

#[derive(Clone, Default)]
pub struct FakeWorker {
    pub state: Arc<Mutex<WorkerState>>,
}

impl FakeWorker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(calls: &[&'static str]) -> Self {
        let worker = Self::default();
        worker.state.lock().unwrap().fail = calls.to_vec();
        worker
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    fn record(&self, call: &'static str, detail: String) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(if detail.is_empty() {
            call.to_string()
        } else {
            format!("{} {}", call, detail)
        });
        if state.fail.contains(&call) {
            Err(anyhow!("{} failed", call))
        } else {
            Ok(())
        }
    }
}

fn names(items: &[DriveItem]) -> String {
    items
        .iter()
        .map(|item| item.name.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

impl Worker for FakeWorker {
    async fn base_folder(&self) -> Result<String> {
        self.record("base_folder", String::new())?;
        Ok("root".to_string())
    }

    async fn list_items(&self, source: &ListingSource) -> Result<Vec<DriveItem>> {
        self.record("list_items", format!("{:?}", source))?;
        Ok(Vec::new())
    }

    async fn list_contacts(&self) -> Result<Vec<Contact>> {
        self.record("list_contacts", String::new())?;
        Ok(self.state.lock().unwrap().contacts.clone())
    }

    async fn list_contact_requests_in(&self) -> Result<Vec<ContactRequest>> {
        self.record("list_contact_requests_in", String::new())?;
        Ok(Vec::new())
    }

    async fn list_contact_requests_out(&self) -> Result<Vec<ContactRequest>> {
        self.record("list_contact_requests_out", String::new())?;
        Ok(self.state.lock().unwrap().requests_out.clone())
    }

    async fn list_blocked_contacts(&self) -> Result<Vec<BlockedContact>> {
        self.record("list_blocked_contacts", String::new())?;
        Ok(Vec::new())
    }

    async fn list_conversations(&self) -> Result<Vec<Conversation>> {
        self.record("list_conversations", String::new())?;
        Ok(Vec::new())
    }

    async fn create_directory(&self, name: &str, parent: &str) -> Result<DriveItem> {
        self.record("create_directory", format!("{} in {}", name, parent))?;
        let mut created = dir("new-dir", name);
        created.parent = parent.to_string();
        Ok(created)
    }

    async fn move_items(&self, items: &[DriveItem], parent: &str) -> Result<()> {
        self.record("move_items", format!("{} to {}", names(items), parent))
    }

    async fn trash_items(&self, items: &[DriveItem]) -> Result<()> {
        self.record("trash_items", names(items))
    }

    async fn restore_items(&self, items: &[DriveItem]) -> Result<()> {
        self.record("restore_items", names(items))
    }

    async fn rename_item(&self, item: &DriveItem, name: &str) -> Result<()> {
        self.record("rename_item", format!("{} to {}", item.name, name))
    }

    async fn delete_items_permanently(&self, items: &[DriveItem]) -> Result<()> {
        self.record("delete_items_permanently", names(items))
    }

    async fn favorite_items(&self, items: &[DriveItem], favorite: bool) -> Result<()> {
        self.record("favorite_items", format!("{} {}", names(items), favorite))
    }

    async fn share_items_to_user(
        &self,
        items: &[DriveItem],
        receiver_email: &str,
        _request_uuid: Option<&str>,
    ) -> Result<()> {
        self.record(
            "share_items_to_user",
            format!("{} with {}", names(items), receiver_email),
        )
    }

    async fn directory_size(
        &self,
        uuid: &str,
        _trash: bool,
        _sharer_id: u64,
        _receiver_id: u64,
    ) -> Result<u64> {
        self.record("directory_size", uuid.to_string())?;
        Ok(4096)
    }

    async fn thumbnail(&self, item: &DriveItem) -> Result<Vec<u8>> {
        self.record("thumbnail", item.name.clone())?;
        Ok(Vec::new())
    }

    async fn download_file(&self, item: &DriveItem) -> Result<()> {
        self.record("download_file", item.name.clone())
    }

    async fn download_directory(&self, _uuid: &str, name: &str) -> Result<()> {
        self.record("download_directory", name.to_string())
    }

    async fn download_as_zip(&self, items: &[DriveItem]) -> Result<()> {
        self.record("download_as_zip", names(items))
    }

    async fn contacts_request_send(&self, email: &str) -> Result<()> {
        self.record("contacts_request_send", email.to_string())?;
        self.state
            .lock()
            .unwrap()
            .requests_out
            .push(request("out-1", email));
        Ok(())
    }

    async fn contacts_request_accept(&self, uuid: &str) -> Result<()> {
        self.record("contacts_request_accept", uuid.to_string())
    }

    async fn contacts_request_deny(&self, uuid: &str) -> Result<()> {
        self.record("contacts_request_deny", uuid.to_string())
    }

    async fn contacts_request_remove(&self, uuid: &str) -> Result<()> {
        self.record("contacts_request_remove", uuid.to_string())
    }

    async fn contacts_remove(&self, uuid: &str) -> Result<()> {
        self.record("contacts_remove", uuid.to_string())
    }

    async fn contacts_block(&self, email: &str) -> Result<()> {
        self.record("contacts_block", email.to_string())
    }

    async fn contacts_unblock(&self, uuid: &str) -> Result<()> {
        self.record("contacts_unblock", uuid.to_string())
    }

    async fn public_link_status(&self, uuid: &str) -> Result<PublicLinkStatus> {
        self.record("public_link_status", uuid.to_string())?;
        self.state
            .lock()
            .unwrap()
            .link_status
            .clone()
            .ok_or_else(|| anyhow!("no such link"))
    }

    async fn public_link_info(
        &self,
        uuid: &str,
        password: Option<&str>,
        _key: &str,
    ) -> Result<PublicLinkInfo> {
        self.record("public_link_info", uuid.to_string())?;
        let expected = self.state.lock().unwrap().link_password.clone();
        if expected.as_deref() != password {
            return Err(anyhow!("wrong password"));
        }
        Ok(PublicLinkInfo {
            parent: "link-root".to_string(),
            name: "Shared photos".to_string(),
            has_password: expected.is_some(),
            timestamp: 0,
        })
    }
}

/// One scripted answer
#[derive(Debug, Clone)]
pub enum Answer {
    Confirm(bool),
    Input(DialogResponse),
}

/// Prompt that answers from a queue and remembers the titles it was asked
#[derive(Default)]
pub struct ScriptedPrompt {
    answers: Mutex<VecDeque<Answer>>,
    pub asked: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            asked: Mutex::new(Vec::new()),
        }
    }

    pub fn typing(value: &str) -> Self {
        Self::new(vec![Answer::Input(DialogResponse::Value(value.to_string()))])
    }

    pub fn cancelling() -> Self {
        Self::new(vec![
            Answer::Input(DialogResponse::Cancelled),
            Answer::Confirm(false),
        ])
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }

    fn next(&self) -> Option<Answer> {
        self.answers.lock().unwrap().pop_front()
    }
}

impl Prompt for ScriptedPrompt {
    async fn confirm(&self, dialog: ConfirmDialog) -> bool {
        self.asked.lock().unwrap().push(dialog.title.clone());
        loop {
            match self.next() {
                Some(Answer::Confirm(answer)) => return answer,
                Some(Answer::Input(_)) => continue,
                None => return false,
            }
        }
    }

    async fn input(&self, dialog: InputDialog) -> DialogResponse {
        self.asked.lock().unwrap().push(dialog.title.clone());
        loop {
            match self.next() {
                Some(Answer::Input(answer)) => return answer,
                Some(Answer::Confirm(_)) => continue,
                None => return DialogResponse::Cancelled,
            }
        }
    }
}
