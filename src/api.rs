use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::json;
use std::future::Future;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    File,
    Directory,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ItemReceiver {
    pub id: u64,
    pub email: String,
}

/// A file or directory record shown in a listing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveItem {
    pub uuid: String,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    #[serde(default)]
    pub size: u64,
    /// Milliseconds since the epoch
    #[serde(default)]
    pub last_modified: u64,
    #[serde(default)]
    pub favorited: bool,
    #[serde(default)]
    pub parent: String,
    #[serde(default)]
    pub sharer_id: u64,
    #[serde(default)]
    pub sharer_email: String,
    #[serde(default)]
    pub receiver_id: u64,
    #[serde(default)]
    pub receiver_email: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub receivers: Vec<ItemReceiver>,
    /// View-only selection flag, never sent over the wire
    #[serde(skip)]
    pub selected: bool,
}

impl DriveItem {
    pub fn is_directory(&self) -> bool {
        self.item_type == ItemType::Directory
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub uuid: String,
    #[serde(default)]
    pub user_id: u64,
    pub email: String,
    #[serde(default)]
    pub nick_name: String,
    /// Milliseconds since the epoch
    #[serde(default)]
    pub last_active: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub uuid: String,
    #[serde(default)]
    pub user_id: u64,
    pub email: String,
    #[serde(default)]
    pub nick_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedContact {
    pub uuid: String,
    #[serde(default)]
    pub user_id: u64,
    pub email: String,
    #[serde(default)]
    pub nick_name: String,
    #[serde(default)]
    pub timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationParticipant {
    pub user_id: u64,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub uuid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub participants: Vec<ConversationParticipant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicLinkStatus {
    pub enabled: bool,
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub has_password: bool,
    #[serde(default)]
    pub salt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicLinkInfo {
    /// Root directory uuid of the shared tree
    pub parent: String,
    pub name: String,
    #[serde(default)]
    pub has_password: bool,
    #[serde(default)]
    pub timestamp: u64,
}

/// Where a directory listing comes from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ListingSource {
    Directory(String),
    Favorites,
    Recents,
    SharedIn,
    SharedOut,
    Trash,
    PublicLink {
        link_uuid: String,
        parent: String,
        key: String,
        password: Option<String>,
    },
}

impl ListingSource {
    fn endpoint(&self) -> &'static str {
        match self {
            ListingSource::Directory(_) => "/v3/dir/content",
            ListingSource::Favorites => "/v3/favorites",
            ListingSource::Recents => "/v3/recents",
            ListingSource::SharedIn => "/v3/shared/in",
            ListingSource::SharedOut => "/v3/shared/out",
            ListingSource::Trash => "/v3/trash",
            ListingSource::PublicLink { .. } => "/v3/dir/link/content",
        }
    }

    fn body(&self) -> serde_json::Value {
        match self {
            ListingSource::Directory(uuid) => json!({ "uuid": uuid }),
            ListingSource::PublicLink {
                link_uuid,
                parent,
                key,
                password,
            } => json!({
                "uuid": link_uuid,
                "parent": parent,
                "key": key,
                "password": password,
            }),
            _ => json!({}),
        }
    }
}

/// Helper function to deserialize null as empty vector
fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let opt = Option::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

/// Response envelope used by every worker endpoint
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    status: bool,
    #[serde(default)]
    message: String,
    data: Option<T>,
}

/// Operations the storage worker performs on our behalf.
///
/// Encryption, chunked transfers and thumbnail generation happen behind this
/// boundary; callers only see the results.
pub trait Worker: Clone + Send + Sync + 'static {
    /// Uuid of the account's root directory
    fn base_folder(&self) -> impl Future<Output = Result<String>> + Send;

    fn list_items(&self, source: &ListingSource)
        -> impl Future<Output = Result<Vec<DriveItem>>> + Send;

    fn list_contacts(&self) -> impl Future<Output = Result<Vec<Contact>>> + Send;
    fn list_contact_requests_in(&self)
        -> impl Future<Output = Result<Vec<ContactRequest>>> + Send;
    fn list_contact_requests_out(&self)
        -> impl Future<Output = Result<Vec<ContactRequest>>> + Send;
    fn list_blocked_contacts(&self) -> impl Future<Output = Result<Vec<BlockedContact>>> + Send;
    fn list_conversations(&self) -> impl Future<Output = Result<Vec<Conversation>>> + Send;

    fn create_directory(&self, name: &str, parent: &str)
        -> impl Future<Output = Result<DriveItem>> + Send;
    fn move_items(&self, items: &[DriveItem], parent: &str)
        -> impl Future<Output = Result<()>> + Send;
    fn trash_items(&self, items: &[DriveItem]) -> impl Future<Output = Result<()>> + Send;
    fn restore_items(&self, items: &[DriveItem]) -> impl Future<Output = Result<()>> + Send;
    fn rename_item(&self, item: &DriveItem, name: &str)
        -> impl Future<Output = Result<()>> + Send;
    fn delete_items_permanently(&self, items: &[DriveItem])
        -> impl Future<Output = Result<()>> + Send;
    fn favorite_items(&self, items: &[DriveItem], favorite: bool)
        -> impl Future<Output = Result<()>> + Send;
    fn share_items_to_user(
        &self,
        items: &[DriveItem],
        receiver_email: &str,
        request_uuid: Option<&str>,
    ) -> impl Future<Output = Result<()>> + Send;

    fn directory_size(
        &self,
        uuid: &str,
        trash: bool,
        sharer_id: u64,
        receiver_id: u64,
    ) -> impl Future<Output = Result<u64>> + Send;
    fn thumbnail(&self, item: &DriveItem) -> impl Future<Output = Result<Vec<u8>>> + Send;

    fn download_file(&self, item: &DriveItem) -> impl Future<Output = Result<()>> + Send;
    fn download_directory(&self, uuid: &str, name: &str)
        -> impl Future<Output = Result<()>> + Send;
    fn download_as_zip(&self, items: &[DriveItem]) -> impl Future<Output = Result<()>> + Send;

    fn contacts_request_send(&self, email: &str) -> impl Future<Output = Result<()>> + Send;
    fn contacts_request_accept(&self, uuid: &str) -> impl Future<Output = Result<()>> + Send;
    fn contacts_request_deny(&self, uuid: &str) -> impl Future<Output = Result<()>> + Send;
    fn contacts_request_remove(&self, uuid: &str) -> impl Future<Output = Result<()>> + Send;
    fn contacts_remove(&self, uuid: &str) -> impl Future<Output = Result<()>> + Send;
    fn contacts_block(&self, email: &str) -> impl Future<Output = Result<()>> + Send;
    fn contacts_unblock(&self, uuid: &str) -> impl Future<Output = Result<()>> + Send;

    fn public_link_status(&self, uuid: &str)
        -> impl Future<Output = Result<PublicLinkStatus>> + Send;
    fn public_link_info(
        &self,
        uuid: &str,
        password: Option<&str>,
        key: &str,
    ) -> impl Future<Output = Result<PublicLinkInfo>> + Send;
}

fn uuids(items: &[DriveItem]) -> Vec<serde_json::Value> {
    items
        .iter()
        .map(|item| json!({ "uuid": item.uuid, "type": item.item_type }))
        .collect()
}

/// HTTP client for the worker gateway
#[derive(Clone)]
pub struct DriveClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl DriveClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            base_url,
            api_key,
            client: Client::new(),
        }
    }

    async fn post<T: DeserializeOwned>(&self, path: &str, body: serde_json::Value) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("Failed to call {}", path))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow::anyhow!("API error ({}): {}", status, error_text));
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .with_context(|| format!("Failed to parse response from {}", path))?;

        if !envelope.status {
            anyhow::bail!("{}", envelope.message);
        }

        envelope
            .data
            .ok_or_else(|| anyhow::anyhow!("Empty response from {}", path))
    }

    /// For endpoints that answer with an envelope but no payload
    async fn post_unit(&self, path: &str, body: serde_json::Value) -> Result<()> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("Failed to call {}", path))?;

        let envelope: Envelope<serde_json::Value> = response
            .json()
            .await
            .with_context(|| format!("Failed to parse response from {}", path))?;

        if !envelope.status {
            anyhow::bail!("{}", envelope.message);
        }
        Ok(())
    }
}

impl Worker for DriveClient {
    async fn base_folder(&self) -> Result<String> {
        #[derive(Deserialize)]
        struct BaseFolder {
            uuid: String,
        }

        let response: BaseFolder = self
            .post("/v3/user/baseFolder", json!({}))
            .await
            .context("Failed to fetch base folder")?;

        Ok(response.uuid)
    }

    async fn list_items(&self, source: &ListingSource) -> Result<Vec<DriveItem>> {
        self.post(source.endpoint(), source.body()).await
    }

    async fn list_contacts(&self) -> Result<Vec<Contact>> {
        self.post("/v3/contacts", json!({})).await
    }

    async fn list_contact_requests_in(&self) -> Result<Vec<ContactRequest>> {
        self.post("/v3/contacts/requests/in", json!({})).await
    }

    async fn list_contact_requests_out(&self) -> Result<Vec<ContactRequest>> {
        self.post("/v3/contacts/requests/out", json!({})).await
    }

    async fn list_blocked_contacts(&self) -> Result<Vec<BlockedContact>> {
        self.post("/v3/contacts/blocked", json!({})).await
    }

    async fn list_conversations(&self) -> Result<Vec<Conversation>> {
        self.post("/v3/chat/conversations", json!({})).await
    }

    async fn create_directory(&self, name: &str, parent: &str) -> Result<DriveItem> {
        self.post("/v3/dir/create", json!({ "name": name, "parent": parent }))
            .await
            .context("Failed to create directory")
    }

    async fn move_items(&self, items: &[DriveItem], parent: &str) -> Result<()> {
        self.post_unit("/v3/items/move", json!({ "items": uuids(items), "parent": parent }))
            .await
            .context("Failed to move items")
    }

    async fn trash_items(&self, items: &[DriveItem]) -> Result<()> {
        self.post_unit("/v3/items/trash", json!({ "items": uuids(items) }))
            .await
            .context("Failed to trash items")
    }

    async fn restore_items(&self, items: &[DriveItem]) -> Result<()> {
        self.post_unit("/v3/items/restore", json!({ "items": uuids(items) }))
            .await
            .context("Failed to restore items")
    }

    async fn rename_item(&self, item: &DriveItem, name: &str) -> Result<()> {
        self.post_unit(
            "/v3/item/rename",
            json!({ "uuid": item.uuid, "type": item.item_type, "name": name }),
        )
        .await
        .context("Failed to rename item")
    }

    async fn delete_items_permanently(&self, items: &[DriveItem]) -> Result<()> {
        self.post_unit("/v3/items/delete/permanent", json!({ "items": uuids(items) }))
            .await
            .context("Failed to delete items")
    }

    async fn favorite_items(&self, items: &[DriveItem], favorite: bool) -> Result<()> {
        self.post_unit(
            "/v3/items/favorite",
            json!({ "items": uuids(items), "favorite": favorite }),
        )
        .await
        .context("Failed to update favorites")
    }

    async fn share_items_to_user(
        &self,
        items: &[DriveItem],
        receiver_email: &str,
        request_uuid: Option<&str>,
    ) -> Result<()> {
        self.post_unit(
            "/v3/items/share",
            json!({
                "items": uuids(items),
                "email": receiver_email,
                "requestUUID": request_uuid,
            }),
        )
        .await
        .context("Failed to share items")
    }

    async fn directory_size(
        &self,
        uuid: &str,
        trash: bool,
        sharer_id: u64,
        receiver_id: u64,
    ) -> Result<u64> {
        #[derive(Deserialize)]
        struct SizeResponse {
            size: u64,
        }

        let response: SizeResponse = self
            .post(
                "/v3/dir/size",
                json!({
                    "uuid": uuid,
                    "trash": trash,
                    "sharerId": sharer_id,
                    "receiverId": receiver_id,
                }),
            )
            .await
            .context("Failed to fetch directory size")?;

        Ok(response.size)
    }

    async fn thumbnail(&self, item: &DriveItem) -> Result<Vec<u8>> {
        let url = format!(
            "{}/v3/file/thumbnail?uuid={}",
            self.base_url,
            urlencoding::encode(&item.uuid)
        );
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .context("Failed to fetch thumbnail")?
            .error_for_status()
            .context("Thumbnail request rejected")?;

        let bytes = response.bytes().await.context("Failed to read thumbnail")?;
        Ok(bytes.to_vec())
    }

    async fn download_file(&self, item: &DriveItem) -> Result<()> {
        self.post_unit("/v3/download/file", json!({ "uuid": item.uuid, "name": item.name }))
            .await
            .context("Failed to start download")
    }

    async fn download_directory(&self, uuid: &str, name: &str) -> Result<()> {
        self.post_unit("/v3/download/dir", json!({ "uuid": uuid, "name": name }))
            .await
            .context("Failed to start directory download")
    }

    async fn download_as_zip(&self, items: &[DriveItem]) -> Result<()> {
        self.post_unit("/v3/download/zip", json!({ "items": uuids(items) }))
            .await
            .context("Failed to start zip download")
    }

    async fn contacts_request_send(&self, email: &str) -> Result<()> {
        self.post_unit("/v3/contacts/requests/send", json!({ "email": email }))
            .await
            .context("Failed to send contact request")
    }

    async fn contacts_request_accept(&self, uuid: &str) -> Result<()> {
        self.post_unit("/v3/contacts/requests/in/accept", json!({ "uuid": uuid }))
            .await
            .context("Failed to accept contact request")
    }

    async fn contacts_request_deny(&self, uuid: &str) -> Result<()> {
        self.post_unit("/v3/contacts/requests/in/deny", json!({ "uuid": uuid }))
            .await
            .context("Failed to deny contact request")
    }

    async fn contacts_request_remove(&self, uuid: &str) -> Result<()> {
        self.post_unit("/v3/contacts/requests/out/delete", json!({ "uuid": uuid }))
            .await
            .context("Failed to remove contact request")
    }

    async fn contacts_remove(&self, uuid: &str) -> Result<()> {
        self.post_unit("/v3/contacts/delete", json!({ "uuid": uuid }))
            .await
            .context("Failed to remove contact")
    }

    async fn contacts_block(&self, email: &str) -> Result<()> {
        self.post_unit("/v3/contacts/blocked/add", json!({ "email": email }))
            .await
            .context("Failed to block contact")
    }

    async fn contacts_unblock(&self, uuid: &str) -> Result<()> {
        self.post_unit("/v3/contacts/blocked/delete", json!({ "uuid": uuid }))
            .await
            .context("Failed to unblock contact")
    }

    async fn public_link_status(&self, uuid: &str) -> Result<PublicLinkStatus> {
        self.post("/v3/dir/link/status", json!({ "uuid": uuid }))
            .await
            .context("Failed to fetch link status")
    }

    async fn public_link_info(
        &self,
        uuid: &str,
        password: Option<&str>,
        key: &str,
    ) -> Result<PublicLinkInfo> {
        self.post(
            "/v3/dir/link/info",
            json!({ "uuid": uuid, "password": password, "key": key }),
        )
        .await
        .context("Failed to fetch link info")
    }
}
