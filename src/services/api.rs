use std::collections::{HashSet, VecDeque};
use tokio::sync::mpsc;
use tokio::time::{interval, Duration};
use tracing::{debug, trace};

use crate::api::{DriveItem, ListingSource, Worker};
use crate::services::queries::{self, ContactsSnapshot, QueryKey, QueryResult};

/// Priority level for API requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    High,   // User navigation
    Medium, // Polling
    Low,    // Directory sizes and thumbnails for visible rows
}

/// Unique identifier for deduplicating requests
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum RequestKey {
    List(ListingSource),
    Query(QueryKey),
    RefetchAll,
    DirectorySize(String),
    Thumbnail(String),
    BaseFolder,
}

/// API request types
#[derive(Debug, Clone)]
pub enum ApiRequest {
    /// List the entries of a location
    ListItems {
        source: ListingSource,
        priority: Priority,
    },

    /// Refresh a single contacts query
    FetchQuery { key: QueryKey },

    /// Refresh every contacts query at once
    RefetchAll,

    DirectorySize {
        uuid: String,
        trash: bool,
        sharer_id: u64,
        receiver_id: u64,
    },

    Thumbnail { item: DriveItem },

    /// Resolve the account root
    BaseFolder,
}

impl ApiRequest {
    fn priority(&self) -> Priority {
        match self {
            ApiRequest::ListItems { priority, .. } => *priority,
            ApiRequest::FetchQuery { .. } => Priority::Medium,
            ApiRequest::DirectorySize { .. } | ApiRequest::Thumbnail { .. } => Priority::Low,
            ApiRequest::RefetchAll | ApiRequest::BaseFolder => Priority::High,
        }
    }

    pub(crate) fn key(&self) -> RequestKey {
        match self {
            ApiRequest::ListItems { source, .. } => RequestKey::List(source.clone()),
            ApiRequest::FetchQuery { key } => RequestKey::Query(*key),
            ApiRequest::RefetchAll => RequestKey::RefetchAll,
            ApiRequest::DirectorySize { uuid, .. } => RequestKey::DirectorySize(uuid.clone()),
            ApiRequest::Thumbnail { item } => RequestKey::Thumbnail(item.uuid.clone()),
            ApiRequest::BaseFolder => RequestKey::BaseFolder,
        }
    }
}

/// API response types
#[derive(Debug)]
pub enum ApiResponse {
    ItemsResult {
        source: ListingSource,
        items: Result<Vec<DriveItem>, anyhow::Error>,
    },

    QueryResult(QueryResult),

    RefetchResult(ContactsSnapshot),

    DirectorySizeResult {
        uuid: String,
        size: Result<u64, anyhow::Error>,
    },

    ThumbnailResult {
        item: DriveItem,
        bytes: Result<Vec<u8>, anyhow::Error>,
    },

    BaseFolderResult {
        uuid: Result<String, anyhow::Error>,
    },
}

/// Internal message for tracking completed requests
pub(crate) enum InternalMessage {
    Completed(RequestKey),
}

/// API service worker that processes requests in the background
pub struct ApiService<W: Worker> {
    worker: W,
    request_queue: VecDeque<(ApiRequest, Priority)>,
    in_flight: HashSet<RequestKey>,
    response_tx: mpsc::UnboundedSender<ApiResponse>,
    completion_tx: mpsc::UnboundedSender<InternalMessage>,
    max_concurrent: usize,
}

impl<W: Worker> ApiService<W> {
    pub(crate) fn new(
        worker: W,
        response_tx: mpsc::UnboundedSender<ApiResponse>,
        completion_tx: mpsc::UnboundedSender<InternalMessage>,
    ) -> Self {
        Self {
            worker,
            request_queue: VecDeque::new(),
            in_flight: HashSet::new(),
            response_tx,
            completion_tx,
            max_concurrent: 10, // Limit concurrent worker calls
        }
    }

    fn is_pending(&self, key: &RequestKey) -> bool {
        self.in_flight.contains(key) || self.request_queue.iter().any(|(r, _)| r.key() == *key)
    }

    /// Add a request to the queue, dropping duplicates of pending ones
    pub(crate) fn enqueue(&mut self, request: ApiRequest) -> bool {
        let key = request.key();
        if self.is_pending(&key) {
            trace!("Skipping duplicate request {:?}", key);
            return false;
        }

        let priority = request.priority();

        // Insert based on priority (high priority at front)
        let insert_pos = self
            .request_queue
            .iter()
            .position(|(_, p)| *p > priority)
            .unwrap_or(self.request_queue.len());

        self.request_queue.insert(insert_pos, (request, priority));
        true
    }

    #[cfg(test)]
    pub(crate) fn queued(&self) -> impl Iterator<Item = &ApiRequest> {
        self.request_queue.iter().map(|(request, _)| request)
    }

    pub(crate) fn complete(&mut self, key: &RequestKey) {
        self.in_flight.remove(key);
    }

    /// Process the next request from the queue
    fn process_next(&mut self) {
        if self.in_flight.len() >= self.max_concurrent {
            return; // At capacity, wait for some to complete
        }

        let Some((request, _)) = self.request_queue.pop_front() else {
            return;
        };

        let key = request.key();
        self.in_flight.insert(key.clone());

        let worker = self.worker.clone();
        let response_tx = self.response_tx.clone();
        let completion_tx = self.completion_tx.clone();

        // No per-request retries; the next poll or navigation asks again
        tokio::spawn(async move {
            let response = Self::execute_request(&worker, request).await;
            let _ = response_tx.send(response);
            let _ = completion_tx.send(InternalMessage::Completed(key));
        });
    }

    async fn execute_request(worker: &W, request: ApiRequest) -> ApiResponse {
        match request {
            ApiRequest::ListItems { source, .. } => {
                let items = worker.list_items(&source).await;
                ApiResponse::ItemsResult { source, items }
            }

            ApiRequest::FetchQuery { key } => {
                ApiResponse::QueryResult(queries::fetch(worker, key).await)
            }

            ApiRequest::RefetchAll => ApiResponse::RefetchResult(queries::refetch_all(worker).await),

            ApiRequest::DirectorySize {
                uuid,
                trash,
                sharer_id,
                receiver_id,
            } => {
                let size = worker
                    .directory_size(&uuid, trash, sharer_id, receiver_id)
                    .await;
                ApiResponse::DirectorySizeResult { uuid, size }
            }

            ApiRequest::Thumbnail { item } => {
                let bytes = worker.thumbnail(&item).await;
                ApiResponse::ThumbnailResult { item, bytes }
            }

            ApiRequest::BaseFolder => ApiResponse::BaseFolderResult {
                uuid: worker.base_folder().await,
            },
        }
    }
}

/// Spawn the API service worker
pub fn spawn_api_service<W: Worker>(
    worker: W,
) -> (
    mpsc::UnboundedSender<ApiRequest>,
    mpsc::UnboundedReceiver<ApiResponse>,
) {
    let (request_tx, mut request_rx) = mpsc::unbounded_channel::<ApiRequest>();
    let (response_tx, response_rx) = mpsc::unbounded_channel::<ApiResponse>();
    let (completion_tx, mut completion_rx) = mpsc::unbounded_channel::<InternalMessage>();

    tokio::spawn(async move {
        let mut service = ApiService::new(worker, response_tx, completion_tx);

        // Ticker for processing queue
        let mut tick = interval(Duration::from_millis(10));

        loop {
            tokio::select! {
                request = request_rx.recv() => {
                    match request {
                        Some(request) => {
                            service.enqueue(request);
                        }
                        None => {
                            debug!("API request channel closed, stopping service");
                            break;
                        }
                    }
                }

                Some(InternalMessage::Completed(key)) = completion_rx.recv() => {
                    service.complete(&key);
                    if !service.in_flight.is_empty() {
                        trace!("{} requests in flight", service.in_flight.len());
                    }
                }

                _ = tick.tick() => {
                    // Process multiple requests per tick if queue has items
                    for _ in 0..5 {
                        if service.request_queue.is_empty() {
                            break;
                        }
                        service.process_next();
                    }
                }
            }
        }
    });

    (request_tx, response_rx)
}
