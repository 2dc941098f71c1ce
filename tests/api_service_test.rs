//! Integration tests for the background request queue

mod common;

use std::time::Duration;

use common::{dir, FakeWorker};
use drivetui::api::ListingSource;
use drivetui::services::api::{spawn_api_service, ApiRequest, ApiResponse, Priority};
use tokio::time::timeout;

async fn next(rx: &mut tokio::sync::mpsc::UnboundedReceiver<ApiResponse>) -> ApiResponse {
    timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("no response in time")
        .expect("service stopped")
}

#[tokio::test]
async fn test_listing_and_base_folder_round_trip() {
    let worker = FakeWorker::new();
    let (tx, mut rx) = spawn_api_service(worker.clone());

    tx.send(ApiRequest::BaseFolder).unwrap();
    match next(&mut rx).await {
        ApiResponse::BaseFolderResult { uuid } => assert_eq!(uuid.unwrap(), "root"),
        other => panic!("unexpected response: {:?}", other),
    }

    tx.send(ApiRequest::ListItems {
        source: ListingSource::Trash,
        priority: Priority::High,
    })
    .unwrap();
    match next(&mut rx).await {
        ApiResponse::ItemsResult { source, items } => {
            assert_eq!(source, ListingSource::Trash);
            assert!(items.unwrap().is_empty());
        }
        other => panic!("unexpected response: {:?}", other),
    }
}

#[tokio::test]
async fn test_worker_errors_come_back_as_results() {
    let worker = FakeWorker::failing(&["directory_size"]);
    let (tx, mut rx) = spawn_api_service(worker);

    tx.send(ApiRequest::DirectorySize {
        uuid: "d1".to_string(),
        trash: false,
        sharer_id: 0,
        receiver_id: 0,
    })
    .unwrap();

    match next(&mut rx).await {
        ApiResponse::DirectorySizeResult { uuid, size } => {
            assert_eq!(uuid, "d1");
            assert!(size.is_err());
        }
        other => panic!("unexpected response: {:?}", other),
    }
}

#[tokio::test]
async fn test_thumbnail_request_carries_item() {
    let worker = FakeWorker::new();
    let (tx, mut rx) = spawn_api_service(worker.clone());

    tx.send(ApiRequest::Thumbnail {
        item: dir("d1", "Photos"),
    })
    .unwrap();

    match next(&mut rx).await {
        ApiResponse::ThumbnailResult { item, bytes } => {
            assert_eq!(item.uuid, "d1");
            assert!(bytes.is_ok());
        }
        other => panic!("unexpected response: {:?}", other),
    }
    assert_eq!(worker.calls(), vec!["thumbnail Photos"]);
}
