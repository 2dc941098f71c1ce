//! API Response Handler
//!
//! Handles responses from the worker's background request queue.
//! Processes listings, contact queries, directory sizes, thumbnails and the
//! account root.

use tracing::{debug, warn};

use crate::logic;
use crate::model::Location;
use crate::services::api::{ApiResponse, Priority};
use crate::{App, ImageMetadata, ImagePreviewState};

/// Handle API response from background service
///
/// Response types:
/// - ItemsResult: Listing for a location (dropped when stale)
/// - QueryResult / RefetchResult: Contact queries
/// - DirectorySizeResult: Recursive size of one directory
/// - ThumbnailResult: Image bytes for the preview
/// - BaseFolderResult: Uuid of the drive root
pub fn handle_api_response(app: &mut App, response: ApiResponse) {
    match response {
        ApiResponse::ItemsResult { source, items } => {
            // Only the listing the user is looking at is relevant
            if app.model.navigation.location.listing_source().as_ref() != Some(&source) {
                debug!("Dropping stale listing for {:?}", source);
                return;
            }

            let items = match items {
                Ok(items) => items,
                Err(e) => {
                    warn!("Failed to list {:?}: {:#}", source, e);
                    let message = logic::errors::format_error_message(&e);
                    app.model.drive.loading = false;
                    app.model.drive.error = Some(message.clone());
                    app.model.ui.connection_error = Some(message);
                    app.model.performance.finish_load();
                    return;
                }
            };

            debug!("Listing {:?}: {} entries", source, items.len());
            app.model.ui.connection_error = None;

            let names = items
                .iter()
                .filter(|item| item.is_directory())
                .map(|item| (item.uuid.as_str(), item.name.as_str()));
            if let Err(e) = app.cache.save_directory_names(names) {
                warn!("Failed to cache directory names: {:#}", e);
            }

            let options = app.model.ui.view_options();
            app.model.drive.set_listing(source, items, options);
            app.model.performance.finish_load();

            let keys = app.model.list_keys();
            app.model.navigation.virtualizer.retain(&keys);
            let len = keys.len();
            app.model.navigation.cursor = logic::navigation::clamp_cursor(
                app.model.navigation.cursor.or(Some(0)),
                len,
            );
        }

        ApiResponse::QueryResult(result) => app.apply_query_result(result),

        ApiResponse::RefetchResult(snapshot) => app.apply_contacts_snapshot(snapshot),

        ApiResponse::DirectorySizeResult { uuid, size } => match size {
            Ok(size) => {
                if let Err(e) = app.cache.save_directory_size(&uuid, size) {
                    warn!("Failed to cache size of {}: {:#}", uuid, e);
                }
                app.model.drive.directory_sizes.insert(uuid, size);
            }
            Err(e) => {
                // Leave it requested so it is not retried every frame
                debug!("Directory size of {} failed: {:#}", uuid, e);
            }
        },

        ApiResponse::ThumbnailResult { item, bytes } => match bytes {
            Ok(bytes) => app.handle_thumbnail(item, bytes),
            Err(e) => {
                debug!("Thumbnail of {} failed: {:#}", item.name, e);
                app.image_state_map.insert(
                    item.uuid,
                    ImagePreviewState::Failed {
                        metadata: ImageMetadata {
                            dimensions: None,
                            format: Some(logic::errors::format_error_message(&e)),
                            file_size: item.size,
                        },
                    },
                );
            }
        },

        ApiResponse::BaseFolderResult { uuid } => match uuid {
            Ok(uuid) => {
                debug!("Drive root is {}", uuid);
                app.model.ui.connection_error = None;
                app.model.drive.names.insert(uuid.clone(), "Drive".to_string());
                app.model.drive.root_uuid = Some(uuid.clone());

                if app.model.navigation.location == Location::Drive(Vec::new()) {
                    app.model.navigation.replace(Location::Drive(vec![uuid]));
                    app.load_listing(Priority::High);
                }
            }
            Err(e) => {
                warn!("Failed to resolve drive root: {:#}", e);
                let message = logic::errors::format_error_message(&e);
                app.model.drive.loading = false;
                app.model.drive.error = Some(message.clone());
                app.model.ui.connection_error = Some(message);
            }
        },
    }
}
