//! Preview and prefetch methods
//!
//! The preview popup, thumbnail decoding, and idle-time fetching of
//! directory sizes and thumbnails for the rows on screen.

use tracing::debug;

use crate::api::DriveItem;
use crate::logic;
use crate::services::api::ApiRequest;
use crate::{App, ImageMetadata, ImagePreviewState};

impl App {
    pub(crate) fn open_preview(&mut self, item: DriveItem) {
        debug!("Opening preview of {}", item.name);
        self.model.ui.context_menu = None;

        if logic::file::is_image_file(&item.name)
            && self.image_picker.is_some()
            && !self.image_state_map.contains_key(&item.uuid)
        {
            self.image_state_map
                .insert(item.uuid.clone(), ImagePreviewState::Loading);
            self.model
                .performance
                .requested_thumbnails
                .insert(item.uuid.clone());
            let _ = self.api_tx.send(ApiRequest::Thumbnail { item: item.clone() });
        }

        self.model.ui.preview = Some(item);
    }

    pub(crate) fn close_preview(&mut self) {
        if self.model.ui.preview.take().is_some() {
            // Graphics protocols leave the image behind otherwise
            self.model.ui.sixel_cleanup_frames = 1;
        }
    }

    /// Decode fetched bytes off the UI loop and hand back a protocol
    pub(crate) fn handle_thumbnail(&mut self, item: DriveItem, bytes: Vec<u8>) {
        let Some(picker) = self.image_picker.clone() else {
            return;
        };

        let tx = self.image_update_tx.clone();
        tokio::spawn(async move {
            let uuid = item.uuid.clone();
            let state = match load_image_preview(bytes, picker).await {
                Ok((protocol, metadata)) => ImagePreviewState::Ready { protocol, metadata },
                Err(metadata) => ImagePreviewState::Failed { metadata },
            };
            let _ = tx.send((uuid, state));
        });
    }

    /// Fetch what the visible rows are missing. Called while the user is idle.
    pub(crate) fn prefetch_visible(&mut self) {
        if !self.model.performance.prefetch_enabled || self.model.navigation.location.is_contacts() {
            return;
        }

        let keys = self.model.list_keys();
        let rows = self.model.navigation.virtualizer.range(
            &keys,
            self.model.navigation.scroll_offset,
            self.areas.list_viewport(),
        );

        let location = &self.model.navigation.location;
        let fetch_sizes = !location.is_read_only();
        let trash = location.is_trash();

        for row in rows {
            let Some(item) = self.model.drive.items.get(row.index) else {
                continue;
            };

            if item.is_directory() {
                if !fetch_sizes
                    || self.model.drive.directory_sizes.contains_key(&item.uuid)
                    || self.model.performance.requested_sizes.contains(&item.uuid)
                {
                    continue;
                }
                let (sharer_id, receiver_id) = if item.sharer_id != 0 || item.receiver_id != 0 {
                    (item.sharer_id, item.receiver_id)
                } else {
                    (self.model.drive.sharer_id, self.model.drive.receiver_id)
                };
                self.model
                    .performance
                    .requested_sizes
                    .insert(item.uuid.clone());
                let _ = self.api_tx.send(ApiRequest::DirectorySize {
                    uuid: item.uuid.clone(),
                    trash,
                    sharer_id,
                    receiver_id,
                });
            } else if self.image_picker.is_some()
                && logic::file::should_fetch_thumbnail(item, self.config.thumbnail_max_fetch_size)
                && !self.model.performance.requested_thumbnails.contains(&item.uuid)
            {
                self.model
                    .performance
                    .requested_thumbnails
                    .insert(item.uuid.clone());
                self.image_state_map
                    .insert(item.uuid.clone(), ImagePreviewState::Loading);
                let _ = self.api_tx.send(ApiRequest::Thumbnail { item: item.clone() });
            }
        }
    }
}

async fn load_image_preview(
    bytes: Vec<u8>,
    picker: ratatui_image::picker::Picker,
) -> Result<(ratatui_image::protocol::StatefulProtocol, ImageMetadata), ImageMetadata> {
    let file_size = bytes.len() as u64;

    let img_result = tokio::task::spawn_blocking(move || image::load_from_memory(&bytes)).await;

    let img = match img_result {
        Ok(Ok(img)) => img,
        Ok(Err(e)) => {
            return Err(ImageMetadata {
                dimensions: None,
                format: Some(format!("Decode error: {}", e)),
                file_size,
            });
        }
        Err(e) => {
            return Err(ImageMetadata {
                dimensions: None,
                format: Some(format!("Task error: {}", e)),
                file_size,
            });
        }
    };

    let dimensions = (img.width(), img.height());
    let format = match img.color() {
        image::ColorType::L8 | image::ColorType::L16 => "Grayscale",
        image::ColorType::La8 | image::ColorType::La16 => "Grayscale+Alpha",
        image::ColorType::Rgb8 | image::ColorType::Rgb16 | image::ColorType::Rgb32F => "RGB",
        image::ColorType::Rgba8 | image::ColorType::Rgba16 | image::ColorType::Rgba32F => "RGBA",
        _ => "Unknown",
    };

    // Downscale to roughly a large terminal's worth of cells
    let font_size = picker.font_size();
    let max_width = 200 * font_size.0 as u32 * 5 / 4;
    let max_height = 60 * font_size.1 as u32 * 5 / 4;

    let processed = if img.width() > max_width || img.height() > max_height {
        let scale = (img.width() as f32 / max_width as f32)
            .max(img.height() as f32 / max_height as f32);
        let filter = if scale > 4.0 {
            image::imageops::FilterType::Triangle
        } else if scale > 2.0 {
            image::imageops::FilterType::CatmullRom
        } else {
            image::imageops::FilterType::Lanczos3
        };
        debug!("Downscaling thumbnail by {:.2}x with {:?}", scale, filter);
        img.resize(max_width, max_height, filter)
    } else {
        img
    };

    let protocol = picker.new_resize_protocol(processed);

    Ok((
        protocol,
        ImageMetadata {
            dimensions: Some(dimensions),
            format: Some(format.to_string()),
            file_size,
        },
    ))
}
