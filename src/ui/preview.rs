use std::collections::HashMap;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use ratatui_image::StatefulImage;

use crate::api::DriveItem;
use crate::logic::file::{preview_type, PreviewType};
use crate::logic::formatting::{format_bytes, format_timestamp};
use crate::ImagePreviewState;

fn kind_label(kind: PreviewType) -> &'static str {
    match kind {
        PreviewType::Image => "Image",
        PreviewType::Video => "Video",
        PreviewType::Audio => "Audio",
        PreviewType::Text => "Text",
        PreviewType::Code => "Source code",
        PreviewType::Markdown => "Markdown",
        PreviewType::Pdf => "PDF document",
        PreviewType::Docx => "Word document",
        PreviewType::Other => "File",
    }
}

fn field(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(Color::Yellow)),
        Span::raw(value),
    ])
}

/// Metadata lines shown beside the preview
fn metadata_lines(item: &DriveItem, image: Option<&ImagePreviewState>) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            item.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        field("Type: ", kind_label(preview_type(&item.name)).to_string()),
        field("Size: ", format_bytes(item.size)),
    ];
    if item.last_modified > 0 {
        lines.push(field("Modified: ", format_timestamp(item.last_modified)));
    }
    if !item.sharer_email.is_empty() {
        lines.push(field("Shared by: ", item.sharer_email.clone()));
    }
    if !item.receivers.is_empty() {
        let emails: Vec<&str> = item.receivers.iter().map(|r| r.email.as_str()).collect();
        lines.push(field("Shared with: ", emails.join(", ")));
    }

    match image {
        Some(ImagePreviewState::Ready { metadata, .. }) | Some(ImagePreviewState::Failed { metadata }) => {
            if let Some((w, h)) = metadata.dimensions {
                lines.push(field("Dimensions: ", format!("{}x{}", w, h)));
            }
            if let Some(format) = &metadata.format {
                lines.push(field("Format: ", format.clone()));
            }
        }
        _ => {}
    }

    lines
}

/// Render the preview popup for a file
pub fn render_preview(
    f: &mut Frame,
    item: &DriveItem,
    image_state_map: &mut HashMap<String, ImagePreviewState>,
) {
    let screen = f.area();
    let area = Rect {
        x: screen.x + screen.width / 10,
        y: screen.y + screen.height / 10,
        width: screen.width - screen.width / 5,
        height: screen.height - screen.height / 5,
    };
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Preview (Esc to close) ")
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let image = image_state_map.get_mut(&item.uuid);
    let has_image = matches!(image, Some(ImagePreviewState::Ready { .. }));
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(if has_image {
            [Constraint::Length(36), Constraint::Min(10)]
        } else {
            [Constraint::Percentage(100), Constraint::Length(0)]
        })
        .split(inner);

    let mut lines = metadata_lines(item, image.as_deref());
    match &image {
        Some(ImagePreviewState::Loading) => {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Loading preview...",
                Style::default().fg(Color::Gray),
            )));
        }
        Some(ImagePreviewState::Failed { .. }) => {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Preview unavailable",
                Style::default().fg(Color::Red),
            )));
        }
        _ => {}
    }
    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }),
        chunks[0],
    );

    if let Some(ImagePreviewState::Ready { protocol, .. }) = image {
        f.render_stateful_widget(StatefulImage::default(), chunks[1], protocol);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ItemReceiver, ItemType};
    use crate::ImageMetadata;

    fn text(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn photo() -> DriveItem {
        DriveItem {
            uuid: "p1".to_string(),
            name: "beach.jpg".to_string(),
            item_type: ItemType::File,
            size: 2048,
            last_modified: 0,
            favorited: false,
            parent: String::new(),
            sharer_id: 0,
            sharer_email: String::new(),
            receiver_id: 0,
            receiver_email: String::new(),
            receivers: vec![ItemReceiver {
                id: 7,
                email: "bo@example.com".to_string(),
            }],
            selected: false,
        }
    }

    #[test]
    fn test_metadata_lists_type_size_and_receivers() {
        let rendered = text(&metadata_lines(&photo(), None));
        assert!(rendered.contains("Type: Image"));
        assert!(rendered.contains("Size: 2.00 KB"));
        assert!(rendered.contains("Shared with: bo@example.com"));
        assert!(!rendered.contains("Modified"));
    }

    #[test]
    fn test_metadata_includes_decoded_dimensions() {
        let state = ImagePreviewState::Failed {
            metadata: ImageMetadata {
                dimensions: Some((640, 480)),
                format: Some("Jpeg".to_string()),
                file_size: 2048,
            },
        };
        let rendered = text(&metadata_lines(&photo(), Some(&state)));
        assert!(rendered.contains("Dimensions: 640x480"));
        assert!(rendered.contains("Format: Jpeg"));
    }
}
