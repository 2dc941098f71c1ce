use std::collections::HashMap;

use ratatui::{
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::icons::IconRenderer;
use crate::api::DriveItem;
use crate::logic::drag::DragSession;
use crate::logic::formatting::{format_bytes, format_timestamp, truncate_to_width};
use crate::logic::virtualizer::VirtualRow;
use crate::DisplayMode;

const INFO_STYLE: Style = Style::new().fg(Color::Rgb(120, 120, 120));

/// Everything the drive list needs from the model for one frame
pub struct ItemListView<'a> {
    pub title: Line<'a>,
    pub items: &'a [DriveItem],
    pub rows: &'a [VirtualRow],
    pub scroll_offset: usize,
    pub total_size: usize,
    pub cursor: Option<usize>,
    pub drop_hover: Option<usize>,
    pub drag: Option<&'a DragSession>,
    pub directory_sizes: &'a HashMap<String, u64>,
    pub display_mode: DisplayMode,
    pub focused: bool,
    pub loading: bool,
    pub error: Option<&'a str>,
}

/// Size and timestamp column; directories show their size once measured
fn info_string(item: &DriveItem, size: Option<u64>, display_mode: DisplayMode) -> String {
    let timestamp = if item.last_modified > 0 {
        format_timestamp(item.last_modified)
    } else {
        String::new()
    };

    match display_mode {
        DisplayMode::Off => String::new(),
        DisplayMode::TimestampOnly => timestamp,
        DisplayMode::TimestampAndSize => match size {
            Some(size) => format!("{:>10}  {}", format_bytes(size), timestamp)
                .trim_end()
                .to_string(),
            None => timestamp,
        },
    }
}

/// Build a row with icons, name and the right-aligned info column
fn build_row<'a>(
    item: &'a DriveItem,
    icons: Vec<Span<'static>>,
    info: String,
    width: usize,
    is_cursor: bool,
) -> Line<'a> {
    let prefix = if is_cursor { "> " } else { "  " };
    let icon_width: usize = icons.iter().map(|s| s.content.width()).sum();
    let fixed = prefix.width() + icon_width;

    let info_width = info.width();
    let name_room = width.saturating_sub(fixed);

    let mut spans = vec![Span::raw(prefix)];
    spans.extend(icons);

    // Everything fits: pad between name and info
    if !info.is_empty() && item.name.width() + 2 + info_width <= name_room {
        let padding = name_room - item.name.width() - info_width;
        spans.push(Span::raw(item.name.as_str()));
        spans.push(Span::raw(" ".repeat(padding)));
        spans.push(Span::styled(info, INFO_STYLE));
        return Line::from(spans);
    }

    // Not enough room for info, just show name
    spans.push(Span::raw(truncate_to_width(&item.name, name_room)));
    Line::from(spans)
}

/// Draw virtual rows into `inner`. Returns (index, screen y, height) of
/// every row that landed on screen.
pub(super) fn draw_virtual_rows<'a, F>(
    f: &mut Frame,
    inner: Rect,
    rows: &[VirtualRow],
    scroll_offset: usize,
    mut build: F,
) -> Vec<(usize, u16, u16)>
where
    F: FnMut(usize) -> (Vec<Line<'a>>, Style),
{
    let mut drawn = Vec::new();
    let viewport = inner.height as isize;

    for row in rows {
        let top = row.start as isize - scroll_offset as isize;
        let bottom = top + row.size as isize;
        if bottom <= 0 || top >= viewport {
            continue;
        }

        let visible_top = top.max(0);
        let visible_bottom = bottom.min(viewport);
        let area = Rect {
            x: inner.x,
            y: inner.y + visible_top as u16,
            width: inner.width,
            height: (visible_bottom - visible_top) as u16,
        };

        let (lines, style) = build(row.index);
        // Rows cut by the top edge scroll their first lines away
        let skip = (visible_top - top) as u16;
        f.render_widget(Paragraph::new(lines).style(style).scroll((skip, 0)), area);
        drawn.push((row.index, area.y, area.height));
    }

    drawn
}

pub(super) fn render_scrollbar(f: &mut Frame, area: Rect, total: usize, viewport: usize, offset: usize) {
    if total <= viewport {
        return;
    }
    let mut state = ScrollbarState::new(total.saturating_sub(viewport)).position(offset);
    f.render_stateful_widget(
        Scrollbar::new(ScrollbarOrientation::VerticalRight),
        area.inner(Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut state,
    );
}

/// Placeholder text for an empty pane
pub(super) fn render_placeholder(f: &mut Frame, inner: Rect, text: &str, color: Color) {
    f.render_widget(
        Paragraph::new(Span::styled(text.to_string(), Style::default().fg(color))),
        inner,
    );
}

/// Render the drive list. Returns the inner area and the drawn rows.
pub fn render_item_list(
    f: &mut Frame,
    area: Rect,
    view: ItemListView<'_>,
    icons: &IconRenderer,
) -> (Rect, Vec<(usize, u16, u16)>) {
    let border_color = if view.focused { Color::Cyan } else { Color::White };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(view.title.clone())
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if view.items.is_empty() {
        let (text, color) = match (view.error, view.loading) {
            (Some(error), _) => (format!("Error: {}", error), Color::Red),
            (None, true) => ("Loading...".to_string(), Color::Gray),
            (None, false) => ("This folder is empty".to_string(), Color::Gray),
        };
        render_placeholder(f, inner, &text, color);
        return (inner, Vec::new());
    }

    // Leave the last column for the scrollbar
    let width = inner.width.saturating_sub(1) as usize;
    let items = view.items;
    let drawn = draw_virtual_rows(f, inner, view.rows, view.scroll_offset, |index| {
        let Some(item) = items.get(index) else {
            return (Vec::new(), Style::default());
        };
        let is_cursor = view.focused && view.cursor == Some(index);
        let size = if item.is_directory() {
            view.directory_sizes.get(&item.uuid).copied()
        } else {
            Some(item.size)
        };

        let line = build_row(
            item,
            icons.item(item.is_directory(), item.selected, item.favorited),
            info_string(item, size, view.display_mode),
            width,
            is_cursor,
        );

        let mut style = Style::default();
        if view.drag.is_some_and(|drag| drag.contains(&item.uuid)) {
            style = style.fg(Color::DarkGray);
        }
        if view.drop_hover == Some(index) {
            style = style.bg(Color::Blue).add_modifier(Modifier::BOLD);
        } else if is_cursor {
            style = style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
        }
        (vec![line], style)
    });

    render_scrollbar(
        f,
        area,
        view.total_size,
        inner.height as usize,
        view.scroll_offset,
    );

    (inner, drawn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ItemType;

    fn item(name: &str, item_type: ItemType, size: u64) -> DriveItem {
        DriveItem {
            uuid: name.to_string(),
            name: name.to_string(),
            item_type,
            size,
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

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_info_hides_unknown_directory_size() {
        let dir = item("Docs", ItemType::Directory, 0);
        assert_eq!(info_string(&dir, None, DisplayMode::TimestampAndSize), "");
        assert_eq!(
            info_string(&dir, Some(2048), DisplayMode::TimestampAndSize).trim(),
            "2.00 KB"
        );
        assert_eq!(info_string(&dir, Some(2048), DisplayMode::Off), "");
    }

    #[test]
    fn test_row_right_aligns_info() {
        let file = item("a.txt", ItemType::File, 10);
        let line = build_row(&file, vec![Span::raw("📄 ")], "10 B".to_string(), 30, true);
        let rendered = text(&line);
        assert!(rendered.starts_with("> 📄 a.txt"));
        assert!(rendered.ends_with("10 B"));
        assert_eq!(rendered.width(), 30);
    }

    #[test]
    fn test_row_drops_info_when_narrow() {
        let file = item("a-very-long-file-name.txt", ItemType::File, 10);
        let line = build_row(&file, Vec::new(), "10 B".to_string(), 12, false);
        let rendered = text(&line);
        assert!(!rendered.contains("10 B"));
        assert!(rendered.width() <= 12);
    }
}
