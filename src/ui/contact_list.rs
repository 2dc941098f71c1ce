use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::icons::IconRenderer;
use super::item_list::{draw_virtual_rows, render_placeholder, render_scrollbar};
use crate::logic::contacts::{is_online, ContactView};
use crate::logic::formatting::{format_elapsed, truncate_to_width};
use crate::logic::virtualizer::VirtualRow;
use crate::model::{ContactRow, ContactsModel};

/// Lines drawn per contact row
pub const CONTACT_ROW_HEIGHT: usize = 2;

pub struct ContactListView<'a> {
    pub view: ContactView,
    pub contacts: &'a ContactsModel,
    pub rows: &'a [VirtualRow],
    pub scroll_offset: usize,
    pub total_size: usize,
    pub cursor: Option<usize>,
    pub focused: bool,
    pub now_ms: u64,
    pub online_timeout_ms: u64,
}

/// Tab strip with the active view highlighted and counts per tab
pub fn tabs_line(active: ContactView, contacts: &ContactsModel) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, view) in ContactView::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" │ "));
        }
        let label = match view {
            ContactView::All | ContactView::RequestsIn | ContactView::RequestsOut | ContactView::Blocked => {
                format!("{} ({})", view.label(), contacts.count(*view))
            }
            ContactView::Online | ContactView::Offline => view.label().to_string(),
        };
        let style = if *view == active {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(label, style));
    }
    Line::from(spans)
}

fn row_lines(
    row: &ContactRow,
    icons: &IconRenderer,
    width: usize,
    is_cursor: bool,
    now_ms: u64,
    online_timeout_ms: u64,
) -> Vec<Line<'static>> {
    let prefix = if is_cursor { "> " } else { "  " };
    let title = if row.nick_name().is_empty() {
        row.email().to_string()
    } else {
        row.nick_name().to_string()
    };

    let mut first = vec![Span::raw(prefix)];
    let mut info = String::new();
    if let ContactRow::Contact(contact) = row {
        first.push(icons.presence(is_online(contact, now_ms, online_timeout_ms)));
        if contact.last_active > 0 {
            info = format_elapsed(contact.last_active, now_ms);
        }
    }

    let used: usize = first.iter().map(|s| s.content.width()).sum();
    let room = width.saturating_sub(used);
    if !info.is_empty() && title.width() + 2 + info.width() <= room {
        let padding = room - title.width() - info.width();
        first.push(Span::styled(title, Style::default().add_modifier(Modifier::BOLD)));
        first.push(Span::raw(" ".repeat(padding)));
        first.push(Span::styled(info, Style::default().fg(Color::Rgb(120, 120, 120))));
    } else {
        first.push(Span::styled(
            truncate_to_width(&title, room),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    }

    let second = Line::from(vec![
        Span::raw("    "),
        Span::styled(
            truncate_to_width(row.email(), width.saturating_sub(4)),
            Style::default().fg(Color::Gray),
        ),
    ]);

    vec![Line::from(first), second]
}

/// Render the contacts list. Returns the inner area and the drawn rows.
pub fn render_contact_list(
    f: &mut Frame,
    area: Rect,
    view: ContactListView<'_>,
    icons: &IconRenderer,
) -> (Rect, Vec<(usize, u16, u16)>) {
    let border_color = if view.focused { Color::Cyan } else { Color::White };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(tabs_line(view.view, view.contacts))
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = &view.contacts.rows;
    if rows.is_empty() {
        match view.contacts.error() {
            Some(error) => render_placeholder(f, inner, &format!("Error: {}", error), Color::Red),
            None => render_placeholder(f, inner, "Nothing here", Color::Gray),
        }
        return (inner, Vec::new());
    }

    let width = inner.width.saturating_sub(1) as usize;
    let drawn = draw_virtual_rows(f, inner, view.rows, view.scroll_offset, |index| {
        let Some(row) = rows.get(index) else {
            return (Vec::new(), Style::default());
        };
        let is_cursor = view.focused && view.cursor == Some(index);
        let lines = row_lines(
            row,
            icons,
            width,
            is_cursor,
            view.now_ms,
            view.online_timeout_ms,
        );
        let style = if is_cursor {
            Style::default().bg(Color::DarkGray)
        } else {
            Style::default()
        };
        (lines, style)
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
    use crate::api::{Contact, ContactRequest};

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_contact_row_shows_presence_and_activity() {
        let row = ContactRow::Contact(Contact {
            uuid: "c1".to_string(),
            user_id: 1,
            email: "ana@example.com".to_string(),
            nick_name: "Ana".to_string(),
            last_active: 1_000,
        });
        let lines = row_lines(&row, &IconRenderer::default(), 40, false, 61_000, 60_000);
        assert_eq!(lines.len(), CONTACT_ROW_HEIGHT);
        let first = text(&lines[0]);
        assert!(first.contains("Ana"));
        assert!(first.ends_with("1m"));
        assert!(text(&lines[1]).contains("ana@example.com"));
    }

    #[test]
    fn test_request_row_falls_back_to_email() {
        let row = ContactRow::RequestIn(ContactRequest {
            uuid: "r1".to_string(),
            user_id: 2,
            email: "bo@example.com".to_string(),
            nick_name: String::new(),
        });
        let lines = row_lines(&row, &IconRenderer::default(), 40, true, 0, 0);
        assert!(text(&lines[0]).starts_with("> bo@example.com"));
    }

    #[test]
    fn test_tabs_mark_every_view() {
        let contacts = ContactsModel::new();
        let line = tabs_line(ContactView::All, &contacts);
        let rendered = text(&line);
        for view in ContactView::ALL {
            assert!(rendered.contains(view.label()));
        }
    }
}
