use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::model::SidebarEntry;

/// Render the navigation sidebar
///
/// `active` is the entry the list pane shows; `cursor` the keyboard
/// highlight when the sidebar has focus.
pub fn render_sidebar(
    f: &mut Frame,
    area: Rect,
    active: SidebarEntry,
    cursor: usize,
    focused: bool,
    pending_requests: usize,
) {
    let items: Vec<ListItem> = SidebarEntry::ALL
        .iter()
        .map(|entry| {
            let mut spans = vec![Span::raw(entry.label())];
            if *entry == SidebarEntry::Contacts && pending_requests > 0 {
                spans.push(Span::styled(
                    format!(" ({})", pending_requests),
                    Style::default().fg(Color::Yellow),
                ));
            }

            let style = if *entry == active {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(spans)).style(style)
        })
        .collect();

    let border_color = if focused { Color::Cyan } else { Color::White };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Drive")
                .border_style(Style::default().fg(border_color)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    if focused {
        state.select(Some(cursor));
    }
    f.render_stateful_widget(list, area, &mut state);
}
