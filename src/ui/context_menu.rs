use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

use crate::model::ContextMenuState;

/// Box for the menu at its anchor, shifted to stay on screen
pub fn menu_area(screen: Rect, menu: &ContextMenuState) -> Rect {
    let longest = menu
        .entries
        .iter()
        .map(|entry| entry.label().len())
        .max()
        .unwrap_or(0) as u16;
    let width = (longest + 6).min(screen.width);
    let height = (menu.entries.len() as u16 + 2).min(screen.height);

    let (x, y) = menu.anchor;
    Rect {
        x: x.min(screen.x + screen.width.saturating_sub(width)),
        y: y.min(screen.y + screen.height.saturating_sub(height)),
        width,
        height,
    }
}

/// Render the context menu; returns the area it occupies
pub fn render_context_menu(f: &mut Frame, menu: &ContextMenuState) -> Rect {
    let area = menu_area(f.area(), menu);

    let items: Vec<ListItem> = menu
        .entries
        .iter()
        .map(|entry| {
            let style = if entry.is_destructive() {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Span::styled(entry.label(), style))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().bg(Color::Black))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(menu.cursor));

    f.render_widget(Clear, area);
    f.render_stateful_widget(list, area, &mut state);
    area
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::actions::ItemAction;
    use crate::model::{MenuEntry, MenuTarget};

    fn menu(anchor: (u16, u16)) -> ContextMenuState {
        ContextMenuState {
            target: MenuTarget::Background,
            entries: vec![
                MenuEntry::Item(ItemAction::Open),
                MenuEntry::Item(ItemAction::DeletePermanently),
            ],
            cursor: 0,
            anchor,
        }
    }

    #[test]
    fn test_menu_fits_its_entries() {
        let area = menu_area(Rect::new(0, 0, 80, 24), &menu((10, 5)));
        assert_eq!(area, Rect::new(10, 5, "Delete permanently".len() as u16 + 6, 4));
    }

    #[test]
    fn test_menu_is_pushed_back_on_screen() {
        let area = menu_area(Rect::new(0, 0, 80, 24), &menu((79, 23)));
        assert_eq!(area.x + area.width, 80);
        assert_eq!(area.y + area.height, 24);
    }
}
