use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::logic::actions::{ButtonVariant, ConfirmDialog, InputDialog};
use crate::model::DialogState;

/// Centered box of the given size, clamped to the screen
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

pub fn render_dialog(f: &mut Frame, dialog: &DialogState) {
    match dialog {
        DialogState::Confirm { dialog } => render_confirm(f, dialog),
        DialogState::Input { dialog, buffer } => render_input(f, dialog, buffer),
    }
}

/// Render a yes/no confirmation (trash, delete, remove, block)
fn render_confirm(f: &mut Frame, dialog: &ConfirmDialog) {
    let border_color = match dialog.variant {
        ButtonVariant::Destructive => Color::Red,
        ButtonVariant::Default => Color::Yellow,
    };

    let lines = vec![
        Line::from(dialog.description.as_str()),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(Color::Yellow)),
            Span::raw(format!(":{}  ", dialog.confirm_label)),
            Span::styled("n", Style::default().fg(Color::Yellow)),
            Span::raw(":Cancel"),
        ]),
    ];

    let prompt_area = centered(f.area(), 56, 8);
    let prompt = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(dialog.title.as_str())
                .border_style(Style::default().fg(border_color)),
        )
        .style(Style::default().fg(Color::White).bg(Color::Black))
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, prompt_area);
    f.render_widget(prompt, prompt_area);
}

/// Text shown in the input line; secrets are masked
pub fn displayed_value(dialog: &InputDialog, buffer: &str) -> String {
    if dialog.secret {
        "•".repeat(buffer.chars().count())
    } else {
        buffer.to_string()
    }
}

/// Render a single-line input (new folder, rename, share, contact, password)
fn render_input(f: &mut Frame, dialog: &InputDialog, buffer: &str) {
    let cursor_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::SLOW_BLINK);

    let input_line = if buffer.is_empty() {
        Line::from(vec![
            Span::styled("█", cursor_style),
            Span::styled(dialog.placeholder.as_str(), Style::default().fg(Color::DarkGray)),
        ])
    } else {
        Line::from(vec![
            Span::raw(displayed_value(dialog, buffer)),
            Span::styled("█", cursor_style),
        ])
    };

    let lines = vec![
        input_line,
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw(format!(":{}  ", dialog.confirm_label)),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::raw(":Cancel"),
        ]),
    ];

    let prompt_area = centered(f.area(), 56, 7);
    let prompt = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(dialog.title.as_str())
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White).bg(Color::Black));

    f.render_widget(Clear, prompt_area);
    f.render_widget(prompt, prompt_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_input_is_masked() {
        let dialog = InputDialog::link_password();
        assert!(dialog.secret);
        assert_eq!(displayed_value(&dialog, "hunter2"), "•••••••");
        assert_eq!(displayed_value(&InputDialog::share(), "a@b.c"), "a@b.c");
    }

    #[test]
    fn test_centered_is_clamped() {
        let area = centered(Rect::new(0, 0, 40, 5), 56, 8);
        assert_eq!(area, Rect::new(0, 0, 40, 5));
        let area = centered(Rect::new(0, 0, 100, 20), 56, 8);
        assert_eq!(area, Rect::new(22, 6, 56, 8));
    }
}
