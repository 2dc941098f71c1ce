use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::model::{Toast, ToastKind};

fn toast_style(kind: ToastKind) -> (&'static str, Color) {
    match kind {
        ToastKind::Success => ("✓ ", Color::Green),
        ToastKind::Info => ("ℹ ", Color::Cyan),
        ToastKind::Loading => ("… ", Color::Yellow),
        ToastKind::Error => ("✗ ", Color::Red),
    }
}

/// Render the visible toasts stacked near the top, newest last
pub fn render_toasts<'a, I>(f: &mut Frame, area: Rect, toasts: I)
where
    I: IntoIterator<Item = &'a Toast>,
{
    let mut y = area.y + 1;
    for toast in toasts {
        if y + 3 > area.y + area.height {
            break;
        }
        y += render_toast(f, area, y, toast);
    }
}

/// Render one toast at row `y`; returns the height used
fn render_toast(f: &mut Frame, area: Rect, y: u16, toast: &Toast) -> u16 {
    let max_width = (area.width as usize).min(80); // Max 80 chars wide
    let toast_width = (toast.message.width() + 6).min(max_width) as u16;
    let toast_height = 3;

    let toast_area = Rect {
        x: area.x + (area.width.saturating_sub(toast_width)) / 2,
        y,
        width: toast_width,
        height: toast_height,
    };

    // Clear the area first to prevent background bleed-through
    f.render_widget(Clear, toast_area);

    let (icon, color) = toast_style(toast.kind);
    let toast_line = Line::from(vec![
        Span::styled(icon, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::raw(toast.message.as_str()),
    ]);

    let toast_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color).add_modifier(Modifier::BOLD));

    let toast_text = Paragraph::new(vec![toast_line])
        .block(toast_block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });

    f.render_widget(toast_text, toast_area);
    toast_height
}
