use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// What the status bar reports for the current frame
pub struct StatusInfo<'a> {
    pub location: &'a str,
    pub item_count: usize,
    pub selected_count: usize,
    pub sort_mode: &'a str,
    pub sort_reverse: bool,
    pub last_load_time_ms: Option<u64>,
    pub moving: Option<usize>,
    pub connection_error: Option<&'a str>,
}

/// "Label: value" parts joined by " | "
fn status_line(info: &StatusInfo<'_>) -> String {
    let mut metrics = vec![format!("In: {}", info.location)];

    metrics.push(format!("{} items", info.item_count));
    if info.selected_count > 0 {
        metrics.push(format!("Selected: {}", info.selected_count));
    }

    metrics.push(format!(
        "Sort: {}{}",
        info.sort_mode,
        if info.sort_reverse { "↓" } else { "↑" }
    ));

    if let Some(load_time) = info.last_load_time_ms {
        metrics.push(format!("Load: {}ms", load_time));
    }

    if let Some(count) = info.moving {
        metrics.push(format!("Moving: {} item(s)", count));
    }

    if let Some(error) = info.connection_error {
        metrics.push(format!("Offline: {}", error));
    }

    metrics.join(" | ")
}

/// Render the bottom status bar
pub fn render_status_bar(f: &mut Frame, area: Rect, info: StatusInfo<'_>) {
    let line = status_line(&info);

    let mut spans = vec![];
    for (idx, part) in line.split(" | ").enumerate() {
        if idx > 0 {
            spans.push(Span::raw(" | "));
        }

        if part.starts_with("Offline:") {
            spans.push(Span::styled(part.to_string(), Style::default().fg(Color::Red)));
        } else if let Some(colon_pos) = part.find(':') {
            // Split on first colon to separate label from value
            let label = &part[..=colon_pos];
            let value = &part[colon_pos + 1..];
            spans.push(Span::styled(label.to_string(), Style::default().fg(Color::Yellow)));
            spans.push(Span::raw(value.to_string()));
        } else {
            spans.push(Span::raw(part.to_string()));
        }
    }

    let status_bar = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(Style::default().fg(Color::Gray));

    f.render_widget(status_bar, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> StatusInfo<'static> {
        StatusInfo {
            location: "Drive / Docs",
            item_count: 12,
            selected_count: 0,
            sort_mode: "A-Z",
            sort_reverse: false,
            last_load_time_ms: Some(42),
            moving: None,
            connection_error: None,
        }
    }

    #[test]
    fn test_status_line_parts() {
        assert_eq!(
            status_line(&info()),
            "In: Drive / Docs | 12 items | Sort: A-Z↑ | Load: 42ms"
        );
    }

    #[test]
    fn test_status_line_reports_selection_and_errors() {
        let line = status_line(&StatusInfo {
            selected_count: 3,
            sort_reverse: true,
            connection_error: Some("timed out"),
            ..info()
        });
        assert!(line.contains("Selected: 3"));
        assert!(line.contains("Sort: A-Z↓"));
        assert!(line.ends_with("Offline: timed out"));
    }
}
