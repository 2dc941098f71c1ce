use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Which hotkeys apply right now
#[derive(Clone, Copy, Debug, Default)]
pub struct LegendContext {
    pub vim_mode: bool,
    pub contacts: bool,
    pub trash: bool,
    pub read_only: bool,
    pub search_mode: bool,
    pub has_search_query: bool,
    pub dragging: bool,
}

fn key(spans: &mut Vec<Span<'static>>, key: &'static str, label: &'static str) {
    spans.push(Span::styled(key, Style::default().fg(Color::Yellow)));
    spans.push(Span::raw(label));
}

/// Build hotkey spans (extracted for testability)
fn build_hotkey_spans(ctx: LegendContext) -> Vec<Span<'static>> {
    let mut spans = vec![];

    // Navigation keys (different for vim mode)
    if ctx.vim_mode {
        key(&mut spans, "hjkl", ":Nav  ");
        key(&mut spans, "gg/G", ":First/Last  ");
        key(&mut spans, "^d/^u", ":½Page  ");
    } else {
        key(&mut spans, "↑/↓", ":Nav  ");
        key(&mut spans, "Enter", ":Open  ");
        key(&mut spans, "←", ":Back  ");
    }
    key(&mut spans, "Tab", ":Sidebar  ");

    if ctx.dragging {
        key(&mut spans, "v", ":Drop here  ");
        key(&mut spans, "Esc", ":Cancel move  ");
    }

    // Search key - contextual based on search state
    if ctx.search_mode {
        key(&mut spans, "Esc", ":Exit Search  ");
    } else if ctx.has_search_query {
        key(&mut spans, "Esc", ":Clear Search  ");
    } else {
        let search_key = if ctx.vim_mode { "/" } else { "^F" };
        key(&mut spans, search_key, ":Search  ");
    }

    if ctx.contacts {
        key(&mut spans, "[/]", ":View  ");
        key(&mut spans, "a", ":Add contact  ");
    } else {
        key(&mut spans, "Space", ":Select  ");
        key(&mut spans, "s", ":Sort  ");
        key(&mut spans, "S", ":Reverse  ");
        key(&mut spans, "t", ":Info  ");
        if ctx.trash {
            key(&mut spans, "u", ":Restore  ");
            key(&mut spans, "Del", ":Delete forever  ");
        } else if ctx.read_only {
            key(&mut spans, "d", ":Download  ");
        } else {
            key(&mut spans, "n", ":New folder  ");
            key(&mut spans, "F2", ":Rename  ");
            key(&mut spans, "x", ":Move  ");
            key(&mut spans, "f", ":Favorite  ");
            key(&mut spans, "d", ":Download  ");
            key(&mut spans, "Del", ":Trash  ");
        }
    }

    key(&mut spans, "m", ":Menu  ");
    key(&mut spans, "R", ":Refresh  ");

    // Quit - always available
    key(&mut spans, "q", ":Quit");

    spans
}

/// Build the legend paragraph (reusable for both rendering and height calculation)
pub fn build_legend_paragraph(ctx: LegendContext) -> Paragraph<'static> {
    Paragraph::new(vec![Line::from(build_hotkey_spans(ctx))])
        .block(Block::default().borders(Borders::ALL).title("Hotkeys"))
        .style(Style::default().fg(Color::Gray))
        .wrap(ratatui::widgets::Wrap { trim: false })
}

/// Render the hotkey legend
pub fn render_legend(f: &mut Frame, area: Rect, ctx: LegendContext) {
    f.render_widget(build_legend_paragraph(ctx), area);
}

/// Calculate required height for legend based on terminal width and content
pub fn calculate_legend_height(terminal_width: u16, ctx: LegendContext) -> u16 {
    // line_count() doesn't account for borders when a block is attached
    let paragraph_for_counting = Paragraph::new(vec![Line::from(build_hotkey_spans(ctx))])
        .wrap(ratatui::widgets::Wrap { trim: false });

    let available_width = terminal_width.saturating_sub(2);
    let line_count = paragraph_for_counting.line_count(available_width);

    // Add top + bottom borders, ensure minimum of 3
    (line_count as u16).saturating_add(2).max(3)
}
