//! Search bar
//!
//! One line of input above the legend. The title names what is being
//! filtered and how many rows survive; drive listings also accept glob
//! patterns, contacts only plain text.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// What the query is filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope<'a> {
    /// Drive listing, named by its breadcrumb
    Items(&'a str),
    /// Contact view, named by its label
    Contacts(&'a str),
}

impl SearchScope<'_> {
    fn noun(&self, count: usize) -> &'static str {
        match (self, count) {
            (SearchScope::Items(_), 1) => "item",
            (SearchScope::Items(_), _) => "items",
            (SearchScope::Contacts(_), 1) => "contact",
            (SearchScope::Contacts(_), _) => "contacts",
        }
    }

    fn name(&self) -> &str {
        match self {
            SearchScope::Items(name) | SearchScope::Contacts(name) => name,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SearchBar<'a> {
    pub query: &'a str,
    /// Receiving keystrokes
    pub active: bool,
    pub scope: SearchScope<'a>,
    /// Rows left after filtering
    pub shown: usize,
    /// Rows in the unfiltered view
    pub total: usize,
    pub vim_mode: bool,
}

pub(crate) fn search_title(bar: &SearchBar) -> String {
    if bar.query.trim().is_empty() {
        let key = if bar.vim_mode { "/" } else { "Ctrl-F" };
        return format!(" Search {} ({}) ", bar.scope.name(), key);
    }

    let action = if bar.active { "Esc cancels" } else { "Esc clears" };
    format!(
        " {}: {} of {} {} | {} ",
        bar.scope.name(),
        bar.shown,
        bar.total,
        bar.scope.noun(bar.total),
        action
    )
}

fn hint(scope: SearchScope) -> &'static str {
    match scope {
        SearchScope::Items(_) => "name or pattern (*.pdf)",
        SearchScope::Contacts(_) => "email or nick name",
    }
}

pub fn render_search_input(f: &mut Frame, area: Rect, bar: SearchBar) {
    let border = match (bar.active, bar.shown) {
        (_, 0) if !bar.query.trim().is_empty() => Color::Red,
        (true, _) => Color::Cyan,
        (false, _) => Color::Gray,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(search_title(&bar))
        .style(Style::default().fg(border));

    let mut spans = vec![Span::styled("/ ", Style::default().fg(Color::DarkGray))];
    if bar.query.is_empty() && bar.active {
        spans.push(Span::styled(hint(bar.scope), Style::default().fg(Color::DarkGray)));
    } else {
        let fg = if bar.active { Color::White } else { Color::Gray };
        spans.push(Span::styled(bar.query, Style::default().fg(fg)));
    }
    if bar.active {
        spans.push(Span::styled(
            "█",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::SLOW_BLINK),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar<'a>(query: &'a str, scope: SearchScope<'static>) -> SearchBar<'a> {
        SearchBar {
            query,
            active: true,
            scope,
            shown: 3,
            total: 12,
            vim_mode: false,
        }
    }

    #[test]
    fn test_title_counts_matches_against_view() {
        let title = search_title(&bar("inv", SearchScope::Items("Drive / Docs")));
        assert_eq!(title, " Drive / Docs: 3 of 12 items | Esc cancels ");

        let mut accepted = bar("ana", SearchScope::Contacts("Online"));
        accepted.active = false;
        assert_eq!(search_title(&accepted), " Online: 3 of 12 contacts | Esc clears ");
    }

    #[test]
    fn test_title_without_query_shows_trigger() {
        let mut empty = bar("  ", SearchScope::Items("Trash"));
        assert_eq!(search_title(&empty), " Search Trash (Ctrl-F) ");
        empty.vim_mode = true;
        assert_eq!(search_title(&empty), " Search Trash (/) ");
    }
}
