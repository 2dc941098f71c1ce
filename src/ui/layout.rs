use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Sidebar width in columns, borders included
const SIDEBAR_WIDTH: u16 = 22;

/// Layout information for rendering
pub struct LayoutInfo {
    /// Left navigation pane
    pub sidebar_area: Rect,
    /// Item or contact list
    pub list_area: Rect,
    /// Search input area (if visible)
    pub search_area: Option<Rect>,
    /// Hotkey legend area (full width)
    pub legend_area: Rect,
    /// Bottom status bar area
    pub status_area: Rect,
}

/// Calculate the screen layout for all UI components
pub fn calculate_layout(
    terminal_size: Rect,
    legend_height: u16,
    search_visible: bool,
) -> LayoutInfo {
    let search_height = if search_visible { 3 } else { 0 };

    // Content + search + legend + status bar (bottom)
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),                // Sidebar and list
            Constraint::Length(search_height), // Search input (3 lines when visible, 0 when hidden)
            Constraint::Length(legend_height), // Legend area (exact fit for wrapped content)
            Constraint::Length(3),             // Status bar
        ])
        .split(terminal_size);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(10)])
        .split(main_chunks[0]);

    LayoutInfo {
        sidebar_area: content[0],
        list_area: content[1],
        search_area: search_visible.then_some(main_chunks[1]),
        legend_area: main_chunks[2],
        status_area: main_chunks[3],
    }
}

/// Areas of the last drawn frame, kept for mouse hit-testing and for
/// viewport-relative cursor movement
#[derive(Debug, Clone, Default)]
pub struct ScreenAreas {
    pub sidebar: Rect,
    /// Inside of the list block
    pub list_inner: Rect,
    /// Drawn rows: (row index, screen y, height)
    pub rows: Vec<(usize, u16, u16)>,
    /// Context menu box, when one is open
    pub menu: Option<Rect>,
}

fn contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
}

impl ScreenAreas {
    /// Lines available for rows
    pub fn list_viewport(&self) -> usize {
        (self.list_inner.height as usize).max(1)
    }

    pub fn in_list(&self, x: u16, y: u16) -> bool {
        contains(self.list_inner, x, y)
    }

    /// Row under the pointer
    pub fn row_at(&self, x: u16, y: u16) -> Option<usize> {
        if !self.in_list(x, y) {
            return None;
        }
        self.rows
            .iter()
            .find(|(_, top, height)| y >= *top && y < top + height)
            .map(|(index, _, _)| *index)
    }

    /// Sidebar entry under the pointer
    pub fn sidebar_entry_at(&self, x: u16, y: u16) -> Option<usize> {
        if !contains(self.sidebar, x, y) {
            return None;
        }
        // One line per entry inside the border
        y.checked_sub(self.sidebar.y + 1).map(usize::from)
    }

    /// Context menu entry under the pointer; `Some(None)` inside the border
    pub fn menu_entry_at(&self, x: u16, y: u16) -> Option<Option<usize>> {
        let menu = self.menu?;
        if !contains(menu, x, y) {
            return None;
        }
        Some(
            y.checked_sub(menu.y + 1)
                .map(usize::from)
                .filter(|_| y < menu.y + menu.height - 1),
        )
    }

    /// Where a keyboard-opened menu appears: next to the cursor row
    pub fn cursor_anchor(&self, cursor: Option<usize>) -> (u16, u16) {
        let x = self.list_inner.x + 2;
        let y = cursor
            .and_then(|idx| self.rows.iter().find(|(index, _, _)| *index == idx))
            .map(|(_, top, _)| top + 1)
            .unwrap_or(self.list_inner.y);
        (x, y)
    }
}
