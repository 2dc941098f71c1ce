//! Mouse Input Handler
//!
//! Hit-tests against the areas of the last drawn frame. Left click selects
//! (a plain click lands on release), double click opens, press-and-move drags, right click opens the context
//! menu and the wheel scrolls the list.

use std::time::{Duration, Instant};

use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use tracing::debug;

use crate::logic::selection::ClickModifiers;
use crate::App;

const DOUBLE_CLICK_MS: u64 = 400;
const WHEEL_LINES: isize = 3;

/// Pointer state carried between mouse events
#[derive(Debug, Default)]
pub struct PointerState {
    /// Row the left button went down on
    down: Option<usize>,
    /// A drag started from `down`
    dragging: bool,
    /// Plain click on `down`, applied on release unless a drag starts
    pending_click: bool,
    last_click: Option<(usize, Instant)>,
}

fn is_double_click(last: Option<(usize, Instant)>, row: usize, now: Instant) -> bool {
    last.is_some_and(|(last_row, at)| {
        last_row == row && now.duration_since(at) <= Duration::from_millis(DOUBLE_CLICK_MS)
    })
}

fn click_modifiers(modifiers: KeyModifiers) -> ClickModifiers {
    ClickModifiers {
        shift: modifiers.contains(KeyModifiers::SHIFT),
        toggle: modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER),
    }
}

/// Handle mouse input
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    app.model.record_user_action();
    let (x, y) = (mouse.column, mouse.row);

    // An open menu takes every click: pick an entry or close it
    if app.model.ui.context_menu.is_some() {
        if let MouseEventKind::Down(_) = mouse.kind {
            match app.areas.menu_entry_at(x, y) {
                Some(Some(entry)) => {
                    if let Some(menu) = app.model.ui.context_menu.as_mut() {
                        if entry < menu.entries.len() {
                            menu.cursor = entry;
                            app.activate_menu_entry();
                        }
                    }
                }
                Some(None) => {}
                None => app.model.ui.context_menu = None,
            }
        }
        return;
    }

    if app.model.ui.dialog.is_some() || app.model.ui.preview.is_some() {
        return;
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(entry) = app.areas.sidebar_entry_at(x, y) {
                app.activate_sidebar_entry(entry);
                return;
            }

            let Some(row) = app.areas.row_at(x, y) else {
                if app.areas.in_list(x, y) && mouse.modifiers.is_empty() {
                    app.clear_selection();
                }
                return;
            };

            let now = Instant::now();
            if is_double_click(app.pointer.last_click, row, now) {
                app.pointer.last_click = None;
                app.pointer.down = None;
                app.pointer.pending_click = false;
                app.set_cursor(Some(row));
                app.open_cursor_item();
                return;
            }

            app.pointer.pending_click = app.press_row(row, click_modifiers(mouse.modifiers));
            app.pointer.last_click = Some((row, now));
            app.pointer.down = Some(row);
            app.pointer.dragging = false;
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            let Some(origin) = app.pointer.down else {
                return;
            };
            let over = app.areas.row_at(x, y);
            if !app.pointer.dragging && over != Some(origin) {
                app.start_drag(origin);
                app.pointer.dragging = app.model.ui.drag.is_some();
                app.pointer.pending_click = false;
                app.pointer.last_click = None;
            }
            if app.pointer.dragging {
                app.update_drop_hover(over);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let origin = app.pointer.down.take();
            let pending = std::mem::take(&mut app.pointer.pending_click);
            if std::mem::take(&mut app.pointer.dragging) {
                let target = app.areas.row_at(x, y);
                debug!("Drop at row {:?}", target);
                app.drop_drag(target);
            } else if pending {
                if let Some(row) = origin.filter(|row| app.areas.row_at(x, y) == Some(*row)) {
                    app.click_row(row, ClickModifiers::default());
                }
            }
        }
        MouseEventKind::Down(MouseButton::Right) => {
            if app.areas.sidebar_entry_at(x, y).is_some() {
                return;
            }
            if app.areas.in_list(x, y) {
                let row = app.areas.row_at(x, y);
                app.open_menu(row, (x, y));
            }
        }
        MouseEventKind::ScrollUp => app.scroll_list(-WHEEL_LINES),
        MouseEventKind::ScrollDown => app.scroll_list(WHEEL_LINES),
        _ => {}
    }
}
