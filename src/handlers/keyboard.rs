//! Keyboard Input Handler
//!
//! Handles all keyboard input. Modal layers get the key first, in order:
//! dialog, context menu, preview, search input. Whatever is left goes to
//! the general keymap.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::logic::actions::{ContactAction, ItemAction};
use crate::logic::selection::ClickModifiers;
use crate::model::{DialogState, Focus, Location, VimCommandState};
use crate::services::api::Priority;
use crate::App;

/// Handle keyboard input
///
/// Processes all keyboard events and dispatches to appropriate actions.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Update last user action timestamp for idle detection
    app.model.record_user_action();

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Ctrl-C always quits, even from a prompt
    if ctrl && key.code == KeyCode::Char('c') {
        app.model.ui.should_quit = true;
        return;
    }

    if app.model.ui.dialog.is_some() {
        handle_dialog_key(app, key);
        return;
    }

    if app.model.ui.context_menu.is_some() {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => app.move_menu_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => app.move_menu_cursor(1),
            KeyCode::Enter => app.activate_menu_entry(),
            KeyCode::Esc | KeyCode::Char('m') => app.model.ui.context_menu = None,
            _ => {}
        }
        return;
    }

    if app.model.ui.preview.is_some() {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char(' ')
        ) {
            app.close_preview();
        }
        return;
    }

    if app.model.ui.search_mode {
        handle_search_key(app, key);
        return;
    }

    handle_general_key(app, key);
}

fn handle_dialog_key(app: &mut App, key: KeyEvent) {
    let is_confirm = matches!(app.model.ui.dialog, Some(DialogState::Confirm { .. }));

    if is_confirm {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.answer_confirm(true),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.answer_confirm(false),
            // Ignore other keys while prompt is showing
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Enter => {
            let value = app.dialog_buffer_mut().map(|buffer| buffer.clone());
            app.answer_input(value);
        }
        KeyCode::Esc => app.answer_input(None),
        KeyCode::Backspace => {
            if let Some(buffer) = app.dialog_buffer_mut() {
                buffer.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(buffer) = app.dialog_buffer_mut() {
                buffer.push(c);
            }
        }
        _ => {}
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.clear_search(),
        KeyCode::Enter => {
            // Keep the filter, hand keys back to the list
            app.model.ui.search_mode = false;
        }
        KeyCode::Backspace => {
            app.model.ui.search_query.pop();
            app.rederive_view();
        }
        KeyCode::Char(c) => {
            app.model.ui.search_query.push(c);
            app.rederive_view();
        }
        KeyCode::Up => app.move_cursor(-1),
        KeyCode::Down => app.move_cursor(1),
        _ => {}
    }
}

fn handle_general_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    let vim = app.model.ui.vim_mode;

    // Second key of 'gg'
    if app.model.ui.vim_command_state == VimCommandState::WaitingForSecondG {
        app.model.ui.vim_command_state = VimCommandState::None;
        if key.code == KeyCode::Char('g') {
            app.cursor_to_first();
            return;
        }
    }

    match key.code {
        KeyCode::Char('q') => app.model.ui.should_quit = true,

        // ============================================
        // MOVEMENT
        // ============================================
        KeyCode::Up if shift => app.extend_selection(-1),
        KeyCode::Down if shift => app.extend_selection(1),
        KeyCode::Up => app.move_cursor(-1),
        KeyCode::Down => app.move_cursor(1),
        KeyCode::Char('k') if vim => app.move_cursor(-1),
        KeyCode::Char('j') if vim => app.move_cursor(1),
        KeyCode::Char('d') if vim && ctrl => app.move_cursor(app.page_rows(2)),
        KeyCode::Char('u') if vim && ctrl => app.move_cursor(-app.page_rows(2)),
        KeyCode::Char('f') if vim && ctrl => app.move_cursor(app.page_rows(1)),
        KeyCode::Char('b') if vim && ctrl => app.move_cursor(-app.page_rows(1)),
        KeyCode::Char('g') if vim => {
            app.model.ui.vim_command_state = VimCommandState::WaitingForSecondG;
        }
        KeyCode::Char('G') if vim => app.cursor_to_last(),
        KeyCode::PageDown => app.move_cursor(app.page_rows(1)),
        KeyCode::PageUp => app.move_cursor(-app.page_rows(1)),
        KeyCode::Home => app.cursor_to_first(),
        KeyCode::End => app.cursor_to_last(),

        // ============================================
        // OPEN / BACK / FOCUS
        // ============================================
        KeyCode::Enter | KeyCode::Right => match app.model.navigation.focus {
            Focus::Sidebar => app.activate_sidebar_entry(app.model.navigation.sidebar_cursor),
            Focus::List => app.open_cursor_item(),
        },
        KeyCode::Char('l') if vim => match app.model.navigation.focus {
            Focus::Sidebar => app.activate_sidebar_entry(app.model.navigation.sidebar_cursor),
            Focus::List => app.open_cursor_item(),
        },
        KeyCode::Backspace | KeyCode::Left => app.go_back(),
        KeyCode::Char('h') if vim => app.go_back(),
        KeyCode::Tab => app.toggle_focus(),

        // ============================================
        // SELECTION
        // ============================================
        KeyCode::Char(' ') => app.toggle_cursor_selection(ClickModifiers {
            shift: false,
            toggle: ctrl,
        }),
        KeyCode::Char('a') if ctrl => app.select_all(),

        // ============================================
        // SEARCH
        // ============================================
        KeyCode::Char('/') => app.model.ui.search_mode = true,
        KeyCode::Char('f') if ctrl => app.model.ui.search_mode = true,
        KeyCode::Esc => {
            if app.model.ui.drag.is_some() {
                app.model.ui.cancel_drag();
            } else if !app.clear_selection() {
                app.clear_search();
            }
        }

        // ============================================
        // VIEW
        // ============================================
        KeyCode::Char('s') => app.cycle_sort_mode(),
        KeyCode::Char('S') => app.toggle_sort_reverse(),
        KeyCode::Char('t') => app.cycle_display_mode(),
        KeyCode::Char('R') | KeyCode::F(5) => app.refresh(),
        KeyCode::Char('r') if ctrl => app.load_listing(Priority::High),

        // ============================================
        // MENUS AND ACTIONS
        // ============================================
        KeyCode::Char('m') => app.open_menu_at_cursor(),
        _ if app.model.navigation.location.is_contacts() => handle_contacts_key(app, key),
        _ => handle_drive_key(app, key),
    }
}

fn handle_contacts_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(']') => app.cycle_contact_view(1),
        KeyCode::Char('[') => app.cycle_contact_view(-1),
        KeyCode::Char('a') => app.dispatch_contact_action(ContactAction::SendRequest, None),
        _ => {}
    }
}

fn handle_drive_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return;
    }

    let location = &app.model.navigation.location;
    let in_drive = matches!(location, Location::Drive(_));
    let in_trash = location.is_trash();
    let read_only = location.is_read_only();

    match key.code {
        KeyCode::Char('n') if in_drive => app.dispatch_item_action(ItemAction::NewFolder, Vec::new()),
        KeyCode::F(2) if !read_only && !in_trash => {
            let targets = app.key_targets();
            if targets.len() == 1 {
                app.dispatch_item_action(ItemAction::Rename, targets);
            }
        }
        KeyCode::Delete => {
            let targets = app.key_targets();
            if targets.is_empty() || read_only {
                return;
            }
            let action = if in_trash {
                ItemAction::DeletePermanently
            } else {
                ItemAction::Trash
            };
            app.dispatch_item_action(action, targets);
        }
        KeyCode::Char('u') if in_trash => {
            let targets = app.key_targets();
            if !targets.is_empty() {
                app.dispatch_item_action(ItemAction::Restore, targets);
            }
        }
        KeyCode::Char('d') if !in_trash => {
            let targets = app.key_targets();
            if !targets.is_empty() {
                app.dispatch_item_action(ItemAction::Download, targets);
            }
        }
        KeyCode::Char('f') if !read_only && !in_trash => {
            let targets = app.key_targets();
            if targets.is_empty() {
                return;
            }
            let action = if targets.iter().all(|item| item.favorited) {
                ItemAction::Unfavorite
            } else {
                ItemAction::Favorite
            };
            app.dispatch_item_action(action, targets);
        }
        KeyCode::Char('x') => app.grab_for_move(),
        KeyCode::Char('v') => app.drop_at_cursor(),
        _ => {}
    }
}
