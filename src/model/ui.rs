//! UI Model
//!
//! This sub-model contains all state related to the user interface:
//! preferences, dialogs, popups, and visual state.

use std::time::Instant;

use super::drive::ViewOptions;
use super::types::{ContextMenuState, DialogState, Toast, VimCommandState};
use crate::api::DriveItem;
use crate::logic::drag::DragSession;
use crate::{DisplayMode, SortMode};

/// UI preferences and popups
#[derive(Clone, Debug)]
pub struct UiModel {
    // ============================================
    // PREFERENCES
    // ============================================
    /// Current sort mode
    pub sort_mode: SortMode,

    /// Whether sort is reversed
    pub sort_reverse: bool,

    /// Display mode for file info
    pub display_mode: DisplayMode,

    /// Whether vim keybindings are enabled
    pub vim_mode: bool,

    /// Vim command state (for 'gg' double-key)
    pub vim_command_state: VimCommandState,

    // ============================================
    // DIALOGS & POPUPS
    // ============================================
    /// Prompt raised by a running action
    pub dialog: Option<DialogState>,

    pub context_menu: Option<ContextMenuState>,

    /// Entry shown in the preview popup
    pub preview: Option<DriveItem>,

    /// Visible toasts with the time they appeared
    pub toasts: Vec<(Toast, Instant)>,

    // ============================================
    // SEARCH
    // ============================================
    /// Whether search input is active (receiving keystrokes)
    pub search_mode: bool,

    /// Current search query
    pub search_query: String,

    // ============================================
    // DRAG AND DROP
    // ============================================
    /// Entries picked up by the current gesture
    pub drag: Option<DragSession>,

    /// Row highlighted as the drop target
    pub drop_hover: Option<usize>,

    // ============================================
    // VISUAL STATE
    // ============================================
    /// Last worker error, shown in the status bar until a call succeeds
    pub connection_error: Option<String>,

    /// Sixel cleanup counter (render white screen for N frames)
    pub sixel_cleanup_frames: u8,

    /// Font size for image preview (width, height)
    pub image_font_size: Option<(u16, u16)>,

    /// Whether app should quit
    pub should_quit: bool,
}

impl UiModel {
    /// Create initial UI model with default preferences
    pub fn new(vim_mode: bool) -> Self {
        Self {
            sort_mode: SortMode::Alphabetical,
            sort_reverse: false,
            display_mode: DisplayMode::TimestampAndSize,
            vim_mode,
            vim_command_state: VimCommandState::None,
            dialog: None,
            context_menu: None,
            preview: None,
            toasts: Vec::new(),
            search_mode: false,
            search_query: String::new(),
            drag: None,
            drop_hover: None,
            connection_error: None,
            sixel_cleanup_frames: 0,
            image_font_size: None,
            should_quit: false,
        }
    }

    /// Inputs of the drive view
    pub fn view_options(&self) -> ViewOptions<'_> {
        ViewOptions {
            sort_mode: self.sort_mode,
            reverse: self.sort_reverse,
            search: &self.search_query,
        }
    }

    /// Check if any modal dialog is currently showing
    pub fn has_modal(&self) -> bool {
        self.dialog.is_some() || self.context_menu.is_some() || self.preview.is_some()
    }

    /// Close menus and popups; a pending dialog is answered by the runtime
    pub fn close_popups(&mut self) {
        self.context_menu = None;
        self.preview = None;
    }

    pub fn cancel_drag(&mut self) {
        self.drag = None;
        self.drop_hover = None;
    }

    pub fn show_toast(&mut self, toast: Toast) {
        self.toasts.push((toast, Instant::now()));
    }

    pub fn dismiss_toast(&mut self, id: u64) {
        self.toasts.retain(|(toast, _)| toast.id != id);
    }

    /// Drop toasts that outlived their duration; returns whether any went
    pub fn dismiss_expired_toasts(&mut self) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|(toast, shown_at)| {
            !crate::logic::ui::should_dismiss_toast(shown_at.elapsed().as_millis(), toast.duration_ms)
        });
        self.toasts.len() != before
    }
}
