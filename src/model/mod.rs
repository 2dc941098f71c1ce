//! Pure Application Model - Elm Architecture
//!
//! This module defines the pure, cloneable state for the application.
//! The Model is organized into focused sub-models for maintainability:
//!
//! - **DriveModel**: Listing data, caches and moves in flight
//! - **ContactsModel**: Polled contact queries and derived rows
//! - **NavigationModel**: Location, history, focus, cursor
//! - **UiModel**: User preferences, dialogs, popups
//! - **PerformanceModel**: Prefetch tracking, idle detection
//!
//! Key principles:
//! - Clone + Debug: Can snapshot state
//! - No services: All I/O lives in Runtime
//! - Pure accessors: Helper methods are side-effect free

pub mod contacts;
pub mod drive;
pub mod navigation;
pub mod performance;
pub mod types;
pub mod ui;

pub use contacts::ContactsModel;
pub use drive::{DriveModel, SelectionPolicy, ViewOptions};
pub use navigation::NavigationModel;
pub use performance::PerformanceModel;
pub use types::*;
pub use ui::UiModel;

use crate::api::DriveItem;

/// Root application model composed of focused sub-models
#[derive(Clone, Debug)]
pub struct Model {
    pub drive: DriveModel,
    pub contacts: ContactsModel,
    pub navigation: NavigationModel,
    pub ui: UiModel,
    pub performance: PerformanceModel,
}

impl Model {
    /// Create initial model with default settings
    pub fn new(location: Location, vim_mode: bool, overscan: usize) -> Self {
        Self {
            drive: DriveModel::new(),
            contacts: ContactsModel::new(),
            navigation: NavigationModel::new(location, overscan),
            ui: UiModel::new(vim_mode),
            performance: PerformanceModel::new(),
        }
    }

    /// Inputs of the drive view from the UI preferences
    pub fn view_options(&self) -> ViewOptions<'_> {
        self.ui.view_options()
    }

    /// Number of rows in the list pane
    pub fn list_len(&self) -> usize {
        if self.navigation.location.is_contacts() {
            self.contacts.rows.len()
        } else {
            self.drive.items.len()
        }
    }

    /// Stable keys of the list pane rows, for the virtualizer
    pub fn list_keys(&self) -> Vec<String> {
        if self.navigation.location.is_contacts() {
            self.contacts
                .rows
                .iter()
                .map(|row| row.uuid().to_string())
                .collect()
        } else {
            self.drive.items.iter().map(|item| item.uuid.clone()).collect()
        }
    }

    /// Drive entry under the cursor
    pub fn cursor_item(&self) -> Option<&DriveItem> {
        if self.navigation.location.is_contacts() {
            return None;
        }
        self.navigation
            .cursor
            .and_then(|idx| self.drive.items.get(idx))
    }

    pub fn cursor_contact(&self) -> Option<&ContactRow> {
        if !self.navigation.location.is_contacts() {
            return None;
        }
        self.navigation
            .cursor
            .and_then(|idx| self.contacts.rows.get(idx))
    }

    /// Check if system is idle (no user input for 300ms)
    pub fn is_idle(&self) -> bool {
        self.performance.is_idle()
    }

    pub fn has_modal(&self) -> bool {
        self.ui.has_modal()
    }

    /// Record user action (for idle detection)
    pub fn record_user_action(&mut self) {
        self.performance.record_user_action();
    }

    pub fn show_toast(&mut self, toast: Toast) {
        self.ui.show_toast(toast);
    }
}
