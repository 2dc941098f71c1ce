//! App Orchestration Methods
//!
//! This module contains App implementation methods grouped by domain.
//! Each submodule contains methods that orchestrate between:
//! - Model state (pure, in drivetui::model)
//! - Services (API queue, action tasks, cache)
//! - Handlers (in src/handlers/)
//! - Logic (pure business logic in drivetui::logic)
//! - UI rendering (in src/ui/)
//!
//! Methods are kept as `impl App` but organized by functional domain
//! for better discoverability and maintainability.

pub(crate) mod actions;
pub(crate) mod contacts;
pub(crate) mod dialogs;
pub(crate) mod drag;
pub(crate) mod menu;
pub(crate) mod navigation;
pub(crate) mod preview;
pub(crate) mod selection;
