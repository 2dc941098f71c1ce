//! Business Logic
//!
//! This module contains pure business logic functions that can be unit tested:
//! - actions: Dialog descriptions, rename/download decisions, action menus
//! - contacts: Contact partitions, ordering and search
//! - drag: Drag sessions and two-phase removal
//! - errors: Worker error classification
//! - file: Preview and thumbnail type detection
//! - formatting: Human-readable sizes and timestamps
//! - navigation: Cursor movement
//! - public_link: Public directory link parsing and resolution
//! - search: Search term matching
//! - selection: Click semantics over displayed items
//! - sorting: Drive item ordering and the derived-view pipeline
//! - ui: UI state cycling and toast timing
//! - virtualizer: Windowed list rendering

pub mod actions;
pub mod contacts;
pub mod drag;
pub mod errors;
pub mod file;
pub mod formatting;
pub mod navigation;
pub mod public_link;
pub mod search;
pub mod selection;
pub mod sorting;
pub mod ui;
pub mod virtualizer;
