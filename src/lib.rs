//! Cloud Drive TUI Library
//!
//! Exposes the worker API, cache, pure logic, model and services for the
//! binary and for testing

pub mod api;
pub mod cache;
pub mod config;
pub mod logic;
pub mod messages;
pub mod model;
pub mod services;

/// File info display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Off,              // No timestamp or size
    TimestampOnly,    // Show timestamp only
    TimestampAndSize, // Show both size and timestamp
}

/// Sort mode for drive listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    Alphabetical, // Sort alphabetically
    LastModified, // Newest first
    FileSize,     // Largest first
}

impl SortMode {
    pub fn as_str(&self) -> &str {
        match self {
            SortMode::Alphabetical => "A-Z",
            SortMode::LastModified => "Timestamp",
            SortMode::FileSize => "Size",
        }
    }
}
