//! Event Handlers
//!
//! This module contains handlers for different types of events:
//! - api: API responses from background service
//! - commands: Typed commands raised by actions and key bindings
//! - keyboard: User keyboard input
//! - mouse: Clicks, drags, context menus and the wheel
//!
//! Handlers are functions that take &mut App and process one event.

pub mod api;
pub mod commands;
pub mod keyboard;
pub mod mouse;

// Re-export for convenience
pub use api::handle_api_response;
pub use commands::handle_command;
pub use keyboard::handle_key;
pub use mouse::handle_mouse;
