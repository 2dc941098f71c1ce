//! External Services
//!
//! This module contains services that talk to the worker:
//! - actions: Async user actions with their prompts
//! - api: Background request queue
//! - dialogs: Prompts answered by the UI loop
//! - queries: Polled contact queries

pub mod actions;
pub mod api;
pub mod dialogs;
pub mod queries;

// Re-export commonly used types for convenience
pub use api::{ApiRequest, ApiResponse, Priority};
pub use dialogs::{DialogBroker, DialogRequest, Prompt};
pub use queries::{PollSchedule, QueryKey, QueryState};
