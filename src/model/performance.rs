//! Performance Model
//!
//! Prefetch bookkeeping and idle detection.

use std::collections::HashSet;
use std::time::Instant;

/// Prefetch tracking and operational state
#[derive(Clone, Debug)]
pub struct PerformanceModel {
    /// Directory sizes already requested (to prevent duplicates)
    pub requested_sizes: HashSet<String>,

    /// Thumbnails already requested, by item uuid
    pub requested_thumbnails: HashSet<String>,

    /// Whether prefetching is enabled
    pub prefetch_enabled: bool,

    /// When the current listing was requested
    pub load_started: Option<Instant>,

    /// Time to load the last listing (milliseconds)
    pub last_load_time_ms: Option<u64>,

    /// Last time user interacted with UI
    pub last_user_action: Instant,
}

impl PerformanceModel {
    pub fn new() -> Self {
        Self {
            requested_sizes: HashSet::new(),
            requested_thumbnails: HashSet::new(),
            prefetch_enabled: true,
            load_started: None,
            last_load_time_ms: None,
            last_user_action: Instant::now(),
        }
    }

    /// Check if system is idle (no user input for 300ms)
    pub fn is_idle(&self) -> bool {
        self.last_user_action.elapsed().as_millis() > 300
    }

    /// Record user action (for idle detection)
    pub fn record_user_action(&mut self) {
        self.last_user_action = Instant::now();
    }

    pub fn start_load(&mut self) {
        self.load_started = Some(Instant::now());
    }

    pub fn finish_load(&mut self) {
        if let Some(started) = self.load_started.take() {
            self.last_load_time_ms = Some(started.elapsed().as_millis() as u64);
        }
    }
}

impl Default for PerformanceModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_detection() {
        let model = PerformanceModel::new();
        // Should not be idle immediately after creation
        assert!(!model.is_idle());
    }

    #[test]
    fn test_load_timing() {
        let mut model = PerformanceModel::new();
        model.finish_load();
        assert!(model.last_load_time_ms.is_none());

        model.start_load();
        model.finish_load();
        assert!(model.last_load_time_ms.is_some());
        assert!(model.load_started.is_none());
    }
}
