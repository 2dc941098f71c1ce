//! Windowed list rendering
//!
//! Only rows intersecting the viewport (plus `overscan` rows on each side)
//! are rendered. Row sizes start at an estimate and are replaced by the
//! measured size once a row has been drawn. Sizes are in terminal lines.

use std::collections::{HashMap, HashSet};

/// A row to render, positioned in virtual content coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualRow {
    pub index: usize,
    pub key: String,
    pub start: usize,
    pub size: usize,
}

impl VirtualRow {
    pub fn end(&self) -> usize {
        self.start + self.size
    }
}

#[derive(Debug, Clone)]
pub struct Virtualizer {
    pub estimate_size: usize,
    pub overscan: usize,
    measurements: HashMap<String, usize>,
}

impl Virtualizer {
    pub fn new(estimate_size: usize, overscan: usize) -> Self {
        Self {
            estimate_size: estimate_size.max(1),
            overscan,
            measurements: HashMap::new(),
        }
    }

    pub fn size_of(&self, key: &str) -> usize {
        self.measurements
            .get(key)
            .copied()
            .unwrap_or(self.estimate_size)
    }

    /// Record the drawn size of a row; zero is clamped to one line
    pub fn measure(&mut self, key: &str, size: usize) {
        self.measurements.insert(key.to_string(), size.max(1));
    }

    pub fn is_measured(&self, key: &str) -> bool {
        self.measurements.contains_key(key)
    }

    /// Forget measurements for keys that are no longer displayed
    pub fn retain<S: AsRef<str>>(&mut self, keys: &[S]) {
        let live: HashSet<&str> = keys.iter().map(|k| k.as_ref()).collect();
        self.measurements.retain(|key, _| live.contains(key.as_str()));
    }

    /// Total virtual content size, used for the scrollbar
    pub fn total_size<S: AsRef<str>>(&self, keys: &[S]) -> usize {
        keys.iter().map(|k| self.size_of(k.as_ref())).sum()
    }

    /// Start offset of row `index`
    pub fn offset_of<S: AsRef<str>>(&self, keys: &[S], index: usize) -> usize {
        keys.iter()
            .take(index)
            .map(|k| self.size_of(k.as_ref()))
            .sum()
    }

    /// Rows to render for the given scroll position
    pub fn range<S: AsRef<str>>(
        &self,
        keys: &[S],
        scroll_offset: usize,
        viewport: usize,
    ) -> Vec<VirtualRow> {
        if keys.is_empty() {
            return Vec::new();
        }

        let mut starts = Vec::with_capacity(keys.len());
        let mut cursor = 0;
        for key in keys {
            starts.push(cursor);
            cursor += self.size_of(key.as_ref());
        }

        let viewport_end = scroll_offset + viewport.max(1);

        // First row whose end lies past the scroll offset
        let first_visible = starts
            .iter()
            .zip(keys)
            .position(|(start, key)| start + self.size_of(key.as_ref()) > scroll_offset)
            .unwrap_or(keys.len() - 1);

        // Last row starting before the viewport ends
        let last_visible = starts
            .iter()
            .rposition(|start| *start < viewport_end)
            .unwrap_or(first_visible)
            .max(first_visible);

        let first = first_visible.saturating_sub(self.overscan);
        let last = (last_visible + self.overscan).min(keys.len() - 1);

        (first..=last)
            .map(|index| {
                let key = keys[index].as_ref();
                VirtualRow {
                    index,
                    key: key.to_string(),
                    start: starts[index],
                    size: self.size_of(key),
                }
            })
            .collect()
    }

    /// Scroll offset that keeps row `index` fully inside the viewport,
    /// moving as little as possible
    pub fn scroll_to_index<S: AsRef<str>>(
        &self,
        keys: &[S],
        index: usize,
        scroll_offset: usize,
        viewport: usize,
    ) -> usize {
        if index >= keys.len() {
            return scroll_offset;
        }

        let start = self.offset_of(keys, index);
        let end = start + self.size_of(keys[index].as_ref());

        if start < scroll_offset {
            start
        } else if end > scroll_offset + viewport {
            end.saturating_sub(viewport)
        } else {
            scroll_offset
        }
    }

    /// Row index containing the virtual position (used for mouse hit-testing)
    pub fn index_at<S: AsRef<str>>(&self, keys: &[S], position: usize) -> Option<usize> {
        let mut cursor = 0;
        for (index, key) in keys.iter().enumerate() {
            let size = self.size_of(key.as_ref());
            if position < cursor + size {
                return Some(index);
            }
            cursor += size;
        }
        None
    }
}
