//! Cursor movement logic
//!
//! Pure functions for moving the list and sidebar cursors. The sidebar wraps
//! around; the item lists clamp at both ends.

/// Next index with wrapping; selects the first item when nothing is selected
///
/// # Examples
/// ```
/// use drivetui::logic::navigation::next_selection;
///
/// assert_eq!(next_selection(None, 0), None);
/// assert_eq!(next_selection(None, 3), Some(0));
/// assert_eq!(next_selection(Some(1), 3), Some(2));
/// assert_eq!(next_selection(Some(2), 3), Some(0));
/// ```
pub fn next_selection(current: Option<usize>, list_len: usize) -> Option<usize> {
    if list_len == 0 {
        return None;
    }

    Some(match current {
        Some(i) if i >= list_len - 1 => 0,
        Some(i) => i + 1,
        None => 0,
    })
}

/// Previous index with wrapping; selects the last item when nothing is selected
///
/// # Examples
/// ```
/// use drivetui::logic::navigation::prev_selection;
///
/// assert_eq!(prev_selection(None, 0), None);
/// assert_eq!(prev_selection(Some(2), 3), Some(1));
/// assert_eq!(prev_selection(Some(0), 3), Some(2));
/// assert_eq!(prev_selection(None, 3), Some(2));
/// ```
pub fn prev_selection(current: Option<usize>, list_len: usize) -> Option<usize> {
    if list_len == 0 {
        return None;
    }

    Some(match current {
        Some(0) | None => list_len - 1,
        Some(i) => i.min(list_len) - 1,
    })
}

/// Move the cursor by `delta` rows, clamped to the list
pub fn move_cursor(current: Option<usize>, delta: isize, list_len: usize) -> Option<usize> {
    if list_len == 0 {
        return None;
    }

    let Some(current) = current else {
        return Some(if delta < 0 { list_len - 1 } else { 0 });
    };

    let target = current as isize + delta;
    Some(target.clamp(0, list_len as isize - 1) as usize)
}

/// Keep a cursor valid after the list changed length
pub fn clamp_cursor(current: Option<usize>, list_len: usize) -> Option<usize> {
    if list_len == 0 {
        return None;
    }
    current.map(|i| i.min(list_len - 1)).or(Some(0))
}
