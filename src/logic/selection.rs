//! Item selection model
//!
//! Click semantics over the currently displayed (sorted/filtered) sequence.
//! Every function mutates only the `selected` flags.

use crate::api::DriveItem;

/// Modifier state of a click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClickModifiers {
    pub shift: bool,
    /// Ctrl or Cmd
    pub toggle: bool,
}

pub fn selected_count(items: &[DriveItem]) -> usize {
    items.iter().filter(|item| item.selected).count()
}

pub fn first_selected_index(items: &[DriveItem]) -> Option<usize> {
    items.iter().position(|item| item.selected)
}

pub fn selected_items(items: &[DriveItem]) -> Vec<DriveItem> {
    items.iter().filter(|item| item.selected).cloned().collect()
}

/// Dispatch a left click according to its modifiers (shift wins over toggle)
pub fn click(items: &mut [DriveItem], index: usize, modifiers: ClickModifiers) {
    if modifiers.shift {
        shift_click(items, index);
    } else if modifiers.toggle {
        toggle_click(items, index);
    } else {
        plain_click(items, index);
    }
}

/// Button-down half of a mouse click.
///
/// Shift and Ctrl/Cmd clicks apply at once. A plain click waits for the
/// release so a press on a selected row can still drag the whole selection;
/// returns true when that click is pending.
pub fn press(items: &mut [DriveItem], index: usize, modifiers: ClickModifiers) -> bool {
    if modifiers.shift || modifiers.toggle {
        click(items, index, modifiers);
        false
    } else {
        index < items.len()
    }
}

/// Extend the selection from the first selected entry to `index`, inclusive.
///
/// Additive: entries outside the range keep their state. With nothing
/// selected the range starts at the top of the list.
pub fn shift_click(items: &mut [DriveItem], index: usize) {
    if index >= items.len() {
        return;
    }

    let first = first_selected_index(items).unwrap_or(0);
    if first == index && items[index].selected {
        return;
    }

    let (start, end) = (first.min(index), first.max(index));
    for item in &mut items[start..=end] {
        item.selected = true;
    }
}

/// Ctrl/Cmd click: flip only this entry
pub fn toggle_click(items: &mut [DriveItem], index: usize) {
    if let Some(item) = items.get_mut(index) {
        item.selected = !item.selected;
    }
}

/// Plain click: collapse a multi-selection onto this entry, otherwise toggle
/// it; everything else is deselected.
pub fn plain_click(items: &mut [DriveItem], index: usize) {
    if index >= items.len() {
        return;
    }

    let multi = selected_count(items) > 1;
    for (i, item) in items.iter_mut().enumerate() {
        if i == index {
            item.selected = if multi { true } else { !item.selected };
        } else {
            item.selected = false;
        }
    }
}

/// Right click on an entry (opens the item menu).
///
/// A multi-selection that contains the entry is kept whole; otherwise the
/// selection collapses to the entry alone.
pub fn context_click(items: &mut [DriveItem], index: usize) {
    let Some(target) = items.get(index) else {
        return;
    };

    if target.selected && selected_count(items) > 1 {
        return;
    }

    for (i, item) in items.iter_mut().enumerate() {
        item.selected = i == index;
    }
}

/// Background menu or any other contextual menu outside an entry
pub fn clear_selection(items: &mut [DriveItem]) {
    for item in items.iter_mut() {
        item.selected = false;
    }
}

pub fn select_all(items: &mut [DriveItem]) {
    for item in items.iter_mut() {
        item.selected = true;
    }
}

/// Items an action applies to: the selection, or the entry under the cursor
/// when nothing is selected
pub fn action_targets(items: &[DriveItem], cursor: Option<usize>) -> Vec<DriveItem> {
    let selected = selected_items(items);
    if !selected.is_empty() {
        return selected;
    }
    cursor
        .and_then(|idx| items.get(idx))
        .cloned()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ItemType;

    fn items(n: usize) -> Vec<DriveItem> {
        (0..n)
            .map(|i| DriveItem {
                uuid: format!("u{}", i),
                name: format!("item{}", i),
                item_type: ItemType::File,
                size: 0,
                last_modified: 0,
                favorited: false,
                parent: String::new(),
                sharer_id: 0,
                sharer_email: String::new(),
                receiver_id: 0,
                receiver_email: String::new(),
                receivers: vec![],
                selected: false,
            })
            .collect()
    }

    fn selected(items: &[DriveItem]) -> Vec<usize> {
        items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.selected)
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn test_shift_click_selects_inclusive_range() {
        let mut list = items(10);
        list[2].selected = true;

        shift_click(&mut list, 5);
        assert_eq!(selected(&list), vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_shift_click_backwards_is_additive() {
        let mut list = items(10);
        list[6].selected = true;
        list[9].selected = true;

        shift_click(&mut list, 3);
        assert_eq!(selected(&list), vec![3, 4, 5, 6, 9]);
    }

    #[test]
    fn test_shift_click_on_first_selected_is_noop() {
        let mut list = items(5);
        list[1].selected = true;
        list[3].selected = true;

        shift_click(&mut list, 1);
        assert_eq!(selected(&list), vec![1, 3]);
    }

    #[test]
    fn test_shift_click_without_selection_starts_at_top() {
        let mut list = items(5);
        shift_click(&mut list, 2);
        assert_eq!(selected(&list), vec![0, 1, 2]);
    }

    #[test]
    fn test_toggle_click_only_touches_target() {
        let mut list = items(4);
        list[0].selected = true;

        toggle_click(&mut list, 2);
        assert_eq!(selected(&list), vec![0, 2]);

        toggle_click(&mut list, 0);
        assert_eq!(selected(&list), vec![2]);
    }

    #[test]
    fn test_plain_click_collapses_multi_selection() {
        let mut list = items(6);
        list[0].selected = true;
        list[1].selected = true;
        list[2].selected = true;

        plain_click(&mut list, 4);
        assert_eq!(selected(&list), vec![4]);
    }

    #[test]
    fn test_plain_click_on_member_of_multi_selection_keeps_it() {
        let mut list = items(4);
        list[1].selected = true;
        list[2].selected = true;

        plain_click(&mut list, 1);
        assert_eq!(selected(&list), vec![1]);
    }

    #[test]
    fn test_plain_click_toggles_single_selection() {
        let mut list = items(3);
        plain_click(&mut list, 1);
        assert_eq!(selected(&list), vec![1]);

        plain_click(&mut list, 1);
        assert!(selected(&list).is_empty());

        plain_click(&mut list, 0);
        plain_click(&mut list, 2);
        assert_eq!(selected(&list), vec![2]);
    }

    #[test]
    fn test_context_click_preserves_containing_multi_selection() {
        let mut list = items(5);
        list[1].selected = true;
        list[3].selected = true;

        context_click(&mut list, 3);
        assert_eq!(selected(&list), vec![1, 3]);
    }

    #[test]
    fn test_context_click_outside_selection_collapses() {
        let mut list = items(5);
        list[1].selected = true;
        list[3].selected = true;

        context_click(&mut list, 4);
        assert_eq!(selected(&list), vec![4]);
    }

    #[test]
    fn test_click_dispatch_prefers_shift() {
        let mut list = items(4);
        list[0].selected = true;
        click(
            &mut list,
            2,
            ClickModifiers {
                shift: true,
                toggle: true,
            },
        );
        assert_eq!(selected(&list), vec![0, 1, 2]);
    }

    #[test]
    fn test_action_targets_fall_back_to_cursor() {
        let mut list = items(3);
        assert_eq!(action_targets(&list, Some(1))[0].uuid, "u1");
        assert!(action_targets(&list, None).is_empty());

        list[2].selected = true;
        assert_eq!(action_targets(&list, Some(1))[0].uuid, "u2");
    }

    #[test]
    fn test_press_on_selected_row_keeps_selection_for_drag() {
        let mut list = items(4);
        list[0].selected = true;
        list[1].selected = true;

        assert!(press(&mut list, 0, ClickModifiers::default()));
        assert_eq!(selected(&list), vec![0, 1]);

        let session = crate::logic::drag::DragSession::start(&list, 0);
        let dragged: Vec<&str> = session.items().iter().map(|item| item.uuid.as_str()).collect();
        assert_eq!(dragged, vec!["u0", "u1"]);

        // Released without moving: the plain click lands
        plain_click(&mut list, 0);
        assert_eq!(selected(&list), vec![0]);
    }

    #[test]
    fn test_press_with_modifiers_applies_at_once() {
        let mut list = items(4);
        list[1].selected = true;

        let toggle = ClickModifiers {
            shift: false,
            toggle: true,
        };
        assert!(!press(&mut list, 3, toggle));
        assert_eq!(selected(&list), vec![1, 3]);
        assert!(!press(&mut list, 9, ClickModifiers::default()));
    }

    #[test]
    fn test_shift_arrow_extends_from_first_selected() {
        // Index 2 selected, cursor moved from 7 to 8
        let mut list = items(10);
        list[2].selected = true;

        shift_click(&mut list, 8);
        assert_eq!(selected(&list), vec![2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_out_of_bounds_clicks_are_ignored() {
        let mut list = items(2);
        click(&mut list, 7, ClickModifiers::default());
        shift_click(&mut list, 7);
        context_click(&mut list, 7);
        assert!(selected(&list).is_empty());
    }
}
