//! Logical ("virtual") focus over the visible suggestion items.
//!
//! Keyboard focus stays on the text input the whole time; this tracks which
//! suggestion row is highlighted. Disabled items are never reachable and
//! never counted as current. No wraparound: navigation clamps at the ends.

use catalog::ComboOption;

#[derive(Clone, Copy, Debug, Default)]
pub struct FocusNavigator {
    current: Option<usize>,
}

impl FocusNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the currently focused item, `None` when the text input
    /// itself holds logical focus.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Drop virtual focus (new query cycle, list closed).
    pub fn reset(&mut self) {
        self.current = None;
    }

    /// Move one step down; from nothing, focus the first selectable item.
    pub fn next(&mut self, items: &[ComboOption]) -> Option<usize> {
        let from = self.current.map(|i| i + 1).unwrap_or(0);
        if let Some(idx) = first_enabled(items, from) {
            self.current = Some(idx);
        }
        self.current
    }

    /// Move one step up; from nothing, focus the last selectable item.
    pub fn previous(&mut self, items: &[ComboOption]) -> Option<usize> {
        let until = self.current.unwrap_or(items.len());
        if let Some(idx) = last_enabled(items, until) {
            self.current = Some(idx);
        }
        self.current
    }

    /// Jump to the first selectable item.
    pub fn home(&mut self, items: &[ComboOption]) -> Option<usize> {
        if let Some(idx) = first_enabled(items, 0) {
            self.current = Some(idx);
        }
        self.current
    }

    /// Jump to the last selectable item.
    pub fn end(&mut self, items: &[ComboOption]) -> Option<usize> {
        if let Some(idx) = last_enabled(items, items.len()) {
            self.current = Some(idx);
        }
        self.current
    }

    /// Re-clamp after the item list changed under us.
    ///
    /// Focus on a now-missing or now-disabled index falls back to none.
    pub fn revalidate(&mut self, items: &[ComboOption]) {
        if let Some(idx) = self.current
            && items.get(idx).is_none_or(|item| item.disabled)
        {
            self.current = None;
        }
    }
}

/// First enabled index at or after `from`.
fn first_enabled(items: &[ComboOption], from: usize) -> Option<usize> {
    items
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, item)| !item.disabled)
        .map(|(idx, _)| idx)
}

/// Last enabled index strictly before `until`.
fn last_enabled(items: &[ComboOption], until: usize) -> Option<usize> {
    items[..until.min(items.len())]
        .iter()
        .enumerate()
        .rev()
        .find(|(_, item)| !item.disabled)
        .map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(spec: &[(&str, bool)]) -> Vec<ComboOption> {
        spec.iter()
            .map(|(v, disabled)| ComboOption::new(*v, *v).disabled(*disabled))
            .collect()
    }

    #[test]
    fn next_from_nothing_selects_first_enabled() {
        let items = items(&[("a", true), ("b", false), ("c", false)]);
        let mut nav = FocusNavigator::new();
        assert_eq!(nav.next(&items), Some(1));
    }

    #[test]
    fn previous_from_nothing_selects_last_enabled() {
        let items = items(&[("a", false), ("b", false), ("c", true)]);
        let mut nav = FocusNavigator::new();
        assert_eq!(nav.previous(&items), Some(1));
    }

    #[test]
    fn next_clamps_at_end_without_wrapping() {
        let items = items(&[("a", false), ("b", false)]);
        let mut nav = FocusNavigator::new();
        nav.next(&items);
        nav.next(&items);
        assert_eq!(nav.next(&items), Some(1));
    }

    #[test]
    fn previous_clamps_at_start_without_wrapping() {
        let items = items(&[("a", false), ("b", false)]);
        let mut nav = FocusNavigator::new();
        nav.home(&items);
        assert_eq!(nav.previous(&items), Some(0));
    }

    #[test]
    fn disabled_items_are_skipped_in_both_directions() {
        let items = items(&[("a", false), ("b", true), ("c", false)]);
        let mut nav = FocusNavigator::new();
        assert_eq!(nav.next(&items), Some(0));
        assert_eq!(nav.next(&items), Some(2));
        assert_eq!(nav.previous(&items), Some(0));
    }

    #[test]
    fn home_and_end_skip_disabled_edges() {
        let items = items(&[("a", true), ("b", false), ("c", false), ("d", true)]);
        let mut nav = FocusNavigator::new();
        assert_eq!(nav.home(&items), Some(1));
        assert_eq!(nav.end(&items), Some(2));
    }

    #[test]
    fn all_disabled_leaves_focus_unset() {
        let items = items(&[("a", true), ("b", true)]);
        let mut nav = FocusNavigator::new();
        assert_eq!(nav.next(&items), None);
        assert_eq!(nav.previous(&items), None);
        assert_eq!(nav.home(&items), None);
        assert_eq!(nav.end(&items), None);
    }

    #[test]
    fn revalidate_drops_stale_focus() {
        let full = items(&[("a", false), ("b", false)]);
        let mut nav = FocusNavigator::new();
        nav.end(&full);
        assert_eq!(nav.current(), Some(1));

        let shrunk = items(&[("a", false)]);
        nav.revalidate(&shrunk);
        assert_eq!(nav.current(), None);
    }
}
