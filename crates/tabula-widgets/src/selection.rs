//! Row selection tracked by identity.
//!
//! `Selection` keeps a set of [`RowId`]s. Every query that drives rendering or
//! emission takes the identities of the rows currently displayed, so rows that
//! disappear from the input stay selected internally but never show up in
//! payloads or in the header checkbox state.

use crate::identity::RowId;
use std::collections::HashSet;

/// How many rows may be selected at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionMode {
    /// At most one row, radio style.
    Single,
    /// Any number of rows, with select-all.
    #[default]
    Multi,
}

/// State of a tri-state checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Checked,
    Indeterminate,
    Unchecked,
}

impl CheckState {
    pub fn symbol(self) -> &'static str {
        match self {
            CheckState::Checked => "\u{2611}",
            CheckState::Indeterminate => "\u{229f}",
            CheckState::Unchecked => "\u{2610}",
        }
    }
}

/// The selected identities of a table.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    selected: HashSet<RowId>,
    mode: SelectionMode,
    enabled: bool,
}

impl Selection {
    pub fn new(mode: SelectionMode, enabled: bool) -> Self {
        Self {
            selected: HashSet::new(),
            mode,
            enabled,
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Switching mode keeps the set, trimmed to nothing when more than one
    /// identity would remain in single mode.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.mode = mode;
        if mode == SelectionMode::Single && self.selected.len() > 1 {
            self.selected.clear();
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn contains(&self, id: &RowId) -> bool {
        self.selected.contains(id)
    }

    /// Number of selected identities, including ones not currently displayed.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Toggle one row. Returns whether the set changed; a disabled selection
    /// never changes.
    pub fn toggle(&mut self, id: RowId) -> bool {
        if !self.enabled {
            tracing::trace!(%id, "toggle ignored: selection disabled");
            return false;
        }
        match self.mode {
            SelectionMode::Multi => {
                if !self.selected.remove(&id) {
                    self.selected.insert(id);
                }
            }
            SelectionMode::Single => {
                let sole = self.selected.len() == 1 && self.selected.contains(&id);
                self.selected.clear();
                if !sole {
                    self.selected.insert(id);
                }
            }
        }
        true
    }

    /// Select every visible row, or clear the set when they already are all
    /// selected. Returns `Some(true)` when rows were selected, `Some(false)`
    /// when cleared, and `None` when select-all is unavailable (disabled or
    /// single mode).
    pub fn toggle_all(&mut self, visible: &[RowId]) -> Option<bool> {
        if !self.enabled || self.mode == SelectionMode::Single {
            tracing::trace!(mode = ?self.mode, enabled = self.enabled, "select-all ignored");
            return None;
        }
        if self.is_all_selected(visible) {
            self.selected.clear();
            Some(false)
        } else {
            self.selected = visible.iter().cloned().collect();
            Some(true)
        }
    }

    /// Every visible row is selected and at least one row is visible.
    pub fn is_all_selected(&self, visible: &[RowId]) -> bool {
        !visible.is_empty() && visible.iter().all(|id| self.selected.contains(id))
    }

    /// Some, but not all, visible rows are selected.
    pub fn is_indeterminate(&self, visible: &[RowId]) -> bool {
        visible.iter().any(|id| self.selected.contains(id)) && !self.is_all_selected(visible)
    }

    pub fn check_state(&self, visible: &[RowId]) -> CheckState {
        if self.is_all_selected(visible) {
            CheckState::Checked
        } else if self.is_indeterminate(visible) {
            CheckState::Indeterminate
        } else {
            CheckState::Unchecked
        }
    }

    /// The displayed rows whose identity is selected, in display order.
    pub fn materialize<'a, R>(&self, displayed: impl IntoIterator<Item = (&'a RowId, &'a R)>) -> Vec<&'a R>
    where
        R: 'a,
    {
        displayed
            .into_iter()
            .filter(|(id, _)| self.selected.contains(id))
            .map(|(_, row)| row)
            .collect()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(ns: &[i64]) -> Vec<RowId> {
        ns.iter().map(|&n| RowId::Number(n)).collect()
    }

    #[test]
    fn multi_toggle_adds_and_removes() {
        let mut sel = Selection::new(SelectionMode::Multi, true);
        assert!(sel.toggle(RowId::Number(1)));
        assert!(sel.toggle(RowId::Number(2)));
        assert_eq!(sel.len(), 2);
        assert!(sel.toggle(RowId::Number(1)));
        assert!(!sel.contains(&RowId::Number(1)));
        assert!(sel.contains(&RowId::Number(2)));
    }

    #[test]
    fn single_mode_keeps_only_the_latest_row() {
        let mut sel = Selection::new(SelectionMode::Single, true);
        sel.toggle(RowId::Number(1));
        sel.toggle(RowId::Number(2));
        assert_eq!(sel.len(), 1);
        assert!(sel.contains(&RowId::Number(2)));
    }

    #[test]
    fn single_mode_toggling_the_sole_row_clears() {
        let mut sel = Selection::new(SelectionMode::Single, true);
        sel.toggle(RowId::from("a"));
        sel.toggle(RowId::from("a"));
        assert!(sel.is_empty());
    }

    #[test]
    fn disabled_selection_ignores_everything() {
        let mut sel = Selection::new(SelectionMode::Multi, false);
        assert!(!sel.toggle(RowId::Number(1)));
        assert_eq!(sel.toggle_all(&ids(&[1, 2])), None);
        assert!(sel.is_empty());
    }

    #[test]
    fn select_all_is_unavailable_in_single_mode() {
        let mut sel = Selection::new(SelectionMode::Single, true);
        assert_eq!(sel.toggle_all(&ids(&[1, 2])), None);
        assert!(sel.is_empty());
    }

    #[test]
    fn select_all_twice_restores_previous_state() {
        let visible = ids(&[1, 2, 3]);
        let mut sel = Selection::new(SelectionMode::Multi, true);
        assert_eq!(sel.toggle_all(&visible), Some(true));
        assert!(sel.is_all_selected(&visible));
        assert_eq!(sel.toggle_all(&visible), Some(false));
        assert!(sel.is_empty());
    }

    #[test]
    fn select_all_replaces_rather_than_merges() {
        let mut sel = Selection::new(SelectionMode::Multi, true);
        sel.toggle(RowId::Number(9));
        sel.toggle(RowId::Number(1));
        sel.toggle_all(&ids(&[1, 2]));
        assert_eq!(sel.len(), 2);
        assert!(!sel.contains(&RowId::Number(9)));
    }

    #[test]
    fn header_state_follows_visible_rows() {
        let visible = ids(&[1, 2]);
        let mut sel = Selection::new(SelectionMode::Multi, true);
        assert_eq!(sel.check_state(&visible), CheckState::Unchecked);
        sel.toggle(RowId::Number(1));
        assert_eq!(sel.check_state(&visible), CheckState::Indeterminate);
        sel.toggle(RowId::Number(2));
        assert_eq!(sel.check_state(&visible), CheckState::Checked);
    }

    #[test]
    fn hidden_identities_do_not_count() {
        let mut sel = Selection::new(SelectionMode::Multi, true);
        sel.toggle(RowId::Number(7));
        let visible = ids(&[1, 2]);
        assert!(!sel.is_indeterminate(&visible));
        assert_eq!(sel.check_state(&visible), CheckState::Unchecked);
        assert_eq!(sel.len(), 1);
    }

    #[test]
    fn nothing_visible_is_never_all_selected() {
        let sel = Selection::new(SelectionMode::Multi, true);
        assert!(!sel.is_all_selected(&[]));
    }

    #[test]
    fn materialize_follows_display_order() {
        let displayed_ids = ids(&[3, 1, 2]);
        let rows = ["c", "a", "b"];
        let mut sel = Selection::new(SelectionMode::Multi, true);
        sel.toggle(RowId::Number(2));
        sel.toggle(RowId::Number(3));
        sel.toggle(RowId::Number(8));
        let picked = sel.materialize(displayed_ids.iter().zip(rows.iter()));
        assert_eq!(picked, vec![&"c", &"b"]);
    }
}
