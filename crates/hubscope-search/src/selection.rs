//! Result selection model.
//!
//! Holds the current candidate list and a roving focus index: one movable
//! keyboard-focus position among the items, as opposed to each item having
//! its own tab stop. `None` means no item holds focus, the state after
//! every new result set.
//!
//! # Invariants
//!
//! 1. `focus`, when `Some(i)`, always satisfies `i < candidates.len()`.
//! 2. A replaced candidate list always resets focus — a stale index pointing
//!    past the end of a shorter list is never observable.
//! 3. Navigation wraps in both directions and is a no-op on an empty list.
//!
//! # Blur rule
//!
//! Focus loss clears the roving index only if no sibling item claims focus
//! before the owner calls [`SelectionModel::settle`] at the end of the
//! logical step. This replaces the deferred "wait a tick, then check the
//! active element" pattern with an explicit pending-focus-owner check, so a
//! focus hop between items never flickers through the cleared state.

use hubscope_core::Candidate;

/// Candidate list plus roving focus bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct SelectionModel {
    candidates: Vec<Candidate>,
    /// Roving focus index; `None` = no item focused.
    focus: Option<usize>,
    /// Item that currently claims input focus.
    focus_owner: Option<usize>,
    /// A blur happened and no sibling has claimed focus yet.
    blur_pending: bool,
}

impl SelectionModel {
    /// Create an empty selection model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the candidate list wholesale and reset focus.
    pub fn replace(&mut self, candidates: Vec<Candidate>) {
        self.candidates = candidates;
        self.clear_focus();
    }

    /// The current candidates.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Number of candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether the candidate list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// The roving focus index.
    #[must_use]
    pub fn focus(&self) -> Option<usize> {
        self.focus
    }

    /// The focused candidate, if any.
    pub fn focused(&self) -> Option<&Candidate> {
        self.focus.and_then(|i| self.candidates.get(i))
    }

    /// Move focus to the next item, wrapping past the last to the first.
    ///
    /// From no focus, enters the list at the first item. No-op when empty.
    pub fn focus_next(&mut self) {
        if self.candidates.is_empty() {
            return;
        }
        let next = match self.focus {
            Some(i) => (i + 1) % self.candidates.len(),
            None => 0,
        };
        self.set_focus(next);
    }

    /// Move focus to the previous item, wrapping past the first to the last.
    ///
    /// From no focus, enters the list at the last item. No-op when empty.
    pub fn focus_prev(&mut self) {
        if self.candidates.is_empty() {
            return;
        }
        let n = self.candidates.len();
        let prev = match self.focus {
            Some(i) => (i + n - 1) % n,
            None => n - 1,
        };
        self.set_focus(prev);
    }

    /// Clear the roving focus and any pending blur.
    pub fn clear_focus(&mut self) {
        self.focus = None;
        self.focus_owner = None;
        self.blur_pending = false;
    }

    /// An item gained input focus (pointer or programmatic); sync the index.
    ///
    /// Out-of-range indices are ignored.
    pub fn item_focused(&mut self, index: usize) {
        if index < self.candidates.len() {
            self.set_focus(index);
        }
    }

    /// An item lost input focus.
    ///
    /// The index stays put until [`settle`](Self::settle) confirms that no
    /// sibling claimed focus within the same logical step.
    pub fn item_blurred(&mut self, index: usize) {
        if self.focus_owner == Some(index) {
            self.focus_owner = None;
            self.blur_pending = true;
        }
    }

    /// Resolve a pending blur; returns `true` if focus was cleared.
    pub fn settle(&mut self) -> bool {
        if self.blur_pending && self.focus_owner.is_none() {
            self.clear_focus();
            true
        } else {
            self.blur_pending = false;
            false
        }
    }

    fn set_focus(&mut self, index: usize) {
        self.focus = Some(index);
        self.focus_owner = Some(index);
        self.blur_pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn three() -> SelectionModel {
        let mut model = SelectionModel::new();
        model.replace(vec![
            Candidate::new(1, "alpha"),
            Candidate::new(2, "beta"),
            Candidate::new(3, "gamma"),
        ]);
        model
    }

    #[test]
    fn down_enters_list_at_first() {
        let mut model = three();
        model.focus_next();
        assert_eq!(model.focus(), Some(0));
    }

    #[test]
    fn up_enters_list_at_last() {
        let mut model = three();
        model.focus_prev();
        assert_eq!(model.focus(), Some(2));
    }

    #[test]
    fn down_wraps_past_last() {
        let mut model = three();
        model.item_focused(2);
        model.focus_next();
        assert_eq!(model.focus(), Some(0));
    }

    #[test]
    fn up_wraps_past_first() {
        let mut model = three();
        model.item_focused(0);
        model.focus_prev();
        assert_eq!(model.focus(), Some(2));
    }

    #[test]
    fn navigation_is_noop_on_empty_list() {
        let mut model = SelectionModel::new();
        model.focus_next();
        model.focus_prev();
        assert_eq!(model.focus(), None);
    }

    #[test]
    fn replace_resets_focus_even_for_shorter_list() {
        let mut model = three();
        model.item_focused(2);
        model.replace(vec![Candidate::new(9, "solo")]);
        assert_eq!(model.focus(), None);
        assert_eq!(model.len(), 1);
    }

    #[test]
    fn out_of_range_item_focus_is_ignored() {
        let mut model = three();
        model.item_focused(7);
        assert_eq!(model.focus(), None);
    }

    #[test]
    fn blur_then_settle_clears_focus() {
        let mut model = three();
        model.item_focused(1);
        model.item_blurred(1);
        assert_eq!(model.focus(), Some(1), "index holds until settle");
        assert!(model.settle());
        assert_eq!(model.focus(), None);
    }

    #[test]
    fn sibling_claim_within_step_keeps_focus() {
        let mut model = three();
        model.item_focused(1);
        model.item_blurred(1);
        model.item_focused(2);
        assert!(!model.settle());
        assert_eq!(model.focus(), Some(2));
    }

    #[test]
    fn blur_of_non_owner_is_ignored() {
        let mut model = three();
        model.item_focused(1);
        model.item_blurred(0);
        assert!(!model.settle());
        assert_eq!(model.focus(), Some(1));
    }

    proptest! {
        /// Focus never points past the end of the list, whatever the
        /// interleaving of navigation, focus events, and list replacement.
        #[test]
        fn focus_index_stays_in_bounds(ops in prop::collection::vec(0u8..6, 0..64)) {
            let mut model = three();
            for op in ops {
                match op {
                    0 => model.focus_next(),
                    1 => model.focus_prev(),
                    2 => model.item_focused(1),
                    3 => model.item_blurred(1),
                    4 => { model.settle(); }
                    _ => model.replace(vec![Candidate::new(1, "one")]),
                }
                if let Some(i) = model.focus() {
                    prop_assert!(i < model.len());
                }
            }
        }

        /// A full cycle of next (or prev) over n items returns to the start.
        #[test]
        fn wrap_is_closed(start in 0usize..3) {
            let mut model = three();
            model.item_focused(start);
            for _ in 0..3 {
                model.focus_next();
            }
            prop_assert_eq!(model.focus(), Some(start));
            for _ in 0..3 {
                model.focus_prev();
            }
            prop_assert_eq!(model.focus(), Some(start));
        }
    }
}
