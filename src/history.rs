//! Bounded back/forward log of selections.
//!
//! The log records whatever the host considers a selection: node indices,
//! object ids, asset paths. Navigating hands back the recorded set for the
//! host to re-apply, and the re-application itself is suppressed from being
//! recorded again, so stepping through the log does not rewrite it.

use std::collections::VecDeque;

/// Two-way history over selection sets.
///
/// A cursor marks the current entry. Recording while the cursor sits before
/// the newest entry drops everything after it, like the forward stack of a
/// browser. The log keeps at most `max_entries` entries, evicting the oldest,
/// and ignores selections larger than `max_selection`.
///
/// # Example
///
/// ```
/// # use scenetree::history::SelectionHistory;
/// let mut history = SelectionHistory::new();
/// history.record(&[1, 2]);
/// history.record(&[3]);
///
/// assert_eq!(history.back(), Some(&[1, 2][..]));
/// assert_eq!(history.forward(), Some(&[3][..]));
/// assert_eq!(history.forward(), None);
/// ```
#[derive(Debug, Clone)]
pub struct SelectionHistory<T> {
    entries: VecDeque<Vec<T>>,
    cursor: usize,
    max_entries: usize,
    max_selection: usize,
    last_applied: Option<Vec<T>>,
}

impl<T> SelectionHistory<T> {
    pub const DEFAULT_MAX_ENTRIES: usize = 100;
    pub const DEFAULT_MAX_SELECTION: usize = 1000;

    /// Creates a history with the default limits.
    pub fn new() -> Self {
        Self::with_limits(Self::DEFAULT_MAX_ENTRIES, Self::DEFAULT_MAX_SELECTION)
    }

    /// Creates a history keeping at most `max_entries` selections of at most
    /// `max_selection` items each.
    ///
    /// # Panics
    ///
    /// Panics when `max_entries` is zero.
    pub fn with_limits(max_entries: usize, max_selection: usize) -> Self {
        assert!(max_entries > 0, "the history must keep at least one entry");

        Self {
            entries: VecDeque::new(),
            cursor: 0,
            max_entries,
            max_selection,
            last_applied: None,
        }
    }

    /// Returns the number of recorded selections.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the cursor position, `0` when nothing is recorded.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Returns the selection under the cursor.
    pub fn current(&self) -> Option<&[T]> {
        self.entries.get(self.cursor).map(Vec::as_slice)
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0 && !self.entries.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
        self.last_applied = None;
    }

    /// Iterates over the recorded selections, oldest first, for host-side
    /// persistence.
    pub fn entries(&self) -> impl Iterator<Item = &[T]> {
        self.entries.iter().map(Vec::as_slice)
    }

    /// Replaces the log with host-persisted entries and cursor position.
    ///
    /// Empty and oversized entries are dropped, at most `max_entries` are
    /// kept, and the position clamps into the rebuilt log.
    pub fn restore<I>(&mut self, entries: I, position: usize)
    where
        I: IntoIterator<Item = Vec<T>>,
    {
        self.entries.clear();
        self.last_applied = None;

        for entry in entries {
            if entry.is_empty() || entry.len() > self.max_selection {
                continue;
            }

            self.entries.push_back(entry);

            if self.entries.len() == self.max_entries {
                break;
            }
        }

        self.cursor = position.min(self.entries.len().saturating_sub(1));
    }
}

impl<T> SelectionHistory<T>
where
    T: Clone + PartialEq,
{
    /// Records a selection as the newest entry and moves the cursor to it.
    ///
    /// Returns whether the selection was recorded. Empty selections,
    /// selections over the size limit, and the echo of a selection just
    /// handed out by [`SelectionHistory::back`] or
    /// [`SelectionHistory::forward`] are ignored.
    pub fn record(&mut self, selection: &[T]) -> bool {
        if selection.is_empty() || selection.len() > self.max_selection {
            return false;
        }

        if self.last_applied.as_deref() == Some(selection) {
            return false;
        }

        // Recording after navigating back drops the forward tail.
        if self.cursor + 1 < self.entries.len() {
            self.entries.truncate(self.cursor + 1);
        }

        self.entries.push_back(selection.to_vec());

        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }

        self.cursor = self.entries.len() - 1;
        self.last_applied = None;
        true
    }

    /// Steps the cursor back and returns the selection to re-apply, or `None`
    /// at the oldest entry.
    pub fn back(&mut self) -> Option<&[T]> {
        if self.entries.is_empty() || self.cursor == 0 {
            return None;
        }

        self.cursor -= 1;
        self.apply()
    }

    /// Steps the cursor forward and returns the selection to re-apply, or
    /// `None` at the newest entry.
    pub fn forward(&mut self) -> Option<&[T]> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }

        self.cursor += 1;
        self.apply()
    }

    fn apply(&mut self) -> Option<&[T]> {
        self.last_applied = Some(self.entries[self.cursor].clone());
        self.entries.get(self.cursor).map(Vec::as_slice)
    }
}

impl<T> Default for SelectionHistory<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    pub fn records_and_navigates() {
        let mut history = SelectionHistory::new();

        assert!(history.record(&[1]));
        assert!(history.record(&[2, 3]));
        assert!(history.record(&[4]));
        assert_eq!(history.len(), 3);
        assert_eq!(history.current(), Some(&[4][..]));

        assert_eq!(history.back(), Some(&[2, 3][..]));
        assert_eq!(history.back(), Some(&[1][..]));
        assert_eq!(history.back(), None);
        assert_eq!(history.position(), 0);

        assert_eq!(history.forward(), Some(&[2, 3][..]));
        assert_eq!(history.forward(), Some(&[4][..]));
        assert_eq!(history.forward(), None);
    }

    #[test]
    pub fn skips_empty_and_oversized_selections() {
        let mut history = SelectionHistory::with_limits(10, 2);

        assert!(!history.record(&[]));
        assert!(!history.record(&[1, 2, 3]));
        assert!(history.record(&[1, 2]));
        assert_eq!(history.len(), 1);
    }

    #[test]
    pub fn recording_drops_the_forward_tail() {
        let mut history = SelectionHistory::new();

        history.record(&[1]);
        history.record(&[2]);
        history.record(&[3]);
        history.back();
        history.back();

        assert!(history.record(&[9]));
        assert_eq!(history.len(), 2);
        assert_eq!(history.current(), Some(&[9][..]));
        assert_eq!(history.back(), Some(&[1][..]));
        assert!(!history.can_go_back());
    }

    #[test]
    pub fn evicts_the_oldest_beyond_capacity() {
        let mut history = SelectionHistory::with_limits(3, 10);

        for value in 1..=5 {
            assert!(history.record(&[value]));
        }

        assert_eq!(history.len(), 3);
        assert_eq!(history.position(), 2);
        assert_eq!(history.current(), Some(&[5][..]));
        assert_eq!(history.back(), Some(&[4][..]));
        assert_eq!(history.back(), Some(&[3][..]));
        assert_eq!(history.back(), None);
    }

    #[test]
    pub fn navigation_echo_is_not_recorded() {
        let mut history = SelectionHistory::new();

        history.record(&[1]);
        history.record(&[2]);

        assert_eq!(history.back(), Some(&[1][..]));

        // The host reports the selection the navigation itself caused.
        assert!(!history.record(&[1]));
        assert_eq!(history.len(), 2);

        // A genuinely new selection is recorded and lifts the suppression.
        assert!(history.record(&[7]));
        assert!(history.record(&[1]));
        assert_eq!(history.len(), 3);
        assert_eq!(history.current(), Some(&[1][..]));
    }

    #[test]
    pub fn navigating_twice_updates_the_echo() {
        let mut history = SelectionHistory::new();

        history.record(&[1]);
        history.record(&[2]);
        history.record(&[3]);

        history.back();
        history.back();
        assert!(!history.record(&[1]));

        // Only the most recent navigation is suppressed.
        assert!(history.record(&[2]));
    }

    #[test]
    pub fn restore_rebuilds_the_log() {
        let mut history = SelectionHistory::with_limits(3, 2);

        history.restore(
            vec![vec![1], vec![], vec![2, 3, 4], vec![5], vec![6], vec![7]],
            9,
        );

        assert_eq!(history.len(), 3);
        assert_eq!(
            history.entries().collect::<Vec<_>>(),
            vec![&[1][..], &[5][..], &[6][..]]
        );
        assert_eq!(history.position(), 2);
        assert_eq!(history.back(), Some(&[5][..]));
    }

    #[test]
    pub fn clear_forgets_everything() {
        let mut history = SelectionHistory::new();

        history.record(&[1]);
        history.record(&[2]);
        history.back();
        history.clear();

        assert!(history.is_empty());
        assert_eq!(history.position(), 0);
        assert_eq!(history.current(), None);
        assert_eq!(history.back(), None);
        assert_eq!(history.forward(), None);

        // The suppression does not survive a clear.
        assert!(history.record(&[1]));
    }
}
