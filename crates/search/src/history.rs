use std::collections::VecDeque;

/// Bounded history of search patterns, shared by every window of a session.
///
/// The newest pattern sits at the front; recording a pattern that is
/// already present promotes it instead of duplicating it. Callers hold the
/// store explicitly and pass it to whoever records into it — there is no
/// process-wide instance.
#[derive(Debug, Clone)]
pub struct SearchHistory {
    capacity: usize,
    entries: VecDeque<String>,
}

impl SearchHistory {
    /// Creates a history with the given capacity (at least one entry).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Reconstructs the history from persisted entries, newest first.
    pub fn with_entries(capacity: usize, entries: Vec<String>) -> Self {
        let capacity = capacity.max(1);
        let mut deque: VecDeque<String> = entries.into_iter().collect();
        while deque.len() > capacity {
            deque.pop_back();
        }
        Self {
            capacity,
            entries: deque,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Adjusts capacity and trims excess entries from the old end.
    pub fn set_capacity(&mut self, capacity: usize) {
        let new_cap = capacity.max(1);
        self.capacity = new_cap;
        while self.entries.len() > new_cap {
            self.entries.pop_back();
        }
    }

    /// Records a pattern, promoting an existing entry to the front. Empty
    /// patterns are ignored.
    pub fn record(&mut self, pattern: &str) {
        if pattern.is_empty() {
            return;
        }
        self.entries.retain(|existing| existing != pattern);
        self.entries.push_front(pattern.to_owned());
        while self.entries.len() > self.capacity {
            self.entries.pop_back();
        }
    }

    /// Iterates entries from newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_promotes_and_limits_capacity() {
        let mut history = SearchHistory::new(3);
        history.record("alpha");
        history.record("beta");
        history.record("gamma");
        // Re-recording an existing pattern promotes it to the front.
        history.record("beta");
        let collected: Vec<_> = history.iter().collect();
        assert_eq!(collected, vec!["beta", "gamma", "alpha"]);

        // Recording beyond capacity evicts the oldest entry.
        history.record("delta");
        let collected: Vec<_> = history.iter().collect();
        assert_eq!(collected, vec!["delta", "beta", "gamma"]);
    }

    #[test]
    fn empty_patterns_are_ignored() {
        let mut history = SearchHistory::new(2);
        history.record("");
        assert!(history.is_empty());
    }

    #[test]
    fn set_capacity_trims_entries() {
        let mut history = SearchHistory::new(5);
        for pattern in ["a", "b", "c", "d"] {
            history.record(pattern);
        }
        history.set_capacity(2);
        let collected: Vec<_> = history.iter().collect();
        assert_eq!(collected, vec!["d", "c"]);
    }

    #[test]
    fn with_entries_restores_state() {
        let history =
            SearchHistory::with_entries(2, vec!["one".into(), "two".into(), "three".into()]);
        let collected: Vec<_> = history.iter().collect();
        assert_eq!(collected, vec!["one", "two"]);
        assert_eq!(history.capacity(), 2);
    }
}
