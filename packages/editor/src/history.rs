//! # Undo/Redo History
//!
//! Bounded, linear snapshot history over an arbitrary state value.
//!
//! ## Design
//!
//! - Every recorded edit is a whole-value snapshot; undo and redo only
//!   move the cursor and never recompute state
//! - A fresh edit truncates the redo branch (linear history, not a tree)
//! - The stack is bounded: past the cap the oldest entry is evicted
//! - Undo/redo raise an in-flight flag that swallows the next
//!   `set_state` call, so the render echo issued by the surrounding
//!   application after a replay is not recorded as a new edit
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut history = History::new(vec![]);
//!
//! history.set_state(vec![1]);
//! history.set_state(vec![1, 2]);
//!
//! history.undo();
//! assert_eq!(history.current(), &vec![1]);
//!
//! history.redo();
//! assert_eq!(history.current(), &vec![1, 2]);
//! ```

/// Bounded linear undo/redo history over `T`
#[derive(Debug)]
pub struct History<T> {
    /// Recorded snapshots, oldest first
    entries: Vec<T>,

    /// Cursor into `entries`; `entries[index]` is the current value
    index: usize,

    /// Maximum number of retained snapshots
    max_entries: usize,

    /// Undo/redo in flight: the next `set_state` is a render echo and
    /// must not be recorded
    replaying: bool,

    /// Set once a persisted seed or a real edit has landed; blocks a
    /// late `initialize` from wiping user edits
    seeded: bool,
}

impl<T: Clone> History<T> {
    pub const DEFAULT_MAX_ENTRIES: usize = 50;

    /// Create a history seeded with the given value and the default cap
    pub fn new(initial: T) -> Self {
        Self::with_max_entries(initial, Self::DEFAULT_MAX_ENTRIES)
    }

    /// Create a history with a custom cap
    pub fn with_max_entries(initial: T, max_entries: usize) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
            max_entries: max_entries.max(1),
            replaying: false,
            seeded: false,
        }
    }

    /// One-time seed from persistence. Ignored once any edit has been
    /// recorded or a previous seed has landed, so a slow load cannot wipe
    /// edits made against the initial empty state.
    pub fn initialize(&mut self, value: T) {
        if self.seeded {
            return;
        }
        self.seeded = true;
        self.entries = vec![value];
        self.index = 0;
    }

    /// Record a new snapshot. Truncates the redo branch, appends, and
    /// evicts the oldest entries past the cap. Swallowed (and the
    /// in-flight flag reset) when an undo/redo is in flight, whatever the
    /// value.
    pub fn set_state(&mut self, value: T) {
        if self.replaying {
            self.replaying = false;
            return;
        }
        self.seeded = true;
        self.entries.truncate(self.index + 1);
        self.entries.push(value);
        if self.entries.len() > self.max_entries {
            let excess = self.entries.len() - self.max_entries;
            self.entries.drain(..excess);
        }
        self.index = self.entries.len() - 1;
    }

    /// Functional update: compute the next snapshot from the current one
    pub fn set_state_with(&mut self, update: impl FnOnce(&T) -> T) {
        let next = update(self.current());
        self.set_state(next);
    }

    /// Move the cursor back one entry. Returns false when already at the
    /// oldest entry.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.index -= 1;
        self.replaying = true;
        true
    }

    /// Move the cursor forward one entry. Returns false when already at
    /// the newest entry.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.index += 1;
        self.replaying = true;
        true
    }

    /// Collapse history to a single entry equal to the current value
    /// (used when starting a new unrelated editing context)
    pub fn clear(&mut self) {
        let current = self.entries[self.index].clone();
        self.entries = vec![current];
        self.index = 0;
        self.replaying = false;
    }

    pub fn current(&self) -> &T {
        &self.entries[self.index]
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index < self.entries.len() - 1
    }

    /// Number of retained snapshots
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
