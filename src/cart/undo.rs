//! Single-slot undo for the last removed line item.

use jiff::Timestamp;

use crate::{items::LineItem, notices::UNDO_WINDOW};

/// Snapshot of the most recently removed line item.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingUndo<'a> {
    snapshot: LineItem<'a>,
    removed_at: Timestamp,
}

impl<'a> PendingUndo<'a> {
    pub(crate) fn new(snapshot: LineItem<'a>, removed_at: Timestamp) -> Self {
        Self {
            snapshot,
            removed_at,
        }
    }

    /// The removed item as it was at removal time
    pub fn snapshot(&self) -> &LineItem<'a> {
        &self.snapshot
    }

    /// When the item was removed
    pub fn removed_at(&self) -> Timestamp {
        self.removed_at
    }

    /// Whether the item can still be restored at `now`.
    pub fn is_open(&self, now: Timestamp) -> bool {
        now.duration_since(self.removed_at) < UNDO_WINDOW
    }

    pub(crate) fn into_snapshot(self) -> LineItem<'a> {
        self.snapshot
    }
}
