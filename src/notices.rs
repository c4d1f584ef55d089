//! Notices
//!
//! Short-lived messages shown after a cart action. Only one notice is shown at a time; a newer notice replaces
//! whatever is on screen.

use std::fmt;

use jiff::{SignedDuration, Timestamp};

/// How long a removed product can be restored, and how long its notice stays up.
pub const UNDO_WINDOW: SignedDuration = SignedDuration::from_secs(5);

/// Display time for every other notice.
pub const NOTICE_WINDOW: SignedDuration = SignedDuration::from_secs(3);

/// What happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoticeKind {
    /// A line item was removed and can be restored.
    ProductRemoved {
        /// Name of the removed product
        name: String,
    },

    /// A service was selected.
    ServiceAdded {
        /// Service name
        name: String,
    },

    /// A service was deselected.
    ServiceRemoved {
        /// Service name
        name: String,
    },

    /// The membership was added to the cart.
    MembershipAdded,

    /// The membership was taken out of the cart.
    MembershipRemoved,
}

impl NoticeKind {
    /// How long the notice stays on screen.
    pub fn window(&self) -> SignedDuration {
        match self {
            NoticeKind::ProductRemoved { .. } => UNDO_WINDOW,
            _ => NOTICE_WINDOW,
        }
    }

    /// Whether the notice offers an undo action.
    pub fn offers_undo(&self) -> bool {
        matches!(self, NoticeKind::ProductRemoved { .. })
    }
}

impl fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoticeKind::ProductRemoved { .. } => f.write_str("Product removed"),
            NoticeKind::ServiceAdded { .. } => f.write_str("Service added to cart"),
            NoticeKind::ServiceRemoved { .. } => f.write_str("Service removed from cart"),
            NoticeKind::MembershipAdded => f.write_str("Elite program added successfully!"),
            NoticeKind::MembershipRemoved => f.write_str("Elite program removed from cart"),
        }
    }
}

/// A notice and when it was raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    kind: NoticeKind,
    raised_at: Timestamp,
}

impl Notice {
    /// Raise a notice at `now`.
    pub fn new(kind: NoticeKind, now: Timestamp) -> Self {
        Self {
            kind,
            raised_at: now,
        }
    }

    /// What happened
    pub fn kind(&self) -> &NoticeKind {
        &self.kind
    }

    /// When the notice was raised
    pub fn raised_at(&self) -> Timestamp {
        self.raised_at
    }

    /// Whether the notice is still on screen at `now`.
    pub fn is_visible(&self, now: Timestamp) -> bool {
        now.duration_since(self.raised_at) < self.kind.window()
    }
}
