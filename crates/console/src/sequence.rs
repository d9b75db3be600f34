//! Request sequencing
//!
//! Every asynchronous request issued on behalf of a selector level or a
//! preview pane carries a [`Ticket`]. Only the most recently issued ticket
//! of a [`Sequence`] is current; responses holding an older ticket belong
//! to a superseded selection and must be dropped.

/// Proof of which request a response belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Monotonically increasing request counter for one level
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sequence {
    current: u64,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new ticket, superseding all earlier ones
    pub fn issue(&mut self) -> Ticket {
        self.current += 1;
        Ticket(self.current)
    }

    /// Supersede every outstanding ticket without issuing a new one
    pub fn invalidate(&mut self) {
        self.current += 1;
    }

    /// Ticket of the latest issue, for callers that want to detect a later
    /// change without starting a request of their own
    pub fn latest(&self) -> Ticket {
        Ticket(self.current)
    }

    /// Whether `ticket` is the latest one issued
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.current
    }
}
