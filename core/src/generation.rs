//! Request generation tagging.
//!
//! Each fetch takes a [`Ticket`] before suspending. When it resumes, the
//! response is applied only if no newer ticket was issued and the resource
//! was not invalidated in between. Arrival order stops mattering.

use std::cell::Cell;

/// Identity of one issued request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

/// Monotonic request counter for one resource.
#[derive(Debug, Default)]
pub struct Generations {
    latest: Cell<u64>,
}

impl Generations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket that supersedes every earlier one.
    pub fn issue(&self) -> Ticket {
        let next = self.latest.get() + 1;
        self.latest.set(next);
        Ticket(next)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.get() == ticket.0
    }

    /// Make every outstanding ticket stale without starting a request.
    pub fn invalidate(&self) {
        self.latest.set(self.latest.get() + 1);
    }
}
