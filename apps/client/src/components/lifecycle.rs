//! At most one outstanding request per action, and no late writes.
//!
//! `begin` hands out a ticket and refuses a second one while the first is in
//! flight. `invalidate` (input cleared, view closed, "go back") bumps the
//! epoch, so the response for any older ticket is discarded on `finish`.

use tracing::debug;

use crate::errors::{ActionError, ActionResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub struct RequestSlot {
    epoch: u64,
    in_flight: Option<u64>,
}

impl RequestSlot {
    pub fn begin(&mut self) -> ActionResult<Ticket> {
        if self.in_flight.is_some() {
            return Err(ActionError::Busy);
        }
        self.epoch += 1;
        self.in_flight = Some(self.epoch);
        Ok(Ticket(self.epoch))
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.in_flight == Some(ticket.0)
    }

    /// Releases the slot. Returns false when the ticket is stale, in which
    /// case the caller must drop the response.
    pub fn finish(&mut self, ticket: Ticket) -> bool {
        if self.is_current(ticket) {
            self.in_flight = None;
            true
        } else {
            debug!("discarding stale response for request #{}", ticket.0);
            false
        }
    }

    pub fn invalidate(&mut self) {
        self.epoch += 1;
        self.in_flight = None;
    }
}
