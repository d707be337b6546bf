//! Request generations.
//!
//! Each screen owns a [`RequestGate`]. Issuing a new request bumps the generation;
//! a completion carrying an older ticket is stale and must be dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct RequestGate {
    generation: Arc<AtomicU64>,
}

/// Proof of which request a completion belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    pub generation: u64,
}

impl RequestGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding every earlier ticket.
    pub fn issue(&self) -> RequestTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        RequestTicket { generation }
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Make every outstanding ticket stale (used on navigation away).
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn current(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_ticket_supersedes_older() {
        let gate = RequestGate::new();
        let first = gate.issue();
        let second = gate.issue();

        assert!(!gate.is_current(first.generation));
        assert!(gate.is_current(second.generation));
    }

    #[test]
    fn test_invalidate_and_clones_share_generation() {
        let gate = RequestGate::new();
        let ticket = gate.issue();
        let clone = gate.clone();

        clone.invalidate();
        assert!(!gate.is_current(ticket.generation));
    }
}
