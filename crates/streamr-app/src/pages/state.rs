//! Load state and stale-response guard shared by the page controllers.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Progress of an asynchronous page load
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    /// User-facing error message
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Identifies one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Hands out tickets; only the most recent one may publish its result.
#[derive(Debug, Default)]
pub struct RequestGuard {
    latest: AtomicU64,
}

impl RequestGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request, superseding every earlier one
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Supersede every outstanding request without starting a new one
    pub fn invalidate(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }

    /// Store `value` into `slot` if `ticket` is still current.
    ///
    /// Returns false, leaving the slot untouched, for a stale ticket.
    pub fn settle<T>(&self, ticket: Ticket, slot: &Mutex<T>, value: T, page: &'static str) -> bool {
        if !self.is_current(ticket) {
            tracing::warn!(page, ticket = ticket.0, "Discarding stale response");
            return false;
        }
        *slot.lock() = value;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_ticket_supersedes_older() {
        let guard = RequestGuard::new();
        let first = guard.issue();
        let second = guard.issue();
        assert!(!guard.is_current(first));
        assert!(guard.is_current(second));

        let slot = Mutex::new(LoadState::<u32>::Loading);
        assert!(!guard.settle(first, &slot, LoadState::Ready(1), "test"));
        assert!(slot.lock().is_loading());
        assert!(guard.settle(second, &slot, LoadState::Ready(2), "test"));
        assert_eq!(slot.lock().ready(), Some(&2));
    }

    #[test]
    fn test_invalidate_drops_outstanding() {
        let guard = RequestGuard::new();
        let ticket = guard.issue();
        guard.invalidate();
        assert!(!guard.is_current(ticket));
    }

    #[test]
    fn test_load_state_accessors() {
        let failed: LoadState<()> = LoadState::Failed("nope".into());
        assert_eq!(failed.error(), Some("nope"));
        assert!(failed.ready().is_none());
        assert_eq!(LoadState::<()>::default(), LoadState::Idle);
    }
}
