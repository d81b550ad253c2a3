//! # SessionProvider: Authentication Boundary
//!
//! The application never talks to an identity service directly. It holds a
//! `SessionProvider` and observes sign-in state through a
//! [`SessionSubscription`]; the sign-in/out calls only report whether the
//! request was accepted, and the resulting identity arrives on the
//! subscription like any other change.
//!
//! ```text
//! StreamrApp ── subscribe() ──► SessionProvider
//!     ▲                              │
//!     └──── SessionEvent (mpsc) ─────┘
//! ```

use async_trait::async_trait;
use std::fmt;
use streamr_core::{Result, SessionIdentity};
use tokio::sync::mpsc;

/// Federated identity providers offered on the login screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FederatedProvider {
    Google,
}

impl fmt::Display for FederatedProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FederatedProvider::Google => f.write_str("google"),
        }
    }
}

/// One notification from the provider: the full current identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEvent {
    pub identity: Option<SessionIdentity>,
}

impl SessionEvent {
    pub fn signed_in(identity: SessionIdentity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    pub fn signed_out() -> Self {
        Self { identity: None }
    }
}

/// Live subscription to session changes.
///
/// Dropping the subscription unsubscribes from the provider.
pub struct SessionSubscription {
    rx: mpsc::UnboundedReceiver<SessionEvent>,
    unsubscribe: Option<Box<dyn FnOnce() + Send>>,
}

impl fmt::Debug for SessionSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionSubscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}

impl SessionSubscription {
    /// Wrap a receiver; `unsubscribe` runs once when the subscription is dropped
    pub fn new(
        rx: mpsc::UnboundedReceiver<SessionEvent>,
        unsubscribe: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            rx,
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// Wait for the next notification. `None` once the provider is gone.
    pub async fn recv(&mut self) -> Option<SessionEvent> {
        self.rx.recv().await
    }

    /// Next notification if one is already queued
    pub fn try_recv(&mut self) -> Option<SessionEvent> {
        self.rx.try_recv().ok()
    }
}

impl Drop for SessionSubscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

/// Sign-in state source
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Subscribe to session changes.
    ///
    /// The current state is delivered as the first event, so the subscriber
    /// learns the outcome of the initial session check without polling.
    fn subscribe(&self) -> SessionSubscription;

    /// Identity as of now
    fn current(&self) -> Option<SessionIdentity>;

    async fn sign_in_with_email(&self, email: &str, password: &str) -> Result<()>;

    /// Create an account and sign into it
    async fn sign_up_with_email(&self, email: &str, password: &str) -> Result<()>;

    async fn sign_in_with_federated(&self, provider: FederatedProvider) -> Result<()>;

    async fn sign_out(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_drop_runs_unsubscribe_once() {
        let (_tx, rx) = mpsc::unbounded_channel();
        let flag = Arc::new(AtomicBool::new(false));
        let seen = flag.clone();
        let sub = SessionSubscription::new(rx, move || seen.store(true, Ordering::SeqCst));
        assert!(!flag.load(Ordering::SeqCst));
        drop(sub);
        assert!(flag.load(Ordering::SeqCst));
    }

    #[test]
    fn test_try_recv_drains_queue() {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut sub = SessionSubscription::new(rx, || {});
        tx.send(SessionEvent::signed_out()).unwrap();
        assert_eq!(sub.try_recv(), Some(SessionEvent::signed_out()));
        assert_eq!(sub.try_recv(), None);
    }
}
