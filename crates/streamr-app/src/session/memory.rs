//! In-memory session provider used by tests and the host binary.

use super::provider::{
    FederatedProvider, SessionEvent, SessionProvider, SessionSubscription,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use streamr_core::{AuthFailure, Result, SessionIdentity, StreamrError, UserId};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone)]
struct Account {
    identity: SessionIdentity,
    password: String,
    disabled: bool,
}

#[derive(Default)]
struct Inner {
    accounts: HashMap<String, Account>,
    current: Option<SessionIdentity>,
    subscribers: HashMap<u64, mpsc::UnboundedSender<SessionEvent>>,
    next_subscriber: u64,
    federated: Option<std::result::Result<SessionIdentity, AuthFailure>>,
}

impl Inner {
    fn set_current(&mut self, identity: Option<SessionIdentity>) {
        self.current = identity;
        let event = SessionEvent {
            identity: self.current.clone(),
        };
        self.subscribers
            .retain(|_, tx| tx.send(event.clone()).is_ok());
    }
}

/// Account table plus the signed-in identity, all in process memory
#[derive(Clone, Default)]
pub struct InMemorySessionProvider {
    inner: Arc<Mutex<Inner>>,
}

impl std::fmt::Debug for InMemorySessionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("InMemorySessionProvider")
            .field("accounts", &inner.accounts.len())
            .field("signed_in", &inner.current.is_some())
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

fn normalise_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

fn validate_email(email: &str) -> Result<()> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(StreamrError::auth(
            AuthFailure::InvalidEmail,
            format!("malformed email address: {email}"),
        ))
    }
}

impl InMemorySessionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an account without signing in
    pub fn with_account(self, email: &str, password: &str, display_name: Option<&str>) -> Self {
        let key = normalise_email(email);
        let mut identity = SessionIdentity::new(UserId::new(Uuid::new_v4().to_string()))
            .with_email(key.clone());
        if let Some(name) = display_name {
            identity = identity.with_display_name(name);
        }
        self.inner.lock().accounts.insert(
            key,
            Account {
                identity,
                password: password.to_string(),
                disabled: false,
            },
        );
        self
    }

    /// Start already signed in as `identity`
    pub fn signed_in_as(self, identity: SessionIdentity) -> Self {
        self.inner.lock().current = Some(identity);
        self
    }

    /// Outcome of the next federated sign-ins
    pub fn set_federated_outcome(&self, outcome: std::result::Result<SessionIdentity, AuthFailure>) {
        self.inner.lock().federated = Some(outcome);
    }

    /// Disable an account; later sign-ins fail
    pub fn disable_account(&self, email: &str) {
        if let Some(account) = self.inner.lock().accounts.get_mut(&normalise_email(email)) {
            account.disabled = true;
        }
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().subscribers.len()
    }

    fn unsubscribe(inner: &Weak<Mutex<Inner>>, id: u64) {
        if let Some(inner) = inner.upgrade() {
            inner.lock().subscribers.remove(&id);
            tracing::debug!(subscriber = id, "Session subscription dropped");
        }
    }
}

#[async_trait]
impl SessionProvider for InMemorySessionProvider {
    fn subscribe(&self) -> SessionSubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = {
            let mut inner = self.inner.lock();
            let id = inner.next_subscriber;
            inner.next_subscriber += 1;
            let _ = tx.send(SessionEvent {
                identity: inner.current.clone(),
            });
            inner.subscribers.insert(id, tx);
            id
        };
        let weak = Arc::downgrade(&self.inner);
        SessionSubscription::new(rx, move || Self::unsubscribe(&weak, id))
    }

    fn current(&self) -> Option<SessionIdentity> {
        self.inner.lock().current.clone()
    }

    async fn sign_in_with_email(&self, email: &str, password: &str) -> Result<()> {
        validate_email(email)?;
        let mut inner = self.inner.lock();
        let account = inner
            .accounts
            .get(&normalise_email(email))
            .cloned()
            .ok_or_else(|| StreamrError::auth(AuthFailure::UserNotFound, "no account for email"))?;
        if account.disabled {
            return Err(StreamrError::auth(AuthFailure::UserDisabled, "account disabled"));
        }
        if account.password != password {
            return Err(StreamrError::auth(AuthFailure::WrongPassword, "password mismatch"));
        }
        tracing::info!(uid = %account.identity.uid, "Signed in with email");
        inner.set_current(Some(account.identity));
        Ok(())
    }

    async fn sign_up_with_email(&self, email: &str, password: &str) -> Result<()> {
        validate_email(email)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(StreamrError::auth(
                AuthFailure::WeakPassword,
                format!("password must be at least {MIN_PASSWORD_LEN} characters"),
            ));
        }
        let key = normalise_email(email);
        let mut inner = self.inner.lock();
        if inner.accounts.contains_key(&key) {
            return Err(StreamrError::auth(
                AuthFailure::EmailAlreadyInUse,
                "email already registered",
            ));
        }
        let identity =
            SessionIdentity::new(UserId::new(Uuid::new_v4().to_string())).with_email(key.clone());
        inner.accounts.insert(
            key,
            Account {
                identity: identity.clone(),
                password: password.to_string(),
                disabled: false,
            },
        );
        tracing::info!(uid = %identity.uid, "Account created");
        inner.set_current(Some(identity));
        Ok(())
    }

    async fn sign_in_with_federated(&self, provider: FederatedProvider) -> Result<()> {
        let mut inner = self.inner.lock();
        match inner.federated.clone() {
            Some(Ok(identity)) => {
                tracing::info!(uid = %identity.uid, %provider, "Signed in with federated provider");
                inner.set_current(Some(identity));
                Ok(())
            }
            Some(Err(reason)) => Err(StreamrError::auth(reason, format!("{provider} sign-in failed"))),
            None => Err(StreamrError::auth(
                AuthFailure::PopupClosedByUser,
                format!("{provider} sign-in window closed"),
            )),
        }
    }

    async fn sign_out(&self) -> Result<()> {
        let mut inner = self.inner.lock();
        if inner.current.is_some() {
            tracing::info!("Signed out");
        }
        inner.set_current(None);
        Ok(())
    }
}
