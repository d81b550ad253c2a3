//! Auth: email/password and federated sign-in, sign-up and sign-out.
//!
//! After a successful sign-in the page resumes whatever the viewer was
//! trying to reach when they were sent here, or returns to the previous
//! screen.

use super::PageBase;
use crate::backend::Backend;
use crate::navigation::{NavigationContext, ScreenId, ScreenProps};
use crate::session::FederatedProvider;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use streamr_core::{AuthFailure, Result, StreamrError};

const EMPTY_CREDENTIALS: &str = "Email and password cannot be empty.";
const GOOGLE_FAILED: &str = "Failed to sign in with Google. Please try again.";
const SIGN_OUT_FAILED: &str = "Failed to sign out.";

#[derive(Debug, Default)]
struct Credentials {
    email: String,
    password: String,
}

#[derive(Debug)]
pub struct AuthPage {
    base: PageBase,
    credentials: Mutex<Credentials>,
    error: Mutex<Option<String>>,
    busy: AtomicBool,
}

impl AuthPage {
    pub fn new(props: ScreenProps, backend: Backend) -> Self {
        Self {
            base: PageBase::new(props, backend),
            credentials: Mutex::new(Credentials::default()),
            error: Mutex::new(None),
            busy: AtomicBool::new(false),
        }
    }

    pub fn set_email(&self, email: impl Into<String>) {
        self.credentials.lock().email = email.into();
    }

    pub fn set_password(&self, password: impl Into<String>) {
        self.credentials.lock().password = password.into();
    }

    pub fn error(&self) -> Option<String> {
        self.error.lock().clone()
    }

    /// A provider call is in flight
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    pub fn is_signed_in(&self) -> bool {
        self.base.session().is_some()
    }

    fn credentials(&self) -> Option<(String, String)> {
        let creds = self.credentials.lock();
        if creds.email.is_empty() || creds.password.is_empty() {
            return None;
        }
        Some((creds.email.clone(), creds.password.clone()))
    }

    pub async fn sign_in(&self) -> bool {
        let Some((email, password)) = self.credentials() else {
            *self.error.lock() = Some(EMPTY_CREDENTIALS.to_string());
            return false;
        };
        let session = self.base.backend.session.clone();
        self.run(session.sign_in_with_email(&email, &password)).await
    }

    /// Create an account and sign into it
    pub async fn sign_up(&self) -> bool {
        let Some((email, password)) = self.credentials() else {
            *self.error.lock() = Some(EMPTY_CREDENTIALS.to_string());
            return false;
        };
        let session = self.base.backend.session.clone();
        self.run(session.sign_up_with_email(&email, &password)).await
    }

    async fn run(&self, action: impl std::future::Future<Output = Result<()>>) -> bool {
        *self.error.lock() = None;
        self.busy.store(true, Ordering::SeqCst);
        let result = action.await;
        self.busy.store(false, Ordering::SeqCst);

        match result {
            Ok(()) => {
                self.success_navigation();
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "Authentication failed");
                *self.error.lock() = Some(err.user_message());
                false
            }
        }
    }

    pub async fn sign_in_with_google(&self) -> bool {
        *self.error.lock() = None;
        self.busy.store(true, Ordering::SeqCst);
        let result = self
            .base
            .backend
            .session
            .sign_in_with_federated(FederatedProvider::Google)
            .await;
        self.busy.store(false, Ordering::SeqCst);

        match result {
            Ok(()) => {
                self.success_navigation();
                true
            }
            Err(err) => {
                tracing::warn!(provider = %FederatedProvider::Google, error = %err, "Federated sign-in failed");
                *self.error.lock() = Some(federated_message(&err).to_string());
                false
            }
        }
    }

    pub async fn sign_out(&self) -> bool {
        *self.error.lock() = None;
        self.busy.store(true, Ordering::SeqCst);
        let result = self.base.backend.session.sign_out().await;
        self.busy.store(false, Ordering::SeqCst);

        match result {
            Ok(()) => {
                self.base.navigator().go(ScreenId::Home);
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "Sign-out failed");
                let message = err.user_message();
                *self.error.lock() = Some(if message.is_empty() {
                    SIGN_OUT_FAILED.to_string()
                } else {
                    message
                });
                false
            }
        }
    }

    /// Leave the page straight away when it opens with a session already present.
    pub fn resume_if_signed_in(&self) -> bool {
        if !self.is_signed_in() || self.is_busy() || self.error.lock().is_some() {
            return false;
        }
        self.success_navigation();
        true
    }

    /// Go to the intended destination, else back to the previous screen or Home.
    fn success_navigation(&self) {
        let context = self.base.context();
        let navigator = self.base.navigator();
        if let Some(intended) = context.intended() {
            navigator.navigate(intended.screen, intended.context.clone());
            return;
        }
        match context.previous_screen() {
            Some(previous) => navigator.go_with(previous, NavigationContext::back()),
            None => navigator.go(ScreenId::Home),
        }
    }

    pub fn back(&self) {
        self.base.back();
    }
}

/// Only popup failures get their own wording on the federated path
fn federated_message(err: &StreamrError) -> &'static str {
    match err {
        StreamrError::Auth {
            reason:
                reason @ (AuthFailure::PopupBlocked
                | AuthFailure::PopupClosedByUser
                | AuthFailure::CancelledPopupRequest),
            ..
        } => reason.friendly_message().unwrap_or(GOOGLE_FAILED),
        _ => GOOGLE_FAILED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{InMemoryBlobStore, InMemoryDocumentStore};
    use crate::navigation::NavQueue;
    use crate::pages::test_support::{props_with, user};
    use crate::session::InMemorySessionProvider;
    use std::sync::Arc;
    use streamr_core::{SessionIdentity, StreamrConfig};

    fn backend_with(provider: InMemorySessionProvider) -> Backend {
        Backend::new(
            StreamrConfig::default(),
            Arc::new(provider),
            Arc::new(InMemoryDocumentStore::new()),
            Arc::new(InMemoryBlobStore::new("bucket")),
        )
    }

    fn page(
        provider: InMemorySessionProvider,
        context: NavigationContext,
        session: Option<SessionIdentity>,
    ) -> (AuthPage, NavQueue) {
        let (props, queue) = props_with(context, session);
        (AuthPage::new(props, backend_with(provider)), queue)
    }

    #[tokio::test]
    async fn test_empty_credentials_rejected() {
        let (auth, mut queue) = page(InMemorySessionProvider::new(), NavigationContext::new(), None);
        auth.set_email("a@b.co");
        assert!(!auth.sign_in().await);
        assert_eq!(auth.error().as_deref(), Some("Email and password cannot be empty."));
        assert!(!auth.sign_up().await);
        assert!(queue.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_wrong_password_shows_friendly_message() {
        let provider = InMemorySessionProvider::new().with_account("a@b.co", "secret1", None);
        let (auth, _q) = page(provider, NavigationContext::new(), None);
        auth.set_email("a@b.co");
        auth.set_password("nope");
        assert!(!auth.sign_in().await);
        assert_eq!(
            auth.error().as_deref(),
            Some("Incorrect password. Please try again.")
        );
        assert!(!auth.is_busy());
    }

    #[tokio::test]
    async fn test_sign_in_resumes_intended_destination() {
        let provider = InMemorySessionProvider::new().with_account("a@b.co", "secret1", None);
        let resume = NavigationContext::video("v9");
        let context = NavigationContext::resume_after_login(ScreenId::Video, Some(resume.clone()));
        let (auth, mut queue) = page(provider, context, None);
        auth.set_email("a@b.co");
        auth.set_password("secret1");
        assert!(auth.sign_in().await);

        let request = queue.try_recv().unwrap();
        assert_eq!(request.target, ScreenId::Video);
        assert_eq!(request.context, Some(resume));
    }

    #[tokio::test]
    async fn test_sign_up_returns_to_previous_screen() {
        let context = NavigationContext::new().with_previous_screen(ScreenId::Channel);
        let (auth, mut queue) = page(InMemorySessionProvider::new(), context, None);
        auth.set_email("new@b.co");
        auth.set_password("longenough");
        assert!(auth.sign_up().await);

        let request = queue.try_recv().unwrap();
        assert_eq!(request.target, ScreenId::Channel);
        assert!(request.context.unwrap().is_back_navigation());
    }

    #[tokio::test]
    async fn test_google_popup_closed() {
        let provider = InMemorySessionProvider::new();
        provider.set_federated_outcome(Err(AuthFailure::PopupClosedByUser));
        let (auth, _q) = page(provider, NavigationContext::new(), None);
        assert!(!auth.sign_in_with_google().await);
        assert_eq!(
            auth.error().as_deref(),
            Some("Sign-in was cancelled. Please try again.")
        );
    }

    #[tokio::test]
    async fn test_google_other_failure_is_generic() {
        let provider = InMemorySessionProvider::new();
        provider.set_federated_outcome(Err(AuthFailure::UserDisabled));
        let (auth, _q) = page(provider, NavigationContext::new(), None);
        assert!(!auth.sign_in_with_google().await);
        assert_eq!(
            auth.error().as_deref(),
            Some("Failed to sign in with Google. Please try again.")
        );
    }

    #[tokio::test]
    async fn test_sign_out_goes_home() {
        let provider = InMemorySessionProvider::new().signed_in_as(user());
        let (auth, mut queue) = page(provider, NavigationContext::new(), Some(user()));
        assert!(auth.sign_out().await);
        assert_eq!(queue.try_recv().unwrap().target, ScreenId::Home);
    }

    #[tokio::test]
    async fn test_resume_only_with_session() {
        let (auth, mut queue) = page(InMemorySessionProvider::new(), NavigationContext::new(), None);
        assert!(!auth.resume_if_signed_in());
        assert!(queue.try_recv().is_err());

        let context = NavigationContext::resume_after_login(ScreenId::Library, None);
        let (auth, mut queue) = page(InMemorySessionProvider::new(), context, Some(user()));
        assert!(auth.resume_if_signed_in());
        let request = queue.try_recv().unwrap();
        assert_eq!(request.target, ScreenId::Library);
        assert_eq!(request.context, None);
    }
}
