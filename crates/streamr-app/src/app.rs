//! # Application Shell
//!
//! `StreamrApp` owns the navigation controller, the queue pages post
//! navigation requests to, and the live session subscription. It applies
//! both event streams to the controller one at a time, session events
//! first, so the controller is only ever mutated from here.
//!
//! Hosts either drive the shell step by step with [`StreamrApp::pump`] or
//! hand it to [`StreamrApp::run`] until a shutdown future resolves.

use crate::backend::Backend;
use crate::navigation::{
    FooterLayout, NavQueue, NavigationContext, NavigationController, NavigationReport, Navigator,
    NoViewport, RenderTarget, ScreenId, ScreenTheme, ViewportEffects,
};
use crate::pages::Page;
use crate::session::SessionSubscription;
use std::future::Future;
use std::sync::Arc;

/// Headless application root
pub struct StreamrApp {
    backend: Backend,
    controller: NavigationController,
    navigator: Navigator,
    queue: NavQueue,
    subscription: Option<SessionSubscription>,
}

impl std::fmt::Debug for StreamrApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamrApp")
            .field("controller", &self.controller)
            .field("subscribed", &self.subscription.is_some())
            .finish_non_exhaustive()
    }
}

impl StreamrApp {
    pub fn new(backend: Backend) -> Self {
        Self::with_viewport(backend, Arc::new(NoViewport))
    }

    /// Build the shell with a host-provided viewport
    pub fn with_viewport(backend: Backend, viewport: Arc<dyn ViewportEffects>) -> Self {
        let (navigator, queue) = Navigator::channel();
        Self {
            backend,
            controller: NavigationController::new(viewport),
            navigator,
            queue,
            subscription: None,
        }
    }

    /// Subscribe to session changes. Calling again replaces the old
    /// subscription, which unsubscribes it.
    pub fn start(&mut self) {
        if self.subscription.is_some() {
            tracing::debug!("Replacing session subscription");
        }
        self.subscription = Some(self.backend.session.subscribe());
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Handle for queueing navigation from outside a page
    pub fn navigator(&self) -> Navigator {
        self.navigator.clone()
    }

    pub fn controller(&self) -> &NavigationController {
        &self.controller
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    /// Navigate immediately, bypassing the queue
    pub fn navigate(
        &mut self,
        target: ScreenId,
        context: Option<NavigationContext>,
    ) -> NavigationReport {
        self.controller.navigate_to(target, context)
    }

    fn drain_session_events(&mut self) -> usize {
        let mut applied = 0;
        while let Some(event) = self
            .subscription
            .as_mut()
            .and_then(SessionSubscription::try_recv)
        {
            self.controller.apply_session_change(event.identity);
            applied += 1;
        }
        applied
    }

    /// Apply everything already queued and return how many events were processed.
    ///
    /// Pending session events are applied before each navigation request,
    /// so a request posted after a sign-in sees the new identity.
    pub fn pump(&mut self) -> usize {
        let mut processed = 0;
        loop {
            processed += self.drain_session_events();
            match self.queue.try_recv() {
                Ok(request) => {
                    self.controller.navigate_to(request.target, request.context);
                    processed += 1;
                }
                Err(_) => break,
            }
        }
        processed
    }

    pub fn render(&self) -> RenderTarget {
        self.controller.render_current_screen(&self.navigator)
    }

    /// Controller for the rendered screen; `None` while loading
    pub fn page(&self) -> Option<Page> {
        Page::build(self.render(), &self.backend)
    }

    /// Build the rendered page and run its mount-time work
    pub async fn mount(&self) -> Option<Page> {
        let page = self.page()?;
        page.start().await;
        Some(page)
    }

    pub fn footer(&self) -> FooterLayout {
        FooterLayout::derive(
            self.controller.current_screen(),
            self.controller.session().is_signed_in(),
        )
    }

    pub fn theme(&self) -> ScreenTheme {
        ScreenTheme::for_screen(self.controller.current_screen())
    }

    /// Apply session events and navigation requests as they arrive until
    /// `shutdown` resolves or the session provider goes away.
    pub async fn run<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        if self.subscription.is_none() {
            self.start();
        }
        let Self {
            controller,
            queue,
            subscription,
            ..
        } = self;
        let Some(subscription) = subscription.as_mut() else {
            return;
        };
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;
                () = &mut shutdown => {
                    tracing::info!("Shutdown requested");
                    break;
                }
                event = subscription.recv() => match event {
                    Some(event) => {
                        controller.apply_session_change(event.identity);
                    }
                    None => {
                        tracing::warn!("Session provider closed");
                        break;
                    }
                },
                request = queue.recv() => match request {
                    Some(request) => {
                        controller.navigate_to(request.target, request.context);
                    }
                    None => break,
                },
            }
        }
    }

    /// Drop the session subscription
    pub fn teardown(&mut self) {
        if self.subscription.take().is_some() {
            tracing::debug!("Session subscription released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{InMemorySessionProvider, SessionProvider};
    use assert_matches::assert_matches;
    use streamr_core::{SessionIdentity, StreamrConfig};

    fn app_with(provider: InMemorySessionProvider) -> StreamrApp {
        let backend = Backend::new(
            StreamrConfig::default(),
            Arc::new(provider),
            Arc::new(crate::data::InMemoryDocumentStore::new()),
            Arc::new(crate::data::InMemoryBlobStore::new("bucket")),
        );
        StreamrApp::new(backend)
    }

    #[test]
    fn test_loading_until_session_check_completes() {
        let mut app = app_with(InMemorySessionProvider::new());
        app.navigate(ScreenId::Library, None);
        assert!(app.render().is_loading());

        app.start();
        assert_eq!(app.pump(), 1);
        assert!(app.controller().session().check_completed());
        assert_matches!(app.render(), RenderTarget::Screen { screen: ScreenId::Auth, .. });
    }

    #[test]
    fn test_restart_replaces_subscription() {
        let provider = InMemorySessionProvider::new();
        let mut app = app_with(provider.clone());
        app.start();
        app.start();
        assert_eq!(provider.subscriber_count(), 1);
        app.teardown();
        assert_eq!(provider.subscriber_count(), 0);
        assert!(!app.is_subscribed());
    }

    #[tokio::test]
    async fn test_pump_applies_sign_in_before_queued_navigation() {
        let provider = InMemorySessionProvider::new().with_account("a@b.co", "secret1", None);
        let mut app = app_with(provider.clone());
        app.start();
        app.pump();

        provider.sign_in_with_email("a@b.co", "secret1").await.unwrap();
        app.navigator().go(ScreenId::Library);
        app.pump();
        assert_eq!(app.controller().current_screen(), ScreenId::Library);
        let footer = app.footer();
        let last = footer.nav_bar().and_then(|bar| bar.items.last()).unwrap();
        assert_eq!((last.label, last.active), ("Library", true));
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let provider = InMemorySessionProvider::new().signed_in_as(SessionIdentity::new("u1"));
        let mut app = app_with(provider);
        app.navigator().go(ScreenId::Search);
        let shutdown = async {
            for _ in 0..3 {
                tokio::task::yield_now().await;
            }
        };
        app.run(shutdown).await;
        assert!(app.is_subscribed());
        assert!(app.controller().session().is_signed_in());
        assert_eq!(app.controller().current_screen(), ScreenId::Search);
    }
}
