//! # Navigation Controller
//!
//! Owns the history stack and the cached session state, and is the only
//! thing that mutates either. The current screen and context are always
//! read from the top of the stack.
//!
//! `navigate_to` applies four rules in order:
//!
//! 1. **Auth gate**: Create/Library without a session (once the session
//!    check has completed) are redirected to Auth, remembering the requested
//!    screen and context as the intended destination.
//! 2. **Back**: a back navigation pops the top entry. With a single entry it
//!    is ignored.
//! 3. **Auth dedup**: Auth over Auth replaces the top entry.
//! 4. Otherwise the new entry is pushed.
//!
//! Every call resets the viewport scroll position. Navigation never fails.

use super::context::NavigationContext;
use super::history::{HistoryEntry, HistoryStack};
use super::render::{Navigator, RenderTarget, ScreenProps};
use super::screen::ScreenId;
use std::sync::Arc;
use streamr_core::SessionIdentity;

/// Cached view of the session provider
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    identity: Option<SessionIdentity>,
    check_completed: bool,
}

impl SessionState {
    /// Session state after the first provider notification
    pub fn resolved(identity: Option<SessionIdentity>) -> Self {
        Self {
            identity,
            check_completed: true,
        }
    }

    pub fn identity(&self) -> Option<&SessionIdentity> {
        self.identity.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.identity.is_some()
    }

    /// True once the provider has reported at least once
    pub fn check_completed(&self) -> bool {
        self.check_completed
    }
}

/// What a `navigate_to` call did to the stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// New entry on top
    Pushed,
    /// Top entry removed by a back navigation
    Popped,
    /// Auth entry replaced by another Auth entry
    ReplacedAuth,
    /// Back navigation with nothing to go back to
    BackIgnored,
}

/// Outcome of one navigation, for logging and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationReport {
    pub outcome: NavigationOutcome,
    /// The requested screen was protected and the gate sent us to Auth
    pub redirected_to_auth: bool,
    /// Screen on top after the call
    pub screen: ScreenId,
    pub depth: usize,
}

/// Host-side effects triggered by navigation
pub trait ViewportEffects: Send + Sync {
    /// Reset the scroll position to the top-left origin
    fn scroll_to_origin(&self);
}

/// Viewport that ignores every effect
#[derive(Debug, Default, Clone, Copy)]
pub struct NoViewport;

impl ViewportEffects for NoViewport {
    fn scroll_to_origin(&self) {}
}

/// Screen, context, history and auth gate
pub struct NavigationController {
    history: HistoryStack,
    session: SessionState,
    viewport: Arc<dyn ViewportEffects>,
}

impl std::fmt::Debug for NavigationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationController")
            .field("history", &self.history)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new(Arc::new(NoViewport))
    }
}

impl NavigationController {
    /// Start on Home with an empty context and no session information
    pub fn new(viewport: Arc<dyn ViewportEffects>) -> Self {
        Self::with_initial(ScreenId::DEFAULT, NavigationContext::new(), viewport)
    }

    /// Start on `screen` with `context`
    pub fn with_initial(
        screen: ScreenId,
        context: NavigationContext,
        viewport: Arc<dyn ViewportEffects>,
    ) -> Self {
        Self {
            history: HistoryStack::new(HistoryEntry::new(screen, context)),
            session: SessionState::default(),
            viewport,
        }
    }

    pub fn current_screen(&self) -> ScreenId {
        self.history.top().screen()
    }

    pub fn current_context(&self) -> &NavigationContext {
        self.history.top().context()
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Replace the cached session wholesale.
    ///
    /// The first call marks the session check as completed. Returns true if
    /// the signed-in identity changed.
    pub fn apply_session_change(&mut self, identity: Option<SessionIdentity>) -> bool {
        let changed = self.session.identity != identity;
        let first = !self.session.check_completed;
        if changed || first {
            tracing::info!(
                signed_in = identity.is_some(),
                first_check = first,
                "Session state updated"
            );
        }
        self.session = SessionState::resolved(identity);
        changed
    }

    /// Navigate to `target`.
    pub fn navigate_to(
        &mut self,
        target: ScreenId,
        context: Option<NavigationContext>,
    ) -> NavigationReport {
        let from = self.current_screen();
        let incoming = context.clone().unwrap_or_default();

        let (effective_target, effective_context, redirected) = if target.is_protected()
            && !self.session.is_signed_in()
            && self.session.check_completed
        {
            tracing::info!(requested = %target, from = %from, "Redirecting to login");
            let gated = incoming
                .clone()
                .with_intended(target, context)
                .with_previous_screen(from);
            (ScreenId::Auth, gated, true)
        } else {
            (target, incoming, false)
        };

        let is_back = effective_context.is_back_navigation();
        let candidate = HistoryEntry::new(
            effective_target,
            effective_context.with_previous_screen(from),
        );

        let outcome = if is_back {
            if self.history.pop().is_some() {
                NavigationOutcome::Popped
            } else {
                NavigationOutcome::BackIgnored
            }
        } else if effective_target == ScreenId::Auth && from == ScreenId::Auth {
            self.history.replace_top(candidate);
            NavigationOutcome::ReplacedAuth
        } else {
            self.history.push(candidate);
            NavigationOutcome::Pushed
        };

        self.viewport.scroll_to_origin();

        let report = NavigationReport {
            outcome,
            redirected_to_auth: redirected,
            screen: self.current_screen(),
            depth: self.history.len(),
        };
        tracing::debug!(
            from = %from,
            to = %report.screen,
            outcome = ?report.outcome,
            depth = report.depth,
            "Navigated"
        );
        report
    }

    /// Resolve what should be shown for the top of the stack.
    pub fn render_current_screen(&self, navigator: &Navigator) -> RenderTarget {
        let screen = self.current_screen();
        if !self.session.check_completed && screen.awaits_session_check() {
            return RenderTarget::Loading;
        }

        let previous = self.history.below_top().map(HistoryEntry::screen);
        let props = ScreenProps {
            navigator: navigator.clone(),
            context: self
                .current_context()
                .clone()
                .with_previous_screen_opt(previous),
            session: self.session.identity.clone(),
        };

        let shown = match screen {
            ScreenId::Home => ScreenId::Home,
            ScreenId::Search => ScreenId::Search,
            ScreenId::Video => ScreenId::Video,
            ScreenId::Channel => ScreenId::Channel,
            ScreenId::Shorts => ScreenId::Shorts,
            ScreenId::Subscriptions => ScreenId::Subscriptions,
            ScreenId::Auth => ScreenId::Auth,
            // The gate should already have kept us off these without a session;
            // a session lost after the entry was pushed still lands on Auth.
            ScreenId::Library | ScreenId::Create => {
                if self.session.is_signed_in() {
                    screen
                } else {
                    ScreenId::Auth
                }
            }
        };

        RenderTarget::Screen {
            screen: shown,
            props,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingViewport(AtomicUsize);

    impl ViewportEffects for CountingViewport {
        fn scroll_to_origin(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn signed_out() -> NavigationController {
        let mut nav = NavigationController::default();
        nav.apply_session_change(None);
        nav
    }

    fn signed_in() -> NavigationController {
        let mut nav = NavigationController::default();
        nav.apply_session_change(Some(SessionIdentity::new("u1")));
        nav
    }

    #[test]
    fn test_forward_navigation_pushes() {
        let mut nav = signed_out();
        let report = nav.navigate_to(ScreenId::Video, Some(NavigationContext::video("v1")));
        assert_eq!(report.outcome, NavigationOutcome::Pushed);
        assert_eq!(nav.current_screen(), ScreenId::Video);
        assert_eq!(nav.history().len(), 2);
        assert_eq!(nav.current_context().previous_screen(), Some(ScreenId::Home));
    }

    #[test]
    fn test_back_pops_to_previous_entry() {
        let mut nav = signed_out();
        nav.navigate_to(ScreenId::Video, Some(NavigationContext::video("v1")));
        nav.navigate_to(ScreenId::Channel, Some(NavigationContext::channel("c1")));
        let report = nav.navigate_to(ScreenId::Video, Some(NavigationContext::back()));

        assert_eq!(report.outcome, NavigationOutcome::Popped);
        assert_eq!(nav.history().screens(), vec![ScreenId::Home, ScreenId::Video]);
        assert_eq!(
            nav.current_context().video_id().map(|v| v.as_str()),
            Some("v1")
        );
    }

    #[test]
    fn test_back_at_root_is_ignored() {
        let mut nav = signed_out();
        let before = nav.current_context().clone();
        let report = nav.navigate_to(ScreenId::Search, Some(NavigationContext::back()));
        assert_eq!(report.outcome, NavigationOutcome::BackIgnored);
        assert_eq!(nav.history().len(), 1);
        assert_eq!(nav.current_screen(), ScreenId::Home);
        assert_eq!(nav.current_context(), &before);

        // Popping back down to the root keeps the root's own context.
        nav.navigate_to(ScreenId::Search, Some(NavigationContext::search("rust")));
        nav.navigate_to(ScreenId::Video, Some(NavigationContext::video("v1")));
        nav.navigate_to(ScreenId::Home, Some(NavigationContext::back()));
        nav.navigate_to(ScreenId::Home, Some(NavigationContext::back()));
        let root = nav.current_context().clone();
        let report = nav.navigate_to(ScreenId::Channel, Some(NavigationContext::back()));
        assert_eq!(report.outcome, NavigationOutcome::BackIgnored);
        assert_eq!(nav.current_screen(), ScreenId::Home);
        assert_eq!(nav.current_context(), &root);
    }

    #[test]
    fn test_gate_redirects_protected_screens() {
        let mut nav = signed_out();
        let report = nav.navigate_to(ScreenId::Library, None);
        assert!(report.redirected_to_auth);
        assert_eq!(nav.current_screen(), ScreenId::Auth);

        let ctx = nav.current_context();
        assert_eq!(ctx.intended_screen(), Some(ScreenId::Library));
        assert_eq!(ctx.previous_screen(), Some(ScreenId::Home));
    }

    #[test]
    fn test_gate_keeps_incoming_fields() {
        let mut nav = signed_out();
        let incoming = NavigationContext::channel("c7");
        nav.navigate_to(ScreenId::Create, Some(incoming.clone()));

        let ctx = nav.current_context();
        assert_eq!(ctx.channel_id().map(|c| c.as_str()), Some("c7"));
        let intended = ctx.intended().unwrap();
        assert_eq!(intended.screen, ScreenId::Create);
        assert_eq!(intended.context.as_ref(), Some(&incoming));
    }

    #[test]
    fn test_gate_waits_for_session_check() {
        let mut nav = NavigationController::default();
        let report = nav.navigate_to(ScreenId::Create, None);
        assert!(!report.redirected_to_auth);
        assert_eq!(nav.current_screen(), ScreenId::Create);
    }

    #[test]
    fn test_signed_in_user_reaches_protected_screens() {
        let mut nav = signed_in();
        nav.navigate_to(ScreenId::Library, None);
        nav.navigate_to(ScreenId::Create, None);
        assert_eq!(
            nav.history().screens(),
            vec![ScreenId::Home, ScreenId::Library, ScreenId::Create]
        );
    }

    #[test]
    fn test_auth_over_auth_replaces_top() {
        let mut nav = signed_out();
        nav.navigate_to(ScreenId::Auth, None);
        let report = nav.navigate_to(ScreenId::Auth, None);
        assert_eq!(report.outcome, NavigationOutcome::ReplacedAuth);
        assert_eq!(nav.history().screens(), vec![ScreenId::Home, ScreenId::Auth]);
        assert_eq!(nav.current_context().previous_screen(), Some(ScreenId::Auth));
    }

    #[test]
    fn test_gated_redirect_from_auth_collapses() {
        let mut nav = signed_out();
        nav.navigate_to(ScreenId::Auth, None);
        let report = nav.navigate_to(ScreenId::Library, None);
        assert_eq!(report.outcome, NavigationOutcome::ReplacedAuth);
        assert_eq!(nav.history().len(), 2);
        assert_eq!(nav.current_context().intended_screen(), Some(ScreenId::Library));
    }

    #[test]
    fn test_every_call_scrolls_to_origin() {
        let viewport = Arc::new(CountingViewport::default());
        let mut nav = NavigationController::new(viewport.clone());
        nav.navigate_to(ScreenId::Search, None);
        nav.navigate_to(ScreenId::Home, Some(NavigationContext::back()));
        nav.navigate_to(ScreenId::Home, Some(NavigationContext::back()));
        assert_eq!(viewport.0.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_render_loading_until_session_check() {
        let (navigator, _queue) = Navigator::channel();
        let mut nav = NavigationController::default();
        nav.navigate_to(ScreenId::Create, None);
        assert!(nav.render_current_screen(&navigator).is_loading());

        nav.apply_session_change(None);
        assert_eq!(
            nav.render_current_screen(&navigator).screen(),
            Some(ScreenId::Auth)
        );
    }

    #[test]
    fn test_render_public_screen_before_session_check() {
        let (navigator, _queue) = Navigator::channel();
        let mut nav = NavigationController::default();
        nav.navigate_to(ScreenId::Video, Some(NavigationContext::video("v1")));
        let target = nav.render_current_screen(&navigator);
        assert_eq!(target.screen(), Some(ScreenId::Video));
        let props = target.props().unwrap();
        assert_eq!(props.previous_screen(), Some(ScreenId::Home));
        assert!(!props.is_signed_in());
    }

    #[test]
    fn test_render_previous_screen_tracks_stack() {
        let (navigator, _queue) = Navigator::channel();
        let mut nav = signed_in();
        assert_eq!(
            nav.render_current_screen(&navigator)
                .props()
                .unwrap()
                .previous_screen(),
            None
        );

        nav.navigate_to(ScreenId::Search, None);
        nav.navigate_to(ScreenId::Video, Some(NavigationContext::video("v1")));
        nav.navigate_to(ScreenId::Search, Some(NavigationContext::back()));
        let target = nav.render_current_screen(&navigator);
        assert_eq!(target.screen(), Some(ScreenId::Search));
        assert_eq!(target.props().unwrap().previous_screen(), Some(ScreenId::Home));
    }

    #[test]
    fn test_session_loss_on_protected_screen_renders_auth() {
        let (navigator, _queue) = Navigator::channel();
        let mut nav = signed_in();
        nav.navigate_to(ScreenId::Library, None);
        assert!(nav.apply_session_change(None));
        assert_eq!(nav.current_screen(), ScreenId::Library);
        assert_eq!(
            nav.render_current_screen(&navigator).screen(),
            Some(ScreenId::Auth)
        );
    }

    #[test]
    fn test_apply_session_change_reports_identity_changes() {
        let mut nav = NavigationController::default();
        assert!(!nav.session().check_completed());
        assert!(!nav.apply_session_change(None));
        assert!(nav.session().check_completed());
        assert!(nav.apply_session_change(Some(SessionIdentity::new("u1"))));
        assert!(!nav.apply_session_change(Some(SessionIdentity::new("u1"))));
    }
}
