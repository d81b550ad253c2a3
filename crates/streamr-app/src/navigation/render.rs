//! # Render Targets and the Navigator Handle
//!
//! The controller does not draw anything. Rendering resolves to a
//! [`RenderTarget`]: either the loading placeholder or a screen plus the
//! props its page controller is built from.
//!
//! Pages request navigation through a [`Navigator`], a cloneable handle
//! that queues [`NavRequest`]s for the application shell. Requests are
//! applied strictly in the order they were issued.

use super::context::NavigationContext;
use super::screen::ScreenId;
use streamr_core::SessionIdentity;
use tokio::sync::mpsc;

/// A queued call to `navigate_to`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavRequest {
    pub target: ScreenId,
    pub context: Option<NavigationContext>,
}

/// Receiving side of the navigation queue, owned by the shell
pub type NavQueue = mpsc::UnboundedReceiver<NavRequest>;

/// Cloneable handle pages use to request navigation
#[derive(Debug, Clone)]
pub struct Navigator {
    tx: mpsc::UnboundedSender<NavRequest>,
}

impl Navigator {
    /// Create a navigator and the queue it feeds
    pub fn channel() -> (Self, NavQueue) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Queue a navigation request
    pub fn navigate(&self, target: ScreenId, context: Option<NavigationContext>) {
        if self.tx.send(NavRequest { target, context }).is_err() {
            tracing::debug!(target_screen = %target, "Navigation queue closed; request dropped");
        }
    }

    /// Queue a navigation with an empty context
    pub fn go(&self, target: ScreenId) {
        self.navigate(target, None);
    }

    /// Queue a navigation carrying `context`
    pub fn go_with(&self, target: ScreenId, context: NavigationContext) {
        self.navigate(target, Some(context));
    }

    /// Go back to `previous` (or Home when unknown).
    pub fn back(&self, previous: Option<ScreenId>) {
        self.navigate(
            previous.unwrap_or(ScreenId::DEFAULT),
            Some(NavigationContext::back()),
        );
    }
}

/// Everything a page controller is constructed from
#[derive(Debug, Clone)]
pub struct ScreenProps {
    pub navigator: Navigator,
    /// Top-of-stack context, with `previous_screen` set to the screen beneath it
    pub context: NavigationContext,
    pub session: Option<SessionIdentity>,
}

impl ScreenProps {
    pub fn previous_screen(&self) -> Option<ScreenId> {
        self.context.previous_screen()
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }
}

/// Result of rendering the current screen
#[derive(Debug, Clone)]
pub enum RenderTarget {
    /// Session check still pending for a session-sensitive screen
    Loading,
    /// Show `screen` built from `props`
    Screen { screen: ScreenId, props: ScreenProps },
}

impl RenderTarget {
    /// Screen being shown, or `None` for the loading placeholder
    pub fn screen(&self) -> Option<ScreenId> {
        match self {
            RenderTarget::Loading => None,
            RenderTarget::Screen { screen, .. } => Some(*screen),
        }
    }

    pub fn props(&self) -> Option<&ScreenProps> {
        match self {
            RenderTarget::Loading => None,
            RenderTarget::Screen { props, .. } => Some(props),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, RenderTarget::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigator_preserves_order() {
        let (nav, mut queue) = Navigator::channel();
        nav.go(ScreenId::Search);
        nav.clone().go_with(ScreenId::Video, NavigationContext::video("v1"));
        nav.back(None);

        let first = queue.try_recv().unwrap();
        assert_eq!(first.target, ScreenId::Search);
        assert_eq!(first.context, None);

        let second = queue.try_recv().unwrap();
        assert_eq!(second.target, ScreenId::Video);

        let third = queue.try_recv().unwrap();
        assert_eq!(third.target, ScreenId::Home);
        assert!(third.context.unwrap().is_back_navigation());
        assert!(queue.try_recv().is_err());
    }

    #[test]
    fn test_navigator_after_shell_dropped() {
        let (nav, queue) = Navigator::channel();
        drop(queue);
        nav.go(ScreenId::Home);
        nav.back(Some(ScreenId::Search));
    }
}
