//! Property tests for the navigation controller: history length, the
//! auth gate, back navigation and auth de-duplication.

use assert_matches::assert_matches;
use proptest::prelude::*;
use streamr_app::navigation::{
    NavigationContext, NavigationController, NavigationOutcome, Navigator, RenderTarget, ScreenId,
};
use streamr_core::SessionIdentity;

#[derive(Debug, Clone)]
enum Op {
    Forward(ScreenId),
    Back,
    SignIn,
    SignOut,
}

fn screen() -> impl Strategy<Value = ScreenId> {
    prop::sample::select(ScreenId::all().to_vec())
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => screen().prop_map(Op::Forward),
        2 => Just(Op::Back),
        1 => Just(Op::SignIn),
        1 => Just(Op::SignOut),
    ]
}

fn signed_in() -> NavigationController {
    let mut controller = NavigationController::default();
    controller.apply_session_change(Some(SessionIdentity::new("u1")));
    controller
}

fn signed_out() -> NavigationController {
    let mut controller = NavigationController::default();
    controller.apply_session_change(None);
    controller
}

proptest! {
    #[test]
    fn forward_navigation_grows_by_one_except_auth_dedup(
        targets in prop::collection::vec(screen(), 0..40)
    ) {
        let mut controller = signed_in();
        let mut expected = 1;
        for target in targets {
            let before = controller.current_screen();
            let report = controller.navigate_to(target, None);
            if target == ScreenId::Auth && before == ScreenId::Auth {
                prop_assert_eq!(report.outcome, NavigationOutcome::ReplacedAuth);
            } else {
                expected += 1;
            }
            prop_assert_eq!(controller.history().len(), expected);
        }
    }

    #[test]
    fn current_screen_is_always_top_of_stack(ops in prop::collection::vec(op(), 0..60)) {
        let mut controller = signed_out();
        for op in ops {
            match op {
                Op::Forward(target) => {
                    controller.navigate_to(target, None);
                }
                Op::Back => {
                    controller.navigate_to(ScreenId::Home, Some(NavigationContext::back()));
                }
                Op::SignIn => {
                    controller.apply_session_change(Some(SessionIdentity::new("u1")));
                }
                Op::SignOut => {
                    controller.apply_session_change(None);
                }
            }
            prop_assert!(controller.history().len() >= 1);
            prop_assert_eq!(
                controller.current_screen(),
                controller.history().top().screen()
            );
        }
    }

    #[test]
    fn back_never_empties_history(
        forward in prop::collection::vec(screen(), 0..10),
        backs in 0usize..20
    ) {
        let mut controller = signed_in();
        for target in forward {
            controller.navigate_to(target, None);
        }
        for _ in 0..backs {
            let before = controller.history().len();
            let screen_before = controller.current_screen();
            let context_before = controller.current_context().clone();
            let report = controller.navigate_to(ScreenId::Home, Some(NavigationContext::back()));
            if before == 1 {
                prop_assert_eq!(report.outcome, NavigationOutcome::BackIgnored);
                prop_assert_eq!(controller.history().len(), 1);
                prop_assert_eq!(controller.current_screen(), screen_before);
                prop_assert_eq!(controller.current_context(), &context_before);
            } else {
                prop_assert_eq!(controller.history().len(), before - 1);
            }
        }
    }

    #[test]
    fn protected_screens_redirect_without_session(
        prefix in prop::collection::vec(screen(), 0..8),
        target in prop::sample::select(vec![ScreenId::Create, ScreenId::Library])
    ) {
        let mut controller = signed_out();
        for screen in prefix {
            controller.navigate_to(screen, None);
        }
        let report = controller.navigate_to(target, None);
        prop_assert!(report.redirected_to_auth);
        prop_assert_eq!(controller.current_screen(), ScreenId::Auth);
        prop_assert_eq!(controller.current_context().intended_screen(), Some(target));
    }

    #[test]
    fn protected_screens_open_with_session(
        target in prop::sample::select(vec![ScreenId::Create, ScreenId::Library])
    ) {
        let mut controller = signed_in();
        let report = controller.navigate_to(target, None);
        prop_assert!(!report.redirected_to_auth);
        prop_assert_eq!(controller.current_screen(), target);
    }
}

#[test]
fn auth_twice_keeps_length() {
    let mut controller = signed_out();
    controller.navigate_to(ScreenId::Auth, None);
    let len = controller.history().len();
    controller.navigate_to(ScreenId::Auth, None);
    assert_eq!(controller.history().len(), len);
}

#[test]
fn back_from_channel_returns_to_video() {
    let mut controller = signed_out();
    controller.navigate_to(ScreenId::Video, Some(NavigationContext::video("v1")));
    controller.navigate_to(ScreenId::Channel, Some(NavigationContext::channel("c1")));
    controller.navigate_to(ScreenId::Video, Some(NavigationContext::back()));

    assert_eq!(
        controller.history().screens(),
        vec![ScreenId::Home, ScreenId::Video]
    );
    assert_eq!(controller.current_screen(), ScreenId::Video);
    assert_eq!(
        controller.current_context().video_id().map(|id| id.as_str()),
        Some("v1")
    );
}

#[test]
fn library_without_session_lands_on_auth() {
    let mut controller = signed_out();
    let report = controller.navigate_to(ScreenId::Library, None);
    assert!(report.redirected_to_auth);
    assert_eq!(controller.current_screen(), ScreenId::Auth);
    let intended = controller.current_context().intended().unwrap();
    assert_eq!(intended.screen, ScreenId::Library);
    assert_eq!(
        controller.current_context().previous_screen(),
        Some(ScreenId::Home)
    );
}

#[test]
fn create_renders_loading_before_session_check() {
    let mut controller = NavigationController::default();
    controller.navigate_to(ScreenId::Create, None);
    let (navigator, _queue) = Navigator::channel();
    assert_matches!(controller.render_current_screen(&navigator), RenderTarget::Loading);
}
