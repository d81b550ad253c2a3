//! Shorts: full-screen vertical feed with its own bottom bar.

use super::state::{LoadState, RequestGuard};
use super::PageBase;
use crate::backend::Backend;
use crate::navigation::{NavigationContext, ScreenId, ScreenProps};
use parking_lot::Mutex;
use streamr_core::Video;

const LOAD_FAILED: &str = "Failed to load shorts.";

#[derive(Debug, Default, Clone, Copy)]
struct Playback {
    playing: bool,
    favourited: bool,
    following: bool,
}

#[derive(Debug)]
pub struct ShortsPage {
    base: PageBase,
    feed: Mutex<LoadState<Vec<Video>>>,
    playback: Mutex<Playback>,
    guard: RequestGuard,
}

impl ShortsPage {
    pub fn new(props: ScreenProps, backend: Backend) -> Self {
        Self {
            base: PageBase::new(props, backend),
            feed: Mutex::new(LoadState::Idle),
            playback: Mutex::new(Playback::default()),
            guard: RequestGuard::new(),
        }
    }

    pub async fn load(&self) {
        let ticket = self.guard.issue();
        *self.feed.lock() = LoadState::Loading;
        let limit = self.base.backend.limits().shorts;
        let state = match self.base.backend.videos.shorts(limit).await {
            Ok(shorts) => LoadState::Ready(shorts),
            Err(err) => {
                tracing::warn!(error = %err, "Shorts feed failed to load");
                LoadState::Failed(LOAD_FAILED.to_string())
            }
        };
        self.guard.settle(ticket, &self.feed, state, "shorts");
    }

    pub fn feed(&self) -> LoadState<Vec<Video>> {
        self.feed.lock().clone()
    }

    pub fn is_playing(&self) -> bool {
        self.playback.lock().playing
    }

    pub fn is_favourited(&self) -> bool {
        self.playback.lock().favourited
    }

    pub fn is_following(&self) -> bool {
        self.playback.lock().following
    }

    /// Returns the new playing state
    pub fn toggle_play(&self) -> bool {
        let mut playback = self.playback.lock();
        playback.playing = !playback.playing;
        playback.playing
    }

    fn signed_in_or_redirect(&self) -> bool {
        self.base
            .require_session(ScreenId::Shorts, NavigationContext::new())
            .is_some()
    }

    pub fn toggle_favourite(&self) -> bool {
        if !self.signed_in_or_redirect() {
            return false;
        }
        let mut playback = self.playback.lock();
        playback.favourited = !playback.favourited;
        true
    }

    pub fn toggle_follow(&self) -> bool {
        if !self.signed_in_or_redirect() {
            return false;
        }
        let mut playback = self.playback.lock();
        playback.following = !playback.following;
        true
    }

    pub fn open_create(&self) {
        self.base.navigator().go_with(
            ScreenId::Create,
            NavigationContext::new().with_previous_screen(ScreenId::Shorts),
        );
    }

    pub fn open_search(&self) {
        self.base.navigator().go(ScreenId::Search);
    }

    pub fn go_home(&self) {
        self.base.navigator().go(ScreenId::Home);
    }

    pub fn go_subscriptions(&self) {
        self.base.navigator().go(ScreenId::Subscriptions);
    }

    /// "You" tab: library when signed in, login otherwise
    pub fn open_profile(&self) {
        let target = if self.base.session().is_some() {
            ScreenId::Library
        } else {
            ScreenId::Auth
        };
        self.base.navigator().go(target);
    }
}
