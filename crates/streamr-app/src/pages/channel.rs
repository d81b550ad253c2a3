//! Channel: header, tab strip and the channel's uploads.

use super::state::{LoadState, RequestGuard};
use super::{open_video, PageBase};
use crate::backend::Backend;
use crate::navigation::{ScreenId, ScreenProps};
use parking_lot::Mutex;
use streamr_core::{Channel, ChannelId, StreamrError, Video, VideoId};

pub const CHANNEL_TABS: [&str; 5] = ["Home", "Videos", "Playlists", "Community", "About"];

const MISSING_ID: &str = "Channel ID is missing.";
const NOT_FOUND: &str = "Channel not found.";
const LOAD_FAILED: &str = "Failed to load channel details.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelView {
    pub channel: Channel,
    pub videos: Vec<Video>,
}

#[derive(Debug, Default, Clone, Copy)]
struct Follow {
    subscribed: bool,
    notifications: bool,
}

#[derive(Debug)]
pub struct ChannelPage {
    base: PageBase,
    view: Mutex<LoadState<ChannelView>>,
    tab: Mutex<&'static str>,
    follow: Mutex<Follow>,
    guard: RequestGuard,
}

impl ChannelPage {
    pub fn new(props: ScreenProps, backend: Backend) -> Self {
        Self {
            base: PageBase::new(props, backend),
            view: Mutex::new(LoadState::Idle),
            tab: Mutex::new(CHANNEL_TABS[0]),
            follow: Mutex::new(Follow::default()),
            guard: RequestGuard::new(),
        }
    }

    pub fn channel_id(&self) -> Option<&ChannelId> {
        self.base.context().channel_id()
    }

    pub async fn load(&self) {
        let Some(id) = self.channel_id().cloned() else {
            *self.view.lock() = LoadState::Failed(MISSING_ID.to_string());
            return;
        };
        let ticket = self.guard.issue();
        *self.view.lock() = LoadState::Loading;

        let state = match self.fetch(&id).await {
            Ok(Some(view)) => LoadState::Ready(view),
            Ok(None) => LoadState::Failed(NOT_FOUND.to_string()),
            Err(err) => {
                tracing::warn!(channel = %id, error = %err, "Channel page failed to load");
                LoadState::Failed(LOAD_FAILED.to_string())
            }
        };
        self.guard.settle(ticket, &self.view, state, "channel");
    }

    async fn fetch(&self, id: &ChannelId) -> Result<Option<ChannelView>, StreamrError> {
        let videos = &self.base.backend.videos;
        let Some(channel) = videos.channel_details(id).await? else {
            return Ok(None);
        };
        let limit = self.base.backend.limits().channel_videos;
        let videos = videos.channel_videos(id, limit).await?;
        Ok(Some(ChannelView { channel, videos }))
    }

    pub fn view(&self) -> LoadState<ChannelView> {
        self.view.lock().clone()
    }

    pub fn active_tab(&self) -> &'static str {
        *self.tab.lock()
    }

    /// Select a tab by label. Unknown labels are ignored.
    pub fn set_tab(&self, name: &str) -> bool {
        match CHANNEL_TABS.iter().find(|t| **t == name) {
            Some(tab) => {
                *self.tab.lock() = tab;
                true
            }
            None => false,
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.follow.lock().subscribed
    }

    pub fn notifications_enabled(&self) -> bool {
        self.follow.lock().notifications
    }

    fn signed_in_or_redirect(&self) -> bool {
        self.base
            .require_session(ScreenId::Channel, self.base.context().clone())
            .is_some()
    }

    /// Unsubscribing also turns notifications off
    pub fn toggle_subscribe(&self) -> bool {
        if !self.signed_in_or_redirect() {
            return false;
        }
        let mut follow = self.follow.lock();
        follow.subscribed = !follow.subscribed;
        if !follow.subscribed {
            follow.notifications = false;
        }
        true
    }

    pub fn toggle_notifications(&self) -> bool {
        if !self.signed_in_or_redirect() {
            return false;
        }
        let mut follow = self.follow.lock();
        follow.notifications = !follow.notifications;
        true
    }

    pub async fn open_video(&self, id: &VideoId) {
        open_video(&self.base, id).await;
    }

    pub fn back(&self) {
        self.base.back();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::NavigationContext;
    use crate::pages::test_support::{props, props_with, seeded_backend, user};

    #[tokio::test]
    async fn test_error_messages() {
        let backend = seeded_backend().await;
        let (p, _q) = props(None);
        let page = ChannelPage::new(p, backend.clone());
        page.load().await;
        assert_eq!(page.view().error(), Some("Channel ID is missing."));

        let (p, _q) = props_with(NavigationContext::channel("ghost"), None);
        let page = ChannelPage::new(p, backend);
        page.load().await;
        assert_eq!(page.view().error(), Some("Channel not found."));
    }

    #[tokio::test]
    async fn test_load_lists_uploads() {
        let backend = seeded_backend().await;
        let (p, _q) = props_with(NavigationContext::channel("c1"), None);
        let page = ChannelPage::new(p, backend);
        page.load().await;
        let view = page.view();
        let view = view.ready().unwrap();
        assert_eq!(view.channel.name, "Rusty");
        assert_eq!(view.videos.len(), 3);
    }

    #[tokio::test]
    async fn test_tabs() {
        let backend = seeded_backend().await;
        let (p, _q) = props(None);
        let page = ChannelPage::new(p, backend);
        assert_eq!(page.active_tab(), "Home");
        assert!(page.set_tab("About"));
        assert!(!page.set_tab("Merch"));
        assert_eq!(page.active_tab(), "About");
    }

    #[tokio::test]
    async fn test_subscribe_redirects_without_session() {
        let backend = seeded_backend().await;
        let (p, mut queue) = props_with(NavigationContext::channel("c1"), None);
        let page = ChannelPage::new(p, backend);
        assert!(!page.toggle_subscribe());
        let request = queue.try_recv().unwrap();
        assert_eq!(request.target, ScreenId::Auth);
        assert_eq!(
            request.context.unwrap().intended_screen(),
            Some(ScreenId::Channel)
        );
    }

    #[tokio::test]
    async fn test_unsubscribe_clears_notifications() {
        let backend = seeded_backend().await;
        let (p, _q) = props_with(NavigationContext::channel("c1"), Some(user()));
        let page = ChannelPage::new(p, backend);
        assert!(page.toggle_subscribe());
        assert!(page.toggle_notifications());
        assert!(page.notifications_enabled());
        page.toggle_subscribe();
        assert!(!page.is_subscribed());
        assert!(!page.notifications_enabled());
    }
}
