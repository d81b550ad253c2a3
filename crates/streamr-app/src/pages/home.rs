//! Home: recommended feed, favourites row and category filters.

use super::state::{LoadState, RequestGuard};
use super::{open_video, PageBase};
use crate::backend::Backend;
use crate::navigation::{NavigationContext, ScreenId, ScreenProps};
use parking_lot::Mutex;
use streamr_core::{ChannelId, Video, VideoId};

/// Category chips above the feed
pub const HOME_FILTERS: [&str; 7] = ["All", "Music", "Gaming", "Live", "News", "Sports", "Education"];

const LOAD_FAILED: &str = "Failed to load videos. Please try again later.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomeFeed {
    pub recommended: Vec<Video>,
    pub favourites: Vec<Video>,
}

#[derive(Debug)]
pub struct HomePage {
    base: PageBase,
    feed: Mutex<LoadState<HomeFeed>>,
    filter: Mutex<&'static str>,
    guard: RequestGuard,
}

impl HomePage {
    pub fn new(props: ScreenProps, backend: Backend) -> Self {
        Self {
            base: PageBase::new(props, backend),
            feed: Mutex::new(LoadState::Idle),
            filter: Mutex::new(HOME_FILTERS[0]),
            guard: RequestGuard::new(),
        }
    }

    pub async fn load(&self) {
        let ticket = self.guard.issue();
        *self.feed.lock() = LoadState::Loading;

        let videos = &self.base.backend.videos;
        let limits = self.base.backend.limits();
        let result = futures::try_join!(
            videos.recommended(limits.home_recommended),
            videos.recommended(limits.home_favourites),
        )
        .map(|(recommended, favourites)| HomeFeed {
            recommended,
            favourites,
        });

        let state = match result {
            Ok(feed) => LoadState::Ready(feed),
            Err(err) => {
                tracing::warn!(error = %err, "Home feed failed to load");
                LoadState::Failed(LOAD_FAILED.to_string())
            }
        };
        self.guard.settle(ticket, &self.feed, state, "home");
    }

    pub fn feed(&self) -> LoadState<HomeFeed> {
        self.feed.lock().clone()
    }

    pub fn active_filter(&self) -> &'static str {
        *self.filter.lock()
    }

    /// Select a category chip. Unknown names are ignored.
    pub fn set_filter(&self, name: &str) -> bool {
        match HOME_FILTERS.iter().find(|f| **f == name) {
            Some(filter) => {
                *self.filter.lock() = filter;
                true
            }
            None => false,
        }
    }

    pub async fn open_video(&self, id: &VideoId) {
        open_video(&self.base, id).await;
    }

    pub fn open_channel(&self, id: &ChannelId) {
        self.base
            .navigator()
            .go_with(ScreenId::Channel, NavigationContext::channel(id.clone()));
    }

    pub fn open_search(&self) {
        self.base.navigator().go(ScreenId::Search);
    }

    /// Avatar / sign-in button in the header
    pub fn open_profile(&self) {
        self.base.navigator().go(ScreenId::Auth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::test_support::{props, seeded_backend};

    #[tokio::test]
    async fn test_load_fills_both_rows() {
        let backend = seeded_backend().await;
        let (props, _queue) = props(None);
        let page = HomePage::new(props, backend);
        assert_eq!(page.feed(), LoadState::Idle);
        page.load().await;
        let feed = page.feed();
        let feed = feed.ready().unwrap();
        assert!(!feed.recommended.is_empty());
        assert!(feed.favourites.len() <= 8);
    }

    #[tokio::test]
    async fn test_filters() {
        let backend = seeded_backend().await;
        let (props, _queue) = props(None);
        let page = HomePage::new(props, backend);
        assert_eq!(page.active_filter(), "All");
        assert!(page.set_filter("Gaming"));
        assert!(!page.set_filter("Cats"));
        assert_eq!(page.active_filter(), "Gaming");
    }

    #[tokio::test]
    async fn test_navigation_requests() {
        let backend = seeded_backend().await;
        let (props, mut queue) = props(None);
        let page = HomePage::new(props, backend);
        page.open_channel(&ChannelId::new("c1"));
        page.open_search();
        let first = queue.try_recv().unwrap();
        assert_eq!(first.target, ScreenId::Channel);
        assert_eq!(first.context.unwrap().channel_id(), Some(&ChannelId::new("c1")));
        assert_eq!(queue.try_recv().unwrap().target, ScreenId::Search);
    }
}
