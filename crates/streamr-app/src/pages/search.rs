//! Search: title prefix search seeded from the navigation context.

use super::state::{LoadState, RequestGuard};
use super::{open_video, PageBase};
use crate::backend::Backend;
use crate::navigation::ScreenProps;
use parking_lot::Mutex;
use streamr_core::{Video, VideoId};

const SEARCH_FAILED: &str = "Failed to search videos. Please try again.";

#[derive(Debug)]
pub struct SearchPage {
    base: PageBase,
    term: Mutex<String>,
    results: Mutex<LoadState<Vec<Video>>>,
    guard: RequestGuard,
}

impl SearchPage {
    pub fn new(props: ScreenProps, backend: Backend) -> Self {
        let term = props.context.query().unwrap_or_default().to_string();
        Self {
            base: PageBase::new(props, backend),
            term: Mutex::new(term),
            results: Mutex::new(LoadState::Idle),
            guard: RequestGuard::new(),
        }
    }

    /// Run the query carried by the navigation context, if any
    pub async fn start(&self) {
        if let Some(query) = self.base.context().query().map(str::to_string) {
            self.search(&query).await;
        }
    }

    pub fn term(&self) -> String {
        self.term.lock().clone()
    }

    pub fn set_term(&self, term: impl Into<String>) {
        *self.term.lock() = term.into();
    }

    /// Search for the current input
    pub async fn submit(&self) {
        let term = self.term();
        self.search(&term).await;
    }

    /// Search for `query`. A blank query clears the results.
    pub async fn search(&self, query: &str) {
        *self.term.lock() = query.to_string();
        if query.trim().is_empty() {
            self.guard.invalidate();
            *self.results.lock() = LoadState::Idle;
            return;
        }

        let ticket = self.guard.issue();
        *self.results.lock() = LoadState::Loading;
        let limit = self.base.backend.limits().search_results;
        let state = match self.base.backend.videos.search(query, limit).await {
            Ok(videos) => LoadState::Ready(videos),
            Err(err) => {
                tracing::warn!(query, error = %err, "Search failed");
                LoadState::Failed(SEARCH_FAILED.to_string())
            }
        };
        self.guard.settle(ticket, &self.results, state, "search");
    }

    /// Clear the input and results, dropping any search in flight
    pub fn clear(&self) {
        self.guard.invalidate();
        self.term.lock().clear();
        *self.results.lock() = LoadState::Idle;
    }

    pub fn results(&self) -> LoadState<Vec<Video>> {
        self.results.lock().clone()
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
    use crate::navigation::{NavigationContext, ScreenId};
    use crate::pages::test_support::{props, props_with, seeded_backend, user};

    #[tokio::test]
    async fn test_query_from_context_runs_on_start() {
        let backend = seeded_backend().await;
        let (props, _queue) = props_with(NavigationContext::search("Borrow"), None);
        let page = SearchPage::new(props, backend);
        assert_eq!(page.term(), "Borrow");
        page.start().await;
        let results = page.results();
        let videos = results.ready().unwrap();
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].id.as_str(), "v2");
    }

    #[tokio::test]
    async fn test_blank_query_clears() {
        let backend = seeded_backend().await;
        let (props, _queue) = props(None);
        let page = SearchPage::new(props, backend);
        page.search("Own").await;
        assert!(page.results().ready().is_some());
        page.search("  ").await;
        assert_eq!(page.results(), LoadState::Idle);

        page.set_term("Tiny");
        page.submit().await;
        assert_eq!(page.results().ready().map(Vec::len), Some(1));
        page.clear();
        assert_eq!(page.term(), "");
        assert_eq!(page.results(), LoadState::Idle);
    }

    #[tokio::test]
    async fn test_open_video_records_history_when_signed_in() {
        let backend = seeded_backend().await;
        let (props, mut queue) = props(Some(user()));
        let page = SearchPage::new(props, backend.clone());
        page.open_video(&VideoId::new("v1")).await;

        let request = queue.try_recv().unwrap();
        assert_eq!(request.target, ScreenId::Video);
        let history = backend.videos.watch_history(&user().uid, 10).await.unwrap();
        assert_eq!(history.len(), 1);
    }

    #[tokio::test]
    async fn test_back_uses_previous_screen() {
        let backend = seeded_backend().await;
        let (props, mut queue) = props_with(
            NavigationContext::new().with_previous_screen(ScreenId::Channel),
            None,
        );
        SearchPage::new(props, backend).back();
        let request = queue.try_recv().unwrap();
        assert_eq!(request.target, ScreenId::Channel);
        assert!(request.context.unwrap().is_back_navigation());
    }
}
