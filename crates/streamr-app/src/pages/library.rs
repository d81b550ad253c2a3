//! Library: playlists and watch history of the signed-in viewer.

use super::state::{LoadState, RequestGuard};
use super::{open_video, PageBase};
use crate::backend::Backend;
use crate::navigation::{ScreenId, ScreenProps};
use parking_lot::Mutex;
use streamr_core::{Playlist, PlaylistId, Video, VideoId};

const LOGIN_REQUIRED: &str = "Please login to view your library.";
const LOAD_FAILED: &str = "Failed to load library. Please try again.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryView {
    pub playlists: Vec<Playlist>,
    pub history: Vec<Video>,
}

/// Playlists every account starts with
fn default_playlists() -> Vec<Playlist> {
    [
        ("wl", "Watch Later", 10, "Clock"),
        ("lv", "Liked videos", 25, "ThumbsUp"),
        ("mp1", "My Playlist #1", 15, "List"),
    ]
    .into_iter()
    .map(|(id, name, video_count, icon)| Playlist {
        id: PlaylistId::new(id),
        name: name.to_string(),
        video_count,
        icon: icon.to_string(),
        thumbnail_url: None,
    })
    .collect()
}

#[derive(Debug)]
pub struct LibraryPage {
    base: PageBase,
    view: Mutex<LoadState<LibraryView>>,
    guard: RequestGuard,
}

impl LibraryPage {
    pub fn new(props: ScreenProps, backend: Backend) -> Self {
        Self {
            base: PageBase::new(props, backend),
            view: Mutex::new(LoadState::Idle),
            guard: RequestGuard::new(),
        }
    }

    pub async fn load(&self) {
        let Some(uid) = self.base.session().map(|user| user.uid.clone()) else {
            self.guard.invalidate();
            *self.view.lock() = LoadState::Failed(LOGIN_REQUIRED.to_string());
            return;
        };
        let ticket = self.guard.issue();
        *self.view.lock() = LoadState::Loading;

        let limit = self.base.backend.limits().library_history;
        let state = match self.base.backend.videos.watch_history(&uid, limit).await {
            Ok(history) => LoadState::Ready(LibraryView {
                playlists: default_playlists(),
                history,
            }),
            Err(err) => {
                tracing::warn!(user = %uid, error = %err, "Library failed to load");
                LoadState::Failed(LOAD_FAILED.to_string())
            }
        };
        self.guard.settle(ticket, &self.view, state, "library");
    }

    pub fn view(&self) -> LoadState<LibraryView> {
        self.view.lock().clone()
    }

    pub async fn open_video(&self, id: &VideoId) {
        open_video(&self.base, id).await;
    }

    pub fn open_search(&self) {
        self.base.navigator().go(ScreenId::Search);
    }
}
