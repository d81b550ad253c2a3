//! Video: player details, comments, up-next, reactions.

use super::state::{LoadState, RequestGuard};
use super::{open_video, PageBase};
use crate::backend::Backend;
use crate::navigation::{NavigationContext, ScreenId, ScreenProps};
use parking_lot::Mutex;
use streamr_core::{Comment, StreamrError, Video, VideoId};

const MISSING_ID: &str = "Video ID is missing.";
const NOT_FOUND: &str = "Video not found.";
const LOAD_FAILED: &str = "Failed to load video details.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoView {
    pub video: Video,
    pub comments: Vec<Comment>,
    pub comments_count: usize,
    pub up_next: Vec<Video>,
}

#[derive(Debug, Default, Clone, Copy)]
struct Reactions {
    liked: bool,
    disliked: bool,
    subscribed: bool,
}

#[derive(Debug)]
pub struct VideoPage {
    base: PageBase,
    view: Mutex<LoadState<VideoView>>,
    reactions: Mutex<Reactions>,
    action_error: Mutex<Option<String>>,
    guard: RequestGuard,
}

impl VideoPage {
    pub fn new(props: ScreenProps, backend: Backend) -> Self {
        Self {
            base: PageBase::new(props, backend),
            view: Mutex::new(LoadState::Idle),
            reactions: Mutex::new(Reactions::default()),
            action_error: Mutex::new(None),
            guard: RequestGuard::new(),
        }
    }

    pub fn video_id(&self) -> Option<&VideoId> {
        self.base.context().video_id()
    }

    pub async fn load(&self) {
        let Some(id) = self.video_id().cloned() else {
            *self.view.lock() = LoadState::Failed(MISSING_ID.to_string());
            return;
        };
        let ticket = self.guard.issue();
        *self.view.lock() = LoadState::Loading;

        let state = match self.fetch(&id).await {
            Ok(Some(view)) => LoadState::Ready(view),
            Ok(None) => LoadState::Failed(NOT_FOUND.to_string()),
            Err(err) => {
                tracing::warn!(video = %id, error = %err, "Video page failed to load");
                LoadState::Failed(LOAD_FAILED.to_string())
            }
        };
        self.guard.settle(ticket, &self.view, state, "video");
    }

    async fn fetch(&self, id: &VideoId) -> Result<Option<VideoView>, StreamrError> {
        let videos = &self.base.backend.videos;
        let limits = self.base.backend.limits();
        let Some(video) = videos.video_details(id).await? else {
            return Ok(None);
        };
        if let Some(user) = self.base.session() {
            if let Err(err) = videos.add_to_watch_history(&user.uid, id).await {
                tracing::warn!(video = %id, error = %err, "Failed to record watch history");
            }
        }
        let (comments, comments_count, up_next) = futures::try_join!(
            videos.comments(id, limits.comments),
            videos.comments_count(id),
            videos.up_next(id, limits.up_next),
        )?;
        Ok(Some(VideoView {
            video,
            comments,
            comments_count,
            up_next,
        }))
    }

    pub fn view(&self) -> LoadState<VideoView> {
        self.view.lock().clone()
    }

    pub fn is_liked(&self) -> bool {
        self.reactions.lock().liked
    }

    pub fn is_disliked(&self) -> bool {
        self.reactions.lock().disliked
    }

    pub fn is_subscribed(&self) -> bool {
        self.reactions.lock().subscribed
    }

    /// Error from the last comment or reaction, if any
    pub fn action_error(&self) -> Option<String> {
        self.action_error.lock().clone()
    }

    fn signed_in_or_redirect(&self) -> bool {
        self.base
            .require_session(ScreenId::Video, self.base.context().clone())
            .is_some()
    }

    /// Returns false when the viewer was sent to login instead
    pub fn toggle_like(&self) -> bool {
        if !self.signed_in_or_redirect() {
            return false;
        }
        let mut r = self.reactions.lock();
        r.liked = !r.liked;
        if r.liked {
            r.disliked = false;
        }
        true
    }

    pub fn toggle_dislike(&self) -> bool {
        if !self.signed_in_or_redirect() {
            return false;
        }
        let mut r = self.reactions.lock();
        r.disliked = !r.disliked;
        if r.disliked {
            r.liked = false;
        }
        true
    }

    pub fn toggle_subscribe(&self) -> bool {
        if !self.signed_in_or_redirect() {
            return false;
        }
        let mut r = self.reactions.lock();
        r.subscribed = !r.subscribed;
        true
    }

    /// Post a comment and refresh the comment list.
    pub async fn post_comment(&self, text: &str) -> Option<Comment> {
        let user = self
            .base
            .require_session(ScreenId::Video, self.base.context().clone())?
            .clone();
        let id = self.video_id()?.clone();
        let videos = &self.base.backend.videos;

        let posted = match videos.add_comment(&id, &user, text).await {
            Ok(comment) => comment,
            Err(err) => {
                *self.action_error.lock() = Some(err.user_message());
                return None;
            }
        };
        *self.action_error.lock() = None;

        let limit = self.base.backend.limits().comments;
        if let (Ok(comments), Ok(count)) = (
            videos.comments(&id, limit).await,
            videos.comments_count(&id).await,
        ) {
            if let LoadState::Ready(view) = &mut *self.view.lock() {
                view.comments = comments;
                view.comments_count = count;
            }
        }
        Some(posted)
    }

    pub fn open_channel(&self) {
        let channel = self
            .view
            .lock()
            .ready()
            .and_then(|view| view.video.channel_id.clone());
        if let Some(channel) = channel {
            self.base
                .navigator()
                .go_with(ScreenId::Channel, NavigationContext::channel(channel));
        }
    }

    pub async fn open_up_next(&self, id: &VideoId) {
        open_video(&self.base, id).await;
    }

    pub fn back(&self) {
        self.base.back();
    }
}
