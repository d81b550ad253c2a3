//! # Navigation Context
//!
//! Parameters carried by a navigation event. The per-screen payload is a
//! tagged union ([`RouteParams`]); the fields every screen shares (previous
//! screen, back flag, resume-after-login destination) live on
//! [`NavigationContext`] itself.
//!
//! Contexts are values: builders consume and return a new context, and the
//! controller never edits one after it has been stored in history.

use super::screen::ScreenId;
use serde::{Deserialize, Serialize};
use streamr_core::{ChannelId, PlaylistId, VideoId};

/// Screen-specific payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RouteParams {
    /// No payload
    #[default]
    None,
    /// Open a video
    Video { video_id: VideoId },
    /// Open a channel
    Channel { channel_id: ChannelId },
    /// Run a search
    Search { query: String },
    /// Open a playlist
    Playlist { playlist_id: PlaylistId },
}

/// Where to resume once the user has signed in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntendedDestination {
    pub screen: ScreenId,
    pub context: Option<NavigationContext>,
}

/// Parameters of one navigation event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationContext {
    params: RouteParams,
    previous_screen: Option<ScreenId>,
    is_back_navigation: bool,
    force_reload: bool,
    intended: Option<Box<IntendedDestination>>,
}

impl NavigationContext {
    /// Empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Context opening a video
    pub fn video(video_id: impl Into<VideoId>) -> Self {
        Self::new().with_params(RouteParams::Video {
            video_id: video_id.into(),
        })
    }

    /// Context opening a channel
    pub fn channel(channel_id: impl Into<ChannelId>) -> Self {
        Self::new().with_params(RouteParams::Channel {
            channel_id: channel_id.into(),
        })
    }

    /// Context running a search
    pub fn search(query: impl Into<String>) -> Self {
        Self::new().with_params(RouteParams::Search {
            query: query.into(),
        })
    }

    /// Context opening a playlist
    pub fn playlist(playlist_id: impl Into<PlaylistId>) -> Self {
        Self::new().with_params(RouteParams::Playlist {
            playlist_id: playlist_id.into(),
        })
    }

    /// Context flagged as a back navigation
    pub fn back() -> Self {
        Self::new().as_back_navigation()
    }

    /// Context asking the login screen to resume `screen` afterwards
    pub fn resume_after_login(screen: ScreenId, context: Option<NavigationContext>) -> Self {
        Self::new().with_intended(screen, context)
    }

    pub fn with_params(mut self, params: RouteParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_previous_screen(mut self, screen: ScreenId) -> Self {
        self.previous_screen = Some(screen);
        self
    }

    /// Replace (or clear) the previous screen
    pub fn with_previous_screen_opt(mut self, screen: Option<ScreenId>) -> Self {
        self.previous_screen = screen;
        self
    }

    pub fn as_back_navigation(mut self) -> Self {
        self.is_back_navigation = true;
        self
    }

    pub fn with_force_reload(mut self) -> Self {
        self.force_reload = true;
        self
    }

    pub fn with_intended(mut self, screen: ScreenId, context: Option<NavigationContext>) -> Self {
        self.intended = Some(Box::new(IntendedDestination { screen, context }));
        self
    }

    pub fn params(&self) -> &RouteParams {
        &self.params
    }

    pub fn previous_screen(&self) -> Option<ScreenId> {
        self.previous_screen
    }

    pub fn is_back_navigation(&self) -> bool {
        self.is_back_navigation
    }

    pub fn force_reload(&self) -> bool {
        self.force_reload
    }

    pub fn intended(&self) -> Option<&IntendedDestination> {
        self.intended.as_deref()
    }

    /// Intended screen, if a login redirect stored one
    pub fn intended_screen(&self) -> Option<ScreenId> {
        self.intended.as_ref().map(|i| i.screen)
    }

    pub fn video_id(&self) -> Option<&VideoId> {
        match &self.params {
            RouteParams::Video { video_id } => Some(video_id),
            _ => None,
        }
    }

    pub fn channel_id(&self) -> Option<&ChannelId> {
        match &self.params {
            RouteParams::Channel { channel_id } => Some(channel_id),
            _ => None,
        }
    }

    pub fn query(&self) -> Option<&str> {
        match &self.params {
            RouteParams::Search { query } => Some(query),
            _ => None,
        }
    }

    pub fn playlist_id(&self) -> Option<&PlaylistId> {
        match &self.params {
            RouteParams::Playlist { playlist_id } => Some(playlist_id),
            _ => None,
        }
    }
}
