//! Collection names and document paths used by the video service.

use super::store::CollectionPath;
use streamr_core::{UserId, VideoId};

pub const VIDEOS: &str = "videos";
pub const CHANNELS: &str = "channels";
/// Sub-collection under each video
pub const COMMENTS: &str = "comments";
pub const USERS: &str = "users";
/// Sub-collection under each user
pub const WATCH_HISTORY: &str = "watchHistory";

pub fn videos() -> CollectionPath {
    CollectionPath::new(VIDEOS)
}

pub fn channels() -> CollectionPath {
    CollectionPath::new(CHANNELS)
}

/// `videos/{video}/comments`
pub fn comments(video: &VideoId) -> CollectionPath {
    videos().sub(video.as_str(), COMMENTS)
}

/// `users/{uid}/watchHistory`
pub fn watch_history(user: &UserId) -> CollectionPath {
    CollectionPath::new(USERS).sub(user.as_str(), WATCH_HISTORY)
}

/// Object path for an uploaded video file
pub fn video_object(channel: &str, uploaded_at_ms: u64, file_name: &str) -> String {
    format!("videos/{channel}/{uploaded_at_ms}_{file_name}")
}

/// Object path for an uploaded thumbnail
pub fn thumbnail_object(channel: &str, uploaded_at_ms: u64, file_name: &str) -> String {
    format!("thumbnails/{channel}/{uploaded_at_ms}_{file_name}")
}

pub fn avatar_object(channel: &str, file_name: &str) -> String {
    format!("avatars/{channel}/{file_name}")
}

pub fn banner_object(channel: &str, file_name: &str) -> String {
    format!("banners/{channel}/{file_name}")
}
