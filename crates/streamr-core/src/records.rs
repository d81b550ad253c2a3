//! Domain records as stored in the document store.
//!
//! Field names follow the store's camelCase convention. The document id is
//! not a stored field; the data layer injects it under `id` before decoding.

use crate::identifiers::{ChannelId, CommentId, PlaylistId, UserId, VideoId};
use crate::time::{Timestamp, UploadDate};
use serde::{Deserialize, Serialize};

/// A counter that may be stored as a number or as preformatted text ("200k").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ViewCount {
    /// Numeric counter
    Count(u64),
    /// Preformatted label
    Text(String),
}

impl ViewCount {
    /// Numeric value for ordering; unparsable text sorts as zero.
    pub fn numeric(&self) -> u64 {
        match self {
            Self::Count(n) => *n,
            Self::Text(text) => text.trim().parse().unwrap_or(0),
        }
    }
}

impl Default for ViewCount {
    fn default() -> Self {
        Self::Count(0)
    }
}

impl From<u64> for ViewCount {
    fn from(n: u64) -> Self {
        Self::Count(n)
    }
}

/// A long-form video or a short
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: VideoId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<ChannelId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_avatar_url: Option<String>,
    #[serde(default)]
    pub views: ViewCount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_date: Option<UploadDate>,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub thumbnail_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<ViewCount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dislikes: Option<ViewCount>,
    /// Denormalised from the owning channel when details are loaded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_subscribers_count: Option<ViewCount>,
    #[serde(default)]
    pub is_short: bool,
}

/// A creator channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub id: ChannelId,
    pub name: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner_url: Option<String>,
    #[serde(default)]
    pub subscribers_count: ViewCount,
    #[serde(default)]
    pub video_count: ViewCount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<UserId>,
}

/// A comment in a video's `comments` sub-collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub user_id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    pub text: String,
    pub timestamp: Timestamp,
}

/// A user playlist shown in the library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: PlaylistId,
    pub name: String,
    pub video_count: u64,
    /// Icon identifier
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

/// One row of `users/{uid}/watchHistory`, keyed by video id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchHistoryEntry {
    pub video_id: VideoId,
    pub last_watched: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_video_decodes_sparse_document() {
        let video: Video = serde_json::from_value(json!({
            "id": "v1",
            "title": "Intro",
            "views": "200k",
            "channelId": "c1",
            "uploadDate": 1700000000000u64,
        }))
        .unwrap();
        assert_eq!(video.id, VideoId::new("v1"));
        assert_eq!(video.views, ViewCount::Text("200k".into()));
        assert_eq!(video.channel_id, Some(ChannelId::new("c1")));
        assert!(!video.is_short);
        assert!(video.duration.is_empty());
    }

    #[test]
    fn test_view_count_numeric() {
        assert_eq!(ViewCount::Count(12).numeric(), 12);
        assert_eq!(ViewCount::Text("34".into()).numeric(), 34);
        assert_eq!(ViewCount::Text("1.2M".into()).numeric(), 0);
    }

    #[test]
    fn test_channel_camel_case_fields() {
        let channel = Channel {
            id: ChannelId::new("c1"),
            name: "Cooking".into(),
            avatar_url: "a.png".into(),
            banner_url: None,
            subscribers_count: ViewCount::Count(3),
            video_count: ViewCount::Count(1),
            owner_id: Some(UserId::new("u1")),
        };
        let value = serde_json::to_value(&channel).unwrap();
        assert_eq!(value["avatarUrl"], "a.png");
        assert_eq!(value["ownerId"], "u1");
        assert!(value.get("bannerUrl").is_none());
    }
}
