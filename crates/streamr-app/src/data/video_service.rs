//! # Video Service
//!
//! Every read and write the pages perform, expressed as document-store
//! queries. List results are enriched with channel fields the video
//! documents do not carry themselves.

use super::collections;
use super::store::{to_fields, Direction, Document, DocumentStore, Fields, Query};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use streamr_core::{
    Channel, ChannelId, Comment, Result, StreamrError, Timestamp, UserId, Video, VideoId,
    WatchHistoryEntry,
};

/// Which channel fields to copy onto a video
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Enrich {
    /// Channel name only
    Name,
    /// Name and avatar
    Card,
    /// Name, avatar and subscriber count
    Full,
}

/// Metadata for a freshly uploaded video
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVideo {
    pub title: String,
    pub description: String,
    pub channel_id: ChannelId,
    pub channel_name: String,
    pub channel_avatar_url: String,
    pub duration: String,
    pub thumbnail_url: String,
    pub video_url: String,
    pub is_short: bool,
}

/// Partial channel update; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelUpdate {
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub banner_url: Option<String>,
}

impl ChannelUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.avatar_url.is_none() && self.banner_url.is_none()
    }

    fn into_fields(self) -> Fields {
        let mut fields = Fields::new();
        if let Some(name) = self.name {
            fields.insert("name".into(), Value::String(name));
        }
        if let Some(url) = self.avatar_url {
            fields.insert("avatarUrl".into(), Value::String(url));
        }
        if let Some(url) = self.banner_url {
            fields.insert("bannerUrl".into(), Value::String(url));
        }
        fields
    }
}

/// Queries and writes over the video, channel and user collections
#[derive(Clone)]
pub struct VideoService {
    store: Arc<dyn DocumentStore>,
    placeholder_avatar: String,
}

impl std::fmt::Debug for VideoService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoService").finish_non_exhaustive()
    }
}

fn decode_all<T: DeserializeOwned>(docs: Vec<Document>) -> Vec<T> {
    docs.into_iter()
        .filter_map(|doc| match doc.decode() {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!(id = %doc.id, error = %err, "Skipping undecodable document");
                None
            }
        })
        .collect()
}

impl VideoService {
    pub fn new(store: Arc<dyn DocumentStore>, placeholder_avatar: impl Into<String>) -> Self {
        Self {
            store,
            placeholder_avatar: placeholder_avatar.into(),
        }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    async fn enrich(&self, mut video: Video, level: Enrich) -> Result<Video> {
        let Some(channel_id) = video.channel_id.clone() else {
            return Ok(video);
        };
        if let Some(channel) = self.channel_details(&channel_id).await? {
            video.channel_name = Some(channel.name);
            if level != Enrich::Name {
                video.channel_avatar_url = Some(channel.avatar_url);
            }
            if level == Enrich::Full {
                video.channel_subscribers_count = Some(channel.subscribers_count);
            }
        }
        Ok(video)
    }

    async fn enrich_all(&self, videos: Vec<Video>, level: Enrich) -> Result<Vec<Video>> {
        let mut out = Vec::with_capacity(videos.len());
        for video in videos {
            out.push(self.enrich(video, level).await?);
        }
        Ok(out)
    }

    /// Most viewed videos with channel name and avatar
    pub async fn recommended(&self, limit: usize) -> Result<Vec<Video>> {
        let docs = self
            .store
            .query(
                &collections::videos(),
                &Query::new().order_by("views", Direction::Desc).limit(limit),
            )
            .await?;
        self.enrich_all(decode_all(docs), Enrich::Card).await
    }

    /// Case-sensitive title prefix search. Blank queries match nothing.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<Video>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let docs = self
            .store
            .query(
                &collections::videos(),
                &Query::prefix("title", query).limit(limit),
            )
            .await?;
        self.enrich_all(decode_all(docs), Enrich::Name).await
    }

    /// One video with channel name, avatar and subscriber count
    pub async fn video_details(&self, id: &VideoId) -> Result<Option<Video>> {
        match self.store.get(&collections::videos(), id.as_str()).await? {
            Some(doc) => Ok(Some(self.enrich(doc.decode()?, Enrich::Full).await?)),
            None => Ok(None),
        }
    }

    pub async fn channel_details(&self, id: &ChannelId) -> Result<Option<Channel>> {
        self.store
            .get(&collections::channels(), id.as_str())
            .await?
            .map(|doc| doc.decode())
            .transpose()
    }

    /// Newest comments first
    pub async fn comments(&self, video: &VideoId, limit: usize) -> Result<Vec<Comment>> {
        let docs = self
            .store
            .query(
                &collections::comments(video),
                &Query::new().order_by("timestamp", Direction::Desc).limit(limit),
            )
            .await?;
        Ok(decode_all(docs))
    }

    pub async fn comments_count(&self, video: &VideoId) -> Result<usize> {
        self.store.count(&collections::comments(video)).await
    }

    /// Post a comment as `author`
    pub async fn add_comment(
        &self,
        video: &VideoId,
        author: &streamr_core::SessionIdentity,
        text: &str,
    ) -> Result<Comment> {
        let text = text.trim();
        if text.is_empty() {
            return Err(StreamrError::invalid("Comment cannot be empty."));
        }
        let timestamp = Timestamp::now();
        let mut fields = Fields::new();
        fields.insert("userId".into(), json!(author.uid));
        fields.insert("text".into(), json!(text));
        fields.insert("timestamp".into(), json!(timestamp));
        if let Some(name) = &author.display_name {
            fields.insert("userName".into(), json!(name));
        }
        if let Some(url) = &author.photo_url {
            fields.insert("userAvatarUrl".into(), json!(url));
        }
        let path = collections::comments(video);
        let id = self.store.add(&path, fields.clone()).await?;
        Document::new(id, fields).decode()
    }

    /// Other videos to watch after `current`
    pub async fn up_next(&self, current: &VideoId, limit: usize) -> Result<Vec<Video>> {
        let docs = self
            .store
            .query(
                &collections::videos(),
                &Query::new().where_id_ne(current.as_str()).limit(limit),
            )
            .await?;
        self.enrich_all(decode_all(docs), Enrich::Name).await
    }

    /// A channel's videos, newest first
    pub async fn channel_videos(&self, channel: &ChannelId, limit: usize) -> Result<Vec<Video>> {
        let docs = self
            .store
            .query(
                &collections::videos(),
                &Query::new()
                    .where_eq("channelId", channel.as_str())
                    .order_by("uploadDate", Direction::Desc)
                    .limit(limit),
            )
            .await?;
        Ok(decode_all(docs))
    }

    /// Newest shorts, with channel name and avatar
    pub async fn shorts(&self, limit: usize) -> Result<Vec<Video>> {
        let docs = self
            .store
            .query(
                &collections::videos(),
                &Query::new()
                    .where_eq("isShort", true)
                    .order_by("uploadDate", Direction::Desc)
                    .limit(limit),
            )
            .await?;
        self.enrich_all(decode_all(docs), Enrich::Card).await
    }

    /// Recently watched videos, most recent first. Deleted videos are skipped.
    pub async fn watch_history(&self, user: &UserId, limit: usize) -> Result<Vec<Video>> {
        let docs = self
            .store
            .query(
                &collections::watch_history(user),
                &Query::new().order_by("lastWatched", Direction::Desc).limit(limit),
            )
            .await?;
        let entries: Vec<WatchHistoryEntry> = decode_all(docs);

        let mut videos = Vec::with_capacity(entries.len());
        for entry in entries {
            if let Some(video) = self.video_details(&entry.video_id).await? {
                videos.push(video);
            }
        }
        Ok(videos)
    }

    /// Record that `user` watched `video` now. Re-watching overwrites the entry.
    pub async fn add_to_watch_history(&self, user: &UserId, video: &VideoId) -> Result<()> {
        if user.as_str().is_empty() || video.as_str().is_empty() {
            return Ok(());
        }
        let entry = WatchHistoryEntry {
            video_id: video.clone(),
            last_watched: Timestamp::now(),
        };
        self.store
            .set(
                &collections::watch_history(user),
                video.as_str(),
                to_fields(&entry)?,
            )
            .await
    }

    /// Create a channel owned by `owner`, returning its id
    pub async fn create_channel(
        &self,
        owner: &UserId,
        name: &str,
        avatar_url: Option<&str>,
    ) -> Result<ChannelId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StreamrError::invalid("Channel name is required."));
        }
        let fields = match json!({
            "name": name,
            "ownerId": owner,
            "avatarUrl": avatar_url.unwrap_or(&self.placeholder_avatar),
            "subscribersCount": 0,
            "videoCount": 0,
            "bannerUrl": "",
        }) {
            Value::Object(map) => map,
            _ => return Err(StreamrError::internal("channel fields must be an object")),
        };
        let id = self.store.add(&collections::channels(), fields).await?;
        tracing::info!(channel = %id, owner = %owner, "Channel created");
        Ok(ChannelId::new(id))
    }

    /// The channel owned by `owner`, if any
    pub async fn user_channel(&self, owner: &UserId) -> Result<Option<Channel>> {
        let docs = self
            .store
            .query(
                &collections::channels(),
                &Query::new().where_eq("ownerId", owner.as_str()).limit(1),
            )
            .await?;
        docs.into_iter().next().map(|doc| doc.decode()).transpose()
    }

    /// Store metadata for an uploaded video and bump the channel's video count
    pub async fn add_video_metadata(&self, video: NewVideo) -> Result<VideoId> {
        let channel = video.channel_id.clone();
        let mut fields = to_fields(&video)?;
        fields.insert("views".into(), json!(0));
        fields.insert("likes".into(), json!(0));
        fields.insert("dislikes".into(), json!(0));
        fields.insert("uploadDate".into(), json!(Timestamp::now()));

        let id = self.store.add(&collections::videos(), fields).await?;
        self.store
            .increment(&collections::channels(), channel.as_str(), "videoCount", 1)
            .await?;
        tracing::info!(video = %id, channel = %channel, "Video metadata stored");
        Ok(VideoId::new(id))
    }

    /// Apply the provided fields only; an empty update does nothing
    pub async fn update_channel_details(
        &self,
        channel: &ChannelId,
        update: ChannelUpdate,
    ) -> Result<()> {
        if update.is_empty() {
            return Ok(());
        }
        self.store
            .update(&collections::channels(), channel.as_str(), update.into_fields())
            .await
    }
}
