//! # Create
//!
//! Creator hub for the signed-in viewer: create a channel, edit its
//! profile, and upload long videos or shorts. The page first checks
//! whether the viewer already owns a channel and opens either the menu or
//! the channel form accordingly.
//!
//! Uploads stream progress from the [`BlobStore`](crate::data::BlobStore)
//! into [`UploadProgressState`] while they run.

use super::state::LoadState;
use super::PageBase;
use crate::backend::Backend;
use crate::data::{collections, Blob, ChannelUpdate, NewVideo};
use crate::navigation::{NavigationContext, ScreenId, ScreenProps};
use parking_lot::Mutex;
use streamr_core::display::format_duration;
use streamr_core::{Channel, ChannelId, Result, StreamrError, Timestamp, VideoId};
use tokio::sync::mpsc;

const CHECK_FAILED: &str = "Could not check for existing channel.";
const NAME_REQUIRED: &str = "Channel name is required.";
const CREATE_FAILED: &str = "Failed to create channel.";
const PROFILE_FAILED: &str = "Failed to update profile.";
const MISSING_UPLOAD: &str = "Missing video file or channel information.";
const TITLE_REQUIRED: &str = "Video title is required.";
const NO_DURATION: &str = "Could not get video duration.";

/// Which panel of the hub is showing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CreateSection {
    Menu,
    #[default]
    CreateChannelForm,
    EditProfile,
    UploadVideo,
    CreateShort,
}

/// Edit-profile form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileEdit {
    /// New channel name; blank keeps the current one
    pub name: String,
    pub avatar: Option<Blob>,
    pub banner: Option<Blob>,
}

/// Upload form for a video or a short
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoUpload {
    pub file: Option<Blob>,
    pub title: String,
    /// Ignored for shorts
    pub description: String,
    /// Ignored for shorts
    pub thumbnail: Option<Blob>,
    pub is_short: bool,
}

/// Percent complete of each upload slot
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UploadProgressState {
    pub video: f64,
    pub thumbnail: f64,
    pub avatar: f64,
    pub banner: f64,
}

#[derive(Debug, Clone, Copy)]
enum Slot {
    Video,
    Thumbnail,
    Avatar,
    Banner,
}

impl UploadProgressState {
    fn set(&mut self, slot: Slot, percent: f64) {
        match slot {
            Slot::Video => self.video = percent,
            Slot::Thumbnail => self.thumbnail = percent,
            Slot::Avatar => self.avatar = percent,
            Slot::Banner => self.banner = percent,
        }
    }
}

#[derive(Debug)]
pub struct CreatePage {
    base: PageBase,
    /// Outcome of the owned-channel check; `Ready(None)` means no channel yet
    channel: Mutex<LoadState<Option<Channel>>>,
    section: Mutex<CreateSection>,
    progress: Mutex<UploadProgressState>,
    action_error: Mutex<Option<String>>,
}

impl CreatePage {
    pub fn new(props: ScreenProps, backend: Backend) -> Self {
        Self {
            base: PageBase::new(props, backend),
            channel: Mutex::new(LoadState::Idle),
            section: Mutex::new(CreateSection::default()),
            progress: Mutex::new(UploadProgressState::default()),
            action_error: Mutex::new(None),
        }
    }

    /// Redirect to login without a session, otherwise look up the viewer's channel.
    pub async fn start(&self) {
        let Some(user) = self
            .base
            .require_session(ScreenId::Create, self.base.context().clone())
            .cloned()
        else {
            return;
        };
        *self.channel.lock() = LoadState::Loading;

        match self.base.backend.videos.user_channel(&user.uid).await {
            Ok(channel) => {
                let section = if channel.is_some() {
                    CreateSection::Menu
                } else {
                    CreateSection::CreateChannelForm
                };
                *self.channel.lock() = LoadState::Ready(channel);
                self.switch_section(section);
            }
            Err(err) => {
                tracing::warn!(user = %user.uid, error = %err, "Owned channel lookup failed");
                *self.channel.lock() = LoadState::Failed(CHECK_FAILED.to_string());
                self.switch_section(CreateSection::CreateChannelForm);
                *self.action_error.lock() = Some(CHECK_FAILED.to_string());
            }
        }
    }

    pub fn channel_state(&self) -> LoadState<Option<Channel>> {
        self.channel.lock().clone()
    }

    /// The viewer's channel, once known
    pub fn user_channel(&self) -> Option<Channel> {
        self.channel.lock().ready().cloned().flatten()
    }

    pub fn section(&self) -> CreateSection {
        *self.section.lock()
    }

    /// Show another panel, clearing the error and progress bars
    pub fn switch_section(&self, section: CreateSection) {
        *self.section.lock() = section;
        *self.action_error.lock() = None;
        *self.progress.lock() = UploadProgressState::default();
    }

    pub fn progress(&self) -> UploadProgressState {
        *self.progress.lock()
    }

    pub fn action_error(&self) -> Option<String> {
        self.action_error.lock().clone()
    }

    fn fail(&self, message: impl Into<String>) {
        *self.action_error.lock() = Some(message.into());
    }

    fn fail_with(&self, err: &StreamrError, fallback: &str) {
        let message = err.user_message();
        self.fail(if message.is_empty() {
            fallback.to_string()
        } else {
            message
        });
    }

    async fn upload_tracked(&self, blob: &Blob, path: &str, slot: Slot) -> Result<String> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let upload = self.base.backend.blobs.upload(blob, path, Some(tx));
        let track = async {
            while let Some(progress) = rx.recv().await {
                self.progress.lock().set(slot, progress.percent());
            }
        };
        let (url, ()) = tokio::join!(upload, track);
        url
    }

    pub async fn create_channel(&self, name: &str) -> Option<ChannelId> {
        let user = self.base.session()?.clone();
        if name.trim().is_empty() {
            self.fail(NAME_REQUIRED);
            return None;
        }
        *self.action_error.lock() = None;

        let videos = &self.base.backend.videos;
        let created = async {
            let id = videos.create_channel(&user.uid, name, None).await?;
            let channel = videos.channel_details(&id).await?;
            Ok::<_, StreamrError>((id, channel))
        }
        .await;

        match created {
            Ok((id, channel)) => {
                *self.channel.lock() = LoadState::Ready(channel);
                self.switch_section(CreateSection::Menu);
                Some(id)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Channel creation failed");
                self.fail_with(&err, CREATE_FAILED);
                None
            }
        }
    }

    /// Upload any new avatar or banner and rename the channel.
    pub async fn update_profile(&self, edit: ProfileEdit) -> bool {
        let Some(channel) = self.user_channel() else {
            return false;
        };
        if self.base.session().is_none() {
            return false;
        }
        *self.action_error.lock() = None;
        {
            let mut progress = self.progress.lock();
            progress.avatar = 0.0;
            progress.banner = 0.0;
        }

        let result = async {
            let mut avatar_url = channel.avatar_url.clone();
            let mut banner_url = channel.banner_url.clone();
            if let Some(avatar) = &edit.avatar {
                let path = collections::avatar_object(channel.id.as_str(), &avatar.name);
                avatar_url = self.upload_tracked(avatar, &path, Slot::Avatar).await?;
            }
            if let Some(banner) = &edit.banner {
                let path = collections::banner_object(channel.id.as_str(), &banner.name);
                banner_url = Some(self.upload_tracked(banner, &path, Slot::Banner).await?);
            }
            let name = match edit.name.trim() {
                "" => channel.name.clone(),
                name => name.to_string(),
            };

            let videos = &self.base.backend.videos;
            videos
                .update_channel_details(
                    &channel.id,
                    ChannelUpdate {
                        name: Some(name),
                        avatar_url: Some(avatar_url),
                        banner_url,
                    },
                )
                .await?;
            videos.channel_details(&channel.id).await
        }
        .await;

        match result {
            Ok(updated) => {
                if updated.is_some() {
                    *self.channel.lock() = LoadState::Ready(updated);
                }
                self.switch_section(CreateSection::Menu);
                true
            }
            Err(err) => {
                tracing::warn!(channel = %channel.id, error = %err, "Profile update failed");
                self.fail_with(&err, PROFILE_FAILED);
                false
            }
        }
    }

    /// Upload a video or short, store its metadata and open it.
    pub async fn upload(&self, upload: VideoUpload) -> Option<VideoId> {
        let channel = self.user_channel();
        let (Some(file), Some(channel), true) =
            (upload.file.as_ref(), channel, self.base.session().is_some())
        else {
            self.fail(MISSING_UPLOAD);
            return None;
        };
        let title = upload.title.trim();
        if !upload.is_short && title.is_empty() {
            self.fail(TITLE_REQUIRED);
            return None;
        }
        let Some(duration_secs) = file.duration_secs else {
            self.fail(NO_DURATION);
            return None;
        };
        *self.action_error.lock() = None;
        *self.progress.lock() = UploadProgressState::default();

        let kind = if upload.is_short { "short" } else { "video" };
        let result = async {
            let uploaded_at = Timestamp::now().as_millis();
            let path = collections::video_object(channel.id.as_str(), uploaded_at, &file.name);
            let video_url = self.upload_tracked(file, &path, Slot::Video).await?;

            let thumbnail_url = match (&upload.thumbnail, upload.is_short) {
                (_, true) => video_url.clone(),
                (Some(thumbnail), false) => {
                    let path = collections::thumbnail_object(
                        channel.id.as_str(),
                        uploaded_at,
                        &thumbnail.name,
                    );
                    self.upload_tracked(thumbnail, &path, Slot::Thumbnail).await?
                }
                (None, false) => self.base.backend.config.media.placeholder_thumbnail.clone(),
            };

            let description = if upload.is_short {
                String::new()
            } else {
                upload.description.trim().to_string()
            };
            let videos = &self.base.backend.videos;
            let id = videos
                .add_video_metadata(NewVideo {
                    title: title.to_string(),
                    description,
                    channel_id: channel.id.clone(),
                    channel_name: channel.name.clone(),
                    channel_avatar_url: channel.avatar_url.clone(),
                    duration: format_duration(duration_secs),
                    thumbnail_url,
                    video_url,
                    is_short: upload.is_short,
                })
                .await?;
            let refreshed = videos.channel_details(&channel.id).await?;
            Ok::<_, StreamrError>((id, refreshed))
        }
        .await;

        match result {
            Ok((id, refreshed)) => {
                tracing::info!(video = %id, kind, "Upload complete");
                if refreshed.is_some() {
                    *self.channel.lock() = LoadState::Ready(refreshed);
                }
                self.switch_section(CreateSection::Menu);
                self.base
                    .navigator()
                    .go_with(ScreenId::Video, NavigationContext::video(id.clone()));
                Some(id)
            }
            Err(err) => {
                tracing::warn!(channel = %channel.id, kind, error = %err, "Upload failed");
                self.fail_with(&err, &format!("Failed to upload {kind}."));
                None
            }
        }
    }

    pub fn open_my_channel(&self) {
        if let Some(channel) = self.user_channel() {
            self.base
                .navigator()
                .go_with(ScreenId::Channel, NavigationContext::channel(channel.id));
        }
    }

    /// Header back arrow: sub-forms return to the menu, otherwise leave the page
    pub fn back(&self) {
        let section = self.section();
        let in_subform = !matches!(
            section,
            CreateSection::Menu | CreateSection::CreateChannelForm
        );
        if in_subform && self.user_channel().is_some() {
            self.switch_section(CreateSection::Menu);
        } else {
            self.base.back();
        }
    }
}
