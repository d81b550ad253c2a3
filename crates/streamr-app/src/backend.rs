//! # Backend Handle
//!
//! The external services the application talks to, constructed once at
//! startup and passed down explicitly. There is no global client.

use crate::data::{BlobStore, DocumentStore, InMemoryBlobStore, InMemoryDocumentStore, VideoService};
use crate::session::{InMemorySessionProvider, SessionProvider};
use std::sync::Arc;
use streamr_core::config::FeedLimits;
use streamr_core::StreamrConfig;

/// Session provider, stores and configuration shared by every page
#[derive(Clone)]
pub struct Backend {
    pub config: Arc<StreamrConfig>,
    pub session: Arc<dyn SessionProvider>,
    pub documents: Arc<dyn DocumentStore>,
    pub blobs: Arc<dyn BlobStore>,
    pub videos: VideoService,
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backend")
            .field("project_id", &self.config.backend.project_id)
            .finish_non_exhaustive()
    }
}

impl Backend {
    pub fn new(
        config: StreamrConfig,
        session: Arc<dyn SessionProvider>,
        documents: Arc<dyn DocumentStore>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        let videos = VideoService::new(documents.clone(), config.media.placeholder_avatar.clone());
        Self {
            config: Arc::new(config),
            session,
            documents,
            blobs,
            videos,
        }
    }

    /// Backend with every service held in memory
    pub fn in_memory(config: StreamrConfig) -> Self {
        let blobs = InMemoryBlobStore::new(config.backend.storage_bucket.clone());
        Self::new(
            config,
            Arc::new(InMemorySessionProvider::new()),
            Arc::new(InMemoryDocumentStore::new()),
            Arc::new(blobs),
        )
    }

    pub fn limits(&self) -> &FeedLimits {
        &self.config.feeds
    }
}
