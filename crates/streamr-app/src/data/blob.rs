//! # BlobStore: Media Upload Boundary
//!
//! Uploads report progress on an optional channel and resolve to a
//! download URL.

use async_lock::RwLock;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use streamr_core::{Result, StreamrError};
use tokio::sync::mpsc;

/// A file picked for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    /// Media duration, when the picker could read it from the file metadata
    pub duration_secs: Option<u64>,
}

impl Blob {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
            duration_secs: None,
        }
    }

    pub fn with_duration(mut self, secs: u64) -> Self {
        self.duration_secs = Some(secs);
        self
    }

    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Upload progress snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadProgress {
    pub bytes_transferred: u64,
    pub total_bytes: u64,
}

impl UploadProgress {
    /// Completion in percent (0.0 to 100.0). An empty upload counts as complete.
    pub fn percent(&self) -> f64 {
        if self.total_bytes == 0 {
            100.0
        } else {
            self.bytes_transferred as f64 / self.total_bytes as f64 * 100.0
        }
    }
}

/// Sender side of an upload progress channel
pub type ProgressSender = mpsc::UnboundedSender<UploadProgress>;

/// Object storage
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `blob` at `path` and return its download URL
    async fn upload(
        &self,
        blob: &Blob,
        path: &str,
        progress: Option<ProgressSender>,
    ) -> Result<String>;
}

const CHUNK_SIZE: u64 = 64 * 1024;

/// Blob store held in process memory
#[derive(Debug)]
pub struct InMemoryBlobStore {
    bucket: String,
    objects: RwLock<HashMap<String, Blob>>,
    unavailable: AtomicBool,
}

impl InMemoryBlobStore {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            objects: RwLock::new(HashMap::new()),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Make subsequent uploads fail with a storage error
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Stored object paths
    pub async fn paths(&self) -> Vec<String> {
        let mut paths: Vec<_> = self.objects.read().await.keys().cloned().collect();
        paths.sort();
        paths
    }

    fn url_for(&self, path: &str) -> String {
        format!("memory://{}/{path}", self.bucket)
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn upload(
        &self,
        blob: &Blob,
        path: &str,
        progress: Option<ProgressSender>,
    ) -> Result<String> {
        if path.is_empty() || path.ends_with('/') {
            return Err(StreamrError::invalid(format!("invalid object path: {path:?}")));
        }
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StreamrError::storage("blob storage unavailable"));
        }

        let total = blob.len();
        if let Some(tx) = &progress {
            let mut sent = 0;
            loop {
                sent = (sent + CHUNK_SIZE).min(total);
                // A closed receiver only means nobody is watching.
                let _ = tx.send(UploadProgress {
                    bytes_transferred: sent,
                    total_bytes: total,
                });
                if sent >= total {
                    break;
                }
            }
        }

        self.objects
            .write()
            .await
            .insert(path.to_string(), blob.clone());
        tracing::debug!(path, bytes = total, "Blob uploaded");
        Ok(self.url_for(path))
    }
}
