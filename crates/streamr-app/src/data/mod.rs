//! # Data Access
//!
//! Document and blob storage boundaries, their in-memory implementations,
//! and the video service composing the queries pages need.

pub mod blob;
pub mod collections;
pub mod store;
pub mod video_service;

pub use blob::{Blob, BlobStore, InMemoryBlobStore, ProgressSender, UploadProgress};
pub use store::{
    CollectionPath, Direction, Document, DocumentStore, Fields, Filter, InMemoryDocumentStore,
    Query, PREFIX_SENTINEL,
};
pub use video_service::{ChannelUpdate, NewVideo, VideoService};
