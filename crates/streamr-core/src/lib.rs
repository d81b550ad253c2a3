//! Streamr Core - shared types for the Streamr client
//!
//! Everything the application layer and its backends agree on:
//! identifiers, stored records, the signed-in identity, the unified error
//! type, configuration, and field formatting.

#![allow(missing_docs)]
#![forbid(unsafe_code)]

/// Application configuration (TOML + environment overrides)
pub mod config;

/// Display formatting for counts, dates and durations
pub mod display;

/// Unified error handling
pub mod errors;

/// Record identifiers
pub mod identifiers;

/// Stored domain records
pub mod records;

/// Authenticated identity
pub mod session;

/// Timestamps
pub mod time;

pub use config::StreamrConfig;
pub use errors::{AuthFailure, Result, StreamrError};
pub use identifiers::{ChannelId, CommentId, PlaylistId, UserId, VideoId};
pub use records::{Channel, Comment, Playlist, Video, ViewCount, WatchHistoryEntry};
pub use session::SessionIdentity;
pub use time::{Timestamp, UploadDate};
