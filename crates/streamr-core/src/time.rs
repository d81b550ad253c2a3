//! Wall-clock timestamps stored on records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// Current wall-clock time
    pub fn now() -> Self {
        let ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self(ms)
    }

    /// Construct from milliseconds since the epoch
    pub fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// Milliseconds since the epoch
    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Convert to a chrono UTC datetime, if representable
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(i64::try_from(self.0).ok()?)
    }
}

/// Upload date as found on a video record.
///
/// Seeded records sometimes carry a preformatted label ("2 days ago")
/// instead of a timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UploadDate {
    /// Store-side timestamp
    At(Timestamp),
    /// Preformatted label
    Label(String),
}

impl UploadDate {
    /// Timestamp used for ordering; labels sort before every timestamp.
    pub fn sort_key(&self) -> u64 {
        match self {
            Self::At(ts) => ts.0,
            Self::Label(_) => 0,
        }
    }
}

impl From<Timestamp> for UploadDate {
    fn from(ts: Timestamp) -> Self {
        Self::At(ts)
    }
}
