//! Application configuration
//!
//! Loaded from TOML, then overridden by `STREAMR_<SECTION>_<KEY>` environment
//! variables, then validated. Defaults reproduce the stock feed sizes and
//! placeholder media.

use crate::errors::{Result, StreamrError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "STREAMR_";

/// Placeholder thumbnail for videos uploaded without one
pub const PLACEHOLDER_THUMBNAIL: &str = "https://picsum.photos/320/180";
/// Placeholder avatar for channels created without one
pub const PLACEHOLDER_AVATAR: &str = "https://picsum.photos/40/40";

/// Backend project coordinates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub project_id: String,
    pub storage_bucket: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            project_id: "streamr-local".to_string(),
            storage_bucket: "streamr-local.appspot.com".to_string(),
        }
    }
}

/// Page sizes for every list the page controllers fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedLimits {
    pub home_recommended: usize,
    pub home_favourites: usize,
    pub search_results: usize,
    pub comments: usize,
    pub up_next: usize,
    pub channel_videos: usize,
    pub library_history: usize,
    pub shorts: usize,
}

impl Default for FeedLimits {
    fn default() -> Self {
        Self {
            home_recommended: 10,
            home_favourites: 8,
            search_results: 10,
            comments: 5,
            up_next: 3,
            channel_videos: 10,
            library_history: 10,
            shorts: 10,
        }
    }
}

/// Placeholder media used when uploads omit optional assets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    pub placeholder_thumbnail: String,
    pub placeholder_avatar: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            placeholder_thumbnail: PLACEHOLDER_THUMBNAIL.to_string(),
            placeholder_avatar: PLACEHOLDER_AVATAR.to_string(),
        }
    }
}

/// Log filter handed to the subscriber at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamrConfig {
    pub backend: BackendConfig,
    pub feeds: FeedLimits,
    pub media: MediaConfig,
    pub logging: LoggingConfig,
}

impl StreamrConfig {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            StreamrError::config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Load from `path` if given, apply environment overrides, validate.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        config.merge_with_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `STREAMR_*` variables from the process environment
    pub fn merge_with_env(&mut self) -> Result<()> {
        self.merge_env_vars(std::env::vars())
    }

    /// Apply overrides from `(name, value)` pairs.
    ///
    /// `STREAMR_FEEDS_UP_NEXT=5` sets `feeds.up_next`. Variables without the
    /// prefix are ignored.
    pub fn merge_env_vars<I>(&mut self, vars: I) -> Result<()>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (name, value) in vars {
            let Some(rest) = name.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let rest = rest.to_lowercase();
            let Some((section, key)) = rest.split_once('_') else {
                return Err(StreamrError::config(format!(
                    "Environment override {name} has no key"
                )));
            };
            self.set_from_string(&format!("{section}.{key}"), &value)?;
        }
        Ok(())
    }

    /// Set a value from a dotted key such as `feeds.comments`
    pub fn set_from_string(&mut self, key: &str, value: &str) -> Result<()> {
        fn limit(key: &str, value: &str) -> Result<usize> {
            value
                .trim()
                .parse()
                .map_err(|_| StreamrError::config(format!("{key} expects a number, got {value:?}")))
        }

        match key {
            "backend.project_id" => self.backend.project_id = value.to_string(),
            "backend.storage_bucket" => self.backend.storage_bucket = value.to_string(),
            "feeds.home_recommended" => self.feeds.home_recommended = limit(key, value)?,
            "feeds.home_favourites" => self.feeds.home_favourites = limit(key, value)?,
            "feeds.search_results" => self.feeds.search_results = limit(key, value)?,
            "feeds.comments" => self.feeds.comments = limit(key, value)?,
            "feeds.up_next" => self.feeds.up_next = limit(key, value)?,
            "feeds.channel_videos" => self.feeds.channel_videos = limit(key, value)?,
            "feeds.library_history" => self.feeds.library_history = limit(key, value)?,
            "feeds.shorts" => self.feeds.shorts = limit(key, value)?,
            "media.placeholder_thumbnail" => self.media.placeholder_thumbnail = value.to_string(),
            "media.placeholder_avatar" => self.media.placeholder_avatar = value.to_string(),
            "logging.level" => self.logging.level = value.to_string(),
            _ => {
                return Err(StreamrError::config(format!(
                    "Unknown configuration key: {key}"
                )))
            }
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let feeds = &self.feeds;
        for (name, value) in [
            ("feeds.home_recommended", feeds.home_recommended),
            ("feeds.home_favourites", feeds.home_favourites),
            ("feeds.search_results", feeds.search_results),
            ("feeds.comments", feeds.comments),
            ("feeds.up_next", feeds.up_next),
            ("feeds.channel_videos", feeds.channel_videos),
            ("feeds.library_history", feeds.library_history),
            ("feeds.shorts", feeds.shorts),
        ] {
            if value == 0 {
                return Err(StreamrError::config(format!("{name} must be greater than 0")));
            }
        }
        if self.backend.project_id.trim().is_empty() {
            return Err(StreamrError::config("backend.project_id must not be empty"));
        }
        if self.media.placeholder_thumbnail.trim().is_empty()
            || self.media.placeholder_avatar.trim().is_empty()
        {
            return Err(StreamrError::config("placeholder media URLs must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_validate() {
        let config = StreamrConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.feeds.home_recommended, 10);
        assert_eq!(config.media.placeholder_avatar, PLACEHOLDER_AVATAR);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = StreamrConfig::from_toml_str(
            r#"
            [feeds]
            comments = 20

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.feeds.comments, 20);
        assert_eq!(config.feeds.up_next, 3);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[backend]\nproject_id = \"prod\"").unwrap();
        let config = StreamrConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.backend.project_id, "prod");
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = StreamrConfig::load_from_file(Path::new("/nonexistent/streamr.toml")).unwrap_err();
        assert!(matches!(err, StreamrError::Config { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = StreamrConfig::default();
        config
            .merge_env_vars(vec![
                ("STREAMR_FEEDS_UP_NEXT".to_string(), "7".to_string()),
                ("STREAMR_LOGGING_LEVEL".to_string(), "trace".to_string()),
                ("HOME".to_string(), "/root".to_string()),
            ])
            .unwrap();
        assert_eq!(config.feeds.up_next, 7);
        assert_eq!(config.logging.level, "trace");
    }

    #[test]
    fn test_env_override_rejects_bad_number() {
        let mut config = StreamrConfig::default();
        let err = config
            .merge_env_vars(vec![("STREAMR_FEEDS_COMMENTS".to_string(), "many".to_string())])
            .unwrap_err();
        assert!(err.to_string().contains("feeds.comments"));
    }

    #[test]
    fn test_validate_rejects_zero_limit() {
        let mut config = StreamrConfig::default();
        config.feeds.search_results = 0;
        assert!(config.validate().is_err());
    }
}
