//! # Screen Identifiers
//!
//! The fixed set of screens the navigation controller can show.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Screen identifiers for navigation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenId {
    /// Recommended feed (default screen)
    #[default]
    Home,
    /// Title search
    Search,
    /// Video player with comments and up-next
    Video,
    /// Watch history and playlists (requires a session)
    Library,
    /// Channel page
    Channel,
    /// Short-form vertical feed
    Shorts,
    /// Channel management and uploads (requires a session)
    Create,
    /// Subscriptions feed
    Subscriptions,
    /// Sign-in / sign-up
    Auth,
}

impl ScreenId {
    /// Screen shown at startup and for anything without a better target
    pub const DEFAULT: ScreenId = ScreenId::Home;

    /// Get all screens in declaration order
    pub fn all() -> &'static [ScreenId] {
        &[
            ScreenId::Home,
            ScreenId::Search,
            ScreenId::Video,
            ScreenId::Library,
            ScreenId::Channel,
            ScreenId::Shorts,
            ScreenId::Create,
            ScreenId::Subscriptions,
            ScreenId::Auth,
        ]
    }

    /// Wire name, as used in links and serialized history
    pub fn name(&self) -> &'static str {
        match self {
            ScreenId::Home => "home",
            ScreenId::Search => "search",
            ScreenId::Video => "video",
            ScreenId::Library => "library",
            ScreenId::Channel => "channel",
            ScreenId::Shorts => "shorts",
            ScreenId::Create => "create",
            ScreenId::Subscriptions => "subscriptions",
            ScreenId::Auth => "auth",
        }
    }

    /// Human-readable title
    pub fn title(&self) -> &'static str {
        match self {
            ScreenId::Home => "Home",
            ScreenId::Search => "Search",
            ScreenId::Video => "Video",
            ScreenId::Library => "Library",
            ScreenId::Channel => "Channel",
            ScreenId::Shorts => "Shorts",
            ScreenId::Create => "Create",
            ScreenId::Subscriptions => "Subscriptions",
            ScreenId::Auth => "Login",
        }
    }

    /// Screens that redirect to [`ScreenId::Auth`] when no one is signed in
    pub fn is_protected(&self) -> bool {
        matches!(self, ScreenId::Create | ScreenId::Library)
    }

    /// Screens that show a loading placeholder until the session check completes
    pub fn awaits_session_check(&self) -> bool {
        matches!(self, ScreenId::Create | ScreenId::Library | ScreenId::Auth)
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for unrecognised screen names
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown screen: {0}")]
pub struct UnknownScreen(pub String);

impl FromStr for ScreenId {
    type Err = UnknownScreen;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScreenId::all()
            .iter()
            .copied()
            .find(|screen| screen.name() == s)
            .ok_or_else(|| UnknownScreen(s.to_string()))
    }
}

impl ScreenId {
    /// Parse a screen name, falling back to the default screen.
    pub fn parse_or_default(s: &str) -> ScreenId {
        s.parse().unwrap_or(ScreenId::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_roundtrip() {
        for screen in ScreenId::all() {
            assert_eq!(screen.name().parse::<ScreenId>(), Ok(*screen));
        }
    }

    #[test]
    fn test_unknown_name_falls_back_to_home() {
        assert!("settings".parse::<ScreenId>().is_err());
        assert_eq!(ScreenId::parse_or_default("settings"), ScreenId::Home);
    }

    #[test]
    fn test_protected_set() {
        let protected: Vec<_> = ScreenId::all()
            .iter()
            .filter(|s| s.is_protected())
            .copied()
            .collect();
        assert_eq!(protected, vec![ScreenId::Library, ScreenId::Create]);
        assert!(ScreenId::Auth.awaits_session_check());
        assert!(!ScreenId::Video.awaits_session_check());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&ScreenId::Subscriptions).unwrap(),
            "\"subscriptions\""
        );
    }
}
