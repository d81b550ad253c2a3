//! # Screen Theme and Footer
//!
//! Per-screen colours and the bottom navigation bar, derived from the
//! current screen and session. Colours are CSS hex strings.

use super::screen::ScreenId;

/// Palette shared by every screen
pub mod palette {
    pub const YELLOW_PRIMARY: &str = "#FFDE00";
    pub const YELLOW_BUTTON_TEXT: &str = "#1A1300";
    pub const BG_PRIMARY: &str = "#121212";
    pub const BG_SECONDARY: &str = "#1E1E1E";
    pub const BG_TERTIARY_HOVER: &str = "#2A2A2A";
    pub const TEXT_PRIMARY: &str = "#FFFFFF";
    pub const TEXT_SECONDARY: &str = "#B3B3B3";
    pub const BORDER_PRIMARY: &str = "#383838";
    pub const BLACK_FOR_SHORTS: &str = "#000000";
    pub const BG_SEARCH: &str = "#0F0F0F";
    pub const BG_VIDEO: &str = "#0A0A0A";
}

/// Status bar and body colours for one screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenTheme {
    pub status_bar: &'static str,
    pub body_background: &'static str,
}

impl ScreenTheme {
    /// Theme used for Home and any screen without its own colours
    pub const DEFAULT: ScreenTheme = ScreenTheme::solid(palette::BG_PRIMARY);

    const fn solid(color: &'static str) -> Self {
        Self {
            status_bar: color,
            body_background: color,
        }
    }

    pub fn for_screen(screen: ScreenId) -> Self {
        match screen {
            ScreenId::Search => Self::solid(palette::BG_SEARCH),
            ScreenId::Video => Self::solid(palette::BG_VIDEO),
            ScreenId::Shorts => Self::solid(palette::BLACK_FOR_SHORTS),
            ScreenId::Home
            | ScreenId::Library
            | ScreenId::Channel
            | ScreenId::Create
            | ScreenId::Subscriptions
            | ScreenId::Auth => Self::DEFAULT,
        }
    }
}

/// Hover treatment for footer items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverStyle {
    /// Tertiary background, secondary background while pressed
    Standard,
    /// Yellow text over a faint yellow wash
    YellowWash,
    /// Yellow text over the tertiary background
    YellowText,
}

/// One footer entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub screen: ScreenId,
    pub label: &'static str,
    pub active: bool,
}

/// Visible bottom navigation bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavBar {
    pub items: Vec<NavItem>,
    pub background: &'static str,
    pub border: &'static str,
    pub active_color: &'static str,
    pub inactive_color: &'static str,
    /// Inactive text is drawn at 80% opacity
    pub dim_inactive: bool,
    pub hover: HoverStyle,
}

/// What to draw below the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FooterLayout {
    /// Nothing; the page draws its own chrome
    Hidden,
    /// Only a safe-area filler in the given colour
    SafeAreaFill { background: &'static str },
    NavBar(NavBar),
}

impl FooterLayout {
    /// Derive the footer for `current` given whether someone is signed in.
    pub fn derive(current: ScreenId, signed_in: bool) -> Self {
        match current {
            ScreenId::Shorts => return FooterLayout::Hidden,
            ScreenId::Video => {
                return FooterLayout::SafeAreaFill {
                    background: ScreenTheme::for_screen(ScreenId::Video).body_background,
                }
            }
            _ => {}
        }

        let (profile_screen, profile_label) = if signed_in {
            (ScreenId::Library, "Library")
        } else {
            (ScreenId::Auth, "Login")
        };
        let items = [
            (ScreenId::Home, "Home"),
            (ScreenId::Shorts, "Shorts"),
            (ScreenId::Create, "Create"),
            (ScreenId::Subscriptions, "Subscriptions"),
            (profile_screen, profile_label),
        ]
        .into_iter()
        .map(|(screen, label)| NavItem {
            screen,
            label,
            active: screen == current,
        })
        .collect();

        let (hover, dim_inactive, inactive_color) = match current {
            ScreenId::Search => (HoverStyle::YellowWash, true, palette::TEXT_PRIMARY),
            ScreenId::Library | ScreenId::Channel | ScreenId::Auth | ScreenId::Create => {
                (HoverStyle::YellowText, false, palette::TEXT_SECONDARY)
            }
            _ => (HoverStyle::Standard, false, palette::TEXT_SECONDARY),
        };

        FooterLayout::NavBar(NavBar {
            items,
            background: ScreenTheme::for_screen(current).body_background,
            border: palette::BORDER_PRIMARY,
            active_color: palette::YELLOW_PRIMARY,
            inactive_color,
            dim_inactive,
            hover,
        })
    }

    pub fn nav_bar(&self) -> Option<&NavBar> {
        match self {
            FooterLayout::NavBar(bar) => Some(bar),
            _ => None,
        }
    }
}
