//! # Navigation
//!
//! Screen identity, navigation context, back-navigation history and the
//! auth gate, plus the render/footer derivations that read from them.

pub mod context;
pub mod controller;
pub mod history;
pub mod render;
pub mod screen;
pub mod theme;

pub use context::{IntendedDestination, NavigationContext, RouteParams};
pub use controller::{
    NavigationController, NavigationOutcome, NavigationReport, NoViewport, SessionState,
    ViewportEffects,
};
pub use history::{EmptyHistory, HistoryEntry, HistoryStack};
pub use render::{NavQueue, NavRequest, Navigator, RenderTarget, ScreenProps};
pub use screen::{ScreenId, UnknownScreen};
pub use theme::{FooterLayout, HoverStyle, NavBar, NavItem, ScreenTheme};
