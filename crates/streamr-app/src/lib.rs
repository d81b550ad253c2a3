//! Streamr App - headless client core
//!
//! Screen navigation with back history and an auth gate, the session
//! subscription, storage boundaries with in-memory implementations, and
//! one page controller per screen. Hosts construct a [`Backend`], hand it
//! to a [`StreamrApp`], and draw whatever [`StreamrApp::render`] returns.

#![allow(missing_docs)]
#![forbid(unsafe_code)]

/// Application shell
pub mod app;

/// Injected backend services
pub mod backend;

/// Document and blob storage
pub mod data;

/// Screens, history and the auth gate
pub mod navigation;

/// Per-screen controllers
pub mod pages;

/// Authentication boundary
pub mod session;

pub use app::StreamrApp;
pub use backend::Backend;
pub use navigation::{NavigationContext, NavigationController, Navigator, RenderTarget, ScreenId};
pub use pages::{LoadState, Page};
pub use session::{InMemorySessionProvider, SessionProvider};
pub use streamr_core::{Result, StreamrConfig, StreamrError};
