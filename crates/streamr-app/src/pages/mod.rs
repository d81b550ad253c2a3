//! # Page Controllers
//!
//! Headless state holders, one per screen. A page is built from the
//! [`ScreenProps`] the navigation controller rendered and the shared
//! [`Backend`]. Pages fetch through the backend, publish results into
//! [`LoadState`] slots guarded against stale responses, and request
//! navigation through the props' navigator. Failures become display
//! strings; they never reach the navigation state.

pub mod auth;
pub mod channel;
pub mod create;
pub mod home;
pub mod library;
pub mod search;
pub mod shorts;
pub mod state;
pub mod subscriptions;
pub mod video;

pub use auth::AuthPage;
pub use channel::{ChannelPage, ChannelView, CHANNEL_TABS};
pub use create::{CreatePage, CreateSection, ProfileEdit, UploadProgressState, VideoUpload};
pub use home::{HomeFeed, HomePage, HOME_FILTERS};
pub use library::{LibraryPage, LibraryView};
pub use search::SearchPage;
pub use shorts::ShortsPage;
pub use state::{LoadState, RequestGuard, Ticket};
pub use subscriptions::SubscriptionsPage;
pub use video::{VideoPage, VideoView};

use crate::backend::Backend;
use crate::navigation::{NavigationContext, Navigator, RenderTarget, ScreenId, ScreenProps};
use streamr_core::{SessionIdentity, VideoId};

/// Props and backend every page carries
#[derive(Debug, Clone)]
pub struct PageBase {
    pub props: ScreenProps,
    pub backend: Backend,
}

impl PageBase {
    pub fn new(props: ScreenProps, backend: Backend) -> Self {
        Self { props, backend }
    }

    pub fn navigator(&self) -> &Navigator {
        &self.props.navigator
    }

    pub fn context(&self) -> &NavigationContext {
        &self.props.context
    }

    pub fn session(&self) -> Option<&SessionIdentity> {
        self.props.session.as_ref()
    }

    /// Back-arrow: return to the previous screen, or Home
    pub fn back(&self) {
        self.navigator().back(self.props.previous_screen());
    }

    /// The signed-in identity, or a redirect to login that resumes
    /// `intended` with `resume` afterwards.
    pub fn require_session(
        &self,
        intended: ScreenId,
        resume: NavigationContext,
    ) -> Option<&SessionIdentity> {
        if self.session().is_none() {
            tracing::info!(intended = %intended, "Action requires sign-in");
            self.navigator().go_with(
                ScreenId::Auth,
                NavigationContext::resume_after_login(intended, Some(resume)),
            );
        }
        self.session()
    }
}

/// Open a video, recording it in the viewer's history when signed in.
pub(crate) async fn open_video(base: &PageBase, id: &VideoId) {
    if let Some(user) = base.session() {
        if let Err(err) = base.backend.videos.add_to_watch_history(&user.uid, id).await {
            tracing::warn!(video = %id, error = %err, "Failed to record watch history");
        }
    }
    base.navigator()
        .go_with(ScreenId::Video, NavigationContext::video(id.clone()));
}

/// A page controller for whichever screen was rendered
#[derive(Debug)]
pub enum Page {
    Home(HomePage),
    Search(SearchPage),
    Video(VideoPage),
    Library(LibraryPage),
    Channel(ChannelPage),
    Shorts(ShortsPage),
    Create(CreatePage),
    Subscriptions(SubscriptionsPage),
    Auth(AuthPage),
}

impl Page {
    /// Build the controller for a render target; `None` while loading.
    pub fn build(target: RenderTarget, backend: &Backend) -> Option<Page> {
        let RenderTarget::Screen { screen, props } = target else {
            return None;
        };
        let backend = backend.clone();
        Some(match screen {
            ScreenId::Home => Page::Home(HomePage::new(props, backend)),
            ScreenId::Search => Page::Search(SearchPage::new(props, backend)),
            ScreenId::Video => Page::Video(VideoPage::new(props, backend)),
            ScreenId::Library => Page::Library(LibraryPage::new(props, backend)),
            ScreenId::Channel => Page::Channel(ChannelPage::new(props, backend)),
            ScreenId::Shorts => Page::Shorts(ShortsPage::new(props, backend)),
            ScreenId::Create => Page::Create(CreatePage::new(props, backend)),
            ScreenId::Subscriptions => Page::Subscriptions(SubscriptionsPage::new(props, backend)),
            ScreenId::Auth => Page::Auth(AuthPage::new(props, backend)),
        })
    }

    pub fn screen(&self) -> ScreenId {
        match self {
            Page::Home(_) => ScreenId::Home,
            Page::Search(_) => ScreenId::Search,
            Page::Video(_) => ScreenId::Video,
            Page::Library(_) => ScreenId::Library,
            Page::Channel(_) => ScreenId::Channel,
            Page::Shorts(_) => ScreenId::Shorts,
            Page::Create(_) => ScreenId::Create,
            Page::Subscriptions(_) => ScreenId::Subscriptions,
            Page::Auth(_) => ScreenId::Auth,
        }
    }

    /// Run the page's mount-time work (initial fetches, redirects)
    pub async fn start(&self) {
        match self {
            Page::Home(page) => page.load().await,
            Page::Search(page) => page.start().await,
            Page::Video(page) => page.load().await,
            Page::Library(page) => page.load().await,
            Page::Channel(page) => page.load().await,
            Page::Shorts(page) => page.load().await,
            Page::Create(page) => page.start().await,
            Page::Subscriptions(_) => {}
            Page::Auth(page) => {
                page.resume_if_signed_in();
            }
        }
    }
}
