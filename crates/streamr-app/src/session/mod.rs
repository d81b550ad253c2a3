//! # Session
//!
//! The authentication boundary and its in-memory implementation.

pub mod memory;
pub mod provider;

pub use memory::{InMemorySessionProvider, MIN_PASSWORD_LEN};
pub use provider::{FederatedProvider, SessionEvent, SessionProvider, SessionSubscription};
