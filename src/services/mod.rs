//! Services module
//!
//! Business logic services owning session and complaint state. Both are
//! constructed once at startup and handed to consumers by reference; there
//! is no ambient global state.

pub mod auth;
pub mod complaints;

pub use auth::{AuthConfig, AuthService};
pub use complaints::ComplaintService;
