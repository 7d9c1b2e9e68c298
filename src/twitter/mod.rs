//! Twitter/X API integration module.
//!
//! This module contains functions for interacting with the Twitter/X API,
//! including user lookup and recent-timeline fetching using OAuth 1.0a
//! user-context authentication.

mod api;
mod timeline;

// Re-export public API
pub use timeline::{fetch_recent_posts, Post};

// Crate-internal re-exports (used by tests)
#[allow(unused_imports)]
pub(crate) use api::{sanitize_for_logging, send_api_request};
