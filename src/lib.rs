//! # Tweetsheet Library
//!
//! A Rust library for exporting a Twitter/X user's recent tweets to a CSV
//! file. Tweets are fetched from the Twitter/X API using OAuth 1.0a
//! user-context authentication, stripped of emoji characters, and written
//! as fixed three-column rows.
//!
//! ## Features
//!
//! - Twitter/X API v2 integration with OAuth 1.0a request signing
//! - Emoji removal via Unicode code-point range filtering
//! - CSV export named after the handle (`@handle.csv`)
//! - Comprehensive test suite
//! - Structured logging
//!
//! ## Configuration
//!
//! Credentials are read from a `config.toml` file with a `[twitter]` table
//! (api_key, api_key_secret, access_token, access_token_secret), falling
//! back to `twitter_*` environment variables.

pub mod config;
pub mod export;
pub mod oauth;
pub mod sanitize;
pub mod twitter;

// Re-export commonly used types and functions
pub use config::TwitterConfig;
pub use export::{build_rows, write_csv, ExportRow, MAX_EXPORT_ROWS};
pub use oauth::build_oauth1_header;
pub use sanitize::remove_emojis;
pub use twitter::{fetch_recent_posts, Post};

#[cfg(test)]
mod tests;
