//! # Tweetsheet
//!
//! A command-line tool that exports a Twitter/X user's ten most recent
//! tweets to a CSV file, with emoji characters stripped from the text.
//!
//! ## Usage
//!
//! The tool prompts for a Twitter username (without the "@") and whether
//! retweets should be included, then writes `@<username>.csv` with the
//! header `Twitter Username,Tweet,Hashtags`.
//!
//! ## Configuration
//!
//! API credentials are read from `config.toml` (a `[twitter]` table with
//! `api_key`, `api_key_secret`, `access_token`, `access_token_secret`),
//! falling back to `twitter_*` environment variables.
//!
//! ## Logging
//!
//! The application uses the `env_logger` crate for structured logging. Log
//! levels can be controlled via the `RUST_LOG` environment variable.
//!
//! ## Example Usage
//!
//! ```bash
//! # Run with default logging
//! cargo run
//!
//! # Run with debug logging
//! RUST_LOG=debug cargo run
//! ```

use std::path::PathBuf;

use dialoguer::{Confirm, Input};
use log::{error, info};

use tweetsheet::config::TwitterConfig;
use tweetsheet::export::{build_rows, write_csv};
use tweetsheet::twitter::fetch_recent_posts;

/// Fetches, transforms, and exports the tweets for one handle.
///
/// Any failure before the export stage aborts the run without writing a
/// file; the first error encountered is returned unchanged.
///
/// # Parameters
///
/// - `username`: The Twitter handle, without the "@" prefix
/// - `include_retweets`: Whether retweets appear in the export
///
/// # Returns
///
/// - `Ok(PathBuf)`: Path of the written CSV file
/// - `Err(Box<dyn std::error::Error + Send + Sync>)`: If credential
///   loading, the API call, or the file write fails
async fn export_timeline(
    username: &str,
    include_retweets: bool,
) -> Result<PathBuf, Box<dyn std::error::Error + Send + Sync>> {
    let config = TwitterConfig::load()?;

    let posts = fetch_recent_posts(&config, username, include_retweets).await?;
    let rows = build_rows(username, &posts);

    let path = PathBuf::from(format!("@{}.csv", username));
    write_csv(&path, &rows)?;

    Ok(path)
}

/// Main entry point for the tweetsheet CLI.
///
/// This function initializes the logging system, prompts for the handle
/// and the retweet-inclusion choice, and runs the export. A fetch fault is
/// printed and the run ends without writing a file; it is not treated as a
/// crash.
///
/// # Panics
///
/// This function will panic if stdin or the terminal is unavailable for
/// the interactive prompts.
#[tokio::main]
async fn main() {
    // Initialize the logging system
    env_logger::init();

    let username: String = Input::new()
        .with_prompt("Twitter username (no @)")
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("Username cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .expect("Failed to read username from terminal");
    let username = username.trim().trim_start_matches('@').to_string();

    let include_retweets = Confirm::new()
        .with_prompt("Include retweets?")
        .default(false)
        .interact()
        .expect("Failed to read retweet choice from terminal");

    info!(
        "Exporting recent tweets for @{} (include_retweets: {})",
        username, include_retweets
    );

    match export_timeline(&username, include_retweets).await {
        Ok(path) => {
            println!("CSV file created: {}", path.display());
        }
        Err(e) => {
            error!("Export aborted: {}", e);
            eprintln!("{}", e);
        }
    }
}
