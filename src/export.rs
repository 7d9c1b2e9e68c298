//! CSV export pipeline for fetched tweets.
//!
//! This module turns a bounded sequence of [`Post`] records into fixed
//! three-column rows and serializes them to a CSV file named after the
//! handle. Row assembly is a single-pass, stateless transformation; the
//! only fallible step is writing the file.

use std::path::Path;

use log::{debug, info};

use crate::sanitize::remove_emojis;
use crate::twitter::Post;

/// Maximum number of tweets included in an export.
pub const MAX_EXPORT_ROWS: usize = 10;

/// CSV header row, in column order.
pub const CSV_HEADER: [&str; 3] = ["Twitter Username", "Tweet", "Hashtags"];

/// A single row of the CSV export.
///
/// Rows are created by [`build_rows`], one per exported tweet, in the order
/// the API returned them, and are never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    /// The handle the tweets belong to, with the "@" prefix.
    pub username: String,
    /// The tweet text with emoji removed.
    pub text: String,
    /// Number of hashtag entities attached to the tweet.
    pub hashtags: usize,
}

/// Builds export rows from the fetched tweets.
///
/// Takes the first `min(10, posts.len())` records in their original order.
/// For each record the tweet text is passed through the emoji sanitizer and
/// the hashtag entities are counted. The handle is prefixed with "@" in
/// every row.
///
/// # Parameters
///
/// - `username`: The Twitter handle, without the "@" prefix
/// - `posts`: Tweets as returned by the API, already filtered for the
///   retweet-inclusion preference
///
/// # Returns
///
/// A vector of exactly `min(10, posts.len())` rows; empty input yields an
/// empty vector.
pub fn build_rows(username: &str, posts: &[Post]) -> Vec<ExportRow> {
    let handle = format!("@{}", username);
    let row_count = std::cmp::min(MAX_EXPORT_ROWS, posts.len());
    debug!(
        "Building {} export rows for {} from {} fetched tweets",
        row_count,
        handle,
        posts.len()
    );

    posts
        .iter()
        .take(MAX_EXPORT_ROWS)
        .map(|post| ExportRow {
            username: handle.clone(),
            text: remove_emojis(&post.text),
            hashtags: post.hashtags.len(),
        })
        .collect()
}

/// Writes export rows to a CSV file.
///
/// The file is written once, UTF-8 encoded, with the fixed
/// `Twitter Username,Tweet,Hashtags` header followed by one data row per
/// [`ExportRow`]. Field quoting for embedded delimiters and quotes is
/// handled by the `csv` writer. An empty row set produces a header-only
/// file.
///
/// # Parameters
///
/// - `path`: Destination file path
/// - `rows`: The rows to serialize, in output order
///
/// # Returns
///
/// - `Ok(())`: If the file was written and flushed successfully
/// - `Err(Box<dyn std::error::Error + Send + Sync>)`: If the file cannot
///   be created or a row fails to serialize
pub fn write_csv(
    path: &Path,
    rows: &[ExportRow],
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    info!("Writing {} rows to {}", rows.len(), path.display());

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(CSV_HEADER)?;
    for row in rows {
        let hashtags = row.hashtags.to_string();
        writer.write_record([row.username.as_str(), row.text.as_str(), hashtags.as_str()])?;
    }
    writer.flush()?;

    info!("CSV export written to {}", path.display());
    Ok(())
}
