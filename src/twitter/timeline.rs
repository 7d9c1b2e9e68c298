//! Recent-timeline fetching for Twitter API.
//!
//! This module contains functions for resolving a handle to a user id and
//! fetching the user's most recent tweets using the Twitter API v2.

use log::{debug, error, info, warn};
use reqwest::Client;

use crate::config::TwitterConfig;
use crate::oauth::{build_oauth1_header, percent_encode};

use super::api::send_api_request;

/// A single tweet as fetched from the timeline endpoint.
///
/// Carries the original (unsanitized) text and the hashtag entities
/// attached by the API; the export pipeline counts the tags, it never
/// transcribes them.
#[derive(Debug, Clone)]
pub struct Post {
    /// Tweet id
    pub id: String,
    /// Original tweet text, emoji and all
    pub text: String,
    /// Hashtag tags attached to the tweet (without the # symbol)
    pub hashtags: Vec<String>,
    /// When the tweet was posted, if the API supplied it
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Looks up a user id by username using the Twitter API v2.
///
/// # Parameters
///
/// - `config`: The OAuth credentials used to sign the request
/// - `username`: The Twitter username to look up, without the "@" prefix
///
/// # Returns
///
/// - `Ok(String)`: The user id if found
/// - `Err(Box<dyn std::error::Error + Send + Sync>)`: If the API request
///   fails or the response contains no user (unknown handle)
async fn lookup_user_id(
    config: &TwitterConfig,
    username: &str,
) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    info!("Looking up user by username: {}", username);

    let client = Client::new();
    let url = format!("https://api.x.com/2/users/by/username/{}", username);

    let auth_header = build_oauth1_header(config, "GET", &url, &[]);
    let request_builder = client.get(&url).header("Authorization", auth_header);

    let response_text = send_api_request(request_builder, "lookup_user").await?;
    let json_response: serde_json::Value = serde_json::from_str(&response_text)?;

    if let Some(data) = json_response.get("data") {
        if let Some(id) = data.get("id").and_then(|v| v.as_str()) {
            let name = data.get("name").and_then(|v| v.as_str()).unwrap_or("");
            info!("Found user {}: {} (@{})", id, name, username);
            return Ok(id.to_string());
        }
    }

    warn!("User {} not found", username);
    Err(format!("Twitter user '{}' not found", username).into())
}

/// Fetches the most recent tweets for a username.
///
/// This function resolves the username to a user id and then fetches up to
/// ten of the user's most recent tweets from the Twitter API v2 timeline
/// endpoint. When `include_retweets` is false the API is asked to exclude
/// retweets, so the returned sequence is already filtered for the caller's
/// preference.
///
/// # Parameters
///
/// - `config`: The OAuth credentials used to sign the requests
/// - `username`: The Twitter username, without the "@" prefix
/// - `include_retweets`: Whether retweets appear in the result
///
/// # Returns
///
/// - `Ok(Vec<Post>)`: The fetched tweets in API (most recent first) order;
///   may be empty for an account with no tweets
/// - `Err(Box<dyn std::error::Error + Send + Sync>)`: If authentication
///   fails, the handle is unknown, the network fails, or the API reports
///   an error such as rate limiting
///
/// # Example
///
/// ```rust,no_run
/// use tweetsheet::{fetch_recent_posts, TwitterConfig};
///
/// #[tokio::main]
/// async fn main() {
///     let config = TwitterConfig::load().unwrap();
///     match fetch_recent_posts(&config, "jack", false).await {
///         Ok(posts) => println!("Fetched {} tweets", posts.len()),
///         Err(e) => eprintln!("Failed to fetch tweets: {}", e),
///     }
/// }
/// ```
pub async fn fetch_recent_posts(
    config: &TwitterConfig,
    username: &str,
    include_retweets: bool,
) -> Result<Vec<Post>, Box<dyn std::error::Error + Send + Sync>> {
    info!(
        "Starting timeline fetch for @{} (include_retweets: {})",
        username, include_retweets
    );

    let user_id = lookup_user_id(config, username).await?;

    let client = Client::new();
    let base_url = format!("https://api.x.com/2/users/{}/tweets", user_id);

    // Query parameters are signed along with the oauth_* parameters, so the
    // URL must be assembled with the same encoding the signature used
    let mut params: Vec<(&str, &str)> = vec![
        ("max_results", "10"),
        ("tweet.fields", "created_at,entities"),
    ];
    if !include_retweets {
        params.push(("exclude", "retweets"));
    }

    let query_string = params
        .iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    let url = format!("{}?{}", base_url, query_string);

    info!("Timeline URL: {}", url);
    let auth_header = build_oauth1_header(config, "GET", &base_url, &params);
    let request_builder = client.get(&url).header("Authorization", auth_header);

    let response_text = send_api_request(request_builder, "fetch_timeline").await?;
    debug!("Timeline response: {} bytes received", response_text.len());
    let json_response: serde_json::Value = serde_json::from_str(&response_text)?;

    let mut posts = Vec::new();
    if let Some(data) = json_response.get("data") {
        if let Some(tweets) = data.as_array() {
            info!("Found {} tweets for @{}", tweets.len(), username);
            for (i, tweet) in tweets.iter().enumerate() {
                let (id, text) = match (
                    tweet.get("id").and_then(|v| v.as_str()),
                    tweet.get("text").and_then(|v| v.as_str()),
                ) {
                    (Some(id), Some(text)) => (id, text),
                    _ => {
                        warn!("Tweet {} missing id or text field, skipping", i + 1);
                        continue;
                    }
                };

                // An absent entities.hashtags field means no hashtags
                let hashtags: Vec<String> = tweet
                    .get("entities")
                    .and_then(|e| e.get("hashtags"))
                    .and_then(|h| h.as_array())
                    .map(|tags| {
                        tags.iter()
                            .filter_map(|t| t.get("tag").and_then(|v| v.as_str()))
                            .map(|s| s.to_string())
                            .collect()
                    })
                    .unwrap_or_default();

                let created_at = tweet
                    .get("created_at")
                    .and_then(|v| v.as_str())
                    .and_then(|s| match chrono::DateTime::parse_from_rfc3339(s) {
                        Ok(dt) => Some(dt.with_timezone(&chrono::Utc)),
                        Err(e) => {
                            error!("Failed to parse tweet created_at '{}': {}", s, e);
                            None
                        }
                    });

                info!(
                    "Tweet {} (ID: {}): {} hashtags, posted at {:?}",
                    i + 1,
                    id,
                    hashtags.len(),
                    created_at
                );

                posts.push(Post {
                    id: id.to_string(),
                    text: text.to_string(),
                    hashtags,
                    created_at,
                });
            }
        } else {
            warn!("Unexpected response format: data is not an array");
        }
    } else {
        info!("No tweets found for @{}", username);
    }

    info!("Fetched {} tweets for @{}", posts.len(), username);
    Ok(posts)
}
