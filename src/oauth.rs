//! OAuth authentication module for Twitter/X API integration.
//!
//! This module implements OAuth 1.0a user-context request signing, which
//! the Twitter API accepts for both v1.1 and v2 endpoints. Each request
//! carries an `Authorization: OAuth ...` header containing the consumer
//! key, the access token, a nonce, a timestamp, and an HMAC-SHA1 signature
//! over the request method, URL, and parameters.

use std::time::{SystemTime, UNIX_EPOCH};

use base64::Engine;
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::config::TwitterConfig;

type HmacSha1 = Hmac<Sha1>;

/// Percent-encodes a string per RFC 3986.
///
/// OAuth 1.0a requires the strict RFC 3986 character set: everything except
/// unreserved characters (`A-Z a-z 0-9 - _ . ~`) is encoded, including
/// spaces (as `%20`, never `+`).
///
/// # Parameters
///
/// - `value`: The string to encode
///
/// # Returns
///
/// The percent-encoded string.
///
/// # Example
///
/// ```rust
/// use tweetsheet::oauth::percent_encode;
///
/// assert_eq!(percent_encode("Ladies + Gentlemen"), "Ladies%20%2B%20Gentlemen");
/// assert_eq!(percent_encode("safe-string_1.0~"), "safe-string_1.0~");
/// ```
pub fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Generates a random alphanumeric nonce for an OAuth request.
///
/// The nonce only needs to be unique per request; 32 characters sampled
/// from an alphanumeric charset is the conventional shape.
pub fn generate_nonce() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();
    (0..32)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Computes the OAuth 1.0a HMAC-SHA1 signature for a request.
///
/// The signature base string is
/// `METHOD&percent_encode(base_url)&percent_encode(param_string)` where the
/// parameter string is every request parameter (query, body, and `oauth_*`)
/// percent-encoded, sorted by encoded key then encoded value, and joined
/// with `=` and `&`. The signing key is
/// `percent_encode(consumer_secret)&percent_encode(token_secret)`.
///
/// # Parameters
///
/// - `method`: Uppercase HTTP method, e.g. `"GET"`
/// - `base_url`: The request URL without any query string
/// - `params`: All request parameters, unencoded
/// - `consumer_secret`: The API key secret
/// - `token_secret`: The access token secret
///
/// # Returns
///
/// The base64-encoded signature.
fn sign(
    method: &str,
    base_url: &str,
    params: &[(&str, &str)],
    consumer_secret: &str,
    token_secret: &str,
) -> String {
    // Encode, then sort by encoded key and value
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();

    let param_string = encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let base_string = format!(
        "{}&{}&{}",
        method,
        percent_encode(base_url),
        percent_encode(&param_string)
    );

    let signing_key = format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    );

    // HMAC accepts keys of any length, so new_from_slice cannot fail here
    let mut mac =
        HmacSha1::new_from_slice(signing_key.as_bytes()).expect("HMAC accepts any key length");
    mac.update(base_string.as_bytes());
    let signature = mac.finalize().into_bytes();

    base64::engine::general_purpose::STANDARD.encode(signature)
}

/// Builds an OAuth 1.0a Authorization header with an explicit nonce and
/// timestamp.
///
/// This is the deterministic core of [`build_oauth1_header`]; taking the
/// nonce and timestamp as parameters lets the signature be verified against
/// the reference vector published in the Twitter API documentation.
///
/// # Parameters
///
/// - `config`: The four OAuth credentials
/// - `method`: Uppercase HTTP method
/// - `base_url`: The request URL without any query string
/// - `request_params`: Query and body parameters of the request, unencoded
/// - `nonce`: The per-request nonce
/// - `timestamp`: Unix timestamp in seconds
///
/// # Returns
///
/// The value of the `Authorization` header, starting with `OAuth `.
pub fn build_oauth1_header_with(
    config: &TwitterConfig,
    method: &str,
    base_url: &str,
    request_params: &[(&str, &str)],
    nonce: &str,
    timestamp: u64,
) -> String {
    let timestamp_str = timestamp.to_string();

    let oauth_params: [(&str, &str); 6] = [
        ("oauth_consumer_key", config.api_key.as_str()),
        ("oauth_nonce", nonce),
        ("oauth_signature_method", "HMAC-SHA1"),
        ("oauth_timestamp", timestamp_str.as_str()),
        ("oauth_token", config.access_token.as_str()),
        ("oauth_version", "1.0"),
    ];

    // The signature covers the oauth_* parameters and the request parameters
    let mut all_params: Vec<(&str, &str)> = Vec::with_capacity(oauth_params.len() + request_params.len());
    all_params.extend_from_slice(&oauth_params);
    all_params.extend_from_slice(request_params);

    let signature = sign(
        method,
        base_url,
        &all_params,
        &config.api_key_secret,
        &config.access_token_secret,
    );

    // Only the oauth_* parameters and the signature go into the header
    let mut header_params: Vec<(String, String)> = oauth_params
        .iter()
        .map(|(k, v)| (k.to_string(), percent_encode(v)))
        .collect();
    header_params.push(("oauth_signature".to_string(), percent_encode(&signature)));
    header_params.sort();

    let header_body = header_params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, v))
        .collect::<Vec<_>>()
        .join(", ");

    format!("OAuth {}", header_body)
}

/// Builds the Authorization header for an OAuth 1.0a signed request.
///
/// This function creates the proper Authorization header for OAuth 1.0a
/// user-context authentication, generating a fresh nonce and timestamp and
/// signing the request with HMAC-SHA1.
///
/// # Parameters
///
/// - `config`: The four OAuth credentials
/// - `method`: Uppercase HTTP method, e.g. `"GET"`
/// - `base_url`: The request URL without any query string
/// - `request_params`: Query and body parameters of the request, unencoded
///
/// # Returns
///
/// A properly formatted Authorization header string.
///
/// # Format
///
/// The header follows this format:
/// ```text
/// OAuth oauth_consumer_key="...", oauth_nonce="...", oauth_signature="...",
///       oauth_signature_method="HMAC-SHA1", oauth_timestamp="...",
///       oauth_token="...", oauth_version="1.0"
/// ```
pub fn build_oauth1_header(
    config: &TwitterConfig,
    method: &str,
    base_url: &str,
    request_params: &[(&str, &str)],
) -> String {
    let nonce = generate_nonce();
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    build_oauth1_header_with(config, method, base_url, request_params, &nonce, timestamp)
}
