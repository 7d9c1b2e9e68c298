//! Core Twitter API utilities.
//!
//! This module contains low-level utilities for making signed requests to
//! the Twitter API and surfacing the first failure to the caller. OAuth
//! 1.0a tokens do not expire, so there is no refresh-and-retry path; any
//! non-success status aborts the operation.

use log::{debug, error, info};

/// Sanitizes text for safe logging by truncating and escaping control characters.
///
/// This function:
/// - Truncates long text to prevent log flooding
/// - Replaces control characters that could manipulate log output
/// - Escapes newlines to prevent log injection
///
/// Truncation counts characters, not bytes, so multi-byte text (tweets are
/// full of it) never splits a code point.
///
/// # Parameters
///
/// - `text`: The text to sanitize
/// - `max_len`: Maximum number of characters before truncation
///
/// # Returns
///
/// A sanitized string safe for logging
pub(crate) fn sanitize_for_logging(text: &str, max_len: usize) -> String {
    // Replace control characters and newlines to prevent log injection
    let sanitized: String = text
        .chars()
        .map(|c| match c {
            '\n' => ' ',
            '\r' => ' ',
            '\t' => ' ',
            c if c.is_control() => '?',
            c => c,
        })
        .collect();

    if sanitized.chars().count() > max_len {
        let truncated: String = sanitized.chars().take(max_len).collect();
        format!(
            "{}... [truncated, {} total bytes]",
            truncated,
            text.len()
        )
    } else {
        sanitized
    }
}

/// Sends a signed request to the Twitter API and returns the response body.
///
/// This helper handles the common pattern of sending a configured request,
/// checking the status, and converting any failure into a single fault
/// carried back to the caller. There is exactly one attempt; no retry or
/// backoff.
///
/// # Parameters
///
/// - `request_builder`: A configured reqwest::RequestBuilder ready to send
/// - `operation_name`: Human-readable name for the operation (for logging)
///
/// # Returns
///
/// - `Ok(String)`: The API response body on success
/// - `Err(Box<dyn std::error::Error + Send + Sync>)`: If the request fails
///   at the transport level or the API returns a non-success status
pub(crate) async fn send_api_request(
    request_builder: reqwest::RequestBuilder,
    operation_name: &str,
) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    info!(
        "Making signed request for operation: {}",
        operation_name
    );

    let response = request_builder.send().await?;

    let status = response.status();
    info!(
        "Received response with status: {} for operation: {}",
        status, operation_name
    );

    if status.is_success() {
        let response_text = response.text().await?;
        info!("Operation '{}' completed successfully", operation_name);
        debug!(
            "Response summary for '{}': {} bytes received",
            operation_name,
            response_text.len()
        );
        return Ok(response_text);
    }

    let error_text = response.text().await?;
    error!("Operation '{}' failed - Status: {}", operation_name, status);
    debug!(
        "Error response for '{}': {}",
        operation_name,
        sanitize_for_logging(&error_text, 200)
    );
    Err(format!(
        "Twitter API error for operation '{}' ({})",
        operation_name, status
    )
    .into())
}
