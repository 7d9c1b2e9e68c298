//! # Tests Module
//!
//! This module contains comprehensive tests for tweetsheet.
//! It includes unit tests for the sanitizer, the export pipeline, OAuth
//! request signing, credential loading, and CSV serialization.
//!
//! ## Test Categories
//!
//! ### Unit Tests
//! - Emoji removal (`remove_emojis`)
//! - Row assembly (`build_rows`)
//! - OAuth 1.0a signing (`build_oauth1_header_with`, `percent_encode`)
//! - Credential loading (`TwitterConfig::from_file`)
//!
//! ### Filesystem Tests
//! - CSV writing, header emission, and field quoting
//!
//! ## Test Environment
//!
//! Tests run in isolation; filesystem tests write into temporary
//! directories that are removed after execution. No test contacts the
//! Twitter API.

use crate::config::{mask_secret, TwitterConfig};
use crate::export::{build_rows, write_csv, ExportRow, MAX_EXPORT_ROWS};
use crate::oauth::{build_oauth1_header_with, generate_nonce, percent_encode};
use crate::sanitize::remove_emojis;
use crate::twitter::{sanitize_for_logging, Post};

/// Builds a test post with the given text and hashtag count.
///
/// # Parameters
///
/// - `index`: Used for the tweet id and default text
/// - `text`: The tweet text
/// - `hashtag_count`: Number of synthetic hashtag entities to attach
///
/// # Returns
///
/// A `Post` suitable for exercising the export pipeline.
fn make_post(index: usize, text: &str, hashtag_count: usize) -> Post {
    Post {
        id: format!("10000000{}", index),
        text: text.to_string(),
        hashtags: (0..hashtag_count).map(|i| format!("tag{}", i)).collect(),
        created_at: None,
    }
}

/// Tests the documented sanitizer example: emoji are removed while the
/// spacing around them is preserved as in the source.
#[test]
fn test_remove_emojis_basic_example() {
    assert_eq!(remove_emojis("Hello 😀 World 🌍!"), "Hello  World !");
}

/// Tests that a string containing only filtered code points sanitizes to
/// the empty string.
#[test]
fn test_remove_emojis_all_filtered() {
    let only_emoji = "\u{1F600}\u{1F30D}\u{1F680}\u{1F1FA}\u{1F1F8}\u{2702}\u{2600}\u{26BD}";
    assert_eq!(remove_emojis(only_emoji), "");
}

/// Tests that a string with no filtered code points is returned unchanged
/// and that sanitization is idempotent.
#[test]
fn test_remove_emojis_clean_input_unchanged() {
    let text = "Plain text with punctuation, digits 123, and accents: café!";
    assert_eq!(remove_emojis(text), text);
    assert_eq!(remove_emojis(&remove_emojis(text)), remove_emojis(text));
}

/// Tests that empty input yields empty output.
#[test]
fn test_remove_emojis_empty() {
    assert_eq!(remove_emojis(""), "");
}

/// Tests the standalone filtered code points: zero-width joiner, eject,
/// fast-forward, watch, variation selector-16, and wavy dash.
#[test]
fn test_remove_emojis_singletons() {
    assert_eq!(remove_emojis("a\u{200D}b"), "ab");
    assert_eq!(remove_emojis("a\u{23CF}b"), "ab");
    assert_eq!(remove_emojis("a\u{23E9}b"), "ab");
    assert_eq!(remove_emojis("a\u{231A}b"), "ab");
    assert_eq!(remove_emojis("a\u{FE0F}b"), "ab");
    assert_eq!(remove_emojis("a\u{3030}b"), "ab");
}

/// Tests that supplementary-plane characters outside the emoji blocks are
/// also removed; the filter covers U+10000 through U+10FFFF.
#[test]
fn test_remove_emojis_supplementary_planes() {
    // U+1D11E musical symbol G clef
    assert_eq!(remove_emojis("note: \u{1D11E}"), "note: ");
}

/// Tests that multi-code-point emoji sequences (joined with ZWJ, flag
/// pairs, keycaps with VS-16) are removed in full.
#[test]
fn test_remove_emojis_sequences() {
    // Family: man + ZWJ + woman + ZWJ + girl
    assert_eq!(remove_emojis("\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}"), "");
    // Flag of France: two regional indicators
    assert_eq!(remove_emojis("\u{1F1EB}\u{1F1F7}"), "");
}

/// Tests that `build_rows` bounds the output at ten rows, preserving the
/// original order and per-post hashtag counts.
///
/// Twelve input records with hashtag counts cycling 0-3 must produce
/// exactly ten rows matching the first ten records.
#[test]
fn test_build_rows_caps_at_ten() {
    let posts: Vec<Post> = (0..12)
        .map(|i| make_post(i, &format!("tweet number {}", i), i % 4))
        .collect();

    let rows = build_rows("example", &posts);

    assert_eq!(rows.len(), MAX_EXPORT_ROWS);
    for (i, row) in rows.iter().enumerate() {
        assert_eq!(row.text, format!("tweet number {}", i));
        assert_eq!(row.hashtags, i % 4);
    }
}

/// Tests that fewer than ten posts produce exactly that many rows.
#[test]
fn test_build_rows_short_input() {
    let posts = vec![
        make_post(0, "first", 2),
        make_post(1, "second", 0),
        make_post(2, "third", 1),
    ];

    let rows = build_rows("example", &posts);

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].text, "first");
    assert_eq!(rows[1].hashtags, 0);
    assert_eq!(rows[2].text, "third");
}

/// Tests that empty input produces an empty row set.
#[test]
fn test_build_rows_empty_input() {
    let rows = build_rows("example", &[]);
    assert!(rows.is_empty());
}

/// Tests that every row's username field carries the "@" prefix regardless
/// of row content.
#[test]
fn test_build_rows_username_prefix() {
    let posts = vec![make_post(0, "one", 0), make_post(1, "two", 3)];
    let rows = build_rows("somehandle", &posts);
    for row in &rows {
        assert_eq!(row.username, "@somehandle");
    }
}

/// Tests that row text passes through the emoji sanitizer.
#[test]
fn test_build_rows_sanitizes_text() {
    let posts = vec![make_post(0, "launch day 🚀🎉", 1)];
    let rows = build_rows("example", &posts);
    assert_eq!(rows[0].text, "launch day ");
}

/// Tests that an empty row set still produces a file containing exactly
/// the header row.
#[test]
fn test_write_csv_header_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("@example.csv");

    write_csv(&path, &[]).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents, "Twitter Username,Tweet,Hashtags\n");
}

/// Tests that rows are written in order beneath the header and that plain
/// fields are left unquoted.
#[test]
fn test_write_csv_rows_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("@example.csv");
    let rows = vec![
        ExportRow {
            username: "@example".to_string(),
            text: "first tweet".to_string(),
            hashtags: 0,
        },
        ExportRow {
            username: "@example".to_string(),
            text: "second tweet".to_string(),
            hashtags: 2,
        },
    ];

    write_csv(&path, &rows).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "Twitter Username,Tweet,Hashtags");
    assert_eq!(lines[1], "@example,first tweet,0");
    assert_eq!(lines[2], "@example,second tweet,2");
}

/// Tests that embedded delimiters and quotes are escaped with standard
/// CSV quoting.
#[test]
fn test_write_csv_quotes_special_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("@example.csv");
    let rows = vec![ExportRow {
        username: "@example".to_string(),
        text: "commas, and \"quotes\" inside".to_string(),
        hashtags: 1,
    }];

    write_csv(&path, &rows).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(
        lines[1],
        "@example,\"commas, and \"\"quotes\"\" inside\",1"
    );
}

/// Tests percent-encoding against the RFC 3986 character set: unreserved
/// characters pass through, everything else is encoded, spaces become %20.
#[test]
fn test_percent_encode() {
    assert_eq!(percent_encode("abcXYZ089-_.~"), "abcXYZ089-_.~");
    assert_eq!(
        percent_encode("Ladies + Gentlemen"),
        "Ladies%20%2B%20Gentlemen"
    );
    assert_eq!(percent_encode("a=b&c"), "a%3Db%26c");
    assert_eq!(
        percent_encode("https://api.x.com/2/tweets"),
        "https%3A%2F%2Fapi.x.com%2F2%2Ftweets"
    );
}

/// Tests that generated nonces have the expected length and charset and
/// that consecutive nonces differ.
#[test]
fn test_generate_nonce() {
    let nonce = generate_nonce();
    assert_eq!(nonce.len(), 32);
    assert!(nonce.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_ne!(nonce, generate_nonce());
}

/// Tests the OAuth 1.0a signature against the reference vector published
/// in the Twitter API documentation ("Creating a signature").
///
/// With the documented credentials, nonce, and timestamp, signing
/// `POST statuses/update.json` with the documented parameters must produce
/// the signature `hCtSmYh+iHYCEqBWrE7C7hYmtUk=`.
#[test]
fn test_oauth1_header_reference_vector() {
    let config = TwitterConfig {
        api_key: "xvz1evFS4wEEPTGEFPHBog".to_string(),
        api_key_secret: "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw".to_string(),
        access_token: "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb".to_string(),
        access_token_secret: "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE".to_string(),
    };

    let header = build_oauth1_header_with(
        &config,
        "POST",
        "https://api.twitter.com/1.1/statuses/update.json",
        &[
            ("include_entities", "true"),
            (
                "status",
                "Hello Ladies + Gentlemen, a signed OAuth request!",
            ),
        ],
        "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg",
        1318622958,
    );

    assert!(header.starts_with("OAuth "));
    assert!(header.contains("oauth_signature=\"hCtSmYh%2BiHYCEqBWrE7C7hYmtUk%3D\""));
    assert!(header.contains("oauth_consumer_key=\"xvz1evFS4wEEPTGEFPHBog\""));
    assert!(header.contains("oauth_signature_method=\"HMAC-SHA1\""));
    assert!(header.contains("oauth_timestamp=\"1318622958\""));
    assert!(header.contains("oauth_version=\"1.0\""));
}

/// Tests that the header only carries oauth_* parameters; request
/// parameters influence the signature but never appear in the header.
#[test]
fn test_oauth1_header_excludes_request_params() {
    let config = TwitterConfig {
        api_key: "test-api-key".to_string(),
        api_key_secret: "test-api-key-secret".to_string(),
        access_token: "test-access-token".to_string(),
        access_token_secret: "test-access-token-secret".to_string(),
    };

    let header = build_oauth1_header_with(
        &config,
        "GET",
        "https://api.x.com/2/users/1/tweets",
        &[("max_results", "10"), ("exclude", "retweets")],
        "fixednoncefixednoncefixednonce12",
        1700000000,
    );

    assert!(!header.contains("max_results"));
    assert!(!header.contains("retweets"));
    assert!(header.contains("oauth_token=\"test-access-token\""));
}

/// Tests credential parsing from a TOML file with a `[twitter]` table.
#[test]
fn test_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[twitter]
api_key = "example-api-key-value"
api_key_secret = "example-api-key-secret-value"
access_token = "example-access-token-value"
access_token_secret = "example-access-token-secret-value"
"#,
    )
    .unwrap();

    let config = TwitterConfig::from_file(&path).unwrap();
    assert_eq!(config.api_key, "example-api-key-value");
    assert_eq!(
        config.access_token_secret,
        "example-access-token-secret-value"
    );
}

/// Tests that an empty secret in the credentials file is rejected with a
/// message naming the offending field.
#[test]
fn test_config_rejects_empty_secret() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[twitter]
api_key = ""
api_key_secret = "example-api-key-secret-value"
access_token = "example-access-token-value"
access_token_secret = "example-access-token-secret-value"
"#,
    )
    .unwrap();

    let result = TwitterConfig::from_file(&path);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("api_key"));
}

/// Tests that a missing credentials file is an error, not a panic.
#[test]
fn test_config_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does-not-exist.toml");
    assert!(TwitterConfig::from_file(&path).is_err());
}

/// Tests that a file missing one of the four keys fails to parse.
#[test]
fn test_config_missing_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[twitter]
api_key = "example-api-key-value"
api_key_secret = "example-api-key-secret-value"
access_token = "example-access-token-value"
"#,
    )
    .unwrap();

    assert!(TwitterConfig::from_file(&path).is_err());
}

/// Unit test for the secret-masking helper used in debug logging.
///
/// Long secrets keep only a prefix and suffix; the middle must never
/// survive into the masked form.
#[test]
fn test_mask_secret() {
    let masked = mask_secret("abcdefghijklmnopqrstuvwxyz");
    assert_eq!(masked, "abcdefgh...stuvwxyz");
    assert!(!masked.contains("ijklm"));

    assert_eq!(mask_secret("short"), "short...");
    assert_eq!(mask_secret("middling-1"), "middling...");
}

/// Unit test for the log sanitizer: control characters are neutralized and
/// truncation counts characters rather than bytes, so emoji-heavy text
/// never splits a code point.
#[test]
fn test_sanitize_for_logging() {
    assert_eq!(
        sanitize_for_logging("line1\nline2\ttabbed", 100),
        "line1 line2 tabbed"
    );

    let truncated = sanitize_for_logging("😀😀😀😀😀", 3);
    assert!(truncated.starts_with("😀😀😀... [truncated"));

    assert_eq!(sanitize_for_logging("short", 100), "short");
}
