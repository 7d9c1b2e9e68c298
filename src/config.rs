//! Configuration module for tweetsheet.
//!
//! This module contains the credential structure and loading logic for the
//! Twitter/X API integration. Credentials are OAuth 1.0a user-context
//! secrets: an API key pair and an access token pair.

use std::env;
use std::path::Path;

use log::{debug, error, info, warn};
use serde::Deserialize;

/// Default path of the credentials file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration struct for Twitter/X API credentials.
///
/// This struct holds the four secrets required for OAuth 1.0a user-context
/// authentication against the Twitter/X API: the consumer (API) key pair
/// identifying the application and the access token pair identifying the
/// authorizing user.
#[derive(Debug, Clone, Deserialize)]
pub struct TwitterConfig {
    /// The API key (OAuth consumer key)
    pub api_key: String,
    /// The API key secret (OAuth consumer secret)
    pub api_key_secret: String,
    /// The Access Token for the authorizing user
    pub access_token: String,
    /// The Access Token Secret for the authorizing user
    pub access_token_secret: String,
}

/// Top-level shape of the credentials file.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    twitter: TwitterConfig,
}

/// Masks a secret for safe debug logging.
///
/// Keeps at most the first eight and last eight characters, replacing the
/// middle with `...`, so a leaked log never contains a usable credential.
pub(crate) fn mask_secret(secret: &str) -> String {
    let len = secret.chars().count();
    if len > 16 {
        let prefix: String = secret.chars().take(8).collect();
        let suffix: String = secret.chars().skip(len - 8).collect();
        format!("{}...{}", prefix, suffix)
    } else if len > 8 {
        let prefix: String = secret.chars().take(8).collect();
        format!("{}...", prefix)
    } else {
        format!("{}...", secret)
    }
}

impl TwitterConfig {
    /// Loads credentials from a TOML file.
    ///
    /// The file must contain a `[twitter]` table with the four keys
    /// `api_key`, `api_key_secret`, `access_token`, and
    /// `access_token_secret`.
    ///
    /// # Parameters
    ///
    /// - `path`: Path of the credentials file
    ///
    /// # Returns
    ///
    /// - `Ok(TwitterConfig)`: If the file was read and parsed successfully
    /// - `Err(Box<dyn std::error::Error + Send + Sync>)`: If the file is
    ///   missing, unreadable, malformed, or contains an empty secret
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        info!("Loading Twitter credentials from {}", path.display());

        let contents = std::fs::read_to_string(path).map_err(|e| {
            error!("Failed to read credentials file {}: {}", path.display(), e);
            format!("Failed to read credentials file {}: {}", path.display(), e)
        })?;

        let parsed: ConfigFile = toml::from_str(&contents).map_err(|e| {
            error!("Failed to parse credentials file {}: {}", path.display(), e);
            format!("Failed to parse credentials file {}: {}", path.display(), e)
        })?;

        let config = parsed.twitter;
        config.validate()?;

        info!("Twitter credentials loaded from file");
        debug!("API key (masked): {}", mask_secret(&config.api_key));
        debug!(
            "Access token (masked): {}",
            mask_secret(&config.access_token)
        );

        Ok(config)
    }

    /// Loads credentials from environment variables.
    ///
    /// # Required Environment Variables
    ///
    /// - `twitter_api_key`: API key (OAuth consumer key)
    /// - `twitter_api_key_secret`: API key secret (OAuth consumer secret)
    /// - `twitter_access_token`: Access token for the authorizing user
    /// - `twitter_access_token_secret`: Access token secret
    ///
    /// # Returns
    ///
    /// - `Ok(TwitterConfig)`: If all four variables are present and non-empty
    /// - `Err(Box<dyn std::error::Error + Send + Sync>)`: If any variable is
    ///   missing or empty
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        info!("Loading Twitter credentials from environment variables");

        let read_var = |name: &str| -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
            match env::var(name) {
                Ok(value) => {
                    debug!("Found {} with length {}", name, value.len());
                    Ok(value)
                }
                Err(e) => {
                    error!("Failed to load {} from environment: {}", name, e);
                    Err(format!("Missing {} environment variable: {}", name, e).into())
                }
            }
        };

        let config = TwitterConfig {
            api_key: read_var("twitter_api_key")?,
            api_key_secret: read_var("twitter_api_key_secret")?,
            access_token: read_var("twitter_access_token")?,
            access_token_secret: read_var("twitter_access_token_secret")?,
        };
        config.validate()?;

        info!("Twitter credentials loaded from environment");
        debug!("API key (masked): {}", mask_secret(&config.api_key));
        debug!(
            "Access token (masked): {}",
            mask_secret(&config.access_token)
        );

        Ok(config)
    }

    /// Loads credentials with file-then-environment priority.
    ///
    /// # Loading Priority
    ///
    /// 1. First tries the credentials file at [`DEFAULT_CONFIG_PATH`]
    /// 2. Falls back to the `twitter_*` environment variables
    ///
    /// # Returns
    ///
    /// - `Ok(TwitterConfig)`: From whichever source resolved first
    /// - `Err(Box<dyn std::error::Error + Send + Sync>)`: If neither source
    ///   yields a complete set of credentials
    pub fn load() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let path = Path::new(DEFAULT_CONFIG_PATH);
        if path.exists() {
            return Self::from_file(path);
        }

        warn!(
            "Credentials file {} not found, falling back to environment variables",
            path.display()
        );
        Self::from_env()
    }

    /// Checks that no secret is empty.
    fn validate(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let fields = [
            ("api_key", &self.api_key),
            ("api_key_secret", &self.api_key_secret),
            ("access_token", &self.access_token),
            ("access_token_secret", &self.access_token_secret),
        ];
        for (name, value) in fields {
            if value.is_empty() {
                error!("Credential {} is empty", name);
                return Err(format!("Credential {} cannot be empty", name).into());
            }
            if value.len() < 10 {
                warn!(
                    "Credential {} seems unusually short ({} characters)",
                    name,
                    value.len()
                );
            }
        }
        Ok(())
    }
}
