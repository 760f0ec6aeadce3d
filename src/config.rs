// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Everything is read once at startup. The identity-provider settings are
//! handed to the directory client as a [`ManagementConfig`]; nothing else
//! reads the environment.

use std::env;
use std::time::Duration;

const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Identity provider tenant URL, e.g. `https://tenant.eu.auth0.com`
    pub issuer_base_url: String,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Timeout for each management API request
    pub management_timeout: Duration,

    // --- Secrets ---
    /// Bearer token for the management API
    pub management_api_token: String,
    /// HS256 key shared with the login layer that issues session tokens
    pub session_signing_key: Vec<u8>,
}

/// Connection settings for the identity provider's management API.
#[derive(Debug, Clone)]
pub struct ManagementConfig {
    pub base_url: String,
    pub api_token: String,
    pub timeout: Duration,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            issuer_base_url: "http://127.0.0.1:9".to_string(),
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
            port: DEFAULT_PORT,
            management_timeout: Duration::from_secs(2),
            management_api_token: "test_management_token".to_string(),
            session_signing_key: b"test_session_key_32_bytes_min!!!".to_vec(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let timeout_secs = match env::var("MANAGEMENT_API_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid("MANAGEMENT_API_TIMEOUT_SECS", raw))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            issuer_base_url: normalize_base_url(
                &env::var("AUTH0_ISSUER_BASE_URL")
                    .map_err(|_| ConfigError::Missing("AUTH0_ISSUER_BASE_URL"))?,
            ),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| DEFAULT_FRONTEND_URL.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .unwrap_or(DEFAULT_PORT),
            management_timeout: Duration::from_secs(timeout_secs),

            management_api_token: env::var("AUTH0_MANAGEMENT_API_TOKEN")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("AUTH0_MANAGEMENT_API_TOKEN"))?,
            session_signing_key: env::var("SESSION_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("SESSION_SIGNING_KEY"))?
                .into_bytes(),
        })
    }

    /// Settings for the management API client.
    pub fn management(&self) -> ManagementConfig {
        ManagementConfig {
            base_url: normalize_base_url(&self.issuer_base_url),
            api_token: self.management_api_token.clone(),
            timeout: self.management_timeout,
        }
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
