// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Management API client for the identity provider.
//!
//! Handles:
//! - User listing and total-count queries
//! - Daily login stats for the rolling window
//! - Profile reads and name updates

use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::Deserialize;

use crate::config::ManagementConfig;
use crate::error::AppError;
use crate::models::{DailyLoginRecord, DirectoryUser};
use crate::services::directory::DirectoryClient;
use crate::time_utils::compact_date;

/// Management API v2 client.
#[derive(Clone)]
pub struct ManagementClient {
    http: reqwest::Client,
    base_url: String,
    api_token: String,
}

/// Body of a `include_totals=true` user query.
#[derive(Debug, Deserialize)]
struct UserTotals {
    #[serde(default)]
    total: Option<u64>,
}

impl ManagementClient {
    /// Create a client from explicit connection settings.
    pub fn new(config: ManagementConfig) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .context("failed building management API HTTP client")?;

        tracing::info!(base_url = %config.base_url, "Initialized management API client");

        Ok(Self {
            http,
            base_url: config.base_url,
            api_token: config.api_token,
        })
    }

    fn user_url(&self, user_id: &str) -> String {
        format!(
            "{}/api/v2/users/{}",
            self.base_url,
            urlencoding::encode(user_id)
        )
    }

    /// Generic GET request with JSON response.
    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, AppError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.api_token)
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("GET {}: {}", url, e)))?;

        self.check_response_json(response).await
    }

    /// Check response status, handing the response back if successful.
    async fn check_response(
        &self,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, AppError> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let url = response.url().clone();
        let body = response.text().await.unwrap_or_default();

        if status.as_u16() == 429 {
            tracing::warn!(url = %url, "Management API rate limit hit (429)");
        }

        Err(AppError::Upstream(format!(
            "{} returned HTTP {}: {}",
            url, status, body
        )))
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        let url = response.url().clone();
        self.check_response(response)
            .await?
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("{}: JSON parse error: {}", url, e)))
    }
}

#[async_trait]
impl DirectoryClient for ManagementClient {
    async fn list_users(&self) -> Result<Vec<DirectoryUser>, AppError> {
        let url = format!("{}/api/v2/users", self.base_url);
        let users: Option<Vec<DirectoryUser>> = self.get_json(&url, &[]).await?;
        Ok(users.unwrap_or_default())
    }

    async fn total_user_count(&self) -> Result<u64, AppError> {
        let url = format!("{}/api/v2/users", self.base_url);
        let totals: UserTotals = self
            .get_json(
                &url,
                &[
                    ("per_page", "0".to_string()),
                    ("include_totals", "true".to_string()),
                    ("fields", "user_id".to_string()),
                ],
            )
            .await?;
        Ok(totals.total.unwrap_or(0))
    }

    async fn daily_login_stats(
        &self,
        from: NaiveDate,
    ) -> Result<Vec<DailyLoginRecord>, AppError> {
        let url = format!("{}/api/v2/stats/daily", self.base_url);
        self.get_json(&url, &[("from", compact_date(from))]).await
    }

    async fn get_user(&self, user_id: &str) -> Result<DirectoryUser, AppError> {
        self.get_json(&self.user_url(user_id), &[]).await
    }

    async fn update_user_name(&self, user_id: &str, name: &str) -> Result<(), AppError> {
        let url = self.user_url(user_id);

        let body = serde_json::json!({
            "name": name
        });

        let response = self
            .http
            .patch(&url)
            .bearer_auth(&self.api_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("PATCH {}: {}", url, e)))?;

        self.check_response(response).await?;
        Ok(())
    }
}
