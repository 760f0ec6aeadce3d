// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Read/write access to the identity provider's user directory.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::AppError;
use crate::models::{DailyLoginRecord, DirectoryUser};

/// Operations the dashboard needs from the identity provider.
///
/// Handlers hold this as `Arc<dyn DirectoryClient>` so tests can swap in a fake.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// All registered users.
    async fn list_users(&self) -> Result<Vec<DirectoryUser>, AppError>;

    /// Number of registered accounts.
    async fn total_user_count(&self) -> Result<u64, AppError>;

    /// Daily login records from `from` (inclusive) onward.
    async fn daily_login_stats(&self, from: NaiveDate)
        -> Result<Vec<DailyLoginRecord>, AppError>;

    async fn get_user(&self, user_id: &str) -> Result<DirectoryUser, AppError>;

    async fn update_user_name(&self, user_id: &str, name: &str) -> Result<(), AppError>;
}
