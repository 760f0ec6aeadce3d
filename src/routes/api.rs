// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::{AppError, Result};
use crate::models::{compute_statistics, UsageStatistics, UserDashboardRow, UserProfile};
use crate::services::Identity;
use crate::time_utils::{day_key, utc_day, window_start};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::get,
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

const NAME_LENGTH_MESSAGE: &str = "Name must be between 1 and 300 characters";

/// API routes (require an authenticated session).
/// The session middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/user/statistic", get(get_statistics))
        .route("/api/user/dashboard", get(get_dashboard))
        .route("/api/user/{id}", get(get_profile).patch(update_profile))
}

// ─── Statistics ──────────────────────────────────────────────

/// Total users, today's logins and the 7-day login average.
async fn get_statistics(State(state): State<Arc<AppState>>) -> Result<Json<UsageStatistics>> {
    let today = utc_day(&chrono::Utc::now());
    let from = window_start(today);

    // Both lookups must succeed; a failure in either aborts the request.
    let (total_users, daily) = tokio::try_join!(
        state.directory.total_user_count(),
        state.directory.daily_login_stats(from),
    )?;

    tracing::debug!(
        total_users,
        records = daily.len(),
        from = %from,
        "Computing usage statistics"
    );

    Ok(Json(compute_statistics(
        total_users,
        &daily,
        &day_key(today),
    )))
}

// ─── User Table ──────────────────────────────────────────────

/// Every registered user, one row each.
async fn get_dashboard(State(state): State<Arc<AppState>>) -> Result<Json<Vec<UserDashboardRow>>> {
    let users = state.directory.list_users().await?;
    tracing::debug!(count = users.len(), "Fetched user table");

    Ok(Json(users.into_iter().map(UserDashboardRow::from).collect()))
}

// ─── Profile ─────────────────────────────────────────────────

/// Profile edits submitted from the dashboard.
#[derive(Debug, Deserialize, Validate)]
struct NameUpdate {
    #[validate(length(min = 1, max = 300))]
    name: String,
}

/// Users may only read or edit their own profile.
fn ensure_own_profile(identity: &Identity, user_id: &str) -> Result<()> {
    if identity.sub != user_id {
        tracing::warn!(
            session_sub = %identity.sub,
            requested = %user_id,
            "Rejected access to another user's profile"
        );
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

/// Get the signed-in user's profile.
async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(user_id): Path<String>,
) -> Result<Json<UserProfile>> {
    ensure_own_profile(&identity, &user_id)?;

    let user = state.directory.get_user(&user_id).await?;
    Ok(Json(UserProfile::from(user)))
}

/// Rename the signed-in user.
async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(user_id): Path<String>,
    payload: std::result::Result<Json<NameUpdate>, JsonRejection>,
) -> Result<Json<serde_json::Value>> {
    ensure_own_profile(&identity, &user_id)?;

    let Json(update) = payload.map_err(|e| {
        tracing::debug!(error = %e, "Rejected profile update body");
        AppError::BadRequest("Invalid request body".to_string())
    })?;

    update
        .validate()
        .map_err(|_| AppError::BadRequest(NAME_LENGTH_MESSAGE.to_string()))?;

    state
        .directory
        .update_user_name(&user_id, &update.name)
        .await?;

    tracing::info!(user_id = %user_id, "Profile name updated");

    Ok(Json(serde_json::json!({})))
}
