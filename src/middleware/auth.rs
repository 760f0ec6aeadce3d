// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session authentication middleware.

use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Middleware that requires a valid session.
///
/// On success the [`Identity`](crate::services::Identity) is inserted as a
/// request extension for handlers to pick up.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let identity = state
        .sessions
        .current_user(request.headers())
        .ok_or(AppError::Unauthorized)?;

    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}
