// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use axum::response::Response;
use chrono::NaiveDate;
use std::sync::{Arc, Mutex};
use usage_dashboard::config::Config;
use usage_dashboard::error::AppError;
use usage_dashboard::models::{DailyLoginRecord, DirectoryUser};
use usage_dashboard::routes::create_router;
use usage_dashboard::services::{
    issue_session_token, DirectoryClient, Identity, JwtSessionProvider,
};
use usage_dashboard::AppState;

/// In-memory directory with canned data and call recording.
#[derive(Default)]
#[allow(dead_code)]
pub struct FakeDirectory {
    pub users: Vec<DirectoryUser>,
    pub total: u64,
    pub daily: Vec<DailyLoginRecord>,
    pub fail_total: bool,
    pub fail_daily: bool,
    pub calls: Mutex<Vec<&'static str>>,
    pub daily_from: Mutex<Option<NaiveDate>>,
    pub renamed: Mutex<Vec<(String, String)>>,
}

#[allow(dead_code)]
impl FakeDirectory {
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl DirectoryClient for FakeDirectory {
    async fn list_users(&self) -> Result<Vec<DirectoryUser>, AppError> {
        self.record("list_users");
        Ok(self.users.clone())
    }

    async fn total_user_count(&self) -> Result<u64, AppError> {
        self.record("total_user_count");
        if self.fail_total {
            return Err(AppError::Upstream("total: HTTP 503".to_string()));
        }
        Ok(self.total)
    }

    async fn daily_login_stats(
        &self,
        from: NaiveDate,
    ) -> Result<Vec<DailyLoginRecord>, AppError> {
        self.record("daily_login_stats");
        *self.daily_from.lock().unwrap() = Some(from);
        if self.fail_daily {
            return Err(AppError::Upstream("daily: connection reset".to_string()));
        }
        Ok(self.daily.clone())
    }

    async fn get_user(&self, user_id: &str) -> Result<DirectoryUser, AppError> {
        self.record("get_user");
        self.users
            .iter()
            .find(|u| u.user_id.as_deref() == Some(user_id))
            .cloned()
            .ok_or_else(|| AppError::Upstream(format!("user {user_id}: HTTP 404")))
    }

    async fn update_user_name(&self, user_id: &str, name: &str) -> Result<(), AppError> {
        self.record("update_user_name");
        self.renamed
            .lock()
            .unwrap()
            .push((user_id.to_string(), name.to_string()));
        Ok(())
    }
}

/// Create a test app over `directory`.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(directory: Arc<FakeDirectory>) -> (axum::Router, Arc<AppState>) {
    let config = Config::default();
    let sessions = JwtSessionProvider::new(&config.session_signing_key);

    let state = Arc::new(AppState {
        config,
        directory,
        sessions: Arc::new(sessions),
    });

    (create_router(state.clone()), state)
}

/// Session token for `sub`, signed with the test app's key.
#[allow(dead_code)]
pub fn session_token(sub: &str, state: &AppState) -> String {
    let identity = Identity {
        sub: sub.to_string(),
        email: None,
        name: None,
    };
    issue_session_token(&identity, &state.config.session_signing_key)
        .expect("Failed to create session token")
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn json_body(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// A directory user with every dashboard field filled in.
#[allow(dead_code)]
pub fn user(id: &str, name: &str, logins: u64) -> DirectoryUser {
    DirectoryUser {
        user_id: Some(id.to_string()),
        email: Some(format!("{}@example.com", name.to_lowercase())),
        name: Some(name.to_string()),
        picture: Some(format!("https://cdn.example.com/{}.png", name.to_lowercase())),
        created_at: Some("2024-01-01T10:00:00.000Z".to_string()),
        logins_count: Some(logins),
        last_login: Some("2024-01-07T08:30:00.000Z".to_string()),
    }
}
