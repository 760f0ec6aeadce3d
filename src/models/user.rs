// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User models: the provider's account record and the views built from it.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// User account as returned by the management API.
///
/// Only the fields the dashboard reads are kept; the provider may omit any of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectoryUser {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    /// Signup timestamp (ISO 8601)
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub logins_count: Option<u64>,
    /// Most recent login timestamp (ISO 8601)
    #[serde(default)]
    pub last_login: Option<String>,
}

/// One row of the user table on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserDashboardRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signup_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "binding-generation", ts(type = "number | undefined"))]
    pub login_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<String>,
}

impl From<DirectoryUser> for UserDashboardRow {
    fn from(user: DirectoryUser) -> Self {
        Self {
            email: user.email,
            name: user.name,
            signup_date: user.created_at,
            login_count: user.logins_count,
            last_login: user.last_login,
        }
    }
}

/// Profile card for the signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

impl From<DirectoryUser> for UserProfile {
    fn from(user: DirectoryUser) -> Self {
        Self {
            email: user.email,
            name: user.name,
            picture: user.picture,
        }
    }
}
