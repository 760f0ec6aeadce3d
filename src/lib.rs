// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Usage Dashboard: admin backend over an identity provider's management API
//!
//! This crate serves the profile, user-table and usage-statistics endpoints
//! for a small administrative dashboard. Every request is gated on a session
//! and answered by querying the identity provider.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::{DirectoryClient, SessionProvider};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub directory: Arc<dyn DirectoryClient>,
    pub sessions: Arc<dyn SessionProvider>,
}
