// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod stats;
pub mod user;

pub use stats::{compute_statistics, DailyLoginRecord, UsageStatistics};
pub use user::{DirectoryUser, UserDashboardRow, UserProfile};
