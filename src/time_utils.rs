// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.
//!
//! The identity provider keys daily stats by UTC midnight, so both the
//! "today" lookup key and the query window are computed from the same
//! instant after converting it to UTC.

use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};

/// Number of days covered by the rolling login average.
pub const ROLLING_WINDOW_DAYS: u64 = 7;

/// Calendar day (UTC) that contains `now`.
pub fn utc_day<Tz: TimeZone>(now: &DateTime<Tz>) -> NaiveDate {
    now.with_timezone(&Utc).date_naive()
}

/// Identifier the provider uses for a day in its daily stats,
/// e.g. `2024-01-07T00:00:00.000Z`.
pub fn day_key(day: NaiveDate) -> String {
    format!("{}T00:00:00.000Z", day.format("%Y-%m-%d"))
}

/// First day requested from the daily stats endpoint for a window ending on `today`.
pub fn window_start(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_days(Days::new(ROLLING_WINDOW_DAYS))
        .unwrap_or(NaiveDate::MIN)
}

/// Compact `YYYYMMDD` form accepted by the daily stats `from` parameter.
pub fn compact_date(day: NaiveDate) -> String {
    day.format("%Y%m%d").to_string()
}
