// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Usage statistics derived from the identity provider's daily login stats.

use serde::{Deserialize, Deserializer, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::time_utils::ROLLING_WINDOW_DAYS;

/// One day of login telemetry as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyLoginRecord {
    /// Day identifier in the provider's format (UTC midnight, ISO 8601)
    pub date: String,
    /// Logins recorded on that day
    #[serde(deserialize_with = "deserialize_logins")]
    pub logins: i64,
}

impl DailyLoginRecord {
    pub fn new(date: impl Into<String>, logins: i64) -> Self {
        Self {
            date: date.into(),
            logins,
        }
    }
}

/// The provider has returned `logins` both as a number and as a numeric string.
fn deserialize_logins<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawLogins {
        Number(i64),
        Text(String),
    }

    match RawLogins::deserialize(deserializer)? {
        RawLogins::Number(n) => Ok(n),
        RawLogins::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid login count: {s:?}"))),
    }
}

/// Aggregate usage numbers shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UsageStatistics {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_users: u64,
    /// Logins recorded today
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub active_users: i64,
    /// Sum of daily logins divided by the window length, unrounded
    pub average_active_users: f64,
}

/// Compute dashboard statistics from already-fetched provider data.
///
/// The average always divides by [`ROLLING_WINDOW_DAYS`], so days missing from
/// `daily` count as zero logins. `active_users` comes from the first record
/// whose `date` equals `today_key` exactly; later duplicates are ignored.
/// Values are not sanitised: negative counts flow through unchanged.
pub fn compute_statistics(
    total_users: u64,
    daily: &[DailyLoginRecord],
    today_key: &str,
) -> UsageStatistics {
    let total_logins: i64 = daily.iter().map(|r| r.logins).sum();
    let average_active_users = total_logins as f64 / ROLLING_WINDOW_DAYS as f64;

    let active_users = daily
        .iter()
        .find(|r| r.date == today_key)
        .map(|r| r.logins)
        .unwrap_or(0);

    UsageStatistics {
        total_users,
        active_users,
        average_active_users,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn week() -> Vec<DailyLoginRecord> {
        [7, 14, 21, 10, 12, 6, 0]
            .iter()
            .enumerate()
            .map(|(i, &n)| DailyLoginRecord::new(format!("2024-01-{:02}", i + 1), n))
            .collect()
    }

    #[test]
    fn test_empty_records() {
        for total in [0, 1, 4096] {
            let stats = compute_statistics(total, &[], "2024-01-07");
            assert_eq!(stats.total_users, total);
            assert_eq!(stats.active_users, 0);
            assert_eq!(stats.average_active_users, 0.0);
        }
    }

    #[test]
    fn test_full_week_average() {
        let records = week();
        assert_eq!(records.iter().map(|r| r.logins).sum::<i64>(), 70);

        let stats = compute_statistics(42, &records, "2024-01-07");
        assert_eq!(stats.average_active_users, 10.0);
        assert_eq!(stats.active_users, 0);
        assert_eq!(stats.total_users, 42);
    }

    #[test]
    fn test_short_window_still_divides_by_seven() {
        let records = vec![
            DailyLoginRecord::new("2024-01-05", 5),
            DailyLoginRecord::new("2024-01-06", 9),
            DailyLoginRecord::new("2024-01-07", 7),
        ];

        let stats = compute_statistics(10, &records, "2024-01-07");
        assert_eq!(stats.average_active_users, 3.0);
        assert_eq!(stats.active_users, 7);
    }

    #[test]
    fn test_eight_records_are_all_summed() {
        let mut records = week();
        records.push(DailyLoginRecord::new("2024-01-08", 14));

        let stats = compute_statistics(0, &records, "2024-01-08");
        assert_eq!(stats.average_active_users, 12.0);
        assert_eq!(stats.active_users, 14);
    }

    #[test]
    fn test_duplicate_today_takes_first_match() {
        let records = vec![
            DailyLoginRecord::new("2024-01-06", 1),
            DailyLoginRecord::new("2024-01-07", 4),
            DailyLoginRecord::new("2024-01-07", 9),
        ];

        let stats = compute_statistics(0, &records, "2024-01-07");
        assert_eq!(stats.active_users, 4);
        // Both duplicates still count toward the sum.
        assert_eq!(stats.average_active_users, 2.0);
    }

    #[test]
    fn test_negative_logins_propagate() {
        let records = vec![
            DailyLoginRecord::new("2024-01-05", 0),
            DailyLoginRecord::new("2024-01-06", 0),
            DailyLoginRecord::new("2024-01-07", -7),
        ];

        let stats = compute_statistics(3, &records, "2024-01-07");
        assert_eq!(stats.average_active_users, -1.0);
        assert_eq!(stats.active_users, -7);
    }

    #[test]
    fn test_today_key_must_match_exactly() {
        let records = vec![DailyLoginRecord::new("2024-01-07T00:00:00.000Z", 5)];

        let stats = compute_statistics(0, &records, "2024-01-07");
        assert_eq!(stats.active_users, 0);

        let stats = compute_statistics(0, &records, "2024-01-07T00:00:00.000Z");
        assert_eq!(stats.active_users, 5);
    }

    #[test]
    fn test_total_users_ignores_records() {
        let stats = compute_statistics(17, &week(), "1999-01-01");
        assert_eq!(stats.total_users, 17);
    }

    #[test]
    fn test_logins_accepts_number_or_string() {
        let records: Vec<DailyLoginRecord> = serde_json::from_str(
            r#"[
                {"date": "2024-01-06T00:00:00.000Z", "logins": 3, "signups": 1},
                {"date": "2024-01-07T00:00:00.000Z", "logins": "12"}
            ]"#,
        )
        .unwrap();

        assert_eq!(records[0].logins, 3);
        assert_eq!(records[1].logins, 12);
    }

    #[test]
    fn test_logins_rejects_garbage() {
        let result: Result<DailyLoginRecord, _> =
            serde_json::from_str(r#"{"date": "2024-01-07", "logins": "many"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serializes_camel_case() {
        let stats = UsageStatistics {
            total_users: 5,
            active_users: 2,
            average_active_users: 1.5,
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"totalUsers": 5, "activeUsers": 2, "averageActiveUsers": 1.5})
        );
    }
}
