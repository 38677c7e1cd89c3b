//! Day-by-day schedule resolution
//!
//! The default weekly rule (Monday through Friday open, weekend closed) is
//! never persisted; only per-date overrides are. All dates are UTC calendar
//! dates, so the weekday of a date never drifts with server timezone.

use chrono::{Datelike, Days, NaiveDate, Utc, Weekday};
use shared::error::{AppError, ErrorCode};
use shared::models::{ScheduleDay, ScheduleOverride, ScheduleOverrideSet};
use sqlx::PgPool;
use std::collections::HashMap;

use crate::db;

/// Window size when the caller gives no bounds (from..=from+59)
const DEFAULT_WINDOW_DAYS: u64 = 60;
/// Hard cap on resolved days per request
const MAX_WINDOW_DAYS: u64 = 90;

/// Default rule: open on business days
pub fn default_open(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Resolve each date in `[from, to]` against the default rule and the
/// loaded overrides.
///
/// `is_default` is value equality with the default rule, not override-row
/// absence: an override set to the same value as the default still reports
/// `is_default = true`.
pub fn resolve_days(
    from: NaiveDate,
    to: NaiveDate,
    today: NaiveDate,
    overrides: &HashMap<NaiveDate, bool>,
) -> Vec<ScheduleDay> {
    from.iter_days()
        .take_while(|d| *d <= to)
        .map(|date| {
            let default = default_open(date);
            let is_open = overrides.get(&date).copied().unwrap_or(default);
            ScheduleDay {
                date,
                is_open,
                is_default: is_open == default,
                is_editable: date >= today,
            }
        })
        .collect()
}

fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        AppError::with_message(ErrorCode::InvalidDateFormat, "Date must be YYYY-MM-DD")
            .with_detail("date", value)
    })
}

fn validate_window(from: NaiveDate, to: NaiveDate) -> Result<(), AppError> {
    if from > to {
        return Err(AppError::with_message(
            ErrorCode::InvalidDateRange,
            "Window start must not be after its end",
        ));
    }
    let days = (to - from).num_days() as u64 + 1;
    if days > MAX_WINDOW_DAYS {
        return Err(AppError::with_message(
            ErrorCode::ScheduleWindowTooLarge,
            format!("Window must not exceed {MAX_WINDOW_DAYS} days"),
        ));
    }
    Ok(())
}

/// Resolve a store's schedule over an optional window.
/// Defaults to 60 days starting today (UTC).
pub async fn resolve(
    pool: &PgPool,
    store_id: i64,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<Vec<ScheduleDay>, AppError> {
    let today = Utc::now().date_naive();

    let from = match from {
        Some(v) => parse_date(v)?,
        None => today,
    };
    let to = match to {
        Some(v) => parse_date(v)?,
        None => from + Days::new(DEFAULT_WINDOW_DAYS - 1),
    };
    validate_window(from, to)?;

    let overrides = db::schedules::list_range(pool, store_id, from, to)
        .await
        .map_err(db::internal)?;
    let by_date: HashMap<NaiveDate, bool> = overrides
        .into_iter()
        .map(|o: ScheduleOverride| (o.date, o.is_open))
        .collect();

    Ok(resolve_days(from, to, today, &by_date))
}

/// Set one date's availability and return the resolved day.
/// Past dates are immutable.
pub async fn set_override(
    pool: &PgPool,
    store_id: i64,
    payload: ScheduleOverrideSet,
) -> Result<ScheduleDay, AppError> {
    let today = Utc::now().date_naive();
    if payload.date < today {
        return Err(AppError::with_message(
            ErrorCode::PastDateImmutable,
            "Cannot modify availability of a past date",
        ));
    }

    let saved = db::schedules::upsert(pool, store_id, payload.date, payload.is_open)
        .await
        .map_err(db::internal)?;

    Ok(ScheduleDay {
        date: saved.date,
        is_open: saved.is_open,
        is_default: saved.is_open == default_open(saved.date),
        is_editable: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_default_rule_is_weekdays_only() {
        assert!(default_open(d("2024-03-04"))); // Monday
        assert!(default_open(d("2024-03-08"))); // Friday
        assert!(!default_open(d("2024-03-09"))); // Saturday
        assert!(!default_open(d("2024-03-10"))); // Sunday
    }

    #[test]
    fn test_resolve_week_without_overrides() {
        let days = resolve_days(d("2024-03-04"), d("2024-03-10"), d("2024-03-01"), &HashMap::new());
        assert_eq!(days.len(), 7);
        for day in &days[..5] {
            assert!(day.is_open, "{} should be open", day.date);
            assert!(day.is_default);
        }
        for day in &days[5..] {
            assert!(!day.is_open, "{} should be closed", day.date);
            assert!(day.is_default);
        }
    }

    #[test]
    fn test_override_wins_and_clears_default_flag() {
        let mut overrides = HashMap::new();
        overrides.insert(d("2024-03-05"), false); // Tuesday closed
        overrides.insert(d("2024-03-09"), true); // Saturday open

        let days = resolve_days(d("2024-03-04"), d("2024-03-10"), d("2024-03-01"), &overrides);
        let tue = &days[1];
        assert!(!tue.is_open);
        assert!(!tue.is_default);
        let sat = &days[5];
        assert!(sat.is_open);
        assert!(!sat.is_default);
    }

    #[test]
    fn test_override_equal_to_default_reports_default() {
        // A stored override that matches the weekday rule is
        // indistinguishable from the default in the output
        let mut overrides = HashMap::new();
        overrides.insert(d("2024-03-04"), true); // Monday, already open by rule

        let days = resolve_days(d("2024-03-04"), d("2024-03-04"), d("2024-03-01"), &overrides);
        assert!(days[0].is_open);
        assert!(days[0].is_default);
    }

    #[test]
    fn test_editable_tracks_today() {
        let days = resolve_days(d("2024-03-04"), d("2024-03-06"), d("2024-03-05"), &HashMap::new());
        assert!(!days[0].is_editable);
        assert!(days[1].is_editable);
        assert!(days[2].is_editable);
    }

    #[test]
    fn test_window_validation() {
        assert!(validate_window(d("2024-03-10"), d("2024-03-04")).is_err());
        // 90 days inclusive is the cap
        assert!(validate_window(d("2024-01-01"), d("2024-03-30")).is_ok());
        assert!(validate_window(d("2024-01-01"), d("2024-03-31")).is_err());
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date("2024-03-04").is_ok());
        assert_eq!(
            parse_date("04/03/2024").unwrap_err().code,
            ErrorCode::InvalidDateFormat
        );
        assert!(parse_date("2024-13-40").is_err());
    }
}
