//! Pickup slot management
//!
//! Slots are recurring weekly windows. Among active slots on the same
//! weekday no two windows may overlap; windows are half-open, so a slot
//! ending 12:00 and one starting 12:00 coexist. Inactive slots are exempt
//! and kept for audit.
//!
//! The overlap check is check-then-act: two concurrent creates can both
//! pass it. There is no exclusion constraint backing it; the merchant
//! dashboard is effectively single-writer per store, so the race is
//! accepted.

use shared::error::{AppError, ErrorCode};
use shared::models::{PickupSlot, PickupSlotCreate};
use sqlx::PgPool;

use crate::db;

/// Parse a strict "HH:mm" time into minutes since midnight
pub fn parse_time(value: &str) -> Result<u32, AppError> {
    let invalid = || {
        AppError::with_message(ErrorCode::InvalidTimeWindow, "Time must be HH:mm")
            .with_detail("time", value)
    };

    let (hh, mm) = value.split_once(':').ok_or_else(invalid)?;
    if hh.len() != 2 || mm.len() != 2 {
        return Err(invalid());
    }
    let hours: u32 = hh.parse().map_err(|_| invalid())?;
    let minutes: u32 = mm.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    Ok(hours * 60 + minutes)
}

/// Half-open overlap: touching endpoints do not collide
pub fn windows_overlap(a_start: u32, a_end: u32, b_start: u32, b_end: u32) -> bool {
    a_start < b_end && b_start < a_end
}

/// Validate a candidate window against the active slots of its weekday.
/// `exclude_id` skips the slot itself during reactivation.
fn check_no_overlap(
    start: u32,
    end: u32,
    window_label: &str,
    existing: &[PickupSlot],
    exclude_id: Option<i64>,
) -> Result<(), AppError> {
    for slot in existing {
        if exclude_id == Some(slot.id) {
            continue;
        }
        let other_start = parse_time(&slot.start_time)?;
        let other_end = parse_time(&slot.end_time)?;
        if windows_overlap(start, end, other_start, other_end) {
            return Err(AppError::with_message(
                ErrorCode::SlotOverlap,
                format!("Window {} overlaps existing slot {}", window_label, slot.window()),
            )
            .with_detail("existing", slot.window()));
        }
    }
    Ok(())
}

fn validate_window(payload: &PickupSlotCreate) -> Result<(u32, u32), AppError> {
    if !(0..=6).contains(&payload.day_of_week) {
        return Err(AppError::with_message(
            ErrorCode::InvalidDayOfWeek,
            "Day of week must be between 0 (Sunday) and 6 (Saturday)",
        ));
    }
    let start = parse_time(&payload.start_time)?;
    let end = parse_time(&payload.end_time)?;
    if end <= start {
        return Err(AppError::with_message(
            ErrorCode::InvalidTimeWindow,
            "End time must be after start time",
        ));
    }
    Ok((start, end))
}

/// Create an active slot after validating the window and the overlap
/// invariant against the weekday's other active slots
pub async fn create(
    pool: &PgPool,
    store_id: i64,
    payload: PickupSlotCreate,
) -> Result<PickupSlot, AppError> {
    let (start, end) = validate_window(&payload)?;

    let existing = db::pickup_slots::list_active_for_day(pool, store_id, payload.day_of_week)
        .await
        .map_err(db::internal)?;
    let label = format!("{}-{}", payload.start_time, payload.end_time);
    check_no_overlap(start, end, &label, &existing, None)?;

    db::pickup_slots::create(
        pool,
        store_id,
        payload.day_of_week,
        &payload.start_time,
        &payload.end_time,
    )
    .await
    .map_err(db::internal)
}

/// Activate or deactivate a slot.
///
/// Deactivation is always allowed. Reactivation re-checks the overlap
/// invariant against the weekday's other active slots.
pub async fn toggle_active(
    pool: &PgPool,
    store_id: i64,
    slot_id: i64,
    is_active: bool,
) -> Result<PickupSlot, AppError> {
    let slot = db::pickup_slots::find_by_id(pool, store_id, slot_id)
        .await
        .map_err(db::internal)?
        .ok_or_else(|| AppError::new(ErrorCode::SlotNotFound))?;

    if is_active {
        let start = parse_time(&slot.start_time)?;
        let end = parse_time(&slot.end_time)?;
        let existing = db::pickup_slots::list_active_for_day(pool, store_id, slot.day_of_week)
            .await
            .map_err(db::internal)?;
        check_no_overlap(start, end, &slot.window(), &existing, Some(slot.id))?;
    }

    db::pickup_slots::set_active(pool, store_id, slot_id, is_active)
        .await
        .map_err(db::internal)?
        .ok_or_else(|| AppError::new(ErrorCode::SlotNotFound))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(id: i64, day: i32, start: &str, end: &str, active: bool) -> PickupSlot {
        PickupSlot {
            id,
            store_id: 1,
            day_of_week: day,
            start_time: start.into(),
            end_time: end.into(),
            is_active: active,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_parse_time_strict() {
        assert_eq!(parse_time("00:00").unwrap(), 0);
        assert_eq!(parse_time("09:30").unwrap(), 570);
        assert_eq!(parse_time("23:59").unwrap(), 1439);
        assert!(parse_time("24:00").is_err());
        assert!(parse_time("12:60").is_err());
        assert!(parse_time("9:30").is_err());
        assert!(parse_time("09-30").is_err());
        assert!(parse_time("0930").is_err());
    }

    #[test]
    fn test_touching_windows_do_not_overlap() {
        // 09:00-12:00 and 12:00-15:00
        assert!(!windows_overlap(540, 720, 720, 900));
        assert!(!windows_overlap(720, 900, 540, 720));
    }

    #[test]
    fn test_overlapping_windows() {
        // 09:00-12:00 vs 11:00-13:00
        assert!(windows_overlap(540, 720, 660, 780));
        // containment
        assert!(windows_overlap(540, 900, 600, 660));
        // identical
        assert!(windows_overlap(540, 720, 540, 720));
    }

    #[test]
    fn test_validate_window_rules() {
        let bad_day = PickupSlotCreate {
            day_of_week: 7,
            start_time: "09:00".into(),
            end_time: "12:00".into(),
        };
        assert_eq!(
            validate_window(&bad_day).unwrap_err().code,
            ErrorCode::InvalidDayOfWeek
        );

        let inverted = PickupSlotCreate {
            day_of_week: 1,
            start_time: "12:00".into(),
            end_time: "12:00".into(),
        };
        assert_eq!(
            validate_window(&inverted).unwrap_err().code,
            ErrorCode::InvalidTimeWindow
        );
    }

    #[test]
    fn test_check_no_overlap_names_the_colliding_slot() {
        let existing = vec![slot(1, 1, "09:00", "12:00", true)];
        // back-to-back is fine
        assert!(check_no_overlap(720, 900, "12:00-15:00", &existing, None).is_ok());
        // 11:00-13:00 collides with 09:00-12:00
        let err = check_no_overlap(660, 780, "11:00-13:00", &existing, None).unwrap_err();
        assert_eq!(err.code, ErrorCode::SlotOverlap);
        assert!(err.message.contains("09:00-12:00"));
        assert!(err.message.contains("11:00-13:00"));
    }

    #[test]
    fn test_reactivation_skips_itself() {
        let existing = vec![slot(5, 1, "09:00", "12:00", true)];
        assert!(check_no_overlap(540, 720, "09:00-12:00", &existing, Some(5)).is_ok());
        assert!(check_no_overlap(540, 720, "09:00-12:00", &existing, None).is_err());
    }
}
