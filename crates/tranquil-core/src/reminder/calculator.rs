//! Fire-time computation for task reminders.
//!
//! All arithmetic is a flat millisecond subtraction from the due instant.
//! There is no DST or month-length adjustment: "1 day before" is always
//! exactly 86 400 000 ms before.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::offset::ReminderOffset;

/// Absolute fire time, in epoch milliseconds, for a reminder.
///
/// The result may lie in the past relative to "now"; see [`plan_reminder`].
pub fn compute_fire_time(due_at_ms: i64, offset: ReminderOffset) -> i64 {
    due_at_ms.saturating_sub(offset.offset_in_millis())
}

/// Same as [`compute_fire_time`] over chrono instants.
///
/// Saturates at `DateTime::<Utc>::MIN_UTC` when the subtraction leaves
/// chrono's representable range.
pub fn compute_fire_datetime(due_at: DateTime<Utc>, offset: ReminderOffset) -> DateTime<Utc> {
    let at_ms = compute_fire_time(due_at.timestamp_millis(), offset);
    DateTime::from_timestamp_millis(at_ms).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// What a notification scheduler should do with a computed fire time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReminderPlan {
    /// Schedule at this epoch millisecond.
    FireAt { at_ms: i64 },
    /// The fire time is not in the future; notify right away.
    FireImmediately { overdue_ms: i64 },
}

impl ReminderPlan {
    pub fn is_immediate(&self) -> bool {
        matches!(self, ReminderPlan::FireImmediately { .. })
    }
}

/// Compute the fire time and decide between scheduling and firing now.
///
/// A fire time at or before `now_ms` is not an error.
pub fn plan_reminder(due_at_ms: i64, offset: ReminderOffset, now_ms: i64) -> ReminderPlan {
    let at_ms = compute_fire_time(due_at_ms, offset);
    if at_ms <= now_ms {
        ReminderPlan::FireImmediately {
            overdue_ms: now_ms.saturating_sub(at_ms),
        }
    } else {
        ReminderPlan::FireAt { at_ms }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    use crate::reminder::ReminderUnit;

    #[test]
    fn subtracts_offset_from_due() {
        let due = 1_700_000_000_000;
        let offset = ReminderOffset::minutes(30).unwrap();
        assert_eq!(compute_fire_time(due, offset), due - 1_800_000);
    }

    #[test]
    fn same_inputs_same_output() {
        let offset = ReminderOffset::hours(2).unwrap();
        let a = compute_fire_time(42_000_000, offset);
        let b = compute_fire_time(42_000_000, offset);
        assert_eq!(a, b);
    }

    #[test]
    fn datetime_variant_is_flat() {
        // Crosses a DST boundary in most zones; still a flat 24h.
        let due = Utc.with_ymd_and_hms(2026, 3, 29, 9, 0, 0).unwrap();
        let fire = compute_fire_datetime(due, ReminderOffset::days(1).unwrap());
        assert_eq!(fire, Utc.with_ymd_and_hms(2026, 3, 28, 9, 0, 0).unwrap());
        assert_eq!(
            fire.timestamp_millis(),
            compute_fire_time(due.timestamp_millis(), ReminderOffset::days(1).unwrap())
        );
    }

    #[test]
    fn datetime_variant_saturates_on_huge_offset() {
        let due = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let offset: ReminderOffset = "4294967295_days".parse().unwrap();
        assert_eq!(compute_fire_datetime(due, offset), DateTime::<Utc>::MIN_UTC);

        let plan = plan_reminder(due.timestamp_millis(), offset, due.timestamp_millis());
        assert!(plan.is_immediate());
    }

    #[test]
    fn past_fire_time_fires_immediately() {
        let now = 10_000_000;
        let due = now + 60_000;
        let plan = plan_reminder(due, ReminderOffset::minutes(10).unwrap(), now);
        assert_eq!(plan, ReminderPlan::FireImmediately { overdue_ms: 540_000 });
        assert!(plan.is_immediate());
    }

    #[test]
    fn fire_time_equal_to_now_fires_immediately() {
        let plan = plan_reminder(600_000, ReminderOffset::minutes(10).unwrap(), 0);
        assert_eq!(plan, ReminderPlan::FireImmediately { overdue_ms: 0 });
    }

    #[test]
    fn future_fire_time_is_scheduled() {
        let now = 0;
        let due = 2 * 86_400_000;
        let plan = plan_reminder(due, ReminderOffset::days(1).unwrap(), now);
        assert_eq!(plan, ReminderPlan::FireAt { at_ms: 86_400_000 });
    }

    fn unit_strategy() -> impl Strategy<Value = ReminderUnit> {
        prop_oneof![
            Just(ReminderUnit::Minutes),
            Just(ReminderUnit::Hours),
            Just(ReminderUnit::Days),
        ]
    }

    proptest! {
        #[test]
        fn fire_time_is_exact_subtraction(
            due in -4_000_000_000_000i64..4_000_000_000_000i64,
            amount in 1u32..100_000,
            unit in unit_strategy(),
        ) {
            let offset = ReminderOffset::new(amount, unit).unwrap();
            let expected = due - i64::from(amount) * unit.millis_per_unit();
            prop_assert_eq!(compute_fire_time(due, offset), expected);
        }
    }
}
