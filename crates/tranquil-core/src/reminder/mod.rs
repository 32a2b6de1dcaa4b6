//! Reminder offsets and the single fire-time calculator.
//!
//! Task creation and task editing both go through [`compute_fire_time`];
//! there is no other place that turns an offset into an instant.

mod calculator;
mod choice;
mod offset;

pub use calculator::{compute_fire_datetime, compute_fire_time, plan_reminder, ReminderPlan};
pub use choice::{ReminderChoice, CUSTOM_REMINDER_ID};
pub use offset::{ReminderOffset, ReminderPreset, ReminderUnit};
