//! # Tranquil Core Library
//!
//! Core logic for Tranquil, a calm-down companion for neurodivergent users.
//! The CLI is a thin host over this library; any other front end is expected
//! to be one too.
//!
//! ## Architecture
//!
//! - **Breathing Engine**: A 4-7-8 phase state machine that requires the
//!   caller to invoke `tick()` once per second
//! - **Countdown**: A free-form countdown with the same tick contract
//! - **Reminders**: Flat millisecond offsets subtracted from a task's due date
//! - **Guides**: Built-in pictogram guides and a clamped step navigator
//! - **Records**: Tasks, communication cards, emotion check-ins and the user
//!   profile, persisted as JSON documents in a SQLite key-value table
//!
//! ## Key Components
//!
//! - [`BreathingEngine`]: Guided-breathing state machine
//! - [`compute_fire_time`]: The single reminder fire-time calculator
//! - [`Store`]: Key-value persistence
//! - [`Config`]: Application configuration management

pub mod breathing;
pub mod cards;
pub mod countdown;
pub mod emotions;
pub mod error;
pub mod events;
pub mod guides;
pub mod profile;
pub mod reminder;
pub mod storage;
pub mod task;

pub use breathing::{BreathPhase, BreathingEngine, SessionLength, SessionState};
pub use cards::{CardBoard, CommunicationCard};
pub use countdown::{format_clock, CountdownState, CountdownTimer};
pub use emotions::{Emotion, EmotionEntry, EmotionJournal};
pub use error::{ConfigError, CoreError, DatabaseError, Result, ValidationError};
pub use events::Event;
pub use guides::{built_in_guides, find_guide, Guide, GuideNavigator, GuideStep};
pub use profile::UserProfile;
pub use reminder::{
    compute_fire_datetime, compute_fire_time, plan_reminder, ReminderChoice, ReminderOffset,
    ReminderPlan, ReminderPreset, ReminderUnit,
};
pub use storage::{Config, Store};
pub use task::{Task, TaskBook, TaskProgress, TaskUpdate};
