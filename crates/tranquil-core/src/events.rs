use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::breathing::{BreathPhase, SessionState};
use crate::countdown::CountdownState;
use crate::reminder::ReminderPlan;

/// Every state change in the system produces an Event.
/// Hosts render them or forward them to a notification layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    BreathingStarted {
        total_secs: u32,
        phase: BreathPhase,
        at: DateTime<Utc>,
    },
    BreathingPaused {
        phase: BreathPhase,
        phase_elapsed_secs: u32,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    BreathingResumed {
        phase: BreathPhase,
        phase_elapsed_secs: u32,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    PhaseChanged {
        from: BreathPhase,
        to: BreathPhase,
        remaining_secs: u32,
        completed_cycles: u32,
        at: DateTime<Utc>,
    },
    /// Session countdown reached zero.
    BreathingFinished {
        last_phase: BreathPhase,
        completed_cycles: u32,
        at: DateTime<Utc>,
    },
    BreathingReset {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: SessionState,
        phase: Option<BreathPhase>,
        phase_elapsed_secs: u32,
        phase_duration_secs: u32,
        remaining_secs: u32,
        total_secs: u32,
        completed_cycles: u32,
        /// 0.0 .. 1.0 across the whole session.
        progress: f64,
        prompt: Option<String>,
        at: DateTime<Utc>,
    },
    CountdownStarted {
        total_secs: u32,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    CountdownPaused {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    CountdownFinished {
        total_secs: u32,
        at: DateTime<Utc>,
    },
    CountdownReset {
        at: DateTime<Utc>,
    },
    CountdownSnapshot {
        state: CountdownState,
        remaining_secs: u32,
        total_secs: u32,
        clock: String,
        at: DateTime<Utc>,
    },
    GuideStepChanged {
        guide_id: String,
        step_number: usize,
        step_count: usize,
        progress: f64,
        completed: bool,
        at: DateTime<Utc>,
    },
    ReminderPlanned {
        task_id: String,
        offset: String,
        plan: ReminderPlan,
        at: DateTime<Utc>,
    },
}
