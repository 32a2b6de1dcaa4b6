//! Guided-breathing session engine.
//!
//! The engine is a plain state machine. It owns no timer: the host calls
//! `tick()` once per second while the session is active, which keeps the
//! logic testable without real time passing.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --start--> Active <--pause/resume--> Paused
//! Active --countdown hits zero--> Finished
//! any --reset--> Idle
//! ```
//!
//! Within `Active` the phase cycles Inhale(4) -> Hold(7) -> Exhale(8) ->
//! Pause(3) -> Inhale ... The session countdown always wins over a phase
//! boundary falling on the same tick.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = BreathingEngine::new();
//! engine.start(60)?;
//! // Once per second:
//! if let Some(event) = engine.tick() { /* render */ }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::phase::BreathPhase;
use crate::error::ValidationError;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Idle,
    Active,
    Paused,
    Finished,
}

/// One breathing session at a time; starting again replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreathingEngine {
    state: SessionState,
    phase: BreathPhase,
    phase_elapsed_secs: u32,
    remaining_secs: u32,
    total_secs: u32,
    #[serde(default)]
    completed_cycles: u32,
}

impl BreathingEngine {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            phase: BreathPhase::Inhale,
            phase_elapsed_secs: 0,
            remaining_secs: 0,
            total_secs: 0,
            completed_cycles: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    /// Current phase; `None` while idle.
    pub fn phase(&self) -> Option<BreathPhase> {
        match self.state {
            SessionState::Idle => None,
            _ => Some(self.phase),
        }
    }

    pub fn phase_elapsed_secs(&self) -> u32 {
        self.phase_elapsed_secs
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn total_secs(&self) -> u32 {
        self.total_secs
    }

    /// Full Inhale..Pause cycles completed in this session.
    pub fn completed_cycles(&self) -> u32 {
        self.completed_cycles
    }

    /// The "n of N" value shown next to the prompt, 1-based.
    pub fn phase_counter(&self) -> Option<(u32, u32)> {
        let phase = self.phase()?;
        let total = phase.duration_secs();
        Some(((self.phase_elapsed_secs + 1).min(total), total))
    }

    /// 0.0 .. 1.0 progress across the whole session.
    pub fn session_progress(&self) -> f64 {
        if self.total_secs == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_secs as f64 / self.total_secs as f64)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        let phase = self.phase();
        Event::StateSnapshot {
            state: self.state,
            phase,
            phase_elapsed_secs: self.phase_elapsed_secs,
            phase_duration_secs: phase.map(BreathPhase::duration_secs).unwrap_or(0),
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs,
            completed_cycles: self.completed_cycles,
            progress: self.session_progress(),
            prompt: phase.map(|p| p.prompt().to_string()),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a new session of `total_secs`, replacing any current one.
    ///
    /// # Errors
    /// Returns an error when `total_secs` is zero; the engine is left as it was.
    pub fn start(&mut self, total_secs: u32) -> Result<Event, ValidationError> {
        if total_secs == 0 {
            return Err(ValidationError::invalid(
                "breathing.total_secs",
                "session duration must be positive",
            ));
        }
        *self = Self {
            state: SessionState::Active,
            phase: BreathPhase::Inhale,
            phase_elapsed_secs: 0,
            remaining_secs: total_secs,
            total_secs,
            completed_cycles: 0,
        };
        debug!(total_secs, "breathing session started");
        Ok(Event::BreathingStarted {
            total_secs,
            phase: self.phase,
            at: Utc::now(),
        })
    }

    pub fn pause_session(&mut self) -> Option<Event> {
        if self.state != SessionState::Active {
            return None;
        }
        self.state = SessionState::Paused;
        debug!(phase = ?self.phase, elapsed = self.phase_elapsed_secs, "breathing paused");
        Some(Event::BreathingPaused {
            phase: self.phase,
            phase_elapsed_secs: self.phase_elapsed_secs,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Continue from the frozen phase and elapsed value.
    pub fn resume_session(&mut self) -> Option<Event> {
        if self.state != SessionState::Paused {
            return None;
        }
        self.state = SessionState::Active;
        debug!(phase = ?self.phase, elapsed = self.phase_elapsed_secs, "breathing resumed");
        Some(Event::BreathingResumed {
            phase: self.phase,
            phase_elapsed_secs: self.phase_elapsed_secs,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn reset(&mut self) -> Event {
        self.dispose();
        Event::BreathingReset { at: Utc::now() }
    }

    /// Drop the session without producing an event, e.g. when the host
    /// tears down the screen that owned it.
    pub fn dispose(&mut self) {
        *self = Self::new();
    }

    /// Advance one second. No-op unless active.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != SessionState::Active {
            return None;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        self.phase_elapsed_secs += 1;

        if self.remaining_secs == 0 {
            self.state = SessionState::Finished;
            debug!(cycles = self.completed_cycles, "breathing session finished");
            return Some(Event::BreathingFinished {
                last_phase: self.phase,
                completed_cycles: self.completed_cycles,
                at: Utc::now(),
            });
        }

        if self.phase_elapsed_secs < self.phase.duration_secs() {
            return None;
        }

        let from = self.phase;
        self.phase = from.next();
        self.phase_elapsed_secs = 0;
        if from == BreathPhase::Pause {
            self.completed_cycles += 1;
        }
        Some(Event::PhaseChanged {
            from,
            to: self.phase,
            remaining_secs: self.remaining_secs,
            completed_cycles: self.completed_cycles,
            at: Utc::now(),
        })
    }
}

impl Default for BreathingEngine {
    fn default() -> Self {
        Self::new()
    }
}
