//! Free-form countdown timer.
//!
//! Same contract as the breathing engine: no internal thread, the host
//! calls `tick()` once per second.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ValidationError;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownState {
    Idle,
    Running,
    Paused,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownTimer {
    state: CountdownState,
    total_secs: u32,
    remaining_secs: u32,
}

impl CountdownTimer {
    pub fn new() -> Self {
        Self {
            state: CountdownState::Idle,
            total_secs: 0,
            remaining_secs: 0,
        }
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn total_secs(&self) -> u32 {
        self.total_secs
    }

    pub fn snapshot(&self) -> Event {
        Event::CountdownSnapshot {
            state: self.state,
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs,
            clock: format_clock(self.remaining_secs),
            at: Utc::now(),
        }
    }

    /// Start a fresh countdown, or continue a paused one.
    ///
    /// When paused the arguments are ignored and the remaining time is kept.
    /// Returns `Ok(None)` if the timer is already running.
    ///
    /// # Errors
    /// Returns an error when a fresh countdown would total zero seconds.
    pub fn start(&mut self, minutes: u32, seconds: u32) -> Result<Option<Event>, ValidationError> {
        match self.state {
            CountdownState::Running => Ok(None),
            CountdownState::Paused => {
                self.state = CountdownState::Running;
                Ok(Some(Event::CountdownStarted {
                    total_secs: self.total_secs,
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                }))
            }
            CountdownState::Idle | CountdownState::Finished => {
                let total = minutes
                    .checked_mul(60)
                    .and_then(|m| m.checked_add(seconds))
                    .ok_or_else(|| {
                        ValidationError::invalid("countdown", "duration is too large")
                    })?;
                if total == 0 {
                    return Err(ValidationError::invalid(
                        "countdown",
                        "enter a time greater than zero",
                    ));
                }
                self.state = CountdownState::Running;
                self.total_secs = total;
                self.remaining_secs = total;
                debug!(total, "countdown started");
                Ok(Some(Event::CountdownStarted {
                    total_secs: total,
                    remaining_secs: total,
                    at: Utc::now(),
                }))
            }
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        if self.state != CountdownState::Running {
            return None;
        }
        self.state = CountdownState::Paused;
        Some(Event::CountdownPaused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn reset(&mut self) -> Event {
        *self = Self::new();
        Event::CountdownReset { at: Utc::now() }
    }

    pub fn tick(&mut self) -> Option<Event> {
        if self.state != CountdownState::Running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }
        self.state = CountdownState::Finished;
        debug!(total = self.total_secs, "countdown finished");
        Some(Event::CountdownFinished {
            total_secs: self.total_secs,
            at: Utc::now(),
        })
    }
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// `MM:SS`, minutes unbounded.
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_to_finished() {
        let mut timer = CountdownTimer::new();
        timer.start(0, 3).unwrap();
        assert!(timer.tick().is_none());
        assert!(timer.tick().is_none());
        assert!(matches!(
            timer.tick(),
            Some(Event::CountdownFinished { total_secs: 3, .. })
        ));
        assert_eq!(timer.state(), CountdownState::Finished);
        assert!(timer.tick().is_none());
    }

    #[test]
    fn zero_total_rejected() {
        let mut timer = CountdownTimer::new();
        assert!(timer.start(0, 0).is_err());
        assert_eq!(timer.state(), CountdownState::Idle);
    }

    #[test]
    fn pause_keeps_remaining_and_start_resumes() {
        let mut timer = CountdownTimer::new();
        timer.start(5, 0).unwrap();
        timer.tick();
        timer.tick();
        assert!(timer.pause().is_some());
        timer.tick();
        assert_eq!(timer.remaining_secs(), 298);

        timer.start(1, 0).unwrap();
        assert_eq!(timer.state(), CountdownState::Running);
        assert_eq!(timer.remaining_secs(), 298);
        assert_eq!(timer.total_secs(), 300);
    }

    #[test]
    fn start_while_running_is_noop() {
        let mut timer = CountdownTimer::new();
        timer.start(1, 0).unwrap();
        assert_eq!(timer.start(2, 0).unwrap(), None);
        assert_eq!(timer.total_secs(), 60);
    }

    #[test]
    fn restart_after_finish() {
        let mut timer = CountdownTimer::new();
        timer.start(0, 1).unwrap();
        timer.tick();
        timer.start(0, 10).unwrap();
        assert_eq!(timer.remaining_secs(), 10);
    }

    #[test]
    fn reset_clears() {
        let mut timer = CountdownTimer::new();
        timer.start(2, 30).unwrap();
        timer.reset();
        assert_eq!(timer, CountdownTimer::new());
    }

    #[test]
    fn clock_format() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(6000), "100:00");
    }
}
