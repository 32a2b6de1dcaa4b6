use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One segment of the 4-7-8 breathing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreathPhase {
    Inhale,
    Hold,
    Exhale,
    Pause,
}

impl BreathPhase {
    /// Cycle order, starting with the first phase of a session.
    pub const CYCLE: [BreathPhase; 4] = [
        BreathPhase::Inhale,
        BreathPhase::Hold,
        BreathPhase::Exhale,
        BreathPhase::Pause,
    ];

    /// Fixed phase length in seconds.
    pub fn duration_secs(self) -> u32 {
        match self {
            BreathPhase::Inhale => 4,
            BreathPhase::Hold => 7,
            BreathPhase::Exhale => 8,
            BreathPhase::Pause => 3,
        }
    }

    /// Next phase in the fixed order. `Pause` wraps to `Inhale`.
    pub fn next(self) -> BreathPhase {
        match self {
            BreathPhase::Inhale => BreathPhase::Hold,
            BreathPhase::Hold => BreathPhase::Exhale,
            BreathPhase::Exhale => BreathPhase::Pause,
            BreathPhase::Pause => BreathPhase::Inhale,
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            BreathPhase::Inhale => "Breathe in slowly through your nose",
            BreathPhase::Hold => "Hold the air in your lungs",
            BreathPhase::Exhale => "Breathe out gently through your mouth, \"shhh\"",
            BreathPhase::Pause => "Get ready for the next cycle",
        }
    }

    /// Length of a full cycle (22s).
    pub fn cycle_secs() -> u32 {
        Self::CYCLE.iter().map(|p| p.duration_secs()).sum()
    }
}

/// Session lengths offered to the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionLength {
    #[default]
    #[serde(rename = "1")]
    OneMinute,
    #[serde(rename = "3")]
    ThreeMinutes,
    #[serde(rename = "5")]
    FiveMinutes,
}

impl SessionLength {
    pub const ALL: [SessionLength; 3] = [
        SessionLength::OneMinute,
        SessionLength::ThreeMinutes,
        SessionLength::FiveMinutes,
    ];

    pub fn minutes(self) -> u32 {
        match self {
            SessionLength::OneMinute => 1,
            SessionLength::ThreeMinutes => 3,
            SessionLength::FiveMinutes => 5,
        }
    }

    pub fn secs(self) -> u32 {
        self.minutes() * 60
    }

    /// # Errors
    /// Returns an error for anything other than 1, 3 or 5.
    pub fn from_minutes(minutes: u32) -> Result<Self, ValidationError> {
        Self::ALL
            .iter()
            .copied()
            .find(|l| l.minutes() == minutes)
            .ok_or_else(|| {
                ValidationError::invalid(
                    "breathing.session_minutes",
                    format!("{minutes} is not one of 1, 3 or 5"),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_are_4_7_8_3() {
        let d: Vec<u32> = BreathPhase::CYCLE.iter().map(|p| p.duration_secs()).collect();
        assert_eq!(d, vec![4, 7, 8, 3]);
        assert_eq!(BreathPhase::cycle_secs(), 22);
    }

    #[test]
    fn next_wraps_around() {
        let mut phase = BreathPhase::Inhale;
        for expected in [
            BreathPhase::Hold,
            BreathPhase::Exhale,
            BreathPhase::Pause,
            BreathPhase::Inhale,
        ] {
            phase = phase.next();
            assert_eq!(phase, expected);
        }
    }

    #[test]
    fn session_length_presets() {
        assert_eq!(SessionLength::from_minutes(3).unwrap().secs(), 180);
        assert!(SessionLength::from_minutes(2).is_err());
        assert_eq!(SessionLength::default().secs(), 60);
    }
}
