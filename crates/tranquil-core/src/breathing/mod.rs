//! 4-7-8 guided breathing.

mod engine;
mod phase;

pub use engine::{BreathingEngine, SessionState};
pub use phase::{BreathPhase, SessionLength};
