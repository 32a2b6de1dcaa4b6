use std::time::Duration;

use clap::Subcommand;
use tranquil_core::storage::keys;
use tranquil_core::{BreathingEngine, Config, Event, SessionLength, Store};

use super::{print_json, CmdResult, TickReport};

#[derive(Subcommand)]
pub enum BreatheAction {
    /// Start a new session (replaces any current one)
    Start {
        /// Session length in minutes: 1, 3 or 5 (default from config)
        #[arg(long)]
        minutes: Option<u32>,
    },
    /// Freeze the current session
    Pause,
    /// Continue a paused session
    Resume,
    /// Return to idle
    Reset,
    /// Advance the session by one or more seconds
    Tick {
        #[arg(long, default_value = "1")]
        count: u32,
    },
    /// Print current session state as JSON
    Status,
    /// Start a session and drive it in real time until it finishes
    Run {
        /// Session length in minutes: 1, 3 or 5 (default from config)
        #[arg(long)]
        minutes: Option<u32>,
    },
}

fn load_engine(store: &Store) -> BreathingEngine {
    match store.load_json::<BreathingEngine>(keys::BREATHING_ENGINE) {
        Ok(Some(engine)) => engine,
        Ok(None) => BreathingEngine::new(),
        Err(e) => {
            tracing::warn!(error = %e, "discarding unreadable breathing session");
            BreathingEngine::new()
        }
    }
}

fn session_secs(minutes: Option<u32>, config: &Config) -> Result<u32, Box<dyn std::error::Error>> {
    let length = match minutes {
        Some(m) => SessionLength::from_minutes(m)?,
        None => config.session_length(),
    };
    Ok(length.secs())
}

/// Host loop: one `tick()` per second until the session leaves `Active`.
async fn drive(engine: &mut BreathingEngine) -> CmdResult {
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    // The first tick of a tokio interval completes immediately.
    interval.tick().await;
    while engine.is_active() {
        interval.tick().await;
        if let Some(event) = engine.tick() {
            print_json(&event)?;
        }
    }
    Ok(())
}

pub fn run(action: BreatheAction) -> CmdResult {
    let store = Store::open()?;
    let mut engine = load_engine(&store);

    match action {
        BreatheAction::Start { minutes } => {
            let secs = session_secs(minutes, &Config::load()?)?;
            let event = engine.start(secs)?;
            print_json(&event)?;
        }
        BreatheAction::Pause => match engine.pause_session() {
            Some(event) => print_json(&event)?,
            None => print_json(&engine.snapshot())?,
        },
        BreatheAction::Resume => match engine.resume_session() {
            Some(event) => print_json(&event)?,
            None => print_json(&engine.snapshot())?,
        },
        BreatheAction::Reset => {
            print_json(&engine.reset())?;
        }
        BreatheAction::Tick { count } => {
            let events: Vec<Event> = (0..count).filter_map(|_| engine.tick()).collect();
            print_json(&TickReport {
                events,
                state: engine.snapshot(),
            })?;
        }
        BreatheAction::Status => {
            print_json(&engine.snapshot())?;
        }
        BreatheAction::Run { minutes } => {
            let secs = session_secs(minutes, &Config::load()?)?;
            print_json(&engine.start(secs)?)?;
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(drive(&mut engine))?;
            // The session is over; nothing to resume next time.
            engine.dispose();
        }
    }

    store.save_json(keys::BREATHING_ENGINE, &engine)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_minutes_must_be_a_preset() {
        let config = Config::default();
        assert_eq!(session_secs(Some(3), &config).unwrap(), 180);
        assert!(session_secs(Some(2), &config).is_err());
        assert_eq!(session_secs(None, &config).unwrap(), 60);
    }

    #[tokio::test(start_paused = true)]
    async fn drive_runs_until_finished() {
        let mut engine = BreathingEngine::new();
        engine.start(5).unwrap();
        drive(&mut engine).await.unwrap();
        assert_eq!(engine.remaining_secs(), 0);
        assert!(!engine.is_active());
    }
}
