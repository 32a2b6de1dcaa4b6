use std::time::Duration;

use clap::Subcommand;
use tranquil_core::storage::keys;
use tranquil_core::{Config, CountdownTimer, Event, Store};

use super::{print_json, CmdResult, TickReport};

#[derive(Subcommand)]
pub enum CountdownAction {
    /// Start a new countdown, or continue a paused one
    Start {
        #[arg(long)]
        minutes: Option<u32>,
        #[arg(long)]
        seconds: Option<u32>,
    },
    /// Pause the running countdown
    Pause,
    /// Clear the countdown
    Reset,
    /// Advance by one or more seconds
    Tick {
        #[arg(long, default_value = "1")]
        count: u32,
    },
    /// Print countdown state as JSON
    Status,
    /// Start and drive the countdown in real time
    Run {
        #[arg(long)]
        minutes: Option<u32>,
        #[arg(long)]
        seconds: Option<u32>,
    },
}

fn load_timer(store: &Store) -> CountdownTimer {
    match store.load_json::<CountdownTimer>(keys::COUNTDOWN_TIMER) {
        Ok(Some(timer)) => timer,
        Ok(None) => CountdownTimer::new(),
        Err(e) => {
            tracing::warn!(error = %e, "discarding unreadable countdown");
            CountdownTimer::new()
        }
    }
}

fn start(timer: &mut CountdownTimer, minutes: Option<u32>, seconds: Option<u32>) -> CmdResult {
    let config = Config::load()?;
    let minutes = minutes.unwrap_or(config.countdown.default_minutes);
    let seconds = seconds.unwrap_or(config.countdown.default_seconds);
    match timer.start(minutes, seconds)? {
        Some(event) => print_json(&event),
        None => print_json(&timer.snapshot()),
    }
}

async fn drive(timer: &mut CountdownTimer) -> CmdResult {
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    interval.tick().await;
    while timer.state() == tranquil_core::CountdownState::Running {
        interval.tick().await;
        match timer.tick() {
            Some(event) => print_json(&event)?,
            None => eprintln!("{}", tranquil_core::format_clock(timer.remaining_secs())),
        }
    }
    Ok(())
}

pub fn run(action: CountdownAction) -> CmdResult {
    let store = Store::open()?;
    let mut timer = load_timer(&store);

    match action {
        CountdownAction::Start { minutes, seconds } => start(&mut timer, minutes, seconds)?,
        CountdownAction::Pause => match timer.pause() {
            Some(event) => print_json(&event)?,
            None => print_json(&timer.snapshot())?,
        },
        CountdownAction::Reset => print_json(&timer.reset())?,
        CountdownAction::Tick { count } => {
            let events: Vec<Event> = (0..count).filter_map(|_| timer.tick()).collect();
            print_json(&TickReport {
                events,
                state: timer.snapshot(),
            })?;
        }
        CountdownAction::Status => print_json(&timer.snapshot())?,
        CountdownAction::Run { minutes, seconds } => {
            start(&mut timer, minutes, seconds)?;
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(drive(&mut timer))?;
        }
    }

    store.save_json(keys::COUNTDOWN_TIMER, &timer)?;
    Ok(())
}
