pub mod breathe;
pub mod card;
pub mod config;
pub mod countdown;
pub mod emotion;
pub mod guide;
pub mod profile;
pub mod task;

use serde::Serialize;
use tranquil_core::Event;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Output of a `tick` command: what happened, then where things stand.
#[derive(Serialize)]
pub struct TickReport {
    pub events: Vec<Event>,
    pub state: Event,
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
