use chrono::Local;
use clap::Subcommand;
use serde::Serialize;
use tranquil_core::{Emotion, EmotionJournal, Store};

use super::{print_json, CmdResult};

#[derive(Subcommand)]
pub enum EmotionAction {
    /// Show the emotions that can be recorded
    Catalog,
    /// Record how you feel right now
    Log {
        /// happy, sad, angry, excited, calm, worried, tired or confused
        emotion: String,
    },
    /// List check-ins, newest first
    List {
        /// Only this date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },
    /// Count check-ins per emotion
    Summary {
        /// Only this date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },
}

#[derive(Serialize)]
struct CatalogEntry {
    id: &'static str,
    name: &'static str,
    icon: &'static str,
    color: &'static str,
}

pub fn run(action: EmotionAction) -> CmdResult {
    let store = Store::open()?;
    let mut journal = EmotionJournal::load(&store)?;

    match action {
        EmotionAction::Catalog => {
            let catalog: Vec<CatalogEntry> = Emotion::ALL
                .iter()
                .map(|e| CatalogEntry {
                    id: e.id(),
                    name: e.name(),
                    icon: e.icon(),
                    color: e.color(),
                })
                .collect();
            print_json(&catalog)?;
        }
        EmotionAction::Log { emotion } => {
            let emotion: Emotion = emotion.parse()?;
            let entry = journal.record(emotion, Local::now()).clone();
            journal.save(&store)?;
            print_json(&entry)?;
        }
        EmotionAction::List { date } => match date {
            Some(date) => print_json(&journal.entries_for_date(&date))?,
            None => print_json(journal.list())?,
        },
        EmotionAction::Summary { date } => {
            print_json(&journal.counts(date.as_deref()))?;
        }
    }
    Ok(())
}
