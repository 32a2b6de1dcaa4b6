//! Pictogram guide commands.
//!
//! The open guide and its step are kept in the store, so `next` and `prev`
//! continue where the previous invocation left off.

use clap::Subcommand;
use serde::Serialize;
use tranquil_core::storage::keys;
use tranquil_core::{built_in_guides, find_guide, Event, GuideNavigator, GuideStep, Store};

use super::{print_json, CmdResult};

#[derive(Subcommand)]
pub enum GuideAction {
    /// List the built-in guides
    List,
    /// Open a guide at its first step
    Show {
        /// Guide ID, e.g. "wash-hands"
        id: String,
    },
    /// Go to the next step of the open guide
    Next,
    /// Go to the previous step of the open guide
    Prev,
    /// Print the current step of the open guide
    Status,
}

#[derive(Serialize)]
struct GuideSummary<'a> {
    id: &'a str,
    title: &'a str,
    description: &'a str,
    icon: &'a str,
    step_count: usize,
}

#[derive(Serialize)]
struct StepView<'a> {
    guide_id: &'a str,
    title: &'a str,
    label: String,
    step_number: usize,
    step_count: usize,
    progress: f64,
    step: &'a GuideStep,
    completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    event: Option<Event>,
}

fn view(nav: &GuideNavigator, event: Option<Event>) -> StepView<'_> {
    StepView {
        guide_id: &nav.guide().id,
        title: &nav.guide().title,
        label: nav.label(),
        step_number: nav.step_number(),
        step_count: nav.step_count(),
        progress: nav.progress(),
        step: nav.current_step(),
        completed: nav.is_last(),
        event,
    }
}

fn load_navigator(store: &Store) -> Result<GuideNavigator, Box<dyn std::error::Error>> {
    store
        .load_json::<GuideNavigator>(keys::GUIDE_NAVIGATOR)?
        .ok_or_else(|| "no guide is open; run `tranquil guide show <id>` first".into())
}

pub fn run(action: GuideAction) -> CmdResult {
    match action {
        GuideAction::List => {
            let guides = built_in_guides();
            let summaries: Vec<GuideSummary<'_>> = guides
                .iter()
                .map(|g| GuideSummary {
                    id: &g.id,
                    title: &g.title,
                    description: &g.description,
                    icon: &g.icon,
                    step_count: g.steps.len(),
                })
                .collect();
            print_json(&summaries)?;
        }
        GuideAction::Show { id } => {
            let store = Store::open()?;
            let nav = GuideNavigator::open(find_guide(&id)?)?;
            store.save_json(keys::GUIDE_NAVIGATOR, &nav)?;
            print_json(&view(&nav, None))?;
        }
        GuideAction::Next | GuideAction::Prev => {
            let store = Store::open()?;
            let mut nav = load_navigator(&store)?;
            let event = match action {
                GuideAction::Next => nav.next_step(),
                _ => nav.previous_step(),
            };
            store.save_json(keys::GUIDE_NAVIGATOR, &nav)?;
            print_json(&view(&nav, event))?;
        }
        GuideAction::Status => {
            let store = Store::open()?;
            let nav = load_navigator(&store)?;
            print_json(&view(&nav, None))?;
        }
    }
    Ok(())
}
