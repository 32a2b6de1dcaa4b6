use clap::Subcommand;
use tranquil_core::{Store, UserProfile};

use super::{print_json, CmdResult};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the stored profile
    Show,
    /// Set the user's name
    Set { name: String },
}

pub fn run(action: ProfileAction) -> CmdResult {
    let store = Store::open()?;
    match action {
        ProfileAction::Show => match UserProfile::load(&store)? {
            Some(profile) => print_json(&profile)?,
            None => println!("null"),
        },
        ProfileAction::Set { name } => {
            let profile = UserProfile::new(&name)?;
            profile.save(&store)?;
            print_json(&profile)?;
        }
    }
    Ok(())
}
