use clap::Subcommand;
use tranquil_core::{CardBoard, Store};

use super::{print_json, CmdResult};

#[derive(Subcommand)]
pub enum CardAction {
    /// List built-in and custom cards
    List,
    /// Add a custom card
    Add {
        text: String,
        /// Emoji or icon name
        icon: String,
    },
    /// Edit a custom card
    Update {
        id: String,
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        icon: Option<String>,
        /// Hex color, e.g. "#FFEB3B"
        #[arg(long)]
        background_color: Option<String>,
        /// Hex color
        #[arg(long)]
        text_color: Option<String>,
        #[arg(long)]
        font_size: Option<u32>,
    },
    /// Delete a custom card
    Delete { id: String },
}

pub fn run(action: CardAction) -> CmdResult {
    let store = Store::open()?;
    let mut board = CardBoard::load(&store)?;

    match action {
        CardAction::List => print_json(&board.list())?,
        CardAction::Add { text, icon } => {
            let card = board.add(&text, &icon)?.clone();
            board.save(&store)?;
            print_json(&card)?;
        }
        CardAction::Update {
            id,
            text,
            icon,
            background_color,
            text_color,
            font_size,
        } => {
            let mut card = board
                .get(&id)
                .ok_or_else(|| format!("Card not found: {id}"))?;
            if let Some(text) = text {
                card.text = text;
            }
            if let Some(icon) = icon {
                card.icon = icon;
            }
            if background_color.is_some() {
                card.background_color = background_color;
            }
            if text_color.is_some() {
                card.text_color = text_color;
            }
            if font_size.is_some() {
                card.font_size = font_size;
            }
            let card = board.update(card)?.clone();
            board.save(&store)?;
            print_json(&card)?;
        }
        CardAction::Delete { id } => {
            let card = board.delete(&id)?;
            board.save(&store)?;
            println!("Card deleted: {}", card.id);
        }
    }
    Ok(())
}
