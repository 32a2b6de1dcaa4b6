//! Communication board (AAC-style cards).
//!
//! Eight built-in cards are always present and come first. Only the cards
//! a user adds are persisted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, Result, ValidationError};
use crate::storage::{keys, Store};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationCard {
    pub id: String,
    pub text: String,
    pub icon: String,
    #[serde(default)]
    pub is_custom: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
}

const BUILT_IN: [(&str, &str, &str); 8] = [
    ("1", "I need help", "🙋"),
    ("2", "I'm hungry", "🍽️"),
    ("3", "I feel overwhelmed", "😰"),
    ("4", "Thank you", "🙏"),
    ("5", "More please", "➕"),
    ("6", "I'm tired", "😴"),
    ("7", "I don't understand", "🤔"),
    ("8", "I feel good", "😊"),
];

pub fn built_in_cards() -> Vec<CommunicationCard> {
    BUILT_IN
        .iter()
        .map(|(id, text, icon)| CommunicationCard {
            id: (*id).to_string(),
            text: (*text).to_string(),
            icon: (*icon).to_string(),
            is_custom: false,
            background_color: None,
            text_color: None,
            font_size: None,
        })
        .collect()
}

fn is_hex_color(s: &str) -> bool {
    let Some(hex) = s.strip_prefix('#') else {
        return false;
    };
    matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
}

fn validate(card: &CommunicationCard) -> Result<(), ValidationError> {
    if card.text.trim().is_empty() {
        return Err(ValidationError::Empty("text".into()));
    }
    if card.icon.trim().is_empty() {
        return Err(ValidationError::Empty("icon".into()));
    }
    for (field, color) in [
        ("backgroundColor", &card.background_color),
        ("textColor", &card.text_color),
    ] {
        if let Some(c) = color {
            if !is_hex_color(c) {
                return Err(ValidationError::invalid(field, format!("'{c}' is not a hex color")));
            }
        }
    }
    if let Some(size) = card.font_size {
        if !(10..=64).contains(&size) {
            return Err(ValidationError::OutOfRange {
                field: "fontSize".into(),
                min: 10,
                max: 64,
                value: u64::from(size),
            });
        }
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardBoard {
    custom: Vec<CommunicationCard>,
}

impl CardBoard {
    pub fn new() -> Self {
        Self { custom: Vec::new() }
    }

    pub fn load(store: &Store) -> Result<Self> {
        let custom = store
            .load_json(keys::COMMUNICATION_CARDS)?
            .unwrap_or_default();
        Ok(Self { custom })
    }

    pub fn save(&self, store: &Store) -> Result<()> {
        store.save_json(keys::COMMUNICATION_CARDS, &self.custom)
    }

    /// Built-in cards followed by custom ones.
    pub fn list(&self) -> Vec<CommunicationCard> {
        let mut cards = built_in_cards();
        cards.extend(self.custom.iter().cloned());
        cards
    }

    pub fn custom_cards(&self) -> &[CommunicationCard] {
        &self.custom
    }

    pub fn get(&self, id: &str) -> Option<CommunicationCard> {
        self.list().into_iter().find(|c| c.id == id)
    }

    pub fn add(&mut self, text: &str, icon: &str) -> Result<&CommunicationCard> {
        let card = CommunicationCard {
            id: Uuid::new_v4().to_string(),
            text: text.trim().to_string(),
            icon: icon.trim().to_string(),
            is_custom: true,
            background_color: None,
            text_color: None,
            font_size: None,
        };
        validate(&card)?;
        self.custom.push(card);
        Ok(&self.custom[self.custom.len() - 1])
    }

    /// Replace a custom card. Built-in cards are read-only.
    pub fn update(&mut self, mut card: CommunicationCard) -> Result<&CommunicationCard> {
        let idx = self.custom_position(&card.id)?;
        card.is_custom = true;
        validate(&card)?;
        self.custom[idx] = card;
        Ok(&self.custom[idx])
    }

    pub fn delete(&mut self, id: &str) -> Result<CommunicationCard> {
        let idx = self.custom_position(id)?;
        Ok(self.custom.remove(idx))
    }

    fn custom_position(&self, id: &str) -> Result<usize> {
        if BUILT_IN.iter().any(|(builtin, _, _)| *builtin == id) {
            return Err(ValidationError::invalid("id", format!("card {id} is built in")).into());
        }
        self.custom
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| CoreError::not_found("card", id))
    }
}

impl Default for CardBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_ins_come_first() {
        let mut board = CardBoard::new();
        assert_eq!(board.list().len(), 8);
        board.add("Bathroom", "🚻").unwrap();
        let list = board.list();
        assert_eq!(list.len(), 9);
        assert_eq!(list[0].text, "I need help");
        assert!(list[8].is_custom);
    }

    #[test]
    fn built_ins_are_read_only() {
        let mut board = CardBoard::new();
        let mut card = board.get("1").unwrap();
        card.text = "Changed".into();
        assert!(board.update(card).is_err());
        assert!(board.delete("4").is_err());
    }

    #[test]
    fn update_custom_card_style() {
        let mut board = CardBoard::new();
        let mut card = board.add("Water", "💧").unwrap().clone();
        card.background_color = Some("#2196F3".into());
        card.font_size = Some(24);
        board.update(card.clone()).unwrap();
        assert_eq!(board.get(&card.id).unwrap().font_size, Some(24));

        card.text_color = Some("blue".into());
        assert!(board.update(card).is_err());
    }

    #[test]
    fn rejects_blank_text() {
        let mut board = CardBoard::new();
        assert!(board.add("  ", "🙂").is_err());
        assert!(board.custom_cards().is_empty());
    }

    #[test]
    fn only_custom_cards_are_saved() {
        let store = Store::open_memory().unwrap();
        let mut board = CardBoard::new();
        board.add("Outside", "🌳").unwrap();
        board.save(&store).unwrap();

        let raw: Vec<CommunicationCard> =
            store.load_json(keys::COMMUNICATION_CARDS).unwrap().unwrap();
        assert_eq!(raw.len(), 1);

        let loaded = CardBoard::load(&store).unwrap();
        assert_eq!(loaded.list().len(), 9);
    }

    #[test]
    fn delete_unknown_is_not_found() {
        let mut board = CardBoard::new();
        assert!(matches!(board.delete("zzz"), Err(CoreError::NotFound { .. })));
    }
}
