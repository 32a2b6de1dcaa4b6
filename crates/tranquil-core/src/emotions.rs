//! Emotion check-ins.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, ValidationError};
use crate::storage::{keys, Store};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Sad,
    Angry,
    Excited,
    Calm,
    Worried,
    Tired,
    Confused,
}

impl Emotion {
    pub const ALL: [Emotion; 8] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Excited,
        Emotion::Calm,
        Emotion::Worried,
        Emotion::Tired,
        Emotion::Confused,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Excited => "excited",
            Emotion::Calm => "calm",
            Emotion::Worried => "worried",
            Emotion::Tired => "tired",
            Emotion::Confused => "confused",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Emotion::Happy => "Happy",
            Emotion::Sad => "Sad",
            Emotion::Angry => "Angry",
            Emotion::Excited => "Excited",
            Emotion::Calm => "Calm",
            Emotion::Worried => "Worried",
            Emotion::Tired => "Tired",
            Emotion::Confused => "Confused",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Emotion::Happy => "😊",
            Emotion::Sad => "😢",
            Emotion::Angry => "😠",
            Emotion::Excited => "🤩",
            Emotion::Calm => "😌",
            Emotion::Worried => "😰",
            Emotion::Tired => "😴",
            Emotion::Confused => "🤔",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Emotion::Happy => "#4CAF50",
            Emotion::Sad => "#2196F3",
            Emotion::Angry => "#F44336",
            Emotion::Excited => "#FF9800",
            Emotion::Calm => "#9C27B0",
            Emotion::Worried => "#607D8B",
            Emotion::Tired => "#795548",
            Emotion::Confused => "#FFC107",
        }
    }
}

impl FromStr for Emotion {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Emotion::ALL
            .iter()
            .copied()
            .find(|e| e.id() == needle)
            .ok_or_else(|| ValidationError::invalid("emotion", format!("unknown emotion '{s}'")))
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionEntry {
    pub id: String,
    pub emotion: Emotion,
    pub emoji: String,
    /// `YYYY-MM-DD` in the offset the entry was recorded in.
    pub date: String,
    /// `HH:MM`
    pub time: String,
    /// Epoch milliseconds.
    pub timestamp: i64,
}

/// Newest entry first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmotionJournal {
    entries: Vec<EmotionEntry>,
}

impl EmotionJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(store: &Store) -> Result<Self> {
        let entries = store.load_json(keys::EMOTION_HISTORY)?.unwrap_or_default();
        Ok(Self { entries })
    }

    pub fn save(&self, store: &Store) -> Result<()> {
        store.save_json(keys::EMOTION_HISTORY, &self.entries)
    }

    pub fn record<Tz: TimeZone>(&mut self, emotion: Emotion, at: DateTime<Tz>) -> &EmotionEntry
    where
        Tz::Offset: fmt::Display,
    {
        let entry = EmotionEntry {
            id: Uuid::new_v4().to_string(),
            emotion,
            emoji: emotion.icon().to_string(),
            date: at.format("%Y-%m-%d").to_string(),
            time: at.format("%H:%M").to_string(),
            timestamp: at.timestamp_millis(),
        };
        self.entries.insert(0, entry);
        &self.entries[0]
    }

    pub fn list(&self) -> &[EmotionEntry] {
        &self.entries
    }

    pub fn entries_for_date(&self, date: &str) -> Vec<&EmotionEntry> {
        self.entries.iter().filter(|e| e.date == date).collect()
    }

    /// How often each emotion was recorded, optionally for one date.
    pub fn counts(&self, date: Option<&str>) -> BTreeMap<Emotion, usize> {
        let mut counts = BTreeMap::new();
        for entry in self
            .entries
            .iter()
            .filter(|e| date.map_or(true, |d| e.date == d))
        {
            *counts.entry(entry.emotion).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn parses_ids_case_insensitively() {
        assert_eq!("Calm".parse::<Emotion>().unwrap(), Emotion::Calm);
        assert!("bored".parse::<Emotion>().is_err());
    }

    #[test]
    fn record_prepends_and_formats() {
        let mut journal = EmotionJournal::new();
        let first = Utc.with_ymd_and_hms(2026, 2, 1, 8, 5, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2026, 2, 1, 19, 45, 0).unwrap();
        journal.record(Emotion::Tired, first);
        let entry = journal.record(Emotion::Happy, second).clone();

        assert_eq!(entry.date, "2026-02-01");
        assert_eq!(entry.time, "19:45");
        assert_eq!(entry.emoji, "😊");
        assert_eq!(journal.list()[0], entry);
        assert_eq!(journal.list()[1].emotion, Emotion::Tired);
    }

    #[test]
    fn filters_and_counts_by_date() {
        let mut journal = EmotionJournal::new();
        let day1 = Utc.with_ymd_and_hms(2026, 2, 1, 9, 0, 0).unwrap();
        let day2 = Utc.with_ymd_and_hms(2026, 2, 2, 9, 0, 0).unwrap();
        journal.record(Emotion::Calm, day1);
        journal.record(Emotion::Calm, day2);
        journal.record(Emotion::Worried, day2);

        assert_eq!(journal.entries_for_date("2026-02-02").len(), 2);
        let all = journal.counts(None);
        assert_eq!(all[&Emotion::Calm], 2);
        let day = journal.counts(Some("2026-02-01"));
        assert_eq!(day.len(), 1);
    }

    #[test]
    fn persists_through_store() {
        let store = Store::open_memory().unwrap();
        let mut journal = EmotionJournal::new();
        journal.record(Emotion::Excited, Utc::now());
        journal.save(&store).unwrap();
        assert_eq!(EmotionJournal::load(&store).unwrap(), journal);
    }
}
