//! The reminder a task remembers: a preset or a custom offset.

use serde::{Deserialize, Serialize};

use super::offset::{ReminderOffset, ReminderPreset};
use crate::error::ValidationError;

/// Id written for custom reminders.
pub const CUSTOM_REMINDER_ID: &str = "custom";

/// A preset from [`ReminderPreset::ALL`] or a custom offset.
///
/// Persisted as `{ "id", "type": "preset" | "custom", "value", "label" }`,
/// so preset "3" and a custom `"1_hour"` stay distinct after a reload even
/// though they fire at the same time. A bare descriptor string is also
/// accepted on read and treated as custom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReminderChoice {
    Preset(ReminderPreset),
    Custom(ReminderOffset),
}

impl ReminderChoice {
    /// # Errors
    /// Returns an error when `id` is not one of the preset ids.
    pub fn preset(id: &str) -> Result<Self, ValidationError> {
        ReminderPreset::by_id(id.trim())
            .map(ReminderChoice::Preset)
            .ok_or_else(|| {
                ValidationError::invalid("reminder.id", format!("unknown reminder preset '{id}'"))
            })
    }

    pub fn id(&self) -> &'static str {
        match self {
            ReminderChoice::Preset(preset) => preset.id,
            ReminderChoice::Custom(_) => CUSTOM_REMINDER_ID,
        }
    }

    /// The offset handed to the fire-time calculator.
    pub fn offset(&self) -> ReminderOffset {
        match self {
            ReminderChoice::Preset(preset) => preset.offset,
            ReminderChoice::Custom(offset) => *offset,
        }
    }

    pub fn label(&self) -> String {
        self.offset().label()
    }

    pub fn is_preset(&self) -> bool {
        matches!(self, ReminderChoice::Preset(_))
    }

    fn kind(&self) -> ChoiceKind {
        match self {
            ReminderChoice::Preset(_) => ChoiceKind::Preset,
            ReminderChoice::Custom(_) => ChoiceKind::Custom,
        }
    }
}

impl From<ReminderPreset> for ReminderChoice {
    fn from(preset: ReminderPreset) -> Self {
        ReminderChoice::Preset(preset)
    }
}

impl From<ReminderOffset> for ReminderChoice {
    fn from(offset: ReminderOffset) -> Self {
        ReminderChoice::Custom(offset)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ChoiceKind {
    Preset,
    Custom,
}

#[derive(Serialize)]
struct ChoiceRecord {
    id: &'static str,
    #[serde(rename = "type")]
    kind: ChoiceKind,
    value: ReminderOffset,
    label: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredChoice {
    Record {
        #[serde(default)]
        id: String,
        #[serde(rename = "type")]
        kind: ChoiceKind,
        value: ReminderOffset,
    },
    Descriptor(ReminderOffset),
}

impl Serialize for ReminderChoice {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ChoiceRecord {
            id: self.id(),
            kind: self.kind(),
            value: self.offset(),
            label: self.label(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ReminderChoice {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match StoredChoice::deserialize(deserializer)? {
            // The preset table is authoritative for a preset's offset.
            StoredChoice::Record {
                id,
                kind: ChoiceKind::Preset,
                ..
            } => ReminderChoice::preset(&id).map_err(serde::de::Error::custom),
            StoredChoice::Record {
                kind: ChoiceKind::Custom,
                value,
                ..
            } => Ok(ReminderChoice::Custom(value)),
            StoredChoice::Descriptor(offset) => Ok(ReminderChoice::Custom(offset)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_and_custom_with_same_offset_differ() {
        let preset = ReminderChoice::preset("3").unwrap();
        let custom = ReminderChoice::Custom(ReminderOffset::hours(1).unwrap());
        assert_eq!(preset.offset(), custom.offset());
        assert_ne!(preset, custom);
        assert!(preset.is_preset());
        assert_eq!(custom.id(), CUSTOM_REMINDER_ID);
    }

    #[test]
    fn unknown_preset_id_rejected() {
        assert!(ReminderChoice::preset("9").is_err());
    }

    #[test]
    fn serializes_as_record() {
        let json = serde_json::to_value(ReminderChoice::preset("2").unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "2",
                "type": "preset",
                "value": "30_minutes",
                "label": "30 minutes before",
            })
        );

        let json = serde_json::to_value(ReminderChoice::from(ReminderOffset::days(2).unwrap()))
            .unwrap();
        assert_eq!(json["type"], "custom");
        assert_eq!(json["value"], "2_days");
    }

    #[test]
    fn reads_records_and_bare_descriptors() {
        let preset: ReminderChoice =
            serde_json::from_str(r#"{"id":"4","type":"preset","value":"1_day","label":"x"}"#)
                .unwrap();
        assert_eq!(preset, ReminderChoice::preset("4").unwrap());

        let custom: ReminderChoice =
            serde_json::from_str(r#"{"id":"1718000000000","type":"custom","value":"45_minutes"}"#)
                .unwrap();
        assert_eq!(custom, ReminderChoice::Custom(ReminderOffset::minutes(45).unwrap()));

        let legacy: ReminderChoice = serde_json::from_str("\"1_hour\"").unwrap();
        assert!(!legacy.is_preset());

        let unknown = r#"{"id":"7","type":"preset","value":"1_day"}"#;
        assert!(serde_json::from_str::<ReminderChoice>(unknown).is_err());
    }
}
