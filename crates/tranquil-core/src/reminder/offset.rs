//! Relative reminder offsets and their descriptor form.
//!
//! A task stores its reminder as a descriptor string `"<amount>_<unit>"`,
//! e.g. `"10_minutes"`, `"1_hour"` or `"2_days"`. Both singular and plural
//! unit spellings are accepted when parsing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

const MILLIS_PER_MINUTE: i64 = 60_000;
const MILLIS_PER_HOUR: i64 = 3_600_000;
const MILLIS_PER_DAY: i64 = 86_400_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderUnit {
    Minutes,
    Hours,
    Days,
}

impl ReminderUnit {
    /// Fixed multiplier; no calendar awareness.
    pub fn millis_per_unit(self) -> i64 {
        match self {
            ReminderUnit::Minutes => MILLIS_PER_MINUTE,
            ReminderUnit::Hours => MILLIS_PER_HOUR,
            ReminderUnit::Days => MILLIS_PER_DAY,
        }
    }

    fn singular(self) -> &'static str {
        match self {
            ReminderUnit::Minutes => "minute",
            ReminderUnit::Hours => "hour",
            ReminderUnit::Days => "day",
        }
    }

    fn plural(self) -> &'static str {
        match self {
            ReminderUnit::Minutes => "minutes",
            ReminderUnit::Hours => "hours",
            ReminderUnit::Days => "days",
        }
    }

    fn label(self, amount: u32) -> &'static str {
        if amount == 1 {
            self.singular()
        } else {
            self.plural()
        }
    }
}

impl FromStr for ReminderUnit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minute" | "minutes" | "min" | "m" => Ok(ReminderUnit::Minutes),
            "hour" | "hours" | "h" => Ok(ReminderUnit::Hours),
            "day" | "days" | "d" => Ok(ReminderUnit::Days),
            other => Err(ValidationError::invalid(
                "reminder.unit",
                format!("unknown unit '{other}' (expected minutes, hours or days)"),
            )),
        }
    }
}

impl fmt::Display for ReminderUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plural())
    }
}

/// A positive amount of minutes, hours or days before a due date.
///
/// Immutable once built. Serializes as its descriptor string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReminderOffset {
    amount: u32,
    unit: ReminderUnit,
}

impl ReminderOffset {
    /// # Errors
    /// Returns an error when `amount` is zero.
    pub fn new(amount: u32, unit: ReminderUnit) -> Result<Self, ValidationError> {
        if amount == 0 {
            return Err(ValidationError::invalid(
                "reminder.amount",
                "must be a positive integer",
            ));
        }
        Ok(Self { amount, unit })
    }

    pub fn minutes(amount: u32) -> Result<Self, ValidationError> {
        Self::new(amount, ReminderUnit::Minutes)
    }

    pub fn hours(amount: u32) -> Result<Self, ValidationError> {
        Self::new(amount, ReminderUnit::Hours)
    }

    pub fn days(amount: u32) -> Result<Self, ValidationError> {
        Self::new(amount, ReminderUnit::Days)
    }

    pub fn amount(&self) -> u32 {
        self.amount
    }

    pub fn unit(&self) -> ReminderUnit {
        self.unit
    }

    /// Offset as a flat millisecond delta.
    pub fn offset_in_millis(&self) -> i64 {
        i64::from(self.amount) * self.unit.millis_per_unit()
    }

    /// Human label, e.g. "30 minutes before".
    pub fn label(&self) -> String {
        format!("{} {} before", self.amount, self.unit.label(self.amount))
    }

    /// Parse a descriptor, treating an unknown unit as minutes.
    ///
    /// The amount must still be a positive integer. A warning is logged
    /// whenever the fallback kicks in.
    pub fn parse_lenient(s: &str) -> Result<Self, ValidationError> {
        let (amount, unit) = split_descriptor(s)?;
        match unit.parse::<ReminderUnit>() {
            Ok(unit) => Self::new(amount, unit),
            Err(_) => {
                tracing::warn!(
                    descriptor = s,
                    unit,
                    "unrecognized reminder unit, falling back to minutes"
                );
                Self::new(amount, ReminderUnit::Minutes)
            }
        }
    }
}

fn split_descriptor(s: &str) -> Result<(u32, &str), ValidationError> {
    let (amount, unit) = s.trim().split_once('_').ok_or_else(|| {
        ValidationError::invalid(
            "reminder",
            format!("expected '<amount>_<unit>', got '{s}'"),
        )
    })?;
    let amount = amount.parse::<u32>().map_err(|_| {
        ValidationError::invalid(
            "reminder.amount",
            format!("'{amount}' is not a positive integer"),
        )
    })?;
    Ok((amount, unit))
}

impl FromStr for ReminderOffset {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (amount, unit) = split_descriptor(s)?;
        Self::new(amount, unit.parse()?)
    }
}

impl fmt::Display for ReminderOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.amount, self.unit.label(self.amount))
    }
}

impl Serialize for ReminderOffset {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ReminderOffset {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One of the reminder choices offered next to the custom entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ReminderPreset {
    pub id: &'static str,
    pub offset: ReminderOffset,
}

impl ReminderPreset {
    pub const ALL: [ReminderPreset; 4] = [
        ReminderPreset {
            id: "1",
            offset: ReminderOffset {
                amount: 10,
                unit: ReminderUnit::Minutes,
            },
        },
        ReminderPreset {
            id: "2",
            offset: ReminderOffset {
                amount: 30,
                unit: ReminderUnit::Minutes,
            },
        },
        ReminderPreset {
            id: "3",
            offset: ReminderOffset {
                amount: 1,
                unit: ReminderUnit::Hours,
            },
        },
        ReminderPreset {
            id: "4",
            offset: ReminderOffset {
                amount: 1,
                unit: ReminderUnit::Days,
            },
        },
    ];

    pub fn by_id(id: &str) -> Option<ReminderPreset> {
        Self::ALL.iter().copied().find(|p| p.id == id)
    }

    pub fn label(&self) -> String {
        self.offset.label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_match_fixed_multipliers() {
        assert_eq!(ReminderOffset::days(1).unwrap().offset_in_millis(), 86_400_000);
        assert_eq!(ReminderOffset::minutes(30).unwrap().offset_in_millis(), 1_800_000);
        assert_eq!(ReminderOffset::hours(2).unwrap().offset_in_millis(), 7_200_000);
    }

    #[test]
    fn zero_amount_rejected() {
        assert!(ReminderOffset::minutes(0).is_err());
        assert!("0_minutes".parse::<ReminderOffset>().is_err());
    }

    #[test]
    fn parses_singular_and_plural() {
        let one_hour: ReminderOffset = "1_hour".parse().unwrap();
        assert_eq!(one_hour, ReminderOffset::hours(1).unwrap());
        let two_days: ReminderOffset = "2_days".parse().unwrap();
        assert_eq!(two_days, ReminderOffset::days(2).unwrap());
    }

    #[test]
    fn strict_parse_rejects_unknown_unit() {
        let err = "5_weeks".parse::<ReminderOffset>().unwrap_err();
        assert!(err.to_string().contains("unknown unit"));
    }

    #[test]
    fn lenient_parse_falls_back_to_minutes() {
        let offset = ReminderOffset::parse_lenient("5_fortnights").unwrap();
        assert_eq!(offset.unit(), ReminderUnit::Minutes);
        assert_eq!(offset.amount(), 5);
        assert!(ReminderOffset::parse_lenient("x_minutes").is_err());
    }

    #[test]
    fn display_is_canonical_descriptor() {
        assert_eq!(ReminderOffset::hours(1).unwrap().to_string(), "1_hour");
        assert_eq!(ReminderOffset::minutes(10).unwrap().to_string(), "10_minutes");
    }

    #[test]
    fn serializes_as_descriptor() {
        let json = serde_json::to_string(&ReminderOffset::days(3).unwrap()).unwrap();
        assert_eq!(json, "\"3_days\"");
        let back: ReminderOffset = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ReminderOffset::days(3).unwrap());
    }

    #[test]
    fn presets_have_labels() {
        let labels: Vec<String> = ReminderPreset::ALL.iter().map(|p| p.label()).collect();
        assert_eq!(
            labels,
            vec![
                "10 minutes before",
                "30 minutes before",
                "1 hour before",
                "1 day before"
            ]
        );
        assert_eq!(ReminderPreset::by_id("3").unwrap().offset.to_string(), "1_hour");
        assert!(ReminderPreset::by_id("9").is_none());
    }
}
