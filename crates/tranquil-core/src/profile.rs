use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::storage::{keys, Store};

/// The person using the app, as entered during onboarding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
}

impl UserProfile {
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::Empty("name".into()));
        }
        Ok(Self {
            name: name.to_string(),
        })
    }

    /// `None` until onboarding has stored a profile.
    pub fn load(store: &Store) -> Result<Option<Self>> {
        store.load_json(keys::USER)
    }

    pub fn save(&self, store: &Store) -> Result<()> {
        store.save_json(keys::USER, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_rejected() {
        assert!(UserProfile::new("  ").is_err());
        assert_eq!(UserProfile::new(" Sam ").unwrap().name, "Sam");
    }

    #[test]
    fn load_before_onboarding_is_none() {
        let store = Store::open_memory().unwrap();
        assert_eq!(UserProfile::load(&store).unwrap(), None);
        UserProfile::new("Alex").unwrap().save(&store).unwrap();
        assert_eq!(UserProfile::load(&store).unwrap().unwrap().name, "Alex");
    }
}
