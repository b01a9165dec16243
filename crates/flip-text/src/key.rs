//! Identity of character units across renders.
//!
//! When the text changes, units are matched by key: a key present before and
//! after is the same unit, a key that vanished is removed and a new key is
//! inserted. Keys are derived from the unit's text, never from its position, so
//! a different character at the same index is a removal plus an insertion.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FlipError;

/// How repeated characters are told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyPolicy {
    /// Key by `(text, n)` where `n` counts earlier units with the same text.
    /// Every unit gets a distinct key.
    #[default]
    ByOccurrence,
    /// Key by text alone. Units with equal text share a key, and so share a
    /// single transition.
    ByValue,
}

impl KeyPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ByOccurrence => "by_occurrence",
            Self::ByValue => "by_value",
        }
    }
}

impl fmt::Display for KeyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KeyPolicy {
    type Err = FlipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "by_occurrence" | "occurrence" => Ok(Self::ByOccurrence),
            "by_value" | "value" => Ok(Self::ByValue),
            _ => Err(FlipError::UnknownKeyPolicy(s.to_string())),
        }
    }
}

/// Key of one character unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitKey {
    pub text: String,
    /// Always 0 under [`KeyPolicy::ByValue`].
    pub occurrence: usize,
}

impl UnitKey {
    pub fn new(text: impl Into<String>, occurrence: usize) -> Self {
        Self {
            text: text.into(),
            occurrence,
        }
    }
}

impl fmt::Display for UnitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}#{}", self.text, self.occurrence)
    }
}

/// Assign a key to every unit, in order.
pub fn assign_keys<S: AsRef<str>>(units: &[S], policy: KeyPolicy) -> Vec<UnitKey> {
    match policy {
        KeyPolicy::ByValue => units.iter().map(|u| UnitKey::new(u.as_ref(), 0)).collect(),
        KeyPolicy::ByOccurrence => {
            let mut seen: HashMap<&str, usize> = HashMap::new();
            units
                .iter()
                .map(|u| {
                    let text = u.as_ref();
                    let count = seen.entry(text).or_insert(0);
                    let key = UnitKey::new(text, *count);
                    *count += 1;
                    key
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occurrence_keys_are_unique() {
        let keys = assign_keys(&["H", "e", "l", "l", "o"], KeyPolicy::ByOccurrence);
        assert_eq!(
            keys,
            vec![
                UnitKey::new("H", 0),
                UnitKey::new("e", 0),
                UnitKey::new("l", 0),
                UnitKey::new("l", 1),
                UnitKey::new("o", 0),
            ]
        );
    }

    #[test]
    fn test_value_keys_collide_on_repeats() {
        let keys = assign_keys(&["a", "a"], KeyPolicy::ByValue);
        assert_eq!(keys[0], keys[1]);
    }

    #[test]
    fn test_display_shows_text_and_occurrence() {
        assert_eq!(UnitKey::new("l", 1).to_string(), "\"l\"#1");
    }

    #[test]
    fn test_policy_names_parse() {
        assert_eq!("by_value".parse::<KeyPolicy>().unwrap(), KeyPolicy::ByValue);
        assert_eq!(
            "By-Occurrence".parse::<KeyPolicy>().unwrap(),
            KeyPolicy::ByOccurrence
        );
        assert!("by_index".parse::<KeyPolicy>().is_err());
    }
}
