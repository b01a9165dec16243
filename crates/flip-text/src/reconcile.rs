//! Keyed diffing between two renders.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::key::UnitKey;

/// Result of comparing two keyed child lists.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeyedDiff {
    /// Keys only in the new list, in new-list order.
    pub inserted: Vec<UnitKey>,
    /// Keys only in the old list, in old-list order.
    pub removed: Vec<UnitKey>,
    /// Keys in both lists, in new-list order.
    pub retained: Vec<UnitKey>,
}

impl KeyedDiff {
    pub fn is_empty(&self) -> bool {
        self.inserted.is_empty() && self.removed.is_empty()
    }
}

/// Diff `previous` against `current`.
///
/// Duplicate keys within one list are tracked once, at their first
/// occurrence.
pub fn diff_keys(previous: &[UnitKey], current: &[UnitKey]) -> KeyedDiff {
    let old = unique_keys(previous);
    let new = unique_keys(current);
    let old_set: HashSet<&UnitKey> = old.iter().copied().collect();
    let new_set: HashSet<&UnitKey> = new.iter().copied().collect();

    let mut diff = KeyedDiff::default();
    for key in &new {
        if old_set.contains(key) {
            diff.retained.push((*key).clone());
        } else {
            diff.inserted.push((*key).clone());
        }
    }
    diff.removed = old
        .into_iter()
        .filter(|key| !new_set.contains(key))
        .cloned()
        .collect();
    diff
}

/// First occurrence of every key, in order.
fn unique_keys(keys: &[UnitKey]) -> Vec<&UnitKey> {
    let mut seen = HashSet::new();
    keys.iter()
        .filter(|key| {
            let first = seen.insert(*key);
            if !first {
                debug!(%key, "duplicate unit key, only the first occurrence is tracked");
            }
            first
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{KeyPolicy, assign_keys};
    use crate::split::{SplitMode, split_units};

    fn keys(text: &str, policy: KeyPolicy) -> Vec<UnitKey> {
        assign_keys(&split_units(text, SplitMode::Graphemes), policy)
    }

    fn texts(keys: &[UnitKey]) -> Vec<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_hello_to_world_by_occurrence() {
        let diff = diff_keys(
            &keys("Hello", KeyPolicy::ByOccurrence),
            &keys("World", KeyPolicy::ByOccurrence),
        );
        assert_eq!(texts(&diff.removed), vec!["\"H\"#0", "\"e\"#0", "\"l\"#1"]);
        assert_eq!(texts(&diff.inserted), vec!["\"W\"#0", "\"r\"#0", "\"d\"#0"]);
        assert_eq!(texts(&diff.retained), vec!["\"o\"#0", "\"l\"#0"]);
    }

    #[test]
    fn test_hello_to_world_by_value() {
        let diff = diff_keys(
            &keys("Hello", KeyPolicy::ByValue),
            &keys("World", KeyPolicy::ByValue),
        );
        assert_eq!(texts(&diff.removed), vec!["\"H\"#0", "\"e\"#0"]);
        assert_eq!(texts(&diff.inserted), vec!["\"W\"#0", "\"r\"#0", "\"d\"#0"]);
        assert_eq!(texts(&diff.retained), vec!["\"o\"#0", "\"l\"#0"]);
    }

    #[test]
    fn test_same_letter_at_same_position_is_retained() {
        let diff = diff_keys(
            &keys("cat", KeyPolicy::ByOccurrence),
            &keys("cot", KeyPolicy::ByOccurrence),
        );
        assert_eq!(texts(&diff.removed), vec!["\"a\"#0"]);
        assert_eq!(texts(&diff.inserted), vec!["\"o\"#0"]);
        assert_eq!(diff.retained.len(), 2);
    }

    #[test]
    fn test_repeated_value_is_indistinguishable_by_value() {
        let diff = diff_keys(&keys("aa", KeyPolicy::ByValue), &keys("a", KeyPolicy::ByValue));
        assert!(diff.is_empty());

        let diff = diff_keys(
            &keys("aa", KeyPolicy::ByOccurrence),
            &keys("a", KeyPolicy::ByOccurrence),
        );
        assert_eq!(texts(&diff.removed), vec!["\"a\"#1"]);
    }

    #[test]
    fn test_from_and_to_empty() {
        let hello = keys("Hello", KeyPolicy::ByOccurrence);
        let appear = diff_keys(&[], &hello);
        assert_eq!(appear.inserted.len(), 5);
        assert!(appear.removed.is_empty());

        let vanish = diff_keys(&hello, &[]);
        assert_eq!(vanish.removed.len(), 5);
        assert!(vanish.inserted.is_empty() && vanish.retained.is_empty());
    }
}
