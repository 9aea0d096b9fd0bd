//! Per-row response map
//!
//! Maps participant name to response text with a single writer per key: the
//! only mutation path takes the writing [`Participant`] and touches that
//! participant's own entry. Because writers never share a key, replicas of
//! the map can merge each other's writes key by key (last writer wins per
//! key) without read-modify-write races.

use crate::participant::Participant;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Responses of one row, keyed by participant name
///
/// Entries keep first-write order, which is also the order other
/// participants' answers are listed in. An absent entry reads as an empty
/// response; entries are never created ahead of a participant's first write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseMap(IndexMap<String, String>);

impl ResponseMap {
    /// Create empty map
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Write `author`'s own response, replacing any previous text
    ///
    /// Returns the previous text, if any.
    pub fn write(&mut self, author: &Participant, text: impl Into<String>) -> Option<String> {
        self.0.insert(author.name().to_string(), text.into())
    }

    /// Stored response for `name`
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Response for `name`, empty when absent
    #[inline]
    #[must_use]
    pub fn text_for(&self, name: &str) -> &str {
        self.get(name).unwrap_or("")
    }

    /// Check whether `name` has an entry
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Every entry except `name`'s, in first-write order
    pub fn others<'a>(&'a self, name: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.iter().filter(move |(author, _)| *author != name)
    }

    /// All entries in first-write order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Names with an entry
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if no participant has written
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<N, T> FromIterator<(N, T)> for ResponseMap
where
    N: Into<String>,
    T: Into<String>,
{
    /// Import entries from externally supplied data (seeds, snapshots)
    fn from_iter<I: IntoIterator<Item = (N, T)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, text)| (name.into(), text.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn write_touches_only_own_key() {
        let alice = Participant::student("Alice");
        let bob = Participant::student("Bob");
        let mut map = ResponseMap::new();

        assert_eq!(map.write(&alice, "8/10"), None);
        map.write(&bob, "6/10");
        assert_eq!(map.write(&alice, "9/10").as_deref(), Some("8/10"));

        assert_eq!(map.get("Alice"), Some("9/10"));
        assert_eq!(map.get("Bob"), Some("6/10"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn absent_entry_reads_empty() {
        let map = ResponseMap::new();
        assert_eq!(map.get("Carol"), None);
        assert_eq!(map.text_for("Carol"), "");
        assert!(!map.contains("Carol"));
        assert!(map.is_empty());
    }

    #[test]
    fn others_keeps_first_write_order() {
        let map: ResponseMap = [("Bob", "b"), ("Alice", "a"), ("Carol", "c")]
            .into_iter()
            .collect();
        let others: Vec<_> = map.others("Alice").collect();
        assert_eq!(others, vec![("Bob", "b"), ("Carol", "c")]);
    }

    #[test]
    fn serializes_as_object() {
        let map: ResponseMap = [("Alice", "yes")].into_iter().collect();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"Alice":"yes"}"#);
    }

    proptest! {
        #[test]
        fn prop_write_leaves_other_entries_unchanged(
            names in proptest::collection::vec("[a-e]", 1..8),
            writer in "[a-e]",
            text in ".*",
        ) {
            let mut map: ResponseMap = names
                .iter()
                .map(|n| (n.clone(), format!("{n}-text")))
                .collect();
            let before = map.clone();

            map.write(&Participant::student(writer.clone()), text.clone());

            prop_assert_eq!(map.get(&writer), Some(text.as_str()));
            for (name, old) in before.iter().filter(|(n, _)| *n != writer) {
                prop_assert_eq!(map.get(name), Some(old));
            }
        }
    }
}
