//! Identifiers for rows and chat messages

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use ulid::Ulid;

/// Stable row identifier
///
/// Seeded rows keep whatever id the surrounding application supplied; rows
/// created during a session get a fresh ULID. Once assigned, a row id never
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RowId(String);

impl RowId {
    /// Wrap an existing id
    ///
    /// # Errors
    /// Returns [`IdError::Empty`] for an empty or whitespace-only id.
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(IdError::Empty);
        }
        Ok(Self(value))
    }

    /// Generate a fresh, lexicographically sortable id
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(Ulid::new().to_string())
    }

    /// Borrow as string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RowId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RowId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for RowId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for RowId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RowId> for String {
    fn from(value: RowId) -> Self {
        value.0
    }
}

/// Chat message sequence number
///
/// Strictly increasing within one chat log; breaks ties between messages
/// whose timestamps coincide.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MessageId(pub u64);

impl MessageId {
    /// Id following this one, `None` once the sequence is exhausted
    #[inline]
    #[must_use]
    pub fn successor(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    /// Raw sequence value
    #[inline]
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl Display for MessageId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier construction errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// Id was empty after trimming
    #[error("id must not be empty")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_id_rejects_blank() {
        assert_eq!(RowId::new(""), Err(IdError::Empty));
        assert_eq!(RowId::new("   "), Err(IdError::Empty));
        assert!(RowId::new("1").is_ok());
    }

    #[test]
    fn generated_row_ids_are_unique() {
        let a = RowId::generate();
        let b = RowId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 26);
    }

    #[test]
    fn row_id_serializes_as_plain_string() {
        let id = RowId::new("row-7").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"row-7\"");

        let back: RowId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<RowId>("\"\"").is_err());
    }

    #[test]
    fn message_ids_are_ordered() {
        let first = MessageId(1);
        assert!(Some(first) < first.successor());
        assert_eq!(first.successor().map(MessageId::value), Some(2));
        assert_eq!(MessageId(u64::MAX).successor(), None);
    }
}
