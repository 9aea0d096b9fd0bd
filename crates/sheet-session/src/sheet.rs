//! Sheet state: rows plus chat for one space and date

use crate::navigation::SheetAddress;
use serde::{Deserialize, Serialize};
use sheet_chat::{ChatImportError, ChatLog, ChatMessage};
use sheet_rows::{ImportError, Row, RowStore};

/// Everything one daily sheet holds
///
/// Serializes as `{ "spaceId", "date", "rows": [...], "chat": [...] }`.
/// Deserializing validates the same invariants as [`Sheet::from_parts`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
    #[serde(flatten)]
    address: SheetAddress,
    #[serde(default)]
    rows: RowStore,
    #[serde(default)]
    chat: ChatLog,
}

impl Sheet {
    /// Empty sheet at an address
    #[inline]
    #[must_use]
    pub fn empty(address: SheetAddress) -> Self {
        Self {
            address,
            rows: RowStore::new(),
            chat: ChatLog::new(),
        }
    }

    /// Assemble a sheet from externally supplied rows and messages
    ///
    /// # Errors
    /// [`SnapshotError`] on duplicate row ids, blank titles or unordered
    /// message ids.
    pub fn from_parts(
        address: SheetAddress,
        rows: impl IntoIterator<Item = Row>,
        messages: impl IntoIterator<Item = ChatMessage>,
    ) -> Result<Self, SnapshotError> {
        Ok(Self {
            address,
            rows: RowStore::from_rows(rows)?,
            chat: ChatLog::from_messages(messages)?,
        })
    }

    /// Parse a JSON snapshot
    ///
    /// # Errors
    /// [`SnapshotError::Json`] on malformed or invalid input.
    pub fn from_json(input: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Pretty JSON snapshot
    ///
    /// # Errors
    /// [`SnapshotError::Json`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Address
    #[inline]
    #[must_use]
    pub fn address(&self) -> &SheetAddress {
        &self.address
    }

    /// Row store
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &RowStore {
        &self.rows
    }

    /// Chat log
    #[inline]
    #[must_use]
    pub fn chat(&self) -> &ChatLog {
        &self.chat
    }

    pub(crate) fn rows_mut(&mut self) -> &mut RowStore {
        &mut self.rows
    }

    pub(crate) fn chat_mut(&mut self) -> &mut ChatLog {
        &mut self.chat
    }
}

/// Errors loading a sheet snapshot
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// Row data violates store invariants
    #[error("invalid rows: {0}")]
    Rows(#[from] ImportError),

    /// Chat data violates log invariants
    #[error("invalid chat: {0}")]
    Chat(#[from] ChatImportError),

    /// JSON could not be read or written
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheet_model::RowId;

    #[test]
    fn json_shape_is_flat() {
        let sheet = Sheet::from_parts(
            SheetAddress::new("s1", "2024-01-15"),
            [Row::new(RowId::new("1").unwrap(), "Check-in", "")],
            [],
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&sheet.to_json_pretty().unwrap()).unwrap();
        assert_eq!(value["spaceId"], "s1");
        assert_eq!(value["date"], "2024-01-15");
        assert_eq!(value["rows"][0]["title"], "Check-in");
        assert!(value["chat"].as_array().unwrap().is_empty());
    }

    #[test]
    fn snapshot_round_trip() {
        let sheet = Sheet::from_parts(
            SheetAddress::new("s1", "d"),
            [Row::new(RowId::new("1").unwrap(), "a", "").with_order(1)],
            [],
        )
        .unwrap();
        let back = Sheet::from_json(&sheet.to_json_pretty().unwrap()).unwrap();
        assert_eq!(back, sheet);
    }

    #[test]
    fn invalid_snapshot_is_rejected() {
        let input = r#"{"spaceId":"s","date":"d","rows":[{"id":"1","title":""}]}"#;
        assert!(matches!(Sheet::from_json(input), Err(SnapshotError::Json(_))));

        let dup = Sheet::from_parts(
            SheetAddress::new("s", "d"),
            [
                Row::new(RowId::new("1").unwrap(), "a", ""),
                Row::new(RowId::new("1").unwrap(), "b", ""),
            ],
            [],
        );
        assert!(matches!(dup, Err(SnapshotError::Rows(ImportError::DuplicateRowId(_)))));
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let sheet = Sheet::from_json(r#"{"spaceId":"s","date":"d"}"#).unwrap();
        assert!(sheet.rows().is_empty());
        assert!(sheet.chat().is_empty());
    }
}
