//! Chat message records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sheet_model::{MessageId, Participant};

/// One chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    id: MessageId,
    sender: String,
    text: String,
    sent_at: DateTime<Utc>,
    is_from_mentor: bool,
}

impl ChatMessage {
    /// Build a message record for `sender`
    #[must_use]
    pub fn new(
        id: MessageId,
        sender: &Participant,
        text: impl Into<String>,
        sent_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            sender: sender.name().to_string(),
            text: text.into(),
            sent_at,
            is_from_mentor: sender.is_mentor(),
        }
    }

    /// Sequence id
    #[inline]
    #[must_use]
    pub fn id(&self) -> MessageId {
        self.id
    }

    /// Sender display name
    #[inline]
    #[must_use]
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Text as typed
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Send time
    #[inline]
    #[must_use]
    pub fn sent_at(&self) -> DateTime<Utc> {
        self.sent_at
    }

    /// Whether the sender held the mentor role
    #[inline]
    #[must_use]
    pub fn is_from_mentor(&self) -> bool {
        self.is_from_mentor
    }
}
