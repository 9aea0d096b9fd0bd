//! Append-only chat log

use crate::message::ChatMessage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sheet_model::validation::validate_message;
use sheet_model::{policy, MessageId, Operation, Participant, SheetError, ValidationError};

/// Ordered, append-only chat transcript
///
/// There is no edit or delete: a message stays in the log for the life of
/// the sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ChatMessage>", into = "Vec<ChatMessage>")]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
}

impl ChatLog {
    /// Create empty log
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an existing transcript
    ///
    /// # Errors
    /// [`ChatImportError::NonMonotonic`] unless ids strictly increase.
    pub fn from_messages(
        messages: impl IntoIterator<Item = ChatMessage>,
    ) -> Result<Self, ChatImportError> {
        let messages: Vec<ChatMessage> = messages.into_iter().collect();
        if let Some(pair) = messages.windows(2).find(|w| w[0].id() >= w[1].id()) {
            return Err(ChatImportError::NonMonotonic {
                previous: pair[0].id(),
                next: pair[1].id(),
            });
        }
        Ok(Self { messages })
    }

    /// Append a message from `sender`
    ///
    /// The text is stored as typed; only the emptiness check trims it.
    ///
    /// # Errors
    /// [`SheetError::Validation`] for blank text, or when the last id leaves
    /// no successor; the log is unchanged.
    pub fn send(
        &mut self,
        sender: &Participant,
        text: impl Into<String>,
        sent_at: DateTime<Utc>,
    ) -> Result<&ChatMessage, SheetError> {
        policy::authorize(sender.role(), Operation::SendMessage)?;
        let text = text.into();
        validate_message(&text)?;

        let id = self.next_id().ok_or(ValidationError::TranscriptFull)?;
        let index = self.messages.len();
        self.messages.push(ChatMessage::new(id, sender, text, sent_at));
        tracing::debug!(message_id = %id, sender = sender.name(), "chat message appended");

        Ok(&self.messages[index])
    }

    /// Full transcript in send order
    #[inline]
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Messages sent after `id`
    #[must_use]
    pub fn messages_after(&self, id: MessageId) -> &[ChatMessage] {
        let start = self.messages.partition_point(|m| m.id() <= id);
        &self.messages[start..]
    }

    /// Most recent message
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Number of messages
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Check if nothing was sent yet
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Distinct sender names in first-message order
    #[must_use]
    pub fn senders(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for message in &self.messages {
            if !seen.contains(&message.sender()) {
                seen.push(message.sender());
            }
        }
        seen
    }

    fn next_id(&self) -> Option<MessageId> {
        match self.last() {
            Some(message) => message.id().successor(),
            None => Some(MessageId(1)),
        }
    }
}

impl TryFrom<Vec<ChatMessage>> for ChatLog {
    type Error = ChatImportError;

    fn try_from(messages: Vec<ChatMessage>) -> Result<Self, Self::Error> {
        Self::from_messages(messages)
    }
}

impl From<ChatLog> for Vec<ChatMessage> {
    fn from(log: ChatLog) -> Self {
        log.messages
    }
}

/// Errors importing an existing transcript
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatImportError {
    /// Ids out of order or repeated
    #[error("message ids must strictly increase: {previous} followed by {next}")]
    NonMonotonic {
        /// Earlier id
        previous: MessageId,
        /// Offending later id
        next: MessageId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use sheet_model::ErrorKind;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 9, minute, 0).unwrap()
    }

    #[test]
    fn send_stamps_sender_and_role() {
        let mut log = ChatLog::new();
        let kim = Participant::mentor("Kim");

        let msg = log.send(&kim, "Good morning", at(0)).unwrap();
        assert_eq!(msg.id(), MessageId(1));
        assert_eq!(msg.sender(), "Kim");
        assert!(msg.is_from_mentor());
        assert_eq!(msg.sent_at(), at(0));

        let msg = log.send(&Participant::student("Alice"), "hi", at(1)).unwrap();
        assert_eq!(msg.id(), MessageId(2));
        assert!(!msg.is_from_mentor());
    }

    #[test]
    fn blank_text_is_rejected() {
        let mut log = ChatLog::new();
        let err = log
            .send(&Participant::student("Alice"), "   ", at(0))
            .unwrap_err();
        assert_eq!(err, SheetError::Validation(ValidationError::EmptyMessage));
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(log.is_empty());
    }

    #[test]
    fn exhausted_ids_reject_further_messages() {
        let kim = Participant::mentor("Kim");
        let mut log =
            ChatLog::from_messages([ChatMessage::new(MessageId(u64::MAX), &kim, "last", at(0))])
                .unwrap();

        let err = log.send(&kim, "one more", at(1)).unwrap_err();
        assert_eq!(err, SheetError::Validation(ValidationError::TranscriptFull));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn text_is_kept_as_typed() {
        let mut log = ChatLog::new();
        let msg = log
            .send(&Participant::student("Alice"), "  spaced  ", at(0))
            .unwrap();
        assert_eq!(msg.text(), "  spaced  ");
    }

    #[test]
    fn identical_timestamps_keep_send_order() {
        let mut log = ChatLog::new();
        let alice = Participant::student("Alice");
        log.send(&alice, "a", at(5)).unwrap();
        log.send(&alice, "b", at(5)).unwrap();

        let texts: Vec<_> = log.messages().iter().map(ChatMessage::text).collect();
        assert_eq!(texts, vec!["a", "b"]);
    }

    #[test]
    fn ids_continue_after_imported_transcript() {
        let kim = Participant::mentor("Kim");
        let mut log = ChatLog::from_messages([
            ChatMessage::new(MessageId(1), &kim, "one", at(0)),
            ChatMessage::new(MessageId(7), &kim, "seven", at(1)),
        ])
        .unwrap();

        let msg = log.send(&kim, "next", at(2)).unwrap();
        assert_eq!(msg.id(), MessageId(8));
        assert_eq!(log.messages_after(MessageId(1)).len(), 2);
        assert_eq!(log.messages_after(MessageId(8)).len(), 0);
    }

    #[test]
    fn import_rejects_out_of_order_ids() {
        let kim = Participant::mentor("Kim");
        let err = ChatLog::from_messages([
            ChatMessage::new(MessageId(2), &kim, "two", at(0)),
            ChatMessage::new(MessageId(2), &kim, "again", at(1)),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            ChatImportError::NonMonotonic {
                previous: MessageId(2),
                next: MessageId(2),
            }
        );
    }

    #[test]
    fn senders_are_distinct_in_order() {
        let mut log = ChatLog::new();
        log.send(&Participant::mentor("Kim"), "1", at(0)).unwrap();
        log.send(&Participant::student("Alice"), "2", at(1)).unwrap();
        log.send(&Participant::mentor("Kim"), "3", at(2)).unwrap();
        assert_eq!(log.senders(), vec!["Kim", "Alice"]);
    }

    #[test]
    fn transcript_serializes_as_list() {
        let mut log = ChatLog::new();
        log.send(&Participant::mentor("Kim"), "hello", at(0)).unwrap();
        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(json[0]["sender"], "Kim");
        assert_eq!(json[0]["isFromMentor"], true);
        assert_eq!(json[0]["id"], 1);

        let back: ChatLog = serde_json::from_value(json).unwrap();
        assert_eq!(back, log);
    }
}
