//! Read models handed to the screen
//!
//! Owned, serializable snapshots derived from session state. Building a
//! view never mutates anything.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sheet_chat::ChatMessage;
use sheet_model::{MessageId, Participant, Role, RowId};
use sheet_rows::Row;

/// One row as seen by the current participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowView {
    /// Row id
    pub id: RowId,
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// Sort key
    pub order: i64,
    /// Visible to students
    pub is_visible: bool,
    /// A mentor is looking at a row students cannot see
    pub hidden_from_students: bool,
    /// Current participant's own response (empty if none)
    pub my_response: String,
    /// Own response has unsaved edits
    pub dirty: bool,
    /// Other responses listed in full
    pub expanded: bool,
    /// Other participants' responses, truncated when collapsed
    pub others: Vec<ResponseView>,
    /// Number of other responses before truncation
    pub others_total: usize,
}

/// Another participant's response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseView {
    /// Author name
    pub name: String,
    /// Text, `None` while nothing has been written
    pub text: Option<String>,
}

/// Inputs for building a [`RowView`] beyond the row itself
#[derive(Debug, Clone, Copy)]
pub(crate) struct RowViewContext<'a> {
    pub(crate) me: &'a Participant,
    pub(crate) dirty: bool,
    pub(crate) expanded: bool,
    pub(crate) collapsed_preview: usize,
}

impl RowView {
    pub(crate) fn build(row: &Row, ctx: RowViewContext<'_>) -> Self {
        let me = ctx.me.name();
        let others_total = row.responses().others(me).count();
        let limit = if ctx.expanded {
            others_total
        } else {
            ctx.collapsed_preview
        };

        let others = row
            .responses()
            .others(me)
            .take(limit)
            .map(|(name, text)| ResponseView {
                name: name.to_string(),
                text: (!text.is_empty()).then(|| text.to_string()),
            })
            .collect();

        Self {
            id: row.id().clone(),
            title: row.title().to_string(),
            description: row.description().to_string(),
            order: row.order(),
            is_visible: row.is_visible(),
            hidden_from_students: ctx.me.is_mentor() && !row.is_visible(),
            my_response: row.responses().text_for(me).to_string(),
            dirty: ctx.dirty,
            expanded: ctx.expanded,
            others,
            others_total,
        }
    }
}

/// One chat message as seen by the current participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatView {
    /// Sequence id
    pub id: MessageId,
    /// Sender name
    pub sender: String,
    /// Text as typed
    pub text: String,
    /// Send time
    pub sent_at: DateTime<Utc>,
    /// Sent by a mentor
    pub is_from_mentor: bool,
    /// Sent by the current participant
    pub is_mine: bool,
}

impl ChatView {
    pub(crate) fn build(message: &ChatMessage, me: &Participant) -> Self {
        Self {
            id: message.id(),
            sender: message.sender().to_string(),
            text: message.text().to_string(),
            sent_at: message.sent_at(),
            is_from_mentor: message.is_from_mentor(),
            is_mine: message.sender() == me.name(),
        }
    }
}

/// Sheet heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetHeader {
    /// Owning space
    pub space_id: String,
    /// Sheet date
    pub date: String,
    /// Distinct names seen in responses and chat, plus the current participant
    pub participant_count: usize,
    /// Current participant's name
    pub me: String,
    /// Current participant's role
    pub role: Role,
    /// UI response length hint
    pub max_response_chars: Option<usize>,
}
