//! Sheet session
//!
//! Binds one participant's identity to one sheet for the lifetime of the
//! screen. This is the only component that knows who is acting; it injects
//! the participant (or their role) into every row and chat call, tracks the
//! participant's unsaved responses and expanded rows, and builds the read
//! models.

use crate::config::SheetConfig;
use crate::navigation::{LogNavigator, Navigator, SheetAddress};
use crate::save::{LogSaver, ResponseSaver, SavedResponse};
use crate::sheet::Sheet;
use crate::view::{ChatView, RowView, RowViewContext, SheetHeader};
use sheet_chat::{ChatMessage, Clock, SystemClock};
use sheet_model::{policy, MessageId, Operation, Participant, RowId, SheetError};
use sheet_rows::{is_visible_to, visible_rows, ResponseBuffer, Row};
use std::collections::BTreeSet;

/// Builder for [`SheetSession`]
///
/// Identity and sheet are required; everything else has a default.
#[derive(Debug)]
pub struct SessionBuilder {
    me: Participant,
    sheet: Sheet,
    config: SheetConfig,
    clock: Box<dyn Clock>,
    navigator: Box<dyn Navigator>,
    saver: Box<dyn ResponseSaver>,
}

impl SessionBuilder {
    /// Start a session for `me` on `sheet`
    #[must_use]
    pub fn new(me: Participant, sheet: Sheet) -> Self {
        Self {
            me,
            sheet,
            config: SheetConfig::default(),
            clock: Box::new(SystemClock),
            navigator: Box::new(LogNavigator),
            saver: Box::new(LogSaver),
        }
    }

    /// With configuration
    #[must_use]
    pub fn config(mut self, config: SheetConfig) -> Self {
        self.config = config;
        self
    }

    /// With time source
    #[must_use]
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// With router
    #[must_use]
    pub fn navigator(mut self, navigator: impl Navigator + 'static) -> Self {
        self.navigator = Box::new(navigator);
        self
    }

    /// With save receiver
    #[must_use]
    pub fn saver(mut self, saver: impl ResponseSaver + 'static) -> Self {
        self.saver = Box::new(saver);
        self
    }

    /// Open the session
    #[must_use]
    pub fn open(self) -> SheetSession {
        tracing::info!(
            sheet = %self.sheet.address().sheet_route(),
            participant = self.me.name(),
            role = %self.me.role(),
            rows = self.sheet.rows().len(),
            messages = self.sheet.chat().len(),
            "sheet session opened"
        );

        SheetSession {
            me: self.me,
            sheet: self.sheet,
            buffer: ResponseBuffer::new(),
            expanded: BTreeSet::new(),
            config: self.config,
            clock: self.clock,
            navigator: self.navigator,
            saver: self.saver,
        }
    }
}

/// One participant's live view of one sheet
#[derive(Debug)]
pub struct SheetSession {
    me: Participant,
    sheet: Sheet,
    buffer: ResponseBuffer,
    expanded: BTreeSet<RowId>,
    config: SheetConfig,
    clock: Box<dyn Clock>,
    navigator: Box<dyn Navigator>,
    saver: Box<dyn ResponseSaver>,
}

impl SheetSession {
    /// Start building a session
    #[inline]
    #[must_use]
    pub fn builder(me: Participant, sheet: Sheet) -> SessionBuilder {
        SessionBuilder::new(me, sheet)
    }

    /// Open with defaults
    #[inline]
    #[must_use]
    pub fn open(me: Participant, sheet: Sheet) -> Self {
        SessionBuilder::new(me, sheet).open()
    }

    // ----- identity & addressing -----

    /// Acting participant
    #[inline]
    #[must_use]
    pub fn current_participant(&self) -> &Participant {
        &self.me
    }

    /// Sheet address
    #[inline]
    #[must_use]
    pub fn address(&self) -> &SheetAddress {
        self.sheet.address()
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    /// Underlying sheet state
    #[inline]
    #[must_use]
    pub fn sheet(&self) -> &Sheet {
        &self.sheet
    }

    // ----- rows: reads -----

    /// Rows the current participant may see, in display order
    #[must_use]
    pub fn visible_rows_for_me(&self) -> Vec<&Row> {
        visible_rows(self.sheet.rows().rows(), self.me.role())
    }

    /// Row read models for the current participant
    #[must_use]
    pub fn rows_for_me(&self) -> Vec<RowView> {
        self.visible_rows_for_me()
            .into_iter()
            .map(|row| self.row_view(row))
            .collect()
    }

    /// Read model of one row
    ///
    /// # Errors
    /// [`SheetError::NotFound`] when the row is absent or hidden from me.
    pub fn row_for_me(&self, id: &RowId) -> Result<RowView, SheetError> {
        self.visible_row(id).map(|row| self.row_view(row))
    }

    /// Whether my response on a row has unsaved edits
    #[inline]
    #[must_use]
    pub fn is_row_dirty_for_me(&self, id: &RowId) -> bool {
        self.buffer.is_dirty(id)
    }

    /// Rows with unsaved edits
    pub fn dirty_rows(&self) -> impl Iterator<Item = &RowId> {
        self.buffer.dirty_rows()
    }

    /// Whether other participants' responses on a row are listed in full
    #[inline]
    #[must_use]
    pub fn is_row_expanded(&self, id: &RowId) -> bool {
        self.expanded.contains(id)
    }

    // ----- rows: mutations -----

    /// Append a row (mentor only)
    ///
    /// # Errors
    /// Authorization or validation failure; see [`sheet_rows::RowStore::create_row`].
    pub fn create_row(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<RowId, SheetError> {
        let role = self.me.role();
        let result = self.sheet.rows_mut().create_row(role, title, description);
        self.observe(Operation::CreateRow, result)
    }

    /// Change a row's title and description (mentor only)
    ///
    /// # Errors
    /// Authorization, not-found or validation failure.
    pub fn edit_row(
        &mut self,
        id: &RowId,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<(), SheetError> {
        let role = self.me.role();
        let result = self.sheet.rows_mut().edit_row(role, id, title, description);
        self.observe(Operation::EditRow, result)
    }

    /// Remove a row and every response on it (mentor only)
    ///
    /// Irreversible. Confirmation is the caller's job.
    ///
    /// # Errors
    /// Authorization or not-found failure.
    pub fn delete_row(&mut self, id: &RowId) -> Result<(), SheetError> {
        let role = self.me.role();
        let result = self.sheet.rows_mut().delete_row(role, id);
        let removed = self.observe(Operation::DeleteRow, result)?;

        self.buffer.forget(removed.id());
        self.expanded.remove(removed.id());
        Ok(())
    }

    /// Show or hide a row for students (mentor only); returns new visibility
    ///
    /// # Errors
    /// Authorization or not-found failure.
    pub fn toggle_visibility(&mut self, id: &RowId) -> Result<bool, SheetError> {
        let role = self.me.role();
        let result = self.sheet.rows_mut().toggle_visibility(role, id);
        self.observe(Operation::ToggleVisibility, result)
    }

    /// Write my own response and mark the row dirty
    ///
    /// # Errors
    /// [`SheetError::NotFound`] when the row is absent or hidden from me.
    pub fn set_response(&mut self, id: &RowId, text: impl Into<String>) -> Result<(), SheetError> {
        let result = self.sheet.rows_mut().set_response(&self.me, id, text);
        self.observe(Operation::SetResponse, result)?;
        self.buffer.mark_dirty(id);
        Ok(())
    }

    /// Acknowledge my response on a row as saved
    ///
    /// Returns `true` when the row was dirty and the saver was invoked;
    /// saving a clean row is a no-op.
    ///
    /// # Errors
    /// [`SheetError::NotFound`] when the row is absent or hidden from me.
    pub fn mark_saved(&mut self, id: &RowId) -> Result<bool, SheetError> {
        let result = policy::authorize(self.me.role(), Operation::MarkSaved)
            .map_err(SheetError::from)
            .and_then(|()| self.visible_row(id).map(|row| row.responses().text_for(self.me.name())));
        let text = self.observe(Operation::MarkSaved, result)?;

        if !self.buffer.is_dirty(id) {
            return Ok(false);
        }

        self.saver.save(&SavedResponse {
            address: self.sheet.address(),
            row_id: id,
            participant: &self.me,
            text,
        });
        self.buffer.mark_saved(id);
        Ok(true)
    }

    /// Expand or collapse other participants' responses; returns new state
    ///
    /// # Errors
    /// [`SheetError::NotFound`] when the row is absent or hidden from me.
    pub fn toggle_row_expansion(&mut self, id: &RowId) -> Result<bool, SheetError> {
        let result = policy::authorize(self.me.role(), Operation::ToggleExpansion)
            .map_err(SheetError::from)
            .and_then(|()| self.visible_row(id).map(|_| ()));
        self.observe(Operation::ToggleExpansion, result)?;

        if self.expanded.remove(id) {
            Ok(false)
        } else {
            self.expanded.insert(id.clone());
            Ok(true)
        }
    }

    // ----- chat -----

    /// Send a chat message as the current participant
    ///
    /// # Errors
    /// [`SheetError::Validation`] for blank text.
    pub fn send_chat_message(&mut self, text: impl Into<String>) -> Result<MessageId, SheetError> {
        let sent_at = self.clock.now();
        let result = self
            .sheet
            .chat_mut()
            .send(&self.me, text, sent_at)
            .map(ChatMessage::id);
        self.observe(Operation::SendMessage, result)
    }

    /// Full transcript
    #[inline]
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        self.sheet.chat().messages()
    }

    /// Transcript read models
    #[must_use]
    pub fn chat_for_me(&self) -> Vec<ChatView> {
        self.messages()
            .iter()
            .map(|m| ChatView::build(m, &self.me))
            .collect()
    }

    // ----- screen -----

    /// Heading information
    #[must_use]
    pub fn header(&self) -> SheetHeader {
        let mut names: BTreeSet<&str> = BTreeSet::new();
        names.insert(self.me.name());
        for row in self.sheet.rows().rows() {
            names.extend(row.responses().names());
        }
        names.extend(self.sheet.chat().senders());

        let address = self.sheet.address();
        SheetHeader {
            space_id: address.space_id.clone(),
            date: address.date.clone(),
            participant_count: names.len(),
            me: self.me.name().to_string(),
            role: self.me.role(),
            max_response_chars: self.config.max_response_chars,
        }
    }

    /// Ask the router to go back to the owning space
    pub fn return_to_space(&self) {
        self.navigator.return_to_space(self.sheet.address());
    }

    /// Owned copy of the sheet for hand-off
    #[must_use]
    pub fn snapshot(&self) -> Sheet {
        self.sheet.clone()
    }

    /// End the session; unsaved markers and expansion state are discarded
    #[must_use]
    pub fn close(self) -> Sheet {
        tracing::info!(
            sheet = %self.sheet.address().sheet_route(),
            participant = self.me.name(),
            unsaved = self.buffer.len(),
            "sheet session closed"
        );
        self.sheet
    }

    fn visible_row(&self, id: &RowId) -> Result<&Row, SheetError> {
        self.sheet
            .rows()
            .get(id)
            .filter(|row| is_visible_to(row, self.me.role()))
            .ok_or_else(|| SheetError::not_found(id))
    }

    fn row_view(&self, row: &Row) -> RowView {
        RowView::build(
            row,
            RowViewContext {
                me: &self.me,
                dirty: self.buffer.is_dirty(row.id()),
                expanded: self.expanded.contains(row.id()),
                collapsed_preview: self.config.collapsed_preview,
            },
        )
    }

    fn observe<T>(&self, operation: Operation, result: Result<T, SheetError>) -> Result<T, SheetError> {
        if let Err(err) = &result {
            tracing::warn!(
                participant = self.me.name(),
                role = %self.me.role(),
                operation = ?operation,
                kind = %err.kind(),
                "{err}"
            );
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheet_model::{ErrorKind, Role};

    fn sheet_with_row() -> (Sheet, RowId) {
        let id = RowId::new("1").unwrap();
        let sheet = Sheet::from_parts(
            SheetAddress::new("space", "2024-01-15"),
            [Row::new(id.clone(), "Check-in", "Rate your day").with_order(1)],
            [],
        )
        .unwrap();
        (sheet, id)
    }

    #[test]
    fn role_is_injected_from_identity() {
        let (sheet, id) = sheet_with_row();
        let mut student = SheetSession::open(Participant::student("Alice"), sheet.clone());
        assert_eq!(
            student.toggle_visibility(&id).unwrap_err().kind(),
            ErrorKind::Authorization
        );

        let mut mentor = SheetSession::open(Participant::mentor("Kim"), sheet);
        assert_eq!(mentor.toggle_visibility(&id), Ok(false));
        assert_eq!(mentor.current_participant().role(), Role::Mentor);
    }

    #[test]
    fn set_response_marks_dirty_and_save_clears() {
        let (sheet, id) = sheet_with_row();
        let mut session = SheetSession::open(Participant::student("Alice"), sheet);

        session.set_response(&id, "8/10").unwrap();
        assert!(session.is_row_dirty_for_me(&id));
        assert_eq!(session.mark_saved(&id), Ok(true));
        assert!(!session.is_row_dirty_for_me(&id));
        assert_eq!(session.mark_saved(&id), Ok(false));
    }

    #[test]
    fn rejected_response_does_not_mark_dirty() {
        let (sheet, _) = sheet_with_row();
        let mut session = SheetSession::open(Participant::student("Alice"), sheet);
        let missing = RowId::new("nope").unwrap();

        assert!(session.set_response(&missing, "x").is_err());
        assert!(!session.is_row_dirty_for_me(&missing));
        assert_eq!(
            session.mark_saved(&missing).unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn delete_drops_dirty_and_expansion_state() {
        let (sheet, id) = sheet_with_row();
        let mut session = SheetSession::open(Participant::mentor("Kim"), sheet);
        session.set_response(&id, "note").unwrap();
        session.toggle_row_expansion(&id).unwrap();

        session.delete_row(&id).unwrap();
        assert!(!session.is_row_dirty_for_me(&id));
        assert!(!session.is_row_expanded(&id));
        assert_eq!(session.dirty_rows().count(), 0);
    }

    #[test]
    fn expansion_toggles() {
        let (sheet, id) = sheet_with_row();
        let mut session = SheetSession::open(Participant::student("Alice"), sheet);
        assert_eq!(session.toggle_row_expansion(&id), Ok(true));
        assert!(session.row_for_me(&id).unwrap().expanded);
        assert_eq!(session.toggle_row_expansion(&id), Ok(false));
    }
}
