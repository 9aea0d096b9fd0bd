//! Row store
//!
//! Holds the ordered row sequence and applies structural and content
//! mutations. Every mutating call checks, in this order:
//! 1. the caller's role against [`policy::authorize`]
//! 2. that the row exists (and, for students, is visible)
//! 3. the submitted content
//!
//! Nothing is mutated until all three pass.

use crate::row::Row;
use serde::{Deserialize, Serialize};
use sheet_model::validation::validate_title;
use sheet_model::{policy, Operation, Participant, ResponseMap, Role, RowId, SheetError};
use std::collections::HashSet;

/// Ordered collection of discussion rows
///
/// Rows are kept sorted by ascending `order`; new rows are appended after
/// the current maximum.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Row>", into = "Vec<Row>")]
pub struct RowStore {
    rows: Vec<Row>,
}

impl RowStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Build a store from externally supplied rows
    ///
    /// Rows are sorted by `order`; rows sharing an order keep their supplied
    /// sequence.
    ///
    /// # Errors
    /// Returns [`ImportError`] on duplicate ids or blank titles.
    pub fn from_rows(rows: impl IntoIterator<Item = Row>) -> Result<Self, ImportError> {
        let mut rows: Vec<Row> = rows.into_iter().collect();
        let mut seen = HashSet::with_capacity(rows.len());

        for row in &rows {
            if !seen.insert(row.id().clone()) {
                return Err(ImportError::DuplicateRowId(row.id().clone()));
            }
            if validate_title(row.title()).is_err() {
                return Err(ImportError::EmptyTitle(row.id().clone()));
            }
        }

        rows.sort_by_key(Row::order);
        Ok(Self { rows })
    }

    /// All rows in display order
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Lookup row by id
    #[must_use]
    pub fn get(&self, id: &RowId) -> Option<&Row> {
        self.rows.iter().find(|row| row.id() == id)
    }

    /// Check if a row exists
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &RowId) -> bool {
        self.get(id).is_some()
    }

    /// Number of rows
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if store has no rows
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a new visible row
    ///
    /// # Errors
    /// - [`SheetError::Authorization`] unless `actor` is a mentor
    /// - [`SheetError::Validation`] when `title` is blank
    pub fn create_row(
        &mut self,
        actor: Role,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<RowId, SheetError> {
        policy::authorize(actor, Operation::CreateRow)?;
        let title = title.into();
        validate_title(&title)?;

        let id = self.fresh_id();
        let order = self.next_order();
        let row = Row::new(id.clone(), title, description).with_order(order);
        self.rows.push(row);

        tracing::debug!(row_id = %id, "row created");
        Ok(id)
    }

    /// Replace title and description, keeping responses and visibility
    ///
    /// # Errors
    /// - [`SheetError::Authorization`] unless `actor` is a mentor
    /// - [`SheetError::NotFound`] when the row is absent
    /// - [`SheetError::Validation`] when `title` is blank
    pub fn edit_row(
        &mut self,
        actor: Role,
        id: &RowId,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<(), SheetError> {
        policy::authorize(actor, Operation::EditRow)?;
        let index = self.position(id)?;
        let title = title.into();
        validate_title(&title)?;

        self.rows[index].set_content(title, description.into());
        tracing::debug!(row_id = %id, "row edited");
        Ok(())
    }

    /// Remove a row together with every response on it
    ///
    /// Irreversible; the removed row is returned for callers that want to
    /// report what was lost.
    ///
    /// # Errors
    /// - [`SheetError::Authorization`] unless `actor` is a mentor
    /// - [`SheetError::NotFound`] when the row is absent
    pub fn delete_row(&mut self, actor: Role, id: &RowId) -> Result<Row, SheetError> {
        policy::authorize(actor, Operation::DeleteRow)?;
        let index = self.position(id)?;

        let removed = self.rows.remove(index);
        tracing::debug!(
            row_id = %id,
            responses = removed.responses().len(),
            "row deleted"
        );
        Ok(removed)
    }

    /// Flip a row's visibility, returning the new state
    ///
    /// # Errors
    /// - [`SheetError::Authorization`] unless `actor` is a mentor
    /// - [`SheetError::NotFound`] when the row is absent
    pub fn toggle_visibility(&mut self, actor: Role, id: &RowId) -> Result<bool, SheetError> {
        policy::authorize(actor, Operation::ToggleVisibility)?;
        let index = self.position(id)?;

        let visible = self.rows[index].flip_visibility();
        tracing::debug!(row_id = %id, visible, "row visibility toggled");
        Ok(visible)
    }

    /// Write `author`'s own response on a row
    ///
    /// Only the entry keyed by the author's name changes. Students cannot
    /// answer rows hidden from them; such rows read as absent.
    ///
    /// # Errors
    /// [`SheetError::NotFound`] when the row is absent or hidden from `author`.
    pub fn set_response(
        &mut self,
        author: &Participant,
        id: &RowId,
        text: impl Into<String>,
    ) -> Result<(), SheetError> {
        policy::authorize(author.role(), Operation::SetResponse)?;
        let index = self.position(id)?;
        if !crate::is_visible_to(&self.rows[index], author.role()) {
            return Err(SheetError::not_found(id));
        }

        self.rows[index].responses_mut().write(author, text);
        tracing::debug!(row_id = %id, participant = author.name(), "response written");
        Ok(())
    }

    /// Responses of a row
    ///
    /// # Errors
    /// [`SheetError::NotFound`] when the row is absent.
    pub fn responses(&self, id: &RowId) -> Result<&ResponseMap, SheetError> {
        self.get(id)
            .map(Row::responses)
            .ok_or_else(|| SheetError::not_found(id))
    }

    fn position(&self, id: &RowId) -> Result<usize, SheetError> {
        self.rows
            .iter()
            .position(|row| row.id() == id)
            .ok_or_else(|| SheetError::not_found(id))
    }

    /// Order for a row appended after every existing one
    ///
    /// When the current maximum leaves no room, existing rows are renumbered
    /// `1..=n` in their display order first.
    fn next_order(&mut self) -> i64 {
        let Some(max) = self.rows.iter().map(Row::order).max() else {
            return 1;
        };
        if let Some(next) = max.checked_add(1) {
            return next;
        }

        let mut order = 0;
        for row in &mut self.rows {
            order += 1;
            row.set_order(order);
        }
        tracing::debug!(rows = self.rows.len(), "row orders renumbered");
        order + 1
    }

    fn fresh_id(&self) -> RowId {
        loop {
            let id = RowId::generate();
            if !self.contains(&id) {
                return id;
            }
        }
    }
}

impl TryFrom<Vec<Row>> for RowStore {
    type Error = ImportError;

    fn try_from(rows: Vec<Row>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<RowStore> for Vec<Row> {
    fn from(store: RowStore) -> Self {
        store.rows
    }
}

/// Errors importing externally supplied rows
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImportError {
    /// Two rows share an id
    #[error("duplicate row id: {0}")]
    DuplicateRowId(RowId),

    /// Row has a blank title
    #[error("row {0} has an empty title")]
    EmptyTitle(RowId),
}
