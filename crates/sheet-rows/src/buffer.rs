//! Unsaved-response tracking
//!
//! A row is dirty for the current participant from the moment they write a
//! response until they acknowledge it as saved. The row store may already
//! hold the new text; dirtiness only records that no save acknowledgment
//! has happened since.

use sheet_model::RowId;
use std::collections::BTreeSet;

/// Dirty row ids of one participant for one session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseBuffer {
    dirty: BTreeSet<RowId>,
}

impl ResponseBuffer {
    /// Create clean buffer
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an edit; returns true if the row was clean before
    pub fn mark_dirty(&mut self, id: &RowId) -> bool {
        self.dirty.insert(id.clone())
    }

    /// Acknowledge a save; returns true if the row was dirty
    pub fn mark_saved(&mut self, id: &RowId) -> bool {
        self.dirty.remove(id)
    }

    /// Check for unsaved edits on a row
    #[inline]
    #[must_use]
    pub fn is_dirty(&self, id: &RowId) -> bool {
        self.dirty.contains(id)
    }

    /// Drop tracking for a row that no longer exists
    pub fn forget(&mut self, id: &RowId) {
        self.dirty.remove(id);
    }

    /// Dirty rows in id order
    pub fn dirty_rows(&self) -> impl Iterator<Item = &RowId> {
        self.dirty.iter()
    }

    /// Number of dirty rows
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.dirty.len()
    }

    /// Check if everything is saved
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dirty.is_empty()
    }

    /// Reset at session end
    pub fn clear(&mut self) {
        self.dirty.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dirty_until_saved() {
        let id = RowId::new("1").unwrap();
        let mut buffer = ResponseBuffer::new();
        assert!(!buffer.is_dirty(&id));

        assert!(buffer.mark_dirty(&id));
        assert!(!buffer.mark_dirty(&id));
        assert!(buffer.is_dirty(&id));

        assert!(buffer.mark_saved(&id));
        assert!(!buffer.is_dirty(&id));
        assert!(!buffer.mark_saved(&id));
    }

    #[test]
    fn forget_and_clear() {
        let a = RowId::new("a").unwrap();
        let b = RowId::new("b").unwrap();
        let mut buffer = ResponseBuffer::new();
        buffer.mark_dirty(&a);
        buffer.mark_dirty(&b);
        assert_eq!(buffer.dirty_rows().collect::<Vec<_>>(), vec![&a, &b]);

        buffer.forget(&a);
        assert_eq!(buffer.len(), 1);

        buffer.clear();
        assert!(buffer.is_empty());
    }
}
