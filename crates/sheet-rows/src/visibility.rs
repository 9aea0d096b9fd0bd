//! Per-role row projection
//!
//! Pure read over a row slice. Mentors see every row, including rows
//! hidden from students; students see only visible rows. Authorization is
//! enforced separately by the store.

use crate::row::Row;
use sheet_model::Role;

/// Check whether `role` may see `row`
#[inline]
#[must_use]
pub fn is_visible_to(row: &Row, role: Role) -> bool {
    role.is_mentor() || row.is_visible()
}

/// Rows `role` may see, in input order
#[must_use]
pub fn visible_rows(rows: &[Row], role: Role) -> Vec<&Row> {
    rows.iter().filter(|row| is_visible_to(row, role)).collect()
}
