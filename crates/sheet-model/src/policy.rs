//! Role authorization policy
//!
//! The single guard consulted by every mutating call. It is evaluated on
//! each operation regardless of what a UI chose to render, so skipping the
//! visibility projection never grants extra rights.

use crate::error::AuthorizationError;
use crate::participant::Role;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Every action the sheet surface accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Append a new row
    CreateRow,
    /// Change a row's title/description
    EditRow,
    /// Remove a row and its responses
    DeleteRow,
    /// Show/hide a row for students
    ToggleVisibility,
    /// Write own response
    SetResponse,
    /// Acknowledge own edits as saved
    MarkSaved,
    /// Append a chat message
    SendMessage,
    /// Expand/collapse other participants' responses
    ToggleExpansion,
}

impl Operation {
    /// All operations
    pub const ALL: [Operation; 8] = [
        Operation::CreateRow,
        Operation::EditRow,
        Operation::DeleteRow,
        Operation::ToggleVisibility,
        Operation::SetResponse,
        Operation::MarkSaved,
        Operation::SendMessage,
        Operation::ToggleExpansion,
    ];

    /// Structural operations change row existence, content or visibility
    #[inline]
    #[must_use]
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            Operation::CreateRow
                | Operation::EditRow
                | Operation::DeleteRow
                | Operation::ToggleVisibility
        )
    }

    /// Human-readable verb phrase
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Operation::CreateRow => "create rows",
            Operation::EditRow => "edit rows",
            Operation::DeleteRow => "delete rows",
            Operation::ToggleVisibility => "change row visibility",
            Operation::SetResponse => "write responses",
            Operation::MarkSaved => "save responses",
            Operation::SendMessage => "send chat messages",
            Operation::ToggleExpansion => "expand rows",
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Operations a role may perform
#[must_use]
pub fn permitted_operations(role: Role) -> Vec<Operation> {
    match role {
        Role::Mentor => Operation::ALL.to_vec(),
        Role::Student => Operation::ALL
            .into_iter()
            .filter(|op| !op.is_structural())
            .collect(),
    }
}

/// Check a role against an operation
///
/// # Errors
/// Returns [`AuthorizationError`] when `role` may not perform `operation`.
pub fn authorize(role: Role, operation: Operation) -> Result<(), AuthorizationError> {
    if is_permitted(role, operation) {
        Ok(())
    } else {
        Err(AuthorizationError { operation, role })
    }
}

/// Boolean form of [`authorize`]
#[inline]
#[must_use]
pub fn is_permitted(role: Role, operation: Operation) -> bool {
    role.is_mentor() || !operation.is_structural()
}
