//! Error types for sheet operations
//!
//! Every rejection is synchronous and recoverable:
//! - Validation failures (blank title, blank chat message)
//! - Authorization failures (student attempting a mentor-only operation)
//! - Missing rows (deleted or hidden from the caller)
//!
//! None of them leaves partial state behind.

use crate::ids::RowId;
use crate::participant::Role;
use crate::policy::Operation;
use serde::Serialize;
use std::fmt::{self, Display, Formatter};

/// Main sheet error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SheetError {
    /// Content failed validation
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Caller's role may not perform the operation
    #[error("not authorized: {0}")]
    Authorization(#[from] AuthorizationError),

    /// Referenced row is not present
    #[error("row not found: {row_id}")]
    NotFound {
        /// The missing row
        row_id: RowId,
    },
}

impl SheetError {
    /// Create not-found error for row
    #[inline]
    #[must_use]
    pub fn not_found(row_id: &RowId) -> Self {
        Self::NotFound {
            row_id: row_id.clone(),
        }
    }

    /// Fieldless discriminant for UI branching
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Authorization(_) => ErrorKind::Authorization,
            Self::NotFound { .. } => ErrorKind::NotFound,
        }
    }

    /// Sheet errors never end the session
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        true
    }
}

/// Error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// See [`SheetError::Validation`]
    Validation,
    /// See [`SheetError::Authorization`]
    Authorization,
    /// See [`SheetError::NotFound`]
    NotFound,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Authorization => "authorization",
            ErrorKind::NotFound => "not_found",
        })
    }
}

/// Content validation failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Row title empty after trimming
    #[error("row title must not be empty")]
    EmptyTitle,

    /// Chat text empty after trimming
    #[error("chat message must not be empty")]
    EmptyMessage,

    /// Message ids are used up; the transcript accepts no more messages
    #[error("chat transcript is full")]
    TranscriptFull,
}

/// Role lacks permission for an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{role} may not {operation}")]
pub struct AuthorizationError {
    /// Rejected operation
    pub operation: Operation,
    /// Caller's role
    pub role: Role,
}
