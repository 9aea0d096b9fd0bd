//! Daily Sheet Rows
//!
//! Discussion rows and everything derived from them.
//!
//! # Core Concepts
//!
//! - [`Row`]: one discussion prompt with mentor-controlled visibility
//! - [`RowStore`]: ordered rows, mutated under role authorization
//! - [`visible_rows`]: pure per-role projection of the store
//! - [`ResponseBuffer`]: which rows hold unsaved edits of the current participant
//!
//! The store never reads identity on its own; callers pass the acting role
//! or participant on every mutating call.
//!
//! # Example
//!
//! ```rust
//! use sheet_model::{Participant, Role};
//! use sheet_rows::{visible_rows, RowStore};
//!
//! let mut store = RowStore::new();
//! let id = store.create_row(Role::Mentor, "Check-in", "Rate your day").unwrap();
//! store.set_response(&Participant::student("Alice"), &id, "8/10").unwrap();
//!
//! store.toggle_visibility(Role::Mentor, &id).unwrap();
//! assert!(visible_rows(store.rows(), Role::Student).is_empty());
//! assert_eq!(visible_rows(store.rows(), Role::Mentor).len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod buffer;
mod row;
mod store;
mod visibility;

// Re-exports
pub use buffer::ResponseBuffer;
pub use row::Row;
pub use store::{ImportError, RowStore};
pub use visibility::{is_visible_to, visible_rows};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
