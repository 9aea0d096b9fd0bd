//! Daily Sheet Model
//!
//! Vocabulary shared by every sheet component.
//!
//! # Core Concepts
//!
//! - [`Participant`]: name-keyed identity with a [`Role`]
//! - [`RowId`] / [`MessageId`]: stable identifiers for rows and chat messages
//! - [`ResponseMap`]: per-row answers, writable only by their owner
//! - [`SheetError`]: the three recoverable rejection kinds
//! - [`policy`]: which [`Operation`]s each role may perform
//!
//! # Example
//!
//! ```rust
//! use sheet_model::{policy, Operation, Participant, ResponseMap, Role};
//!
//! let alice = Participant::student("Alice");
//! assert!(policy::authorize(alice.role(), Operation::CreateRow).is_err());
//!
//! let mut responses = ResponseMap::new();
//! responses.write(&alice, "8/10");
//! assert_eq!(responses.get("Alice"), Some("8/10"));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod error;
mod ids;
mod participant;
pub mod policy;
mod responses;
pub mod validation;

// Re-exports
pub use error::{AuthorizationError, ErrorKind, SheetError, ValidationError};
pub use ids::{IdError, MessageId, RowId};
pub use participant::{ParseRoleError, Participant, Role};
pub use policy::Operation;
pub use responses::ResponseMap;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
