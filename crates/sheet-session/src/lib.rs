//! Daily Sheet Session
//!
//! Ties one participant's identity to one sheet. The session is the only
//! place where "who is acting" is known; row and chat operations receive the
//! participant or role from it and never look identity up themselves.
//!
//! # Core Concepts
//!
//! - [`Sheet`]: rows and chat for one space and date, loadable from JSON
//! - [`SheetSession`]: identity-bound operations, unsaved markers, expansion
//! - [`RowView`], [`ChatView`], [`SheetHeader`]: read models for the screen
//! - [`Navigator`], [`ResponseSaver`]: seams to the router and a save backend
//!
//! # Example
//!
//! ```rust
//! use sheet_model::Participant;
//! use sheet_session::{Sheet, SheetAddress, SheetSession};
//!
//! let sheet = Sheet::empty(SheetAddress::new("react-101", "2024-01-15"));
//! let mut mentor = SheetSession::open(Participant::mentor("Kim"), sheet);
//! let row = mentor.create_row("Check-in", "Rate your day").unwrap();
//! mentor.toggle_visibility(&row).unwrap();
//!
//! let mut student = SheetSession::open(Participant::student("Alice"), mentor.close());
//! assert!(student.rows_for_me().is_empty());
//! assert!(student.set_response(&row, "8/10").is_err());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
mod navigation;
mod save;
mod session;
mod sheet;
mod view;

// Re-exports
pub use config::{ConfigError, SheetConfig};
pub use navigation::{LogNavigator, Navigator, SheetAddress};
pub use save::{LogSaver, ResponseSaver, SavedResponse};
pub use session::{SessionBuilder, SheetSession};
pub use sheet::{Sheet, SnapshotError};
pub use view::{ChatView, ResponseView, RowView, SheetHeader};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
