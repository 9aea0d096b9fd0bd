//! Daily Sheet Chat
//!
//! Append-only message log with a total order.
//!
//! - [`ChatLog`]: ordered transcript; messages are permanent once appended
//! - [`ChatMessage`]: immutable message record
//! - [`Clock`]: time source for `sent_at` ([`SystemClock`], [`ManualClock`])
//!
//! Ordering is by [`MessageId`](sheet_model::MessageId), a strictly
//! increasing sequence, so messages sent within the same clock tick still
//! keep their send order.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod clock;
mod log;
mod message;

pub use clock::{Clock, ManualClock, SystemClock};
pub use log::{ChatImportError, ChatLog};
pub use message::ChatMessage;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
