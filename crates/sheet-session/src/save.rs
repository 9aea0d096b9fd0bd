//! Save acknowledgment seam
//!
//! `mark_saved` hands the acknowledged response to a [`ResponseSaver`]. With
//! no backend the default saver only logs; a persistence or sync layer plugs
//! in here.

use crate::navigation::SheetAddress;
use sheet_model::{Participant, RowId};
use std::fmt::Debug;

/// A response the participant acknowledged as saved
#[derive(Debug, Clone, Copy)]
pub struct SavedResponse<'a> {
    /// Sheet the row belongs to
    pub address: &'a SheetAddress,
    /// Saved row
    pub row_id: &'a RowId,
    /// Author of the response
    pub participant: &'a Participant,
    /// Text at save time
    pub text: &'a str,
}

/// Receiver of save acknowledgments
pub trait ResponseSaver: Debug {
    /// Called once per clean-to-saved transition
    fn save(&self, saved: &SavedResponse<'_>);
}

/// Saver that writes an info event and nothing else
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSaver;

impl ResponseSaver for LogSaver {
    fn save(&self, saved: &SavedResponse<'_>) {
        tracing::info!(
            sheet = %saved.address.sheet_route(),
            row_id = %saved.row_id,
            participant = saved.participant.name(),
            chars = saved.text.chars().count(),
            "response saved"
        );
    }
}
