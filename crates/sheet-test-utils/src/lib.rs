//! Testing utilities for the daily sheet workspace
//!
//! Shared fixtures, recording seams and participants.

#![allow(missing_docs)]

use chrono::{DateTime, TimeZone, Utc};
use sheet_chat::{ChatMessage, ManualClock};
use sheet_model::{MessageId, Participant, ResponseMap, RowId};
use sheet_rows::Row;
use sheet_session::{Navigator, ResponseSaver, SavedResponse, Sheet, SheetAddress};
use std::cell::RefCell;
use std::rc::Rc;

pub const SPACE_ID: &str = "react-101";
pub const DATE: &str = "2024-01-15";

pub fn kim() -> Participant {
    Participant::mentor("Kim")
}

pub fn alice() -> Participant {
    Participant::student("Alice")
}

pub fn bob() -> Participant {
    Participant::student("Bob")
}

pub fn chloe() -> Participant {
    Participant::student("Chloe")
}

pub fn row_id(value: &str) -> RowId {
    RowId::new(value).unwrap()
}

pub fn address() -> SheetAddress {
    SheetAddress::new(SPACE_ID, DATE)
}

/// 2024-01-15 09:00:00 UTC
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap()
}

pub fn frozen_clock() -> ManualClock {
    ManualClock::frozen(base_time())
}

pub fn minute_clock() -> ManualClock {
    ManualClock::stepping(base_time(), chrono::Duration::minutes(1))
}

fn responses(entries: &[(&str, &str)]) -> ResponseMap {
    entries.iter().map(|(name, text)| (*name, *text)).collect()
}

/// Three rows, the last hidden from students, plus a short chat
///
/// - `"1"` Check-in: Alice and Bob answered, Chloe left hers empty
/// - `"2"` Homework reflection: Bob answered
/// - `"3"` Debate topic: hidden, Kim wrote a private note
pub fn sample_sheet() -> Sheet {
    let rows = [
        Row::new(row_id("1"), "Check-in", "Rate your day from 1 to 10")
            .with_order(1)
            .with_responses(responses(&[
                ("Alice", "8/10"),
                ("Bob", "6/10, tired"),
                ("Chloe", ""),
            ])),
        Row::new(row_id("2"), "Homework reflection", "What was hardest?")
            .with_order(2)
            .with_responses(responses(&[("Bob", "useEffect cleanup")])),
        Row::new(row_id("3"), "Debate topic", "Revealed after the break")
            .with_order(3)
            .with_visibility(false)
            .with_responses(responses(&[("Kim", "hooks vs classes")])),
    ];

    let start = base_time();
    let messages = [
        ChatMessage::new(MessageId(1), &kim(), "Good morning!", start),
        ChatMessage::new(
            MessageId(2),
            &alice(),
            "Morning :)",
            start + chrono::Duration::minutes(1),
        ),
        ChatMessage::new(
            MessageId(3),
            &bob(),
            "Is the homework due today?",
            start + chrono::Duration::minutes(2),
        ),
    ];

    Sheet::from_parts(address(), rows, messages).unwrap()
}

pub fn empty_sheet() -> Sheet {
    Sheet::empty(address())
}

/// Navigator that remembers every requested route
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    routes: Rc<RefCell<Vec<String>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> Vec<String> {
        self.routes.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn return_to_space(&self, address: &SheetAddress) {
        self.routes.borrow_mut().push(address.space_route());
    }
}

/// One recorded save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRecord {
    pub row_id: RowId,
    pub participant: String,
    pub text: String,
}

/// Saver that remembers every acknowledged response
#[derive(Debug, Clone, Default)]
pub struct RecordingSaver {
    saves: Rc<RefCell<Vec<SaveRecord>>>,
}

impl RecordingSaver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saves(&self) -> Vec<SaveRecord> {
        self.saves.borrow().clone()
    }

    pub fn count(&self) -> usize {
        self.saves.borrow().len()
    }
}

impl ResponseSaver for RecordingSaver {
    fn save(&self, saved: &SavedResponse<'_>) {
        self.saves.borrow_mut().push(SaveRecord {
            row_id: saved.row_id.clone(),
            participant: saved.participant.name().to_string(),
            text: saved.text.to_string(),
        });
    }
}
