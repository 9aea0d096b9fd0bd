//! Transcript ordering tests.
//!
//! The transcript is append-only and ordered by send sequence even when the
//! clock does not move between sends.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use sheet_chat::{ChatLog, ChatMessage, Clock, ManualClock};
use sheet_model::Participant;

fn frozen() -> ManualClock {
    ManualClock::frozen(Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap())
}

#[test]
fn reading_transcript_does_not_consume_it() {
    let clock = frozen();
    let mut log = ChatLog::new();
    log.send(&Participant::student("Alice"), "hi", clock.now()).unwrap();

    assert_eq!(log.messages().len(), 1);
    assert_eq!(log.messages().len(), 1);
    assert_eq!(log.messages()[0].sender(), "Alice");
}

proptest! {
    #[test]
    fn prop_last_two_messages_follow_send_order(
        prefix in proptest::collection::vec("[a-z ]{0,5}", 0..10),
        a in "[a-z]{1,5}",
        b in "[a-z]{1,5}",
    ) {
        let clock = frozen();
        let alice = Participant::student("Alice");
        let mut log = ChatLog::new();
        for text in &prefix {
            let _ = log.send(&alice, text.clone(), clock.now());
        }
        let before = log.len();

        log.send(&alice, a.clone(), clock.now()).unwrap();
        log.send(&Participant::mentor("Kim"), b.clone(), clock.now()).unwrap();

        let messages = log.messages();
        prop_assert_eq!(messages.len(), before + 2);
        prop_assert_eq!(messages[messages.len() - 2].text(), a.as_str());
        prop_assert_eq!(messages[messages.len() - 1].text(), b.as_str());
        prop_assert!(messages.windows(2).all(|w| w[0].id() < w[1].id()));
    }

    #[test]
    fn prop_blank_messages_never_append(blank in "[ \t\n]{0,6}") {
        let mut log = ChatLog::new();
        let result = log.send(&Participant::student("Alice"), blank, frozen().now());
        prop_assert!(result.is_err());
        prop_assert!(log.is_empty());
    }
}

#[test]
fn messages_after_supports_incremental_rendering() {
    let clock = frozen();
    let kim = Participant::mentor("Kim");
    let mut log = ChatLog::new();
    let first = log.send(&kim, "one", clock.now()).unwrap().id();
    log.send(&kim, "two", clock.now()).unwrap();
    log.send(&kim, "three", clock.now()).unwrap();

    let tail: Vec<_> = log.messages_after(first).iter().map(ChatMessage::text).collect();
    assert_eq!(tail, vec!["two", "three"]);
}
