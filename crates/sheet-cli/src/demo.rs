//! Scripted walkthrough of a sheet session
//!
//! Opens a sheet as one participant, performs the actions a mentor or a
//! student would typically try (including ones the role may not perform)
//! and collects the outcome of each together with the final read models.

use serde::Serialize;
use sheet_model::{Participant, RowId, SheetError};
use sheet_session::{ChatView, RowView, Sheet, SheetConfig, SheetHeader, SheetSession};

/// One attempted action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemoStep {
    /// What was attempted
    pub action: String,
    /// `ok` or the rejection
    pub outcome: String,
}

/// Result of a walkthrough
#[derive(Debug, Clone, Serialize)]
pub struct DemoReport {
    /// Sheet heading for the participant
    pub header: SheetHeader,
    /// Actions in the order they were attempted
    pub steps: Vec<DemoStep>,
    /// Rows as the participant sees them afterwards
    pub rows: Vec<RowView>,
    /// Transcript afterwards
    pub chat: Vec<ChatView>,
}

impl DemoReport {
    /// Number of rejected steps
    #[must_use]
    pub fn rejected(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| s.outcome.starts_with("rejected"))
            .count()
    }

    /// Plain-text rendering
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "=== Daily sheet {} / {} ===\n",
            self.header.space_id, self.header.date
        ));
        out.push_str(&format!(
            "You: {} ({})   Participants: {}\n",
            self.header.me, self.header.role, self.header.participant_count
        ));

        out.push_str("\n--- Actions ---\n");
        for (i, step) in self.steps.iter().enumerate() {
            out.push_str(&format!("{}. {} -> {}\n", i + 1, step.action, step.outcome));
        }

        out.push_str("\n--- Rows ---\n");
        for row in &self.rows {
            let mut flags = Vec::new();
            if row.hidden_from_students {
                flags.push("hidden from students");
            }
            if row.dirty {
                flags.push("unsaved");
            }
            let flags = if flags.is_empty() {
                String::new()
            } else {
                format!(" [{}]", flags.join(", "))
            };

            out.push_str(&format!("#{} {}{}\n", row.order, row.title, flags));
            if !row.description.is_empty() {
                out.push_str(&format!("   {}\n", row.description));
            }
            out.push_str(&format!("   you: {}\n", display_text(&row.my_response)));
            for other in &row.others {
                out.push_str(&format!(
                    "   {}: {}\n",
                    other.name,
                    other.text.as_deref().unwrap_or("(no response)")
                ));
            }
            let hidden = row.others_total - row.others.len();
            if hidden > 0 {
                out.push_str(&format!("   ... {hidden} more\n"));
            }
        }

        out.push_str("\n--- Chat ---\n");
        for message in &self.chat {
            let tag = if message.is_from_mentor { " (mentor)" } else { "" };
            out.push_str(&format!(
                "[{}] {}{}: {}\n",
                message.sent_at.format("%H:%M"),
                message.sender,
                tag,
                message.text
            ));
        }

        out
    }
}

fn display_text(text: &str) -> &str {
    if text.is_empty() {
        "(no response)"
    } else {
        text
    }
}

/// Drive a session through the role's walkthrough
#[must_use]
pub fn run_demo(participant: Participant, sheet: Sheet, config: SheetConfig) -> DemoReport {
    let mut session = SheetSession::builder(participant, sheet).config(config).open();
    let mut steps = Vec::new();

    if session.current_participant().is_mentor() {
        mentor_walkthrough(&mut session, &mut steps);
    } else {
        student_walkthrough(&mut session, &mut steps);
    }

    DemoReport {
        header: session.header(),
        steps,
        rows: session.rows_for_me(),
        chat: session.chat_for_me(),
    }
}

fn mentor_walkthrough(session: &mut SheetSession, steps: &mut Vec<DemoStep>) {
    let created = record(
        steps,
        "create row \"Check-in\"",
        session.create_row("Check-in", "Rate your day"),
    );
    record(steps, "create row with empty title", session.create_row("", "desc"));

    if let Some(id) = created {
        record(
            steps,
            format!("respond on row {id}"),
            session.set_response(&id, "Feeling good"),
        );
        record(steps, format!("save row {id}"), session.mark_saved(&id));
        record(
            steps,
            format!("hide row {id}"),
            session.toggle_visibility(&id),
        );
        record(
            steps,
            format!("show row {id}"),
            session.toggle_visibility(&id),
        );
    }

    if let Some(id) = first_visible(session) {
        record(
            steps,
            format!("expand row {id}"),
            session.toggle_row_expansion(&id),
        );
    }

    record(steps, "send blank message", session.send_chat_message("   "));
    record(
        steps,
        "send \"Welcome, everyone!\"",
        session.send_chat_message("Welcome, everyone!"),
    );
}

fn student_walkthrough(session: &mut SheetSession, steps: &mut Vec<DemoStep>) {
    record(steps, "create row", session.create_row("My own row", ""));

    if let Some(id) = first_visible(session) {
        record(
            steps,
            format!("hide row {id}"),
            session.toggle_visibility(&id),
        );
        record(
            steps,
            format!("respond on row {id}"),
            session.set_response(&id, "8/10"),
        );
        record(steps, format!("save row {id}"), session.mark_saved(&id));
        record(
            steps,
            format!("expand row {id}"),
            session.toggle_row_expansion(&id),
        );
    }

    record(steps, "send blank message", session.send_chat_message("   "));
    record(steps, "send \"hi\"", session.send_chat_message("hi"));
}

fn first_visible(session: &SheetSession) -> Option<RowId> {
    session
        .visible_rows_for_me()
        .first()
        .map(|row| row.id().clone())
}

fn record<T>(
    steps: &mut Vec<DemoStep>,
    action: impl Into<String>,
    result: Result<T, SheetError>,
) -> Option<T> {
    let (outcome, value) = match result {
        Ok(value) => ("ok".to_string(), Some(value)),
        Err(err) => (format!("rejected ({}): {err}", err.kind()), None),
    };
    steps.push(DemoStep {
        action: action.into(),
        outcome,
    });
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample_sheet;

    #[test]
    fn mentor_walkthrough_rejects_only_blank_inputs() {
        let report = run_demo(
            Participant::mentor("Kim"),
            sample_sheet().unwrap(),
            SheetConfig::default(),
        );
        assert_eq!(report.rejected(), 2);
        assert_eq!(report.rows.len(), 4);
        assert_eq!(report.chat.len(), 4);
    }

    #[test]
    fn student_walkthrough_hits_authorization() {
        let report = run_demo(
            Participant::student("Alice"),
            sample_sheet().unwrap(),
            SheetConfig::default(),
        );
        assert_eq!(report.rejected(), 3);
        assert!(report.steps[0].outcome.starts_with("rejected (authorization)"));
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].my_response, "8/10");
    }

    #[test]
    fn text_rendering_lists_sections() {
        let report = run_demo(
            Participant::student("Dana"),
            sample_sheet().unwrap(),
            SheetConfig::default(),
        );
        let text = report.render_text();
        assert!(text.contains("=== Daily sheet react-101 / 2024-01-15 ==="));
        assert!(text.contains("--- Chat ---"));
        assert!(text.contains("Dana: hi"));
        assert!(!text.contains("Debate topic"));
    }
}
