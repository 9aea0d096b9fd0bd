//! Randomized sheet simulator
//!
//! Drives seeded random actions from random participants against one sheet.
//! Every action runs in a fresh session opened on the previous snapshot, the
//! way independent screens would hand state to each other, and the sheet
//! rules are re-checked after each step:
//! - a student sees exactly the visible rows, a subset of what a mentor sees
//! - a written response reads back verbatim and leaves other entries alone
//! - toggling visibility twice restores the row, responses untouched
//! - a deleted row is gone for every later row operation
//! - chat only appends, in send order
//! - saving clears the unsaved marker and a new write sets it again
//! - rejected actions change nothing and carry the expected error kind

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Serialize;
use sheet_chat::ManualClock;
use sheet_model::{validation::is_blank, ErrorKind, Operation, Participant, Role, RowId, SheetError};
use sheet_rows::{is_visible_to, visible_rows};
use sheet_session::{Sheet, SheetAddress, SheetSession};

const WORDS: [&str; 10] = [
    "props", "state", "hooks", "effects", "context", "render", "keys", "memo", "refs", "tests",
];
const BLANKS: [&str; 3] = ["", " ", "\t  "];

/// Simulator configuration
#[derive(Debug, Clone, Serialize)]
pub struct SimulatorConfig {
    /// Random seed for reproducibility
    pub seed: u64,
    /// Number of actions to attempt
    pub steps: u64,
    /// Stop at the first violation
    pub stop_on_first_violation: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            steps: 1000,
            stop_on_first_violation: true,
        }
    }
}

/// One simulated user action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum SimulatedAction {
    /// Create a row
    CreateRow {
        /// Possibly blank title
        title: String,
    },
    /// Retitle a row
    EditRow {
        /// Target
        row_id: RowId,
        /// Possibly blank title
        title: String,
    },
    /// Delete a row
    DeleteRow {
        /// Target
        row_id: RowId,
    },
    /// Flip visibility
    ToggleVisibility {
        /// Target
        row_id: RowId,
    },
    /// Write own response
    SetResponse {
        /// Target
        row_id: RowId,
        /// Response text
        text: String,
    },
    /// Acknowledge own response
    MarkSaved {
        /// Target
        row_id: RowId,
    },
    /// Send a chat message
    SendMessage {
        /// Possibly blank text
        text: String,
    },
    /// Expand or collapse other responses
    ToggleExpansion {
        /// Target
        row_id: RowId,
    },
}

impl SimulatedAction {
    /// Operation this action performs
    #[must_use]
    pub fn operation(&self) -> Operation {
        match self {
            SimulatedAction::CreateRow { .. } => Operation::CreateRow,
            SimulatedAction::EditRow { .. } => Operation::EditRow,
            SimulatedAction::DeleteRow { .. } => Operation::DeleteRow,
            SimulatedAction::ToggleVisibility { .. } => Operation::ToggleVisibility,
            SimulatedAction::SetResponse { .. } => Operation::SetResponse,
            SimulatedAction::MarkSaved { .. } => Operation::MarkSaved,
            SimulatedAction::SendMessage { .. } => Operation::SendMessage,
            SimulatedAction::ToggleExpansion { .. } => Operation::ToggleExpansion,
        }
    }
}

/// A broken sheet rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "violation", rename_all = "camelCase")]
pub enum Violation {
    /// Student projection differs from the visible rows or exceeds the mentor's
    #[error("step {step}: student view does not match visible rows")]
    VisibilityLeak {
        /// Step number
        step: u64,
    },
    /// Written response did not read back
    #[error("step {step}: response of {name} on row {row_id} did not read back")]
    ResponseMismatch {
        /// Step number
        step: u64,
        /// Row
        row_id: RowId,
        /// Writer
        name: String,
    },
    /// Someone else's response changed
    #[error("step {step}: other responses on row {row_id} changed")]
    ForeignResponseChanged {
        /// Step number
        step: u64,
        /// Row
        row_id: RowId,
    },
    /// Toggling twice did not restore the row
    #[error("step {step}: visibility toggle on row {row_id} is not self-inverse")]
    ToggleNotInvolution {
        /// Step number
        step: u64,
        /// Row
        row_id: RowId,
    },
    /// A deleted row still answered a row operation
    #[error("step {step}: deleted row {row_id} is still reachable")]
    DeletedRowReachable {
        /// Step number
        step: u64,
        /// Row
        row_id: RowId,
    },
    /// New row was not appended as a visible, empty, last row
    #[error("step {step}: created row {row_id} is malformed")]
    CreatedRowMalformed {
        /// Step number
        step: u64,
        /// Row
        row_id: RowId,
    },
    /// Chat did not grow by exactly the sent message
    #[error("step {step}: chat did not append the sent message in order")]
    ChatOrder {
        /// Step number
        step: u64,
    },
    /// Unsaved marker did not follow write/save
    #[error("step {step}: unsaved marker of row {row_id} is wrong")]
    DirtyFlag {
        /// Step number
        step: u64,
        /// Row
        row_id: RowId,
    },
    /// A rejected action changed the sheet
    #[error("step {step}: rejected action mutated the sheet")]
    RejectedActionMutated {
        /// Step number
        step: u64,
    },
    /// Outcome differs from the role/validation/existence rules
    #[error("step {step}: {role} {action:?} expected {expected:?}, got {actual:?}")]
    UnexpectedOutcome {
        /// Step number
        step: u64,
        /// Acting role
        role: Role,
        /// Attempted action
        action: SimulatedAction,
        /// Error kind the rules call for, `None` for success
        expected: Option<ErrorKind>,
        /// Error kind observed
        actual: Option<ErrorKind>,
    },
}

/// Counters for a run
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatorStats {
    /// Actions attempted
    pub actions_attempted: u64,
    /// Actions accepted
    pub actions_accepted: u64,
    /// Rejected as validation errors
    pub rejected_validation: u64,
    /// Rejected as authorization errors
    pub rejected_authorization: u64,
    /// Rejected as not found
    pub rejected_not_found: u64,
    /// Rows at the end
    pub final_rows: usize,
    /// Chat messages at the end
    pub final_messages: usize,
}

/// Final report from simulator
#[derive(Debug, Clone, Serialize)]
pub struct SimulatorReport {
    /// Configuration used
    pub config: SimulatorConfig,
    /// Counters
    pub stats: SimulatorStats,
    /// Every broken rule, in step order
    pub violations: Vec<Violation>,
}

impl SimulatorReport {
    /// Check if simulation passed all criteria
    #[must_use]
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    /// Generate text report
    #[must_use]
    pub fn generate_text(&self) -> String {
        let mut report = String::new();

        report.push_str("=== Daily Sheet Simulator Report ===\n\n");
        report.push_str(&format!("Seed: {}\n", self.config.seed));
        report.push_str(&format!("Actions Attempted: {}\n", self.stats.actions_attempted));
        report.push_str(&format!("Actions Accepted: {}\n", self.stats.actions_accepted));
        report.push_str(&format!(
            "Rejected (validation): {}\n",
            self.stats.rejected_validation
        ));
        report.push_str(&format!(
            "Rejected (authorization): {}\n",
            self.stats.rejected_authorization
        ));
        report.push_str(&format!(
            "Rejected (not found): {}\n",
            self.stats.rejected_not_found
        ));
        report.push_str(&format!("Final Rows: {}\n", self.stats.final_rows));
        report.push_str(&format!("Final Messages: {}\n", self.stats.final_messages));
        report.push_str(&format!("Violations: {}\n", self.violations.len()));

        if !self.violations.is_empty() {
            report.push_str("\n=== Violations ===\n");
            for (i, v) in self.violations.iter().enumerate() {
                report.push_str(&format!("{}. {}\n", i + 1, v));
            }
        }

        report.push_str(&format!(
            "\n=== Result: {} ===\n",
            if self.passed() { "PASS" } else { "FAIL" }
        ));

        report
    }
}

/// Run the simulator
#[must_use]
pub fn run_simulator(config: SimulatorConfig) -> SimulatorReport {
    let mut simulator = Simulator::new(config.seed);
    let mut violations = Vec::new();

    for step in 1..=config.steps {
        let found = simulator.step(step);
        let stop = !found.is_empty() && config.stop_on_first_violation;
        violations.extend(found);
        if stop {
            break;
        }
    }

    simulator.stats.final_rows = simulator.sheet.rows().len();
    simulator.stats.final_messages = simulator.sheet.chat().len();
    tracing::info!(
        seed = config.seed,
        attempted = simulator.stats.actions_attempted,
        violations = violations.len(),
        "simulation finished"
    );

    SimulatorReport {
        config,
        stats: simulator.stats,
        violations,
    }
}

struct Simulator {
    rng: StdRng,
    sheet: Sheet,
    clock: ManualClock,
    participants: Vec<Participant>,
    stats: SimulatorStats,
}

impl Simulator {
    fn new(seed: u64) -> Self {
        let start = DateTime::<Utc>::from_timestamp(1_705_309_200, 0).unwrap_or_default();
        Self {
            rng: StdRng::seed_from_u64(seed),
            sheet: Sheet::empty(SheetAddress::new("simulation", start.format("%Y-%m-%d").to_string())),
            clock: ManualClock::stepping(start, Duration::seconds(1)),
            participants: vec![
                Participant::mentor("Kim"),
                Participant::student("Alice"),
                Participant::student("Bob"),
                Participant::student("Chloe"),
            ],
            stats: SimulatorStats::default(),
        }
    }

    fn step(&mut self, step: u64) -> Vec<Violation> {
        let actor = self.participants[self.rng.random_range(0..self.participants.len())].clone();
        let action = self.random_action();
        let before = self.sheet.clone();
        let expected = expected_error(&action, &actor, &before);

        let mut session = SheetSession::builder(actor.clone(), before.clone())
            .clock(self.clock.clone())
            .open();
        let result = apply(&mut session, &action);
        let actual = result.as_ref().err().map(SheetError::kind);

        self.stats.actions_attempted += 1;
        match actual {
            None => self.stats.actions_accepted += 1,
            Some(ErrorKind::Validation) => self.stats.rejected_validation += 1,
            Some(ErrorKind::Authorization) => self.stats.rejected_authorization += 1,
            Some(ErrorKind::NotFound) => self.stats.rejected_not_found += 1,
        }

        let mut found = Vec::new();
        if actual != expected {
            found.push(Violation::UnexpectedOutcome {
                step,
                role: actor.role(),
                action: action.clone(),
                expected,
                actual,
            });
        }

        match result {
            Ok(created) => check_effects(step, &mut session, &action, created, &before, &mut found),
            Err(_) => {
                if session.sheet() != &before {
                    found.push(Violation::RejectedActionMutated { step });
                }
            }
        }
        check_visibility(step, session.sheet(), &mut found);

        for violation in &found {
            tracing::error!(%violation, "sheet rule broken");
        }
        self.sheet = session.close();
        found
    }

    fn random_action(&mut self) -> SimulatedAction {
        match self.rng.random_range(0..8) {
            0 => SimulatedAction::CreateRow {
                title: self.random_text(),
            },
            1 => SimulatedAction::EditRow {
                row_id: self.random_row_id(),
                title: self.random_text(),
            },
            2 => SimulatedAction::DeleteRow {
                row_id: self.random_row_id(),
            },
            3 => SimulatedAction::ToggleVisibility {
                row_id: self.random_row_id(),
            },
            4 => SimulatedAction::SetResponse {
                row_id: self.random_row_id(),
                text: self.random_text(),
            },
            5 => SimulatedAction::MarkSaved {
                row_id: self.random_row_id(),
            },
            6 => SimulatedAction::SendMessage {
                text: self.random_text(),
            },
            _ => SimulatedAction::ToggleExpansion {
                row_id: self.random_row_id(),
            },
        }
    }

    fn random_row_id(&mut self) -> RowId {
        let rows = self.sheet.rows().rows();
        if rows.is_empty() || self.rng.random_bool(0.1) {
            return RowId::generate();
        }
        rows[self.rng.random_range(0..rows.len())].id().clone()
    }

    fn random_text(&mut self) -> String {
        if self.rng.random_bool(0.15) {
            return BLANKS[self.rng.random_range(0..BLANKS.len())].to_string();
        }
        let count = self.rng.random_range(1..=3);
        (0..count)
            .map(|_| WORDS[self.rng.random_range(0..WORDS.len())])
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Error kind the sheet rules call for, `None` for success
fn expected_error(action: &SimulatedAction, actor: &Participant, sheet: &Sheet) -> Option<ErrorKind> {
    let role = actor.role();
    if action.operation().is_structural() && !role.is_mentor() {
        return Some(ErrorKind::Authorization);
    }

    let exists = |id: &RowId| sheet.rows().contains(id);
    let reachable = |id: &RowId| sheet.rows().get(id).is_some_and(|row| is_visible_to(row, role));

    match action {
        SimulatedAction::CreateRow { title } => is_blank(title).then_some(ErrorKind::Validation),
        SimulatedAction::EditRow { row_id, title } => {
            if !exists(row_id) {
                Some(ErrorKind::NotFound)
            } else {
                is_blank(title).then_some(ErrorKind::Validation)
            }
        }
        SimulatedAction::DeleteRow { row_id } | SimulatedAction::ToggleVisibility { row_id } => {
            (!exists(row_id)).then_some(ErrorKind::NotFound)
        }
        SimulatedAction::SetResponse { row_id, .. }
        | SimulatedAction::MarkSaved { row_id }
        | SimulatedAction::ToggleExpansion { row_id } => {
            (!reachable(row_id)).then_some(ErrorKind::NotFound)
        }
        SimulatedAction::SendMessage { text } => is_blank(text).then_some(ErrorKind::Validation),
    }
}

/// Perform an action, returning the created row id for row creation
fn apply(session: &mut SheetSession, action: &SimulatedAction) -> Result<Option<RowId>, SheetError> {
    match action {
        SimulatedAction::CreateRow { title } => session.create_row(title.clone(), "").map(Some),
        SimulatedAction::EditRow { row_id, title } => session
            .edit_row(row_id, title.clone(), "edited")
            .map(|()| None),
        SimulatedAction::DeleteRow { row_id } => session.delete_row(row_id).map(|()| None),
        SimulatedAction::ToggleVisibility { row_id } => {
            session.toggle_visibility(row_id).map(|_| None)
        }
        SimulatedAction::SetResponse { row_id, text } => {
            session.set_response(row_id, text.clone()).map(|()| None)
        }
        SimulatedAction::MarkSaved { row_id } => session.mark_saved(row_id).map(|_| None),
        SimulatedAction::SendMessage { text } => {
            session.send_chat_message(text.clone()).map(|_| None)
        }
        SimulatedAction::ToggleExpansion { row_id } => {
            session.toggle_row_expansion(row_id).map(|_| None)
        }
    }
}

fn check_effects(
    step: u64,
    session: &mut SheetSession,
    action: &SimulatedAction,
    created: Option<RowId>,
    before: &Sheet,
    found: &mut Vec<Violation>,
) {
    match action {
        SimulatedAction::CreateRow { .. } => {
            if let Some(row_id) = created {
                if !created_row_is_appended(session.sheet(), before, &row_id) {
                    found.push(Violation::CreatedRowMalformed { step, row_id });
                }
            }
        }
        SimulatedAction::SetResponse { row_id, text } => {
            check_response(step, session, row_id, text, before, found);
        }
        SimulatedAction::ToggleVisibility { row_id } => {
            check_toggle(step, session, row_id, before, found);
        }
        SimulatedAction::DeleteRow { row_id } => {
            let mut probe = SheetSession::open(session.current_participant().clone(), session.snapshot());
            let reachable = probe.set_response(row_id, "x").is_ok()
                || probe.edit_row(row_id, "x", "").is_ok()
                || probe.toggle_visibility(row_id).is_ok()
                || probe.sheet().rows().contains(row_id);
            if reachable {
                found.push(Violation::DeletedRowReachable {
                    step,
                    row_id: row_id.clone(),
                });
            }
        }
        SimulatedAction::SendMessage { text } => {
            let messages = session.messages();
            let appended = messages.len() == before.chat().len() + 1
                && messages.last().is_some_and(|last| {
                    last.text() == text
                        && last.sender() == session.current_participant().name()
                        && before.chat().last().map_or(true, |prev| prev.id() < last.id())
                });
            if !appended {
                found.push(Violation::ChatOrder { step });
            }
        }
        SimulatedAction::EditRow { .. }
        | SimulatedAction::MarkSaved { .. }
        | SimulatedAction::ToggleExpansion { .. } => {}
    }
}

fn created_row_is_appended(sheet: &Sheet, before: &Sheet, row_id: &RowId) -> bool {
    let Some(last) = sheet.rows().rows().last() else {
        return false;
    };
    let above_all = before
        .rows()
        .rows()
        .iter()
        .all(|row| row.order() < last.order());
    last.id() == row_id
        && last.is_visible()
        && last.responses().is_empty()
        && above_all
        && sheet.rows().len() == before.rows().len() + 1
}

fn check_response(
    step: u64,
    session: &mut SheetSession,
    row_id: &RowId,
    text: &str,
    before: &Sheet,
    found: &mut Vec<Violation>,
) {
    let name = session.current_participant().name().to_string();
    let (Ok(after), Ok(prior)) = (
        session.sheet().rows().responses(row_id),
        before.rows().responses(row_id),
    ) else {
        found.push(Violation::ResponseMismatch {
            step,
            row_id: row_id.clone(),
            name,
        });
        return;
    };

    if after.get(&name) != Some(text) {
        found.push(Violation::ResponseMismatch {
            step,
            row_id: row_id.clone(),
            name: name.clone(),
        });
    }
    if !after.others(&name).eq(prior.others(&name)) {
        found.push(Violation::ForeignResponseChanged {
            step,
            row_id: row_id.clone(),
        });
    }

    let dirty_after_write = session.is_row_dirty_for_me(row_id);
    let saved = session.mark_saved(row_id);
    let clean_after_save = !session.is_row_dirty_for_me(row_id);
    let rewritten = session.set_response(row_id, text);
    let dirty_after_rewrite = session.is_row_dirty_for_me(row_id);

    let ok = dirty_after_write
        && saved == Ok(true)
        && clean_after_save
        && rewritten.is_ok()
        && dirty_after_rewrite;
    if !ok {
        found.push(Violation::DirtyFlag {
            step,
            row_id: row_id.clone(),
        });
    }
}

fn check_toggle(
    step: u64,
    session: &SheetSession,
    row_id: &RowId,
    before: &Sheet,
    found: &mut Vec<Violation>,
) {
    let (Some(after), Some(prior)) = (session.sheet().rows().get(row_id), before.rows().get(row_id))
    else {
        found.push(Violation::ToggleNotInvolution {
            step,
            row_id: row_id.clone(),
        });
        return;
    };
    if after.is_visible() == prior.is_visible() {
        found.push(Violation::ToggleNotInvolution {
            step,
            row_id: row_id.clone(),
        });
    }
    if after.responses() != prior.responses() {
        found.push(Violation::ForeignResponseChanged {
            step,
            row_id: row_id.clone(),
        });
    }

    let mut probe = SheetSession::open(session.current_participant().clone(), session.snapshot());
    let twice = probe
        .toggle_visibility(row_id)
        .and_then(|_| probe.toggle_visibility(row_id));
    if twice.is_err() || probe.sheet() != session.sheet() {
        found.push(Violation::ToggleNotInvolution {
            step,
            row_id: row_id.clone(),
        });
    }
}

fn check_visibility(step: u64, sheet: &Sheet, found: &mut Vec<Violation>) {
    let rows = sheet.rows().rows();
    let student: Vec<&RowId> = visible_rows(rows, Role::Student)
        .into_iter()
        .map(|row| row.id())
        .collect();
    let mentor: Vec<&RowId> = visible_rows(rows, Role::Mentor)
        .into_iter()
        .map(|row| row.id())
        .collect();
    let flagged: Vec<&RowId> = rows
        .iter()
        .filter(|row| row.is_visible())
        .map(|row| row.id())
        .collect();

    if student != flagged || mentor.len() != rows.len() || !student.iter().all(|id| mentor.contains(id)) {
        found.push(Violation::VisibilityLeak { step });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_run_passes() {
        let report = run_simulator(SimulatorConfig {
            steps: 300,
            ..SimulatorConfig::default()
        });
        assert!(report.passed(), "{}", report.generate_text());
        assert_eq!(report.stats.actions_attempted, 300);
    }

    #[test]
    fn same_seed_same_run() {
        let config = SimulatorConfig {
            seed: 7,
            steps: 150,
            stop_on_first_violation: false,
        };
        let a = run_simulator(config.clone());
        let b = run_simulator(config);
        assert_eq!(a.stats.actions_accepted, b.stats.actions_accepted);
        assert_eq!(a.stats.final_rows, b.stats.final_rows);
        assert_eq!(a.stats.final_messages, b.stats.final_messages);
    }

    #[test]
    fn every_rejection_kind_shows_up() {
        let report = run_simulator(SimulatorConfig {
            seed: 3,
            steps: 600,
            stop_on_first_violation: false,
        });
        assert!(report.passed(), "{}", report.generate_text());
        assert!(report.stats.actions_accepted > 0);
        assert!(report.stats.rejected_validation > 0);
        assert!(report.stats.rejected_authorization > 0);
        assert!(report.stats.rejected_not_found > 0);
    }

    #[test]
    fn expected_error_follows_check_order() {
        let sheet = Sheet::empty(SheetAddress::new("s", "d"));
        let ghost = RowId::generate();
        let student = Participant::student("Alice");
        let mentor = Participant::mentor("Kim");

        let edit_blank = SimulatedAction::EditRow {
            row_id: ghost.clone(),
            title: " ".to_string(),
        };
        assert_eq!(
            expected_error(&edit_blank, &student, &sheet),
            Some(ErrorKind::Authorization)
        );
        assert_eq!(
            expected_error(&edit_blank, &mentor, &sheet),
            Some(ErrorKind::NotFound)
        );

        let blank_message = SimulatedAction::SendMessage {
            text: String::new(),
        };
        assert_eq!(
            expected_error(&blank_message, &student, &sheet),
            Some(ErrorKind::Validation)
        );
    }

    #[test]
    fn text_report_shows_result() {
        let report = run_simulator(SimulatorConfig {
            steps: 10,
            ..SimulatorConfig::default()
        });
        let text = report.generate_text();
        assert!(text.contains("Seed: 42"));
        assert!(text.contains("=== Result: PASS ==="));
    }
}
