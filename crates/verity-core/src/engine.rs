//! Experiment engine implementation.
//!
//! The engine is a caller-driven state machine: it holds the step list and
//! the append-only trial log, and the host feeds it one participant
//! response at a time. It does not use internal threads and never blocks;
//! waiting for input is the host's concern.
//!
//! ## Step sequence
//!
//! ```text
//! Consent -> Instructions -> Rating(0) .. Rating(n-1)  (Break every 24)
//!         -> Save -> ThankYou -> terminal
//! ```
//!
//! Declining consent jumps straight to terminal with an empty log.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = ExperimentEngine::new(session, shuffled);
//! while let Some(step) = engine.current_step() {
//!     let input = host.present(step);          // show screen, wait
//!     let event = engine.respond(input)?;      // advance
//! }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::events::Event;
use crate::session::ParticipantSession;
use crate::statement::Statement;
use crate::timeline::{self, Step, DEFAULT_BREAK_INTERVAL};

/// A participant response to the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "response", rename_all = "snake_case")]
pub enum Response {
    /// Consent screen choice: agree (`true`) or decline (`false`).
    Consent { agree: bool },
    /// Acknowledge instructions, a break, the save step, or the
    /// thank-you screen.
    Continue,
    /// One of the six scale buttons (0..=5).
    Rating { value: u8 },
}

impl std::fmt::Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Response::Consent { agree: true } => write!(f, "consent(agree)"),
            Response::Consent { agree: false } => write!(f, "consent(decline)"),
            Response::Continue => write!(f, "continue"),
            Response::Rating { value } => write!(f, "rating({value})"),
        }
    }
}

/// One recorded rating trial. Created when the rating is submitted,
/// immutable afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialRecord {
    pub statement_id: String,
    pub pair_number: u32,
    pub statement_type: String,
    pub statement_form: String,
    pub validity: String,
    pub plausibility: String,
    pub statement_text: String,
    /// 1-based, contiguous across the session.
    pub trial_number: u32,
    /// 0..=5.
    pub rating: u8,
    /// Raw response time in milliseconds.
    pub rt_ms: u64,
    /// `rt_ms / 1000` with two fraction digits, as exported.
    pub response_time_seconds: String,
}

/// Caller-driven sequencer for one participant session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentEngine {
    session: ParticipantSession,
    /// Shuffled assigned list, in presentation order.
    statements: Vec<Statement>,
    steps: Vec<Step>,
    step_index: usize,
    log: Vec<TrialRecord>,
    declined: bool,
    /// Epoch ms when the current step was presented; response times are
    /// measured from here.
    step_entered_ms: u64,
}

impl ExperimentEngine {
    /// Create an engine over an already-assigned, already-shuffled list.
    pub fn new(session: ParticipantSession, statements: Vec<Statement>) -> Self {
        Self::with_break_interval(session, statements, DEFAULT_BREAK_INTERVAL)
    }

    pub fn with_break_interval(
        session: ParticipantSession,
        statements: Vec<Statement>,
        break_interval: u32,
    ) -> Self {
        let steps = timeline::build(statements.len(), break_interval);
        Self {
            session,
            statements,
            steps,
            step_index: 0,
            log: Vec::new(),
            declined: false,
            step_entered_ms: now_ms(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn session(&self) -> &ParticipantSession {
        &self.session
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Step awaiting a response, or `None` once terminal.
    pub fn current_step(&self) -> Option<&Step> {
        if self.declined {
            return None;
        }
        self.steps.get(self.step_index)
    }

    pub fn is_finished(&self) -> bool {
        self.current_step().is_none()
    }

    pub fn consent_declined(&self) -> bool {
        self.declined
    }

    pub fn total_trials(&self) -> usize {
        self.statements.len()
    }

    /// Progress indicator for a rating step: (`index+1`, total).
    pub fn progress(&self, index: usize) -> (usize, usize) {
        (index + 1, self.statements.len())
    }

    /// Append-only trial log, in presentation order.
    pub fn records(&self) -> &[TrialRecord] {
        &self.log
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Feed one participant response to the current step.
    ///
    /// Returns the event for the completed step, or an error when the
    /// response does not fit the step (the engine does not advance then).
    pub fn respond(&mut self, input: Response) -> Result<Event, EngineError> {
        self.respond_at(input, now_ms())
    }

    fn respond_at(&mut self, input: Response, now: u64) -> Result<Event, EngineError> {
        let step = *self.current_step().ok_or(EngineError::Finished)?;
        let event = match (step, input) {
            (Step::Consent, Response::Consent { agree: true }) => Event::ConsentGiven { at: Utc::now() },
            (Step::Consent, Response::Consent { agree: false }) => {
                self.declined = true;
                return Ok(Event::ConsentDeclined { at: Utc::now() });
            }
            (Step::Instructions, Response::Continue) => Event::InstructionsDone { at: Utc::now() },
            (Step::Rating { index }, Response::Rating { value }) => {
                if value > 5 {
                    return Err(EngineError::RatingOutOfRange(value));
                }
                let total = self.statements.len();
                let record = self.record_trial(index, value, now);
                Event::TrialRecorded {
                    trial_number: record.trial_number,
                    total,
                    statement_id: record.statement_id.clone(),
                    rating: value,
                    rt_ms: record.rt_ms,
                    at: Utc::now(),
                }
            }
            (Step::Break { completed }, Response::Continue) => Event::BreakEnded {
                completed,
                total: self.statements.len(),
                at: Utc::now(),
            },
            (Step::Save, Response::Continue) => Event::SaveAcknowledged {
                filename: self.session.filename(),
                at: Utc::now(),
            },
            (Step::ThankYou, Response::Continue) => Event::Finished {
                completion_code: self.session.completion_code.clone(),
                at: Utc::now(),
            },
            (step, input) => {
                return Err(EngineError::UnexpectedResponse {
                    step: format!("{step:?}"),
                    response: input.to_string(),
                })
            }
        };
        self.advance(now);
        Ok(event)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn record_trial(&mut self, index: usize, rating: u8, now: u64) -> TrialRecord {
        let statement = &self.statements[index];
        let rt_ms = now.saturating_sub(self.step_entered_ms);
        let record = TrialRecord {
            statement_id: statement.id.clone(),
            pair_number: statement.pair,
            statement_type: statement.kind.clone(),
            statement_form: statement.form.clone(),
            validity: statement.validity.clone(),
            plausibility: statement.plausibility.clone(),
            statement_text: statement.text.clone(),
            trial_number: index as u32 + 1,
            rating,
            rt_ms,
            response_time_seconds: format!("{:.2}", rt_ms as f64 / 1000.0),
        };
        self.log.push(record.clone());
        record
    }

    fn advance(&mut self, now: u64) {
        self.step_index += 1;
        self.step_entered_ms = now;
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
