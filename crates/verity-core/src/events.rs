use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every accepted participant response produces an Event.
/// The CLI prints them for diagnostics; tests assert on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    ConsentGiven {
        at: DateTime<Utc>,
    },
    /// Consent refused -- the session short-circuits to terminal with no
    /// data recorded. A normal outcome, not an error.
    ConsentDeclined {
        at: DateTime<Utc>,
    },
    InstructionsDone {
        at: DateTime<Utc>,
    },
    TrialRecorded {
        trial_number: u32,
        total: usize,
        statement_id: String,
        rating: u8,
        rt_ms: u64,
        at: DateTime<Utc>,
    },
    BreakEnded {
        completed: usize,
        total: usize,
        at: DateTime<Utc>,
    },
    /// The host has run (or skipped) the save step.
    SaveAcknowledged {
        filename: String,
        at: DateTime<Utc>,
    },
    Finished {
        completion_code: String,
        at: DateTime<Utc>,
    },
}
