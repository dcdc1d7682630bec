//! Participant session -- identity, completion code, list assignment.
//!
//! A session is created once at the start of a run and never mutated.
//! Its fields are merged into every exported trial row.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::statement::ListAssignment;

/// Alphabet for completion codes.
const CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Fixed infix marking a code as coming from this study.
const CODE_INFIX: &str = "zvz";

/// Immutable per-participant session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantSession {
    /// External worker id, or `participant{n}` when none was supplied.
    pub worker_id: String,
    /// 1..=999; parity decides the list assignment.
    pub participant_number: u32,
    /// Human-readable receipt code shown at the end of the session.
    pub completion_code: String,
    pub started_at: DateTime<Utc>,
    pub list_assignment: ListAssignment,
}

impl ParticipantSession {
    /// Create a session for an optional external worker id.
    ///
    /// Without a worker id, the participant number doubles as the identity
    /// (`participant{n}`).
    pub fn new(worker_id: Option<String>) -> Self {
        let participant_number = rand::thread_rng().gen_range(1..=999);
        Self::build(worker_id, participant_number)
    }

    /// Create a session with an explicit participant number.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ParticipantNumberOutOfRange`] when the
    /// number is outside 1..=999.
    pub fn with_number(
        worker_id: Option<String>,
        participant_number: u32,
    ) -> Result<Self, SessionError> {
        if !(1..=999).contains(&participant_number) {
            return Err(SessionError::ParticipantNumberOutOfRange(participant_number));
        }
        Ok(Self::build(worker_id, participant_number))
    }

    fn build(worker_id: Option<String>, participant_number: u32) -> Self {
        let worker_id = worker_id.unwrap_or_else(|| format!("participant{participant_number}"));
        Self {
            worker_id,
            participant_number,
            completion_code: generate_completion_code(),
            started_at: Utc::now(),
            list_assignment: ListAssignment::for_participant(participant_number),
        }
    }

    /// Name of the CSV document uploaded for this session.
    pub fn filename(&self) -> String {
        format!("{}.csv", self.worker_id)
    }

    /// Session start as an ISO 8601 string, as exported.
    pub fn started_at_iso(&self) -> String {
        self.started_at.to_rfc3339()
    }
}

/// Generate a completion code: 3 random uppercase-alphanumeric characters,
/// the literal `zvz`, then 3 more. Always 9 characters. Collisions across
/// sessions are acceptable; this is a receipt, not an identifier.
pub fn generate_completion_code() -> String {
    let mut rng = rand::thread_rng();
    let mut random_chunk = |len: usize| -> String {
        (0..len)
            .map(|_| CODE_CHARSET[rng.gen_range(0..CODE_CHARSET.len())] as char)
            .collect()
    };
    format!("{}{}{}", random_chunk(3), CODE_INFIX, random_chunk(3))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_code_shape() {
        for _ in 0..200 {
            let code = generate_completion_code();
            assert_eq!(code.len(), 9);
            assert_eq!(&code[3..6], "zvz");
            for (i, c) in code.char_indices() {
                if (3..6).contains(&i) {
                    continue;
                }
                assert!(
                    c.is_ascii_uppercase() || c.is_ascii_digit(),
                    "unexpected char {c} in {code}"
                );
            }
        }
    }

    #[test]
    fn fallback_worker_id_uses_participant_number() {
        let session = ParticipantSession::with_number(None, 42).unwrap();
        assert_eq!(session.worker_id, "participant42");
        assert_eq!(session.filename(), "participant42.csv");
    }

    #[test]
    fn explicit_worker_id_is_kept() {
        let session = ParticipantSession::with_number(Some("WKR123".into()), 7).unwrap();
        assert_eq!(session.worker_id, "WKR123");
        assert_eq!(session.filename(), "WKR123.csv");
    }

    #[test]
    fn list_assignment_follows_number_parity() {
        assert_eq!(
            ParticipantSession::with_number(None, 3).unwrap().list_assignment,
            ListAssignment::Odd
        );
        assert_eq!(
            ParticipantSession::with_number(None, 8).unwrap().list_assignment,
            ListAssignment::Even
        );
    }

    #[test]
    fn participant_number_out_of_range_is_rejected() {
        assert!(matches!(
            ParticipantSession::with_number(None, 0),
            Err(SessionError::ParticipantNumberOutOfRange(0))
        ));
        assert!(matches!(
            ParticipantSession::with_number(None, 1000),
            Err(SessionError::ParticipantNumberOutOfRange(1000))
        ));
        assert!(ParticipantSession::with_number(None, 1).is_ok());
        assert!(ParticipantSession::with_number(None, 999).is_ok());
    }

    #[test]
    fn random_participant_number_in_range() {
        for _ in 0..100 {
            let session = ParticipantSession::new(None);
            assert!((1..=999).contains(&session.participant_number));
        }
    }
}
