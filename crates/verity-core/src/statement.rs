//! Statement items, parity partition, and list shuffling.
//!
//! Statements are partitioned into two counterbalanced lists by the parity
//! of their `pair` key. Each participant sees exactly one partition,
//! selected by the parity of their participant number, in shuffled order.

use std::path::Path;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};

use crate::error::ItemsError;

/// One statement to be rated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub id: String,
    /// Grouping key; parity splits the item set into the two lists.
    pub pair: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub form: String,
    pub validity: String,
    pub plausibility: String,
    pub text: String,
}

/// Which counterbalanced list a participant is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListAssignment {
    Odd,
    Even,
}

impl ListAssignment {
    /// Assignment is a pure function of participant-number parity:
    /// odd number -> odd pairs, even number -> even pairs.
    pub fn for_participant(participant_number: u32) -> Self {
        if participant_number % 2 == 1 {
            ListAssignment::Odd
        } else {
            ListAssignment::Even
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ListAssignment::Odd => "odd",
            ListAssignment::Even => "even",
        }
    }
}

impl std::fmt::Display for ListAssignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Load statements from a JSON item file (an array of [`Statement`]).
pub fn load_items(path: &Path) -> Result<Vec<Statement>, ItemsError> {
    let content = std::fs::read_to_string(path).map_err(|source| ItemsError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|e| ItemsError::ParseFailed {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Split the item set into (odd-pair, even-pair) lists.
///
/// Either side may be empty; a participant assigned an empty partition
/// gets a degenerate zero-trial session rather than an error.
pub fn partition(statements: &[Statement]) -> (Vec<Statement>, Vec<Statement>) {
    let odd = statements.iter().filter(|s| s.pair % 2 == 1).cloned().collect();
    let even = statements.iter().filter(|s| s.pair % 2 == 0).cloned().collect();
    (odd, even)
}

/// Select the partition matching the participant's list assignment.
pub fn assigned_list(statements: &[Statement], participant_number: u32) -> Vec<Statement> {
    let (odd, even) = partition(statements);
    match ListAssignment::for_participant(participant_number) {
        ListAssignment::Odd => odd,
        ListAssignment::Even => even,
    }
}

/// Uniform random permutation of the assigned list.
///
/// With `seed` set the shuffle is reproducible (same generator family the
/// simulation code uses); otherwise it draws from the thread RNG.
pub fn shuffle(statements: &mut [Statement], seed: Option<u64>) {
    match seed {
        Some(seed) => {
            let mut rng = Mcg128Xsl64::seed_from_u64(seed);
            statements.shuffle(&mut rng);
        }
        None => {
            statements.shuffle(&mut rand::thread_rng());
        }
    }
}
