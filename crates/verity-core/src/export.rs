//! Trial-log projection and CSV serialization.
//!
//! The exported document is a fixed 16-column CSV: the five session
//! constants followed by the per-trial fields, in the order the collection
//! pipeline downstream expects. Serialization is byte-for-byte
//! deterministic for a given row sequence.

use serde::{Deserialize, Serialize};

use crate::engine::TrialRecord;
use crate::session::ParticipantSession;

/// Export column names, in output order.
pub const COLUMNS: [&str; 16] = [
    "worker_id",
    "participant_number",
    "completion_code",
    "experiment_start_time",
    "list_assignment",
    "trial_number",
    "statement_id",
    "pair_number",
    "statement_type",
    "statement_form",
    "validity",
    "plausibility",
    "statement_text",
    "rating",
    "rt",
    "response_time_seconds",
];

/// One exported row: session constants merged with one trial record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRow {
    pub worker_id: String,
    pub participant_number: u32,
    pub completion_code: String,
    pub experiment_start_time: String,
    pub list_assignment: String,
    pub trial_number: u32,
    pub statement_id: String,
    pub pair_number: u32,
    pub statement_type: String,
    pub statement_form: String,
    pub validity: String,
    pub plausibility: String,
    pub statement_text: String,
    pub rating: u8,
    pub rt: u64,
    pub response_time_seconds: String,
}

impl ExportRow {
    /// Field values in [`COLUMNS`] order, in their plain text form.
    pub fn values(&self) -> [String; 16] {
        [
            self.worker_id.clone(),
            self.participant_number.to_string(),
            self.completion_code.clone(),
            self.experiment_start_time.clone(),
            self.list_assignment.clone(),
            self.trial_number.to_string(),
            self.statement_id.clone(),
            self.pair_number.to_string(),
            self.statement_type.clone(),
            self.statement_form.clone(),
            self.validity.clone(),
            self.plausibility.clone(),
            self.statement_text.clone(),
            self.rating.to_string(),
            self.rt.to_string(),
            self.response_time_seconds.clone(),
        ]
    }

    /// The row as an ordered field-name/value record.
    pub fn to_record(&self) -> Vec<(String, String)> {
        COLUMNS
            .iter()
            .map(|c| c.to_string())
            .zip(self.values())
            .collect()
    }
}

/// Project the trial log onto [`ExportRow`]s, merging in the session
/// constants. Pure: the log is not touched, empty in means empty out.
pub fn extract(session: &ParticipantSession, records: &[TrialRecord]) -> Vec<ExportRow> {
    records
        .iter()
        .map(|r| ExportRow {
            worker_id: session.worker_id.clone(),
            participant_number: session.participant_number,
            completion_code: session.completion_code.clone(),
            experiment_start_time: session.started_at_iso(),
            list_assignment: session.list_assignment.to_string(),
            trial_number: r.trial_number,
            statement_id: r.statement_id.clone(),
            pair_number: r.pair_number,
            statement_type: r.statement_type.clone(),
            statement_form: r.statement_form.clone(),
            validity: r.validity.clone(),
            plausibility: r.plausibility.clone(),
            statement_text: r.statement_text.clone(),
            rating: r.rating,
            rt: r.rt_ms,
            response_time_seconds: r.response_time_seconds.clone(),
        })
        .collect()
}

/// Serialize ordered uniform-keyed records to CSV.
///
/// Empty input yields the empty string -- no header row. Otherwise the
/// header comes from the first record's field names in their original
/// order, followed by one row per record in input order. Rows are joined
/// with `\n` and there is no trailing newline.
pub fn serialize(records: &[Vec<(String, String)>]) -> String {
    let Some(first) = records.first() else {
        return String::new();
    };
    let header: Vec<&str> = first.iter().map(|(k, _)| k.as_str()).collect();
    let mut lines = vec![header.join(",")];
    for record in records {
        let row: Vec<String> = record.iter().map(|(_, v)| quote_field(v)).collect();
        lines.push(row.join(","));
    }
    lines.join("\n")
}

/// Serialize export rows to the final CSV document.
pub fn to_csv(rows: &[ExportRow]) -> String {
    let records: Vec<_> = rows.iter().map(ExportRow::to_record).collect();
    serialize(&records)
}

/// Quote a field iff it contains a comma, double quote, or newline;
/// internal double quotes are doubled. Everything else passes through
/// unchanged.
fn quote_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
