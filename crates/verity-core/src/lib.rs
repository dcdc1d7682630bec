//! # Verity Core Library
//!
//! This library provides the core logic for Verity, a statement
//! truth-rating study runner. It implements a CLI-first philosophy where
//! all operations are available via a standalone CLI binary; any richer
//! front end would be a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Experiment Engine**: A caller-driven state machine that consumes
//!   one participant response per step and accumulates the trial log
//! - **Timeline**: Pure construction of the ordered step list, including
//!   periodic break screens
//! - **Export**: Fixed-projection of the trial log and deterministic CSV
//!   serialization
//! - **Upload**: One fire-and-forget POST of the CSV to the collection
//!   endpoint
//!
//! ## Key Components
//!
//! - [`ExperimentEngine`]: Core sequencer state machine
//! - [`ParticipantSession`]: Immutable per-participant identity
//! - [`DataPipeClient`]: CSV upload client
//! - [`Config`]: Application configuration management

pub mod config;
pub mod content;
pub mod engine;
pub mod error;
pub mod events;
pub mod export;
pub mod session;
pub mod statement;
pub mod timeline;
pub mod upload;

pub use config::Config;
pub use engine::{ExperimentEngine, Response, TrialRecord};
pub use error::{
    ConfigError, CoreError, EngineError, ItemsError, Result, SessionError, UploadError,
};
pub use events::Event;
pub use export::{extract, serialize, to_csv, ExportRow, COLUMNS};
pub use session::{generate_completion_code, ParticipantSession};
pub use statement::{assigned_list, load_items, partition, shuffle, ListAssignment, Statement};
pub use timeline::{Step, DEFAULT_BREAK_INTERVAL};
pub use upload::{DataPipeClient, SaveOutcome};
