//! moodtrip Telemetry
//!
//! Persistence of inference results for later analysis.
//!
//! Provides:
//! - JSON-lines inference log with a best-effort write path
//! - Query and per-mood tally over stored inferences

pub mod persistence;

pub use persistence::{
    record_best_effort, InferenceLog, InferenceQuery, InferenceReader, InferenceRecord,
    InferenceSink,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::persistence::{InferenceLog, InferenceRecord, InferenceSink};
}
