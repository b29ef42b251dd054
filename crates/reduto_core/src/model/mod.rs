//! Domain model types for registration records.

pub mod record;

pub use record::{Record, RecordDraft, RecordId};
