//! Core domain logic for Reduto registration records.
//!
//! Field validation, input masks, local persistence of the record
//! collection, postal-code address lookup, browsing and export, wired
//! together by the registration form controller.

pub mod db;
pub mod export;
pub mod format;
pub mod logging;
pub mod lookup;
pub mod model;
pub mod notify;
pub mod service;
pub mod store;
pub mod validate;
pub mod view;

pub use export::{export_all, export_file_name, ExportError};
pub use format::{digits_only, mask_value, MaskField, MaskSet};
pub use logging::{default_log_level, init_logging, logging_status};
pub use lookup::{
    normalize_postal_code, Address, AddressLookup, LookupError, LookupResult, ViaCepClient,
};
pub use model::{Record, RecordDraft, RecordId};
pub use notify::{MemoryNotifier, Notice, Notifier, Severity, TerminalNotifier};
pub use service::{
    AutofillOutcome, LookupTicket, RegistrationService, SubmitOutcome, ValidationFailure,
};
pub use store::{
    KeyValueStore, MemoryKeyValueStore, RecordStore, SqliteKeyValueStore, StoreError, StoreResult,
    STORAGE_KEY,
};
pub use validate::{is_valid_email, is_valid_name, is_valid_tax_id};
pub use view::{build_view, render_table, BrowserRow, BrowserView};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
