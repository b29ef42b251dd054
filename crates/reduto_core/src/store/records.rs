//! Record collection persistence over the key-value capability.
//!
//! # Responsibility
//! - Serialize the ordered collection into the well-known storage key.
//! - Recover from missing or corrupt stored data without failing the caller.
//!
//! # Invariants
//! - `load_all` never returns an error: corruption degrades to empty.
//! - `save_all` overwrites the whole collection in one write.
//! - Order is preserved exactly as given (newest first by convention).

use super::{KeyValueStore, StoreResult};
use crate::model::Record;
use log::warn;

/// Well-known key holding the serialized collection.
pub const STORAGE_KEY: &str = "reduto_cadastros_v1";

/// Collection store over an injected key-value capability.
pub struct RecordStore<S: KeyValueStore> {
    kv: S,
}

impl<S: KeyValueStore> RecordStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// Loads the full collection.
    ///
    /// Missing data yields an empty collection. Unreadable or corrupt data
    /// is logged and also yields an empty collection; it is never surfaced
    /// to the caller as an error.
    pub fn load_all(&self) -> Vec<Record> {
        let raw = match self.kv.get(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(
                    "event=collection_load module=store status=error error_code=kv_read_failed error={err}"
                );
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(err) => {
                warn!(
                    "event=collection_load module=store status=error error_code=corrupt_payload error={err}"
                );
                Vec::new()
            }
        }
    }

    /// Serializes and overwrites the stored collection in one write.
    pub fn save_all(&self, records: &[Record]) -> StoreResult<()> {
        let payload = serde_json::to_string(records)?;
        self.kv.set(STORAGE_KEY, &payload)
    }

    /// Access to the underlying key-value capability.
    pub fn kv(&self) -> &S {
        &self.kv
    }
}

#[cfg(test)]
mod tests {
    use super::{RecordStore, STORAGE_KEY};
    use crate::model::{Record, RecordDraft};
    use crate::store::MemoryKeyValueStore;

    fn record(name: &str) -> Record {
        Record::from_draft(RecordDraft {
            name: name.to_string(),
            email: format!("{name}@example.com"),
            ..RecordDraft::default()
        })
    }

    #[test]
    fn missing_slot_loads_as_empty() {
        let store = RecordStore::new(MemoryKeyValueStore::new());
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn corrupt_payload_degrades_to_empty() {
        let kv = MemoryKeyValueStore::new();
        kv.seed(STORAGE_KEY, "{not json");
        let store = RecordStore::new(kv);
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn save_then_load_preserves_order() {
        let store = RecordStore::new(MemoryKeyValueStore::new());
        let newest = record("bia");
        let older = record("ana");
        store.save_all(&[newest.clone(), older.clone()]).unwrap();

        let loaded = store.load_all();
        assert_eq!(loaded, vec![newest, older]);
    }

    #[test]
    fn saving_a_loaded_collection_leaves_storage_unchanged() {
        let store = RecordStore::new(MemoryKeyValueStore::new());
        store.save_all(&[record("ana")]).unwrap();
        let before = store.kv().raw(STORAGE_KEY).unwrap();

        let loaded = store.load_all();
        store.save_all(&loaded).unwrap();

        assert_eq!(store.kv().raw(STORAGE_KEY).unwrap(), before);
    }
}
