//! Registration record domain model.
//!
//! # Responsibility
//! - Define the canonical stored record and its raw draft input shape.
//! - Assign stable identity and creation timestamp exactly once.
//!
//! # Invariants
//! - `id` is stable and never reused for another record.
//! - `created_at` is assigned at construction and never modified afterwards.
//! - Serialized field names match the v1 stored collection schema.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a stored registration record.
///
/// Records created before stable IDs existed gain a generated one when the
/// collection is deserialized, so deletion is always identity-based.
pub type RecordId = Uuid;

/// One stored registration entry.
///
/// The serde renames keep the v1 wire schema, so collections written by
/// earlier versions (and previously exported files) load unchanged.
/// Optional fields are stored as empty strings, matching the v1 schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Stable global ID used for deletion and row identity.
    #[serde(default = "Uuid::new_v4")]
    pub id: RecordId,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    /// 11-digit national tax ID in canonical display form, or empty.
    #[serde(rename = "cpf", default)]
    pub tax_id: String,
    #[serde(rename = "telefone", default)]
    pub phone: String,
    #[serde(rename = "nascimento", default)]
    pub birth_date: String,
    #[serde(rename = "endereco", default)]
    pub street: String,
    #[serde(rename = "cep", default)]
    pub postal_code: String,
    #[serde(rename = "cidade", default)]
    pub city: String,
    #[serde(rename = "estado", default)]
    pub state: String,
    #[serde(rename = "mensagem", default)]
    pub message: String,
    /// ISO-8601 creation timestamp, set exactly once.
    #[serde(rename = "_created")]
    pub created_at: String,
}

/// Raw form input before validation and identity assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordDraft {
    pub name: String,
    pub email: String,
    pub tax_id: String,
    pub phone: String,
    pub birth_date: String,
    pub street: String,
    pub postal_code: String,
    pub city: String,
    pub state: String,
    pub message: String,
}

impl Record {
    /// Builds a record from validated draft input.
    ///
    /// # Invariants
    /// - Generates a fresh stable `id`.
    /// - Sets `created_at` to the current UTC instant in ISO-8601.
    /// - Identity fields (`name`, `email`, `tax_id`, `phone`) are trimmed.
    pub fn from_draft(draft: RecordDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: draft.name.trim().to_string(),
            email: draft.email.trim().to_string(),
            tax_id: draft.tax_id.trim().to_string(),
            phone: draft.phone.trim().to_string(),
            birth_date: draft.birth_date,
            street: draft.street,
            postal_code: draft.postal_code,
            city: draft.city,
            state: draft.state,
            message: draft.message,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
