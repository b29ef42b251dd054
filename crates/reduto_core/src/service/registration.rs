//! Registration form controller.
//!
//! # Responsibility
//! - Validate drafts in field order and persist accepted records.
//! - Drive postal-code autofill with latest-request-wins semantics.
//! - Emit user feedback through the injected notifier.
//!
//! # Invariants
//! - A rejected submission mutates neither the draft nor storage.
//! - New records are prepended: the collection stays newest-first.
//! - A superseded lookup result is discarded without touching the draft.
//! - Browsing always re-reads storage, never a cached copy.

use crate::export::{export_all, ExportError};
use crate::format::{mask_value, MaskField, MaskSet};
use crate::lookup::{normalize_postal_code, Address, AddressLookup};
use crate::model::{Record, RecordDraft, RecordId};
use crate::notify::{Notice, Notifier, Severity};
use crate::store::{KeyValueStore, RecordStore, StoreResult};
use crate::validate::{is_valid_email, is_valid_name, is_valid_tax_id};
use crate::view::{build_view, BrowserView};
use log::{info, warn};
use std::path::{Path, PathBuf};

const MSG_INVALID_NAME: &str = "Nome inválido. Informe pelo menos 2 caracteres.";
const MSG_INVALID_EMAIL: &str = "E-mail inválido.";
const MSG_INVALID_TAX_ID: &str = "CPF inválido.";
const MSG_SAVED: &str = "Cadastro salvo localmente com sucesso!";
const MSG_DELETED: &str = "Cadastro excluído.";
const MSG_CLEARED: &str = "Cadastros apagados com sucesso";
const MSG_ADDRESS_FILLED: &str = "Endereço preenchido automaticamente pelo CEP.";
const MSG_ADDRESS_NOT_FOUND: &str = "CEP não encontrado ou inválido.";
const MSG_NOTHING_TO_EXPORT: &str = "Nenhum cadastro para exportar.";
const MSG_EXPORT_STARTED: &str = "Exportação iniciada.";

/// First validation failure found, in field order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationFailure {
    Name,
    Email,
    TaxId,
}

impl ValidationFailure {
    /// User-facing message for this failure.
    pub fn message(self) -> &'static str {
        match self {
            Self::Name => MSG_INVALID_NAME,
            Self::Email => MSG_INVALID_EMAIL,
            Self::TaxId => MSG_INVALID_TAX_ID,
        }
    }
}

/// Result of a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Record persisted; the draft was reset and focus returns to the
    /// name field. `total` is the new collection size.
    Saved { id: RecordId, total: usize },
    /// Validation failed; nothing was persisted or reset.
    Rejected(ValidationFailure),
}

/// Result of completing a postal-code lookup against a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutofillOutcome {
    /// Dependent fields that were empty are now filled.
    Filled(Address),
    /// Unknown code, malformed code, or a failed lookup.
    NoData,
    /// A newer lookup was started meanwhile; this result was discarded.
    Superseded,
}

/// Handle identifying one started lookup. Only the most recently issued
/// ticket may apply its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupTicket(u64);

/// Form controller over injected storage, lookup and notification seams.
pub struct RegistrationService<S: KeyValueStore, L: AddressLookup, N: Notifier> {
    store: RecordStore<S>,
    lookup: L,
    notifier: N,
    masks: MaskSet,
    lookup_seq: u64,
}

impl<S: KeyValueStore, L: AddressLookup, N: Notifier> RegistrationService<S, L, N> {
    pub fn new(kv: S, lookup: L, notifier: N) -> Self {
        Self {
            store: RecordStore::new(kv),
            lookup,
            notifier,
            masks: MaskSet::default(),
            lookup_seq: 0,
        }
    }

    /// Installs input masks unless an external formatter is present.
    ///
    /// Idempotent; meant to be called at startup and once more after the
    /// deferred external-formatter re-check.
    pub fn ensure_masks(&mut self, external_formatter_present: bool) {
        if external_formatter_present {
            return;
        }
        self.masks.install_all();
    }

    /// Reformats one field through its installed mask.
    ///
    /// Input passes through unchanged when the mask is not installed
    /// (an external formatter owns the field).
    pub fn format_field(&self, field: MaskField, raw: &str) -> String {
        if self.masks.is_installed(field) {
            mask_value(field, raw)
        } else {
            raw.to_string()
        }
    }

    /// Begins a postal-code lookup, superseding any ticket issued earlier.
    pub fn start_postal_lookup(&mut self) -> LookupTicket {
        self.lookup_seq += 1;
        LookupTicket(self.lookup_seq)
    }

    /// Applies a finished lookup to the draft if its ticket is still the
    /// latest. Only empty dependent fields are filled.
    pub fn finish_postal_lookup(
        &mut self,
        ticket: LookupTicket,
        draft: &mut RecordDraft,
        address: Option<Address>,
    ) -> AutofillOutcome {
        if ticket.0 != self.lookup_seq {
            info!(
                "event=postal_autofill module=service status=ok outcome=superseded ticket={}",
                ticket.0
            );
            return AutofillOutcome::Superseded;
        }

        let Some(address) = address else {
            self.notifier
                .notify(Notice::new(MSG_ADDRESS_NOT_FOUND, Severity::Info));
            return AutofillOutcome::NoData;
        };

        fill_if_empty(&mut draft.street, &address.street);
        fill_if_empty(&mut draft.city, &address.city);
        fill_if_empty(&mut draft.state, &address.state);

        self.notifier
            .notify(Notice::new(MSG_ADDRESS_FILLED, Severity::Info));
        AutofillOutcome::Filled(address)
    }

    /// Full blur-handler path: resolve the draft's postal code and autofill.
    ///
    /// Malformed codes resolve to no-data without reaching the lookup
    /// capability; transport failures are logged and degrade to no-data.
    pub fn autofill_address(&mut self, draft: &mut RecordDraft) -> AutofillOutcome {
        let ticket = self.start_postal_lookup();

        if normalize_postal_code(&draft.postal_code).is_none() {
            return self.finish_postal_lookup(ticket, draft, None);
        }

        let address = match self.lookup.by_postal_code(&draft.postal_code) {
            Ok(found) => found,
            Err(err) => {
                warn!(
                    "event=postal_lookup module=service status=error error_code=lookup_failed error={err}"
                );
                None
            }
        };
        self.finish_postal_lookup(ticket, draft, address)
    }

    /// Validates and persists the draft as a new record.
    ///
    /// Validation runs in field order: name, email, then tax ID (only when
    /// present). The first failure aborts with an error notice and leaves
    /// the draft and storage untouched. On success the record is prepended,
    /// the collection saved, and the draft reset for the next entry.
    pub fn submit(&mut self, draft: &mut RecordDraft) -> StoreResult<SubmitOutcome> {
        if let Some(failure) = first_validation_failure(draft) {
            self.notifier
                .notify(Notice::new(failure.message(), Severity::Error));
            info!(
                "event=submit module=service status=ok outcome=rejected field={failure:?}"
            );
            return Ok(SubmitOutcome::Rejected(failure));
        }

        let record = Record::from_draft(draft.clone());
        let id = record.id;

        let mut records = self.store.load_all();
        records.insert(0, record);
        self.store.save_all(&records)?;

        self.notifier.notify(Notice::new(MSG_SAVED, Severity::Success));
        *draft = RecordDraft::default();

        info!(
            "event=submit module=service status=ok outcome=saved id={id} total={}",
            records.len()
        );
        Ok(SubmitOutcome::Saved {
            id,
            total: records.len(),
        })
    }

    /// Builds the browser view, re-reading storage on every call.
    pub fn browse(&self, filter: &str) -> BrowserView {
        build_view(&self.store.load_all(), filter)
    }

    /// Current collection, newest first.
    pub fn records(&self) -> Vec<Record> {
        self.store.load_all()
    }

    /// Deletes one record by stable id. Returns whether it existed.
    ///
    /// Confirmation is the caller's responsibility; a declined
    /// confirmation simply never reaches this method.
    pub fn delete_record(&mut self, id: RecordId) -> StoreResult<bool> {
        let mut records = self.store.load_all();
        let before = records.len();
        records.retain(|record| record.id != id);

        if records.len() == before {
            return Ok(false);
        }

        self.store.save_all(&records)?;
        self.notifier.notify(Notice::new(MSG_DELETED, Severity::Info));
        info!("event=delete module=service status=ok id={id}");
        Ok(true)
    }

    /// Replaces the stored collection with an empty one.
    pub fn clear_all(&mut self) -> StoreResult<()> {
        self.store.save_all(&[])?;
        self.notifier.notify(Notice::new(MSG_CLEARED, Severity::Info));
        info!("event=clear module=service status=ok");
        Ok(())
    }

    /// Exports the collection into `dir` as a dated JSON file.
    ///
    /// An empty collection produces one informational notice and no file.
    pub fn export_to(&mut self, dir: &Path) -> Result<Option<PathBuf>, ExportError> {
        let records = self.store.load_all();
        if records.is_empty() {
            self.notifier
                .notify(Notice::new(MSG_NOTHING_TO_EXPORT, Severity::Info));
            return Ok(None);
        }

        let path = export_all(&records, dir)?;
        self.notifier
            .notify(Notice::new(MSG_EXPORT_STARTED, Severity::Info));
        info!(
            "event=export module=service status=ok total={} dir={}",
            records.len(),
            dir.display()
        );
        Ok(path)
    }

    /// Access to the notifier, mainly for callers that render notices.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Mutable access to the notifier.
    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }
}

fn first_validation_failure(draft: &RecordDraft) -> Option<ValidationFailure> {
    if !is_valid_name(&draft.name) {
        return Some(ValidationFailure::Name);
    }
    if !is_valid_email(draft.email.trim()) {
        return Some(ValidationFailure::Email);
    }
    let tax_id = draft.tax_id.trim();
    if !tax_id.is_empty() && !is_valid_tax_id(tax_id) {
        return Some(ValidationFailure::TaxId);
    }
    None
}

fn fill_if_empty(slot: &mut String, value: &str) {
    if slot.trim().is_empty() && !value.is_empty() {
        *slot = value.to_string();
    }
}
