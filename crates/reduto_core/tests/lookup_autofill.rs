use reduto_core::{
    Address, AddressLookup, AutofillOutcome, LookupError, LookupResult, MemoryKeyValueStore,
    MemoryNotifier, RecordDraft, RegistrationService, Severity,
};
use std::cell::Cell;
use std::rc::Rc;

enum Script {
    Found(Address),
    NotFound,
    Fail,
}

struct ScriptedLookup {
    script: Script,
    calls: Rc<Cell<u32>>,
}

impl AddressLookup for ScriptedLookup {
    fn by_postal_code(&self, _code: &str) -> LookupResult<Option<Address>> {
        self.calls.set(self.calls.get() + 1);
        match &self.script {
            Script::Found(address) => Ok(Some(address.clone())),
            Script::NotFound => Ok(None),
            Script::Fail => Err(LookupError::Status(500)),
        }
    }
}

fn paulista() -> Address {
    Address {
        street: "Avenida Paulista".to_string(),
        neighborhood: "Bela Vista".to_string(),
        city: "São Paulo".to_string(),
        state: "SP".to_string(),
    }
}

fn service_with(
    script: Script,
) -> (
    RegistrationService<MemoryKeyValueStore, ScriptedLookup, MemoryNotifier>,
    Rc<Cell<u32>>,
) {
    let calls = Rc::new(Cell::new(0));
    let lookup = ScriptedLookup {
        script,
        calls: Rc::clone(&calls),
    };
    let service =
        RegistrationService::new(MemoryKeyValueStore::new(), lookup, MemoryNotifier::new());
    (service, calls)
}

#[test]
fn malformed_postal_code_never_reaches_the_lookup() {
    let (mut service, calls) = service_with(Script::Found(paulista()));
    let mut draft = RecordDraft {
        postal_code: "1234".to_string(),
        ..RecordDraft::default()
    };

    let outcome = service.autofill_address(&mut draft);
    assert_eq!(outcome, AutofillOutcome::NoData);
    assert_eq!(calls.get(), 0);
    assert_eq!(
        service.notifier().messages_with(Severity::Info),
        vec!["CEP não encontrado ou inválido."]
    );
}

#[test]
fn successful_lookup_fills_only_empty_dependent_fields() {
    let (mut service, calls) = service_with(Script::Found(paulista()));
    let mut draft = RecordDraft {
        postal_code: "01310-930".to_string(),
        street: "Rua Já Preenchida, 10".to_string(),
        ..RecordDraft::default()
    };

    let outcome = service.autofill_address(&mut draft);
    assert!(matches!(outcome, AutofillOutcome::Filled(_)));
    assert_eq!(calls.get(), 1);

    assert_eq!(draft.street, "Rua Já Preenchida, 10");
    assert_eq!(draft.city, "São Paulo");
    assert_eq!(draft.state, "SP");
    assert_eq!(
        service.notifier().messages_with(Severity::Info),
        vec!["Endereço preenchido automaticamente pelo CEP."]
    );
}

#[test]
fn unknown_code_notifies_without_touching_the_draft() {
    let (mut service, _calls) = service_with(Script::NotFound);
    let mut draft = RecordDraft {
        postal_code: "99999999".to_string(),
        ..RecordDraft::default()
    };
    let before = draft.clone();

    let outcome = service.autofill_address(&mut draft);
    assert_eq!(outcome, AutofillOutcome::NoData);
    assert_eq!(draft, before);
    assert_eq!(
        service.notifier().messages_with(Severity::Info),
        vec!["CEP não encontrado ou inválido."]
    );
}

#[test]
fn transport_failure_degrades_to_no_data() {
    let (mut service, calls) = service_with(Script::Fail);
    let mut draft = RecordDraft {
        postal_code: "01310930".to_string(),
        ..RecordDraft::default()
    };

    let outcome = service.autofill_address(&mut draft);
    assert_eq!(outcome, AutofillOutcome::NoData);
    assert_eq!(calls.get(), 1);
    assert!(draft.city.is_empty());
}

#[test]
fn superseded_lookup_result_is_discarded() {
    let (mut service, _calls) = service_with(Script::NotFound);
    let mut draft = RecordDraft::default();

    let stale = service.start_postal_lookup();
    let latest = service.start_postal_lookup();

    let outcome = service.finish_postal_lookup(stale, &mut draft, Some(paulista()));
    assert_eq!(outcome, AutofillOutcome::Superseded);
    assert!(draft.city.is_empty());
    assert!(service.notifier().notices.is_empty());

    let outcome = service.finish_postal_lookup(latest, &mut draft, Some(paulista()));
    assert!(matches!(outcome, AutofillOutcome::Filled(_)));
    assert_eq!(draft.city, "São Paulo");
}
