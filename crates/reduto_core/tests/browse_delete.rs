use reduto_core::view::EMPTY_PLACEHOLDER;
use reduto_core::{
    render_table, Address, AddressLookup, LookupResult, MemoryKeyValueStore, MemoryNotifier,
    RecordDraft, RegistrationService, Severity,
};
use uuid::Uuid;

struct NoLookup;

impl AddressLookup for NoLookup {
    fn by_postal_code(&self, _code: &str) -> LookupResult<Option<Address>> {
        Ok(None)
    }
}

fn seeded_service() -> RegistrationService<MemoryKeyValueStore, NoLookup, MemoryNotifier> {
    let mut service =
        RegistrationService::new(MemoryKeyValueStore::new(), NoLookup, MemoryNotifier::new());

    for (name, email, city) in [
        ("Ana Silva", "ana@example.com", "Recife"),
        ("Bruno Costa", "bruno@example.com", "São Paulo"),
        ("Carla Souza", "carla@example.com", "Recife"),
    ] {
        let mut draft = RecordDraft {
            name: name.to_string(),
            email: email.to_string(),
            city: city.to_string(),
            ..RecordDraft::default()
        };
        service.submit(&mut draft).unwrap();
    }
    service
}

#[test]
fn filtered_view_narrows_rows_but_keeps_total() {
    let service = seeded_service();
    let view = service.browse("recife");
    assert_eq!(view.total, 3);
    assert_eq!(view.rows.len(), 2);
}

#[test]
fn deleting_the_filtered_row_removes_exactly_that_record() {
    let mut service = seeded_service();

    // Under the filter, "Bruno Costa" is row 0 even though it sits in the
    // middle of the unfiltered collection. Deleting by the row's id must
    // remove Bruno, not whichever record occupies index 0 unfiltered.
    let view = service.browse("bruno");
    assert_eq!(view.rows.len(), 1);
    let target = view.rows[0].id;

    assert!(service.delete_record(target).unwrap());

    let names: Vec<String> = service
        .records()
        .into_iter()
        .map(|record| record.name)
        .collect();
    assert_eq!(names, vec!["Carla Souza", "Ana Silva"]);
    assert_eq!(
        service.notifier().messages_with(Severity::Info),
        vec!["Cadastro excluído."]
    );
}

#[test]
fn deleting_an_unknown_id_reports_false_and_changes_nothing() {
    let mut service = seeded_service();
    assert!(!service.delete_record(Uuid::new_v4()).unwrap());
    assert_eq!(service.records().len(), 3);
}

#[test]
fn clearing_empties_storage_and_notifies() {
    let mut service = seeded_service();
    service.clear_all().unwrap();

    assert!(service.records().is_empty());
    let rendered = render_table(&service.browse(""));
    assert!(rendered.contains("Cadastros (0)"));
    assert!(rendered.contains(EMPTY_PLACEHOLDER));
}

#[test]
fn unmatched_filter_renders_the_placeholder() {
    let service = seeded_service();
    let rendered = render_table(&service.browse("zzz"));
    assert!(rendered.contains(EMPTY_PLACEHOLDER));
    assert!(rendered.contains("Cadastros (3)"));
}
