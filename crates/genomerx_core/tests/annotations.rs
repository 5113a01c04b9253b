use genomerx_core::{annotation_key, AnnotationRepository, AnnotationService, MemoryStateStore};

fn service_with_store(store: MemoryStateStore) -> AnnotationService<MemoryStateStore> {
    let repo = AnnotationRepository::load(store).expect("annotation repo load");
    AnnotationService::new(repo)
}

#[test]
fn get_returns_the_empty_default_for_unknown_keys() {
    let annotations = service_with_store(MemoryStateStore::new());
    let entry = annotations.get(&annotation_key("sample.fasta", "2025-03-01"));
    assert!(entry.notes.is_empty());
    assert!(entry.tags.is_empty());
}

#[test]
fn save_normalizes_tags_and_replaces_the_entry() {
    let mut annotations = service_with_store(MemoryStateStore::new());
    let key = annotation_key("sample.fasta", "2025-03-01");

    let saved = annotations
        .save(&key, "suspected ESBL", ["a", " a", "b ", "  "])
        .expect("save");
    assert_eq!(saved.tags, vec!["a".to_string(), "b".to_string()]);

    let replaced = annotations
        .save(&key, "confirmed", ["Urgent"])
        .expect("overwrite");
    assert_eq!(replaced.notes, "confirmed");
    assert_eq!(replaced.tags, vec!["Urgent".to_string()]);
    assert_eq!(annotations.get(&key), replaced);
}

#[test]
fn repeated_identical_saves_are_idempotent() {
    let store = MemoryStateStore::new();
    let mut annotations = service_with_store(store.clone());
    let key = annotation_key("sample.fasta", "2025-03-01");

    annotations
        .save(&key, "notes", ["qc", "review"])
        .expect("first save");
    let payload_after_first = store.raw("grx_notes").expect("persisted payload");
    annotations
        .save(&key, "notes", ["qc", "review"])
        .expect("second save");
    assert_eq!(store.raw("grx_notes").expect("payload"), payload_after_first);
}

#[test]
fn entries_are_isolated_per_artifact_key() {
    let mut annotations = service_with_store(MemoryStateStore::new());
    let first = annotation_key("sample.fasta", "2025-03-01");
    let second = annotation_key("sample.fasta", "2025-03-02");

    annotations.save(&first, "first run", ["qc"]).expect("save");
    assert!(annotations.get(&second).notes.is_empty());
}
