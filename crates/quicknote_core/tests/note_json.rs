use chrono::{TimeZone, Utc};
use quicknote_core::{LocalStorage, MemoryStorage, Note, NoteDraft, NoteKind, NoteStore};
use serde_json::{json, Value};
use uuid::Uuid;

#[test]
fn note_serializes_with_camel_case_keys_and_omits_absent_options() {
    let id = Uuid::parse_str("7f1d2c3b-0a4e-4f5d-9c8b-1a2b3c4d5e6f").unwrap();
    let date = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
    let note = Note::with_id(id, date, NoteDraft::text("Buy milk"));

    let value = serde_json::to_value(&note).unwrap();
    assert_eq!(
        value,
        json!({
            "id": "7f1d2c3b-0a4e-4f5d-9c8b-1a2b3c4d5e6f",
            "date": "2024-03-01T12:30:00Z",
            "content": "Buy milk",
            "typeNote": "text",
        })
    );
}

#[test]
fn browser_written_array_loads_with_nulls_and_aliases() {
    let raw = r#"[
        {
            "id": "0b9f3a52-8c1e-4e8e-b0a4-3d2f1e0c9b8a",
            "date": "2024-03-02T08:15:42.123Z",
            "content": "Dictated reminder",
            "typeNote": "audio",
            "priority": "high",
            "imageUrl": null
        },
        {
            "id": "5c6d7e8f-1a2b-4c3d-8e9f-0a1b2c3d4e5f",
            "date": "2024-03-01T19:00:00.000Z",
            "content": "Typed note",
            "typeNote": "text"
        }
    ]"#;
    let mut storage = MemoryStorage::new();
    storage.set_item("notes", raw).unwrap();

    let store = NoteStore::load(storage).unwrap();
    let notes = store.notes();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].kind, NoteKind::Voice);
    assert_eq!(notes[0].priority.as_deref(), Some("high"));
    assert_eq!(notes[0].image_url, None);
    assert_eq!(notes[0].date.timestamp_subsec_millis(), 123);
    assert_eq!(notes[1].content, "Typed note");
}

#[test]
fn round_trip_preserves_content_and_order() {
    let mut store = NoteStore::load(MemoryStorage::new()).unwrap();
    store
        .create(NoteDraft::text("one").with_image_url("a.png"))
        .unwrap();
    store.create(NoteDraft::voice("two")).unwrap();
    store
        .create(NoteDraft::text("three").with_priority("low"))
        .unwrap();

    let encoded = serde_json::to_string(store.notes()).unwrap();
    let decoded: Vec<Note> = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded.as_slice(), store.notes());

    let value: Value = serde_json::from_str(&encoded).unwrap();
    assert_eq!(value[0]["typeNote"], "text");
    assert_eq!(value[1]["typeNote"], "voice");
    assert_eq!(value[2]["imageUrl"], "a.png");
}

#[test]
fn unknown_type_tag_is_a_parse_failure() {
    let raw = r#"[{"id":"0b9f3a52-8c1e-4e8e-b0a4-3d2f1e0c9b8a","date":"2024-03-02T08:15:42.123Z","content":"x","typeNote":"video"}]"#;
    let mut storage = MemoryStorage::new();
    storage.set_item("notes", raw).unwrap();
    assert!(NoteStore::load(storage).is_err());
}

#[test]
fn mixed_case_type_tags_load() {
    let raw = r#"[{"id":"0b9f3a52-8c1e-4e8e-b0a4-3d2f1e0c9b8a","date":"2024-03-02T08:15:42.123Z","content":"x","typeNote":"Voice"}]"#;
    let mut storage = MemoryStorage::new();
    storage.set_item("notes", raw).unwrap();

    let store = NoteStore::load(storage).unwrap();
    assert_eq!(store.notes()[0].kind, NoteKind::Voice);
}
