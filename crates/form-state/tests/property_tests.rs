//! Property-based tests for form-state
//!
//! Draft round-trips through the store and restore into live forms.

use form_state::{FormFields, FormStateStore, KeyValueStore, MemoryForm, MemoryStore};
use proptest::prelude::*;
use shared_types::{FormId, FormSnapshot};

fn field_name() -> impl Strategy<Value = String> {
    "[a-z_]{1,12}"
}

/// Arbitrary text a user might type, including quotes and unicode
fn field_value() -> impl Strategy<Value = String> {
    prop_oneof![
        "[ -~]{0,30}",
        "[áéíóúñÑ ]{0,10}",
        Just("\"quoted\" \\ back\nslash".to_string()),
    ]
}

fn snapshot() -> impl Strategy<Value = FormSnapshot> {
    prop::collection::btree_map(field_name(), field_value(), 0..12)
        .prop_map(|fields| fields.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn persist_then_restore_is_identity(id in "[a-z0-9-]{1,16}", snapshot in snapshot()) {
        let form_id = FormId::Explicit(id);
        let mut drafts = FormStateStore::with_defaults(MemoryStore::new());

        drafts.persist(&form_id, &snapshot).unwrap();
        prop_assert_eq!(drafts.restore(&form_id), Some(snapshot));
    }

    #[test]
    fn restore_reproduces_snapshot_in_matching_form(snapshot in snapshot()) {
        let form_id = FormId::Explicit("form".to_string());
        let mut drafts = FormStateStore::with_defaults(MemoryStore::new());
        drafts.persist(&form_id, &snapshot).unwrap();

        // Same field names, blank values, plus one extra field
        let mut form = snapshot
            .iter()
            .fold(MemoryForm::new(), |form, (name, _)| form.with_field(name, ""))
            .with_field("EXTRA", "default");

        let outcome = drafts.restore_into(&form_id, &mut form).unwrap();
        prop_assert_eq!(outcome.applied, snapshot.len());
        prop_assert_eq!(outcome.ignored, 0);
        prop_assert_eq!(form.value("EXTRA"), Some("default"));

        for (name, value) in snapshot.iter() {
            prop_assert_eq!(form.value(name), Some(value));
        }
    }

    #[test]
    fn each_persist_replaces_the_whole_draft(first in snapshot(), second in snapshot()) {
        let form_id = FormId::Generated("s-0011223344556677".to_string());
        let mut drafts = FormStateStore::with_defaults(MemoryStore::new());

        drafts.persist(&form_id, &first).unwrap();
        drafts.persist(&form_id, &second).unwrap();

        prop_assert_eq!(drafts.restore(&form_id), Some(second));
        prop_assert_eq!(drafts.store().len(), 1);
    }

    #[test]
    fn arbitrary_stored_text_never_panics(raw in ".{0,64}") {
        let mut store = MemoryStore::new();
        store.set("form_x", &raw).unwrap();
        let drafts = FormStateStore::with_defaults(store);

        let mut form = MemoryForm::new().with_field("a", "1");
        let _ = drafts.restore_into(&FormId::Explicit("x".to_string()), &mut form);
        prop_assert!(form.has_field("a"));
    }
}
