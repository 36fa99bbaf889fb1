mod common;

use common::{accept, decline, StepClock};
use formlist_core::{
    ActionOutcome, ContactApp, ContactDraft, ContactField, ContactMessage, ContactRules,
    DebounceConfig, KeyValueStore, MemoryStore, NoticeKind, CONTACT_STORAGE_KEY,
};
use std::sync::Arc;

fn app(store: &MemoryStore) -> ContactApp<MemoryStore> {
    ContactApp::with_options(
        store.clone(),
        ContactRules::default(),
        DebounceConfig::default(),
        Arc::new(StepClock::starting_at(1_700_000_000)),
    )
}

fn send(app: &mut ContactApp<MemoryStore>, name: &str, body: &str) -> ActionOutcome {
    app.set_draft(ContactDraft::new(name, "a@b.co", body));
    app.submit()
}

#[test]
fn valid_submission_is_prepended_persisted_and_clears_form() {
    let store = MemoryStore::new();
    let mut app = app(&store);
    assert!(send(&mut app, "Earlier", "First message body").is_saved());

    let outcome = send(&mut app, "Al", "Hello there!!");
    assert_eq!(outcome, ActionOutcome::Saved);

    let newest = &app.messages()[0];
    assert_eq!(newest.name, "Al");
    assert_eq!(newest.email, "a@b.co");
    assert_eq!(newest.message, "Hello there!!");
    assert_eq!(newest.timestamp, 1_700_000_001_000);
    assert_eq!(app.messages().len(), 2);

    assert_eq!(app.state().draft, ContactDraft::default());
    assert!(app.state().errors.is_empty());
    let notice = app.state().notice.as_ref().unwrap();
    assert_eq!(notice.kind, NoticeKind::Success);
    assert_eq!(notice.text, "Message sent successfully!");

    let stored: Vec<ContactMessage> =
        serde_json::from_str(&store.raw(CONTACT_STORAGE_KEY).unwrap()).unwrap();
    assert_eq!(stored, app.messages());
}

#[test]
fn invalid_submission_sets_every_failing_field_error() {
    let store = MemoryStore::new();
    let mut app = app(&store);
    app.set_draft(ContactDraft::new(" ", "", "hi"));

    assert_eq!(app.submit(), ActionOutcome::Rejected);
    assert_eq!(
        app.state().error(ContactField::Name),
        Some("Name must be at least 2 characters.")
    );
    assert_eq!(app.state().error(ContactField::Email), Some("Email is required."));
    assert_eq!(
        app.state().error(ContactField::Message),
        Some("Message must be at least 10 characters.")
    );
    assert!(app.messages().is_empty());
}

#[test]
fn deleting_unknown_id_leaves_history_unchanged() {
    let store = MemoryStore::new();
    let mut app = app(&store);
    assert!(send(&mut app, "Al", "Hello there!!").is_saved());
    let before = app.messages().to_vec();
    let stored_before = store.raw(CONTACT_STORAGE_KEY);

    assert_eq!(app.delete("missing-id", accept), ActionOutcome::Unchanged);
    assert_eq!(app.messages(), before.as_slice());
    assert_eq!(store.raw(CONTACT_STORAGE_KEY), stored_before);
}

#[test]
fn declined_confirmation_keeps_message() {
    let store = MemoryStore::new();
    let mut app = app(&store);
    assert!(send(&mut app, "Al", "Hello there!!").is_saved());
    let id = app.messages()[0].id.clone();

    assert_eq!(app.delete(&id, decline), ActionOutcome::Cancelled);
    assert_eq!(app.messages().len(), 1);
}

#[test]
fn failed_delete_write_reverts_to_persisted_history() {
    let store = MemoryStore::new();
    let mut app = app(&store);
    assert!(send(&mut app, "Al", "Hello there!!").is_saved());
    assert!(send(&mut app, "Bo", "Second message!!").is_saved());
    let persisted = app.messages().to_vec();
    let id = persisted[1].id.clone();

    store.set_write_failure(true);
    assert_eq!(app.delete(&id, accept), ActionOutcome::StorageFailed);

    assert_eq!(app.messages(), persisted.as_slice());
    let notice = app.state().notice.as_ref().unwrap();
    assert!(notice.is_error());
    assert_eq!(notice.text, "Failed to delete message. Please try again.");
}

#[test]
fn failed_submit_write_keeps_draft_and_drops_unsaved_message() {
    let store = MemoryStore::new();
    let mut app = app(&store);
    store.set_write_failure(true);

    assert_eq!(send(&mut app, "Al", "Hello there!!"), ActionOutcome::StorageFailed);
    assert!(app.messages().is_empty());
    assert_eq!(app.state().draft.name, "Al");
    assert!(app.state().notice.as_ref().unwrap().is_error());
}

#[test]
fn history_survives_new_app_instance() {
    let store = MemoryStore::new();
    {
        let mut first = app(&store);
        assert!(send(&mut first, "Al", "Hello there!!").is_saved());
    }
    let second = app(&store);
    assert_eq!(second.messages().len(), 1);
    assert_eq!(second.messages()[0].name, "Al");
}

#[test]
fn unreadable_history_loads_as_empty() {
    let store = MemoryStore::new();
    store.set(CONTACT_STORAGE_KEY, "not json").unwrap();
    assert!(app(&store).messages().is_empty());

    store.set(CONTACT_STORAGE_KEY, "[]").unwrap();
    store.set_read_failure(true);
    assert!(app(&store).messages().is_empty());
}

#[test]
fn rendered_history_lists_delete_targets() {
    let store = MemoryStore::new();
    let mut app = app(&store);
    assert!(send(&mut app, "Al", "Hello there!!").is_saved());

    let page = app.render();
    let buttons = page.find_by_attr("data-action", "delete");
    assert_eq!(buttons.len(), 1);
    assert_eq!(buttons[0].get_attr("data-id"), Some(app.messages()[0].id.as_str()));
    assert!(page.text_content().contains("Message history (1)"));
}
