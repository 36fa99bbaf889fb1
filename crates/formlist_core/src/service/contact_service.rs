//! Contact form controller.
//!
//! # Responsibility
//! - Track the form draft, inline field errors and message history.
//! - Validate per field on a debounce, on blur and on submit.
//! - Persist history through `ListStore` under `contact_messages`.
//!
//! # Invariants
//! - History is newest-first; submissions are prepended.
//! - A rejected submit leaves history and store untouched.
//! - After a failed write, history equals what the store holds.

use crate::config::{ContactRules, DebounceConfig, CONTACT_STORAGE_KEY};
use crate::debounce::Debouncer;
use crate::model::contact::ContactMessage;
use crate::model::new_entity_id;
use crate::service::notice::Notice;
use crate::service::ActionOutcome;
use crate::store::{KeyValueStore, ListStore};
use crate::validate::{validate_contact, validate_field, ContactDraft, ContactField, FieldCheck};
use crate::view::{self, Node};
use log::{debug, info, warn};
use mockable::{Clock, DefaultClock};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

const SENT: &str = "Message sent successfully!";
const DELETED: &str = "Message deleted.";
const SAVE_FAILED: &str = "Failed to save message. Please try again.";
const DELETE_FAILED: &str = "Failed to delete message. Please try again.";
const CONFIRM_DELETE: &str = "Delete this message?";

/// Everything the contact page renders from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactState {
    /// Newest-first history.
    pub messages: Vec<ContactMessage>,
    pub draft: ContactDraft,
    /// Inline errors for fields that currently fail validation.
    pub errors: BTreeMap<ContactField, String>,
    pub notice: Option<Notice>,
}

impl ContactState {
    pub fn error(&self, field: ContactField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }
}

/// User events the contact page reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactEvent {
    Input { field: ContactField, value: String },
    Blur(ContactField),
    Submit,
    Delete(String),
    /// Timer tick; releases due debounced validations.
    Tick,
    DismissNotice,
}

impl ContactEvent {
    /// Resolves a delegated click on the history list.
    pub fn from_target(action: &str, id: Option<&str>) -> Option<Self> {
        match (action, id) {
            (view::ACTION_DELETE, Some(id)) if !id.is_empty() => {
                Some(Self::Delete(id.to_string()))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
struct FieldGates {
    name: Debouncer<String>,
    email: Debouncer<String>,
    message: Debouncer<String>,
}

impl FieldGates {
    fn new(delays: &DebounceConfig) -> Self {
        Self {
            name: Debouncer::new(delays.contact_field),
            email: Debouncer::new(delays.contact_field),
            message: Debouncer::new(delays.contact_field),
        }
    }

    fn get_mut(&mut self, field: ContactField) -> &mut Debouncer<String> {
        match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Message => &mut self.message,
        }
    }

    fn cancel_all(&mut self) {
        for field in ContactField::ALL {
            self.get_mut(field).cancel();
        }
    }
}

/// Contact app instance bound to one store.
pub struct ContactApp<S: KeyValueStore> {
    list: ListStore<S, ContactMessage>,
    rules: ContactRules,
    clock: Arc<dyn Clock>,
    gates: FieldGates,
    state: ContactState,
}

impl<S: KeyValueStore> ContactApp<S> {
    /// Creates an app with default rules, delays and the system clock.
    pub fn new(store: S) -> Self {
        Self::with_options(
            store,
            ContactRules::default(),
            DebounceConfig::default(),
            Arc::new(DefaultClock),
        )
    }

    /// Creates an app and loads history from `store`.
    pub fn with_options(
        store: S,
        rules: ContactRules,
        delays: DebounceConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let list = ListStore::new(store, CONTACT_STORAGE_KEY);
        let messages = list.load();
        info!(
            "event=app_load module=contact status=ok count={}",
            messages.len()
        );
        Self {
            list,
            rules,
            clock,
            gates: FieldGates::new(&delays),
            state: ContactState {
                messages,
                ..ContactState::default()
            },
        }
    }

    pub fn state(&self) -> &ContactState {
        &self.state
    }

    pub fn messages(&self) -> &[ContactMessage] {
        &self.state.messages
    }

    pub fn store(&self) -> &S {
        self.list.store()
    }

    pub fn rules(&self) -> &ContactRules {
        &self.rules
    }

    /// Whether a debounced validation is still waiting for `field`.
    pub fn is_validation_pending(&self, field: ContactField) -> bool {
        match field {
            ContactField::Name => self.gates.name.is_pending(),
            ContactField::Email => self.gates.email.is_pending(),
            ContactField::Message => self.gates.message.is_pending(),
        }
    }

    /// Records a keystroke and schedules validation for that field.
    pub fn input(&mut self, field: ContactField, value: impl Into<String>, now: Instant) {
        let value = value.into();
        self.state.draft.set(field, value.clone());
        self.gates.get_mut(field).trigger(now, value);
    }

    /// Runs validations whose quiet period has elapsed.
    ///
    /// Returns `true` when any field was re-validated.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut ran = false;
        for field in ContactField::ALL {
            if let Some(value) = self.gates.get_mut(field).poll(now) {
                let check = validate_field(field, &value, &self.rules);
                self.apply_check(field, &check);
                ran = true;
            }
        }
        ran
    }

    /// Validates `field` immediately, dropping any pending keystroke check.
    pub fn blur(&mut self, field: ContactField) -> FieldCheck {
        self.gates.get_mut(field).cancel();
        let check = validate_field(field, self.state.draft.get(field), &self.rules);
        self.apply_check(field, &check);
        check
    }

    /// Replaces the whole draft without scheduling validation.
    pub fn set_draft(&mut self, draft: ContactDraft) {
        self.gates.cancel_all();
        self.state.draft = draft;
    }

    /// Validates all fields and, when valid, stores a new message.
    pub fn submit(&mut self) -> ActionOutcome {
        self.gates.cancel_all();
        let check = validate_contact(&self.state.draft, &self.rules);
        for field in ContactField::ALL {
            self.apply_check(field, check.field(field));
        }
        if !check.is_valid() {
            debug!(
                "event=contact_submit module=contact status=rejected invalid_fields={}",
                self.state.errors.len()
            );
            return ActionOutcome::Rejected;
        }

        let draft = &self.state.draft;
        let message = ContactMessage::from_form(
            new_entity_id(),
            &draft.name,
            &draft.email,
            &draft.message,
            self.clock.utc(),
        );
        let id = message.id.clone();
        self.state.messages.insert(0, message);

        if !self.list.save(&self.state.messages) {
            self.recover(SAVE_FAILED);
            warn!("event=contact_submit module=contact status=error error_code=save_failed");
            return ActionOutcome::StorageFailed;
        }

        self.state.draft = ContactDraft::default();
        self.state.errors.clear();
        self.state.notice = Some(Notice::success(SENT));
        info!("event=contact_submit module=contact status=ok id={id}");
        ActionOutcome::Saved
    }

    /// Removes one message after `confirm` accepts the prompt.
    ///
    /// Unknown ids leave history and store untouched without prompting.
    pub fn delete(&mut self, id: &str, confirm: impl FnOnce(&str) -> bool) -> ActionOutcome {
        if !self.state.messages.iter().any(|message| message.id == id) {
            debug!("event=contact_delete module=contact status=not_found id={id}");
            return ActionOutcome::Unchanged;
        }
        if !confirm(CONFIRM_DELETE) {
            return ActionOutcome::Cancelled;
        }

        self.state.messages.retain(|message| message.id != id);
        if !self.list.save(&self.state.messages) {
            self.recover(DELETE_FAILED);
            warn!("event=contact_delete module=contact status=error id={id} error_code=save_failed");
            return ActionOutcome::StorageFailed;
        }

        self.state.notice = Some(Notice::success(DELETED));
        info!("event=contact_delete module=contact status=ok id={id}");
        ActionOutcome::Saved
    }

    pub fn dismiss_notice(&mut self) {
        self.state.notice = None;
    }

    /// Re-reads history from the store, discarding in-memory changes.
    pub fn reload(&mut self) {
        self.state.messages = self.list.load();
    }

    /// Routes one event to its handler.
    pub fn dispatch(
        &mut self,
        event: ContactEvent,
        now: Instant,
        confirm: impl FnOnce(&str) -> bool,
    ) -> ActionOutcome {
        match event {
            ContactEvent::Input { field, value } => {
                self.input(field, value, now);
                ActionOutcome::Updated
            }
            ContactEvent::Blur(field) => {
                self.blur(field);
                ActionOutcome::Updated
            }
            ContactEvent::Submit => self.submit(),
            ContactEvent::Delete(id) => self.delete(&id, confirm),
            ContactEvent::Tick => {
                if self.tick(now) {
                    ActionOutcome::Updated
                } else {
                    ActionOutcome::Unchanged
                }
            }
            ContactEvent::DismissNotice => {
                self.dismiss_notice();
                ActionOutcome::Updated
            }
        }
    }

    /// Builds the page view for the current state.
    pub fn render(&self) -> Node {
        view::contact::page(&self.state)
    }

    fn apply_check(&mut self, field: ContactField, check: &FieldCheck) {
        match check.error() {
            Some(message) => {
                self.state.errors.insert(field, message.to_string());
            }
            None => {
                self.state.errors.remove(&field);
            }
        }
    }

    fn recover(&mut self, message: &str) {
        self.reload();
        self.state.notice = Some(Notice::error(message));
    }
}

#[cfg(test)]
mod tests {
    use super::{ContactApp, ContactEvent};
    use crate::service::ActionOutcome;
    use crate::store::MemoryStore;
    use crate::validate::{ContactDraft, ContactField};
    use std::time::{Duration, Instant};

    #[test]
    fn keystroke_validation_waits_for_quiet_period() {
        let mut app = ContactApp::new(MemoryStore::new());
        let start = Instant::now();

        app.input(ContactField::Name, "A", start);
        assert!(!app.tick(start + Duration::from_millis(100)));
        assert_eq!(app.state().error(ContactField::Name), None);

        app.input(ContactField::Name, "Al", start + Duration::from_millis(200));
        assert!(!app.tick(start + Duration::from_millis(400)));
        assert!(app.tick(start + Duration::from_millis(500)));
        assert_eq!(app.state().error(ContactField::Name), None);

        app.input(ContactField::Name, "A", start + Duration::from_millis(600));
        assert!(app.tick(start + Duration::from_millis(900)));
        assert_eq!(
            app.state().error(ContactField::Name),
            Some("Name must be at least 2 characters.")
        );
    }

    #[test]
    fn blur_validates_immediately_and_cancels_pending_check() {
        let mut app = ContactApp::new(MemoryStore::new());
        let start = Instant::now();
        app.input(ContactField::Email, "nope", start);

        let check = app.blur(ContactField::Email);
        assert!(!check.valid);
        assert!(!app.is_validation_pending(ContactField::Email));
        assert_eq!(
            app.state().error(ContactField::Email),
            Some("Please enter a valid email address.")
        );
    }

    #[test]
    fn rejected_submit_keeps_history_and_draft() {
        let store = MemoryStore::new();
        let mut app = ContactApp::new(store.clone());
        app.set_draft(ContactDraft::new("Al", "a@b.co", "short"));

        assert_eq!(app.submit(), ActionOutcome::Rejected);
        assert!(app.messages().is_empty());
        assert_eq!(app.state().draft.message, "short");
        assert_eq!(
            app.state().error(ContactField::Message),
            Some("Message must be at least 10 characters.")
        );
        assert_eq!(store.raw("contact_messages"), None);
    }

    #[test]
    fn delegated_delete_target_resolves_event() {
        assert_eq!(
            ContactEvent::from_target("delete", Some("m-1")),
            Some(ContactEvent::Delete("m-1".to_string()))
        );
        assert_eq!(ContactEvent::from_target("delete", None), None);
        assert_eq!(ContactEvent::from_target("toggle", Some("m-1")), None);
    }
}
