//! Core logic for the formlist contact and todo apps.
//! This crate is the single source of truth for validation, derivation and
//! persistence rules; hosts only forward events and draw the view tree.

pub mod config;
pub mod db;
pub mod debounce;
pub mod logging;
pub mod model;
pub mod search;
pub mod service;
pub mod store;
pub mod validate;
pub mod view;

pub use config::{ContactRules, DebounceConfig, TodoRules, CONTACT_STORAGE_KEY, TODO_STORAGE_KEY};
pub use debounce::Debouncer;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::contact::ContactMessage;
pub use model::todo::TodoItem;
pub use search::derive::{derive, FilterMode, TodoStats};
pub use service::contact_service::{ContactApp, ContactEvent, ContactState};
pub use service::notice::{Notice, NoticeKind};
pub use service::todo_service::{TodoApp, TodoEvent, TodoState};
pub use service::ActionOutcome;
pub use store::{KeyValueStore, ListStore, MemoryStore, SqliteStore, StoreError, StoreResult};
pub use validate::{
    validate_contact, validate_email, validate_field, validate_message, validate_name,
    validate_todo_text, ContactCheck, ContactDraft, ContactField, FieldCheck,
};
pub use view::{render_html, Element, Node};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
