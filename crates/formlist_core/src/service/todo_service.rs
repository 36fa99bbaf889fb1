//! Todo list controller.
//!
//! # Responsibility
//! - Own the todo list, filter mode, search query and form input state.
//! - Debounce search keystrokes before the visible subset is recomputed.
//! - Persist the list through `ListStore` under `todo_list_v1`.
//!
//! # Invariants
//! - New todos are prepended; stored order is newest-first.
//! - Filter and query only affect `visible()`, never the stored list.
//! - After a failed write, the list equals what the store holds.

use crate::config::{DebounceConfig, TodoRules, TODO_STORAGE_KEY};
use crate::debounce::Debouncer;
use crate::model::new_entity_id;
use crate::model::todo::TodoItem;
use crate::search::derive::{derive, FilterMode, TodoStats};
use crate::service::notice::Notice;
use crate::service::ActionOutcome;
use crate::store::{KeyValueStore, ListStore};
use crate::validate::validate_todo_text;
use crate::view::{self, Node};
use log::{debug, info, warn};
use mockable::{Clock, DefaultClock};
use std::sync::Arc;
use std::time::Instant;

const ADDED: &str = "Todo added.";
const DELETED: &str = "Todo deleted.";
const CLEARED: &str = "Completed todos cleared.";
const SAVE_FAILED: &str = "Failed to save todo. Please try again.";
const UPDATE_FAILED: &str = "Failed to update todo. Please try again.";
const DELETE_FAILED: &str = "Failed to delete todo. Please try again.";
const CONFIRM_DELETE: &str = "Delete this todo?";
const CONFIRM_CLEAR: &str = "Delete all completed todos?";

/// Everything the todo page renders from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoState {
    /// Newest-first list, unfiltered.
    pub items: Vec<TodoItem>,
    /// Current text of the add-todo input.
    pub input: String,
    pub input_error: Option<String>,
    pub filter: FilterMode,
    /// Text currently typed in the search box.
    pub search_text: String,
    /// Query applied to the visible list (lags `search_text` by the debounce).
    pub query: String,
    pub notice: Option<Notice>,
}

/// User events the todo page reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoEvent {
    Input(String),
    Submit,
    SearchInput(String),
    Filter(FilterMode),
    Toggle(String),
    Delete(String),
    ClearCompleted,
    /// Timer tick; releases a due search query.
    Tick,
    DismissNotice,
}

impl TodoEvent {
    /// Resolves a delegated click from `data-action` and `data-id`.
    pub fn from_target(action: &str, id: Option<&str>) -> Option<Self> {
        let id = id.filter(|id| !id.is_empty())?;
        match action {
            view::ACTION_TOGGLE => Some(Self::Toggle(id.to_string())),
            view::ACTION_DELETE => Some(Self::Delete(id.to_string())),
            view::ACTION_FILTER => id.parse().ok().map(Self::Filter),
            _ => None,
        }
    }
}

/// Todo app instance bound to one store.
pub struct TodoApp<S: KeyValueStore> {
    list: ListStore<S, TodoItem>,
    rules: TodoRules,
    clock: Arc<dyn Clock>,
    search: Debouncer<String>,
    state: TodoState,
}

impl<S: KeyValueStore> TodoApp<S> {
    /// Creates an app with default rules, delays and the system clock.
    pub fn new(store: S) -> Self {
        Self::with_options(
            store,
            TodoRules::default(),
            DebounceConfig::default(),
            Arc::new(DefaultClock),
        )
    }

    /// Creates an app and loads the list from `store`.
    pub fn with_options(
        store: S,
        rules: TodoRules,
        delays: DebounceConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let list = ListStore::new(store, TODO_STORAGE_KEY);
        let items = list.load();
        info!("event=app_load module=todo status=ok count={}", items.len());
        Self {
            list,
            rules,
            clock,
            search: Debouncer::new(delays.todo_search),
            state: TodoState {
                items,
                ..TodoState::default()
            },
        }
    }

    pub fn state(&self) -> &TodoState {
        &self.state
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.state.items
    }

    pub fn store(&self) -> &S {
        self.list.store()
    }

    pub fn is_search_pending(&self) -> bool {
        self.search.is_pending()
    }

    /// Items shown under the current filter and applied query.
    pub fn visible(&self) -> Vec<TodoItem> {
        derive(&self.state.items, self.state.filter, &self.state.query)
    }

    pub fn stats(&self) -> TodoStats {
        TodoStats::of(&self.state.items)
    }

    /// Tracks the add-todo input without validating it.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.state.input = text.into();
    }

    /// Submits the current input.
    pub fn submit(&mut self) -> ActionOutcome {
        let text = self.state.input.clone();
        self.add(&text)
    }

    /// Validates `text` and prepends a new open todo.
    pub fn add(&mut self, text: &str) -> ActionOutcome {
        self.state.input = text.to_string();
        let check = validate_todo_text(text, &self.rules);
        if let Some(message) = check.error() {
            self.state.input_error = Some(message.to_string());
            debug!("event=todo_add module=todo status=rejected");
            return ActionOutcome::Rejected;
        }
        self.state.input_error = None;

        let item = TodoItem::new(new_entity_id(), text, self.clock.utc());
        let id = item.id.clone();
        self.state.items.insert(0, item);

        if !self.list.save(&self.state.items) {
            self.recover(SAVE_FAILED);
            warn!("event=todo_add module=todo status=error error_code=save_failed");
            return ActionOutcome::StorageFailed;
        }

        self.state.input.clear();
        self.state.notice = Some(Notice::success(ADDED));
        info!("event=todo_add module=todo status=ok id={id}");
        ActionOutcome::Saved
    }

    /// Flips the completed flag of one todo.
    pub fn toggle(&mut self, id: &str) -> ActionOutcome {
        let Some(item) = self.state.items.iter_mut().find(|item| item.id == id) else {
            debug!("event=todo_toggle module=todo status=not_found id={id}");
            return ActionOutcome::Unchanged;
        };
        item.toggle();
        let completed = item.completed;

        if !self.list.save(&self.state.items) {
            self.recover(UPDATE_FAILED);
            warn!("event=todo_toggle module=todo status=error id={id} error_code=save_failed");
            return ActionOutcome::StorageFailed;
        }

        info!("event=todo_toggle module=todo status=ok id={id} completed={completed}");
        ActionOutcome::Saved
    }

    /// Removes one todo after `confirm` accepts the prompt.
    ///
    /// Unknown ids leave list and store untouched without prompting.
    pub fn delete(&mut self, id: &str, confirm: impl FnOnce(&str) -> bool) -> ActionOutcome {
        if !self.state.items.iter().any(|item| item.id == id) {
            debug!("event=todo_delete module=todo status=not_found id={id}");
            return ActionOutcome::Unchanged;
        }
        if !confirm(CONFIRM_DELETE) {
            return ActionOutcome::Cancelled;
        }

        self.state.items.retain(|item| item.id != id);
        if !self.list.save(&self.state.items) {
            self.recover(DELETE_FAILED);
            warn!("event=todo_delete module=todo status=error id={id} error_code=save_failed");
            return ActionOutcome::StorageFailed;
        }

        self.state.notice = Some(Notice::success(DELETED));
        info!("event=todo_delete module=todo status=ok id={id}");
        ActionOutcome::Saved
    }

    /// Removes every completed todo after one confirmation.
    pub fn clear_completed(&mut self, confirm: impl FnOnce(&str) -> bool) -> ActionOutcome {
        let completed = self.state.items.iter().filter(|item| item.completed).count();
        if completed == 0 {
            return ActionOutcome::Unchanged;
        }
        if !confirm(CONFIRM_CLEAR) {
            return ActionOutcome::Cancelled;
        }

        self.state.items.retain(TodoItem::is_active);
        if !self.list.save(&self.state.items) {
            self.recover(DELETE_FAILED);
            warn!("event=todo_clear_completed module=todo status=error error_code=save_failed");
            return ActionOutcome::StorageFailed;
        }

        self.state.notice = Some(Notice::success(CLEARED));
        info!("event=todo_clear_completed module=todo status=ok removed={completed}");
        ActionOutcome::Saved
    }

    /// Switches the completion filter; takes effect immediately.
    pub fn set_filter(&mut self, mode: FilterMode) {
        self.state.filter = mode;
    }

    /// Records search text and schedules the visible-list refresh.
    pub fn search_input(&mut self, query: impl Into<String>, now: Instant) {
        let query = query.into();
        self.state.search_text = query.clone();
        self.search.trigger(now, query);
    }

    /// Applies search text immediately, dropping any pending refresh.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.search.cancel();
        let query = query.into();
        self.state.search_text = query.clone();
        self.state.query = query;
    }

    /// Applies a due search query. Returns `true` when the query changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.search.poll(now) {
            Some(query) => {
                self.state.query = query;
                true
            }
            None => false,
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.state.notice = None;
    }

    /// Re-reads the list from the store, discarding in-memory changes.
    pub fn reload(&mut self) {
        self.state.items = self.list.load();
    }

    /// Routes one event to its handler.
    pub fn dispatch(
        &mut self,
        event: TodoEvent,
        now: Instant,
        confirm: impl FnOnce(&str) -> bool,
    ) -> ActionOutcome {
        match event {
            TodoEvent::Input(text) => {
                self.set_input(text);
                ActionOutcome::Updated
            }
            TodoEvent::Submit => self.submit(),
            TodoEvent::SearchInput(query) => {
                self.search_input(query, now);
                ActionOutcome::Updated
            }
            TodoEvent::Filter(mode) => {
                self.set_filter(mode);
                ActionOutcome::Updated
            }
            TodoEvent::Toggle(id) => self.toggle(&id),
            TodoEvent::Delete(id) => self.delete(&id, confirm),
            TodoEvent::ClearCompleted => self.clear_completed(confirm),
            TodoEvent::Tick => {
                if self.tick(now) {
                    ActionOutcome::Updated
                } else {
                    ActionOutcome::Unchanged
                }
            }
            TodoEvent::DismissNotice => {
                self.dismiss_notice();
                ActionOutcome::Updated
            }
        }
    }

    /// Builds the page view for the current state.
    pub fn render(&self) -> Node {
        view::todo::page(&self.state, &self.visible(), self.stats())
    }

    fn recover(&mut self, message: &str) {
        self.reload();
        self.state.notice = Some(Notice::error(message));
    }
}

#[cfg(test)]
mod tests {
    use super::{TodoApp, TodoEvent};
    use crate::search::derive::FilterMode;
    use crate::service::ActionOutcome;
    use crate::store::MemoryStore;
    use std::time::{Duration, Instant};

    #[test]
    fn search_applies_after_quiet_period() {
        let mut app = TodoApp::new(MemoryStore::new());
        assert!(app.add("buy milk").is_saved());
        assert!(app.add("walk dog").is_saved());
        let start = Instant::now();

        app.search_input("mi", start);
        app.search_input("milk", start + Duration::from_millis(300));
        assert!(!app.tick(start + Duration::from_millis(400)));
        assert_eq!(app.visible().len(), 2);

        assert!(app.tick(start + Duration::from_millis(700)));
        assert_eq!(app.state().query, "milk");
        assert_eq!(app.visible().len(), 1);
    }

    #[test]
    fn set_query_cancels_pending_search() {
        let mut app = TodoApp::new(MemoryStore::new());
        let start = Instant::now();
        app.search_input("old", start);
        app.set_query("new");

        assert!(!app.is_search_pending());
        assert!(!app.tick(start + Duration::from_secs(1)));
        assert_eq!(app.state().query, "new");
    }

    #[test]
    fn submit_uses_tracked_input_and_clears_it() {
        let mut app = TodoApp::new(MemoryStore::new());
        app.set_input("  water plants ");
        assert_eq!(app.submit(), ActionOutcome::Saved);
        assert_eq!(app.items()[0].text, "water plants");
        assert!(app.state().input.is_empty());
    }

    #[test]
    fn delegated_targets_resolve_events() {
        assert_eq!(
            TodoEvent::from_target("toggle", Some("t-1")),
            Some(TodoEvent::Toggle("t-1".to_string()))
        );
        assert_eq!(
            TodoEvent::from_target("filter", Some("completed")),
            Some(TodoEvent::Filter(FilterMode::Completed))
        );
        assert_eq!(TodoEvent::from_target("filter", Some("bogus")), None);
        assert_eq!(TodoEvent::from_target("delete", Some("")), None);
    }

    #[test]
    fn clear_completed_without_completed_items_is_a_no_op() {
        let mut app = TodoApp::new(MemoryStore::new());
        assert!(app.add("still open").is_saved());
        let outcome = app.clear_completed(|_| panic!("must not prompt"));
        assert_eq!(outcome, ActionOutcome::Unchanged);
    }
}
