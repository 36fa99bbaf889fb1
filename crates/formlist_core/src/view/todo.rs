//! Todo page view.

use super::{notice_banner, Element, Node, ACTION_DELETE, ACTION_FILTER, ACTION_TOGGLE};
use crate::model::todo::TodoItem;
use crate::search::derive::{FilterMode, TodoStats};
use crate::service::todo_service::TodoState;

const EMPTY_LIST: &str = "No todos found.";

/// Full page: notice, add form, filters, search box, list and footer.
///
/// `visible` must already be derived from `state`; the view does not filter.
pub fn page(state: &TodoState, visible: &[TodoItem], stats: TodoStats) -> Node {
    Element::new("section")
        .class("todo-app")
        .children(state.notice.as_ref().map(notice_banner))
        .child(form(state))
        .child(filters(state.filter))
        .child(
            Element::new("input")
                .attr("type", "search")
                .attr("name", "search")
                .attr("placeholder", "Search todos")
                .attr("value", state.search_text.as_str()),
        )
        .child(todo_list(visible))
        .child(footer(stats))
        .into()
}

fn form(state: &TodoState) -> Element {
    let error = state.input_error.as_deref();
    Element::new("form")
        .attr("id", "todo-form")
        .child(
            Element::new("input")
                .attr("type", "text")
                .attr("name", "todo")
                .attr("placeholder", "What needs doing?")
                .attr("value", state.input.as_str())
                .attr_if(error.is_some(), "aria-invalid", "true"),
        )
        .child(Element::new("button").attr("type", "submit").child("Add"))
        .child(
            Element::new("span")
                .class("field-error")
                .attr("data-field", "todo")
                .child(error.unwrap_or_default()),
        )
}

/// Three filter buttons; the active mode is marked `selected`.
pub fn filters(active: FilterMode) -> Element {
    Element::new("nav")
        .class("filters")
        .children(FilterMode::ALL.map(|mode| {
            Element::new("button")
                .attr("type", "button")
                .class(if mode == active {
                    "filter selected"
                } else {
                    "filter"
                })
                .attr("data-action", ACTION_FILTER)
                .attr("data-id", mode.as_str())
                .attr_if(mode == active, "aria-pressed", "true")
                .child(mode.label())
        }))
}

/// Visible items in the given order, or an empty-state paragraph.
pub fn todo_list(items: &[TodoItem]) -> Node {
    if items.is_empty() {
        return Element::new("p").class("empty").child(EMPTY_LIST).into();
    }
    Element::new("ul")
        .class("todo-list")
        .children(items.iter().map(todo_item))
        .into()
}

fn todo_item(item: &TodoItem) -> Element {
    Element::new("li")
        .class(if item.completed {
            "todo completed"
        } else {
            "todo"
        })
        .attr("data-id", item.id.as_str())
        .child(
            Element::new("input")
                .attr("type", "checkbox")
                .attr("data-action", ACTION_TOGGLE)
                .attr("data-id", item.id.as_str())
                .attr_if(item.completed, "checked", ""),
        )
        .child(Element::new("span").class("text").child(item.text.as_str()))
        .child(
            Element::new("time")
                .attr("datetime", item.created_at.to_rfc3339())
                .child(item.created_at.format("%Y-%m-%d").to_string()),
        )
        .child(
            Element::new("button")
                .attr("type", "button")
                .attr("data-action", ACTION_DELETE)
                .attr("data-id", item.id.as_str())
                .child("Delete"),
        )
}

fn footer(stats: TodoStats) -> Element {
    let noun = if stats.active == 1 { "item" } else { "items" };
    Element::new("footer")
        .class("todo-stats")
        .child(format!(
            "{} {noun} left, {} completed",
            stats.active, stats.completed
        ))
}

#[cfg(test)]
mod tests {
    use super::{filters, page, todo_list};
    use crate::model::todo::TodoItem;
    use crate::search::derive::{FilterMode, TodoStats};
    use crate::service::todo_service::TodoState;
    use chrono::{TimeZone, Utc};

    fn item(id: &str, completed: bool) -> TodoItem {
        let mut todo = TodoItem::new(id, "task text", Utc.timestamp_opt(1_000, 0).unwrap());
        todo.completed = completed;
        todo
    }

    #[test]
    fn completed_items_are_checked_and_marked() {
        let node = todo_list(&[item("a", true), item("b", false)]);
        let toggles = node.find_by_attr("data-action", "toggle");
        assert_eq!(toggles.len(), 2);
        assert_eq!(toggles[0].get_attr("checked"), Some(""));
        assert_eq!(toggles[1].get_attr("checked"), None);

        let rows = node.find_by_attr("data-id", "a");
        assert!(rows[0].has_class("completed"));
    }

    #[test]
    fn empty_list_shows_placeholder() {
        assert_eq!(todo_list(&[]).text_content(), "No todos found.");
    }

    #[test]
    fn active_filter_is_selected() {
        let nav = filters(FilterMode::Active);
        let selected: Vec<_> = nav
            .children
            .iter()
            .filter_map(|child| child.as_element())
            .filter(|button| button.has_class("selected"))
            .collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].get_attr("data-id"), Some("active"));
    }

    #[test]
    fn page_shows_input_error_and_stats() {
        let state = TodoState {
            input: "ok".to_string(),
            input_error: Some("Todo must be at least 3 characters.".to_string()),
            ..TodoState::default()
        };
        let stats = TodoStats {
            total: 3,
            active: 1,
            completed: 2,
        };
        let text = page(&state, &[], stats).text_content();
        assert!(text.contains("Todo must be at least 3 characters."));
        assert!(text.contains("1 item left, 2 completed"));
    }
}
