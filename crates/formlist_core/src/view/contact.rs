//! Contact page view.

use super::{notice_banner, Element, Node, ACTION_DELETE};
use crate::model::contact::ContactMessage;
use crate::service::contact_service::ContactState;
use crate::validate::ContactField;

const EMPTY_HISTORY: &str = "No messages yet.";
const SENT_AT_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn page(state: &ContactState) -> Node {
    Element::new("section")
        .class("contact-app")
        .children(state.notice.as_ref().map(notice_banner))
        .child(form(state))
        .child(
            Element::new("h2").child(format!("Message history ({})", state.messages.len())),
        )
        .child(message_list(&state.messages))
        .into()
}

fn form(state: &ContactState) -> Element {
    Element::new("form")
        .attr("id", "contact-form")
        .attr("novalidate", "")
        .children(ContactField::ALL.map(|field| field_row(state, field)))
        .child(Element::new("button").attr("type", "submit").child("Send"))
}

fn field_row(state: &ContactState, field: ContactField) -> Element {
    let name = field.as_str();
    let value = state.draft.get(field);
    let control = match field {
        ContactField::Message => Element::new("textarea")
            .attr("name", name)
            .attr("id", name)
            .child(value),
        ContactField::Name | ContactField::Email => Element::new("input")
            .attr(
                "type",
                if field == ContactField::Email {
                    "email"
                } else {
                    "text"
                },
            )
            .attr("name", name)
            .attr("id", name)
            .attr("value", value),
    };
    let error = state.error(field);

    Element::new("div")
        .class(if error.is_some() {
            "field has-error"
        } else {
            "field"
        })
        .child(Element::new("label").attr("for", name).child(label(field)))
        .child(control.attr_if(error.is_some(), "aria-invalid", "true"))
        .child(
            Element::new("span")
                .class("field-error")
                .attr("data-field", name)
                .child(error.unwrap_or_default()),
        )
}

fn label(field: ContactField) -> &'static str {
    match field {
        ContactField::Name => "Name",
        ContactField::Email => "Email",
        ContactField::Message => "Message",
    }
}

/// History list, newest first, or an empty-state paragraph.
pub fn message_list(messages: &[ContactMessage]) -> Node {
    if messages.is_empty() {
        return Element::new("p").class("empty").child(EMPTY_HISTORY).into();
    }
    Element::new("ul")
        .class("message-list")
        .children(messages.iter().map(message_item))
        .into()
}

fn message_item(message: &ContactMessage) -> Element {
    let sent_at = message.sent_at();
    let time = Element::new("time")
        .attr(
            "datetime",
            sent_at.map(|at| at.to_rfc3339()).unwrap_or_default(),
        )
        .child(
            sent_at
                .map(|at| at.format(SENT_AT_FORMAT).to_string())
                .unwrap_or_else(|| "unknown time".to_string()),
        );

    Element::new("li")
        .class("message")
        .attr("data-id", message.id.as_str())
        .child(
            Element::new("header")
                .child(Element::new("strong").child(message.name.as_str()))
                .child(" ")
                .child(
                    Element::new("span")
                        .class("email")
                        .child(message.email.as_str()),
                )
                .child(" ")
                .child(time),
        )
        .child(Element::new("p").child(message.message.as_str()))
        .child(
            Element::new("button")
                .attr("type", "button")
                .attr("data-action", ACTION_DELETE)
                .attr("data-id", message.id.as_str())
                .child("Delete"),
        )
}
