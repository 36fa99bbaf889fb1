//! Structured view tree and HTML rendering.
//!
//! # Responsibility
//! - Describe rendered output as a tree, decoupled from any rendering host.
//! - Serialize trees to escaped HTML text.
//! - Build the contact and todo pages from app state.
//!
//! # Invariants
//! - Text and attribute values are always escaped on render.
//! - Interactive children carry `data-action` (and `data-id` for list items)
//!   so one container listener can resolve them.

pub mod contact;
pub mod todo;

use crate::service::notice::{Notice, NoticeKind};

/// `data-action` value for delete buttons.
pub const ACTION_DELETE: &str = "delete";
/// `data-action` value for completion checkboxes.
pub const ACTION_TOGGLE: &str = "toggle";
/// `data-action` value for filter buttons; `data-id` carries the mode.
pub const ACTION_FILTER: &str = "filter";

const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "meta"];

/// One node of a view tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(value) => out.push_str(value),
            Self::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }

    /// All elements in this subtree whose `name` attribute equals `value`.
    pub fn find_by_attr(&self, name: &str, value: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        if let Self::Element(element) = self {
            element.collect_by_attr(name, value, &mut found);
        }
        found
    }
}

impl From<Element> for Node {
    fn from(value: Element) -> Self {
        Self::Element(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Element node with ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Sets an attribute; an empty value renders as a bare boolean attribute.
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.attrs.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
        self
    }

    pub fn attr_if(self, condition: bool, name: &'static str, value: impl Into<String>) -> Self {
        if condition {
            self.attr(name, value)
        } else {
            self
        }
    }

    pub fn class(self, value: impl Into<String>) -> Self {
        self.attr("class", value)
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(existing, _)| *existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    fn collect_by_attr<'a>(&'a self, name: &str, value: &str, found: &mut Vec<&'a Element>) {
        if self.get_attr(name) == Some(value) {
            found.push(self);
        }
        for child in &self.children {
            if let Node::Element(element) = child {
                element.collect_by_attr(name, value, found);
            }
        }
    }
}

/// Global status line; errors are announced as alerts.
pub fn notice_banner(notice: &Notice) -> Element {
    let (class, role) = match notice.kind {
        NoticeKind::Success => ("notice notice-success", "status"),
        NoticeKind::Error => ("notice notice-error", "alert"),
    };
    Element::new("div")
        .class(class)
        .attr("role", role)
        .child(notice.text.as_str())
}

/// Serializes a view tree to HTML.
pub fn render_html(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Text(value) => escape_into(value, out),
        Node::Element(element) => {
            out.push('<');
            out.push_str(element.tag);
            for (name, value) in &element.attrs {
                out.push(' ');
                out.push_str(name);
                if !value.is_empty() {
                    out.push_str("=\"");
                    escape_into(value, out);
                    out.push('"');
                }
            }
            out.push('>');
            if VOID_TAGS.contains(&element.tag) {
                return;
            }
            for child in &element.children {
                write_node(child, out);
            }
            out.push_str("</");
            out.push_str(element.tag);
            out.push('>');
        }
    }
}

fn escape_into(value: &str, out: &mut String) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
}
