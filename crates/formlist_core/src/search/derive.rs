//! Visible-subset derivation for the todo list.
//!
//! # Responsibility
//! - Compute what the todo view shows from list, filter mode and query.
//! - Summarize the full list into counters for the footer.
//!
//! # Invariants
//! - `derive` is pure and idempotent in its three inputs.
//! - Steps run in order: completion filter, substring match, sort.
//! - Sort is stable, newest `created_at` first.

use crate::model::todo::TodoItem;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Completion filter applied before text search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    #[default]
    All,
    Active,
    Completed,
}

impl FilterMode {
    pub const ALL: [FilterMode; 3] = [Self::All, Self::Active, Self::Completed];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Button caption.
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }

    pub fn matches(self, item: &TodoItem) -> bool {
        match self {
            Self::All => true,
            Self::Active => !item.completed,
            Self::Completed => item.completed,
        }
    }
}

impl Display for FilterMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown filter mode name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFilterModeError(pub String);

impl Display for ParseFilterModeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown filter `{}`; expected all|active|completed",
            self.0
        )
    }
}

impl Error for ParseFilterModeError {}

impl FromStr for FilterMode {
    type Err = ParseFilterModeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            other => Err(ParseFilterModeError(other.to_string())),
        }
    }
}

/// Returns the visible items for `mode` and `query`, newest first.
///
/// A blank query (after trim) disables text matching. Matching is a
/// case-insensitive substring test against the trimmed query.
pub fn derive(items: &[TodoItem], mode: FilterMode, query: &str) -> Vec<TodoItem> {
    let needle = query.trim().to_lowercase();
    let mut visible: Vec<TodoItem> = items
        .iter()
        .filter(|item| mode.matches(item))
        .filter(|item| needle.is_empty() || item.text.to_lowercase().contains(&needle))
        .cloned()
        .collect();
    visible.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    visible
}

/// Counters over the full, unfiltered list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TodoStats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

impl TodoStats {
    pub fn of(items: &[TodoItem]) -> Self {
        let completed = items.iter().filter(|item| item.completed).count();
        Self {
            total: items.len(),
            active: items.len() - completed,
            completed,
        }
    }
}
