//! Filter and search entry points for list views.
//!
//! # Responsibility
//! - Derive the visible subset of a list from filter mode and query text.
//! - Keep derivation free of storage and rendering concerns.

pub mod derive;
