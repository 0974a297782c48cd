//! # Filter - Menu Search Engine
//!
//! Derives the visible part of the catalog from the three filter fields.
//! The derivation is pure: same catalog and state, same result.

use crate::models::{Category, Flavor, ProjectRecord};
use std::fmt;
use std::str::FromStr;

/// A filter choice: everything, or one specific value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: PartialEq> Selection<T> {
    /// Whether a value passes this selection
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == value,
        }
    }
}

impl<T: FromStr> Selection<T> {
    /// Parse a user-supplied value. Blank, "All" and unrecognised values
    /// select everything.
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => Selection::All,
            Some(s) if s.eq_ignore_ascii_case("all") => Selection::All,
            Some(s) => match s.parse() {
                Ok(value) => Selection::Only(value),
                Err(_) => {
                    tracing::debug!(value = s, "Ignoring unknown filter value");
                    Selection::All
                }
            },
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str("All"),
            Selection::Only(value) => value.fmt(f),
        }
    }
}

/// The three independent filter fields behind the project grid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub query: String,
    pub active_category: Selection<Category>,
    pub active_flavor: Selection<Flavor>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state from raw query-string values
    pub fn from_params(query: Option<&str>, category: Option<&str>, flavor: Option<&str>) -> Self {
        Self {
            query: query.unwrap_or_default().to_string(),
            active_category: Selection::parse_lenient(category),
            active_flavor: Selection::parse_lenient(flavor),
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn set_category(&mut self, category: Selection<Category>) {
        self.active_category = category;
    }

    pub fn set_flavor(&mut self, flavor: Selection<Flavor>) {
        self.active_flavor = flavor;
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.set_query(query);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.set_category(Selection::Only(category));
        self
    }

    pub fn with_flavor(mut self, flavor: Flavor) -> Self {
        self.set_flavor(Selection::Only(flavor));
        self
    }

    /// Normalized needle: trimmed and lowercased, `None` when blank
    fn needle(&self) -> Option<String> {
        let q = self.query.trim();
        (!q.is_empty()).then(|| q.to_lowercase())
    }

    /// Whether a single record passes all three rules
    pub fn matches(&self, record: &ProjectRecord) -> bool {
        self.active_category.admits(&record.category)
            && self.active_flavor.admits(&record.flavor_key)
            && match self.needle() {
                None => true,
                Some(needle) => text_matches(record, &needle),
            }
    }
}

fn text_matches(record: &ProjectRecord, needle: &str) -> bool {
    record.name.to_lowercase().contains(needle)
        || record.description.to_lowercase().contains(needle)
        || record.technologies.join(" ").to_lowercase().contains(needle)
        || record.badges.join(" ").to_lowercase().contains(needle)
}

/// Visible records for a filter state, in catalog order
pub fn apply<'a>(projects: &'a [ProjectRecord], state: &FilterState) -> Vec<&'a ProjectRecord> {
    let needle = state.needle();
    projects
        .iter()
        .filter(|p| state.active_category.admits(&p.category))
        .filter(|p| state.active_flavor.admits(&p.flavor_key))
        .filter(|p| needle.as_deref().map_or(true, |n| text_matches(p, n)))
        .collect()
}
