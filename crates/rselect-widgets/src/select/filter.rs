//! Filter strategies: which options an open dropdown shows.
//!
//! Each [`Mode`] has one [`FilterStrategy`]; the controller picks it once at
//! construction with [`strategy_for`]. Filtering is a pure function of the
//! option store and the selection state.

use super::option::{OptionStore, SelectOption};
use super::state::{Mode, SelectionState};

/// Options to show, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterOutput<'a> {
    /// Whether a clear-selection entry goes first
    pub clear_entry: bool,
    /// Matching options
    pub options: Vec<&'a SelectOption>,
}

impl FilterOutput<'_> {
    /// Whether no real option matched; the no-data entry is shown instead.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Ids of the matching options.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.id.as_str()).collect()
    }
}

/// Derives visible options from the store and state.
pub trait FilterStrategy: Send + Sync {
    /// Mode this strategy serves.
    fn mode(&self) -> Mode;

    /// Options to show for `state`.
    fn filter<'a>(&self, options: &'a OptionStore, state: &SelectionState) -> FilterOutput<'a>;
}

/// Case-insensitive substring match. An empty query matches everything.
#[must_use]
pub fn matches_query(label: &str, query: &str) -> bool {
    label_contains(label, &query.to_lowercase())
}

fn label_contains(label: &str, needle: &str) -> bool {
    needle.is_empty() || label.to_lowercase().contains(needle)
}

fn clear_entry(empty_option: bool, state: &SelectionState) -> bool {
    empty_option && state.single_value().is_some()
}

/// Plain select: everything except the current value.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseFilter {
    /// Offer a clear-selection entry when a value is set
    pub empty_option: bool,
}

impl FilterStrategy for BaseFilter {
    fn mode(&self) -> Mode {
        Mode::Base
    }

    fn filter<'a>(&self, options: &'a OptionStore, state: &SelectionState) -> FilterOutput<'a> {
        let selected = state.single_value();
        let options = options
            .iter()
            .filter(|o| Some(o.id.as_str()) != selected)
            .collect();
        FilterOutput {
            clear_entry: clear_entry(self.empty_option, state),
            options,
        }
    }
}

/// Autocomplete: query match, minus the current value.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryFilter {
    /// Offer a clear-selection entry when a value is set
    pub empty_option: bool,
}

impl FilterStrategy for QueryFilter {
    fn mode(&self) -> Mode {
        Mode::AutoComplete
    }

    fn filter<'a>(&self, options: &'a OptionStore, state: &SelectionState) -> FilterOutput<'a> {
        let query = state.query().to_lowercase();
        let selected = state.single_value();
        let options: Vec<_> = options
            .iter()
            .filter(|o| label_contains(&o.label, &query))
            .filter(|o| Some(o.id.as_str()) != selected)
            .collect();
        tracing::trace!(query = %query, matched = options.len(), "autocomplete filter");
        FilterOutput {
            clear_entry: clear_entry(self.empty_option, state),
            options,
        }
    }
}

/// Multi select: query match, minus every chosen value.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiFilter;

impl FilterStrategy for MultiFilter {
    fn mode(&self) -> Mode {
        Mode::Multi
    }

    fn filter<'a>(&self, options: &'a OptionStore, state: &SelectionState) -> FilterOutput<'a> {
        let query = state.query().to_lowercase();
        let options: Vec<_> = options
            .iter()
            .filter(|o| label_contains(&o.label, &query))
            .filter(|o| !state.is_selected(&o.id))
            .collect();
        tracing::trace!(query = %query, matched = options.len(), "multi filter");
        FilterOutput {
            clear_entry: false,
            options,
        }
    }
}

/// Strategy for a mode.
#[must_use]
pub fn strategy_for(mode: Mode, empty_option: bool) -> Box<dyn FilterStrategy> {
    match mode {
        Mode::Base => Box::new(BaseFilter { empty_option }),
        Mode::AutoComplete => Box::new(QueryFilter { empty_option }),
        Mode::Multi => Box::new(MultiFilter),
    }
}
