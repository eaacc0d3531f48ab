//! Selection state machine.
//!
//! One [`SelectionState`] lives per select instance. It is created from the
//! initial properties, changed only by interaction handlers and controlled
//! property sync, and dropped with the widget.
//!
//! Query text and committed value are independent: editing or clearing the
//! query never touches the value. The only couplings are that picking an
//! option in autocomplete mode copies its label into the query, and that a
//! controlled value change replaces the query with the new label.

use serde::{Deserialize, Serialize};

/// Interaction strategy, resolved once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Plain single select
    #[default]
    Base,
    /// Single select with a filtering text query
    AutoComplete,
    /// Ordered multi select shown as tags
    Multi,
}

impl Mode {
    /// Pick a mode from capability flags. `multi` wins over `autocomplete`.
    #[must_use]
    pub const fn resolve(multi: bool, autocomplete: bool) -> Self {
        if multi {
            Self::Multi
        } else if autocomplete {
            Self::AutoComplete
        } else {
            Self::Base
        }
    }

    /// Whether this mode shows a query input.
    #[must_use]
    pub const fn has_query(self) -> bool {
        matches!(self, Self::AutoComplete | Self::Multi)
    }
}

/// Dropdown visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DropdownState {
    /// Options hidden
    #[default]
    Closed,
    /// Options visible
    Open,
}

impl DropdownState {
    /// The other state.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Closed => Self::Open,
            Self::Open => Self::Closed,
        }
    }

    /// Check if open.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

impl From<bool> for DropdownState {
    fn from(open: bool) -> Self {
        if open {
            Self::Open
        } else {
            Self::Closed
        }
    }
}

/// Committed value, as reported to change callbacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectValue {
    /// Single or autocomplete selection
    Single(Option<String>),
    /// Multi selection in insertion order
    Multi(Vec<String>),
}

impl SelectValue {
    /// The single value, if this is a single selection with a value.
    #[must_use]
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(v) => v.as_deref(),
            Self::Multi(_) => None,
        }
    }

    /// The values of a multi selection; empty for single selections.
    #[must_use]
    pub fn as_multi(&self) -> &[String] {
        match self {
            Self::Single(_) => &[],
            Self::Multi(v) => v,
        }
    }
}

/// State of one select instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    mode: Mode,
    dropdown: DropdownState,
    query: String,
    value: SelectValue,
}

impl SelectionState {
    /// Initial state for a mode.
    ///
    /// `value` is used by the single modes and `values` by multi mode.
    /// Duplicate ids in `values` are dropped, keeping the first occurrence.
    #[must_use]
    pub fn new(
        mode: Mode,
        value: Option<String>,
        values: Vec<String>,
        query: impl Into<String>,
        open: bool,
    ) -> Self {
        let value = match mode {
            Mode::Base | Mode::AutoComplete => SelectValue::Single(value),
            Mode::Multi => SelectValue::Multi(dedup(values)),
        };
        Self {
            mode,
            dropdown: open.into(),
            query: query.into(),
            value,
        }
    }

    /// Mode this state was created for.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Current dropdown state.
    #[must_use]
    pub const fn dropdown(&self) -> DropdownState {
        self.dropdown
    }

    /// Check if the dropdown is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.dropdown.is_open()
    }

    /// Open the dropdown. Returns whether the state changed.
    pub fn open(&mut self) -> bool {
        self.transition(DropdownState::Open)
    }

    /// Close the dropdown. Returns whether the state changed.
    pub fn close(&mut self) -> bool {
        self.transition(DropdownState::Closed)
    }

    /// Flip the dropdown state and return the new one.
    pub fn toggle(&mut self) -> DropdownState {
        let next = self.dropdown.toggled();
        self.transition(next);
        next
    }

    fn transition(&mut self, next: DropdownState) -> bool {
        if self.dropdown == next {
            return false;
        }
        tracing::debug!(from = ?self.dropdown, to = ?next, "dropdown transition");
        self.dropdown = next;
        true
    }

    /// Current query text.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the query with raw input text. The value is left alone.
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    /// Committed value.
    #[must_use]
    pub const fn value(&self) -> &SelectValue {
        &self.value
    }

    /// Single value, if any.
    #[must_use]
    pub fn single_value(&self) -> Option<&str> {
        self.value.as_single()
    }

    /// Multi values in insertion order.
    #[must_use]
    pub fn multi_values(&self) -> &[String] {
        self.value.as_multi()
    }

    /// Whether `id` is the current value or one of the current values.
    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        match &self.value {
            SelectValue::Single(v) => v.as_deref() == Some(id),
            SelectValue::Multi(vs) => vs.iter().any(|v| v == id),
        }
    }

    /// Commit a pick of option `id` whose label is `label`.
    ///
    /// Single modes set the value and close; autocomplete also copies the
    /// label into the query. Multi mode toggles membership and stays open.
    /// Returns the value to report.
    pub fn choose(&mut self, id: &str, label: Option<&str>) -> SelectValue {
        match &mut self.value {
            SelectValue::Single(v) => {
                *v = Some(id.to_string());
                if self.mode == Mode::AutoComplete {
                    self.query = label.unwrap_or_default().to_string();
                }
                self.close();
            }
            SelectValue::Multi(vs) => {
                if let Some(pos) = vs.iter().position(|v| v == id) {
                    vs.remove(pos);
                } else {
                    vs.push(id.to_string());
                }
            }
        }
        tracing::debug!(id, mode = ?self.mode, "option chosen");
        self.value.clone()
    }

    /// Clear a single selection and its query, then close.
    ///
    /// Has no effect in multi mode.
    pub fn clear(&mut self) -> SelectValue {
        if let SelectValue::Single(v) = &mut self.value {
            *v = None;
            self.query.clear();
            self.close();
            tracing::debug!("selection cleared");
        }
        self.value.clone()
    }

    /// Controlled update of the single value.
    ///
    /// When the value actually changes, an autocomplete query is replaced by
    /// `label` (or emptied), discarding uncommitted edits. Returns whether
    /// the value changed.
    pub fn sync_value(&mut self, value: Option<String>, label: Option<&str>) -> bool {
        let SelectValue::Single(current) = &mut self.value else {
            return false;
        };
        if *current == value {
            return false;
        }
        *current = value;
        if self.mode == Mode::AutoComplete {
            self.query = label.unwrap_or_default().to_string();
        }
        true
    }

    /// Controlled update of the multi values. Returns whether they changed.
    pub fn sync_values(&mut self, values: Vec<String>) -> bool {
        let SelectValue::Multi(current) = &mut self.value else {
            return false;
        };
        let values = dedup(values);
        if *current == values {
            return false;
        }
        *current = values;
        true
    }
}

fn dedup(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for v in values {
        if !out.contains(&v) {
            out.push(v);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn single(value: Option<&str>) -> SelectionState {
        SelectionState::new(Mode::Base, value.map(String::from), Vec::new(), "", true)
    }

    fn multi(values: &[&str]) -> SelectionState {
        let values = values.iter().map(|s| (*s).to_string()).collect();
        SelectionState::new(Mode::Multi, None, values, "", true)
    }

    #[test]
    fn test_mode_resolve_priority() {
        assert_eq!(Mode::resolve(true, true), Mode::Multi);
        assert_eq!(Mode::resolve(true, false), Mode::Multi);
        assert_eq!(Mode::resolve(false, true), Mode::AutoComplete);
        assert_eq!(Mode::resolve(false, false), Mode::Base);
    }

    #[test]
    fn test_initial_closed_by_default() {
        let state = SelectionState::new(Mode::Base, None, Vec::new(), "", false);
        assert_eq!(state.dropdown(), DropdownState::Closed);
    }

    #[test]
    fn test_open_close_report_change() {
        let mut state = single(None);
        assert!(!state.open());
        assert!(state.close());
        assert!(!state.close());
        assert_eq!(state.toggle(), DropdownState::Open);
        assert!(state.is_open());
    }

    #[test]
    fn test_choose_single_closes() {
        let mut state = single(None);
        let value = state.choose("1", Some("Algeria"));
        assert_eq!(value, SelectValue::Single(Some("1".to_string())));
        assert!(!state.is_open());
        assert_eq!(state.query(), "");
    }

    #[test]
    fn test_choose_autocomplete_copies_label() {
        let mut state = SelectionState::new(Mode::AutoComplete, None, Vec::new(), "al", true);
        state.choose("1", Some("Algeria"));
        assert_eq!(state.query(), "Algeria");
        assert_eq!(state.single_value(), Some("1"));
        assert!(!state.is_open());
    }

    #[test]
    fn test_choose_multi_appends_and_stays_open() {
        let mut state = multi(&["1"]);
        let value = state.choose("2", None);
        assert_eq!(value.as_multi(), ["1", "2"]);
        assert!(state.is_open());
    }

    #[test]
    fn test_choose_multi_removes_existing() {
        let mut state = multi(&["1", "2", "3"]);
        state.choose("2", None);
        assert_eq!(state.multi_values(), ["1", "3"]);
    }

    #[test]
    fn test_clear_single() {
        let mut state = SelectionState::new(
            Mode::AutoComplete,
            Some("1".to_string()),
            Vec::new(),
            "Algeria",
            true,
        );
        assert_eq!(state.clear(), SelectValue::Single(None));
        assert_eq!(state.query(), "");
        assert!(!state.is_open());
    }

    #[test]
    fn test_clear_multi_is_noop() {
        let mut state = multi(&["1"]);
        state.clear();
        assert_eq!(state.multi_values(), ["1"]);
        assert!(state.is_open());
    }

    #[test]
    fn test_query_independent_of_value() {
        let mut state = SelectionState::new(
            Mode::AutoComplete,
            Some("1".to_string()),
            Vec::new(),
            "Algeria",
            false,
        );
        state.set_query("");
        assert_eq!(state.single_value(), Some("1"));
    }

    #[test]
    fn test_sync_value_replaces_query_on_change() {
        let mut state = SelectionState::new(Mode::AutoComplete, None, Vec::new(), "Can", false);
        assert!(state.sync_value(Some("3".to_string()), Some("Canada")));
        assert_eq!(state.query(), "Canada");
    }

    #[test]
    fn test_sync_value_unchanged_keeps_typing() {
        let mut state = SelectionState::new(
            Mode::AutoComplete,
            Some("3".to_string()),
            Vec::new(),
            "Cana",
            false,
        );
        assert!(!state.sync_value(Some("3".to_string()), Some("Canada")));
        assert_eq!(state.query(), "Cana");
    }

    #[test]
    fn test_sync_value_base_leaves_query() {
        let mut state = single(None);
        state.set_query("x");
        assert!(state.sync_value(Some("1".to_string()), Some("Algeria")));
        assert_eq!(state.query(), "x");
    }

    #[test]
    fn test_sync_values() {
        let mut state = multi(&["1"]);
        assert!(state.sync_values(vec!["2".to_string(), "2".to_string()]));
        assert_eq!(state.multi_values(), ["2"]);
        assert!(!state.sync_values(vec!["2".to_string()]));
        assert!(!single(None).sync_values(vec!["1".to_string()]));
    }

    #[test]
    fn test_initial_values_dedup() {
        let state = multi(&["1", "2", "1"]);
        assert_eq!(state.multi_values(), ["1", "2"]);
    }

    #[test]
    fn test_is_selected() {
        assert!(single(Some("1")).is_selected("1"));
        assert!(!single(Some("1")).is_selected("2"));
        assert!(multi(&["1", "2"]).is_selected("2"));
    }

    #[test]
    fn test_select_value_serde_untagged() {
        let single = serde_json::to_string(&SelectValue::Single(Some("1".into()))).expect("json");
        assert_eq!(single, "\"1\"");
        let multi = serde_json::to_string(&SelectValue::Multi(vec!["1".into()])).expect("json");
        assert_eq!(multi, "[\"1\"]");
    }

    proptest! {
        #[test]
        fn prop_double_toggle_restores_values(
            initial in proptest::collection::vec("[a-e]", 0..6),
            id in "[a-g]",
        ) {
            prop_assume!(!initial.contains(&id));
            let mut state = SelectionState::new(Mode::Multi, None, initial, "", true);
            let before = state.multi_values().to_vec();
            state.choose(&id, None);
            state.choose(&id, None);
            prop_assert_eq!(state.multi_values(), before.as_slice());
            prop_assert!(state.is_open());
        }

        #[test]
        fn prop_double_toggle_of_present_id_moves_it_last(
            initial in proptest::collection::vec("[a-e]", 1..6),
            pick in any::<proptest::sample::Index>(),
        ) {
            let id = pick.get(&initial).clone();
            let mut state = SelectionState::new(Mode::Multi, None, initial, "", true);
            let mut before = state.multi_values().to_vec();
            state.choose(&id, None);
            prop_assert!(!state.is_selected(&id));
            state.choose(&id, None);

            let after = state.multi_values().to_vec();
            prop_assert_eq!(after.last(), Some(&id));
            let mut sorted = after;
            sorted.sort();
            before.sort();
            prop_assert_eq!(sorted, before);
        }

        #[test]
        fn prop_choose_single_always_closes(id in "[0-9]{1,3}", open in any::<bool>()) {
            let mut state = SelectionState::new(Mode::Base, None, Vec::new(), "", open);
            state.choose(&id, None);
            prop_assert!(!state.is_open());
            prop_assert_eq!(state.single_value(), Some(id.as_str()));
        }
    }
}
