//! Option store: the candidate entries a select chooses from.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default field name holding an option's id in raw input.
pub const DEFAULT_VALUE_KEY: &str = "id";

/// Default field name holding an option's label in raw input.
pub const DEFAULT_LABEL_KEY: &str = "name";

/// A selectable option.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectOption {
    /// Identifier reported through change callbacks
    pub id: String,
    /// Display label
    pub label: String,
}

impl SelectOption {
    /// Create a new option.
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    /// Extract an option from a raw object using the given field names.
    ///
    /// String and number fields are accepted; anything else yields `None`.
    #[must_use]
    pub fn from_raw(raw: &Value, value_key: &str, label_key: &str) -> Option<Self> {
        let id = scalar_text(raw.get(value_key)?)?;
        let label = scalar_text(raw.get(label_key)?)?;
        Some(Self { id, label })
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Immutable, ordered list of options.
///
/// Ids are expected to be unique but this is not enforced; lookups return
/// the first match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionStore {
    options: Vec<SelectOption>,
}

impl OptionStore {
    /// Create a store from typed options.
    #[must_use]
    pub fn new(options: impl IntoIterator<Item = SelectOption>) -> Self {
        Self {
            options: options.into_iter().collect(),
        }
    }

    /// Create a store from `(id, label)` pairs.
    #[must_use]
    pub fn from_pairs<I, L>(pairs: impl IntoIterator<Item = (I, L)>) -> Self
    where
        I: Into<String>,
        L: Into<String>,
    {
        Self::new(pairs.into_iter().map(|(id, label)| SelectOption::new(id, label)))
    }

    /// Create a store from raw objects.
    ///
    /// Entries lacking either field are skipped with a warning.
    #[must_use]
    pub fn from_raw(raw: &[Value], value_key: &str, label_key: &str) -> Self {
        let options = raw
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                let option = SelectOption::from_raw(entry, value_key, label_key);
                if option.is_none() {
                    tracing::warn!(index, value_key, label_key, "skipping malformed option");
                }
                option
            })
            .collect();
        Self { options }
    }

    /// All options in order.
    #[must_use]
    pub fn as_slice(&self) -> &[SelectOption] {
        &self.options
    }

    /// Option with the given id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&SelectOption> {
        self.options.iter().find(|o| o.id == id)
    }

    /// Label of the option with the given id.
    #[must_use]
    pub fn label_of(&self, id: &str) -> Option<&str> {
        self.get(id).map(|o| o.label.as_str())
    }

    /// Number of options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Iterate over options.
    pub fn iter(&self) -> std::slice::Iter<'_, SelectOption> {
        self.options.iter()
    }
}

impl<'a> IntoIterator for &'a OptionStore {
    type Item = &'a SelectOption;
    type IntoIter = std::slice::Iter<'a, SelectOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.options.iter()
    }
}

impl FromIterator<SelectOption> for OptionStore {
    fn from_iter<T: IntoIterator<Item = SelectOption>>(iter: T) -> Self {
        Self::new(iter)
    }
}
