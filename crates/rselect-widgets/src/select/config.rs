//! Construction-time properties of a select.
//!
//! Every field has a default, so a config can be built in code with the
//! chained setters or loaded from YAML/JSON with only the keys that differ.

use super::option::{OptionStore, SelectOption, DEFAULT_LABEL_KEY, DEFAULT_VALUE_KEY};
use super::state::Mode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Default message shown when no option matches.
pub const DEFAULT_NO_DATA_MESSAGE: &str = "No data";

/// Default placeholder text.
pub const DEFAULT_PLACEHOLDER: &str = "<not set>";

/// Error loading or validating a select config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        /// Field name
        field: &'static str,
        /// Error message
        message: String,
    },
}

/// Which side of the control the option list opens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Above the control
    Top,
    /// Below the control
    #[default]
    Bottom,
}

/// Properties a select is constructed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectConfig {
    /// Filter options by a typed query
    pub autocomplete: bool,
    /// Allow several values, shown as tags
    pub multi: bool,
    /// Ignore all interaction
    pub disabled: bool,
    /// Offer a clear-selection entry when a value is set
    pub empty_option: bool,
    /// Side the option list opens on
    pub direction: Direction,
    /// Error message; `None` or empty means no error
    pub error: Option<String>,
    /// Start with the option list open
    pub is_focused: bool,
    /// Field holding the label in raw options
    pub label_key: String,
    /// Field holding the id in raw options
    pub value_key: String,
    /// Text of the entry shown when nothing matches
    pub no_data_message: String,
    /// Text shown when nothing is selected
    pub placeholder: String,
    /// Opaque tag passed back with every change
    pub name: Option<String>,
    /// Raw option objects
    pub options: Vec<Value>,
    /// Initial query
    pub query: String,
    /// Initial single value
    pub value: Option<String>,
    /// Initial multi values
    pub values: Vec<String>,
    /// Options added in code, appended after the raw ones
    #[serde(skip)]
    pub typed_options: Vec<SelectOption>,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            autocomplete: false,
            multi: false,
            disabled: false,
            empty_option: false,
            direction: Direction::Bottom,
            error: None,
            is_focused: false,
            label_key: DEFAULT_LABEL_KEY.to_string(),
            value_key: DEFAULT_VALUE_KEY.to_string(),
            no_data_message: DEFAULT_NO_DATA_MESSAGE.to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            name: None,
            options: Vec::new(),
            query: String::new(),
            value: None,
            values: Vec::new(),
            typed_options: Vec::new(),
        }
    }
}

impl SelectConfig {
    /// Config with every default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a YAML config.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check field-name overrides are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.value_key.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "valueKey",
                message: "must not be empty".to_string(),
            });
        }
        if self.label_key.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "labelKey",
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Mode selected by the capability flags.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        Mode::resolve(self.multi, self.autocomplete)
    }

    /// Option store built from raw and typed options.
    #[must_use]
    pub fn option_store(&self) -> OptionStore {
        OptionStore::from_raw(&self.options, &self.value_key, &self.label_key)
            .iter()
            .cloned()
            .chain(self.typed_options.iter().cloned())
            .collect()
    }

    /// Error message, treating an empty string as no error.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }

    /// Enable autocomplete.
    #[must_use]
    pub const fn autocomplete(mut self, on: bool) -> Self {
        self.autocomplete = on;
        self
    }

    /// Enable multi select.
    #[must_use]
    pub const fn multi(mut self, on: bool) -> Self {
        self.multi = on;
        self
    }

    /// Set disabled state.
    #[must_use]
    pub const fn disabled(mut self, on: bool) -> Self {
        self.disabled = on;
        self
    }

    /// Offer a clear-selection entry.
    #[must_use]
    pub const fn empty_option(mut self, on: bool) -> Self {
        self.empty_option = on;
        self
    }

    /// Set the opening direction.
    #[must_use]
    pub const fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set the error message.
    #[must_use]
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    /// Start open.
    #[must_use]
    pub const fn focused(mut self, on: bool) -> Self {
        self.is_focused = on;
        self
    }

    /// Set the label field name for raw options.
    #[must_use]
    pub fn label_key(mut self, key: impl Into<String>) -> Self {
        self.label_key = key.into();
        self
    }

    /// Set the id field name for raw options.
    #[must_use]
    pub fn value_key(mut self, key: impl Into<String>) -> Self {
        self.value_key = key.into();
        self
    }

    /// Set the no-data message.
    #[must_use]
    pub fn no_data_message(mut self, message: impl Into<String>) -> Self {
        self.no_data_message = message.into();
        self
    }

    /// Set placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    /// Set the name passed back with changes.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set raw options.
    #[must_use]
    pub fn raw_options(mut self, options: impl IntoIterator<Item = Value>) -> Self {
        self.options = options.into_iter().collect();
        self
    }

    /// Add a typed option.
    #[must_use]
    pub fn option(mut self, option: SelectOption) -> Self {
        self.typed_options.push(option);
        self
    }

    /// Add typed options.
    #[must_use]
    pub fn options(mut self, options: impl IntoIterator<Item = SelectOption>) -> Self {
        self.typed_options.extend(options);
        self
    }

    /// Set the initial query.
    #[must_use]
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Set the initial single value.
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the initial multi values.
    #[must_use]
    pub fn values(mut self, values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.values = values.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = SelectConfig::default();
        assert!(!config.autocomplete);
        assert!(!config.multi);
        assert_eq!(config.direction, Direction::Bottom);
        assert_eq!(config.no_data_message, "No data");
        assert_eq!(config.placeholder, "<not set>");
        assert_eq!(config.label_key, "name");
        assert_eq!(config.value_key, "id");
        assert_eq!(config.mode(), Mode::Base);
    }

    #[test]
    fn test_builder() {
        let config = SelectConfig::new()
            .autocomplete(true)
            .name("country")
            .placeholder("Pick one")
            .option(SelectOption::new("1", "Algeria"))
            .value("1");
        assert_eq!(config.mode(), Mode::AutoComplete);
        assert_eq!(config.name.as_deref(), Some("country"));
        assert_eq!(config.option_store().label_of("1"), Some("Algeria"));
    }

    #[test]
    fn test_from_yaml_partial() {
        let yaml = r"
multi: true
autocomplete: true
direction: top
noDataMessage: Nothing here
values: ['1']
options:
  - { id: '1', name: Algeria }
  - { id: 2, name: Barbados }
";
        let config = SelectConfig::from_yaml(yaml).expect("valid config");
        assert_eq!(config.mode(), Mode::Multi);
        assert_eq!(config.direction, Direction::Top);
        assert_eq!(config.no_data_message, "Nothing here");
        assert_eq!(config.placeholder, DEFAULT_PLACEHOLDER);
        assert_eq!(config.option_store().label_of("2"), Some("Barbados"));
    }

    #[test]
    fn test_from_json_custom_keys() {
        let json = json!({
            "labelKey": "title",
            "valueKey": "code",
            "options": [{"code": "DZ", "title": "Algeria"}],
            "value": "DZ"
        })
        .to_string();
        let config = SelectConfig::from_json(&json).expect("valid config");
        assert_eq!(config.option_store().label_of("DZ"), Some("Algeria"));
        assert_eq!(config.value.as_deref(), Some("DZ"));
    }

    #[test]
    fn test_invalid_direction() {
        let err = SelectConfig::from_yaml("direction: left").expect_err("bad direction");
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_empty_key_rejected() {
        let err = SelectConfig::from_json(r#"{"valueKey": ""}"#).expect_err("empty key");
        assert_eq!(err.to_string(), "Invalid value for 'valueKey': must not be empty");
    }

    #[test]
    fn test_error_message_empty_is_none() {
        assert_eq!(SelectConfig::new().error("").error_message(), None);
        assert_eq!(SelectConfig::new().error("Required").error_message(), Some("Required"));
    }

    #[test]
    fn test_typed_options_follow_raw() {
        let config = SelectConfig::new()
            .raw_options([json!({"id": "1", "name": "Algeria"})])
            .option(SelectOption::new("2", "Barbados"));
        let ids: Vec<_> = config.option_store().iter().map(|o| o.id.clone()).collect();
        assert_eq!(ids, ["1", "2"]);
    }
}
