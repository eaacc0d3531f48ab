//! Theme map: semantic slot name to style class.
//!
//! Widgets never invent class names. They ask the theme for a slot such as
//! `container` or `hasError`; a slot the theme does not define contributes
//! nothing to the rendered node.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Error loading a theme.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Mapping from semantic slot name to style class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Theme name
    #[serde(default)]
    pub name: String,
    /// Slot to class mapping
    #[serde(default)]
    pub classes: BTreeMap<String, String>,
}

impl Theme {
    /// Create an empty theme.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            classes: BTreeMap::new(),
        }
    }

    /// Theme whose class for every slot in `slots` is the slot name itself.
    ///
    /// Handy for tests and for hosts whose stylesheet uses plain slot names.
    #[must_use]
    pub fn identity<'a>(slots: impl IntoIterator<Item = &'a str>) -> Self {
        let classes = slots
            .into_iter()
            .map(|s| (s.to_string(), s.to_string()))
            .collect();
        Self {
            name: "identity".to_string(),
            classes,
        }
    }

    /// Load from a YAML mapping.
    ///
    /// Accepts either `{ name, classes: {...} }` or a bare slot mapping.
    pub fn from_yaml(yaml: &str) -> Result<Self, ThemeError> {
        let raw: RawTheme = serde_yaml_ng::from_str(yaml)?;
        Ok(raw.into())
    }

    /// Load from a JSON object, in the same shapes as [`Theme::from_yaml`].
    pub fn from_json(json: &str) -> Result<Self, ThemeError> {
        let raw: RawTheme = serde_json::from_str(json)?;
        Ok(raw.into())
    }

    /// Set the class for a slot.
    #[must_use]
    pub fn with_class(mut self, slot: impl Into<String>, class: impl Into<String>) -> Self {
        self.classes.insert(slot.into(), class.into());
        self
    }

    /// Class for a slot.
    #[must_use]
    pub fn class(&self, slot: &str) -> Option<&str> {
        self.classes.get(slot).map(String::as_str)
    }

    /// Classes for every slot whose condition holds, in order.
    ///
    /// ```
    /// use rselect_core::Theme;
    ///
    /// let theme = Theme::new("t").with_class("select", "s").with_class("disabled", "d");
    /// assert_eq!(theme.classes([("select", true), ("disabled", false), ("hasError", true)]), ["s"]);
    /// ```
    #[must_use]
    pub fn classes<'a>(&self, slots: impl IntoIterator<Item = (&'a str, bool)>) -> Vec<String> {
        slots
            .into_iter()
            .filter(|(_, on)| *on)
            .filter_map(|(slot, _)| self.class(slot))
            .map(str::to_string)
            .collect()
    }

    /// Number of defined slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether no slots are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTheme {
    Full {
        #[serde(default)]
        name: String,
        classes: BTreeMap<String, String>,
    },
    Bare(BTreeMap<String, String>),
}

impl From<RawTheme> for Theme {
    fn from(raw: RawTheme) -> Self {
        match raw {
            RawTheme::Full { name, classes } => Self { name, classes },
            RawTheme::Bare(classes) => Self {
                name: String::new(),
                classes,
            },
        }
    }
}
