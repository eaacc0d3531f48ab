//! Checkbox widget for boolean input.

use rselect_core::{
    widget::AccessibleRole, Event, Node, Theme, TypeId, Widget, WidgetId, TEST_ID_ATTR,
};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Theme slots a checkbox reads.
pub const THEME_SLOTS: &[&str] = &[
    "field", "check", "checked", "indeterminate", "disabled", "input", "text",
];

/// Checkbox state (supports tri-state).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CheckState {
    /// Not checked
    #[default]
    Unchecked,
    /// Checked
    Checked,
    /// Indeterminate (for partial selection)
    Indeterminate,
}

impl CheckState {
    /// Toggle between checked and unchecked.
    #[must_use]
    pub const fn toggle(&self) -> Self {
        match self {
            Self::Unchecked => Self::Checked,
            Self::Checked | Self::Indeterminate => Self::Unchecked,
        }
    }

    /// Check if checked (true for Checked, false for others).
    #[must_use]
    pub const fn is_checked(&self) -> bool {
        matches!(self, Self::Checked)
    }

    /// Check if indeterminate.
    #[must_use]
    pub const fn is_indeterminate(&self) -> bool {
        matches!(self, Self::Indeterminate)
    }

    /// State for a selected count out of a total.
    #[must_use]
    pub const fn from_counts(selected: usize, total: usize) -> Self {
        if total == 0 || selected == 0 {
            Self::Unchecked
        } else if selected >= total {
            Self::Checked
        } else {
            Self::Indeterminate
        }
    }
}

impl From<bool> for CheckState {
    fn from(checked: bool) -> Self {
        if checked {
            Self::Checked
        } else {
            Self::Unchecked
        }
    }
}

/// Message emitted when checkbox state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckboxChanged {
    /// The new state
    pub state: CheckState,
    /// The checkbox's `name`, if set
    pub name: Option<String>,
}

/// Checkbox widget.
#[derive(Debug, Clone)]
pub struct Checkbox {
    state: CheckState,
    disabled: bool,
    label: String,
    name: Option<String>,
    class_name: Option<String>,
    test_id_value: Option<String>,
    id: WidgetId,
}

impl Default for Checkbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Checkbox {
    /// Create a new unchecked checkbox.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: CheckState::Unchecked,
            disabled: false,
            label: String::new(),
            name: None,
            class_name: None,
            test_id_value: None,
            id: WidgetId::next(),
        }
    }

    /// Set checked state.
    #[must_use]
    pub fn checked(mut self, checked: bool) -> Self {
        self.state = checked.into();
        self
    }

    /// Set state.
    #[must_use]
    pub const fn state(mut self, state: CheckState) -> Self {
        self.state = state;
        self
    }

    /// Set label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the name passed back with changes.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set disabled state.
    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Append an extra class.
    #[must_use]
    pub fn class_name(mut self, class: impl Into<String>) -> Self {
        self.class_name = Some(class.into());
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Get current state.
    #[must_use]
    pub const fn get_state(&self) -> CheckState {
        self.state
    }

    /// Check if checked.
    #[must_use]
    pub const fn is_checked(&self) -> bool {
        self.state.is_checked()
    }

    /// Get label.
    #[must_use]
    pub fn get_label(&self) -> &str {
        &self.label
    }

    /// Controlled state update.
    pub fn set_state(&mut self, state: CheckState) {
        self.state = state;
    }

    /// Instance id.
    #[must_use]
    pub const fn id(&self) -> WidgetId {
        self.id
    }
}

impl Widget for Checkbox {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn render(&self, theme: &Theme) -> Node {
        let input = Node::new("input")
            .classes(theme.classes([("input", true)]))
            .attr("type", "checkbox")
            .attr_if(self.state.is_checked(), "checked", "true")
            .attr_if(self.disabled, "disabled", "true")
            .attr_if(self.name.is_some(), "name", self.name.as_deref().unwrap_or_default());
        let check = Node::new("span").classes(theme.classes([
            ("check", true),
            ("checked", self.state.is_checked()),
            ("indeterminate", self.state.is_indeterminate()),
        ]));
        let text = (!self.label.is_empty()).then(|| {
            Node::new("span")
                .classes(theme.classes([("text", true)]))
                .text(self.label.as_str())
        });

        Node::new("label")
            .classes(theme.classes([("field", true), ("disabled", self.disabled)]))
            .classes(self.class_name.iter().cloned())
            .owner(self.id)
            .attr_if(
                self.test_id_value.is_some(),
                TEST_ID_ATTR,
                self.test_id_value.as_deref().unwrap_or_default(),
            )
            .child(input)
            .child(check)
            .maybe_child(text)
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        if self.disabled {
            return None;
        }
        match event {
            Event::Click { path } if path.passes_through(self.id) => {
                self.state = self.state.toggle();
                Some(Box::new(CheckboxChanged {
                    state: self.state,
                    name: self.name.clone(),
                }))
            }
            _ => None,
        }
    }

    fn is_interactive(&self) -> bool {
        !self.disabled
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Checkbox
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }
}
