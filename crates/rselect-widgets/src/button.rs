//! Button widget for user interactions.

use rselect_core::{widget::AccessibleRole, Event, Node, Theme, TypeId, Widget, WidgetId};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Default title shown while a button is in progress.
pub const DEFAULT_PROGRESS_TITLE: &str = "loading...";

/// Default progress bar colour.
pub const DEFAULT_PROGRESS_COLOR: &str = "#d6901e";

/// Theme slots a button reads.
pub const THEME_SLOTS: &[&str] = &[
    "button",
    "primary",
    "warning",
    "danger",
    "forbidden",
    "progressBtn",
    "icon",
    "content",
    "progress",
    "showProgress",
    "progressInner",
    "buttonGroup",
];

/// Visual emphasis of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    /// Default action
    #[default]
    Primary,
    /// Needs attention
    Warning,
    /// Destructive
    Danger,
    /// Not allowed
    Forbidden,
}

impl ButtonVariant {
    /// Theme slot for this variant.
    #[must_use]
    pub const fn slot(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Forbidden => "forbidden",
        }
    }
}

/// Form role of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonType {
    /// Plain button
    #[default]
    Button,
    /// Submits its form
    Submit,
}

impl ButtonType {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Submit => "submit",
        }
    }
}

/// Message emitted when button is clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonClicked {
    /// Button title
    pub title: String,
}

/// Button widget with title and click handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Button {
    /// Button title
    title: String,
    /// Visual variant
    variant: ButtonVariant,
    /// Form role
    #[serde(rename = "type")]
    button_type: ButtonType,
    /// Whether button is disabled
    disabled: bool,
    /// Whether an action is running
    progress: bool,
    /// Title shown while in progress
    progress_title: String,
    /// Progress bar colour
    progress_color: String,
    /// Icon name
    icon: Option<String>,
    /// Extra class appended after theme classes
    class_name: Option<String>,
    /// Test ID
    test_id_value: Option<String>,
    #[serde(skip, default = "WidgetId::next")]
    id: WidgetId,
}

impl Default for Button {
    fn default() -> Self {
        Self::new("")
    }
}

impl Button {
    /// Create a new button with title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            variant: ButtonVariant::Primary,
            button_type: ButtonType::Button,
            disabled: false,
            progress: false,
            progress_title: DEFAULT_PROGRESS_TITLE.to_string(),
            progress_color: DEFAULT_PROGRESS_COLOR.to_string(),
            icon: None,
            class_name: None,
            test_id_value: None,
            id: WidgetId::next(),
        }
    }

    /// Set variant.
    #[must_use]
    pub const fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Set form role.
    #[must_use]
    pub const fn button_type(mut self, button_type: ButtonType) -> Self {
        self.button_type = button_type;
        self
    }

    /// Set disabled state.
    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set progress state.
    #[must_use]
    pub const fn progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Set the in-progress title.
    #[must_use]
    pub fn progress_title(mut self, title: impl Into<String>) -> Self {
        self.progress_title = title.into();
        self
    }

    /// Set the progress bar colour.
    #[must_use]
    pub fn progress_color(mut self, color: impl Into<String>) -> Self {
        self.progress_color = color.into();
        self
    }

    /// Set icon.
    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
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

    /// Get title.
    #[must_use]
    pub fn get_title(&self) -> &str {
        &self.title
    }

    /// Title currently displayed.
    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.progress {
            &self.progress_title
        } else {
            &self.title
        }
    }

    /// Check if clicks are ignored: disabled or in progress.
    #[must_use]
    pub const fn is_blocked(&self) -> bool {
        self.disabled || self.progress
    }

    /// Instance id.
    #[must_use]
    pub const fn id(&self) -> WidgetId {
        self.id
    }
}

impl Widget for Button {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn render(&self, theme: &Theme) -> Node {
        let icon = self.icon.as_ref().map(|icon| {
            Node::new("i")
                .class("material-icons")
                .classes(theme.classes([("icon", true)]))
                .text(icon.as_str())
        });
        let bar = Node::new("span")
            .classes(theme.classes([("progress", true), ("showProgress", self.progress)]))
            .child(
                Node::new("span")
                    .classes(theme.classes([("progressInner", true)]))
                    .attr("style", format!("background: {}", self.progress_color)),
            );

        Node::new("button")
            .classes(theme.classes([
                ("button", true),
                (self.variant.slot(), true),
                ("progressBtn", self.progress),
            ]))
            .classes(self.class_name.iter().cloned())
            .owner(self.id)
            .attr("type", self.button_type.as_str())
            .attr_if(self.is_blocked(), "disabled", "true")
            .attr_if(
                self.test_id_value.is_some(),
                rselect_core::TEST_ID_ATTR,
                self.test_id_value.as_deref().unwrap_or_default(),
            )
            .maybe_child(icon)
            .child(
                Node::new("span")
                    .classes(theme.classes([("content", true)]))
                    .text(self.display_title()),
            )
            .child(bar)
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        if self.is_blocked() {
            return None;
        }
        match event {
            Event::Click { path } if path.passes_through(self.id) => {
                tracing::debug!(title = %self.title, "button clicked");
                Some(Box::new(ButtonClicked {
                    title: self.title.clone(),
                }))
            }
            _ => None,
        }
    }

    fn is_interactive(&self) -> bool {
        !self.is_blocked()
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Button
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }
}

/// Row of buttons sharing one wrapper.
#[derive(Debug, Default)]
pub struct ButtonGroup {
    buttons: Vec<Button>,
}

impl ButtonGroup {
    /// Create an empty group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a button.
    #[must_use]
    pub fn button(mut self, button: Button) -> Self {
        self.buttons.push(button);
        self
    }

    /// Buttons in order.
    #[must_use]
    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }
}

impl Widget for ButtonGroup {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn render(&self, theme: &Theme) -> Node {
        Node::new("div")
            .classes(theme.classes([("buttonGroup", true)]))
            .children(self.buttons.iter().map(|b| b.render(theme)))
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        self.buttons.iter_mut().find_map(|b| b.event(event))
    }

    fn is_interactive(&self) -> bool {
        self.buttons.iter().any(Widget::is_interactive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rselect_core::{EventPath, NodeRef};

    fn theme() -> Theme {
        Theme::identity(THEME_SLOTS.iter().copied())
    }

    fn click(button: &Button) -> Event {
        let path = button
            .render(&theme())
            .path_to(&|n| n.has_class("content"))
            .expect("content span");
        Event::Click { path }
    }

    #[test]
    fn test_button_defaults() {
        let b = Button::new("Save");
        assert_eq!(b.get_title(), "Save");
        assert_eq!(b.variant, ButtonVariant::Primary);
        assert_eq!(b.button_type, ButtonType::Button);
        assert_eq!(b.progress_title, "loading...");
        assert_eq!(b.progress_color, "#d6901e");
        assert!(!b.is_blocked());
    }

    #[test]
    fn test_button_click_emits() {
        let mut b = Button::new("Save");
        let event = click(&b);
        let msg = b.event(&event).expect("clicked");
        let msg = msg.downcast::<ButtonClicked>().expect("button clicked");
        assert_eq!(msg.title, "Save");
    }

    #[test]
    fn test_button_disabled_no_click() {
        let mut b = Button::new("Save").disabled(true);
        let event = click(&b);
        assert!(b.event(&event).is_none());
        assert!(!b.is_interactive());
    }

    #[test]
    fn test_button_progress_blocks_and_swaps_title() {
        let mut b = Button::new("Save").progress(true);
        let event = click(&b);
        assert!(b.event(&event).is_none());
        assert_eq!(b.display_title(), "loading...");
        let tree = b.render(&theme());
        assert!(tree.has_class("progressBtn"));
        assert_eq!(tree.get_attr("disabled"), Some("true"));
        assert!(tree.find(&|n| n.has_class("showProgress")).is_some());
    }

    #[test]
    fn test_button_click_elsewhere_ignored() {
        let mut b = Button::new("Save");
        let event = Event::Click {
            path: EventPath::new(vec![NodeRef::detached("body")]),
        };
        assert!(b.event(&event).is_none());
    }

    #[test]
    fn test_button_render_classes() {
        let tree = Button::new("Delete")
            .variant(ButtonVariant::Danger)
            .button_type(ButtonType::Submit)
            .class_name("wide")
            .icon("delete")
            .render(&theme());
        assert_eq!(tree.tag(), "button");
        assert_eq!(tree.class_list(), ["button", "danger", "wide"]);
        assert_eq!(tree.get_attr("type"), Some("submit"));
        let icon = tree.find(&|n| n.tag() == "i").expect("icon");
        assert!(icon.has_class("material-icons"));
        assert_eq!(icon.text_content(), "delete");
    }

    #[test]
    fn test_button_progress_color_style() {
        let tree = Button::new("Go").progress_color("#000").render(&theme());
        let inner = tree.find(&|n| n.has_class("progressInner")).expect("inner");
        assert_eq!(inner.get_attr("style"), Some("background: #000"));
    }

    #[test]
    fn test_button_from_json() {
        let b: Button = serde_json::from_str(r#"{"title":"Send","type":"submit","variant":"warning"}"#)
            .expect("button json");
        assert_eq!(b.button_type, ButtonType::Submit);
        assert_eq!(b.variant, ButtonVariant::Warning);
        assert_eq!(b.progress_title, DEFAULT_PROGRESS_TITLE);
    }

    #[test]
    fn test_group_forwards_to_hit_button() {
        let mut group = ButtonGroup::new()
            .button(Button::new("One"))
            .button(Button::new("Two"));
        let path = group
            .render(&theme())
            .path_to(&|n| n.own_text() == Some("Two"))
            .expect("second");
        let msg = group.event(&Event::Click { path }).expect("clicked");
        assert_eq!(msg.downcast::<ButtonClicked>().expect("msg").title, "Two");
        assert_eq!(group.buttons().len(), 2);
    }
}
