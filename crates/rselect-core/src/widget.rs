//! Widget trait and related types.
//!
//! Widgets in Rselect are headless state holders that describe themselves as
//! a [`Node`] tree. The host renders that tree however it likes and feeds
//! user interaction back through [`Widget::event`].
//!
//! # Widget Lifecycle
//!
//! 1. **Construct**: builder methods set the initial properties
//! 2. **Mount**: the widget may subscribe to process-wide sources
//!    (see [`PointerSource`])
//! 3. **Render / Event**: any number of render passes and events, each event
//!    yielding at most one message
//! 4. **Unmount**: every subscription taken at mount is released
//!
//! # Examples
//!
//! ```
//! use rselect_core::{WidgetId, TypeId};
//!
//! let a = WidgetId::next();
//! let b = WidgetId::next();
//! assert_ne!(a, b);
//!
//! assert_ne!(TypeId::of::<String>(), TypeId::of::<i32>());
//! ```

use crate::event::Event;
use crate::node::Node;
use crate::pointer::PointerSource;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_WIDGET_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WidgetId(pub u64);

impl WidgetId {
    /// Create a widget ID from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Allocate a process-unique widget ID.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_WIDGET_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Type identifier for widget types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(std::any::TypeId);

impl TypeId {
    /// Get the type ID for a type.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self(std::any::TypeId::of::<T>())
    }
}

/// Accessible role of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccessibleRole {
    /// No specific role
    #[default]
    Generic,
    /// Push button
    Button,
    /// Checkbox
    Checkbox,
    /// Combo box (select, autocomplete)
    ComboBox,
    /// List box (multi-select)
    ListBox,
    /// Table
    Table,
}

/// Core widget trait that all Rselect elements implement.
pub trait Widget: Send {
    /// Get the type identifier for this widget type.
    fn type_id(&self) -> TypeId;

    /// Describe the widget as an element tree, reading class names from `theme`.
    fn render(&self, theme: &Theme) -> Node;

    /// Handle an input event, returning the message it produced, if any.
    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>>;

    /// Attach process-wide subscriptions.
    fn mount(&mut self, _pointer: Arc<dyn PointerSource>) {}

    /// Release everything taken in [`Widget::mount`].
    fn unmount(&mut self) {}

    /// Check if this widget is interactive (can receive events).
    fn is_interactive(&self) -> bool {
        false
    }

    /// Get the accessible role.
    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Generic
    }

    /// Get the test ID for this widget (if any).
    fn test_id(&self) -> Option<&str> {
        None
    }
}
