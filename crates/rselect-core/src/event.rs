//! Input events for widgets.

use crate::node::EventPath;
use serde::{Deserialize, Serialize};

/// Input event types.
///
/// Every event carries the path it travelled, target first, so a widget can
/// tell which of its rendered parts was hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Primary pointer click
    Click {
        /// Target-first node chain
        path: EventPath,
    },
    /// Text field contents changed
    Input {
        /// Target-first node chain
        path: EventPath,
        /// Full field text after the edit
        text: String,
    },
    /// Element gained focus
    Focus {
        /// Target-first node chain
        path: EventPath,
    },
}

impl Event {
    /// Path the event travelled.
    #[must_use]
    pub const fn path(&self) -> &EventPath {
        match self {
            Self::Click { path } | Self::Input { path, .. } | Self::Focus { path } => path,
        }
    }
}

/// Event delivered to document-level pointer listeners.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Target-first node chain
    pub path: EventPath,
}

impl PointerEvent {
    /// Create a pointer event for a path.
    #[must_use]
    pub const fn new(path: EventPath) -> Self {
        Self { path }
    }
}
