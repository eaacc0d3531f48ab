//! Outside-interaction detection.

use rselect_core::{EventPath, WidgetId, KEEP_OPEN_ATTR};

/// Where a document-level pointer event landed relative to a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerVerdict {
    /// Inside the widget's rendered subtree (or the widget is not mounted)
    Inside,
    /// On a node marked keep-open
    KeepOpen,
    /// Outside; an open dropdown should close
    Outside,
}

/// Decides whether a pointer event happened outside a widget.
///
/// The event path is walked from the target upward. The first node that is
/// marked keep-open or that is the widget's own root settles the event as
/// inside. Running off the end of the path means outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutsideClickDetector {
    root: Option<WidgetId>,
}

impl OutsideClickDetector {
    /// Detector for a mounted root.
    #[must_use]
    pub const fn attached(root: WidgetId) -> Self {
        Self { root: Some(root) }
    }

    /// Root being watched, if mounted.
    #[must_use]
    pub const fn root(&self) -> Option<WidgetId> {
        self.root
    }

    /// Classify an event path.
    #[must_use]
    pub fn classify(&self, path: &EventPath) -> PointerVerdict {
        let Some(root) = self.root else {
            return PointerVerdict::Inside;
        };
        for node in path.ancestors() {
            if node.has_attr(KEEP_OPEN_ATTR) {
                return PointerVerdict::KeepOpen;
            }
            if node.owner == Some(root) {
                return PointerVerdict::Inside;
            }
        }
        PointerVerdict::Outside
    }

    /// Whether the event should close the dropdown.
    #[must_use]
    pub fn is_outside(&self, path: &EventPath) -> bool {
        self.classify(path) == PointerVerdict::Outside
    }
}
