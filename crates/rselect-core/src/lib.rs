//! Core types and traits for the Rselect widget family.
//!
//! This crate provides the foundation the widgets build on:
//! - Render output: [`Node`] trees and the [`EventPath`] events carry
//! - Input: [`Event`] and document-level [`PointerEvent`]s
//! - Styling: the [`Theme`] slot-to-class map
//! - Global input as a capability: [`PointerSource`] and [`PointerHub`]
//! - The [`Widget`] trait

mod event;
mod node;
mod pointer;
mod theme;
pub mod widget;

pub use event::{Event, PointerEvent};
pub use node::{EventPath, Node, NodeRef, KEEP_OPEN_ATTR, PART_ATTR, TEST_ID_ATTR, VALUE_ATTR};
pub use pointer::{ListenerId, PointerHub, PointerListener, PointerSource};
pub use theme::{Theme, ThemeError};
pub use widget::{AccessibleRole, TypeId, Widget, WidgetId};
