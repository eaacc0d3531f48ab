#![allow(clippy::unwrap_used)]
//! Testing harness for Rselect widgets.
//!
//! Widgets are driven through their rendered node trees: a [`Harness`]
//! finds nodes with CSS-like [`Selector`]s, builds the event path a real
//! pointer or keyboard would produce and delivers it to the widgets and to
//! the document-level pointer hub.
//!
//! ```ignore
//! use rselect_test::Harness;
//!
//! let mut harness = Harness::new(Select::new(config)).with_theme(identity_theme());
//! harness.click("[data-part='value']");
//! harness.assert_count(".option", 3);
//! ```

mod harness;
mod selector;

pub use harness::{Harness, BODY_TAG};
pub use selector::{Compound, Selector, SelectorError, SelectorParser, Simple};
