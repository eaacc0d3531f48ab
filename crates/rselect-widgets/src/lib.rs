//! Widget implementations for the Rselect family.
//!
//! The centrepiece is [`Select`], a dropdown with base, autocomplete and
//! multi-select modes. Button, checkbox and item table primitives sit
//! behind the `input-widgets` and `data-widgets` features.

pub mod select;

#[cfg(feature = "input-widgets")]
pub mod button;
#[cfg(feature = "input-widgets")]
pub mod checkbox;
#[cfg(feature = "data-widgets")]
pub mod item_table;

pub use select::{
    ConfigError, Direction, Mode, OptionStore, QueryChanged, Select, SelectConfig, SelectOption,
    SelectValue, SelectionChanged,
};

#[cfg(feature = "input-widgets")]
pub use button::{Button, ButtonClicked, ButtonGroup, ButtonType, ButtonVariant};
#[cfg(feature = "input-widgets")]
pub use checkbox::{CheckState, Checkbox, CheckboxChanged};
#[cfg(feature = "data-widgets")]
pub use item_table::{AllItemsToggled, ItemAddRequested, ItemTable, ItemToggled, TableItem};

use rselect_core::Theme;

/// Theme mapping every slot the enabled widgets read to a class of the same name.
#[must_use]
pub fn identity_theme() -> Theme {
    let mut slots: Vec<&str> = select::THEME_SLOTS.to_vec();
    #[cfg(feature = "input-widgets")]
    {
        slots.extend_from_slice(button::THEME_SLOTS);
        slots.extend_from_slice(checkbox::THEME_SLOTS);
    }
    #[cfg(feature = "data-widgets")]
    slots.extend_from_slice(item_table::THEME_SLOTS);
    Theme::identity(slots)
}
