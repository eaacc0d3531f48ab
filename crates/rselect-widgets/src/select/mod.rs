//! Select/Dropdown widget with autocomplete and multi-select modes.
//!
//! A [`Select`] composes an [`OptionStore`], a [`FilterStrategy`] chosen once
//! from its [`Mode`], a [`SelectionState`] and an [`OutsideClickDetector`]
//! registered against an injected [`PointerSource`] while mounted.

mod config;
mod filter;
mod option;
mod outside;
mod render;
mod state;

pub use config::{
    ConfigError, Direction, SelectConfig, DEFAULT_NO_DATA_MESSAGE, DEFAULT_PLACEHOLDER,
};
pub use filter::{
    matches_query, strategy_for, BaseFilter, FilterOutput, FilterStrategy, MultiFilter,
    QueryFilter,
};
pub use option::{OptionStore, SelectOption, DEFAULT_LABEL_KEY, DEFAULT_VALUE_KEY};
pub use outside::{OutsideClickDetector, PointerVerdict};
pub use state::{DropdownState, Mode, SelectValue, SelectionState};

use render::{part, View};
use rselect_core::{
    widget::AccessibleRole, Event, ListenerId, Node, PointerEvent, PointerSource, Theme, TypeId,
    Widget, WidgetId, PART_ATTR, VALUE_ATTR,
};
use std::any::Any;
use std::sync::{Arc, Mutex, MutexGuard};

/// Theme slots a select reads.
pub const THEME_SLOTS: &[&str] = &[
    "container",
    "select",
    "isFocused",
    "disabled",
    "hasError",
    "selectContent",
    "value",
    "placeholder",
    "arrowContainer",
    "arrow",
    "up",
    "input",
    "options",
    "option",
    "hidden",
    "top",
    "tags",
    "tag",
    "tagText",
    "cross",
    "error",
];

/// Message emitted when the committed value changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChanged {
    /// New value or values
    pub value: SelectValue,
    /// The select's `name`, if configured
    pub name: Option<String>,
}

/// Message emitted when the query text is edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryChanged {
    /// Raw input text
    pub query: String,
}

/// Change callback: `(value, name)`.
pub type ChangeCallback = Box<dyn FnMut(&SelectValue, Option<&str>) + Send>;

/// Query callback: raw input text.
pub type QueryCallback = Box<dyn FnMut(&str) + Send>;

/// Select/Dropdown widget.
pub struct Select {
    id: WidgetId,
    mode: Mode,
    strategy: Box<dyn FilterStrategy>,
    options: OptionStore,
    state: Arc<Mutex<SelectionState>>,
    name: Option<String>,
    placeholder: String,
    no_data_message: String,
    direction: Direction,
    disabled: bool,
    error: Option<String>,
    pointer: Option<(Arc<dyn PointerSource>, ListenerId)>,
    on_change: Option<ChangeCallback>,
    on_query_change: Option<QueryCallback>,
    test_id_value: Option<String>,
}

impl std::fmt::Debug for Select {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Select")
            .field("id", &self.id)
            .field("mode", &self.mode)
            .field("options", &self.options.len())
            .field("state", &*self.lock_state())
            .field("mounted", &self.pointer.is_some())
            .finish_non_exhaustive()
    }
}

impl Select {
    /// Create a select from its configuration.
    #[must_use]
    pub fn new(config: SelectConfig) -> Self {
        let mode = config.mode();
        let options = config.option_store();
        let query = if mode == Mode::AutoComplete && config.query.is_empty() {
            config
                .value
                .as_deref()
                .and_then(|id| options.label_of(id))
                .unwrap_or_default()
                .to_string()
        } else {
            config.query.clone()
        };
        let state = SelectionState::new(
            mode,
            config.value.clone(),
            config.values.clone(),
            query,
            config.is_focused,
        );
        let error = config.error_message().map(str::to_string);
        tracing::debug!(?mode, options = options.len(), "select created");

        Self {
            id: WidgetId::next(),
            mode,
            strategy: strategy_for(mode, config.empty_option),
            options,
            state: Arc::new(Mutex::new(state)),
            name: config.name,
            placeholder: config.placeholder,
            no_data_message: config.no_data_message,
            direction: config.direction,
            disabled: config.disabled,
            error,
            pointer: None,
            on_change: None,
            on_query_change: None,
            test_id_value: None,
        }
    }

    /// Set the change callback.
    #[must_use]
    pub fn on_change(
        mut self,
        callback: impl FnMut(&SelectValue, Option<&str>) + Send + 'static,
    ) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Set the query callback.
    #[must_use]
    pub fn on_query_change(mut self, callback: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_query_change = Some(Box::new(callback));
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    fn lock_state(&self) -> MutexGuard<'_, SelectionState> {
        self.state.lock().expect("selection state mutex poisoned")
    }

    /// Instance id; the rendered root carries it as owner.
    #[must_use]
    pub const fn id(&self) -> WidgetId {
        self.id
    }

    /// Mode resolved at construction.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// The `name` passed back with changes.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Options in order.
    #[must_use]
    pub const fn options(&self) -> &OptionStore {
        &self.options
    }

    /// Check if the dropdown is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.lock_state().is_open()
    }

    /// Current query text.
    #[must_use]
    pub fn query(&self) -> String {
        self.lock_state().query().to_string()
    }

    /// Committed value.
    #[must_use]
    pub fn value(&self) -> SelectValue {
        self.lock_state().value().clone()
    }

    /// Single value, if any.
    #[must_use]
    pub fn selected_value(&self) -> Option<String> {
        self.lock_state().single_value().map(str::to_string)
    }

    /// Multi values in insertion order.
    #[must_use]
    pub fn values(&self) -> Vec<String> {
        self.lock_state().multi_values().to_vec()
    }

    /// Label of the single value. An id with no matching option has none.
    #[must_use]
    pub fn selected_label(&self) -> Option<String> {
        let state = self.lock_state();
        state
            .single_value()
            .and_then(|id| self.options.label_of(id))
            .map(str::to_string)
    }

    /// Options the open dropdown would show.
    #[must_use]
    pub fn visible_options(&self) -> Vec<SelectOption> {
        let state = self.lock_state();
        self.strategy
            .filter(&self.options, &state)
            .options
            .into_iter()
            .cloned()
            .collect()
    }

    /// Check if disabled.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Error message, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Check if the outside-click listener is registered.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.pointer.is_some()
    }

    /// Open the dropdown.
    pub fn open(&mut self) {
        self.lock_state().open();
    }

    /// Close the dropdown.
    pub fn close(&mut self) {
        self.lock_state().close();
    }

    /// Flip the dropdown.
    pub fn toggle_open(&mut self) -> DropdownState {
        self.lock_state().toggle()
    }

    /// Controlled update of the single value. Does not fire `on_change`.
    pub fn set_value(&mut self, value: Option<String>) -> bool {
        let label = value.as_deref().and_then(|id| self.options.label_of(id));
        self.lock_state().sync_value(value, label)
    }

    /// Controlled update of the multi values. Does not fire `on_change`.
    pub fn set_values(&mut self, values: Vec<String>) -> bool {
        self.lock_state().sync_values(values)
    }

    /// Replace the options.
    pub fn set_options(&mut self, options: OptionStore) {
        tracing::debug!(options = options.len(), "options replaced");
        self.options = options;
    }

    /// Set or clear the error message. An empty message clears it.
    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error.filter(|e| !e.is_empty());
    }

    /// Set disabled state.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Commit a pick of the option with `id`.
    ///
    /// Unknown ids are ignored. In multi mode the id is toggled.
    pub fn pick(&mut self, id: &str) -> Option<SelectionChanged> {
        let Some(option) = self.options.get(id) else {
            tracing::warn!(id, "pick of unknown option ignored");
            return None;
        };
        let value = self.lock_state().choose(&option.id, Some(&option.label));
        Some(self.emit(value))
    }

    /// Remove a tag in multi mode.
    pub fn remove_value(&mut self, id: &str) -> Option<SelectionChanged> {
        let value = {
            let mut state = self.lock_state();
            if state.mode() != Mode::Multi || !state.is_selected(id) {
                return None;
            }
            state.choose(id, None)
        };
        Some(self.emit(value))
    }

    /// Clear a single selection. Returns `None` when nothing was selected.
    pub fn clear(&mut self) -> Option<SelectionChanged> {
        let value = {
            let mut state = self.lock_state();
            if state.single_value().is_none() {
                return None;
            }
            state.clear()
        };
        Some(self.emit(value))
    }

    /// Apply typed text to the query and open the dropdown.
    ///
    /// Ignored in base mode, which has no query.
    pub fn type_query(&mut self, text: &str) -> Option<QueryChanged> {
        if !self.mode.has_query() {
            return None;
        }
        {
            let mut state = self.lock_state();
            state.set_query(text);
            state.open();
        }
        if let Some(callback) = self.on_query_change.as_mut() {
            callback(text);
        }
        Some(QueryChanged {
            query: text.to_string(),
        })
    }

    fn emit(&mut self, value: SelectValue) -> SelectionChanged {
        if let Some(callback) = self.on_change.as_mut() {
            callback(&value, self.name.as_deref());
        }
        SelectionChanged {
            value,
            name: self.name.clone(),
        }
    }
}

fn boxed<M: Any + Send>(message: M) -> Box<dyn Any + Send> {
    Box::new(message)
}

impl Widget for Select {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn render(&self, theme: &Theme) -> Node {
        let state = self.lock_state();
        View {
            id: self.id,
            mode: self.mode,
            theme,
            state: &state,
            options: &self.options,
            visible: self.strategy.filter(&self.options, &state),
            placeholder: &self.placeholder,
            no_data_message: &self.no_data_message,
            direction: self.direction,
            disabled: self.disabled,
            error: self.error.as_deref(),
            test_id: self.test_id_value.as_deref(),
        }
        .render()
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        if self.disabled {
            return None;
        }
        let path = event.path();
        if !path.passes_through(self.id) {
            return None;
        }
        let (node, hit) = path.closest_attr(PART_ATTR)?;

        match (event, hit) {
            (Event::Click { .. }, part::VALUE | part::ARROW) => {
                self.toggle_open();
                None
            }
            (Event::Click { .. } | Event::Focus { .. }, part::INPUT) => {
                self.open();
                None
            }
            (Event::Input { text, .. }, part::INPUT) => self.type_query(text).map(boxed),
            (Event::Click { .. }, part::OPTION) => self.pick(node.attr(VALUE_ATTR)?).map(boxed),
            (Event::Click { .. }, part::CLEAR) => self.clear().map(boxed),
            (Event::Click { .. }, part::REMOVE_TAG) => {
                self.remove_value(node.attr(VALUE_ATTR)?).map(boxed)
            }
            _ => None,
        }
    }

    fn mount(&mut self, pointer: Arc<dyn PointerSource>) {
        self.unmount();
        let detector = OutsideClickDetector::attached(self.id);
        let state = Arc::clone(&self.state);
        let listener = pointer.subscribe(Box::new(move |event: &PointerEvent| {
            if detector.is_outside(&event.path) {
                let mut state = state.lock().expect("selection state mutex poisoned");
                if state.close() {
                    tracing::debug!("closed by outside click");
                }
            }
        }));
        tracing::debug!(id = self.id.0, ?listener, "select mounted");
        self.pointer = Some((pointer, listener));
    }

    fn unmount(&mut self) {
        if let Some((pointer, listener)) = self.pointer.take() {
            pointer.unsubscribe(listener);
            tracing::debug!(id = self.id.0, ?listener, "select unmounted");
        }
    }

    fn is_interactive(&self) -> bool {
        !self.disabled
    }

    fn accessible_role(&self) -> AccessibleRole {
        match self.mode {
            Mode::Multi => AccessibleRole::ListBox,
            Mode::Base | Mode::AutoComplete => AccessibleRole::ComboBox,
        }
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }
}

impl Drop for Select {
    fn drop(&mut self) {
        self.unmount();
    }
}
