//! Item table: a checkable list of named items with an add action.

use crate::button::{Button, ButtonClicked};
use crate::checkbox::CheckState;
use rselect_core::{
    widget::AccessibleRole, Event, Node, Theme, TypeId, Widget, WidgetId, PART_ATTR, TEST_ID_ATTR,
    VALUE_ATTR,
};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Text shown when the table has no items.
pub const NO_ITEMS_MESSAGE: &str = "No matching items found";

/// Title of the add button.
pub const ADD_ITEM_TITLE: &str = "ADD ITEM";

/// Header label used when none are configured.
pub const DEFAULT_HEADER: &str = "Items";

/// Theme slots an item table reads.
pub const THEME_SLOTS: &[&str] = &[
    "tableContainer",
    "table",
    "tableWithThead",
    "tableWithTbody",
    "contentTable",
    "selectedItem",
    "noMatching",
    "tableButton",
    "check",
    "checked",
    "indeterminate",
];

const ROW_PART: &str = "row";
const TOGGLE_ALL_PART: &str = "toggle-all";

/// A row of the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableItem {
    /// Identifier
    pub id: String,
    /// Display name
    pub name: String,
}

impl TableItem {
    /// Create an item.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Message emitted when one row is toggled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemToggled {
    /// Item id
    pub id: String,
    /// Whether the item is now selected
    pub selected: bool,
}

/// Message emitted when the header checkbox is clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllItemsToggled {
    /// Selection after the toggle
    pub selected: Vec<String>,
}

/// Message emitted when the add button is clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemAddRequested;

/// Table of selectable items.
#[derive(Debug)]
pub struct ItemTable {
    items: Vec<TableItem>,
    selected: Vec<String>,
    headers: Vec<String>,
    add_button: Button,
    test_id_value: Option<String>,
    id: WidgetId,
}

impl Default for ItemTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            selected: Vec::new(),
            headers: Vec::new(),
            add_button: Button::new(ADD_ITEM_TITLE),
            test_id_value: None,
            id: WidgetId::next(),
        }
    }

    /// Add an item.
    #[must_use]
    pub fn item(mut self, item: TableItem) -> Self {
        self.items.push(item);
        self
    }

    /// Add items.
    #[must_use]
    pub fn items(mut self, items: impl IntoIterator<Item = TableItem>) -> Self {
        self.items.extend(items);
        self
    }

    /// Set the initially selected ids.
    #[must_use]
    pub fn selected(mut self, ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.selected = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Add a column header label.
    #[must_use]
    pub fn header(mut self, label: impl Into<String>) -> Self {
        self.headers.push(label.into());
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Items in order.
    #[must_use]
    pub fn get_items(&self) -> &[TableItem] {
        &self.items
    }

    /// Selected ids in selection order.
    #[must_use]
    pub fn selected_ids(&self) -> &[String] {
        &self.selected
    }

    /// Check if an item is selected.
    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    /// State of the header checkbox.
    #[must_use]
    pub fn header_state(&self) -> CheckState {
        let count = self.items.iter().filter(|i| self.is_selected(&i.id)).count();
        CheckState::from_counts(count, self.items.len())
    }

    /// Controlled update of the selection.
    pub fn set_selected(&mut self, ids: Vec<String>) {
        self.selected = ids;
    }

    /// Replace the items.
    pub fn set_items(&mut self, items: Vec<TableItem>) {
        self.items = items;
    }

    /// Toggle one item.
    pub fn toggle_item(&mut self, id: &str) -> ItemToggled {
        let selected = if let Some(pos) = self.selected.iter().position(|s| s == id) {
            self.selected.remove(pos);
            false
        } else {
            self.selected.push(id.to_string());
            true
        };
        tracing::debug!(id, selected, "item toggled");
        ItemToggled {
            id: id.to_string(),
            selected,
        }
    }

    /// Select every item, or none when all are already selected.
    pub fn toggle_all(&mut self) -> AllItemsToggled {
        if self.header_state().is_checked() {
            self.selected.clear();
        } else {
            self.selected = self.items.iter().map(|i| i.id.clone()).collect();
        }
        tracing::debug!(selected = self.selected.len(), "all items toggled");
        AllItemsToggled {
            selected: self.selected.clone(),
        }
    }

    fn check(theme: &Theme, state: CheckState) -> Node {
        Node::new("span").classes(theme.classes([
            ("check", true),
            ("checked", state.is_checked()),
            ("indeterminate", state.is_indeterminate()),
        ]))
    }

    fn head(&self, theme: &Theme) -> Node {
        let labels: Vec<&str> = if self.headers.is_empty() {
            vec![DEFAULT_HEADER]
        } else {
            self.headers.iter().map(String::as_str).collect()
        };
        let row = Node::new("tr")
            .child(
                Node::new("th")
                    .attr(PART_ATTR, TOGGLE_ALL_PART)
                    .child(Self::check(theme, self.header_state())),
            )
            .children(
                labels
                    .into_iter()
                    .map(|label| Node::new("th").child(Node::new("span").text(label))),
            );
        Node::new("table")
            .classes(theme.classes([("table", true), ("tableWithThead", true)]))
            .child(Node::new("thead").child(row))
    }

    fn body(&self, theme: &Theme) -> Node {
        let body = Node::new("tbody");
        let body = if self.items.is_empty() {
            body.child(
                Node::new("tr")
                    .classes(theme.classes([("noMatching", true)]))
                    .child(Node::new("td").child(Node::new("span").text(NO_ITEMS_MESSAGE))),
            )
        } else {
            body.children(self.items.iter().map(|item| {
                let selected = self.is_selected(&item.id);
                Node::new("tr")
                    .classes(theme.classes([("selectedItem", selected)]))
                    .attr(PART_ATTR, ROW_PART)
                    .attr(VALUE_ATTR, item.id.as_str())
                    .child(Node::new("td").child(Self::check(theme, selected.into())))
                    .child(Node::new("td").text(item.name.as_str()))
            }))
        };
        Node::new("table")
            .classes(theme.classes([("table", true), ("tableWithTbody", true)]))
            .child(body)
    }
}

impl Widget for ItemTable {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn render(&self, theme: &Theme) -> Node {
        Node::new("div")
            .classes(theme.classes([("tableContainer", true)]))
            .owner(self.id)
            .attr_if(
                self.test_id_value.is_some(),
                TEST_ID_ATTR,
                self.test_id_value.as_deref().unwrap_or_default(),
            )
            .child(self.head(theme))
            .child(
                Node::new("div")
                    .classes(theme.classes([("contentTable", true)]))
                    .child(self.body(theme))
                    .child(
                        self.add_button
                            .render(theme)
                            .classes(theme.classes([("tableButton", true)])),
                    ),
            )
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        let Event::Click { path } = event else {
            return None;
        };
        if !path.passes_through(self.id) {
            return None;
        }
        if let Some(message) = self.add_button.event(event) {
            return message
                .downcast::<ButtonClicked>()
                .ok()
                .map(|_| Box::new(ItemAddRequested) as Box<dyn Any + Send>);
        }
        let (node, part) = path.closest_attr(PART_ATTR)?;
        match part {
            ROW_PART => {
                let id = node.attr(VALUE_ATTR)?;
                Some(Box::new(self.toggle_item(id)))
            }
            TOGGLE_ALL_PART => Some(Box::new(self.toggle_all())),
            _ => None,
        }
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Table
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theme() -> Theme {
        Theme::identity(
            THEME_SLOTS
                .iter()
                .chain(crate::button::THEME_SLOTS)
                .copied(),
        )
    }

    fn table() -> ItemTable {
        ItemTable::new().items([
            TableItem::new("a", "Revenue"),
            TableItem::new("b", "Churn"),
            TableItem::new("c", "Retention"),
        ])
    }

    fn click(table: &ItemTable, pred: &dyn Fn(&Node) -> bool) -> Event {
        let path = table.render(&theme()).path_to(pred).expect("target rendered");
        Event::Click { path }
    }

    #[test]
    fn test_header_state() {
        assert_eq!(table().header_state(), CheckState::Unchecked);
        assert_eq!(table().selected(["a"]).header_state(), CheckState::Indeterminate);
        assert_eq!(table().selected(["a", "b", "c"]).header_state(), CheckState::Checked);
        assert_eq!(ItemTable::new().header_state(), CheckState::Unchecked);
    }

    #[test]
    fn test_row_click_toggles() {
        let mut t = table();
        let event = click(&t, &|n| n.own_text() == Some("Churn"));
        let msg = t.event(&event).expect("toggled");
        let msg = msg.downcast::<ItemToggled>().expect("item toggled");
        assert_eq!(*msg, ItemToggled { id: "b".into(), selected: true });
        assert_eq!(t.selected_ids(), ["b"]);

        let msg = t.event(&event).expect("toggled again");
        assert!(!msg.downcast::<ItemToggled>().expect("item toggled").selected);
        assert!(t.selected_ids().is_empty());
    }

    #[test]
    fn test_toggle_all() {
        let mut t = table().selected(["a"]);
        let event = click(&t, &|n| n.get_attr(PART_ATTR) == Some(TOGGLE_ALL_PART));
        let msg = t.event(&event).expect("toggled");
        assert_eq!(msg.downcast::<AllItemsToggled>().expect("all").selected, ["a", "b", "c"]);
        t.event(&event);
        assert!(t.selected_ids().is_empty());
    }

    #[test]
    fn test_add_button() {
        let mut t = table();
        let event = click(&t, &|n| n.own_text() == Some(ADD_ITEM_TITLE));
        let msg = t.event(&event).expect("add");
        assert!(msg.downcast::<ItemAddRequested>().is_ok());
        assert!(t.selected_ids().is_empty());
    }

    #[test]
    fn test_empty_message() {
        let tree = ItemTable::new().render(&theme());
        let row = tree.find(&|n| n.has_class("noMatching")).expect("no items row");
        assert_eq!(row.text_content(), NO_ITEMS_MESSAGE);
        assert!(tree.find(&|n| n.get_attr(PART_ATTR) == Some(ROW_PART)).is_none());
    }

    #[test]
    fn test_render_selected_rows() {
        let tree = table().selected(["c"]).render(&theme());
        let rows = tree.find_all(&|n| n.has_class("selectedItem"));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get_attr(VALUE_ATTR), Some("c"));
        assert!(tree.find(&|n| n.has_class("tableButton")).is_some());
    }

    #[test]
    fn test_headers() {
        let tree = table().render(&theme());
        assert!(tree.find(&|n| n.own_text() == Some(DEFAULT_HEADER)).is_some());
        let tree = table().header("Name").header("Param").render(&theme());
        assert_eq!(tree.find_all(&|n| n.tag() == "th").len(), 3);
    }
}
