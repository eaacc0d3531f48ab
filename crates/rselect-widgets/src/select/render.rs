//! Element tree for a select.
//!
//! ```text
//! container
//! ├── select [isFocused disabled hasError]
//! │   └── selectContent
//! │       ├── value | input | tags(tag*, input)
//! │       ├── options [hidden top]
//! │       │   └── clear? option* | option(no data)
//! │       └── arrowContainer > arrow [up]
//! └── error?
//! ```

use super::config::Direction;
use super::filter::FilterOutput;
use super::option::OptionStore;
use super::state::{Mode, SelectionState};
use rselect_core::{Node, Theme, WidgetId, KEEP_OPEN_ATTR, PART_ATTR, TEST_ID_ATTR, VALUE_ATTR};

/// Interactive parts of a rendered select, as named in `data-part`.
pub(crate) mod part {
    pub(crate) const VALUE: &str = "value";
    pub(crate) const ARROW: &str = "arrow";
    pub(crate) const INPUT: &str = "input";
    pub(crate) const OPTION: &str = "option";
    pub(crate) const CLEAR: &str = "clear";
    pub(crate) const NO_DATA: &str = "no-data";
    pub(crate) const REMOVE_TAG: &str = "remove-tag";
}

/// Everything one render pass reads.
pub(crate) struct View<'a> {
    pub(crate) id: WidgetId,
    pub(crate) mode: Mode,
    pub(crate) theme: &'a Theme,
    pub(crate) state: &'a SelectionState,
    pub(crate) options: &'a OptionStore,
    pub(crate) visible: FilterOutput<'a>,
    pub(crate) placeholder: &'a str,
    pub(crate) no_data_message: &'a str,
    pub(crate) direction: Direction,
    pub(crate) disabled: bool,
    pub(crate) error: Option<&'a str>,
    pub(crate) test_id: Option<&'a str>,
}

impl View<'_> {
    fn cls(&self, slot: &str) -> Vec<String> {
        self.theme.classes([(slot, true)])
    }

    fn label_of(&self, id: &str) -> String {
        self.options.label_of(id).unwrap_or_default().to_string()
    }

    pub(crate) fn render(&self) -> Node {
        let select = Node::new("div")
            .classes(self.theme.classes([
                ("select", true),
                ("isFocused", self.state.is_open()),
                ("disabled", self.disabled),
                ("hasError", self.error.is_some()),
            ]))
            .child(self.content());

        Node::new("div")
            .classes(self.cls("container"))
            .owner(self.id)
            .attr_if(self.test_id.is_some(), TEST_ID_ATTR, self.test_id.unwrap_or_default())
            .child(select)
            .maybe_child(
                self.error
                    .map(|message| Node::new("div").classes(self.cls("error")).text(message)),
            )
    }

    fn content(&self) -> Node {
        let content = Node::new("div").classes(self.cls("selectContent"));
        match self.mode {
            Mode::Base => content
                .child(self.value_display())
                .child(self.arrow())
                .child(self.options_panel(false)),
            Mode::AutoComplete => content
                .child(self.input())
                .child(self.options_panel(false))
                .child(self.arrow()),
            Mode::Multi => content
                .child(self.tags())
                .child(self.options_panel(true))
                .maybe_child(self.state.multi_values().is_empty().then(|| self.arrow())),
        }
    }

    fn value_display(&self) -> Node {
        let value = self.state.single_value();
        let text = value.map_or_else(|| self.placeholder.to_string(), |id| self.label_of(id));
        Node::new("div")
            .classes(
                self.theme
                    .classes([("value", true), ("placeholder", value.is_none())]),
            )
            .attr(PART_ATTR, part::VALUE)
            .text(text)
    }

    fn input(&self) -> Node {
        Node::new("input")
            .classes(self.cls("input"))
            .attr(PART_ATTR, part::INPUT)
            .attr("type", "text")
            .attr("placeholder", self.placeholder)
            .attr("value", self.state.query())
    }

    fn tags(&self) -> Node {
        let tags = self.state.multi_values().iter().map(|id| {
            Node::new("div")
                .classes(self.cls("tag"))
                .attr(KEEP_OPEN_ATTR, "true")
                .attr(VALUE_ATTR, id.as_str())
                .child(
                    Node::new("span")
                        .classes(self.cls("tagText"))
                        .text(self.label_of(id)),
                )
                .child(
                    Node::new("i")
                        .classes(self.cls("cross"))
                        .attr(PART_ATTR, part::REMOVE_TAG)
                        .attr(VALUE_ATTR, id.as_str()),
                )
        });
        Node::new("div")
            .classes(self.cls("tags"))
            .children(tags)
            .child(self.input())
    }

    fn options_panel(&self, keep_open: bool) -> Node {
        let panel = Node::new("div").classes(self.theme.classes([
            ("options", true),
            ("hidden", !self.state.is_open()),
            ("top", self.direction == Direction::Top),
        ]));

        let clear = self.visible.clear_entry.then(|| {
            Node::new("div")
                .classes(self.theme.classes([("option", true), ("placeholder", true)]))
                .attr(PART_ATTR, part::CLEAR)
                .text(self.placeholder)
        });

        let panel = panel.maybe_child(clear);
        if self.visible.is_empty() {
            return panel.child(
                Node::new("div")
                    .classes(self.cls("option"))
                    .attr(PART_ATTR, part::NO_DATA)
                    .text(self.no_data_message),
            );
        }

        panel.children(self.visible.options.iter().map(|option| {
            Node::new("div")
                .classes(self.cls("option"))
                .attr(PART_ATTR, part::OPTION)
                .attr(VALUE_ATTR, option.id.as_str())
                .attr_if(keep_open, KEEP_OPEN_ATTR, "true")
                .text(option.label.as_str())
        }))
    }

    fn arrow(&self) -> Node {
        Node::new("div")
            .classes(self.cls("arrowContainer"))
            .attr(PART_ATTR, part::ARROW)
            .child(
                Node::new("i").classes(
                    self.theme
                        .classes([("arrow", true), ("up", self.state.is_open())]),
                ),
            )
    }
}
