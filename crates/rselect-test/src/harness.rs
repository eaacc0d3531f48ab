//! Test harness for Rselect widgets.
//!
//! A [`Harness`] owns the widget under test, any sibling widgets, a
//! [`PointerHub`] standing in for the document-level pointer channel and a
//! rendered copy of the whole page. Every interaction delivers the event to
//! the widgets, then to the hub, then re-renders.

use rselect_core::{
    Event, EventPath, Node, NodeRef, PointerEvent, PointerHub, PointerSource, Theme, Widget,
};
use std::any::Any;
use std::sync::Arc;

use crate::selector::Selector;

/// Tag of the synthetic page root every widget is rendered under.
pub const BODY_TAG: &str = "body";

/// Test harness for interacting with Rselect widgets.
pub struct Harness<W: Widget> {
    /// Widget under test
    root: W,
    /// Sibling widgets sharing the page and pointer hub
    siblings: Vec<Box<dyn Widget>>,
    /// Document-level pointer channel
    hub: Arc<PointerHub>,
    /// Theme used for rendering
    theme: Theme,
    /// Last rendered page
    page: Node,
    /// Messages emitted by widgets, oldest first
    messages: Vec<Box<dyn Any + Send>>,
}

impl<W: Widget> Harness<W> {
    /// Create a new harness and mount `root` on a fresh pointer hub.
    pub fn new(mut root: W) -> Self {
        let hub = Arc::new(PointerHub::new());
        root.mount(Arc::clone(&hub) as Arc<dyn PointerSource>);
        let mut harness = Self {
            root,
            siblings: Vec::new(),
            hub,
            theme: Theme::default(),
            page: Node::new(BODY_TAG),
            messages: Vec::new(),
        };
        harness.refresh();
        harness
    }

    /// Render with `theme`.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self.refresh();
        self
    }

    /// Mount another widget on the same page and hub.
    #[must_use]
    pub fn with_sibling(mut self, mut widget: impl Widget + 'static) -> Self {
        widget.mount(Arc::clone(&self.hub) as Arc<dyn PointerSource>);
        self.siblings.push(Box::new(widget));
        self.refresh();
        self
    }

    // === Access ===

    /// Widget under test.
    #[must_use]
    pub const fn widget(&self) -> &W {
        &self.root
    }

    /// Widget under test, mutably. Call [`Harness::refresh`] after changes.
    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.root
    }

    /// Pointer hub the widgets are mounted on.
    #[must_use]
    pub const fn hub(&self) -> &Arc<PointerHub> {
        &self.hub
    }

    /// Last rendered page.
    #[must_use]
    pub const fn page(&self) -> &Node {
        &self.page
    }

    /// Re-render the page.
    pub fn refresh(&mut self) -> &mut Self {
        self.page = Node::new(BODY_TAG)
            .child(self.root.render(&self.theme))
            .children(self.siblings.iter().map(|w| w.render(&self.theme)));
        self
    }

    /// Unmount every widget, releasing their hub listeners.
    pub fn unmount(&mut self) -> &mut Self {
        self.root.unmount();
        for sibling in &mut self.siblings {
            sibling.unmount();
        }
        self
    }

    // === Event Simulation ===

    /// Simulate a click on the first node matching the selector.
    ///
    /// # Panics
    ///
    /// Panics if nothing matches.
    pub fn click(&mut self, selector: &str) -> &mut Self {
        let path = self.expect_path(selector);
        self.deliver(&Event::Click { path: path.clone() });
        self.hub.dispatch(&PointerEvent::new(path));
        self.refresh()
    }

    /// Simulate a click on the page outside every widget.
    pub fn click_outside(&mut self) -> &mut Self {
        let path = EventPath::new(vec![NodeRef::detached("div"), NodeRef::detached(BODY_TAG)]);
        self.deliver(&Event::Click { path: path.clone() });
        self.hub.dispatch(&PointerEvent::new(path));
        self.refresh()
    }

    /// Simulate focusing the first node matching the selector.
    ///
    /// # Panics
    ///
    /// Panics if nothing matches.
    pub fn focus(&mut self, selector: &str) -> &mut Self {
        let path = self.expect_path(selector);
        self.deliver(&Event::Focus { path });
        self.refresh()
    }

    /// Simulate typing text, one keystroke at a time, appended to the
    /// field's current `value`.
    ///
    /// # Panics
    ///
    /// Panics if nothing matches.
    pub fn type_text(&mut self, selector: &str, text: &str) -> &mut Self {
        self.focus(selector);
        let mut current = self
            .query(selector)
            .and_then(|n| n.get_attr("value"))
            .unwrap_or_default()
            .to_string();
        for c in text.chars() {
            current.push(c);
            let path = self.expect_path(selector);
            self.deliver(&Event::Input {
                path,
                text: current.clone(),
            });
            self.refresh();
        }
        self
    }

    /// Simulate replacing a field's text in one edit, e.g. clearing it.
    ///
    /// # Panics
    ///
    /// Panics if nothing matches.
    pub fn set_text(&mut self, selector: &str, text: &str) -> &mut Self {
        let path = self.expect_path(selector);
        self.deliver(&Event::Input {
            path,
            text: text.to_string(),
        });
        self.refresh()
    }

    // === Queries ===

    /// First node matching the selector.
    #[must_use]
    pub fn query(&self, selector: &str) -> Option<&Node> {
        self.query_all(selector).into_iter().next()
    }

    /// All nodes matching the selector, in document order.
    #[must_use]
    pub fn query_all(&self, selector: &str) -> Vec<&Node> {
        let Ok(sel) = Selector::parse(selector) else {
            return Vec::new();
        };
        let mut results = Vec::new();
        collect(&self.page, &mut Vec::new(), &sel, &mut results);
        results
    }

    /// Text content of the first node matching the selector.
    #[must_use]
    pub fn text(&self, selector: &str) -> String {
        self.query(selector)
            .map(Node::text_content)
            .unwrap_or_default()
    }

    /// Check if a node exists.
    #[must_use]
    pub fn exists(&self, selector: &str) -> bool {
        self.query(selector).is_some()
    }

    /// Event path to the first node matching the selector, target first.
    #[must_use]
    pub fn path(&self, selector: &str) -> Option<EventPath> {
        let sel = Selector::parse(selector).ok()?;
        let mut chain = Vec::new();
        find_chain(&self.page, &mut chain, &sel)
            .then(|| EventPath::new(chain.iter().rev().map(|n| NodeRef::from(*n)).collect()))
    }

    // === Messages ===

    /// All messages emitted so far.
    #[must_use]
    pub fn messages(&self) -> &[Box<dyn Any + Send>] {
        &self.messages
    }

    /// Messages of type `M`, oldest first.
    #[must_use]
    pub fn messages_of<M: Any>(&self) -> Vec<&M> {
        self.messages
            .iter()
            .filter_map(|m| m.downcast_ref::<M>())
            .collect()
    }

    /// Most recent message of type `M`.
    #[must_use]
    pub fn last_message<M: Any>(&self) -> Option<&M> {
        self.messages
            .iter()
            .rev()
            .find_map(|m| m.downcast_ref::<M>())
    }

    /// Forget recorded messages.
    pub fn clear_messages(&mut self) -> &mut Self {
        self.messages.clear();
        self
    }

    // === Assertions ===

    /// Assert that a node exists.
    ///
    /// # Panics
    ///
    /// Panics if the node does not exist.
    pub fn assert_exists(&self, selector: &str) -> &Self {
        assert!(
            self.exists(selector),
            "Expected node matching '{selector}' to exist"
        );
        self
    }

    /// Assert that a node does not exist.
    ///
    /// # Panics
    ///
    /// Panics if the node exists.
    pub fn assert_not_exists(&self, selector: &str) -> &Self {
        assert!(
            !self.exists(selector),
            "Expected node matching '{selector}' to not exist"
        );
        self
    }

    /// Assert that text matches exactly.
    ///
    /// # Panics
    ///
    /// Panics if the text does not match.
    pub fn assert_text(&self, selector: &str, expected: &str) -> &Self {
        let actual = self.text(selector);
        assert_eq!(
            actual, expected,
            "Expected text '{expected}' but got '{actual}' for '{selector}'"
        );
        self
    }

    /// Assert the count of matching nodes.
    ///
    /// # Panics
    ///
    /// Panics if the count does not match.
    pub fn assert_count(&self, selector: &str, expected: usize) -> &Self {
        let actual = self.query_all(selector).len();
        assert_eq!(
            actual, expected,
            "Expected {expected} nodes matching '{selector}' but found {actual}"
        );
        self
    }

    // === Internal ===

    fn expect_path(&self, selector: &str) -> EventPath {
        self.path(selector)
            .unwrap_or_else(|| panic!("No node matching '{selector}'"))
    }

    fn deliver(&mut self, event: &Event) {
        if let Some(message) = self.root.event(event) {
            self.messages.push(message);
        }
        for sibling in &mut self.siblings {
            if let Some(message) = sibling.event(event) {
                self.messages.push(message);
            }
        }
    }
}

fn collect<'a>(
    node: &'a Node,
    ancestors: &mut Vec<&'a Node>,
    selector: &Selector,
    results: &mut Vec<&'a Node>,
) {
    if selector.matches(ancestors, node) {
        results.push(node);
    }
    ancestors.push(node);
    for child in node.child_nodes() {
        collect(child, ancestors, selector, results);
    }
    ancestors.pop();
}

fn find_chain<'a>(node: &'a Node, chain: &mut Vec<&'a Node>, selector: &Selector) -> bool {
    if selector.matches(chain, node) {
        chain.push(node);
        return true;
    }
    chain.push(node);
    if node
        .child_nodes()
        .iter()
        .any(|child| find_chain(child, chain, selector))
    {
        return true;
    }
    chain.pop();
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use rselect_core::{TypeId, WidgetId, PART_ATTR, TEST_ID_ATTR};

    // Mock widget: a counter button that opens on click and closes on any
    // outside pointer event.
    struct MockWidget {
        id: WidgetId,
        clicks: usize,
        label: String,
        mounted: Option<(Arc<dyn PointerSource>, rselect_core::ListenerId)>,
    }

    impl MockWidget {
        fn new(label: &str) -> Self {
            Self {
                id: WidgetId::next(),
                clicks: 0,
                label: label.to_string(),
                mounted: None,
            }
        }
    }

    impl Widget for MockWidget {
        fn type_id(&self) -> TypeId {
            TypeId::of::<Self>()
        }

        fn render(&self, theme: &Theme) -> Node {
            Node::new("div")
                .classes(theme.classes([("mock", true)]))
                .owner(self.id)
                .attr(TEST_ID_ATTR, self.label.as_str())
                .child(
                    Node::new("span")
                        .attr(PART_ATTR, "count")
                        .text(self.clicks.to_string()),
                )
                .child(Node::new("input").attr("value", self.label.as_str()))
        }

        fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
            match event {
                Event::Click { path } if path.passes_through(self.id) => {
                    self.clicks += 1;
                    Some(Box::new(self.clicks))
                }
                Event::Input { text, .. } => Some(Box::new(text.clone())),
                _ => None,
            }
        }

        fn mount(&mut self, pointer: Arc<dyn PointerSource>) {
            let id = pointer.subscribe(Box::new(|_: &rselect_core::PointerEvent| {}));
            self.mounted = Some((pointer, id));
        }

        fn unmount(&mut self) {
            if let Some((pointer, id)) = self.mounted.take() {
                pointer.unsubscribe(id);
            }
        }
    }

    #[test]
    fn test_harness_mounts_root() {
        let harness = Harness::new(MockWidget::new("a"));
        assert_eq!(harness.hub().listener_count(), 1);
        assert_eq!(harness.page().tag(), BODY_TAG);
    }

    #[test]
    fn test_harness_exists() {
        let harness = Harness::new(MockWidget::new("root"));
        assert!(harness.exists("#root"));
        assert!(!harness.exists("#nonexistent"));
    }

    #[test]
    #[should_panic(expected = "Expected node matching")]
    fn test_harness_assert_exists_fails() {
        let harness = Harness::new(MockWidget::new("a"));
        harness.assert_exists("#missing");
    }

    #[test]
    fn test_harness_click_delivers_and_records() {
        let mut harness = Harness::new(MockWidget::new("a"));
        harness.click("#a [data-part='count']");
        harness.click("#a [data-part='count']");
        assert_eq!(harness.widget().clicks, 2);
        assert_eq!(harness.last_message::<usize>(), Some(&2));
        assert_eq!(harness.messages_of::<usize>().len(), 2);
        harness.assert_text("#a span", "2");
    }

    #[test]
    fn test_harness_click_outside_reaches_nobody() {
        let mut harness = Harness::new(MockWidget::new("a"));
        harness.click_outside();
        assert_eq!(harness.widget().clicks, 0);
        assert!(harness.messages().is_empty());
    }

    #[test]
    fn test_harness_siblings_share_hub() {
        let mut harness = Harness::new(MockWidget::new("a")).with_sibling(MockWidget::new("b"));
        assert_eq!(harness.hub().listener_count(), 2);
        harness.assert_count("div", 2);
        harness.click("#b span");
        assert_eq!(harness.widget().clicks, 0);
        harness.unmount();
        assert_eq!(harness.hub().listener_count(), 0);
    }

    #[test]
    fn test_harness_type_text_appends() {
        let mut harness = Harness::new(MockWidget::new("ab"));
        harness.type_text("#ab input", "cd");
        let typed: Vec<&String> = harness.messages_of::<String>();
        assert_eq!(typed, ["abc", "abcd"]);
    }

    #[test]
    fn test_harness_path_is_target_first() {
        let harness = Harness::new(MockWidget::new("a"));
        let path = harness.path("#a span").unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path.target().map(|n| n.tag.as_str()), Some("span"));
    }

    #[test]
    fn test_harness_with_theme() {
        let harness =
            Harness::new(MockWidget::new("a")).with_theme(Theme::new("t").with_class("mock", "m"));
        harness.assert_exists(".m");
    }
}
