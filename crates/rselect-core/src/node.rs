//! Declarative element tree produced by widgets.
//!
//! A [`Node`] is the render output of a widget: a tag, the theme classes it
//! carries, optional text, a set of attributes and its children. Nodes are
//! plain data; nothing in the tree is interactive by itself. Interaction is
//! expressed through [`Event`](crate::Event)s that carry an [`EventPath`],
//! the shallow snapshot of every node from the event target up to the root.
//!
//! # Examples
//!
//! ```
//! use rselect_core::Node;
//!
//! let tree = Node::new("div")
//!     .class("container")
//!     .child(Node::new("span").class("label").text("Algeria"));
//!
//! assert_eq!(tree.text_content(), "Algeria");
//! assert_eq!(tree.find(&|n| n.has_class("label")).map(|n| n.tag()), Some("span"));
//! ```

use crate::widget::WidgetId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attribute marking a node whose pointer events never count as outside
/// interactions, even when the node is no longer part of the rendered tree.
pub const KEEP_OPEN_ATTR: &str = "data-keep-open";

/// Attribute naming the interactive part a node represents.
pub const PART_ATTR: &str = "data-part";

/// Attribute carrying the option or item id a node stands for.
pub const VALUE_ATTR: &str = "data-value";

/// Attribute carrying a test identifier.
pub const TEST_ID_ATTR: &str = "data-testid";

/// One element of a rendered widget tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    tag: String,
    classes: Vec<String>,
    text: Option<String>,
    attrs: BTreeMap<String, String>,
    owner: Option<WidgetId>,
    children: Vec<Node>,
}

impl Node {
    /// Create an empty element with the given tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Add one class. Empty class names are ignored.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !class.is_empty() && !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    /// Add several classes.
    #[must_use]
    pub fn classes(self, classes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        classes.into_iter().fold(self, |node, c| node.class(c))
    }

    /// Set the text content.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set an attribute.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Set an attribute only when `condition` holds.
    #[must_use]
    pub fn attr_if(self, condition: bool, name: impl Into<String>, value: impl Into<String>) -> Self {
        if condition {
            self.attr(name, value)
        } else {
            self
        }
    }

    /// Mark this node as the root of a widget instance.
    #[must_use]
    pub const fn owner(mut self, owner: WidgetId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Append a child.
    #[must_use]
    pub fn child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Append a child if present.
    #[must_use]
    pub fn maybe_child(self, child: Option<Self>) -> Self {
        match child {
            Some(child) => self.child(child),
            None => self,
        }
    }

    /// Append several children.
    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children);
        self
    }

    /// Element tag.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Classes in insertion order.
    #[must_use]
    pub fn class_list(&self) -> &[String] {
        &self.classes
    }

    /// Whether the node carries `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Own text, not including children.
    #[must_use]
    pub fn own_text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Attribute value.
    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// All attributes.
    #[must_use]
    pub const fn attrs(&self) -> &BTreeMap<String, String> {
        &self.attrs
    }

    /// Widget instance this node is the root of, if any.
    #[must_use]
    pub const fn get_owner(&self) -> Option<WidgetId> {
        self.owner
    }

    /// Child nodes.
    #[must_use]
    pub fn child_nodes(&self) -> &[Self] {
        &self.children
    }

    /// Concatenated text of this node and all descendants, depth first.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// First node (pre-order) matching the predicate.
    #[must_use]
    pub fn find(&self, pred: &dyn Fn(&Self) -> bool) -> Option<&Self> {
        if pred(self) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(pred))
    }

    /// All nodes (pre-order) matching the predicate.
    #[must_use]
    pub fn find_all(&self, pred: &dyn Fn(&Self) -> bool) -> Vec<&Self> {
        let mut out = Vec::new();
        self.collect_matches(pred, &mut out);
        out
    }

    fn collect_matches<'a>(&'a self, pred: &dyn Fn(&Self) -> bool, out: &mut Vec<&'a Self>) {
        if pred(self) {
            out.push(self);
        }
        for child in &self.children {
            child.collect_matches(pred, out);
        }
    }

    /// Event path from the first node matching `pred` up to `self`.
    ///
    /// The first entry is the target, the last one is `self`.
    #[must_use]
    pub fn path_to(&self, pred: &dyn Fn(&Self) -> bool) -> Option<EventPath> {
        let mut chain = Vec::new();
        if self.descend(pred, &mut chain) {
            chain.reverse();
            Some(EventPath::new(chain))
        } else {
            None
        }
    }

    fn descend(&self, pred: &dyn Fn(&Self) -> bool, chain: &mut Vec<NodeRef>) -> bool {
        chain.push(NodeRef::from(self));
        if pred(self) {
            return true;
        }
        if self.children.iter().any(|c| c.descend(pred, chain)) {
            return true;
        }
        chain.pop();
        false
    }

    /// Total number of nodes in the tree.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }
}

/// Shallow snapshot of a node, without its children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRef {
    /// Element tag
    pub tag: String,
    /// Attributes at the time of the event
    pub attrs: BTreeMap<String, String>,
    /// Widget instance the node is the root of
    pub owner: Option<WidgetId>,
}

impl NodeRef {
    /// Snapshot of a detached node with only a tag, e.g. a document body.
    #[must_use]
    pub fn detached(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Attribute value.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Whether the attribute is present.
    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }
}

impl From<&Node> for NodeRef {
    fn from(node: &Node) -> Self {
        Self {
            tag: node.tag.clone(),
            attrs: node.attrs.clone(),
            owner: node.owner,
        }
    }
}

/// Chain of nodes an event travels through, target first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPath(Vec<NodeRef>);

impl EventPath {
    /// Build a path from a target-first chain.
    #[must_use]
    pub const fn new(chain: Vec<NodeRef>) -> Self {
        Self(chain)
    }

    /// The node the event was aimed at.
    #[must_use]
    pub fn target(&self) -> Option<&NodeRef> {
        self.0.first()
    }

    /// Iterate from the target up to the outermost ancestor.
    pub fn ancestors(&self) -> impl Iterator<Item = &NodeRef> {
        self.0.iter()
    }

    /// Whether the path passes through the root of `owner`.
    #[must_use]
    pub fn passes_through(&self, owner: WidgetId) -> bool {
        self.0.iter().any(|n| n.owner == Some(owner))
    }

    /// Closest node (from the target up) carrying `name`, with its value.
    #[must_use]
    pub fn closest_attr(&self, name: &str) -> Option<(&NodeRef, &str)> {
        self.0.iter().find_map(|n| n.attr(name).map(|v| (n, v)))
    }

    /// Extend the path with an outer ancestor.
    #[must_use]
    pub fn within(mut self, ancestor: NodeRef) -> Self {
        self.0.push(ancestor);
        self
    }

    /// Number of nodes on the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the path is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Node::new("div")
            .class("container")
            .owner(WidgetId::new(7))
            .child(
                Node::new("div")
                    .class("options")
                    .child(Node::new("div").class("option").attr(VALUE_ATTR, "1").text("Algeria"))
                    .child(Node::new("div").class("option").attr(VALUE_ATTR, "2").text("Barbados")),
            )
    }

    #[test]
    fn test_class_dedup_and_empty() {
        let node = Node::new("div").class("a").class("").class("a").class("b");
        assert_eq!(node.class_list(), ["a", "b"]);
    }

    #[test]
    fn test_text_content_depth_first() {
        assert_eq!(sample().text_content(), "AlgeriaBarbados");
    }

    #[test]
    fn test_find_all() {
        let tree = sample();
        let options = tree.find_all(&|n| n.has_class("option"));
        assert_eq!(options.len(), 2);
        assert_eq!(options[1].own_text(), Some("Barbados"));
    }

    #[test]
    fn test_path_to_is_target_first() {
        let tree = sample();
        let path = tree
            .path_to(&|n| n.get_attr(VALUE_ATTR) == Some("2"))
            .expect("option exists");
        assert_eq!(path.len(), 3);
        assert_eq!(path.target().and_then(|n| n.attr(VALUE_ATTR)), Some("2"));
        assert!(path.passes_through(WidgetId::new(7)));
        assert!(!path.passes_through(WidgetId::new(8)));
    }

    #[test]
    fn test_path_to_missing() {
        assert!(sample().path_to(&|n| n.tag() == "input").is_none());
    }

    #[test]
    fn test_closest_attr() {
        let path = EventPath::new(vec![
            NodeRef::detached("i"),
            NodeRef::from(&Node::new("div").attr(KEEP_OPEN_ATTR, "true")),
        ]);
        let (node, value) = path.closest_attr(KEEP_OPEN_ATTR).expect("marked");
        assert_eq!(node.tag, "div");
        assert_eq!(value, "true");
    }

    #[test]
    fn test_within_appends_outer() {
        let path = EventPath::default().within(NodeRef::detached("body"));
        assert_eq!(path.target().map(|n| n.tag.as_str()), Some("body"));
    }

    #[test]
    fn test_node_count() {
        assert_eq!(sample().node_count(), 4);
    }
}
