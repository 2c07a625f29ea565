//! Arena-backed document tree.

use std::fmt::Write as _;

use super::parse::parse_into;
use super::{
    DomError,
    Selector,
};

/// Elements that never have children or an end tag.
pub(crate) const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose content is raw text: never parsed as markup, never escaped.
pub(crate) const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Handle to a node inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// What a node holds.
#[derive(Debug, Clone)]
enum NodeKind {
    Root,
    Element { tag: String, attributes: Vec<(String, String)> },
    Text(String),
}

/// Arena slot.
#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    /// `None` for the root and for detached nodes
    parent: Option<NodeId>,
    /// In document order
    children: Vec<NodeId>,
}

/// A page (or fragment) held in memory.
///
/// Nodes replaced by `set_inner_html` / `set_text_content` are released and their
/// slots reused by later insertions, so a `NodeId` of a removed node must not be
/// used again. Queries only see what is reachable from the root.
#[derive(Debug, Clone)]
pub struct Document {
    /// Node arena; index 0 is the root
    nodes: Vec<Node>,
    /// Released slots, reused before the arena grows
    free: Vec<NodeId>,
    /// `lang` for documents that have no `<html>` element.
    detached_lang: Option<String>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node { kind: NodeKind::Root, parent: None, children: Vec::new() }],
            free: Vec::new(),
            detached_lang: None,
        }
    }

    /// Parses a full page or a fragment.
    ///
    /// # Errors
    /// The markup is not parseable even in lenient mode
    pub fn parse(markup: &str) -> Result<Self, DomError> {
        let mut document = Self::new();
        let root = document.root();
        parse_into(&mut document, root, markup)?;
        Ok(document)
    }

    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Arena lookup.
    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Mutable arena lookup.
    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Allocates a node as the last child of `parent`, reusing a released slot when
    /// there is one.
    fn push_node(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let node = Node { kind, parent: Some(parent), children: Vec::new() };
        let id = if let Some(id) = self.free.pop() {
            if let Some(slot) = self.nodes.get_mut(id.0) {
                *slot = node;
            }
            id
        } else {
            self.nodes.push(node);
            NodeId(self.nodes.len() - 1)
        };
        if let Some(parent) = self.node_mut(parent) {
            parent.children.push(id);
        }
        id
    }

    /// Appends an element under `parent`; tag names are stored lowercase.
    pub fn append_element(
        &mut self,
        parent: NodeId,
        tag: &str,
        attributes: Vec<(String, String)>,
    ) -> NodeId {
        self.push_node(parent, NodeKind::Element { tag: tag.to_ascii_lowercase(), attributes })
    }

    /// Appends a text node under `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: impl Into<String>) -> NodeId {
        self.push_node(parent, NodeKind::Text(text.into()))
    }

    /// Lowercase tag name, `None` for text and root nodes.
    #[must_use]
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        match &self.node(id)?.kind {
            NodeKind::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.parent
    }

    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map_or(&[], |n| n.children.as_slice())
    }

    /// All nodes below `id` in document order, excluding `id`.
    fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    // ─── Attributes ───────────────────────────────────────

    /// Attribute list of an element; `None` for text and the root.
    fn attributes(&self, id: NodeId) -> Option<&[(String, String)]> {
        match &self.node(id)?.kind {
            NodeKind::Element { attributes, .. } => Some(attributes),
            _ => None,
        }
    }

    #[must_use]
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.attributes(id)?.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    /// Sets (or replaces) an attribute. No-op for non-element nodes.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        let Some(Node { kind: NodeKind::Element { attributes, .. }, .. }) = self.node_mut(id)
        else {
            return;
        };
        if let Some(slot) = attributes.iter_mut().find(|(k, _)| k == name) {
            slot.1 = value.to_string();
        } else {
            attributes.push((name.to_string(), value.to_string()));
        }
    }

    // ─── Classes ──────────────────────────────────────────

    #[must_use]
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.attribute(id, "class").is_some_and(|c| c.split_whitespace().any(|have| have == class))
    }

    /// Adds a class; returns `true` when the class list changed.
    pub fn add_class(&mut self, id: NodeId, class: &str) -> bool {
        if self.tag_name(id).is_none() || self.has_class(id, class) {
            return false;
        }
        let mut classes: Vec<&str> =
            self.attribute(id, "class").map(|c| c.split_whitespace().collect()).unwrap_or_default();
        classes.push(class);
        let joined = classes.join(" ");
        self.set_attribute(id, "class", &joined);
        true
    }

    /// Removes a class; returns `true` when the class list changed.
    pub fn remove_class(&mut self, id: NodeId, class: &str) -> bool {
        if !self.has_class(id, class) {
            return false;
        }
        let joined = self
            .attribute(id, "class")
            .map(|c| c.split_whitespace().filter(|have| *have != class).collect::<Vec<_>>().join(" "))
            .unwrap_or_default();
        self.set_attribute(id, "class", &joined);
        true
    }

    /// Toggles a class and returns whether it is present afterwards.
    pub fn toggle_class(&mut self, id: NodeId, class: &str) -> bool {
        if self.has_class(id, class) {
            self.remove_class(id, class);
            false
        } else {
            self.add_class(id, class)
        }
    }

    // ─── Queries ──────────────────────────────────────────

    /// Checks whether an element matches the selector, honouring descendant steps.
    #[must_use]
    pub fn matches(&self, id: NodeId, selector: &Selector) -> bool {
        let (Some(tag), Some(attributes)) = (self.tag_name(id), self.attributes(id)) else {
            return false;
        };
        if !selector.subject().is_some_and(|subject| subject.matches(tag, attributes)) {
            return false;
        }

        let mut ancestor = self.parent(id);
        for step in selector.ancestors().iter().rev() {
            loop {
                let Some(candidate) = ancestor else {
                    return false;
                };
                ancestor = self.parent(candidate);
                if let (Some(tag), Some(attributes)) =
                    (self.tag_name(candidate), self.attributes(candidate))
                    && step.matches(tag, attributes)
                {
                    break;
                }
            }
        }
        true
    }

    /// First attached element matching the selector, in document order.
    #[must_use]
    pub fn select(&self, selector: &Selector) -> Option<NodeId> {
        self.descendants(self.root()).into_iter().find(|id| self.matches(*id, selector))
    }

    /// Every attached element matching the selector, in document order.
    #[must_use]
    pub fn select_all(&self, selector: &Selector) -> Vec<NodeId> {
        self.descendants(self.root()).into_iter().filter(|id| self.matches(*id, selector)).collect()
    }

    /// `document.querySelector`.
    ///
    /// # Errors
    /// The selector string is invalid
    pub fn query_selector(&self, selector: &str) -> Result<Option<NodeId>, DomError> {
        Ok(self.select(&Selector::parse(selector)?))
    }

    /// `document.querySelectorAll`.
    ///
    /// # Errors
    /// The selector string is invalid
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>, DomError> {
        Ok(self.select_all(&Selector::parse(selector)?))
    }

    #[must_use]
    pub fn get_element_by_id(&self, element_id: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .find(|id| self.attribute(*id, "id") == Some(element_id))
    }

    /// Inclusive ancestor test, like `Node.contains`.
    #[must_use]
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Nearest inclusive ancestor matching the selector, like `Element.closest`.
    #[must_use]
    pub fn closest(&self, node: NodeId, selector: &Selector) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(id) = current {
            if self.matches(id, selector) {
                return Some(id);
            }
            current = self.parent(id);
        }
        None
    }

    // ─── Content ──────────────────────────────────────────

    /// Removes every descendant of `id` and releases their slots.
    fn detach_children(&mut self, id: NodeId) {
        let mut released = self.descendants(id);
        if let Some(node) = self.node_mut(id) {
            node.children.clear();
        }
        for child in &released {
            if let Some(node) = self.node_mut(*child) {
                *node = Node { kind: NodeKind::Text(String::new()), parent: None, children: Vec::new() };
            }
        }
        self.free.append(&mut released);
    }

    /// Concatenated text of all descendant text nodes.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(Node { kind: NodeKind::Text(text), .. }) = self.node(id) {
            return text.clone();
        }
        self.descendants(id)
            .into_iter()
            .filter_map(|d| match &self.node(d)?.kind {
                NodeKind::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Replaces all children with a single text node.
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        if self.tag_name(id).is_none() && id != self.root() {
            return;
        }
        self.detach_children(id);
        if !text.is_empty() {
            self.append_text(id, text);
        }
    }

    /// Serialized children of a node.
    #[must_use]
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(id) {
            self.write_node(*child, &mut out);
        }
        out
    }

    /// Serialized node including its own tag.
    #[must_use]
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    /// True when the node has anything other than whitespace inside it.
    #[must_use]
    pub fn has_content(&self, id: NodeId) -> bool {
        !self.inner_html(id).trim().is_empty()
    }

    /// Replaces the children of `id` with parsed markup.
    ///
    /// The markup is parsed before anything is detached, so a parse failure leaves
    /// the target untouched.
    ///
    /// # Errors
    /// The markup could not be parsed
    pub fn set_inner_html(&mut self, id: NodeId, markup: &str) -> Result<(), DomError> {
        let fragment = Self::parse(markup)?;
        self.detach_children(id);
        for child in fragment.children(fragment.root()) {
            self.graft(id, &fragment, *child);
        }
        Ok(())
    }

    /// Deep-copies `source_id` from another document under `parent`.
    fn graft(&mut self, parent: NodeId, source: &Self, source_id: NodeId) {
        let Some(node) = source.node(source_id) else {
            return;
        };
        let new_id = self.push_node(parent, node.kind.clone());
        for child in &node.children {
            self.graft(new_id, source, *child);
        }
    }

    // ─── Document element ─────────────────────────────────

    /// The `<html>` element, if the document has one.
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(self.root()).iter().copied().find(|id| self.tag_name(*id) == Some("html"))
    }

    /// The document's `lang` attribute.
    #[must_use]
    pub fn lang(&self) -> Option<&str> {
        match self.document_element() {
            Some(html) => self.attribute(html, "lang"),
            None => self.detached_lang.as_deref(),
        }
    }

    /// Sets `lang` on `<html>`, or remembers it for fragment documents.
    pub fn set_lang(&mut self, code: &str) {
        match self.document_element() {
            Some(html) => self.set_attribute(html, "lang", code),
            None => self.detached_lang = Some(code.to_string()),
        }
    }

    /// Serializes the whole document.
    #[must_use]
    pub fn to_html(&self) -> String {
        let body = self.inner_html(self.root());
        if self.document_element().is_some() { format!("<!DOCTYPE html>\n{body}") } else { body }
    }

    /// Serializes `id` and its subtree into `out`.
    fn write_node(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.node(id) else {
            return;
        };
        match &node.kind {
            NodeKind::Root => {
                for child in &node.children {
                    self.write_node(*child, out);
                }
            }
            NodeKind::Text(text) => out.push_str(&escape_text(text)),
            NodeKind::Element { tag, attributes } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attributes {
                    let _ = write!(out, " {name}=\"{}\"", escape_attribute(value));
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&tag.as_str()) {
                    return;
                }
                if RAW_TEXT_ELEMENTS.contains(&tag.as_str()) {
                    let _ = write!(out, "{}</{tag}>", self.text_content(id));
                    return;
                }
                for child in &node.children {
                    self.write_node(*child, out);
                }
                let _ = write!(out, "</{tag}>");
            }
        }
    }
}

/// Escapes text for element content, like assigning `textContent` and reading `innerHTML`.
#[must_use]
pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Escapes a double-quoted attribute value.
fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}
