//! DOM Nodes
//!
//! A node is shared through [`NodeRef`], a cheap handle compared by
//! identity. Parents are held weakly and children strongly, so a detached
//! subtree is freed as soon as the last handle to its root goes away.
//!
//! # Thread Safety
//!
//! Every mutable part of a node sits behind a `parking_lot` lock. No
//! operation holds two node locks at the same time, which keeps tree
//! mutation free of lock-order problems even when a signal callback edits
//! the tree from inside a notification.

use std::fmt;
use std::sync::{Arc, Weak};

use indexmap::IndexMap;
use parking_lot::RwLock;

use super::event::{Event, EventListener};
use crate::error::{DomError, DomResult};

/// The kind of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Root of a live document.
    Document,
    /// Detached container whose children move on insertion.
    Fragment,
    /// An element with a tag name and attributes.
    Element,
    /// Character data.
    Text,
    /// A comment.
    Comment,
}

impl NodeType {
    fn name(self) -> &'static str {
        match self {
            NodeType::Document => "document",
            NodeType::Fragment => "fragment",
            NodeType::Element => "element",
            NodeType::Text => "text",
            NodeType::Comment => "comment",
        }
    }
}

/// Node-specific data.
pub(crate) enum NodeData {
    Document,
    Fragment,
    Element(ElementData),
    Text(RwLock<String>),
    Comment(String),
}

/// Element-specific data.
pub(crate) struct ElementData {
    /// Lowercase tag name.
    name: String,
    /// Attributes in source order.
    attrs: RwLock<IndexMap<String, String>>,
    /// Registered listeners as (event type, listener).
    listeners: RwLock<Vec<(String, EventListener)>>,
}

/// A DOM node.
pub struct Node {
    data: NodeData,
    parent: RwLock<Weak<Node>>,
    children: RwLock<Vec<NodeRef>>,
}

/// Shared handle to a [`Node`].
///
/// Cloning the handle never clones the node. Equality is identity.
#[derive(Clone)]
pub struct NodeRef(Arc<Node>);

impl NodeRef {
    pub(crate) fn new(data: NodeData) -> Self {
        Self(Arc::new(Node {
            data,
            parent: RwLock::new(Weak::new()),
            children: RwLock::new(Vec::new()),
        }))
    }

    /// Create a detached element. The tag name is lowercased.
    pub fn element(name: &str) -> Self {
        Self::new(NodeData::Element(ElementData {
            name: name.to_ascii_lowercase(),
            attrs: RwLock::new(IndexMap::new()),
            listeners: RwLock::new(Vec::new()),
        }))
    }

    /// Create a detached text node.
    pub fn text(data: impl Into<String>) -> Self {
        Self::new(NodeData::Text(RwLock::new(data.into())))
    }

    /// Create a detached comment node.
    pub fn comment(data: impl Into<String>) -> Self {
        Self::new(NodeData::Comment(data.into()))
    }

    /// What kind of node this is.
    pub fn node_type(&self) -> NodeType {
        match &self.0.data {
            NodeData::Document => NodeType::Document,
            NodeData::Fragment => NodeType::Fragment,
            NodeData::Element(_) => NodeType::Element,
            NodeData::Text(_) => NodeType::Text,
            NodeData::Comment(_) => NodeType::Comment,
        }
    }

    /// Identity comparison.
    #[inline]
    pub fn ptr_eq(&self, other: &NodeRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.0.data, NodeData::Element(_))
    }

    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.0.data, NodeData::Text(_))
    }

    fn as_element(&self) -> Option<&ElementData> {
        match &self.0.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    // ------------------------------------------------------------------
    // Element data
    // ------------------------------------------------------------------

    /// Lowercase tag name, if this is an element.
    pub fn tag_name(&self) -> Option<&str> {
        self.as_element().map(|e| e.name.as_str())
    }

    pub fn get_attribute(&self, name: &str) -> Option<String> {
        self.as_element()?.attrs.read().get(name).cloned()
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.as_element()
            .is_some_and(|e| e.attrs.read().contains_key(name))
    }

    /// Set an attribute, keeping its position if it already exists.
    ///
    /// Does nothing on non-element nodes.
    pub fn set_attribute(&self, name: &str, value: &str) {
        if let Some(element) = self.as_element() {
            element
                .attrs
                .write()
                .insert(name.to_ascii_lowercase(), value.to_string());
        }
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove_attribute(&self, name: &str) -> Option<String> {
        self.as_element()?.attrs.write().shift_remove(name)
    }

    /// All attributes in source order.
    pub fn attributes(&self) -> Vec<(String, String)> {
        self.as_element()
            .map(|e| {
                e.attrs
                    .read()
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Register a listener for `event_type`.
    pub fn add_event_listener(&self, event_type: &str, listener: EventListener) -> DomResult<()> {
        let element = self
            .as_element()
            .ok_or(DomError::InvalidNodeType(self.node_type().name()))?;
        element
            .listeners
            .write()
            .push((event_type.to_string(), listener));
        Ok(())
    }

    /// Number of listeners registered for `event_type`.
    pub fn listener_count(&self, event_type: &str) -> usize {
        self.as_element()
            .map(|e| {
                e.listeners
                    .read()
                    .iter()
                    .filter(|(t, _)| t == event_type)
                    .count()
            })
            .unwrap_or(0)
    }

    /// Invoke every listener registered for the event's type.
    ///
    /// Returns the number of listeners called. Listeners run outside the
    /// listener lock, so they may register further listeners. An event
    /// without a target is delivered with this element as its target.
    pub fn dispatch_event(&self, event: &Event) -> usize {
        let Some(element) = self.as_element() else {
            return 0;
        };
        let targeted;
        let event = match event.target() {
            Some(_) => event,
            None => {
                targeted = event.clone().with_target(self.clone());
                &targeted
            }
        };
        let matching: Vec<EventListener> = element
            .listeners
            .read()
            .iter()
            .filter(|(t, _)| t == event.event_type())
            .map(|(_, l)| l.clone())
            .collect();
        for listener in &matching {
            listener.call(event);
        }
        matching.len()
    }

    // ------------------------------------------------------------------
    // Character data
    // ------------------------------------------------------------------

    /// Text of a text or comment node.
    pub fn data(&self) -> Option<String> {
        match &self.0.data {
            NodeData::Text(text) => Some(text.read().clone()),
            NodeData::Comment(text) => Some(text.clone()),
            _ => None,
        }
    }

    /// Replace the data of a text node in place.
    ///
    /// Returns `false` if this is not a text node.
    pub fn set_data(&self, data: &str) -> bool {
        match &self.0.data {
            NodeData::Text(text) => {
                let mut guard = text.write();
                guard.clear();
                guard.push_str(data);
                true
            }
            _ => false,
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match &self.0.data {
            NodeData::Text(text) => out.push_str(&text.read()),
            NodeData::Comment(_) => {}
            _ => {
                for child in self.child_nodes() {
                    child.collect_text(out);
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    pub fn parent(&self) -> Option<NodeRef> {
        self.0.parent.read().upgrade().map(NodeRef)
    }

    /// Parent, if it is an element.
    pub fn parent_element(&self) -> Option<NodeRef> {
        self.parent().filter(NodeRef::is_element)
    }

    /// Snapshot of the children.
    pub fn child_nodes(&self) -> Vec<NodeRef> {
        self.0.children.read().clone()
    }

    pub fn child_count(&self) -> usize {
        self.0.children.read().len()
    }

    pub fn first_child(&self) -> Option<NodeRef> {
        self.0.children.read().first().cloned()
    }

    pub fn next_sibling(&self) -> Option<NodeRef> {
        let parent = self.parent()?;
        let children = parent.0.children.read();
        let pos = children.iter().position(|c| c.ptr_eq(self))?;
        children.get(pos + 1).cloned()
    }

    /// The topmost ancestor (or the node itself).
    pub fn root(&self) -> NodeRef {
        let mut current = self.clone();
        while let Some(parent) = current.parent() {
            current = parent;
        }
        current
    }

    /// Whether the node is attached to a [`Document`](super::Document).
    pub fn is_connected(&self) -> bool {
        self.root().node_type() == NodeType::Document
    }

    /// Whether `other` is this node or one of its descendants.
    pub fn contains(&self, other: &NodeRef) -> bool {
        let mut current = Some(other.clone());
        while let Some(node) = current {
            if node.ptr_eq(self) {
                return true;
            }
            current = node.parent();
        }
        false
    }

    /// Depth-first search over descendants (not the node itself).
    pub fn find<P>(&self, predicate: P) -> Option<NodeRef>
    where
        P: Fn(&NodeRef) -> bool,
    {
        self.find_inner(&predicate)
    }

    fn find_inner(&self, predicate: &dyn Fn(&NodeRef) -> bool) -> Option<NodeRef> {
        for child in self.child_nodes() {
            if predicate(&child) {
                return Some(child);
            }
            if let Some(found) = child.find_inner(predicate) {
                return Some(found);
            }
        }
        None
    }

    /// Every descendant matching `predicate`, in document order.
    pub fn find_all<P>(&self, predicate: P) -> Vec<NodeRef>
    where
        P: Fn(&NodeRef) -> bool,
    {
        let mut out = Vec::new();
        self.find_all_inner(&predicate, &mut out);
        out
    }

    fn find_all_inner(&self, predicate: &dyn Fn(&NodeRef) -> bool, out: &mut Vec<NodeRef>) {
        for child in self.child_nodes() {
            if predicate(&child) {
                out.push(child.clone());
            }
            child.find_all_inner(predicate, out);
        }
    }

    /// First descendant element carrying `name="value"`.
    pub fn query_attr(&self, name: &str, value: &str) -> Option<NodeRef> {
        self.find(|n| n.get_attribute(name).as_deref() == Some(value))
    }

    /// First descendant element with the given tag name.
    pub fn query_tag(&self, tag: &str) -> Option<NodeRef> {
        self.find(|n| n.tag_name() == Some(tag))
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Append without validation. Used while building trees from a parser.
    pub(crate) fn push_child(&self, child: NodeRef) {
        *child.0.parent.write() = Arc::downgrade(&self.0);
        self.0.children.write().push(child);
    }

    pub fn append_child(&self, child: &NodeRef) -> DomResult<()> {
        self.insert_before(child, None)
    }

    /// Insert `child` before `reference`, or at the end when `reference`
    /// is `None`. A fragment contributes its children, leaving it empty.
    pub fn insert_before(&self, child: &NodeRef, reference: Option<&NodeRef>) -> DomResult<()> {
        self.ensure_pre_insert(child, reference)?;

        // Inserting a node before itself means "before its next sibling".
        let reference = match reference {
            Some(r) if r.ptr_eq(child) => child.next_sibling(),
            other => other.cloned(),
        };

        let nodes = if child.node_type() == NodeType::Fragment {
            child.take_children()
        } else {
            child.detach();
            vec![child.clone()]
        };

        for node in &nodes {
            *node.0.parent.write() = Arc::downgrade(&self.0);
        }

        let mut children = self.0.children.write();
        let pos = reference
            .and_then(|r| children.iter().position(|c| c.ptr_eq(&r)))
            .unwrap_or(children.len());
        children.splice(pos..pos, nodes);
        Ok(())
    }

    fn ensure_pre_insert(&self, child: &NodeRef, reference: Option<&NodeRef>) -> DomResult<()> {
        match self.node_type() {
            NodeType::Document | NodeType::Fragment | NodeType::Element => {}
            other => return Err(DomError::InvalidNodeType(other.name())),
        }
        if child.node_type() == NodeType::Document {
            return Err(DomError::HierarchyRequest("a document cannot be inserted"));
        }
        if child.contains(self) {
            return Err(DomError::HierarchyRequest("node would become its own ancestor"));
        }
        if let Some(reference) = reference {
            let is_child = reference.parent().is_some_and(|p| p.ptr_eq(self));
            if !is_child {
                return Err(DomError::NotFound);
            }
        }
        Ok(())
    }

    fn take_children(&self) -> Vec<NodeRef> {
        let children = std::mem::take(&mut *self.0.children.write());
        for child in &children {
            *child.0.parent.write() = Weak::new();
        }
        children
    }

    fn detach(&self) {
        if let Some(parent) = self.parent() {
            parent.0.children.write().retain(|c| !c.ptr_eq(self));
        }
        *self.0.parent.write() = Weak::new();
    }

    /// Detach this node from its parent. No-op when already detached.
    pub fn remove(&self) {
        self.detach();
    }

    /// Insert `nodes`, in order, immediately before this node.
    ///
    /// No-op when this node has no parent.
    pub fn before(&self, nodes: &[NodeRef]) -> DomResult<()> {
        let Some(parent) = self.parent() else {
            return Ok(());
        };
        for node in nodes {
            if node.ptr_eq(self) {
                continue;
            }
            parent.insert_before(node, Some(self))?;
        }
        Ok(())
    }

    /// Put `node` where this node is and detach this node.
    ///
    /// No-op when this node has no parent.
    pub fn replace_with(&self, node: &NodeRef) -> DomResult<()> {
        if node.ptr_eq(self) {
            return Ok(());
        }
        let Some(parent) = self.parent() else {
            return Ok(());
        };
        parent.insert_before(node, Some(self))?;
        self.detach();
        Ok(())
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for NodeRef {}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.data {
            NodeData::Element(e) => f
                .debug_struct("Element")
                .field("name", &e.name)
                .field("attrs", &*e.attrs.read())
                .field("children", &self.child_count())
                .finish(),
            NodeData::Text(text) => f.debug_tuple("Text").field(&*text.read()).finish(),
            NodeData::Comment(text) => f.debug_tuple("Comment").field(text).finish(),
            NodeData::Document => f
                .debug_struct("Document")
                .field("children", &self.child_count())
                .finish(),
            NodeData::Fragment => f
                .debug_struct("Fragment")
                .field("children", &self.child_count())
                .finish(),
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
