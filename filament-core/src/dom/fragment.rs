//! Document fragments.

use std::fmt;

use super::node::NodeData;
use super::serialize;
use super::NodeRef;
use crate::error::DomResult;

/// A detached container of nodes.
///
/// Appending a fragment somewhere moves its children out of it, exactly
/// like a browser `DocumentFragment`.
#[derive(Clone, PartialEq, Eq)]
pub struct DocumentFragment(NodeRef);

impl DocumentFragment {
    pub fn new() -> Self {
        Self(NodeRef::new(NodeData::Fragment))
    }

    /// The underlying container node.
    pub fn as_node(&self) -> &NodeRef {
        &self.0
    }

    pub fn into_node(self) -> NodeRef {
        self.0
    }

    pub fn child_nodes(&self) -> Vec<NodeRef> {
        self.0.child_nodes()
    }

    pub fn first_child(&self) -> Option<NodeRef> {
        self.0.first_child()
    }

    pub fn is_empty(&self) -> bool {
        self.0.child_count() == 0
    }

    pub fn append_child(&self, child: &NodeRef) -> DomResult<()> {
        self.0.append_child(child)
    }

    pub fn query_attr(&self, name: &str, value: &str) -> Option<NodeRef> {
        self.0.query_attr(name, value)
    }

    pub fn query_tag(&self, tag: &str) -> Option<NodeRef> {
        self.0.query_tag(tag)
    }

    pub fn text_content(&self) -> String {
        self.0.text_content()
    }

    /// Serialized markup of the children.
    pub fn to_html(&self) -> String {
        serialize::inner_html(&self.0)
    }
}

impl Default for DocumentFragment {
    fn default() -> Self {
        Self::new()
    }
}

impl From<DocumentFragment> for NodeRef {
    fn from(fragment: DocumentFragment) -> Self {
        fragment.0
    }
}

impl fmt::Debug for DocumentFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DocumentFragment").field(&self.to_html()).finish()
    }
}
