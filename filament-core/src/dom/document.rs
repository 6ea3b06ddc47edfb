//! Document - the connected root.
//!
//! A node is "connected" when the root of its tree is a document. Signal
//! bindings use this to decide whether a bound node is still live.

use super::node::NodeData;
use super::NodeRef;

/// HTML document with the usual `html`/`head`/`body` skeleton.
#[derive(Debug, Clone)]
pub struct Document {
    root: NodeRef,
    head: NodeRef,
    body: NodeRef,
}

impl Document {
    pub fn new() -> Self {
        let root = NodeRef::new(NodeData::Document);
        let html = NodeRef::element("html");
        let head = NodeRef::element("head");
        let body = NodeRef::element("body");

        root.push_child(html.clone());
        html.push_child(head.clone());
        html.push_child(body.clone());

        Self { root, head, body }
    }

    /// The document node itself.
    pub fn root(&self) -> &NodeRef {
        &self.root
    }

    pub fn head(&self) -> &NodeRef {
        &self.head
    }

    pub fn body(&self) -> &NodeRef {
        &self.body
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
