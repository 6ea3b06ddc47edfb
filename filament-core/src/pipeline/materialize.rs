//! Fragment materialization
//!
//! Uses html5ever's RcDom and converts the result into our DOM.
//! Markup is parsed as the content of an inert `<template>`, so context
//! sensitive elements such as `<tr>` or `<style>` survive and nothing is
//! ever executed.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

use super::Materializer;
use crate::dom::{DocumentFragment, NodeRef};

/// Default [`Materializer`] built on html5ever.
#[derive(Debug, Clone, Copy, Default)]
pub struct Html5everMaterializer;

impl Materializer for Html5everMaterializer {
    fn to_fragment(&self, html: &str) -> DocumentFragment {
        let fragment = DocumentFragment::new();
        if html.is_empty() {
            return fragment;
        }

        let wrapped = format!("<template>{html}</template>");
        let dom = parse_document(RcDom::default(), Default::default()).one(wrapped);

        let Some(template) = find_template(&dom.document) else {
            return fragment;
        };
        if let RcNodeData::Element { template_contents, .. } = &template.data {
            if let Some(contents) = template_contents.borrow().as_ref() {
                convert_children(contents, fragment.as_node());
            }
        }

        tracing::trace!(nodes = fragment.child_nodes().len(), "materialized fragment");
        fragment
    }
}

/// First `<template>` element in document order.
fn find_template(handle: &Handle) -> Option<Handle> {
    for child in handle.children.borrow().iter() {
        if let RcNodeData::Element { name, .. } = &child.data {
            if &*name.local == "template" {
                return Some(child.clone());
            }
        }
        if let Some(found) = find_template(child) {
            return Some(found);
        }
    }
    None
}

fn convert_children(handle: &Handle, parent: &NodeRef) {
    for child in handle.children.borrow().iter() {
        if let Some(node) = convert_node(child) {
            parent.push_child(node);
        }
    }
}

/// Convert an RcDom node to our DOM format
fn convert_node(handle: &Handle) -> Option<NodeRef> {
    match &handle.data {
        RcNodeData::Text { contents } => Some(NodeRef::text(contents.borrow().to_string())),
        RcNodeData::Comment { contents } => Some(NodeRef::comment(contents.to_string())),
        RcNodeData::Element {
            name,
            attrs,
            template_contents,
            ..
        } => {
            let element = NodeRef::element(&name.local);
            for attr in attrs.borrow().iter() {
                let attr_name = match &attr.name.prefix {
                    Some(prefix) => format!("{}:{}", prefix, attr.name.local),
                    None => attr.name.local.to_string(),
                };
                element.set_attribute(&attr_name, &attr.value);
            }

            convert_children(handle, &element);
            // Template contents live in their own fragment; flatten them.
            if let Some(contents) = template_contents.borrow().as_ref() {
                convert_children(contents, &element);
            }
            Some(element)
        }
        RcNodeData::Document | RcNodeData::Doctype { .. } | RcNodeData::ProcessingInstruction { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn materialize(html: &str) -> DocumentFragment {
        Html5everMaterializer.to_fragment(html)
    }

    #[test]
    fn builds_top_level_nodes() {
        let frag = materialize("<p>one</p>text<b>two</b>");
        let children = frag.child_nodes();
        assert_eq!(children.len(), 3);
        assert_eq!(children[0].tag_name(), Some("p"));
        assert_eq!(children[1].data().as_deref(), Some("text"));
        assert_eq!(children[2].tag_name(), Some("b"));
    }

    #[test]
    fn keeps_attributes_and_nesting() {
        let frag = materialize(r#"<div class="a" data-x="1"><span>in</span></div>"#);
        let div = frag.first_child().unwrap();
        assert_eq!(div.get_attribute("class").as_deref(), Some("a"));
        assert_eq!(div.get_attribute("data-x").as_deref(), Some("1"));
        assert_eq!(frag.to_html(), r#"<div class="a" data-x="1"><span>in</span></div>"#);
    }

    #[test]
    fn table_rows_survive_out_of_context() {
        let frag = materialize("<tr><td>cell</td></tr>");
        assert_eq!(frag.first_child().and_then(|n| n.tag_name().map(str::to_string)).as_deref(), Some("tr"));
    }

    #[test]
    fn marker_templates_are_findable() {
        let frag = materialize(r#"<ul><template elm-id="elm-0"></template></ul>"#);
        let marker = frag.query_attr("elm-id", "elm-0").unwrap();
        assert_eq!(marker.tag_name(), Some("template"));
    }

    #[test]
    fn empty_input_gives_empty_fragment() {
        assert!(materialize("").is_empty());
    }
}
