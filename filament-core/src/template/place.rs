//! Placement of registered payloads into a materialized fragment.

use super::bind::bind_attribute;
use super::key::PlaceholderKey;
use super::registry::{Payload, Registry};
use crate::dom::NodeRef;
use crate::error::{DomError, DomResult};

/// What a placement pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlacementReport {
    /// Keys looked up in the tree.
    pub lookups: usize,
    /// Keys found and resolved.
    pub placed: usize,
    /// Keys not found, or whose DOM update failed.
    pub skipped: usize,
}

/// Resolve every entry of `registry` against the tree under `root`.
///
/// A key with no match in the tree is skipped silently. An empty registry
/// leaves the tree untouched without walking it.
pub fn place(root: &NodeRef, registry: Registry) -> PlacementReport {
    let mut report = PlacementReport::default();
    if registry.is_empty() {
        return report;
    }

    for (key, payload) in registry {
        report.lookups += 1;
        let Some(target) = locate(root, &key) else {
            tracing::trace!(key = %key, "placeholder not found");
            report.skipped += 1;
            continue;
        };
        match apply(&key, &target, payload) {
            Ok(()) => report.placed += 1,
            Err(err) => {
                tracing::debug!(key = %key, %err, "placement failed");
                report.skipped += 1;
            }
        }
    }

    tracing::debug!(
        lookups = report.lookups,
        placed = report.placed,
        skipped = report.skipped,
        "placement finished"
    );
    report
}

fn locate(root: &NodeRef, key: &PlaceholderKey) -> Option<NodeRef> {
    let name = key.attr_name();
    let value = key.attr_value();
    if key.uses_marker() {
        root.find(|n| n.tag_name() == Some("template") && n.get_attribute(name).as_deref() == Some(value.as_str()))
    } else {
        root.query_attr(name, &value)
    }
}

fn apply(key: &PlaceholderKey, target: &NodeRef, payload: Payload) -> DomResult<()> {
    match payload {
        // The marker goes even when insertion fails.
        Payload::Nodes(nodes) => {
            let inserted = target.before(&nodes);
            target.remove();
            inserted?;
        }
        Payload::Bound(node) => {
            let replaced = target.replace_with(&node);
            target.remove();
            replaced?;
        }
        Payload::Ref(slot) => {
            target.remove_attribute(key.attr_name());
            slot.set(target.clone());
        }
        Payload::Css(css) => {
            let style = NodeRef::element("style");
            style.append_child(&NodeRef::text(css.into_string()))?;
            target.insert_before(&style, target.first_child().as_ref())?;
            target.remove_attribute(key.attr_name());
        }
        Payload::SignalAttr(signal) => {
            bind_attribute(signal.as_ref(), target, key.attr_name());
        }
        Payload::Listener(listener) => {
            let event_type = key.event_type().ok_or(DomError::NotFound)?;
            target.remove_attribute(key.attr_name());
            target.add_event_listener(event_type, listener)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{DocumentFragment, ElementRef};
    use crate::pipeline::{Html5everMaterializer, Materializer};
    use crate::template::key::PlaceholderKind;
    use smallvec::smallvec;

    fn fragment(html: &str) -> DocumentFragment {
        Html5everMaterializer.to_fragment(html)
    }

    #[test]
    fn empty_registry_does_nothing() {
        let frag = fragment("<div></div>");
        let report = place(frag.as_node(), Registry::new());
        assert_eq!(report, PlacementReport::default());
    }

    #[test]
    fn nodes_replace_their_marker_in_order() {
        let frag = fragment(r#"<div><template elm-id="elm-0"></template></div>"#);
        let a = NodeRef::element("a");
        let b = NodeRef::text("b");
        let mut registry = Registry::new();
        registry.insert(PlaceholderKey::element(0), Payload::Nodes(smallvec![a.clone(), b.clone()]));

        let report = place(frag.as_node(), registry);
        assert_eq!(report.placed, 1);
        assert_eq!(frag.to_html(), "<div><a></a>b</div>");
        let children = frag.first_child().unwrap().child_nodes();
        assert!(children[0].ptr_eq(&a));
        assert!(children[1].ptr_eq(&b));
    }

    #[test]
    fn missing_marker_is_skipped() {
        let frag = fragment("<div></div>");
        let mut registry = Registry::new();
        registry.insert(PlaceholderKey::element(4), Payload::Nodes(smallvec![]));

        let report = place(frag.as_node(), registry);
        assert_eq!(report, PlacementReport { lookups: 1, placed: 0, skipped: 1 });
    }

    #[test]
    fn ref_is_assigned_and_stripped() {
        let frag = fragment(r#"<p><span ref="ref-2">x</span></p>"#);
        let slot = ElementRef::new();
        let mut registry = Registry::new();
        registry.insert(PlaceholderKey::new(PlaceholderKind::Ref, 2), Payload::Ref(slot.clone()));

        place(frag.as_node(), registry);
        let span = frag.query_tag("span").unwrap();
        assert!(slot.get().unwrap().ptr_eq(&span));
        assert!(!span.has_attribute("ref"));
    }

    #[test]
    fn css_prepends_a_style_element() {
        let frag = fragment(r#"<div css="css-0"><p>x</p></div>"#);
        let mut registry = Registry::new();
        registry.insert(
            PlaceholderKey::new(PlaceholderKind::Css, 0),
            Payload::Css(crate::raw::RawCss::new("p{color:red}")),
        );

        place(frag.as_node(), registry);
        assert_eq!(frag.to_html(), "<div><style>p{color:red}</style><p>x</p></div>");
    }

    #[test]
    fn failed_insertion_still_removes_marker() {
        let frag = fragment(r#"<div><template elm-id="elm-0"></template><template el="el-1"></template></div>"#);
        let div = frag.query_tag("div").unwrap();
        let doc = crate::dom::Document::new();
        let mut registry = Registry::new();
        registry.insert(PlaceholderKey::element(0), Payload::Nodes(smallvec![doc.root().clone()]));
        registry.insert(PlaceholderKey::content(1), Payload::Bound(div.clone()));

        let report = place(frag.as_node(), registry);
        assert_eq!(report, PlacementReport { lookups: 2, placed: 0, skipped: 2 });
        assert_eq!(frag.to_html(), "<div></div>");
    }
}
