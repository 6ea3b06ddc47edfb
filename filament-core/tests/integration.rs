//! Integration Tests for Template Rendering
//!
//! These tests render templates through the public API and check the
//! resulting DOM, placements and signal bindings together.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use filament_core::dom::serialize::outer_html;
use filament_core::dom::{Document, DocumentFragment, ElementRef, Event, EventListener, NodeRef};
use filament_core::pipeline::{Html5everMaterializer, Materializer};
use filament_core::reactive::Signal;
use filament_core::template::{place, Payload, PlaceholderKey, PlacementReport, Registry};
use filament_core::{css, html, raw, Renderer, Value};

fn attach(fragment: &DocumentFragment) -> Document {
    let doc = Document::new();
    doc.body().append_child(fragment.as_node()).unwrap();
    doc
}

/// A list of a live element and raw markup lands under one marker, in order.
#[test]
fn list_places_node_and_raw_markup() {
    let div = NodeRef::element("div");
    let fragment = html(
        &["", ""],
        vec![Value::List(vec![
            Value::from(div.clone()),
            Value::from(raw(&["<p>Injected</p>"], &[] as &[&str])),
        ])],
    );

    let children = fragment.child_nodes();
    assert_eq!(children.len(), 2);
    assert!(children[0].ptr_eq(&div));
    assert_eq!(children[1].tag_name(), Some("p"));
    assert_eq!(children[1].text_content(), "Injected");
    assert!(fragment.query_tag("template").is_none());
}

/// Two markers under one parent each receive only their own nodes.
#[test]
fn node_lists_fill_independent_markers() {
    let materializer = Html5everMaterializer;
    let header = materializer.to_fragment(
        r#"<header><span>any text</span><template elm-id="elm-0"></template><div><template elm-id="elm-5"></template></div></header>"#,
    );
    let paragraph = materializer.to_fragment("<p>any paragraph</p>");
    let input = materializer.to_fragment("<input />");

    let mut registry = Registry::new();
    registry.insert(PlaceholderKey::element(0), Payload::Nodes(paragraph.child_nodes().into_iter().collect()));
    registry.insert(PlaceholderKey::element(5), Payload::Nodes(input.child_nodes().into_iter().collect()));

    let report = place(header.as_node(), registry);
    assert_eq!(report, PlacementReport { lookups: 2, placed: 2, skipped: 0 });

    let header_el = header.query_tag("header").unwrap();
    let p = header.query_tag("p").unwrap();
    let input_el = header.query_tag("input").unwrap();
    assert!(p.parent().unwrap().ptr_eq(&header_el));
    assert!(input_el.parent().unwrap().ptr_eq(&header.query_tag("div").unwrap()));
    assert!(header.query_tag("template").is_none());
    assert_eq!(
        header.to_html(),
        "<header><span>any text</span><p>any paragraph</p><div><input></div></header>"
    );
}

/// Placing an empty registry touches nothing.
#[test]
fn empty_registry_is_a_no_op() {
    let fragment = Html5everMaterializer.to_fragment("<div><span>x</span></div>");
    let before = fragment.to_html();

    let report = place(fragment.as_node(), Registry::new());

    assert_eq!(report, PlacementReport::default());
    assert_eq!(fragment.to_html(), before);
}

/// A ref is bound to its element and the attribute is stripped.
#[test]
fn ref_binds_element_and_strips_attribute() {
    let field = ElementRef::new();
    let fragment = html!("<form><input name=\"q\" ref=", &field, " /></form>");

    let input = fragment.query_tag("input").unwrap();
    assert!(field.get().unwrap().ptr_eq(&input));
    assert!(!input.has_attribute("ref"));
    assert_eq!(input.get_attribute("name").as_deref(), Some("q"));
}

/// Refs and stylesheets outside their attribute are dropped.
#[test]
fn misplaced_values_are_dropped() {
    let field = ElementRef::new();
    let fragment = html!("<p>", &field, "|", css!("p{}"), "</p>");

    assert_eq!(fragment.to_html(), "<p>|</p>");
    assert!(!field.is_bound());
}

/// A stylesheet is attached to its host as a leading style element.
#[test]
fn css_attaches_style_element() {
    let sheet = css!(".card { padding: ", 4, "px; }");
    let fragment = html!("<section class=\"card\" css=", sheet, "><h2>Title</h2></section>");

    assert_eq!(
        fragment.to_html(),
        "<section class=\"card\"><style>.card { padding: 4px; }</style><h2>Title</h2></section>"
    );
}

/// A signal after `color=` binds the attribute, not element content.
#[test]
fn signal_attribute_tracks_changes() {
    let color = Signal::new(String::from("red"));
    let fragment = html!("<div color=", &color, "></div>");

    let div = fragment.query_tag("div").unwrap();
    assert_eq!(div.get_attribute("color").as_deref(), Some("red"));
    assert!(fragment.query_tag("template").is_none());

    let _doc = attach(&fragment);
    color.set("blue".into());
    assert_eq!(div.get_attribute("color").as_deref(), Some("blue"));
    assert_eq!(color.subscriber_count(), 1);
}

/// A signal in content position is placed as a live text node.
#[test]
fn signal_content_tracks_changes() {
    let count = Signal::new(0_u32);
    let fragment = html!("<span>Clicks: ", &count, "</span>");
    let doc = attach(&fragment);

    count.set(1);
    count.update(|c| c + 1);

    let span = doc.body().query_tag("span").unwrap();
    assert_eq!(span.text_content(), "Clicks: 2");
    assert_eq!(span.child_count(), 2);
}

/// An element-valued signal swaps the element in place.
#[test]
fn signal_element_is_replaced() {
    let first = NodeRef::element("em");
    let icon = Signal::new(first.clone());
    let fragment = html!("<p>", &icon, "</p>");
    let doc = attach(&fragment);
    assert!(doc.body().query_tag("em").unwrap().ptr_eq(&first));

    let second = NodeRef::element("strong");
    icon.set(second.clone());

    let p = doc.body().query_tag("p").unwrap();
    assert_eq!(p.child_count(), 1);
    assert!(p.first_child().unwrap().ptr_eq(&second));
}

/// After removal from the document, the next change unsubscribes the
/// binding without touching the node.
#[test]
fn disconnected_binding_removes_itself() {
    let label = Signal::new(String::from("on"));
    let fragment = html!("<b>", &label, "</b>");
    let doc = attach(&fragment);
    let b = doc.body().query_tag("b").unwrap();
    let text = b.first_child().unwrap();

    b.remove();
    label.set("off".into());
    assert_eq!(text.data().as_deref(), Some("on"));
    assert_eq!(label.subscriber_count(), 0);

    label.set("again".into());
    assert_eq!(text.data().as_deref(), Some("on"));
}

/// One signal rendered into two fragments keeps one binding per fragment.
#[test]
fn shared_signal_binds_each_fragment() {
    let name = Signal::new(String::from("a"));
    let first = html!("<i>", &name, "</i>");
    let second = html!("<u>", &name, "</u>");
    let doc = attach(&first);
    doc.body().append_child(second.as_node()).unwrap();
    assert_eq!(name.subscriber_count(), 2);

    name.set("b".into());
    assert_eq!(doc.body().text_content(), "bb");
}

/// Inline listeners survive sanitization and are attached.
#[test]
fn event_listener_is_attached() {
    let clicks = Arc::new(AtomicUsize::new(0));
    let clicks_clone = clicks.clone();
    let on_click = EventListener::new(move |_| {
        clicks_clone.fetch_add(1, Ordering::SeqCst);
    });

    let fragment = html!("<button onclick=", on_click, ">Go</button>");
    let button = fragment.query_tag("button").unwrap();
    assert!(!button.has_attribute("onclick"));

    button.dispatch_event(&Event::new("click"));
    button.dispatch_event(&Event::new("click"));
    assert_eq!(clicks.load(Ordering::SeqCst), 2);
}

/// Handwritten inline handlers and script URLs never reach the DOM.
#[test]
fn sanitizer_strips_inline_script() {
    let fragment = html!(
        "<a href=\"javascript:alert(1)\" onclick=\"alert(1)\">x</a><script>alert(1)</script><img src=\"a.png\">"
    );

    assert_eq!(fragment.to_html(), "<a>x</a><img src=\"a.png\">");
}

/// Raw tokens and displayable objects are emitted as markup text.
#[test]
fn raw_and_display_values_are_inlined() {
    let fragment = html!(
        "<div>",
        raw!("<b>", "markup", "</b>"),
        "<i>",
        Value::display(format_args!("{}-{}", 1, 2).to_string()),
        "</i></div>"
    );

    let div = fragment.query_tag("div").unwrap();
    assert_eq!(div.child_count(), 2);
    assert_eq!(outer_html(&div), "<div><b>markup</b><i>1-2</i></div>");
}

/// A custom renderer without the minifier keeps whitespace.
#[test]
fn renderer_configuration_applies() {
    let renderer = Renderer::builder().minify(false).build();
    let fragment = renderer.render(&["<pre> a ", " </pre>"], vec![Value::from("b")]);

    assert_eq!(fragment.text_content(), " a b ");
}

/// A signal bound to `href` never writes a script URL.
#[test]
fn bound_url_attribute_is_sanitized() {
    let target = Signal::new(String::from("javascript:alert(1)"));
    let fragment = html!("<a href=", &target, ">x</a>");
    assert_eq!(fragment.to_html(), "<a>x</a>");

    let doc = attach(&fragment);
    target.set("/docs".into());
    assert_eq!(doc.body().query_tag("a").unwrap().get_attribute("href").as_deref(), Some("/docs"));

    target.set("javascript:alert(2)".into());
    assert_eq!(outer_html(&doc.body().query_tag("a").unwrap()), "<a>x</a>");
}

/// A value that cannot be inserted leaves no marker behind.
#[test]
fn unplaceable_node_drops_its_marker() {
    let doc = Document::new();
    let fragment = html(&["<div>", "</div>"], vec![Value::from(doc.root().clone())]);

    assert_eq!(fragment.to_html(), "<div></div>");
}
