//! HTML Serialization (innerHTML/outerHTML)
//!
//! Serializes nodes back to markup. Used for debugging output and for
//! comparing rendered fragments in tests.

use super::{NodeRef, NodeType};

/// Void elements (no end tag)
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input",
    "link", "meta", "param", "source", "track", "wbr",
];

/// Raw text elements (no escaping for content)
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Serialize the children of `node`.
pub fn inner_html(node: &NodeRef) -> String {
    let mut output = String::new();
    for child in node.child_nodes() {
        serialize_node(&child, &mut output, false);
    }
    output
}

/// Serialize `node` including itself.
pub fn outer_html(node: &NodeRef) -> String {
    let mut output = String::new();
    serialize_node(node, &mut output, false);
    output
}

fn serialize_node(node: &NodeRef, output: &mut String, raw: bool) {
    match node.node_type() {
        NodeType::Document | NodeType::Fragment => {
            for child in node.child_nodes() {
                serialize_node(&child, output, false);
            }
        }
        NodeType::Element => {
            let tag = node.tag_name().unwrap_or_default();
            output.push('<');
            output.push_str(tag);
            for (name, value) in node.attributes() {
                output.push(' ');
                output.push_str(&name);
                if !value.is_empty() {
                    output.push_str("=\"");
                    escape_attribute(&value, output);
                    output.push('"');
                }
            }
            output.push('>');

            if VOID_ELEMENTS.contains(&tag) {
                return;
            }

            let is_raw = RAW_TEXT_ELEMENTS.contains(&tag);
            for child in node.child_nodes() {
                serialize_node(&child, output, is_raw);
            }

            output.push_str("</");
            output.push_str(tag);
            output.push('>');
        }
        NodeType::Text => {
            let data = node.data().unwrap_or_default();
            if raw {
                output.push_str(&data);
            } else {
                escape_text(&data, output);
            }
        }
        NodeType::Comment => {
            output.push_str("<!--");
            output.push_str(&node.data().unwrap_or_default());
            output.push_str("-->");
        }
    }
}

fn escape_text(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '\u{a0}' => output.push_str("&nbsp;"),
            _ => output.push(c),
        }
    }
}

fn escape_attribute(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '"' => output.push_str("&quot;"),
            '\u{a0}' => output.push_str("&nbsp;"),
            _ => output.push(c),
        }
    }
}
