//! Placeholder keys.
//!
//! A key is a kind plus the interpolation index it came from. Its markup
//! form is an attribute (`elm-id="elm-0"`, `ref="ref-1"`, ...) that is
//! written into the assembled HTML and looked up again after the fragment
//! has been materialized.

use std::fmt;

/// Prefix of synthetic event-listener attribute values.
const EVENT_PREFIX: &str = "evt-";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlaceholderKind {
    /// Node, node list or fragment placed into element content.
    Element,
    /// Signal-bound node placed into element content.
    Content,
    /// Element reference.
    Ref,
    /// Stylesheet text.
    Css,
    /// Signal bound to the named attribute.
    SignalAttr(String),
    /// Listener bound to the named `on*` attribute.
    Event(String),
}

/// Unique key of a pending substitution within one render.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlaceholderKey {
    kind: PlaceholderKind,
    index: usize,
}

impl PlaceholderKey {
    pub fn new(kind: PlaceholderKind, index: usize) -> Self {
        Self { kind, index }
    }

    pub fn element(index: usize) -> Self {
        Self::new(PlaceholderKind::Element, index)
    }

    pub fn content(index: usize) -> Self {
        Self::new(PlaceholderKind::Content, index)
    }

    pub fn kind(&self) -> &PlaceholderKind {
        &self.kind
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Name of the attribute that carries this key in markup.
    pub fn attr_name(&self) -> &str {
        match &self.kind {
            PlaceholderKind::Element => "elm-id",
            PlaceholderKind::Content => "el",
            PlaceholderKind::Ref => "ref",
            PlaceholderKind::Css => "css",
            PlaceholderKind::SignalAttr(name) | PlaceholderKind::Event(name) => name,
        }
    }

    /// Value of the attribute that carries this key in markup.
    pub fn attr_value(&self) -> String {
        let prefix = match &self.kind {
            PlaceholderKind::Element => "elm",
            PlaceholderKind::Content => "el",
            PlaceholderKind::Ref => "ref",
            PlaceholderKind::Css => "css",
            PlaceholderKind::SignalAttr(_) => "sig",
            PlaceholderKind::Event(_) => "evt",
        };
        format!("{}-{}", prefix, self.index)
    }

    /// Event type of an event key: the attribute name without `on`.
    pub fn event_type(&self) -> Option<&str> {
        match &self.kind {
            PlaceholderKind::Event(attr) => attr.strip_prefix("on"),
            _ => None,
        }
    }

    /// Whether the key is located through a `<template>` marker element
    /// rather than an attribute on an arbitrary element.
    pub fn uses_marker(&self) -> bool {
        matches!(self.kind, PlaceholderKind::Element | PlaceholderKind::Content)
    }

    /// Marker element emitted into content position.
    pub fn marker(&self) -> String {
        format!("<template {}=\"{}\"></template>", self.attr_name(), self.attr_value())
    }

    /// Quoted attribute value emitted right after `name=`.
    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.attr_value())
    }

    /// Whether `value` is a synthetic event placeholder value.
    pub fn is_event_value(value: &str) -> bool {
        value
            .strip_prefix(EVENT_PREFIX)
            .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
    }
}

impl fmt::Display for PlaceholderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            PlaceholderKind::SignalAttr(name) => write!(f, "sig-attr:{}=\"{}\"", name, self.attr_value()),
            PlaceholderKind::Event(name) => write!(f, "evt:{}=\"{}\"", name, self.attr_value()),
            _ => write!(f, "{}=\"{}\"", self.attr_name(), self.attr_value()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_forms() {
        assert_eq!(PlaceholderKey::element(0).to_string(), r#"elm-id="elm-0""#);
        assert_eq!(PlaceholderKey::content(4).marker(), r#"<template el="el-4"></template>"#);
        assert_eq!(PlaceholderKey::new(PlaceholderKind::Ref, 2).quoted(), r#""ref-2""#);

        let sig = PlaceholderKey::new(PlaceholderKind::SignalAttr("color".into()), 3);
        assert_eq!(sig.to_string(), r#"sig-attr:color="sig-3""#);
        assert_eq!(sig.attr_name(), "color");
        assert!(!sig.uses_marker());
    }

    #[test]
    fn kind_and_index_make_keys_distinct() {
        assert_ne!(PlaceholderKey::element(1), PlaceholderKey::content(1));
        assert_ne!(PlaceholderKey::element(1), PlaceholderKey::element(2));
    }

    #[test]
    fn event_values() {
        assert!(PlaceholderKey::is_event_value("evt-12"));
        let key = PlaceholderKey::new(PlaceholderKind::Event("onclick".into()), 12);
        assert_eq!(key.event_type(), Some("click"));
        assert_eq!(key.attr_value(), "evt-12");
        assert!(!PlaceholderKey::is_event_value("evt-"));
        assert!(!PlaceholderKey::is_event_value("alert(1)"));
    }
}
