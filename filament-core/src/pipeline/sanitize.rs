//! Attribute sanitization.
//!
//! Runs once over the fully assembled markup, before it is materialized.
//! Strips script elements, inline event handler attributes and URL
//! attributes that carry a script-capable scheme.

use tracing::trace;

use super::lexer::{Attr, Lexer, Token};
use super::Sanitizer;
use crate::template::PlaceholderKey;

/// Attributes whose value is navigated to or fetched.
const URL_ATTRIBUTES: &[&str] = &["href", "src", "action", "formaction", "xlink:href", "poster"];

/// Schemes that execute or render active content.
const BLOCKED_SCHEMES: &[&str] = &["javascript:", "vbscript:", "data:text/html"];

/// Default [`Sanitizer`].
///
/// `on*` attributes survive only when their value is a synthetic event
/// placeholder (`evt-<n>`), which placement swaps for a real listener.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeSanitizer;

impl AttributeSanitizer {
    fn is_allowed(attr: &Attr<'_>) -> bool {
        let name = attr.name.to_ascii_lowercase();
        if name.starts_with("on") {
            return attr.value.is_some_and(PlaceholderKey::is_event_value);
        }
        attr.value.map_or(true, |value| !is_blocked_url(&name, value))
    }
}

/// Whether `value` must not be written to attribute `name`: a URL
/// attribute carrying a script-capable scheme.
pub(crate) fn is_blocked_url(name: &str, value: &str) -> bool {
    URL_ATTRIBUTES.contains(&name.to_ascii_lowercase().as_str()) && has_blocked_scheme(value)
}

fn has_blocked_scheme(value: &str) -> bool {
    let normalized: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();
    BLOCKED_SCHEMES.iter().any(|scheme| normalized.starts_with(scheme))
}

impl Sanitizer for AttributeSanitizer {
    fn sanitize(&self, html: &str) -> String {
        let mut out = String::with_capacity(html.len());
        let mut in_script = false;

        for token in Lexer::new(html) {
            match &token {
                Token::StartTag(tag) if tag.name == "script" => {
                    trace!("removing script element");
                    in_script = !tag.self_closing;
                }
                Token::EndTag { name, .. } if name == "script" => in_script = false,
                _ if in_script => {}
                Token::StartTag(tag) => {
                    if tag.attrs.iter().all(Self::is_allowed) {
                        out.push_str(tag.raw);
                        continue;
                    }
                    out.push('<');
                    out.push_str(&tag.name);
                    for attr in tag.attrs.iter().filter(|a| Self::is_allowed(a)) {
                        attr.write(&mut out);
                    }
                    if tag.self_closing {
                        out.push_str(" /");
                    }
                    out.push('>');
                }
                _ => out.push_str(token.raw()),
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sanitize(html: &str) -> String {
        AttributeSanitizer.sanitize(html)
    }

    #[test]
    fn strips_inline_handlers() {
        assert_eq!(
            sanitize(r#"<button onclick="alert(1)" class="b">x</button>"#),
            r#"<button class="b">x</button>"#
        );
    }

    #[test]
    fn keeps_event_placeholders() {
        let html = r#"<button onclick="evt-3">x</button>"#;
        assert_eq!(sanitize(html), html);
    }

    #[test]
    fn strips_script_urls() {
        assert_eq!(
            sanitize(r#"<a href=" JavaScript:alert(1)">x</a><a href="/ok">y</a>"#),
            r#"<a>x</a><a href="/ok">y</a>"#
        );
    }

    #[test]
    fn blocked_urls_depend_on_attribute() {
        assert!(is_blocked_url("HREF", "vbscript:x"));
        assert!(is_blocked_url("src", "data:text/html,<b>"));
        assert!(!is_blocked_url("title", "javascript:alert(1)"));
        assert!(!is_blocked_url("href", "https://example.com"));
    }

    #[test]
    fn removes_script_elements() {
        assert_eq!(sanitize("<p>a</p><script>alert(1)</script><p>b</p>"), "<p>a</p><p>b</p>");
    }

    #[test]
    fn leaves_safe_markup_alone() {
        let html = r#"<div ref="ref-0" color="sig-1"><template el="el-2"></template></div>"#;
        assert_eq!(sanitize(html), html);
    }
}
