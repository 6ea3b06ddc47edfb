//! Whitespace minification.

use super::lexer::{Lexer, Token};
use super::Minifier;

/// Elements whose text content is kept byte for byte.
const PRESERVE: &[&str] = &["pre", "textarea", "script", "style"];

/// Collapses insignificant whitespace.
///
/// Whitespace-only runs between tags are dropped, other whitespace runs
/// collapse to a single space, and the result is trimmed. Content of
/// `pre`, `textarea`, `script` and `style` is left alone, as is the
/// inside of every tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceMinifier;

impl Minifier for WhitespaceMinifier {
    fn minify(&self, html: &str) -> String {
        let mut out = String::with_capacity(html.len());
        let mut preserve_depth = 0usize;

        for token in Lexer::new(html) {
            match &token {
                Token::Text(text) if preserve_depth == 0 => {
                    if !text.trim().is_empty() {
                        collapse_whitespace(text, &mut out);
                    }
                }
                Token::StartTag(tag) if !tag.self_closing && PRESERVE.contains(&tag.name.as_str()) => {
                    preserve_depth += 1;
                    out.push_str(token.raw());
                }
                Token::EndTag { name, .. } if PRESERVE.contains(&name.as_str()) => {
                    preserve_depth = preserve_depth.saturating_sub(1);
                    out.push_str(token.raw());
                }
                _ => out.push_str(token.raw()),
            }
        }

        out.trim().to_string()
    }
}

fn collapse_whitespace(text: &str, out: &mut String) {
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() && c != '\u{a0}' {
            if !in_space {
                out.push(' ');
                in_space = true;
            }
        } else {
            out.push(c);
            in_space = false;
        }
    }
}
