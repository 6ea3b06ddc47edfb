//! Trusted markup and stylesheet tokens.
//!
//! Plain strings interpolated into a template are text. A [`RawHtml`]
//! token is markup and is emitted verbatim; a [`RawCss`] token is
//! stylesheet text for a `css=` attribute. Both are built by the companion
//! functions [`raw`] and [`css`] (or the `raw!` / `css!` macros).

use std::fmt;

use crate::pipeline::{Minifier, WhitespaceMinifier};

/// Markup that bypasses text handling.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawHtml(String);

impl RawHtml {
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RawHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stylesheet text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawCss(String);

impl RawCss {
    pub fn new(css: impl Into<String>) -> Self {
        Self(css.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RawCss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Interleave segments with values. Missing values are empty; extra
/// values are ignored.
fn concat<S: AsRef<str>>(segments: &[&str], values: &[S]) -> String {
    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        out.push_str(segment);
        if i + 1 < segments.len() {
            if let Some(value) = values.get(i) {
                out.push_str(value.as_ref());
            }
        }
    }
    out
}

/// Build a minified [`RawHtml`] token.
pub fn raw<S: AsRef<str>>(segments: &[&str], values: &[S]) -> RawHtml {
    RawHtml(WhitespaceMinifier.minify(&concat(segments, values)))
}

/// Build a [`RawCss`] token.
pub fn css<S: AsRef<str>>(segments: &[&str], values: &[S]) -> RawCss {
    RawCss(concat(segments, values))
}
