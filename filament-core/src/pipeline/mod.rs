//! Rendering pipeline collaborators
//!
//! The template core hands its assembled markup to three collaborators,
//! in order:
//!
//! 1. [`Minifier`]: whitespace minification ([`WhitespaceMinifier`])
//! 2. [`Sanitizer`]: attribute sanitization ([`AttributeSanitizer`])
//! 3. [`Materializer`]: markup to live fragment ([`Html5everMaterializer`])
//!
//! Each is a trait so a [`Renderer`](crate::Renderer) can be built with
//! different implementations. All of them are total: they never fail.

mod lexer;
mod minify;
mod sanitize;
mod materialize;

pub use minify::WhitespaceMinifier;
pub use sanitize::AttributeSanitizer;
pub(crate) use sanitize::is_blocked_url;
pub use materialize::Html5everMaterializer;

use crate::dom::DocumentFragment;

/// Whitespace minification of raw markup.
pub trait Minifier: Send + Sync {
    fn minify(&self, html: &str) -> String;
}

/// Removal of dangerous markup. Runs once on the assembled text.
pub trait Sanitizer: Send + Sync {
    fn sanitize(&self, html: &str) -> String;
}

/// Turns markup into an inert, detached fragment.
pub trait Materializer: Send + Sync {
    fn to_fragment(&self, html: &str) -> DocumentFragment;
}
