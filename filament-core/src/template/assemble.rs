//! Template assembly.

use super::classify::{classify, Context};
use super::registry::Registry;
use super::scanner::ContextScanner;
use super::value::Value;
use crate::pipeline::Materializer;

/// Assembled markup plus the payloads waiting to be placed into it.
#[derive(Debug, Default)]
pub struct Assembly {
    pub html: String,
    pub registry: Registry,
}

/// Interleave `segments` with classified `values`, left to right.
///
/// The value after segment `i` is classified with the context of all
/// text emitted so far, segment `i` included, so an attribute assignment
/// that ends the segment is seen. Missing values are nullish; values
/// beyond the last segment are ignored.
pub fn assemble(segments: &[&str], values: Vec<Value>, materializer: &dyn Materializer) -> Assembly {
    let mut html = String::with_capacity(segments.iter().map(|s| s.len()).sum());
    let mut registry = Registry::new();
    let mut scanner = ContextScanner::new();
    let mut values = values.into_iter();
    let last = segments.len().saturating_sub(1);

    for (index, segment) in segments.iter().enumerate() {
        html.push_str(segment);
        scanner.feed(segment);
        if index == last {
            break;
        }

        let value = values.next().unwrap_or_default();
        let cx = Context {
            index,
            assignment: scanner.assignment(),
        };
        let out = classify(value, cx, &mut registry, materializer);
        html.push_str(&out);
        scanner.feed(&out);
    }

    Assembly { html, registry }
}
