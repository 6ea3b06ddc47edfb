//! Renderer
//!
//! A [`Renderer`] owns the pipeline collaborators and turns a template
//! into a live [`DocumentFragment`]:
//!
//! ```text
//! assemble -> minify -> sanitize -> materialize -> place
//! ```
//!
//! [`html`] renders with a shared default renderer. The [`html!`],
//! [`raw!`] and [`css!`] macros build their arguments from alternating
//! literal segments and values.

use std::fmt;
use std::sync::OnceLock;

use crate::dom::DocumentFragment;
use crate::pipeline::{
    AttributeSanitizer, Html5everMaterializer, Materializer, Minifier, Sanitizer, WhitespaceMinifier,
};
use crate::template::{assemble, place, Assembly, PlacementReport, Value};

/// Template renderer.
pub struct Renderer {
    minifier: Box<dyn Minifier>,
    sanitizer: Box<dyn Sanitizer>,
    materializer: Box<dyn Materializer>,
    minify: bool,
    sanitize: bool,
}

impl Renderer {
    pub fn builder() -> RendererBuilder {
        RendererBuilder::default()
    }

    /// Render a template into a detached fragment with every binding live.
    ///
    /// Never fails: values that do not fit their position are dropped and
    /// placeholders that cannot be placed are skipped.
    pub fn render(&self, segments: &[&str], values: Vec<Value>) -> DocumentFragment {
        self.render_with_report(segments, values).0
    }

    /// Like [`Renderer::render`], also returning what placement did.
    pub fn render_with_report(
        &self,
        segments: &[&str],
        values: Vec<Value>,
    ) -> (DocumentFragment, PlacementReport) {
        let value_count = values.len();
        let Assembly { html, registry } = assemble(segments, values, self.materializer.as_ref());
        tracing::debug!(
            segments = segments.len(),
            values = value_count,
            placeholders = registry.len(),
            "template assembled"
        );

        let html = if self.minify {
            self.minifier.minify(&html)
        } else {
            html
        };
        let html = if self.sanitize {
            self.sanitizer.sanitize(&html)
        } else {
            html
        };

        let fragment = self.materializer.to_fragment(&html);
        let report = place(fragment.as_node(), registry);
        (fragment, report)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        RendererBuilder::default().build()
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer")
            .field("minify", &self.minify)
            .field("sanitize", &self.sanitize)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Renderer`].
pub struct RendererBuilder {
    minifier: Box<dyn Minifier>,
    sanitizer: Box<dyn Sanitizer>,
    materializer: Box<dyn Materializer>,
    minify: bool,
    sanitize: bool,
}

impl Default for RendererBuilder {
    fn default() -> Self {
        Self {
            minifier: Box::new(WhitespaceMinifier),
            sanitizer: Box::new(AttributeSanitizer),
            materializer: Box::new(Html5everMaterializer),
            minify: true,
            sanitize: true,
        }
    }
}

impl RendererBuilder {
    pub fn minifier(mut self, minifier: impl Minifier + 'static) -> Self {
        self.minifier = Box::new(minifier);
        self
    }

    pub fn sanitizer(mut self, sanitizer: impl Sanitizer + 'static) -> Self {
        self.sanitizer = Box::new(sanitizer);
        self
    }

    pub fn materializer(mut self, materializer: impl Materializer + 'static) -> Self {
        self.materializer = Box::new(materializer);
        self
    }

    /// Run the minifier. On by default.
    pub fn minify(mut self, enabled: bool) -> Self {
        self.minify = enabled;
        self
    }

    /// Run the sanitizer. On by default.
    pub fn sanitize(mut self, enabled: bool) -> Self {
        self.sanitize = enabled;
        self
    }

    pub fn build(self) -> Renderer {
        Renderer {
            minifier: self.minifier,
            sanitizer: self.sanitizer,
            materializer: self.materializer,
            minify: self.minify,
            sanitize: self.sanitize,
        }
    }
}

static DEFAULT_RENDERER: OnceLock<Renderer> = OnceLock::new();

/// Render a template with the default renderer.
///
/// `segments` normally holds one more entry than `values`. A missing value
/// renders as nothing; values past the last segment are ignored. Attach
/// the fragment to a document before changing its signals: a binding that
/// sees a change while detached unsubscribes for good.
pub fn html(segments: &[&str], values: Vec<Value>) -> DocumentFragment {
    DEFAULT_RENDERER.get_or_init(Renderer::default).render(segments, values)
}

/// Render a template from alternating literals and values.
///
/// ```rust
/// use filament_core::html;
///
/// let name = "world";
/// let fragment = html!("<p>Hello, ", name, "!</p>");
/// assert_eq!(fragment.to_html(), "<p>Hello, world!</p>");
/// ```
///
/// The first and last arguments are literals; use `""` to end on a value.
#[macro_export]
macro_rules! html {
    ($first:literal $(, $value:expr, $segment:literal)* $(,)?) => {
        $crate::html(
            &[$first $(, $segment)*],
            ::std::vec![$($crate::Value::from($value)),*],
        )
    };
}

/// Build a [`RawHtml`](crate::RawHtml) token from alternating literals and
/// displayable values.
#[macro_export]
macro_rules! raw {
    ($first:literal $(, $value:expr, $segment:literal)* $(,)?) => {{
        let values: &[::std::string::String] = &[$(::std::string::ToString::to_string(&$value)),*];
        $crate::raw(&[$first $(, $segment)*], values)
    }};
}

/// Build a [`RawCss`](crate::RawCss) token from alternating literals and
/// displayable values.
#[macro_export]
macro_rules! css {
    ($first:literal $(, $value:expr, $segment:literal)* $(,)?) => {{
        let values: &[::std::string::String] = &[$(::std::string::ToString::to_string(&$value)),*];
        $crate::css(&[$first $(, $segment)*], values)
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pipeline_minifies_and_sanitizes() {
        let fragment = Renderer::default().render(
            &["<div>\n  <a href=\"javascript:alert(1)\" onclick=\"x()\">", "</a>\n</div>"],
            vec![Value::from("go")],
        );
        assert_eq!(fragment.to_html(), "<div><a>go</a></div>");
    }

    #[test]
    fn stages_can_be_switched_off() {
        let renderer = Renderer::builder().minify(false).sanitize(false).build();
        let fragment = renderer.render(&["<b onclick=\"x()\"> ", " </b>"], vec![Value::from(1_i32)]);
        assert_eq!(fragment.to_html(), "<b onclick=\"x()\"> 1 </b>");
    }

    #[test]
    fn custom_minifier_is_used() {
        struct Upper;
        impl Minifier for Upper {
            fn minify(&self, html: &str) -> String {
                html.replace("hi", "HI")
            }
        }
        let renderer = Renderer::builder().minifier(Upper).build();
        assert_eq!(renderer.render(&["<p>hi</p>"], vec![]).to_html(), "<p>HI</p>");
    }

    #[test]
    fn report_counts_placements() {
        let (_, report) = Renderer::default().render_with_report(
            &["<div>", "</div>"],
            vec![Value::from(crate::dom::NodeRef::element("hr"))],
        );
        assert_eq!(report, PlacementReport { lookups: 1, placed: 1, skipped: 0 });
    }

    #[test]
    fn macros_alternate_literals_and_values() {
        let count = 3;
        let fragment = crate::html!("<p>", count, " items</p>");
        assert_eq!(fragment.to_html(), "<p>3 items</p>");

        let token = crate::raw!("<i>", "x", "</i>");
        assert_eq!(token.as_str(), "<i>x</i>");
        let sheet = crate::css!("p { color: ", "red", "; }");
        assert_eq!(sheet.as_str(), "p { color: red; }");
        assert_eq!(crate::css!("a{}").as_str(), "a{}");
    }
}
