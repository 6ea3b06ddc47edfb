//! Filament Core
//!
//! This crate renders tagged HTML templates into live DOM fragments.
//! It implements:
//!
//! - Value classification and template assembly
//! - Placement of nodes, references, stylesheets and listeners
//! - Reactive bindings from signals to text, nodes and attributes
//! - A thread-safe in-memory DOM to render into
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - `dom`: Nodes, fragments, documents, element references, events
//! - `reactive`: Signals and their type-erased form
//! - `template`: Classifier, registry, assembler, placement, bindings
//! - `pipeline`: Minifier, sanitizer and materializer collaborators
//! - `renderer`: The configurable entry point
//!
//! # Example
//!
//! ```rust
//! use filament_core::dom::Document;
//! use filament_core::reactive::Signal;
//! use filament_core::html;
//!
//! let color = Signal::new(String::from("red"));
//! let label = Signal::new(String::from("Ready"));
//! let fragment = html!("<div color=", &color, ">", &label, "</div>");
//!
//! let doc = Document::new();
//! doc.body().append_child(fragment.as_node()).unwrap();
//!
//! color.set("blue".into());
//! label.set("Done".into());
//!
//! let div = doc.body().query_tag("div").unwrap();
//! assert_eq!(div.get_attribute("color").as_deref(), Some("blue"));
//! assert_eq!(div.text_content(), "Done");
//! ```

pub mod dom;
pub mod error;
pub mod pipeline;
pub mod raw;
pub mod reactive;
pub mod renderer;
pub mod template;

pub use dom::{Document, DocumentFragment, ElementRef, Event, EventListener, NodeRef};
pub use error::{DomError, DomResult};
pub use raw::{css, raw, RawCss, RawHtml};
pub use reactive::Signal;
pub use renderer::{html, Renderer, RendererBuilder};
pub use template::{PlacementReport, Value};
