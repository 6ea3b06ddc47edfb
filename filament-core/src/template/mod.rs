//! Template core
//!
//! Rendering a template is four steps:
//!
//! 1. [`assemble`]: interleave literal segments with classified values,
//!    filling a [`Registry`] with payloads that cannot be written as text
//! 2. the pipeline turns the markup into a detached fragment
//! 3. [`place`]: resolve each registry entry against the fragment
//! 4. signal bindings created along the way keep the DOM up to date
//!
//! The registry is owned by one render call and consumed by placement.

mod assemble;
mod bind;
mod classify;
mod key;
mod place;
mod registry;
mod scanner;
mod value;

pub use assemble::{assemble, Assembly};
pub use bind::{bind_attribute, bind_content, content_node};
pub use classify::{classify, Context};
pub use key::{PlaceholderKey, PlaceholderKind};
pub use place::{place, PlacementReport};
pub use registry::{NodeList, Payload, Registry};
pub use scanner::ContextScanner;
pub use value::Value;
