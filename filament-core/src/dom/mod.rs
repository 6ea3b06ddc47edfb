//! In-memory DOM
//!
//! The host document that rendered fragments are materialized into. It
//! provides the handful of browser DOM operations the template pipeline
//! relies on: tree insertion with fragment semantics, attribute access,
//! text data updates, connectivity checks, and element listeners.
//!
//! # Model
//!
//! - [`NodeRef`]: shared, identity-compared handle to any node
//! - [`DocumentFragment`]: detached container whose children move on insertion
//! - [`Document`]: connected root; nodes under it report `is_connected()`
//! - [`ElementRef`]: slot filled with an element during placement
//! - [`Event`] / [`EventListener`]: element event dispatch

mod node;
mod document;
mod fragment;
mod element_ref;
mod event;
pub mod serialize;

pub use node::{Node, NodeRef, NodeType};
pub use document::Document;
pub use fragment::DocumentFragment;
pub use element_ref::ElementRef;
pub use event::{Event, EventListener};
