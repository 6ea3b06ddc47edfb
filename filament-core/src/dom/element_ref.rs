//! Element references.
//!
//! An [`ElementRef`] interpolated as the value of a `ref` attribute is
//! filled with the element carrying that attribute once the fragment has
//! been materialized.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use super::NodeRef;

/// A slot that receives an element during placement.
///
/// Clones share the same slot.
#[derive(Clone, Default)]
pub struct ElementRef {
    el: Arc<RwLock<Option<NodeRef>>>,
}

impl ElementRef {
    pub fn new() -> Self {
        Self::default()
    }

    /// The bound element, if placement has run.
    pub fn get(&self) -> Option<NodeRef> {
        self.el.read().clone()
    }

    pub fn is_bound(&self) -> bool {
        self.el.read().is_some()
    }

    pub(crate) fn set(&self, element: NodeRef) {
        *self.el.write() = Some(element);
    }
}

impl fmt::Debug for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementRef").field("el", &*self.el.read()).finish()
    }
}
