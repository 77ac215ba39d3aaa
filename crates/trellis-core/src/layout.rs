#![forbid(unsafe_code)]

//! Layout context distributed through an element tree.
//!
//! A [`Layout`] owns the root element of a tree. Every element in the tree
//! carries the layout's [`LayoutId`]; containers keep that association up to
//! date when children move in or out of them.

use crate::element::{Element, ElementPtr};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for a layout context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayoutId(u64);

impl LayoutId {
    /// Allocate a new unique layout ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Create a layout ID from a raw value.
    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl Default for LayoutId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LayoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Layout({})", self.0)
    }
}

/// Owner of an element tree.
#[derive(Debug, Default)]
pub struct Layout {
    id: LayoutId,
    root: Option<ElementPtr>,
}

impl Layout {
    /// Create an empty layout with a fresh id.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> LayoutId {
        self.id
    }

    /// The root element, if one is set.
    pub fn root(&self) -> Option<&dyn Element> {
        self.root.as_deref()
    }

    /// The root element, mutably.
    pub fn root_mut(&mut self) -> Option<&mut dyn Element> {
        match &mut self.root {
            Some(root) => Some(root.as_mut()),
            None => None,
        }
    }

    /// Install `root`, associating its whole subtree with this layout.
    ///
    /// Returns the previous root, detached.
    pub fn set_root(&mut self, mut root: ElementPtr) -> Option<ElementPtr> {
        root.set_parent(None);
        root.set_layout(Some(self.id));
        #[cfg(feature = "tracing")]
        tracing::debug!(layout = %self.id, root = %root.id(), "layout root set");
        let previous = self.root.replace(root);
        previous.map(|mut old| {
            old.detach();
            old
        })
    }

    /// Remove the root element and hand it back, detached.
    pub fn take_root(&mut self) -> Option<ElementPtr> {
        self.root.take().map(|mut root| {
            root.detach();
            root
        })
    }
}

impl Clone for Layout {
    /// Deep copy: the new layout gets a fresh id and a cloned root bound to it.
    fn clone(&self) -> Self {
        let id = LayoutId::new();
        Self {
            id,
            root: self
                .root
                .as_ref()
                .map(|root| root.clone_element(Some(id), None)),
        }
    }
}
