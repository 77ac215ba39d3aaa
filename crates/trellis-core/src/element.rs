#![forbid(unsafe_code)]

//! The element boundary shared by every container and leaf.
//!
//! An [`Element`] is any node of a UI tree. Containers hold their children as
//! [`ElementPtr`] (exclusive ownership) and children point back at their
//! parent and layout through plain ids stored in an [`ElementBase`].
//!
//! # Clone protocol
//!
//! [`Element::clone_element`] produces a deep copy attached to a *given*
//! layout and parent. The copy always receives a fresh [`ElementId`]; a
//! container passes its own new id as the parent of its cloned children.
//!
//! # Invariants
//! 1. Every live element has a unique [`ElementId`].
//! 2. An element's `parent`, when set, names the container that owns it.
//! 3. Detached elements (owned by a caller, not a container) have no parent
//!    and no layout.

use crate::layout::LayoutId;
use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Exclusive ownership handle for a child element.
pub type ElementPtr = Box<dyn Element>;

/// Unique identifier for an element instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    /// Allocate a new unique element ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Create an element ID from a raw value.
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

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Element({})", self.0)
    }
}

/// State every element carries: identity plus non-owning relations.
///
/// Not `Clone`: copies need a fresh id, see [`ElementBase::attached`].
#[derive(Debug, Default)]
pub struct ElementBase {
    id: ElementId,
    layout: Option<LayoutId>,
    parent: Option<ElementId>,
}

impl ElementBase {
    /// Detached base with a fresh id.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Base with a fresh id, already attached to `layout` and `parent`.
    #[must_use]
    pub fn attached(layout: Option<LayoutId>, parent: Option<ElementId>) -> Self {
        Self {
            id: ElementId::new(),
            layout,
            parent,
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> ElementId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn layout(&self) -> Option<LayoutId> {
        self.layout
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    #[inline]
    pub fn set_layout(&mut self, layout: Option<LayoutId>) {
        self.layout = layout;
    }

    #[inline]
    pub fn set_parent(&mut self, parent: Option<ElementId>) {
        self.parent = parent;
    }
}

/// A node in a UI tree.
///
/// Implementors store an [`ElementBase`] and expose it through
/// [`base`](Element::base)/[`base_mut`](Element::base_mut); the relation
/// accessors are provided on top of it. Containers override
/// [`set_layout`](Element::set_layout) to forward the layout to their
/// children.
pub trait Element: Any + fmt::Debug + 'static {
    /// Shared element state.
    fn base(&self) -> &ElementBase;

    /// Shared element state, mutably.
    fn base_mut(&mut self) -> &mut ElementBase;

    /// Deep copy of this element, attached to `layout` and `parent`.
    ///
    /// The copy gets a fresh [`ElementId`].
    fn clone_element(&self, layout: Option<LayoutId>, parent: Option<ElementId>) -> ElementPtr;

    /// Unique id of this instance.
    fn id(&self) -> ElementId {
        self.base().id()
    }

    /// Layout this element is currently associated with.
    fn layout(&self) -> Option<LayoutId> {
        self.base().layout()
    }

    /// Container that owns this element, if any.
    fn parent(&self) -> Option<ElementId> {
        self.base().parent()
    }

    /// Associate this element (and, for containers, its subtree) with a layout.
    fn set_layout(&mut self, layout: Option<LayoutId>) {
        self.base_mut().set_layout(layout);
    }

    /// Record the owning container.
    fn set_parent(&mut self, parent: Option<ElementId>) {
        self.base_mut().set_parent(parent);
    }

    /// Concrete type name, for diagnostics.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl dyn Element {
    /// Returns `true` if the concrete type is `T`.
    #[inline]
    pub fn is<T: Element>(&self) -> bool {
        (self as &dyn Any).is::<T>()
    }

    /// Borrow as the concrete type `T`.
    #[inline]
    pub fn downcast_ref<T: Element>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }

    /// Mutably borrow as the concrete type `T`.
    #[inline]
    pub fn downcast_mut<T: Element>(&mut self) -> Option<&mut T> {
        (self as &mut dyn Any).downcast_mut::<T>()
    }

    /// Recover the concrete owned type, handing the element back on mismatch.
    pub fn downcast<T: Element>(self: Box<Self>) -> Result<Box<T>, ElementPtr> {
        if !self.is::<T>() {
            return Err(self);
        }
        let any: Box<dyn Any> = self;
        match any.downcast::<T>() {
            Ok(typed) => Ok(typed),
            Err(_) => unreachable!("type checked above"),
        }
    }

    /// Clear parent and layout, as for an element handed back to a caller.
    pub fn detach(&mut self) {
        self.set_parent(None);
        self.set_layout(None);
    }
}
