#![forbid(unsafe_code)]

//! Core: the element boundary every trellis container builds on.
//!
//! # Role in trellis
//! `trellis-core` defines what an element *is* without knowing what any
//! concrete element does. Containers (see `trellis-layout`) own children
//! through [`ElementPtr`] and talk to them only through the [`Element`] trait.
//!
//! # Primary responsibilities
//! - **Element**: polymorphic node with identity and a clone protocol.
//! - **Layout**: context object whose id is distributed to every element of
//!   a tree.
//! - **Alignment**: grid-wide placement settings for container content.
//!
//! # Ownership model
//! Parents own children exclusively (`Box<dyn Element>`). Children refer back
//! to their parent and layout by id only, so ownership never forms a cycle
//! and relocating an owner leaves nothing dangling.

pub mod alignment;
pub mod element;
pub mod layout;
pub mod logging;

pub use alignment::{HorizontalAlignment, VerticalAlignment};
pub use element::{Element, ElementBase, ElementId, ElementPtr};
pub use layout::{Layout, LayoutId};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
