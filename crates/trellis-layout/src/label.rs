#![forbid(unsafe_code)]

//! Text leaf element.

use trellis_core::{Element, ElementBase, ElementId, ElementPtr, LayoutId};

/// A leaf element displaying a single string.
#[derive(Debug, Default)]
pub struct Label {
    base: ElementBase,
    text: String,
}

impl Label {
    /// Create a detached label.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            base: ElementBase::new(),
            text: text.into(),
        }
    }

    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl Element for Label {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn clone_element(&self, layout: Option<LayoutId>, parent: Option<ElementId>) -> ElementPtr {
        Box::new(Self {
            base: ElementBase::attached(layout, parent),
            text: self.text.clone(),
        })
    }
}
