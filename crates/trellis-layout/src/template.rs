#![forbid(unsafe_code)]

//! Serializable grid shape, for building grids from configuration.
//!
//! ```
//! use trellis_layout::GridTemplate;
//! use trellis_core::HorizontalAlignment;
//!
//! let template: GridTemplate =
//!     serde_json::from_str(r#"{ "rows": 2, "columns": 3, "horizontal_alignment": "center" }"#)
//!         .unwrap();
//! let grid = template.build().unwrap();
//! assert_eq!(grid.column_count(), 3);
//! assert_eq!(grid.horizontal_alignment(), HorizontalAlignment::Center);
//! ```

use crate::grid::{Grid, GridError};
use serde::{Deserialize, Serialize};
use trellis_core::{HorizontalAlignment, VerticalAlignment};

/// Shape and alignment of a grid, without its children.
///
/// Missing fields fall back to their defaults (0x0, left/top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GridTemplate {
    pub rows: usize,
    pub columns: usize,
    pub horizontal_alignment: HorizontalAlignment,
    pub vertical_alignment: VerticalAlignment,
}

impl GridTemplate {
    /// Template for an empty `columns` x `rows` grid with default alignment.
    #[must_use]
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            rows,
            columns,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn horizontal_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.horizontal_alignment = alignment;
        self
    }

    #[must_use]
    pub fn vertical_alignment(mut self, alignment: VerticalAlignment) -> Self {
        self.vertical_alignment = alignment;
        self
    }

    /// Build an empty grid of this shape.
    ///
    /// Fails with [`GridError::ShapeOverflow`] when `rows * columns` cells
    /// cannot be held.
    pub fn build(&self) -> Result<Grid, GridError> {
        Grid::from_template(self)
    }
}
