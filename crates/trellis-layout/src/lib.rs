#![forbid(unsafe_code)]

//! Container elements for trellis.
//!
//! The centrepiece is [`Grid`]: a row-major matrix of optional, exclusively
//! owned children with structural editing (append, prepend, insert, remove
//! and extract of whole rows and columns) and per-cell access.
//!
//! ```
//! use trellis_layout::{Grid, Label};
//!
//! let mut grid = Grid::new();
//! grid.append_row();
//! grid.append_column();
//! grid.insert(Label::new("hello"), 0, 0).unwrap();
//!
//! grid.insert_column(0).unwrap();
//! assert!(grid.get(0, 0).unwrap().is_none());
//! assert!(grid.get(1, 0).unwrap().is_some());
//! ```

pub mod grid;
pub mod label;
pub mod template;

pub use grid::{Grid, GridError, InsertError};
pub use label::Label;
pub use template::GridTemplate;
