#![forbid(unsafe_code)]

//! 2D grid container element.
//!
//! A [`Grid`] owns up to one child element per cell, stored row-major:
//! cell `(x, y)` lives at `children[y * columns + x]`. Rows and columns can be
//! appended, prepended, inserted, removed, or extracted; every structural
//! edit shifts the remaining children so that each unaffected element keeps
//! its relative position.
//!
//! # Invariants
//! 1. `children.len() == rows * columns` after every call.
//! 2. Every held child has `parent == grid.id()` and `layout == grid.layout()`.
//! 3. A rejected call (out-of-bounds index) leaves the grid untouched.
//!
//! # Example
//!
//! ```
//! use trellis_layout::{Grid, Label};
//!
//! let mut grid = Grid::with_shape(2, 2)?;
//! grid.insert(Label::new("top-right"), 1, 0).unwrap();
//!
//! // Push everything down one row.
//! grid.prepend_row();
//! assert_eq!(grid.row_count(), 3);
//! assert!(grid.get(1, 1).unwrap().is_some());
//!
//! // Take the row back out; ownership moves to the caller.
//! let row = grid.extract_row(1).unwrap();
//! assert_eq!(row.len(), 2);
//! assert!(row[0].is_none());
//! # Ok::<(), trellis_layout::GridError>(())
//! ```

use crate::template::GridTemplate;
use std::fmt;
use trellis_core::{
    Element, ElementBase, ElementId, ElementPtr, HorizontalAlignment, LayoutId, VerticalAlignment,
};

/// Errors from grid operations.
///
/// All of them are caller contract violations; the grid is unchanged when
/// one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// A row index was past the end of the valid range.
    RowOutOfBounds { row: usize, rows: usize },
    /// A column index was past the end of the valid range.
    ColumnOutOfBounds { column: usize, columns: usize },
    /// A cell coordinate was outside the grid.
    CellOutOfBounds {
        x: usize,
        y: usize,
        columns: usize,
        rows: usize,
    },
    /// `rows * columns` cells cannot be represented or allocated.
    ShapeOverflow { rows: usize, columns: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RowOutOfBounds { row, rows } => {
                write!(f, "row {row} out of bounds for grid with {rows} rows")
            }
            Self::ColumnOutOfBounds { column, columns } => {
                write!(
                    f,
                    "column {column} out of bounds for grid with {columns} columns"
                )
            }
            Self::CellOutOfBounds {
                x,
                y,
                columns,
                rows,
            } => write!(f, "cell ({x}, {y}) out of bounds for {columns}x{rows} grid"),
            Self::ShapeOverflow { rows, columns } => {
                write!(f, "grid shape {columns}x{rows} exceeds addressable cells")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// A rejected insertion, handing the element back to the caller.
#[derive(Debug)]
pub struct InsertError<T> {
    /// Why the element was not placed.
    pub error: GridError,
    /// The element that was passed in, untouched.
    pub element: T,
}

impl<T> InsertError<T> {
    /// Recover the element.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.element
    }
}

impl<T> fmt::Display for InsertError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "insert rejected: {}", self.error)
    }
}

impl<T: fmt::Debug> std::error::Error for InsertError<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl<T> From<InsertError<T>> for GridError {
    fn from(err: InsertError<T>) -> Self {
        err.error
    }
}

/// A grid of optional, exclusively owned child elements.
///
/// Cloning is a deep copy: every child is duplicated through
/// [`Element::clone_element`] and the copy gets its own id.
#[derive(Debug, Default)]
pub struct Grid {
    base: ElementBase,
    /// Horizontal placement applied to every child.
    horizontal_alignment: HorizontalAlignment,
    /// Vertical placement applied to every child.
    vertical_alignment: VerticalAlignment,
    rows: usize,
    columns: usize,
    /// Row-major cells, `rows * columns` long.
    children: Vec<Option<ElementPtr>>,
}

impl Grid {
    /// Create a new empty (0x0) grid.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a grid of `columns` x `rows` empty cells.
    ///
    /// Fails with [`GridError::ShapeOverflow`] when the cell count overflows
    /// `usize` or cannot be allocated.
    pub fn with_shape(columns: usize, rows: usize) -> Result<Self, GridError> {
        let overflow = GridError::ShapeOverflow { rows, columns };
        let cells = rows.checked_mul(columns).ok_or(overflow)?;
        let mut children: Vec<Option<ElementPtr>> = Vec::new();
        children.try_reserve_exact(cells).map_err(|_| overflow)?;
        children.resize_with(cells, || None);
        Ok(Self {
            rows,
            columns,
            children,
            ..Self::default()
        })
    }

    /// Create an empty grid with the shape and alignment of `template`.
    pub fn from_template(template: &GridTemplate) -> Result<Self, GridError> {
        let mut grid = Self::with_shape(template.columns, template.rows)?;
        grid.horizontal_alignment = template.horizontal_alignment;
        grid.vertical_alignment = template.vertical_alignment;
        Ok(grid)
    }

    /// Current shape and alignment, without the children.
    #[must_use]
    pub fn template(&self) -> GridTemplate {
        GridTemplate {
            rows: self.rows,
            columns: self.columns,
            horizontal_alignment: self.horizontal_alignment,
            vertical_alignment: self.vertical_alignment,
        }
    }

    // ── Alignment ───────────────────────────────────────────────────────

    #[inline]
    #[must_use]
    pub fn horizontal_alignment(&self) -> HorizontalAlignment {
        self.horizontal_alignment
    }

    #[inline]
    #[must_use]
    pub fn vertical_alignment(&self) -> VerticalAlignment {
        self.vertical_alignment
    }

    /// Set the horizontal alignment for child elements.
    ///
    /// Takes effect on the next layout pass; nothing is recomputed here.
    pub fn set_horizontal_alignment(&mut self, alignment: HorizontalAlignment) {
        self.horizontal_alignment = alignment;
    }

    /// Set the vertical alignment for child elements.
    pub fn set_vertical_alignment(&mut self, alignment: VerticalAlignment) {
        self.vertical_alignment = alignment;
    }

    // ── Shape ───────────────────────────────────────────────────────────

    /// Get the number of rows.
    #[inline]
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// Get the number of columns.
    #[inline]
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns
    }

    /// Number of cells, occupied or not.
    #[inline]
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.children.len()
    }

    /// Number of cells holding an element.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.children.iter().filter(|cell| cell.is_some()).count()
    }

    /// Returns `true` if no cell holds an element.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }

    /// Returns `true` if `(x, y)` is inside the grid.
    #[inline]
    #[must_use]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.columns && y < self.rows
    }

    // ── Rows and columns ────────────────────────────────────────────────

    /// Add an empty row to the end.
    pub fn append_row(&mut self) {
        self.open_row(self.rows);
    }

    /// Add an empty column to the end.
    pub fn append_column(&mut self) {
        self.open_column(self.columns);
    }

    /// Add an empty row to the front. All elements are shifted down.
    pub fn prepend_row(&mut self) {
        self.open_row(0);
    }

    /// Add an empty column to the front. All elements are shifted right.
    pub fn prepend_column(&mut self) {
        self.open_column(0);
    }

    /// Insert an empty row at `y`. Rows with index `>= y` shift down.
    ///
    /// `y == row_count()` appends.
    pub fn insert_row(&mut self, y: usize) -> Result<(), GridError> {
        if y > self.rows {
            return Err(self.row_error(y));
        }
        self.open_row(y);
        Ok(())
    }

    /// Insert an empty column at `x`. Columns with index `>= x` shift right.
    ///
    /// `x == column_count()` appends.
    pub fn insert_column(&mut self, x: usize) -> Result<(), GridError> {
        if x > self.columns {
            return Err(self.column_error(x));
        }
        self.open_column(x);
        Ok(())
    }

    /// Remove row `y`, destroying its elements. Rows below shift up.
    pub fn remove_row(&mut self, y: usize) -> Result<(), GridError> {
        let row = self.extract_row(y)?;
        let destroyed = row.iter().flatten().count();
        if destroyed > 0 {
            tracing::debug!(y, destroyed, "grid row elements destroyed");
        }
        Ok(())
    }

    /// Remove column `x`, destroying its elements. Columns to the right shift left.
    pub fn remove_column(&mut self, x: usize) -> Result<(), GridError> {
        let column = self.extract_column(x)?;
        let destroyed = column.iter().flatten().count();
        if destroyed > 0 {
            tracing::debug!(x, destroyed, "grid column elements destroyed");
        }
        Ok(())
    }

    /// Remove row `y` and hand its cells to the caller, left to right.
    ///
    /// Empty cells come back as `None`. Returned elements are detached.
    pub fn extract_row(&mut self, y: usize) -> Result<Vec<Option<ElementPtr>>, GridError> {
        if y >= self.rows {
            return Err(self.row_error(y));
        }
        let start = y * self.columns;
        let mut row: Vec<_> = self.children.drain(start..start + self.columns).collect();
        self.rows -= 1;
        detach_all(&mut row);
        tracing::trace!(y, rows = self.rows, columns = self.columns, "grid row taken");
        Ok(row)
    }

    /// Remove column `x` and hand its cells to the caller, top to bottom.
    ///
    /// Empty cells come back as `None`. Returned elements are detached.
    pub fn extract_column(&mut self, x: usize) -> Result<Vec<Option<ElementPtr>>, GridError> {
        if x >= self.columns {
            return Err(self.column_error(x));
        }
        let columns = self.columns;
        let mut kept = Vec::with_capacity(self.rows * (columns - 1));
        let mut column = Vec::with_capacity(self.rows);
        for (index, cell) in std::mem::take(&mut self.children).into_iter().enumerate() {
            if index % columns == x {
                column.push(cell);
            } else {
                kept.push(cell);
            }
        }
        self.children = kept;
        self.columns -= 1;
        detach_all(&mut column);
        tracing::trace!(x, rows = self.rows, columns = self.columns, "grid column taken");
        Ok(column)
    }

    /// Destroy every element and shrink the grid to 0x0.
    pub fn remove_all_rows_and_columns(&mut self) {
        let mut children = std::mem::take(&mut self.children);
        detach_all(&mut children);
        let destroyed = children.iter().flatten().count();
        drop(children);
        self.rows = 0;
        self.columns = 0;
        tracing::debug!(destroyed, "grid cleared");
    }

    // ── Elements ────────────────────────────────────────────────────────

    /// Get the element at `(x, y)`, or `None` if the cell is empty.
    pub fn get(&self, x: usize, y: usize) -> Result<Option<&dyn Element>, GridError> {
        let index = self.index_of(x, y)?;
        Ok(self.children[index].as_deref())
    }

    /// Mutable access to the element at `(x, y)`.
    pub fn get_mut(&mut self, x: usize, y: usize) -> Result<Option<&mut dyn Element>, GridError> {
        let index = self.index_of(x, y)?;
        Ok(self.children[index].as_deref_mut())
    }

    /// Insert `elem` at `(x, y)`, destroying any previous occupant.
    ///
    /// The grid takes ownership; the returned reference is typed to `T` for
    /// immediate configuration. On an out-of-bounds coordinate the grid is
    /// unchanged and `elem` comes back inside the [`InsertError`].
    pub fn insert<T: Element>(
        &mut self,
        elem: T,
        x: usize,
        y: usize,
    ) -> Result<&mut T, InsertError<T>> {
        let index = match self.index_of(x, y) {
            Ok(index) => index,
            Err(error) => return Err(InsertError { error, element: elem }),
        };
        let inserted = self.fill(index, Box::new(elem));
        Ok(inserted
            .downcast_mut::<T>()
            .expect("cell holds the element just inserted"))
    }

    /// Insert an already boxed element at `(x, y)`, destroying any previous occupant.
    ///
    /// On an out-of-bounds coordinate `elem` comes back inside the error.
    pub fn insert_boxed(
        &mut self,
        elem: ElementPtr,
        x: usize,
        y: usize,
    ) -> Result<&mut dyn Element, InsertError<ElementPtr>> {
        match self.index_of(x, y) {
            Ok(index) => Ok(self.fill(index, elem)),
            Err(error) => Err(InsertError { error, element: elem }),
        }
    }

    /// Attach `elem` and place it in cell `index`, dropping any occupant.
    fn fill(&mut self, index: usize, mut elem: ElementPtr) -> &mut dyn Element {
        let (x, y) = (index % self.columns, index / self.columns);
        elem.set_parent(Some(self.base.id()));
        elem.set_layout(self.base.layout());

        let slot = &mut self.children[index];
        if let Some(mut previous) = slot.take() {
            previous.detach();
            tracing::debug!(
                x,
                y,
                replaced = %previous.id(),
                kind = previous.type_name(),
                "grid cell occupant destroyed"
            );
        }
        tracing::trace!(x, y, element = %elem.id(), "grid cell filled");
        &mut **slot.insert(elem)
    }

    /// Destroy the element at `(x, y)`. Empty cells are left alone.
    pub fn remove(&mut self, x: usize, y: usize) -> Result<(), GridError> {
        let index = self.index_of(x, y)?;
        if let Some(mut removed) = self.children[index].take() {
            removed.detach();
            tracing::debug!(x, y, element = %removed.id(), "grid cell occupant destroyed");
        }
        Ok(())
    }

    /// Remove the element at `(x, y)` and return it, detached.
    pub fn extract(&mut self, x: usize, y: usize) -> Result<Option<ElementPtr>, GridError> {
        let index = self.index_of(x, y)?;
        Ok(self.children[index].take().map(|mut elem| {
            elem.detach();
            elem
        }))
    }

    /// Occupied cells in row-major order, as `(x, y, element)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &dyn Element)> + '_ {
        let columns = self.columns;
        self.children.iter().enumerate().filter_map(move |(index, cell)| {
            cell.as_deref()
                .map(|elem| (index % columns, index / columns, elem))
        })
    }

    /// Occupied cells in row-major order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, usize, &mut dyn Element)> + '_ {
        let columns = self.columns;
        self.children
            .iter_mut()
            .enumerate()
            .filter_map(move |(index, cell)| {
                cell.as_deref_mut()
                    .map(|elem| (index % columns, index / columns, elem))
            })
    }

    // ── Internals ───────────────────────────────────────────────────────

    fn index_of(&self, x: usize, y: usize) -> Result<usize, GridError> {
        if self.contains(x, y) {
            Ok(y * self.columns + x)
        } else {
            Err(GridError::CellOutOfBounds {
                x,
                y,
                columns: self.columns,
                rows: self.rows,
            })
        }
    }

    fn row_error(&self, row: usize) -> GridError {
        GridError::RowOutOfBounds {
            row,
            rows: self.rows,
        }
    }

    fn column_error(&self, column: usize) -> GridError {
        GridError::ColumnOutOfBounds {
            column,
            columns: self.columns,
        }
    }

    /// Open an empty row at `y` (`y <= rows`).
    ///
    /// Appending only grows the tail of the backing vector.
    fn open_row(&mut self, y: usize) {
        let start = y * self.columns;
        let tail = self.children.split_off(start);
        self.children.resize_with(start + self.columns, || None);
        self.children.extend(tail);
        self.rows += 1;
        tracing::trace!(y, rows = self.rows, columns = self.columns, "grid row opened");
    }

    /// Open an empty column at `x` (`x <= columns`), restriding every row.
    fn open_column(&mut self, x: usize) {
        let columns = self.columns + 1;
        let mut cells = std::mem::take(&mut self.children).into_iter();
        let mut children = Vec::with_capacity(self.rows * columns);
        for _ in 0..self.rows {
            children.extend(cells.by_ref().take(x));
            children.push(None);
            children.extend(cells.by_ref().take(self.columns - x));
        }
        self.children = children;
        self.columns = columns;
        tracing::trace!(x, rows = self.rows, columns = self.columns, "grid column opened");
    }

    /// Deep copies of all cells, attached to `layout` and owned by `parent`.
    fn clone_children(
        &self,
        layout: Option<LayoutId>,
        parent: ElementId,
    ) -> Vec<Option<ElementPtr>> {
        self.children
            .iter()
            .map(|cell| {
                cell.as_ref()
                    .map(|child| child.clone_element(layout, Some(parent)))
            })
            .collect()
    }

    fn duplicate(&self, layout: Option<LayoutId>, parent: Option<ElementId>) -> Self {
        let base = ElementBase::attached(layout, parent);
        let children = self.clone_children(layout, base.id());
        Self {
            base,
            horizontal_alignment: self.horizontal_alignment,
            vertical_alignment: self.vertical_alignment,
            rows: self.rows,
            columns: self.columns,
            children,
        }
    }
}

fn detach_all(cells: &mut [Option<ElementPtr>]) {
    for elem in cells.iter_mut().flatten() {
        elem.detach();
    }
}

impl Clone for Grid {
    /// Deep copy with a fresh id, in the same layout, without a parent.
    fn clone(&self) -> Self {
        self.duplicate(self.base.layout(), None)
    }

    /// Replace contents with a deep copy of `source`, keeping this grid's
    /// identity, layout and parent.
    fn clone_from(&mut self, source: &Self) {
        self.children = source.clone_children(self.base.layout(), self.base.id());
        self.horizontal_alignment = source.horizontal_alignment;
        self.vertical_alignment = source.vertical_alignment;
        self.rows = source.rows;
        self.columns = source.columns;
    }
}

impl Element for Grid {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn clone_element(&self, layout: Option<LayoutId>, parent: Option<ElementId>) -> ElementPtr {
        Box::new(self.duplicate(layout, parent))
    }

    fn set_layout(&mut self, layout: Option<LayoutId>) {
        self.base.set_layout(layout);
        for child in self.children.iter_mut().flatten() {
            child.set_layout(layout);
        }
    }
}
