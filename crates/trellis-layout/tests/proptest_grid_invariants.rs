//! Property-based invariant tests for the grid container.
//!
//! These tests drive a [`Grid`] with arbitrary sequences of structural edits
//! and check it against a plain `Vec<Vec<_>>` model:
//!
//! 1. Backing length always equals `rows * columns`.
//! 2. Every cell matches the model after every operation.
//! 3. Out-of-bounds calls are rejected and change nothing.
//! 4. Extracted rows/columns come back in order, `None` for empty cells.
//! 5. insert_row / insert_column shift later tracks by one.
//! 6. remove_row / remove_column shift later tracks back by one.
//! 7. Cloning yields distinct elements with identical content.
//! 8. Any template, zero-width included, builds a grid of exactly
//!    `rows * columns` empty cells.

use proptest::prelude::*;
use trellis_core::{Element, ElementPtr};
use trellis_core::{HorizontalAlignment, VerticalAlignment};
use trellis_layout::{Grid, GridTemplate, Label};

// ── Model ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
struct Model {
    columns: usize,
    rows: Vec<Vec<Option<u32>>>,
}

#[derive(Debug, Clone)]
enum Op {
    AppendRow,
    AppendColumn,
    PrependRow,
    PrependColumn,
    InsertRow(usize),
    InsertColumn(usize),
    RemoveRow(usize),
    RemoveColumn(usize),
    ExtractRow(usize),
    ExtractColumn(usize),
    Insert(usize, usize, u32),
    Remove(usize, usize),
    Extract(usize, usize),
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let index = 0usize..6;
    prop_oneof![
        3 => Just(Op::AppendRow),
        3 => Just(Op::AppendColumn),
        1 => Just(Op::PrependRow),
        1 => Just(Op::PrependColumn),
        2 => index.clone().prop_map(Op::InsertRow),
        2 => index.clone().prop_map(Op::InsertColumn),
        2 => index.clone().prop_map(Op::RemoveRow),
        2 => index.clone().prop_map(Op::RemoveColumn),
        1 => index.clone().prop_map(Op::ExtractRow),
        1 => index.clone().prop_map(Op::ExtractColumn),
        6 => (index.clone(), index.clone(), any::<u32>()).prop_map(|(x, y, t)| Op::Insert(x, y, t)),
        2 => (index.clone(), index.clone()).prop_map(|(x, y)| Op::Remove(x, y)),
        2 => (index.clone(), index).prop_map(|(x, y)| Op::Extract(x, y)),
        1 => Just(Op::Clear),
    ]
}

fn tag_of(elem: &dyn Element) -> Option<u32> {
    elem.downcast_ref::<Label>()
        .and_then(|label| label.text().parse().ok())
}

fn tags_of(cells: &[Option<ElementPtr>]) -> Vec<Option<u32>> {
    cells
        .iter()
        .map(|cell| cell.as_deref().and_then(tag_of))
        .collect()
}

fn cell_tag(grid: &Grid, x: usize, y: usize) -> Option<u32> {
    grid.get(x, y).ok().flatten().and_then(tag_of)
}

fn assert_matches(grid: &Grid, model: &Model) -> Result<(), TestCaseError> {
    prop_assert_eq!(grid.row_count(), model.rows.len());
    prop_assert_eq!(grid.column_count(), model.columns);
    prop_assert_eq!(grid.cell_count(), grid.row_count() * grid.column_count());
    for (y, row) in model.rows.iter().enumerate() {
        for (x, expected) in row.iter().enumerate() {
            prop_assert_eq!(cell_tag(grid, x, y), *expected, "cell ({}, {})", x, y);
        }
    }
    for (_, _, elem) in grid.iter() {
        prop_assert_eq!(elem.parent(), Some(grid.id()));
    }
    Ok(())
}

fn apply(grid: &mut Grid, model: &mut Model, op: &Op) -> Result<(), TestCaseError> {
    let columns = model.columns;
    let rows = model.rows.len();
    match *op {
        Op::AppendRow => {
            grid.append_row();
            model.rows.push(vec![None; columns]);
        }
        Op::AppendColumn => {
            grid.append_column();
            model.rows.iter_mut().for_each(|row| row.push(None));
            model.columns += 1;
        }
        Op::PrependRow => {
            grid.prepend_row();
            model.rows.insert(0, vec![None; columns]);
        }
        Op::PrependColumn => {
            grid.prepend_column();
            model.rows.iter_mut().for_each(|row| row.insert(0, None));
            model.columns += 1;
        }
        Op::InsertRow(y) => {
            let result = grid.insert_row(y);
            prop_assert_eq!(result.is_ok(), y <= rows);
            if y <= rows {
                model.rows.insert(y, vec![None; columns]);
            }
        }
        Op::InsertColumn(x) => {
            let result = grid.insert_column(x);
            prop_assert_eq!(result.is_ok(), x <= columns);
            if x <= columns {
                model.rows.iter_mut().for_each(|row| row.insert(x, None));
                model.columns += 1;
            }
        }
        Op::RemoveRow(y) => {
            let result = grid.remove_row(y);
            prop_assert_eq!(result.is_ok(), y < rows);
            if y < rows {
                model.rows.remove(y);
            }
        }
        Op::RemoveColumn(x) => {
            let result = grid.remove_column(x);
            prop_assert_eq!(result.is_ok(), x < columns);
            if x < columns {
                model.rows.iter_mut().for_each(|row| {
                    row.remove(x);
                });
                model.columns -= 1;
            }
        }
        Op::ExtractRow(y) => match grid.extract_row(y) {
            Ok(cells) => {
                prop_assert!(y < rows);
                let expected = model.rows.remove(y);
                prop_assert_eq!(tags_of(&cells), expected);
            }
            Err(_) => prop_assert!(y >= rows),
        },
        Op::ExtractColumn(x) => match grid.extract_column(x) {
            Ok(cells) => {
                prop_assert!(x < columns);
                let expected: Vec<_> = model.rows.iter_mut().map(|row| row.remove(x)).collect();
                model.columns -= 1;
                prop_assert_eq!(tags_of(&cells), expected);
            }
            Err(_) => prop_assert!(x >= columns),
        },
        Op::Insert(x, y, tag) => match grid.insert(Label::new(tag.to_string()), x, y) {
            Ok(label) => {
                prop_assert!(x < columns && y < rows);
                prop_assert_eq!(label.text(), tag.to_string());
                model.rows[y][x] = Some(tag);
            }
            Err(err) => {
                prop_assert!(x >= columns || y >= rows);
                prop_assert_eq!(err.element.text(), tag.to_string());
            }
        },
        Op::Remove(x, y) => {
            let in_bounds = x < columns && y < rows;
            prop_assert_eq!(grid.remove(x, y).is_ok(), in_bounds);
            if in_bounds {
                model.rows[y][x] = None;
            }
        }
        Op::Extract(x, y) => match grid.extract(x, y) {
            Ok(elem) => {
                prop_assert!(x < columns && y < rows);
                let expected = model.rows[y][x].take();
                prop_assert_eq!(elem.as_deref().and_then(tag_of), expected);
                if let Some(elem) = elem {
                    prop_assert_eq!(elem.parent(), None);
                }
            }
            Err(_) => prop_assert!(x >= columns || y >= rows),
        },
        Op::Clear => {
            grid.remove_all_rows_and_columns();
            *model = Model::default();
        }
    }
    Ok(())
}

/// Build a `columns` x `rows` grid where `fill[i]` decides whether cell `i`
/// (row-major) holds a label tagged `i`.
fn filled(columns: usize, rows: usize, fill: &[bool]) -> Grid {
    let mut grid = Grid::with_shape(columns, rows).unwrap();
    for y in 0..rows {
        for x in 0..columns {
            let i = y * columns + x;
            if fill.get(i).copied().unwrap_or(false) {
                grid.insert(Label::new(i.to_string()), x, y).unwrap();
            }
        }
    }
    grid
}

fn shape_strategy() -> impl Strategy<Value = (usize, usize, Vec<bool>)> {
    (1usize..6, 1usize..6, proptest::collection::vec(any::<bool>(), 36))
}

// ═════════════════════════════════════════════════════════════════════════
// 1–4. Model equivalence under arbitrary edit sequences
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn grid_matches_model(ops in proptest::collection::vec(op_strategy(), 0..60)) {
        let mut grid = Grid::new();
        let mut model = Model::default();
        for op in &ops {
            apply(&mut grid, &mut model, op)?;
            assert_matches(&grid, &model)?;
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Insertion shifts later tracks
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn insert_row_shifts_down((columns, rows, fill) in shape_strategy(), at in 0usize..6) {
        let at = at.min(rows);
        let mut grid = filled(columns, rows, &fill);
        let before: Vec<Vec<_>> = (0..rows)
            .map(|y| (0..columns).map(|x| cell_tag(&grid, x, y)).collect())
            .collect();

        grid.insert_row(at).unwrap();

        prop_assert_eq!(grid.row_count(), rows + 1);
        for x in 0..columns {
            prop_assert_eq!(cell_tag(&grid, x, at), None);
            for y in 0..rows {
                let moved = if y < at { y } else { y + 1 };
                prop_assert_eq!(cell_tag(&grid, x, moved), before[y][x]);
            }
        }
    }

    #[test]
    fn insert_column_shifts_right((columns, rows, fill) in shape_strategy(), at in 0usize..6) {
        let at = at.min(columns);
        let mut grid = filled(columns, rows, &fill);
        let before: Vec<Vec<_>> = (0..rows)
            .map(|y| (0..columns).map(|x| cell_tag(&grid, x, y)).collect())
            .collect();

        grid.insert_column(at).unwrap();

        prop_assert_eq!(grid.column_count(), columns + 1);
        for y in 0..rows {
            prop_assert_eq!(cell_tag(&grid, at, y), None);
            for x in 0..columns {
                let moved = if x < at { x } else { x + 1 };
                prop_assert_eq!(cell_tag(&grid, moved, y), before[y][x]);
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Removal shifts later tracks back
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn remove_row_shifts_up((columns, rows, fill) in shape_strategy(), at in 0usize..6) {
        let at = at.min(rows - 1);
        let mut grid = filled(columns, rows, &fill);
        let before: Vec<Vec<_>> = (0..rows)
            .map(|y| (0..columns).map(|x| cell_tag(&grid, x, y)).collect())
            .collect();

        grid.remove_row(at).unwrap();

        prop_assert_eq!(grid.row_count(), rows - 1);
        for y in 0..rows - 1 {
            let source = if y < at { y } else { y + 1 };
            for x in 0..columns {
                prop_assert_eq!(cell_tag(&grid, x, y), before[source][x]);
            }
        }
    }

    #[test]
    fn remove_column_shifts_left((columns, rows, fill) in shape_strategy(), at in 0usize..6) {
        let at = at.min(columns - 1);
        let mut grid = filled(columns, rows, &fill);
        let before: Vec<Vec<_>> = (0..rows)
            .map(|y| (0..columns).map(|x| cell_tag(&grid, x, y)).collect())
            .collect();

        grid.remove_column(at).unwrap();

        prop_assert_eq!(grid.column_count(), columns - 1);
        for y in 0..rows {
            for x in 0..columns - 1 {
                let source = if x < at { x } else { x + 1 };
                prop_assert_eq!(cell_tag(&grid, x, y), before[y][source]);
            }
        }
    }

    #[test]
    fn extract_row_preserves_column_order((columns, rows, fill) in shape_strategy(), at in 0usize..6) {
        let at = at.min(rows - 1);
        let mut grid = filled(columns, rows, &fill);
        let expected: Vec<_> = (0..columns).map(|x| cell_tag(&grid, x, at)).collect();

        let cells = grid.extract_row(at).unwrap();

        prop_assert_eq!(cells.len(), columns);
        prop_assert_eq!(tags_of(&cells), expected);
        prop_assert_eq!(grid.row_count(), rows - 1);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Deep copy
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn clone_is_deep((columns, rows, fill) in shape_strategy()) {
        let grid = filled(columns, rows, &fill);
        let copy = grid.clone();

        prop_assert_ne!(copy.id(), grid.id());
        prop_assert_eq!(copy.template(), grid.template());
        for y in 0..rows {
            for x in 0..columns {
                prop_assert_eq!(cell_tag(&copy, x, y), cell_tag(&grid, x, y));
                let original = grid.get(x, y).unwrap().map(|e| e.id());
                let cloned = copy.get(x, y).unwrap().map(|e| e.id());
                prop_assert_eq!(original.is_some(), cloned.is_some());
                if original.is_some() {
                    prop_assert_ne!(original, cloned);
                    prop_assert_eq!(copy.get(x, y).unwrap().and_then(|e| e.parent()), Some(copy.id()));
                }
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8. Templates
// ═════════════════════════════════════════════════════════════════════════

fn template_strategy() -> impl Strategy<Value = GridTemplate> {
    let horizontal = prop_oneof![
        Just(HorizontalAlignment::Left),
        Just(HorizontalAlignment::Center),
        Just(HorizontalAlignment::Right),
    ];
    let vertical = prop_oneof![
        Just(VerticalAlignment::Top),
        Just(VerticalAlignment::Middle),
        Just(VerticalAlignment::Bottom),
    ];
    (0usize..8, 0usize..8, horizontal, vertical).prop_map(|(columns, rows, h, v)| {
        GridTemplate::new(columns, rows)
            .horizontal_alignment(h)
            .vertical_alignment(v)
    })
}

proptest! {
    #[test]
    fn template_builds_exact_shape(template in template_strategy()) {
        let grid = template.build().unwrap();

        prop_assert_eq!(grid.cell_count(), template.rows * template.columns);
        prop_assert_eq!(grid.row_count(), template.rows);
        prop_assert_eq!(grid.column_count(), template.columns);
        prop_assert_eq!(grid.template(), template);
        prop_assert!(grid.is_empty());
        for y in 0..=template.rows {
            for x in 0..=template.columns {
                let inside = x < template.columns && y < template.rows;
                match grid.get(x, y) {
                    Ok(cell) => {
                        prop_assert!(inside);
                        prop_assert!(cell.is_none());
                    }
                    Err(_) => prop_assert!(!inside),
                }
            }
        }
    }

    #[test]
    fn overflowing_shape_is_rejected(columns in 2usize..64, rows in (usize::MAX / 2)..=usize::MAX) {
        prop_assert!(GridTemplate::new(columns, rows).build().is_err());
        prop_assert!(Grid::with_shape(rows, columns).is_err());
    }
}
