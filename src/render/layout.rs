//! Character grid layout.
//!
//! Three or more characters always fill exactly two rows: the first row takes
//! `ceil(n / 2)` characters and the second the rest. Fewer characters sit in a single row of
//! `ceil(sqrt(n))` square cells.

use kurbo::Point;

/// Placement of one character inside the grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridCell {
    /// Index of the character in the source sequence.
    pub index: usize,
    /// Row, 0-based.
    pub row: usize,
    /// Column, 0-based.
    pub col: usize,
    /// Cell center in frame pixel space (padding included).
    pub center: Point,
}

/// Result of [`layout_grid`].
#[derive(Clone, Debug, PartialEq)]
pub struct GridLayout {
    /// Number of rows that hold at least one character (0, 1 or 2).
    pub rows: usize,
    /// Columns per row.
    pub cols: usize,
    /// Cell width in pixels.
    pub cell_width: f64,
    /// Cell height in pixels.
    pub cell_height: f64,
    /// One entry per character, in source order.
    pub cells: Vec<GridCell>,
}

impl GridLayout {
    /// Whether the text was split over two rows.
    pub fn is_double_row(&self) -> bool {
        self.rows == 2
    }
}

/// Lay out `count` characters inside a square drawing area of side `extent`, offset by `padding`.
pub fn layout_grid(count: usize, extent: u32, padding: u32) -> GridLayout {
    let extent = f64::from(extent);
    let pad = f64::from(padding);

    if count == 0 {
        return GridLayout {
            rows: 0,
            cols: 0,
            cell_width: extent,
            cell_height: extent,
            cells: Vec::new(),
        };
    }

    let double_row = count >= 3;
    let cols = if double_row {
        count.div_ceil(2)
    } else {
        ceil_sqrt(count)
    };
    let cell_width = extent / cols as f64;
    let cell_height = if double_row { extent / 2.0 } else { cell_width };

    let cells = (0..count)
        .map(|index| {
            let (row, col) = if double_row {
                (index / cols, index % cols)
            } else {
                (0, index)
            };
            GridCell {
                index,
                row,
                col,
                center: Point::new(
                    pad + (col as f64 + 0.5) * cell_width,
                    pad + (row as f64 + 0.5) * cell_height,
                ),
            }
        })
        .collect();

    GridLayout {
        rows: if double_row { 2 } else { 1 },
        cols,
        cell_width,
        cell_height,
        cells,
    }
}

fn ceil_sqrt(n: usize) -> usize {
    let mut k = 0usize;
    while k * k < n {
        k += 1;
    }
    k
}

#[cfg(test)]
#[path = "../../tests/unit/render/layout.rs"]
mod tests;
