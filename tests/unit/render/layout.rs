use super::*;

#[test]
fn every_character_is_placed_exactly_once() {
    for len in 1..=6usize {
        let grid = layout_grid(len, 100, 6);
        assert_eq!(grid.cells.len(), len, "len={len}");

        let mut positions = std::collections::HashSet::new();
        for (i, cell) in grid.cells.iter().enumerate() {
            assert_eq!(cell.index, i);
            assert!(cell.col < grid.cols);
            assert!(cell.row < grid.rows);
            assert!(positions.insert((cell.row, cell.col)), "len={len} overlaps");
        }

        let expected_rows = if len >= 3 { 2 } else { 1 };
        assert_eq!(grid.rows, expected_rows, "len={len}");
        assert_eq!(grid.is_double_row(), len >= 3);
    }
}

#[test]
fn double_row_puts_ceil_half_in_first_row() {
    let grid = layout_grid(5, 100, 0);
    assert_eq!(grid.cols, 3);
    let first_row = grid.cells.iter().filter(|c| c.row == 0).count();
    let second_row = grid.cells.iter().filter(|c| c.row == 1).count();
    assert_eq!((first_row, second_row), (3, 2));
    assert_eq!(grid.cell_height, 50.0);
}

#[test]
fn baba_is_two_by_two() {
    let grid = layout_grid(4, 100, 6);
    assert_eq!((grid.rows, grid.cols), (2, 2));
    assert_eq!(grid.cell_width, 50.0);
    assert_eq!(grid.cell_height, 50.0);
    assert_eq!(grid.cells[0].center, Point::new(31.0, 31.0));
    assert_eq!(grid.cells[1].center, Point::new(81.0, 31.0));
    assert_eq!(grid.cells[2].center, Point::new(31.0, 81.0));
    assert_eq!(grid.cells[3].center, Point::new(81.0, 81.0));
}

#[test]
fn single_character_is_centered_in_usable_area() {
    let grid = layout_grid(1, 100, 6);
    assert_eq!((grid.rows, grid.cols), (1, 1));
    assert_eq!(grid.cell_width, 100.0);
    assert_eq!(grid.cell_height, 100.0);
    assert_eq!(grid.cells[0].center, Point::new(56.0, 56.0));
}

#[test]
fn two_characters_use_square_cells_in_one_row() {
    let grid = layout_grid(2, 100, 0);
    assert_eq!((grid.rows, grid.cols), (1, 2));
    assert_eq!(grid.cell_height, grid.cell_width);
    assert_eq!(grid.cells[0].center, Point::new(25.0, 25.0));
    assert_eq!(grid.cells[1].center, Point::new(75.0, 25.0));
}

#[test]
fn empty_text_has_no_cells() {
    let grid = layout_grid(0, 100, 6);
    assert_eq!(grid.rows, 0);
    assert!(grid.cells.is_empty());
}

#[test]
fn ceil_sqrt_matches_float_ceil() {
    for n in 0..200usize {
        assert_eq!(ceil_sqrt(n), (n as f64).sqrt().ceil() as usize, "n={n}");
    }
}
