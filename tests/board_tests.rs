//! Board tests

use blockfall::core::{Board, Shape};
use blockfall::types::{Position, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH, EMPTY, FILLED};

fn full_row() -> [u8; BOARD_WIDTH as usize] {
    [FILLED; BOARD_WIDTH as usize]
}

fn marker_row(marker: u8) -> [u8; BOARD_WIDTH as usize] {
    let mut row = [EMPTY; BOARD_WIDTH as usize];
    row[0] = marker;
    row
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);
    assert_eq!(board.rows().count(), BOARD_HEIGHT as usize);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert!(board.is_valid(x, y), "Cell ({}, {}) should be valid", x, y);
            assert_eq!(board.get(x, y), Some(EMPTY));
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
    assert!(board.is_out_of_bounds(-1, 5));
    assert!(!board.is_out_of_bounds(9, 19));
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new();

    assert!(board.set(5, 10, FILLED));
    assert_eq!(board.get(5, 10), Some(FILLED));
    assert!(board.is_occupied(5, 10));
    assert!(!board.is_valid(5, 10));

    assert!(board.set(5, 10, EMPTY));
    assert!(board.is_valid(5, 10));

    assert!(!board.set(-1, 0, FILLED));
    assert!(!board.set(0, BOARD_HEIGHT as i8, FILLED));
}

#[test]
fn test_is_row_full() {
    let mut board = Board::new();
    for x in 0..BOARD_WIDTH as i8 - 1 {
        board.set(x, 19, FILLED);
    }
    assert!(!board.is_row_full(19));

    board.set(BOARD_WIDTH as i8 - 1, 19, FILLED);
    assert!(board.is_row_full(19));
    assert!(!board.is_row_full(BOARD_HEIGHT as usize));
}

#[test]
fn test_clear_nothing_when_no_row_full() {
    let mut board = Board::from_rows(&[marker_row(1), marker_row(2)]);
    let before = board.clone();

    assert!(board.clear_full_rows().is_empty());
    assert_eq!(board, before);
}

#[test]
fn test_clear_scattered_rows_preserves_order() {
    // Rows 3, 7 and 12 full; every other row tagged with its own marker.
    let mut rows = Vec::new();
    for y in 0..BOARD_HEIGHT as usize {
        if [3, 7, 12].contains(&y) {
            rows.push(full_row());
        } else {
            rows.push(marker_row(y as u8 + 1));
        }
    }
    let mut board = Board::from_rows(&rows);

    let cleared = board.clear_full_rows();
    assert_eq!(cleared.as_slice(), &[3, 7, 12]);
    assert_eq!(board.rows().count(), BOARD_HEIGHT as usize);

    // Three fresh empty rows on top
    for y in 0..3 {
        assert!(board.row(y).iter().all(|&c| c == EMPTY), "row {} not empty", y);
    }

    // Survivors keep their relative order
    let survivors: Vec<u8> = (3..BOARD_HEIGHT as usize).map(|y| board.row(y)[0]).collect();
    let expected: Vec<u8> = (0..BOARD_HEIGHT as usize)
        .filter(|y| ![3, 7, 12].contains(y))
        .map(|y| y as u8 + 1)
        .collect();
    assert_eq!(survivors, expected);
}

#[test]
fn test_clear_four_adjacent_rows() {
    let mut rows = vec![[EMPTY; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
    for row in rows.iter_mut().skip(16) {
        *row = full_row();
    }
    rows[15] = marker_row(9);
    let mut board = Board::from_rows(&rows);

    let cleared = board.clear_full_rows();
    assert_eq!(cleared.len(), 4);
    assert_eq!(board.get(0, 19), Some(9));
    assert_eq!(board.filled_count(), 1);
}

#[test]
fn test_clear_entire_board() {
    let rows = vec![full_row(); BOARD_HEIGHT as usize];
    let mut board = Board::from_rows(&rows);

    assert_eq!(board.clear_full_rows().len(), BOARD_HEIGHT as usize);
    assert_eq!(board, Board::new());
}

#[test]
fn test_lock_shape_marks_only_piece_cells() {
    let mut board = Board::from_rows(&[marker_row(5)]);
    let before = board.clone();
    let shape = Shape::template(ShapeKind::S);
    let pos = Position::new(3, 10);

    assert!(board.lock_shape(&shape, pos));

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            let in_piece = shape
                .minos()
                .any(|(dx, dy)| (pos.x + dx, pos.y + dy) == (x, y));
            if in_piece {
                assert_ne!(board.get(x, y), Some(EMPTY));
            } else {
                assert_eq!(board.get(x, y), before.get(x, y));
            }
        }
    }
}

#[test]
fn test_lock_shape_out_of_bounds_rejected() {
    let mut board = Board::new();
    let shape = Shape::template(ShapeKind::I);

    assert!(!board.lock_shape(&shape, Position::new(7, 0)));
    assert!(!board.lock_shape(&shape, Position::new(0, 20)));
    assert_eq!(board.filled_count(), 0);
}

#[test]
fn test_board_clear() {
    let mut board = Board::new();
    board.set(0, 0, FILLED);
    board.set(9, 19, FILLED);
    board.clear();
    assert_eq!(board.filled_count(), 0);
}
