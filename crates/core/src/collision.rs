//! Collision tests between a shape at a position and the locked board.

use crate::board::Board;
use crate::shapes::Shape;
use crate::types::Position;

/// True if any occupied cell of `shape` anchored at `pos` leaves the board
/// (left, right, bottom or above the top) or lands on a filled cell.
///
/// Pure: depends only on its inputs and never mutates the board.
pub fn collides(board: &Board, shape: &Shape, pos: Position) -> bool {
    shape
        .minos()
        .any(|(dx, dy)| !board.is_valid(pos.x + dx, pos.y + dy))
}

/// Occupancy-only check: true only if some occupied cell of `shape` lands on
/// a filled board cell. Cells outside the board never count.
///
/// On its own this lets a piece slide through an empty wall or floor; the
/// movement operations use [`collides`], which also enforces the extents.
pub fn overlaps_locked(board: &Board, shape: &Shape, pos: Position) -> bool {
    shape
        .minos()
        .any(|(dx, dy)| board.is_occupied(pos.x + dx, pos.y + dy))
}
