use crate::grid::Grid;
use crate::piece::Piece;

/// True if any occupied cell of `piece` leaves the board sideways or through
/// the floor, or lands on a locked cell.
///
/// Cells above the top edge (`y < 0`) only get the horizontal bounds check.
pub fn collides(grid: &Grid, piece: &Piece) -> bool {
    let width = grid.width() as i32;
    let height = grid.height() as i32;

    piece.blocks().any(|(x, y)| {
        x < 0 || x >= width || y >= height || (y >= 0 && grid.is_occupied(x, y))
    })
}
