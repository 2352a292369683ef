use super::{
    board::{Block, Board, COLS, ROWS},
    piece::Piece,
};

/// Decides whether a candidate placement is legal on the board.
///
/// Every filled cell of the candidate must lie between the walls, above the
/// floor, and on an empty board cell. There is no ceiling: cells above the
/// top row count as free, so a piece may stick out of the visible area while
/// it spawns or rotates.
///
/// All movement, rotation and drop steps go through this check before they
/// are committed.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, Piece, PieceKind, is_valid};
///
/// let board = Board::empty();
/// let piece = Piece::spawn(PieceKind::O);
///
/// assert!(is_valid(&piece, &board));
/// assert!(!is_valid(&piece.translated(-5, 0), &board));
/// ```
#[must_use]
pub fn is_valid(candidate: &Piece, board: &Board) -> bool {
    candidate
        .occupied_positions()
        .all(|(x, y)| inside_walls(x) && above_floor(y) && is_free(board, x, y))
}

fn inside_walls(x: i32) -> bool {
    usize::try_from(x).is_ok_and(|x| x < COLS)
}

fn above_floor(y: i32) -> bool {
    usize::try_from(y).map_or(true, |y| y < ROWS)
}

fn is_free(board: &Board, x: i32, y: i32) -> bool {
    y < 0 || board.cell(x, y) == Some(Block::Empty)
}
