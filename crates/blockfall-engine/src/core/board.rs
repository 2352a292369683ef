use arrayvec::ArrayVec;

use super::piece::{Piece, PieceKind};

/// Number of columns on the board.
pub const COLS: usize = 10;
/// Number of rows on the board.
pub const ROWS: usize = 20;

/// A single cell of the board or of a piece shape.
///
/// The integer view of a cell is its [`id`](Self::id): `0` for empty cells and
/// the piece kind id (1..=7) otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Block {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell filled by a piece of the given kind.
    Piece(PieceKind),
}

impl Block {
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Block::Empty)
    }

    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            Block::Empty => 0,
            Block::Piece(kind) => kind.id(),
        }
    }

    /// Converts an integer cell value back into a block.
    ///
    /// Returns `None` for values outside `0..=7`.
    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        if id == 0 {
            return Some(Block::Empty);
        }
        match PieceKind::from_id(id) {
            Some(kind) => Some(Block::Piece(kind)),
            None => None,
        }
    }
}

/// One row of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardRow {
    cells: [Block; COLS],
}

impl BoardRow {
    pub const EMPTY: Self = Self {
        cells: [Block::Empty; COLS],
    };

    #[must_use]
    pub const fn cells(&self) -> &[Block; COLS] {
        &self.cells
    }

    /// A row is full when every cell holds a piece.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }
}

/// The grid of settled cells.
///
/// The board is [`ROWS`]×[`COLS`] for its whole life. It changes only when a
/// piece freezes ([`fill_piece`](Self::fill_piece)) and when full rows are
/// removed ([`clear_full_rows`](Self::clear_full_rows)).
///
/// # Example
///
/// ```
/// use blockfall_engine::{Block, Board, PieceKind};
///
/// let mut board = Board::empty();
/// for x in 0..Board::COLS {
///     board.set(x, Board::ROWS - 1, Block::Piece(PieceKind::I));
/// }
///
/// assert_eq!(board.clear_full_rows(), 1);
/// assert!(board.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [BoardRow; ROWS],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub const COLS: usize = COLS;
    pub const ROWS: usize = ROWS;

    pub const EMPTY: Self = Self {
        rows: [BoardRow::EMPTY; ROWS],
    };

    /// Returns a board with every cell empty.
    #[must_use]
    pub const fn empty() -> Self {
        Self::EMPTY
    }

    #[must_use]
    pub const fn rows(&self) -> &[BoardRow; ROWS] {
        &self.rows
    }

    /// Returns the cell at `(x, y)`, or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, x: i32, y: i32) -> Option<Block> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.rows.get(y)?.cells.get(x).copied()
    }

    /// Overwrites the cell at `(x, y)`. Positions outside the grid are ignored.
    pub fn set(&mut self, x: usize, y: usize, block: Block) {
        if let Some(cell) = self.rows.get_mut(y).and_then(|row| row.cells.get_mut(x)) {
            *cell = block;
        }
    }

    /// Returns `true` if no cell is filled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows
            .iter()
            .all(|row| row.cells.iter().all(|cell| cell.is_empty()))
    }

    /// Returns `(x, y, kind)` of every filled cell, top row first.
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize, PieceKind)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.cells
                .iter()
                .enumerate()
                .filter_map(move |(x, cell)| match cell {
                    Block::Empty => None,
                    Block::Piece(kind) => Some((x, y, *kind)),
                })
        })
    }

    /// Writes every filled cell of the piece into the grid.
    ///
    /// This is what freezing a piece means. Cells outside the grid are
    /// dropped.
    pub fn fill_piece(&mut self, piece: &Piece) {
        let block = Block::Piece(piece.kind());
        for (x, y) in piece.occupied_positions() {
            let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
                continue;
            };
            if let Some(cell) = self.rows.get_mut(y).and_then(|row| row.cells.get_mut(x)) {
                *cell = block;
            }
        }
    }

    /// Splits the board into the rows that are not full and the number of
    /// full rows.
    ///
    /// Surviving rows keep their top-to-bottom order.
    #[must_use]
    pub fn scan_full_rows(&self) -> (ArrayVec<BoardRow, ROWS>, usize) {
        let surviving: ArrayVec<BoardRow, ROWS> =
            self.rows.iter().filter(|row| !row.is_full()).copied().collect();
        let full_row_count = ROWS - surviving.len();
        (surviving, full_row_count)
    }

    /// Rebuilds a full-height board from surviving rows.
    ///
    /// `full_row_count` fresh empty rows are stacked on top of the surviving
    /// rows, which lets everything above a cleared row settle downward.
    ///
    /// # Panics
    ///
    /// Panics if `surviving_rows.len() + full_row_count` is not [`ROWS`].
    #[must_use]
    pub fn compact(surviving_rows: &[BoardRow], full_row_count: usize) -> Self {
        assert_eq!(
            surviving_rows.len() + full_row_count,
            ROWS,
            "compacted board must keep its height"
        );
        let mut rows = [BoardRow::EMPTY; ROWS];
        rows[full_row_count..].copy_from_slice(surviving_rows);
        Self { rows }
    }

    /// Removes full rows and returns how many were removed.
    ///
    /// The grid is replaced as a whole, never patched row by row.
    pub fn clear_full_rows(&mut self) -> usize {
        let (surviving, full_row_count) = self.scan_full_rows();
        if full_row_count > 0 {
            *self = Self::compact(&surviving, full_row_count);
        }
        full_row_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(board: &mut Board, y: usize, kind: PieceKind) {
        for x in 0..COLS {
            board.set(x, y, Block::Piece(kind));
        }
    }

    #[test]
    fn test_empty_board() {
        let board = Board::empty();
        assert_eq!(board.rows().len(), ROWS);
        for row in board.rows() {
            assert_eq!(row.cells().len(), COLS);
            assert!(row.cells().iter().all(|cell| cell.id() == 0));
        }
        assert!(board.is_empty());
        assert_eq!(board.filled_cells().count(), 0);
    }

    #[test]
    fn test_cell_outside_grid() {
        let board = Board::empty();
        assert_eq!(board.cell(0, 0), Some(Block::Empty));
        assert_eq!(board.cell(-1, 0), None);
        assert_eq!(board.cell(0, -1), None);
        assert_eq!(board.cell(10, 0), None);
        assert_eq!(board.cell(0, 20), None);
    }

    #[test]
    fn test_set_outside_grid_is_ignored() {
        let mut board = Board::empty();
        board.set(COLS, 0, Block::Piece(PieceKind::T));
        board.set(0, ROWS, Block::Piece(PieceKind::T));
        assert!(board.is_empty());

        board.set(COLS - 1, ROWS - 1, Block::Piece(PieceKind::T));
        assert_eq!(board.cell(9, 19), Some(Block::Piece(PieceKind::T)));
    }

    #[test]
    fn test_block_ids() {
        assert_eq!(Block::Empty.id(), 0);
        assert_eq!(Block::Piece(PieceKind::Z).id(), 7);
        assert_eq!(Block::from_id(0), Some(Block::Empty));
        assert_eq!(Block::from_id(3), Some(Block::Piece(PieceKind::L)));
        assert_eq!(Block::from_id(8), None);
    }

    #[test]
    fn test_scan_without_full_rows_keeps_order() {
        let mut board = Board::empty();
        // Partial rows with distinct contents so the order is observable.
        for y in 0..ROWS {
            board.set(y % COLS, y, Block::Piece(PieceKind::T));
        }

        let (surviving, count) = board.scan_full_rows();
        assert_eq!(count, 0);
        assert_eq!(surviving.as_slice(), board.rows().as_slice());
    }

    #[test]
    fn test_scan_removes_full_rows() {
        let mut board = Board::empty();
        fill_row(&mut board, 19, PieceKind::I);
        fill_row(&mut board, 17, PieceKind::I);
        board.set(0, 18, Block::Piece(PieceKind::O));

        let (surviving, count) = board.scan_full_rows();
        assert_eq!(count, 2);
        assert_eq!(surviving.len(), ROWS - 2);
        assert_eq!(surviving.last(), Some(&board.rows()[18]));
    }

    #[test]
    fn test_compact_settles_rows() {
        let mut board = Board::empty();
        board.set(3, 17, Block::Piece(PieceKind::S));
        fill_row(&mut board, 18, PieceKind::J);
        board.set(5, 19, Block::Piece(PieceKind::L));

        assert_eq!(board.clear_full_rows(), 1);
        assert_eq!(board.cell(3, 18), Some(Block::Piece(PieceKind::S)));
        assert_eq!(board.cell(5, 19), Some(Block::Piece(PieceKind::L)));
        assert_eq!(board.cell(3, 17), Some(Block::Empty));
        assert_eq!(board.rows()[0], BoardRow::EMPTY);
    }

    #[test]
    fn test_compact_rows_are_independent() {
        let mut board = Board::empty();
        fill_row(&mut board, 18, PieceKind::I);
        fill_row(&mut board, 19, PieceKind::I);
        assert_eq!(board.clear_full_rows(), 2);

        // Writing into one fresh row must not leak into the other.
        board.set(0, 0, Block::Piece(PieceKind::T));
        assert_eq!(board.cell(0, 1), Some(Block::Empty));
    }

    #[test]
    fn test_clear_all_rows() {
        let mut board = Board::empty();
        for y in 0..ROWS {
            fill_row(&mut board, y, PieceKind::Z);
        }
        assert_eq!(board.clear_full_rows(), ROWS);
        assert!(board.is_empty());
    }

    #[test]
    #[should_panic(expected = "compacted board must keep its height")]
    fn test_compact_rejects_wrong_height() {
        let _ = Board::compact(&[BoardRow::EMPTY; 3], 1);
    }

    #[test]
    fn test_fill_piece() {
        let mut board = Board::empty();
        let piece = Piece::spawn(PieceKind::O).translated(0, 18);
        board.fill_piece(&piece);

        let filled: Vec<_> = board.filled_cells().collect();
        assert_eq!(
            filled,
            vec![
                (4, 18, PieceKind::O),
                (5, 18, PieceKind::O),
                (4, 19, PieceKind::O),
                (5, 19, PieceKind::O),
            ]
        );
    }

    #[test]
    fn test_fill_piece_skips_cells_above_top() {
        let mut board = Board::empty();
        let piece = Piece::spawn(PieceKind::J).translated(0, -1);
        board.fill_piece(&piece);

        // Only the bottom row of the J is inside the grid.
        assert_eq!(board.filled_cells().count(), 3);
    }
}
