use rand::{Rng, distr::StandardUniform, prelude::Distribution};

use crate::{core::board::Block, render::RenderSink};

/// A falling piece with position, shape, and type.
///
/// Pieces are values: movement and rotation return new `Piece` instances and
/// never touch the receiver. The engine builds a candidate this way, checks it
/// with [`is_valid`](crate::is_valid), and only then replaces its active piece.
///
/// # Coordinate System
///
/// - Position is the top-left corner of the shape's bounding box
/// - `(0, 0)` is the top-left cell of the board, `y` grows downward
/// - Coordinates are signed so that candidates may leave the board; validity
///   is decided separately
///
/// # Example
///
/// ```
/// use blockfall_engine::{Piece, PieceKind};
///
/// let piece = Piece::spawn(PieceKind::T);
/// let moved = piece.right();
/// let rotated = moved.rotated();
///
/// assert_eq!(rotated.position(), moved.position());
/// assert_eq!(piece.position().x(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    position: PiecePosition,
    shape: PieceShape,
    kind: PieceKind,
}

impl Piece {
    /// Creates a piece of the given kind at its spawn position.
    #[must_use]
    pub const fn spawn(kind: PieceKind) -> Self {
        Self {
            position: PiecePosition::new(kind.spawn_x(), PIECE_SPAWN_Y),
            shape: kind.shape(),
            kind,
        }
    }

    #[must_use]
    pub const fn position(&self) -> PiecePosition {
        self.position
    }

    #[must_use]
    pub const fn shape(&self) -> &PieceShape {
        &self.shape
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn color(&self) -> PieceColor {
        self.kind.color()
    }

    /// Returns the board coordinates of every filled cell.
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let PiecePosition { x, y } = self.position;
        self.shape
            .occupied_cells()
            .map(move |(dx, dy)| (x + dx as i32, y + dy as i32))
    }

    /// Returns the piece offset by `(dx, dy)` with the shape unchanged.
    #[must_use]
    pub const fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            position: PiecePosition::new(self.position.x + dx, self.position.y + dy),
            shape: self.shape,
            kind: self.kind,
        }
    }

    #[must_use]
    pub const fn left(&self) -> Self {
        self.translated(-1, 0)
    }

    #[must_use]
    pub const fn right(&self) -> Self {
        self.translated(1, 0)
    }

    #[must_use]
    pub const fn down(&self) -> Self {
        self.translated(0, 1)
    }

    /// Returns the piece rotated 90° clockwise around its own bounding box.
    ///
    /// The position is kept as is. No wall or floor kick is attempted: a
    /// rotation that does not fit is simply rejected by the caller.
    #[must_use]
    pub const fn rotated(&self) -> Self {
        Self {
            position: self.position,
            shape: self.shape.rotated_right(),
            kind: self.kind,
        }
    }

    /// Paints every filled cell of the piece at its board position.
    pub fn render<S>(&self, sink: &mut S)
    where
        S: RenderSink + ?Sized,
    {
        let color = self.color();
        for (x, y) in self.occupied_positions() {
            sink.paint_cell(x, y, color);
        }
    }
}

/// Spawn row shared by every piece kind.
pub const PIECE_SPAWN_Y: i32 = 0;

/// Position of a piece's bounding box on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PiecePosition {
    x: i32,
    y: i32,
}

impl PiecePosition {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn x(self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(self) -> i32 {
        self.y
    }
}

/// Square matrix describing which cells of a piece are filled.
///
/// Storage is always 4×4; only the top-left `size`×`size` block is
/// meaningful, and everything outside it stays empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceShape {
    size: u8,
    cells: [[Block; 4]; 4],
}

impl PieceShape {
    /// Side length of the square matrix (2, 3 or 4).
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size as usize
    }

    /// Returns the cell at `(x, y)` inside the matrix.
    ///
    /// Cells outside the matrix are reported as empty.
    #[must_use]
    pub const fn cell(&self, x: usize, y: usize) -> Block {
        if x < self.size() && y < self.size() {
            self.cells[y][x]
        } else {
            Block::Empty
        }
    }

    /// Returns the rows of the matrix, each `size` cells long.
    pub fn rows(&self) -> impl Iterator<Item = &[Block]> {
        let size = self.size();
        self.cells[..size].iter().map(move |row| &row[..size])
    }

    /// Returns `(dx, dy)` of every filled cell, row by row.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows().enumerate().flat_map(|(dy, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, cell)| !cell.is_empty())
                .map(move |(dx, _)| (dx, dy))
        })
    }

    /// Rotates the matrix 90° clockwise: transpose, then reverse each row.
    #[must_use]
    pub const fn rotated_right(&self) -> Self {
        let size = self.size();
        let mut cells = [[Block::Empty; 4]; 4];
        let mut y = 0;
        while y < size {
            let mut x = 0;
            while x < size {
                cells[y][x] = self.cells[size - 1 - x][y];
                x += 1;
            }
            y += 1;
        }
        Self {
            size: self.size,
            cells,
        }
    }

    /// Checks the invariants every entry of the shape table must satisfy.
    const fn is_well_formed(&self, kind: PieceKind) -> bool {
        if self.size < 2 || self.size > 4 {
            return false;
        }
        let size = self.size();
        let mut filled = 0;
        let mut y = 0;
        while y < 4 {
            let mut x = 0;
            while x < 4 {
                if let Block::Piece(cell_kind) = self.cells[y][x] {
                    if x >= size || y >= size || cell_kind as u8 != kind as u8 {
                        return false;
                    }
                    filled += 1;
                }
                x += 1;
            }
            y += 1;
        }
        filled > 0
    }
}

/// Type of a piece.
///
/// The discriminant is the integer id stored on the board; `0` is reserved
/// for empty cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[repr(u8)]
pub enum PieceKind {
    /// 4×4 horizontal bar.
    I = 1,
    /// 3×3 J.
    J = 2,
    /// 3×3 L.
    L = 3,
    /// 2×2 square.
    O = 4,
    /// 3×3 S.
    S = 5,
    /// 3×3 T.
    T = 6,
    /// 3×3 Z.
    Z = 7,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        match rng.random_range(1..=7) {
            1 => PieceKind::I,
            2 => PieceKind::J,
            3 => PieceKind::L,
            4 => PieceKind::O,
            5 => PieceKind::S,
            6 => PieceKind::T,
            _ => PieceKind::Z,
        }
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Returns the integer id of this kind (1..=7).
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Looks up a kind by its integer id.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_id(4), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_id(0), None);
    /// assert_eq!(PieceKind::from_id(8), None);
    /// ```
    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::J),
            3 => Some(PieceKind::L),
            4 => Some(PieceKind::O),
            5 => Some(PieceKind::S),
            6 => Some(PieceKind::T),
            7 => Some(PieceKind::Z),
            _ => None,
        }
    }

    #[must_use]
    pub const fn shape(self) -> PieceShape {
        PIECE_SHAPES[self as usize - 1]
    }

    #[must_use]
    pub const fn color(self) -> PieceColor {
        match self {
            PieceKind::I => PieceColor::Cyan,
            PieceKind::J => PieceColor::Blue,
            PieceKind::L => PieceColor::Orange,
            PieceKind::O => PieceColor::Yellow,
            PieceKind::S => PieceColor::Green,
            PieceKind::T => PieceColor::Purple,
            PieceKind::Z => PieceColor::Red,
        }
    }

    /// Column of the bounding box's left edge when the piece spawns.
    ///
    /// The 2×2 square starts one column further right so that it sits in the
    /// middle of a 10-wide board.
    #[must_use]
    pub const fn spawn_x(self) -> i32 {
        match self {
            PieceKind::O => 4,
            _ => 3,
        }
    }
}

/// Display color of a piece kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PieceColor {
    #[display("cyan")]
    Cyan,
    #[display("blue")]
    Blue,
    #[display("orange")]
    Orange,
    #[display("yellow")]
    Yellow,
    #[display("green")]
    Green,
    #[display("purple")]
    Purple,
    #[display("red")]
    Red,
}

const PIECE_SHAPES: [PieceShape; PieceKind::LEN] = {
    use Block::Empty as E;
    const I: Block = Block::Piece(PieceKind::I);
    const J: Block = Block::Piece(PieceKind::J);
    const L: Block = Block::Piece(PieceKind::L);
    const O: Block = Block::Piece(PieceKind::O);
    const S: Block = Block::Piece(PieceKind::S);
    const T: Block = Block::Piece(PieceKind::T);
    const Z: Block = Block::Piece(PieceKind::Z);
    const EEEE: [Block; 4] = [E; 4];

    const fn shape(size: u8, cells: [[Block; 4]; 4]) -> PieceShape {
        PieceShape { size, cells }
    }

    [
        shape(4, [EEEE, [I, I, I, I], EEEE, EEEE]),
        shape(3, [[J, E, E, E], [J, J, J, E], EEEE, EEEE]),
        shape(3, [[E, E, L, E], [L, L, L, E], EEEE, EEEE]),
        shape(2, [[O, O, E, E], [O, O, E, E], EEEE, EEEE]),
        shape(3, [[E, S, S, E], [S, S, E, E], EEEE, EEEE]),
        shape(3, [[E, T, E, E], [T, T, T, E], EEEE, EEEE]),
        shape(3, [[Z, Z, E, E], [E, Z, Z, E], EEEE, EEEE]),
    ]
};

// A malformed table must never reach a running game.
const _: () = {
    let mut i = 0;
    while i < PieceKind::LEN {
        let kind = PieceKind::ALL[i];
        assert!(kind as usize == i + 1);
        assert!(PIECE_SHAPES[i].is_well_formed(kind));
        i += 1;
    }
};
