use crate::core::Piece;

/// A player command, already decoded from whatever input device produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Command {
    Left,
    Right,
    SoftDrop,
    Rotate,
    HardDrop,
}

impl Command {
    /// Returns the candidate piece this command proposes.
    ///
    /// For [`Command::HardDrop`] this is only the first row of the drop; the
    /// session repeats it until the piece comes to rest.
    #[must_use]
    pub const fn candidate(self, piece: &Piece) -> Piece {
        match self {
            Command::Left => piece.left(),
            Command::Right => piece.right(),
            Command::SoftDrop | Command::HardDrop => piece.down(),
            Command::Rotate => piece.rotated(),
        }
    }
}
