use crate::core::PieceColor;

/// Destination for drawing the game, implemented by front-ends.
///
/// Coordinates are board cells, not pixels: `(0, 0)` is the top-left cell and
/// `y` grows downward. A piece may report cells above the top row (`y < 0`);
/// sinks are expected to ignore anything outside their viewport.
///
/// A frame is drawn as one [`clear`](Self::clear) followed by any number of
/// [`paint_cell`](Self::paint_cell) calls.
pub trait RenderSink {
    /// Paints one unit cell.
    fn paint_cell(&mut self, x: i32, y: i32, color: PieceColor);

    /// Erases everything painted since the last clear.
    fn clear(&mut self);

    /// Announces the size of the grid and the size of one cell in the sink's own units.
    fn set_viewport(&mut self, cols: usize, rows: usize, cell_size: u16);
}
