use blockfall_engine::{PieceColor, RenderSink};

/// Off-screen grid the game session paints into.
///
/// The session repaints the whole frame after each committed change; widgets
/// then read the grid when the terminal is drawn. Cells painted outside the
/// viewport are dropped.
#[derive(Debug, Clone, Default)]
pub struct TerminalCanvas {
    cols: usize,
    rows: usize,
    cell_size: u16,
    cells: Vec<Option<PieceColor>>,
}

impl TerminalCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Terminal columns per board cell.
    pub fn cell_width(&self) -> u16 {
        self.cell_size.max(1)
    }

    /// Terminal rows per board cell.
    ///
    /// Terminal glyphs are about twice as tall as wide, so a cell uses half
    /// as many rows as columns.
    pub fn cell_height(&self) -> u16 {
        self.cell_size.div_ceil(2).max(1)
    }

    pub fn grid_rows(&self) -> impl Iterator<Item = &[Option<PieceColor>]> {
        self.cells.chunks(self.cols.max(1))
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.cols && y < self.rows).then(|| y * self.cols + x)
    }
}

impl RenderSink for TerminalCanvas {
    fn paint_cell(&mut self, x: i32, y: i32, color: PieceColor) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = Some(color);
        }
    }

    fn clear(&mut self) {
        self.cells.fill(None);
    }

    fn set_viewport(&mut self, cols: usize, rows: usize, cell_size: u16) {
        self.cols = cols;
        self.rows = rows;
        self.cell_size = cell_size;
        self.cells = vec![None; cols * rows];
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{Command, EngineConfig, GameSession, RandomPieces};

    use super::*;

    fn cell(canvas: &TerminalCanvas, x: usize, y: usize) -> Option<PieceColor> {
        canvas.grid_rows().nth(y).and_then(|row| row.get(x).copied().flatten())
    }

    #[test]
    fn test_paint_and_clear() {
        let mut canvas = TerminalCanvas::new();
        canvas.set_viewport(10, 20, 2);
        canvas.paint_cell(3, 4, PieceColor::Cyan);
        assert_eq!(cell(&canvas, 3, 4), Some(PieceColor::Cyan));
        assert_eq!(cell(&canvas, 4, 3), None);

        canvas.clear();
        assert!(canvas.grid_rows().flatten().all(Option::is_none));
        assert_eq!(canvas.grid_rows().count(), 20);
    }

    #[test]
    fn test_out_of_viewport_is_dropped() {
        let mut canvas = TerminalCanvas::new();
        canvas.set_viewport(10, 20, 2);
        canvas.paint_cell(-1, 0, PieceColor::Red);
        canvas.paint_cell(10, 0, PieceColor::Red);
        canvas.paint_cell(0, -2, PieceColor::Red);
        canvas.paint_cell(0, 20, PieceColor::Red);
        assert!(canvas.grid_rows().flatten().all(Option::is_none));
        assert_eq!(cell(&canvas, 10, 0), None);
    }

    #[test]
    fn test_cell_size() {
        let mut canvas = TerminalCanvas::new();
        canvas.set_viewport(10, 20, 2);
        assert_eq!((canvas.cell_width(), canvas.cell_height()), (2, 1));
        canvas.set_viewport(10, 20, 4);
        assert_eq!((canvas.cell_width(), canvas.cell_height()), (4, 2));
        canvas.set_viewport(10, 20, 1);
        assert_eq!((canvas.cell_width(), canvas.cell_height()), (1, 1));
    }

    #[test]
    fn test_session_renders_into_canvas() {
        let mut session =
            GameSession::new(EngineConfig::default(), RandomPieces::seeded(3)).unwrap();
        let mut canvas = TerminalCanvas::new();
        session.configure_viewport(&mut canvas);
        assert_eq!((canvas.cols(), canvas.rows()), (10, 20));

        session.start_game();
        session.apply_command(Command::HardDrop);
        session.render(&mut canvas);
        let painted = canvas.grid_rows().flatten().filter(|c| c.is_some()).count();
        assert_eq!(painted, 4);
        let color = session.active_piece().unwrap().color();
        assert!(canvas.grid_rows().flatten().flatten().all(|&c| c == color));
    }
}
