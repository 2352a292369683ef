use std::iter;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::BlockDisplay;
use crate::view::TerminalCanvas;

/// Draws the painted canvas as the playing field.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    canvas: &'a TerminalCanvas,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(canvas: &'a TerminalCanvas) -> Self {
        Self {
            canvas,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        self.canvas.cols() as u16 * self.canvas.cell_width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        self.canvas.rows() as u16 * self.canvas.cell_height()
            + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let (cell_width, cell_height) = (self.canvas.cell_width(), self.canvas.cell_height());
        let col_constraints = (0..self.canvas.cols()).map(|_| Constraint::Length(cell_width));
        let row_constraints = (0..self.canvas.rows()).map(|_| Constraint::Length(cell_height));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        for (grid_row, row) in iter::zip(grid_cells, self.canvas.grid_rows()) {
            for (grid_cell, color) in iter::zip(grid_row, row) {
                Widget::render(&BlockDisplay::from_color(*color, true), grid_cell, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{PieceColor, RenderSink as _};

    use super::*;

    #[test]
    fn test_size_follows_cell_size() {
        let mut canvas = TerminalCanvas::new();
        canvas.set_viewport(10, 20, 2);
        let board = BoardDisplay::new(&canvas).block(BlockWidget::bordered());
        assert_eq!((board.width(), board.height()), (22, 22));

        canvas.set_viewport(10, 20, 4);
        let board = BoardDisplay::new(&canvas);
        assert_eq!((board.width(), board.height()), (40, 40));
    }

    #[test]
    fn test_paints_cells() {
        let mut canvas = TerminalCanvas::new();
        canvas.set_viewport(10, 20, 2);
        canvas.paint_cell(1, 2, PieceColor::Orange);

        let board = BoardDisplay::new(&canvas);
        let area = Rect::new(0, 0, board.width(), board.height());
        let mut buf = Buffer::empty(area);
        board.render(area, &mut buf);

        let orange = crate::view::widgets::style::piece(PieceColor::Orange).bg;
        assert_eq!(buf[(2, 2)].style().bg, orange);
        assert_eq!(buf[(3, 2)].style().bg, orange);
        assert_ne!(buf[(4, 2)].style().bg, orange);
        assert_ne!(buf[(2, 1)].style().bg, orange);
    }
}
