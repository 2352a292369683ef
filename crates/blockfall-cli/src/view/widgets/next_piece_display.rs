use blockfall_engine::Piece;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::BlockDisplay;

/// Preview of the next piece, centered in a 4×4 box.
#[derive(Debug)]
pub struct NextPieceDisplay<'a> {
    piece: Option<&'a Piece>,
    cell_width: u16,
    cell_height: u16,
    block: Option<BlockWidget<'a>>,
}

impl<'a> NextPieceDisplay<'a> {
    const BOX_CELLS: u16 = 4;

    pub fn new(piece: Option<&'a Piece>, cell_width: u16, cell_height: u16) -> Self {
        Self {
            piece,
            cell_width,
            cell_height,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        Self::BOX_CELLS * self.cell_width + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        Self::BOX_CELLS * self.cell_height + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for NextPieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let Some(piece) = self.piece else {
            return;
        };
        let shape = piece.shape();
        #[expect(clippy::cast_possible_truncation)]
        let size = shape.size() as u16;
        let piece_area = area.centered(
            Constraint::Length(size * self.cell_width),
            Constraint::Length(size * self.cell_height),
        );

        let col_constraints = (0..size).map(|_| Constraint::Length(self.cell_width));
        let row_constraints = (0..size).map(|_| Constraint::Length(self.cell_height));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);
        let grid_rows = piece_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        let filled = BlockDisplay::from_color(Some(piece.color()), false);
        let empty = BlockDisplay::from_color(None, false);
        for (grid_row, shape_row) in grid_rows.zip(shape.rows()) {
            for (grid_cell, block) in grid_row.into_iter().zip(shape_row) {
                let display = if block.is_empty() { &empty } else { &filled };
                Widget::render(display, grid_cell, buf);
            }
        }
    }
}
