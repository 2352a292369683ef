use blockfall_engine::PieceColor;
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use super::style;

/// One board cell drawn as a filled rectangle.
#[derive(Debug)]
pub struct BlockDisplay {
    style: Style,
    symbol: &'static str,
}

impl BlockDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    /// Empty cells show a dot when `show_dots` is set.
    pub const fn from_color(color: Option<PieceColor>, show_dots: bool) -> Self {
        match color {
            None if show_dots => Self::new(style::EMPTY_DOT, "."),
            None => Self::new(style::EMPTY, ""),
            Some(color) => Self::new(style::piece(color), ""),
        }
    }
}

impl Widget for &BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // fill the whole area, not only the symbol
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fills_area() {
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        Widget::render(
            &BlockDisplay::from_color(Some(PieceColor::Green), true),
            area,
            &mut buf,
        );
        for y in 0..2 {
            for x in 0..4 {
                assert_eq!(buf[(x, y)].style().bg, style::piece(PieceColor::Green).bg);
            }
        }
    }

    #[test]
    fn test_empty_dot() {
        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        Widget::render(&BlockDisplay::from_color(None, true), area, &mut buf);
        assert!(buf.content().iter().any(|cell| cell.symbol() == "."));
    }
}
