use blockfall_engine::{GameSession, GameStats, Piece, PieceSource, SessionState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use super::{BoardDisplay, NextPieceDisplay, SessionStatsDisplay, style};
use crate::view::TerminalCanvas;

/// Whole play screen: stats, board and next piece, with a popup over the
/// board when the game is not running.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    canvas: &'a TerminalCanvas,
    stats: &'a GameStats,
    next_piece: Option<&'a Piece>,
    state: SessionState,
    paused: bool,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> SessionDisplay<'a> {
    pub fn new<S>(session: &'a GameSession<S>, canvas: &'a TerminalCanvas) -> Self
    where
        S: PieceSource,
    {
        Self {
            canvas,
            stats: session.stats(),
            next_piece: session.next_piece(),
            state: session.state(),
            paused: false,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }

    pub fn paused(self, paused: bool) -> Self {
        Self { paused, ..self }
    }

    fn popup(&self) -> Option<(&'static str, Style)> {
        match self.state {
            SessionState::Idle => Some(("PRESS ENTER", style::IDLE_POPUP)),
            SessionState::Running if self.paused => Some(("PAUSED", style::PAUSED_POPUP)),
            SessionState::Running => None,
            SessionState::GameOver => Some(("GAME OVER!!", style::GAME_OVER_POPUP)),
        }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block_padding = Padding::symmetric(self.horizontal_padding, self.vertical_padding);
        let border_style = style::border(self.paused, self.state.is_game_over());
        let panel = |title: &'static str| {
            Block::bordered()
                .title(Line::from(title).centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT)
        };

        let game_board = BoardDisplay::new(self.canvas).block(
            Block::bordered()
                .border_style(border_style)
                .style(style::DEFAULT),
        );
        let next_panel = NextPieceDisplay::new(
            self.next_piece,
            self.canvas.cell_width(),
            self.canvas.cell_height(),
        )
        .block(panel("NEXT"));
        let session_stats = SessionStatsDisplay::new(self.stats).block(panel("STATS"));

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(session_stats.width()),
            Constraint::Length(game_board.width()),
            Constraint::Length(next_panel.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(session_stats.height())]).areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);
        let [next_area] =
            Layout::vertical([Constraint::Length(next_panel.height())]).areas(right_column);

        let game_board_width = game_board.width();
        session_stats.render(stats_area, buf);
        game_board.render(board_area, buf);
        next_panel.render(next_area, buf);

        if let Some((text, style)) = self.popup() {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let area =
                board_area.centered(Constraint::Length(game_board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{
        EngineConfig, PieceColor, PieceKind, RenderSink as _, ScriptedPieces,
    };

    use super::*;

    fn draw(session: &GameSession<ScriptedPieces>, paused: bool) -> Buffer {
        let mut canvas = TerminalCanvas::new();
        session.configure_viewport(&mut canvas);
        session.render(&mut canvas);
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        SessionDisplay::new(session, &canvas)
            .paused(paused)
            .render(area, &mut buf);
        buf
    }

    fn contains(buf: &Buffer, text: &str) -> bool {
        (0..buf.area.height).any(|y| {
            let line: String = (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect();
            line.contains(text)
        })
    }

    fn session() -> GameSession<ScriptedPieces> {
        let pieces = ScriptedPieces::new([PieceKind::O]).unwrap();
        GameSession::new(EngineConfig::default(), pieces).unwrap()
    }

    #[test]
    fn test_popups() {
        let mut session = session();
        assert!(contains(&draw(&session, false), "PRESS ENTER"));

        session.start_game();
        let buf = draw(&session, false);
        assert!(!contains(&buf, "PRESS ENTER"));
        assert!(contains(&buf, "NEXT"));
        assert!(contains(&buf, "STATS"));
        assert!(contains(&draw(&session, true), "PAUSED"));

        session.end_game();
        assert!(contains(&draw(&session, false), "GAME OVER!!"));
    }

    #[test]
    fn test_board_shows_canvas() {
        let mut session = session();
        session.start_game();
        let mut canvas = TerminalCanvas::new();
        session.configure_viewport(&mut canvas);
        canvas.clear();
        canvas.paint_cell(0, 19, PieceColor::Blue);
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        SessionDisplay::new(&session, &canvas).render(area, &mut buf);
        let blue = style::piece(PieceColor::Blue).bg;
        assert!(buf.content().iter().any(|cell| cell.style().bg == blue));
    }
}
