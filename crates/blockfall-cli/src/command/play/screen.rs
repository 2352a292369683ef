use std::time::Duration;

use blockfall_engine::{GameSession, PieceSource, SessionState};
use crossterm::event::Event;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use crate::{
    input::InputCommand,
    view::{
        TerminalCanvas,
        widgets::{HelpDisplay, SessionDisplay},
    },
};

/// Interactive play screen.
///
/// Owns the session and the canvas it paints into. Pausing is handled here:
/// a paused screen stops forwarding ticks and game commands, so the session
/// itself never needs a paused state.
#[derive(Debug)]
pub struct PlayScreen<S> {
    session: GameSession<S>,
    canvas: TerminalCanvas,
    paused: bool,
    is_exiting: bool,
}

impl<S> PlayScreen<S>
where
    S: PieceSource,
{
    pub fn new(session: GameSession<S>) -> Self {
        let mut canvas = TerminalCanvas::new();
        session.configure_viewport(&mut canvas);
        session.render(&mut canvas);
        Self {
            session,
            canvas,
            paused: false,
            is_exiting: false,
        }
    }

    pub fn session(&self) -> &GameSession<S> {
        &self.session
    }

    pub fn is_exiting(&self) -> bool {
        self.is_exiting
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    fn is_playing(&self) -> bool {
        self.session.state().is_running() && !self.paused
    }

    /// Applies a decoded input command. Returns `true` if the screen changed.
    pub fn handle_command(&mut self, command: InputCommand) -> bool {
        let changed = match command {
            InputCommand::Game(command) if self.is_playing() => {
                self.session.apply_command(command)
            }
            InputCommand::Game(_) => false,
            InputCommand::Play => {
                if self.session.state().is_running() {
                    return false;
                }
                self.paused = false;
                self.session.start_game();
                true
            }
            InputCommand::Pause => {
                if !self.session.state().is_running() {
                    return false;
                }
                self.paused = !self.paused;
                tracing::debug!(paused = self.paused, "pause toggled");
                true
            }
            InputCommand::Quit => {
                if !self.session.state().is_running() {
                    return false;
                }
                self.paused = false;
                self.session.end_game();
                true
            }
            InputCommand::Exit => {
                self.is_exiting = true;
                false
            }
        };
        if changed {
            self.repaint();
        }
        changed
    }

    pub fn handle_event(&mut self, event: &Event) {
        if let Some(command) = InputCommand::from_event(event) {
            self.handle_command(command);
        }
    }

    /// Feeds elapsed frame time to the session. Returns `true` if a gravity
    /// step happened.
    pub fn update(&mut self, elapsed: Duration) -> bool {
        if !self.is_playing() {
            return false;
        }
        let stepped = self.session.tick(elapsed).is_some();
        if stepped {
            self.repaint();
        }
        stepped
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let session_display =
            SessionDisplay::new(&self.session, &self.canvas).paused(self.is_paused());
        let help = match self.session.state() {
            SessionState::Idle => HelpDisplay::Idle,
            SessionState::Running if self.is_paused() => HelpDisplay::Paused,
            SessionState::Running => HelpDisplay::Running,
            SessionState::GameOver => HelpDisplay::GameOver,
        };

        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(help, help_area);
    }

    fn repaint(&mut self) {
        self.session.render(&mut self.canvas);
    }
}
