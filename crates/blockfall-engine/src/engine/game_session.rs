use std::time::Duration;

use crate::{
    config::{ConfigError, EngineConfig},
    core::{Board, COLS, PIECE_SPAWN_Y, Piece, ROWS, is_valid},
    render::RenderSink,
};

use super::{
    command::Command,
    game_stats::{GameStats, SessionReadout},
    gravity_clock::GravityClock,
    piece_source::{PieceSource, RandomPieces},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    /// No game has been started yet.
    Idle,
    /// A piece is falling and commands are accepted.
    Running,
    /// The stack reached the top. Only [`GameSession::start_game`] leaves this state.
    GameOver,
}

/// Result of one drop step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum DropOutcome {
    /// The active piece moved down one row.
    Moved,
    /// The active piece froze and the next piece took its place.
    Locked { cleared_lines: usize },
    /// The active piece froze without leaving the spawn row; the game is over.
    ToppedOut { cleared_lines: usize },
}

/// A game from start to game over.
///
/// The session exclusively owns the board, the active piece, and the next
/// piece. Every change goes through the same path: build a candidate, check
/// it with [`is_valid`], then replace the active piece as a whole or freeze it.
///
/// Time is fed in by the caller through [`tick`](Self::tick), so the session
/// runs the same under a real frame loop and under tests.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::{Command, EngineConfig, GameSession, RandomPieces};
///
/// let mut session = GameSession::new(EngineConfig::default(), RandomPieces::seeded(1))?;
/// session.start_game();
///
/// session.apply_command(Command::Left);
/// session.apply_command(Command::Rotate);
/// session.apply_command(Command::HardDrop);
///
/// // The resting piece freezes on the next gravity step.
/// assert!(session.tick(Duration::from_millis(1001)).unwrap().is_locked());
/// assert!(session.stats().score() > 0);
/// # Ok::<(), blockfall_engine::ConfigError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GameSession<S = RandomPieces> {
    config: EngineConfig,
    source: S,
    board: Board,
    active_piece: Option<Piece>,
    next_piece: Option<Piece>,
    stats: GameStats,
    clock: GravityClock,
    state: SessionState,
}

impl<S> GameSession<S>
where
    S: PieceSource,
{
    /// Creates an idle session after checking the configuration.
    pub fn new(config: EngineConfig, source: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            source,
            board: Board::empty(),
            active_piece: None,
            next_piece: None,
            stats: GameStats::new(),
            clock: GravityClock::new(),
            state: SessionState::Idle,
        })
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the piece under player control, if a game has been started.
    #[must_use]
    pub fn active_piece(&self) -> Option<&Piece> {
        self.active_piece.as_ref()
    }

    #[must_use]
    pub fn next_piece(&self) -> Option<&Piece> {
        self.next_piece.as_ref()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn readout(&self) -> SessionReadout {
        self.stats.readout()
    }

    /// Returns the gravity interval of the current level.
    #[must_use]
    pub fn gravity_interval(&self) -> Duration {
        self.config.gravity_interval(self.stats.level())
    }

    /// Starts a new game, discarding any game in progress.
    ///
    /// A pending gravity step of the previous game is cancelled first, so it
    /// can never fire against the fresh board.
    pub fn start_game(&mut self) {
        self.clock.cancel();
        self.board = Board::empty();
        self.stats = GameStats::new();
        self.next_piece = Some(self.spawn());
        self.active_piece = Some(self.spawn());
        self.clock.arm(self.gravity_interval());
        self.state = SessionState::Running;
        tracing::info!(
            gravity_ms = self.gravity_interval().as_millis(),
            "game started"
        );
    }

    /// Ends a running game immediately.
    pub fn end_game(&mut self) {
        if !self.state.is_running() {
            return;
        }
        self.game_over();
    }

    /// Applies a player command to the active piece.
    ///
    /// Returns `true` if the active piece changed. Invalid candidates are
    /// ignored, and so is every command outside [`SessionState::Running`].
    /// Rotations are never shifted away from walls or the floor to make them
    /// fit.
    ///
    /// A hard drop moves the piece down until the next row would be invalid
    /// and leaves it there; the following gravity step freezes it.
    pub fn apply_command(&mut self, command: Command) -> bool {
        if !self.state.is_running() {
            return false;
        }
        let Some(piece) = self.active_piece else {
            return false;
        };

        match command {
            Command::HardDrop => {
                let mut piece = piece;
                let mut rows = 0;
                loop {
                    let candidate = command.candidate(&piece);
                    if !is_valid(&candidate, &self.board) {
                        break;
                    }
                    piece = candidate;
                    rows += 1;
                    self.award_drop_bonus(self.config.hard_drop_points);
                }
                self.active_piece = Some(piece);
                rows > 0
            }
            Command::Left | Command::Right | Command::SoftDrop | Command::Rotate => {
                let candidate = command.candidate(&piece);
                if !is_valid(&candidate, &self.board) {
                    return false;
                }
                self.active_piece = Some(candidate);
                if command == Command::SoftDrop {
                    self.award_drop_bonus(self.config.soft_drop_points);
                }
                true
            }
        }
    }

    /// Advances the game clock and performs a drop step when one is due.
    ///
    /// Does nothing outside [`SessionState::Running`].
    pub fn tick(&mut self, elapsed: Duration) -> Option<DropOutcome> {
        if !self.state.is_running() {
            return None;
        }
        self.stats.add_play_time(elapsed);
        if !self.clock.advance(elapsed) {
            return None;
        }
        self.drop_step()
    }

    /// Moves the active piece down one row, or freezes it if it cannot move.
    ///
    /// Freezing writes the piece into the board, clears full rows, and
    /// updates score and level. A piece that freezes on the spawn row ends
    /// the game; otherwise the next piece becomes active and a new next piece
    /// is drawn.
    pub fn drop_step(&mut self) -> Option<DropOutcome> {
        if !self.state.is_running() {
            return None;
        }
        let piece = self.active_piece?;

        let candidate = piece.down();
        if is_valid(&candidate, &self.board) {
            self.active_piece = Some(candidate);
            return Some(DropOutcome::Moved);
        }

        let cleared_lines = self.freeze(&piece);
        if piece.position().y() <= PIECE_SPAWN_Y {
            self.game_over();
            return Some(DropOutcome::ToppedOut { cleared_lines });
        }

        self.active_piece = self.next_piece.take();
        self.next_piece = Some(self.spawn());
        Some(DropOutcome::Locked { cleared_lines })
    }

    /// Draws the board and the active piece.
    ///
    /// The sink is cleared first. Board cells are painted before the active
    /// piece, which is only painted while the game is running.
    pub fn render<R>(&self, sink: &mut R)
    where
        R: RenderSink + ?Sized,
    {
        sink.clear();
        for (x, y, kind) in self.board.filled_cells() {
            #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            sink.paint_cell(x as i32, y as i32, kind.color());
        }
        if self.state.is_running()
            && let Some(piece) = &self.active_piece
        {
            piece.render(sink);
        }
    }

    /// Tells the sink the board dimensions and configured cell size.
    pub fn configure_viewport<R>(&self, sink: &mut R)
    where
        R: RenderSink + ?Sized,
    {
        sink.set_viewport(COLS, ROWS, self.config.cell_size);
    }

    fn spawn(&mut self) -> Piece {
        let piece = Piece::spawn(self.source.next_kind());
        tracing::debug!(kind = %piece.kind(), "spawned piece");
        piece
    }

    fn award_drop_bonus(&mut self, points: u64) {
        if self.config.drop_bonus {
            self.stats.add_drop_bonus(points);
        }
    }

    fn freeze(&mut self, piece: &Piece) -> usize {
        self.board.fill_piece(piece);
        let cleared_lines = self.board.clear_full_rows();
        let leveled_up = self.stats.complete_piece_drop(cleared_lines, &self.config);
        if leveled_up {
            let interval = self.gravity_interval();
            self.clock.set_interval(interval);
            tracing::info!(
                level = self.stats.level(),
                gravity_ms = interval.as_millis(),
                "level up"
            );
        }
        if cleared_lines > 0 {
            tracing::debug!(cleared_lines, score = self.stats.score(), "rows cleared");
        }
        cleared_lines
    }

    fn game_over(&mut self) {
        self.clock.cancel();
        self.state = SessionState::GameOver;
        tracing::info!(
            score = self.stats.score(),
            level = self.stats.level(),
            total_lines = self.stats.total_cleared_lines(),
            "game over"
        );
    }
}
