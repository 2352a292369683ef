//! Game rules layered on top of the core data structures.
//!
//! - [`GameSession`] - One game from start to game over: commands, gravity, freezing, scoring
//! - [`GameStats`] - Score, level and line counters
//! - [`GravityClock`] - Turns elapsed time into gravity steps
//! - [`PieceSource`] - Where spawned piece kinds come from
//! - [`Command`] - Player intents understood by the session
//!
//! # Game Flow
//!
//! 1. [`GameSession::start_game`] resets the board and spawns the next and active pieces
//! 2. The front-end forwards player [`Command`]s and elapsed frame time
//! 3. Each due gravity step moves the active piece down or freezes it
//! 4. Freezing clears full rows, scores them, and promotes the next piece
//! 5. A piece that freezes on the spawn row ends the game

pub use self::{command::*, game_session::*, game_stats::*, gravity_clock::*, piece_source::*};

mod command;
mod game_session;
mod game_stats;
mod gravity_clock;
mod piece_source;
