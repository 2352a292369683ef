use std::time::Duration;

use crossterm::event::Event as CrosstermEvent;

#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// Tick timing reached; carries the time since the previous tick.
    #[from(skip)]
    Tick(Duration),
    Render,
    Crossterm(CrosstermEvent),
}
