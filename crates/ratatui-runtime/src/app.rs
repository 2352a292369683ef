use std::time::Duration;

use crossterm::event::Event;
use ratatui::Frame;

use crate::Runtime;

/// Application driven by [`Runtime::run`].
pub trait App {
    /// Called once before the first event. Configure tick rate and render mode here.
    fn init(&mut self, runtime: &mut Runtime);

    fn should_exit(&self) -> bool;

    /// Handles terminal input, resize and similar events.
    ///
    /// The screen is redrawn after every terminal event.
    fn handle_event(&mut self, runtime: &mut Runtime, event: Event);

    fn draw(&self, frame: &mut Frame);

    /// Advances the application by `elapsed`.
    ///
    /// Returns `true` if anything visible changed and the screen needs a redraw.
    fn update(&mut self, runtime: &mut Runtime, elapsed: Duration) -> bool;
}
