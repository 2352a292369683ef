use std::time::Duration;

use blockfall_engine::PieceSource;
use crossterm::event::Event;
use ratatui::Frame;
use ratatui_runtime::{App, RenderMode, Runtime};

use super::screen::PlayScreen;

const FPS: f64 = 60.0;

#[derive(Debug)]
pub struct PlayApp<S> {
    screen: PlayScreen<S>,
}

impl<S> PlayApp<S>
where
    S: PieceSource,
{
    pub fn new(screen: PlayScreen<S>) -> Self {
        Self { screen }
    }

    pub fn into_screen(self) -> PlayScreen<S> {
        self.screen
    }
}

impl<S> App for PlayApp<S>
where
    S: PieceSource,
{
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_rate(Some(FPS));
        runtime.set_render_mode(RenderMode::throttled_from_rate(FPS));
    }

    fn should_exit(&self) -> bool {
        self.screen.is_exiting()
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: Event) {
        self.screen.handle_event(&event);
    }

    fn draw(&self, frame: &mut Frame) {
        self.screen.draw(frame);
    }

    fn update(&mut self, _runtime: &mut Runtime, elapsed: Duration) -> bool {
        self.screen.update(elapsed)
    }
}
