use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::event::TuiEvent;

/// When the screen is redrawn.
#[derive(Debug, Clone, Copy, Default)]
pub enum RenderMode {
    /// Render at fixed intervals.
    Interval(Duration),
    /// Render after a state change.
    #[default]
    OnDirty,
    /// Render after a state change, at most once per interval.
    ///
    /// Changes arriving faster than the interval are batched into one render.
    Throttled(Duration),
}

impl RenderMode {
    /// Creates `Throttled` mode from a frame rate (FPS).
    #[must_use]
    pub fn throttled_from_rate(rate: f64) -> Self {
        Self::Throttled(Duration::from_secs_f64(1.0 / rate))
    }
}

/// Produces tick, render and terminal events.
///
/// A tick reports the real time since the previous tick, which can be longer
/// than the tick interval when the process was busy or suspended. No tick is
/// produced while the tick interval is unset.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    render_mode: RenderMode,
    last_tick: Option<Instant>,
    last_render: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub fn new() -> Self {
        let now = Instant::now();
        let past_time = now.checked_sub(Duration::from_secs(86400)).unwrap_or(now);
        Self {
            tick_interval: None,
            render_mode: RenderMode::default(),
            last_tick: None,
            last_render: past_time,
            dirty: true, // first frame
        }
    }

    /// Sets the tick interval. `None` disables ticks.
    ///
    /// Elapsed time is measured from the moment ticks are (re)enabled.
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.tick_interval = interval;
        self.last_tick = interval.map(|_| Instant::now());
    }

    pub(super) fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    pub(super) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Blocks until the next event is due and returns it.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(elapsed) = self.due_tick(now) {
                self.last_tick = Some(now);
                return Ok(TuiEvent::Tick(elapsed));
            }

            if self.is_render_due(now) {
                self.last_render = now;
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if let Some(timeout) = self.compute_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn due_tick(&self, now: Instant) -> Option<Duration> {
        let interval = self.tick_interval?;
        let elapsed = now.duration_since(self.last_tick?);
        (elapsed >= interval).then_some(elapsed)
    }

    fn is_render_due(&self, now: Instant) -> bool {
        match self.render_mode {
            RenderMode::Interval(interval) => now.duration_since(self.last_render) >= interval,
            RenderMode::OnDirty => self.dirty,
            RenderMode::Throttled(interval) => {
                self.dirty && now.duration_since(self.last_render) >= interval
            }
        }
    }

    fn compute_timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick_at = self
            .tick_interval
            .zip(self.last_tick)
            .map(|(interval, last)| last + interval);
        let next_render_at = match self.render_mode {
            RenderMode::Interval(interval) => Some(self.last_render + interval),
            RenderMode::OnDirty => self.dirty.then_some(now),
            RenderMode::Throttled(interval) => self.dirty.then(|| self.last_render + interval),
        };
        let next_timeout_at = [next_tick_at, next_render_at].into_iter().flatten().min()?;
        Some(next_timeout_at.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_no_tick_without_interval() {
        let events = EventLoop::new();
        assert_eq!(events.due_tick(Instant::now() + 10 * MS), None);
    }

    #[test]
    fn test_tick_reports_real_elapsed_time() {
        let mut events = EventLoop::new();
        events.set_tick_interval(Some(16 * MS));
        let start = events.last_tick.unwrap();
        assert_eq!(events.due_tick(start + 10 * MS), None);
        assert_eq!(events.due_tick(start + 16 * MS), Some(16 * MS));
        assert_eq!(events.due_tick(start + 250 * MS), Some(250 * MS));
    }

    #[test]
    fn test_throttled_render_waits_for_dirty() {
        let mut events = EventLoop::new();
        events.set_render_mode(RenderMode::Throttled(16 * MS));
        let now = events.last_render + Duration::from_secs(1);
        assert!(events.is_render_due(now));
        events.dirty = false;
        assert!(!events.is_render_due(now));
        events.mark_dirty();
        assert!(events.is_render_due(now));
    }

    #[test]
    fn test_timeout_targets_next_tick() {
        let mut events = EventLoop::new();
        events.set_tick_interval(Some(16 * MS));
        events.dirty = false;
        let start = events.last_tick.unwrap();
        assert_eq!(events.compute_timeout(start + 6 * MS), Some(10 * MS));
    }
}
