//! Minimal frame loop for ratatui applications.
//!
//! [`Runtime`] drives an [`App`] with three kinds of events: ticks carrying the
//! time elapsed since the previous tick, render requests, and terminal input.

pub use self::{app::App, event_loop::RenderMode, runtime::Runtime};

mod app;
mod event;
mod event_loop;
mod runtime;
