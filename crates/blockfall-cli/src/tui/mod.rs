//! Minimal terminal application runtime: an event loop producing timed
//! ticks, renders and crossterm input for an [`App`].

pub use self::{app::App, event_loop::RenderMode, runner::Tui};

mod app;
mod event;
mod event_loop;
mod runner;
