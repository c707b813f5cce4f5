//! Birdman Run: a side-scrolling runner whose hero can turn into a bird.
//!
//! The game core (`game`, `scores`, `timers`, `render`) knows nothing about
//! the terminal. It is driven with explicit millisecond timestamps and
//! answers with draw commands; `app`, `event` and `ui` host it in a
//! ratatui/crossterm terminal.

pub mod app;
pub mod clock;
pub mod config;
pub mod event;
pub mod game;
pub mod render;
pub mod scores;
pub mod timers;
pub mod ui;
