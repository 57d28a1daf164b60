//! Stopwatch and countdown engines with drift-free display updates.
//!
//! The pure state machines live in `timer-core`. This crate binds them to a
//! [`host::Host`] (clock and callback scheduling) and a
//! [`display::DisplaySurface`], and provides the orchestrator that owns both.

pub mod alerts;
pub mod app;
pub mod config;
pub mod countdown;
pub mod display;
pub mod host;
pub mod stopwatch;

#[cfg(test)]
mod testing;

pub use app::{ActiveView, TimersApp};
pub use config::{AlarmConfig, ConfigError, TimerConfig};
pub use display::DisplaySurface;
pub use host::{Cadence, Callback, Host, Schedule, TimerToken};
pub use timer_core;
