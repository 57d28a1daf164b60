//! Error types for timer operations

use std::fmt;

use thiserror::Error;

/// A user-facing command on one of the timers.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Start,
    Stop,
    Lap,
    Reset,
    SetDuration,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Command::Start => "start",
            Command::Stop => "stop",
            Command::Lap => "lap",
            Command::Reset => "reset",
            Command::SetDuration => "set duration",
        })
    }
}

/// Rejected duration input. Nothing is mutated when this is returned.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DurationError {
    #[error("duration must be greater than zero")]
    Zero,

    #[error("minutes must be between 0 and 59, got {0}")]
    MinutesOutOfRange(u32),

    #[error("seconds must be between 0 and 59, got {0}")]
    SecondsOutOfRange(u32),

    #[error("duration of {hours} hours is too large")]
    Overflow { hours: u64 },
}

/// A command that is not valid in the timer's current state.
///
/// Callers treat this as a no-op; the timer state is untouched.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("cannot {command} while {state}")]
pub struct InvalidTransition {
    pub command: Command,
    pub state: &'static str,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    #[error("invalid duration: {0}")]
    InvalidDuration(#[from] DurationError),

    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),
}
