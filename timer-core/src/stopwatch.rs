use crate::error::{Command, InvalidTransition};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StopwatchState {
    Idle,
    Running,
    Stopped,
}

impl StopwatchState {
    pub fn label(self) -> &'static str {
        match self {
            StopwatchState::Idle => "idle",
            StopwatchState::Running => "running",
            StopwatchState::Stopped => "stopped",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Phase {
    Idle,
    /// `start_epoch_ms` is the clock value at which elapsed time was zero.
    Running { start_epoch_ms: u64 },
    Stopped,
}

/// A captured lap. `index` is 1-based.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Lap {
    pub index: usize,
    pub elapsed_ms: u64,
}

/// Count-up timer with laps.
///
/// `elapsed_ms` is authoritative while stopped. While running it holds the
/// value computed at the last tick, lap or stop.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Stopwatch {
    phase: Phase,
    elapsed_ms: u64,
    laps: Vec<u64>,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            elapsed_ms: 0,
            laps: Vec::new(),
        }
    }

    pub fn state(&self) -> StopwatchState {
        match self.phase {
            Phase::Idle => StopwatchState::Idle,
            Phase::Running { .. } => StopwatchState::Running,
            Phase::Stopped => StopwatchState::Stopped,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    pub fn has_elapsed(&self) -> bool {
        self.elapsed_ms > 0
    }

    pub fn start_epoch_ms(&self) -> Option<u64> {
        match self.phase {
            Phase::Running { start_epoch_ms } => Some(start_epoch_ms),
            _ => None,
        }
    }

    /// Start or resume. The epoch is back-dated by the time already
    /// accumulated, so a resumed run continues where it left off.
    pub fn start(&mut self, now_ms: u64) -> Result<(), InvalidTransition> {
        if self.is_running() {
            return Err(self.reject(Command::Start));
        }
        self.phase = Phase::Running {
            start_epoch_ms: now_ms.saturating_sub(self.elapsed_ms),
        };
        Ok(())
    }

    /// Stop and return the final elapsed time.
    pub fn stop(&mut self, now_ms: u64) -> Result<u64, InvalidTransition> {
        if !self.is_running() {
            return Err(self.reject(Command::Stop));
        }
        let elapsed = self.recompute(now_ms);
        self.phase = Phase::Stopped;
        Ok(elapsed)
    }

    /// Record the elapsed time at `now_ms` as a lap. Timing is undisturbed.
    pub fn lap(&mut self, now_ms: u64) -> Result<Lap, InvalidTransition> {
        if !self.is_running() {
            return Err(self.reject(Command::Lap));
        }
        let elapsed_ms = self.recompute(now_ms);
        self.laps.push(elapsed_ms);
        Ok(Lap {
            index: self.laps.len(),
            elapsed_ms,
        })
    }

    pub fn reset(&mut self) -> Result<(), InvalidTransition> {
        if self.is_running() {
            return Err(self.reject(Command::Reset));
        }
        *self = Self::new();
        Ok(())
    }

    /// Refresh the cached elapsed time. Returns `None` when not running.
    pub fn tick(&mut self, now_ms: u64) -> Option<u64> {
        if self.is_running() {
            Some(self.recompute(now_ms))
        } else {
            None
        }
    }

    /// Elapsed time as of the last recomputation.
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// True elapsed time at `now_ms`, without touching state.
    pub fn elapsed_at(&self, now_ms: u64) -> u64 {
        match self.phase {
            Phase::Running { start_epoch_ms } => {
                now_ms.saturating_sub(start_epoch_ms).max(self.elapsed_ms)
            }
            _ => self.elapsed_ms,
        }
    }

    pub fn laps(&self) -> &[u64] {
        &self.laps
    }

    fn recompute(&mut self, now_ms: u64) -> u64 {
        self.elapsed_ms = self.elapsed_at(now_ms);
        self.elapsed_ms
    }

    fn reject(&self, command: Command) -> InvalidTransition {
        InvalidTransition {
            command,
            state: self.state().label(),
        }
    }
}
