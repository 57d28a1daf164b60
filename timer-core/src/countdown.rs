use crate::error::{Command, DurationError, InvalidTransition, TimerError};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CountdownState {
    Unset,
    Ready,
    Running,
    /// Reached zero. Remaining is back at the initial duration, ready to
    /// start again.
    Finished,
}

impl CountdownState {
    pub fn label(self) -> &'static str {
        match self {
            CountdownState::Unset => "unset",
            CountdownState::Ready => "ready",
            CountdownState::Running => "running",
            CountdownState::Finished => "finished",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Phase {
    Unset,
    Ready,
    Running { target_epoch_ms: u64 },
    Finished,
}

/// Outcome of recomputing the remaining time.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tick {
    Remaining(u64),
    /// Hit zero on this step. Carries the duration the timer was reloaded with.
    Finished { initial_ms: u64 },
}

/// Count-down timer.
///
/// While running, the true remaining time is `target - now`, clamped at zero.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Countdown {
    phase: Phase,
    initial_ms: u64,
    remaining_ms: u64,
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}

impl Countdown {
    pub fn new() -> Self {
        Self {
            phase: Phase::Unset,
            initial_ms: 0,
            remaining_ms: 0,
        }
    }

    pub fn state(&self) -> CountdownState {
        match self.phase {
            Phase::Unset => CountdownState::Unset,
            Phase::Ready => CountdownState::Ready,
            Phase::Running { .. } => CountdownState::Running,
            Phase::Finished => CountdownState::Finished,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    pub fn has_remaining(&self) -> bool {
        self.remaining_ms > 0
    }

    pub fn initial_ms(&self) -> u64 {
        self.initial_ms
    }

    /// Remaining time as of the last recomputation.
    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn target_epoch_ms(&self) -> Option<u64> {
        match self.phase {
            Phase::Running { target_epoch_ms } => Some(target_epoch_ms),
            _ => None,
        }
    }

    /// True remaining time at `now_ms`, without touching state.
    pub fn remaining_at(&self, now_ms: u64) -> u64 {
        match self.phase {
            Phase::Running { target_epoch_ms } => target_epoch_ms.saturating_sub(now_ms),
            _ => self.remaining_ms,
        }
    }

    pub fn set_duration(&mut self, duration_ms: u64) -> Result<(), TimerError> {
        if self.is_running() {
            return Err(self.reject(Command::SetDuration).into());
        }
        if duration_ms == 0 {
            return Err(DurationError::Zero.into());
        }
        self.initial_ms = duration_ms;
        self.remaining_ms = duration_ms;
        self.phase = Phase::Ready;
        Ok(())
    }

    /// Start from the current remaining time. Returns the remaining time.
    pub fn start(&mut self, now_ms: u64) -> Result<u64, InvalidTransition> {
        match self.phase {
            Phase::Ready | Phase::Finished if self.remaining_ms > 0 => {
                self.phase = Phase::Running {
                    target_epoch_ms: now_ms.saturating_add(self.remaining_ms),
                };
                Ok(self.remaining_ms)
            }
            _ => Err(self.reject(Command::Start)),
        }
    }

    /// Stop and freeze the remaining time.
    ///
    /// Stopping at or past the target counts as finishing.
    pub fn stop(&mut self, now_ms: u64) -> Result<Tick, InvalidTransition> {
        if !self.is_running() {
            return Err(self.reject(Command::Stop));
        }
        let tick = self.recompute(now_ms);
        if let Tick::Remaining(_) = tick {
            self.phase = Phase::Ready;
        }
        Ok(tick)
    }

    /// Recompute the remaining time. Returns `None` when not running.
    pub fn tick(&mut self, now_ms: u64) -> Option<Tick> {
        if self.is_running() {
            Some(self.recompute(now_ms))
        } else {
            None
        }
    }

    pub fn reset(&mut self) -> Result<(), InvalidTransition> {
        if self.is_running() {
            return Err(self.reject(Command::Reset));
        }
        *self = Self::new();
        Ok(())
    }

    fn recompute(&mut self, now_ms: u64) -> Tick {
        self.remaining_ms = self.remaining_at(now_ms);
        if self.remaining_ms > 0 {
            return Tick::Remaining(self.remaining_ms);
        }
        self.phase = Phase::Finished;
        self.remaining_ms = self.initial_ms;
        Tick::Finished {
            initial_ms: self.initial_ms,
        }
    }

    fn reject(&self, command: Command) -> InvalidTransition {
        InvalidTransition {
            command,
            state: self.state().label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format_hms_ceil;
    use rstest::rstest;

    #[test]
    fn test_countdown_basic() {
        let mut cd = Countdown::new();
        cd.set_duration(10_000).unwrap();
        assert_eq!(cd.state(), CountdownState::Ready);
        assert_eq!(cd.remaining_ms(), 10_000);

        assert_eq!(cd.start(1000), Ok(10_000));
        assert_eq!(cd.target_epoch_ms(), Some(11_000));
        assert_eq!(cd.tick(1000), Some(Tick::Remaining(10_000)));
        assert_eq!(cd.tick(6000), Some(Tick::Remaining(5_000)));

        assert_eq!(cd.stop(7000), Ok(Tick::Remaining(4_000)));
        assert_eq!(cd.state(), CountdownState::Ready);
        assert_eq!(cd.remaining_at(60_000), 4_000);
        assert_eq!(cd.tick(60_000), None);
    }

    #[rstest]
    #[case(1_000)]
    #[case(59_000)]
    #[case(3_600_000)]
    #[case(3_601_000)]
    #[case(360_000_000)]
    fn test_formatting_before_start_matches_duration(#[case] duration_ms: u64) {
        let mut cd = Countdown::new();
        cd.set_duration(duration_ms).unwrap();
        assert_eq!(format_hms_ceil(cd.remaining_ms()), format_hms_ceil(duration_ms));
    }

    #[test]
    fn test_partial_second_rounds_up() {
        let mut cd = Countdown::new();
        cd.set_duration(5_000).unwrap();
        cd.start(0).unwrap();
        assert_eq!(cd.tick(4_700), Some(Tick::Remaining(300)));
        assert_eq!(format_hms_ceil(cd.remaining_ms()), "00:00:01");
    }

    #[test]
    fn test_finish_reloads_initial_duration() {
        let mut cd = Countdown::new();
        cd.set_duration(1_000).unwrap();
        cd.start(500).unwrap();
        assert_eq!(cd.tick(1_400), Some(Tick::Remaining(100)));
        assert_eq!(cd.tick(1_600), Some(Tick::Finished { initial_ms: 1_000 }));
        assert_eq!(cd.state(), CountdownState::Finished);
        assert!(!cd.is_running());
        assert_eq!(cd.remaining_ms(), 1_000);

        // Once finished, further ticks report nothing.
        assert_eq!(cd.tick(1_700), None);

        // And it can be started again straight away.
        assert_eq!(cd.start(2_000), Ok(1_000));
    }

    #[test]
    fn test_stop_past_target_finishes() {
        let mut cd = Countdown::new();
        cd.set_duration(2_000).unwrap();
        cd.start(0).unwrap();
        assert_eq!(cd.stop(2_500), Ok(Tick::Finished { initial_ms: 2_000 }));
        assert_eq!(cd.state(), CountdownState::Finished);
    }

    #[test]
    fn test_set_duration_rejections() {
        let mut cd = Countdown::new();
        assert_eq!(cd.set_duration(0), Err(TimerError::InvalidDuration(DurationError::Zero)));
        assert_eq!(cd.state(), CountdownState::Unset);

        cd.set_duration(3_000).unwrap();
        cd.start(0).unwrap();
        assert_eq!(
            cd.set_duration(9_000),
            Err(TimerError::InvalidTransition(InvalidTransition {
                command: Command::SetDuration,
                state: "running",
            }))
        );
        assert_eq!(cd.initial_ms(), 3_000);
    }

    #[test]
    fn test_start_requires_duration() {
        let mut cd = Countdown::new();
        assert_eq!(
            cd.start(0),
            Err(InvalidTransition { command: Command::Start, state: "unset" })
        );

        cd.set_duration(1_000).unwrap();
        cd.start(0).unwrap();
        let before = cd.clone();
        assert!(cd.start(10).is_err());
        assert!(cd.reset().is_err());
        assert_eq!(cd, before);
    }

    #[test]
    fn test_stop_twice() {
        let mut cd = Countdown::new();
        cd.set_duration(8_000).unwrap();
        cd.start(0).unwrap();
        cd.stop(1_000).unwrap();
        let after_first = cd.clone();
        assert!(cd.stop(2_000).is_err());
        assert_eq!(cd, after_first);
    }

    #[test]
    fn test_resume_continues_from_remaining() {
        let mut cd = Countdown::new();
        cd.set_duration(10_000).unwrap();
        cd.start(0).unwrap();
        cd.stop(3_000).unwrap();
        cd.start(50_000).unwrap();
        assert_eq!(cd.target_epoch_ms(), Some(57_000));
    }

    #[test]
    fn test_reset() {
        let mut cd = Countdown::new();
        cd.set_duration(4_000).unwrap();
        cd.start(0).unwrap();
        cd.stop(1_000).unwrap();
        cd.reset().unwrap();
        assert_eq!(cd, Countdown::new());
        assert!(!cd.has_remaining());
    }
}
