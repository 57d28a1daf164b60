use timer_core::{format_hms_ceil, Countdown, DurationInput, InvalidTransition, Tick, TimerError};

use crate::display::DisplaySurface;
use crate::host::{Cadence, Callback, Host, TimerHandle, TimerToken};

pub const DEFAULT_TICK_MS: u64 = 100;

/// Returned by any step on which the countdown reached zero.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Finished;

/// Binds the countdown state machine to an interval tick and a display.
#[derive(Debug)]
pub struct CountdownEngine {
    pub timer: Countdown,
    tick_ms: u64,
    interval: TimerHandle,
}

impl Default for CountdownEngine {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_MS)
    }
}

impl CountdownEngine {
    pub fn new(tick_ms: u64) -> Self {
        Self {
            timer: Countdown::new(),
            tick_ms,
            interval: TimerHandle::default(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    /// Running, or holding time that a reset would discard.
    pub fn is_live(&self) -> bool {
        self.timer.is_running() || self.timer.has_remaining()
    }

    pub fn set_duration<S: DisplaySurface>(
        &mut self,
        input: DurationInput,
        surface: &mut S,
    ) -> Result<(), TimerError> {
        let duration_ms = input.to_millis()?;
        self.timer.set_duration(duration_ms)?;
        log::debug!("countdown set to {}ms", duration_ms);

        surface.on_countdown_tick(&format_hms_ceil(duration_ms));
        surface.on_countdown_controls_changed(false);
        Ok(())
    }

    /// Start ticking. The first tick runs immediately with the same clock
    /// sample that set the target.
    pub fn start<H: Host, S: DisplaySurface>(
        &mut self,
        host: &mut H,
        surface: &mut S,
    ) -> Result<(), InvalidTransition> {
        let now = host.now_ms();
        let remaining = self.timer.start(now)?;
        self.interval.arm(host, Cadence::Every(self.tick_ms), Callback::CountdownTick);
        log::debug!("countdown started at {} with {}ms left", now, remaining);

        surface.show_active_countdown();
        surface.on_countdown_controls_changed(true);
        // Remaining is > 0 at the start instant, so this cannot finish.
        let tick = self.timer.tick(now);
        let finished = self.apply(tick, host, surface);
        debug_assert!(finished.is_none());
        Ok(())
    }

    pub fn stop<H: Host, S: DisplaySurface>(
        &mut self,
        host: &mut H,
        surface: &mut S,
    ) -> Result<Option<Finished>, InvalidTransition> {
        let tick = self.timer.stop(host.now_ms())?;
        self.interval.cancel(host);
        let finished = self.apply(Some(tick), host, surface);
        if finished.is_none() {
            log::debug!("countdown stopped with {}ms left", self.timer.remaining_ms());
            surface.on_countdown_controls_changed(false);
        }
        Ok(finished)
    }

    pub fn reset<H: Host, S: DisplaySurface>(
        &mut self,
        host: &mut H,
        surface: &mut S,
    ) -> Result<(), InvalidTransition> {
        self.timer.reset()?;
        self.interval.cancel(host);
        log::debug!("countdown reset");

        surface.on_countdown_inputs_cleared();
        surface.on_countdown_tick(&format_hms_ceil(0));
        surface.on_countdown_controls_changed(false);
        surface.show_duration_input();
        Ok(())
    }

    /// Stop if running and reset, without announcing a finish the stop
    /// might observe.
    pub fn discard<H: Host, S: DisplaySurface>(
        &mut self,
        host: &mut H,
        surface: &mut S,
    ) -> Result<(), InvalidTransition> {
        self.interval.cancel(host);
        if self.timer.is_running() {
            let _ = self.timer.stop(host.now_ms());
        }
        self.reset(host, surface)
    }

    /// Interval tick. Stale tokens are ignored.
    pub fn on_tick<H: Host, S: DisplaySurface>(
        &mut self,
        token: TimerToken,
        host: &mut H,
        surface: &mut S,
    ) -> Option<Finished> {
        if !self.interval.owns(token) {
            return None;
        }
        let tick = self.timer.tick(host.now_ms());
        self.apply(tick, host, surface)
    }

    fn apply<H: Host, S: DisplaySurface>(
        &mut self,
        tick: Option<Tick>,
        host: &mut H,
        surface: &mut S,
    ) -> Option<Finished> {
        match tick {
            Some(Tick::Remaining(ms)) => {
                surface.on_countdown_tick(&format_hms_ceil(ms));
                None
            }
            Some(Tick::Finished { initial_ms }) => {
                self.interval.cancel(host);
                log::info!("countdown finished, reloaded {}ms", initial_ms);

                surface.on_countdown_tick(&format_hms_ceil(0));
                surface.on_countdown_controls_changed(false);
                surface.on_countdown_finished();
                Some(Finished)
            }
            None => {
                self.interval.cancel(host);
                None
            }
        }
    }
}
