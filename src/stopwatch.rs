use timer_core::{format_hms_millis, InvalidTransition, Stopwatch};

use crate::display::DisplaySurface;
use crate::host::{Cadence, Callback, Host, TimerHandle, TimerToken};

/// Binds the stopwatch state machine to a frame refresh loop and a display.
#[derive(Debug, Default)]
pub struct StopwatchEngine {
    pub timer: Stopwatch,
    frame: TimerHandle,
}

impl StopwatchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    /// Running, or holding time that a reset would discard.
    pub fn is_live(&self) -> bool {
        self.timer.is_running() || self.timer.has_elapsed()
    }

    pub fn start<H: Host, S: DisplaySurface>(
        &mut self,
        host: &mut H,
        surface: &mut S,
    ) -> Result<(), InvalidTransition> {
        let now = host.now_ms();
        self.timer.start(now)?;
        self.frame.arm(host, Cadence::Frame, Callback::StopwatchFrame);
        log::debug!("stopwatch started at {} with {}ms banked", now, self.timer.elapsed_ms());

        surface.on_stopwatch_tick(&format_hms_millis(self.timer.elapsed_ms()));
        surface.on_stopwatch_controls_changed(true, self.timer.has_elapsed());
        Ok(())
    }

    pub fn stop<H: Host, S: DisplaySurface>(
        &mut self,
        host: &mut H,
        surface: &mut S,
    ) -> Result<(), InvalidTransition> {
        let now = host.now_ms();
        let elapsed = self.timer.stop(now)?;
        self.frame.cancel(host);
        log::debug!("stopwatch stopped at {}ms", elapsed);

        surface.on_stopwatch_tick(&format_hms_millis(elapsed));
        surface.on_stopwatch_controls_changed(false, self.timer.has_elapsed());
        Ok(())
    }

    pub fn lap<H: Host, S: DisplaySurface>(
        &mut self,
        host: &mut H,
        surface: &mut S,
    ) -> Result<(), InvalidTransition> {
        let lap = self.timer.lap(host.now_ms())?;
        let formatted = format_hms_millis(lap.elapsed_ms);
        log::debug!("lap {} at {}", lap.index, formatted);

        surface.on_stopwatch_tick(&formatted);
        surface.on_lap_added(&formatted, lap.index);
        Ok(())
    }

    pub fn reset<H: Host, S: DisplaySurface>(
        &mut self,
        host: &mut H,
        surface: &mut S,
    ) -> Result<(), InvalidTransition> {
        self.timer.reset()?;
        self.frame.cancel(host);
        log::debug!("stopwatch reset");

        surface.on_stopwatch_tick(&format_hms_millis(0));
        surface.on_laps_cleared();
        surface.on_stopwatch_controls_changed(false, false);
        Ok(())
    }

    /// Per-frame refresh. Returns `false` for a stale token.
    pub fn on_frame<H: Host, S: DisplaySurface>(
        &mut self,
        token: TimerToken,
        host: &mut H,
        surface: &mut S,
    ) -> bool {
        if !self.frame.owns(token) {
            return false;
        }
        match self.timer.tick(host.now_ms()) {
            Some(elapsed) => surface.on_stopwatch_tick(&format_hms_millis(elapsed)),
            None => self.frame.cancel(host),
        }
        true
    }
}
