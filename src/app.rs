use timer_core::{format_hms_ceil, format_hms_millis, DurationInput, TimerError};

use crate::alerts::Alarm;
use crate::config::TimerConfig;
use crate::countdown::CountdownEngine;
use crate::display::DisplaySurface;
use crate::host::{Callback, Host, TimerToken};
use crate::stopwatch::StopwatchEngine;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ActiveView {
    Stopwatch,
    Countdown,
}

/// Owns the host, the display and both engines.
///
/// Switching views resets the timer being left if it is running or holds
/// time, so at most one timer is live at once.
pub struct TimersApp<H, S> {
    host: H,
    surface: S,
    config: TimerConfig,
    view: ActiveView,
    stopwatch: StopwatchEngine,
    countdown: CountdownEngine,
    alarm: Alarm,
}

impl<H: Host, S: DisplaySurface> TimersApp<H, S> {
    pub fn new(host: H, surface: S, config: TimerConfig) -> Self {
        let mut app = Self {
            host,
            surface,
            countdown: CountdownEngine::new(config.countdown_tick_ms),
            config,
            view: ActiveView::Stopwatch,
            stopwatch: StopwatchEngine::new(),
            alarm: Alarm::default(),
        };
        app.render_initial();
        app
    }

    fn render_initial(&mut self) {
        self.surface.on_stopwatch_tick(&format_hms_millis(0));
        self.surface.on_stopwatch_controls_changed(false, false);
        self.surface.on_countdown_tick(&format_hms_ceil(0));
        self.surface.on_countdown_controls_changed(false);
        self.surface.show_duration_input();
    }

    pub fn view(&self) -> ActiveView {
        self.view
    }

    pub fn stopwatch(&self) -> &StopwatchEngine {
        &self.stopwatch
    }

    pub fn countdown(&self) -> &CountdownEngine {
        &self.countdown
    }

    pub fn alarm(&self) -> &Alarm {
        &self.alarm
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn any_timer_running(&self) -> bool {
        self.stopwatch.is_running() || self.countdown.is_running()
    }

    pub fn switch_view(&mut self, view: ActiveView) {
        if view == self.view {
            return;
        }
        match view {
            ActiveView::Stopwatch if self.countdown.is_live() => self.discard_countdown(),
            ActiveView::Countdown if self.stopwatch.is_live() => self.discard_stopwatch(),
            _ => {}
        }
        log::debug!("view {:?} -> {:?}", self.view, view);
        self.view = view;
        self.render_view();
    }

    /// Push the active view's current readout and controls.
    fn render_view(&mut self) {
        match self.view {
            ActiveView::Stopwatch => {
                let timer = &self.stopwatch.timer;
                self.surface.on_stopwatch_tick(&format_hms_millis(timer.elapsed_ms()));
                self.surface
                    .on_stopwatch_controls_changed(timer.is_running(), timer.has_elapsed());
            }
            ActiveView::Countdown => {
                let timer = &self.countdown.timer;
                self.surface.on_countdown_tick(&format_hms_ceil(timer.remaining_ms()));
                self.surface.on_countdown_controls_changed(timer.is_running());
            }
        }
    }

    fn discard_stopwatch(&mut self) {
        // Reset is refused while running, so stop first.
        if self.stopwatch.is_running() {
            let _ = self.stopwatch.stop(&mut self.host, &mut self.surface);
        }
        if let Err(e) = self.stopwatch.reset(&mut self.host, &mut self.surface) {
            log::error!("stopwatch refused reset on view switch: {}", e);
        }
    }

    fn discard_countdown(&mut self) {
        if let Err(e) = self.countdown.discard(&mut self.host, &mut self.surface) {
            log::error!("countdown refused reset on view switch: {}", e);
        }
    }

    pub fn request_stopwatch_start(&mut self) -> Result<(), TimerError> {
        self.stopwatch
            .start(&mut self.host, &mut self.surface)
            .map_err(|e| rejected(e.into()))
    }

    pub fn request_stopwatch_stop(&mut self) -> Result<(), TimerError> {
        self.stopwatch
            .stop(&mut self.host, &mut self.surface)
            .map_err(|e| rejected(e.into()))
    }

    pub fn request_lap(&mut self) -> Result<(), TimerError> {
        self.stopwatch
            .lap(&mut self.host, &mut self.surface)
            .map_err(|e| rejected(e.into()))
    }

    pub fn request_stopwatch_reset(&mut self) -> Result<(), TimerError> {
        self.stopwatch
            .reset(&mut self.host, &mut self.surface)
            .map_err(|e| rejected(e.into()))
    }

    pub fn request_set_duration(
        &mut self,
        hours: u64,
        minutes: u32,
        seconds: u32,
    ) -> Result<(), TimerError> {
        let input = DurationInput::new(hours, minutes, seconds);
        match self.countdown.set_duration(input, &mut self.surface) {
            Err(TimerError::InvalidDuration(e)) => {
                log::debug!("rejected duration {:?}: {}", input, e);
                self.surface.on_duration_rejected(&e);
                Err(e.into())
            }
            other => other.map_err(rejected),
        }
    }

    pub fn request_countdown_start(&mut self) -> Result<(), TimerError> {
        self.countdown
            .start(&mut self.host, &mut self.surface)
            .map_err(|e| rejected(e.into()))
    }

    pub fn request_countdown_stop(&mut self) -> Result<(), TimerError> {
        let finished = self
            .countdown
            .stop(&mut self.host, &mut self.surface)
            .map_err(|e| rejected(e.into()))?;
        if finished.is_some() {
            self.alarm.fire(&self.config.alarm, &mut self.host, &mut self.surface);
        }
        Ok(())
    }

    pub fn request_countdown_reset(&mut self) -> Result<(), TimerError> {
        self.countdown
            .reset(&mut self.host, &mut self.surface)
            .map_err(|e| rejected(e.into()))
    }

    /// Start or stop whichever timer the active view shows.
    pub fn toggle_active(&mut self) -> Result<(), TimerError> {
        match self.view {
            ActiveView::Stopwatch if self.stopwatch.is_running() => self.request_stopwatch_stop(),
            ActiveView::Stopwatch => self.request_stopwatch_start(),
            ActiveView::Countdown if self.countdown.is_running() => self.request_countdown_stop(),
            ActiveView::Countdown => self.request_countdown_start(),
        }
    }

    /// Reset whichever timer the active view shows.
    pub fn reset_active(&mut self) -> Result<(), TimerError> {
        match self.view {
            ActiveView::Stopwatch => self.request_stopwatch_reset(),
            ActiveView::Countdown => self.request_countdown_reset(),
        }
    }

    /// Dispatch a host callback to its owner.
    pub fn handle_callback(&mut self, token: TimerToken, callback: Callback) {
        match callback {
            Callback::StopwatchFrame => {
                if !self.stopwatch.on_frame(token, &mut self.host, &mut self.surface) {
                    log::debug!("dropped stale stopwatch frame {:?}", token);
                }
            }
            Callback::CountdownTick => {
                let finished = self.countdown.on_tick(token, &mut self.host, &mut self.surface);
                if finished.is_some() {
                    self.alarm.fire(&self.config.alarm, &mut self.host, &mut self.surface);
                }
            }
            Callback::AlarmClear => self.alarm.on_clear(token, &mut self.surface),
        }
    }
}

fn rejected(e: TimerError) -> TimerError {
    log::debug!("ignored command: {}", e);
    e
}
