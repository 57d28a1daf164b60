use std::io::Write;

use timer_widget::timer_core::DurationError;
use timer_widget::{ActiveView, DisplaySurface};

/// Line-oriented display surface for a terminal.
///
/// Tick readouts overwrite the current line. Everything else gets a line of
/// its own. Only the active view's ticks are drawn.
pub struct TerminalSurface<W: Write> {
    out: W,
    view: ActiveView,
    flashing: bool,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            view: ActiveView::Stopwatch,
            flashing: false,
        }
    }

    pub fn set_view(&mut self, view: ActiveView) {
        self.view = view;
        let title = match view {
            ActiveView::Stopwatch => "STOPWATCH  enter=start/stop  l=lap  r=reset  v=countdown",
            ActiveView::Countdown => "COUNTDOWN  d H M S=set  enter=start/stop  r=reset  v=stopwatch",
        };
        self.line(title);
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn readout(&mut self, view: ActiveView, text: &str) {
        if view != self.view {
            return;
        }
        let marker = if self.flashing { "*" } else { " " };
        if let Err(e) = write!(self.out, "\r{} {} ", marker, text).and_then(|_| self.out.flush()) {
            log::error!("terminal write failed: {}", e);
        }
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "\r{}", text) {
            log::error!("terminal write failed: {}", e);
        }
    }
}

impl<W: Write> DisplaySurface for TerminalSurface<W> {
    fn on_stopwatch_tick(&mut self, formatted: &str) {
        self.readout(ActiveView::Stopwatch, formatted);
    }

    fn on_stopwatch_controls_changed(&mut self, running: bool, has_elapsed: bool) {
        if self.view != ActiveView::Stopwatch {
            return;
        }
        let hint = match (running, has_elapsed) {
            (true, _) => "[running]  enter=stop  l=lap",
            (false, true) => "[stopped]  enter=resume  r=reset",
            (false, false) => "[idle]  enter=start",
        };
        self.line(hint);
    }

    fn on_lap_added(&mut self, formatted: &str, lap_index: usize) {
        self.line(&format!("lap {:>2}  {}", lap_index, formatted));
    }

    fn on_laps_cleared(&mut self) {
        self.line("laps cleared");
    }

    fn on_countdown_tick(&mut self, formatted: &str) {
        self.readout(ActiveView::Countdown, formatted);
    }

    fn on_countdown_controls_changed(&mut self, running: bool) {
        if self.view != ActiveView::Countdown {
            return;
        }
        self.line(if running { "[running]  enter=stop" } else { "[stopped]  enter=start  r=reset" });
    }

    fn on_countdown_finished(&mut self) {
        self.line("TIME'S UP");
    }

    fn on_countdown_inputs_cleared(&mut self) {}

    fn show_duration_input(&mut self) {
        if self.view == ActiveView::Countdown {
            self.line("enter a duration: d H M S");
        }
    }

    fn show_active_countdown(&mut self) {}

    fn on_duration_rejected(&mut self, error: &DurationError) {
        self.line(&format!("rejected: {}", error));
    }

    fn on_alarm_flash(&mut self, active: bool) {
        self.flashing = active;
        self.line(if active { "** finished **" } else { "" });
    }
}
