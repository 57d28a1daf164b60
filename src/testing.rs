//! Deterministic host and recording surface for tests.

use timer_core::DurationError;

use crate::display::DisplaySurface;
use crate::host::{Cadence, Callback, Host, Schedule, TimerToken};

#[derive(Debug, Default)]
pub struct ManualHost {
    now_ms: u64,
    schedule: Schedule,
}

impl ManualHost {
    pub fn at(now_ms: u64) -> Self {
        Self {
            now_ms,
            schedule: Schedule::new(),
        }
    }

    pub fn pending(&self) -> usize {
        self.schedule.len()
    }

    /// Move the clock to the next due callback if it falls at or before
    /// `until_ms`, and return it.
    pub fn next_callback(&mut self, until_ms: u64) -> Option<(TimerToken, Callback)> {
        let due = self.schedule.next_due_ms().filter(|&due| due <= until_ms)?;
        self.now_ms = self.now_ms.max(due);
        self.schedule.pop_due(self.now_ms)
    }

    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = now_ms;
    }
}

impl Host for ManualHost {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn schedule(&mut self, cadence: Cadence, callback: Callback) -> TimerToken {
        self.schedule.insert(self.now_ms, cadence, callback)
    }

    fn cancel(&mut self, token: TimerToken) {
        self.schedule.remove(token);
    }
}

/// Step `host` forward by `ms`, feeding each due callback to `dispatch`.
pub fn run_for(
    host: &mut ManualHost,
    ms: u64,
    mut dispatch: impl FnMut(&mut ManualHost, TimerToken, Callback),
) {
    let until = host.now_ms() + ms;
    while let Some((token, callback)) = host.next_callback(until) {
        dispatch(host, token, callback);
    }
    host.set_now(until);
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Event {
    StopwatchTick(String),
    StopwatchControls { running: bool, has_elapsed: bool },
    LapAdded(String, usize),
    LapsCleared,
    CountdownTick(String),
    CountdownControls { running: bool },
    CountdownFinished,
    CountdownInputsCleared,
    ShowDurationInput,
    ShowActiveCountdown,
    DurationRejected(DurationError),
    AlarmFlash(bool),
}

#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<Event>,
}

impl Recorder {
    pub fn take(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn count(&self, event: &Event) -> usize {
        self.events.iter().filter(|e| *e == event).count()
    }

    pub fn last_stopwatch_tick(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|e| match e {
            Event::StopwatchTick(s) => Some(s.as_str()),
            _ => None,
        })
    }

    pub fn last_countdown_tick(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|e| match e {
            Event::CountdownTick(s) => Some(s.as_str()),
            _ => None,
        })
    }
}

impl DisplaySurface for Recorder {
    fn on_stopwatch_tick(&mut self, formatted: &str) {
        self.events.push(Event::StopwatchTick(formatted.to_owned()));
    }

    fn on_stopwatch_controls_changed(&mut self, running: bool, has_elapsed: bool) {
        self.events.push(Event::StopwatchControls { running, has_elapsed });
    }

    fn on_lap_added(&mut self, formatted: &str, lap_index: usize) {
        self.events.push(Event::LapAdded(formatted.to_owned(), lap_index));
    }

    fn on_laps_cleared(&mut self) {
        self.events.push(Event::LapsCleared);
    }

    fn on_countdown_tick(&mut self, formatted: &str) {
        self.events.push(Event::CountdownTick(formatted.to_owned()));
    }

    fn on_countdown_controls_changed(&mut self, running: bool) {
        self.events.push(Event::CountdownControls { running });
    }

    fn on_countdown_finished(&mut self) {
        self.events.push(Event::CountdownFinished);
    }

    fn on_countdown_inputs_cleared(&mut self) {
        self.events.push(Event::CountdownInputsCleared);
    }

    fn show_duration_input(&mut self) {
        self.events.push(Event::ShowDurationInput);
    }

    fn show_active_countdown(&mut self) {
        self.events.push(Event::ShowActiveCountdown);
    }

    fn on_duration_rejected(&mut self, error: &DurationError) {
        self.events.push(Event::DurationRejected(*error));
    }

    fn on_alarm_flash(&mut self, active: bool) {
        self.events.push(Event::AlarmFlash(active));
    }
}
