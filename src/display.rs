use timer_core::DurationError;

/// Everything the engines push to the presentation layer.
///
/// Implementations only render. They never call back into an engine from
/// inside one of these methods.
pub trait DisplaySurface {
    fn on_stopwatch_tick(&mut self, formatted: &str);
    fn on_stopwatch_controls_changed(&mut self, running: bool, has_elapsed: bool);
    /// `lap_index` is 1-based.
    fn on_lap_added(&mut self, formatted: &str, lap_index: usize);
    fn on_laps_cleared(&mut self);

    fn on_countdown_tick(&mut self, formatted: &str);
    fn on_countdown_controls_changed(&mut self, running: bool);
    fn on_countdown_finished(&mut self);
    fn on_countdown_inputs_cleared(&mut self);
    fn show_duration_input(&mut self);
    fn show_active_countdown(&mut self);
    fn on_duration_rejected(&mut self, error: &DurationError);

    /// Start (`true`) or stop the finish flash.
    fn on_alarm_flash(&mut self, active: bool);
}
