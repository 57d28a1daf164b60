use crate::config::AlarmConfig;
use crate::display::DisplaySurface;
use crate::host::{Cadence, Callback, Host, TimerHandle, TimerToken};

/// Visual flash raised when a countdown finishes.
///
/// Independent of engine state. At most one flash is active; a second
/// finish while flashing is dropped.
#[derive(Debug, Default)]
pub struct Alarm {
    active: bool,
    clear: TimerHandle,
}

impl Alarm {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns `false` when the flash was already active or is disabled.
    pub fn fire<H: Host, S: DisplaySurface>(
        &mut self,
        config: &AlarmConfig,
        host: &mut H,
        surface: &mut S,
    ) -> bool {
        if !config.flash || self.active {
            return false;
        }
        self.active = true;
        self.clear.arm(host, Cadence::Once(config.flash_ms), Callback::AlarmClear);
        surface.on_alarm_flash(true);
        true
    }

    pub fn on_clear<S: DisplaySurface>(&mut self, token: TimerToken, surface: &mut S) {
        if !self.clear.owns(token) {
            return;
        }
        self.clear.clear();
        self.active = false;
        surface.on_alarm_flash(false);
    }
}
