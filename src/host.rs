//! Host model: a clock plus cancelable repeating and one-shot callbacks.
//!
//! The engines never block or sleep. They ask the host to call them back at
//! some cadence and get a token to cancel with. The host later hands the
//! `(token, callback)` pair to [`crate::TimersApp::handle_callback`].

/// Nominal display refresh period used for [`Cadence::Frame`].
pub const FRAME_PERIOD_MS: u64 = 16;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TimerToken(u64);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Cadence {
    /// Repeats once per display frame.
    Frame,
    /// Repeats every `n` milliseconds.
    Every(u64),
    /// Fires once after `n` milliseconds.
    Once(u64),
}

impl Cadence {
    fn period_ms(self) -> u64 {
        match self {
            Cadence::Frame => FRAME_PERIOD_MS,
            Cadence::Every(ms) | Cadence::Once(ms) => ms.max(1),
        }
    }
}

/// Which owner a callback belongs to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Callback {
    StopwatchFrame,
    CountdownTick,
    AlarmClear,
}

pub trait Host {
    /// Monotonic clock in milliseconds.
    fn now_ms(&self) -> u64;
    fn schedule(&mut self, cadence: Cadence, callback: Callback) -> TimerToken;
    /// Canceling an unknown or already canceled token is a no-op.
    fn cancel(&mut self, token: TimerToken);
}

/// An engine's exclusive slot for its one live timer.
#[derive(Debug, Default)]
pub struct TimerHandle(Option<TimerToken>);

impl TimerHandle {
    /// Schedule a callback, canceling whatever this handle held before.
    pub fn arm<H: Host>(&mut self, host: &mut H, cadence: Cadence, callback: Callback) {
        self.cancel(host);
        self.0 = Some(host.schedule(cadence, callback));
    }

    /// Idempotent.
    pub fn cancel<H: Host>(&mut self, host: &mut H) {
        if let Some(token) = self.0.take() {
            host.cancel(token);
        }
    }

    pub fn is_armed(&self) -> bool {
        self.0.is_some()
    }

    /// Whether `token` is the live timer. Anything else is a stale callback.
    pub fn owns(&self, token: TimerToken) -> bool {
        self.0 == Some(token)
    }

    /// Forget a one-shot token after it fired.
    pub fn clear(&mut self) {
        self.0 = None;
    }
}

#[derive(Debug)]
struct Entry {
    token: TimerToken,
    cadence: Cadence,
    callback: Callback,
    due_ms: u64,
}

/// Scheduling table shared by concrete hosts.
///
/// Repeating entries are rescheduled at fixed rate from their previous due
/// time, so they do not drift. A host that falls behind skips the missed
/// periods instead of firing them in a burst.
#[derive(Debug, Default)]
pub struct Schedule {
    entries: Vec<Entry>,
    next_token: u64,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, now_ms: u64, cadence: Cadence, callback: Callback) -> TimerToken {
        self.next_token += 1;
        let token = TimerToken(self.next_token);
        self.entries.push(Entry {
            token,
            cadence,
            callback,
            due_ms: now_ms.saturating_add(cadence.period_ms()),
        });
        token
    }

    pub fn remove(&mut self, token: TimerToken) {
        self.entries.retain(|e| e.token != token);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Earliest due time of any entry.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.entries.iter().map(|e| e.due_ms).min()
    }

    /// Take the earliest entry due at or before `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(TimerToken, Callback)> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_ms <= now_ms)
            .min_by_key(|(_, e)| (e.due_ms, e.token.0))
            .map(|(idx, _)| idx)?;

        let entry = &mut self.entries[idx];
        let fired = (entry.token, entry.callback);
        match entry.cadence {
            Cadence::Once(_) => {
                self.entries.remove(idx);
            }
            cadence => {
                let period = cadence.period_ms();
                let mut next = entry.due_ms.saturating_add(period);
                if next <= now_ms {
                    let behind = now_ms - entry.due_ms;
                    next = entry.due_ms + (behind / period + 1) * period;
                }
                entry.due_ms = next;
            }
        }
        Some(fired)
    }
}
