mod ui;

use std::io::BufRead;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use timer_widget::{
    ActiveView, Cadence, Callback, Host, Schedule, TimerConfig, TimerToken, TimersApp,
};
use tracing_subscriber::EnvFilter;

use crate::ui::TerminalSurface;

const APP_NAME: &str = "Timers";
const CONFIG_ENV: &str = "TIMERS_CONFIG";

type App = TimersApp<PumpHost, TerminalSurface<std::io::Stdout>>;

#[derive(Debug)]
enum AppOp {
    Line(String),
    Quit,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Key {
    Toggle,
    Lap,
    Reset,
    SwitchView,
    SetDuration(u64, u32, u32),
    Quit,
}

fn parse_key(line: &str) -> Option<Key> {
    let mut words = line.split_whitespace();
    let key = match words.next() {
        None => Key::Toggle,
        Some("l") => Key::Lap,
        Some("r") => Key::Reset,
        Some("v") => Key::SwitchView,
        Some("q") => Key::Quit,
        Some("d") => {
            let hours = words.next()?.parse().ok()?;
            let minutes = words.next()?.parse().ok()?;
            let seconds = words.next()?.parse().ok()?;
            Key::SetDuration(hours, minutes, seconds)
        }
        Some(_) => return None,
    };
    if words.next().is_some() {
        return None;
    }
    Some(key)
}

/// Real-time host: wall-clock offsets from process start plus a schedule
/// polled by the message loop.
struct PumpHost {
    epoch: Instant,
    schedule: Schedule,
}

impl PumpHost {
    fn new() -> Self {
        Self {
            epoch: Instant::now(),
            schedule: Schedule::new(),
        }
    }

    /// Time until the next callback, or `None` when nothing is scheduled.
    fn wait_time(&self) -> Option<Duration> {
        self.schedule
            .next_due_ms()
            .map(|due| Duration::from_millis(due.saturating_sub(self.now_ms())))
    }

    fn take_due(&mut self) -> Option<(TimerToken, Callback)> {
        let now = self.now_ms();
        self.schedule.pop_due(now)
    }
}

impl Host for PumpHost {
    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    fn schedule(&mut self, cadence: Cadence, callback: Callback) -> TimerToken {
        let now = self.now_ms();
        self.schedule.insert(now, cadence, callback)
    }

    fn cancel(&mut self, token: TimerToken) {
        self.schedule.remove(token);
    }
}

/// Returns `false` once the app should quit.
fn handle_key(app: &mut App, key: Key) -> bool {
    // Rejected commands are already logged and surfaced by the app.
    let _ = match key {
        Key::Toggle => app.toggle_active(),
        Key::Lap => app.request_lap(),
        Key::Reset => app.reset_active(),
        Key::SetDuration(h, m, s) => app.request_set_duration(h, m, s),
        Key::SwitchView => {
            let next = match app.view() {
                ActiveView::Stopwatch => ActiveView::Countdown,
                ActiveView::Countdown => ActiveView::Stopwatch,
            };
            app.surface_mut().set_view(next);
            app.switch_view(next);
            Ok(())
        }
        Key::Quit => return false,
    };
    true
}

fn input_thread(tx: mpsc::Sender<AppOp>) {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        match line {
            Ok(line) => {
                if tx.send(AppOp::Line(line)).is_err() {
                    return;
                }
            }
            Err(e) => {
                log::error!("stdin read failed: {}", e);
                break;
            }
        }
    }
    tx.send(AppOp::Quit).ok();
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("timer_widget=info,timers=info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn load_config() -> TimerConfig {
    let Some(path) = std::env::var_os(CONFIG_ENV).map(PathBuf::from) else {
        return TimerConfig::default();
    };
    match TimerConfig::load(&path) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}; using defaults", e);
            TimerConfig::default()
        }
    }
}

fn main() {
    init_logging();
    log::info!("{} PID is {}", APP_NAME, std::process::id());

    let config = load_config();
    let mut surface = TerminalSurface::new(std::io::stdout());
    surface.set_view(ActiveView::Stopwatch);
    let mut app = TimersApp::new(PumpHost::new(), surface, config);

    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || input_thread(tx));

    loop {
        // Block-wait when nothing is scheduled.
        let op = match app.host().wait_time() {
            Some(wait) => match rx.recv_timeout(wait) {
                Ok(op) => Some(op),
                Err(mpsc::RecvTimeoutError::Timeout) => None,
                Err(mpsc::RecvTimeoutError::Disconnected) => Some(AppOp::Quit),
            },
            None => Some(rx.recv().unwrap_or(AppOp::Quit)),
        };

        match op {
            Some(AppOp::Line(line)) => match parse_key(&line) {
                Some(key) => {
                    if !handle_key(&mut app, key) {
                        break;
                    }
                }
                None => log::warn!("unknown command: {:?}", line),
            },
            Some(AppOp::Quit) => break,
            None => {}
        }

        while let Some((token, callback)) = app.host_mut().take_due() {
            app.handle_callback(token, callback);
        }
    }

    if app.any_timer_running() {
        log::info!("exiting with a timer still running");
    }
    log::info!("{} exiting", APP_NAME);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", Some(Key::Toggle))]
    #[case("   ", Some(Key::Toggle))]
    #[case("l", Some(Key::Lap))]
    #[case("r", Some(Key::Reset))]
    #[case("v", Some(Key::SwitchView))]
    #[case("q", Some(Key::Quit))]
    #[case("d 1 30 0", Some(Key::SetDuration(1, 30, 0)))]
    #[case("d 0 0 75", Some(Key::SetDuration(0, 0, 75)))]
    #[case("d 1 30", None)]
    #[case("d 1 x 0", None)]
    #[case("d -1 0 0", None)]
    #[case("l now", None)]
    #[case("start", None)]
    fn test_parse_key(#[case] line: &str, #[case] expected: Option<Key>) {
        assert_eq!(parse_key(line), expected);
    }

    #[test]
    fn test_pump_host_schedules_relative_to_now() {
        let mut host = PumpHost::new();
        assert_eq!(host.wait_time(), None);
        host.schedule(Cadence::Once(60_000), Callback::AlarmClear);
        let wait = host.wait_time().unwrap();
        assert!(wait > Duration::from_millis(59_000));
        assert_eq!(host.take_due(), None);
    }
}
