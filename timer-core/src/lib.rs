//! Pure timing logic library with no platform dependencies.
//! Every operation takes the sampled clock value (`now_ms`) from the caller,
//! so one logical step always sees one instant.

mod countdown;
mod error;
mod input;
mod stopwatch;

pub use countdown::{Countdown, CountdownState, Tick};
pub use error::{Command, DurationError, InvalidTransition, TimerError};
pub use input::DurationInput;
pub use stopwatch::{Lap, Stopwatch, StopwatchState};

/// Format milliseconds as "HH:MM:SS", truncating the sub-second part.
pub fn format_hms(ms: u64) -> String {
    format_secs(ms / 1000)
}

fn format_secs(total_secs: u64) -> String {
    let h = total_secs / 3600;
    let m = (total_secs % 3600) / 60;
    let s = total_secs % 60;
    format!("{:02}:{:02}:{:02}", h, m, s)
}

/// Format milliseconds as "HH:MM:SS.mmm" (stopwatch readout).
pub fn format_hms_millis(ms: u64) -> String {
    format!("{}.{:03}", format_hms(ms), ms % 1000)
}

/// Format milliseconds as "HH:MM:SS", rounding any partial second up.
///
/// A countdown with 59.2s left reads "00:01:00": the display only reaches
/// "00:00:00" once the time is really gone.
pub fn format_hms_ceil(ms: u64) -> String {
    format_secs(ms / 1000 + u64::from(ms % 1000 != 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "00:00:00")]
    #[case(61_000, "00:01:01")]
    #[case(3_661_000, "01:01:01")]
    #[case(59_999, "00:00:59")]
    fn test_format_hms(#[case] ms: u64, #[case] expected: &str) {
        assert_eq!(format_hms(ms), expected);
    }

    #[rstest]
    #[case(0, "00:00:00.000")]
    #[case(1_000, "00:00:01.000")]
    #[case(2_500, "00:00:02.500")]
    #[case(12_345, "00:00:12.345")]
    #[case(3_723_004, "01:02:03.004")]
    fn test_format_hms_millis(#[case] ms: u64, #[case] expected: &str) {
        assert_eq!(format_hms_millis(ms), expected);
    }

    #[rstest]
    #[case(0, "00:00:00")]
    #[case(1, "00:00:01")]
    #[case(300, "00:00:01")]
    #[case(1_000, "00:00:01")]
    #[case(1_001, "00:00:02")]
    #[case(59_200, "00:01:00")]
    #[case(3_599_500, "01:00:00")]
    fn test_format_hms_ceil(#[case] ms: u64, #[case] expected: &str) {
        assert_eq!(format_hms_ceil(ms), expected);
    }

    #[test]
    fn test_hours_do_not_wrap() {
        let hundred_hours = 100 * 3600 * 1000;
        assert_eq!(format_hms(hundred_hours), "100:00:00");
        assert_eq!(format_hms_millis(25 * 3600 * 1000 + 7), "25:00:00.007");
        assert_eq!(format_hms_ceil(hundred_hours - 1), "100:00:00");
    }
}
