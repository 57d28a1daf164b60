use crate::error::DurationError;

/// Countdown duration as entered in the hours/minutes/seconds widgets.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct DurationInput {
    pub hours: u64,
    pub minutes: u32,
    pub seconds: u32,
}

impl DurationInput {
    pub fn new(hours: u64, minutes: u32, seconds: u32) -> Self {
        Self { hours, minutes, seconds }
    }

    /// Validate the fields and convert to milliseconds.
    ///
    /// Minutes and seconds are checked even though the widgets clamp them.
    pub fn to_millis(self) -> Result<u64, DurationError> {
        if self.minutes > 59 {
            return Err(DurationError::MinutesOutOfRange(self.minutes));
        }
        if self.seconds > 59 {
            return Err(DurationError::SecondsOutOfRange(self.seconds));
        }
        let overflow = DurationError::Overflow { hours: self.hours };
        let total_secs = self
            .hours
            .checked_mul(3600)
            .and_then(|s| s.checked_add(u64::from(self.minutes) * 60 + u64::from(self.seconds)))
            .ok_or(overflow)?;
        let total_ms = total_secs.checked_mul(1000).ok_or(overflow)?;
        if total_ms == 0 {
            return Err(DurationError::Zero);
        }
        Ok(total_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(DurationInput::new(0, 0, 1), 1_000)]
    #[case(DurationInput::new(0, 1, 30), 90_000)]
    #[case(DurationInput::new(1, 0, 0), 3_600_000)]
    #[case(DurationInput::new(2, 59, 59), 10_799_000)]
    fn test_valid_input(#[case] input: DurationInput, #[case] expected: u64) {
        assert_eq!(input.to_millis(), Ok(expected));
    }

    #[rstest]
    #[case(DurationInput::new(0, 0, 0), DurationError::Zero)]
    #[case(DurationInput::new(0, 60, 0), DurationError::MinutesOutOfRange(60))]
    #[case(DurationInput::new(1, 0, 99), DurationError::SecondsOutOfRange(99))]
    #[case(DurationInput::new(u64::MAX, 0, 0), DurationError::Overflow { hours: u64::MAX })]
    fn test_rejected_input(#[case] input: DurationInput, #[case] expected: DurationError) {
        assert_eq!(input.to_millis(), Err(expected));
    }
}
