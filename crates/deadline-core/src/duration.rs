//! Duration parsing for the four countdown input fields.
//!
//! Each field defaults to 0 when absent or non-numeric; the computed
//! total must be positive before the engine may be started.

use serde::{Deserialize, Serialize};

use crate::error::DurationError;

pub const SECS_PER_MINUTE: u64 = 60;
pub const SECS_PER_HOUR: u64 = 3_600;
pub const SECS_PER_DAY: u64 = 86_400;

/// The four numeric input fields of a countdown duration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationSpec {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl DurationSpec {
    pub fn new(days: u64, hours: u64, minutes: u64, seconds: u64) -> Self {
        Self {
            days,
            hours,
            minutes,
            seconds,
        }
    }

    /// Parse the four fields from free text. Non-numeric or empty input
    /// coerces to 0, matching the permissive input surface.
    pub fn from_fields(days: &str, hours: &str, minutes: &str, seconds: &str) -> Self {
        Self {
            days: parse_field(days),
            hours: parse_field(hours),
            minutes: parse_field(minutes),
            seconds: parse_field(seconds),
        }
    }

    /// Collapse into a single second count.
    ///
    /// # Errors
    /// Returns [`DurationError::Zero`] when the computed total is zero;
    /// the caller must not start the engine in that case. No upper bound
    /// is enforced beyond saturation.
    pub fn total_seconds(&self) -> Result<u64, DurationError> {
        let total = self
            .days
            .saturating_mul(SECS_PER_DAY)
            .saturating_add(self.hours.saturating_mul(SECS_PER_HOUR))
            .saturating_add(self.minutes.saturating_mul(SECS_PER_MINUTE))
            .saturating_add(self.seconds);
        if total == 0 {
            return Err(DurationError::Zero);
        }
        Ok(total)
    }
}

fn parse_field(input: &str) -> u64 {
    input.trim().parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combines_all_fields() {
        let spec = DurationSpec::new(1, 2, 3, 4);
        assert_eq!(spec.total_seconds().unwrap(), 86_400 + 7_200 + 180 + 4);
    }

    #[test]
    fn zero_total_is_rejected() {
        assert_eq!(
            DurationSpec::default().total_seconds(),
            Err(DurationError::Zero)
        );
    }

    #[test]
    fn non_numeric_fields_coerce_to_zero() {
        let spec = DurationSpec::from_fields("", "abc", " 5 ", "-3");
        assert_eq!(spec, DurationSpec::new(0, 0, 5, 0));
        assert_eq!(spec.total_seconds().unwrap(), 300);
    }

    #[test]
    fn seconds_only() {
        let spec = DurationSpec::from_fields("0", "0", "0", "100");
        assert_eq!(spec.total_seconds().unwrap(), 100);
    }

    #[test]
    fn absurd_input_saturates_instead_of_overflowing() {
        let spec = DurationSpec::new(u64::MAX, 0, 0, 1);
        assert_eq!(spec.total_seconds().unwrap(), u64::MAX);
    }
}
