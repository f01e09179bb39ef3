//! Progress projection: the single dimensionless read of engine state
//! that every visual consumer derives from.

use serde::{Deserialize, Serialize};

use crate::duration::{SECS_PER_DAY, SECS_PER_HOUR, SECS_PER_MINUTE};

/// Elapsed fraction of a run, in `[0, 1]`.
///
/// By convention returns 0.0 when `total` is 0 (the idle/reset display).
/// Monotonically non-decreasing over the life of one run.
pub fn fraction(remaining_secs: u64, total_secs: u64) -> f64 {
    if total_secs == 0 {
        return 0.0;
    }
    1.0 - (remaining_secs as f64 / total_secs as f64)
}

/// A second count split into display units. Days are unbounded; the
/// other fields stay below their modulus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBreakdown {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl TimeBreakdown {
    pub fn from_secs(secs: u64) -> Self {
        Self {
            days: secs / SECS_PER_DAY,
            hours: (secs % SECS_PER_DAY) / SECS_PER_HOUR,
            minutes: (secs % SECS_PER_HOUR) / SECS_PER_MINUTE,
            seconds: secs % SECS_PER_MINUTE,
        }
    }

    /// The text readout, each field zero-padded to width 2. The days
    /// field keeps growing past 99; padding still applies below 10.
    pub fn readout(&self) -> String {
        format!(
            "{:02} DAYS | {:02} HRS | {:02} MINS | {:02} SECS",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_bounds() {
        assert_eq!(fraction(100, 100), 0.0);
        assert_eq!(fraction(0, 100), 1.0);
        assert!((fraction(50, 100) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn fraction_of_zero_total_is_zero() {
        assert_eq!(fraction(0, 0), 0.0);
    }

    #[test]
    fn breakdown_splits_units() {
        let b = TimeBreakdown::from_secs(86_400 + 3_600 + 60 + 1);
        assert_eq!(
            b,
            TimeBreakdown {
                days: 1,
                hours: 1,
                minutes: 1,
                seconds: 1
            }
        );
    }

    #[test]
    fn readout_zero_pads_each_field() {
        let b = TimeBreakdown::from_secs(0);
        assert_eq!(b.readout(), "00 DAYS | 00 HRS | 00 MINS | 00 SECS");
    }

    #[test]
    fn readout_days_unbounded_above_99() {
        let b = TimeBreakdown::from_secs(150 * 86_400);
        assert_eq!(b.readout(), "150 DAYS | 00 HRS | 00 MINS | 00 SECS");
    }

    #[test]
    fn readout_mixed() {
        // 1 day, 2 hrs, 3 mins, 4 secs
        let b = TimeBreakdown::from_secs(93_784);
        assert_eq!(b.readout(), "01 DAYS | 02 HRS | 03 MINS | 04 SECS");
    }
}
