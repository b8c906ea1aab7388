//! Clock formatting
//!
//! Turns a wall-clock time breakdown into the `HH:MM` string both time
//! elements display. Formatting a valid time cannot fail, so there is no
//! error path here.

use core::fmt::Write;

use heapless::String;

/// Capacity of the formatted time string (`HH:MM` is 5 chars)
pub const TIME_LEN: usize = 8;

/// Formatted time, shared verbatim by both time elements
pub type TimeString = String<TIME_LEN>;

/// Hour display preference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HourStyle {
    /// 12-hour clock, hours `01`-`12`
    H12,
    /// 24-hour clock, hours `00`-`23`
    H24,
}

/// A wall-clock time at minute granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Start of day, the fallback when the host clock is unreadable
    pub const MIDNIGHT: TimeOfDay = TimeOfDay { hour: 0, minute: 0 };

    /// Create a time of day, rejecting out-of-range components
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { hour, minute })
        } else {
            None
        }
    }

    /// Hour, 0-23
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Minute, 0-59
    pub fn minute(&self) -> u8 {
        self.minute
    }
}

/// Format a time as `HH:MM` per the hour style
pub fn format_time(time: TimeOfDay, style: HourStyle) -> TimeString {
    let hour = match style {
        HourStyle::H24 => time.hour,
        HourStyle::H12 => match time.hour % 12 {
            0 => 12,
            h => h,
        },
    };

    let mut out = TimeString::new();
    // Cannot fail: 5 chars into an 8-char buffer
    let _ = write!(out, "{:02}:{:02}", hour, time.minute);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn t(hour: u8, minute: u8) -> TimeOfDay {
        TimeOfDay::new(hour, minute).unwrap()
    }

    #[test]
    fn test_24h_morning() {
        assert_eq!(format_time(t(9, 5), HourStyle::H24), "09:05");
    }

    #[test]
    fn test_12h_afternoon() {
        assert_eq!(format_time(t(13, 15), HourStyle::H12), "01:15");
    }

    #[test]
    fn test_12h_midnight_is_twelve() {
        assert_eq!(format_time(t(0, 30), HourStyle::H12), "12:30");
    }

    #[test]
    fn test_12h_noon_is_twelve() {
        assert_eq!(format_time(t(12, 0), HourStyle::H12), "12:00");
    }

    #[test]
    fn test_24h_midnight_is_zero() {
        assert_eq!(format_time(t(0, 0), HourStyle::H24), "00:00");
    }

    #[test]
    fn test_rejects_invalid_components() {
        assert!(TimeOfDay::new(24, 0).is_none());
        assert!(TimeOfDay::new(0, 60).is_none());
        assert!(TimeOfDay::new(23, 59).is_some());
    }

    proptest! {
        #[test]
        fn prop_format_shape(hour in 0u8..24, minute in 0u8..60) {
            for style in [HourStyle::H12, HourStyle::H24] {
                let s = format_time(t(hour, minute), style);
                let bytes = s.as_bytes();
                prop_assert_eq!(s.len(), 5);
                prop_assert_eq!(bytes[2], b':');
                prop_assert!(bytes.iter().enumerate().all(|(i, b)| i == 2 || b.is_ascii_digit()));
            }
        }

        #[test]
        fn prop_hour_ranges(hour in 0u8..24, minute in 0u8..60) {
            let h24: u8 = format_time(t(hour, minute), HourStyle::H24)[..2].parse().unwrap();
            prop_assert_eq!(h24, hour);

            let h12: u8 = format_time(t(hour, minute), HourStyle::H12)[..2].parse().unwrap();
            prop_assert!((1..=12).contains(&h12));
            prop_assert_eq!(h12 % 12, hour % 12);
        }

        #[test]
        fn prop_minutes_unchanged(hour in 0u8..24, minute in 0u8..60) {
            for style in [HourStyle::H12, HourStyle::H24] {
                let m: u8 = format_time(t(hour, minute), style)[3..].parse().unwrap();
                prop_assert_eq!(m, minute);
            }
        }
    }
}
