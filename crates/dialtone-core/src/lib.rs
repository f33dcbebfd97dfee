//! Foundational low-level utilities shared across dialtone crates.
//!
//! Provides the Unix-millisecond clock and the compact clock-time rendering
//! used by grouped alert detail lines.

pub mod time_utils;

pub use time_utils::{current_unix_timestamp_ms, format_clock_time, is_same_local_day};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_is_plausible() {
        // 2020-01-01T00:00:00Z in milliseconds.
        assert!(current_unix_timestamp_ms() > 1_577_836_800_000);
    }

    #[test]
    fn same_day_formatting_omits_the_weekday() {
        let now = 1_754_000_000_000;
        let rendered = format_clock_time(now, now);
        assert_eq!(rendered.split_whitespace().count(), 1);
    }

    #[test]
    fn cross_day_formatting_prefixes_the_weekday() {
        let now = 1_754_000_000_000;
        let three_days_ago = now - 3 * 24 * 60 * 60 * 1_000;
        let rendered = format_clock_time(three_days_ago, now);
        assert_eq!(rendered.split_whitespace().count(), 2);
        assert!(!is_same_local_day(three_days_ago, now));
    }

    #[test]
    fn same_instant_is_same_local_day() {
        let now = 1_754_000_000_000;
        assert!(is_same_local_day(now, now));
    }
}
