//! Human-readable sizes, counts, durations and timestamps for log lines
//! and terminal output.

use std::time::Duration;

use chrono::DateTime;

use crate::errors::{BlobError, Result};

const KIB: f64 = 1024.0;
const KILO: f64 = 1000.0;
const MINUTE: f64 = 60.0;
const HOUR: f64 = 60.0 * MINUTE;
const DAY: f64 = 24.0 * HOUR;

/// Binary byte sizes: `"10b"`, `"9.77kb"`, `"9.54Mb"`, ..., capped at `Tb`.
pub fn humanized_bytes(size: u64) -> String {
    if size < 1024 {
        return format!("{size}b");
    }
    let size = size as f64;
    if size < KIB * KIB {
        return format!("{:.2}kb", size / KIB);
    }
    if size < KIB * KIB * KIB {
        return format!("{:.2}Mb", size / (KIB * KIB));
    }
    if size < KIB * KIB * KIB * KIB {
        return format!("{:.2}Gb", size / (KIB * KIB * KIB));
    }
    format!("{:.2}Tb", size / (KIB * KIB * KIB * KIB))
}

/// Decimal magnitudes (like megapixels): `"11"`, `"12.10k"`, ..., capped at `T`.
pub fn humanized_decimal(value: u64) -> String {
    if value < 1000 {
        return value.to_string();
    }
    let value = value as f64;
    if value < KILO * KILO {
        return format!("{:.2}k", value / KILO);
    }
    if value < KILO * KILO * KILO {
        return format!("{:.2}M", value / (KILO * KILO));
    }
    if value < KILO * KILO * KILO * KILO {
        return format!("{:.2}G", value / (KILO * KILO * KILO));
    }
    format!("{:.2}T", value / (KILO * KILO * KILO * KILO))
}

/// Elapsed seconds: `"0 secs"`, `"4.568 msecs"`, `"0.4568 secs"`,
/// `"10.00 secs"`, `"2.25 mins"`, `"1.39 hours"`, `"1.16 days"`.
///
/// Negative, NaN and infinite inputs are `InvalidInput`.
pub fn humanized_seconds(secs: f64) -> Result<String> {
    if !secs.is_finite() || secs < 0.0 {
        return Err(BlobError::InvalidInput(format!(
            "seconds should be finite and >= 0, got {secs}"
        )));
    }
    if secs == 0.0 {
        return Ok("0 secs".to_string());
    }
    let readable = if secs < 0.01 {
        format!("{:.3} msecs", secs * 1000.0)
    } else if secs < 1.0 {
        format!("{secs:.4} secs")
    } else if secs < MINUTE {
        format!("{secs:.2} secs")
    } else if secs < HOUR {
        format!("{:.2} mins", secs / MINUTE)
    } else if secs < DAY {
        format!("{:.2} hours", secs / HOUR)
    } else {
        format!("{:.2} days", secs / DAY)
    };
    Ok(readable)
}

/// `humanized_seconds` for a `Duration`, which is never negative.
pub fn humanized_duration(elapsed: Duration) -> String {
    humanized_seconds(elapsed.as_secs_f64()).unwrap_or_else(|_| "-".to_string())
}

/// UTC timestamp as `2023/Feb/07-16:55:07-UTC`; `0` renders as `"-"`.
pub fn std_time_string(unix_secs: i64) -> String {
    if unix_secs == 0 {
        return "-".to_string();
    }
    DateTime::from_timestamp(unix_secs, 0).map_or_else(
        || "-".to_string(),
        |t| t.format("%Y/%b/%d-%H:%M:%S-UTC").to_string(),
    )
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes() {
        assert_eq!(humanized_bytes(0), "0b");
        assert_eq!(humanized_bytes(10), "10b");
        assert_eq!(humanized_bytes(1023), "1023b");
        assert_eq!(humanized_bytes(10_000), "9.77kb");
        assert_eq!(humanized_bytes(10_000_000), "9.54Mb");
        assert_eq!(humanized_bytes(10_000_000_000), "9.31Gb");
        assert_eq!(humanized_bytes(10_000_000_000_000), "9.09Tb");
        assert_eq!(humanized_bytes(10_000_000_000_000_000), "9094.95Tb");
    }

    #[test]
    fn decimal() {
        assert_eq!(humanized_decimal(0), "0");
        assert_eq!(humanized_decimal(11), "11");
        assert_eq!(humanized_decimal(12_100), "12.10k");
        assert_eq!(humanized_decimal(13_200_000), "13.20M");
        assert_eq!(humanized_decimal(14_300_000_000), "14.30G");
        assert_eq!(humanized_decimal(15_400_000_000_000), "15.40T");
        assert_eq!(humanized_decimal(16_500_000_000_000_000), "16500.00T");
    }

    #[test]
    fn seconds() {
        assert_eq!(humanized_seconds(0.0).unwrap(), "0 secs");
        assert_eq!(humanized_seconds(0.004_567_89).unwrap(), "4.568 msecs");
        assert_eq!(humanized_seconds(0.456_789).unwrap(), "0.4568 secs");
        assert_eq!(humanized_seconds(10.0).unwrap(), "10.00 secs");
        assert_eq!(humanized_seconds(135.0).unwrap(), "2.25 mins");
        assert_eq!(humanized_seconds(5000.0).unwrap(), "1.39 hours");
        assert_eq!(humanized_seconds(100_000.0).unwrap(), "1.16 days");
    }

    #[test]
    fn seconds_rejects_bad_input() {
        assert!(humanized_seconds(-1.0).is_err());
        assert!(humanized_seconds(f64::NAN).is_err());
        assert!(humanized_seconds(f64::INFINITY).is_err());
    }

    #[test]
    fn duration() {
        assert_eq!(humanized_duration(Duration::from_secs(1000)), "16.67 mins");
        assert_eq!(humanized_duration(Duration::ZERO), "0 secs");
    }

    #[test]
    fn time_string() {
        assert_eq!(std_time_string(1_675_788_907), "2023/Feb/07-16:55:07-UTC");
        assert_eq!(std_time_string(0), "-");
    }
}
