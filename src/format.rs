// src/format.rs
//! Display formatting for counters and wall-clock time.

use chrono::{DateTime, Local, TimeZone};

/// Render a magnitude with a K/M suffix.
///
/// - `< 1_000` → the integer as-is (`"999"`)
/// - `< 1_000_000` → thousands with one decimal (`"1.5K"`)
/// - otherwise → millions with one decimal (`"2.5M"`)
pub fn format_magnitude(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Current local time as 24h `HH:MM:SS`.
pub fn format_clock_time() -> String {
    format_clock_time_at(&Local::now())
}

/// Same as [`format_clock_time`] for an explicit instant.
pub fn format_clock_time_at<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn band_edges() {
        assert_eq!(format_magnitude(0), "0");
        assert_eq!(format_magnitude(999), "999");
        assert_eq!(format_magnitude(1_000), "1.0K");
        assert_eq!(format_magnitude(999_999), "1000.0K");
        assert_eq!(format_magnitude(1_000_000), "1.0M");
    }

    #[test]
    fn clock_is_zero_padded() {
        let at = Utc.with_ymd_and_hms(2025, 9, 6, 7, 5, 3).unwrap();
        assert_eq!(format_clock_time_at(&at), "07:05:03");
    }
}
