//! Human-readable byte counts and durations.

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a byte count with two decimals in the largest fitting unit.
///
/// `0` renders as `"0 B"`. Units step by 1024 and stop at TB.
pub fn readable_size(bytes: u64) -> String {
    readable_size_with_precision(bytes, 2)
}

/// Format a byte count with the given number of decimals.
///
/// Values below one kilobyte are whole bytes and are printed without decimals.
pub fn readable_size_with_precision(bytes: u64, decimals: usize) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut exponent = 0;
    let mut divisor = 1u64;
    while exponent < UNITS.len() - 1 && bytes / divisor >= 1024 {
        divisor *= 1024;
        exponent += 1;
    }

    if exponent == 0 {
        return format!("{} B", bytes);
    }

    let scaled = bytes as f64 / divisor as f64;
    format!("{:.*} {}", decimals, scaled, UNITS[exponent])
}

/// Format a duration given in whole seconds.
///
/// Under a minute: `"42s"`. Under an hour: `"3m 7s"`. Otherwise `"2h 5m"`.
/// Components are truncated, never rounded.
pub fn readable_time(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else {
        let minutes = seconds / 60;
        format!("{}h {}m", minutes / 60, minutes % 60)
    }
}

/// Format a fractional duration, truncating to whole seconds first.
///
/// Negative or non-finite values have no meaningful rendering and yield `None`.
pub fn readable_time_f64(seconds: f64) -> Option<String> {
    if !seconds.is_finite() || seconds < 0.0 {
        return None;
    }
    Some(readable_time(seconds.trunc() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readable_size_zero() {
        assert_eq!(readable_size(0), "0 B");
    }

    #[test]
    fn test_readable_size_kilobytes() {
        assert_eq!(readable_size(1536), "1.50 KB");
        assert_eq!(readable_size(1024), "1.00 KB");
    }

    #[test]
    fn test_readable_size_bytes_have_no_decimals() {
        assert_eq!(readable_size(1), "1 B");
        assert_eq!(readable_size(1023), "1023 B");
    }

    #[test]
    fn test_readable_size_larger_units() {
        assert_eq!(readable_size(5 * 1024 * 1024), "5.00 MB");
        assert_eq!(readable_size(2_254_857_830), "2.10 GB");
        assert_eq!(readable_size(3 * 1024u64.pow(4)), "3.00 TB");
    }

    #[test]
    fn test_readable_size_caps_at_terabytes() {
        assert_eq!(readable_size(2048 * 1024u64.pow(4)), "2048.00 TB");
    }

    #[test]
    fn test_readable_size_with_precision() {
        assert_eq!(readable_size_with_precision(1536, 1), "1.5 KB");
        assert_eq!(readable_size_with_precision(1_572_864, 0), "2 MB");
    }

    #[test]
    fn test_readable_time_seconds() {
        assert_eq!(readable_time(0), "0s");
        assert_eq!(readable_time(59), "59s");
    }

    #[test]
    fn test_readable_time_minutes() {
        assert_eq!(readable_time(60), "1m 0s");
        assert_eq!(readable_time(65), "1m 5s");
        assert_eq!(readable_time(3599), "59m 59s");
    }

    #[test]
    fn test_readable_time_hours() {
        assert_eq!(readable_time(3600), "1h 0m");
        assert_eq!(readable_time(3725), "1h 2m");
        assert_eq!(readable_time(148 * 60), "2h 28m");
    }

    #[test]
    fn test_readable_time_f64_truncates() {
        assert_eq!(readable_time_f64(65.9).as_deref(), Some("1m 5s"));
        assert_eq!(readable_time_f64(f64::INFINITY), None);
        assert_eq!(readable_time_f64(-1.0), None);
    }
}
