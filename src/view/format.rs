//! Human-readable size and duration formatting.

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Format a byte count with base-1024 units, rounded to two decimals with
/// trailing zeros dropped.
///
/// ```
/// use media_transcriber::view::format_file_size;
///
/// assert_eq!(format_file_size(0), "0 Bytes");
/// assert_eq!(format_file_size(1536), "1.5 KB");
/// assert_eq!(format_file_size(1_048_576), "1 MB");
/// ```
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    while unit + 1 < SIZE_UNITS.len() && bytes >= 1u64 << (10 * (unit + 1)) {
        unit += 1;
    }

    let value = bytes as f64 / (1u64 << (10 * unit)) as f64;
    let rounded = (value * 100.0).round() / 100.0;
    let mut text = format!("{rounded:.2}");
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    format!("{text} {}", SIZE_UNITS[unit])
}

/// Format seconds as `m:ss`, or `h:mm:ss` from one hour up.  Fractions are
/// truncated.
///
/// ```
/// use media_transcriber::view::format_duration;
///
/// assert_eq!(format_duration(125.0), "2:05");
/// assert_eq!(format_duration(3725.9), "1:02:05");
/// ```
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_size_examples() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(1), "1 Bytes");
        assert_eq!(format_file_size(1023), "1023 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1_048_576), "1 MB");
        assert_eq!(format_file_size(500 * 1024 * 1024), "500 MB");
    }

    #[test]
    fn file_size_rounds_to_two_decimals() {
        // 1.2345 MB
        assert_eq!(format_file_size(1_294_467), "1.23 MB");
        assert_eq!(format_file_size(2_621_440), "2.5 MB");
    }

    #[test]
    fn file_size_caps_at_gigabytes() {
        assert_eq!(format_file_size(3 * (1u64 << 30)), "3 GB");
        assert_eq!(format_file_size(1u64 << 40), "1024 GB");
    }

    #[test]
    fn duration_examples() {
        assert_eq!(format_duration(0.0), "0:00");
        assert_eq!(format_duration(9.99), "0:09");
        assert_eq!(format_duration(125.0), "2:05");
        assert_eq!(format_duration(3599.0), "59:59");
        assert_eq!(format_duration(3600.0), "1:00:00");
        assert_eq!(format_duration(36_061.0), "10:01:01");
    }

    #[test]
    fn duration_ignores_nonsense_input() {
        assert_eq!(format_duration(-5.0), "0:00");
        assert_eq!(format_duration(f64::NAN), "0:00");
    }
}
