//! Editor-style timestamps

/// Format a time in milliseconds as `mm:ss:mmm`
///
/// # Example
///
/// ```
/// use hitsound_analysis::features::usage::timestamp::format_timestamp;
///
/// assert_eq!(format_timestamp(83_456.0), "01:23:456");
/// assert_eq!(format_timestamp(-250.0), "-00:00:250");
/// ```
pub fn format_timestamp(time_ms: f64) -> String {
    let sign = if time_ms < 0.0 { "-" } else { "" };
    let total = time_ms.abs().round() as u64;
    let minutes = total / 60_000;
    let seconds = (total / 1000) % 60;
    let millis = total % 1000;
    format!("{}{:02}:{:02}:{:03}", sign, minutes, seconds, millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_zero() {
        assert_eq!(format_timestamp(0.0), "00:00:000");
    }

    #[test]
    fn test_format_rounds_fractional_ms() {
        assert_eq!(format_timestamp(1000.6), "00:01:001");
    }

    #[test]
    fn test_format_long_maps() {
        assert_eq!(format_timestamp(125.0 * 60_000.0), "125:00:000");
    }
}
