use chrono::{DateTime, Utc};

/// Convert an export `create_time` (unix seconds, possibly fractional) to a UTC datetime
///
/// Returns `None` for non-finite or out-of-range values.
pub fn create_time_to_datetime(create_time: f64) -> Option<DateTime<Utc>> {
    if !create_time.is_finite() {
        return None;
    }

    let secs = create_time.floor();
    let nanos = ((create_time - secs) * 1_000_000_000.0).round() as u32;
    // Rounding can carry a full second into the fractional part
    let (secs, nanos) = if nanos >= 1_000_000_000 { (secs + 1.0, 0) } else { (secs, nanos) };

    if secs < i64::MIN as f64 || secs > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp(secs as i64, nanos)
}

/// Format a `create_time` as "2024-01-15 10:30:00 UTC"
pub fn format_create_time(create_time: f64) -> Option<String> {
    create_time_to_datetime(create_time)
        .map(|timestamp| timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string())
}
