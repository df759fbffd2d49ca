//! Time-of-day arithmetic for shift windows
//!
//! Task rows carry naive `HH:MM:SS` wall-clock strings with no date or
//! timezone attached. A shift window is the pair (start, end) of such
//! strings; windows may cross midnight at most once (a 22:00 to 02:00
//! night shift), never more.

/// Convert an `HH:MM:SS` time-of-day string to decimal hours.
///
/// `"01:30:00"` becomes `1.5`. Empty or malformed input yields `0.0` -
/// upstream data is dirty often enough that "no data" has to be a value,
/// not an error.
pub fn time_to_decimal_hours(s: &str) -> f64 {
    if s.trim().is_empty() {
        return 0.0;
    }

    let mut parts = s.trim().splitn(3, ':');
    let hours = component(parts.next());
    let minutes = component(parts.next());
    let seconds = component(parts.next());

    hours + minutes / 60.0 + seconds / 3600.0
}

/// Elapsed hours between two time-of-day strings, rounded to 2 decimals.
///
/// When the end reads earlier than the start the window is assumed to
/// cross midnight once, so 24 hours are added to the end before
/// subtracting. Windows longer than 24 hours are not representable.
/// A missing endpoint yields `0.0`.
pub fn elapsed_hours(start: &str, end: &str) -> f64 {
    if start.trim().is_empty() || end.trim().is_empty() {
        return 0.0;
    }

    let start = time_to_decimal_hours(start);
    let mut end = time_to_decimal_hours(end);

    // Night shift: ended after the clock wrapped.
    if end < start {
        end += 24.0;
    }

    round2(end - start)
}

fn component(part: Option<&str>) -> f64 {
    part.and_then(|p| p.trim().parse::<u32>().ok())
        .map(f64::from)
        .unwrap_or(0.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
