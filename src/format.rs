//! Remaining-time formatting.
//!
//! The formatter is a pure function with no dependency on any model state,
//! so the embedding application can call it on whatever value it is
//! rendering, not just on a live countdown.

/// Formats a millisecond count as a zero-padded `MM:SS` string.
///
/// Negative input clamps to zero before conversion. There is no upper bound
/// on the minute field: durations past an hour render with three or more
/// digits rather than wrapping.
///
/// # Examples
///
/// ```rust
/// use bubbletea_countdown::format::format_time;
///
/// assert_eq!(format_time(0), "00:00");
/// assert_eq!(format_time(60_000), "01:00");
/// assert_eq!(format_time(125_000), "02:05");
/// assert_eq!(format_time(-500), "00:00");
/// ```
pub fn format_time(ms: i64) -> String {
    let total_seconds = ms.max(0) / 1000;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}", minutes, seconds)
}
