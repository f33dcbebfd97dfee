use chrono::{DateTime, Datelike, Local};

/// Returns the current Unix timestamp in milliseconds.
pub fn current_unix_timestamp_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
        .try_into()
        .unwrap_or(u64::MAX)
}

/// Returns true when both timestamps fall on the same local calendar day.
pub fn is_same_local_day(timestamp_ms: u64, now_ms: u64) -> bool {
    match (local_time(timestamp_ms), local_time(now_ms)) {
        (Some(then), Some(now)) => {
            then.year() == now.year() && then.ordinal() == now.ordinal()
        }
        _ => false,
    }
}

/// Renders a timestamp as compact clock text for an alert detail line:
/// `14:05` when the event happened today, `Mon 14:05` otherwise.
pub fn format_clock_time(timestamp_ms: u64, now_ms: u64) -> String {
    let Some(then) = local_time(timestamp_ms) else {
        return String::new();
    };
    if is_same_local_day(timestamp_ms, now_ms) {
        then.format("%H:%M").to_string()
    } else {
        then.format("%a %H:%M").to_string()
    }
}

fn local_time(timestamp_ms: u64) -> Option<DateTime<Local>> {
    let millis = i64::try_from(timestamp_ms).ok()?;
    DateTime::from_timestamp_millis(millis).map(|utc| utc.with_timezone(&Local))
}
