use chrono::Duration;
use serde_json::Value;

const MICROS_PER_SECOND: i64 = 1_000_000;
const MICROS_PER_DAY: i64 = 86_400 * MICROS_PER_SECOND;

pub fn duration_from_millis(millis: i64) -> Duration {
    Duration::milliseconds(millis)
}

/// Render a duration as `H:MM:SS`, prefixed with a day count when it spans
/// whole days and suffixed with microseconds when they are non-zero.
///
/// Negative durations borrow a whole day: -1s renders as `-1 day, 23:59:59`.
pub fn format_duration(duration: Duration) -> String {
    let total_micros = duration
        .num_microseconds()
        .unwrap_or_else(|| duration.num_milliseconds().saturating_mul(1000));

    let days = total_micros.div_euclid(MICROS_PER_DAY);
    let remainder = total_micros.rem_euclid(MICROS_PER_DAY);
    let seconds = remainder / MICROS_PER_SECOND;
    let micros = remainder % MICROS_PER_SECOND;

    let mut formatted = format!(
        "{}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    );

    if days != 0 {
        let plural = if days.abs() == 1 { "" } else { "s" };
        formatted = format!("{} day{}, {}", days, plural, formatted);
    }

    if micros != 0 {
        formatted.push_str(&format!(".{:06}", micros));
    }

    formatted
}

pub fn format_millis(millis: i64) -> String {
    format_duration(duration_from_millis(millis))
}

/// Plain-text rendering of a record value for CSV and table cells.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items.iter().map(cell_text).collect::<Vec<_>>().join("\n"),
        Value::Object(_) => value.to_string(),
    }
}
