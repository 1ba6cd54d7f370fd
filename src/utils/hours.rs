use chrono::{NaiveDateTime, NaiveTime, Timelike};

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Hours between two times of day on the same nominal date, rounded to two
/// decimals. Negative when `punch_out` is earlier than `punch_in`.
pub fn hours_between(punch_in: NaiveTime, punch_out: NaiveTime) -> f64 {
    let seconds = punch_out.signed_duration_since(punch_in).num_seconds();
    round_to_cents(seconds as f64 / SECONDS_PER_HOUR)
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Wall-clock time truncated to whole seconds, the precision punch times are stored at.
pub fn punch_time(now: NaiveDateTime) -> NaiveTime {
    let time = now.time();
    time.with_nanosecond(0).unwrap_or(time)
}
