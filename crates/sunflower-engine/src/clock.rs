use chrono::Local;

/// Returns a timezone-tagged human timestamp, `"(TZ) YYYY-MM-DD HH:MM:SS"`,
/// using local wall time at the call. Used only for human-visible status
/// fields, never for scheduling decisions.
///
/// `chrono` has no named-timezone table for `Local` (that requires
/// `chrono-tz`), so the offset (e.g. `+09:00`) stands in for the `TZ` name.
pub fn now() -> String {
    let now = Local::now();
    let tz = now.format("%:z").to_string();
    format!("({tz}) {}", now.format("%Y-%m-%d %H:%M:%S"))
}
