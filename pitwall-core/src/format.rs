//! Lap time formatting for display

/// Format seconds as `minutes:seconds.millis`, with the seconds part
/// zero-padded to width 6 (e.g. `82.123` becomes `1:22.123`).
pub fn format_lap_time(seconds: f64) -> String {
    let minutes = (seconds / 60.0).floor();
    let secs = seconds % 60.0;
    format!("{}:{:06.3}", minutes as i64, secs)
}
