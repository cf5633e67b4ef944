//! Clip timestamp formatting for the edge labels

/// Format a clip timestamp as MM:SS or HH:MM:SS.
///
/// Negative values (the unset-end sentinel included) render as `--:--`.
pub fn format_clip_time(seconds: f64) -> String {
    if seconds < 0.0 || !seconds.is_finite() {
        return "--:--".to_string();
    }
    let total = seconds.round() as u64;
    let hours = total / 3600;
    let mins = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{:02}:{:02}", mins, secs)
    }
}
