/// Formats seconds as `MM:SS`, or `HH:MM:SS` from one hour on.
///
/// Fractions are floored. Negative and non-finite input reads as zero.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };

    let hours = total / 3600;
    let minutes = (total / 60) % 60;
    let seconds = total % 60;

    if hours == 0 {
        format!("{minutes:02}:{seconds:02}")
    } else {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    }
}

/// `part / whole` clamped to `[0, 1]`; zero when `whole` is unknown.
pub fn ratio(part: f64, whole: f64) -> f64 {
    if !(whole.is_finite() && whole > 0.0) || !part.is_finite() {
        return 0.0;
    }
    (part / whole).clamp(0.0, 1.0)
}

pub fn percent(part: f64, whole: f64) -> f64 {
    ratio(part, whole) * 100.0
}
