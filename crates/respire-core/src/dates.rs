//! Date and duration display helpers.

use chrono::{Local, NaiveDate};

/// Today's calendar date on the local clock.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `YYYY-MM-DD`, the form dates are stored and displayed in.
pub fn to_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Compact duration label: `"45s"` under a minute, `"1m 05s"` above.
///
/// Fractional input is rounded to the nearest whole second; negatives
/// clamp to zero.
pub fn format_seconds(seconds: f64) -> String {
    let safe = seconds.round().max(0.0) as u64;
    let mins = safe / 60;
    let secs = safe % 60;
    if mins == 0 {
        format!("{secs}s")
    } else {
        format!("{mins}m {secs:02}s")
    }
}

/// Friendly phrasing for a stored date: `"today"`, `"yesterday"`, or the
/// ISO date itself. `None` stays `None` so callers can show their own
/// placeholder.
pub fn describe_date(date: Option<NaiveDate>, today: NaiveDate) -> Option<String> {
    let date = date?;
    if date == today {
        return Some("today".to_string());
    }
    if today.pred_opt() == Some(date) {
        return Some("yesterday".to_string());
    }
    Some(to_iso_date(date))
}
