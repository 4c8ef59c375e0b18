//! Clock helpers. All persisted timestamps are epoch milliseconds.

use chrono::{DateTime, Local, TimeZone};

pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Local date of an epoch-millisecond timestamp
pub fn local_date(ms: i64) -> Option<chrono::NaiveDate> {
    Local.timestamp_millis_opt(ms).single().map(|dt: DateTime<Local>| dt.date_naive())
}

/// `1h 05m`, `12m 30s`, `45s`
pub fn format_duration(ms: i64) -> String {
    let secs = ms.max(0) / 1000;
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{}h {:02}m", h, m)
    } else if m > 0 {
        format!("{}m {:02}s", m, s)
    } else {
        format!("{}s", s)
    }
}
