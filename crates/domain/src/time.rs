//! Time and timestamp helpers.

use chrono::{DateTime, Days, NaiveDate, Utc};

/// UTC timestamp used for log times, token issue times, etc.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Return today's date in UTC.
#[must_use]
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Half-open `[start, end)` UTC range covering the whole of `date`.
#[must_use]
pub fn day_bounds(date: NaiveDate) -> (Timestamp, Timestamp) {
    let start = date.and_time(chrono::NaiveTime::MIN).and_utc();
    let end = date
        .checked_add_days(Days::new(1))
        .unwrap_or(date)
        .and_time(chrono::NaiveTime::MIN)
        .and_utc();
    (start, end)
}
