//! Timestamp column encoding.
//!
//! Timestamps are stored as fixed-width RFC 3339 UTC strings so that
//! lexical order in SQL matches chronological order.

use chrono::SecondsFormat;
use pottydog_domain::time::Timestamp;

pub(crate) fn encode(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn decode(value: &str) -> Result<Timestamp, sqlx::Error> {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.to_utc())
        .map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn should_encode_fixed_width_utc() {
        let ts = chrono::Utc.with_ymd_and_hms(2024, 3, 9, 8, 30, 0).unwrap();
        assert_eq!(encode(ts), "2024-03-09T08:30:00.000000Z");
        assert_eq!(decode(&encode(ts)).unwrap(), ts);
    }
}
