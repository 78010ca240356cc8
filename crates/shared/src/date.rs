use time::OffsetDateTime;

/// Current unix timestamp in milliseconds.
pub fn now() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}
