use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Current UTC instant as a naive timestamp, the form stored in the ledger.
pub fn ledger_now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Picks the timestamp for a new movement on a SKU/warehouse pair.
///
/// Timestamps must strictly increase within a pair so that replaying
/// "at or after the latest snapshot" never picks up a movement that was
/// written before that snapshot.
pub fn next_ledger_timestamp(now: NaiveDateTime, latest: Option<NaiveDateTime>) -> NaiveDateTime {
    match latest {
        Some(last) if last >= now => last + Duration::microseconds(1),
        _ => now,
    }
}

/// Inclusive datetime bounds for a date range filter.
///
/// `start` maps to the first instant of its day and `end` to the last
/// representable microsecond of its day.
pub fn day_bounds(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> (Option<NaiveDateTime>, Option<NaiveDateTime>) {
    let from = start.map(|d| d.and_time(NaiveTime::MIN));
    let to = end.map(|d| d.and_time(NaiveTime::MIN) + Duration::days(1) - Duration::microseconds(1));
    (from, to)
}
