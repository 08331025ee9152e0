use chrono::{DateTime, Days, Local, NaiveDate, NaiveTime, TimeZone, Utc};

/// Start of the current calendar day on the local server clock, in UTC.
///
/// Used as the "since" cutoff for issue queries. The window is deliberately
/// coarse: a process restart re-reports issues already seen earlier the same
/// day.
pub fn start_of_local_day() -> DateTime<Utc> {
    local_midnight_utc(Local::now().date_naive())
}

/// The current local calendar day as a UTC `[start, end)` window.
///
/// The telemetry API stores timestamps in UTC, so local day boundaries are
/// converted before querying.
pub fn local_day_window() -> (DateTime<Utc>, DateTime<Utc>) {
    let today = Local::now().date_naive();
    (local_midnight_utc(today), local_midnight_utc(today + Days::new(1)))
}

fn local_midnight_utc(day: NaiveDate) -> DateTime<Utc> {
    let midnight = day.and_time(NaiveTime::MIN);
    midnight
        .and_local_timezone(Local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        // A local timezone without a midnight on this day (DST gap); fall
        // back to treating the naive midnight as UTC.
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}
