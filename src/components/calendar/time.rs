use crate::components::extractor::DayLabel;
use crate::error::{calendar_error, ScheduleResult};
use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, TimeZone};
use chrono_tz::Tz;

/// Date a day label falls on in the week containing `week_start`
pub fn event_date(week_start: NaiveDate, day: DayLabel) -> NaiveDate {
    let start_index = week_start.weekday().num_days_from_monday() as i64;
    let offset = (day.index() as i64 - start_index).rem_euclid(7);
    week_start + Duration::days(offset)
}

/// Instant for `hour:00` local time on `date` in `zone`.
///
/// Ambiguous times take the earlier instant; times inside a DST gap move
/// forward one hour.
pub fn localize(zone: Tz, date: NaiveDate, hour: u32) -> ScheduleResult<DateTime<Tz>> {
    let naive = date
        .and_hms_opt(hour, 0, 0)
        .ok_or_else(|| calendar_error(&format!("Invalid hour {} on {}", hour, date)))?;

    match zone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => zone
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()
            .ok_or_else(|| {
                calendar_error(&format!("{} does not exist in {}", naive, zone.name()))
            }),
    }
}
