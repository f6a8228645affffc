//! Calendar event generation from a weekly shift table, plus the export
//! formats built from the generated events.

pub mod ics;
pub mod models;
pub mod provider;
pub mod time;

pub use models::{CalendarEvent, EventCategory, WeeklySchedule};

use crate::components::extractor::{DayLabel, ShiftEntry, ShiftTable};
use crate::error::{calendar_error, ScheduleResult};
use chrono::{Duration, NaiveDate};
use chrono_tz::Tz;
use models::{DAY_OFF_END_HOUR, DAY_OFF_START_HOUR};
use tracing::debug;

/// One event per day of the week, ordered by date.
///
/// Fails only when no week start is given or a local time cannot be
/// placed in `zone`.
pub fn generate(
    shifts: &ShiftTable,
    week_start_date: Option<NaiveDate>,
    zone: Tz,
) -> ScheduleResult<Vec<CalendarEvent>> {
    let week_start =
        week_start_date.ok_or_else(|| calendar_error("Week start date is missing"))?;

    let mut events = DayLabel::ALL
        .iter()
        .map(|day| build_event(*day, shifts.get(*day), week_start, zone))
        .collect::<ScheduleResult<Vec<_>>>()?;

    events.sort_by_key(|event| event.date);
    Ok(events)
}

impl WeeklySchedule {
    /// Generate this week's events in `zone`
    pub fn events(&self, zone: Tz) -> ScheduleResult<Vec<CalendarEvent>> {
        generate(&self.shifts, Some(self.week_start_date), zone)
    }
}

fn build_event(
    day: DayLabel,
    entry: ShiftEntry,
    week_start: NaiveDate,
    zone: Tz,
) -> ScheduleResult<CalendarEvent> {
    let date = time::event_date(week_start, day);

    let (category, start, end) = match entry {
        ShiftEntry::DayOff => (
            EventCategory::DayOff,
            time::localize(zone, date, DAY_OFF_START_HOUR)?,
            time::localize(zone, date, DAY_OFF_END_HOUR)?,
        ),
        ShiftEntry::Shift(shift) => {
            let end_date = if shift.crosses_midnight() {
                date + Duration::days(1)
            } else {
                date
            };

            (
                EventCategory::WorkShift,
                time::localize(zone, date, shift.start_hour_24())?,
                time::localize(zone, end_date, shift.end_hour_24())?,
            )
        }
    };

    debug!("{} {}: {} -> {}", day, date, start, end);

    Ok(CalendarEvent {
        day,
        date,
        summary: category.summary().to_string(),
        category,
        start,
        end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::extractor::extract_lines;
    use chrono::{Datelike, Timelike, Weekday};
    use chrono_tz::America::Chicago;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_seven_events_in_date_order() {
        let shifts = extract_lines(["Mon 9am-5pm", "Fri 10pm-6am"]);
        let events = generate(&shifts, Some(date(2025, 10, 13)), Chicago).unwrap();

        assert_eq!(events.len(), 7);
        assert!(events.windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(events[0].day, DayLabel::Mon);
        assert_eq!(events[0].category, EventCategory::WorkShift);
        assert_eq!(events[0].summary, "Work Shift 💼");
        assert_eq!(events[1].category, EventCategory::DayOff);
        assert_eq!(events[1].summary, "Day Off 🌴");
    }

    #[test]
    fn test_week_starting_midweek() {
        let shifts = extract_lines(["Mon 9am - 5pm"]);
        let wednesday = date(2025, 10, 15);
        let events = generate(&shifts, Some(wednesday), Chicago).unwrap();

        // Ordered from the start date onwards
        assert_eq!(events[0].day, DayLabel::Wed);
        assert_eq!(events[0].date, wednesday);

        let monday = events.iter().find(|e| e.day == DayLabel::Mon).unwrap();
        assert_eq!(monday.date, date(2025, 10, 20));
        assert_eq!(monday.start.weekday(), Weekday::Mon);
        assert_eq!(monday.start.hour(), 9);
        assert_eq!(monday.end.hour(), 17);
    }

    #[test]
    fn test_midnight_crossing_shift() {
        let shifts = extract_lines(["Thu 10pm - 6am"]);
        let events = generate(&shifts, Some(date(2025, 10, 13)), Chicago).unwrap();
        let thursday = events.iter().find(|e| e.day == DayLabel::Thu).unwrap();

        assert_eq!(thursday.start.to_rfc3339(), "2025-10-16T22:00:00-05:00");
        assert_eq!(thursday.end.to_rfc3339(), "2025-10-17T06:00:00-05:00");
    }

    #[test]
    fn test_day_off_window() {
        let shifts = ShiftTable::all_day_off();
        let events = generate(&shifts, Some(date(2025, 10, 13)), Chicago).unwrap();

        for event in &events {
            assert_eq!(event.category, EventCategory::DayOff);
            assert_eq!(event.start.hour(), DAY_OFF_START_HOUR);
            assert_eq!(event.end.hour(), DAY_OFF_END_HOUR);
            assert_eq!(event.start.date_naive(), event.date);
        }
    }

    #[test]
    fn test_noon_and_midnight_hours() {
        let shifts = extract_lines(["Tue 12pm-8pm", "Wed 4pm-12am"]);
        let events = generate(&shifts, Some(date(2025, 10, 13)), Chicago).unwrap();

        let tuesday = &events[1];
        assert_eq!(tuesday.start.hour(), 12);
        assert_eq!(tuesday.end.hour(), 20);

        // Ending at 12am means midnight at the start of Thursday
        let wednesday = &events[2];
        assert_eq!(wednesday.end.to_rfc3339(), "2025-10-16T00:00:00-05:00");
    }

    #[test]
    fn test_missing_week_start() {
        let shifts = ShiftTable::all_day_off();
        assert!(generate(&shifts, None, Chicago).is_err());
    }

    #[test]
    fn test_weekly_schedule_events() {
        let schedule = WeeklySchedule::new(date(2025, 10, 13), extract_lines(["Sat 6am-2pm"]));
        let events = schedule.events(chrono_tz::Europe::Helsinki).unwrap();
        let saturday = &events[5];

        assert_eq!(saturday.day, DayLabel::Sat);
        assert_eq!(saturday.start.to_rfc3339(), "2025-10-18T06:00:00+03:00");
    }
}
