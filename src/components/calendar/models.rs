use crate::components::extractor::{DayLabel, ShiftTable};
use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

pub const WORK_SHIFT_SUMMARY: &str = "Work Shift 💼";
pub const DAY_OFF_SUMMARY: &str = "Day Off 🌴";

/// Local clock hours of the placeholder block shown on a day off
pub const DAY_OFF_START_HOUR: u32 = 2;
pub const DAY_OFF_END_HOUR: u32 = 11;

/// Calendar provider colour ids
pub const WORK_SHIFT_COLOR_ID: &str = "9";
pub const DAY_OFF_COLOR_ID: &str = "10";

/// A shift table anchored to a concrete week
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    /// Any date in the week; it need not be a Monday
    pub week_start_date: NaiveDate,
    pub shifts: ShiftTable,
}

impl WeeklySchedule {
    pub fn new(week_start_date: NaiveDate, shifts: ShiftTable) -> Self {
        Self {
            week_start_date,
            shifts,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    WorkShift,
    DayOff,
}

impl EventCategory {
    pub fn summary(self) -> &'static str {
        match self {
            EventCategory::WorkShift => WORK_SHIFT_SUMMARY,
            EventCategory::DayOff => DAY_OFF_SUMMARY,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EventCategory::WorkShift => "Work Shift",
            EventCategory::DayOff => "Day Off",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            EventCategory::WorkShift => "work-shift",
            EventCategory::DayOff => "day-off",
        }
    }

    pub fn color_id(self) -> &'static str {
        match self {
            EventCategory::WorkShift => WORK_SHIFT_COLOR_ID,
            EventCategory::DayOff => DAY_OFF_COLOR_ID,
        }
    }
}

/// A concrete event ready for export
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub day: DayLabel,
    /// Calendar date the event starts on
    pub date: NaiveDate,
    pub summary: String,
    pub category: EventCategory,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}
