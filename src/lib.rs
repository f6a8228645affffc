pub mod cli;
pub mod components;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod startup;

pub use components::calendar::{generate, CalendarEvent, EventCategory, WeeklySchedule};
pub use components::extractor::{extract, DayLabel, Meridiem, Shift, ShiftEntry, ShiftTable};
pub use components::regions::{group_into_rows, Row, TextRegion};
pub use pipeline::ScheduleParser;
