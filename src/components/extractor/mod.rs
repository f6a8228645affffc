//! Schedule extraction: walks grouped rows and builds the weekly shift table.
//!
//! The walk is a fold over rows with an explicit [`ExtractorState`]. Day
//! attribution comes from a day name on the row, or, when recognition
//! dropped the name, from the day-of-month following the last one seen.
//! Time ranges read after a day marked "Not Scheduled" are held until a
//! later day can take them.

pub mod models;
pub mod patterns;
pub mod state;

pub use models::{DayLabel, Meridiem, Shift, ShiftEntry, ShiftTable, NOT_SCHEDULED};
pub use state::{ExtractorState, RowSignals};

use super::regions::Row;
use tracing::info;

/// Build the shift table from rows in reading order. Never fails: rows
/// that match nothing are skipped and unseen days are days off.
pub fn extract(rows: &[Row]) -> ShiftTable {
    extract_lines(rows.iter().map(Row::text))
}

/// Same as [`extract`], over already-joined row texts
pub fn extract_lines<I, S>(lines: I) -> ShiftTable
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let state = lines
        .into_iter()
        .fold(ExtractorState::default(), |state, line| {
            state.step(&RowSignals::read(line.as_ref()))
        });

    let table = state.finish();
    info!("Extracted {} shifts", table.shift_count());
    table
}
