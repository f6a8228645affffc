use super::models::{DayLabel, Shift, ShiftEntry, ShiftTable};
use super::patterns;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Everything read from a single row
#[derive(Debug, Clone, PartialEq)]
pub struct RowSignals {
    /// Row text after misread corrections
    pub text: String,
    pub day: Option<DayLabel>,
    pub date: Option<u32>,
    pub not_scheduled: bool,
    /// Time range as read, before the end-hour correction
    pub time: Option<Shift>,
}

impl RowSignals {
    pub fn read(raw: &str) -> Self {
        let text = patterns::apply_ocr_corrections(raw);

        let day = patterns::find_day(&text);
        let date = patterns::find_date_number(&text);
        let not_scheduled = patterns::is_not_scheduled(&text);
        let time = patterns::match_time_range(&text).map(|(shift, pattern)| {
            debug!("Time range {} matched by '{}' pattern", shift, pattern);
            shift
        });

        Self {
            text,
            day,
            date,
            not_scheduled,
            time,
        }
    }
}

/// State carried from row to row while walking a schedule
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractorState {
    /// Most recent day name seen
    pub last_day_found: Option<DayLabel>,
    /// Day of month seen alongside that day name
    pub last_date_number: Option<u32>,
    /// Most recent shift written to the schedule
    pub last_time_saved: Option<Shift>,
    /// Shift read after a day off, waiting for its day
    pub pending_shift: Option<Shift>,
    pub schedule: BTreeMap<DayLabel, ShiftEntry>,
}

impl ExtractorState {
    /// Apply one row and return the next state
    pub fn step(mut self, row: &RowSignals) -> Self {
        debug!(
            "Row '{}': day={:?} date={:?} time={:?} last_day={:?} last_date={:?}",
            row.text, row.day, row.date, row.time, self.last_day_found, self.last_date_number
        );

        self.infer_from_date(row);

        match row.day {
            Some(day) => self.record_named_day(day, row),
            None => {
                if let Some(time) = row.time {
                    self.record_orphaned_time(time);
                }
            }
        }

        self
    }

    /// Complete the schedule, giving every unseen day a day off
    pub fn finish(self) -> ShiftTable {
        ShiftTable::complete(self.schedule)
    }

    /// A date one past the last one seen, with no day name, belongs to
    /// the day after the last named day
    fn infer_from_date(&mut self, row: &RowSignals) {
        if row.day.is_some() {
            return;
        }

        let (Some(date), Some(last_date), Some(last_day)) =
            (row.date, self.last_date_number, self.last_day_found)
        else {
            return;
        };

        if date != last_date + 1 {
            return;
        }

        let inferred = last_day.next();
        info!(
            "Inferred {} from date {} (after {} on {})",
            inferred, date, last_day, last_date
        );

        if self.schedule.contains_key(&inferred) {
            return;
        }

        if let Some(pending) = self.pending_shift.take() {
            info!("Assigned {} to {} from pending", pending, inferred);
            self.schedule.insert(inferred, pending.into());
        } else if let Some(saved) = self.last_time_saved {
            info!("Assigned {} to {} from last saved", saved, inferred);
            self.schedule.insert(inferred, saved.into());
        }
    }

    fn record_named_day(&mut self, day: DayLabel, row: &RowSignals) {
        self.last_day_found = Some(day);
        if let Some(date) = row.date {
            debug!("Mapped date {} to {}", date, day);
            self.last_date_number = Some(date);
        }

        if row.not_scheduled {
            debug!("{} is not scheduled", day);
            self.schedule.insert(day, ShiftEntry::DayOff);
            return;
        }

        if let Some(time) = row.time {
            let shift = corrected(time, day);
            self.schedule.insert(day, shift.into());
            self.last_time_saved = Some(shift);
            self.pending_shift = None;
            debug!("Saved {}: {}", day, shift);
        }
    }

    fn record_orphaned_time(&mut self, time: Shift) {
        let Some(last_day) = self.last_day_found else {
            debug!("Time {} appeared before any day, ignoring", time);
            return;
        };

        let shift = corrected(time, last_day);

        if self.schedule.get(&last_day) == Some(&ShiftEntry::DayOff) {
            // A day marked off cannot take this time; hold it for the next day
            match self.pending_shift {
                Some(held) => debug!("Already holding {}, dropping {}", held, shift),
                None => {
                    debug!("Holding {} after {} was not scheduled", shift, last_day);
                    self.pending_shift = Some(shift);
                }
            }
            return;
        }

        debug!("Assigning orphaned time {} to {}", shift, last_day);
        self.schedule.insert(last_day, shift.into());
        self.last_time_saved = Some(shift);
    }
}

fn corrected(time: Shift, day: DayLabel) -> Shift {
    let shift = patterns::correct_end_hour(time);
    if shift != time {
        info!("OCR correction for {}: {} -> {}", day, time, shift);
    }
    shift
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(lines: &[&str]) -> ExtractorState {
        lines
            .iter()
            .fold(ExtractorState::default(), |state, line| {
                state.step(&RowSignals::read(line))
            })
    }

    #[test]
    fn test_row_signals() {
        let row = RowSignals::read("Wed 5 5am-Iam");
        assert_eq!(row.text, "Wed 5 5am-1am");
        assert_eq!(row.day, Some(DayLabel::Wed));
        assert_eq!(row.date, Some(5));
        assert!(!row.not_scheduled);
        // Correction is applied when recording, not when reading
        assert_eq!(row.time.unwrap().to_string(), "5am - 1am");
    }

    #[test]
    fn test_state_tracks_last_day_and_date() {
        let state = run(&["Mon 3 2pm-10pm"]);
        assert_eq!(state.last_day_found, Some(DayLabel::Mon));
        assert_eq!(state.last_date_number, Some(3));
        assert_eq!(state.last_time_saved.unwrap().to_string(), "2pm - 10pm");
        assert!(state.pending_shift.is_none());
    }

    #[test]
    fn test_date_without_day_name_keeps_last_date() {
        let state = run(&["Mon 3 2pm-10pm", "4 2pm-10pm"]);
        assert_eq!(state.last_day_found, Some(DayLabel::Mon));
        assert_eq!(state.last_date_number, Some(3));
        assert!(state.schedule.contains_key(&DayLabel::Tue));
    }

    #[test]
    fn test_pending_after_day_off() {
        let state = run(&["Thu 16 Not Scheduled", "3pm-9pm"]);
        assert_eq!(state.schedule.get(&DayLabel::Thu), Some(&ShiftEntry::DayOff));
        assert_eq!(state.pending_shift.unwrap().to_string(), "3pm - 9pm");
        assert!(state.last_time_saved.is_none());
    }

    #[test]
    fn test_second_orphan_after_day_off_is_dropped() {
        let state = run(&["Thu 16 Not Scheduled", "3pm-9pm", "4pm-10pm"]);
        assert_eq!(state.pending_shift.unwrap().to_string(), "3pm - 9pm");
    }

    #[test]
    fn test_named_day_clears_pending() {
        let state = run(&["Thu 16 Not Scheduled", "3pm-9pm", "Sat 18 8am-4pm"]);
        assert!(state.pending_shift.is_none());
        assert_eq!(state.last_time_saved.unwrap().to_string(), "8am - 4pm");
    }

    #[test]
    fn test_time_before_any_day_is_ignored() {
        let state = run(&["Week of Oct 13", "9am-5pm"]);
        assert!(state.schedule.is_empty());
        assert!(state.last_time_saved.is_none());
    }

    #[test]
    fn test_step_is_pure() {
        let row = RowSignals::read("Fri 7 6am-2pm");
        let a = ExtractorState::default().step(&row);
        let b = ExtractorState::default().step(&row);
        assert_eq!(a, b);
    }

    #[test]
    fn test_inference_wraps_from_sunday_to_monday() {
        let state = run(&["Sun 12 9am-5pm", "13"]);
        assert_eq!(
            state.schedule.get(&DayLabel::Mon).map(ToString::to_string),
            Some("9am - 5pm".to_string())
        );
        // Inference leaves the last named day in place
        assert_eq!(state.last_day_found, Some(DayLabel::Sun));
        assert_eq!(state.last_date_number, Some(12));
    }

    #[test]
    fn test_inferred_day_takes_last_saved_shift() {
        let state = run(&["Tue 7 8am-4pm", "8"]);
        assert_eq!(state.pending_shift, None);
        assert_eq!(
            state.schedule.get(&DayLabel::Wed),
            state.schedule.get(&DayLabel::Tue)
        );
        assert_eq!(state.schedule.len(), 2);
    }

    #[test]
    fn test_inference_needs_next_date() {
        for gap in ["9", "7", "6"] {
            let state = run(&["Tue 7 8am-4pm", gap]);
            assert_eq!(state.schedule.len(), 1, "date {}", gap);
            assert!(state.schedule.contains_key(&DayLabel::Tue));
        }
    }
}
