use super::patterns;
use crate::error::Error;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Text persisted for a day without a shift
pub const NOT_SCHEDULED: &str = "Not Scheduled";

/// One of the seven schedule keys, in calendar order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DayLabel {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl DayLabel {
    pub const ALL: [DayLabel; 7] = [
        DayLabel::Mon,
        DayLabel::Tue,
        DayLabel::Wed,
        DayLabel::Thu,
        DayLabel::Fri,
        DayLabel::Sat,
        DayLabel::Sun,
    ];

    /// Position in the week, Monday = 0
    pub fn index(self) -> usize {
        self as usize
    }

    /// Label at `index` modulo 7
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 7]
    }

    /// The following day, wrapping Sunday to Monday
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DayLabel::Mon => "Mon",
            DayLabel::Tue => "Tue",
            DayLabel::Wed => "Wed",
            DayLabel::Thu => "Thu",
            DayLabel::Fri => "Fri",
            DayLabel::Sat => "Sat",
            DayLabel::Sun => "Sun",
        }
    }

    pub fn weekday(self) -> Weekday {
        match self {
            DayLabel::Mon => Weekday::Mon,
            DayLabel::Tue => Weekday::Tue,
            DayLabel::Wed => Weekday::Wed,
            DayLabel::Thu => Weekday::Thu,
            DayLabel::Fri => Weekday::Fri,
            DayLabel::Sat => Weekday::Sat,
            DayLabel::Sun => Weekday::Sun,
        }
    }
}

impl From<Weekday> for DayLabel {
    fn from(weekday: Weekday) -> Self {
        Self::from_index(weekday.num_days_from_monday() as usize)
    }
}

impl fmt::Display for DayLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    /// Read a marker such as "pm", "P.M." or "a.m"
    pub fn from_marker(marker: &str) -> Self {
        let cleaned: String = marker
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect::<String>()
            .to_ascii_lowercase();

        if cleaned.starts_with('p') {
            Meridiem::Pm
        } else {
            Meridiem::Am
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Meridiem::Am => "am",
            Meridiem::Pm => "pm",
        }
    }
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convert a 12-hour clock hour to hour-of-day
pub fn to_24_hour(hour: u8, meridiem: Meridiem) -> u32 {
    let hour = u32::from(hour % 12);
    match meridiem {
        Meridiem::Am => hour,
        Meridiem::Pm => hour + 12,
    }
}

/// A single time range on a 12-hour clock. Hours are always 1-12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shift {
    start_hour: u8,
    start_meridiem: Meridiem,
    end_hour: u8,
    end_meridiem: Meridiem,
}

impl Shift {
    /// Build a shift, rejecting hours outside 1-12
    pub fn new(
        start_hour: u8,
        start_meridiem: Meridiem,
        end_hour: u8,
        end_meridiem: Meridiem,
    ) -> Option<Self> {
        let valid = |hour: u8| (1..=12).contains(&hour);
        if !valid(start_hour) || !valid(end_hour) {
            return None;
        }

        Some(Self {
            start_hour,
            start_meridiem,
            end_hour,
            end_meridiem,
        })
    }

    pub fn start_hour(&self) -> u8 {
        self.start_hour
    }

    pub fn start_meridiem(&self) -> Meridiem {
        self.start_meridiem
    }

    pub fn end_hour(&self) -> u8 {
        self.end_hour
    }

    pub fn end_meridiem(&self) -> Meridiem {
        self.end_meridiem
    }

    pub fn start_hour_24(&self) -> u32 {
        to_24_hour(self.start_hour, self.start_meridiem)
    }

    pub fn end_hour_24(&self) -> u32 {
        to_24_hour(self.end_hour, self.end_meridiem)
    }

    /// Whether the shift ends on the following calendar day
    pub fn crosses_midnight(&self) -> bool {
        self.end_hour_24() < self.start_hour_24()
    }

    /// Same shift ending at a different hour
    pub fn with_end_hour(self, end_hour: u8) -> Option<Self> {
        Self::new(
            self.start_hour,
            self.start_meridiem,
            end_hour,
            self.end_meridiem,
        )
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} - {}{}",
            self.start_hour, self.start_meridiem, self.end_hour, self.end_meridiem
        )
    }
}

/// What a single day holds once extraction completes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ShiftEntry {
    Shift(Shift),
    DayOff,
}

impl ShiftEntry {
    pub fn is_day_off(&self) -> bool {
        matches!(self, ShiftEntry::DayOff)
    }

    pub fn shift(&self) -> Option<&Shift> {
        match self {
            ShiftEntry::Shift(shift) => Some(shift),
            ShiftEntry::DayOff => None,
        }
    }
}

impl From<Shift> for ShiftEntry {
    fn from(shift: Shift) -> Self {
        ShiftEntry::Shift(shift)
    }
}

impl fmt::Display for ShiftEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShiftEntry::Shift(shift) => shift.fmt(f),
            ShiftEntry::DayOff => f.write_str(NOT_SCHEDULED),
        }
    }
}

impl FromStr for ShiftEntry {
    type Err = Error;

    /// Read the persisted text form with the same time grammar the
    /// extractor uses
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if patterns::is_not_scheduled(s) {
            return Ok(ShiftEntry::DayOff);
        }

        patterns::match_time_range(s)
            .map(|(shift, _)| ShiftEntry::Shift(shift))
            .ok_or_else(|| Error::Parse(s.to_string()))
    }
}

impl TryFrom<String> for ShiftEntry {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ShiftEntry> for String {
    fn from(entry: ShiftEntry) -> Self {
        entry.to_string()
    }
}

/// Complete day to entry mapping. Every day of the week is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<DayLabel, ShiftEntry>",
    into = "BTreeMap<DayLabel, ShiftEntry>"
)]
pub struct ShiftTable {
    entries: BTreeMap<DayLabel, ShiftEntry>,
}

impl ShiftTable {
    /// Fill any day missing from `partial` with a day off
    pub fn complete(mut partial: BTreeMap<DayLabel, ShiftEntry>) -> Self {
        for day in DayLabel::ALL {
            partial.entry(day).or_insert(ShiftEntry::DayOff);
        }
        Self { entries: partial }
    }

    /// A week with nothing scheduled
    pub fn all_day_off() -> Self {
        Self::complete(BTreeMap::new())
    }

    pub fn get(&self, day: DayLabel) -> ShiftEntry {
        self.entries
            .get(&day)
            .copied()
            .unwrap_or(ShiftEntry::DayOff)
    }

    /// Entries in calendar order, Monday first
    pub fn iter(&self) -> impl Iterator<Item = (DayLabel, ShiftEntry)> + '_ {
        self.entries.iter().map(|(day, entry)| (*day, *entry))
    }

    /// Number of days holding a shift
    pub fn shift_count(&self) -> usize {
        self.entries.values().filter(|e| !e.is_day_off()).count()
    }
}

impl Default for ShiftTable {
    fn default() -> Self {
        Self::all_day_off()
    }
}

impl From<BTreeMap<DayLabel, ShiftEntry>> for ShiftTable {
    fn from(partial: BTreeMap<DayLabel, ShiftEntry>) -> Self {
        Self::complete(partial)
    }
}

impl From<ShiftTable> for BTreeMap<DayLabel, ShiftEntry> {
    fn from(table: ShiftTable) -> Self {
        table.entries
    }
}

impl fmt::Display for ShiftTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (day, entry) in self.iter() {
            writeln!(f, "{}: {}", day, entry)?;
        }
        Ok(())
    }
}
