//! Text grammar used to read schedule rows.
//!
//! All patterns are compiled once. The lookup tables are plain ordered
//! slices: earlier entries win when several could match.

use super::models::{DayLabel, Meridiem, Shift};
use lazy_static::lazy_static;
use regex::Regex;

/// Single-character misreads of the hour 1 in front of a meridiem
const OCR_CORRECTIONS: &[(&str, &str)] = &[(r"(?i)\b[il]am\b", "1am"), (r"(?i)\b[il]pm\b", "1pm")];

/// Day name synonyms, checked in this order
const DAY_SYNONYMS: &[(&str, DayLabel)] = &[
    ("Monday", DayLabel::Mon),
    ("Mon", DayLabel::Mon),
    ("Tuesday", DayLabel::Tue),
    ("Tue", DayLabel::Tue),
    ("Tues", DayLabel::Tue),
    ("Wednesday", DayLabel::Wed),
    ("Wed", DayLabel::Wed),
    ("Weds", DayLabel::Wed),
    ("Thursday", DayLabel::Thu),
    ("Thu", DayLabel::Thu),
    ("Thur", DayLabel::Thu),
    ("Thurs", DayLabel::Thu),
    ("Friday", DayLabel::Fri),
    ("Fri", DayLabel::Fri),
    ("Saturday", DayLabel::Sat),
    ("Sat", DayLabel::Sat),
    ("Sunday", DayLabel::Sun),
    ("Sun", DayLabel::Sun),
];

const MERIDIEM: &str = r"a\.?m\.?|p\.?m\.?";

/// A named variant of the time range grammar
pub struct TimePattern {
    pub name: &'static str,
    regex: Regex,
}

impl TimePattern {
    fn new(name: &'static str, pattern: &str) -> Self {
        let pattern = pattern.replace("{M}", MERIDIEM);
        Self {
            name,
            regex: Regex::new(&format!("(?i){}", pattern))
                .expect("time range pattern must compile"),
        }
    }

    /// First range this variant finds in `text` whose hours are valid
    fn find(&self, text: &str) -> Option<Shift> {
        self.regex.captures_iter(text).find_map(|caps| {
            let start_hour = caps.name("start")?.as_str().parse::<u8>().ok()?;
            let end_hour = caps.name("end")?.as_str().parse::<u8>().ok()?;
            let start_meridiem = Meridiem::from_marker(caps.name("start_mer")?.as_str());
            let end_meridiem = Meridiem::from_marker(caps.name("end_mer")?.as_str());

            Shift::new(start_hour, start_meridiem, end_hour, end_meridiem)
        })
    }
}

lazy_static! {
    static ref CORRECTIONS: Vec<(Regex, &'static str)> = OCR_CORRECTIONS
        .iter()
        .map(|(pattern, replacement)| {
            (
                Regex::new(pattern).expect("correction pattern must compile"),
                *replacement,
            )
        })
        .collect();

    static ref DAY_PATTERNS: Vec<(Regex, DayLabel)> = DAY_SYNONYMS
        .iter()
        .map(|(name, day)| {
            (
                Regex::new(&format!(r"(?i)\b{}\b", name)).expect("day pattern must compile"),
                *day,
            )
        })
        .collect();

    static ref DATE_NUMBER: Regex = Regex::new(r"\b(\d{1,2})\b").expect("date pattern must compile");

    static ref NOT_SCHEDULED: Regex =
        Regex::new(r"(?i)not\s+scheduled").expect("not scheduled pattern must compile");

    /// Time range variants, tried in order
    pub static ref TIME_PATTERNS: Vec<TimePattern> = vec![
        // 2pm - 10pm, 2pm:10pm
        TimePattern::new(
            "separated",
            r"(?P<start>\d{1,2})\s*(?P<start_mer>{M})\s*[-–—:]\s*(?P<end>\d{1,2})\s*(?P<end_mer>{M})",
        ),
        // 2pm 10pm
        TimePattern::new(
            "spaced",
            r"(?P<start>\d{1,2})\s*(?P<start_mer>{M})\s+(?P<end>\d{1,2})\s*(?P<end_mer>{M})",
        ),
    ];
}

/// Rewrite the fixed set of known misreads
pub fn apply_ocr_corrections(text: &str) -> String {
    CORRECTIONS
        .iter()
        .fold(text.to_string(), |acc, (regex, replacement)| {
            regex.replace_all(&acc, *replacement).into_owned()
        })
}

/// First day synonym found in the text, in table order
pub fn find_day(text: &str) -> Option<DayLabel> {
    DAY_PATTERNS
        .iter()
        .find(|(regex, _)| regex.is_match(text))
        .map(|(_, day)| *day)
}

/// The first standalone 1-2 digit number, if it is a valid day of month
pub fn find_date_number(text: &str) -> Option<u32> {
    let number = DATE_NUMBER
        .captures(text)?
        .get(1)?
        .as_str()
        .parse::<u32>()
        .ok()?;

    (1..=31).contains(&number).then_some(number)
}

pub fn is_not_scheduled(text: &str) -> bool {
    NOT_SCHEDULED.is_match(text)
}

/// Try each time range variant in order; the first hit wins
pub fn match_time_range(text: &str) -> Option<(Shift, &'static str)> {
    TIME_PATTERNS
        .iter()
        .find_map(|pattern| pattern.find(text).map(|shift| (shift, pattern.name)))
}

/// An early-morning start paired with a 1am end is read as ending at 11am
pub fn correct_end_hour(shift: Shift) -> Shift {
    let misread = shift.end_hour() == 1
        && shift.end_meridiem() == Meridiem::Am
        && shift.start_hour() >= 2
        && shift.start_meridiem() == Meridiem::Am;

    if misread {
        shift.with_end_hour(11).unwrap_or(shift)
    } else {
        shift
    }
}
