//! iCalendar (RFC 5545) writer: one VEVENT per generated event.

use super::models::CalendarEvent;
use chrono::{DateTime, NaiveDate, Utc};

const PRODUCT_ID: &str = "-//schedule-snap//weekly shifts//EN";
const UID_DOMAIN: &str = "schedule-snap";
/// Content lines longer than this many octets are folded
const MAX_LINE_OCTETS: usize = 75;

/// Name offered for the exported file
pub fn file_name(week_start: NaiveDate) -> String {
    format!("schedule_{}.ics", week_start.format("%Y-%m-%d"))
}

/// Render events as a calendar document with CRLF line endings
pub fn write_calendar(events: &[CalendarEvent], stamp: DateTime<Utc>) -> String {
    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{}", PRODUCT_ID),
        "CALSCALE:GREGORIAN".to_string(),
    ];

    for event in events {
        lines.push("BEGIN:VEVENT".to_string());
        lines.push(format!(
            "UID:{}-{}@{}",
            event.date.format("%Y%m%d"),
            event.category.slug(),
            UID_DOMAIN
        ));
        lines.push(format!("DTSTAMP:{}", utc_stamp(stamp)));
        lines.push(format!("DTSTART:{}", utc_stamp(event.start.with_timezone(&Utc))));
        lines.push(format!("DTEND:{}", utc_stamp(event.end.with_timezone(&Utc))));
        lines.push(format!("SUMMARY:{}", escape_text(&event.summary)));
        lines.push(format!("CATEGORIES:{}", escape_text(event.category.label())));
        lines.push("END:VEVENT".to_string());
    }

    lines.push("END:VCALENDAR".to_string());

    lines
        .iter()
        .map(|line| fold_line(line) + "\r\n")
        .collect()
}

fn utc_stamp(dt: DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

fn escape_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace('\n', "\\n")
}

/// Split a content line so no physical line exceeds the octet limit.
/// Continuation lines start with a single space.
fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return line.to_string();
    }

    let mut folded = String::with_capacity(line.len() + line.len() / MAX_LINE_OCTETS * 3);
    let mut current_len = 0;

    for ch in line.chars() {
        let ch_len = ch.len_utf8();
        // The leading space of a continuation counts toward its length
        if current_len + ch_len > MAX_LINE_OCTETS {
            folded.push_str("\r\n ");
            current_len = 1;
        }
        folded.push(ch);
        current_len += ch_len;
    }

    folded
}
