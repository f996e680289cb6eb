//! Reading ICS content back with the icalendar crate's parser.
//!
//! Only the properties needed to check an export are read: UID, SUMMARY,
//! DTSTART and DTEND of each VEVENT.

use chrono::{DateTime, NaiveDateTime, Utc};
use icalendar::{
    CalendarDateTime, DatePerhapsTime,
    parser::{Component, read_calendar, unfold},
};

/// A DTSTART/DTEND value as written in the file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IcsDateTime {
    Zoned { datetime: NaiveDateTime, tzid: String },
    Utc(DateTime<Utc>),
    Floating(NaiveDateTime),
}

/// The parts of a VEVENT read back from ICS content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEvent {
    pub uid: String,
    pub summary: Option<String>,
    pub start: IcsDateTime,
    pub end: IcsDateTime,
}

/// Parse every VEVENT with a UID, DTSTART and DTEND.
/// Events missing one of them, or content that is not a calendar, give
/// nothing back.
pub fn parse_ics(content: &str) -> Vec<ParsedEvent> {
    let unfolded = unfold(content);
    let Ok(calendar) = read_calendar(&unfolded) else {
        return Vec::new();
    };

    calendar
        .components
        .iter()
        .filter(|c| c.name == "VEVENT")
        .filter_map(parse_vevent)
        .collect()
}

fn parse_vevent(vevent: &Component) -> Option<ParsedEvent> {
    let uid = vevent.find_prop("UID")?.val.to_string();
    let summary = vevent
        .find_prop("SUMMARY")
        .map(|p| unescape_text(p.val.as_ref()));
    let start = to_ics_datetime(DatePerhapsTime::try_from(vevent.find_prop("DTSTART")?).ok()?)?;
    let end = to_ics_datetime(DatePerhapsTime::try_from(vevent.find_prop("DTEND")?).ok()?)?;

    Some(ParsedEvent {
        uid,
        summary,
        start,
        end,
    })
}

/// All-day values are never written by this crate and are skipped
fn to_ics_datetime(value: DatePerhapsTime) -> Option<IcsDateTime> {
    match value {
        DatePerhapsTime::Date(_) => None,
        DatePerhapsTime::DateTime(CalendarDateTime::Utc(dt)) => Some(IcsDateTime::Utc(dt)),
        DatePerhapsTime::DateTime(CalendarDateTime::Floating(naive)) => {
            Some(IcsDateTime::Floating(naive))
        }
        DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone { date_time, tzid }) => {
            Some(IcsDateTime::Zoned {
                datetime: date_time,
                tzid,
            })
        }
    }
}

/// Undo RFC 5545 TEXT escaping (`\\`, `\;`, `\,`, `\n`)
pub fn unescape_text(value: &str) -> String {
    let mut unescaped = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            unescaped.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => unescaped.push('\n'),
            Some(other) => unescaped.push(other),
            None => unescaped.push('\\'),
        }
    }

    unescaped
}
