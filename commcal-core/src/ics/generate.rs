//! ICS file generation.
//!
//! Calendars are built with the icalendar crate, which takes care of CRLF
//! line endings, folding and TEXT escaping. The output is then adjusted
//! for the site (PRODID, METHOD).

use chrono::{DateTime, NaiveTime, Utc};
use icalendar::{Calendar, Component, EventLike, Property};

use crate::event::Event;
use crate::timezone::{FixedOffsetResolver, UtcResolver};

/// How DTSTART/DTEND values are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IcsStyle {
    /// Local wall clock time with a TZID parameter
    Zoned,
    /// UTC instant with a `Z` suffix, via the fixed-offset strategy
    Utc,
}

/// Calendar-level settings shared by every generated file.
#[derive(Debug, Clone)]
pub struct IcsOptions {
    /// Used in PRODID and X-WR-CALNAME
    pub site_name: String,
    /// Appended to every UID as `@domain`
    pub domain: String,
    /// DTSTAMP of every VEVENT
    pub generated_at: DateTime<Utc>,
}

/// Generate a calendar with TZID-qualified local times.
///
/// Returns None when there is nothing to export.
pub fn generate_zoned_ics(events: &[Event], options: &IcsOptions) -> Option<String> {
    generate_ics(events, options, DateStyle::Zoned)
}

/// Generate a calendar with UTC times for clients that mishandle TZID.
///
/// Every event is converted with the same fixed offset, whatever its own
/// timezone says. Returns None when there is nothing to export.
pub fn generate_utc_ics(
    events: &[Event],
    options: &IcsOptions,
    resolver: &FixedOffsetResolver,
) -> Option<String> {
    generate_ics(events, options, DateStyle::Utc(resolver))
}

enum DateStyle<'a> {
    Zoned,
    Utc(&'a FixedOffsetResolver),
}

fn generate_ics(events: &[Event], options: &IcsOptions, style: DateStyle<'_>) -> Option<String> {
    if events.is_empty() {
        return None;
    }

    let mut cal = Calendar::new();
    cal.name(&options.site_name);

    let dtstamp = options.generated_at.format("%Y%m%dT%H%M%SZ").to_string();

    for event in events {
        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&format!("{}@{}", event.uid, options.domain));
        ics_event.add_property("DTSTAMP", &dtstamp);

        add_datetime_property(&mut ics_event, "DTSTART", event, event.start_time, &style);
        add_datetime_property(&mut ics_event, "DTEND", event, event.end_time, &style);

        ics_event.summary(&normalize_newlines(&event.title));

        if !event.description.is_empty() {
            ics_event.description(&normalize_newlines(&event.description));
        }

        if let Some(ref location) = event.location {
            ics_event.location(&normalize_newlines(location));
        }

        if let Some(ref url) = event.url {
            ics_event.add_property("URL", url);
        }

        if let Some(ref event_type) = event.event_type {
            ics_event.add_property("CATEGORIES", event_type);
        }

        cal.push(ics_event.done());
    }

    let cal = cal.done();
    Some(adjust_calendar_header(&cal.to_string(), &options.site_name))
}

/// Replace the crate's PRODID with the site's and announce the calendar as
/// published.
fn adjust_calendar_header(ics: &str, site_name: &str) -> String {
    let mut result = String::with_capacity(ics.len() + 64);

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str(&format!("PRODID:-//{site_name}//Community Calendar//EN\r\n"));
            result.push_str("METHOD:PUBLISH\r\n");
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

/// Add DTSTART/DTEND in the requested style
fn add_datetime_property(
    ics_event: &mut icalendar::Event,
    name: &str,
    event: &Event,
    time: NaiveTime,
    style: &DateStyle<'_>,
) {
    match style {
        DateStyle::Zoned => {
            let local = event.date.and_time(time);
            let mut prop = Property::new(name, local.format("%Y%m%dT%H%M%S").to_string());
            prop.add_parameter("TZID", &event.timezone);
            ics_event.append_property(prop);
        }
        DateStyle::Utc(resolver) => {
            let utc = resolver.to_utc(event.date, time, &event.timezone);
            ics_event.add_property(name, utc.format("%Y%m%dT%H%M%SZ").to_string());
        }
    }
}

/// TEXT values only know `\n` line breaks
fn normalize_newlines(value: &str) -> String {
    value.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Frequency, Recurrence};
    use crate::recurrence::expand_event;
    use chrono::{NaiveDate, TimeZone};

    fn make_options() -> IcsOptions {
        IcsOptions {
            site_name: "community".to_string(),
            domain: "community.example.org".to_string(),
            generated_at: Utc.with_ymd_and_hms(2025, 2, 1, 12, 0, 0).unwrap(),
        }
    }

    fn make_event() -> Event {
        Event {
            uid: "office-hours".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            timezone: "America/Chicago".to_string(),
            title: "Office Hours".to_string(),
            description: "Weekly drop-in".to_string(),
            event_type: Some("meeting".to_string()),
            location_type: None,
            location: None,
            url: None,
            recurrence: None,
        }
    }

    fn weekly_scenario() -> Vec<Event> {
        let mut event = make_event();
        event.recurrence = Some(Recurrence {
            frequency: Frequency::Weekly,
            interval: 1,
            until: NaiveDate::from_ymd_opt(2025, 3, 24),
        });
        expand_event(&event)
    }

    #[test]
    fn test_empty_export_is_none() {
        assert!(generate_zoned_ics(&[], &make_options()).is_none());
        assert!(generate_utc_ics(&[], &make_options(), &FixedOffsetResolver::default()).is_none());
    }

    #[test]
    fn test_zoned_ics_has_tzid_times() {
        let ics = generate_zoned_ics(&[make_event()], &make_options()).unwrap();

        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(ics.ends_with("END:VCALENDAR\r\n"));
        assert!(
            ics.contains("DTSTART;TZID=America/Chicago:20250303T090000\r\n"),
            "ICS:\n{}",
            ics
        );
        assert!(ics.contains("DTEND;TZID=America/Chicago:20250303T100000\r\n"));
        assert!(ics.contains("DTSTAMP:20250201T120000Z\r\n"));
    }

    #[test]
    fn test_utc_ics_scenario_has_four_utc_events() {
        let ics = generate_utc_ics(
            &weekly_scenario(),
            &make_options(),
            &FixedOffsetResolver::default(),
        )
        .unwrap();

        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 4);

        let starts: Vec<&str> = ics.lines().filter(|l| l.starts_with("DTSTART")).collect();
        assert_eq!(starts.len(), 4);
        assert!(starts.iter().all(|l| l.ends_with('Z')), "Got: {:?}", starts);

        // Fixed UTC-05:00, even though Chicago is at UTC-06:00 on March 3rd
        assert_eq!(starts[0], "DTSTART:20250303T140000Z");
    }

    #[test]
    fn test_uid_gets_domain_suffix() {
        let ics = generate_zoned_ics(&weekly_scenario(), &make_options()).unwrap();

        assert!(ics.contains("UID:office-hours@community.example.org\r\n"));
        assert!(ics.contains("UID:office-hours-2025-03-10@community.example.org\r\n"));
    }

    #[test]
    fn test_text_fields_are_escaped() {
        let mut event = make_event();
        event.title = "Rust, Go; C\\C++".to_string();
        event.description = "Line one\nLine two".to_string();
        event.location = Some("Hall A, Floor 2".to_string());

        let ics = generate_zoned_ics(&[event], &make_options()).unwrap();

        assert!(ics.contains("SUMMARY:Rust\\, Go\\; C\\\\C++\r\n"), "ICS:\n{}", ics);
        assert!(ics.contains("DESCRIPTION:Line one\\nLine two\r\n"));
        assert!(ics.contains("LOCATION:Hall A\\, Floor 2\r\n"));
    }

    #[test]
    fn test_absent_optional_fields_are_omitted() {
        let mut event = make_event();
        event.description = String::new();
        event.event_type = None;

        let ics = generate_zoned_ics(&[event], &make_options()).unwrap();

        assert!(!ics.contains("LOCATION"));
        assert!(!ics.contains("URL"));
        assert!(!ics.contains("DESCRIPTION"));
        assert!(!ics.contains("CATEGORIES"));
    }

    #[test]
    fn test_url_and_location_present_when_set() {
        let mut event = make_event();
        event.url = Some("https://meet.example.org/office-hours".to_string());
        event.location = Some("Online".to_string());

        let ics = generate_zoned_ics(&[event], &make_options()).unwrap();

        assert!(ics.contains("URL:https://meet.example.org/office-hours\r\n"));
        assert!(ics.contains("LOCATION:Online\r\n"));
        assert!(ics.contains("CATEGORIES:meeting\r\n"));
    }

    #[test]
    fn test_long_lines_are_folded() {
        let mut event = make_event();
        event.description = "é".repeat(100);

        let ics = generate_zoned_ics(&[event], &make_options()).unwrap();

        // 75 octets of content plus the leading space of a continuation
        for line in ics.split("\r\n") {
            assert!(line.len() <= 76, "Line too long ({}): {}", line.len(), line);
        }
        assert!(ics.contains("\r\n é"));
    }

    #[test]
    fn test_carriage_returns_become_line_breaks() {
        let mut event = make_event();
        event.description = "a\r\nb\rc".to_string();

        let ics = generate_zoned_ics(&[event], &make_options()).unwrap();

        assert!(ics.contains("DESCRIPTION:a\\nb\\nc\r\n"), "ICS:\n{}", ics);
    }

    #[test]
    fn test_calendar_header_names_the_site() {
        let ics = generate_zoned_ics(&[make_event()], &make_options()).unwrap();

        assert!(ics.contains("VERSION:2.0\r\n"));
        assert!(ics.contains("PRODID:-//community//Community Calendar//EN\r\n"));
        assert!(ics.contains("CALSCALE:GREGORIAN\r\n"));
        assert!(ics.contains("METHOD:PUBLISH\r\n"));
        assert!(ics.contains("X-WR-CALNAME:community\r\n"));
        assert_eq!(ics.matches("PRODID:").count(), 1);
    }
}
