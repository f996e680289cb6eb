//! Human-readable labels for agenda display.

use chrono::{NaiveDate, NaiveTime, TimeZone};

use crate::event::Event;

/// "March 2025"
pub fn month_label(year: i32, month: u32) -> String {
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(first) => first.format("%B %Y").to_string(),
        None => format!("{year}-{month:02}"),
    }
}

/// "Monday, March 3, 2025"
pub fn long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// "9:00 AM"
pub fn time_12h(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

/// "9:00 AM - 10:00 AM CST", falling back to the zone identifier when the
/// timezone cannot be resolved.
pub fn time_range(event: &Event) -> String {
    let zone = timezone_abbreviation(event).unwrap_or_else(|| event.timezone.clone());
    format!(
        "{} - {} {}",
        time_12h(event.start_time),
        time_12h(event.end_time),
        zone
    )
}

fn timezone_abbreviation(event: &Event) -> Option<String> {
    let tz = event.tz()?;
    let local = tz
        .from_local_datetime(&event.date.and_time(event.start_time))
        .earliest()?;
    Some(local.format("%Z").to_string())
}
