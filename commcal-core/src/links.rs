//! Pre-filled "add to calendar" links for web calendar services.
//!
//! Each service has its own date convention. Values are only URL-encoded.

use url::form_urlencoded;

use crate::event::Event;

const GOOGLE_CALENDAR_URL: &str = "https://calendar.google.com/calendar/render";
const OUTLOOK_CALENDAR_URL: &str = "https://outlook.live.com/calendar/0/deeplink/compose";

/// Google Calendar template link.
///
/// Dates are local wall clock times as plain digits with a `T` separator
/// (`20250303T090000/20250303T100000`); `ctz` names the zone.
pub fn google_calendar_url(event: &Event) -> String {
    let dates = format!(
        "{}/{}",
        event.date.and_time(event.start_time).format("%Y%m%dT%H%M%S"),
        event.date.and_time(event.end_time).format("%Y%m%dT%H%M%S")
    );

    let mut query = form_urlencoded::Serializer::new(String::new());
    query
        .append_pair("action", "TEMPLATE")
        .append_pair("text", &event.title)
        .append_pair("dates", &dates)
        .append_pair("ctz", &event.timezone)
        .append_pair("details", &details(event));
    if let Some(location) = location(event) {
        query.append_pair("location", location);
    }

    format!("{}?{}", GOOGLE_CALENDAR_URL, query.finish())
}

/// Outlook on the web compose link, with `YYYY-MM-DDTHH:MM:SS` local times.
pub fn outlook_calendar_url(event: &Event) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query
        .append_pair("path", "/calendar/action/compose")
        .append_pair("rru", "addevent")
        .append_pair("subject", &event.title)
        .append_pair(
            "startdt",
            &event.date.and_time(event.start_time).format("%Y-%m-%dT%H:%M:%S").to_string(),
        )
        .append_pair(
            "enddt",
            &event.date.and_time(event.end_time).format("%Y-%m-%dT%H:%M:%S").to_string(),
        )
        .append_pair("body", &details(event));
    if let Some(location) = location(event) {
        query.append_pair("location", location);
    }

    format!("{}?{}", OUTLOOK_CALENDAR_URL, query.finish())
}

/// Description, followed by the event link when there is one
fn details(event: &Event) -> String {
    match &event.url {
        Some(url) if event.description.is_empty() => url.clone(),
        Some(url) => format!("{}\n\n{}", event.description, url),
        None => event.description.clone(),
    }
}

/// Venue, or the meeting link for events without one
fn location(event: &Event) -> Option<&str> {
    event.location.as_deref().or(event.url.as_deref())
}
